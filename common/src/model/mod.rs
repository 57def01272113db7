pub mod defect;
pub mod fault_issue;
pub mod order;
