pub mod report_defect;
