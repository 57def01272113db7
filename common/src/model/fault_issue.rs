use serde::{Deserialize, Serialize};

/// One entry of the fault-issue list offered in the defect form's dropdown.
///
/// Only active entries are ever offered; `id` is what gets stored on the
/// defect record, `name` is what the user sees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaultIssueOption {
    pub id: String,
    pub name: String,
}

impl FaultIssueOption {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
