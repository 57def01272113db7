//! Payloads exchanged with `/defect`.

use serde::{Deserialize, Serialize};

/// Form field names used by the rendered defect form and read back on submit.
pub mod fields {
    pub const PO_ID: &str = "custpage_po_id";
    pub const SUPPLIER_ID: &str = "custpage_supplier_id";
    pub const PLOT_ID: &str = "custpage_plot_id";
    pub const DEPARTMENT_ID: &str = "custpage_department_id";
    pub const LOCATION_ID: &str = "custpage_location_id";
    pub const FAULT_ISSUE: &str = "custpage_fault_issue";
    pub const SELECTED_ITEM: &str = "custpage_selected_item";
}

/// Query parameters understood by `GET /defect`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DefectFormQuery {
    #[serde(rename = "poId")]
    pub po_id: Option<String>,
}

/// Body of a form-encoded `POST /defect`.
///
/// Every member is optional on the wire; `DefectSubmission::try_from` decides
/// what is required. The short department/location names are accepted as aliases.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefectForm {
    #[serde(rename = "custpage_po_id")]
    pub po_id: Option<String>,
    #[serde(rename = "custpage_supplier_id")]
    pub supplier_id: Option<String>,
    #[serde(rename = "custpage_plot_id")]
    pub plot_id: Option<String>,
    #[serde(rename = "custpage_department_id", alias = "custpage_dept_id")]
    pub department_id: Option<String>,
    #[serde(rename = "custpage_location_id", alias = "custpage_loc_id")]
    pub location_id: Option<String>,
    #[serde(rename = "custpage_fault_issue")]
    pub fault_issue: Option<String>,
    #[serde(rename = "custpage_selected_item")]
    pub selected_item: Option<String>,
}

/// JSON body the report button posts in `async` mode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportDefectRequest {
    #[serde(rename = "poId", default, skip_serializing_if = "Option::is_none")]
    pub po_id: Option<String>,
}

impl ReportDefectRequest {
    pub fn new(po_id: impl Into<String>) -> Self {
        Self {
            po_id: Some(po_id.into()),
        }
    }
}

/// JSON acknowledgement returned to the report button in `async` mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefectAck {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl DefectAck {
    pub fn created(record_id: impl Into<String>) -> Self {
        Self {
            success: true,
            record_id: Some(record_id.into()),
            message: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            record_id: None,
            message: Some(message.into()),
        }
    }
}
