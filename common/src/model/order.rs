//! Read-only snapshot of a purchase order, taken when the defect form is rendered.
//!
//! A `SourceOrderView` is built fresh for every `GET /defect` and dropped once
//! the HTML has been written. Nothing here is ever written back to the order.

use crate::model::defect::SelectedItem;
use serde::{Deserialize, Serialize};

/// A link to another record: its internal id and the text the ERP displays for it.
///
/// Either half may be missing; a purchase order without a plot segment, for
/// example, yields `RecordRef::default()`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordRef {
    pub id: Option<String>,
    pub text: Option<String>,
}

impl RecordRef {
    pub fn new(id: Option<String>, text: Option<String>) -> Self {
        Self { id, text }
    }

    /// The id, or an empty string when unset. Used for hidden form fields.
    pub fn id_or_empty(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }
}

/// One row of the purchase order's item sublist.
///
/// Numeric-like columns are carried as text exactly as the order returned
/// them. Absent values are already defaulted: `"0"` for quantity and amount,
/// `""` for width and length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// 0-based position in the sublist.
    pub line: usize,
    pub item_id: String,
    pub item_name: String,
    pub quantity: String,
    pub description: Option<String>,
    pub width: String,
    pub length: String,
    pub amount: String,
}

impl LineItem {
    /// The struct embedded in this line's radio button, recovered verbatim on submit.
    pub fn selection(&self) -> SelectedItem {
        SelectedItem {
            item_id: self.item_id.clone(),
            quantity: Some(self.quantity.clone()),
            width: Some(self.width.clone()),
            length: Some(self.length.clone()),
            amount: Some(self.amount.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceOrderView {
    pub po_id: String,
    /// Transaction number shown under the form title (e.g. `PO1042`).
    pub tran_id: Option<String>,
    /// Supplier id plus the best display name that could be found for it.
    pub supplier: RecordRef,
    pub plot: RecordRef,
    pub department: RecordRef,
    pub location: RecordRef,
    /// Line items in sublist order.
    pub items: Vec<LineItem>,
}
