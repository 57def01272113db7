//! The Manufacturing Defect record and the user's selection that produces it.
//!
//! A `DefectSubmission` is parsed and validated from the posted form, then
//! turned into a `DefectRecord`: a typed field map whose field ids are fixed
//! by the record type's schema (`DefectField::field_id`). The record is
//! assembled field by field and handed to the store in a single save.

use crate::error::ValidationError;
use crate::requests::DefectForm;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Script id of the record type every defect is created as.
pub const DEFECT_RECORD_TYPE: &str = "customrecord_manufacturing_defect";

/// Sentinel some forms post for an unset optional reference.
const NULL_SENTINEL: &str = "null";

/// The line item chosen in the form.
///
/// The richer form embeds quantity, width, length and amount next to the item
/// id so the values the user saw are stored as-is, without re-reading the order.
/// A bare-id selection leaves those `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedItem {
    pub item_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
}

/// Wire shape of the embedded struct. Every member is optional and may arrive
/// as a JSON string or number.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SelectedItemPayload {
    #[serde(default, deserialize_with = "lenient_text")]
    item_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    quantity: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    width: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    length: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    amount: Option<String>,
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde_json::Value;

    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text)),
        Some(Value::Number(number)) => Ok(Some(number.to_string())),
        Some(Value::Bool(flag)) => Ok(Some(flag.to_string())),
        Some(other) => Err(D::Error::custom(format!("expected text, found {other}"))),
    }
}

impl SelectedItem {
    /// A selection carrying only the item id.
    pub fn bare(item_id: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            quantity: None,
            width: None,
            length: None,
            amount: None,
        }
    }

    /// Parses the posted `custpage_selected_item` value.
    ///
    /// A value starting with `{` is read as the embedded JSON struct; anything
    /// else is taken as a bare item id.
    pub fn parse(raw: Option<&str>) -> Result<Self, ValidationError> {
        let raw = raw
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or(ValidationError::MissingItem)?;

        if !raw.starts_with('{') {
            return Ok(Self::bare(raw));
        }

        let payload: SelectedItemPayload =
            serde_json::from_str(raw).map_err(|_| ValidationError::MalformedItem)?;
        let item_id = payload
            .item_id
            .filter(|id| !id.trim().is_empty())
            .ok_or(ValidationError::MissingItem)?;

        Ok(Self {
            item_id,
            quantity: payload.quantity,
            width: payload.width,
            length: payload.length,
            amount: payload.amount,
        })
    }

    /// JSON text embedded in the radio button's `value` attribute (before HTML escaping).
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| self.item_id.clone())
    }
}

/// Fields of the Manufacturing Defect record type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefectField {
    PurchaseOrder,
    Supplier,
    Plot,
    Department,
    Location,
    FaultIssue,
    Item,
    Width,
    Length,
    Quantity,
    Cost,
}

impl DefectField {
    /// Every field, in assignment order.
    pub const ALL: [DefectField; 11] = [
        DefectField::PurchaseOrder,
        DefectField::Supplier,
        DefectField::Plot,
        DefectField::Department,
        DefectField::Location,
        DefectField::FaultIssue,
        DefectField::Item,
        DefectField::Width,
        DefectField::Length,
        DefectField::Quantity,
        DefectField::Cost,
    ];

    /// The field's id on the external record type.
    pub const fn field_id(self) -> &'static str {
        match self {
            DefectField::PurchaseOrder => "custrecordman_defect_purchaseorder",
            DefectField::Supplier => "custrecordman_defect_supplier",
            DefectField::Plot => "custrecord_man_defect_plot",
            DefectField::Department => "custrecord_man_defect_department",
            DefectField::Location => "custrecord_man_defect_location",
            DefectField::FaultIssue => "custrecord_man_defect_issue",
            DefectField::Item => "custrecord_man_defect_item",
            DefectField::Width => "custrecord_man_defect_width",
            DefectField::Length => "custrecord_man_defect_length",
            DefectField::Quantity => "custrecord_man_defect_quantity",
            DefectField::Cost => "custrecord_man_defect_cost",
        }
    }
}

/// A Manufacturing Defect record that has not been saved yet.
///
/// Fields are assigned one at a time; empty values are never assigned, so an
/// unset field is simply absent from the create call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefectRecord {
    purchase_order: Option<String>,
    supplier: Option<String>,
    plot: Option<String>,
    department: Option<String>,
    location: Option<String>,
    fault_issue: Option<String>,
    item: Option<String>,
    width: Option<String>,
    length: Option<String>,
    quantity: Option<String>,
    cost: Option<String>,
}

impl DefectRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns `value` to `field` unless it is absent or empty.
    pub fn assign(&mut self, field: DefectField, value: Option<&str>) -> &mut Self {
        if let Some(value) = value.filter(|value| !value.trim().is_empty()) {
            *self.slot_mut(field) = Some(value.to_string());
        }
        self
    }

    /// Like `assign`, but also skips the literal `"null"` posted for unset references.
    pub fn assign_reference(&mut self, field: DefectField, value: Option<&str>) -> &mut Self {
        self.assign(field, value.filter(|value| *value != NULL_SENTINEL))
    }

    pub fn value(&self, field: DefectField) -> Option<&str> {
        self.slot(field).as_deref()
    }

    /// Assigned fields in assignment order, paired with their values.
    pub fn values(&self) -> Vec<(DefectField, &str)> {
        DefectField::ALL
            .iter()
            .filter_map(|field| self.value(*field).map(|value| (*field, value)))
            .collect()
    }

    fn slot(&self, field: DefectField) -> &Option<String> {
        match field {
            DefectField::PurchaseOrder => &self.purchase_order,
            DefectField::Supplier => &self.supplier,
            DefectField::Plot => &self.plot,
            DefectField::Department => &self.department,
            DefectField::Location => &self.location,
            DefectField::FaultIssue => &self.fault_issue,
            DefectField::Item => &self.item,
            DefectField::Width => &self.width,
            DefectField::Length => &self.length,
            DefectField::Quantity => &self.quantity,
            DefectField::Cost => &self.cost,
        }
    }

    fn slot_mut(&mut self, field: DefectField) -> &mut Option<String> {
        match field {
            DefectField::PurchaseOrder => &mut self.purchase_order,
            DefectField::Supplier => &mut self.supplier,
            DefectField::Plot => &mut self.plot,
            DefectField::Department => &mut self.department,
            DefectField::Location => &mut self.location,
            DefectField::FaultIssue => &mut self.fault_issue,
            DefectField::Item => &mut self.item,
            DefectField::Width => &mut self.width,
            DefectField::Length => &mut self.length,
            DefectField::Quantity => &mut self.quantity,
            DefectField::Cost => &mut self.cost,
        }
    }
}

/// A validated `POST /defect` form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefectSubmission {
    pub po_id: String,
    pub supplier_id: Option<String>,
    pub plot_id: Option<String>,
    pub department_id: Option<String>,
    pub location_id: Option<String>,
    pub fault_issue_id: String,
    pub item: SelectedItem,
}

impl TryFrom<DefectForm> for DefectSubmission {
    type Error = ValidationError;

    /// Checks, in order: an item was selected and parses, a fault issue was
    /// chosen, and the purchase order id was carried through.
    fn try_from(form: DefectForm) -> Result<Self, Self::Error> {
        let item = SelectedItem::parse(form.selected_item.as_deref())?;
        let fault_issue_id =
            non_empty(form.fault_issue).ok_or(ValidationError::MissingFaultIssue)?;
        let po_id = non_empty(form.po_id).ok_or(ValidationError::MissingPoId)?;

        Ok(Self {
            po_id,
            supplier_id: non_empty(form.supplier_id),
            plot_id: non_empty(form.plot_id),
            department_id: non_empty(form.department_id),
            location_id: non_empty(form.location_id),
            fault_issue_id,
            item,
        })
    }
}

impl DefectSubmission {
    /// Builds the record to save from this submission.
    ///
    /// Item measurements come from the submitted struct, not from the order.
    pub fn to_record(&self) -> DefectRecord {
        let mut record = DefectRecord::new();
        record
            .assign(DefectField::PurchaseOrder, Some(&self.po_id))
            .assign(DefectField::Supplier, self.supplier_id.as_deref())
            .assign_reference(DefectField::Plot, self.plot_id.as_deref())
            .assign_reference(DefectField::Department, self.department_id.as_deref())
            .assign_reference(DefectField::Location, self.location_id.as_deref())
            .assign(DefectField::FaultIssue, Some(&self.fault_issue_id))
            .assign(DefectField::Item, Some(&self.item.item_id))
            .assign(DefectField::Width, self.item.width.as_deref())
            .assign(DefectField::Length, self.item.length.as_deref())
            .assign(DefectField::Quantity, self.item.quantity.as_deref())
            .assign(DefectField::Cost, self.item.amount.as_deref());
        record
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form_with_item(selected_item: &str) -> DefectForm {
        DefectForm {
            po_id: Some("123".to_string()),
            supplier_id: Some("45".to_string()),
            plot_id: Some("7".to_string()),
            department_id: Some("null".to_string()),
            location_id: Some(String::new()),
            fault_issue: Some("9".to_string()),
            selected_item: Some(selected_item.to_string()),
        }
    }

    #[test]
    fn parses_embedded_struct() {
        let raw = r#"{"itemId":"501","quantity":"2","width":"30","length":"","amount":"40.00"}"#;
        let item = SelectedItem::parse(Some(raw)).unwrap();

        assert_eq!(item.item_id, "501");
        assert_eq!(item.quantity.as_deref(), Some("2"));
        assert_eq!(item.width.as_deref(), Some("30"));
        assert_eq!(item.length.as_deref(), Some(""));
        assert_eq!(item.amount.as_deref(), Some("40.00"));
    }

    #[test]
    fn accepts_numbers_inside_struct() {
        let item = SelectedItem::parse(Some(r#"{"itemId":501,"quantity":3}"#)).unwrap();
        assert_eq!(item.item_id, "501");
        assert_eq!(item.quantity.as_deref(), Some("3"));
        assert_eq!(item.width, None);
    }

    #[test]
    fn bare_id_is_a_selection() {
        assert_eq!(SelectedItem::parse(Some(" 88 ")).unwrap(), SelectedItem::bare("88"));
    }

    #[test]
    fn missing_or_blank_selection_is_rejected() {
        assert_eq!(SelectedItem::parse(None), Err(ValidationError::MissingItem));
        assert_eq!(SelectedItem::parse(Some("  ")), Err(ValidationError::MissingItem));
        assert_eq!(
            SelectedItem::parse(Some(r#"{"itemId":"","quantity":"1"}"#)),
            Err(ValidationError::MissingItem)
        );
    }

    #[test]
    fn malformed_struct_is_rejected() {
        assert_eq!(
            SelectedItem::parse(Some(r#"{"itemId": "5""#)),
            Err(ValidationError::MalformedItem)
        );
    }

    #[test]
    fn embedded_json_survives_parse() {
        let item = SelectedItem {
            item_id: "12".to_string(),
            quantity: Some("1".to_string()),
            width: Some("".to_string()),
            length: Some("2.5".to_string()),
            amount: Some("0".to_string()),
        };
        assert_eq!(SelectedItem::parse(Some(&item.to_json())).unwrap(), item);
    }

    #[test]
    fn record_uses_fixed_field_ids() {
        let submission = DefectSubmission::try_from(form_with_item(
            r#"{"itemId":"501","quantity":"2","width":"30","length":"","amount":"40.00"}"#,
        ))
        .unwrap();
        let record = submission.to_record();

        let ids: Vec<(&str, &str)> = record
            .values()
            .into_iter()
            .map(|(field, value)| (field.field_id(), value))
            .collect();
        assert_eq!(
            ids,
            vec![
                ("custrecordman_defect_purchaseorder", "123"),
                ("custrecordman_defect_supplier", "45"),
                ("custrecord_man_defect_plot", "7"),
                ("custrecord_man_defect_issue", "9"),
                ("custrecord_man_defect_item", "501"),
                ("custrecord_man_defect_width", "30"),
                ("custrecord_man_defect_quantity", "2"),
                ("custrecord_man_defect_cost", "40.00"),
            ]
        );
    }

    #[test]
    fn null_sentinel_only_applies_to_references() {
        let mut record = DefectRecord::new();
        record
            .assign_reference(DefectField::Location, Some("null"))
            .assign(DefectField::Supplier, Some("null"));

        assert_eq!(record.value(DefectField::Location), None);
        assert_eq!(record.value(DefectField::Supplier), Some("null"));
    }

    #[test]
    fn validation_order_reports_item_first() {
        let form = DefectForm::default();
        assert_eq!(
            DefectSubmission::try_from(form),
            Err(ValidationError::MissingItem)
        );

        let mut form = form_with_item("501");
        form.fault_issue = Some(String::new());
        assert_eq!(
            DefectSubmission::try_from(form),
            Err(ValidationError::MissingFaultIssue)
        );

        let mut form = form_with_item("501");
        form.po_id = None;
        assert_eq!(
            DefectSubmission::try_from(form),
            Err(ValidationError::MissingPoId)
        );
    }

    #[test]
    fn bare_selection_leaves_measurements_unset() {
        let record = DefectSubmission::try_from(form_with_item("501"))
            .unwrap()
            .to_record();

        assert_eq!(record.value(DefectField::Item), Some("501"));
        assert_eq!(record.value(DefectField::Quantity), None);
        assert_eq!(record.value(DefectField::Cost), None);
    }
}
