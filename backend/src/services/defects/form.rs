//! `GET /defect?poId=<id>`: shows the defect form for a purchase order.
//!
//! 1. `poId` must be present (validation failure otherwise).
//! 2. The order is loaded; a store failure ends the request with an error page.
//! 3. The supplier's company name is looked up; any problem falls back to the
//!    order's own display text.
//! 4. Line items are copied with their defaults applied.
//! 5. Active fault issues are fetched; a failure only empties the dropdown.
//! 6. The form is rendered.

use super::render;
use crate::error::DefectError;
use crate::services::html::{error_page, html_response};
use crate::state::AppState;
use crate::store::{OrderLineRecord, PurchaseOrderRecord, RecordStore};
use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse};
use common::error::ValidationError;
use common::model::fault_issue::FaultIssueOption;
use common::model::order::{LineItem, RecordRef, SourceOrderView};
use common::requests::DefectFormQuery;
use log::{debug, error, warn};

pub(crate) async fn process(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    debug!("GET: received parameters {:?}", req.query_string());
    let result = web::Query::<DefectFormQuery>::from_query(req.query_string())
        .map_err(DefectError::from)
        .and_then(|query| build_form(state.store.as_ref(), query.into_inner()));

    match result {
        Ok(page) => html_response(StatusCode::OK, page),
        Err(e) => {
            match &e {
                DefectError::Validation(_) | DefectError::MalformedQuery(_) => {
                    warn!("GET: validation failed: {e}")
                }
                other => error!("GET: could not build defect form: {other}"),
            }
            html_response(
                e.status(),
                error_page("Could not load the defect creation form", &e.to_string(), false),
            )
        }
    }
}

fn build_form(store: &dyn RecordStore, query: DefectFormQuery) -> Result<String, DefectError> {
    let po_id = query
        .po_id
        .filter(|id| !id.trim().is_empty())
        .ok_or(ValidationError::MissingPoIdParameter)?;

    debug!("GET: loading purchase order {po_id}");
    let order = store.load_purchase_order(&po_id)?;
    let view = assemble_view(store, order);
    debug!("GET: purchase order {} has {} item lines", view.po_id, view.items.len());

    let issues = fault_issue_options(store);
    Ok(render::defect_form(&view, &issues))
}

/// Builds the form's snapshot of the order.
pub(crate) fn assemble_view(store: &dyn RecordStore, order: PurchaseOrderRecord) -> SourceOrderView {
    let supplier_text = supplier_display_name(store, &order.entity);
    SourceOrderView {
        po_id: order.id,
        tran_id: order.tran_id,
        supplier: RecordRef::new(order.entity.id, supplier_text),
        plot: order.plot,
        department: order.department,
        location: order.location,
        items: order
            .lines
            .into_iter()
            .enumerate()
            .map(|(line, record)| line_item(line, record))
            .collect(),
    }
}

/// The vendor's company name when one is on file, otherwise the entity's own
/// display text. Never fails.
fn supplier_display_name(store: &dyn RecordStore, entity: &RecordRef) -> Option<String> {
    let Some(vendor_id) = entity.id.as_deref().filter(|id| !id.trim().is_empty()) else {
        return entity.text.clone();
    };

    match store.vendor_company_name(vendor_id) {
        Ok(Some(name)) if !name.trim().is_empty() => {
            debug!("GET: found company name for vendor {vendor_id}");
            Some(name)
        }
        Ok(_) => {
            debug!("GET: vendor {vendor_id} has no company name, using display text");
            entity.text.clone()
        }
        Err(e) => {
            error!("GET: supplier company name lookup failed, using display text: {e}");
            entity.text.clone()
        }
    }
}

fn line_item(line: usize, record: OrderLineRecord) -> LineItem {
    LineItem {
        line,
        item_id: record.item.id.unwrap_or_default(),
        item_name: record.item.text.unwrap_or_default(),
        quantity: text_or(record.quantity, "0"),
        description: record.description,
        width: text_or(record.width, ""),
        length: text_or(record.length, ""),
        amount: text_or(record.amount, "0"),
    }
}

fn text_or(value: Option<String>, default: &str) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Active fault issues, or an empty list when the lookup fails.
fn fault_issue_options(store: &dyn RecordStore) -> Vec<FaultIssueOption> {
    match store.active_fault_issues() {
        Ok(options) => {
            debug!("GET: loaded {} fault issue options", options.len());
            options
        }
        Err(e) => {
            error!("GET: failed to load fault issue options: {e}");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fake::FakeStore;

    #[test]
    fn applies_line_defaults() {
        let store = FakeStore::with_order_123();
        let order = store.load_purchase_order("123").unwrap();
        let view = assemble_view(&store, order);

        let bare = &view.items[1];
        assert_eq!(bare.line, 1);
        assert_eq!(bare.quantity, "0");
        assert_eq!(bare.amount, "0");
        assert_eq!(bare.width, "");
        assert_eq!(bare.length, "");
        assert_eq!(bare.description, None);

        let full = &view.items[0];
        assert_eq!(full.quantity, "12");
        assert_eq!(full.amount, "384.00");
        assert_eq!(full.description.as_deref(), Some("Kiln dried oak"));
    }

    #[test]
    fn supplier_prefers_company_name() {
        let store = FakeStore::with_order_123();
        let order = store.load_purchase_order("123").unwrap();
        let view = assemble_view(&store, order);
        assert_eq!(view.supplier.text.as_deref(), Some("Hartley Timber Ltd"));
        assert_eq!(view.supplier.id.as_deref(), Some("45"));
    }

    #[test]
    fn supplier_falls_back_when_lookup_is_empty_or_fails() {
        let mut store = FakeStore::with_order_123();
        store.company_names.insert("45".to_string(), "  ".to_string());
        let order = store.load_purchase_order("123").unwrap();
        assert_eq!(
            assemble_view(&store, order).supplier.text.as_deref(),
            Some("V0045 Hartley Timber")
        );

        store.fail_vendor_lookup = true;
        let order = store.load_purchase_order("123").unwrap();
        assert_eq!(
            assemble_view(&store, order).supplier.text.as_deref(),
            Some("V0045 Hartley Timber")
        );
    }

    #[test]
    fn missing_po_id_is_a_validation_failure() {
        let store = FakeStore::with_order_123();
        let error = build_form(&store, DefectFormQuery { po_id: Some(" ".to_string()) }).unwrap_err();
        assert!(matches!(
            error,
            DefectError::Validation(ValidationError::MissingPoIdParameter)
        ));
    }

    #[test]
    fn fault_issue_failure_yields_empty_options() {
        let mut store = FakeStore::with_order_123();
        store.fail_fault_issues = true;
        assert!(fault_issue_options(&store).is_empty());
    }
}
