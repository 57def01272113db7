//! `POST /defect`: creates a Manufacturing Defect.
//!
//! Two bodies are accepted:
//! - `application/x-www-form-urlencoded` from the defect form. The selection
//!   is validated, the record is assembled and saved once, and the browser is
//!   redirected back to the purchase order.
//! - `application/json` `{"poId": "..."}` from the report button in `async`
//!   mode. A header-only defect is created from the order and a JSON
//!   acknowledgement is returned instead of a redirect.
//!
//! On any failure nothing is saved and the reason is shown to the user.

use crate::error::DefectError;
use crate::services::html::{error_page, html_response};
use crate::services::orders::order_url;
use crate::state::AppState;
use crate::store::RecordStore;
use actix_web::http::header::LOCATION;
use actix_web::{web, HttpMessage, HttpRequest, HttpResponse};
use common::error::ValidationError;
use common::model::defect::{DefectField, DefectRecord, DefectSubmission};
use common::requests::{DefectAck, DefectForm, ReportDefectRequest};
use log::{debug, error, info, warn};

/// A defect that was saved, and the order it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SavedDefect {
    pub po_id: String,
    pub record_id: String,
}

pub(crate) async fn process(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<AppState>,
) -> HttpResponse {
    if req.content_type().eq_ignore_ascii_case("application/json") {
        report_from_button(&state, &body)
    } else {
        save_from_form(&state, &body)
    }
}

fn save_from_form(state: &AppState, body: &[u8]) -> HttpResponse {
    debug!("POST: form submitted, starting POST processing");
    let result = serde_urlencoded::from_bytes::<DefectForm>(body)
        .map_err(DefectError::from)
        .and_then(|form| save_submission(state.store.as_ref(), form));

    match result {
        Ok(saved) => {
            let target = order_url(&state.config, &saved.po_id, Some(&saved.record_id));
            debug!("POST: redirecting to {target}");
            HttpResponse::SeeOther()
                .insert_header((LOCATION, target))
                .finish()
        }
        Err(e) => {
            log_failure(&e);
            html_response(
                e.status(),
                error_page("Could not save the new defect record", &e.to_string(), true),
            )
        }
    }
}

fn report_from_button(state: &AppState, body: &[u8]) -> HttpResponse {
    debug!("POST: JSON report received");
    match create_from_order_header(state.store.as_ref(), body) {
        Ok(saved) => HttpResponse::Ok().json(DefectAck::created(saved.record_id)),
        Err(e) => {
            log_failure(&e);
            HttpResponse::build(e.status()).json(DefectAck::failed(e.to_string()))
        }
    }
}

fn log_failure(e: &DefectError) {
    match e {
        DefectError::Validation(_)
        | DefectError::MalformedQuery(_)
        | DefectError::MalformedForm(_)
        | DefectError::MalformedRequest(_) => warn!("POST: validation failed: {e}"),
        DefectError::Store(_) => error!("POST: could not save defect record: {e}"),
    }
}

/// Validates a submitted form and saves the resulting record.
pub(crate) fn save_submission(
    store: &dyn RecordStore,
    form: DefectForm,
) -> Result<SavedDefect, DefectError> {
    debug!("POST: received parameters {form:?}");
    let submission = DefectSubmission::try_from(form)?;
    debug!("POST: selected item {:?}", submission.item);

    let record = submission.to_record();
    debug!("POST: data for new defect record {:?}", field_map(&record));

    let record_id = store.create_defect(&record)?;
    info!(
        "POST: created defect record {record_id} for purchase order {}",
        submission.po_id
    );

    Ok(SavedDefect {
        po_id: submission.po_id,
        record_id,
    })
}

/// Creates a defect carrying only the order's header values.
fn create_from_order_header(
    store: &dyn RecordStore,
    body: &[u8],
) -> Result<SavedDefect, DefectError> {
    let request: ReportDefectRequest = serde_json::from_slice(body)?;
    let po_id = request
        .po_id
        .filter(|id| !id.trim().is_empty())
        .ok_or(ValidationError::MissingPoId)?;

    let order = store.load_purchase_order(&po_id)?;
    let mut record = DefectRecord::new();
    record
        .assign(DefectField::PurchaseOrder, Some(&order.id))
        .assign(DefectField::Supplier, order.entity.id.as_deref())
        .assign_reference(DefectField::Plot, order.plot.id.as_deref())
        .assign_reference(DefectField::Department, order.department.id.as_deref())
        .assign_reference(DefectField::Location, order.location.id.as_deref());
    debug!("POST: data for new defect record {:?}", field_map(&record));

    let record_id = store.create_defect(&record)?;
    info!("POST: created defect record {record_id} for purchase order {po_id}");

    Ok(SavedDefect { po_id, record_id })
}

fn field_map(record: &DefectRecord) -> Vec<(&'static str, &str)> {
    record
        .values()
        .into_iter()
        .map(|(field, value)| (field.field_id(), value))
        .collect()
}
