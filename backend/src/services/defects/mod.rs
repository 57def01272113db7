//! # Defect Handler Module
//!
//! Routes every request for `/defect` to the handler for its method:
//!
//! - `form`: `GET` renders the defect creation form for a purchase order.
//! - `submit`: `POST` validates the selection and creates the defect record.
//! - `render`: the HTML for the form.
//!
//! Any other method is answered with a plain-text notice.

mod form;
mod render;
mod submit;

pub(crate) use form::assemble_view;

use crate::config::HANDLER_PATH;
use actix_web::http::header::ALLOW;
use actix_web::web::{get, post, resource, route};
use actix_web::{HttpRequest, HttpResponse, Resource};
use log::warn;

const UNSUPPORTED_NOTICE: &str =
    "This page should be opened with a GET request (e.g. from the Report Defect button) \
     or submitted with a POST request from the defect form.";

/// Configures and returns the Actix `Resource` for the defect handler.
///
/// # Registered Routes:
///
/// *   **`GET /defect?poId=<id>`**: `form::process`
/// *   **`POST /defect`**: `submit::process`, form-encoded or JSON
/// *   anything else: `405 Method Not Allowed`
pub fn configure_routes() -> Resource {
    resource(HANDLER_PATH)
        .route(get().to(form::process))
        .route(post().to(submit::process))
        .default_service(route().to(unsupported))
}

async fn unsupported(req: HttpRequest) -> HttpResponse {
    warn!(
        "Unsupported method: received a {} request for {}",
        req.method(),
        req.path()
    );
    HttpResponse::MethodNotAllowed()
        .insert_header((ALLOW, "GET, POST"))
        .content_type("text/plain; charset=utf-8")
        .body(UNSUPPORTED_NOTICE)
}
