//! # Purchase Order Pages
//!
//! The order page is where the "Report Defect" button lives and where the user
//! lands after a defect was saved.
//!
//! ## Sub-modules:
//! - `view`: renders `GET /orders/{po_id}`.
//! - `page_load`: the button and confirmation banner added while the page loads.

mod page_load;
mod view;

use crate::config::{Config, ORDER_PATH};
use actix_web::web::{get, scope};
use actix_web::Scope;
use page_load::{DEFECT_SAVED_PARAM, EDIT_MODE_PARAM, NEW_DEFECT_ID_PARAM};

/// Configures and returns the Actix `Scope` for the order pages.
///
/// *   **`GET /orders/{po_id}`**: `view::process`. `e=T` opens the order in
///     edit mode; `custpage_defect_saved=T&new_defect_id=<id>` shows the
///     confirmation banner.
pub fn configure_routes() -> Scope {
    scope(ORDER_PATH).route("/{po_id}", get().to(view::process))
}

/// Where to send the browser after a defect was saved for `po_id`.
pub fn order_url(config: &Config, po_id: &str, new_defect_id: Option<&str>) -> String {
    let mut params = Vec::new();
    if config.redirect_edit_mode {
        params.push(format!("{EDIT_MODE_PARAM}=T"));
    }
    if let Some(record_id) = new_defect_id.filter(|_| config.success_signal) {
        params.push(format!("{DEFECT_SAVED_PARAM}=T"));
        params.push(format!(
            "{NEW_DEFECT_ID_PARAM}={}",
            urlencoding::encode(record_id)
        ));
    }

    let path = format!("{ORDER_PATH}/{}", urlencoding::encode(po_id));
    if params.is_empty() {
        path
    } else {
        format!("{path}?{}", params.join("&"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;
    use crate::store::fake::FakeStore;
    use actix_web::http::StatusCode;
    use actix_web::{test as actix_test, web, App};
    use std::sync::Arc;

    #[test]
    fn order_url_defaults_to_view_mode_with_signal() {
        let config = Config::default();
        assert_eq!(
            order_url(&config, "123", Some("801")),
            "/orders/123?custpage_defect_saved=T&new_defect_id=801"
        );
        assert_eq!(order_url(&config, "123", None), "/orders/123");
    }

    #[test]
    fn order_url_honours_edit_mode_and_signal_switch() {
        let config = Config {
            redirect_edit_mode: true,
            success_signal: false,
            ..Config::default()
        };
        assert_eq!(order_url(&config, "123", Some("801")), "/orders/123?e=T");

        let config = Config {
            redirect_edit_mode: true,
            ..Config::default()
        };
        assert_eq!(
            order_url(&config, "12 3", Some("801")),
            "/orders/12%203?e=T&custpage_defect_saved=T&new_defect_id=801"
        );
    }

    #[actix_web::test]
    async fn page_shows_banner_after_save() {
        let store: Arc<FakeStore> = Arc::new(FakeStore::with_order_123());
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(AppState::new(store, Config::default())))
                .service(configure_routes()),
        )
        .await;

        let req = actix_test::TestRequest::get()
            .uri("/orders/123?custpage_defect_saved=T&new_defect_id=801")
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = actix_test::read_body(resp).await;
        let page = String::from_utf8_lossy(&body);
        assert!(page.contains("Successfully created Manufacturing Defect record (ID: 801)."));
        assert!(page.contains(r#"id="report-defect""#));
        assert!(page.contains("Hartley Timber Ltd"));
        assert!(page.contains("Oak Board 30mm"));
    }

    #[actix_web::test]
    async fn edit_mode_skips_page_additions() {
        let store: Arc<FakeStore> = Arc::new(FakeStore::with_order_123());
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(AppState::new(store, Config::default())))
                .service(configure_routes()),
        )
        .await;

        let req = actix_test::TestRequest::get()
            .uri("/orders/123?e=T&custpage_defect_saved=T&new_defect_id=801")
            .to_request();
        let body = actix_test::call_and_read_body(&app, req).await;
        let page = String::from_utf8_lossy(&body);
        assert!(!page.contains("Successfully created"));
        assert!(!page.contains(r#"id="report-defect""#));
    }

    #[actix_web::test]
    async fn unknown_order_is_not_found() {
        let store: Arc<FakeStore> = Arc::new(FakeStore::with_order_123());
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(AppState::new(store, Config::default())))
                .service(configure_routes()),
        )
        .await;

        let req = actix_test::TestRequest::get().uri("/orders/999").to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn repeated_signal_still_renders_the_page() {
        let store: Arc<FakeStore> = Arc::new(FakeStore::with_order_123());
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(AppState::new(store, Config::default())))
                .service(configure_routes()),
        )
        .await;

        let req = actix_test::TestRequest::get()
            .uri("/orders/123?custpage_defect_saved=T&new_defect_id=801&new_defect_id=802")
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = actix_test::read_body(resp).await;
        let page = String::from_utf8_lossy(&body);
        assert!(!page.contains("Successfully created"));
        assert!(page.contains(r#"id="report-defect""#));
    }

    #[actix_web::test]
    async fn store_failure_renders_error_page() {
        let mut store = FakeStore::with_order_123();
        store.fail_load = true;
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(AppState::new(Arc::new(store), Config::default())))
                .service(configure_routes()),
        )
        .await;

        let req = actix_test::TestRequest::get().uri("/orders/123").to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

        let body = actix_test::read_body(resp).await;
        let page = String::from_utf8_lossy(&body);
        assert!(page.contains("Could not load the purchase order: record store unavailable: load failed"));
    }
}
