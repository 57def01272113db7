//! `GET /orders/{po_id}`: the purchase order page that hosts the
//! "Report Defect" button and the post-save confirmation banner.

use super::page_load::{before_load, Banner, OrderPageQuery, PageAdditions, PageMode, ReportButton};
use crate::error::DefectError;
use crate::services::defects::assemble_view;
use crate::services::html::{error_page, escape_html, html_response, BASE_STYLE};
use crate::state::AppState;
use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse};
use common::model::order::{LineItem, SourceOrderView};
use common::trigger::handler_url_for;
use log::{debug, error, warn};

const PAGE_STYLE: &str = r#"
    table { width: 100%; border-collapse: collapse; }
    th, td { text-align: left; padding: 0.5rem; border-bottom: 1px solid #e5e7eb; font-size: 0.875rem; }
    th { color: #6b7280; font-weight: 500; }
    .banner { display: flex; justify-content: space-between; align-items: flex-start; margin-bottom: 1rem; padding: 1rem; border-radius: 0.5rem; background: #ecfdf5; border: 1px solid #10b981; color: #065f46; }
    .banner[hidden] { display: none; }
    .banner h2 { margin: 0 0 0.25rem; font-size: 1rem; }
    .banner p { margin: 0; }
    .banner button { background: none; border: none; font-size: 1.25rem; cursor: pointer; color: inherit; }
"#;

const BANNER_SCRIPT: &str = r#"
    (function () {
        var banner = document.getElementById('defect-banner');
        if (!banner) { return; }
        var hide = function () { banner.hidden = true; };
        banner.querySelector('button').addEventListener('click', hide);
        setTimeout(hide, Number(banner.dataset.duration));
    })();
"#;

const TRIGGER_SCRIPT: &str = r#"<script type="module">import init from '/report_defect.js'; init('/report_defect_bg.wasm');</script>"#;

pub(crate) async fn process(
    req: HttpRequest,
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> HttpResponse {
    let po_id = path.into_inner();
    let query = page_query(req.query_string());
    debug!("Order page: loading purchase order {po_id} with {:?}", query);

    let order = match state.store.load_purchase_order(&po_id) {
        Ok(order) => order,
        Err(e) => {
            error!("Order page: could not load purchase order {po_id}: {e}");
            let e = DefectError::from(e);
            return html_response(
                e.status(),
                error_page("Could not load the purchase order", &e.to_string(), false),
            );
        }
    };

    let view = assemble_view(state.store.as_ref(), order);
    let mode = PageMode::from_query(&query);
    let additions = before_load(mode, &view.po_id, &query, &state.config);
    html_response(StatusCode::OK, order_page(&view, mode, &additions))
}

/// Reads the query without ever rejecting the page; an unreadable one is
/// treated as empty.
fn page_query(raw: &str) -> OrderPageQuery {
    match web::Query::<Vec<(String, String)>>::from_query(raw) {
        Ok(pairs) => OrderPageQuery::from_pairs(pairs.into_inner()),
        Err(e) => {
            warn!("Order page: ignoring unreadable query {raw:?}: {e}");
            OrderPageQuery::default()
        }
    }
}

pub fn order_page(view: &SourceOrderView, mode: PageMode, additions: &PageAdditions) -> String {
    let tran_id = view.tran_id.as_deref().unwrap_or(&view.po_id);
    let mode_label = match mode {
        PageMode::View => "",
        PageMode::Edit => " (Edit)",
    };
    let banner = additions.banner.as_ref().map(banner_html).unwrap_or_default();
    let (button, trigger_script) = match &additions.button {
        Some(button) => (button_html(button), TRIGGER_SCRIPT),
        None => (String::new(), ""),
    };
    let rows = view.items.iter().map(line_row).collect::<Vec<_>>().join("\n");

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Purchase Order {title}</title>
    <style>{BASE_STYLE}{PAGE_STYLE}</style>
</head>
<body>
    <div class="container">
        {banner}
        <div class="card">
            <div class="card-header">
                <h1>Purchase Order {title}{mode_label}</h1>
                <p>{supplier}</p>
            </div>
            <div class="section grid">
                {plot}
                {department}
                {location}
            </div>
            <div class="section">
                <table>
                    <thead><tr><th>Item</th><th>Description</th><th>Quantity</th><th>Width</th><th>Length</th><th>Amount</th></tr></thead>
                    <tbody>
{rows}
                    </tbody>
                </table>
            </div>
            <div class="actions">{button}</div>
        </div>
    </div>
    <script>{BANNER_SCRIPT}</script>
    {trigger_script}
</body>
</html>"#,
        title = escape_html(tran_id),
        supplier = escape_html(view.supplier.text.as_deref().unwrap_or("N/A")),
        plot = header_field("Plot", view.plot.text.as_deref()),
        department = header_field("Department", view.department.text.as_deref()),
        location = header_field("Location", view.location.text.as_deref()),
    )
}

fn header_field(label: &str, value: Option<&str>) -> String {
    format!(
        r#"<div><span class="label">{}</span><span class="value">{}</span></div>"#,
        escape_html(label),
        escape_html(value.filter(|v| !v.trim().is_empty()).unwrap_or("N/A"))
    )
}

fn line_row(item: &LineItem) -> String {
    format!(
        "                        <tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
        escape_html(&item.item_name),
        escape_html(item.description.as_deref().unwrap_or("")),
        escape_html(&item.quantity),
        escape_html(&item.width),
        escape_html(&item.length),
        escape_html(&item.amount),
    )
}

fn banner_html(banner: &Banner) -> String {
    format!(
        r#"<div id="defect-banner" class="banner" role="status" data-duration="{duration}">
            <div><h2>{title}</h2><p>{message}</p></div>
            <button type="button" aria-label="Dismiss">&times;</button>
        </div>"#,
        duration = banner.duration_ms,
        title = escape_html(&banner.title),
        message = escape_html(&banner.message),
    )
}

/// Mount point for the browser component. The link inside works on its own
/// and is replaced once the component starts.
fn button_html(button: &ReportButton) -> String {
    format!(
        r#"<div id="report-defect" data-po-id="{po_id}" data-handler-url="{handler_url}" data-transport="{transport}">
                <a class="button button-primary" href="{fallback}">{label}</a>
            </div>"#,
        po_id = escape_html(&button.po_id),
        handler_url = escape_html(button.handler_url),
        transport = button.transport.as_str(),
        fallback = escape_html(&handler_url_for(button.handler_url, &button.po_id)),
        label = escape_html(button.label),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::orders::page_load::BANNER_DURATION_MS;
    use common::model::order::RecordRef;
    use common::trigger::TriggerTransport;

    fn view() -> SourceOrderView {
        SourceOrderView {
            po_id: "123".to_string(),
            tran_id: Some("PO1042".to_string()),
            supplier: RecordRef::new(Some("45".to_string()), Some("Hartley Timber Ltd".to_string())),
            plot: RecordRef::default(),
            department: RecordRef::new(Some("3".to_string()), Some("Joinery".to_string())),
            location: RecordRef::default(),
            items: Vec::new(),
        }
    }

    fn button() -> ReportButton {
        ReportButton {
            label: "Report Defect",
            po_id: "123".to_string(),
            handler_url: "/defect",
            transport: TriggerTransport::Async,
        }
    }

    #[test]
    fn view_mode_mounts_the_trigger() {
        let additions = PageAdditions {
            button: Some(button()),
            banner: None,
        };
        let page = order_page(&view(), PageMode::View, &additions);

        assert!(page.contains(r#"data-po-id="123""#));
        assert!(page.contains(r#"data-transport="async""#));
        assert!(page.contains(r#"href="/defect?poId=123""#));
        assert!(page.contains("/report_defect.js"));
        assert!(!page.contains(r#"id="defect-banner""#));
    }

    #[test]
    fn banner_is_rendered_with_its_duration() {
        let additions = PageAdditions {
            button: Some(button()),
            banner: Some(Banner {
                title: "Success!".to_string(),
                message: "Successfully created Manufacturing Defect record (ID: 801).".to_string(),
                duration_ms: BANNER_DURATION_MS,
            }),
        };
        let page = order_page(&view(), PageMode::View, &additions);

        assert!(page.contains(r#"data-duration="10000""#));
        assert!(page.contains("Successfully created Manufacturing Defect record (ID: 801)."));
    }

    #[test]
    fn edit_mode_has_no_trigger() {
        let page = order_page(&view(), PageMode::Edit, &PageAdditions::default());
        assert!(page.contains("PO1042 (Edit)"));
        assert!(!page.contains("report-defect"));
        assert!(!page.contains("/report_defect.js"));
    }
}
