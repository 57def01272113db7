//! Small HTML helpers shared by the defect form and the order page.

use actix_web::http::StatusCode;
use actix_web::HttpResponse;

pub const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// Stylesheet shared by every page this service renders.
pub const BASE_STYLE: &str = r#"
    body { margin: 0; background: #f3f4f6; font-family: system-ui, sans-serif; color: #111827; }
    .container { max-width: 56rem; margin: 0 auto; padding: 2rem 1rem; }
    .card { background: #fff; border-radius: 0.5rem; box-shadow: 0 10px 25px rgba(0, 0, 0, 0.08); overflow: hidden; }
    .card-header { background: #435969; color: #fff; padding: 1.5rem; }
    .card-header h1 { margin: 0; font-size: 1.875rem; }
    .card-header p { margin: 0.25rem 0 0; color: #d1d5db; }
    .section { padding: 1.5rem; border-bottom: 1px solid #e5e7eb; }
    .grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(14rem, 1fr)); gap: 1rem; }
    .label { display: block; font-size: 0.875rem; color: #6b7280; }
    .value { font-size: 1.125rem; }
    .actions { background: #f9fafb; padding: 1.5rem; display: flex; justify-content: flex-end; gap: 0.75rem; }
    .button { border: 1px solid #d1d5db; border-radius: 0.375rem; padding: 0.5rem 1rem; background: #fff; cursor: pointer; font-size: 0.875rem; text-decoration: none; color: #374151; }
    .button-primary { background: #2563eb; border-color: #2563eb; color: #fff; }
    .error { color: #dc2626; font-size: 0.875rem; }
"#;

/// Escapes `&`, `<`, `>`, `"` and `'` so text can be embedded in element
/// content and in quoted attribute values.
pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// The page shown when a request cannot complete. `context` says what failed,
/// `message` is the underlying reason, shown as-is (escaped).
pub fn error_page(context: &str, message: &str, go_back: bool) -> String {
    let back_link = if go_back {
        r#"<p><a href="javascript:history.back()">Go Back</a></p>"#
    } else {
        ""
    };
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Error</title>
    <style>{BASE_STYLE}</style>
</head>
<body>
    <div class="container">
        <h1>Error</h1>
        <p>{context}: {message}</p>
        {back_link}
    </div>
</body>
</html>"#,
        context = escape_html(context),
        message = escape_html(message),
    )
}

pub fn html_response(status: StatusCode, body: String) -> HttpResponse {
    HttpResponse::build(status)
        .content_type(HTML_CONTENT_TYPE)
        .body(body)
}
