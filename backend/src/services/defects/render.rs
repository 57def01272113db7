//! HTML for the defect form.
//!
//! The page is a single self-contained document: read-only order header,
//! hidden header ids, the fault-issue dropdown, one radio per line item, and a
//! small script that blocks submission until an item and an issue are chosen.
//! Every interpolated value goes through `escape_html`.

use crate::config::HANDLER_PATH;
use crate::services::html::{escape_html, BASE_STYLE};
use common::model::fault_issue::FaultIssueOption;
use common::model::order::{LineItem, SourceOrderView};
use common::requests::fields;

const FORM_STYLE: &str = r#"
    select { margin-top: 0.25rem; width: 100%; max-width: 28rem; padding: 0.5rem; border: 1px solid #d1d5db; border-radius: 0.375rem; }
    .item-option { position: relative; margin-bottom: 0.75rem; }
    .item-option input { position: absolute; opacity: 0; top: 1.25rem; left: 1rem; }
    .item-option label { display: block; border: 1px solid #e5e7eb; border-radius: 0.5rem; padding: 1rem 1rem 1rem 3rem; cursor: pointer; }
    .item-option label:hover { background: #f9fafb; }
    .item-option input:checked + label { background: #eff6ff; border-color: #2563eb; }
    .item-name { margin: 0; font-weight: 600; color: #1e40af; }
    .item-detail { margin: 0.25rem 0 0; font-size: 0.875rem; color: #4b5563; }
    .required { color: #ef4444; }
    #loading-overlay { position: fixed; inset: 0; background: rgba(17, 24, 39, 0.5); display: flex; align-items: center; justify-content: center; }
    #loading-overlay[hidden] { display: none; }
    .loader { border: 4px solid #f3f3f3; border-top: 4px solid #3498db; border-radius: 50%; width: 40px; height: 40px; animation: spin 1s linear infinite; }
    @keyframes spin { 0% { transform: rotate(0deg); } 100% { transform: rotate(360deg); } }
"#;

const FORM_SCRIPT: &str = r#"
    document.getElementById('defect-form').addEventListener('submit', function (event) {
        var form = event.target;
        var itemError = document.getElementById('item-error');
        var issue = document.getElementById('custpage_fault_issue');
        var selected = form.querySelector('input[name="custpage_selected_item"]:checked');

        if (!selected) {
            event.preventDefault();
            itemError.hidden = false;
            itemError.scrollIntoView({ behavior: 'smooth', block: 'center' });
            return;
        }
        itemError.hidden = true;

        if (!issue.value) {
            event.preventDefault();
            issue.focus();
            return;
        }
        document.getElementById('loading-overlay').hidden = false;
    });
"#;

/// Renders the complete defect form for `view`.
pub fn defect_form(view: &SourceOrderView, issues: &[FaultIssueOption]) -> String {
    let tran_id = view.tran_id.as_deref().unwrap_or_default();
    let items = if view.items.is_empty() {
        r#"<p class="item-detail">This purchase order has no item lines.</p>"#.to_string()
    } else {
        view.items.iter().map(item_radio).collect::<Vec<_>>().join("\n")
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Manufacturing Defect</title>
    <style>{BASE_STYLE}{FORM_STYLE}</style>
</head>
<body>
    <div id="loading-overlay" hidden>
        <div class="card section"><div class="loader"></div><p>Saving Defect...</p></div>
    </div>
    <div class="container">
        <form id="defect-form" method="POST" action="{action}">
            <div class="card">
                <div class="card-header">
                    <h1>Manufacturing Defect</h1>
                    <p>{tran_id}</p>
                </div>
                <div class="section grid">
                    {supplier}
                    {plot}
                    {location}
                    {department}
                </div>

                <input type="hidden" name="{po_field}" value="{po_id}">
                <input type="hidden" name="{supplier_field}" value="{supplier_id}">
                <input type="hidden" name="{plot_field}" value="{plot_id}">
                <input type="hidden" name="{department_field}" value="{department_id}">
                <input type="hidden" name="{location_field}" value="{location_id}">

                <div class="section">
                    <label for="{issue_field}" class="label">Fault Issue <span class="required">*</span></label>
                    <select id="{issue_field}" name="{issue_field}" required>
                        <option value="">Please select a fault issue...</option>
                        {issue_options}
                    </select>
                </div>

                <div class="section">
                    <h2>Select Defective Item</h2>
                    {items}
                    <div id="item-error" class="error" hidden>Please select one item.</div>
                </div>

                <div class="actions">
                    <button type="button" class="button" onclick="window.history.back()">Cancel</button>
                    <button type="submit" id="submit-button" class="button button-primary">Save</button>
                </div>
            </div>
        </form>
    </div>
    <script>{FORM_SCRIPT}</script>
</body>
</html>"#,
        action = HANDLER_PATH,
        tran_id = escape_html(tran_id),
        supplier = info_field("Supplier", view.supplier.text.as_deref()),
        plot = info_field("Plot", view.plot.text.as_deref()),
        location = info_field("Location", view.location.text.as_deref()),
        department = info_field("Department", view.department.text.as_deref()),
        po_field = fields::PO_ID,
        po_id = escape_html(&view.po_id),
        supplier_field = fields::SUPPLIER_ID,
        supplier_id = escape_html(view.supplier.id_or_empty()),
        plot_field = fields::PLOT_ID,
        plot_id = escape_html(view.plot.id_or_empty()),
        department_field = fields::DEPARTMENT_ID,
        department_id = escape_html(view.department.id_or_empty()),
        location_field = fields::LOCATION_ID,
        location_id = escape_html(view.location.id_or_empty()),
        issue_field = fields::FAULT_ISSUE,
        issue_options = issue_options(issues),
    )
}

fn info_field(label: &str, value: Option<&str>) -> String {
    let value = value.filter(|v| !v.trim().is_empty()).unwrap_or("N/A");
    format!(
        r#"<div><span class="label">{}</span><span class="value">{}</span></div>"#,
        escape_html(label),
        escape_html(value)
    )
}

fn issue_options(issues: &[FaultIssueOption]) -> String {
    issues
        .iter()
        .map(|option| {
            format!(
                r#"<option value="{}">{}</option>"#,
                escape_html(&option.id),
                escape_html(&option.name)
            )
        })
        .collect()
}

/// One selectable line. The radio's value is the line's selection struct as
/// JSON; the browser un-escapes it again when the form is posted.
fn item_radio(item: &LineItem) -> String {
    let dimension = |value: &str| if value.is_empty() { "N/A".to_string() } else { escape_html(value) };
    let description = item
        .description
        .as_deref()
        .filter(|d| !d.trim().is_empty())
        .map(escape_html)
        .unwrap_or_else(|| "No description".to_string());

    format!(
        r#"<div class="item-option">
                        <input type="radio" name="{name}" id="item_{line}" value="{value}" required>
                        <label for="item_{line}">
                            <p class="item-name">{item_name}</p>
                            <p class="item-detail">{description}</p>
                            <p class="item-detail">Quantity: {quantity}</p>
                            <p class="item-detail">W: {width} | L: {length} | Cost: £{amount}</p>
                        </label>
                    </div>"#,
        name = fields::SELECTED_ITEM,
        line = item.line,
        value = escape_html(&item.selection().to_json()),
        item_name = escape_html(&item.item_name),
        quantity = escape_html(&item.quantity),
        width = dimension(&item.width),
        length = dimension(&item.length),
        amount = escape_html(&item.amount),
    )
}
