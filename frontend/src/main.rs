use crate::components::report_defect::{ReportDefectButton, ReportDefectProps};

mod components;

/// Element the order page renders for the button, with its `data-*` settings.
const MOUNT_ID: &str = "report-defect";

fn main() {
    let Some(root) = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(MOUNT_ID))
    else {
        gloo_console::warn!(format!("#{MOUNT_ID} not found; Report Defect button not mounted"));
        return;
    };

    let props = ReportDefectProps::from_attributes(
        root.get_attribute("data-po-id"),
        root.get_attribute("data-handler-url"),
        root.get_attribute("data-transport"),
    );

    // Replaces the plain fallback link.
    root.set_inner_html("");
    yew::Renderer::<ReportDefectButton>::with_root_and_props(root, props).render();
}
