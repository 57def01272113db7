//! "Report Defect" button shown on the purchase order page.
//!
//! What a click does is decided by `common::trigger::plan`; this component
//! only carries it out:
//! - `navigate`: the browser opens `GET /defect?poId=<id>` (the defect form).
//! - `async`: `POST /defect` with `{"poId": ...}`, then an alert with the
//!   outcome read from the JSON acknowledgement.
//!
//! Nothing is retried. Any failure ends in an "Unexpected error" alert.

use common::requests::ReportDefectRequest;
use common::trigger::{dialog_for_response, plan, unexpected_error, Dialog, TriggerAction};
use gloo_net::http::Request;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

mod props;

pub use props::ReportDefectProps;

pub enum Msg {
    Click,
    Finished(Dialog),
}

pub struct ReportDefectButton {
    busy: bool,
}

impl Component for ReportDefectButton {
    type Message = Msg;
    type Properties = ReportDefectProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self { busy: false }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Click => {
                if self.busy {
                    return false;
                }
                let props = ctx.props();
                match plan(&props.handler_url, props.po_id.as_deref(), props.transport) {
                    Ok(TriggerAction::Navigate { url }) => {
                        navigate(&url);
                        false
                    }
                    Ok(TriggerAction::Submit { url, request }) => {
                        self.busy = true;
                        let link = ctx.link().clone();
                        spawn_local(async move {
                            link.send_message(Msg::Finished(submit(&url, &request).await));
                        });
                        true
                    }
                    Err(e) => {
                        show_dialog(&unexpected_error(e));
                        false
                    }
                }
            }
            Msg::Finished(dialog) => {
                self.busy = false;
                show_dialog(&dialog);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let label = if self.busy { "Reporting..." } else { "Report Defect" };
        html! {
            <button
                type="button"
                class="button button-primary"
                disabled={self.busy}
                onclick={ctx.link().callback(|_| Msg::Click)}
            >
                { label }
            </button>
        }
    }
}

async fn submit(url: &str, request: &ReportDefectRequest) -> Dialog {
    let request = match Request::post(url).json(request) {
        Ok(request) => request,
        Err(e) => return unexpected_error(e),
    };
    let response = match request.send().await {
        Ok(response) => response,
        Err(e) => return unexpected_error(e),
    };
    match response.text().await {
        Ok(body) => dialog_for_response(&body),
        Err(e) => unexpected_error(e),
    }
}

fn navigate(url: &str) {
    let Some(window) = web_sys::window() else {
        show_dialog(&unexpected_error("no browser window"));
        return;
    };
    if let Err(e) = window.location().set_href(url) {
        gloo_console::error!(e.clone());
        show_dialog(&unexpected_error(js_message(&e)));
    }
}

fn show_dialog(dialog: &Dialog) {
    match web_sys::window() {
        Some(window) => {
            if window.alert_with_message(&dialog.as_alert_text()).is_err() {
                gloo_console::error!(dialog.message.clone());
            }
        }
        None => gloo_console::error!(dialog.message.clone()),
    }
}

fn js_message(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
