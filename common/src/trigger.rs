//! What the "Report Defect" button does when clicked.
//!
//! The browser component only performs side effects (navigation, HTTP, alerts);
//! deciding the target URL and turning the handler's answer into a dialog
//! happens here so it can be exercised without a browser.

use crate::error::TriggerError;
use crate::requests::{DefectAck, ReportDefectRequest};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the button reaches the handler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerTransport {
    /// The browser navigates to `GET <handler>?poId=<id>` and the form is shown.
    #[default]
    Navigate,
    /// `POST <handler>` with `{"poId": ...}`; the JSON answer is shown in a dialog.
    Async,
}

impl TriggerTransport {
    pub fn as_str(self) -> &'static str {
        match self {
            TriggerTransport::Navigate => "navigate",
            TriggerTransport::Async => "async",
        }
    }
}

impl FromStr for TriggerTransport {
    type Err = TriggerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "navigate" => Ok(TriggerTransport::Navigate),
            "async" => Ok(TriggerTransport::Async),
            other => Err(TriggerError::UnknownTransport(other.to_string())),
        }
    }
}

impl fmt::Display for TriggerTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The side effect a click should produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerAction {
    Navigate { url: String },
    Submit { url: String, request: ReportDefectRequest },
}

/// A user-facing alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    pub title: String,
    pub message: String,
}

impl Dialog {
    /// Plain-text rendering for `window.alert`.
    pub fn as_alert_text(&self) -> String {
        format!("{}\n\n{}", self.title, self.message)
    }
}

/// Appends `poId=<id>` to the handler URL, keeping any query it already has.
pub fn handler_url_for(handler_url: &str, po_id: &str) -> String {
    let separator = if handler_url.contains('?') { '&' } else { '?' };
    format!(
        "{handler_url}{separator}poId={}",
        urlencoding::encode(po_id)
    )
}

/// Decides what a click does for the order currently on the page.
pub fn plan(
    handler_url: &str,
    po_id: Option<&str>,
    transport: TriggerTransport,
) -> Result<TriggerAction, TriggerError> {
    let po_id = po_id
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or(TriggerError::MissingPoId)?;

    Ok(match transport {
        TriggerTransport::Navigate => TriggerAction::Navigate {
            url: handler_url_for(handler_url, po_id),
        },
        TriggerTransport::Async => TriggerAction::Submit {
            url: handler_url.to_string(),
            request: ReportDefectRequest::new(po_id),
        },
    })
}

/// Reads the handler's JSON acknowledgement.
pub fn read_ack(body: &str) -> Result<DefectAck, TriggerError> {
    Ok(serde_json::from_str(body)?)
}

/// The dialog shown for an acknowledgement.
pub fn dialog_for_ack(ack: &DefectAck) -> Dialog {
    if ack.success {
        let message = match ack.record_id.as_deref() {
            Some(id) => format!("Manufacturing Defect record created (ID: {id})."),
            None => "Manufacturing Defect record created.".to_string(),
        };
        Dialog {
            title: "Success".to_string(),
            message,
        }
    } else {
        Dialog {
            title: "Error".to_string(),
            message: ack
                .message
                .clone()
                .unwrap_or_else(|| "The defect record could not be created.".to_string()),
        }
    }
}

/// The catch-all dialog for transport and parsing failures.
pub fn unexpected_error(error: impl fmt::Display) -> Dialog {
    Dialog {
        title: "Error".to_string(),
        message: format!("Unexpected error: {error}"),
    }
}

/// Turns a raw response body into the dialog to show, whatever it contains.
pub fn dialog_for_response(body: &str) -> Dialog {
    match read_ack(body) {
        Ok(ack) => dialog_for_ack(&ack),
        Err(error) => unexpected_error(error),
    }
}
