//! Properties for the `ReportDefectButton`, read from the mount element the
//! order page renders.

use common::trigger::TriggerTransport;
use yew::prelude::*;

pub const DEFAULT_HANDLER_URL: &str = "/defect";

fn default_handler_url() -> String {
    DEFAULT_HANDLER_URL.to_string()
}

#[derive(Properties, PartialEq, Clone, Debug)]
pub struct ReportDefectProps {
    /// Id of the purchase order on the page. Clicking without one shows an error.
    #[prop_or_default]
    pub po_id: Option<String>,
    #[prop_or_else(default_handler_url)]
    pub handler_url: String,
    #[prop_or_default]
    pub transport: TriggerTransport,
}

impl ReportDefectProps {
    /// Builds the props from the `data-po-id`, `data-handler-url` and
    /// `data-transport` attributes. An unknown transport falls back to
    /// navigation.
    pub fn from_attributes(
        po_id: Option<String>,
        handler_url: Option<String>,
        transport: Option<String>,
    ) -> Self {
        let transport = match transport.as_deref().map(str::parse::<TriggerTransport>) {
            Some(Ok(transport)) => transport,
            Some(Err(e)) => {
                gloo_console::error!(e.to_string());
                TriggerTransport::default()
            }
            None => TriggerTransport::default(),
        };

        Self {
            po_id: po_id.filter(|id| !id.trim().is_empty()),
            handler_url: handler_url
                .filter(|url| !url.trim().is_empty())
                .unwrap_or_else(default_handler_url),
            transport,
        }
    }
}
