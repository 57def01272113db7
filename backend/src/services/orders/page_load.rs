//! Additions made to the purchase order page while it loads: the "Report
//! Defect" button and, after a defect was just saved, the confirmation banner.
//!
//! Nothing here may fail the page. Banner problems are logged and dropped.

use crate::config::{Config, HANDLER_PATH};
use common::trigger::TriggerTransport;
use log::{debug, error};
use thiserror::Error;

pub const EDIT_MODE_PARAM: &str = "e";
pub const DEFECT_SAVED_PARAM: &str = "custpage_defect_saved";
pub const NEW_DEFECT_ID_PARAM: &str = "new_defect_id";
pub const BANNER_DURATION_MS: u32 = 10_000;

/// Query parameters the order page understands.
///
/// Every occurrence of the signal parameters is kept; a repeated one is a
/// banner problem, not a reason to reject the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderPageQuery {
    pub edit: Option<String>,
    pub defect_saved: Vec<String>,
    pub new_defect_id: Vec<String>,
}

impl OrderPageQuery {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (name, value) in pairs {
            match name.as_str() {
                EDIT_MODE_PARAM => {
                    query.edit.get_or_insert(value);
                }
                DEFECT_SAVED_PARAM => query.defect_saved.push(value),
                NEW_DEFECT_ID_PARAM => query.new_defect_id.push(value),
                _ => {}
            }
        }
        query
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMode {
    View,
    Edit,
}

impl PageMode {
    pub fn from_query(query: &OrderPageQuery) -> Self {
        if query.edit.as_deref() == Some("T") {
            PageMode::Edit
        } else {
            PageMode::View
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BannerError {
    #[error("parameter `{0}` was given more than once")]
    RepeatedParameter(&'static str),
}

/// The parameter's only value, if it was given.
fn single<'a>(values: &'a [String], name: &'static str) -> Result<Option<&'a str>, BannerError> {
    match values {
        [] => Ok(None),
        [value] => Ok(Some(value.as_str())),
        _ => Err(BannerError::RepeatedParameter(name)),
    }
}

/// Data attributes the browser component reads from its mount element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportButton {
    pub label: &'static str,
    pub po_id: String,
    pub handler_url: &'static str,
    pub transport: TriggerTransport,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub title: String,
    pub message: String,
    pub duration_ms: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageAdditions {
    pub button: Option<ReportButton>,
    pub banner: Option<Banner>,
}

/// Runs only when the order is viewed; edit mode gets nothing.
pub fn before_load(
    mode: PageMode,
    po_id: &str,
    query: &OrderPageQuery,
    config: &Config,
) -> PageAdditions {
    if mode != PageMode::View {
        return PageAdditions::default();
    }

    let button = ReportButton {
        label: "Report Defect",
        po_id: po_id.to_string(),
        handler_url: HANDLER_PATH,
        transport: config.trigger_transport,
    };

    let banner = match success_banner(query) {
        Ok(banner) => banner,
        Err(e) => {
            error!("Order page: could not show the defect banner: {e}");
            None
        }
    };

    PageAdditions {
        button: Some(button),
        banner,
    }
}

/// The confirmation banner, when the page was reached right after a save.
pub fn success_banner(query: &OrderPageQuery) -> Result<Option<Banner>, BannerError> {
    if single(&query.defect_saved, DEFECT_SAVED_PARAM)? != Some("T") {
        return Ok(None);
    }
    let Some(record_id) = single(&query.new_defect_id, NEW_DEFECT_ID_PARAM)?
        .map(str::trim)
        .filter(|id| !id.is_empty())
    else {
        return Ok(None);
    };

    debug!("Order page: defect success signal received, id {record_id}");
    Ok(Some(Banner {
        title: "Success!".to_string(),
        message: format!("Successfully created Manufacturing Defect record (ID: {record_id})."),
        duration_ms: BANNER_DURATION_MS,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn saved(id: &str) -> OrderPageQuery {
        OrderPageQuery {
            defect_saved: vec!["T".to_string()],
            new_defect_id: vec![id.to_string()],
            ..OrderPageQuery::default()
        }
    }

    #[test]
    fn banner_needs_both_signal_parameters() {
        assert_eq!(success_banner(&OrderPageQuery::default()), Ok(None));

        let mut query = saved("801");
        query.defect_saved = vec!["F".to_string()];
        assert_eq!(success_banner(&query), Ok(None));

        assert_eq!(success_banner(&saved("")), Ok(None));
    }

    #[test]
    fn banner_carries_the_new_id() {
        let banner = success_banner(&saved("801")).unwrap().unwrap();
        assert_eq!(banner.title, "Success!");
        assert_eq!(
            banner.message,
            "Successfully created Manufacturing Defect record (ID: 801)."
        );
        assert_eq!(banner.duration_ms, 10_000);
    }

    #[test]
    fn repeated_signal_is_swallowed() {
        let mut query = saved("801");
        query.new_defect_id.push("802".to_string());
        assert_eq!(
            success_banner(&query),
            Err(BannerError::RepeatedParameter(NEW_DEFECT_ID_PARAM))
        );

        let additions = before_load(PageMode::View, "123", &query, &Config::default());
        assert!(additions.banner.is_none());
        assert!(additions.button.is_some());
    }

    #[test]
    fn query_pairs_keep_every_signal_value() {
        let pair = |name: &str, value: &str| (name.to_string(), value.to_string());
        let query = OrderPageQuery::from_pairs(vec![
            pair("e", "T"),
            pair("e", "F"),
            pair("custpage_defect_saved", "T"),
            pair("new_defect_id", "801"),
            pair("new_defect_id", "802"),
            pair("whence", ""),
        ]);
        assert_eq!(query.edit.as_deref(), Some("T"));
        assert_eq!(query.defect_saved, vec!["T"]);
        assert_eq!(query.new_defect_id, vec!["801", "802"]);
    }

    #[test]
    fn edit_mode_adds_nothing() {
        let additions = before_load(PageMode::Edit, "123", &saved("801"), &Config::default());
        assert_eq!(additions, PageAdditions::default());
    }

    #[test]
    fn button_uses_configured_transport() {
        let config = Config {
            trigger_transport: TriggerTransport::Async,
            ..Config::default()
        };
        let button = before_load(PageMode::View, "123", &OrderPageQuery::default(), &config)
            .button
            .unwrap();
        assert_eq!(button.po_id, "123");
        assert_eq!(button.handler_url, "/defect");
        assert_eq!(button.transport, TriggerTransport::Async);
    }

    #[test]
    fn edit_flag_selects_mode() {
        let query = OrderPageQuery {
            edit: Some("T".to_string()),
            ..OrderPageQuery::default()
        };
        assert_eq!(PageMode::from_query(&query), PageMode::Edit);
        assert_eq!(PageMode::from_query(&OrderPageQuery::default()), PageMode::View);
    }
}
