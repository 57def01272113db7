//! Runtime settings read from the environment (and an optional `.env` file).

use common::trigger::TriggerTransport;
use std::env;
use std::path::PathBuf;
use thiserror::Error;

/// Path the defect handler is mounted on.
pub const HANDLER_PATH: &str = "/defect";
/// Path prefix of the purchase order pages.
pub const ORDER_PATH: &str = "/orders";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("DEFECT_TRIGGER_TRANSPORT: {0}")]
    Transport(#[from] common::error::TriggerError),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
    /// Insert the demo purchase order, vendor and fault issues on start.
    pub seed_demo: bool,
    pub open_browser: bool,
    pub trigger_transport: TriggerTransport,
    /// Send the user back to the order in edit mode instead of view mode.
    pub redirect_edit_mode: bool,
    /// Append `custpage_defect_saved=T&new_defect_id=<id>` to the redirect.
    pub success_signal: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            db_path: PathBuf::from("defects.sqlite"),
            seed_demo: false,
            open_browser: false,
            trigger_transport: TriggerTransport::Navigate,
            redirect_edit_mode: false,
            success_signal: true,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Config::default();
        let trigger_transport = match env::var("DEFECT_TRIGGER_TRANSPORT") {
            Ok(raw) => raw.parse()?,
            Err(_) => defaults.trigger_transport,
        };

        Ok(Self {
            host: env::var("DEFECT_HOST").unwrap_or(defaults.host),
            port: env_u16("DEFECT_PORT", defaults.port),
            db_path: env::var("DEFECT_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.db_path),
            seed_demo: env_bool("DEFECT_SEED_DEMO", defaults.seed_demo),
            open_browser: env_bool("DEFECT_OPEN_BROWSER", defaults.open_browser),
            trigger_transport,
            redirect_edit_mode: env_bool("DEFECT_REDIRECT_EDIT_MODE", defaults.redirect_edit_mode),
            success_signal: env_bool("DEFECT_SUCCESS_SIGNAL", defaults.success_signal),
        })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

fn env_bool(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| parse_bool(&v))
        .unwrap_or(default)
}

fn env_u16(name: &str, default: u16) -> u16 {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u16>().ok())
        .unwrap_or(default)
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim() {
        "1" | "true" | "TRUE" | "yes" | "YES" | "T" => Some(true),
        "0" | "false" | "FALSE" | "no" | "NO" | "F" => Some(false),
        _ => None,
    }
}
