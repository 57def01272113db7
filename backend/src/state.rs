//! Application state handed to every request through `web::Data`.

use crate::config::Config;
use crate::store::RecordStore;
use std::sync::Arc;

/// Read-only per-process state. Requests never mutate it; the store is the
/// only shared resource and every call against it stands alone.
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub config: Config,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>, config: Config) -> Self {
        Self { store, config }
    }
}
