//! Shared application state

use std::sync::Arc;

use crate::infrastructure::FallbackDispatcher;

/// State shared by every request handler. The dispatcher and the API key
/// are created once at startup and read-only afterwards.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<FallbackDispatcher>,
    /// Static bearer key; `None` leaves the API publicly accessible.
    pub api_key: Option<String>,
}

impl AppState {
    pub fn new(dispatcher: Arc<FallbackDispatcher>, api_key: Option<String>) -> Self {
        Self {
            dispatcher,
            api_key,
        }
    }
}
