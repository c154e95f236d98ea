//! API middleware components

pub mod auth;
pub mod logging;

pub use auth::require_api_key;
pub use logging::logging_middleware;
