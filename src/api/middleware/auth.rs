//! Static API key authentication middleware

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::api::state::AppState;
use crate::api::types::ApiError;

/// Paths that never require authentication.
const EXEMPT_PATHS: [&str; 2] = ["/health", "/"];

/// Validate the request's bearer token against the configured API key.
/// With no key configured the API is open and every request passes.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let Some(expected) = state.api_key.as_deref() else {
        return next.run(request).await;
    };

    let path = request.uri().path().to_string();
    if EXEMPT_PATHS.contains(&path.as_str()) {
        return next.run(request).await;
    }

    let authorized = extract_bearer_token(request.headers()) == Some(expected);

    if authorized {
        next.run(request).await
    } else {
        warn!(%path, "Missing or invalid API key");
        ApiError::invalid_api_key().into_response()
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header.
fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderMap;

    use super::*;

    #[test]
    fn test_extract_bearer_token() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Bearer sk-test-key".parse().unwrap());

        assert_eq!(extract_bearer_token(&headers), Some("sk-test-key"));
    }

    #[test]
    fn test_missing_header() {
        assert_eq!(extract_bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_non_bearer_scheme_is_rejected() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            "Basic dXNlcjpwYXNz".parse().unwrap(),
        );

        assert_eq!(extract_bearer_token(&headers), None);
    }
}
