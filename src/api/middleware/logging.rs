//! Request/response logging middleware with sensitive data redaction

use std::time::Instant;

use axum::{
    body::{Body, to_bytes},
    http::{Method, Request},
    middleware::Next,
    response::Response,
};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info, warn, Level};

/// Longest request body logged before truncation.
const MAX_LOGGED_BODY_LEN: usize = 1000;

/// Largest request body buffered for debug logging.
const MAX_BUFFERED_BODY: usize = 1024 * 1024;

static SENSITIVE_FIELD_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    ["api_key", "apiKey", "password", "token", "secret", "authorization"]
        .iter()
        .map(|field| {
            Regex::new(&format!(r#"(?i)("{field}"\s*:\s*)"[^"]*""#))
                .expect("static redaction pattern")
        })
        .collect()
});

/// Log every request and its completion; at debug level, also log POST
/// bodies after redacting sensitive fields.
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    info!(method = %method, path = %path, "Request received");

    let request = if method == Method::POST && tracing::enabled!(Level::DEBUG) {
        buffer_and_log_body(request, &path).await
    } else {
        request
    };

    let response = next.run(request).await;

    info!(
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        duration_ms = start.elapsed().as_millis() as u64,
        "Request completed"
    );

    response
}

async fn buffer_and_log_body(request: Request<Body>, path: &str) -> Request<Body> {
    let (parts, body) = request.into_parts();

    match to_bytes(body, MAX_BUFFERED_BODY).await {
        Ok(bytes) => {
            if !bytes.is_empty() {
                let text = String::from_utf8_lossy(&bytes);
                debug!(path, body = %sanitize_body(&text), "Request body");
            }
            Request::from_parts(parts, Body::from(bytes))
        }
        Err(error) => {
            warn!(path, %error, "Failed to buffer request body for logging");
            Request::from_parts(parts, Body::empty())
        }
    }
}

/// Mask sensitive JSON fields and truncate very long bodies.
pub fn sanitize_body(body: &str) -> String {
    let mut sanitized = body.to_string();

    for pattern in SENSITIVE_FIELD_PATTERNS.iter() {
        sanitized = pattern
            .replace_all(&sanitized, r#"${1}"********""#)
            .into_owned();
    }

    if sanitized.len() > MAX_LOGGED_BODY_LEN {
        let mut end = MAX_LOGGED_BODY_LEN - 3;
        while !sanitized.is_char_boundary(end) {
            end -= 1;
        }
        sanitized.truncate(end);
        sanitized.push_str("...");
    }

    sanitized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_masks_api_key() {
        let body = r#"{"model":"gpt-4","api_key":"sk-secret123"}"#;
        let sanitized = sanitize_body(body);

        assert!(!sanitized.contains("sk-secret123"));
        assert!(sanitized.contains(r#""api_key":"********""#));
        assert!(sanitized.contains("gpt-4"));
    }

    #[test]
    fn test_sanitize_is_case_insensitive() {
        let body = r#"{"Authorization":"Bearer sk-abc"}"#;
        let sanitized = sanitize_body(body);
        assert!(!sanitized.contains("sk-abc"));
    }

    #[test]
    fn test_sanitize_masks_multiple_fields() {
        let body = r#"{"password":"hunter2","token":"t0k3n","note":"ok"}"#;
        let sanitized = sanitize_body(body);

        assert!(!sanitized.contains("hunter2"));
        assert!(!sanitized.contains("t0k3n"));
        assert!(sanitized.contains(r#""note":"ok""#));
    }

    #[test]
    fn test_sanitize_truncates_long_bodies() {
        let body = format!(r#"{{"content":"{}"}}"#, "x".repeat(2000));
        let sanitized = sanitize_body(&body);

        assert!(sanitized.len() <= MAX_LOGGED_BODY_LEN);
        assert!(sanitized.ends_with("..."));
    }

    #[test]
    fn test_sanitize_leaves_clean_bodies_alone() {
        let body = r#"{"model":"gpt-4","messages":[]}"#;
        assert_eq!(sanitize_body(body), body);
    }
}
