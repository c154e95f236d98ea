//! Health and service-info endpoints

use axum::response::IntoResponse;
use serde::Serialize;

use crate::api::types::Json;

const SERVICE_NAME: &str = "claude-gateway";

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

#[derive(Serialize)]
pub struct ServiceInfo {
    pub message: &'static str,
    pub version: &'static str,
    pub endpoints: [&'static str; 3],
}

/// GET /health
pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        service: SERVICE_NAME,
    })
}

/// GET / - service banner
pub async fn service_info() -> impl IntoResponse {
    Json(ServiceInfo {
        message: "Claude Gateway - OpenAI Compatible API Server",
        version: env!("CARGO_PKG_VERSION"),
        endpoints: ["/v1/chat/completions", "/v1/models", "/health"],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_serialization() {
        let response = HealthResponse {
            status: "ok",
            service: SERVICE_NAME,
        };
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"status":"ok","service":"claude-gateway"}"#);
    }

    #[test]
    fn test_service_info_lists_endpoints() {
        let info = ServiceInfo {
            message: "Claude Gateway - OpenAI Compatible API Server",
            version: "0.1.0",
            endpoints: ["/v1/chat/completions", "/v1/models", "/health"],
        };
        let json = serde_json::to_string(&info).unwrap();
        assert!(json.contains("/v1/chat/completions"));
        assert!(json.contains("/v1/models"));
    }
}
