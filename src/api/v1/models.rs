//! Models listing endpoint

use axum::response::IntoResponse;

use crate::api::types::{ApiModel, Json, ModelsResponse};

const OWNED_BY: &str = "claude-gateway";

/// GET /v1/models
///
/// Static list of the model aliases OpenAI clients commonly probe for.
/// Requests are served by whichever backend wins the fallback chain; the
/// model name only selects the fallback model override.
pub async fn list_models() -> impl IntoResponse {
    Json(ModelsResponse::new(vec![
        ApiModel::new("gpt-3.5-turbo", 1677610602, OWNED_BY),
        ApiModel::new("gpt-4", 1687882410, OWNED_BY),
    ]))
}
