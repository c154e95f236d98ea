//! OpenAI-compatible model types

use serde::{Deserialize, Serialize};

/// Model information (OpenAI format)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Model {
    pub id: String,
    pub object: String,
    pub created: i64,
    pub owned_by: String,
}

impl Model {
    pub fn new(id: impl Into<String>, created: i64, owned_by: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            object: "model".to_string(),
            created,
            owned_by: owned_by.into(),
        }
    }
}

/// List models response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsResponse {
    pub object: String,
    pub data: Vec<Model>,
}

impl ModelsResponse {
    pub fn new(models: Vec<Model>) -> Self {
        Self {
            object: "list".to_string(),
            data: models,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_serialization() {
        let model = Model::new("gpt-4", 1687882410, "claude-gateway");
        let json = serde_json::to_string(&model).unwrap();
        assert!(json.contains(r#""id":"gpt-4""#));
        assert!(json.contains(r#""object":"model""#));
        assert!(json.contains(r#""owned_by":"claude-gateway""#));
    }

    #[test]
    fn test_models_response() {
        let response = ModelsResponse::new(vec![
            Model::new("a", 0, "x"),
            Model::new("b", 0, "x"),
        ]);
        assert_eq!(response.object, "list");
        assert_eq!(response.data.len(), 2);
    }
}
