//! Typed option bag for the primary backend invocation.

use serde::{Deserialize, Serialize};

/// Backend-specific invocation options, decoded once from the request's
/// `claude_options` object. Every field is optional and forwarded opaquely
/// to the CLI; the gateway interprets none of the values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvokeOptions {
    /// Allowed tool names, joined for `--allowedTools`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<String>>,

    /// Disallowed tool names, joined for `--disallowedTools`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disallowed_tools: Option<Vec<String>>,

    /// Session resume token, passed as `--resume`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,

    /// Continue the most recent conversation (`--continue`).
    #[serde(rename = "continue", skip_serializing_if = "Option::is_none")]
    pub continue_conversation: Option<bool>,

    /// Model selection, passed as `--model`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Output format (`text`, `json`, `stream-json`), passed as
    /// `--output-format`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_format: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<bool>,

    /// MCP server configuration; a string is passed through as-is, any
    /// other JSON value is serialized before being handed to `--mcp-config`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mcp_config: Option<serde_json::Value>,

    /// Working directory for file operations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<String>,

    /// File paths referenced in the prompt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<String>>,

    /// Image paths referenced in the prompt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,

    /// Skip tool permission prompts (`--dangerously-skip-permissions`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_allow_permissions: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_all_unset() {
        let options = InvokeOptions::default();
        assert!(options.tools.is_none());
        assert!(options.session_id.is_none());
        assert!(options.auto_allow_permissions.is_none());
    }

    #[test]
    fn test_decode_from_request_json() {
        let json = r#"{
            "tools": ["Bash", "Read"],
            "session_id": "abc123",
            "continue": true,
            "model": "opus",
            "working_dir": "/tmp/project"
        }"#;

        let options: InvokeOptions = serde_json::from_str(json).unwrap();
        assert_eq!(
            options.tools,
            Some(vec!["Bash".to_string(), "Read".to_string()])
        );
        assert_eq!(options.session_id.as_deref(), Some("abc123"));
        assert_eq!(options.continue_conversation, Some(true));
        assert_eq!(options.model.as_deref(), Some("opus"));
        assert_eq!(options.working_dir.as_deref(), Some("/tmp/project"));
    }

    #[test]
    fn test_unset_fields_are_omitted_when_serialized() {
        let options = InvokeOptions {
            model: Some("sonnet".to_string()),
            ..Default::default()
        };

        let json = serde_json::to_string(&options).unwrap();
        assert_eq!(json, r#"{"model":"sonnet"}"#);
    }

    #[test]
    fn test_mcp_config_accepts_string_or_object() {
        let as_string: InvokeOptions =
            serde_json::from_str(r#"{"mcp_config": "/etc/mcp.json"}"#).unwrap();
        assert!(as_string.mcp_config.unwrap().is_string());

        let as_object: InvokeOptions =
            serde_json::from_str(r#"{"mcp_config": {"servers": {}}}"#).unwrap();
        assert!(as_object.mcp_config.unwrap().is_object());
    }
}
