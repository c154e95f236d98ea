//! Primary backend: the `claude` CLI invoked as a child process.

use std::time::Instant;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::domain::{CompletionBackend, DomainError, InvokeOptions};

/// Longest process-output snippet carried inside an error message.
const ERROR_OUTPUT_SNIPPET_LEN: usize = 500;

/// Invokes the `claude` CLI for chat completions.
///
/// Every call is a fresh `claude --print <prompt>` process; the typed
/// option bag maps onto CLI flags and is otherwise opaque to the gateway.
#[derive(Debug, Clone)]
pub struct ClaudeClient {
    binary: String,
    system_prompt: Option<String>,
}

impl ClaudeClient {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            system_prompt: None,
        }
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Map the option bag onto CLI arguments. The prompt itself is always
    /// the final argument.
    fn build_args(&self, prompt: &str, options: &InvokeOptions) -> Vec<String> {
        let mut args = Vec::new();

        // Non-interactive mode unless the caller asked for stream-json.
        if options.output_format.as_deref() != Some("stream-json") {
            args.push("--print".to_string());
        }

        if options.auto_allow_permissions == Some(true) {
            args.push("--dangerously-skip-permissions".to_string());
        }

        if let Some(tools) = options.tools.as_deref().filter(|t| !t.is_empty()) {
            args.push("--allowedTools".to_string());
            args.push(tools.join(","));
        }

        if let Some(tools) = options.disallowed_tools.as_deref().filter(|t| !t.is_empty()) {
            args.push("--disallowedTools".to_string());
            args.push(tools.join(","));
        }

        if let Some(session_id) = options.session_id.as_deref().filter(|s| !s.is_empty()) {
            args.push("--resume".to_string());
            args.push(session_id.to_string());
        }

        if options.continue_conversation == Some(true) {
            args.push("--continue".to_string());
        }

        if let Some(model) = options.model.as_deref().filter(|m| !m.is_empty()) {
            args.push("--model".to_string());
            args.push(model.to_string());
        }

        if let Some(format) = options.output_format.as_deref().filter(|f| !f.is_empty()) {
            args.push("--output-format".to_string());
            args.push(format.to_string());
        }

        if options.debug == Some(true) {
            args.push("--debug".to_string());
        }

        if let Some(mcp_config) = &options.mcp_config {
            let value = match mcp_config {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            args.push("--mcp-config".to_string());
            args.push(value);
        }

        args.push(self.build_prompt(prompt, options));
        args
    }

    /// Assemble the full prompt: system prompt first, then the flattened
    /// conversation, then any file/image references.
    fn build_prompt(&self, prompt: &str, options: &InvokeOptions) -> String {
        let mut full_prompt = String::new();

        if let Some(system_prompt) = self.system_prompt.as_deref() {
            full_prompt.push_str(system_prompt);
            full_prompt.push_str("\n\n");
        }

        full_prompt.push_str(prompt);

        for file in options.files.iter().flatten() {
            full_prompt.push_str(&format!("\n\nFile: {file}"));
        }

        for image in options.images.iter().flatten() {
            full_prompt.push_str(&format!("\n\nImage: {image}"));
        }

        full_prompt
    }
}

#[async_trait]
impl CompletionBackend for ClaudeClient {
    async fn complete(&self, prompt: &str, options: &InvokeOptions) -> Result<String, DomainError> {
        let start = Instant::now();
        let args = self.build_args(prompt, options);

        debug!(binary = %self.binary, args = args.len(), "Starting claude request");

        let mut command = Command::new(&self.binary);
        command.args(&args);

        if let Some(working_dir) = options.working_dir.as_deref().filter(|d| !d.is_empty()) {
            debug!(working_dir, "Using working directory");
            command.current_dir(working_dir);
        }

        let output = command.output().await.map_err(|e| {
            warn!(error = %e, "Failed to spawn claude process");
            DomainError::backend(format!("claude execution failed: {e}"))
        })?;

        let duration = start.elapsed();

        if !output.status.success() {
            let mut detail = String::from_utf8_lossy(&output.stdout).trim().to_string();
            let stderr = String::from_utf8_lossy(&output.stderr);
            if !stderr.trim().is_empty() {
                if !detail.is_empty() {
                    detail.push('\n');
                }
                detail.push_str(stderr.trim());
            }
            if detail.len() > ERROR_OUTPUT_SNIPPET_LEN {
                let mut end = ERROR_OUTPUT_SNIPPET_LEN;
                while !detail.is_char_boundary(end) {
                    end -= 1;
                }
                detail.truncate(end);
            }

            warn!(
                status = %output.status,
                duration_ms = duration.as_millis() as u64,
                "Claude request failed"
            );

            return Err(DomainError::backend(format!(
                "claude execution failed: {}: {detail}",
                output.status
            )));
        }

        let response = String::from_utf8_lossy(&output.stdout).trim().to_string();

        info!(
            duration_ms = duration.as_millis() as u64,
            chars = response.len(),
            "Claude request completed"
        );

        Ok(response)
    }

    fn backend_name(&self) -> &str {
        "claude"
    }
}
