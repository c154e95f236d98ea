use serde::Deserialize;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub claude: ClaudeConfig,
    #[serde(default)]
    pub fallback: FallbackConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Primary backend configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ClaudeConfig {
    /// Name or path of the CLI binary.
    #[serde(default = "default_claude_binary")]
    pub binary: String,

    /// Optional system prompt prepended to every flattened conversation.
    #[serde(default)]
    pub system_prompt: Option<String>,

    /// Extra attempts against the primary backend before giving up on it.
    /// Zero disables the retry wrapper.
    #[serde(default)]
    pub max_retries: u32,

    /// Base delay between retry attempts (grows linearly per attempt).
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// TTL for the completion cache. Zero disables the cache wrapper.
    #[serde(default)]
    pub cache_ttl_secs: u64,
}

/// Fallback provider call configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct FallbackConfig {
    /// Per-attempt request timeout, bounding each provider call.
    #[serde(default = "default_fallback_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8082
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_claude_binary() -> String {
    "claude".to_string()
}

fn default_retry_delay_ms() -> u64 {
    1000
}

fn default_fallback_timeout_secs() -> u64 {
    30
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

impl Default for ClaudeConfig {
    fn default() -> Self {
        Self {
            binary: default_claude_binary(),
            system_prompt: None,
            max_retries: 0,
            retry_delay_ms: default_retry_delay_ms(),
            cache_ttl_secs: 0,
        }
    }
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_fallback_timeout_secs(),
        }
    }
}

impl AppConfig {
    /// Load configuration from optional files and `APP__`-prefixed
    /// environment variables (e.g. `APP__SERVER__PORT=9000`).
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
