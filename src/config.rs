//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::floats::{Coordinate, DEFAULT_NEAREST_LIMIT, REFERENCE_POINT};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub chat: ChatConfig,

    #[serde(default)]
    pub analytics: AnalyticsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_cors_origins() -> Vec<String> {
    vec!["http://localhost:5173".to_string()]
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: default_cors_origins(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl ApiConfig {
    /// Create config with custom host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Whether any origin may call the API
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.is_empty() || self.cors_origins.iter().any(|o| o == "*")
    }
}

/// Local assistant configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    #[serde(default = "default_reference_lat")]
    pub reference_lat: f64,

    #[serde(default = "default_reference_lon")]
    pub reference_lon: f64,

    #[serde(default = "default_nearest_limit")]
    pub nearest_limit: usize,

    #[serde(default = "default_typing_delay")]
    pub typing_delay_ms: u64,

    #[serde(default = "default_max_history")]
    pub max_history: usize,
}

fn default_reference_lat() -> f64 {
    REFERENCE_POINT.lat
}

fn default_reference_lon() -> f64 {
    REFERENCE_POINT.lon
}

fn default_nearest_limit() -> usize {
    DEFAULT_NEAREST_LIMIT
}

fn default_typing_delay() -> u64 {
    20
}

fn default_max_history() -> usize {
    100
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            reference_lat: default_reference_lat(),
            reference_lon: default_reference_lon(),
            nearest_limit: default_nearest_limit(),
            typing_delay_ms: default_typing_delay(),
            max_history: default_max_history(),
        }
    }
}

impl ChatConfig {
    /// Reference point as a validated coordinate
    pub fn reference(&self) -> Result<Coordinate, ConfigError> {
        Coordinate::new(self.reference_lat, self.reference_lon)
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }
}

/// External analytics service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyticsConfig {
    #[serde(default = "default_analytics_url")]
    pub url: String,

    #[serde(default = "default_analytics_timeout")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_chat_type")]
    pub default_chat_type: String,
}

fn default_analytics_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_analytics_timeout() -> u64 {
    30
}

fn default_chat_type() -> String {
    crate::chat::ChatType::default().as_str().to_string()
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            url: default_analytics_url(),
            request_timeout_secs: default_analytics_timeout(),
            default_chat_type: default_chat_type(),
        }
    }
}

impl AnalyticsConfig {
    /// Settings for [`crate::analytics::AnalyticsClient`]
    pub fn client_config(&self) -> crate::analytics::AnalyticsConfig {
        crate::analytics::AnalyticsConfig {
            base_url: self.url.clone(),
            request_timeout_ms: self.request_timeout_secs.saturating_mul(1000),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    /// Filter used when `RUST_LOG` is unset; covers the library and each binary
    pub fn default_directives(&self) -> String {
        let level = &self.level;
        format!("floatchat={level},floatchat_api={level},floatchat_cli={level},tower_http=debug")
    }

    /// Install the global tracing subscriber
    ///
    /// `RUST_LOG` takes precedence over the configured level.
    pub fn init(&self) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.default_directives()));
        let registry = tracing_subscriber::registry().with(filter);

        match self.format.as_str() {
            "json" => registry.with(tracing_subscriber::fmt::layer().json()).init(),
            _ => registry.with(tracing_subscriber::fmt::layer()).init(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("floatchat").join("config.toml")),
            Some(PathBuf::from("/etc/floatchat/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Check values serde cannot check
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.chat.reference()?;

        if self.chat.nearest_limit == 0 {
            return Err(ConfigError::Invalid(
                "chat.nearest_limit must be at least 1".to_string(),
            ));
        }
        if self.chat.max_history == 0 {
            return Err(ConfigError::Invalid(
                "chat.max_history must be at least 1".to_string(),
            ));
        }
        if self.api.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "api.request_timeout_secs must be at least 1".to_string(),
            ));
        }
        if self.analytics.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "analytics.request_timeout_secs must be at least 1".to_string(),
            ));
        }
        self.analytics
            .default_chat_type
            .parse::<crate::chat::ChatType>()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        Ok(())
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        // API overrides
        if let Ok(host) = std::env::var("FLOATCHAT_API_HOST") {
            self.api.host = host;
        }
        if let Ok(port) = std::env::var("FLOATCHAT_API_PORT") {
            if let Ok(p) = port.parse() {
                self.api.port = p;
            }
        }

        // Chat overrides
        if let Ok(delay) = std::env::var("FLOATCHAT_TYPING_DELAY_MS") {
            if let Ok(d) = delay.parse() {
                self.chat.typing_delay_ms = d;
            }
        }

        // Analytics overrides
        if let Ok(url) = std::env::var("FLOATCHAT_ANALYTICS_URL") {
            self.analytics.url = url;
        }

        // Logging overrides
        if let Ok(level) = std::env::var("FLOATCHAT_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("FLOATCHAT_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# FloatChat Configuration
#
# Environment variables override these settings:
# - FLOATCHAT_API_HOST
# - FLOATCHAT_API_PORT
# - FLOATCHAT_TYPING_DELAY_MS
# - FLOATCHAT_ANALYTICS_URL
# - FLOATCHAT_LOG_LEVEL
# - FLOATCHAT_LOG_FORMAT

[api]
# API server host
host = "0.0.0.0"

# API server port
port = 5000

# Allowed CORS origins ("*" allows any origin)
cors_origins = ["http://localhost:5173"]

# Request timeout in seconds
request_timeout_secs = 30

[chat]
# Reference point for the nearest-float query (degrees)
reference_lat = 20.5937
reference_lon = 78.9629

# Number of floats listed by the nearest-float reply
nearest_limit = 3

# Delay between characters of the typing stream (ms)
typing_delay_ms = 20

# Exchanges kept per in-memory session
max_history = 100

[analytics]
# External analytics service URL
url = "http://localhost:8000"

# Request timeout in seconds
request_timeout_secs = 30

# Chat type sent when none is given
default_chat_type = "Q&A with stored CSV/XLSX SQL-DB"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
