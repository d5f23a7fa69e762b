//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::chat::{GreetingBot, LocalAssistant, SessionStore, Typewriter};
use crate::config::{ApiConfig, ChatConfig, ConfigError};
use crate::floats::FloatCatalog;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Static float catalog
    pub catalog: Arc<FloatCatalog>,
    /// Intent dispatcher for the demo and session endpoints
    pub assistant: Arc<LocalAssistant>,
    /// Hello/bye stub behind `POST /api/chat`
    pub greeter: GreetingBot,
    /// In-memory chat sessions
    pub sessions: Arc<SessionStore>,
    /// Typing effect used by the WebSocket stream
    pub typewriter: Typewriter,
    /// Default number of floats for nearest queries
    pub nearest_limit: usize,
    /// Server start time for uptime tracking
    pub start_time: Instant,
    /// Wall-clock start time reported by the health route
    pub started_at: DateTime<Utc>,
    /// Cancelled when the server shuts down; parent of every connection token
    pub shutdown: CancellationToken,
}

impl AppState {
    /// Create state over the built-in float catalog
    pub fn new(config: ApiConfig, chat: &ChatConfig) -> Result<Self, ConfigError> {
        Self::with_catalog(config, chat, FloatCatalog::builtin())
    }

    /// Create state over a custom float catalog
    pub fn with_catalog(
        config: ApiConfig,
        chat: &ChatConfig,
        catalog: FloatCatalog,
    ) -> Result<Self, ConfigError> {
        let reference = chat.reference()?;
        let catalog = Arc::new(catalog);
        let assistant = LocalAssistant::new(Arc::clone(&catalog), reference, chat.nearest_limit);

        Ok(Self {
            config: Arc::new(config),
            catalog,
            assistant: Arc::new(assistant),
            greeter: GreetingBot::new(),
            sessions: Arc::new(SessionStore::new(chat.max_history)),
            typewriter: Typewriter::from_millis(chat.typing_delay_ms),
            nearest_limit: chat.nearest_limit,
            start_time: Instant::now(),
            started_at: Utc::now(),
            shutdown: CancellationToken::new(),
        })
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
