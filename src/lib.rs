//! # FloatChat
//!
//! Backend for a chat assistant over ocean (Argo-style) floats: answers
//! "where are the nearest floats?" and "show me a temperature graph" from a
//! built-in catalog, and talks to an external analytics service for
//! questions about stored data.
//!
//! ## Features
//!
//! - **Nearest floats**: Great-circle (haversine) ranking with a stable order
//! - **Temperature charts**: Synthetic monthly series, JSON or CSV
//! - **Intent dispatch**: Keyword classification mapped to pluggable handlers
//! - **Typing stream**: Cancellable character-by-character replies over WebSocket
//! - **Analytics client**: Typed client for the external SQL/CSV chat service
//!
//! ## Modules
//!
//! - [`floats`]: Float catalog, geometry and chart data
//! - [`chat`]: Intent classification, assistant, sessions, typing
//! - [`analytics`]: REST client for the analytics service
//! - [`api`]: REST API server with Axum
//! - [`websocket`]: Typing stream endpoint
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust
//! use floatchat::chat::LocalAssistant;
//! use floatchat::floats::{FloatCatalog, REFERENCE_POINT};
//! use std::sync::Arc;
//!
//! let assistant = LocalAssistant::new(Arc::new(FloatCatalog::builtin()), REFERENCE_POINT, 3);
//! let reply = assistant.respond("Where are the nearest floats?").unwrap();
//!
//! assert_eq!(reply.floats.map(|f| f.len()), Some(3));
//! ```

pub mod analytics;
pub mod api;
pub mod chat;
pub mod config;
pub mod floats;
pub mod websocket;

// Re-export top-level types for convenience
pub use floats::{
    haversine_km, rank_by_distance, ChartData, ChartKind, Coordinate, FloatCatalog, FloatRecord,
    GeoError, GeoResult, RankedFloat, TemperatureSeries, TsunamiRiskLocation,
};

pub use chat::{
    classify, AppFunctionality, AssistantReply, ChatError, ChatMessage, ChatType, GreetingBot,
    Intent, IntentHandler, LocalAssistant, SessionStore, Typewriter, TypingOutcome,
};

pub use analytics::{AnalyticsClient, AnalyticsError, AnalyticsReply};

pub use api::{build_router, serve, ApiError, AppState};

pub use websocket::{websocket_handler, ClientMessage, ServerMessage};

pub use config::{ApiConfig, ChatConfig, Config, ConfigError, LoggingConfig};
