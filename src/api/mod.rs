//! FloatChat REST API
//!
//! HTTP API layer for FloatChat, built with Axum.
//!
//! # Endpoints
//!
//! ## Health
//! - `GET /` - Banner
//! - `GET /api/test` - Connectivity check
//! - `GET /api/health` - Full health status
//!
//! ## Chat
//! - `POST /api/chat` - Greeting stub
//! - `GET /api/chat-types` - Supported chat types
//! - `POST /api/demo/chat` - Local intent-based assistant
//!
//! ## Sessions
//! - `POST /api/chat/session/:id` - Send a message within a session
//! - `GET /api/chat/session/:id/history` - Session history
//! - `DELETE /api/chat/session/:id` - Clear a session
//!
//! ## Floats
//! - `GET /api/floats` - List floats
//! - `GET /api/floats/nearest` - Floats ranked by distance
//! - `GET /api/floats/:id/series` - Monthly temperature series
//! - `GET /api/tsunami-risk` - Tsunami-risk markers
//!
//! ## WebSocket
//! - `GET /ws` - Typing stream for assistant replies
//!
//! # Example
//!
//! ```rust,ignore
//! use floatchat::api::{serve, AppState};
//! use floatchat::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let state = AppState::new(config.api.clone(), &config.chat)?;
//!     serve(state).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ApiConfig;
use crate::websocket::websocket_handler;

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Health routes
        .route("/test", get(routes::health::api_test))
        .route("/health", get(routes::health::health))
        // Chat routes
        .route("/chat", post(routes::chat::chat))
        .route("/chat-types", get(routes::chat::chat_types))
        .route("/demo/chat", post(routes::chat::demo_chat))
        // Session routes
        .route(
            "/chat/session/:id",
            post(routes::sessions::session_chat).delete(routes::sessions::clear_session),
        )
        .route(
            "/chat/session/:id/history",
            get(routes::sessions::session_history),
        )
        // Float routes
        .route("/floats", get(routes::floats::list_floats))
        .route("/floats/nearest", get(routes::floats::nearest_floats))
        .route("/floats/:id/series", get(routes::floats::float_series))
        .route("/tsunami-risk", get(routes::floats::tsunami_risk));

    let cors = cors_layer(&state.config);
    let timeout = Duration::from_secs(state.config.request_timeout_secs);

    // Create shared state
    let shared_state = Arc::new(state);

    Router::new()
        .route("/", get(routes::health::root))
        .nest("/api", api_routes)
        .route("/ws", get(websocket_handler))
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

/// CORS policy from the configured origin list
fn cors_layer(config: &ApiConfig) -> CorsLayer {
    if config.allows_any_origin() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any)
}

/// Start the API server
///
/// Runs until Ctrl+C or SIGTERM, then cancels the state's shutdown token
/// so open WebSocket streams stop typing and close.
pub async fn serve(state: AppState) -> Result<(), ApiError> {
    let addr = state.config.addr();
    let shutdown = state.shutdown.clone();
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("FloatChat API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("FloatChat API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
        _ = shutdown.cancelled() => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
    shutdown.cancel();
}
