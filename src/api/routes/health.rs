//! Health Routes
//!
//! Liveness endpoints the frontend and monitors poll.
//!
//! - GET / - Banner
//! - GET /api/test - Connectivity check
//! - GET /api/health - Full health status

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::{HealthResponse, MessageResponse};
use crate::api::state::AppState;

pub const ROOT_MESSAGE: &str = "FloatChat backend is running!";
pub const TEST_MESSAGE: &str = "Backend working fine!";

/// GET /
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse::new(ROOT_MESSAGE))
}

/// GET /api/test
///
/// Fixed message used by the frontend to confirm the backend is reachable.
pub async fn api_test() -> Json<MessageResponse> {
    Json(MessageResponse::new(TEST_MESSAGE))
}

/// GET /api/health
///
/// Full health status. There are no external dependencies to probe, so a
/// response always reports healthy.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        message: ROOT_MESSAGE.to_string(),
        uptime_seconds: state.uptime_seconds(),
        started_at: state.started_at,
        sessions: state.sessions.session_count().await,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
