//! Session Routes
//!
//! Chat sessions keyed by a client-chosen id, kept in memory.
//!
//! - POST /api/chat/session/:id - Send a message within a session
//! - GET /api/chat/session/:id/history - Get the session history
//! - DELETE /api/chat/session/:id - Clear the session

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use std::sync::Arc;

use super::chat::validate;
use crate::api::dto::{ChatRequest, HistoryResponse, MessageResponse, SessionReplyResponse};
use crate::api::error::ApiResult;
use crate::api::state::AppState;

/// POST /api/chat/session/:id
///
/// Answers with the local assistant and records the exchange.
pub async fn session_chat(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> ApiResult<Json<SessionReplyResponse>> {
    let Json(request) = payload?;
    let message = validate(&request)?;

    let reply = state.assistant.respond(message)?;
    let history_len = state
        .sessions
        .append(&session_id, message, reply.text.clone())
        .await;

    tracing::debug!(
        session_id = %session_id,
        intent = %reply.intent,
        history_len,
        "Session message answered"
    );

    Ok(Json(SessionReplyResponse {
        session_id,
        reply: reply.into(),
        history_len,
    }))
}

/// GET /api/chat/session/:id/history
///
/// Unknown sessions have an empty history.
pub async fn session_history(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Json<HistoryResponse> {
    Json(HistoryResponse {
        history: state.sessions.history(&session_id).await,
    })
}

/// DELETE /api/chat/session/:id
///
/// Idempotent: clearing an unknown session still succeeds, the message
/// says it was not found.
pub async fn clear_session(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Json<MessageResponse> {
    let existed = state.sessions.clear(&session_id).await;
    tracing::debug!(session_id = %session_id, existed, "Session cleared");

    let message = if existed {
        format!("Session {} cleared", session_id)
    } else {
        format!("Session {} not found", session_id)
    };

    Json(MessageResponse::new(message))
}
