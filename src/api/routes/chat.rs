//! Chat Routes
//!
//! - POST /api/chat - Greeting stub
//! - GET /api/chat-types - Supported chat types
//! - POST /api/demo/chat - Local intent-based assistant

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use std::sync::Arc;

use crate::api::dto::{AssistantReplyResponse, ChatReplyResponse, ChatRequest, ChatTypesResponse};
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::chat::{AppFunctionality, ChatError, ChatType};

/// POST /api/chat
///
/// Replies to greetings and farewells; anything else gets the fallback.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> ApiResult<Json<ChatReplyResponse>> {
    let Json(request) = payload?;
    let message = validate(&request)?;

    let reply = state.greeter.reply(message)?;

    Ok(Json(ChatReplyResponse {
        reply: reply.to_string(),
    }))
}

/// GET /api/chat-types
pub async fn chat_types() -> Json<ChatTypesResponse> {
    Json(ChatTypesResponse {
        chat_types: ChatType::all()
            .iter()
            .map(|t| t.as_str().to_string())
            .collect(),
    })
}

/// POST /api/demo/chat
///
/// Classifies the message and answers from the float catalog.
pub async fn demo_chat(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> ApiResult<Json<AssistantReplyResponse>> {
    let Json(request) = payload?;
    let message = validate(&request)?;

    let reply = state.assistant.respond(message)?;

    tracing::debug!(intent = %reply.intent, "Demo chat answered");

    Ok(Json(reply.into()))
}

/// Check the optional selectors and return the message text
///
/// A missing or blank message is rejected before anything else.
pub(crate) fn validate(request: &ChatRequest) -> Result<&str, ChatError> {
    let message = request
        .message
        .as_deref()
        .filter(|m| !m.trim().is_empty())
        .ok_or(ChatError::EmptyMessage)?;

    if let Some(chat_type) = request.chat_type.as_deref() {
        chat_type.parse::<ChatType>()?;
    }
    if let Some(functionality) = request.app_functionality.as_deref() {
        functionality.parse::<AppFunctionality>()?;
    }

    Ok(message)
}
