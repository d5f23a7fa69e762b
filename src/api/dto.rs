//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::chat::{AssistantReply, Exchange, Intent};
use crate::floats::{ChartData, Coordinate, FloatRecord, RankedFloat, TsunamiRiskLocation};

// ============================================
// GENERAL DTOs
// ============================================

/// Plain `{ "message": ... }` body
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Full health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always "healthy" while the process serves requests
    pub status: String,
    pub message: String,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    pub started_at: DateTime<Utc>,
    /// Number of in-memory chat sessions
    pub sessions: usize,
    /// Application version
    pub version: String,
}

// ============================================
// CHAT DTOs
// ============================================

/// Chat request shared by every chat endpoint
///
/// Every field is optional at the JSON level so a missing message yields a
/// 400 with an `error` body instead of an extractor rejection.
#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    /// One of the values listed by `GET /api/chat-types`
    #[serde(default)]
    pub chat_type: Option<String>,
    /// "Chat" or "Process files"
    #[serde(default)]
    pub app_functionality: Option<String>,
}

/// Greeting stub reply
#[derive(Debug, Serialize)]
pub struct ChatReplyResponse {
    pub reply: String,
}

/// Local assistant reply
#[derive(Debug, Serialize)]
pub struct AssistantReplyResponse {
    pub intent: Intent,
    pub reply: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floats: Option<Vec<RankedFloat>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart: Option<ChartData>,
}

impl From<AssistantReply> for AssistantReplyResponse {
    fn from(reply: AssistantReply) -> Self {
        Self {
            intent: reply.intent,
            reply: reply.text,
            floats: reply.floats,
            chart: reply.chart,
        }
    }
}

/// Reply to a session message
#[derive(Debug, Serialize)]
pub struct SessionReplyResponse {
    pub session_id: String,
    #[serde(flatten)]
    pub reply: AssistantReplyResponse,
    /// Exchanges stored for the session after this one
    pub history_len: usize,
}

/// Session history
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    /// `[user message, assistant reply]` pairs, oldest first
    pub history: Vec<Exchange>,
}

/// Chat types offered by the analytics service
#[derive(Debug, Serialize)]
pub struct ChatTypesResponse {
    pub chat_types: Vec<String>,
}

// ============================================
// FLOAT DTOs
// ============================================

/// List floats response
#[derive(Debug, Serialize)]
pub struct FloatListResponse {
    pub floats: Vec<FloatRecord>,
    pub total: usize,
}

/// Nearest-float query parameters
#[derive(Debug, Default, Deserialize)]
pub struct NearestParams {
    /// Reference latitude (default: configured reference point)
    #[serde(default)]
    pub lat: Option<f64>,
    /// Reference longitude (default: configured reference point)
    #[serde(default)]
    pub lon: Option<f64>,
    /// Number of floats to return (default: configured limit)
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Nearest-float response
#[derive(Debug, Serialize)]
pub struct NearestResponse {
    pub reference: Coordinate,
    pub floats: Vec<RankedFloat>,
}

/// Series export parameters
#[derive(Debug, Deserialize)]
pub struct SeriesParams {
    /// Format: json or csv
    #[serde(default = "default_series_format")]
    pub format: String,
}

fn default_series_format() -> String {
    "json".to_string()
}

/// Tsunami-risk markers
#[derive(Debug, Serialize)]
pub struct TsunamiRiskResponse {
    pub locations: Vec<TsunamiRiskLocation>,
    pub total: usize,
}
