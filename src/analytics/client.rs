//! Analytics Service REST Client
//!
//! HTTP client for the external FloatChat analytics service that answers
//! SQL / CSV questions and renders graphs.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::chat::{to_data_uri, AppFunctionality, ChatMessage, ChatType};

/// Analytics service REST client
pub struct AnalyticsClient {
    client: Client,
    config: AnalyticsConfig,
}

/// Configuration for the analytics client
#[derive(Debug, Clone)]
pub struct AnalyticsConfig {
    /// Base URL (e.g., "http://localhost:8000")
    pub base_url: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            request_timeout_ms: 30_000,
        }
    }
}

impl AnalyticsClient {
    /// Create a new client with the given configuration
    pub fn new(config: AnalyticsConfig) -> Result<Self, AnalyticsError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Check if the service answers its health route
    pub async fn health_check(&self) -> Result<(), AnalyticsError> {
        let response = self
            .client
            .get(self.url("/api/health"))
            .send()
            .await
            .map_err(classify_error)?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(AnalyticsError::Unavailable(format!(
                "health check returned {}",
                response.status()
            )))
        }
    }

    /// List the chat types the service supports
    pub async fn chat_types(&self) -> Result<Vec<String>, AnalyticsError> {
        let response = self
            .client
            .get(self.url("/api/chat-types"))
            .send()
            .await
            .map_err(classify_error)?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let body: ChatTypesResponse = response.json().await?;
        Ok(body.chat_types)
    }

    /// Send one message to the service
    ///
    /// Sent once; there is no retry.
    pub async fn chat(
        &self,
        message: &str,
        chat_type: ChatType,
        app_functionality: AppFunctionality,
    ) -> Result<AnalyticsReply, AnalyticsError> {
        let body = ChatRequest {
            message,
            chat_type: chat_type.as_str(),
            app_functionality: app_functionality.as_str(),
        };

        tracing::debug!(chat_type = %chat_type, "Sending message to analytics service");

        let response = self
            .client
            .post(self.url("/api/chat"))
            .json(&body)
            .send()
            .await
            .map_err(classify_error)?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        Ok(response.json().await?)
    }
}

fn classify_error(e: reqwest::Error) -> AnalyticsError {
    if e.is_timeout() {
        AnalyticsError::Timeout(e.to_string())
    } else if e.is_connect() {
        AnalyticsError::Unavailable(e.to_string())
    } else {
        AnalyticsError::Request(e)
    }
}

async fn api_error(response: reqwest::Response) -> AnalyticsError {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    AnalyticsError::ApiError {
        status: status.as_u16(),
        message: text,
    }
}

// ============================================
// Request/Response DTOs
// ============================================

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
    chat_type: &'a str,
    app_functionality: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatTypesResponse {
    #[serde(default)]
    chat_types: Vec<String>,
}

/// Reply from `POST /api/chat` on the analytics service
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct AnalyticsReply {
    #[serde(default)]
    pub response: Option<String>,
    /// Base64 PNG or a full `data:` URI
    #[serde(default)]
    pub graph_data: Option<String>,
    /// Older field name for `graph_data`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graph: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub success: Option<bool>,
}

impl AnalyticsReply {
    /// Convert into the chat bubble the UI shows
    ///
    /// An error wins over everything else, then a graph, then plain text.
    pub fn into_message(self) -> ChatMessage {
        let text = self.response.unwrap_or_default();

        if let Some(error) = self.error.filter(|e| !e.is_empty()) {
            return ChatMessage::error(format!("Error: {}", error));
        }

        let graph = self.graph_data.or(self.graph);
        match graph.filter(|g| !g.trim().is_empty()) {
            Some(graph) => ChatMessage::image(text, to_data_uri(&graph)),
            None if text.is_empty() => ChatMessage::assistant("No response generated"),
            None => ChatMessage::assistant(text),
        }
    }
}

// ============================================
// Errors
// ============================================

/// Errors that can occur when talking to the analytics service
#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Analytics service unavailable: {0}")]
    Unavailable(String),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Request timeout: {0}")]
    Timeout(String),
}

impl AnalyticsError {
    /// Render as the chat bubble shown for a failed request
    pub fn into_message(self) -> ChatMessage {
        ChatMessage::error(format!("Error: {}", self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::Attachment;

    #[test]
    fn test_default_config() {
        let config = AnalyticsConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.request_timeout_ms, 30_000);
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let client = AnalyticsClient::new(AnalyticsConfig {
            base_url: "http://localhost:8000/".to_string(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(client.url("/api/chat"), "http://localhost:8000/api/chat");
    }

    #[test]
    fn test_request_body_shape() {
        let body = ChatRequest {
            message: "max temperature",
            chat_type: ChatType::StoredSqlDb.as_str(),
            app_functionality: AppFunctionality::Chat.as_str(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["chat_type"], "Q&A with stored SQL-DB");
        assert_eq!(json["app_functionality"], "Chat");
    }

    #[test]
    fn test_text_reply() {
        let reply: AnalyticsReply =
            serde_json::from_str(r#"{"response": "Max is 31.2", "success": true}"#).unwrap();
        let msg = reply.into_message();
        assert_eq!(msg.content, "Max is 31.2");
        assert_eq!(msg.attachment, Some(Attachment::Text));
    }

    #[test]
    fn test_graph_reply_accepts_legacy_field() {
        let reply: AnalyticsReply =
            serde_json::from_str(r#"{"response": "chart", "graph": "iVBORw0KGgo="}"#).unwrap();
        let msg = reply.into_message();
        assert_eq!(
            msg.attachment,
            Some(Attachment::Image {
                data_uri: "data:image/png;base64,iVBORw0KGgo=".to_string()
            })
        );
    }

    #[test]
    fn test_error_reply_wins() {
        let reply = AnalyticsReply {
            response: Some("partial".to_string()),
            graph_data: Some("AAAA".to_string()),
            graph: None,
            error: Some("quota exceeded".to_string()),
            success: Some(false),
        };
        let msg = reply.into_message();
        assert!(msg.is_error());
        assert_eq!(msg.content, "Error: quota exceeded");
    }

    #[test]
    fn test_empty_reply() {
        let msg = AnalyticsReply::default().into_message();
        assert_eq!(msg.content, "No response generated");
    }

    #[test]
    fn test_network_error_message() {
        let msg = AnalyticsError::Unavailable("connection refused".to_string()).into_message();
        assert_eq!(
            msg.content,
            "Error: Analytics service unavailable: connection refused"
        );
        assert!(msg.is_error());
    }

    // ============================================
    // Against a stand-in service
    // ============================================

    use axum::{
        http::StatusCode,
        response::{IntoResponse, Response},
        routing::{get, post},
        Json, Router,
    };
    use serde_json::{json, Value};

    async fn mock_chat_types() -> Json<Value> {
        Json(json!({ "chat_types": ["Q&A with stored SQL-DB", "RAG with stored CSV/XLSX ChromaDB"] }))
    }

    async fn mock_chat(Json(body): Json<Value>) -> Response {
        let message = body["message"].as_str().unwrap_or_default();
        match message {
            "plot temperature" => Json(json!({
                "response": "Temperature by month",
                "graph_data": "iVBORw0KGgo=",
                "success": true
            }))
            .into_response(),
            "fail" => (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response(),
            "refuse" => Json(json!({ "error": "quota exceeded", "success": false })).into_response(),
            _ => Json(json!({
                "response": format!(
                    "{} | {} | {}",
                    message,
                    body["chat_type"].as_str().unwrap_or_default(),
                    body["app_functionality"].as_str().unwrap_or_default()
                ),
                "success": true
            }))
            .into_response(),
        }
    }

    async fn spawn_service() -> AnalyticsClient {
        let app = Router::new()
            .route("/api/health", get(|| async { "ok" }))
            .route("/api/chat-types", get(mock_chat_types))
            .route("/api/chat", post(mock_chat));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        AnalyticsClient::new(AnalyticsConfig {
            base_url: format!("http://{}", addr),
            request_timeout_ms: 5_000,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_health_check_against_service() {
        let client = spawn_service().await;
        client.health_check().await.unwrap();
    }

    #[tokio::test]
    async fn test_chat_types_from_service() {
        let client = spawn_service().await;
        let types = client.chat_types().await.unwrap();
        assert_eq!(
            types,
            vec![
                "Q&A with stored SQL-DB".to_string(),
                "RAG with stored CSV/XLSX ChromaDB".to_string()
            ]
        );
    }

    #[tokio::test]
    async fn test_chat_posts_message_and_modes() {
        let client = spawn_service().await;
        let reply = client
            .chat("max salinity", ChatType::UploadedCsvXlsx, AppFunctionality::ProcessFiles)
            .await
            .unwrap();

        assert_eq!(
            reply.response.as_deref(),
            Some("max salinity | Q&A with Uploaded CSV/XLSX SQL-DB | Process files")
        );
        assert_eq!(reply.success, Some(true));
    }

    #[tokio::test]
    async fn test_chat_decodes_graph_reply() {
        let client = spawn_service().await;
        let reply = client
            .chat("plot temperature", ChatType::default(), AppFunctionality::Chat)
            .await
            .unwrap();

        let msg = reply.into_message();
        assert_eq!(msg.content, "Temperature by month");
        assert_eq!(
            msg.attachment,
            Some(Attachment::Image {
                data_uri: "data:image/png;base64,iVBORw0KGgo=".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_chat_decodes_error_field() {
        let client = spawn_service().await;
        let msg = client
            .chat("refuse", ChatType::default(), AppFunctionality::Chat)
            .await
            .unwrap()
            .into_message();

        assert!(msg.is_error());
        assert_eq!(msg.content, "Error: quota exceeded");
    }

    #[tokio::test]
    async fn test_non_success_status_becomes_api_error() {
        let client = spawn_service().await;
        let err = client
            .chat("fail", ChatType::default(), AppFunctionality::Chat)
            .await
            .unwrap_err();

        match err {
            AnalyticsError::ApiError { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("expected ApiError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_refused_connection_keeps_reqwest_text() {
        // Bind then drop to get a port nothing listens on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = AnalyticsClient::new(AnalyticsConfig {
            base_url: format!("http://{}", addr),
            request_timeout_ms: 5_000,
        })
        .unwrap();

        let err = client
            .chat("max temperature", ChatType::default(), AppFunctionality::Chat)
            .await
            .unwrap_err();
        let detail = match &err {
            AnalyticsError::Unavailable(detail) => detail.clone(),
            other => panic!("expected Unavailable, got {:?}", other),
        };
        assert!(!detail.is_empty());

        let msg = err.into_message();
        assert!(msg.is_error());
        assert_eq!(
            msg.content,
            format!("Error: Analytics service unavailable: {}", detail)
        );
        assert!(msg.content.contains(&addr.to_string()));
    }
}
