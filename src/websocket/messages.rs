//! WebSocket Message Types
//!
//! Defines all message types for the typing stream between the chat UI
//! and the FloatChat server.

use serde::{Deserialize, Serialize};

use crate::chat::{AssistantReply, Intent};
use crate::floats::{ChartData, RankedFloat};

/// Messages sent from client to server
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Ask the local assistant something
    Chat {
        /// The user's message
        message: String,
    },
    /// Stop the reply currently being typed
    Cancel,
    /// Ping for keepalive
    Ping,
}

/// Messages sent from server to client
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Connection established
    Connected {
        /// Unique connection identifier
        connection_id: String,
    },
    /// The reply typed so far
    Typing {
        /// Growing prefix of the reply text
        content: String,
    },
    /// Full reply with its structured payload, sent once typing finishes
    Reply {
        intent: Intent,
        text: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        floats: Option<Vec<RankedFloat>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        chart: Option<ChartData>,
    },
    /// The reply stream is finished
    Done,
    /// Typing stopped before the reply was complete
    Cancelled,
    /// Pong response to ping
    Pong,
    /// Error message
    Error {
        /// Error description
        message: String,
    },
}

impl From<AssistantReply> for ServerMessage {
    fn from(reply: AssistantReply) -> Self {
        ServerMessage::Reply {
            intent: reply.intent,
            text: reply.text,
            floats: reply.floats,
            chart: reply.chart,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_message_parsing() {
        let msg: ClientMessage =
            serde_json::from_str(r#"{"type": "chat", "message": "nearest floats"}"#).unwrap();
        assert!(matches!(msg, ClientMessage::Chat { message } if message == "nearest floats"));

        let msg: ClientMessage = serde_json::from_str(r#"{"type": "cancel"}"#).unwrap();
        assert!(matches!(msg, ClientMessage::Cancel));

        let msg: ClientMessage = serde_json::from_str(r#"{"type": "ping"}"#).unwrap();
        assert!(matches!(msg, ClientMessage::Ping));
    }

    #[test]
    fn test_unknown_client_message_is_rejected() {
        assert!(serde_json::from_str::<ClientMessage>(r#"{"type": "subscribe"}"#).is_err());
        assert!(serde_json::from_str::<ClientMessage>(r#"{"type": "chat"}"#).is_err());
    }

    #[test]
    fn test_server_message_serialization() {
        let json = serde_json::to_value(ServerMessage::Typing {
            content: "Her".to_string(),
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"type": "typing", "content": "Her"}));

        let json = serde_json::to_value(ServerMessage::Done).unwrap();
        assert_eq!(json, serde_json::json!({"type": "done"}));
    }

    #[test]
    fn test_reply_omits_missing_payloads() {
        let msg: ServerMessage = AssistantReply::text(Intent::Help, "Try asking").into();
        let json = serde_json::to_value(msg).unwrap();
        assert_eq!(json["type"], "reply");
        assert_eq!(json["intent"], "help");
        assert!(json.get("floats").is_none());
        assert!(json.get("chart").is_none());
    }
}
