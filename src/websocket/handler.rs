//! WebSocket Handler
//!
//! Handles WebSocket upgrade requests and manages the connection lifecycle.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::messages::{ClientMessage, ServerMessage};
use crate::api::AppState;
use crate::chat::{AssistantReply, Typewriter, TypingOutcome};

/// WebSocket upgrade handler
///
/// This is the entry point for WebSocket connections.
/// It upgrades the HTTP connection to WebSocket and starts message handling.
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle an established WebSocket connection
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();

    // Create channel for sending messages to this connection
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerMessage>();

    let connection_id = uuid::Uuid::new_v4().to_string();
    let cancel = state.shutdown.child_token();

    tracing::info!(connection_id = %connection_id, "WebSocket connected");

    let _ = tx.send(ServerMessage::Connected {
        connection_id: connection_id.clone(),
    });

    let conn_id_for_send = connection_id.clone();

    // Task to forward messages from channel to WebSocket
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            match serde_json::to_string(&msg) {
                Ok(text) => {
                    if sender.send(Message::Text(text)).await.is_err() {
                        tracing::debug!(
                            connection_id = %conn_id_for_send,
                            "WebSocket send failed, closing connection"
                        );
                        break;
                    }
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to serialize message");
                }
            }
        }
    });

    let mut connection = Connection::new(connection_id.clone(), state, tx, cancel.clone());

    // Task to receive messages from WebSocket and handle them
    let mut recv_task = tokio::spawn(async move {
        while let Some(result) = receiver.next().await {
            match result {
                Ok(msg) => {
                    if !connection.handle_ws_message(msg) {
                        break;
                    }
                }
                Err(e) => {
                    tracing::debug!(
                        connection_id = %connection.id,
                        error = %e,
                        "WebSocket receive error"
                    );
                    break;
                }
            }
        }
        connection.close();
    });

    // Wait for either task to complete, or for the server to shut down
    tokio::select! {
        _ = &mut send_task => {
            recv_task.abort();
        }
        _ = &mut recv_task => {
            send_task.abort();
        }
        _ = cancel.cancelled() => {
            send_task.abort();
            recv_task.abort();
        }
    }

    // Covers the abort paths, where the receive task never reaches close()
    cancel.cancel();

    tracing::info!(connection_id = %connection_id, "WebSocket disconnected");
}

/// A reply currently being typed
struct ActiveReply {
    handle: JoinHandle<TypingOutcome>,
    cancel: CancellationToken,
}

/// Per-connection state owned by the receive task
struct Connection {
    id: String,
    state: Arc<AppState>,
    tx: mpsc::UnboundedSender<ServerMessage>,
    /// Parent of every reply token on this connection
    cancel: CancellationToken,
    active: Option<ActiveReply>,
}

impl Connection {
    fn new(
        id: String,
        state: Arc<AppState>,
        tx: mpsc::UnboundedSender<ServerMessage>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            id,
            state,
            tx,
            cancel,
            active: None,
        }
    }

    /// Stop any reply still being typed for this connection
    fn close(&mut self) {
        self.cancel.cancel();
        self.active = None;
    }

    fn send(&self, message: ServerMessage) {
        let _ = self.tx.send(message);
    }

    fn send_error(&self, message: impl Into<String>) {
        self.send(ServerMessage::Error {
            message: message.into(),
        });
    }

    fn is_typing(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|active| !active.handle.is_finished())
    }

    /// Handle a received WebSocket message
    ///
    /// Returns false if the connection should be closed.
    fn handle_ws_message(&mut self, message: Message) -> bool {
        match message {
            Message::Text(text) => {
                match serde_json::from_str::<ClientMessage>(&text) {
                    Ok(client_msg) => self.handle_client_message(client_msg),
                    Err(e) => {
                        tracing::debug!(
                            connection_id = %self.id,
                            error = %e,
                            text = %text,
                            "Invalid client message"
                        );
                        // Send error but keep connection open
                        self.send_error(format!("Invalid message format: {}", e));
                    }
                }
                true
            }
            Message::Binary(_) => {
                self.send_error("Binary messages not supported");
                true
            }
            // Axum answers pings itself
            Message::Ping(_) | Message::Pong(_) => true,
            Message::Close(_) => {
                tracing::debug!(connection_id = %self.id, "Client requested close");
                false
            }
        }
    }

    /// Handle a parsed client message
    fn handle_client_message(&mut self, message: ClientMessage) {
        match message {
            ClientMessage::Chat { message } => {
                if self.is_typing() {
                    self.send_error("A reply is still being typed; cancel it first");
                    return;
                }

                match self.state.assistant.respond(&message) {
                    Ok(reply) => {
                        tracing::debug!(
                            connection_id = %self.id,
                            intent = %reply.intent,
                            "Streaming reply"
                        );
                        let cancel = self.cancel.child_token();
                        let handle = spawn_reply(
                            reply,
                            self.state.typewriter,
                            cancel.clone(),
                            self.tx.clone(),
                        );
                        self.active = Some(ActiveReply { handle, cancel });
                    }
                    Err(e) => self.send_error(e.to_string()),
                }
            }
            ClientMessage::Cancel => match self.active.take() {
                Some(active) if !active.handle.is_finished() => active.cancel.cancel(),
                _ => self.send_error("No reply in progress"),
            },
            ClientMessage::Ping => self.send(ServerMessage::Pong),
        }
    }
}

/// Type out a reply on its own task
///
/// Sends `typing` frames, then `reply` and `done` on completion, or
/// `cancelled` if the token fires first.
fn spawn_reply(
    reply: AssistantReply,
    typewriter: Typewriter,
    cancel: CancellationToken,
    tx: mpsc::UnboundedSender<ServerMessage>,
) -> JoinHandle<TypingOutcome> {
    tokio::spawn(async move {
        let outcome = typewriter
            .run(&reply.text, &cancel, |frame| {
                tx.send(ServerMessage::Typing {
                    content: frame.to_string(),
                })
                .is_ok()
            })
            .await;

        match outcome {
            TypingOutcome::Completed => {
                let _ = tx.send(reply.into());
                let _ = tx.send(ServerMessage::Done);
            }
            TypingOutcome::Cancelled => {
                let _ = tx.send(ServerMessage::Cancelled);
            }
        }

        outcome
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::Intent;

    fn drain(rx: &mut mpsc::UnboundedReceiver<ServerMessage>) -> Vec<ServerMessage> {
        let mut messages = Vec::new();
        while let Ok(msg) = rx.try_recv() {
            messages.push(msg);
        }
        messages
    }

    #[tokio::test]
    async fn test_reply_streams_then_finishes() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let reply = AssistantReply::text(Intent::Help, "Hi!");

        let outcome = spawn_reply(reply, Typewriter::from_millis(0), CancellationToken::new(), tx)
            .await
            .unwrap();
        assert_eq!(outcome, TypingOutcome::Completed);

        let messages = drain(&mut rx);
        let frames: Vec<&str> = messages
            .iter()
            .filter_map(|m| match m {
                ServerMessage::Typing { content } => Some(content.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(frames, vec!["H", "Hi", "Hi!"]);

        assert!(matches!(
            &messages[3],
            ServerMessage::Reply { intent: Intent::Help, text, .. } if text == "Hi!"
        ));
        assert!(matches!(messages[4], ServerMessage::Done));
        assert_eq!(messages.len(), 5);
    }

    #[tokio::test]
    async fn test_cancelled_reply_skips_payload() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let outcome = spawn_reply(
            AssistantReply::text(Intent::Help, "never shown"),
            Typewriter::from_millis(0),
            cancel,
            tx,
        )
        .await
        .unwrap();
        assert_eq!(outcome, TypingOutcome::Cancelled);

        let messages = drain(&mut rx);
        assert_eq!(messages.len(), 1);
        assert!(matches!(messages[0], ServerMessage::Cancelled));
    }

    #[tokio::test]
    async fn test_parent_token_stops_reply() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let connection = CancellationToken::new();

        let handle = spawn_reply(
            AssistantReply::text(Intent::Help, "a fairly long reply"),
            Typewriter::from_millis(50),
            connection.child_token(),
            tx,
        );
        connection.cancel();

        assert_eq!(handle.await.unwrap(), TypingOutcome::Cancelled);
        let messages = drain(&mut rx);
        assert!(matches!(messages.last(), Some(ServerMessage::Cancelled)));
    }

    // ============================================
    // Connection protocol
    // ============================================

    use crate::config::{ApiConfig, ChatConfig};
    use std::time::Duration;

    fn connection(typing_delay_ms: u64) -> (Connection, mpsc::UnboundedReceiver<ServerMessage>) {
        let chat = ChatConfig {
            typing_delay_ms,
            ..Default::default()
        };
        let state = Arc::new(AppState::new(ApiConfig::default(), &chat).unwrap());
        let (tx, rx) = mpsc::unbounded_channel();
        let conn = Connection::new("test".to_string(), state, tx, CancellationToken::new());
        (conn, rx)
    }

    fn text(json: &str) -> Message {
        Message::Text(json.to_string())
    }

    /// Next frame that is not a typing frame
    async fn next_frame(rx: &mut mpsc::UnboundedReceiver<ServerMessage>) -> ServerMessage {
        tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                match rx.recv().await {
                    Some(ServerMessage::Typing { .. }) => continue,
                    Some(msg) => return msg,
                    None => panic!("channel closed"),
                }
            }
        })
        .await
        .expect("no frame within 5s")
    }

    fn error_text(msg: ServerMessage) -> String {
        match msg {
            ServerMessage::Error { message } => message,
            other => panic!("expected error frame, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_second_chat_while_typing_is_rejected() {
        let (mut conn, mut rx) = connection(50);

        assert!(conn.handle_ws_message(text(r#"{"type": "chat", "message": "nearest floats"}"#)));
        assert!(conn.is_typing());
        assert!(conn.handle_ws_message(text(r#"{"type": "chat", "message": "hello"}"#)));

        let message = error_text(next_frame(&mut rx).await);
        assert_eq!(message, "A reply is still being typed; cancel it first");
        assert!(conn.is_typing());
    }

    #[tokio::test]
    async fn test_cancel_stops_active_reply() {
        let (mut conn, mut rx) = connection(50);

        conn.handle_ws_message(text(r#"{"type": "chat", "message": "nearest floats"}"#));
        conn.handle_ws_message(text(r#"{"type": "cancel"}"#));

        assert!(matches!(next_frame(&mut rx).await, ServerMessage::Cancelled));
        assert!(!conn.is_typing());
    }

    #[tokio::test]
    async fn test_cancel_when_idle_is_an_error() {
        let (mut conn, mut rx) = connection(0);

        assert!(conn.handle_ws_message(text(r#"{"type": "cancel"}"#)));
        assert_eq!(error_text(next_frame(&mut rx).await), "No reply in progress");
    }

    #[tokio::test]
    async fn test_chat_accepted_after_reply_finishes() {
        let (mut conn, mut rx) = connection(0);

        conn.handle_ws_message(text(r#"{"type": "chat", "message": "nearest floats"}"#));
        assert!(matches!(next_frame(&mut rx).await, ServerMessage::Reply { .. }));
        assert!(matches!(next_frame(&mut rx).await, ServerMessage::Done));

        tokio::time::timeout(Duration::from_secs(5), async {
            while conn.is_typing() {
                tokio::task::yield_now().await;
            }
        })
        .await
        .unwrap();

        conn.handle_ws_message(text(r#"{"type": "chat", "message": "nearest floats"}"#));
        assert!(matches!(next_frame(&mut rx).await, ServerMessage::Reply { .. }));
        assert!(matches!(next_frame(&mut rx).await, ServerMessage::Done));
    }

    #[tokio::test]
    async fn test_ping_and_bad_frames() {
        let (mut conn, mut rx) = connection(0);

        assert!(conn.handle_ws_message(text(r#"{"type": "ping"}"#)));
        assert!(matches!(next_frame(&mut rx).await, ServerMessage::Pong));

        assert!(conn.handle_ws_message(text("not json")));
        assert!(error_text(next_frame(&mut rx).await).starts_with("Invalid message format"));

        assert!(conn.handle_ws_message(Message::Binary(vec![1, 2, 3])));
        assert_eq!(
            error_text(next_frame(&mut rx).await),
            "Binary messages not supported"
        );
    }

    #[tokio::test]
    async fn test_close_cancels_active_reply() {
        let (mut conn, mut rx) = connection(50);

        conn.handle_ws_message(text(r#"{"type": "chat", "message": "nearest floats"}"#));
        assert!(!conn.handle_ws_message(Message::Close(None)));
        conn.close();

        assert!(matches!(next_frame(&mut rx).await, ServerMessage::Cancelled));
    }

    #[tokio::test]
    async fn test_shutdown_token_cancels_active_reply() {
        let shutdown = CancellationToken::new();
        let (mut conn, mut rx) = connection(50);
        conn.cancel = shutdown.child_token();

        conn.handle_ws_message(text(r#"{"type": "chat", "message": "nearest floats"}"#));
        shutdown.cancel();

        assert!(matches!(next_frame(&mut rx).await, ServerMessage::Cancelled));
    }
}
