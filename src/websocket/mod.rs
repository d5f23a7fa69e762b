//! WebSocket Typing Stream
//!
//! Streams local assistant replies to the chat UI one character at a time.
//!
//! ## Protocol
//!
//! - Client sends `{"type": "chat", "message": "..."}`
//! - Server answers with `typing` frames carrying the growing reply, then a
//!   `reply` frame with floats or chart data, then `done`
//! - `{"type": "cancel"}` stops the current reply; the server sends
//!   `cancelled`
//! - A `chat` sent while a reply is still typing gets an `error`
//!
//! Every typing run is bound to its connection: closing the socket or
//! shutting the server down stops it.
//!
//! ## Example
//!
//! ```javascript
//! // Browser
//! const ws = new WebSocket('ws://localhost:5000/ws');
//!
//! ws.onopen = () => {
//!   ws.send(JSON.stringify({type: 'chat', message: 'nearest floats'}));
//! };
//!
//! ws.onmessage = (event) => {
//!   const msg = JSON.parse(event.data);
//!   if (msg.type === 'typing') render(msg.content);
//! };
//! ```

mod handler;
mod messages;

pub use handler::websocket_handler;
pub use messages::{ClientMessage, ServerMessage};
