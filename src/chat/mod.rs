//! FloatChat Chat Layer
//!
//! Everything that turns a user message into a reply without leaving the
//! process:
//!
//! - **intent**: Keyword table that classifies a message
//! - **assistant**: Intent → handler dispatch over the float catalog
//! - **greeting**: The hello/bye stub behind `POST /api/chat`
//! - **message**: Chat bubbles, chat types, app functionality
//! - **session**: In-memory session history
//! - **typing**: Cancellable character-by-character reveal

pub mod assistant;
pub mod error;
pub mod greeting;
pub mod intent;
pub mod message;
pub mod session;
pub mod typing;

pub use assistant::{AssistantReply, HandlerContext, IntentHandler, LocalAssistant};
pub use error::{ChatError, ChatResult};
pub use greeting::GreetingBot;
pub use intent::{classify, Intent};
pub use message::{to_data_uri, AppFunctionality, Attachment, ChatMessage, ChatType, Role};
pub use session::{Exchange, SessionStore};
pub use typing::{Typewriter, TypingOutcome};
