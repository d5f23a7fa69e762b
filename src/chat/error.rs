//! Chat error types

use thiserror::Error;

use super::intent::Intent;
use crate::floats::GeoError;

/// Errors that can occur while producing a chat reply
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChatError {
    /// Message missing or blank
    #[error("Message is required")]
    EmptyMessage,

    /// Chat type not offered by the analytics service
    #[error("Unknown chat type: {0}")]
    UnknownChatType(String),

    /// App functionality other than "Chat" or "Process files"
    #[error("Unknown app functionality: {0}")]
    UnknownAppFunctionality(String),

    /// No handler registered for a classified intent
    #[error("No handler registered for intent: {0}")]
    NoHandler(Intent),

    /// Float lookup or ranking failed
    #[error("Float error: {0}")]
    Geo(#[from] GeoError),
}

/// Result type for chat operations
pub type ChatResult<T> = Result<T, ChatError>;
