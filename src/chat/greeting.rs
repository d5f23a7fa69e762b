//! Greeting chat stub behind `POST /api/chat`

use super::error::{ChatError, ChatResult};

pub const GREETING_REPLY: &str = "Hello! How can I help you today?";
pub const FAREWELL_REPLY: &str = "Goodbye! Have a great day!";
pub const FALLBACK_REPLY: &str = "I'm sorry, I didn't understand that.";

/// Substring rules, first match wins
const RULES: &[(&str, &str)] = &[("hello", GREETING_REPLY), ("bye", FAREWELL_REPLY)];

/// Keyword-matching placeholder chatbot
#[derive(Debug, Clone, Copy, Default)]
pub struct GreetingBot;

impl GreetingBot {
    pub fn new() -> Self {
        Self
    }

    pub fn reply(&self, message: &str) -> ChatResult<&'static str> {
        if message.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        let text = message.to_lowercase();
        Ok(RULES
            .iter()
            .find(|(keyword, _)| text.contains(keyword))
            .map(|(_, reply)| *reply)
            .unwrap_or(FALLBACK_REPLY))
    }
}
