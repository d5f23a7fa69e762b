//! Chat message and chat mode types

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::error::ChatError;

/// Who sent a message
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// What a message carries besides its text
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Attachment {
    Text,
    /// Rendered image as a `data:` URI
    Image { data_uri: String },
    Error,
}

/// A single chat bubble
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<Attachment>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            attachment: None,
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            attachment: Some(Attachment::Text),
        }
    }

    pub fn image(content: impl Into<String>, data_uri: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            attachment: Some(Attachment::Image {
                data_uri: data_uri.into(),
            }),
        }
    }

    /// An assistant bubble showing an error verbatim
    pub fn error(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            attachment: Some(Attachment::Error),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.attachment, Some(Attachment::Error))
    }
}

/// Turn raw base64 PNG data into a `data:` URI, keeping existing URIs intact
pub fn to_data_uri(graph: &str) -> String {
    let graph = graph.trim();
    if graph.starts_with("data:") {
        graph.to_string()
    } else {
        format!("data:image/png;base64,{}", graph)
    }
}

/// Query strategy requested from the analytics service
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum ChatType {
    #[serde(rename = "Q&A with stored SQL-DB")]
    StoredSqlDb,
    #[serde(rename = "Q&A with Uploaded CSV/XLSX SQL-DB")]
    UploadedCsvXlsx,
    #[default]
    #[serde(rename = "Q&A with stored CSV/XLSX SQL-DB")]
    StoredCsvXlsx,
    #[serde(rename = "RAG with stored CSV/XLSX ChromaDB")]
    RagChromaDb,
}

impl ChatType {
    pub fn all() -> &'static [ChatType] {
        &[
            ChatType::StoredSqlDb,
            ChatType::UploadedCsvXlsx,
            ChatType::StoredCsvXlsx,
            ChatType::RagChromaDb,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChatType::StoredSqlDb => "Q&A with stored SQL-DB",
            ChatType::UploadedCsvXlsx => "Q&A with Uploaded CSV/XLSX SQL-DB",
            ChatType::StoredCsvXlsx => "Q&A with stored CSV/XLSX SQL-DB",
            ChatType::RagChromaDb => "RAG with stored CSV/XLSX ChromaDB",
        }
    }
}

impl std::fmt::Display for ChatType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChatType {
    type Err = ChatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChatType::all()
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ChatError::UnknownChatType(s.to_string()))
    }
}

/// Which app screen issued the request
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum AppFunctionality {
    #[default]
    Chat,
    #[serde(rename = "Process files")]
    ProcessFiles,
}

impl AppFunctionality {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppFunctionality::Chat => "Chat",
            AppFunctionality::ProcessFiles => "Process files",
        }
    }
}

impl FromStr for AppFunctionality {
    type Err = ChatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Chat" => Ok(AppFunctionality::Chat),
            "Process files" => Ok(AppFunctionality::ProcessFiles),
            other => Err(ChatError::UnknownAppFunctionality(other.to_string())),
        }
    }
}
