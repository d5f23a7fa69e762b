//! External Analytics Service
//!
//! The SQL / CSV / graph answers come from a separate service (by default on
//! `localhost:8000`). This module only speaks its REST contract:
//!
//! - `GET /api/chat-types` → `{ chat_types: [...] }`
//! - `POST /api/chat` → `{ response?, graph_data?, error? }`

mod client;

pub use client::{AnalyticsClient, AnalyticsConfig, AnalyticsError, AnalyticsReply};
