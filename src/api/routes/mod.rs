//! API Routes
//!
//! Route handlers organized by functionality.

pub mod chat;
pub mod floats;
pub mod health;
pub mod sessions;
