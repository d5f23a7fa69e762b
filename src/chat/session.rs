//! In-memory chat sessions
//!
//! History lives only as long as the process. Each session keeps at most
//! `max_history` exchanges; the oldest are dropped first.

use std::collections::HashMap;
use tokio::sync::RwLock;

/// One `[user message, assistant reply]` pair
pub type Exchange = (String, String);

/// Session id → exchange history
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Vec<Exchange>>>,
    max_history: usize,
}

impl SessionStore {
    pub fn new(max_history: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            max_history,
        }
    }

    /// Append an exchange, creating the session if needed
    ///
    /// Returns the session's history length after the append.
    pub async fn append(
        &self,
        session_id: &str,
        user: impl Into<String>,
        reply: impl Into<String>,
    ) -> usize {
        let mut sessions = self.sessions.write().await;
        let history = sessions.entry(session_id.to_string()).or_default();
        history.push((user.into(), reply.into()));

        if history.len() > self.max_history {
            let overflow = history.len() - self.max_history;
            history.drain(..overflow);
        }

        history.len()
    }

    /// History of a session, empty if it does not exist
    pub async fn history(&self, session_id: &str) -> Vec<Exchange> {
        self.sessions
            .read()
            .await
            .get(session_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Remove a session; returns whether it existed
    pub async fn clear(&self, session_id: &str) -> bool {
        self.sessions.write().await.remove(session_id).is_some()
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_append_and_history() {
        let store = SessionStore::default();
        assert_eq!(store.append("s1", "hi", "hello").await, 1);
        assert_eq!(store.append("s1", "floats?", "three").await, 2);

        let history = store.history("s1").await;
        assert_eq!(
            history,
            vec![
                ("hi".to_string(), "hello".to_string()),
                ("floats?".to_string(), "three".to_string()),
            ]
        );
        assert!(store.history("unknown").await.is_empty());
    }

    #[tokio::test]
    async fn test_clear() {
        let store = SessionStore::default();
        store.append("s1", "a", "b").await;

        assert!(store.clear("s1").await);
        assert!(!store.clear("s1").await);
        assert_eq!(store.session_count().await, 0);
    }

    #[tokio::test]
    async fn test_history_is_capped() {
        let store = SessionStore::new(2);
        for i in 0..5 {
            store.append("s1", format!("q{}", i), format!("a{}", i)).await;
        }

        let history = store.history("s1").await;
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].0, "q3");
        assert_eq!(history[1].0, "q4");
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let store = SessionStore::default();
        store.append("a", "1", "x").await;
        store.append("b", "2", "y").await;

        assert_eq!(store.history("a").await.len(), 1);
        assert_eq!(store.session_count().await, 2);
    }
}
