//! Simulated typing effect
//!
//! Reveals a reply one character per tick. The loop is tied to a
//! [`CancellationToken`] owned by the connection that started it, so closing
//! the socket or sending `cancel` stops the timer immediately.

use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// How a typing run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypingOutcome {
    /// Every character was emitted
    Completed,
    /// The token fired or the receiver went away
    Cancelled,
}

/// Fixed-delay character reveal
#[derive(Debug, Clone, Copy)]
pub struct Typewriter {
    delay: Duration,
}

impl Typewriter {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn from_millis(delay_ms: u64) -> Self {
        Self::new(Duration::from_millis(delay_ms))
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Emit growing prefixes of `text` until done or cancelled
    ///
    /// `emit` returns `false` when the consumer is gone, which ends the run
    /// as [`TypingOutcome::Cancelled`]. Prefixes always end on a char
    /// boundary.
    pub async fn run<F>(&self, text: &str, cancel: &CancellationToken, mut emit: F) -> TypingOutcome
    where
        F: FnMut(&str) -> bool,
    {
        for (idx, ch) in text.char_indices() {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return TypingOutcome::Cancelled,
                _ = tokio::time::sleep(self.delay) => {}
            }

            if !emit(&text[..idx + ch.len_utf8()]) {
                return TypingOutcome::Cancelled;
            }
        }

        TypingOutcome::Completed
    }
}

impl Default for Typewriter {
    fn default() -> Self {
        Self::from_millis(20)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_emits_every_prefix() {
        let typewriter = Typewriter::new(Duration::ZERO);
        let token = CancellationToken::new();
        let mut frames = Vec::new();

        let outcome = typewriter
            .run("héllo", &token, |frame| {
                frames.push(frame.to_string());
                true
            })
            .await;

        assert_eq!(outcome, TypingOutcome::Completed);
        assert_eq!(frames, vec!["h", "hé", "hél", "héll", "héllo"]);
    }

    #[tokio::test]
    async fn test_empty_text_completes_immediately() {
        let token = CancellationToken::new();
        let mut count = 0;
        let outcome = Typewriter::default()
            .run("", &token, |_| {
                count += 1;
                true
            })
            .await;

        assert_eq!(outcome, TypingOutcome::Completed);
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_cancelled_before_start() {
        let token = CancellationToken::new();
        token.cancel();

        let mut count = 0;
        let outcome = Typewriter::from_millis(1)
            .run("hello", &token, |_| {
                count += 1;
                true
            })
            .await;

        assert_eq!(outcome, TypingOutcome::Cancelled);
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_cancel_mid_stream() {
        let token = CancellationToken::new();
        let canceller = token.clone();
        let mut frames = Vec::new();

        let outcome = Typewriter::new(Duration::ZERO)
            .run("floats", &token, |frame| {
                frames.push(frame.to_string());
                if frames.len() == 2 {
                    canceller.cancel();
                }
                true
            })
            .await;

        assert_eq!(outcome, TypingOutcome::Cancelled);
        assert_eq!(frames, vec!["f", "fl"]);
    }

    #[tokio::test]
    async fn test_receiver_gone_stops_run() {
        let token = CancellationToken::new();
        let outcome = Typewriter::new(Duration::ZERO)
            .run("abc", &token, |_| false)
            .await;
        assert_eq!(outcome, TypingOutcome::Cancelled);
    }
}
