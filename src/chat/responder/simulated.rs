use crate::chat::responder::Responder;
use crate::types::{AppError, Message, Result};
use async_trait::async_trait;
use rand::seq::IndexedRandom;
use std::time::Duration;

/// Picks a canned reply uniformly at random after a fixed delay
pub struct SimulatedResponder {
    replies: Vec<String>,
    delay: Duration,
}

impl SimulatedResponder {
    /// Blank entries are dropped; at least one reply must remain
    pub fn new(replies: Vec<String>, delay: Duration) -> Result<Self> {
        let replies: Vec<String> = replies
            .into_iter()
            .filter(|r| !r.trim().is_empty())
            .collect();

        if replies.is_empty() {
            return Err(AppError::InvalidInput(
                "Simulated responder needs at least one reply".to_string(),
            ));
        }

        Ok(Self { replies, delay })
    }

    pub fn replies(&self) -> &[String] {
        &self.replies
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait]
impl Responder for SimulatedResponder {
    async fn reply(&self, _history: &[Message], _prompt: &str) -> Result<String> {
        tokio::time::sleep(self.delay).await;

        self.replies
            .choose(&mut rand::rng())
            .cloned()
            .ok_or_else(|| AppError::Internal("Reply catalog is empty".to_string()))
    }

    fn name(&self) -> &str {
        "simulated"
    }
}
