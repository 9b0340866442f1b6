//! Mock responders for testing.
//!
//! Shared by the chat session and CLI tests so no test needs a live
//! chat-completion endpoint.

use async_trait::async_trait;
use parking_lot::Mutex;
use quantumleap::chat::Responder;
use quantumleap::types::{AppError, Message, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

/// Mock responder with a configurable reply
///
/// Every call is recorded so tests can assert on the history passed in.
///
/// # Examples
///
/// ```ignore
/// let responder = MockResponder::new("Hi there");
/// let responder = MockResponder::failing();
/// let (responder, gate) = MockResponder::gated("late reply");
/// gate.notify_one(); // release the pending reply
/// ```
#[derive(Clone)]
pub struct MockResponder {
    reply: String,
    should_fail: bool,
    delay: Duration,
    gate: Option<Arc<Notify>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

/// One recorded `reply` invocation
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub history: Vec<Message>,
    pub prompt: String,
}

impl MockResponder {
    /// Reply with `reply` immediately.
    pub fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            should_fail: false,
            delay: Duration::ZERO,
            gate: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Always fail.
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::new("")
        }
    }

    /// Reply after `delay`.
    pub fn delayed(reply: &str, delay: Duration) -> Self {
        Self {
            delay,
            ..Self::new(reply)
        }
    }

    /// Reply only once the returned gate is notified.
    pub fn gated(reply: &str) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        let responder = Self {
            gate: Some(Arc::clone(&gate)),
            ..Self::new(reply)
        };
        (responder, gate)
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait]
impl Responder for MockResponder {
    async fn reply(&self, history: &[Message], prompt: &str) -> Result<String> {
        self.calls.lock().push(RecordedCall {
            history: history.to_vec(),
            prompt: prompt.to_string(),
        });

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        if self.should_fail {
            return Err(AppError::LLM("Mock responder failure".to_string()));
        }
        Ok(self.reply.clone())
    }

    fn name(&self) -> &str {
        "mock"
    }
}
