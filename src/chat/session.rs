//! A mounted chat widget and its reply task
//!
//! The session runs reply-production on the tokio runtime so the caller is
//! never blocked while a reply is pending. Unmounting (explicitly or by
//! dropping the session) aborts the in-flight task; a reply that still
//! resolves afterwards reaches an unmounted widget and is discarded.

use crate::chat::responder::Responder;
use crate::chat::widget::{ChatWidget, Delivery, SubmitRejected, WidgetSettings, WidgetState};
use crate::types::Message;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::AbortHandle;
use tracing::info;
use uuid::Uuid;

/// Point-in-time copy of a session's visible state
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub state: WidgetState,
    pub composing: bool,
    pub messages: Vec<Message>,
    pub input: String,
}

struct Shared {
    widget: Mutex<ChatWidget>,
    /// Bumped after every change to the widget
    revision: watch::Sender<u64>,
}

impl Shared {
    fn notify(&self) {
        self.revision.send_modify(|rev| *rev += 1);
    }
}

pub struct ChatSession {
    shared: Arc<Shared>,
    responder: Arc<dyn Responder>,
    task: Mutex<Option<AbortHandle>>,
}

impl ChatSession {
    /// Mount a new, closed widget instance backed by `responder`
    pub fn mount(settings: WidgetSettings, responder: Arc<dyn Responder>) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            shared: Arc::new(Shared {
                widget: Mutex::new(ChatWidget::new(settings)),
                revision,
            }),
            responder,
            task: Mutex::new(None),
        }
    }

    /// Mount and open in one step
    pub fn mount_open(settings: WidgetSettings, responder: Arc<dyn Responder>) -> Self {
        let session = Self::mount(settings, responder);
        session.open();
        session
    }

    pub fn instance_id(&self) -> Uuid {
        self.shared.widget.lock().instance_id()
    }

    pub fn responder_name(&self) -> &str {
        self.responder.name()
    }

    pub fn open(&self) -> bool {
        let opened = self.shared.widget.lock().open();
        if opened {
            self.shared.notify();
        }
        opened
    }

    pub fn close(&self) -> bool {
        let closed = self.shared.widget.lock().close();
        if closed {
            self.shared.notify();
        }
        closed
    }

    pub fn set_input(&self, text: impl Into<String>) {
        self.shared.widget.lock().set_input(text);
        self.shared.notify();
    }

    /// Submit the current input field
    pub fn submit(&self) -> Result<(), SubmitRejected> {
        let request = self.shared.widget.lock().submit()?;
        self.dispatch(request);
        Ok(())
    }

    /// Type `text` into the input field and submit it
    pub fn submit_text(&self, text: impl Into<String>) -> Result<(), SubmitRejected> {
        let request = self.shared.widget.lock().submit_text(text)?;
        self.dispatch(request);
        Ok(())
    }

    fn dispatch(&self, request: crate::chat::widget::ReplyRequest) {
        self.shared.notify();

        info!(
            responder = self.responder.name(),
            history = request.history.len(),
            "Dispatching reply request"
        );

        let shared = Arc::clone(&self.shared);
        let responder = Arc::clone(&self.responder);
        let handle = tokio::spawn(async move {
            let outcome = responder.reply(&request.history, &request.prompt).await;
            let delivery = shared.widget.lock().deliver(request.ticket, outcome);
            if delivery != Delivery::Stale {
                shared.notify();
            }
            delivery
        });

        *self.task.lock() = Some(handle.abort_handle());
    }

    pub fn state(&self) -> WidgetState {
        self.shared.widget.lock().state()
    }

    pub fn is_composing(&self) -> bool {
        self.shared.widget.lock().is_composing()
    }

    /// Transcript copy; empty before the first open
    pub fn messages(&self) -> Vec<Message> {
        self.shared
            .widget
            .lock()
            .transcript()
            .map(|t| t.messages().to_vec())
            .unwrap_or_default()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let widget = self.shared.widget.lock();
        SessionSnapshot {
            state: widget.state(),
            composing: widget.is_composing(),
            messages: widget
                .transcript()
                .map(|t| t.messages().to_vec())
                .unwrap_or_default(),
            input: widget.input().to_string(),
        }
    }

    /// Receiver that changes whenever the widget does
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.shared.revision.subscribe()
    }

    /// Wait until no reply is outstanding and return the resulting state
    pub async fn settled(&self) -> WidgetState {
        let mut changes = self.subscribe();
        loop {
            let state = self.state();
            if state != WidgetState::AwaitingReply {
                return state;
            }
            if changes.changed().await.is_err() {
                return self.state();
            }
        }
    }

    /// Tear down the widget and abandon any in-flight reply
    pub fn unmount(&self) {
        if let Some(task) = self.task.lock().take() {
            task.abort();
        }
        self.shared.widget.lock().unmount();
        self.shared.notify();
    }
}

impl Drop for ChatSession {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::responder::SimulatedResponder;
    use crate::types::Sender;
    use std::time::Duration;

    fn settings() -> WidgetSettings {
        WidgetSettings {
            greeting: "Hello!".to_string(),
            apology: "Sorry.".to_string(),
        }
    }

    fn simulated(delay_ms: u64) -> Arc<dyn Responder> {
        Arc::new(
            SimulatedResponder::new(vec!["canned".to_string()], Duration::from_millis(delay_ms))
                .unwrap(),
        )
    }

    #[tokio::test]
    async fn test_submit_then_reply() {
        let session = ChatSession::mount_open(settings(), simulated(5));

        session.submit_text("hi").unwrap();
        assert!(session.is_composing());

        assert_eq!(session.settled().await, WidgetState::Idle);
        let messages = session.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1].sender, Sender::User);
        assert_eq!(messages[2].text, "canned");
    }

    #[tokio::test]
    async fn test_busy_while_awaiting() {
        let session = ChatSession::mount_open(settings(), simulated(50));

        session.submit_text("first").unwrap();
        assert_eq!(session.submit_text("second"), Err(SubmitRejected::Busy));
        assert_eq!(session.messages().len(), 2);

        session.settled().await;
        assert_eq!(session.messages().len(), 3);
    }

    #[tokio::test]
    async fn test_unmount_abandons_reply() {
        let session = ChatSession::mount_open(settings(), simulated(20));
        session.submit_text("hi").unwrap();
        session.unmount();

        tokio::time::sleep(Duration::from_millis(60)).await;

        let snapshot = session.snapshot();
        assert_eq!(snapshot.state, WidgetState::Unmounted);
        assert_eq!(snapshot.messages.len(), 2);
        assert_eq!(session.settled().await, WidgetState::Unmounted);
    }

    #[tokio::test]
    async fn test_subscribe_sees_changes() {
        let session = ChatSession::mount_open(settings(), simulated(5));
        let mut changes = session.subscribe();

        session.set_input("typing");
        changes.changed().await.unwrap();
        assert_eq!(session.snapshot().input, "typing");
    }
}
