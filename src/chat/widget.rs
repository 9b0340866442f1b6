//! Chat widget state machine
//!
//! The widget is plain synchronous state. It never performs I/O itself:
//! a successful submission hands back a [`ReplyRequest`], and whoever runs the
//! reply-production operation reports the result through [`ChatWidget::deliver`]
//! with the request's ticket.
//!
//! States:
//! - `Closed` - initial, no transcript rendered
//! - `Idle` - transcript visible, submissions accepted
//! - `AwaitingReply` - one reply outstanding, submissions rejected
//! - `Unmounted` - terminal, every event is ignored

use crate::chat::transcript::Transcript;
use crate::types::{Message, MessageId, Result, Sender};
use crate::utils::toml_config::ChatConfig;
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetState {
    Closed,
    Idle,
    AwaitingReply,
    Unmounted,
}

impl WidgetState {
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Idle | Self::AwaitingReply)
    }
}

impl std::fmt::Display for WidgetState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Closed => write!(f, "closed"),
            Self::Idle => write!(f, "idle"),
            Self::AwaitingReply => write!(f, "awaiting_reply"),
            Self::Unmounted => write!(f, "unmounted"),
        }
    }
}

/// Why a submission did not dispatch a reply. The widget is left unchanged.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRejected {
    #[error("input is empty")]
    EmptyInput,

    #[error("a reply is already pending")]
    Busy,

    #[error("widget is not open")]
    NotOpen,
}

/// Identifies one outstanding reply request of one widget instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReplyTicket {
    instance: Uuid,
    request: u64,
}

/// Everything reply-production needs for one turn
#[derive(Debug, Clone)]
pub struct ReplyRequest {
    pub ticket: ReplyTicket,
    /// Transcript before the new user message
    pub history: Vec<Message>,
    pub prompt: String,
}

/// What happened to a delivered reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// The reply text was appended
    Appended(MessageId),
    /// Reply-production failed and the apology was appended
    Apologized(MessageId),
    /// The ticket does not match the outstanding request; nothing changed
    Stale,
}

/// Per-instance widget settings
#[derive(Debug, Clone)]
pub struct WidgetSettings {
    /// Seeded into the transcript on first open; blank disables seeding
    pub greeting: String,
    /// Appended in place of a reply when reply-production fails
    pub apology: String,
}

impl From<&ChatConfig> for WidgetSettings {
    fn from(config: &ChatConfig) -> Self {
        Self {
            greeting: config.greeting.clone(),
            apology: config.apology.clone(),
        }
    }
}

impl Default for WidgetSettings {
    fn default() -> Self {
        Self::from(&ChatConfig::default())
    }
}

pub struct ChatWidget {
    instance_id: Uuid,
    settings: WidgetSettings,
    state: WidgetState,
    transcript: Option<Transcript>,
    input: String,
    pending: Option<ReplyTicket>,
    requests_issued: u64,
}

impl ChatWidget {
    pub fn new(settings: WidgetSettings) -> Self {
        Self {
            instance_id: Uuid::new_v4(),
            settings,
            state: WidgetState::Closed,
            transcript: None,
            input: String::new(),
            pending: None,
            requests_issued: 0,
        }
    }

    pub fn instance_id(&self) -> Uuid {
        self.instance_id
    }

    pub fn state(&self) -> WidgetState {
        self.state
    }

    /// Whether the "assistant is composing" indicator is shown
    pub fn is_composing(&self) -> bool {
        self.state == WidgetState::AwaitingReply
    }

    /// `None` until the widget has been opened once
    pub fn transcript(&self) -> Option<&Transcript> {
        self.transcript.as_ref()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Open the widget; the first open creates the transcript
    ///
    /// Returns `false` when the widget was not closed.
    pub fn open(&mut self) -> bool {
        if self.state != WidgetState::Closed {
            return false;
        }
        if self.transcript.is_none() {
            self.transcript = Some(Transcript::seeded(&self.settings.greeting));
        }
        self.state = WidgetState::Idle;
        debug!(instance = %self.instance_id, "Chat widget opened");
        true
    }

    /// Collapse an idle widget, keeping its transcript
    pub fn close(&mut self) -> bool {
        if self.state != WidgetState::Idle {
            return false;
        }
        self.state = WidgetState::Closed;
        true
    }

    /// Replace the input field's contents. Allowed while a reply is pending.
    pub fn set_input(&mut self, text: impl Into<String>) {
        if self.state == WidgetState::Unmounted {
            return;
        }
        self.input = text.into();
    }

    /// Submit the current input
    ///
    /// On success the input is appended verbatim as a user message, the input
    /// is cleared and exactly one reply request is issued.
    pub fn submit(&mut self) -> std::result::Result<ReplyRequest, SubmitRejected> {
        match self.state {
            WidgetState::Idle => {}
            WidgetState::AwaitingReply => return Err(SubmitRejected::Busy),
            WidgetState::Closed | WidgetState::Unmounted => return Err(SubmitRejected::NotOpen),
        }

        if self.input.trim().is_empty() {
            debug!(instance = %self.instance_id, "Ignoring empty submission");
            return Err(SubmitRejected::EmptyInput);
        }

        let transcript = self
            .transcript
            .get_or_insert_with(|| Transcript::seeded(&self.settings.greeting));
        let history = transcript.messages().to_vec();
        // Stored and sent as typed; trimming only decides emptiness.
        let prompt = std::mem::take(&mut self.input);
        transcript.append(Sender::User, prompt.clone());

        self.requests_issued += 1;
        let ticket = ReplyTicket {
            instance: self.instance_id,
            request: self.requests_issued,
        };
        self.pending = Some(ticket);
        self.state = WidgetState::AwaitingReply;

        Ok(ReplyRequest {
            ticket,
            history,
            prompt,
        })
    }

    /// Set the input and submit it in one step
    pub fn submit_text(
        &mut self,
        text: impl Into<String>,
    ) -> std::result::Result<ReplyRequest, SubmitRejected> {
        if self.state == WidgetState::AwaitingReply {
            return Err(SubmitRejected::Busy);
        }
        self.set_input(text);
        self.submit()
    }

    /// Report the outcome of a reply request
    pub fn deliver(&mut self, ticket: ReplyTicket, outcome: Result<String>) -> Delivery {
        if self.state != WidgetState::AwaitingReply || self.pending != Some(ticket) {
            warn!(instance = %self.instance_id, state = %self.state, "Discarding stale reply");
            return Delivery::Stale;
        }
        let Some(transcript) = self.transcript.as_mut() else {
            return Delivery::Stale;
        };

        let delivery = match outcome {
            Ok(text) => Delivery::Appended(transcript.append(Sender::Assistant, text)),
            Err(e) => {
                warn!(instance = %self.instance_id, error = %e, "Reply production failed");
                Delivery::Apologized(
                    transcript.append(Sender::Assistant, self.settings.apology.clone()),
                )
            }
        };

        self.pending = None;
        self.state = WidgetState::Idle;
        delivery
    }

    /// Tear the widget down. Later deliveries are discarded.
    pub fn unmount(&mut self) {
        if self.state == WidgetState::Unmounted {
            return;
        }
        debug!(instance = %self.instance_id, "Chat widget unmounted");
        self.pending = None;
        self.state = WidgetState::Unmounted;
    }
}
