//! QuantumAI chat widget
//!
//! # Architecture
//!
//! - [`transcript`] - append-only message list of one widget instance
//! - [`widget`] - synchronous state machine (`Closed`, `Idle`,
//!   `AwaitingReply`, `Unmounted`) that issues reply tickets
//! - [`responder`] - reply-production strategies behind the [`Responder`] trait
//! - [`session`] - a mounted widget that runs its reply task on tokio and
//!   discards replies arriving after unmount
//!
//! # Example
//!
//! ```rust,ignore
//! use quantumleap::chat::{responder, ChatSession, WidgetSettings};
//! use quantumleap::SiteConfig;
//!
//! let config = SiteConfig::load_or_default("quantumleap.toml")?;
//! let session = ChatSession::mount_open(
//!     WidgetSettings::from(&config.chat),
//!     responder::from_config(&config)?,
//! );
//!
//! session.submit_text("How fast are your quantum processors?")?;
//! session.settled().await;
//! println!("{}", session.messages().last().unwrap().text);
//! ```

/// Reply-production strategies.
pub mod responder;
/// Mounted widget with async reply dispatch.
pub mod session;
/// Append-only transcript.
pub mod transcript;
/// Widget state machine.
pub mod widget;

pub use responder::{RemoteResponder, Responder, SimulatedResponder};
pub use session::{ChatSession, SessionSnapshot};
pub use transcript::Transcript;
pub use widget::{
    ChatWidget, Delivery, ReplyRequest, ReplyTicket, SubmitRejected, WidgetSettings, WidgetState,
};
