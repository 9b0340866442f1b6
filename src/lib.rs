//! # QuantumLeap - site core
//!
//! The behavioral core of the QuantumLeap marketing site: the client-side
//! route table that maps URL paths to pages, the page shell that decides
//! which chrome surrounds a page, and the QuantumAI chat widget.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use quantumleap::{PageId, RouteTable};
//!
//! let table = RouteTable::site();
//! assert_eq!(table.resolve("/about").page, PageId::About);
//! assert_eq!(table.resolve("/nope").location, "/404");
//! ```
//!
//! ### Chatting
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
//! session.submit_text("What is quantum encryption?")?;
//! session.settled().await;
//! ```
//!
//! ## Modules
//!
//! - [`routing`] - route table, page shell, scroll reset and navigation
//! - [`chat`] - widget state machine, transcript and reply strategies
//! - [`cli`] - terminal host for the `quantumleap` binary
//! - [`types`] - messages and error handling
//! - [`utils`] - TOML configuration
//!
//! ## Configuration
//!
//! Settings come from `quantumleap.toml`. The remote chat strategy never
//! stores its credential in the file; it names an environment variable
//! (`api_key_env`) that holds it.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(rustdoc::missing_crate_level_docs)]

/// QuantumAI chat widget.
pub mod chat;
/// Command-line interface.
pub mod cli;
/// Client-side routing.
pub mod routing;
/// Core types (messages, errors).
pub mod types;
/// Configuration utilities (TOML).
pub mod utils;

// Re-export commonly used types
pub use chat::{ChatSession, ChatWidget, Responder, WidgetSettings, WidgetState};
pub use routing::{ContactForm, HeaderScroll, Navigator, PageId, PageShell, Resolution, RouteTable};
pub use types::{AppError, Message, Result, Sender};
pub use utils::toml_config::SiteConfig;
