//! Reply-production strategies
//!
//! Every strategy implements [`Responder`], so the chat session works with
//! either one without knowing which is configured:
//! - [`SimulatedResponder`] - canned replies after a fixed delay
//! - [`RemoteResponder`] - a single chat-completion request over HTTP

/// Direct chat-completion endpoint client.
pub mod remote;
/// Random canned replies.
pub mod simulated;

pub use remote::{RemoteResponder, RemoteSettings};
pub use simulated::SimulatedResponder;

use crate::types::{Message, Result};
use crate::utils::toml_config::{ChatStrategy, SiteConfig};
use async_trait::async_trait;
use std::sync::Arc;

/// Produces the assistant's next message
#[async_trait]
pub trait Responder: Send + Sync {
    /// Produce a reply to `prompt` given the transcript so far
    ///
    /// `history` does not contain `prompt` itself.
    async fn reply(&self, history: &[Message], prompt: &str) -> Result<String>;

    /// Strategy name for logs and the CLI
    fn name(&self) -> &str;
}

/// Build the responder selected by configuration
pub fn from_config(config: &SiteConfig) -> Result<Arc<dyn Responder>> {
    match config.chat.strategy {
        ChatStrategy::Simulated => {
            let simulated = &config.chat.simulated;
            Ok(Arc::new(SimulatedResponder::new(
                simulated.replies.clone(),
                simulated.delay(),
            )?))
        }
        ChatStrategy::Remote => {
            let settings = RemoteSettings::from_config(&config.chat.remote, config.chat_api_key()?);
            Ok(Arc::new(RemoteResponder::new(settings)?))
        }
    }
}
