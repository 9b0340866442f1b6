use crate::chat::responder::Responder;
use crate::types::{AppError, Message, Result};
use crate::utils::toml_config::RemoteConfig;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Connection and request parameters for [`RemoteResponder`]
#[derive(Debug, Clone)]
pub struct RemoteSettings {
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout: Duration,
    pub system_prompt: String,
}

impl RemoteSettings {
    /// Combine file configuration with the credential resolved from the environment
    pub fn from_config(config: &RemoteConfig, api_key: String) -> Self {
        Self {
            endpoint: config.endpoint.clone(),
            api_key,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            timeout: config.timeout(),
            system_prompt: config.system_prompt.clone(),
        }
    }
}

// ============= Wire Types =============

#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<WireMessage<'a>>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct WireMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Calls a chat-completion endpoint once per reply
///
/// No retries. Transport errors, timeouts, non-2xx statuses and bodies
/// without a string at `choices[0].message.content` all come back as errors.
/// Content that is present is returned exactly, even when blank.
pub struct RemoteResponder {
    client: reqwest::Client,
    settings: RemoteSettings,
}

impl RemoteResponder {
    pub fn new(settings: RemoteSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| AppError::Http(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, settings })
    }

    pub fn settings(&self) -> &RemoteSettings {
        &self.settings
    }

    /// Request body: system instruction, prior transcript, then the new prompt
    pub fn build_request<'a>(
        &'a self,
        history: &'a [Message],
        prompt: &'a str,
    ) -> ChatCompletionRequest<'a> {
        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(WireMessage {
            role: "system",
            content: &self.settings.system_prompt,
        });
        messages.extend(history.iter().map(|m| WireMessage {
            role: m.sender.as_role(),
            content: &m.text,
        }));
        messages.push(WireMessage {
            role: "user",
            content: prompt,
        });

        ChatCompletionRequest {
            model: &self.settings.model,
            messages,
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
        }
    }
}

#[async_trait]
impl Responder for RemoteResponder {
    async fn reply(&self, history: &[Message], prompt: &str) -> Result<String> {
        let body = self.build_request(history, prompt);
        debug!(
            endpoint = %self.settings.endpoint,
            messages = body.messages.len(),
            "Requesting chat completion"
        );

        let response = self
            .client
            .post(&self.settings.endpoint)
            .bearer_auth(&self.settings.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::LLM(format!(
                "Chat completion request failed ({}): {}",
                status, text
            )));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| AppError::LLM(format!("Failed to parse response: {}", e)))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AppError::LLM("No content in chat completion response".to_string()))
    }

    fn name(&self) -> &str {
        "remote"
    }
}
