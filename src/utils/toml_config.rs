//! TOML-based configuration for the QuantumLeap site core
//!
//! This module provides declarative configuration for the chat widget and
//! logging via a TOML file (`quantumleap.toml`). Every field has a default,
//! so a missing or empty file yields a working simulated widget.
//!
//! Configuration is loaded once at startup and treated as immutable for the
//! rest of the process. Secrets are never stored in the file: the remote chat
//! strategy names the environment variable that holds its credential.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Root configuration structure loaded from quantumleap.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub chat: ChatConfig,
}

// ============= Logging Configuration =============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` takes precedence when set
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

// ============= Chat Configuration =============

/// Which reply-production strategy the widget uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChatStrategy {
    #[default]
    Simulated,
    Remote,
}

impl std::fmt::Display for ChatStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChatStrategy::Simulated => write!(f, "simulated"),
            ChatStrategy::Remote => write!(f, "remote"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    #[serde(default)]
    pub strategy: ChatStrategy,

    /// Assistant message seeded into a fresh transcript; empty disables seeding
    #[serde(default = "default_greeting")]
    pub greeting: String,

    /// Assistant message appended when reply-production fails
    #[serde(default = "default_apology")]
    pub apology: String,

    #[serde(default)]
    pub simulated: SimulatedConfig,

    #[serde(default)]
    pub remote: RemoteConfig,
}

fn default_greeting() -> String {
    "Hello! I'm QuantumAI. How can I assist you with our quantum computing solutions today?"
        .to_string()
}

fn default_apology() -> String {
    "Sorry, I'm having trouble reaching the quantum core right now. Please try again in a moment."
        .to_string()
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            strategy: ChatStrategy::default(),
            greeting: default_greeting(),
            apology: default_apology(),
            simulated: SimulatedConfig::default(),
            remote: RemoteConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulatedConfig {
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    /// Canned replies, one is picked uniformly at random per request
    #[serde(default = "default_replies")]
    pub replies: Vec<String>,
}

fn default_delay_ms() -> u64 {
    1500
}

fn default_replies() -> Vec<String> {
    [
        "Our quantum processors currently achieve coherence times of up to 300 microseconds, allowing complex algorithms to run effectively.",
        "QuantumLeap's hybrid cloud solution lets you leverage quantum acceleration without replacing your existing infrastructure.",
        "Our quantum encryption uses the principles of quantum entanglement to create keys that cannot be intercepted without detection.",
        "The QuantumAI platform can process optimization problems with up to 10,000 variables, far beyond classical computing capabilities.",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Default for SimulatedConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_delay_ms(),
            replies: default_replies(),
        }
    }
}

impl SimulatedConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Full chat-completion URL, not a base URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,

    /// Environment variable containing the bearer credential
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

fn default_endpoint() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    256
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_system_prompt() -> String {
    "You are QuantumAI, the assistant on the QuantumLeap website. Answer questions about \
     QuantumLeap's quantum computing and AI solutions concisely and in a friendly tone."
        .to_string()
}

fn default_api_key_env() -> String {
    "QUANTUMLEAP_CHAT_API_KEY".to_string()
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
            system_prompt: default_system_prompt(),
            api_key_env: default_api_key_env(),
        }
    }
}

impl RemoteConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

// ============= Configuration Loading & Validation =============

/// Errors that can occur during configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Environment variable '{0}' referenced in config is not set")]
    MissingEnvVar(String),
}

impl SiteConfig {
    /// Load and validate configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let config = Self::parse(&content)?;
        config.validate()?;

        Ok(config)
    }

    /// Load from `path` if it exists, otherwise fall back to defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            debug!("No configuration at {:?}, using defaults", path);
            let config = Self::default();
            config.validate()?;
            Ok(config)
        }
    }

    /// Like [`load_or_default`](Self::load_or_default) but without validating
    ///
    /// Used by commands that never touch the chat strategy, so a missing
    /// credential only fails the commands that need it.
    pub fn read_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::parse(&fs::read_to_string(path)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse without validating
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Validate value ranges and env var availability
    pub fn validate(&self) -> Result<(), ConfigError> {
        let chat = &self.chat;

        if chat.apology.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "chat.apology must not be empty".to_string(),
            ));
        }

        match chat.strategy {
            ChatStrategy::Simulated => {
                if chat.simulated.replies.iter().all(|r| r.trim().is_empty()) {
                    return Err(ConfigError::ValidationError(
                        "chat.simulated.replies must contain at least one reply".to_string(),
                    ));
                }
            }
            ChatStrategy::Remote => {
                let remote = &chat.remote;
                if remote.endpoint.trim().is_empty() {
                    return Err(ConfigError::ValidationError(
                        "chat.remote.endpoint must not be empty".to_string(),
                    ));
                }
                if remote.model.trim().is_empty() {
                    return Err(ConfigError::ValidationError(
                        "chat.remote.model must not be empty".to_string(),
                    ));
                }
                if !(0.0..=2.0).contains(&remote.temperature) {
                    return Err(ConfigError::ValidationError(format!(
                        "chat.remote.temperature must be between 0 and 2, got {}",
                        remote.temperature
                    )));
                }
                if remote.max_tokens == 0 {
                    return Err(ConfigError::ValidationError(
                        "chat.remote.max_tokens must be greater than 0".to_string(),
                    ));
                }
                if remote.timeout_secs == 0 {
                    return Err(ConfigError::ValidationError(
                        "chat.remote.timeout_secs must be greater than 0".to_string(),
                    ));
                }
                self.validate_env_var(&remote.api_key_env)?;
            }
        }

        Ok(())
    }

    fn validate_env_var(&self, name: &str) -> Result<(), ConfigError> {
        std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))?;
        Ok(())
    }

    /// Get a resolved value from an env var reference
    pub fn resolve_env(&self, env_name: &str) -> Option<String> {
        std::env::var(env_name).ok()
    }

    /// Get the remote chat credential from the environment
    pub fn chat_api_key(&self) -> Result<String, ConfigError> {
        self.resolve_env(&self.chat.remote.api_key_env)
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(self.chat.remote.api_key_env.clone()))
    }
}
