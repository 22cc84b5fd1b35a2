use crate::constants::{
    CLIENT_ID_MAX_CHARS, CREDENTIAL_PREFIX, MAX_CREDENTIAL_CHARS, MAX_MESSAGE_CHARS,
    MIN_CREDENTIAL_CHARS, MIN_KDF_ITERATIONS, SALT_KEY, SALT_LEN, SECRET_PACKAGE_KEY,
    SECURITY_LOG_CAPACITY, SECURITY_LOG_KEY, THROTTLE_MAX_REQUESTS, THROTTLE_WINDOW_SECS,
};
use serde::Deserialize;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Top-level client configuration shared across components.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfigInner {
    pub vault: VaultConfig,
    pub governor: GovernorConfig,
    pub throttle: ThrottleConfig,
    pub audit: AuditConfig,
    pub assistant: AssistantConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(flatten, default)]
    inner: Arc<AppConfigInner>,
}

impl Deref for AppConfig {
    type Target = AppConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for AppConfig {
    fn deref_mut(&mut self) -> &mut AppConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// Credential vault settings: key derivation and storage layout.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VaultConfig {
    pub iterations: u32,
    pub salt_len: usize,
    pub package_key: String,
    pub salt_key: String,
}

/// Input governor limits.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GovernorConfig {
    pub max_message_chars: usize,
    pub max_credential_chars: usize,
    pub min_credential_chars: usize,
    pub credential_prefix: String,
}

/// Request throttle window.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ThrottleConfig {
    pub window_secs: u64,
    pub max_requests: usize,
}

impl ThrottleConfig {
    #[must_use]
    pub const fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }
}

/// Security log retention.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    pub capacity: usize,
    pub log_key: String,
    pub client_id_max_chars: usize,
}

/// LLM provider request parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    pub endpoint: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub system_instructions: String,
    pub fallback_message: String,
    pub request_timeout_secs: u64,
}

/// Location of the client-local key-value store.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub file_name: String,
}

impl StorageConfig {
    #[must_use]
    pub fn file_path(&self) -> PathBuf {
        self.data_dir.join(&self.file_name)
    }
}

/// Logger settings consumed by the applications.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub filter: Option<String>,
    pub directory: Option<PathBuf>,
    pub json: bool,
    /// Also write `security` events to their own file when `directory` is set.
    pub security_trail: bool,
}

// --- Default ---

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            iterations: MIN_KDF_ITERATIONS,
            salt_len: SALT_LEN,
            package_key: SECRET_PACKAGE_KEY.to_owned(),
            salt_key: SALT_KEY.to_owned(),
        }
    }
}

impl Default for GovernorConfig {
    fn default() -> Self {
        Self {
            max_message_chars: MAX_MESSAGE_CHARS,
            max_credential_chars: MAX_CREDENTIAL_CHARS,
            min_credential_chars: MIN_CREDENTIAL_CHARS,
            credential_prefix: CREDENTIAL_PREFIX.to_owned(),
        }
    }
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self { window_secs: THROTTLE_WINDOW_SECS, max_requests: THROTTLE_MAX_REQUESTS }
    }
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            capacity: SECURITY_LOG_CAPACITY,
            log_key: SECURITY_LOG_KEY.to_owned(),
            client_id_max_chars: CLIENT_ID_MAX_CHARS,
        }
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1/chat/completions".to_owned(),
            model: "gpt-4o-mini".to_owned(),
            temperature: 0.7,
            max_tokens: 1000,
            system_instructions: "You are a recruiting assistant. The user pastes job descriptions; \
                summarize the role, list the key requirements and responsibilities, and flag \
                anything unclear. Answer only questions about the job description."
                .to_owned(),
            fallback_message: "Sorry, I could not reach the assistant right now. Please try again \
                in a moment."
                .to_owned(),
            request_timeout_secs: 60,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { data_dir: PathBuf::from(".jobchat"), file_name: "store.json".to_owned() }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            filter: None,
            directory: None,
            json: false,
            security_trail: true,
        }
    }
}
