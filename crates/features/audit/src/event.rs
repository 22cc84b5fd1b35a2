use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use strum_macros::IntoStaticStr;

/// Security-relevant occurrences worth keeping a trail of.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SecurityEvent {
    CredentialsConfigured,
    CredentialsCleared,
    CredentialUnlocked,
    UnlockFailed,
    ValidationFailed,
    RateLimitExceeded,
    ProviderError,
    EncryptionFailed,
}

impl SecurityEvent {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Failures are logged at `WARN`, everything else at `INFO`.
    #[must_use]
    pub const fn is_failure(self) -> bool {
        !matches!(self, Self::CredentialsConfigured | Self::CredentialsCleared | Self::CredentialUnlocked)
    }
}

impl fmt::Display for SecurityEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One persisted log record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityLogEntry {
    pub timestamp: DateTime<Utc>,
    pub event: SecurityEvent,
    #[serde(default)]
    pub details: Map<String, Value>,
    #[serde(rename = "userAgent")]
    pub user_agent: String,
}
