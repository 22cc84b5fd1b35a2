//! # Chat Errors
//!
//! Every failure of a user action maps to one [`ChatError`] variant. `Display` is the text
//! shown to the user: specific for validation and rate limiting, generic for
//! authentication, encryption and provider failures. None of them are retried.

use crate::provider::ProviderError;
use jobchat_governor::Rejection;
use jobchat_vault::VaultError;
use std::borrow::Cow;
use std::time::Duration;

#[jobchat_derive::jobchat_error]
pub enum ChatError {
    /// Bad shape or content; the reason is shown as is.
    #[error("{reason}")]
    Validation { reason: Rejection },

    /// Wrong passphrase or unreadable stored credential.
    #[error("Could not unlock the API key. Check your passphrase and try again.")]
    Authentication,

    /// The throttle refused the request.
    #[error("Too many requests. Please wait {} seconds before trying again.", wait_secs(.retry_after))]
    RateLimit { retry_after: Duration },

    /// Local cryptographic failure while storing the credential.
    #[error("Could not secure the API key{}.", format_context(.context))]
    Encryption { source: VaultError, context: Option<Cow<'static, str>> },

    /// The completion provider failed.
    #[error("The assistant is unavailable right now.")]
    Provider { source: ProviderError, context: Option<Cow<'static, str>> },

    /// No credential has been unlocked in this session.
    #[error("Unlock your API key before sending messages.")]
    Locked,

    /// Stored credentials could not be removed.
    #[error("Could not remove the stored credentials{}: {message}", format_context(.context))]
    Storage { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl From<Rejection> for ChatError {
    fn from(reason: Rejection) -> Self {
        Self::Validation { reason }
    }
}

/// Whole seconds, rounded up so a sub-second wait never reads as zero.
#[allow(clippy::trivially_copy_pass_by_ref)]
fn wait_secs(wait: &Duration) -> u64 {
    let secs = wait.as_secs();
    if wait.subsec_nanos() > 0 || secs == 0 { secs + 1 } else { secs }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limit_message_rounds_up() {
        let err = ChatError::RateLimit { retry_after: Duration::from_millis(12_300) };
        assert_eq!(err.to_string(), "Too many requests. Please wait 13 seconds before trying again.");

        let err = ChatError::RateLimit { retry_after: Duration::from_secs(45) };
        assert!(err.to_string().contains("wait 45 seconds"));
    }

    #[test]
    fn provider_detail_stays_out_of_the_message() {
        let err: ChatError = ProviderError::Api {
            status: 401,
            message: "Incorrect API key provided: sk-abc".into(),
            context: None,
        }
        .into();

        assert_eq!(err.to_string(), "The assistant is unavailable right now.");
    }

    #[test]
    fn validation_shows_the_reason() {
        let err = ChatError::from(Rejection::EmptyMessage);
        assert_eq!(err.to_string(), "Message cannot be empty");
    }
}
