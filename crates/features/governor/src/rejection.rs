use strum_macros::IntoStaticStr;

/// Why an input was refused.
///
/// `Display` is the message shown to the user; [`Rejection::code`] is the stable identifier
/// recorded in the security log.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Rejection {
    #[error("Message cannot be empty")]
    EmptyMessage,

    #[error("Message is too long ({actual} characters, maximum is {max})")]
    MessageTooLong { max: usize, actual: usize },

    #[error("Message contains disallowed content")]
    SuspiciousContent,

    #[error("API key cannot be empty")]
    EmptyCredential,

    #[error("API key is too long (maximum is {max} characters)")]
    CredentialTooLong { max: usize },

    #[error("API key must start with \"{prefix}\"")]
    MissingCredentialPrefix { prefix: String },

    #[error("API key is too short (minimum is {min} characters)")]
    CredentialTooShort { min: usize },

    #[error("Passphrase cannot be empty")]
    EmptyPassphrase,
}

impl Rejection {
    /// Stable `snake_case` identifier, e.g. `message_too_long`.
    #[must_use]
    pub fn code(&self) -> &'static str {
        self.into()
    }
}
