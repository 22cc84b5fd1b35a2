//! # Vault Errors
//!
//! [`VaultError`] covers every failure inside the vault. Only a subset ever reaches callers:
//! [`CredentialVault::retrieve_secret`](crate::CredentialVault::retrieve_secret) folds all of
//! its failure causes into `None`.

use jobchat_storage::StorageError;
use std::borrow::Cow;

#[jobchat_derive::jobchat_error]
pub enum VaultError {
    /// Failure during encryption, including an unavailable system RNG.
    #[error("Encryption error{}: {message}", format_context(.context))]
    Encryption { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Authentication tag mismatch: wrong passphrase or tampered data.
    #[error("Decryption error{}: {message}", format_context(.context))]
    Decryption { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The stored package or salt does not have the expected shape.
    #[error("Invalid payload{}: {message}", format_context(.context))]
    InvalidPayload { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// No credential package is stored.
    #[error("No stored credential")]
    Missing,

    /// The key-value store failed.
    #[error("Storage error{}: {source}", format_context(.context))]
    Storage { source: StorageError, context: Option<Cow<'static, str>> },

    /// JSON encoding or decoding of a stored record failed.
    #[error("Serialization error{}: {source}", format_context(.context))]
    Serialization { source: serde_json::Error, context: Option<Cow<'static, str>> },

    /// The vault or builder is incorrectly configured.
    #[error("Invalid configuration{}: {message}", format_context(.context))]
    InvalidConfiguration { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
