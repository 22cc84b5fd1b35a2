use std::borrow::Cow;

/// A specialized [`StorageError`] enum of this crate.
#[jobchat_derive::jobchat_error]
pub enum StorageError {
    #[error("Invalid storage key{}: {message}", format_context(.context))]
    InvalidKey { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Hardware I/O failure{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Store document is corrupt{}: {source}", format_context(.context))]
    Corrupt { source: serde_json::Error, context: Option<Cow<'static, str>> },
}
