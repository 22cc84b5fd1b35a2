use jobchat_storage::StorageError;
use std::borrow::Cow;

/// Audit slice error type.
#[jobchat_derive::jobchat_error]
pub enum AuditError {
    #[error("Audit storage error{}: {source}", format_context(.context))]
    Storage { source: StorageError, context: Option<Cow<'static, str>> },

    #[error("Audit log encoding error{}: {source}", format_context(.context))]
    Serialization { source: serde_json::Error, context: Option<Cow<'static, str>> },
}
