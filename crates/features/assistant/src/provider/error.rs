use std::borrow::Cow;

/// Failures talking to the completion provider.
///
/// Callers treat every variant the same way; the distinction only matters for the
/// security log.
#[jobchat_derive::jobchat_error]
pub enum ProviderError {
    /// Network or protocol failure.
    #[error("Transport error{}: {source}", format_context(.context))]
    Transport { source: reqwest::Error, context: Option<Cow<'static, str>> },

    /// The provider answered with a non-success status.
    #[error("Provider returned HTTP {status}{}: {message}", format_context(.context))]
    Api { status: u16, message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The response did not contain a usable completion.
    #[error("Invalid provider response{}: {message}", format_context(.context))]
    InvalidResponse { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The provider cannot serve requests at all.
    #[error("Provider unavailable{}: {message}", format_context(.context))]
    Unavailable { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
