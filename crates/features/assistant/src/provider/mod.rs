//! The completion provider seam.

mod error;
mod http;
#[cfg(any(test, feature = "testing"))]
mod scripted;

pub use error::{ProviderError, ProviderErrorExt};
pub use http::HttpProvider;
#[cfg(any(test, feature = "testing"))]
pub use scripted::{RecordedRequest, ScriptedProvider};

use std::future::Future;
use std::sync::Arc;

/// Everything the provider needs for one completion.
#[derive(Clone, Copy)]
pub struct CompletionRequest<'a> {
    pub secret: &'a str,
    pub prompt: &'a str,
    pub system_instructions: &'a str,
    pub model: &'a str,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl std::fmt::Debug for CompletionRequest<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionRequest")
            .field("secret", &"***")
            .field("prompt_chars", &self.prompt.chars().count())
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish_non_exhaustive()
    }
}

/// A large-language-model backend that turns a prompt into text.
pub trait CompletionProvider: Send + Sync {
    /// Requests a completion.
    ///
    /// # Errors
    /// Returns [`ProviderError`] on any failure; callers do not distinguish causes.
    fn complete(
        &self,
        request: CompletionRequest<'_>,
    ) -> impl Future<Output = Result<String, ProviderError>> + Send;
}

impl<P: CompletionProvider> CompletionProvider for Arc<P> {
    fn complete(
        &self,
        request: CompletionRequest<'_>,
    ) -> impl Future<Output = Result<String, ProviderError>> + Send {
        (**self).complete(request)
    }
}
