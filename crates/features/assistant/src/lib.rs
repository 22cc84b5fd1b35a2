//! Assistant feature slice.
//!
//! [`ChatSession`] composes the credential vault, the input governor, the request throttle
//! and the security log with a [`CompletionProvider`]:
//!
//! ```text
//! configure_credentials: governor (shape) -> vault.store_secret -> audit
//! unlock:                vault.retrieve_secret -> audit
//! send_message:          governor (message) -> throttle -> provider -> audit on failure
//! ```

mod error;
pub mod provider;
mod session;

pub use crate::error::{ChatError, ChatErrorExt};
#[cfg(any(test, feature = "testing"))]
pub use crate::provider::ScriptedProvider;
pub use crate::provider::{CompletionProvider, CompletionRequest, HttpProvider, ProviderError};
pub use crate::session::{ChatSession, Reply};
