use crate::error::ChatError;
use crate::provider::{CompletionProvider, CompletionRequest};
use jobchat_audit::{SecurityEvent, SecurityLog};
use jobchat_domain::config::AssistantConfig;
use jobchat_governor::{InputGovernor, Rejection};
use jobchat_kernel::time::{Clock, SystemClock};
use jobchat_storage::KeyValueStore;
use jobchat_throttle::RequestThrottle;
use jobchat_vault::algorithms::Aes;
use jobchat_vault::{CredentialVault, Secret};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info};

/// A successful exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// The sanitized prompt that was sent.
    pub prompt: String,
    /// The provider's answer.
    pub text: String,
}

/// One user's chat session.
///
/// Holds the unlocked credential in zeroizing memory for the lifetime of the session (or
/// until [`lock`](Self::lock)). Every outbound message goes through the governor and the
/// throttle before reaching the provider; security-relevant outcomes are recorded in the
/// [`SecurityLog`].
#[derive(Debug)]
pub struct ChatSession<P, S = Arc<dyn KeyValueStore>, C = SystemClock>
where
    P: CompletionProvider,
    S: KeyValueStore,
    C: Clock,
{
    vault: CredentialVault<Aes, S>,
    audit: Arc<SecurityLog<S>>,
    throttle: Arc<RequestThrottle<C>>,
    governor: InputGovernor,
    provider: P,
    settings: AssistantConfig,
    secret: Option<Secret>,
}

impl<P, S, C> ChatSession<P, S, C>
where
    P: CompletionProvider,
    S: KeyValueStore,
    C: Clock,
{
    /// Creates a locked session with the default governor limits and assistant settings.
    pub fn new(
        vault: CredentialVault<Aes, S>,
        audit: Arc<SecurityLog<S>>,
        throttle: Arc<RequestThrottle<C>>,
        provider: P,
    ) -> Self {
        Self {
            vault,
            audit,
            throttle,
            governor: InputGovernor::default(),
            provider,
            settings: AssistantConfig::default(),
            secret: None,
        }
    }

    #[must_use]
    pub fn with_governor(mut self, governor: InputGovernor) -> Self {
        self.governor = governor;
        self
    }

    #[must_use]
    pub fn with_settings(mut self, settings: AssistantConfig) -> Self {
        self.settings = settings;
        self
    }

    #[must_use]
    pub const fn is_unlocked(&self) -> bool {
        self.secret.is_some()
    }

    #[must_use]
    pub fn has_stored_credentials(&self) -> bool {
        self.vault.has_stored_secret()
    }

    #[must_use]
    pub const fn provider(&self) -> &P {
        &self.provider
    }

    #[must_use]
    pub fn audit(&self) -> &SecurityLog<S> {
        &self.audit
    }

    /// Checks, encrypts and stores a new credential, leaving the session unlocked with it.
    ///
    /// # Errors
    /// * [`ChatError::Validation`] if the credential shape is wrong or the passphrase is empty.
    /// * [`ChatError::Encryption`] if the vault cannot store it.
    pub fn configure_credentials(&mut self, candidate: &str, passphrase: &str) -> Result<(), ChatError> {
        let credential = match self.governor.validate_credential_format(candidate).into_result() {
            Ok(sanitized) => sanitized.unwrap_or_else(|| candidate.trim().to_owned()),
            Err(reason) => return Err(self.reject("credential", reason)),
        };

        if passphrase.is_empty() {
            return Err(self.reject("passphrase", Rejection::EmptyPassphrase));
        }

        if let Err(e) = self.vault.store_secret(&credential, passphrase) {
            self.audit.record(SecurityEvent::EncryptionFailed, json!({ "error": e.to_string() }));
            return Err(ChatError::Encryption { source: e, context: None });
        }

        self.audit.record(SecurityEvent::CredentialsConfigured, json!({}));
        self.secret = Some(Secret::new(credential));
        info!("Credentials configured");
        Ok(())
    }

    /// Decrypts the stored credential into the session.
    ///
    /// # Errors
    /// Returns [`ChatError::Authentication`] for a wrong passphrase, a missing credential
    /// or unreadable stored data alike.
    pub fn unlock(&mut self, passphrase: &str) -> Result<(), ChatError> {
        let Some(secret) = self.vault.retrieve_secret(passphrase) else {
            self.audit.record(SecurityEvent::UnlockFailed, json!({}));
            return Err(ChatError::Authentication);
        };

        self.secret = Some(secret);
        self.audit.record(SecurityEvent::CredentialUnlocked, json!({}));
        Ok(())
    }

    /// Drops the unlocked credential from memory. The stored copy is kept.
    pub fn lock(&mut self) {
        if self.secret.take().is_some() {
            debug!("Session locked");
        }
    }

    /// Locks the session and erases the stored credential.
    ///
    /// # Errors
    /// Returns [`ChatError::Storage`] if the stored records cannot be removed.
    pub fn forget_credentials(&mut self) -> Result<(), ChatError> {
        self.lock();

        self.vault.clear_stored_credentials().map_err(|e| ChatError::Storage {
            message: e.to_string().into(),
            context: None,
        })?;

        self.audit.record(SecurityEvent::CredentialsCleared, json!({}));
        Ok(())
    }

    /// Validates, throttles and forwards `text` to the provider.
    ///
    /// # Errors
    /// * [`ChatError::Locked`] if no credential is unlocked.
    /// * [`ChatError::Validation`] if the message is rejected.
    /// * [`ChatError::RateLimit`] if the throttle has no free slot.
    /// * [`ChatError::Provider`] if the provider fails.
    pub async fn send_message(&self, text: &str) -> Result<Reply, ChatError> {
        let secret = self.secret.as_ref().ok_or(ChatError::Locked)?;

        let prompt = match self.governor.validate_message(text).into_result() {
            Ok(sanitized) => sanitized.unwrap_or_default(),
            Err(reason) => return Err(self.reject("message", reason)),
        };

        if !self.throttle.can_admit() {
            let retry_after = self.throttle.time_until_next_slot();
            self.audit.record(
                SecurityEvent::RateLimitExceeded,
                json!({ "retry_after_secs": retry_after.as_secs() }),
            );
            return Err(ChatError::RateLimit { retry_after });
        }

        let request = CompletionRequest {
            secret: secret.expose(),
            prompt: &prompt,
            system_instructions: &self.settings.system_instructions,
            model: &self.settings.model,
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
        };

        match self.provider.complete(request).await {
            Ok(text) => Ok(Reply { prompt, text }),
            Err(e) => {
                self.audit.record(SecurityEvent::ProviderError, json!({ "error": e.to_string() }));
                Err(ChatError::Provider { source: e, context: None })
            },
        }
    }

    /// Sends `text` and turns every outcome into display text.
    ///
    /// Provider failures show the configured fallback message; everything else shows the
    /// error's own message.
    pub async fn respond(&self, text: &str) -> String {
        match self.send_message(text).await {
            Ok(reply) => reply.text,
            Err(ChatError::Provider { .. }) => self.settings.fallback_message.clone(),
            Err(e) => e.to_string(),
        }
    }

    fn reject(&self, field: &str, reason: Rejection) -> ChatError {
        self.audit
            .record(SecurityEvent::ValidationFailed, json!({ "field": field, "reason": reason.code() }));
        ChatError::Validation { reason }
    }
}
