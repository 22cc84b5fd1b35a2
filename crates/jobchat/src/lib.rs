//! Facade crate for the jobchat components.
//! Re-exports the shared, infrastructure and feature crates and wires them from an
//! [`AppConfig`]. Keep this crate thin: it should compose other crates, not implement
//! business logic.
//!
//! ## Usage
//! - Load an [`AppConfig`] with [`kernel::config::load_app_config`].
//! - Open the store with [`open_store`], build [`Components`], and turn them into a
//!   [`ChatSession`](features::assistant::ChatSession) with a provider.

use jobchat_assistant::{ChatSession, CompletionProvider, HttpProvider, ProviderError};
use jobchat_audit::SecurityLog;
use jobchat_domain::config::AppConfig;
use jobchat_governor::InputGovernor;
use jobchat_storage::{FileStore, KeyValueStore, StorageError};
use jobchat_throttle::{RequestThrottle, ThrottleError};
use jobchat_vault::algorithms::Aes;
use jobchat_vault::{CredentialVault, VaultBuilder, VaultError};
use std::borrow::Cow;
use std::sync::Arc;
use tracing::info;

pub use jobchat_domain as domain;
pub use jobchat_kernel as kernel;
pub use jobchat_storage as storage;
pub use jobchat_vault as vault;

/// Feature slices.
pub mod features {
    pub use jobchat_assistant as assistant;
    pub use jobchat_audit as audit;
    pub use jobchat_governor as governor;
    pub use jobchat_throttle as throttle;
}

/// The store shared by the vault and the security log.
pub type SharedStore = Arc<dyn KeyValueStore>;

#[jobchat_derive::jobchat_error]
pub enum InitError {
    #[error("Storage initialization failed{}: {source}", format_context(.context))]
    Storage { source: StorageError, context: Option<Cow<'static, str>> },

    #[error("Vault initialization failed{}: {source}", format_context(.context))]
    Vault { source: VaultError, context: Option<Cow<'static, str>> },

    #[error("Throttle initialization failed{}: {source}", format_context(.context))]
    Throttle { source: ThrottleError, context: Option<Cow<'static, str>> },

    #[error("Provider initialization failed{}: {source}", format_context(.context))]
    Provider { source: ProviderError, context: Option<Cow<'static, str>> },
}

/// Opens the file-backed store at `config.storage`.
///
/// # Errors
/// Returns [`InitError::Storage`] if the store document cannot be opened.
pub fn open_store(config: &AppConfig) -> Result<SharedStore, InitError> {
    let path = config.storage.file_path();
    let store = FileStore::open(&path).context(format!("Opening {}", path.display()))?;
    Ok(Arc::new(store))
}

/// The session-independent components, constructed once per process.
#[derive(Debug, Clone)]
pub struct Components {
    pub vault: CredentialVault<Aes, SharedStore>,
    pub audit: Arc<SecurityLog<SharedStore>>,
    pub throttle: Arc<RequestThrottle>,
    pub governor: InputGovernor,
    pub config: AppConfig,
}

impl Components {
    /// Builds every component from `config` over one shared store.
    ///
    /// # Errors
    /// Returns [`InitError::Vault`] or [`InitError::Throttle`] if the vault or throttle
    /// settings are invalid.
    pub fn from_config(
        config: &AppConfig,
        store: SharedStore,
        client_id: &str,
    ) -> Result<Self, InitError> {
        let vault = VaultBuilder::<Aes>::from_config(&config.vault)
            .store(Arc::clone(&store))
            .build()
            .context("Invalid vault settings")?;

        let audit = Arc::new(SecurityLog::new(store, &config.audit, client_id));
        let throttle = Arc::new(
            RequestThrottle::try_from_config(&config.throttle).context("Invalid throttle settings")?,
        );
        let governor = InputGovernor::from_config(&config.governor);

        info!(
            max_requests = config.throttle.max_requests,
            window_secs = config.throttle.window_secs,
            "Components initialized"
        );

        Ok(Self { vault, audit, throttle, governor, config: config.clone() })
    }

    /// A locked session using `provider`.
    #[must_use]
    pub fn session<P: CompletionProvider>(&self, provider: P) -> ChatSession<P> {
        ChatSession::new(
            self.vault.clone(),
            Arc::clone(&self.audit),
            Arc::clone(&self.throttle),
            provider,
        )
        .with_governor(self.governor.clone())
        .with_settings(self.config.assistant.clone())
    }

    /// A locked session talking to the configured HTTP endpoint.
    ///
    /// # Errors
    /// Returns [`InitError::Provider`] if the HTTP client cannot be built.
    pub fn http_session(&self) -> Result<ChatSession<HttpProvider>, InitError> {
        let provider = HttpProvider::new(&self.config.assistant, self.audit.client_id())
            .context("Building HTTP provider")?;
        Ok(self.session(provider))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobchat_assistant::ScriptedProvider;
    use jobchat_storage::MemoryStore;

    #[test]
    fn components_share_one_store() {
        let store: SharedStore = Arc::new(MemoryStore::new());
        let components = Components::from_config(&AppConfig::default(), Arc::clone(&store), "test")
            .unwrap();

        let mut session = components.session(ScriptedProvider::new());
        session.configure_credentials("sk-facade-credential-000000", "pw").unwrap();

        assert!(components.vault.has_stored_secret());
        assert_eq!(components.audit.entries().len(), 1);
        assert!(store.contains("encrypted_api_key").unwrap());
        assert!(store.contains("security_log").unwrap());
    }

    #[test]
    fn weak_vault_settings_are_rejected() {
        let mut config = AppConfig::default();
        config.vault.iterations = 10;

        let result = Components::from_config(&config, Arc::new(MemoryStore::new()), "test");

        assert!(matches!(result, Err(InitError::Vault { .. })));
    }

    #[test]
    fn disabled_throttle_window_is_rejected() {
        let mut config = AppConfig::default();
        config.throttle.window_secs = 0;

        let result = Components::from_config(&config, Arc::new(MemoryStore::new()), "test");

        assert!(matches!(result, Err(InitError::Throttle { .. })));
    }

    #[test]
    fn file_store_lands_in_the_data_dir() {
        let temp = tempfile::TempDir::new().unwrap();
        let mut config = AppConfig::default();
        config.storage.data_dir = temp.path().join("data");

        let store = open_store(&config).unwrap();
        store.set("k", "v").unwrap();

        assert!(temp.path().join("data").join("store.json").exists());
    }
}
