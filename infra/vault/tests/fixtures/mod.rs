use jobchat_storage::MemoryStore;
use jobchat_vault::prelude::*;
use std::sync::Arc;

pub const CREDENTIAL: &str = "sk-test-credential-0123456789";
pub const PASSPHRASE: &str = "correct horse battery staple";

/// A vault over a shared in-memory store, so tests can inspect the raw records.
///
/// # Panics
/// * If the vault cannot be built.
#[must_use]
pub fn setup_vault() -> (CredentialVault<Aes, Arc<MemoryStore>>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let vault = CredentialVault::<Aes>::builder()
        .store(Arc::clone(&store))
        .build()
        .expect("Vault setup failed");
    (vault, store)
}
