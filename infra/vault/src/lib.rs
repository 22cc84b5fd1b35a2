//! Passphrase-protected credential vault.
//!
//! The vault keeps a single secret (the assistant provider credential) encrypted at rest in
//! a [`KeyValueStore`](jobchat_storage::KeyValueStore). The key is derived from a user
//! passphrase on each call and never persisted.
//!
//! ## Key Derivation
//!
//! PBKDF2-HMAC-SHA256 with at least 100 000 iterations over a random per-installation salt.
//! The salt is generated on the first store, persisted, and reused for later stores until
//! the credentials are cleared.
//!
//! ## Record Format
//!
//! Both records are JSON documents stored under fixed keys:
//!
//! ```text
//! encryption_salt    [b0, b1, .. b15]
//! encrypted_api_key  {"data": [ciphertext || tag(16)], "iv": [nonce(12)]}
//! ```
//!
//! The AEAD associated data is the package storage key.
//!
//! ## Nonce Policy
//!
//! A fresh random 96-bit nonce is drawn for every encryption. The vault encrypts only when
//! the user stores a credential, far below the volume where random nonces become a concern.
//!
//! ## Example
//!
//! ```rust
//! use jobchat_storage::MemoryStore;
//! use jobchat_vault::prelude::*;
//!
//! # fn main() -> Result<(), VaultError> {
//! let vault = CredentialVault::<ChaCha>::builder()
//!     .store(MemoryStore::new())
//!     .iterations(120_000)
//!     .build()?;
//!
//! vault.store_secret("sk-example-credential-0001", "correct horse")?;
//! assert!(vault.has_stored_secret());
//!
//! vault.clear_stored_credentials()?;
//! assert!(vault.retrieve_secret("correct horse").is_none());
//! # Ok(())
//! # }
//! ```

mod builder;
mod engine;
mod error;
pub mod kdf;
mod types;

pub use builder::{NoStore, VaultBuilder, WithStore};
pub use engine::CredentialVault;
pub use error::{VaultError, VaultErrorExt};
pub use types::{KEY_LEN, NONCE_LEN, Secret, SecretPackage, StorageKeys, TAG_LEN};

pub mod prelude {
    pub use crate::builder::VaultBuilder;
    pub use crate::engine::CredentialVault;
    pub use crate::error::{VaultError, VaultErrorExt};
    pub use crate::types::{Aes, ChaCha, Secret};
}

pub mod algorithms {
    pub use crate::types::{Aes, ChaCha, VaultCipher};
}
