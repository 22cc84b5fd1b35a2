use crate::engine::{CredentialVault, VaultInner};
use crate::error::VaultError;
use crate::types::{Aes, StorageKeys, VaultCipher};
use jobchat_domain::config::VaultConfig;
use jobchat_domain::constants::{MIN_KDF_ITERATIONS, SALT_KEY, SALT_LEN, SECRET_PACKAGE_KEY};
use jobchat_storage::KeyValueStore;
use parking_lot::Mutex;
use private::Sealed;
use std::marker::PhantomData;
use std::ops::RangeInclusive;
use std::sync::Arc;

/// Accepted salt lengths in bytes.
const SALT_LEN_RANGE: RangeInclusive<usize> = 8..=64;

#[derive(Debug, Default)]
pub struct NoStore;
#[derive(Debug)]
pub struct WithStore<S: KeyValueStore>(S);

mod private {
    pub(super) trait Sealed {}
}
impl Sealed for NoStore {}
impl<S: KeyValueStore> Sealed for WithStore<S> {}

/// A builder for the [`CredentialVault`].
///
/// A backing store is mandatory; everything else defaults to the values in
/// [`jobchat_domain::constants`].
#[allow(private_bounds)]
#[derive(Debug)]
pub struct VaultBuilder<C: VaultCipher = Aes, S: Sealed = NoStore> {
    _cipher: PhantomData<fn() -> C>,
    store: S,
    iterations: u32,
    salt_len: usize,
    keys: StorageKeys,
}

impl<C: VaultCipher> Default for VaultBuilder<C> {
    fn default() -> Self {
        Self {
            _cipher: PhantomData,
            store: NoStore,
            iterations: MIN_KDF_ITERATIONS,
            salt_len: SALT_LEN,
            keys: StorageKeys { package: SECRET_PACKAGE_KEY.into(), salt: SALT_KEY.into() },
        }
    }
}

impl<C: VaultCipher> VaultBuilder<C> {
    #[must_use = "Builder must be given a store before use"]
    pub fn new() -> Self {
        Self::default()
    }

    /// A builder pre-populated from a [`VaultConfig`] section.
    #[must_use]
    pub fn from_config(config: &VaultConfig) -> Self {
        Self::new().config(config)
    }

    /// Sets the key-value store the vault persists its records in.
    pub fn store<S: KeyValueStore>(self, store: S) -> VaultBuilder<C, WithStore<S>> {
        VaultBuilder {
            _cipher: PhantomData,
            store: WithStore(store),
            iterations: self.iterations,
            salt_len: self.salt_len,
            keys: self.keys,
        }
    }
}

#[allow(private_bounds)]
impl<C: VaultCipher, S: Sealed> VaultBuilder<C, S> {
    /// PBKDF2 iteration count. Values below [`MIN_KDF_ITERATIONS`] are rejected by `build`.
    #[must_use]
    pub const fn iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    /// Length of a newly generated salt, in bytes.
    #[must_use]
    pub const fn salt_len(mut self, salt_len: usize) -> Self {
        self.salt_len = salt_len;
        self
    }

    /// Storage keys for the secret package and the salt.
    #[must_use]
    pub fn keys(mut self, package: impl Into<String>, salt: impl Into<String>) -> Self {
        self.keys = StorageKeys { package: package.into(), salt: salt.into() };
        self
    }

    /// Applies a [`VaultConfig`] section.
    #[must_use]
    pub fn config(self, config: &VaultConfig) -> Self {
        self.iterations(config.iterations)
            .salt_len(config.salt_len)
            .keys(config.package_key.clone(), config.salt_key.clone())
    }
}

impl<C: VaultCipher, S: KeyValueStore> VaultBuilder<C, WithStore<S>> {
    /// Validates the settings and builds the vault.
    ///
    /// # Errors
    /// Returns [`VaultError::InvalidConfiguration`] if the iteration count is below the
    /// minimum, the salt length is out of range, or the storage keys are blank or equal.
    pub fn build(self) -> Result<CredentialVault<C, S>, VaultError> {
        if self.iterations < MIN_KDF_ITERATIONS {
            return Err(VaultError::InvalidConfiguration {
                message: format!(
                    "PBKDF2 iterations must be at least {MIN_KDF_ITERATIONS}, got {}",
                    self.iterations
                )
                .into(),
                context: None,
            });
        }

        if !SALT_LEN_RANGE.contains(&self.salt_len) {
            return Err(VaultError::InvalidConfiguration {
                message: format!(
                    "Salt length must be within {}..={} bytes, got {}",
                    SALT_LEN_RANGE.start(),
                    SALT_LEN_RANGE.end(),
                    self.salt_len
                )
                .into(),
                context: None,
            });
        }

        if self.keys.package.trim().is_empty()
            || self.keys.salt.trim().is_empty()
            || self.keys.package == self.keys.salt
        {
            return Err(VaultError::InvalidConfiguration {
                message: "Package and salt keys must be distinct and non-empty".into(),
                context: Some(format!("package={}, salt={}", self.keys.package, self.keys.salt).into()),
            });
        }

        let WithStore(store) = self.store;

        Ok(CredentialVault::from_inner(Arc::new(VaultInner {
            store,
            keys: self.keys,
            iterations: self.iterations,
            salt_len: self.salt_len,
            write_lock: Mutex::new(()),
        })))
    }
}
