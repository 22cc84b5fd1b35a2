use aead::inout::InOutBuf;
use aead::{Key, Nonce, Tag};
use getrandom::fill;
use jobchat_storage::KeyValueStore;
use parking_lot::Mutex;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, info, warn};
use zeroize::{Zeroize, Zeroizing};

use crate::builder::VaultBuilder;
use crate::error::{VaultError, VaultErrorExt};
use crate::kdf::{derive_key, generate_salt};
use crate::types::{Aes, KEY_LEN, NONCE_LEN, Secret, SecretPackage, StorageKeys, TAG_LEN, VaultCipher};

#[derive(Debug)]
pub(crate) struct VaultInner<S> {
    pub(crate) store: S,
    pub(crate) keys: StorageKeys,
    pub(crate) iterations: u32,
    pub(crate) salt_len: usize,
    /// Held across every multi-key read or write (salt + package).
    pub(crate) write_lock: Mutex<()>,
}

/// Passphrase-protected storage for a single credential.
///
/// The vault persists two records in its [`KeyValueStore`]: a random salt and a
/// [`SecretPackage`]. The encryption key is derived from the user's passphrase on every call
/// and is never stored. The package is bound to its storage key as associated data, so a
/// package copied under a different key does not open.
///
/// `CredentialVault` is a cheap [`Arc`] handle; clones share the same store and lock.
///
/// ### Generic Parameters
/// * `C`: The AEAD cipher. Defaults to [`Aes`] (AES-256-GCM).
/// * `S`: The backing store.
///
/// ### Example
/// ```rust
/// use jobchat_storage::MemoryStore;
/// use jobchat_vault::prelude::*;
///
/// # fn main() -> Result<(), VaultError> {
/// let vault = CredentialVault::<Aes>::builder().store(MemoryStore::new()).build()?;
///
/// vault.store_secret("sk-example-credential-0001", "hunter2")?;
///
/// let secret = vault.retrieve_secret("hunter2").expect("correct passphrase");
/// assert_eq!(secret.expose(), "sk-example-credential-0001");
/// assert!(vault.retrieve_secret("wrong").is_none());
/// # Ok(())
/// # }
/// ```
pub struct CredentialVault<C = Aes, S = Arc<dyn KeyValueStore>>
where
    C: VaultCipher,
    S: KeyValueStore,
{
    inner: Arc<VaultInner<S>>,
    _cipher: PhantomData<fn() -> C>,
}

impl<C: VaultCipher, S: KeyValueStore> fmt::Debug for CredentialVault<C, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialVault")
            .field("keys", &self.inner.keys)
            .field("iterations", &self.inner.iterations)
            .field("store", &self.inner.store)
            .finish_non_exhaustive()
    }
}

impl<C: VaultCipher, S: KeyValueStore> Clone for CredentialVault<C, S> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner), _cipher: PhantomData }
    }
}

impl<C: VaultCipher> CredentialVault<C> {
    /// Returns a new [`VaultBuilder`] to configure the vault.
    #[must_use]
    pub fn builder() -> VaultBuilder<C> {
        VaultBuilder::<C>::new()
    }
}

impl<C, S> CredentialVault<C, S>
where
    C: VaultCipher,
    S: KeyValueStore,
{
    pub(crate) const fn from_inner(inner: Arc<VaultInner<S>>) -> Self {
        Self { inner, _cipher: PhantomData }
    }

    /// Encrypts `secret` under a key derived from `passphrase` and persists it.
    ///
    /// The salt is created on first use and reused afterwards. Any previously stored
    /// package is replaced.
    ///
    /// # Errors
    /// * [`VaultError::Encryption`] if the random source or the cipher fails.
    /// * [`VaultError::Storage`] / [`VaultError::Serialization`] if persisting fails.
    pub fn store_secret(&self, secret: &str, passphrase: &str) -> Result<(), VaultError> {
        let _guard = self.inner.write_lock.lock();

        let salt = self.load_or_create_salt()?;
        let key = derive_key(passphrase.as_bytes(), &salt, self.inner.iterations);
        let cipher = init_cipher::<C>(&key)?;

        let package = seal(&cipher, secret.as_bytes(), self.inner.keys.package.as_bytes())?;
        let encoded = serde_json::to_string(&package).context("Failed to encode secret package")?;

        self.inner
            .store
            .set(&self.inner.keys.package, &encoded)
            .context("Failed to persist secret package")?;

        info!(bytes = package.data.len(), "Credential stored in vault");
        Ok(())
    }

    /// Decrypts the stored secret with `passphrase`.
    ///
    /// Returns `None` when nothing is stored, the passphrase is wrong, or the stored data is
    /// unreadable. The caller cannot tell these cases apart.
    #[must_use]
    pub fn retrieve_secret(&self, passphrase: &str) -> Option<Secret> {
        let _guard = self.inner.write_lock.lock();

        match self.try_retrieve(passphrase) {
            Ok(secret) => Some(secret),
            Err(VaultError::Missing) => None,
            Err(e) => {
                debug!(error = %e, "Credential retrieval failed");
                None
            },
        }
    }

    /// Returns `true` if a secret package is present. No decryption is attempted.
    #[must_use]
    pub fn has_stored_secret(&self) -> bool {
        self.inner.store.contains(&self.inner.keys.package).unwrap_or_else(|e| {
            warn!(error = %e, "Failed to query vault store");
            false
        })
    }

    /// Removes the secret package and the salt. Succeeds when nothing is stored.
    ///
    /// # Errors
    /// Returns [`VaultError::Storage`] if the store cannot be written.
    pub fn clear_stored_credentials(&self) -> Result<(), VaultError> {
        let _guard = self.inner.write_lock.lock();

        self.inner
            .store
            .remove(&self.inner.keys.package)
            .context("Failed to remove secret package")?;
        self.inner.store.remove(&self.inner.keys.salt).context("Failed to remove salt")?;

        info!("Vault credentials cleared");
        Ok(())
    }

    fn try_retrieve(&self, passphrase: &str) -> Result<Secret, VaultError> {
        let keys = &self.inner.keys;

        let raw_package = self.inner.store.get(&keys.package)?.ok_or(VaultError::Missing)?;
        let package: SecretPackage =
            serde_json::from_str(&raw_package).context("Failed to decode secret package")?;

        let raw_salt = self.inner.store.get(&keys.salt)?.ok_or_else(|| {
            VaultError::InvalidPayload {
                message: "Secret package has no salt".into(),
                context: None,
            }
        })?;
        let salt: Vec<u8> = serde_json::from_str(&raw_salt).context("Failed to decode salt")?;

        let key = derive_key(passphrase.as_bytes(), &salt, self.inner.iterations);
        let cipher = init_cipher::<C>(&key)?;
        let plaintext = open(&cipher, &package, keys.package.as_bytes())?;

        match String::from_utf8(plaintext) {
            Ok(text) => Ok(Secret::new(text)),
            Err(e) => {
                e.into_bytes().zeroize();
                Err(VaultError::InvalidPayload {
                    message: "Decrypted secret is not valid UTF-8".into(),
                    context: None,
                })
            },
        }
    }

    /// Reuses the persisted salt or generates and persists a new one.
    ///
    /// A salt of any non-empty length is reused so that a changed `salt_len` setting does
    /// not orphan an existing package. An unreadable salt is replaced.
    fn load_or_create_salt(&self) -> Result<Vec<u8>, VaultError> {
        let key = &self.inner.keys.salt;

        if let Some(raw) = self.inner.store.get(key)? {
            match serde_json::from_str::<Vec<u8>>(&raw) {
                Ok(salt) if !salt.is_empty() => return Ok(salt),
                Ok(_) => warn!("Stored salt is empty, generating a new one"),
                Err(e) => warn!(error = %e, "Stored salt is unreadable, generating a new one"),
            }
        }

        let salt = generate_salt(self.inner.salt_len)?;
        let encoded = serde_json::to_string(&salt).context("Failed to encode salt")?;
        self.inner.store.set(key, &encoded).context("Failed to persist salt")?;

        debug!(len = salt.len(), "Generated new vault salt");
        Ok(salt)
    }
}

fn init_cipher<C: VaultCipher>(key: &Zeroizing<[u8; KEY_LEN]>) -> Result<C, VaultError> {
    let key = Key::<C>::try_from(&key[..]).map_err(|_| VaultError::Encryption {
        message: "Invalid key length".into(),
        context: Some(format!("expected {KEY_LEN} bytes").into()),
    })?;
    Ok(C::new(&key))
}

fn next_nonce<C: VaultCipher>() -> Result<Nonce<C>, VaultError> {
    let mut nonce = Nonce::<C>::default();
    fill(&mut nonce).map_err(|e| VaultError::Encryption {
        message: format!("System RNG unavailable: {e}").into(),
        context: Some("nonce generation".into()),
    })?;
    Ok(nonce)
}

fn seal<C: VaultCipher>(cipher: &C, plaintext: &[u8], aad: &[u8]) -> Result<SecretPackage, VaultError> {
    let nonce = next_nonce::<C>()?;

    let mut buf = Vec::with_capacity(plaintext.len() + TAG_LEN);
    buf.extend_from_slice(plaintext);

    let tag = cipher
        .encrypt_inout_detached(&nonce, aad, InOutBuf::from(buf.as_mut_slice()))
        .map_err(|_| VaultError::Encryption {
            message: "Encryption failed".into(),
            context: Some("AEAD encryption failed".into()),
        })?;

    buf.extend_from_slice(tag.as_slice());
    Ok(SecretPackage { data: buf, iv: nonce.to_vec() })
}

fn open<C: VaultCipher>(cipher: &C, package: &SecretPackage, aad: &[u8]) -> Result<Vec<u8>, VaultError> {
    if package.iv.len() != NONCE_LEN || package.data.len() < TAG_LEN {
        return Err(VaultError::InvalidPayload {
            message: format!(
                "Malformed package (iv {} bytes, data {} bytes)",
                package.iv.len(),
                package.data.len()
            )
            .into(),
            context: None,
        });
    }

    let (ciphertext, tag_slice) = package.data.split_at(package.data.len() - TAG_LEN);

    let nonce: Nonce<C> = package.iv.as_slice().try_into().map_err(|_| VaultError::Decryption {
        message: "Invalid nonce length".into(),
        context: None,
    })?;
    let tag: Tag<C> = tag_slice.try_into().map_err(|_| VaultError::Decryption {
        message: "Invalid tag length".into(),
        context: None,
    })?;

    let mut buf = ciphertext.to_vec();

    if cipher.decrypt_inout_detached(&nonce, aad, InOutBuf::from(buf.as_mut_slice()), &tag).is_err() {
        buf.zeroize();
        return Err(VaultError::Decryption {
            message: "Decryption failed".into(),
            context: Some("AEAD authentication failed".into()),
        });
    }

    Ok(buf)
}
