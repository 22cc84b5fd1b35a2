use aead::{AeadInOut, KeyInit};
use aes_gcm::Aes256Gcm;
use chacha20poly1305::ChaCha20Poly1305;
use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::Zeroizing;

// --- Aliases ---

pub type Aes = Aes256Gcm;
pub type ChaCha = ChaCha20Poly1305;

pub trait VaultCipher: AeadInOut + KeyInit + 'static {}
impl<T: AeadInOut + KeyInit + 'static> VaultCipher for T {}

// --- Format constants ---

/// Derived key length (256-bit).
pub const KEY_LEN: usize = 32;

/// AEAD nonce length (96-bit).
pub const NONCE_LEN: usize = 12;

/// AEAD tag length (128-bit), appended to the ciphertext in [`SecretPackage::data`].
pub const TAG_LEN: usize = 16;

// --- Records ---

/// The secret-at-rest record.
///
/// Serialized as `{"data": [..], "iv": [..]}` where `data` is the ciphertext followed by
/// the authentication tag and `iv` is the 12-byte nonce drawn for this encryption.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretPackage {
    pub data: Vec<u8>,
    pub iv: Vec<u8>,
}

impl fmt::Debug for SecretPackage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretPackage")
            .field("data_len", &self.data.len())
            .field("iv", &self.iv)
            .finish()
    }
}

/// Storage keys used by the vault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    pub package: String,
    pub salt: String,
}

// --- Secret ---

/// A decrypted credential.
///
/// The plaintext lives in zeroizing memory and is never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(Zeroizing<String>);

impl Secret {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(Zeroizing::new(value.into()))
    }

    /// Returns the plaintext.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

impl From<String> for Secret {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}
