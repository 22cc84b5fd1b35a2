//! Passphrase key derivation and salt generation.

use crate::error::VaultError;
use crate::types::KEY_LEN;
use getrandom::fill;
use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::Zeroizing;

/// Derives a 256-bit key from `passphrase` with PBKDF2-HMAC-SHA256.
///
/// The result is deterministic for the same inputs and is wiped from memory on drop.
#[must_use]
pub fn derive_key(passphrase: &[u8], salt: &[u8], iterations: u32) -> Zeroizing<[u8; KEY_LEN]> {
    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    pbkdf2_hmac::<Sha256>(passphrase, salt, iterations, &mut key[..]);
    key
}

/// Draws `len` bytes from the system CSPRNG.
///
/// # Errors
/// Returns [`VaultError::Encryption`] if the system random source is unavailable.
pub fn generate_salt(len: usize) -> Result<Vec<u8>, VaultError> {
    let mut salt = vec![0u8; len];
    fill(&mut salt).map_err(|e| VaultError::Encryption {
        message: format!("System RNG unavailable: {e}").into(),
        context: Some("salt generation".into()),
    })?;
    Ok(salt)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FAST: u32 = 1_000;

    #[test]
    fn derivation_is_deterministic() {
        let a = derive_key(b"correct horse", b"salt-salt-salt-1", FAST);
        let b = derive_key(b"correct horse", b"salt-salt-salt-1", FAST);
        assert_eq!(*a, *b);
    }

    #[test]
    fn salt_and_passphrase_both_matter() {
        let base = derive_key(b"correct horse", b"salt-salt-salt-1", FAST);
        assert_ne!(*base, *derive_key(b"correct horse", b"salt-salt-salt-2", FAST));
        assert_ne!(*base, *derive_key(b"correct horsf", b"salt-salt-salt-1", FAST));
    }

    #[test]
    fn salts_are_random() {
        let a = generate_salt(16).unwrap();
        let b = generate_salt(16).unwrap();
        assert_eq!(a.len(), 16);
        assert_ne!(a, b);
    }
}
