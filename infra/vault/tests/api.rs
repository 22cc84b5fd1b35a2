mod fixtures;

use fixtures::{CREDENTIAL, PASSPHRASE, setup_vault};
use jobchat_domain::constants::{SALT_KEY, SALT_LEN, SECRET_PACKAGE_KEY};
use jobchat_storage::{KeyValueStore, MemoryStore};
use jobchat_vault::prelude::*;
use jobchat_vault::{NONCE_LEN, SecretPackage, TAG_LEN};
use std::sync::Arc;

fn stored_package(store: &MemoryStore) -> SecretPackage {
    let raw = store.get(SECRET_PACKAGE_KEY).unwrap().expect("package present");
    serde_json::from_str(&raw).expect("package is JSON")
}

fn stored_salt(store: &MemoryStore) -> Vec<u8> {
    let raw = store.get(SALT_KEY).unwrap().expect("salt present");
    serde_json::from_str(&raw).expect("salt is a JSON byte array")
}

#[test]
fn test_store_then_retrieve() {
    let (vault, _) = setup_vault();

    vault.store_secret(CREDENTIAL, PASSPHRASE).unwrap();
    let secret = vault.retrieve_secret(PASSPHRASE).expect("correct passphrase opens the vault");

    assert_eq!(secret.expose(), CREDENTIAL);
}

#[test]
fn test_wrong_passphrase_yields_none() {
    let (vault, _) = setup_vault();

    vault.store_secret(CREDENTIAL, PASSPHRASE).unwrap();

    assert!(vault.retrieve_secret("correct horse battery stapler").is_none());
    assert!(vault.retrieve_secret("").is_none());
}

#[test]
fn test_empty_vault_yields_none() {
    let (vault, _) = setup_vault();

    assert!(!vault.has_stored_secret());
    assert!(vault.retrieve_secret(PASSPHRASE).is_none());
}

#[test]
fn test_empty_passphrase_roundtrips() {
    let (vault, _) = setup_vault();

    vault.store_secret(CREDENTIAL, "").unwrap();

    assert_eq!(vault.retrieve_secret("").expect("empty passphrase opens").expose(), CREDENTIAL);
    assert!(vault.retrieve_secret(PASSPHRASE).is_none());
}

#[test]
fn test_records_have_expected_shape() {
    let (vault, store) = setup_vault();

    vault.store_secret(CREDENTIAL, PASSPHRASE).unwrap();

    let package = stored_package(&store);
    assert_eq!(package.iv.len(), NONCE_LEN);
    assert_eq!(package.data.len(), CREDENTIAL.len() + TAG_LEN);
    assert_eq!(stored_salt(&store).len(), SALT_LEN);

    let raw = store.get(SECRET_PACKAGE_KEY).unwrap().unwrap();
    assert!(!raw.contains(CREDENTIAL));
}

#[test]
fn test_salt_is_stable_and_nonce_is_fresh() {
    let (vault, store) = setup_vault();

    vault.store_secret(CREDENTIAL, PASSPHRASE).unwrap();
    let first_salt = stored_salt(&store);
    let first_package = stored_package(&store);

    vault.store_secret(CREDENTIAL, PASSPHRASE).unwrap();
    let second_package = stored_package(&store);

    assert_eq!(stored_salt(&store), first_salt);
    assert_ne!(first_package.iv, second_package.iv);
    assert_ne!(first_package.data, second_package.data);
}

#[test]
fn test_restore_with_new_passphrase_replaces_old() {
    let (vault, _) = setup_vault();

    vault.store_secret(CREDENTIAL, PASSPHRASE).unwrap();
    vault.store_secret("sk-replacement-credential-000", "new passphrase").unwrap();

    assert!(vault.retrieve_secret(PASSPHRASE).is_none());
    assert_eq!(
        vault.retrieve_secret("new passphrase").unwrap().expose(),
        "sk-replacement-credential-000"
    );
}

#[test]
fn test_tampered_ciphertext_yields_none() {
    let (vault, store) = setup_vault();
    vault.store_secret(CREDENTIAL, PASSPHRASE).unwrap();

    let mut package = stored_package(&store);
    package.data[0] ^= 0x01;
    store.set(SECRET_PACKAGE_KEY, &serde_json::to_string(&package).unwrap()).unwrap();

    assert!(vault.retrieve_secret(PASSPHRASE).is_none());
}

#[test]
fn test_garbage_records_yield_none() {
    let (vault, store) = setup_vault();
    vault.store_secret(CREDENTIAL, PASSPHRASE).unwrap();

    store.set(SECRET_PACKAGE_KEY, "not json").unwrap();
    assert!(vault.has_stored_secret());
    assert!(vault.retrieve_secret(PASSPHRASE).is_none());
}

#[test]
fn test_unreadable_salt_is_replaced_on_store() {
    let (vault, store) = setup_vault();
    store.set(SALT_KEY, "{broken").unwrap();

    vault.store_secret(CREDENTIAL, PASSPHRASE).unwrap();

    assert_eq!(stored_salt(&store).len(), SALT_LEN);
    assert_eq!(vault.retrieve_secret(PASSPHRASE).unwrap().expose(), CREDENTIAL);
}

#[test]
fn test_clear_removes_both_records() {
    let (vault, store) = setup_vault();
    vault.store_secret(CREDENTIAL, PASSPHRASE).unwrap();
    let old_salt = stored_salt(&store);

    vault.clear_stored_credentials().unwrap();
    vault.clear_stored_credentials().unwrap();

    assert!(!vault.has_stored_secret());
    assert!(!store.contains(SALT_KEY).unwrap());
    assert!(vault.retrieve_secret(PASSPHRASE).is_none());

    vault.store_secret(CREDENTIAL, PASSPHRASE).unwrap();
    assert_ne!(stored_salt(&store), old_salt);
}

#[test]
fn test_clones_share_state() {
    let (vault, _) = setup_vault();
    let clone = vault.clone();

    vault.store_secret(CREDENTIAL, PASSPHRASE).unwrap();

    assert!(clone.has_stored_secret());
    assert_eq!(clone.retrieve_secret(PASSPHRASE).unwrap().expose(), CREDENTIAL);
}

#[test]
fn test_cipher_mismatch_yields_none() {
    let store = Arc::new(MemoryStore::new());
    let aes = CredentialVault::<Aes>::builder().store(Arc::clone(&store)).build().unwrap();
    let chacha = CredentialVault::<ChaCha>::builder().store(Arc::clone(&store)).build().unwrap();

    aes.store_secret(CREDENTIAL, PASSPHRASE).unwrap();

    assert!(chacha.retrieve_secret(PASSPHRASE).is_none());
    assert_eq!(aes.retrieve_secret(PASSPHRASE).unwrap().expose(), CREDENTIAL);
}

#[test]
fn test_custom_keys_isolate_vaults() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let primary = CredentialVault::<Aes>::builder().store(Arc::clone(&store)).build().unwrap();
    let secondary = CredentialVault::<Aes>::builder()
        .store(Arc::clone(&store))
        .keys("secondary_key", "secondary_salt")
        .build()
        .unwrap();

    primary.store_secret(CREDENTIAL, PASSPHRASE).unwrap();

    assert!(!secondary.has_stored_secret());

    // A package copied under another key is bound to its original slot.
    let raw = store.get(SECRET_PACKAGE_KEY).unwrap().unwrap();
    let salt = store.get(SALT_KEY).unwrap().unwrap();
    store.set("secondary_key", &raw).unwrap();
    store.set("secondary_salt", &salt).unwrap();

    assert!(secondary.retrieve_secret(PASSPHRASE).is_none());
}

#[test]
fn test_secret_debug_never_prints_plaintext() {
    let (vault, _) = setup_vault();
    vault.store_secret(CREDENTIAL, PASSPHRASE).unwrap();

    let secret = vault.retrieve_secret(PASSPHRASE).unwrap();

    assert!(!format!("{secret:?}").contains(CREDENTIAL));
    assert!(!format!("{vault:?}").contains(CREDENTIAL));
}
