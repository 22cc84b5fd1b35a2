mod fixtures;

use fixtures::setup_vault;
use proptest::prelude::*;

proptest! {
    // Each case runs PBKDF2 several times at full strength.
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn roundtrip_arbitrary_secrets(
        secret in "\\PC{0,256}",
        passphrase in "\\PC{0,64}",
    ) {
        let (vault, _) = setup_vault();

        vault.store_secret(&secret, &passphrase).unwrap();
        let restored = vault.retrieve_secret(&passphrase);

        prop_assert_eq!(restored.as_ref().map(|s| s.expose()), Some(secret.as_str()));
    }

    #[test]
    fn other_passphrases_never_open(
        passphrase in "[a-z]{8,24}",
        other in "[A-Z0-9]{8,24}",
    ) {
        let (vault, _) = setup_vault();

        vault.store_secret("sk-property-credential-000000", &passphrase).unwrap();

        prop_assert!(vault.retrieve_secret(&other).is_none());
    }
}
