use jobchat_domain::constants::CREDENTIAL_PREFIX;

/// A well-formed credential of exactly `len` characters.
#[must_use]
pub fn credential_of_len(len: usize) -> String {
    let body = "x".repeat(len.saturating_sub(CREDENTIAL_PREFIX.len()));
    format!("{CREDENTIAL_PREFIX}{body}")
}
