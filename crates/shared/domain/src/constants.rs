//! Default values shared by the configuration schema and the feature crates.

/// Storage key holding the encrypted credential package.
pub const SECRET_PACKAGE_KEY: &str = "encrypted_api_key";
/// Storage key holding the key-derivation salt.
pub const SALT_KEY: &str = "encryption_salt";
/// Storage key holding the security log.
pub const SECURITY_LOG_KEY: &str = "security_log";

/// Minimum accepted PBKDF2 iteration count.
pub const MIN_KDF_ITERATIONS: u32 = 100_000;
/// Salt length in bytes.
pub const SALT_LEN: usize = 16;

pub const MAX_MESSAGE_CHARS: usize = 4000;
pub const MAX_CREDENTIAL_CHARS: usize = 200;
pub const MIN_CREDENTIAL_CHARS: usize = 20;
pub const CREDENTIAL_PREFIX: &str = "sk-";

pub const THROTTLE_WINDOW_SECS: u64 = 60;
pub const THROTTLE_MAX_REQUESTS: usize = 10;

pub const SECURITY_LOG_CAPACITY: usize = 50;
pub const CLIENT_ID_MAX_CHARS: usize = 100;

/// Largest accepted throttle cap.
pub const THROTTLE_MAX_REQUESTS_LIMIT: usize = 10_000;
/// Longest accepted throttle window (one day).
pub const THROTTLE_WINDOW_SECS_LIMIT: u64 = 86_400;
