use config::{Config, Environment, File};
use jobchat_domain::config::AppConfig;
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment prefix for configuration overrides (`JOBCHAT__THROTTLE__MAX_REQUESTS=5`).
pub const ENV_PREFIX: &str = "JOBCHAT";

/// Base name of the configuration file looked up when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "jobchat";

/// Custom error type for config loading.
#[jobchat_derive::jobchat_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// A reusable configuration loader that combines file-based settings with environment overrides.
///
/// Layers, lowest priority first:
/// 1. **Defaults**: every section of the target type is expected to be `#[serde(default)]`.
/// 2. **Base File**: an explicit `path` must exist; without one, `jobchat.{toml,json,...}`
///    in the current directory is used when present and silently skipped otherwise.
/// 3. **Environment Overrides**: variables prefixed with `JOBCHAT__`, nested with double
///    underscores (e.g., `JOBCHAT__ASSISTANT__MODEL` maps to `assistant.model`).
///
/// # Errors
/// Returns [`ConfigError::Config`] if an explicit file is missing, a source is malformed,
/// or the merged values do not match `T`.
///
/// # Example
/// ```rust
/// use jobchat_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct LocalConfig {
///     port: u16,
/// }
///
/// let cfg: LocalConfig = load_config(Some("config/local")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let required = path.is_some();
    let effective_path =
        path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), |p| p.as_ref().to_path_buf());

    let builder = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(required))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .convert_case(config::Case::Snake),
        );

    info!(path = %effective_path.display(), required, "Loading configuration");

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}

/// Loads the workspace [`AppConfig`]; see [`load_config`] for the layering rules.
///
/// # Errors
/// Same as [`load_config`].
pub fn load_app_config(path: Option<impl AsRef<Path>>) -> Result<AppConfig, ConfigError> {
    load_config(path)
}
