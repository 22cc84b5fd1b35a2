//! # Logger
//!
//! `tracing` setup for the jobchat binaries.
//!
//! Three sinks can be combined:
//! * **console**: compact human-readable lines on stderr, so stdout stays free for replies;
//! * **application file**: every event that passes the level filter, in a rolling file
//!   named after the logger (`jobchat.2026-10-18.log`), optionally as JSON lines;
//! * **security trail**: only events on the [`SECURITY_TARGET`] target, always JSON, in
//!   a rolling file of its own (`jobchat-security.2026-10-18.log`).
//!
//! File sinks write through non-blocking workers; the returned [`Logger`] owns their
//! guards. `RUST_LOG` applies unless an explicit filter is set with
//! [`LoggerBuilder::env_filter`].
//!
//! ## Example
//!
//! ```rust
//! # use jobchat_logger::{Logger, LevelFilter};
//!
//! let _logger = Logger::builder()
//!     .name("jobchat")
//!     .console(true)
//!     .level(LevelFilter::DEBUG)
//!     .init()
//!     .unwrap();
//! ```

mod error;

pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;

use private::Sealed;
use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Target used by the feature crates for security-relevant events.
pub const SECURITY_TARGET: &str = "security";

const DEFAULT_MAX_FILES: usize = 7;
const LOG_FILE_SUFFIX: &str = "log";
const SECURITY_FILE_SUFFIX: &str = "-security";

type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync + 'static>;

#[derive(Debug)]
struct Settings {
    console: bool,
    ansi: bool,
    level: LevelFilter,
    env_filter: Option<String>,
    files: Option<FileSettings>,
}

#[derive(Debug)]
struct FileSettings {
    directory: PathBuf,
    rotation: Rotation,
    max_files: usize,
    json: bool,
    security_trail: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self { console: true, ansi: true, level: LevelFilter::INFO, env_filter: None, files: None }
    }
}

#[derive(Debug)]
pub struct NoName;
#[derive(Debug)]
pub struct WithName(String);
#[derive(Debug)]
pub struct NoFile;
#[derive(Debug)]
pub struct WithFile;

mod private {
    pub trait Sealed {}
}
impl Sealed for NoName {}
impl Sealed for WithName {}
impl Sealed for NoFile {}
impl Sealed for WithFile {}

/// Typestate builder for the global tracing subscriber.
///
/// A name is required before [`init`](LoggerBuilder::init); file options only become
/// available after [`path`](LoggerBuilder::path).
#[derive(Debug)]
pub struct LoggerBuilder<N: Sealed = NoName, F: Sealed = NoFile> {
    settings: Settings,
    name: N,
    _files: PhantomData<F>,
}

impl<F: Sealed> LoggerBuilder<NoName, F> {
    /// Sets the logger name, which is also the rolling file prefix.
    pub fn name(self, name: impl Into<String>) -> LoggerBuilder<WithName, F> {
        LoggerBuilder { settings: self.settings, name: WithName(name.into()), _files: PhantomData }
    }
}

impl<F: Sealed> LoggerBuilder<WithName, F> {
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.settings.level = level;
        self
    }

    /// Replaces `RUST_LOG` with an explicit filter (e.g., `jobchat_vault=debug,security=info`).
    ///
    /// Invalid filters make [`LoggerBuilder::init`] fail.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn env_filter(mut self, filter: impl Into<String>) -> Self {
        self.settings.env_filter = Some(filter.into());
        self
    }

    /// Console output on stderr.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn console(mut self, enabled: bool) -> Self {
        self.settings.console = enabled;
        self
    }

    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn ansi(mut self, enabled: bool) -> Self {
        self.settings.ansi = enabled;
        self
    }
}

impl LoggerBuilder<WithName, NoFile> {
    /// Enables rolling log files in `directory`, created on [`init`](LoggerBuilder::init).
    ///
    /// The security trail is on by default once files are enabled.
    pub fn path(self, directory: impl Into<PathBuf>) -> LoggerBuilder<WithName, WithFile> {
        let mut settings = self.settings;
        settings.files = Some(FileSettings {
            directory: directory.into(),
            rotation: Rotation::DAILY,
            max_files: DEFAULT_MAX_FILES,
            json: false,
            security_trail: true,
        });
        LoggerBuilder { settings, name: self.name, _files: PhantomData }
    }
}

impl LoggerBuilder<WithName, WithFile> {
    fn files(&mut self) -> Option<&mut FileSettings> {
        self.settings.files.as_mut()
    }

    /// Rotated files kept per sink.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn max_files(mut self, max: usize) -> Self {
        if let Some(files) = self.files() {
            files.max_files = max;
        }
        self
    }

    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn rotation(mut self, rotation: Rotation) -> Self {
        if let Some(files) = self.files() {
            files.rotation = rotation;
        }
        self
    }

    /// Writes the application file as JSON lines. The security trail is always JSON.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn json(mut self, enabled: bool) -> Self {
        if let Some(files) = self.files() {
            files.json = enabled;
        }
        self
    }

    /// Mirrors [`SECURITY_TARGET`] events into a separate `<name>-security` file.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn security_trail(mut self, enabled: bool) -> Self {
        if let Some(files) = self.files() {
            files.security_trail = enabled;
        }
        self
    }
}

impl<F: Sealed> LoggerBuilder<WithName, F> {
    /// Installs the global tracing subscriber.
    ///
    /// Keep the returned [`Logger`] alive until shutdown so buffered file output is
    /// flushed.
    ///
    /// # Errors
    /// * [`LoggerError::InvalidConfiguration`] for a blank name, zero `max_files`, an
    ///   invalid filter, or when every sink is disabled.
    /// * [`LoggerError::Internal`] if the log directory cannot be created.
    /// * [`LoggerError::Appender`] if a rolling file cannot be opened.
    /// * [`LoggerError::Subscriber`] if a global subscriber is already installed.
    pub fn init(self) -> Result<Logger, LoggerError> {
        let name = self.name.0;
        validate(&self.settings, &name)?;

        let env_filter = build_env_filter(&self.settings)?;
        let mut layers: Vec<BoxedLayer<_>> = Vec::new();
        let mut guards = Vec::new();

        if self.settings.console {
            layers.push(
                layer()
                    .compact()
                    .with_writer(std::io::stderr)
                    .with_ansi(self.settings.ansi)
                    .boxed(),
            );
        }

        if let Some(files) = &self.settings.files {
            create_directory(&files.directory)?;

            let (layer, guard) = application_layer(files, &name)?;
            layers.push(layer);
            guards.push(guard);

            if files.security_trail {
                let (layer, guard) = security_layer(files, &name)?;
                layers.push(layer);
                guards.push(guard);
            }
        }

        tracing_subscriber::registry().with(env_filter).with(layers).try_init()?;

        Ok(Logger { guards })
    }
}

/// Handle to the installed logging system.
///
/// Owns the background writer guards of the file sinks.
#[must_use = "Dropping this handle will stop background logging threads."]
#[derive(Debug)]
pub struct Logger {
    guards: Vec<WorkerGuard>,
}

impl Logger {
    /// Returns a new [`LoggerBuilder`].
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder { settings: Settings::default(), name: NoName, _files: PhantomData }
    }

    /// Number of file sinks with a background writer.
    #[must_use]
    pub const fn file_sinks(&self) -> usize {
        self.guards.len()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if !self.guards.is_empty() {
            tracing::debug!(sinks = self.guards.len(), "Flushing log files");
        }
    }
}

/// Parses a textual level (`"info"`, `"debug"`, `"off"`, ...).
///
/// # Errors
/// Returns [`LoggerError::InvalidConfiguration`] for unknown level names.
pub fn parse_level(level: &str) -> Result<LevelFilter, LoggerError> {
    level.trim().parse::<LevelFilter>().map_err(|e| LoggerError::InvalidConfiguration {
        message: format!("Unknown log level '{level}': {e}").into(),
        context: None,
    })
}

fn validate(settings: &Settings, name: &str) -> Result<(), LoggerError> {
    if name.trim().is_empty() {
        return Err(LoggerError::InvalidConfiguration {
            message: "Logger name cannot be empty".into(),
            context: None,
        });
    }

    if settings.files.as_ref().is_some_and(|files| files.max_files == 0) {
        return Err(LoggerError::InvalidConfiguration {
            message: "max_files must be greater than zero".into(),
            context: None,
        });
    }

    if !settings.console && settings.files.is_none() {
        return Err(LoggerError::InvalidConfiguration {
            message: "No logging sinks enabled. Enable console or file output.".into(),
            context: None,
        });
    }

    Ok(())
}

fn build_env_filter(settings: &Settings) -> Result<EnvFilter, LoggerError> {
    let builder = EnvFilter::builder().with_default_directive(settings.level.into());
    match &settings.env_filter {
        None => Ok(builder.from_env_lossy()),
        Some(filter) => builder.parse(filter).map_err(|e| LoggerError::InvalidConfiguration {
            message: format!("Invalid env filter '{filter}': {e}").into(),
            context: None,
        }),
    }
}

fn create_directory(directory: &Path) -> Result<(), LoggerError> {
    fs::create_dir_all(directory).map_err(|e| LoggerError::Internal {
        message: e.to_string().into(),
        context: Some(format!("Failed to create log directory {}", directory.display()).into()),
    })
}

fn rolling_appender(files: &FileSettings, prefix: &str) -> Result<RollingFileAppender, LoggerError> {
    let appender = RollingFileAppender::builder()
        .rotation(files.rotation.clone())
        .filename_prefix(prefix)
        .filename_suffix(LOG_FILE_SUFFIX)
        .max_log_files(files.max_files)
        .build(&files.directory)
        .context(format!("Opening {prefix} log in {}", files.directory.display()))?;
    Ok(appender)
}

fn application_layer<S>(files: &FileSettings, name: &str) -> Result<(BoxedLayer<S>, WorkerGuard), LoggerError>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let (writer, guard) = tracing_appender::non_blocking(rolling_appender(files, name)?);
    let base = layer().with_writer(writer).with_ansi(false);
    let layer = if files.json { base.json().boxed() } else { base.boxed() };
    Ok((layer, guard))
}

fn security_layer<S>(files: &FileSettings, name: &str) -> Result<(BoxedLayer<S>, WorkerGuard), LoggerError>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let prefix = format!("{name}{SECURITY_FILE_SUFFIX}");
    let (writer, guard) = tracing_appender::non_blocking(rolling_appender(files, &prefix)?);
    let layer = layer()
        .json()
        .with_writer(writer)
        .with_ansi(false)
        .with_filter(filter_fn(|meta| meta.target() == SECURITY_TARGET))
        .boxed();
    Ok((layer, guard))
}
