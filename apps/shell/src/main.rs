//! # jobchat
//!
//! Terminal front end: configure an encrypted API key, then chat about job descriptions.
//! Replies go to stdout; logs go to stderr and, when `logging.directory` is set, to
//! rolling files.

pub mod args;
pub mod console;
pub mod handlers;

use crate::args::{AppCommands, Cli};
use crate::console::Console;
use crate::handlers::{chat, credentials, log};
use anyhow::{Context, Result};
use clap::Parser;
use jobchat::domain::config::LoggingConfig;
use jobchat::features::audit::default_client_id;
use jobchat::kernel::config::load_app_config;
use jobchat::{Components, open_store};
use jobchat_logger::{LevelFilter, Logger, parse_level};
use tracing::debug;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_app_config(cli.config.as_deref()).context("Failed to load configuration")?;
    let _logger = init_logger(&config.logging, cli.verbose)?;

    let store = open_store(&config)?;
    let components = Components::from_config(&config, store, &default_client_id())?;
    let mut session = components.http_session()?;
    let mut console = Console::stdio();

    debug!(command = ?cli.command, "Dispatching");

    match cli.command {
        AppCommands::Configure {} => credentials::configure(&mut session, &mut console).await?,
        AppCommands::Chat {} => chat::chat(&mut session, &mut console).await?,
        AppCommands::Status {} => credentials::status(&session, &mut console)?,
        AppCommands::Clear {} => credentials::clear(&mut session, &mut console)?,
        AppCommands::Log { clear } => log::log(session.audit(), clear, &mut console)?,
    }

    Ok(())
}

fn init_logger(settings: &LoggingConfig, verbose: bool) -> Result<Logger> {
    let level = if verbose { LevelFilter::DEBUG } else { parse_level(&settings.level)? };

    let mut builder = Logger::builder().name(env!("CARGO_BIN_NAME")).console(true).level(level);
    if let Some(filter) = &settings.filter {
        builder = builder.env_filter(filter.clone());
    }

    let logger = match &settings.directory {
        Some(directory) => builder
            .path(directory)
            .json(settings.json)
            .security_trail(settings.security_trail)
            .init()?,
        None => builder.init()?,
    };
    Ok(logger)
}
