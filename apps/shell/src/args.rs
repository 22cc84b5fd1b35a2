//! # CLI Argument Definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// The main CLI structure parsing command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "jobchat")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Chat about job descriptions with an LLM, keeping the API key encrypted at rest")]
pub struct Cli {
    /// Configuration file (TOML); `JOBCHAT__*` environment variables still apply
    #[arg(short, long, env = "JOBCHAT_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level regardless of the configured level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: AppCommands,
}

/// Enumeration of available subcommands.
///
/// Secrets are read line by line from stdin, never from arguments.
#[derive(Debug, Subcommand)]
pub enum AppCommands {
    /// Store an API key, encrypted with a passphrase (reads key, then passphrase)
    Configure {},
    /// Unlock the stored key and chat (reads passphrase, then one message per line)
    Chat {},
    /// Show whether an API key is stored
    Status {},
    /// Erase the stored API key
    Clear {},
    /// Print the security log as JSON lines
    Log {
        /// Erase the security log instead of printing it
        #[arg(long)]
        clear: bool,
    },
}
