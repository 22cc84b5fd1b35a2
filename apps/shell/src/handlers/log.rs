use crate::console::Console;
use anyhow::{Context, Result};
use jobchat::features::audit::SecurityLog;
use jobchat::storage::KeyValueStore;
use std::io::Write;
use tokio::io::AsyncBufRead;

/// Prints the security log oldest first, one JSON object per line, or erases it.
///
/// # Errors
/// Fails when the log cannot be cleared or the output cannot be written.
pub fn log<S, R, W>(audit: &SecurityLog<S>, clear: bool, console: &mut Console<R, W>) -> Result<()>
where
    S: KeyValueStore,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    if clear {
        audit.clear().context("Failed to clear the security log")?;
        console.say("Security log cleared")?;
        return Ok(());
    }

    for entry in audit.entries() {
        console.say(serde_json::to_string(&entry)?)?;
    }
    Ok(())
}
