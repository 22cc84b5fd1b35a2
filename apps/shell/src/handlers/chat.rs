use crate::console::Console;
use anyhow::{Result, bail};
use jobchat::features::assistant::{ChatSession, CompletionProvider};
use std::io::Write;
use tokio::io::AsyncBufRead;
use tracing::debug;

/// Ends the chat loop.
pub const QUIT_COMMAND: &str = "/quit";

/// Unlocks the stored key and answers one message per input line until EOF or `/quit`.
///
/// # Errors
/// Fails when no key is stored, the passphrase is wrong, or I/O fails. Per-message
/// failures are printed as replies and do not end the loop.
pub async fn chat<P, R, W>(session: &mut ChatSession<P>, console: &mut Console<R, W>) -> Result<()>
where
    P: CompletionProvider,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    if !session.has_stored_credentials() {
        bail!("No API key stored. Run `jobchat configure` first.");
    }

    let Some(passphrase) = console.prompt("Passphrase: ").await? else {
        bail!("No passphrase entered");
    };
    session.unlock(&passphrase)?;
    console.say(format!("Unlocked. Paste a job description or ask a question; {QUIT_COMMAND} exits."))?;

    let mut exchanged = 0usize;
    while let Some(line) = console.prompt("> ").await? {
        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        if message == QUIT_COMMAND {
            break;
        }

        let reply = session.respond(message).await;
        console.say(reply)?;
        exchanged += 1;
    }

    session.lock();
    debug!(exchanged, "Chat finished");
    Ok(())
}
