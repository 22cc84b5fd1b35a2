use crate::console::Console;
use anyhow::{Result, bail};
use jobchat::features::assistant::{ChatSession, CompletionProvider};
use std::io::Write;
use tokio::io::AsyncBufRead;

/// Reads an API key and a passphrase, then stores the key encrypted.
///
/// # Errors
/// Fails when input ends early or the session rejects the key or passphrase.
pub async fn configure<P, R, W>(session: &mut ChatSession<P>, console: &mut Console<R, W>) -> Result<()>
where
    P: CompletionProvider,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let Some(candidate) = console.prompt("API key: ").await? else {
        bail!("No API key entered");
    };
    let Some(passphrase) = console.prompt("Passphrase: ").await? else {
        bail!("No passphrase entered");
    };

    session.configure_credentials(&candidate, &passphrase)?;
    console.say("API key saved")?;
    Ok(())
}

/// Reports whether an encrypted key is stored.
///
/// # Errors
/// Fails only when the output cannot be written.
pub fn status<P, R, W>(session: &ChatSession<P>, console: &mut Console<R, W>) -> Result<()>
where
    P: CompletionProvider,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    if session.has_stored_credentials() {
        console.say("API key stored")?;
    } else {
        console.say("No API key stored")?;
    }
    Ok(())
}

/// Erases the stored key.
///
/// # Errors
/// Fails when the stored records cannot be removed.
pub fn clear<P, R, W>(session: &mut ChatSession<P>, console: &mut Console<R, W>) -> Result<()>
where
    P: CompletionProvider,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    session.forget_credentials()?;
    console.say("Stored API key cleared")?;
    Ok(())
}
