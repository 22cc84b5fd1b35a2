//! Line-oriented terminal I/O.

use std::fmt::Display;
use std::io::{self, Stdout, Write};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};

/// Reads input lines and writes replies.
///
/// Generic over both ends so handlers can be driven from byte slices in tests.
#[derive(Debug)]
pub struct Console<R, W> {
    lines: Lines<R>,
    out: W,
}

impl Console<BufReader<Stdin>, Stdout> {
    /// A console over the process stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), io::stdout())
    }
}

impl<R: AsyncBufRead + Unpin, W: Write> Console<R, W> {
    pub fn new(reader: R, out: W) -> Self {
        Self { lines: reader.lines(), out }
    }

    /// Writes `label` without a newline and reads the next line.
    ///
    /// Returns `None` at end of input. The trailing line break is stripped.
    pub async fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.out, "{label}")?;
        self.out.flush()?;
        self.read_line().await
    }

    pub async fn read_line(&mut self) -> io::Result<Option<String>> {
        Ok(self.lines.next_line().await?.map(|line| line.trim_end_matches('\r').to_owned()))
    }

    pub fn say(&mut self, text: impl Display) -> io::Result<()> {
        writeln!(self.out, "{text}")
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.out
    }
}
