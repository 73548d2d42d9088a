//! Where command output ends up.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::errors::{LineRefError, Result};

/// Hidden `lineref` subcommand that reads text on stdin and serves it as the
/// clipboard selection until another application replaces it.
pub const SERVE_CLIPBOARD_COMMAND: &str = "serve-clipboard";

pub trait ClipboardSink {
    /// # Errors
    ///
    /// Returns `Clipboard` when the text could not be delivered.
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// The desktop clipboard, set in-process.
///
/// On X11 and Wayland the selection is served by the process that set it and is
/// lost once this value is dropped, unless a clipboard manager copies it first.
/// Short-lived callers on Linux hand the text to [`HandoffClipboard`] instead.
#[cfg(feature = "clipboard")]
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

#[cfg(feature = "clipboard")]
impl SystemClipboard {
    /// # Errors
    ///
    /// Returns `Clipboard` when no clipboard is reachable (e.g. no display).
    pub fn new() -> Result<Self> {
        let inner = arboard::Clipboard::new().map_err(|e| LineRefError::Clipboard(e.to_string()))?;
        Ok(Self { inner })
    }
}

#[cfg(feature = "clipboard")]
impl ClipboardSink for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        self.inner
            .set_text(text.to_string())
            .map_err(|e| LineRefError::Clipboard(e.to_string()))
    }
}

/// Serves `text` as the clipboard selection, blocking until another application
/// takes the selection over. This is what the helper process runs.
///
/// # Errors
///
/// Returns `Clipboard` when no clipboard is reachable.
#[cfg(all(feature = "clipboard", target_os = "linux"))]
pub fn serve_selection(text: &str) -> Result<()> {
    use arboard::SetExtLinux;

    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| LineRefError::Clipboard(e.to_string()))?;
    clipboard
        .set()
        .wait()
        .text(text.to_string())
        .map_err(|e| LineRefError::Clipboard(e.to_string()))
}

/// Outside Linux the system keeps the clipboard contents after the owner exits.
///
/// # Errors
///
/// Returns `Clipboard` when no clipboard is reachable.
#[cfg(all(feature = "clipboard", not(target_os = "linux")))]
pub fn serve_selection(text: &str) -> Result<()> {
    SystemClipboard::new()?.write_text(text)
}

/// Passes the text on stdin to a detached helper process, which keeps owning the
/// selection after the caller exits. The helper is started as
/// `{program} serve-clipboard` in its own process group and is not waited on.
pub struct HandoffClipboard {
    program: PathBuf,
}

impl HandoffClipboard {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl ClipboardSink for HandoffClipboard {
    // The helper outlives this process, so it is never waited on.
    #[allow(clippy::zombie_processes)]
    fn write_text(&mut self, text: &str) -> Result<()> {
        let clipboard_err = |e: std::io::Error| LineRefError::Clipboard(e.to_string());

        let mut command = Command::new(&self.program);
        command
            .arg(SERVE_CLIPBOARD_COMMAND)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            command.process_group(0);
        }

        let mut child = command.spawn().map_err(clipboard_err)?;
        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| LineRefError::Clipboard("clipboard helper has no stdin".to_string()))?;
        stdin.write_all(text.as_bytes()).map_err(clipboard_err)?;
        Ok(())
    }
}

/// Prints the text followed by a newline, for piping.
pub struct StdoutSink<W: Write> {
    out: W,
}

impl<W: Write> StdoutSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> ClipboardSink for StdoutSink<W> {
    fn write_text(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{text}")
            .and_then(|()| self.out.flush())
            .map_err(|e| LineRefError::Clipboard(e.to_string()))
    }
}

/// Keeps everything written, newest last.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    pub writes: Vec<String>,
}

impl MemoryClipboard {
    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.writes.last().map(String::as_str)
    }
}

impl ClipboardSink for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        self.writes.push(text.to_string());
        Ok(())
    }
}
