//! lineref - copy a file reference, optionally with code or an AI summary.
//!
//! Every command reads the focused document and its selection, builds one of a
//! few fixed templates and hands the text to a clipboard sink:
//!
//! - `src/lib.rs` (bare cursor on a blank line)
//! - `src/lib.rs#L10` / `src/lib.rs#L10-13`
//! - the location followed by a fenced code block
//! - `{src/lib.rs LINE(10::13) [one-line summary]}` with the summary written by a
//!   local Ollama server
//!
//! # Architecture
//!
//! - `editor` holds the host-facing traits (document, project roots) so the
//!   formatters never depend on a live editor
//! - `format` turns those into location strings and code blocks
//! - `ai` talks to Ollama through reqwest
//! - `features` wires them into the seven user commands
//!
//! # Example
//!
//! ```no_run
//! use lineref::ai::OllamaClient;
//! use lineref::core::config::EnvConfig;
//! use lineref::editor::{ActiveEditor, Selection, TextDocument, WorkspaceRoots};
//! use lineref::features::{Command, CommandContext, execute};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     lineref::setup_logging();
//!
//!     let document = TextDocument::new("/work/app/src/main.rs", "rust", "fn main() {}\n");
//!     let roots = WorkspaceRoots::new(["/work/app"]);
//!     let client = OllamaClient::new();
//!     let ctx = CommandContext {
//!         editor: Some(ActiveEditor::new(&document, Selection::cursor(0, 0))),
//!         roots: &roots,
//!         config: &EnvConfig,
//!         summarizer: &client,
//!     };
//!
//!     match execute(Command::CopyPath, &ctx).await {
//!         Ok(output) => println!("{}", output.text), // src/main.rs#L1
//!         Err(failure) => eprintln!("{}", failure.message),
//!     }
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod ai;
pub mod clipboard;
pub mod core;
pub mod editor;
pub mod errors;
pub mod features;
pub mod format;

pub use errors::LineRefError;

/// Configure structured logging with JSON format.
///
/// Logs go to stderr so stdout stays free for command output. The level comes
/// from `RUST_LOG` and defaults to `warn`. Calling it more than once is harmless.
///
/// # Example
///
/// ```
/// lineref::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_target(true)
        .with_writer(std::io::stderr);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
