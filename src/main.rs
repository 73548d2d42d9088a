use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;
#[cfg(feature = "clipboard")]
use tracing::warn;

use lineref::ai::OllamaClient;
use lineref::clipboard::{ClipboardSink, SERVE_CLIPBOARD_COMMAND, StdoutSink};
use lineref::core::config::{self, EnvConfig, LayeredConfig, MapConfig, Settings};
use lineref::editor::{ActiveEditor, Document, Selection, TextDocument, WorkspaceRoots};
use lineref::features::{Command, CommandContext, execute_into};

#[derive(Debug, Parser)]
#[command(name = "lineref", version, about = "Copy file references with line numbers, code or an AI summary")]
struct Cli {
    #[command(subcommand)]
    command: CliCommand,

    /// Project root used for relative paths; repeat for several. Discovered from
    /// the file's ancestors when omitted.
    #[arg(long = "root", global = true)]
    roots: Vec<PathBuf>,

    /// Line `N` (cursor) or range `N-M`, 1-based. `N-N` on a blank line is a cursor.
    #[arg(long, global = true)]
    lines: Option<String>,

    /// Overrides `pathType` (relative or absolute).
    #[arg(long, global = true)]
    path_type: Option<String>,

    /// Overrides `ollamaEndpoint`.
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Overrides `ollamaModel`.
    #[arg(long, global = true)]
    model: Option<String>,

    /// Overrides `aiSummaryTimeout`, in milliseconds.
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Overrides `defaultSystemPrompt`.
    #[arg(long, global = true)]
    system_prompt: Option<String>,

    /// Print the result instead of copying it.
    #[arg(long, global = true)]
    stdout: bool,
}

#[derive(Debug, Args)]
struct Target {
    /// File to reference; without it there is no active document.
    file: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum CliCommand {
    /// Path in the configured style with a line anchor.
    Path(Target),
    /// Path with line anchor followed by the code.
    Code(Target),
    /// Absolute path.
    Absolute(Target),
    /// File name only.
    Filename(Target),
    /// Project-relative path without lines.
    Relative(Target),
    /// Project-relative path with a line anchor.
    WorkspaceRelative(Target),
    /// Path, lines and an AI summary of the code.
    Summary(Target),
    /// List the models installed on the Ollama server.
    Models,
    /// Own the clipboard selection for text read from stdin.
    #[command(name = SERVE_CLIPBOARD_COMMAND, hide = true)]
    ServeClipboard,
}

impl CliCommand {
    fn split(&self) -> Option<(Command, &Target)> {
        match self {
            CliCommand::Path(t) => Some((Command::CopyPath, t)),
            CliCommand::Code(t) => Some((Command::CopyPathWithCode, t)),
            CliCommand::Absolute(t) => Some((Command::CopyAbsolutePath, t)),
            CliCommand::Filename(t) => Some((Command::CopyFilename, t)),
            CliCommand::Relative(t) => Some((Command::CopyRelativePath, t)),
            CliCommand::WorkspaceRelative(t) => Some((Command::CopyWorkspaceRelativePath, t)),
            CliCommand::Summary(t) => Some((Command::CopyPathWithAiSummary, t)),
            CliCommand::Models | CliCommand::ServeClipboard => None,
        }
    }
}

fn overrides(cli: &Cli) -> MapConfig {
    let mut map = MapConfig::new();
    if let Some(v) = &cli.path_type {
        map.set(config::PATH_TYPE, v.as_str());
    }
    if let Some(v) = &cli.endpoint {
        map.set(config::OLLAMA_ENDPOINT, v.as_str());
    }
    if let Some(v) = &cli.model {
        map.set(config::OLLAMA_MODEL, v.as_str());
    }
    if let Some(v) = cli.timeout {
        map.set(config::AI_SUMMARY_TIMEOUT, v.to_string());
    }
    if let Some(v) = &cli.system_prompt {
        map.set(config::DEFAULT_SYSTEM_PROMPT, v.as_str());
    }
    map
}

fn workspace_roots(cli: &Cli, document: Option<&TextDocument>) -> WorkspaceRoots {
    if !cli.roots.is_empty() {
        return WorkspaceRoots::new(
            cli.roots
                .iter()
                .map(|r| fs::canonicalize(r).unwrap_or_else(|_| r.clone())),
        );
    }
    document
        .and_then(|doc| Path::new(doc.path()).parent().map(WorkspaceRoots::discover))
        .unwrap_or_default()
}

fn sink(to_stdout: bool) -> Box<dyn ClipboardSink> {
    if !to_stdout && let Some(clipboard) = system_clipboard() {
        return clipboard;
    }
    Box::new(StdoutSink::new(io::stdout()))
}

/// On Linux the selection dies with its owner, so the text goes to a helper copy of
/// this binary; elsewhere it is set in-process.
#[cfg(feature = "clipboard")]
fn system_clipboard() -> Option<Box<dyn ClipboardSink>> {
    let clipboard = match lineref::clipboard::SystemClipboard::new() {
        Ok(clipboard) => clipboard,
        Err(e) => {
            warn!("Clipboard unavailable, printing instead: {}", e);
            return None;
        }
    };
    if cfg!(target_os = "linux") {
        match std::env::current_exe() {
            Ok(exe) => return Some(Box::new(lineref::clipboard::HandoffClipboard::new(exe))),
            Err(e) => warn!("Cannot locate own executable, copying in-process: {}", e),
        }
    }
    Some(Box::new(clipboard))
}

#[cfg(feature = "clipboard")]
fn serve_clipboard() -> Result<ExitCode> {
    let text = io::read_to_string(io::stdin()).context("Cannot read clipboard text")?;
    lineref::clipboard::serve_selection(&text)?;
    Ok(ExitCode::SUCCESS)
}

#[cfg(not(feature = "clipboard"))]
fn serve_clipboard() -> Result<ExitCode> {
    anyhow::bail!("built without clipboard support")
}

#[cfg(not(feature = "clipboard"))]
fn system_clipboard() -> Option<Box<dyn ClipboardSink>> {
    None
}

async fn list_models(config: &dyn config::ConfigStore, client: &OllamaClient) -> Result<ExitCode> {
    let settings = Settings::load(config).context("Invalid settings")?;
    let models = client
        .list_models(&settings.ollama_endpoint, settings.ai_summary_timeout_ms)
        .await;
    if models.is_empty() {
        eprintln!("No models found at {}", settings.ollama_endpoint);
        return Ok(ExitCode::FAILURE);
    }
    for model in models {
        let marker = if model == settings.ollama_model { " *" } else { "" };
        println!("{model}{marker}");
    }
    Ok(ExitCode::SUCCESS)
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let config = LayeredConfig::new(overrides(&cli), EnvConfig);
    let client = OllamaClient::new();

    let Some((command, target)) = cli.command.split() else {
        return match cli.command {
            CliCommand::ServeClipboard => serve_clipboard(),
            _ => list_models(&config, &client).await,
        };
    };

    let document = match &target.file {
        Some(path) => Some(
            TextDocument::open(path).with_context(|| format!("Cannot open {}", path.display()))?,
        ),
        None => None,
    };
    let selection = match (&cli.lines, &document) {
        (Some(spec), Some(doc)) => Selection::from_line_spec(spec, doc)?,
        _ => Selection::cursor(0, 0),
    };
    let roots = workspace_roots(&cli, document.as_ref());
    if roots.is_empty() {
        info!("No project root found; relative paths are unavailable");
    }

    let ctx = CommandContext {
        editor: document
            .as_ref()
            .map(|doc| ActiveEditor::new(doc as &dyn Document, selection)),
        roots: &roots,
        config: &config,
        summarizer: &client,
    };

    let mut out = sink(cli.stdout);
    match execute_into(command, &ctx, out.as_mut()).await {
        Ok(notification) => {
            eprintln!("{notification}");
            Ok(ExitCode::SUCCESS)
        }
        Err(failure) => {
            let level = if failure.is_warning() { "warning" } else { "error" };
            eprintln!("{level}: {}", failure.message);
            Ok(ExitCode::FAILURE)
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    lineref::setup_logging();
    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
