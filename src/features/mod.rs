//! The user-facing commands and the context they run against.

pub mod copy;
pub mod deliver;
pub mod summarize;

use std::fmt;
use std::str::FromStr;

use crate::ai::Summarizer;
use crate::core::config::ConfigStore;
use crate::core::models::CommandOutput;
use crate::editor::{ActiveEditor, ProjectRoots};
use crate::errors::{LineRefError, Result};

pub use deliver::{CommandFailure, execute, execute_into};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    CopyPath,
    CopyPathWithCode,
    CopyAbsolutePath,
    CopyFilename,
    CopyRelativePath,
    CopyWorkspaceRelativePath,
    CopyPathWithAiSummary,
}

impl Command {
    pub const ALL: [Command; 7] = [
        Command::CopyPath,
        Command::CopyPathWithCode,
        Command::CopyAbsolutePath,
        Command::CopyFilename,
        Command::CopyRelativePath,
        Command::CopyWorkspaceRelativePath,
        Command::CopyPathWithAiSummary,
    ];

    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Command::CopyPath => "copyPath",
            Command::CopyPathWithCode => "copyPathWithCode",
            Command::CopyAbsolutePath => "copyAbsolutePath",
            Command::CopyFilename => "copyFilename",
            Command::CopyRelativePath => "copyRelativePath",
            Command::CopyWorkspaceRelativePath => "copyWorkspaceRelativePath",
            Command::CopyPathWithAiSummary => "copyPathWithAISummary",
        }
    }

    #[must_use]
    pub fn uses_ai(self) -> bool {
        matches!(self, Command::CopyPathWithAiSummary)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Command::ALL
            .into_iter()
            .find(|c| c.id().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown command: {s}"))
    }
}

/// Everything a command may read. Built fresh for each invocation.
pub struct CommandContext<'a> {
    pub editor: Option<ActiveEditor<'a>>,
    pub roots: &'a dyn ProjectRoots,
    pub config: &'a dyn ConfigStore,
    pub summarizer: &'a dyn Summarizer,
}

impl<'a> CommandContext<'a> {
    /// # Errors
    ///
    /// Returns `NoActiveEditor` when no document is focused.
    pub fn active_editor(&self) -> Result<&ActiveEditor<'a>> {
        self.editor.as_ref().ok_or(LineRefError::NoActiveEditor)
    }
}

/// Runs one command and returns the text destined for the clipboard.
///
/// # Errors
///
/// Propagates the command's failure untouched; see [`execute`] for the
/// user-facing message.
pub async fn run(command: Command, ctx: &CommandContext<'_>) -> Result<CommandOutput> {
    match command {
        Command::CopyPath => copy::copy_path(ctx),
        Command::CopyPathWithCode => copy::copy_path_with_code(ctx),
        Command::CopyAbsolutePath => copy::copy_absolute_path(ctx),
        Command::CopyFilename => copy::copy_filename(ctx),
        Command::CopyRelativePath => copy::copy_relative_path(ctx),
        Command::CopyWorkspaceRelativePath => copy::copy_workspace_relative_path(ctx),
        Command::CopyPathWithAiSummary => summarize::copy_path_with_ai_summary(ctx).await,
    }
}
