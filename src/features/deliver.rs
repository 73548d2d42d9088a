use tracing::{error, info, warn};

use crate::clipboard::ClipboardSink;
use crate::core::config::Settings;
use crate::core::models::CommandOutput;
use crate::errors::LineRefError;

use super::summarize::ai_failure_message;
use super::{Command, CommandContext, run};

/// A failed command together with the message to show the user.
#[derive(Debug)]
pub struct CommandFailure {
    pub error: LineRefError,
    pub message: String,
}

impl CommandFailure {
    #[must_use]
    pub fn is_warning(&self) -> bool {
        self.error.is_warning()
    }
}

/// Runs a command and attaches the user-facing message to any failure.
///
/// # Errors
///
/// Returns a [`CommandFailure`] whenever the command itself fails.
pub async fn execute(
    command: Command,
    ctx: &CommandContext<'_>,
) -> Result<CommandOutput, CommandFailure> {
    info!("Running command {}", command);
    run(command, ctx).await.map_err(|err| {
        let message = if command.uses_ai() {
            // Settings are read again so the message names the values in effect now.
            let settings = Settings::load(ctx.config).unwrap_or_default();
            ai_failure_message(&err, &settings)
        } else {
            err.to_string()
        };

        if err.is_warning() {
            warn!("{} stopped: {}", command, message);
        } else {
            error!("{} failed: {} ({})", command, message, err);
        }
        CommandFailure {
            error: err,
            message,
        }
    })
}

/// Runs a command and writes its text to `sink`. The sink is left untouched on
/// failure. Returns the confirmation message.
///
/// # Errors
///
/// Returns a [`CommandFailure`] when the command fails or the sink rejects the text.
pub async fn execute_into(
    command: Command,
    ctx: &CommandContext<'_>,
    sink: &mut dyn ClipboardSink,
) -> Result<String, CommandFailure> {
    let output = execute(command, ctx).await?;
    sink.write_text(&output.text).map_err(|err| {
        error!("Failed to copy to clipboard: {}", err);
        CommandFailure {
            message: err.to_string(),
            error: err,
        }
    })?;
    Ok(output.notification())
}
