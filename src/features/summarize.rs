use tracing::{info, warn};

use crate::core::config::Settings;
use crate::core::models::{CommandOutput, Location, SummaryRequest};
use crate::errors::{LineRefError, Result};
use crate::format::reference::resolve_path;

use super::CommandContext;

/// `LINE(10)` for a bare cursor, `LINE(10::13)` for a selection.
#[must_use]
pub fn line_reference(location: &Location, has_selection: bool) -> String {
    if has_selection {
        format!("LINE({}::{})", location.start_line, location.end_line)
    } else {
        format!("LINE({})", location.start_line)
    }
}

/// `{path LINE(..) [summary]}`
#[must_use]
pub fn format_ai_reference(path: &str, line_ref: &str, summary: &str) -> String {
    format!("{{{path} {line_ref} [{summary}]}}")
}

/// Path, line reference and a model-written summary of the selected code.
///
/// The line reference is always present. Blank input is rejected before any
/// request is made.
pub async fn copy_path_with_ai_summary(ctx: &CommandContext<'_>) -> Result<CommandOutput> {
    let editor = ctx.active_editor()?;
    let settings = Settings::load(ctx.config)?;

    if !settings.ai_summary_enabled {
        return Err(LineRefError::AiDisabled);
    }

    let path = resolve_path(editor.document, settings.path_type, ctx.roots)?;
    let location = Location::from_zero_based(
        path,
        editor.selection.start.line,
        editor.selection.end.line,
        true,
    );
    let line_ref = line_reference(&location, !editor.selection.is_empty());

    let text = editor.selected_or_line_text();
    if text.trim().is_empty() {
        warn!("Nothing to summarize at {}", location);
        return Err(LineRefError::EmptySelection);
    }

    let request = SummaryRequest {
        text,
        model: settings.ollama_model.clone(),
        endpoint: settings.ollama_endpoint.clone(),
        timeout_ms: settings.ai_summary_timeout_ms,
        system_prompt: settings.default_system_prompt.clone(),
    };

    info!(
        "Generating AI summary for {} with model {}",
        location, request.model
    );
    let summary = ctx.summarizer.summarize(&request).await?;

    Ok(CommandOutput::new(
        format_ai_reference(&location.path, &line_ref, &summary),
        "path with AI summary",
    ))
}

/// User-facing text for a failed AI command.
#[must_use]
pub fn ai_failure_message(error: &LineRefError, settings: &Settings) -> String {
    match error {
        LineRefError::Connection(_) => format!(
            "Cannot connect to Ollama server. Make sure Ollama is running on {}",
            settings.ollama_endpoint
        ),
        LineRefError::Timeout(_) => "AI summary request timed out. Try with shorter text or increase timeout in settings.".to_string(),
        e if e.is_model_not_found() => format!(
            "Model '{}' not found. Check your model configuration.",
            settings.ollama_model
        ),
        LineRefError::Status { .. } | LineRefError::Model(_) | LineRefError::Http(_) => {
            "Failed to generate AI summary".to_string()
        }
        other => other.to_string(),
    }
}
