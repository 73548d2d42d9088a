//! The plain copy commands: no network, just path and line formatting.

use crate::core::config::Settings;
use crate::core::models::{CommandOutput, PathStyle};
use crate::errors::Result;
use crate::format::code::format_with_code;
use crate::format::reference::{file_name, format_reference, normalize_path, resolve_path};

use super::CommandContext;

/// Path in the configured style plus a smart line anchor.
pub fn copy_path(ctx: &CommandContext<'_>) -> Result<CommandOutput> {
    let editor = ctx.active_editor()?;
    let settings = Settings::load(ctx.config)?;
    let location = format_reference(
        editor.document,
        &editor.selection,
        settings.path_type,
        ctx.roots,
    )?;
    Ok(CommandOutput::new(location.to_string(), "path"))
}

/// Path with line anchor followed by the selected code in a fenced block.
pub fn copy_path_with_code(ctx: &CommandContext<'_>) -> Result<CommandOutput> {
    let editor = ctx.active_editor()?;
    let settings = Settings::load(ctx.config)?;
    let text = format_with_code(editor, settings.path_type, ctx.roots)?;
    Ok(CommandOutput::new(text, "path with code"))
}

pub fn copy_absolute_path(ctx: &CommandContext<'_>) -> Result<CommandOutput> {
    let editor = ctx.active_editor()?;
    Ok(CommandOutput::new(
        normalize_path(editor.document.path()),
        "absolute path",
    ))
}

pub fn copy_filename(ctx: &CommandContext<'_>) -> Result<CommandOutput> {
    let editor = ctx.active_editor()?;
    Ok(CommandOutput::new(file_name(editor.document), "filename"))
}

/// Project-relative path without lines, regardless of `pathType`.
pub fn copy_relative_path(ctx: &CommandContext<'_>) -> Result<CommandOutput> {
    let editor = ctx.active_editor()?;
    let path = resolve_path(editor.document, PathStyle::Relative, ctx.roots)?;
    Ok(CommandOutput::new(path, "relative path"))
}

/// Project-relative path with a smart line anchor, regardless of `pathType`.
pub fn copy_workspace_relative_path(ctx: &CommandContext<'_>) -> Result<CommandOutput> {
    let editor = ctx.active_editor()?;
    let location = format_reference(
        editor.document,
        &editor.selection,
        PathStyle::Relative,
        ctx.roots,
    )?;
    Ok(CommandOutput::new(
        location.to_string(),
        "workspace relative path",
    ))
}
