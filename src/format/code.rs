use crate::core::models::PathStyle;
use crate::editor::{ActiveEditor, ProjectRoots};
use crate::errors::Result;
use crate::format::reference::format_reference_with_lines;

/// Location followed by a fenced code block of the selection (or cursor line).
///
/// The line anchor is always present, even for a cursor on a blank line.
///
/// # Errors
///
/// Returns `NoWorkspace` when a relative path cannot be computed.
pub fn format_with_code(
    editor: &ActiveEditor<'_>,
    style: PathStyle,
    roots: &dyn ProjectRoots,
) -> Result<String> {
    let location = format_reference_with_lines(editor.document, &editor.selection, style, roots)?;
    let text = editor.selected_or_line_text();
    Ok(code_block(&location.to_string(), editor.document.language_id(), &text))
}

#[must_use]
pub fn code_block(location: &str, language_id: &str, text: &str) -> String {
    format!("{location}\n\n```{language_id}\n{text}\n```")
}
