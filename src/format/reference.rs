//! Location strings: `path`, `path#L10` and `path#L10-13`.

use std::path::Path;

use tracing::warn;

use crate::core::models::{Location, PathStyle};
use crate::editor::{Document, ProjectRoots, Selection};
use crate::errors::{LineRefError, Result};

/// Canonical forward-slash form of a path, whatever platform produced it.
#[must_use]
pub fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}

/// Path of `file` relative to `root`, or `None` when `file` is not inside `root`.
#[must_use]
pub fn relative_to_root(root: &str, file: &str) -> Option<String> {
    let root = normalize_path(root);
    let file = normalize_path(file);
    let root = root.trim_end_matches('/');

    if file == root {
        return Some(String::new());
    }

    file.strip_prefix(root)
        .and_then(|rest| rest.strip_prefix('/'))
        .map(|rest| rest.trim_start_matches('/').to_string())
}

/// GitHub-style line anchor; empty when `include` is false.
#[must_use]
pub fn format_line_numbers(start_line: u32, end_line: u32, include: bool) -> String {
    if !include {
        return String::new();
    }
    if start_line == end_line {
        format!("#L{start_line}")
    } else {
        format!("#L{start_line}-{end_line}")
    }
}

/// Document path in the requested style.
///
/// # Errors
///
/// Returns `NoWorkspace` for a relative path outside every project root.
pub fn resolve_path(
    document: &dyn Document,
    style: PathStyle,
    roots: &dyn ProjectRoots,
) -> Result<String> {
    match style {
        PathStyle::Absolute => Ok(normalize_path(document.path())),
        PathStyle::Relative => {
            let root = roots.root_for(document.path()).ok_or_else(|| {
                warn!(path = document.path(), "document is outside every project root");
                LineRefError::NoWorkspace
            })?;
            relative_to_root(&root, document.path()).ok_or(LineRefError::NoWorkspace)
        }
    }
}

/// A bare cursor on a blank line refers to the file, not to the line.
#[must_use]
pub fn should_include_line_numbers(document: &dyn Document, selection: &Selection) -> bool {
    if !selection.is_empty() {
        return true;
    }
    document
        .line_text(selection.start.line)
        .is_some_and(|text| !text.trim().is_empty())
}

/// Location of the selection, dropping the line anchor for a cursor on a blank line.
///
/// # Errors
///
/// Returns `NoWorkspace` when a relative path cannot be computed.
pub fn format_reference(
    document: &dyn Document,
    selection: &Selection,
    style: PathStyle,
    roots: &dyn ProjectRoots,
) -> Result<Location> {
    let path = resolve_path(document, style, roots)?;
    Ok(Location::from_zero_based(
        path,
        selection.start.line,
        selection.end.line,
        should_include_line_numbers(document, selection),
    ))
}

/// Location of the selection that always carries the line anchor.
///
/// # Errors
///
/// Returns `NoWorkspace` when a relative path cannot be computed.
pub fn format_reference_with_lines(
    document: &dyn Document,
    selection: &Selection,
    style: PathStyle,
    roots: &dyn ProjectRoots,
) -> Result<Location> {
    let path = resolve_path(document, style, roots)?;
    Ok(Location::from_zero_based(
        path,
        selection.start.line,
        selection.end.line,
        true,
    ))
}

#[must_use]
pub fn file_name(document: &dyn Document) -> String {
    let normalized = normalize_path(document.path());
    Path::new(&normalized)
        .file_name()
        .map_or_else(|| normalized.clone(), |n| n.to_string_lossy().into_owned())
}
