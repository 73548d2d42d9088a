use std::fs;
use std::path::Path;

use tracing::debug;

use super::{Document, Selection};
use crate::errors::Result;

/// In-memory document, the command-line stand-in for an open editor buffer.
#[derive(Debug, Clone)]
pub struct TextDocument {
    path: String,
    language_id: String,
    lines: Vec<String>,
    eol: &'static str,
}

impl TextDocument {
    #[must_use]
    pub fn new(path: impl Into<String>, language_id: impl Into<String>, text: &str) -> Self {
        let eol = if text.contains("\r\n") { "\r\n" } else { "\n" };
        let lines = text
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
            .collect();
        Self {
            path: path.into(),
            language_id: language_id.into(),
            lines,
            eol,
        }
    }

    /// Reads a file from disk; the language id comes from its extension.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be read as UTF-8.
    pub fn open(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let absolute = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        let language_id = language_id_for_path(&absolute);
        debug!(path = %absolute.display(), language_id, "opened document");
        Ok(Self::new(
            absolute.to_string_lossy().into_owned(),
            language_id,
            &text,
        ))
    }
}

fn char_slice(line: &str, from: usize, to: Option<usize>) -> &str {
    let byte_at = |n: usize| line.char_indices().nth(n).map_or(line.len(), |(i, _)| i);
    let start = byte_at(from);
    let end = to.map_or(line.len(), byte_at).max(start);
    &line[start..end]
}

impl Document for TextDocument {
    fn path(&self) -> &str {
        &self.path
    }

    fn language_id(&self) -> &str {
        &self.language_id
    }

    fn line_count(&self) -> u32 {
        u32::try_from(self.lines.len()).unwrap_or(u32::MAX)
    }

    fn line_text(&self, line: u32) -> Option<&str> {
        self.lines.get(line as usize).map(String::as_str)
    }

    fn text_in(&self, selection: &Selection) -> String {
        let (start, end) = (selection.start, selection.end);
        let first = start.line as usize;
        if first >= self.lines.len() {
            return String::new();
        }
        let last = (end.line as usize).min(self.lines.len() - 1);

        if first == last {
            let to = if end.line as usize == last {
                Some(end.character as usize)
            } else {
                None
            };
            return char_slice(&self.lines[first], start.character as usize, to).to_string();
        }

        let mut parts = Vec::with_capacity(last - first + 1);
        parts.push(char_slice(&self.lines[first], start.character as usize, None));
        for line in &self.lines[first + 1..last] {
            parts.push(line.as_str());
        }
        let tail_to = if end.line as usize == last {
            Some(end.character as usize)
        } else {
            None
        };
        parts.push(char_slice(&self.lines[last], 0, tail_to));
        parts.join(self.eol)
    }
}

/// Maps a file extension to the editor's language identifier.
#[must_use]
pub fn language_id_for_path(path: &Path) -> &'static str {
    if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
        match name {
            "Dockerfile" => return "dockerfile",
            "Makefile" | "makefile" | "GNUmakefile" => return "makefile",
            _ => {}
        }
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match ext.as_str() {
        "rs" => "rust",
        "ts" | "mts" | "cts" => "typescript",
        "tsx" => "typescriptreact",
        "js" | "mjs" | "cjs" => "javascript",
        "jsx" => "javascriptreact",
        "py" | "pyi" => "python",
        "go" => "go",
        "java" => "java",
        "kt" | "kts" => "kotlin",
        "c" | "h" => "c",
        "cc" | "cpp" | "cxx" | "hpp" | "hh" => "cpp",
        "cs" => "csharp",
        "rb" => "ruby",
        "php" => "php",
        "swift" => "swift",
        "sh" | "bash" | "zsh" => "shellscript",
        "ps1" => "powershell",
        "json" => "json",
        "jsonc" => "jsonc",
        "toml" => "toml",
        "yaml" | "yml" => "yaml",
        "xml" => "xml",
        "html" | "htm" => "html",
        "css" => "css",
        "scss" => "scss",
        "md" | "markdown" => "markdown",
        "sql" => "sql",
        "lua" => "lua",
        _ => "plaintext",
    }
}
