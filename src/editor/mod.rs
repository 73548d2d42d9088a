//! Read-only views of the editor host: the focused document, its selection and
//! the project roots used for relative paths.
//!
//! The formatters only ever see these traits, so they run the same against a
//! live editor, the command-line host or a test fixture.

pub mod document;
pub mod workspace;

pub use document::{TextDocument, language_id_for_path};
pub use workspace::{WorkspaceRoots, find_project_root};

use crate::errors::{LineRefError, Result};

/// A 0-based line/character position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    #[must_use]
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// A contiguous range in a document; `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub start: Position,
    pub end: Position,
}

impl Selection {
    /// Orders the two ends, so anchor/active order from the host does not matter.
    #[must_use]
    pub fn new(a: Position, b: Position) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    #[must_use]
    pub fn cursor(line: u32, character: u32) -> Self {
        let p = Position::new(line, character);
        Self { start: p, end: p }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Parses a 1-based line spec: `N` puts a bare cursor at the start of line N,
    /// `N-M` selects lines N through M in full. Selections stop at the end of line M,
    /// so `N-N` over a blank line is empty and behaves exactly like `N`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for a malformed spec or a zero line number.
    pub fn from_line_spec(spec: &str, document: &dyn Document) -> Result<Self> {
        let invalid = || LineRefError::InvalidConfig {
            key: "lines".to_string(),
            value: spec.to_string(),
        };
        let parse = |s: &str| -> Result<u32> {
            s.trim()
                .parse::<u32>()
                .ok()
                .filter(|n| *n >= 1)
                .ok_or_else(invalid)
        };

        match spec.split_once('-') {
            None => {
                let line = parse(spec)?;
                Ok(Self::cursor(line - 1, 0))
            }
            Some((a, b)) => {
                let (first, last) = (parse(a)? - 1, parse(b)? - 1);
                let (first, last) = (first.min(last), first.max(last));
                let end_char = document
                    .line_text(last)
                    .map_or(0, |text| u32::try_from(text.chars().count()).unwrap_or(u32::MAX));
                Ok(Self::new(
                    Position::new(first, 0),
                    Position::new(last, end_char),
                ))
            }
        }
    }
}

/// The focused document as the host exposes it.
pub trait Document {
    /// Filesystem path as the host reports it.
    fn path(&self) -> &str;

    /// Opaque language identifier, e.g. `python`.
    fn language_id(&self) -> &str;

    fn line_count(&self) -> u32;

    /// Text of a 0-based line without its terminator; `None` past the end.
    fn line_text(&self, line: u32) -> Option<&str>;

    /// Text covered by the selection, line breaks included.
    fn text_in(&self, selection: &Selection) -> String;
}

/// Resolves the project root that encloses a path.
pub trait ProjectRoots {
    fn root_for(&self, path: &str) -> Option<String>;
}

/// The active editor: a document and its current selection.
pub struct ActiveEditor<'a> {
    pub document: &'a dyn Document,
    pub selection: Selection,
}

impl<'a> ActiveEditor<'a> {
    #[must_use]
    pub fn new(document: &'a dyn Document, selection: Selection) -> Self {
        Self {
            document,
            selection,
        }
    }

    /// Selected text, or the whole cursor line for a bare cursor.
    #[must_use]
    pub fn selected_or_line_text(&self) -> String {
        if self.selection.is_empty() {
            self.document
                .line_text(self.selection.start.line)
                .unwrap_or_default()
                .to_string()
        } else {
            self.document.text_in(&self.selection)
        }
    }
}
