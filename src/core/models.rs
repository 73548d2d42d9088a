use std::fmt;
use std::str::FromStr;

use crate::format::reference::format_line_numbers;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PathStyle {
    #[default]
    Relative,
    Absolute,
}

impl FromStr for PathStyle {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "relative" => Ok(PathStyle::Relative),
            "absolute" => Ok(PathStyle::Absolute),
            _ => Err(()),
        }
    }
}

/// A file reference with an optional 1-based line range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    pub start_line: u32,
    pub end_line: u32,
    pub include_line: bool,
}

impl Location {
    /// Builds a location from 0-based editor lines. A reversed range is reordered;
    /// line numbers saturate at `u32::MAX` rather than wrap.
    #[must_use]
    pub fn from_zero_based(path: String, start: u32, end: u32, include_line: bool) -> Self {
        let (start, end) = if start <= end { (start, end) } else { (end, start) };
        Self {
            path,
            start_line: start.saturating_add(1),
            end_line: end.saturating_add(1),
            include_line,
        }
    }

    #[must_use]
    pub fn is_single_line(&self) -> bool {
        self.start_line == self.end_line
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            self.path,
            format_line_numbers(self.start_line, self.end_line, self.include_line)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRequest {
    pub text: String,
    pub model: String,
    pub endpoint: String,
    pub timeout_ms: u64,
    pub system_prompt: String,
}

/// Result of a command: the text for the clipboard and what it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub text: String,
    pub description: &'static str,
}

impl CommandOutput {
    #[must_use]
    pub fn new(text: String, description: &'static str) -> Self {
        Self { text, description }
    }

    /// Notification shown after the text lands on the clipboard.
    #[must_use]
    pub fn notification(&self) -> String {
        format!("Copied {}: {}", self.description, self.text)
    }
}
