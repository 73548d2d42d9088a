/// Instruction sent ahead of every snippet.
pub const SUMMARY_INSTRUCTION: &str = "Please provide a brief, technical summary (1-2 sentences) of this code snippet. Focus on what it does, not how it works:";

/// Strips control characters from a configured system prompt, keeping line breaks
/// and tabs, and trims the result.
#[must_use]
pub fn sanitize_system_prompt(raw: &str) -> String {
    raw.chars()
        .filter(|&c| !c.is_control() || c == '\n' || c == '\t')
        .collect::<String>()
        .trim()
        .to_string()
}

/// Full prompt for one snippet; a non-blank system prompt goes first,
/// separated by a blank line.
#[must_use]
pub fn build_prompt(text: &str, system_prompt: &str) -> String {
    let base = format!("{SUMMARY_INSTRUCTION}\n\n{text}");
    let system = sanitize_system_prompt(system_prompt);
    if system.is_empty() {
        base
    } else {
        format!("{system}\n\n{base}")
    }
}
