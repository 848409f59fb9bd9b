//! Input preprocessing
//!
//! Model output often arrives wrapped in a fenced code block and padded with
//! horizontal rules between sections. Neither carries plan content.

use crate::patterns::is_horizontal_rule;

const FENCE: &str = "```";

/// Strip surrounding whitespace and one leading/trailing code fence
#[must_use]
pub fn strip_fence(text: &str) -> &str {
    let mut text = text.trim();
    if let Some(rest) = text.strip_prefix(FENCE) {
        text = rest;
    }
    if let Some(rest) = text.strip_suffix(FENCE) {
        text = rest;
    }
    text
}

/// Trimmed, non-empty content lines with their 1-based line numbers
///
/// Horizontal rules are dropped. Line numbers count lines of the unfenced
/// text and are only used for diagnostics.
pub(crate) fn content_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    strip_fence(text)
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !is_horizontal_rule(line))
}
