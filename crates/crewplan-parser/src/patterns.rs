//! Ordered line matchers
//!
//! Each line kind (phase header, task header, labeled detail) has a short
//! list of matchers tried in priority order. Matchers are plain data so each
//! one can be exercised on its own.
//!
//! All matchers see a trimmed line.

use once_cell::sync::Lazy;
use regex::Regex;

/// Optional markdown bold marker
const BOLD: &str = r"(?:\*\*|__)";

/// Optional heading prefix
const HEADING: &str = r"(?:#{1,6}\s*)";

/// Separator between a number and a name
const SEP: &str = r"(?:\s*[:.\-–—]\s*|\s+)";

/// Punctuation separator between a number and a name
const PUNCT_SEP: &str = r"\s*[:.\-–—]\s*";

/// Trailing decoration: closing bold, then at most one parenthetical
/// annotation. A parenthetical inside the closing bold belongs to the name.
const TAIL: &str = r"\s*(?:(?:\*\*|__)\s*\([^)]*\)|\*\*|__|\([^)]*\))?\s*$";

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("line pattern is valid")
}

/// Order in which a header pattern captures its two fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FieldOrder {
    /// Group 1 is the number, group 2 the name
    NumberFirst,
    /// Group 1 is the name, group 2 the number
    NameFirst,
}

/// One header pattern
#[derive(Debug)]
pub(crate) struct HeaderMatcher {
    pub(crate) name: &'static str,
    regex: Regex,
    order: FieldOrder,
}

impl HeaderMatcher {
    fn new(name: &'static str, pattern: &str, order: FieldOrder) -> Self {
        Self {
            name,
            regex: compile(pattern),
            order,
        }
    }

    /// Return `(number, name)` with decoration stripped from the name
    pub(crate) fn captures(&self, line: &str) -> Option<(String, String)> {
        let caps = self.regex.captures(line)?;
        let (number, name) = match self.order {
            FieldOrder::NumberFirst => (caps.get(1)?, caps.get(2)?),
            FieldOrder::NameFirst => (caps.get(2)?, caps.get(1)?),
        };
        Some((number.as_str().to_string(), clean(name.as_str()).to_string()))
    }
}

/// Phase header matchers in priority order
pub(crate) static PHASE_MATCHERS: Lazy<Vec<HeaderMatcher>> = Lazy::new(|| {
    vec![
        // **Phase 1: Setup**, ## Phase 2 - Design (Weeks 3-4)
        HeaderMatcher::new(
            "phase-number-first",
            &format!(
                r"(?i)^{HEADING}?{BOLD}?\s*phase\s+(\d+)\s*{BOLD}?{PUNCT_SEP}{BOLD}?\s*(.+?){TAIL}"
            ),
            FieldOrder::NumberFirst,
        ),
        // ## Phase 3 Build, **Phase 4 Test**
        // Bare `Phase 1 covers scoping.` is prose, so markup is required here.
        HeaderMatcher::new(
            "phase-number-first-spaced",
            &format!(
                r"(?i)^(?:{HEADING}{BOLD}?|{BOLD})\s*phase\s+(\d+)\s*{BOLD}?\s+{BOLD}?\s*(.+?){TAIL}"
            ),
            FieldOrder::NumberFirst,
        ),
        // **Setup (Phase 1)**, ## Design - Phase 2
        // A colon never separates here: `Depends on: Phase 1` is a detail.
        HeaderMatcher::new(
            "phase-name-first",
            &format!(
                r"(?i)^{HEADING}?{BOLD}?\s*([^\s*_\-+•#:][^:]*?)\s*(?:[\-–—]\s*|\(\s*)phase\s+(\d+)\s*\)?\s*{BOLD}?\s*$"
            ),
            FieldOrder::NameFirst,
        ),
        // ### 2. Design Phase
        HeaderMatcher::new(
            "phase-heading-suffix",
            &format!(r"(?i)^#{{1,6}}\s*{BOLD}?\s*(\d+)\s*[.):\-]\s*(.+?)\s+phase\s*{BOLD}?\s*$"),
            FieldOrder::NumberFirst,
        ),
    ]
});

/// Task header matchers in priority order
pub(crate) static TASK_MATCHERS: Lazy<Vec<HeaderMatcher>> = Lazy::new(|| {
    vec![
        // * Task 1.1: Init repo, - **Task 1.2:** Docs, ### Task 1.3 - Deploy (2 days)
        HeaderMatcher::new(
            "task-keyword",
            &format!(
                r"(?i)^{HEADING}?(?:\d+[.)]\s+)?(?:[-*+•]\s*)?{BOLD}?\s*task\s+(\d+\.\d+)\.?\s*{BOLD}?{SEP}{BOLD}?\s*(.+?){TAIL}"
            ),
            FieldOrder::NumberFirst,
        ),
        // ### 1.3 Deploy
        HeaderMatcher::new(
            "task-heading-id",
            &format!(r"(?i)^#{{1,6}}\s*{BOLD}?\s*(\d+\.\d+)\.?\s*{BOLD}?{SEP}{BOLD}?\s*(.+?){TAIL}"),
            FieldOrder::NumberFirst,
        ),
    ]
});

/// One labeled detail pattern
#[derive(Debug)]
pub(crate) struct LabelMatcher {
    pub(crate) name: &'static str,
    regex: Regex,
}

impl LabelMatcher {
    fn new(name: &'static str, pattern: &str) -> Self {
        Self {
            name,
            regex: compile(pattern),
        }
    }

    /// Return the lower-cased label and the cleaned value
    pub(crate) fn captures(&self, line: &str) -> Option<(String, String)> {
        let caps = self.regex.captures(line)?;
        let label = clean(clean(caps.get(1)?.as_str()).trim_end_matches(':')).to_lowercase();
        let value = caps.get(2).map_or("", |m| clean(m.as_str()));
        if label.is_empty() {
            return None;
        }
        Some((label, value.to_string()))
    }
}

/// Detail matchers, strictest first
pub(crate) static LABEL_MATCHERS: Lazy<Vec<LabelMatcher>> = Lazy::new(|| {
    vec![
        // - **Assigned to:** Alice
        LabelMatcher::new(
            "bold-bullet",
            &format!(r"^[-*+•]\s*{BOLD}(.+?){BOLD}\s*:?\s*(.*)$"),
        ),
        // **Assigned to:** Alice
        LabelMatcher::new("bold", &format!(r"^{BOLD}(.+?){BOLD}\s*:?\s*(.*)$")),
        // + Assigned to: Alice, Estimated time: 2 days
        LabelMatcher::new("plain", r"^(?:[-*+•]\s*)?([^:]+?)\s*:\s*(.*)$"),
    ]
});

static HORIZONTAL_RULE: Lazy<Regex> =
    Lazy::new(|| compile(r"^(?:(?:-\s*){3,}|(?:\*\s*){3,}|(?:_\s*){3,})$"));

/// Whether the line is a markdown horizontal rule
pub(crate) fn is_horizontal_rule(line: &str) -> bool {
    HORIZONTAL_RULE.is_match(line)
}

/// Strip surrounding whitespace and emphasis markers
pub(crate) fn clean(text: &str) -> &str {
    text.trim().trim_matches(|c| c == '*' || c == '_').trim()
}

/// Split a comma-separated value into trimmed, non-empty parts
pub(crate) fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(clean)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

fn looks_like_task(name: &str) -> bool {
    TASK_MATCHERS.iter().any(|m| m.captures(name).is_some())
        || name.to_ascii_lowercase().starts_with("task ")
}

/// First phase matcher that accepts the line
///
/// Name-first matches are rejected when the name is itself a task header,
/// so `Task 1.1: Review (Phase 1)` stays a task.
pub(crate) fn match_phase(line: &str) -> Option<(String, String)> {
    PHASE_MATCHERS.iter().find_map(|m| {
        let (number, name) = m.captures(line)?;
        if m.order == FieldOrder::NameFirst && looks_like_task(&name) {
            return None;
        }
        let name = if name.is_empty() {
            format!("Phase {number}")
        } else {
            name
        };
        tracing::trace!("Phase header {} '{}' matched by {}", number, name, m.name);
        Some((number, name))
    })
}

/// First task matcher that accepts the line with a non-empty name
pub(crate) fn match_task(line: &str) -> Option<(String, String)> {
    TASK_MATCHERS.iter().find_map(|m| {
        let (id, name) = m.captures(line).filter(|(_, name)| !name.is_empty())?;
        tracing::trace!("Task header {} '{}' matched by {}", id, name, m.name);
        Some((id, name))
    })
}
