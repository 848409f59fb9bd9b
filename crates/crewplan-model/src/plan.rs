//! Plan, phase and task types
//!
//! Field names match the JSON hand-off document written by the planning step
//! and read by the sync step.

use crate::de;
use crate::{TO_BE_DETERMINED, UNASSIGNED};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

/// Compare two digit strings by numeric value without parsing them
///
/// Leading zeros are ignored for the value comparison, so `"2" < "10"` and
/// `"02" == "2"` numerically; ties fall back to the raw text so the order is
/// total. Arbitrarily long digit runs never overflow.
#[must_use]
pub fn compare_numeric(a: &str, b: &str) -> Ordering {
    let a_digits = a.trim_start_matches('0');
    let b_digits = b.trim_start_matches('0');
    a_digits
        .len()
        .cmp(&b_digits.len())
        .then_with(|| a_digits.cmp(b_digits))
        .then_with(|| a.cmp(b))
}

/// Join assignee names into the stored comma-separated form
///
/// Blank names are dropped; an empty result is the [`UNASSIGNED`] sentinel.
#[must_use]
pub fn join_names(names: &[String]) -> String {
    let joined = names
        .iter()
        .map(|n| n.trim())
        .filter(|n| !n.is_empty())
        .collect::<Vec<_>>()
        .join(", ");
    if joined.is_empty() {
        UNASSIGNED.to_string()
    } else {
        joined
    }
}

/// Phase number as captured from the source text
///
/// The planning step has written both `1` and `"1"` over time, so both
/// deserialize. Serialization emits a JSON integer whenever the digits
/// round-trip through `u64` and a string otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhaseNumber(String);

impl PhaseNumber {
    /// Create from digit text
    #[inline]
    #[must_use]
    pub fn new(digits: impl Into<String>) -> Self {
        Self(digits.into())
    }

    /// Raw text
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value, if it fits in `u64`
    #[inline]
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        self.0.parse().ok()
    }
}

impl From<u64> for PhaseNumber {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl From<u32> for PhaseNumber {
    fn from(value: u32) -> Self {
        Self(value.to_string())
    }
}

impl From<i32> for PhaseNumber {
    fn from(value: i32) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for PhaseNumber {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for PhaseNumber {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for PhaseNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialOrd for PhaseNumber {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PhaseNumber {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_numeric(&self.0, &other.0)
    }
}

impl Serialize for PhaseNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_u64() {
            Some(n) if n.to_string() == self.0 => serializer.serialize_u64(n),
            _ => serializer.serialize_str(&self.0),
        }
    }
}

impl<'de> Deserialize<'de> for PhaseNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Unsigned(u64),
            Signed(i64),
            Text(String),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Unsigned(n) => Self(n.to_string()),
            Repr::Signed(n) => Self(n.to_string()),
            Repr::Text(s) => Self(s.trim().to_string()),
        })
    }
}

/// A unit of work inside a phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Free-form identifier such as `"1.1"`
    #[serde(default)]
    pub task_id: String,
    /// Task title
    pub task_name: String,
    /// Comma-joined assignee names, or [`UNASSIGNED`]
    #[serde(default, deserialize_with = "de::string_or_seq")]
    pub assigned_to: String,
    /// Free-text duration, or [`TO_BE_DETERMINED`]
    #[serde(default, deserialize_with = "de::string_or_null")]
    pub duration: String,
    /// Resource names
    #[serde(default, deserialize_with = "de::resource_list")]
    pub resources: Vec<String>,
    /// Identifiers of prerequisite tasks
    #[serde(
        default,
        deserialize_with = "de::seq_or_null",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub dependencies: Vec<String>,
}

impl Task {
    /// Create a task with no assignment details
    ///
    /// Assignment and duration stay empty until [`Task::normalize`] runs.
    #[inline]
    #[must_use]
    pub fn new(task_id: impl Into<String>, task_name: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
            task_name: task_name.into(),
            assigned_to: String::new(),
            duration: String::new(),
            resources: Vec::new(),
            dependencies: Vec::new(),
        }
    }

    /// With assignees, joined into the stored form
    #[must_use]
    pub fn with_assignees(mut self, names: &[&str]) -> Self {
        let names: Vec<String> = names.iter().map(|n| (*n).to_string()).collect();
        self.assigned_to = join_names(&names);
        self
    }

    /// With duration text
    #[inline]
    #[must_use]
    pub fn with_duration(mut self, duration: impl Into<String>) -> Self {
        self.duration = duration.into();
        self
    }

    /// With resources
    #[must_use]
    pub fn with_resources(mut self, resources: &[&str]) -> Self {
        self.resources = resources.iter().map(|r| (*r).to_string()).collect();
        self
    }

    /// Replace empty assignment and duration with their sentinels
    ///
    /// Idempotent: sentinels and real values are left untouched.
    pub fn normalize(&mut self) {
        if self.assigned_to.trim().is_empty() {
            self.assigned_to = UNASSIGNED.to_string();
        }
        if self.duration.trim().is_empty() {
            self.duration = TO_BE_DETERMINED.to_string();
        }
    }

    /// Individual assignee names; empty when unassigned
    #[must_use]
    pub fn assignees(&self) -> Vec<&str> {
        if self.is_unassigned() {
            return Vec::new();
        }
        self.assigned_to
            .split(',')
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .collect()
    }

    /// Whether nobody is assigned
    #[inline]
    #[must_use]
    pub fn is_unassigned(&self) -> bool {
        let value = self.assigned_to.trim();
        value.is_empty() || value == UNASSIGNED
    }
}

/// A numbered project stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase {
    /// Number captured from the heading
    pub phase_number: PhaseNumber,
    /// Heading text after the number
    pub phase_name: String,
    /// Tasks in document order
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Phase {
    /// Create an empty phase
    #[inline]
    #[must_use]
    pub fn new(phase_number: impl Into<PhaseNumber>, phase_name: impl Into<String>) -> Self {
        Self {
            phase_number: phase_number.into(),
            phase_name: phase_name.into(),
            tasks: Vec::new(),
        }
    }

    /// Label attached to flattened tasks, e.g. `"2. Design"`
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}. {}", self.phase_number, self.phase_name)
    }
}

/// Structured plan produced by the parser
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationPlan {
    /// Phases in document order; numbers are not guaranteed sorted
    #[serde(default)]
    pub phases: Vec<Phase>,
}

impl AllocationPlan {
    /// Create an empty plan
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether no phase was found
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    /// Total number of tasks across all phases
    #[must_use]
    pub fn task_count(&self) -> usize {
        self.phases.iter().map(|p| p.tasks.len()).sum()
    }

    /// Apply [`Task::normalize`] to every task
    pub fn normalize(&mut self) {
        for task in self.phases.iter_mut().flat_map(|p| p.tasks.iter_mut()) {
            task.normalize();
        }
    }

    /// Phases sorted by number, for sequential processing
    #[must_use]
    pub fn sorted_phases(&self) -> Vec<&Phase> {
        let mut phases: Vec<&Phase> = self.phases.iter().collect();
        phases.sort_by(|a, b| a.phase_number.cmp(&b.phase_number));
        phases
    }

    /// Find a phase by number
    #[must_use]
    pub fn phase(&self, number: &PhaseNumber) -> Option<&Phase> {
        self.phases.iter().find(|p| &p.phase_number == number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn compare_numeric_orders_by_value() {
        assert_eq!(compare_numeric("2", "10"), Ordering::Less);
        assert_eq!(compare_numeric("10", "2"), Ordering::Greater);
        assert_eq!(compare_numeric("0", "2"), Ordering::Less);
        assert_eq!(compare_numeric("7", "7"), Ordering::Equal);
        assert_eq!(
            compare_numeric("99999999999999999999999", "100000000000000000000000"),
            Ordering::Less
        );
    }

    #[test]
    fn compare_numeric_leading_zeros_break_ties_by_text() {
        assert_eq!(compare_numeric("02", "3"), Ordering::Less);
        assert_ne!(compare_numeric("02", "2"), Ordering::Equal);
    }

    #[test]
    fn join_names_drops_blanks() {
        let names = vec!["Alice".to_string(), " ".to_string(), " Bob ".to_string()];
        assert_eq!(join_names(&names), "Alice, Bob");
        assert_eq!(join_names(&[]), UNASSIGNED);
    }

    #[test]
    fn phase_number_accepts_int_and_string() {
        let from_int: PhaseNumber = serde_json::from_str("3").unwrap();
        let from_str: PhaseNumber = serde_json::from_str("\"3\"").unwrap();
        assert_eq!(from_int, from_str);
        assert_eq!(serde_json::to_string(&from_int).unwrap(), "3");
    }

    #[test]
    fn phase_number_keeps_leading_zero_text() {
        let number = PhaseNumber::new("01");
        assert_eq!(serde_json::to_string(&number).unwrap(), "\"01\"");
    }

    #[test]
    fn task_normalize_is_idempotent() {
        let mut task = Task::new("1.1", "Init repo");
        task.normalize();
        let once = task.clone();
        task.normalize();

        assert_eq!(task, once);
        assert_eq!(task.assigned_to, UNASSIGNED);
        assert_eq!(task.duration, TO_BE_DETERMINED);
    }

    #[test]
    fn task_assignees_split() {
        let task = Task::new("1.1", "x").with_assignees(&["Alice", "Bob"]);
        assert_eq!(task.assigned_to, "Alice, Bob");
        assert_eq!(task.assignees(), vec!["Alice", "Bob"]);

        let mut empty = Task::new("1.2", "y");
        empty.normalize();
        assert!(empty.assignees().is_empty());
        assert!(empty.is_unassigned());
    }

    #[test]
    fn task_deserializes_array_assignees_and_null_duration() {
        let json = r#"{
            "task_id": "1.1",
            "task_name": "Define scope",
            "assigned_to": ["Rachel", "Sam"],
            "duration": null,
            "resources": [{"name": "Rachel", "role": "PM", "duration": 2}, "Jira"]
        }"#;
        let mut task: Task = serde_json::from_str(json).unwrap();
        task.normalize();

        assert_eq!(task.assigned_to, "Rachel, Sam");
        assert_eq!(task.duration, TO_BE_DETERMINED);
        assert_eq!(task.resources, vec!["Rachel (PM)".to_string(), "Jira".to_string()]);
        assert!(task.dependencies.is_empty());
    }

    #[test]
    fn task_omits_empty_dependencies() {
        let task = Task::new("1.1", "x");
        let json = serde_json::to_value(&task).unwrap();
        assert!(json.get("dependencies").is_none());
        assert!(json.get("resources").is_some());
    }

    #[test]
    fn plan_sorted_phases_numeric() {
        let plan = AllocationPlan {
            phases: vec![Phase::new(10, "Launch"), Phase::new(2, "Design"), Phase::new(1, "Setup")],
        };
        let order: Vec<&str> = plan
            .sorted_phases()
            .iter()
            .map(|p| p.phase_number.as_str())
            .collect();
        assert_eq!(order, vec!["1", "2", "10"]);
    }

    #[test]
    fn plan_counts_and_lookup() {
        let mut phase = Phase::new(1, "Setup");
        phase.tasks.push(Task::new("1.1", "a"));
        phase.tasks.push(Task::new("1.2", "b"));
        let plan = AllocationPlan { phases: vec![phase] };

        assert_eq!(plan.task_count(), 2);
        assert!(!plan.is_empty());
        assert!(plan.phase(&PhaseNumber::from(1u32)).is_some());
        assert!(plan.phase(&PhaseNumber::from(2u32)).is_none());
        assert_eq!(plan.phases[0].label(), "1. Setup");
    }
}
