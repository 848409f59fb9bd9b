//! Flattened task records
//!
//! The sync step works on tasks detached from their phase. Each record keeps
//! the phase as a label string (`"2. Design"`), which the segmenter scans for
//! its leading digits.

use crate::de;
use crate::plan::{AllocationPlan, Phase, Task};
use crate::{TO_BE_DETERMINED, UNASSIGNED};
use serde::{Deserialize, Serialize};

/// A task record without its enclosing phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatTask {
    /// Identifier from the plan, if the writer kept it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    /// Task title
    pub task_name: String,
    /// Comma-joined assignee names
    #[serde(default, deserialize_with = "de::string_or_seq")]
    pub assigned_to: String,
    /// Free-text duration
    #[serde(default, deserialize_with = "de::string_or_null")]
    pub duration: String,
    /// Resource names
    #[serde(default, deserialize_with = "de::resource_list")]
    pub resources: Vec<String>,
    /// Phase label such as `"2. Design"`; may be empty
    #[serde(default, deserialize_with = "de::string_or_null")]
    pub phase: String,
}

impl FlatTask {
    /// Create a record with only a name and phase label
    #[inline]
    #[must_use]
    pub fn new(task_name: impl Into<String>, phase: impl Into<String>) -> Self {
        Self {
            task_id: None,
            task_name: task_name.into(),
            assigned_to: UNASSIGNED.to_string(),
            duration: TO_BE_DETERMINED.to_string(),
            resources: Vec::new(),
            phase: phase.into(),
        }
    }

    /// Detach a task from its phase
    #[must_use]
    pub fn from_task(phase: &Phase, task: &Task) -> Self {
        Self {
            task_id: Some(task.task_id.clone()).filter(|id| !id.is_empty()),
            task_name: task.task_name.clone(),
            assigned_to: task.assigned_to.clone(),
            duration: task.duration.clone(),
            resources: task.resources.clone(),
            phase: phase.label(),
        }
    }

    /// Replace empty assignment and duration with their sentinels
    pub fn normalize(&mut self) {
        if self.assigned_to.trim().is_empty() {
            self.assigned_to = UNASSIGNED.to_string();
        }
        if self.duration.trim().is_empty() {
            self.duration = TO_BE_DETERMINED.to_string();
        }
    }

    /// First assignee, unless the task is unassigned
    #[must_use]
    pub fn primary_assignee(&self) -> Option<&str> {
        let value = self.assigned_to.trim();
        if value.is_empty() || value == UNASSIGNED {
            return None;
        }
        value.split(',').map(str::trim).find(|n| !n.is_empty())
    }
}

impl AllocationPlan {
    /// Concatenate every phase's tasks, in phase then task order
    #[must_use]
    pub fn flatten(&self) -> Vec<FlatTask> {
        self.phases
            .iter()
            .flat_map(|phase| phase.tasks.iter().map(move |task| FlatTask::from_task(phase, task)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn flatten_keeps_order_and_labels() {
        let mut design = Phase::new(2, "Design");
        design.tasks.push(Task::new("2.1", "Wireframes").with_assignees(&["Ana"]));
        let mut setup = Phase::new(1, "Setup");
        setup.tasks.push(Task::new("1.1", "Init repo"));
        setup.tasks.push(Task::new("1.2", "CI"));

        let plan = AllocationPlan {
            phases: vec![design, setup],
        };
        let flat = plan.flatten();

        let names: Vec<&str> = flat.iter().map(|t| t.task_name.as_str()).collect();
        assert_eq!(names, vec!["Wireframes", "Init repo", "CI"]);
        assert_eq!(flat[0].phase, "2. Design");
        assert_eq!(flat[1].phase, "1. Setup");
        assert_eq!(flat[0].task_id.as_deref(), Some("2.1"));
    }

    #[test]
    fn missing_phase_deserializes_empty() {
        let task: FlatTask =
            serde_json::from_str(r#"{"task_name": "Kickoff", "assigned_to": "Rachel"}"#).unwrap();
        assert_eq!(task.phase, "");
        assert_eq!(task.duration, "");
    }

    #[test]
    fn primary_assignee() {
        let mut task = FlatTask::new("x", "1. Setup");
        assert_eq!(task.primary_assignee(), None);

        task.assigned_to = "Alice, Bob".to_string();
        assert_eq!(task.primary_assignee(), Some("Alice"));
    }
}
