//! Markdown rendering of a plan
//!
//! Emits the layout the planning agent is prompted to produce, so a rendered
//! plan parses back into an equal plan.

use crate::plan::AllocationPlan;
use std::fmt::Write as _;

impl AllocationPlan {
    /// Render as allocation-plan markdown
    ///
    /// ```text
    /// **Phase 1: Setup**
    ///
    /// * Task 1.1: Init repo
    ///     + Assigned to: Alice
    ///     + Estimated time: 2 days
    /// ```
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        for phase in &self.phases {
            let _ = writeln!(out, "**Phase {}: {}**", phase.phase_number, phase.phase_name);
            out.push('\n');
            for task in &phase.tasks {
                if task.task_name.ends_with(')') {
                    // Inside bold, a closing parenthetical is part of the name
                    let _ = writeln!(out, "* Task {}: **{}**", task.task_id, task.task_name);
                } else {
                    let _ = writeln!(out, "* Task {}: {}", task.task_id, task.task_name);
                }
                let _ = writeln!(out, "\t+ Assigned to: {}", task.assigned_to);
                let _ = writeln!(out, "\t+ Estimated time: {}", task.duration);
                if !task.resources.is_empty() {
                    let _ = writeln!(out, "\t+ Resources: {}", task.resources.join(", "));
                }
                if !task.dependencies.is_empty() {
                    let _ = writeln!(out, "\t+ Dependencies: {}", task.dependencies.join(", "));
                }
                out.push('\n');
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use crate::{AllocationPlan, Phase, Task};

    #[test]
    fn renders_phase_and_task_lines() {
        let mut phase = Phase::new(1, "Setup");
        phase.tasks.push(
            Task::new("1.1", "Init repo")
                .with_assignees(&["Alice"])
                .with_duration("2 days")
                .with_resources(&["GitHub"]),
        );
        let plan = AllocationPlan { phases: vec![phase] };

        let md = plan.to_markdown();
        assert!(md.starts_with("**Phase 1: Setup**\n\n"));
        assert!(md.contains("* Task 1.1: Init repo\n"));
        assert!(md.contains("\t+ Assigned to: Alice\n"));
        assert!(md.contains("\t+ Estimated time: 2 days\n"));
        assert!(md.contains("\t+ Resources: GitHub\n"));
        assert!(!md.contains("Dependencies"));
    }

    #[test]
    fn trailing_parenthetical_in_task_name_is_bolded() {
        let mut phase = Phase::new(3, "Release (EU)");
        phase.tasks.push(Task::new("3.1", "Deploy (staging)"));
        phase.tasks.push(Task::new("3.2", "Smoke tests"));
        let plan = AllocationPlan { phases: vec![phase] };

        let md = plan.to_markdown();
        assert!(md.starts_with("**Phase 3: Release (EU)**\n"));
        assert!(md.contains("* Task 3.1: **Deploy (staging)**\n"));
        assert!(md.contains("* Task 3.2: Smoke tests\n"));
    }

    #[test]
    fn empty_plan_renders_nothing() {
        assert_eq!(AllocationPlan::new().to_markdown(), "");
    }
}
