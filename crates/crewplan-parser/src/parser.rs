//! Allocation plan parser
//!
//! Lines are classified without context, then folded into a plan by a small
//! cursor state machine: a task header needs a current phase, a detail line
//! needs a current task.

use crate::config::{DetailField, ParserConfig};
use crate::patterns::{clean, match_phase, match_task, split_list, LABEL_MATCHERS};
use crate::preprocess::content_lines;
use crewplan_model::{join_names, AllocationPlan, Phase, PhaseNumber, Task};
use crewplan_model::{TO_BE_DETERMINED, UNASSIGNED};
use tracing::{debug, info, trace, warn};

/// What a single trimmed line is, independent of its position
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// Phase heading
    Phase {
        /// Leading integer, as text
        number: String,
        /// Heading name
        name: String,
    },
    /// Task heading
    Task {
        /// Dotted identifier such as `1.1`
        id: String,
        /// Task title
        name: String,
    },
    /// Labeled task detail with its raw value
    Detail {
        /// Field the label maps to
        field: DetailField,
        /// Trimmed value, possibly a placeholder
        value: String,
    },
    /// Anything else
    Unrecognized,
}

/// Parser for allocation plans written by a planning model
///
/// Parsing never fails. Unrecognized lines are skipped and an input without
/// any phase header yields an empty plan.
#[derive(Debug, Clone)]
pub struct AllocationParser {
    config: ParserConfig,
}

impl Default for AllocationParser {
    fn default() -> Self {
        Self::new(&ParserConfig::default())
    }
}

impl AllocationParser {
    /// Create a parser with the given configuration
    #[must_use]
    pub fn new(config: &ParserConfig) -> Self {
        Self {
            config: config.normalized(),
        }
    }

    /// Active configuration, with synonyms lower-cased
    #[inline]
    #[must_use]
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Classify one trimmed line
    ///
    /// Phase headers win over task headers, which win over details.
    #[must_use]
    pub fn classify(&self, line: &str) -> LineKind {
        if let Some((number, name)) = match_phase(line) {
            return LineKind::Phase { number, name };
        }
        if let Some((id, name)) = match_task(line) {
            return LineKind::Task { id, name };
        }
        self.classify_detail(line)
            .map_or(LineKind::Unrecognized, |(field, value)| LineKind::Detail {
                field,
                value,
            })
    }

    fn classify_detail(&self, line: &str) -> Option<(DetailField, String)> {
        let labeled = LABEL_MATCHERS.iter().find_map(|m| {
            let (label, value) = m.captures(line)?;
            let field = self.config.synonyms.classify(&label)?;
            trace!("Detail label '{}' read as {:?} by {}", label, field, m.name);
            Some((field, value))
        });
        labeled.or_else(|| fallback_detail(line))
    }

    /// Parse markdown text into a normalized plan
    #[must_use]
    pub fn parse(&self, text: &str) -> AllocationPlan {
        let mut builder = PlanBuilder::new(&self.config);
        for (line_no, line) in content_lines(text) {
            builder.push(line_no, self.classify(line));
        }
        let plan = builder.finish();

        if plan.is_empty() {
            warn!("No phase headers found in {} bytes of plan text", text.len());
        } else {
            info!(
                "Parsed {} phases with {} tasks",
                plan.phases.len(),
                plan.task_count()
            );
            if let Some(task) = plan.phases.iter().flat_map(|p| p.tasks.iter()).next() {
                debug!(
                    "First task {} '{}': assigned to {}, duration {}, {} resources",
                    task.task_id,
                    task.task_name,
                    task.assigned_to,
                    task.duration,
                    task.resources.len()
                );
            }
        }
        plan
    }
}

/// Raw substring detection for lines the label matchers could not place
fn fallback_detail(line: &str) -> Option<(DetailField, String)> {
    let (_, value) = line.split_once(':')?;
    let lower = line.to_lowercase();
    let field = if lower.contains("assigned to") {
        DetailField::Assignment
    } else if lower.contains("duration") {
        DetailField::Duration
    } else {
        return None;
    };
    trace!("Detail read as {:?} by substring fallback", field);
    Some((field, clean(value).to_string()))
}

#[derive(Debug, Clone, Copy)]
enum Cursor {
    /// Before the first phase header
    Outside,
    /// After a phase header, before any task of it
    InPhase(usize),
    /// Details go to the last task of this phase
    InTask(usize),
}

struct TaskDraft {
    task: Task,
    assignees: Vec<String>,
}

struct PhaseDraft {
    number: PhaseNumber,
    name: String,
    tasks: Vec<TaskDraft>,
}

struct PlanBuilder<'a> {
    config: &'a ParserConfig,
    phases: Vec<PhaseDraft>,
    cursor: Cursor,
}

impl<'a> PlanBuilder<'a> {
    fn new(config: &'a ParserConfig) -> Self {
        Self {
            config,
            phases: Vec::new(),
            cursor: Cursor::Outside,
        }
    }

    fn push(&mut self, line_no: usize, kind: LineKind) {
        match kind {
            LineKind::Phase { number, name } => self.start_phase(line_no, number, name),
            LineKind::Task { id, name } => self.start_task(line_no, id, name),
            LineKind::Detail { field, value } => {
                if let Cursor::InTask(phase) = self.cursor {
                    if let Some(draft) = self.phases[phase].tasks.last_mut() {
                        apply_detail(self.config, draft, field, &value);
                    }
                }
            }
            LineKind::Unrecognized => {}
        }
    }

    fn start_phase(&mut self, line_no: usize, number: String, name: String) {
        let number = PhaseNumber::new(number);
        let index = match self.phases.iter().position(|p| p.number == number) {
            Some(existing) => {
                debug!("Line {}: repeated header for phase {}, continuing it", line_no, number);
                existing
            }
            None => {
                debug!("Line {}: phase {} '{}'", line_no, number, name);
                self.phases.push(PhaseDraft {
                    number,
                    name,
                    tasks: Vec::new(),
                });
                self.phases.len() - 1
            }
        };
        self.cursor = Cursor::InPhase(index);
    }

    fn start_task(&mut self, line_no: usize, id: String, name: String) {
        let phase = match self.cursor {
            Cursor::InPhase(phase) | Cursor::InTask(phase) => phase,
            Cursor::Outside => {
                debug!("Line {}: task {} before any phase, dropped", line_no, id);
                return;
            }
        };
        debug!("Line {}: task {} '{}'", line_no, id, name);
        self.phases[phase].tasks.push(TaskDraft {
            task: Task::new(id, name),
            assignees: Vec::new(),
        });
        self.cursor = Cursor::InTask(phase);
    }

    fn finish(self) -> AllocationPlan {
        let phases = self
            .phases
            .into_iter()
            .map(|draft| {
                let mut phase = Phase::new(draft.number, draft.name);
                phase.tasks = draft
                    .tasks
                    .into_iter()
                    .map(|TaskDraft { mut task, assignees }| {
                        task.assigned_to = join_names(&assignees);
                        task
                    })
                    .collect();
                phase
            })
            .collect();

        let mut plan = AllocationPlan { phases };
        plan.normalize();
        plan
    }
}

fn apply_detail(config: &ParserConfig, draft: &mut TaskDraft, field: DetailField, value: &str) {
    let placeholder = config.is_placeholder(value);
    match field {
        DetailField::Assignment => {
            if placeholder {
                if draft.assignees.is_empty() {
                    draft.assignees.push(UNASSIGNED.to_string());
                }
                return;
            }
            let names = split_list(value);
            if names.is_empty() {
                return;
            }
            if draft.assignees.iter().all(|n| n == UNASSIGNED) {
                draft.assignees.clear();
            }
            draft.assignees.extend(names);
        }
        DetailField::Duration => {
            if placeholder {
                if draft.task.duration.is_empty() {
                    draft.task.duration = TO_BE_DETERMINED.to_string();
                }
            } else {
                draft.task.duration = value.trim().to_string();
            }
        }
        DetailField::Resource => {
            if !placeholder {
                draft.task.resources.extend(split_list(value));
            }
        }
        DetailField::Dependency => {
            if !placeholder {
                draft.task.dependencies.extend(split_list(value));
            }
        }
    }
}
