//! crewplan Model
//!
//! Plain data structures shared by the parser, the segmenter, the store and
//! the release workflow.
//!
//! # Core Types
//!
//! - [`AllocationPlan`]: ordered phases, the parser's sole output
//! - [`Phase`]: a numbered, named group of tasks
//! - [`Task`]: one unit of work with assignment fields
//! - [`FlatTask`]: a task detached from its phase, tagged with a phase label
//!
//! # Sentinels
//!
//! Missing data is never represented by empty strings once a plan has been
//! normalized: an empty assignment becomes [`UNASSIGNED`] and an empty
//! duration becomes [`TO_BE_DETERMINED`].
//!
//! # Example
//!
//! ```rust
//! use crewplan_model::{AllocationPlan, Phase, Task, UNASSIGNED};
//!
//! let mut phase = Phase::new(1, "Setup");
//! phase.tasks.push(Task::new("1.1", "Init repo"));
//!
//! let mut plan = AllocationPlan::new();
//! plan.phases.push(phase);
//! plan.normalize();
//!
//! assert_eq!(plan.phases[0].tasks[0].assigned_to, UNASSIGNED);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod de;
pub mod estimate;
pub mod flat;
pub mod plan;
mod render;

pub use flat::FlatTask;
pub use plan::{compare_numeric, join_names, AllocationPlan, Phase, PhaseNumber, Task};

/// Assignment sentinel for tasks nobody has been given
pub const UNASSIGNED: &str = "Unassigned";

/// Duration sentinel for tasks without an estimate
pub const TO_BE_DETERMINED: &str = "To Be Determined";

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
