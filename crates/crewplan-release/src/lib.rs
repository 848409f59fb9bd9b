//! crewplan Release
//!
//! Takes flattened tasks from a parsed plan to a task board, one phase at a
//! time.
//!
//! # Pipeline
//!
//! 1. [`segment`] buckets tasks by the leading digits of their phase label
//! 2. [`ReleaseWorkflow`] releases buckets in integer key order through a
//!    [`BoardClient`], waiting for each phase's cards to complete
//! 3. [`PhaseRelease`] tracks progress and can be read concurrently
//!
//! # Example
//!
//! ```rust
//! use crewplan_model::FlatTask;
//! use crewplan_release::segment;
//!
//! let buckets = segment(vec![
//!     FlatTask::new("Design", "2. Design"),
//!     FlatTask::new("Launch", "10. Launch"),
//!     FlatTask::new("Loose end", ""),
//! ]);
//!
//! assert_eq!(buckets.sorted_keys(), vec!["0", "2", "10"]);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod board;
pub mod error;
pub mod segment;
pub mod state;
pub mod workflow;

pub use board::{BoardClient, Card, CardId, ListId, NewCard};
pub use error::{BoardError, ReleaseError, StateMachineError};
pub use segment::{phase_key, segment, PhaseBuckets, DEFAULT_PHASE_KEY};
pub use state::{validate_transition, PhaseRelease, ReleaseSnapshot, ReleaseState};
pub use workflow::{ReleaseConfig, ReleaseReport, ReleaseWorkflow, DEFAULT_BOARD};
