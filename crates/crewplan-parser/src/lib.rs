//! crewplan Parser
//!
//! Turns the loosely structured markdown a planning model writes into an
//! [`AllocationPlan`]. The input has no fixed grammar, so every line kind is
//! recognised by a short ordered list of matchers and anything unmatched is
//! skipped.
//!
//! # Line kinds
//!
//! - **Phase header**: `**Phase 1: Setup**`, `## Setup (Phase 1)`,
//!   `### 2. Design Phase`
//! - **Task header**: `* Task 1.1: Init repo`, `### 1.3 Deploy`
//! - **Detail**: `- **Assigned to:** Alice`, `+ Estimated time: 2 days`
//!
//! Detail labels are mapped to fields through substring synonym sets held in
//! [`ParserConfig`], which can be loaded from YAML or TOML.
//!
//! # Example
//!
//! ```rust
//! let plan = crewplan_parser::parse(
//!     "**Phase 1: Setup**\n* Task 1.1: Init repo\n\t+ Assigned to: Alice\n\t+ Estimated time: 2 days",
//! );
//!
//! assert_eq!(plan.phases.len(), 1);
//! assert_eq!(plan.phases[0].tasks[0].assigned_to, "Alice");
//! assert_eq!(plan.phases[0].tasks[0].duration, "2 days");
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod config;
pub mod error;
mod parser;
mod patterns;
mod preprocess;

pub use config::{DetailField, LabelSynonyms, ParserConfig};
pub use error::ConfigError;
pub use parser::{AllocationParser, LineKind};
pub use preprocess::strip_fence;

use crewplan_model::AllocationPlan;
use once_cell::sync::Lazy;

static DEFAULT_PARSER: Lazy<AllocationParser> = Lazy::new(AllocationParser::default);

/// Parse with the default configuration
#[must_use]
pub fn parse(text: &str) -> AllocationPlan {
    DEFAULT_PARSER.parse(text)
}
