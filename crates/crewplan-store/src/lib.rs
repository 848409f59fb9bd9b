//! crewplan Store
//!
//! One JSON file carries a plan from the planning step to the sync step. It
//! holds either flattened tasks or the nested plan:
//!
//! ```json
//! {"tasks": [{"task_name": "Init repo", "phase": "1. Setup", ...}]}
//! {"phases": [{"phase_number": 1, "phase_name": "Setup", "tasks": [...]}]}
//! ```
//!
//! [`PlanStore::load`] accepts both; [`PlanStore::load_tasks`] always
//! returns flattened, normalized tasks.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod error;

pub use error::StoreError;

use crewplan_model::{AllocationPlan, FlatTask};
use serde::Serialize;
use serde_json::Value;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Contents of a hand-off file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanDocument {
    /// `{"tasks": [...]}`
    Flat(Vec<FlatTask>),
    /// `{"phases": [...]}`
    Nested(AllocationPlan),
}

impl PlanDocument {
    /// Flattened, normalized tasks in document order
    #[must_use]
    pub fn into_tasks(self) -> Vec<FlatTask> {
        match self {
            Self::Flat(mut tasks) => {
                tasks.iter_mut().for_each(FlatTask::normalize);
                tasks
            }
            Self::Nested(mut plan) => {
                plan.normalize();
                plan.flatten()
            }
        }
    }
}

#[derive(Serialize)]
struct FlatFile<'a> {
    tasks: &'a [FlatTask],
}

/// Hand-off file at a fixed path
#[derive(Debug, Clone)]
pub struct PlanStore {
    path: PathBuf,
}

impl PlanStore {
    /// Create store for a file path
    #[inline]
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File path
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the nested plan
    pub fn save_plan(&self, plan: &AllocationPlan) -> Result<(), StoreError> {
        self.write_json(plan)
    }

    /// Write flattened tasks
    pub fn save_tasks(&self, tasks: &[FlatTask]) -> Result<(), StoreError> {
        self.write_json(&FlatFile { tasks })
    }

    /// Read the file in whichever shape it was written
    ///
    /// A document with both keys is read as flat tasks.
    pub fn load(&self) -> Result<PlanDocument, StoreError> {
        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| StoreError::io(&self.path, e))?;
        let value: Value =
            serde_json::from_str(&content).map_err(|e| StoreError::json(&self.path, e))?;

        let document = if value.get("tasks").is_some_and(Value::is_array) {
            let tasks = value.get("tasks").cloned().unwrap_or_default();
            PlanDocument::Flat(
                serde_json::from_value(tasks).map_err(|e| StoreError::json(&self.path, e))?,
            )
        } else if value.get("phases").is_some_and(Value::is_array) {
            PlanDocument::Nested(
                serde_json::from_value(value).map_err(|e| StoreError::json(&self.path, e))?,
            )
        } else {
            return Err(StoreError::UnrecognizedShape {
                path: self.path.clone(),
            });
        };

        tracing::debug!("Loaded {} from {}", document.kind(), self.path.display());
        Ok(document)
    }

    /// Read flattened, normalized tasks from either shape
    pub fn load_tasks(&self) -> Result<Vec<FlatTask>, StoreError> {
        Ok(self.load()?.into_tasks())
    }

    /// Pretty JSON to a sibling temp file, then rename over the target
    fn write_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<(), StoreError> {
        let json =
            serde_json::to_string_pretty(value).map_err(|e| StoreError::json(&self.path, e))?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir).map_err(|e| StoreError::io(dir, e))?;

        let mut temp = tempfile::NamedTempFile::new_in(dir).map_err(|e| StoreError::io(dir, e))?;
        temp.write_all(json.as_bytes())
            .and_then(|()| temp.write_all(b"\n"))
            .and_then(|()| temp.as_file().sync_all())
            .map_err(|e| StoreError::io(temp.path(), e))?;
        temp.persist(&self.path)
            .map_err(|e| StoreError::io(&self.path, e.error))?;

        tracing::info!("Wrote {}", self.path.display());
        Ok(())
    }
}

impl PlanDocument {
    fn kind(&self) -> &'static str {
        match self {
            Self::Flat(_) => "flat tasks",
            Self::Nested(_) => "nested plan",
        }
    }
}
