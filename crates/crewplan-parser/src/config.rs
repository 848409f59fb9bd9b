//! Parser configuration
//!
//! Label synonyms and placeholder values are data, not code: a new phrasing
//! from the planning model is handled by editing a YAML or TOML file.
//!
//! ```yaml
//! synonyms:
//!   assignment: ["assigned to", "assignee", "owner"]
//! placeholders: ["none", "n/a", "tbd", "to be determined", "pending"]
//! ```
//!
//! Fields left out of the file keep their defaults.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Task field a detail label maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetailField {
    /// `assigned_to`
    Assignment,
    /// `duration`
    Duration,
    /// `resources`
    Resource,
    /// `dependencies`
    Dependency,
}

/// Substring synonyms per detail field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelSynonyms {
    /// Labels that populate `assigned_to`
    pub assignment: Vec<String>,
    /// Labels that populate `duration`
    pub duration: Vec<String>,
    /// Labels that populate `resources`
    pub resource: Vec<String>,
    /// Labels that populate `dependencies`
    pub dependency: Vec<String>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

impl Default for LabelSynonyms {
    fn default() -> Self {
        Self {
            assignment: strings(&["assigned to", "assignee", "responsible", "team member"]),
            duration: strings(&[
                "duration",
                "time",
                "timeframe",
                "timeline",
                "period",
                "estimated time",
            ]),
            resource: strings(&["resource", "tools", "materials", "equipment"]),
            dependency: strings(&["dependencies", "dependency", "depends on", "prerequisite"]),
        }
    }
}

impl LabelSynonyms {
    /// Map a lower-cased label to its field
    ///
    /// Sets are checked in the order assignment, duration, resource,
    /// dependency; the first set with a synonym contained in the label wins.
    #[must_use]
    pub fn classify(&self, label: &str) -> Option<DetailField> {
        let sets = [
            (DetailField::Assignment, &self.assignment),
            (DetailField::Duration, &self.duration),
            (DetailField::Resource, &self.resource),
            (DetailField::Dependency, &self.dependency),
        ];
        sets.into_iter()
            .find(|(_, synonyms)| synonyms.iter().any(|s| label.contains(s.as_str())))
            .map(|(field, _)| field)
    }

    fn lowercased(&self) -> Self {
        let lower = |set: &[String]| -> Vec<String> {
            set.iter()
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect()
        };
        Self {
            assignment: lower(&self.assignment),
            duration: lower(&self.duration),
            resource: lower(&self.resource),
            dependency: lower(&self.dependency),
        }
    }
}

/// Configuration for [`AllocationParser`](crate::AllocationParser)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Label synonym sets
    pub synonyms: LabelSynonyms,
    /// Values treated as "no value" (compared case-insensitively)
    pub placeholders: Vec<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            synonyms: LabelSynonyms::default(),
            placeholders: strings(&["none", "n/a", "to be determined", "tbd"]),
        }
    }
}

impl ParserConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a `.yaml`, `.yml` or `.toml` file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::io_error(path, e))?;

        match extension.as_str() {
            "yaml" | "yml" => Self::from_yaml_str(&content),
            "toml" => Self::from_toml_str(&content),
            other => Err(ConfigError::UnsupportedExtension(other.to_string())),
        }
    }

    /// Parse YAML configuration
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse TOML configuration
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that would silently disable a core field
    ///
    /// The dependency set may be empty; it only disables dependency capture.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let synonyms = self.synonyms.lowercased();
        if synonyms.assignment.is_empty() {
            return Err(ConfigError::EmptySynonymSet("assignment"));
        }
        if synonyms.duration.is_empty() {
            return Err(ConfigError::EmptySynonymSet("duration"));
        }
        if synonyms.resource.is_empty() {
            return Err(ConfigError::EmptySynonymSet("resource"));
        }
        Ok(())
    }

    /// Whether a trimmed value means "nothing"
    ///
    /// Empty values always count; a trailing period is ignored.
    #[must_use]
    pub fn is_placeholder(&self, value: &str) -> bool {
        let value = value.trim().trim_end_matches('.').trim().to_lowercase();
        value.is_empty() || self.placeholders.iter().any(|p| *p == value)
    }

    /// Copy with every synonym and placeholder lower-cased and trimmed
    pub(crate) fn normalized(&self) -> Self {
        Self {
            synonyms: self.synonyms.lowercased(),
            placeholders: self
                .placeholders
                .iter()
                .map(|p| p.trim().to_lowercase())
                .filter(|p| !p.is_empty())
                .collect(),
        }
    }
}
