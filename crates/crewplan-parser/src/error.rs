//! Error types for parser configuration
//!
//! Parsing itself never fails; only loading a [`ParserConfig`] from disk
//! can.
//!
//! [`ParserConfig`]: crate::ParserConfig

use std::path::PathBuf;

/// Errors while loading parser configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error during file read
    #[error("io error reading {path}: {source}")]
    Io {
        /// File that failed to read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Malformed YAML
    #[error("invalid yaml config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Malformed TOML
    #[error("invalid toml config: {0}")]
    Toml(#[from] toml::de::Error),

    /// File extension is neither YAML nor TOML
    #[error("unsupported config extension: '{0}'")]
    UnsupportedExtension(String),

    /// A synonym set was configured but left empty
    #[error("synonym set '{0}' is empty")]
    EmptySynonymSet(&'static str),
}

impl ConfigError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::UnsupportedExtension("ini".to_string());
        assert_eq!(err.to_string(), "unsupported config extension: 'ini'");

        let err = ConfigError::EmptySynonymSet("duration");
        assert_eq!(err.to_string(), "synonym set 'duration' is empty");
    }

    #[test]
    fn io_error_keeps_path() {
        let err = ConfigError::io_error(
            "labels.yaml",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert!(err.to_string().contains("labels.yaml"));
    }
}
