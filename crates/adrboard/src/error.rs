//! Error types for adrboard.
//!
//! Lookups never fail: an unknown id is an absent value, not an error. The
//! variants here cover the edges of the system, where datasets are read,
//! configuration is loaded and drafts are generated.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for adrboard operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Dataset Errors ===
    /// Failed to read a dataset file.
    #[error("failed to read dataset at {path}: {source}")]
    DatasetRead {
        /// Path to the dataset file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A dataset could not be parsed.
    #[error("failed to parse dataset {origin}: {source}")]
    DatasetParse {
        /// Where the dataset came from (a path or "built-in seed").
        origin: String,
        /// The underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// Two records in a dataset share an id.
    #[error("duplicate {kind} id in dataset: {id}")]
    DuplicateId {
        /// Kind of record ("adr", "policy trigger", ...).
        kind: &'static str,
        /// The repeated id.
        id: String,
    },

    /// A record references an id that does not exist, and strict
    /// reference checking is enabled.
    #[error("{adr_id} has a dangling {link} reference to {target}")]
    DanglingReference {
        /// The referencing ADR.
        adr_id: String,
        /// Which link holds the reference.
        link: &'static str,
        /// The missing id.
        target: String,
    },

    /// A record field is outside its allowed range.
    #[error("invalid adr {id}: {message}")]
    InvalidRecord {
        /// The offending ADR.
        id: String,
        /// Which constraint was violated.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Generation Errors ===
    /// A draft generation is already running.
    #[error("a draft generation is already in progress")]
    GenerationInProgress,

    /// A draft generation was cancelled before it completed.
    #[error("draft generation cancelled")]
    GenerationCancelled,

    /// The generation task stopped unexpectedly.
    #[error("draft generation failed: {0}")]
    Generation(String),
}

/// A specialized Result type for adrboard operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new generation error.
    #[must_use]
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation(message.into())
    }

    /// Create a dangling reference error.
    #[must_use]
    pub fn dangling_reference(
        adr_id: impl Into<String>,
        link: &'static str,
        target: impl Into<String>,
    ) -> Self {
        Self::DanglingReference {
            adr_id: adr_id.into(),
            link,
            target: target.into(),
        }
    }

    /// Create an invalid record error.
    #[must_use]
    pub fn invalid_record(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidRecord {
            id: id.into(),
            message: message.into(),
        }
    }

    /// Check if this error was caused by cancelling a generation.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::GenerationCancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::GenerationInProgress;
        assert_eq!(err.to_string(), "a draft generation is already in progress");

        let err = Error::GenerationCancelled;
        assert_eq!(err.to_string(), "draft generation cancelled");
    }

    #[test]
    fn test_generation_error() {
        let err = Error::generation("task panicked");
        assert_eq!(err.to_string(), "draft generation failed: task panicked");
    }

    #[test]
    fn test_is_cancelled() {
        assert!(Error::GenerationCancelled.is_cancelled());
        assert!(!Error::GenerationInProgress.is_cancelled());
    }

    #[test]
    fn test_dangling_reference_display() {
        let err = Error::dangling_reference("adr-003", "supersededBy", "adr-099");
        let msg = err.to_string();
        assert!(msg.contains("adr-003"));
        assert!(msg.contains("supersededBy"));
        assert!(msg.contains("adr-099"));
    }

    #[test]
    fn test_duplicate_id_display() {
        let err = Error::DuplicateId {
            kind: "adr",
            id: "adr-001".to_string(),
        };
        assert_eq!(err.to_string(), "duplicate adr id in dataset: adr-001");
    }

    #[test]
    fn test_dataset_read_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = Error::DatasetRead {
            path: PathBuf::from("/data/adrs.json"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("/data/adrs.json"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_invalid_record_display() {
        let err = Error::invalid_record("adr-004", "number must be at least 1");
        assert_eq!(
            err.to_string(),
            "invalid adr adr-004: number must be at least 1"
        );
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::ConfigValidation {
            message: "recent_limit must be greater than 0".to_string(),
        };
        assert!(err.to_string().contains("recent_limit"));
    }
}
