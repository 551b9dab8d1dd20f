//! Dataset loading.
//!
//! A dataset bundles the ADRs with the policy triggers, templates and
//! timeline events that accompany them. The seed dataset is compiled into
//! the binary; a JSON file with the same shape can replace it.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::adr::{Adr, AdrTemplate, PolicyTrigger, TimelineEvent};
use crate::error::{Error, Result};

/// The seed dataset shipped with adrboard.
const SEED_JSON: &str = include_str!("../../data/seed.json");

/// Origin label used in errors for the seed dataset.
const SEED_ORIGIN: &str = "built-in seed";

/// All records loaded at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Dataset {
    /// ADRs in store order.
    pub adrs: Vec<Adr>,
    /// Policy triggers in their initial state.
    pub policy_triggers: Vec<PolicyTrigger>,
    /// Drafting templates.
    pub templates: Vec<AdrTemplate>,
    /// Logged status changes.
    pub timeline_events: Vec<TimelineEvent>,
}

impl Dataset {
    /// Parse the seed dataset compiled into the binary.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded JSON is malformed.
    pub fn seed() -> Result<Self> {
        Self::from_json(SEED_JSON, SEED_ORIGIN)
    }

    /// Read a dataset from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Reading dataset from {}", path.display());
        let json = std::fs::read_to_string(path).map_err(|source| Error::DatasetRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json, &path.display().to_string())
    }

    /// Parse a dataset from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not describe a dataset.
    pub fn from_json(json: &str, origin: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|source| Error::DatasetParse {
            origin: origin.to_string(),
            source,
        })
    }
}

impl From<Vec<Adr>> for Dataset {
    fn from(adrs: Vec<Adr>) -> Self {
        Self {
            adrs,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_parses() {
        let dataset = Dataset::seed().unwrap();
        assert_eq!(dataset.adrs.len(), 12);
        assert_eq!(dataset.policy_triggers.len(), 5);
        assert_eq!(dataset.templates.len(), 4);
        assert!(!dataset.timeline_events.is_empty());
    }

    #[test]
    fn test_seed_numbers_are_unique() {
        let dataset = Dataset::seed().unwrap();
        let mut numbers: Vec<_> = dataset.adrs.iter().map(|a| a.number).collect();
        numbers.sort_unstable();
        numbers.dedup();
        assert_eq!(numbers.len(), dataset.adrs.len());
    }

    #[test]
    fn test_from_json_missing_sections_default_to_empty() {
        let dataset = Dataset::from_json(r#"{"adrs": []}"#, "test").unwrap();
        assert!(dataset.adrs.is_empty());
        assert!(dataset.policy_triggers.is_empty());
        assert!(dataset.templates.is_empty());
    }

    #[test]
    fn test_from_json_invalid() {
        let err = Dataset::from_json("{ not json", "broken.json").unwrap_err();
        assert!(matches!(err, Error::DatasetParse { .. }));
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn test_from_file_missing() {
        let err = Dataset::from_file("/nonexistent/dataset.json").unwrap_err();
        assert!(matches!(err, Error::DatasetRead { .. }));
    }

    #[test]
    fn test_from_file_roundtrip() {
        let dataset = Dataset::seed().unwrap();
        let path = std::env::temp_dir()
            .join(format!("adrboard-dataset-{}.json", std::process::id()));
        std::fs::write(&path, serde_json::to_string(&dataset).unwrap()).unwrap();

        let loaded = Dataset::from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, dataset);
    }
}
