//! Record store for adrboard.
//!
//! The store holds the loaded dataset for the lifetime of the process. It is
//! immutable once built; every lookup borrows from it and an unknown id is
//! reported as `None`, never as an error.

pub mod dataset;

use std::collections::{HashMap, HashSet};
use std::fmt::Display;
use std::hash::Hash;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::adr::{Adr, AdrTemplate, PolicyTrigger, TimelineEvent, MAX_QUALITY_SCORE};
use crate::config::DatasetConfig;
use crate::error::{Error, Result};

pub use dataset::Dataset;

/// Immutable, ordered collection of ADRs with an id index.
#[derive(Debug, Clone)]
pub struct RecordStore {
    adrs: Vec<Adr>,
    /// Position of each ADR in `adrs`, keyed by id.
    index: HashMap<String, usize>,
    policy_triggers: Vec<PolicyTrigger>,
    templates: Vec<AdrTemplate>,
    timeline_events: Vec<TimelineEvent>,
}

/// The two ends of an ADR's supersession links, resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Supersession<'a> {
    /// The record this one replaced, if it exists in the store.
    pub supersedes: Option<&'a Adr>,
    /// The record that replaced this one, if it exists in the store.
    pub superseded_by: Option<&'a Adr>,
}

/// Which link of an ADR holds a reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LinkKind {
    /// The `supersedes` link.
    Supersedes,
    /// The `supersededBy` link.
    SupersededBy,
    /// An entry of `relatedADRs`.
    Related,
}

impl LinkKind {
    /// Field name as it appears in datasets.
    #[must_use]
    pub fn field_name(self) -> &'static str {
        match self {
            Self::Supersedes => "supersedes",
            Self::SupersededBy => "supersededBy",
            Self::Related => "relatedADRs",
        }
    }
}

impl std::fmt::Display for LinkKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.field_name())
    }
}

/// A reference to an id that is not in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DanglingReference {
    /// The ADR holding the reference.
    pub adr_id: String,
    /// Which link holds it.
    pub link: LinkKind,
    /// The id that does not resolve.
    pub target: String,
}

impl RecordStore {
    /// Build a store from a dataset.
    ///
    /// Dangling references are tolerated: they are logged and lookups
    /// through them return `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if two ADRs, policy triggers or templates share an
    /// id, if two ADRs share a number, or if an ADR has a zero number or a
    /// quality score above 100.
    pub fn from_dataset(dataset: Dataset) -> Result<Self> {
        let Dataset {
            adrs,
            policy_triggers,
            templates,
            timeline_events,
        } = dataset;

        let mut index = HashMap::with_capacity(adrs.len());
        for (position, adr) in adrs.iter().enumerate() {
            if index.insert(adr.id.clone(), position).is_some() {
                return Err(Error::DuplicateId {
                    kind: "adr",
                    id: adr.id.clone(),
                });
            }
            validate_adr(adr)?;
        }
        ensure_unique("adr number", adrs.iter().map(|adr| adr.number))?;
        ensure_unique(
            "policy trigger",
            policy_triggers.iter().map(|trigger| trigger.id.as_str()),
        )?;
        ensure_unique("template", templates.iter().map(|t| t.id.as_str()))?;

        let store = Self {
            adrs,
            index,
            policy_triggers,
            templates,
            timeline_events,
        };

        for dangling in store.dangling_references() {
            warn!(
                adr = %dangling.adr_id,
                link = %dangling.link,
                target = %dangling.target,
                "Dangling ADR reference"
            );
        }

        debug!(
            adrs = store.adrs.len(),
            policy_triggers = store.policy_triggers.len(),
            templates = store.templates.len(),
            timeline_events = store.timeline_events.len(),
            "Record store built"
        );
        Ok(store)
    }

    /// Build a store from a dataset, rejecting dangling references.
    ///
    /// # Errors
    ///
    /// Returns an error on any record [`RecordStore::from_dataset`] rejects,
    /// or on the first reference to an id that is not in the dataset.
    pub fn from_dataset_strict(dataset: Dataset) -> Result<Self> {
        let store = Self::from_dataset(dataset)?;
        if let Some(dangling) = store.dangling_references().into_iter().next() {
            return Err(Error::dangling_reference(
                dangling.adr_id,
                dangling.link.field_name(),
                dangling.target,
            ));
        }
        Ok(store)
    }

    /// Build a store holding only the given ADRs.
    ///
    /// # Errors
    ///
    /// Returns an error if two ADRs share an id or a number, or if an ADR
    /// fails field validation.
    pub fn from_adrs(adrs: Vec<Adr>) -> Result<Self> {
        Self::from_dataset(Dataset::from(adrs))
    }

    /// Build a store from the compiled-in seed dataset.
    ///
    /// # Errors
    ///
    /// Returns an error if the seed dataset is malformed.
    pub fn seed() -> Result<Self> {
        Self::from_dataset(Dataset::seed()?)
    }

    /// Load the store described by the dataset configuration.
    ///
    /// Uses the configured dataset file if one is set, otherwise the seed.
    ///
    /// # Errors
    ///
    /// Returns an error if the dataset cannot be read or parsed, fails record
    /// validation, or (in strict mode) contains dangling references.
    pub fn load(config: &DatasetConfig) -> Result<Self> {
        let dataset = match &config.path {
            Some(path) => Dataset::from_file(path)?,
            None => Dataset::seed()?,
        };

        let store = if config.strict_references {
            Self::from_dataset_strict(dataset)?
        } else {
            Self::from_dataset(dataset)?
        };

        match &config.path {
            Some(path) => info!("Loaded {} ADRs from {}", store.len(), path.display()),
            None => info!("Loaded {} ADRs from seed dataset", store.len()),
        }
        Ok(store)
    }

    /// All ADRs in store order.
    #[must_use]
    pub fn all(&self) -> &[Adr] {
        &self.adrs
    }

    /// Number of ADRs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.adrs.len()
    }

    /// Whether the store has no ADRs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.adrs.is_empty()
    }

    /// Look up an ADR by id.
    #[must_use]
    pub fn get_by_id(&self, id: &str) -> Option<&Adr> {
        self.index.get(id).map(|&position| &self.adrs[position])
    }

    /// Resolve the related ADRs of `adr`, dropping ids that do not resolve.
    ///
    /// The result preserves the order of `adr.related_adrs` and is never
    /// longer than it.
    #[must_use]
    pub fn resolve_related(&self, adr: &Adr) -> Vec<&Adr> {
        adr.related_adrs
            .iter()
            .filter_map(|id| self.get_by_id(id))
            .collect()
    }

    /// Resolve both supersession links of `adr`.
    #[must_use]
    pub fn resolve_supersession(&self, adr: &Adr) -> Supersession<'_> {
        Supersession {
            supersedes: adr.supersedes.as_deref().and_then(|id| self.get_by_id(id)),
            superseded_by: adr
                .superseded_by
                .as_deref()
                .and_then(|id| self.get_by_id(id)),
        }
    }

    /// ADRs that supersede, are superseded by, or relate to another record,
    /// in store order.
    #[must_use]
    pub fn lineage(&self) -> Vec<&Adr> {
        self.adrs.iter().filter(|adr| adr.has_lineage()).collect()
    }

    /// Every reference in the store whose target id is missing.
    #[must_use]
    pub fn dangling_references(&self) -> Vec<DanglingReference> {
        let mut dangling = Vec::new();
        for adr in &self.adrs {
            let links = adr
                .supersedes
                .iter()
                .map(|target| (LinkKind::Supersedes, target))
                .chain(
                    adr.superseded_by
                        .iter()
                        .map(|target| (LinkKind::SupersededBy, target)),
                )
                .chain(
                    adr.related_adrs
                        .iter()
                        .map(|target| (LinkKind::Related, target)),
                );

            for (link, target) in links {
                if !self.index.contains_key(target) {
                    dangling.push(DanglingReference {
                        adr_id: adr.id.clone(),
                        link,
                        target: target.clone(),
                    });
                }
            }
        }
        dangling
    }

    /// Policy triggers in their initial state.
    #[must_use]
    pub fn policy_triggers(&self) -> &[PolicyTrigger] {
        &self.policy_triggers
    }

    /// Drafting templates.
    #[must_use]
    pub fn templates(&self) -> &[AdrTemplate] {
        &self.templates
    }

    /// Look up a template by id.
    #[must_use]
    pub fn template_by_id(&self, id: &str) -> Option<&AdrTemplate> {
        self.templates.iter().find(|template| template.id == id)
    }

    /// Timeline events in dataset order.
    #[must_use]
    pub fn timeline_events(&self) -> &[TimelineEvent] {
        &self.timeline_events
    }
}

/// Fail with [`Error::InvalidRecord`] if a field of `adr` is out of range.
fn validate_adr(adr: &Adr) -> Result<()> {
    if adr.number == 0 {
        return Err(Error::invalid_record(&adr.id, "number must be at least 1"));
    }
    match adr.quality_score {
        Some(score) if score > MAX_QUALITY_SCORE => {
            let message = format!("quality score {score} exceeds {MAX_QUALITY_SCORE}");
            Err(Error::invalid_record(&adr.id, message))
        }
        _ => Ok(()),
    }
}

/// Fail with [`Error::DuplicateId`] on the first repeated id.
fn ensure_unique<T>(kind: &'static str, ids: impl Iterator<Item = T>) -> Result<()>
where
    T: Eq + Hash + Display,
{
    let mut seen = HashSet::new();
    for id in ids {
        if seen.contains(&id) {
            return Err(Error::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
        seen.insert(id);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adr::fixtures::adr;
    use crate::adr::Severity;

    fn create_test_store() -> RecordStore {
        RecordStore::seed().expect("failed to load seed store")
    }

    #[test]
    fn test_seed_store() {
        let store = create_test_store();
        assert_eq!(store.len(), 12);
        assert!(!store.is_empty());
    }

    #[test]
    fn test_get_by_id_round_trip() {
        let store = create_test_store();
        for record in store.all() {
            assert_eq!(store.get_by_id(&record.id), Some(record));
        }
    }

    #[test]
    fn test_get_by_id_unknown() {
        let store = create_test_store();
        assert!(store.get_by_id("adr-999").is_none());
        assert!(store.get_by_id("").is_none());
    }

    #[test]
    fn test_duplicate_adr_id_rejected() {
        let result = RecordStore::from_adrs(vec![adr("a1", 1, "One"), adr("a1", 2, "Two")]);
        let err = result.unwrap_err();
        assert!(matches!(err, Error::DuplicateId { kind: "adr", .. }));
    }

    #[test]
    fn test_duplicate_adr_number_rejected() {
        let result = RecordStore::from_adrs(vec![adr("a1", 7, "One"), adr("a2", 7, "Two")]);
        let err = result.unwrap_err();
        assert!(matches!(err, Error::DuplicateId { kind: "adr number", ref id } if id == "7"));
    }

    #[test]
    fn test_zero_adr_number_rejected() {
        let err = RecordStore::from_adrs(vec![adr("a1", 0, "Zero")]).unwrap_err();
        assert!(matches!(err, Error::InvalidRecord { ref id, .. } if id == "a1"));
        assert!(err.to_string().contains("number must be at least 1"));
    }

    #[test]
    fn test_quality_score_out_of_range_rejected() {
        let mut a1 = adr("a1", 1, "One");
        a1.quality_score = Some(250);
        let err = RecordStore::from_adrs(vec![a1]).unwrap_err();
        assert!(matches!(err, Error::InvalidRecord { ref id, .. } if id == "a1"));
        assert!(err.to_string().contains("quality score 250"));

        let mut a1 = adr("a1", 1, "One");
        a1.quality_score = Some(100);
        assert!(RecordStore::from_adrs(vec![a1]).is_ok());
    }

    #[test]
    fn test_duplicate_policy_id_rejected() {
        let trigger = PolicyTrigger {
            id: "p1".to_string(),
            name: "n".to_string(),
            description: "d".to_string(),
            pattern: "*".to_string(),
            severity: Severity::Info,
            enabled: true,
        };
        let dataset = Dataset {
            policy_triggers: vec![trigger.clone(), trigger],
            ..Dataset::default()
        };
        let err = RecordStore::from_dataset(dataset).unwrap_err();
        assert!(matches!(err, Error::DuplicateId { kind: "policy trigger", .. }));
    }

    #[test]
    fn test_resolve_related_drops_unknown() {
        let mut a1 = adr("a1", 1, "One");
        a1.related_adrs = vec!["a2".to_string(), "missing".to_string(), "a3".to_string()];
        let store =
            RecordStore::from_adrs(vec![a1.clone(), adr("a2", 2, "Two"), adr("a3", 3, "Three")])
                .unwrap();

        let related: Vec<_> = store
            .resolve_related(&a1)
            .iter()
            .map(|a| a.id.as_str())
            .collect();
        assert_eq!(related, vec!["a2", "a3"]);
        assert!(related.len() <= a1.related_adrs.len());
    }

    #[test]
    fn test_resolve_supersession_dangling() {
        let mut a1 = adr("a1", 1, "One");
        a1.superseded_by = Some("a9".to_string());
        let store = RecordStore::from_adrs(vec![a1.clone()]).unwrap();

        let links = store.resolve_supersession(&a1);
        assert!(links.supersedes.is_none());
        assert!(links.superseded_by.is_none());
    }

    #[test]
    fn test_resolve_supersession_seed_chain() {
        let store = create_test_store();
        let old = store.get_by_id("adr-001").unwrap();
        let links = store.resolve_supersession(old);
        assert_eq!(links.superseded_by.map(|a| a.id.as_str()), Some("adr-007"));
        assert!(links.supersedes.is_none());

        let new = store.get_by_id("adr-007").unwrap();
        let links = store.resolve_supersession(new);
        assert_eq!(links.supersedes.map(|a| a.id.as_str()), Some("adr-001"));
    }

    #[test]
    fn test_lineage_store_order() {
        let mut a1 = adr("a1", 1, "One");
        a1.supersedes = Some("a3".to_string());
        let a2 = adr("a2", 2, "Two");
        let mut a3 = adr("a3", 3, "Three");
        a3.superseded_by = Some("a1".to_string());
        let store = RecordStore::from_adrs(vec![a1, a2, a3]).unwrap();

        let ids: Vec<_> = store.lineage().iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["a1", "a3"]);
    }

    #[test]
    fn test_seed_has_no_dangling_references() {
        let store = create_test_store();
        assert!(store.dangling_references().is_empty());
    }

    #[test]
    fn test_dangling_references_reported() {
        let mut a1 = adr("a1", 1, "One");
        a1.superseded_by = Some("a9".to_string());
        a1.related_adrs = vec!["a2".to_string(), "a8".to_string()];
        let store = RecordStore::from_adrs(vec![a1, adr("a2", 2, "Two")]).unwrap();

        let dangling = store.dangling_references();
        assert_eq!(dangling.len(), 2);
        assert_eq!(dangling[0].link, LinkKind::SupersededBy);
        assert_eq!(dangling[0].target, "a9");
        assert_eq!(dangling[1].link, LinkKind::Related);
        assert_eq!(dangling[1].target, "a8");
    }

    #[test]
    fn test_strict_rejects_dangling() {
        let mut a1 = adr("a1", 1, "One");
        a1.supersedes = Some("ghost".to_string());
        let err = RecordStore::from_dataset_strict(Dataset::from(vec![a1])).unwrap_err();
        assert!(matches!(err, Error::DanglingReference { .. }));
        assert!(err.to_string().contains("ghost"));
    }

    #[test]
    fn test_load_default_uses_seed() {
        let store = RecordStore::load(&DatasetConfig::default()).unwrap();
        assert_eq!(store.len(), 12);
    }

    #[test]
    fn test_load_strict_seed() {
        let config = DatasetConfig {
            path: None,
            strict_references: true,
        };
        assert!(RecordStore::load(&config).is_ok());
    }

    #[test]
    fn test_template_by_id() {
        let store = create_test_store();
        let template = store.template_by_id("tpl-rag").unwrap();
        assert_eq!(template.name, "RAG Architecture");
        assert!(store.template_by_id("tpl-missing").is_none());
    }

    #[test]
    fn test_link_kind_display() {
        assert_eq!(LinkKind::SupersededBy.to_string(), "supersededBy");
        assert_eq!(LinkKind::Related.to_string(), "relatedADRs");
    }
}
