//! Core record types for adrboard.
//!
//! This module defines the Architecture Decision Record and the supporting
//! entities that ship alongside it in a dataset: policy triggers, drafting
//! templates and timeline events.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Lifecycle label of an ADR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdrStatus {
    /// Drafted and awaiting review.
    Proposed,
    /// Approved and in effect.
    Accepted,
    /// No longer recommended, with no direct replacement.
    Deprecated,
    /// Replaced by a newer ADR.
    Superseded,
}

impl AdrStatus {
    /// All statuses in lifecycle order.
    pub const ALL: [Self; 4] = [
        Self::Proposed,
        Self::Accepted,
        Self::Deprecated,
        Self::Superseded,
    ];

    /// Human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Proposed => "Proposed",
            Self::Accepted => "Accepted",
            Self::Deprecated => "Deprecated",
            Self::Superseded => "Superseded",
        }
    }

    /// Actions a reviewer may take from this status.
    ///
    /// Proposed records can be accepted; accepted records can be deprecated
    /// or superseded. Deprecated and superseded are terminal.
    #[must_use]
    pub fn actions(self) -> &'static [StatusAction] {
        const ACCEPT: &[StatusAction] = &[StatusAction {
            label: "Accept",
            next: AdrStatus::Accepted,
        }];
        const RETIRE: &[StatusAction] = &[
            StatusAction {
                label: "Deprecate",
                next: AdrStatus::Deprecated,
            },
            StatusAction {
                label: "Supersede",
                next: AdrStatus::Superseded,
            },
        ];

        match self {
            Self::Proposed => ACCEPT,
            Self::Accepted => RETIRE,
            Self::Deprecated | Self::Superseded => &[],
        }
    }

    /// Check whether `next` is reachable through one of [`Self::actions`].
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.actions().iter().any(|action| action.next == next)
    }
}

impl std::fmt::Display for AdrStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Proposed => write!(f, "proposed"),
            Self::Accepted => write!(f, "accepted"),
            Self::Deprecated => write!(f, "deprecated"),
            Self::Superseded => write!(f, "superseded"),
        }
    }
}

/// A status change offered to reviewers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusAction {
    /// Button label, e.g. "Accept".
    pub label: &'static str,
    /// Status the record moves to.
    pub next: AdrStatus,
}

/// Domain tag of an ADR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AdrCategory {
    /// Choosing foundation or task models.
    ModelSelection,
    /// Ingestion and transformation pipelines.
    DataPipeline,
    /// Compute, clusters and platform.
    Infrastructure,
    /// Offline and online evaluation.
    Evaluation,
    /// Prompt structure and versioning.
    PromptArchitecture,
    /// Retrieval-augmented generation.
    RagArchitecture,
    /// Feature storage and serving.
    FeatureStore,
    /// Model hosting and inference.
    InferenceServing,
    /// Retention and deletion of data.
    DataRetention,
    /// Security controls.
    Security,
    /// Regulatory compliance.
    Compliance,
    /// Anything else.
    General,
}

impl AdrCategory {
    /// All categories.
    pub const ALL: [Self; 12] = [
        Self::ModelSelection,
        Self::DataPipeline,
        Self::Infrastructure,
        Self::Evaluation,
        Self::PromptArchitecture,
        Self::RagArchitecture,
        Self::FeatureStore,
        Self::InferenceServing,
        Self::DataRetention,
        Self::Security,
        Self::Compliance,
        Self::General,
    ];

    /// Human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::ModelSelection => "Model Selection",
            Self::DataPipeline => "Data Pipeline",
            Self::Infrastructure => "Infrastructure",
            Self::Evaluation => "Evaluation",
            Self::PromptArchitecture => "Prompt Architecture",
            Self::RagArchitecture => "RAG Architecture",
            Self::FeatureStore => "Feature Store",
            Self::InferenceServing => "Inference Serving",
            Self::DataRetention => "Data Retention",
            Self::Security => "Security",
            Self::Compliance => "Compliance",
            Self::General => "General",
        }
    }
}

impl std::fmt::Display for AdrCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let slug = match self {
            Self::ModelSelection => "model-selection",
            Self::DataPipeline => "data-pipeline",
            Self::Infrastructure => "infrastructure",
            Self::Evaluation => "evaluation",
            Self::PromptArchitecture => "prompt-architecture",
            Self::RagArchitecture => "rag-architecture",
            Self::FeatureStore => "feature-store",
            Self::InferenceServing => "inference-serving",
            Self::DataRetention => "data-retention",
            Self::Security => "security",
            Self::Compliance => "compliance",
            Self::General => "general",
        };
        f.write_str(slug)
    }
}

/// Regulatory or governance framework an ADR is linked to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComplianceFramework {
    /// EU General Data Protection Regulation.
    #[serde(rename = "GDPR")]
    Gdpr,
    /// EU Artificial Intelligence Act.
    #[serde(rename = "EU AI Act")]
    EuAiAct,
    /// SOC 2 trust services criteria.
    #[serde(rename = "SOC2")]
    Soc2,
    /// US health data regulation.
    #[serde(rename = "HIPAA")]
    Hipaa,
    /// Internal model governance policy.
    #[serde(rename = "Model Governance")]
    ModelGovernance,
}

impl std::fmt::Display for ComplianceFramework {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Gdpr => "GDPR",
            Self::EuAiAct => "EU AI Act",
            Self::Soc2 => "SOC2",
            Self::Hipaa => "HIPAA",
            Self::ModelGovernance => "Model Governance",
        };
        f.write_str(name)
    }
}

/// Risk classification of an ADR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Low risk.
    Low,
    /// Medium risk.
    Medium,
    /// High risk.
    High,
    /// Critical risk.
    Critical,
}

impl RiskLevel {
    /// High and critical risks are the ones compliance reviews chase.
    #[must_use]
    pub fn is_high(self) -> bool {
        matches!(self, Self::High | Self::Critical)
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low Risk",
            Self::Medium => "Medium Risk",
            Self::High => "High Risk",
            Self::Critical => "Critical",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

/// Highest valid quality score.
pub const MAX_QUALITY_SCORE: u8 = 100;

/// An Architecture Decision Record.
///
/// Relationships to other records are by id only; nothing guarantees the
/// referenced ids exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Adr {
    /// Unique identifier.
    pub id: String,
    /// Unique sequence number, shown zero-padded.
    pub number: u32,
    /// Short title.
    pub title: String,
    /// Lifecycle label.
    pub status: AdrStatus,
    /// Domain tag.
    pub category: AdrCategory,
    /// Date the decision was recorded.
    pub date: NaiveDate,
    /// Date of the most recent edit.
    pub last_updated: NaiveDate,
    /// Authors in credit order.
    pub authors: Vec<String>,
    /// Forces at play.
    pub context: String,
    /// The decision itself.
    pub decision: String,
    /// Resulting trade-offs.
    pub consequences: String,
    /// Options considered and rejected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternatives: Option<String>,
    /// Ids of related records.
    #[serde(default, rename = "relatedADRs", skip_serializing_if = "Vec::is_empty")]
    pub related_adrs: Vec<String>,
    /// Id of the record that replaced this one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub superseded_by: Option<String>,
    /// Id of the record this one replaced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supersedes: Option<String>,
    /// Free-form tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Linked compliance frameworks.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub compliance_frameworks: Vec<ComplianceFramework>,
    /// Linked pull requests.
    #[serde(default, rename = "linkedPRs", skip_serializing_if = "Vec::is_empty")]
    pub linked_prs: Vec<String>,
    /// Linked experiment runs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub linked_experiments: Vec<String>,
    /// Model version the decision applies to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_version: Option<String>,
    /// Dataset version the decision applies to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset_version: Option<String>,
    /// Risk classification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_classification: Option<RiskLevel>,
    /// Quality score, 0 to 100.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality_score: Option<u8>,
}

impl Adr {
    /// Quality score with an absent score counted as zero.
    #[must_use]
    pub fn quality(&self) -> u8 {
        self.quality_score.unwrap_or(0)
    }

    /// Whether the record carries a high or critical risk classification.
    #[must_use]
    pub fn is_high_risk(&self) -> bool {
        self.risk_classification.is_some_and(RiskLevel::is_high)
    }

    /// Whether the record takes part in a supersession chain or links to
    /// related records.
    #[must_use]
    pub fn has_lineage(&self) -> bool {
        self.supersedes.is_some() || self.superseded_by.is_some() || !self.related_adrs.is_empty()
    }
}

/// How strongly a policy trigger asks for an ADR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational only.
    Info,
    /// Warn when triggered.
    Warning,
    /// An ADR is required.
    Required,
}

impl Severity {
    /// Human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Info => "Informational",
            Self::Warning => "Warning",
            Self::Required => "Required",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Required => write!(f, "required"),
        }
    }
}

/// A rule describing when an ADR should be written.
///
/// The pattern is documentation only and is never compiled or evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyTrigger {
    /// Unique identifier.
    pub id: String,
    /// Short name.
    pub name: String,
    /// What the rule covers.
    pub description: String,
    /// Descriptive pattern, e.g. a path glob.
    pub pattern: String,
    /// How strongly the rule applies.
    pub severity: Severity,
    /// Whether the rule is active.
    pub enabled: bool,
}

/// Canned text used to seed a template draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateFields {
    /// Context section.
    pub context: String,
    /// Decision section.
    pub decision: String,
    /// Consequences section.
    pub consequences: String,
    /// Alternatives section.
    pub alternatives: String,
}

/// A read-only starting point for new ADRs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdrTemplate {
    /// Unique identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// What the template is for.
    pub description: String,
    /// Category given to drafts.
    pub category: AdrCategory,
    /// Canned section text.
    pub fields: TemplateFields,
    /// Tags given to drafts.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Kind of a timeline event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimelineEventType {
    /// Record created.
    Created,
    /// Record accepted.
    Accepted,
    /// Record deprecated.
    Deprecated,
    /// Record superseded.
    Superseded,
    /// Record edited.
    Updated,
}

impl std::fmt::Display for TimelineEventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Created => write!(f, "created"),
            Self::Accepted => write!(f, "accepted"),
            Self::Deprecated => write!(f, "deprecated"),
            Self::Superseded => write!(f, "superseded"),
            Self::Updated => write!(f, "updated"),
        }
    }
}

/// A logged change to an ADR.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    /// Unique identifier.
    pub id: String,
    /// Id of the ADR the event concerns.
    pub adr_id: String,
    /// Title of the ADR at the time of the event.
    pub adr_title: String,
    /// What happened.
    #[serde(rename = "type")]
    pub kind: TimelineEventType,
    /// When it happened.
    pub date: NaiveDate,
    /// Free-text description.
    pub description: String,
}
