//! Static analytics over an ADR collection.
//!
//! Everything here is a pure summary of the records passed in: the
//! dashboard overview and the compliance report.

use serde::Serialize;

use crate::adr::{Adr, AdrStatus, ComplianceFramework};
use crate::policy::PolicyToggleStore;
use crate::query::{sort, SortKey};

/// Qualitative band of a quality score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityTier {
    /// 90 and above.
    Excellent,
    /// 75 to 89.
    Good,
    /// 60 to 74.
    Fair,
    /// Below 60.
    Poor,
}

impl QualityTier {
    /// Band a score.
    #[must_use]
    pub fn from_score(score: u8) -> Self {
        match score {
            90.. => Self::Excellent,
            75..=89 => Self::Good,
            60..=74 => Self::Fair,
            _ => Self::Poor,
        }
    }
}

impl std::fmt::Display for QualityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Excellent => write!(f, "excellent"),
            Self::Good => write!(f, "good"),
            Self::Fair => write!(f, "fair"),
            Self::Poor => write!(f, "poor"),
        }
    }
}

/// Count of records per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    /// Proposed records.
    pub proposed: usize,
    /// Accepted records.
    pub accepted: usize,
    /// Deprecated records.
    pub deprecated: usize,
    /// Superseded records.
    pub superseded: usize,
}

impl StatusCounts {
    /// Count the statuses of `records`.
    #[must_use]
    pub fn of(records: &[Adr]) -> Self {
        let mut counts = Self::default();
        for adr in records {
            match adr.status {
                AdrStatus::Proposed => counts.proposed += 1,
                AdrStatus::Accepted => counts.accepted += 1,
                AdrStatus::Deprecated => counts.deprecated += 1,
                AdrStatus::Superseded => counts.superseded += 1,
            }
        }
        counts
    }

    /// Count for a single status.
    #[must_use]
    pub fn get(&self, status: AdrStatus) -> usize {
        match status {
            AdrStatus::Proposed => self.proposed,
            AdrStatus::Accepted => self.accepted,
            AdrStatus::Deprecated => self.deprecated,
            AdrStatus::Superseded => self.superseded,
        }
    }
}

/// Overview shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats<'a> {
    /// Number of records.
    pub total: usize,
    /// Records per status.
    pub by_status: StatusCounts,
    /// Mean quality score, rounded; missing scores count as zero.
    pub average_quality: u32,
    /// Records classified high or critical risk.
    pub high_risk: usize,
    /// Most recently updated records, newest first.
    pub recent: Vec<&'a Adr>,
}

impl<'a> DashboardStats<'a> {
    /// Summarize `records`, keeping the `recent_limit` most recently updated.
    #[must_use]
    pub fn compute(records: &'a [Adr], recent_limit: usize) -> Self {
        let all: Vec<&Adr> = records.iter().collect();
        let mut recent = sort(&all, SortKey::Date);
        recent.truncate(recent_limit);

        Self {
            total: records.len(),
            by_status: StatusCounts::of(records),
            average_quality: average_quality(records),
            high_risk: records.iter().filter(|adr| adr.is_high_risk()).count(),
            recent,
        }
    }
}

/// Mean quality score rounded half away from zero; 0 for no records.
#[must_use]
pub fn average_quality(records: &[Adr]) -> u32 {
    if records.is_empty() {
        return 0;
    }
    let sum: u64 = records.iter().map(|adr| u64::from(adr.quality())).sum();
    let count = records.len() as u64;
    // Integer rounding of sum / count.
    let rounded = (2 * sum + count) / (2 * count);
    u32::try_from(rounded).unwrap_or(u32::MAX)
}

/// How many records cite a compliance framework.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameworkCount {
    /// The framework.
    pub framework: ComplianceFramework,
    /// Records citing it.
    pub count: usize,
    /// Share of all records, in `[0, 1]`.
    pub share: f64,
}

/// Compliance overview.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplianceReport<'a> {
    /// Records linked to at least one framework.
    pub compliance_linked: Vec<&'a Adr>,
    /// Records classified high or critical risk.
    pub high_risk: Vec<&'a Adr>,
    /// Records awaiting approval.
    pub proposed: Vec<&'a Adr>,
    /// High-risk records still awaiting approval.
    pub high_risk_pending: Vec<&'a Adr>,
    /// Framework coverage, in order of first citation.
    pub frameworks: Vec<FrameworkCount>,
    /// Enabled policy triggers.
    pub enabled_policies: usize,
    /// All policy triggers.
    pub total_policies: usize,
}

impl<'a> ComplianceReport<'a> {
    /// Build the report for `records` and the current policy state.
    #[must_use]
    pub fn compute(records: &'a [Adr], policies: &PolicyToggleStore) -> Self {
        let high_risk: Vec<&Adr> = records.iter().filter(|adr| adr.is_high_risk()).collect();
        let high_risk_pending = high_risk
            .iter()
            .copied()
            .filter(|adr| adr.status == AdrStatus::Proposed)
            .collect();

        Self {
            compliance_linked: records
                .iter()
                .filter(|adr| !adr.compliance_frameworks.is_empty())
                .collect(),
            proposed: records
                .iter()
                .filter(|adr| adr.status == AdrStatus::Proposed)
                .collect(),
            high_risk,
            high_risk_pending,
            frameworks: framework_counts(records),
            enabled_policies: policies.enabled_count(),
            total_policies: policies.triggers().len(),
        }
    }
}

/// Count citations per framework, in order of first citation.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn framework_counts(records: &[Adr]) -> Vec<FrameworkCount> {
    let mut counts: Vec<(ComplianceFramework, usize)> = Vec::new();
    for framework in records.iter().flat_map(|adr| &adr.compliance_frameworks) {
        match counts.iter_mut().find(|(seen, _)| *seen == *framework) {
            Some((_, count)) => *count += 1,
            None => counts.push((*framework, 1)),
        }
    }

    let total = records.len() as f64;
    counts
        .into_iter()
        .map(|(framework, count)| FrameworkCount {
            framework,
            count,
            share: count as f64 / total,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adr::fixtures::{adr, date};
    use crate::adr::{PolicyTrigger, RiskLevel, Severity};
    use crate::store::RecordStore;

    #[test]
    fn test_quality_tier_bands() {
        assert_eq!(QualityTier::from_score(100), QualityTier::Excellent);
        assert_eq!(QualityTier::from_score(90), QualityTier::Excellent);
        assert_eq!(QualityTier::from_score(89), QualityTier::Good);
        assert_eq!(QualityTier::from_score(75), QualityTier::Good);
        assert_eq!(QualityTier::from_score(74), QualityTier::Fair);
        assert_eq!(QualityTier::from_score(60), QualityTier::Fair);
        assert_eq!(QualityTier::from_score(59), QualityTier::Poor);
        assert_eq!(QualityTier::from_score(0), QualityTier::Poor);
    }

    #[test]
    fn test_average_quality_rounds_and_counts_missing_as_zero() {
        let mut a1 = adr("a1", 1, "One");
        a1.quality_score = Some(90);
        let mut a2 = adr("a2", 2, "Two");
        a2.quality_score = Some(81);
        let a3 = adr("a3", 3, "Three");
        // (90 + 81 + 0) / 3 = 57
        assert_eq!(average_quality(&[a1.clone(), a2.clone(), a3]), 57);
        // (90 + 81) / 2 = 85.5 rounds up
        assert_eq!(average_quality(&[a1, a2]), 86);
    }

    #[test]
    fn test_average_quality_empty() {
        assert_eq!(average_quality(&[]), 0);
    }

    #[test]
    fn test_dashboard_on_seed() {
        let store = RecordStore::seed().unwrap();
        let stats = DashboardStats::compute(store.all(), 5);

        assert_eq!(stats.total, 12);
        assert_eq!(stats.by_status.accepted, 7);
        assert_eq!(stats.by_status.proposed, 3);
        assert_eq!(stats.by_status.deprecated, 1);
        assert_eq!(stats.by_status.superseded, 1);
        assert_eq!(stats.average_quality, 73);
        assert_eq!(stats.high_risk, 5);

        let recent: Vec<_> = stats.recent.iter().map(|a| a.id.as_str()).collect();
        let expected = ["adr-012", "adr-011", "adr-009", "adr-007", "adr-005"];
        assert_eq!(recent, expected);
    }

    #[test]
    fn test_dashboard_recent_limit_larger_than_store() {
        let mut a1 = adr("a1", 1, "One");
        a1.last_updated = date("2024-01-01");
        let mut a2 = adr("a2", 2, "Two");
        a2.last_updated = date("2024-06-01");
        let records = vec![a1, a2];

        let stats = DashboardStats::compute(&records, 10);
        let recent: Vec<_> = stats.recent.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(recent, vec!["a2", "a1"]);
    }

    #[test]
    fn test_status_counts_get() {
        let mut a1 = adr("a1", 1, "One");
        a1.status = AdrStatus::Deprecated;
        let counts = StatusCounts::of(&[a1, adr("a2", 2, "Two")]);
        assert_eq!(counts.get(AdrStatus::Deprecated), 1);
        assert_eq!(counts.get(AdrStatus::Proposed), 1);
        assert_eq!(counts.get(AdrStatus::Accepted), 0);
    }

    #[test]
    fn test_framework_counts_first_seen_order() {
        let mut a1 = adr("a1", 1, "One");
        a1.compliance_frameworks = vec![ComplianceFramework::Soc2, ComplianceFramework::Gdpr];
        let mut a2 = adr("a2", 2, "Two");
        a2.compliance_frameworks = vec![ComplianceFramework::Gdpr];
        let a3 = adr("a3", 3, "Three");
        let a4 = adr("a4", 4, "Four");

        let counts = framework_counts(&[a1, a2, a3, a4]);
        assert_eq!(counts.len(), 2);
        assert_eq!(counts[0].framework, ComplianceFramework::Soc2);
        assert_eq!(counts[0].count, 1);
        assert_eq!(counts[1].framework, ComplianceFramework::Gdpr);
        assert_eq!(counts[1].count, 2);
        assert!((counts[1].share - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_compliance_report() {
        let mut a1 = adr("a1", 1, "One");
        a1.risk_classification = Some(RiskLevel::Critical);
        a1.compliance_frameworks = vec![ComplianceFramework::Hipaa];
        let mut a2 = adr("a2", 2, "Two");
        a2.status = AdrStatus::Accepted;
        a2.risk_classification = Some(RiskLevel::High);
        let mut a3 = adr("a3", 3, "Three");
        a3.risk_classification = Some(RiskLevel::Low);
        let records = vec![a1, a2, a3];

        let policies = PolicyToggleStore::new(vec![PolicyTrigger {
            id: "p1".to_string(),
            name: "n".to_string(),
            description: String::new(),
            pattern: String::new(),
            severity: Severity::Required,
            enabled: true,
        }]);

        let report = ComplianceReport::compute(&records, &policies);
        assert_eq!(report.compliance_linked.len(), 1);
        assert_eq!(report.high_risk.len(), 2);
        assert_eq!(report.proposed.len(), 2);
        assert_eq!(report.high_risk_pending.len(), 1);
        assert_eq!(report.high_risk_pending[0].id, "a1");
        assert_eq!(report.enabled_policies, 1);
        assert_eq!(report.total_policies, 1);
    }

    #[test]
    fn test_compliance_report_on_seed() {
        let store = RecordStore::seed().unwrap();
        let policies = PolicyToggleStore::new(store.policy_triggers().to_vec());
        let report = ComplianceReport::compute(store.all(), &policies);

        assert_eq!(report.compliance_linked.len(), 9);
        assert_eq!(report.high_risk.len(), 5);
        assert_eq!(report.proposed.len(), 3);
        assert_eq!(report.high_risk_pending.len(), 2);
        assert_eq!(report.enabled_policies, 3);
    }
}
