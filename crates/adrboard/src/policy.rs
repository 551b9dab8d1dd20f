//! Policy triggers and their enforcement.
//!
//! Triggers are toggled in memory only. Nothing is persisted, and a
//! trigger's pattern is descriptive text that is never evaluated.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::adr::{PolicyTrigger, Severity};

/// How policy triggers are enforced in CI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnforcementLevel {
    /// Policies are informational only.
    Off,
    /// Warn on pull requests without blocking merges.
    #[default]
    Warn,
    /// Block merges when a required policy is not satisfied.
    Enforce,
}

impl EnforcementLevel {
    /// Short description shown in settings.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Off => "No enforcement; ADR policies are informational only",
            Self::Warn => {
                "Show warnings in PRs when ADR policies are triggered, but don't block merges"
            }
            Self::Enforce => "Block PR merges when required ADR policies are not satisfied",
        }
    }

    /// Whether a triggered policy of `severity` blocks a merge at this level.
    #[must_use]
    pub fn blocks(self, severity: Severity) -> bool {
        self == Self::Enforce && severity == Severity::Required
    }
}

impl std::fmt::Display for EnforcementLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Off => write!(f, "off"),
            Self::Warn => write!(f, "warn"),
            Self::Enforce => write!(f, "enforce"),
        }
    }
}

/// Mutable, session-local set of policy triggers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicyToggleStore {
    triggers: Vec<PolicyTrigger>,
}

impl PolicyToggleStore {
    /// Create a store from an initial set of triggers.
    #[must_use]
    pub fn new(triggers: Vec<PolicyTrigger>) -> Self {
        Self { triggers }
    }

    /// Flip `enabled` on the trigger with `id`.
    ///
    /// Returns the new state, or `None` if no trigger has that id, in which
    /// case nothing changes.
    pub fn toggle(&mut self, id: &str) -> Option<bool> {
        let trigger = self.triggers.iter_mut().find(|t| t.id == id)?;
        trigger.enabled = !trigger.enabled;
        debug!(policy = %trigger.id, enabled = trigger.enabled, "Policy toggled");
        Some(trigger.enabled)
    }

    /// Look up a trigger by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&PolicyTrigger> {
        self.triggers.iter().find(|t| t.id == id)
    }

    /// All triggers in their original order.
    #[must_use]
    pub fn triggers(&self) -> &[PolicyTrigger] {
        &self.triggers
    }

    /// Number of enabled triggers.
    #[must_use]
    pub fn enabled_count(&self) -> usize {
        self.triggers.iter().filter(|t| t.enabled).count()
    }
}
