//! `adrboard` - Architecture decision records for AI/ML platform teams
//!
//! This library provides an in-memory ADR store with lookup and lineage
//! resolution, filtering and keyword search, dashboard and compliance
//! analytics, a decision timeline, session-local policy toggles and
//! simulated draft generation.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod adr;
pub mod analytics;
pub mod cli;
pub mod config;
pub mod draft;
pub mod error;
pub mod logging;
pub mod policy;
pub mod query;
pub mod search;
pub mod store;
pub mod timeline;

pub use adr::{
    Adr, AdrCategory, AdrStatus, AdrTemplate, ComplianceFramework, PolicyTrigger, RiskLevel,
    Severity, TimelineEvent, TimelineEventType,
};
pub use config::Config;
pub use draft::{Draft, DraftGenerator, DraftSource, SimulatedGenerator};
pub use error::{Error, Result};
pub use logging::init_logging;
pub use policy::{EnforcementLevel, PolicyToggleStore};
pub use query::{Filter, SortKey};
pub use store::RecordStore;
