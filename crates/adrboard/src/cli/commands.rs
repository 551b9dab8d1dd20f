//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::adr::{AdrCategory, AdrStatus, TimelineEventType};
use crate::draft::DraftSource;
use crate::query::SortKey;

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Filter by status
    #[arg(short, long, value_enum, default_value = "all")]
    pub status: StatusArg,

    /// Filter by category
    #[arg(long, value_enum, default_value = "all")]
    pub category: CategoryArg,

    /// Filter by text in title, tags or authors
    #[arg(short = 'Q', long)]
    pub query: Option<String>,

    /// Sort order
    #[arg(long, value_enum, default_value = "date")]
    pub sort: SortArg,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Show command arguments.
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// ADR id (e.g. adr-007)
    pub id: String,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Search command arguments.
#[derive(Debug, Args)]
pub struct SearchCommand {
    /// The search query (title, tags, authors and context)
    pub query: String,

    /// Maximum number of results (defaults to the configured limit)
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Arguments for report commands that only choose between text and JSON.
#[derive(Debug, Args)]
pub struct ReportCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Timeline command arguments.
#[derive(Debug, Args)]
pub struct TimelineCommand {
    /// Filter by event type
    #[arg(short = 't', long = "type", value_enum, default_value = "all")]
    pub event_type: EventTypeArg,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Policy trigger commands.
#[derive(Debug, Subcommand)]
pub enum PolicyCommand {
    /// List policy triggers and the enforcement level
    List {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Toggle policy triggers on or off for this session
    Toggle {
        /// Policy ids to toggle, in order
        #[arg(required = true)]
        ids: Vec<String>,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
}

/// Draft generation commands.
#[derive(Debug, Subcommand)]
pub enum DraftCommand {
    /// Draft from a natural-language description
    Natural {
        /// Description of the decision to make
        text: String,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Draft from pull request code changes
    Code {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Draft from a template
    Template {
        /// Template id (e.g. tpl-rag)
        id: String,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
}

impl DraftCommand {
    /// Whether JSON output was requested.
    #[must_use]
    pub fn json(&self) -> bool {
        match self {
            Self::Natural { json, .. } | Self::Code { json } | Self::Template { json, .. } => *json,
        }
    }

    /// The draft source this command asks for.
    #[must_use]
    pub fn source(&self) -> DraftSource {
        match self {
            Self::Natural { text, .. } => DraftSource::Natural(text.clone()),
            Self::Code { .. } => DraftSource::Code,
            Self::Template { id, .. } => DraftSource::Template(id.clone()),
        }
    }
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Status argument for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    /// Every status
    All,
    /// Proposed ADRs
    Proposed,
    /// Accepted ADRs
    Accepted,
    /// Deprecated ADRs
    Deprecated,
    /// Superseded ADRs
    Superseded,
}

impl From<StatusArg> for Option<AdrStatus> {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::All => None,
            StatusArg::Proposed => Some(AdrStatus::Proposed),
            StatusArg::Accepted => Some(AdrStatus::Accepted),
            StatusArg::Deprecated => Some(AdrStatus::Deprecated),
            StatusArg::Superseded => Some(AdrStatus::Superseded),
        }
    }
}

/// Category argument for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CategoryArg {
    /// Every category
    All,
    /// Model selection
    ModelSelection,
    /// Data pipeline
    DataPipeline,
    /// Infrastructure
    Infrastructure,
    /// Evaluation
    Evaluation,
    /// Prompt architecture
    PromptArchitecture,
    /// RAG architecture
    RagArchitecture,
    /// Feature store
    FeatureStore,
    /// Inference serving
    InferenceServing,
    /// Data retention
    DataRetention,
    /// Security
    Security,
    /// Compliance
    Compliance,
    /// General
    General,
}

impl From<CategoryArg> for Option<AdrCategory> {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::All => None,
            CategoryArg::ModelSelection => Some(AdrCategory::ModelSelection),
            CategoryArg::DataPipeline => Some(AdrCategory::DataPipeline),
            CategoryArg::Infrastructure => Some(AdrCategory::Infrastructure),
            CategoryArg::Evaluation => Some(AdrCategory::Evaluation),
            CategoryArg::PromptArchitecture => Some(AdrCategory::PromptArchitecture),
            CategoryArg::RagArchitecture => Some(AdrCategory::RagArchitecture),
            CategoryArg::FeatureStore => Some(AdrCategory::FeatureStore),
            CategoryArg::InferenceServing => Some(AdrCategory::InferenceServing),
            CategoryArg::DataRetention => Some(AdrCategory::DataRetention),
            CategoryArg::Security => Some(AdrCategory::Security),
            CategoryArg::Compliance => Some(AdrCategory::Compliance),
            CategoryArg::General => Some(AdrCategory::General),
        }
    }
}

/// Sort order argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    /// Most recently updated first
    Date,
    /// Highest number first
    Number,
    /// Highest quality score first
    Quality,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Date => Self::Date,
            SortArg::Number => Self::Number,
            SortArg::Quality => Self::Quality,
        }
    }
}

/// Timeline event type argument for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EventTypeArg {
    /// Every event
    All,
    /// ADR created
    Created,
    /// ADR accepted
    Accepted,
    /// ADR deprecated
    Deprecated,
    /// ADR superseded
    Superseded,
    /// ADR updated
    Updated,
}

impl From<EventTypeArg> for Option<TimelineEventType> {
    fn from(arg: EventTypeArg) -> Self {
        match arg {
            EventTypeArg::All => None,
            EventTypeArg::Created => Some(TimelineEventType::Created),
            EventTypeArg::Accepted => Some(TimelineEventType::Accepted),
            EventTypeArg::Deprecated => Some(TimelineEventType::Deprecated),
            EventTypeArg::Superseded => Some(TimelineEventType::Superseded),
            EventTypeArg::Updated => Some(TimelineEventType::Updated),
        }
    }
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// Formatted table
    Table,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_arg_conversion() {
        assert_eq!(Option::<AdrStatus>::from(StatusArg::All), None);
        assert_eq!(
            Option::<AdrStatus>::from(StatusArg::Superseded),
            Some(AdrStatus::Superseded)
        );
    }

    #[test]
    fn test_category_arg_covers_every_category() {
        let converted: Vec<_> = CategoryArg::value_variants()
            .iter()
            .filter_map(|arg| Option::<AdrCategory>::from(*arg))
            .collect();
        assert_eq!(converted, AdrCategory::ALL.to_vec());
    }

    #[test]
    fn test_category_arg_names_match_slugs() {
        for category in AdrCategory::ALL {
            let arg = CategoryArg::from_str(&category.to_string(), false).unwrap();
            assert_eq!(Option::<AdrCategory>::from(arg), Some(category));
        }
    }

    #[test]
    fn test_sort_arg_conversion() {
        assert_eq!(SortKey::from(SortArg::Date), SortKey::Date);
        assert_eq!(SortKey::from(SortArg::Number), SortKey::Number);
        assert_eq!(SortKey::from(SortArg::Quality), SortKey::Quality);
    }

    #[test]
    fn test_event_type_arg_conversion() {
        assert_eq!(Option::<TimelineEventType>::from(EventTypeArg::All), None);
        assert_eq!(
            Option::<TimelineEventType>::from(EventTypeArg::Updated),
            Some(TimelineEventType::Updated)
        );
    }

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Plain);
    }

    #[test]
    fn test_draft_command_source() {
        let cmd = DraftCommand::Natural {
            text: "pick a cache".to_string(),
            json: true,
        };
        assert!(cmd.json());
        let expected = DraftSource::Natural("pick a cache".to_string());
        assert_eq!(cmd.source(), expected);

        let cmd = DraftCommand::Template {
            id: "tpl-rag".to_string(),
            json: false,
        };
        assert!(!cmd.json());
        assert_eq!(cmd.source(), DraftSource::Template("tpl-rag".to_string()));
        let cmd = DraftCommand::Code { json: false };
        assert_eq!(cmd.source(), DraftSource::Code);
    }

    #[test]
    fn test_config_command_debug() {
        let cmd = ConfigCommand::Show { json: false };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Show"));
    }
}
