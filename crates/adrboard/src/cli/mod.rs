//! Command-line interface for adrboard.
//!
//! This module provides the CLI structure for the `adrb` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    CategoryArg, ConfigCommand, DraftCommand, EventTypeArg, ListCommand, OutputFormat,
    PolicyCommand, ReportCommand, SearchCommand, ShowCommand, SortArg, StatusArg,
    TimelineCommand,
};

/// adrb - Browse and audit architecture decision records
///
/// Lists, searches and reports on the ADRs of an AI/ML platform team, and
/// drafts new ones from text, code changes or templates.
#[derive(Debug, Parser)]
#[command(name = "adrb")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List ADRs with optional filters
    List(ListCommand),

    /// Show a single ADR with its lineage
    Show(ShowCommand),

    /// Search ADRs by keyword
    Search(SearchCommand),

    /// Show dashboard statistics
    Stats(ReportCommand),

    /// Show the compliance report
    Compliance(ReportCommand),

    /// Show the decision timeline
    Timeline(TimelineCommand),

    /// List ADR templates
    Templates(ReportCommand),

    /// List or toggle policy triggers
    #[command(subcommand)]
    Policy(PolicyCommand),

    /// Generate a new ADR draft
    #[command(subcommand)]
    Draft(DraftCommand),

    /// View or check configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}
