//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use punch_core::{BreakType, EntryType};

/// Workforce time clock.
///
/// Clock in and out, take breaks, and watch worked time live against the
/// daily target. All state lives on the time-entry server; this tool is a
/// thin client over it.
#[derive(Debug, Parser)]
#[command(name = "punch", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Clock in and open a work session.
    In {
        /// Kind of session: regular, overtime, remote, on_site.
        #[arg(long = "type", default_value = "regular")]
        entry_type: EntryType,

        /// Free-text note attached to the entry.
        #[arg(long)]
        notes: Option<String>,

        /// Work location; falls back to `default_location` from config.
        #[arg(long)]
        location: Option<String>,
    },

    /// Clock out and close the open session.
    Out {
        /// Free-text note attached to the entry.
        #[arg(long)]
        notes: Option<String>,
    },

    /// Start or end a break.
    Break {
        #[command(subcommand)]
        action: BreakAction,
    },

    /// Show the current session status.
    Status {
        /// Emit machine-readable JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Live once-per-second elapsed-time display.
    Watch,
}

/// Break lifecycle operations.
#[derive(Debug, Subcommand)]
pub enum BreakAction {
    /// Start a break on the open session.
    Start {
        /// Kind of break: meal, rest, personal, other.
        #[arg(long = "type", default_value = "rest")]
        break_type: BreakType,

        /// Free-text note attached to the break.
        #[arg(long)]
        notes: Option<String>,
    },

    /// End the running break.
    End {
        /// Break to end; defaults to the running break.
        #[arg(long)]
        id: Option<String>,

        /// Free-text note attached to the break.
        #[arg(long)]
        notes: Option<String>,
    },
}
