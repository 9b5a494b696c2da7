//! CLI definitions for autolabel.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

/// Autolabel CLI.
#[derive(Parser)]
#[command(name = "autolabel")]
#[command(about = "Label the interactive elements of a page snapshot")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (default: ~/.autolabel/config.toml)
    #[arg(short, long, env = "AUTOLABEL_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Also write daily-rotated log files into this directory
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Run a labeling pass over a JSON page snapshot
    Draw {
        /// Path to the snapshot
        snapshot: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Write the annotated snapshot here
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Remove the overlay again before writing the snapshot
        #[arg(long)]
        remove: bool,
    },

    /// Print the overlay stylesheet
    Stylesheet,

    /// Validate the configuration file
    CheckConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Table,
    Json,
}
