use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "checklist-review",
    version,
    about = "Flag suspicious eBird checklists and draft outreach emails"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Review a JSON or YAML export of checklists
    Review {
        /// Checklist export (.json, .yaml or .yml)
        input: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Include checklists that passed every check (json output)
        #[arg(long)]
        all: bool,
    },
    /// List available checks with their effective settings
    Checks,
    /// Interactively choose checks and thresholds, then write config.yaml
    Init,
    /// Validate the config file
    Check,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One outreach email per flagged checklist
    Text,
    /// Review results as JSON
    Json,
}
