//! Command-line interface definition.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

pub mod commands;
pub mod formatters;
pub mod output;

pub use commands::Commands;
pub use output::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "skillmatch",
    version,
    about = "Find the users on a roster who hold a requested skill"
)]
pub struct Cli {
    /// Roster CSV (overrides roster.path)
    #[arg(long, global = true)]
    pub roster: Option<PathBuf>,

    /// Config file (skips global and project config)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Machine-readable JSON output and JSON logs
    #[arg(long, global = true)]
    pub robot: bool,

    /// Output format
    #[arg(long, short = 'o', global = true, value_enum)]
    pub output_format: Option<OutputFormat>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable logging
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Effective output format; `--robot` implies JSON unless a format is given.
    #[must_use]
    pub fn output_format(&self) -> OutputFormat {
        match (self.output_format, self.robot) {
            (Some(format), _) => format,
            (None, true) => OutputFormat::Json,
            (None, false) => OutputFormat::Human,
        }
    }
}
