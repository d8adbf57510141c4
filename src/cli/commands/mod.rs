//! CLI command implementations
//!
//! Each subcommand has its own module with an Args struct and a `run()`
//! function.

use clap::Subcommand;

pub mod completions;
pub mod config;
pub mod doctor;
pub mod recommend;
pub mod serve;
pub mod show;
pub mod skills;

use crate::app::AppContext;
use crate::error::Result;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Recommend users holding the given skill(s)
    Recommend(recommend::RecommendArgs),

    /// List roster skills with user counts
    Skills(skills::SkillsArgs),

    /// Show one user record
    Show(show::ShowArgs),

    /// Validate the roster and report catalog statistics
    Doctor(doctor::DoctorArgs),

    /// Print the effective configuration
    Config(config::ConfigArgs),

    /// Serve recommendations over HTTP
    Serve(serve::ServeArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Dispatch a command to its handler
pub fn run(ctx: &AppContext, command: &Commands) -> Result<()> {
    match command {
        Commands::Recommend(args) => recommend::run(ctx, args),
        Commands::Skills(args) => skills::run(ctx, args),
        Commands::Show(args) => show::run(ctx, args),
        Commands::Doctor(args) => doctor::run(ctx, args),
        Commands::Config(args) => config::run(ctx, args),
        Commands::Serve(args) => serve::run(ctx, args),
        Commands::Completions(args) => completions::run(args),
    }
}
