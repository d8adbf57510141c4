//! skillmatch - Skill matcher CLI
//!
//! Recommend roster users by skill from the command line or over HTTP.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use skillmatch::{Result, SmError};
use skillmatch::app::AppContext;
use skillmatch::cli::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, cli.robot);
            ExitCode::FAILURE
        }
    }
}

/// Robot mode reports `{error, code, message}` on stdout so callers parse
/// one stream; humans get a line on stderr.
fn report_error(err: &SmError, robot: bool) {
    if !robot {
        eprintln!("Error: {err}");
        return;
    }
    let body = serde_json::json!({
        "error": true,
        "code": err.code(),
        "message": err.to_string(),
    });
    println!("{body}");
}

fn run(cli: &Cli) -> Result<()> {
    if let Commands::Completions(args) = &cli.command {
        return skillmatch::cli::commands::completions::run(args);
    }
    let ctx = AppContext::from_cli(cli)?;
    skillmatch::cli::commands::run(&ctx, &cli.command)
}

fn init_tracing(cli: &Cli) {
    if cli.quiet {
        return;
    }

    let default_directives = match cli.verbose {
        0 => "warn,skillmatch=info",
        1 => "info,skillmatch=debug",
        2 => "debug,skillmatch=trace",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    let registry = tracing_subscriber::registry().with(filter);
    if cli.robot {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry.with(fmt::layer().with_writer(std::io::stderr)).init();
    }
}
