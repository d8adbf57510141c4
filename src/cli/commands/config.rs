//! skillmatch config - Print the effective configuration

use clap::Args;

use crate::app::AppContext;
use crate::cli::output::{OutputFormat, emit_json};
use crate::config::Config;
use crate::error::{Result, SmError};

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Print the global config file path instead of the values
    #[arg(long)]
    pub path: bool,
}

pub fn run(ctx: &AppContext, args: &ConfigArgs) -> Result<()> {
    if args.path {
        let path = match &ctx.project_root {
            Some(root) => root.join("config.toml"),
            None => Config::global_path()?,
        };
        println!("{}", path.display());
        return Ok(());
    }

    match ctx.output_format {
        OutputFormat::Human | OutputFormat::Plain => println!("{}", render_toml(&ctx.config)?),
        _ => emit_json(&ctx.config)?,
    }
    Ok(())
}

fn render_toml(config: &Config) -> Result<String> {
    toml::to_string_pretty(config)
        .map_err(|err| SmError::Config(format!("serialize config: {err}")))
}
