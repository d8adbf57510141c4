use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cli::OutputFormat;
use crate::config::{Config, PROJECT_DIR};
use crate::error::{Result, SmError};
use crate::matching::{Catalog, MatchStrategy, Recommender};
use crate::roster::{LoadOptions, Roster};

pub struct AppContext {
    pub project_root: Option<PathBuf>,
    pub config: Config,
    pub robot_mode: bool,
    pub output_format: OutputFormat,
    pub verbosity: u8,
}

impl AppContext {
    pub fn from_cli(cli: &crate::cli::Cli) -> Result<Self> {
        let project_root = find_upwards(&std::env::current_dir()?, PROJECT_DIR);
        let mut config = Config::load(cli.config.as_deref(), project_root.as_deref())?;
        if let Some(path) = &cli.roster {
            config.roster.path = Some(path.clone());
        }

        Ok(Self {
            project_root,
            config,
            robot_mode: cli.robot,
            output_format: cli.output_format(),
            verbosity: cli.verbose,
        })
    }

    /// Roster file to load. Config files already resolved their relative
    /// paths; `--roster` and `SM_ROSTER_PATH` are used as given.
    pub fn roster_path(&self) -> Result<PathBuf> {
        self.config.roster.path.clone().ok_or_else(|| {
            SmError::MissingConfig(
                "no roster configured (pass --roster or set roster.path)".to_string(),
            )
        })
    }

    pub fn load_roster(&self) -> Result<Roster> {
        let path = self.roster_path()?;
        Roster::load_path(&path, &LoadOptions::from(&self.config.roster))
    }

    /// Load the roster and build the catalog. Startup errors abort here.
    pub fn build_recommender(&self, strategy: Option<MatchStrategy>) -> Result<Recommender> {
        let roster = self.load_roster()?;
        let strategy = strategy.unwrap_or(self.config.matcher.strategy);
        Ok(Recommender::new(Arc::new(Catalog::build(roster, strategy)?)))
    }
}

fn find_upwards(start: &Path, name: &str) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_dir())
}
