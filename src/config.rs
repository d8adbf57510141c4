use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SmError};
use crate::matching::MatchStrategy;
use crate::roster::ColumnMap;

/// Project-local directory searched upwards from the working directory.
pub const PROJECT_DIR: &str = ".skillmatch";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub roster: RosterConfig,
    #[serde(default)]
    pub matcher: MatcherConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub serve: ServeConfig,
}

impl Config {
    /// Load layered configuration: defaults, then global and project files
    /// (or a single explicit file), then `SM_*` environment overrides.
    pub fn load(explicit_path: Option<&Path>, project_root: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| std::env::var("SM_CONFIG").ok().map(PathBuf::from));

        if let Some(path) = explicit {
            if let Some(patch) = Self::load_patch(&path)? {
                config.merge_patch(patch);
            }
        } else {
            if let Some(global) = Self::load_global()? {
                config.merge_patch(global);
            }
            if let Some(root) = project_root {
                if let Some(project) = Self::load_patch(&root.join("config.toml"))? {
                    config.merge_patch(project);
                }
            }
        }

        config.apply_env_overrides()?;

        Ok(config)
    }

    /// Path of the per-user configuration file.
    pub fn global_path() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .ok_or_else(|| SmError::MissingConfig("config directory not found".to_string()))?
            .join("skillmatch/config.toml"))
    }

    fn load_global() -> Result<Option<ConfigPatch>> {
        // No config dir (minimal containers) just means no global layer.
        match Self::global_path() {
            Ok(path) => Self::load_patch(&path),
            Err(_) => Ok(None),
        }
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|err| SmError::Config(format!("read config {}: {err}", path.display())))?;
        let mut patch: ConfigPatch = toml::from_str(&raw)
            .map_err(|err| SmError::Config(format!("parse config {}: {err}", path.display())))?;
        if let Some(base) = path.parent() {
            patch.resolve_paths(base);
        }
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(patch) = patch.roster {
            self.roster.merge(patch);
        }
        if let Some(patch) = patch.matcher {
            self.matcher.merge(patch);
        }
        if let Some(patch) = patch.output {
            self.output.merge(patch);
        }
        if let Some(patch) = patch.serve {
            self.serve.merge(patch);
        }
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Some(value) = env_string("SM_ROSTER_PATH") {
            self.roster.path = Some(PathBuf::from(value));
        }
        if let Some(value) = env_bool("SM_ROSTER_SKIP_INVALID_ROWS") {
            self.roster.skip_invalid_rows = value;
        }
        if let Some(value) = env_string("SM_ROSTER_SKILL_COLUMN") {
            self.roster.columns.skill = value;
        }
        if let Some(value) = env_string("SM_MATCHER_STRATEGY") {
            self.matcher.strategy = value.parse()?;
        }
        if let Some(value) = env_bool("SM_OUTPUT_MAILTO_LINKS") {
            self.output.mailto_links = value;
        }
        if let Some(value) = env_string("SM_SERVE_BIND") {
            self.serve.bind = value;
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    #[serde(default)]
    pub skip_invalid_rows: bool,
    #[serde(default)]
    pub columns: ColumnMap,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            path: None,
            skip_invalid_rows: false,
            columns: ColumnMap::default(),
        }
    }
}

impl RosterConfig {
    fn merge(&mut self, patch: RosterPatch) {
        if let Some(value) = patch.path {
            self.path = Some(value);
        }
        if let Some(value) = patch.skip_invalid_rows {
            self.skip_invalid_rows = value;
        }
        if let Some(patch) = patch.columns {
            if let Some(value) = patch.id {
                self.columns.id = value;
            }
            if let Some(value) = patch.first_name {
                self.columns.first_name = value;
            }
            if let Some(value) = patch.email {
                self.columns.email = value;
            }
            if let Some(value) = patch.gender {
                self.columns.gender = value;
            }
            if let Some(value) = patch.skill {
                self.columns.skill = value;
            }
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatcherConfig {
    #[serde(default)]
    pub strategy: MatchStrategy,
}

impl MatcherConfig {
    fn merge(&mut self, patch: MatcherPatch) {
        if let Some(value) = patch.strategy {
            self.strategy = value;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Render emails as `mailto:` anchors in projected results.
    #[serde(default = "default_true")]
    pub mailto_links: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { mailto_links: true }
    }
}

impl OutputConfig {
    fn merge(&mut self, patch: OutputPatch) {
        if let Some(value) = patch.mailto_links {
            self.mailto_links = value;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServeConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

impl ServeConfig {
    fn merge(&mut self, patch: ServePatch) {
        if let Some(value) = patch.bind {
            self.bind = value;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigPatch {
    pub roster: Option<RosterPatch>,
    pub matcher: Option<MatcherPatch>,
    pub output: Option<OutputPatch>,
    pub serve: Option<ServePatch>,
}

impl ConfigPatch {
    /// Relative paths in a config file are relative to that file's directory.
    fn resolve_paths(&mut self, base: &Path) {
        if let Some(path) = self.roster.as_mut().and_then(|roster| roster.path.as_mut()) {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RosterPatch {
    pub path: Option<PathBuf>,
    pub skip_invalid_rows: Option<bool>,
    pub columns: Option<ColumnsPatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ColumnsPatch {
    pub id: Option<String>,
    pub first_name: Option<String>,
    pub email: Option<String>,
    pub gender: Option<String>,
    pub skill: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct MatcherPatch {
    pub strategy: Option<MatchStrategy>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct OutputPatch {
    pub mailto_links: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ServePatch {
    pub bind: Option<String>,
}

const fn default_true() -> bool {
    true
}

fn default_bind() -> String {
    "127.0.0.1:5000".to_string()
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key).ok().map(|value| {
        matches!(
            value.to_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        )
    })
}
