//! CSV roster loading with header validation.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::{Roster, UserId, UserRecord};
use crate::config::RosterConfig;
use crate::error::{Result, SmError};

/// Names of the roster columns the loader requires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMap {
    #[serde(default = "default_id")]
    pub id: String,
    #[serde(default = "default_first_name")]
    pub first_name: String,
    #[serde(default = "default_email")]
    pub email: String,
    #[serde(default = "default_gender")]
    pub gender: String,
    #[serde(default = "default_skill")]
    pub skill: String,
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            id: default_id(),
            first_name: default_first_name(),
            email: default_email(),
            gender: default_gender(),
            skill: default_skill(),
        }
    }
}

fn default_id() -> String {
    "id".to_string()
}

fn default_first_name() -> String {
    "first_name".to_string()
}

fn default_email() -> String {
    "email".to_string()
}

fn default_gender() -> String {
    "gender".to_string()
}

fn default_skill() -> String {
    "Skills".to_string()
}

#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    pub columns: ColumnMap,
    /// Skip rows that fail validation instead of aborting the load.
    pub skip_invalid_rows: bool,
}

impl From<&RosterConfig> for LoadOptions {
    fn from(config: &RosterConfig) -> Self {
        Self {
            columns: config.columns.clone(),
            skip_invalid_rows: config.skip_invalid_rows,
        }
    }
}

/// Resolved header positions.
struct ColumnIndices {
    id: usize,
    first_name: usize,
    email: usize,
    gender: usize,
    skill: usize,
}

impl ColumnIndices {
    fn resolve(headers: &StringRecord, columns: &ColumnMap, source_name: &str) -> Result<Self> {
        let mut missing = Vec::new();
        let mut find = |name: &str| {
            let position = headers
                .iter()
                .position(|header| header == name)
                .or_else(|| {
                    headers
                        .iter()
                        .position(|header| header.eq_ignore_ascii_case(name))
                });
            if position.is_none() {
                missing.push(name.to_string());
            }
            position.unwrap_or_default()
        };

        let indices = Self {
            id: find(&columns.id),
            first_name: find(&columns.first_name),
            email: find(&columns.email),
            gender: find(&columns.gender),
            skill: find(&columns.skill),
        };

        if missing.is_empty() {
            Ok(indices)
        } else {
            Err(SmError::Schema {
                source_name: source_name.to_string(),
                missing,
            })
        }
    }

    fn extract(&self, row: &StringRecord) -> UserRecord {
        let cell = |index: usize| row.get(index).unwrap_or_default().to_string();
        UserRecord {
            id: UserId::new(cell(self.id)),
            first_name: cell(self.first_name),
            email: cell(self.email),
            gender: cell(self.gender),
            skill: cell(self.skill),
        }
    }
}

impl Roster {
    /// Load a roster from a CSV file.
    pub fn load_path(path: impl AsRef<Path>, options: &LoadOptions) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|err| io::Error::new(err.kind(), format!("{}: {err}", path.display())))?;
        Self::load(file, &path.display().to_string(), options)
    }

    /// Load a roster from CSV text with a header row.
    ///
    /// `source_name` only labels errors and logs.
    pub fn load<R: Read>(reader: R, source_name: &str, options: &LoadOptions) -> Result<Self> {
        let mut csv = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = csv.headers()?.clone();
        let indices = ColumnIndices::resolve(&headers, &options.columns, source_name)?;
        debug!(source = source_name, columns = headers.len(), "roster header accepted");

        let mut roster = Self::default();
        let mut skipped = 0usize;
        for (index, row) in csv.records().enumerate() {
            let row_number = index + 1;
            let record = indices.extract(&row?);
            if let Err(reason) = roster.push(record) {
                if options.skip_invalid_rows {
                    warn!(source = source_name, row = row_number, %reason, "skipping roster row");
                    skipped += 1;
                    continue;
                }
                return Err(SmError::InvalidRecord {
                    row: row_number,
                    reason,
                });
            }
        }

        info!(
            source = source_name,
            users = roster.len(),
            skipped,
            "roster loaded"
        );
        Ok(roster)
    }
}
