use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;

use crate::matching::{Catalog, MatchStrategy, Recommender};
use crate::roster::{Roster, UserRecord};

/// Three-user roster: two Python users and one Go user.
pub const SAMPLE_ROSTER_CSV: &str = "id,first_name,last_name,email,gender,Skills\n\
1,Alice,Moss,a@x.com,F,Python\n\
2,Bob,Reyes,b@x.com,M,Python\n\
3,Cara,Ng,c@x.com,F,Go\n";

#[must_use]
pub fn sample_records() -> Vec<UserRecord> {
    vec![
        UserRecord::new("1", "Alice", "a@x.com", "F", "Python"),
        UserRecord::new("2", "Bob", "b@x.com", "M", "Python"),
        UserRecord::new("3", "Cara", "c@x.com", "F", "Go"),
    ]
}

/// # Panics
/// Never for the built-in records.
#[must_use]
pub fn sample_roster() -> Roster {
    Roster::from_records(sample_records()).expect("sample roster is valid")
}

/// # Panics
/// Never for the built-in roster.
#[must_use]
pub fn sample_recommender(strategy: MatchStrategy) -> Recommender {
    let catalog = Catalog::build(sample_roster(), strategy).expect("sample catalog builds");
    Recommender::new(Arc::new(catalog))
}

/// Temporary directory holding a roster file and optional config.
pub struct RosterFixture {
    pub temp_dir: TempDir,
    pub roster_path: PathBuf,
}

impl Default for RosterFixture {
    fn default() -> Self {
        Self::new(SAMPLE_ROSTER_CSV)
    }
}

impl RosterFixture {
    /// # Panics
    /// If the temp directory or roster file cannot be written.
    #[must_use]
    pub fn new(roster_csv: &str) -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");
        let roster_path = temp_dir.path().join("users.csv");
        std::fs::write(&roster_path, roster_csv).expect("write roster");
        Self {
            temp_dir,
            roster_path,
        }
    }

    /// Write `config.toml` next to the roster and return its path.
    ///
    /// # Panics
    /// If the file cannot be written.
    #[must_use]
    pub fn write_config(&self, content: &str) -> PathBuf {
        let path = self.temp_dir.path().join("config.toml");
        std::fs::write(&path, content).expect("write config");
        path
    }
}
