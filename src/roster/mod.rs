//! Record store: the user roster loaded once at startup.
//!
//! Records are immutable after load. Lookups by id go through a side
//! table so projection can keep roster order.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SmError};

pub mod loader;

pub use loader::{ColumnMap, LoadOptions};

/// Roster user identifier, kept as the verbatim cell text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// JSON form used in projections: a number when the id is integral.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        self.0
            .parse::<i64>()
            .map_or_else(|_| serde_json::Value::from(self.0.clone()), serde_json::Value::from)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for UserId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<u64> for UserId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub first_name: String,
    pub email: String,
    pub gender: String,
    pub skill: String,
}

impl UserRecord {
    pub fn new(
        id: impl Into<UserId>,
        first_name: impl Into<String>,
        email: impl Into<String>,
        gender: impl Into<String>,
        skill: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            first_name: first_name.into(),
            email: email.into(),
            gender: gender.into(),
            skill: skill.into(),
        }
    }
}

/// The loaded user roster.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    records: Vec<UserRecord>,
    positions: HashMap<UserId, usize>,
}

impl Roster {
    /// Build a roster from already-parsed records.
    ///
    /// Rejects empty ids, empty skills and duplicate ids.
    pub fn from_records(records: Vec<UserRecord>) -> Result<Self> {
        let mut roster = Self::default();
        for (index, record) in records.into_iter().enumerate() {
            roster.push(record).map_err(|reason| SmError::InvalidRecord {
                row: index + 1,
                reason,
            })?;
        }
        Ok(roster)
    }

    /// Append a record, returning the rejection reason on invalid input.
    pub(crate) fn push(&mut self, record: UserRecord) -> std::result::Result<(), String> {
        if record.id.as_str().is_empty() {
            return Err("empty id".to_string());
        }
        if record.skill.is_empty() {
            return Err(format!("empty skill for user {}", record.id));
        }
        if self.positions.contains_key(&record.id) {
            return Err(format!("duplicate id {}", record.id));
        }
        self.positions.insert(record.id.clone(), self.records.len());
        self.records.push(record);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, id: &UserId) -> Option<&UserRecord> {
        self.positions.get(id).map(|&pos| &self.records[pos])
    }

    /// Skill label of the given user.
    #[must_use]
    pub fn skill_of(&self, id: &UserId) -> Option<&str> {
        self.get(id).map(|record| record.skill.as_str())
    }

    /// Records in roster (file) order.
    pub fn iter(&self) -> impl Iterator<Item = &UserRecord> {
        self.records.iter()
    }

    #[must_use]
    pub fn records(&self) -> &[UserRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> UserRecord {
        UserRecord::new("1", "Alice", "a@x.com", "F", "Python")
    }

    #[test]
    fn lookup_by_id() {
        let roster = Roster::from_records(vec![
            alice(),
            UserRecord::new("3", "Cara", "c@x.com", "F", "Go"),
        ])
        .unwrap();

        assert_eq!(roster.len(), 2);
        assert_eq!(roster.skill_of(&UserId::from("3")), Some("Go"));
        assert_eq!(roster.get(&UserId::from("1")).unwrap().first_name, "Alice");
        assert!(roster.get(&UserId::from("2")).is_none());
    }

    #[test]
    fn duplicate_id_rejected() {
        let err = Roster::from_records(vec![alice(), alice()]).unwrap_err();
        match err {
            SmError::InvalidRecord { row, reason } => {
                assert_eq!(row, 2);
                assert!(reason.contains("duplicate id 1"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_skill_rejected() {
        let err = Roster::from_records(vec![UserRecord::new("9", "Dan", "d@x.com", "M", "")])
            .unwrap_err();
        assert!(matches!(err, SmError::InvalidRecord { row: 1, .. }));
    }

    #[test]
    fn integral_ids_project_as_numbers() {
        assert_eq!(UserId::from("42").to_json_value(), serde_json::json!(42));
        assert_eq!(UserId::from("u-7").to_json_value(), serde_json::json!("u-7"));
    }
}
