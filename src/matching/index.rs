//! Exact-match skill index: label -> ids of the users holding it.

use std::collections::{BTreeMap, BTreeSet};

use crate::roster::{UserId, UserRecord};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillIndex {
    by_label: BTreeMap<String, BTreeSet<UserId>>,
}

impl SkillIndex {
    /// Build the index. Labels are keyed verbatim (case-sensitive).
    pub fn build<'a>(records: impl IntoIterator<Item = &'a UserRecord>) -> Self {
        let mut by_label: BTreeMap<String, BTreeSet<UserId>> = BTreeMap::new();
        for record in records {
            by_label
                .entry(record.skill.clone())
                .or_default()
                .insert(record.id.clone());
        }
        Self { by_label }
    }

    #[must_use]
    pub fn users_with(&self, label: &str) -> Option<&BTreeSet<UserId>> {
        self.by_label.get(label)
    }

    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.by_label.contains_key(label)
    }

    /// Distinct labels in sorted order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.by_label.keys().map(String::as_str)
    }

    /// `(label, user count)` pairs in label order.
    #[must_use]
    pub fn label_counts(&self) -> Vec<(&str, usize)> {
        self.by_label
            .iter()
            .map(|(label, ids)| (label.as_str(), ids.len()))
            .collect()
    }

    /// Number of distinct labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_label.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_label.is_empty()
    }
}
