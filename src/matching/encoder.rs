//! One-hot label encoding over the fitted skill vocabulary.
//!
//! Categories are the distinct labels sorted lexicographically. Labels
//! outside the vocabulary encode to the all-zero vector instead of failing.

use serde::Serialize;

use crate::error::{Result, SmError};

/// Fixed-width one-hot encoding of a skill label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct EncodedLabel {
    width: usize,
    category: Option<usize>,
}

impl EncodedLabel {
    /// Vocabulary size of the encoder that produced this label.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Hot position, or `None` for the unknown encoding.
    #[must_use]
    pub const fn category(&self) -> Option<usize> {
        self.category
    }

    #[must_use]
    pub const fn is_unknown(&self) -> bool {
        self.category.is_none()
    }

    /// Dense 0/1 feature vector.
    #[must_use]
    pub fn to_dense(&self) -> Vec<u8> {
        let mut dense = vec![0; self.width];
        if let Some(hot) = self.category {
            dense[hot] = 1;
        }
        dense
    }
}

#[derive(Debug, Clone, Default)]
pub struct LabelEncoder {
    categories: Option<Vec<String>>,
}

impl LabelEncoder {
    /// Learn the vocabulary of distinct labels.
    pub fn fit<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut categories: Vec<String> = labels
            .into_iter()
            .map(|label| label.as_ref().to_string())
            .collect();
        categories.sort();
        categories.dedup();
        Self {
            categories: Some(categories),
        }
    }

    #[must_use]
    pub const fn is_fitted(&self) -> bool {
        self.categories.is_some()
    }

    /// Encode `label`; unseen labels yield the unknown encoding.
    pub fn transform(&self, label: &str) -> Result<EncodedLabel> {
        let categories = self.fitted()?;
        Ok(EncodedLabel {
            width: categories.len(),
            category: categories
                .binary_search_by(|candidate| candidate.as_str().cmp(label))
                .ok(),
        })
    }

    pub fn transform_many<I, S>(&self, labels: I) -> Result<Vec<EncodedLabel>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        labels
            .into_iter()
            .map(|label| self.transform(label.as_ref()))
            .collect()
    }

    /// Label for a known encoding.
    #[must_use]
    pub fn inverse(&self, encoded: &EncodedLabel) -> Option<&str> {
        let categories = self.categories.as_ref()?;
        if encoded.width != categories.len() {
            return None;
        }
        encoded
            .category
            .and_then(|hot| categories.get(hot))
            .map(String::as_str)
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.categories.as_ref().map_or(0, Vec::len)
    }

    #[must_use]
    pub fn categories(&self) -> &[String] {
        self.categories.as_deref().unwrap_or_default()
    }

    fn fitted(&self) -> Result<&[String]> {
        self.categories
            .as_deref()
            .ok_or(SmError::UnfittedModel("label encoder"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vocabulary_is_sorted_and_distinct() {
        let encoder = LabelEncoder::fit(["Python", "Go", "Python", "Rust"]);
        assert_eq!(encoder.categories(), ["Go", "Python", "Rust"]);
        assert_eq!(encoder.width(), 3);
    }

    #[test]
    fn known_label_is_one_hot() {
        let encoder = LabelEncoder::fit(["Python", "Go"]);
        let encoded = encoder.transform("Python").unwrap();
        assert_eq!(encoded.category(), Some(1));
        assert_eq!(encoded.to_dense(), vec![0, 1]);
        assert_eq!(encoder.inverse(&encoded), Some("Python"));
    }

    #[test]
    fn unknown_label_encodes_to_zeros() {
        let encoder = LabelEncoder::fit(["Python", "Go"]);
        let encoded = encoder.transform("python").unwrap();
        assert!(encoded.is_unknown());
        assert_eq!(encoded.width(), 2);
        assert_eq!(encoded.to_dense(), vec![0, 0]);
        assert_eq!(encoder.inverse(&encoded), None);
    }

    #[test]
    fn transform_before_fit_fails() {
        let encoder = LabelEncoder::default();
        let err = encoder.transform("Go").unwrap_err();
        assert!(matches!(err, SmError::UnfittedModel("label encoder")));
    }

    #[test]
    fn transform_many_keeps_input_order() {
        let encoder = LabelEncoder::fit(["b", "a"]);
        let encoded = encoder.transform_many(["b", "z", "a"]).unwrap();
        let hot: Vec<_> = encoded.iter().map(EncodedLabel::category).collect();
        assert_eq!(hot, vec![Some(1), None, Some(0)]);
    }
}
