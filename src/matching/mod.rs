//! Skill matching engine.
//!
//! Two-tier resolution: an exact-match fast path over the [`SkillIndex`],
//! with a [`LabelResolver`] as the fallback tier. The learned encoder +
//! classifier is one such resolver, trained only for
//! [`MatchStrategy::Classifier`].

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SmError};
use crate::roster::Roster;

pub mod catalog;
pub mod classifier;
pub mod encoder;
pub mod index;
pub mod recommend;

pub use catalog::Catalog;
pub use classifier::{ClassifierResolver, FitSummary, SkillClassifier};
pub use encoder::{EncodedLabel, LabelEncoder};
pub use index::SkillIndex;
pub use recommend::{Recommendation, Recommender, ResolutionPath, SkillResolution};

/// How requested labels are turned into roster labels.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum MatchStrategy {
    /// Skill index only; no model is trained.
    Exact,
    /// Always encode, predict a representative user, and re-resolve its label.
    Classifier,
    /// Exact lookup first, then an attached fallback resolver on a miss.
    #[default]
    Tiered,
}

impl MatchStrategy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Classifier => "classifier",
            Self::Tiered => "tiered",
        }
    }

    #[must_use]
    pub const fn uses_exact_path(self) -> bool {
        matches!(self, Self::Exact | Self::Tiered)
    }

    /// Whether building a catalog fits the built-in encoder and classifier.
    ///
    /// Under `Tiered` an exact miss is a label outside the encoder's
    /// vocabulary, which the classifier cannot map, so nothing is trained.
    #[must_use]
    pub const fn trains_model(self) -> bool {
        matches!(self, Self::Classifier)
    }

    #[must_use]
    pub const fn consults_fallback(self) -> bool {
        matches!(self, Self::Classifier | Self::Tiered)
    }
}

impl fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchStrategy {
    type Err = SmError;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_lowercase().as_str() {
            "exact" => Ok(Self::Exact),
            "classifier" => Ok(Self::Classifier),
            "tiered" => Ok(Self::Tiered),
            _ => Err(SmError::Config(format!(
                "invalid match strategy {value} (expected exact|classifier|tiered)"
            ))),
        }
    }
}

/// Maps a requested label onto a canonical roster label.
///
/// Implementations must be read-only: the catalog shares them across
/// concurrent queries.
pub trait LabelResolver: Send + Sync + fmt::Debug {
    /// Resolve `requested` to a label held by some user in `roster`.
    ///
    /// `Ok(None)` means no usable match, which callers treat as an empty
    /// contribution rather than an error.
    fn resolve<'r>(&self, requested: &str, roster: &'r Roster) -> Result<Option<&'r str>>;

    /// Short name reported in resolution diagnostics.
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_parses_case_insensitively() {
        assert_eq!("Exact".parse::<MatchStrategy>().unwrap(), MatchStrategy::Exact);
        assert_eq!("TIERED".parse::<MatchStrategy>().unwrap(), MatchStrategy::Tiered);
        assert!("fuzzy".parse::<MatchStrategy>().is_err());
    }

    #[test]
    fn strategy_tiers() {
        assert!(MatchStrategy::Exact.uses_exact_path());
        assert!(!MatchStrategy::Exact.consults_fallback());
        assert!(!MatchStrategy::Classifier.uses_exact_path());
        assert!(MatchStrategy::Classifier.trains_model());
        assert!(MatchStrategy::Tiered.uses_exact_path() && MatchStrategy::Tiered.consults_fallback());
        assert!(!MatchStrategy::Tiered.trains_model());
    }
}
