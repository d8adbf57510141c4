//! Skill classifier over one-hot encoded labels.
//!
//! On one-hot features a decision tree degenerates into one leaf per
//! category, so the model is stored as that leaf table. Each leaf predicts
//! the majority user id among its training samples; ties go to the sample
//! seen first in training order.

use serde::Serialize;
use tracing::{debug, info};

use super::LabelResolver;
use super::encoder::{EncodedLabel, LabelEncoder};
use crate::error::{Result, SmError};
use crate::roster::{Roster, UserId};

#[derive(Debug, Clone)]
struct Leaf {
    class: UserId,
    support: usize,
}

/// Fit statistics reported by `doctor`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FitSummary {
    /// Encoding width the model was trained on.
    pub width: usize,
    /// Training pairs used (unknown encodings are not trainable).
    pub samples: usize,
    /// Categories with a leaf.
    pub leaves: usize,
    /// Leaves trained on more than one sample, where tie-breaking applied.
    pub shared_leaves: usize,
}

#[derive(Debug, Clone, Default)]
pub struct SkillClassifier {
    model: Option<Model>,
}

#[derive(Debug, Clone)]
struct Model {
    width: usize,
    leaves: Vec<Option<Leaf>>,
    samples: usize,
}

impl SkillClassifier {
    /// Fit on `(encoded label, user id)` pairs.
    ///
    /// All encodings must share one width. Unknown encodings are skipped.
    pub fn fit<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (EncodedLabel, UserId)>,
    {
        let mut width: Option<usize> = None;
        // Per category: (user id, votes) in first-seen order.
        let mut votes: Vec<Vec<(UserId, usize)>> = Vec::new();
        let mut samples = 0usize;

        for (encoded, user) in pairs {
            let expected = *width.get_or_insert_with(|| {
                votes.resize_with(encoded.width(), Vec::new);
                encoded.width()
            });
            if encoded.width() != expected {
                return Err(SmError::ModelMismatch {
                    expected,
                    actual: encoded.width(),
                });
            }
            let Some(category) = encoded.category() else {
                continue;
            };
            samples += 1;
            let bucket = &mut votes[category];
            match bucket.iter_mut().find(|(id, _)| *id == user) {
                Some((_, count)) => *count += 1,
                None => bucket.push((user, 1)),
            }
        }

        let leaves = votes
            .into_iter()
            .map(|bucket| {
                let support = bucket.iter().map(|(_, count)| count).sum();
                bucket
                    .into_iter()
                    .fold(None::<(UserId, usize)>, |best, (id, count)| match best {
                        Some((_, top)) if top >= count => best,
                        _ => Some((id, count)),
                    })
                    .map(|(class, _)| Leaf { class, support })
            })
            .collect();

        Ok(Self {
            model: Some(Model {
                width: width.unwrap_or_default(),
                leaves,
                samples,
            }),
        })
    }

    #[must_use]
    pub const fn is_fitted(&self) -> bool {
        self.model.is_some()
    }

    /// Representative user id for `encoded`.
    ///
    /// The unknown encoding yields `Ok(None)`: it carries no evidence for any
    /// leaf, so no prediction is made.
    pub fn predict(&self, encoded: &EncodedLabel) -> Result<Option<&UserId>> {
        let model = self
            .model
            .as_ref()
            .ok_or(SmError::UnfittedModel("skill classifier"))?;
        if encoded.width() != model.width {
            return Err(SmError::ModelMismatch {
                expected: model.width,
                actual: encoded.width(),
            });
        }
        Ok(encoded
            .category()
            .and_then(|category| model.leaves.get(category))
            .and_then(Option::as_ref)
            .map(|leaf| &leaf.class))
    }

    #[must_use]
    pub fn summary(&self) -> FitSummary {
        self.model.as_ref().map_or_else(FitSummary::default, |model| {
            let trained = model.leaves.iter().flatten();
            FitSummary {
                width: model.width,
                samples: model.samples,
                leaves: trained.clone().count(),
                shared_leaves: trained.filter(|leaf| leaf.support > 1).count(),
            }
        })
    }
}

/// Learned fallback tier: encode, predict a representative user, then
/// recover that user's own label.
#[derive(Debug, Clone)]
pub struct ClassifierResolver {
    encoder: LabelEncoder,
    classifier: SkillClassifier,
}

impl ClassifierResolver {
    /// Fit the encoder over every roster label and the classifier over
    /// `(encoded label, id)` pairs in roster order.
    pub fn fit(roster: &Roster) -> Result<Self> {
        let encoder = LabelEncoder::fit(roster.iter().map(|record| record.skill.as_str()));
        let pairs = roster
            .iter()
            .map(|record| Ok((encoder.transform(&record.skill)?, record.id.clone())))
            .collect::<Result<Vec<_>>>()?;
        let classifier = SkillClassifier::fit(pairs)?;

        let summary = classifier.summary();
        info!(
            categories = summary.width,
            samples = summary.samples,
            shared_leaves = summary.shared_leaves,
            "skill classifier fitted"
        );
        Ok(Self {
            encoder,
            classifier,
        })
    }

    #[must_use]
    pub const fn encoder(&self) -> &LabelEncoder {
        &self.encoder
    }

    #[must_use]
    pub const fn classifier(&self) -> &SkillClassifier {
        &self.classifier
    }
}

impl LabelResolver for ClassifierResolver {
    fn resolve<'r>(&self, requested: &str, roster: &'r Roster) -> Result<Option<&'r str>> {
        let encoded = self.encoder.transform(requested)?;
        let Some(user) = self.classifier.predict(&encoded)? else {
            debug!(skill = requested, "classifier made no prediction");
            return Ok(None);
        };
        let label = roster.skill_of(user);
        debug!(skill = requested, representative = %user, ?label, "classifier prediction");
        Ok(label)
    }

    fn name(&self) -> &'static str {
        "classifier"
    }
}
