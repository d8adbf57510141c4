//! Query facade: requested skills in, union of matching user ids out.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use super::catalog::Catalog;
use crate::error::Result;
use crate::roster::UserId;

/// Which tier produced a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionPath {
    Exact,
    Fallback,
    Unresolved,
}

/// Outcome of resolving one requested skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillResolution {
    pub requested: String,
    /// Canonical roster label, when one was found.
    pub label: Option<String>,
    pub path: ResolutionPath,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolver: Option<&'static str>,
    /// Users holding `label`.
    pub matched: usize,
}

impl SkillResolution {
    pub(crate) fn exact(requested: &str, matched: usize) -> Self {
        Self {
            requested: requested.to_string(),
            label: Some(requested.to_string()),
            path: ResolutionPath::Exact,
            resolver: None,
            matched,
        }
    }

    pub(crate) fn fallback(
        requested: &str,
        label: &str,
        resolver: &'static str,
        matched: usize,
    ) -> Self {
        Self {
            requested: requested.to_string(),
            label: Some(label.to_string()),
            path: ResolutionPath::Fallback,
            resolver: Some(resolver),
            matched,
        }
    }

    pub(crate) fn unresolved(requested: &str) -> Self {
        Self {
            requested: requested.to_string(),
            label: None,
            path: ResolutionPath::Unresolved,
            resolver: None,
            matched: 0,
        }
    }

    #[must_use]
    pub const fn is_match(&self) -> bool {
        self.label.is_some() && self.matched > 0
    }
}

/// Result of a recommendation query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub user_ids: BTreeSet<UserId>,
    pub resolutions: Vec<SkillResolution>,
}

impl Recommendation {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.user_ids.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.user_ids.len()
    }

    #[must_use]
    pub fn contains(&self, id: &UserId) -> bool {
        self.user_ids.contains(id)
    }

    /// Requested skills that contributed no users.
    pub fn unmatched(&self) -> impl Iterator<Item = &str> {
        self.resolutions
            .iter()
            .filter(|resolution| !resolution.is_match())
            .map(|resolution| resolution.requested.as_str())
    }

    #[must_use]
    pub fn unmatched_count(&self) -> usize {
        self.unmatched().count()
    }
}

/// Read-only query entry point over a shared [`Catalog`].
#[derive(Debug, Clone)]
pub struct Recommender {
    catalog: Arc<Catalog>,
}

impl Recommender {
    #[must_use]
    pub const fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Users holding any of the requested skills.
    ///
    /// A skill that resolves to no roster label contributes nothing; it is
    /// reported in [`Recommendation::unmatched`] instead of raising.
    pub fn recommend<S: AsRef<str>>(&self, requested: &[S]) -> Result<Recommendation> {
        let mut recommendation = Recommendation::default();

        for skill in requested {
            let resolution = self.catalog.resolve(skill.as_ref())?;
            if let Some(ids) = resolution
                .label
                .as_deref()
                .and_then(|label| self.catalog.index().users_with(label))
            {
                recommendation.user_ids.extend(ids.iter().cloned());
            }
            recommendation.resolutions.push(resolution);
        }

        debug!(
            requested = requested.len(),
            users = recommendation.len(),
            unmatched = recommendation.unmatched_count(),
            "recommendation complete"
        );
        Ok(recommendation)
    }
}
