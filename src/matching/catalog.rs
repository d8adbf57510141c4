//! Immutable catalog built once at startup and shared by every query.

use std::collections::BTreeSet;
use std::fmt;

use tracing::{debug, info};

use super::classifier::{ClassifierResolver, FitSummary};
use super::index::SkillIndex;
use super::recommend::SkillResolution;
use super::{LabelResolver, MatchStrategy};
use crate::error::Result;
use crate::roster::Roster;

pub struct Catalog {
    roster: Roster,
    index: SkillIndex,
    strategy: MatchStrategy,
    fallback: Option<Box<dyn LabelResolver>>,
    fit_summary: Option<FitSummary>,
}

impl Catalog {
    /// Build the skill index and, for [`MatchStrategy::Classifier`], fit the
    /// encoder and classifier.
    pub fn build(roster: Roster, strategy: MatchStrategy) -> Result<Self> {
        let index = SkillIndex::build(roster.iter());

        let (fallback, fit_summary) = if strategy.trains_model() {
            let resolver = ClassifierResolver::fit(&roster)?;
            let summary = resolver.classifier().summary();
            (
                Some(Box::new(resolver) as Box<dyn LabelResolver>),
                Some(summary),
            )
        } else {
            (None, None)
        };

        info!(
            users = roster.len(),
            skills = index.len(),
            strategy = %strategy,
            "catalog built"
        );

        Ok(Self {
            roster,
            index,
            strategy,
            fallback,
            fit_summary,
        })
    }

    /// Attach or replace the fallback tier. Ignored under
    /// [`MatchStrategy::Exact`].
    #[must_use]
    pub fn with_fallback(mut self, resolver: Box<dyn LabelResolver>) -> Self {
        self.fallback = Some(resolver);
        self.fit_summary = None;
        self
    }

    #[must_use]
    pub const fn roster(&self) -> &Roster {
        &self.roster
    }

    #[must_use]
    pub const fn index(&self) -> &SkillIndex {
        &self.index
    }

    #[must_use]
    pub const fn strategy(&self) -> MatchStrategy {
        self.strategy
    }

    /// Fit statistics of the built-in classifier, if one was trained.
    #[must_use]
    pub const fn fit_summary(&self) -> Option<FitSummary> {
        self.fit_summary
    }

    /// Resolve one requested label to a roster label.
    pub fn resolve(&self, requested: &str) -> Result<SkillResolution> {
        if self.strategy.uses_exact_path() {
            if let Some(ids) = self.index.users_with(requested) {
                debug!(skill = requested, matched = ids.len(), "exact match");
                return Ok(SkillResolution::exact(requested, ids.len()));
            }
        }

        if self.strategy.consults_fallback() {
            if let Some(fallback) = &self.fallback {
                if let Some(label) = fallback.resolve(requested, &self.roster)? {
                    let matched = self.index.users_with(label).map_or(0, BTreeSet::len);
                    return Ok(SkillResolution::fallback(
                        requested,
                        label,
                        fallback.name(),
                        matched,
                    ));
                }
            }
        }

        debug!(skill = requested, strategy = %self.strategy, "no roster label resolved");
        Ok(SkillResolution::unresolved(requested))
    }
}

impl fmt::Debug for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Catalog")
            .field("users", &self.roster.len())
            .field("skills", &self.index.len())
            .field("strategy", &self.strategy)
            .field("fallback", &self.fallback.as_ref().map(|r| r.name()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::ResolutionPath;
    use crate::test_utils::fixtures::sample_roster;

    #[derive(Debug)]
    struct Lowercase;

    impl LabelResolver for Lowercase {
        fn resolve<'r>(&self, requested: &str, roster: &'r Roster) -> Result<Option<&'r str>> {
            Ok(roster
                .iter()
                .find(|record| record.skill.eq_ignore_ascii_case(requested))
                .map(|record| record.skill.as_str()))
        }

        fn name(&self) -> &'static str {
            "lowercase"
        }
    }

    #[test]
    fn exact_strategy_trains_no_model() {
        let catalog = Catalog::build(sample_roster(), MatchStrategy::Exact).unwrap();
        assert!(catalog.fit_summary().is_none());
        assert_eq!(catalog.index().len(), 2);
    }

    #[test]
    fn default_strategy_trains_no_model() {
        let catalog = Catalog::build(sample_roster(), MatchStrategy::default()).unwrap();
        assert_eq!(catalog.strategy(), MatchStrategy::Tiered);
        assert!(catalog.fit_summary().is_none());
        assert!(format!("{catalog:?}").contains("fallback: None"));
    }

    #[test]
    fn tiered_misses_stay_unresolved_without_fallback() {
        let catalog = Catalog::build(sample_roster(), MatchStrategy::Tiered).unwrap();
        for requested in ["python", "Python ", "Pyth", "GO", "Rust", ""] {
            let resolution = catalog.resolve(requested).unwrap();
            assert_eq!(resolution.path, ResolutionPath::Unresolved, "{requested:?}");
            assert!(resolution.resolver.is_none());
        }
    }

    #[test]
    fn classifier_strategy_reports_fit_summary() {
        let catalog = Catalog::build(sample_roster(), MatchStrategy::Classifier).unwrap();
        let summary = catalog.fit_summary().unwrap();
        assert_eq!(summary.samples, 3);
        assert_eq!(summary.leaves, 2);
    }

    #[test]
    fn tiered_prefers_exact_path() {
        let catalog = Catalog::build(sample_roster(), MatchStrategy::Tiered).unwrap();
        let resolution = catalog.resolve("Python").unwrap();
        assert_eq!(resolution.path, ResolutionPath::Exact);
        assert_eq!(resolution.label.as_deref(), Some("Python"));
        assert_eq!(resolution.matched, 2);
    }

    #[test]
    fn classifier_strategy_goes_through_model() {
        let catalog = Catalog::build(sample_roster(), MatchStrategy::Classifier).unwrap();
        let resolution = catalog.resolve("Go").unwrap();
        assert_eq!(resolution.path, ResolutionPath::Fallback);
        assert_eq!(resolution.resolver, Some("classifier"));
        assert_eq!(resolution.label.as_deref(), Some("Go"));
    }

    #[test]
    fn custom_fallback_used_on_exact_miss() {
        let catalog = Catalog::build(sample_roster(), MatchStrategy::Tiered)
            .unwrap()
            .with_fallback(Box::new(Lowercase));
        let resolution = catalog.resolve("python").unwrap();
        assert_eq!(resolution.resolver, Some("lowercase"));
        assert_eq!(resolution.label.as_deref(), Some("Python"));
    }

    #[test]
    fn exact_strategy_ignores_fallback() {
        let catalog = Catalog::build(sample_roster(), MatchStrategy::Exact)
            .unwrap()
            .with_fallback(Box::new(Lowercase));
        let resolution = catalog.resolve("python").unwrap();
        assert_eq!(resolution.path, ResolutionPath::Unresolved);
    }
}
