use std::collections::BTreeSet;
use std::sync::Arc;

use proptest::prelude::*;

use skillmatch::matching::{Catalog, MatchStrategy, Recommender};
use skillmatch::roster::{Roster, UserId, UserRecord};

const LABELS: &[&str] = &["Python", "Go", "Rust", "SQL", "Data Analysis", "go"];

fn roster_strategy() -> impl Strategy<Value = Roster> {
    prop::collection::vec(0..LABELS.len(), 1..40).prop_map(|skills| {
        let records = skills
            .into_iter()
            .enumerate()
            .map(|(i, skill)| {
                UserRecord::new(
                    (i as u64 + 1).to_string(),
                    format!("user{i}"),
                    format!("user{i}@x.com"),
                    "F",
                    LABELS[skill],
                )
            })
            .collect();
        Roster::from_records(records).expect("generated roster is valid")
    })
}

fn recommender(roster: Roster, strategy: MatchStrategy) -> Recommender {
    Recommender::new(Arc::new(
        Catalog::build(roster, strategy).expect("catalog builds"),
    ))
}

fn query_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(LABELS).prop_map(str::to_string),
        "[A-Za-z ]{0,12}",
    ]
}

proptest! {
    #[test]
    fn exact_results_are_every_holder(roster in roster_strategy(), label in query_strategy()) {
        let expected: BTreeSet<UserId> = roster
            .iter()
            .filter(|record| record.skill == label)
            .map(|record| record.id.clone())
            .collect();
        let result = recommender(roster, MatchStrategy::Exact)
            .recommend(&[label.as_str()])
            .unwrap();
        prop_assert_eq!(result.user_ids, expected);
    }

    #[test]
    fn strategies_agree(roster in roster_strategy(), label in query_strategy()) {
        let exact = recommender(roster.clone(), MatchStrategy::Exact)
            .recommend(&[label.as_str()])
            .unwrap();
        let classifier = recommender(roster.clone(), MatchStrategy::Classifier)
            .recommend(&[label.as_str()])
            .unwrap();
        let tiered = recommender(roster, MatchStrategy::Tiered)
            .recommend(&[label.as_str()])
            .unwrap();
        prop_assert_eq!(&exact.user_ids, &classifier.user_ids);
        prop_assert_eq!(&exact.user_ids, &tiered.user_ids);
    }

    #[test]
    fn queries_are_idempotent(roster in roster_strategy(), labels in prop::collection::vec(query_strategy(), 0..5)) {
        let recommender = recommender(roster, MatchStrategy::Tiered);
        let first = recommender.recommend(&labels).unwrap();
        let second = recommender.recommend(&labels).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn many_skills_are_the_union(roster in roster_strategy(), labels in prop::collection::vec(query_strategy(), 0..5)) {
        let recommender = recommender(roster, MatchStrategy::Tiered);
        let combined = recommender.recommend(&labels).unwrap();
        let mut union = BTreeSet::new();
        for label in &labels {
            union.extend(recommender.recommend(&[label.as_str()]).unwrap().user_ids);
        }
        prop_assert_eq!(combined.user_ids, union);
    }
}
