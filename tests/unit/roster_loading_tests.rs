use std::path::PathBuf;

use skillmatch::SmError;
use skillmatch::matching::{Catalog, MatchStrategy, Recommender};
use skillmatch::roster::{ColumnMap, LoadOptions, Roster, UserId};

fn fixture_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(relative)
}

#[test]
fn loads_roster_with_extra_columns() {
    let roster = Roster::load_path(
        &fixture_path("tests/fixtures/rosters/users.csv"),
        &LoadOptions::default(),
    )
    .expect("load roster");

    assert_eq!(roster.len(), 5);
    assert_eq!(roster.skill_of(&UserId::from(4u64)), Some("Data Analysis"));
}

#[test]
fn multi_word_labels_match_verbatim() {
    let roster = Roster::load_path(
        &fixture_path("tests/fixtures/rosters/users.csv"),
        &LoadOptions::default(),
    )
    .expect("load roster");
    let recommender =
        Recommender::new(Catalog::build(roster, MatchStrategy::Tiered).expect("build").into());

    let hit = recommender.recommend(&["Data Analysis"]).expect("recommend");
    assert_eq!(hit.len(), 1);
    assert!(hit.contains(&UserId::from("4")));

    let miss = recommender.recommend(&["data analysis"]).expect("recommend");
    assert!(miss.is_empty());
}

#[test]
fn renamed_columns_and_invalid_rows() {
    let path = fixture_path("tests/fixtures/rosters/renamed.csv");
    let columns = ColumnMap {
        id: "user_id".to_string(),
        skill: "primary_skill".to_string(),
        ..ColumnMap::default()
    };

    let strict = LoadOptions {
        columns: columns.clone(),
        skip_invalid_rows: false,
    };
    let err = Roster::load_path(&path, &strict).unwrap_err();
    assert!(matches!(err, SmError::InvalidRecord { row: 2, .. }), "{err:?}");

    let lenient = LoadOptions {
        columns,
        skip_invalid_rows: true,
    };
    let roster = Roster::load_path(&path, &lenient).expect("load roster");
    assert_eq!(roster.len(), 2);
    assert!(roster.get(&UserId::from("11")).is_none());
}

#[test]
fn default_columns_reject_renamed_roster() {
    let err = Roster::load_path(
        &fixture_path("tests/fixtures/rosters/renamed.csv"),
        &LoadOptions::default(),
    )
    .unwrap_err();
    match err {
        SmError::Schema { missing, .. } => {
            assert_eq!(missing, ["id", "Skills"]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
