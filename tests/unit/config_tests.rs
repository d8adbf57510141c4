use std::fs;
use std::path::PathBuf;

use skillmatch::config::Config;
use skillmatch::matching::MatchStrategy;
use skillmatch::test_utils::{TestCase, run_table_tests};

fn fixture_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(relative)
}

#[test]
fn config_fixtures_parse() -> Result<(), String> {
    let cases = vec![
        TestCase {
            name: "default",
            input: "tests/fixtures/configs/default.toml",
            expected: (
                Some(PathBuf::from("users.csv")),
                false,
                "id".to_string(),
                "Skills".to_string(),
                MatchStrategy::Tiered,
                true,
            ),
        },
        TestCase {
            name: "renamed_columns",
            input: "tests/fixtures/configs/renamed_columns.toml",
            expected: (
                Some(PathBuf::from("/srv/people/staff.csv")),
                true,
                "user_id".to_string(),
                "primary_skill".to_string(),
                MatchStrategy::Exact,
                false,
            ),
        },
    ];

    run_table_tests(cases, |relative_path| {
        let path = fixture_path(relative_path);
        let content = fs::read_to_string(&path).expect("read fixture");
        let config: Config = toml::from_str(&content).expect("parse config");
        (
            config.roster.path,
            config.roster.skip_invalid_rows,
            config.roster.columns.id,
            config.roster.columns.skill,
            config.matcher.strategy,
            config.output.mailto_links,
        )
    })
}

#[test]
fn partial_columns_keep_defaults() {
    let path = fixture_path("tests/fixtures/configs/renamed_columns.toml");
    let config = Config::load(Some(&path), None).expect("load config");
    assert_eq!(config.roster.columns.email, "email");
    assert_eq!(config.roster.columns.first_name, "first_name");
    assert_eq!(config.serve.bind, "127.0.0.1:5000");
}

#[test]
fn missing_explicit_file_yields_defaults() {
    let path = fixture_path("tests/fixtures/configs/does_not_exist.toml");
    let config = Config::load(Some(&path), None).expect("load config");
    assert!(config.roster.path.is_none());
    assert_eq!(config.matcher.strategy, MatchStrategy::Tiered);
}
