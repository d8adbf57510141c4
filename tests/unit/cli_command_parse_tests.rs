use clap::Parser;

use skillmatch::cli::{Cli, Commands, OutputFormat};
use skillmatch::matching::MatchStrategy;

fn parse(args: &[&str]) -> Cli {
    let mut argv = vec!["skillmatch"];
    argv.extend_from_slice(args);
    Cli::parse_from(argv)
}

#[test]
fn parse_recommend_many_skills() {
    match parse(&["recommend", "Python", "Data Analysis"]).command {
        Commands::Recommend(args) => {
            assert_eq!(args.skills, ["Python", "Data Analysis"]);
            assert!(args.strategy.is_none());
            assert!(!args.no_links);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn parse_recommend_strategy_override() {
    match parse(&["recommend", "Go", "--strategy", "classifier", "--no-links"]).command {
        Commands::Recommend(args) => {
            assert_eq!(args.strategy, Some(MatchStrategy::Classifier));
            assert!(args.no_links);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn recommend_requires_a_skill() {
    assert!(Cli::try_parse_from(["skillmatch", "recommend"]).is_err());
}

#[test]
fn parse_serve_bind() {
    match parse(&["serve", "--bind", "0.0.0.0:8080"]).command {
        Commands::Serve(args) => {
            assert_eq!(args.bind.as_deref(), Some("0.0.0.0:8080"));
            assert!(args.strategy.is_none());
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn parse_show_and_doctor() {
    match parse(&["show", "42"]).command {
        Commands::Show(args) => assert_eq!(args.id, "42"),
        other => panic!("unexpected command: {other:?}"),
    }
    match parse(&["doctor", "--fit"]).command {
        Commands::Doctor(args) => assert!(args.fit),
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn robot_implies_json_unless_format_given() {
    assert_eq!(parse(&["--robot", "skills"]).output_format(), OutputFormat::Json);
    assert_eq!(
        parse(&["--robot", "-o", "tsv", "skills"]).output_format(),
        OutputFormat::Tsv
    );
    assert_eq!(parse(&["skills"]).output_format(), OutputFormat::Human);
}

#[test]
fn global_flags_after_subcommand() {
    let cli = parse(&["skills", "--roster", "users.csv", "-vv"]);
    assert_eq!(cli.roster.as_deref(), Some(std::path::Path::new("users.csv")));
    assert_eq!(cli.verbose, 2);
}
