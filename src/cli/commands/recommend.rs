//! skillmatch recommend - Find users holding the requested skill(s)

use std::time::Instant;

use clap::Args;
use tracing::debug;

use crate::app::AppContext;
use crate::cli::formatters::RecommendationReport;
use crate::cli::output::{OutputFormat, emit_formatted, emit_json, robot_ok, robot_partial};
use crate::error::Result;
use crate::matching::MatchStrategy;
use crate::projection::NO_USERS_MESSAGE;

#[derive(Args, Debug)]
pub struct RecommendArgs {
    /// Skill label(s), matched verbatim and case-sensitively
    #[arg(required = true)]
    pub skills: Vec<String>,

    /// Override the configured match strategy
    #[arg(long, value_enum)]
    pub strategy: Option<MatchStrategy>,

    /// Print plain email addresses instead of mailto links
    #[arg(long)]
    pub no_links: bool,
}

pub fn run(ctx: &AppContext, args: &RecommendArgs) -> Result<()> {
    let recommender = ctx.build_recommender(args.strategy)?;

    let start = Instant::now();
    let recommendation = recommender.recommend(&args.skills)?;
    let elapsed = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
    debug!(target: "recommend", users = recommendation.len(), elapsed_ms = elapsed);

    let mailto = ctx.config.output.mailto_links && !args.no_links;
    let report = RecommendationReport::new(&recommender, &args.skills, recommendation, mailto)
        .with_duration(elapsed);

    if ctx.robot_mode && ctx.output_format == OutputFormat::Json {
        let unmatched: Vec<String> = report.unmatched().into_iter().map(str::to_string).collect();
        if report.users.is_empty() {
            return emit_json(&robot_partial(
                serde_json::json!({ "message": NO_USERS_MESSAGE }),
                0,
                unmatched,
            ));
        }
        let completed = args.skills.len() - unmatched.len();
        if unmatched.is_empty() {
            return emit_json(&robot_ok(&report.users));
        }
        return emit_json(&robot_partial(&report.users, completed, unmatched));
    }

    emit_formatted(&report, ctx.output_format);
    Ok(())
}
