//! skillmatch serve - Serve recommendations over HTTP

use clap::Args;

use crate::app::AppContext;
use crate::error::{Result, SmError};
use crate::matching::MatchStrategy;
use crate::server::{self, AppState};

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to bind (overrides serve.bind)
    #[arg(long)]
    pub bind: Option<String>,

    /// Override the configured match strategy
    #[arg(long, value_enum)]
    pub strategy: Option<MatchStrategy>,

    /// Return plain email addresses instead of mailto links
    #[arg(long)]
    pub no_links: bool,
}

pub fn run(ctx: &AppContext, args: &ServeArgs) -> Result<()> {
    // Roster and model errors surface here, before anything is bound.
    let recommender = ctx.build_recommender(args.strategy)?;
    let state = AppState::new(recommender, ctx.config.output.mailto_links && !args.no_links);
    let bind = args.bind.as_deref().unwrap_or(&ctx.config.serve.bind);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|err| SmError::Server(format!("start runtime: {err}")))?;
    runtime.block_on(server::serve(state, bind))
}
