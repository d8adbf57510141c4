//! skillmatch show - Show one user record

use clap::Args;
use tracing::debug;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, OutputFormat, emit_json, escape_tsv, robot_ok};
use crate::error::{Result, SmError};
use crate::roster::{UserId, UserRecord};

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// User id as it appears in the roster
    pub id: String,
}

pub fn run(ctx: &AppContext, args: &ShowArgs) -> Result<()> {
    let roster = ctx.load_roster()?;
    let id = UserId::new(args.id.as_str());
    let record = roster
        .get(&id)
        .ok_or_else(|| SmError::UserNotFound(args.id.clone()))?;
    debug!(target: "show", user = %record.id, mode = ?ctx.output_format, "showing user");

    if ctx.robot_mode && ctx.output_format == OutputFormat::Json {
        return emit_json(&robot_ok(record));
    }

    match ctx.output_format {
        OutputFormat::Human => println!("{}", human(record)),
        OutputFormat::Json => emit_json(record)?,
        OutputFormat::Jsonl => println!("{}", serde_json::to_string(record)?),
        OutputFormat::Plain => println!("{}", row(record)),
        OutputFormat::Tsv => println!("id\tfirst_name\temail\tgender\tskill\n{}", row(record)),
    }
    Ok(())
}

fn human(record: &UserRecord) -> String {
    let mut layout = HumanLayout::new();
    layout
        .title(&format!("User {}", record.id))
        .kv("first_name", &record.first_name)
        .kv("email", &record.email)
        .kv("gender", &record.gender)
        .kv("skill", &record.skill);
    layout.build()
}

fn row(record: &UserRecord) -> String {
    [
        record.id.as_str(),
        record.first_name.as_str(),
        record.email.as_str(),
        record.gender.as_str(),
        record.skill.as_str(),
    ]
    .iter()
    .map(|cell| escape_tsv(cell))
    .collect::<Vec<_>>()
    .join("\t")
}
