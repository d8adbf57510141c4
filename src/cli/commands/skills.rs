//! skillmatch skills - List roster skills with user counts

use clap::Args;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::{
    Formattable, OutputFormat, emit_formatted, emit_json, escape_tsv, robot_ok,
};
use crate::error::Result;
use crate::matching::SkillIndex;
use crate::roster::Roster;

#[derive(Args, Debug)]
pub struct SkillsArgs {
    /// Sort by user count (descending) instead of by label
    #[arg(long)]
    pub by_count: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillEntry {
    pub skill: String,
    pub users: usize,
}

#[derive(Debug, Clone, Default)]
pub struct SkillListing {
    pub entries: Vec<SkillEntry>,
}

impl SkillListing {
    #[must_use]
    pub fn from_index(index: &SkillIndex, by_count: bool) -> Self {
        let mut entries: Vec<SkillEntry> = index
            .label_counts()
            .into_iter()
            .map(|(skill, users)| SkillEntry {
                skill: skill.to_string(),
                users,
            })
            .collect();
        if by_count {
            // Stable: equal counts keep label order.
            entries.sort_by(|a, b| b.users.cmp(&a.users));
        }
        Self { entries }
    }
}

impl Formattable for SkillListing {
    fn format(&self, fmt: OutputFormat) -> String {
        match fmt {
            OutputFormat::Human => {
                if self.entries.is_empty() {
                    return "No skills in roster.".to_string();
                }
                let width = self
                    .entries
                    .iter()
                    .map(|entry| entry.skill.chars().count())
                    .max()
                    .unwrap_or_default();
                self.entries
                    .iter()
                    .map(|entry| format!("{:<width$}  {}", entry.skill, entry.users))
                    .collect::<Vec<_>>()
                    .join("\n")
            }
            OutputFormat::Json => serde_json::to_string_pretty(&self.entries).unwrap_or_default(),
            OutputFormat::Jsonl => self
                .entries
                .iter()
                .filter_map(|entry| serde_json::to_string(entry).ok())
                .collect::<Vec<_>>()
                .join("\n"),
            OutputFormat::Plain => self
                .entries
                .iter()
                .map(|entry| format!("{}\t{}", escape_tsv(&entry.skill), entry.users))
                .collect::<Vec<_>>()
                .join("\n"),
            OutputFormat::Tsv => {
                let mut out = String::from("skill\tusers\n");
                for entry in &self.entries {
                    out.push_str(&format!("{}\t{}\n", escape_tsv(&entry.skill), entry.users));
                }
                out
            }
        }
    }
}

pub fn run(ctx: &AppContext, args: &SkillsArgs) -> Result<()> {
    let roster: Roster = ctx.load_roster()?;
    let index = SkillIndex::build(roster.iter());
    let listing = SkillListing::from_index(&index, args.by_count);

    if ctx.robot_mode && ctx.output_format == OutputFormat::Json {
        return emit_json(&robot_ok(&listing.entries));
    }
    emit_formatted(&listing, ctx.output_format);
    Ok(())
}
