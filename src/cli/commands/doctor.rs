//! skillmatch doctor - Validate the roster and report catalog statistics

use clap::Args;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, OutputFormat, emit_json, robot_ok};
use crate::error::Result;
use crate::matching::{Catalog, ClassifierResolver, FitSummary, MatchStrategy};
use crate::roster::Roster;

#[derive(Args, Debug)]
pub struct DoctorArgs {
    /// Also fit the classifier when the configured strategy does not need it
    #[arg(long)]
    pub fit: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct DoctorReport {
    pub roster: String,
    pub users: usize,
    pub skills: usize,
    pub largest_skill: Option<(String, usize)>,
    pub single_user_skills: usize,
    pub strategy: MatchStrategy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classifier: Option<FitSummary>,
    pub warnings: Vec<String>,
}

impl DoctorReport {
    pub fn inspect(roster_name: &str, catalog: &Catalog, force_fit: bool) -> Result<Self> {
        let counts = catalog.index().label_counts();
        let largest_skill = counts
            .iter()
            .fold(None::<(&str, usize)>, |best, &(label, users)| match best {
                Some((_, top)) if top >= users => best,
                _ => Some((label, users)),
            })
            .map(|(label, users)| (label.to_string(), users));

        let classifier = match catalog.fit_summary() {
            Some(summary) => Some(summary),
            None if force_fit => {
                Some(ClassifierResolver::fit(catalog.roster())?.classifier().summary())
            }
            None => None,
        };

        Ok(Self {
            roster: roster_name.to_string(),
            users: catalog.roster().len(),
            skills: catalog.index().len(),
            largest_skill,
            single_user_skills: counts.iter().filter(|(_, users)| *users == 1).count(),
            strategy: catalog.strategy(),
            classifier,
            warnings: roster_warnings(catalog.roster()),
        })
    }

    fn human(&self) -> String {
        let mut layout = HumanLayout::new();
        layout
            .title("skillmatch doctor")
            .kv("roster", &self.roster)
            .kv("users", &self.users.to_string())
            .kv("skills", &self.skills.to_string())
            .kv("single-user skills", &self.single_user_skills.to_string())
            .kv("strategy", self.strategy.as_str());
        if let Some((label, users)) = &self.largest_skill {
            layout.kv("largest skill", &format!("{label} ({users} users)"));
        }
        if let Some(summary) = &self.classifier {
            layout
                .blank()
                .section("Classifier")
                .kv("categories", &summary.width.to_string())
                .kv("samples", &summary.samples.to_string())
                .kv("shared leaves", &summary.shared_leaves.to_string());
        }
        layout.blank();
        if self.warnings.is_empty() {
            layout.bullet("no issues found");
        } else {
            layout.section("Warnings");
            for warning in &self.warnings {
                layout.bullet(warning);
            }
        }
        layout.build()
    }
}

/// Non-fatal data issues: missing or malformed emails, and skill labels that
/// differ from another label only by case or surrounding whitespace.
fn roster_warnings(roster: &Roster) -> Vec<String> {
    let mut warnings = Vec::new();
    for record in roster.iter() {
        if record.email.is_empty() {
            warnings.push(format!("user {} has no email", record.id));
        } else if !record.email.contains('@') {
            warnings.push(format!("user {} has malformed email {}", record.id, record.email));
        }
    }

    let mut seen: Vec<(String, &str)> = Vec::new();
    for record in roster.iter() {
        let folded = record.skill.trim().to_lowercase();
        match seen.iter().find(|(key, _)| *key == folded) {
            Some((_, first)) if *first != record.skill => {
                let warning = format!(
                    "skill labels '{first}' and '{}' differ only by case or spacing",
                    record.skill
                );
                if !warnings.contains(&warning) {
                    warnings.push(warning);
                }
            }
            Some(_) => {}
            None => seen.push((folded, record.skill.as_str())),
        }
    }
    warnings
}

pub fn run(ctx: &AppContext, args: &DoctorArgs) -> Result<()> {
    let roster_path = ctx.roster_path()?;
    let recommender = ctx.build_recommender(None)?;
    let report = DoctorReport::inspect(
        &roster_path.display().to_string(),
        recommender.catalog(),
        args.fit,
    )?;

    match ctx.output_format {
        OutputFormat::Human => println!("{}", report.human()),
        _ => emit_json(&robot_ok(&report))?,
    }
    Ok(())
}
