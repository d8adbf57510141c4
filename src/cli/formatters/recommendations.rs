//! Recommendation results formatter
//!
//! Renders projected users as a human listing, JSON, JSONL, plain rows or
//! TSV with a header.

use serde::Serialize;

use crate::cli::output::{Formattable, OutputFormat, escape_tsv};
use crate::matching::{MatchStrategy, Recommendation, Recommender, SkillResolution};
use crate::projection::{NO_USERS_MESSAGE, UserView, project};

/// A recommendation together with its display projection.
#[derive(Debug, Clone)]
pub struct RecommendationReport {
    pub requested: Vec<String>,
    pub strategy: MatchStrategy,
    pub users: Vec<UserView>,
    pub resolutions: Vec<SkillResolution>,
    pub duration_ms: Option<u64>,
}

#[derive(Serialize)]
struct ReportJson<'a> {
    status: &'static str,
    requested: &'a [String],
    strategy: MatchStrategy,
    count: usize,
    users: &'a [UserView],
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
    unmatched: Vec<&'a str>,
    resolutions: &'a [SkillResolution],
    #[serde(skip_serializing_if = "Option::is_none")]
    duration_ms: Option<u64>,
}

impl RecommendationReport {
    #[must_use]
    pub fn new(
        recommender: &Recommender,
        requested: &[String],
        recommendation: Recommendation,
        mailto: bool,
    ) -> Self {
        let catalog = recommender.catalog();
        Self {
            requested: requested.to_vec(),
            strategy: catalog.strategy(),
            users: project(catalog.roster(), &recommendation, mailto),
            resolutions: recommendation.resolutions,
            duration_ms: None,
        }
    }

    #[must_use]
    pub const fn with_duration(mut self, duration_ms: u64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    /// Requested skills that matched nobody.
    #[must_use]
    pub fn unmatched(&self) -> Vec<&str> {
        self.resolutions
            .iter()
            .filter(|resolution| !resolution.is_match())
            .map(|resolution| resolution.requested.as_str())
            .collect()
    }

    fn to_json(&self) -> ReportJson<'_> {
        let unmatched = self.unmatched();
        let status = match (self.users.is_empty(), unmatched.is_empty()) {
            (true, _) => "empty",
            (false, true) => "ok",
            (false, false) => "partial",
        };
        ReportJson {
            status,
            requested: &self.requested,
            strategy: self.strategy,
            count: self.users.len(),
            users: &self.users,
            message: self.users.is_empty().then_some(NO_USERS_MESSAGE),
            unmatched,
            resolutions: &self.resolutions,
            duration_ms: self.duration_ms,
        }
    }

    fn format_human(&self) -> String {
        let mut out = String::new();
        if self.users.is_empty() {
            out.push_str(NO_USERS_MESSAGE);
            out.push('\n');
        } else {
            out.push_str(&format!(
                "{} users for '{}' ({} match)",
                self.users.len(),
                self.requested.join(", "),
                self.strategy,
            ));
            if let Some(ms) = self.duration_ms {
                out.push_str(&format!(" in {ms}ms"));
            }
            out.push_str("\n\n");
            for user in &self.users {
                out.push_str(&format!(
                    "{:>6}  {:<16} {:<8} {}\n",
                    id_text(user),
                    user.first_name,
                    user.gender,
                    user.email
                ));
            }
        }

        let unmatched = self.unmatched();
        if !unmatched.is_empty() && !self.users.is_empty() {
            out.push_str(&format!("\n! No match for: {}\n", unmatched.join(", ")));
        }
        out.trim_end().to_string()
    }

    fn format_plain(&self) -> String {
        self.users
            .iter()
            .map(row)
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn format_tsv(&self) -> String {
        let mut out = String::from("id\tfirst_name\temail\tgender\n");
        for user in &self.users {
            out.push_str(&row(user));
            out.push('\n');
        }
        out
    }

    fn format_jsonl(&self) -> String {
        self.users
            .iter()
            .filter_map(|user| serde_json::to_string(user).ok())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Formattable for RecommendationReport {
    fn format(&self, fmt: OutputFormat) -> String {
        match fmt {
            OutputFormat::Human => self.format_human(),
            OutputFormat::Json => serde_json::to_string_pretty(&self.to_json()).unwrap_or_default(),
            OutputFormat::Jsonl => self.format_jsonl(),
            OutputFormat::Plain => self.format_plain(),
            OutputFormat::Tsv => self.format_tsv(),
        }
    }
}

fn id_text(user: &UserView) -> String {
    match &user.id {
        serde_json::Value::String(id) => id.clone(),
        other => other.to_string(),
    }
}

fn row(user: &UserView) -> String {
    format!(
        "{}\t{}\t{}\t{}",
        escape_tsv(&id_text(user)),
        escape_tsv(&user.first_name),
        escape_tsv(&user.email),
        escape_tsv(&user.gender)
    )
}
