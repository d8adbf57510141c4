//! Display projection of recommended users.
//!
//! Shared by the CLI formatter and the HTTP endpoint: recommended ids are
//! projected to `{id, first_name, email, gender}` in roster order.

use serde::Serialize;

use crate::matching::Recommendation;
use crate::roster::Roster;

/// Message returned when a query matches nobody.
pub const NO_USERS_MESSAGE: &str = "No users found with the selected skill.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserView {
    pub id: serde_json::Value,
    pub first_name: String,
    pub email: String,
    pub gender: String,
}

/// Project the recommended users, keeping roster order.
#[must_use]
pub fn project(roster: &Roster, recommendation: &Recommendation, mailto: bool) -> Vec<UserView> {
    roster
        .iter()
        .filter(|record| recommendation.contains(&record.id))
        .map(|record| UserView {
            id: record.id.to_json_value(),
            first_name: record.first_name.clone(),
            email: if mailto {
                mailto_link(&record.email)
            } else {
                record.email.clone()
            },
            gender: record.gender.clone(),
        })
        .collect()
}

/// `<a href="mailto:EMAIL">EMAIL</a>`
#[must_use]
pub fn mailto_link(email: &str) -> String {
    format!(r#"<a href="mailto:{email}">{email}</a>"#)
}
