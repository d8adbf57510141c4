//! Error types for skillmatch.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SmError>;

#[derive(Error, Debug)]
pub enum SmError {
    #[error("roster {source_name} is missing required column(s): {}", missing.join(", "))]
    Schema {
        source_name: String,
        missing: Vec<String>,
    },

    #[error("invalid roster row {row}: {reason}")]
    InvalidRecord { row: usize, reason: String },

    #[error("failed to read roster: {0}")]
    Csv(#[from] csv::Error),

    #[error("{0} used before fit")]
    UnfittedModel(&'static str),

    #[error("encoded label width {actual} does not match fitted width {expected}")]
    ModelMismatch { expected: usize, actual: usize },

    #[error("user not found: {0}")]
    UserNotFound(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("missing configuration: {0}")]
    MissingConfig(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("server error: {0}")]
    Server(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SmError {
    /// Stable machine-readable code used in robot-mode error output.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Schema { .. } => "schema_error",
            Self::InvalidRecord { .. } => "invalid_record",
            Self::Csv(_) => "roster_read_failed",
            Self::UnfittedModel(_) => "unfitted_model",
            Self::ModelMismatch { .. } => "model_mismatch",
            Self::UserNotFound(_) => "user_not_found",
            Self::Config(_) | Self::MissingConfig(_) => "config_error",
            Self::Serialization(_) => "serialization_error",
            Self::Server(_) => "server_error",
            Self::Io(_) => "io_error",
        }
    }
}
