//! Error types for the penalty register core library.

use crate::{FormField, RecordId, SelectionAction};
use thiserror::Error;

/// All errors that can occur within the penalty register core library.
#[derive(Debug, Error)]
pub enum PenaltyError {
    /// A SQLite operation failed.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// One or more required fields were blank when the form was submitted.
    #[error("Validation failed: missing {}", join_fields(.0))]
    ValidationFailed(Vec<FormField>),

    /// Edit or Delete was invoked with no record selected.
    #[error("No record selected to {0}")]
    NoSelection(SelectionAction),

    /// A record ID was requested that does not exist in the database.
    #[error("Record not found: {0}")]
    RecordNotFound(RecordId),

    /// A category label did not match any known category.
    #[error("Invalid category: {0}")]
    InvalidCategory(String),

    /// An I/O operation on the filesystem failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings data could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias that pins the error type to [`PenaltyError`].
pub type Result<T> = std::result::Result<T, PenaltyError>;

impl PenaltyError {
    /// Returns a short, human-readable message suitable for a notification banner.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Database(e) => format!("Failed to save: {e}"),
            Self::ValidationFailed(_) => "Please fill all fields!".to_string(),
            Self::NoSelection(action) => format!("Please select a record to {action}!"),
            Self::RecordNotFound(_) => "Record no longer exists".to_string(),
            Self::InvalidCategory(name) => format!("Unknown category: {name}"),
            Self::Io(e) => format!("File error: {e}"),
            Self::Json(e) => format!("Data format error: {e}"),
        }
    }

    /// True for errors the user can fix from the form without the store being involved.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::ValidationFailed(_) | Self::NoSelection(_) | Self::RecordNotFound(_)
        )
    }
}

fn join_fields(fields: &[FormField]) -> String {
    fields
        .iter()
        .map(|f| f.label())
        .collect::<Vec<_>>()
        .join(", ")
}
