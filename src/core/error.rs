//! Error types for the diary core library.

use thiserror::Error;

/// All errors that can occur within the diary core library.
#[derive(Debug, Error)]
pub enum DiaryError {
    /// A SQLite read or query failed.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// The durable medium rejected a write. The underlying error is carried
    /// verbatim; in-memory state stays consistent with the last successful
    /// commit.
    #[error("Commit failed: {0}")]
    CommitFailure(rusqlite::Error),

    /// Create/update was called with a blank or whitespace-only description.
    #[error("Entry description cannot be empty")]
    EmptyDescription,

    /// An entry ID was requested that does not exist in the database.
    #[error("Entry not found: {0}")]
    EntryNotFound(String),

    /// A field failed validation before any commit was attempted.
    #[error("Validation failed for {field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// Two projections handed to the diff engine disagree about the
    /// group-ordering invariant. This signals a bug upstream, not bad user
    /// input.
    #[error("Projection invariant violated: {0}")]
    InvariantViolation(String),

    /// The opened file is not a valid diary database.
    #[error("Invalid diary store: {0}")]
    InvalidStore(String),

    /// An I/O operation on the filesystem failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored data could not be deserialized from JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias that pins the error type to [`DiaryError`].
pub type Result<T> = std::result::Result<T, DiaryError>;

impl DiaryError {
    /// Returns a short, human-readable message suitable for display to the end user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Database(e) => format!("Failed to read diary: {e}"),
            Self::CommitFailure(e) => format!("Failed to save: {e}"),
            Self::EmptyDescription => {
                "An entry needs a description before it can be saved".to_string()
            }
            Self::EntryNotFound(_) => "Entry no longer exists".to_string(),
            Self::Validation { message, .. } => message.clone(),
            Self::InvariantViolation(_) => {
                "Internal error while refreshing the entry list".to_string()
            }
            Self::InvalidStore(_) => "Could not open diary file".to_string(),
            Self::Io(e) => format!("File error: {e}"),
            Self::Json(e) => format!("Data format error: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_description_message_mentions_description() {
        let e = DiaryError::EmptyDescription;
        assert!(e.to_string().to_lowercase().contains("description"));
    }

    #[test]
    fn test_not_found_user_message_is_friendly() {
        let e = DiaryError::EntryNotFound("abc".to_string());
        assert_eq!(e.user_message(), "Entry no longer exists");
    }

    #[test]
    fn test_validation_carries_field() {
        let e = DiaryError::Validation {
            field: "mood",
            message: "Mood must be between 0 and 10".to_string(),
        };
        assert!(e.to_string().contains("mood"));
        assert_eq!(e.user_message(), "Mood must be between 0 and 10");
    }
}
