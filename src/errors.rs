//! Unified application error type.
//! All modules (db, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Connection gateway
    // ---------------------------
    #[error("Error trying to prepare database directory {}: {source}", .path.display())]
    DatabaseDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Error trying to connect to database {url}: {reason}")]
    Connection { url: String, reason: String },

    #[error("Error trying to close database connection: {0}")]
    Close(#[source] rusqlite::Error),

    // ---------------------------
    // Statement executor
    // ---------------------------
    #[error("Error creating new database statement: {0}")]
    Statement(#[source] rusqlite::Error),

    #[error("Error executing {kind}: {source}{}", rollback_note(.rollback))]
    Execution {
        kind: &'static str,
        #[source]
        source: rusqlite::Error,
        rollback: Option<rusqlite::Error>,
    },

    #[error("Error doing commit: {source}{}", rollback_note(.rollback))]
    Commit {
        #[source]
        source: rusqlite::Error,
        rollback: Option<rusqlite::Error>,
    },

    #[error("Error rolling back database transaction: {0}")]
    Rollback(#[source] rusqlite::Error),

    #[error("Error starting database transaction: {0}")]
    Transaction(#[source] rusqlite::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Front-end errors
    // ---------------------------
    #[error("Unknown panel action: {0}")]
    UnknownAction(String),

    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

fn rollback_note(rollback: &Option<rusqlite::Error>) -> String {
    match rollback {
        Some(e) => format!(" (rollback also failed: {e})"),
        None => String::new(),
    }
}

impl AppError {
    /// The error raised by the automatic rollback that followed this failure, if any.
    pub fn rollback_error(&self) -> Option<&rusqlite::Error> {
        match self {
            AppError::Execution { rollback, .. } | AppError::Commit { rollback, .. } => {
                rollback.as_ref()
            }
            _ => None,
        }
    }
}

impl From<csv::Error> for AppError {
    fn from(e: csv::Error) -> Self {
        AppError::Export(e.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Export(e.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::AppError;
    use rusqlite::Error;

    #[test]
    fn execution_error_keeps_rollback_failure() {
        let err = AppError::Execution {
            kind: "update",
            source: Error::ExecuteReturnedResults,
            rollback: Some(Error::QueryReturnedNoRows),
        };

        assert!(matches!(
            err.rollback_error(),
            Some(Error::QueryReturnedNoRows)
        ));
        let msg = err.to_string();
        assert!(msg.starts_with("Error executing update: "));
        assert!(msg.contains(&Error::ExecuteReturnedResults.to_string()));
        assert!(msg.contains(" (rollback also failed: "));
        assert!(msg.contains(&Error::QueryReturnedNoRows.to_string()));
    }

    #[test]
    fn commit_error_keeps_rollback_failure() {
        let err = AppError::Commit {
            source: Error::InvalidQuery,
            rollback: Some(Error::QueryReturnedNoRows),
        };

        assert!(err.rollback_error().is_some());
        let msg = err.to_string();
        assert!(msg.starts_with("Error doing commit: "));
        assert!(msg.contains(&Error::InvalidQuery.to_string()));
        assert!(msg.ends_with(&format!(
            " (rollback also failed: {})",
            Error::QueryReturnedNoRows
        )));
    }

    #[test]
    fn other_errors_carry_no_rollback() {
        let err = AppError::Commit {
            source: Error::InvalidQuery,
            rollback: None,
        };
        assert!(err.rollback_error().is_none());
        assert!(!err.to_string().contains("rollback also failed"));
        assert!(AppError::Rollback(Error::InvalidQuery).rollback_error().is_none());
    }
}
