use crate::db::gateway::Session;
use crate::errors::AppResult;
use chrono::Local;
use rusqlite::{OptionalExtension, params};

/// Write an internal log line into the `log` table.
///
/// The row belongs to the session's current transaction: it is kept only if
/// the caller commits.
pub fn ttlog(session: &Session, operation: &str, target: &str, message: &str) -> AppResult<()> {
    let now = Local::now().to_rfc3339();

    let mut stmt = session.connection().prepare_cached(
        "INSERT INTO log (date, operation, target, message)
         VALUES (?1, ?2, ?3, ?4)",
    )?;

    stmt.execute(params![now, operation, target, message])?;

    Ok(())
}

/// `true` once `init` (or any migration) has created the `log` table.
pub fn log_table_exists(session: &Session) -> AppResult<bool> {
    let found = session
        .connection()
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'log'",
            [],
            |_| Ok(()),
        )
        .optional()?;
    Ok(found.is_some())
}
