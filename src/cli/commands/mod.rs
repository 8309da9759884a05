pub mod config;
pub mod db;
pub mod exec;
pub mod init;
pub mod log;
pub mod promoters;
pub mod query;
pub mod start;

use crate::config::Config;
use crate::db::gateway::{self, Session};
use crate::db::initialize::init_db;
use crate::db::log::{log_table_exists, ttlog};
use crate::errors::AppResult;
use crate::ui::messages::warning;
use tracing::debug;

/// Open a session on a database whose schema is up to date.
pub(crate) fn open_ready(cfg: &Config) -> AppResult<Session> {
    let session = gateway::connect(cfg)?;
    init_db(&session)?;
    Ok(session)
}

/// Record an operation in the internal log (non blocking).
///
/// Databases that were never initialised are left alone: no migrations run
/// and nothing is logged.
pub(crate) fn audit(cfg: &Config, operation: &str, target: &str, message: &str) {
    let result = gateway::connect(cfg).and_then(|session| {
        if log_table_exists(&session)? {
            ttlog(&session, operation, target, message)?;
            session.commit()?;
        } else {
            debug!(operation, "log table missing, audit skipped");
        }
        session.close()
    });

    if let Err(e) = result {
        warning(format!("Failed to write internal log: {e}"));
    }
}

/// First line of `sql`, shortened for log targets.
pub(crate) fn sql_summary(sql: &str) -> String {
    let first = sql.trim().lines().next().unwrap_or_default();
    if first.chars().count() > 60 {
        let mut s: String = first.chars().take(57).collect();
        s.push_str("...");
        s
    } else {
        first.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::sql_summary;

    #[test]
    fn long_sql_is_shortened() {
        let sql = format!("INSERT INTO t VALUES ({})", "1, ".repeat(40));
        let s = sql_summary(&sql);
        assert_eq!(s.chars().count(), 60);
        assert!(s.ends_with("..."));
        assert_eq!(sql_summary("  SELECT 1\nFROM t"), "SELECT 1");
    }
}
