use crate::db::gateway::Session;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension};

/// A named schema change, applied once and recorded in the `log` table.
struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20261019_0001_create_promoters",
        description: "Created promoters table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS promoters (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL,
            email       TEXT NOT NULL DEFAULT '',
            created_at  TEXT NOT NULL
        );
        "#,
    },
    Migration {
        version: "20261019_0002_promoters_email_index",
        description: "Added unique index on promoters(email)",
        sql: r#"
        CREATE UNIQUE INDEX IF NOT EXISTS idx_promoters_email
            ON promoters(email) WHERE email <> '';
        "#,
    },
];

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )
}

fn is_applied(conn: &Connection, version: &str) -> rusqlite::Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply(conn: &Connection, m: &Migration) -> rusqlite::Result<()> {
    conn.execute_batch(m.sql)?;
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (?1, 'migration_applied', ?2, ?3)",
        [
            chrono::Local::now().to_rfc3339().as_str(),
            m.version,
            m.description,
        ],
    )?;
    Ok(())
}

/// Run every pending migration inside the session's current transaction.
///
/// Returns the versions applied by this call. The caller commits.
pub fn run_pending_migrations(session: &Session) -> AppResult<Vec<&'static str>> {
    let conn = session.connection();
    let migration_err = |version: &str, e: rusqlite::Error| {
        AppError::Migration(format!("{version}: {e}"))
    };

    ensure_log_table(conn).map_err(|e| migration_err("log table", e))?;

    let mut applied = Vec::new();
    for m in MIGRATIONS {
        if is_applied(conn, m.version).map_err(|e| migration_err(m.version, e))? {
            continue;
        }

        apply(conn, m).map_err(|e| migration_err(m.version, e))?;
        success(format!("Migration applied: {} → {}", m.version, m.description));
        applied.push(m.version);
    }

    Ok(applied)
}

/// Versions of all migrations known to this build, oldest first.
pub fn known_versions() -> impl Iterator<Item = &'static str> {
    MIGRATIONS.iter().map(|m| m.version)
}
