use crate::db::executor::create_statement;
use crate::db::gateway::Session;
use crate::db::log::ttlog;
use crate::db::result_set::ResultSet;
use crate::errors::{AppError, AppResult};
use crate::models::Promoter;
use rusqlite::params;

pub const LIST_SQL: &str =
    "SELECT id, name, email, created_at FROM promoters ORDER BY name COLLATE NOCASE ASC, id ASC";

pub struct PromoterLogic;

impl PromoterLogic {
    /// All promoters, as raw rows (for rendering in any output format).
    pub fn list_rows(session: &Session) -> AppResult<ResultSet> {
        create_statement(session)?.execute_query(LIST_SQL)
    }

    pub fn list(session: &Session) -> AppResult<Vec<Promoter>> {
        let rows = Self::list_rows(session)?;
        Ok(rows.rows().filter_map(Promoter::from_row).collect())
    }

    /// Insert a promoter and commit. Returns the new id.
    pub fn add(session: &Session, name: &str, email: &str) -> AppResult<i64> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Other("promoter name cannot be empty".into()));
        }
        let email = email.trim();

        let stmt = create_statement(session)?;
        stmt.execute_update_with(
            "INSERT INTO promoters (name, email, created_at) VALUES (?1, ?2, ?3)",
            params![name, email, chrono::Local::now().to_rfc3339()],
        )?;
        let id = session.connection().last_insert_rowid();

        ttlog(session, "add", &format!("promoter {id}"), &format!("Added promoter '{name}'"))?;
        session.commit()?;
        Ok(id)
    }

    /// Delete a promoter and commit. Returns `false` when no such id exists.
    pub fn remove(session: &Session, id: i64) -> AppResult<bool> {
        let stmt = create_statement(session)?;
        let removed = stmt.execute_update_with("DELETE FROM promoters WHERE id = ?1", [id])?;
        if removed == 0 {
            session.rollback()?;
            return Ok(false);
        }

        ttlog(session, "del", &format!("promoter {id}"), "Deleted promoter")?;
        session.commit()?;
        Ok(true)
    }
}
