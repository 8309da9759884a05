use crate::db::gateway::Session;
use crate::db::migrate::run_pending_migrations;
use crate::errors::AppResult;

/// Initialize the database.
/// Delegates all schema creation / upgrades to the migration engine, then
/// commits. A failed migration leaves the schema untouched.
pub fn init_db(session: &Session) -> AppResult<Vec<&'static str>> {
    match run_pending_migrations(session) {
        Ok(applied) => {
            session.commit()?;
            Ok(applied)
        }
        Err(e) => {
            session.rollback()?;
            Err(e)
        }
    }
}
