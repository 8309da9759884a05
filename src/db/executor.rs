//! Statement executor and the one-shot helpers built on top of it.
//!
//! Mutating calls (`execute`, `execute_update`) roll the session back once
//! when they fail; queries never do.

use crate::config::Config;
use crate::db::gateway::{self, Session};
use crate::db::result_set::ResultSet;
use crate::errors::{AppError, AppResult};
use rusqlite::Params;
use tracing::{debug, warn};

/// A statement bound to a session. It cannot outlive the session.
pub struct Statement<'s> {
    session: &'s Session,
}

/// Create a statement on `session`, opening a transaction if none is active.
pub fn create_statement(session: &Session) -> AppResult<Statement<'_>> {
    session.ensure_transaction().map_err(AppError::Statement)?;
    Ok(Statement { session })
}

impl Statement<'_> {
    /// Run any single SQL statement. Returns `true` when it produced a result
    /// set (the rows are read and discarded).
    pub fn execute(&self, sql: &str) -> AppResult<bool> {
        self.guarded("statement", || {
            let conn = self.session.connection();
            let mut stmt = conn.prepare(sql)?;
            if stmt.column_count() > 0 {
                let mut rows = stmt.query([])?;
                while rows.next()?.is_some() {}
                Ok(true)
            } else {
                stmt.execute([])?;
                Ok(false)
            }
        })
    }

    /// Run a DML/DDL statement and return the number of affected rows.
    pub fn execute_update(&self, sql: &str) -> AppResult<usize> {
        self.execute_update_with(sql, [])
    }

    /// Parameterised variant of [`Statement::execute_update`].
    pub fn execute_update_with<P: Params>(&self, sql: &str, params: P) -> AppResult<usize> {
        self.guarded("update", || {
            let changed = self.session.connection().execute(sql, params)?;
            debug!(changed, "update executed");
            Ok(changed)
        })
    }

    /// Run a row-returning statement and collect its rows.
    pub fn execute_query(&self, sql: &str) -> AppResult<ResultSet> {
        self.execute_query_with(sql, [])
    }

    /// Parameterised variant of [`Statement::execute_query`].
    pub fn execute_query_with<P: Params>(&self, sql: &str, params: P) -> AppResult<ResultSet> {
        let run = || -> rusqlite::Result<ResultSet> {
            let mut stmt = self.session.connection().prepare(sql)?;
            if stmt.column_count() == 0 {
                return Err(rusqlite::Error::InvalidQuery);
            }
            ResultSet::collect(&mut stmt, params)
        };

        run().map_err(|source| AppError::Execution {
            kind: "query",
            source,
            rollback: None,
        })
    }

    /// Run `op`; on failure roll the session back once and report both outcomes.
    ///
    /// User SQL such as `COMMIT` can end the transaction; a new one is opened
    /// afterwards so autocommit never takes over.
    fn guarded<T>(
        &self,
        kind: &'static str,
        op: impl FnOnce() -> rusqlite::Result<T>,
    ) -> AppResult<T> {
        let value = op().map_err(|source| {
            warn!(kind, error = %source, "execution failed, rolling back");
            let rollback = self.session.rollback_raw().err();
            AppError::Execution {
                kind,
                source,
                rollback,
            }
        })?;

        self.session
            .ensure_transaction()
            .map_err(AppError::Transaction)?;
        Ok(value)
    }
}

/// Connect, execute one update, commit and close. Returns the affected row count.
pub fn run_update(cfg: &Config, sql: &str) -> AppResult<usize> {
    let session = gateway::connect(cfg)?;
    let changed = create_statement(&session)?.execute_update(sql)?;
    session.commit()?;
    session.close()?;
    Ok(changed)
}

/// Connect, execute one statement, commit and close. Returns whether it produced a result set.
pub fn run_statement(cfg: &Config, sql: &str) -> AppResult<bool> {
    let session = gateway::connect(cfg)?;
    let produced_rows = create_statement(&session)?.execute(sql)?;
    session.commit()?;
    session.close()?;
    Ok(produced_rows)
}

/// Connect, run one query and close. The rows are owned by the caller.
pub fn run_query(cfg: &Config, sql: &str) -> AppResult<ResultSet> {
    let session = gateway::connect(cfg)?;
    let rows = create_statement(&session)?.execute_query(sql)?;
    session.close()?;
    Ok(rows)
}
