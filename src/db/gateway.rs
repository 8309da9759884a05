//! Connection gateway: opens and closes sessions against the embedded database.
//!
//! Every session runs with autocommit disabled: a transaction is opened as
//! soon as the connection is established and re-opened after each commit or
//! rollback. Work that is not committed before the session is closed (or
//! dropped) is discarded by the engine.

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use rusqlite::{Connection, OpenFlags};
use std::cell::Cell;
use std::fs;
use std::time::Duration;
use tracing::{debug, warn};

thread_local! {
    static LIVE_SESSIONS: Cell<usize> = const { Cell::new(0) };
}

/// Number of sessions opened on the current thread that are still alive.
pub fn live_sessions() -> usize {
    LIVE_SESSIONS.with(Cell::get)
}

/// Keeps [`live_sessions`] in step with the lifetime of a session.
struct LiveGuard;

impl LiveGuard {
    fn acquire() -> Self {
        LIVE_SESSIONS.with(|n| n.set(n.get() + 1));
        LiveGuard
    }
}

impl Drop for LiveGuard {
    fn drop(&mut self) {
        LIVE_SESSIONS.with(|n| n.set(n.get().saturating_sub(1)));
    }
}

/// Everything needed to open a session, resolved from a [`Config`].
#[derive(Debug, Clone)]
pub struct ConnectionProfile {
    pub url: String,
    pub username: String,
    pub password: String,
    pub busy_timeout: Duration,
    pub foreign_keys: bool,
}

impl ConnectionProfile {
    /// Resolve the database directory (creating it when missing) and build the URL.
    pub fn from_config(cfg: &Config) -> AppResult<Self> {
        let dir = cfg.base_directory()?;
        fs::create_dir_all(&dir).map_err(|source| AppError::DatabaseDir {
            path: dir.clone(),
            source,
        })?;

        Ok(Self {
            url: cfg.connection_url()?,
            username: cfg.username.clone(),
            password: cfg.password.clone(),
            busy_timeout: Duration::from_millis(cfg.busy_timeout_ms),
            foreign_keys: cfg.foreign_keys,
        })
    }
}

/// An open connection to the database with an active transaction.
pub struct Session {
    conn: Connection,
    url: String,
    username: String,
    rollback_attempts: Cell<u32>,
    _live: LiveGuard,
}

/// Open a session using the configured database location and credentials.
pub fn connect(cfg: &Config) -> AppResult<Session> {
    let profile = ConnectionProfile::from_config(cfg)?;
    Session::open(&profile)
}

/// Release a session. Uncommitted work is discarded.
pub fn close(session: Session) -> AppResult<()> {
    session.close()
}

impl Session {
    pub fn open(profile: &ConnectionProfile) -> AppResult<Self> {
        let fail = |reason: String| AppError::Connection {
            url: profile.url.clone(),
            reason,
        };

        // The engine has no user accounts: the username only identifies the
        // session in the audit log, and a password could never be verified.
        if !profile.password.is_empty() {
            return Err(fail(format!(
                "password authentication is not supported for user '{}'",
                profile.username
            )));
        }

        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_CREATE
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;

        let conn =
            Connection::open_with_flags(&profile.url, flags).map_err(|e| fail(e.to_string()))?;

        conn.busy_timeout(profile.busy_timeout)
            .map_err(|e| fail(e.to_string()))?;

        // Must be set outside of a transaction to take effect.
        let foreign_keys = if profile.foreign_keys {
            "PRAGMA foreign_keys = ON"
        } else {
            "PRAGMA foreign_keys = OFF"
        };
        conn.execute_batch(foreign_keys)
            .map_err(|e| fail(e.to_string()))?;

        conn.execute_batch("BEGIN DEFERRED")
            .map_err(|e| fail(e.to_string()))?;

        debug!(url = %profile.url, user = %profile.username, "database session opened");

        Ok(Self {
            conn,
            url: profile.url.clone(),
            username: profile.username.clone(),
            rollback_attempts: Cell::new(0),
            _live: LiveGuard::acquire(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Underlying connection, for callers that need rusqlite directly.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// `true` when no transaction is open. Always `false` for a live session
    /// unless re-opening the transaction failed.
    pub fn is_autocommit(&self) -> bool {
        self.conn.is_autocommit()
    }

    /// How many rollbacks have been attempted on this session, explicit or automatic.
    pub fn rollback_attempts(&self) -> u32 {
        self.rollback_attempts.get()
    }

    /// Open a transaction if none is active.
    pub(crate) fn ensure_transaction(&self) -> rusqlite::Result<()> {
        if self.conn.is_autocommit() {
            self.conn.execute_batch("BEGIN DEFERRED")?;
        }
        Ok(())
    }

    /// Make the current transaction's changes permanent and start a new one.
    ///
    /// On failure one rollback is attempted; its own failure is reported
    /// alongside the commit error.
    pub fn commit(&self) -> AppResult<()> {
        // SQL run through a statement may already have ended the transaction.
        if self.conn.is_autocommit() {
            return self.ensure_transaction().map_err(AppError::Transaction);
        }

        if let Err(source) = self.conn.execute_batch("COMMIT") {
            warn!(error = %source, "commit failed, rolling back");
            let rollback = self.rollback_raw().err();
            return Err(AppError::Commit { source, rollback });
        }

        debug!(url = %self.url, "transaction committed");
        self.ensure_transaction().map_err(AppError::Transaction)
    }

    /// Abort the current transaction and start a new one.
    pub fn rollback(&self) -> AppResult<()> {
        self.rollback_raw().map_err(AppError::Rollback)
    }

    pub(crate) fn rollback_raw(&self) -> rusqlite::Result<()> {
        self.rollback_attempts.set(self.rollback_attempts.get() + 1);

        // Some errors make the engine roll back on its own; nothing left to undo then.
        if !self.conn.is_autocommit() {
            self.conn.execute_batch("ROLLBACK")?;
        }

        debug!(url = %self.url, "transaction rolled back");
        self.ensure_transaction()
    }

    pub fn close(self) -> AppResult<()> {
        let Session { conn, url, _live, .. } = self;
        match conn.close() {
            Ok(()) => {
                debug!(url = %url, "database session closed");
                Ok(())
            }
            Err((_conn, e)) => {
                warn!(url = %url, error = %e, "database session did not close cleanly");
                Err(AppError::Close(e))
            }
        }
    }
}
