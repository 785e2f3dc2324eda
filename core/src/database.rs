//! Shared SQLite handle.
//!
//! The connection is created lazily on first use and reused for every
//! later operation; `close()` drops it and the next use reconnects. The
//! mutex makes concurrent first access safe (one creator, the rest wait
//! and observe the opened connection) and serialises operations, which
//! `rusqlite::Connection` requires in any case.

use std::path::PathBuf;
use std::sync::Mutex;

use rusqlite::Connection;

use crate::error::{SimError, SimResult};

enum Location {
    File(PathBuf),
    InMemory,
}

pub struct Database {
    location: Location,
    conn: Mutex<Option<Connection>>,
}

impl Database {
    /// Handle backed by the database file at `path`, created on first use.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            location: Location::File(path.into()),
            conn: Mutex::new(None),
        }
    }

    /// In-memory handle (used in tests). Contents do not survive `close()`.
    pub fn in_memory() -> Self {
        Self {
            location: Location::InMemory,
            conn: Mutex::new(None),
        }
    }

    /// Run `f` against the shared connection, opening it first if needed.
    pub fn with_conn<T>(&self, f: impl FnOnce(&mut Connection) -> SimResult<T>) -> SimResult<T> {
        let mut guard = match self.conn.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let mut conn = match guard.take() {
            Some(conn) => conn,
            None => self.connect()?,
        };
        let result = f(&mut conn);
        *guard = Some(conn);
        result
    }

    /// Release the connection. A later `with_conn` reconnects.
    pub fn close(&self) -> SimResult<()> {
        let mut guard = match self.conn.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(conn) = guard.take() {
            conn.close().map_err(|(_, err)| SimError::Database(err))?;
        }
        Ok(())
    }

    fn connect(&self) -> SimResult<Connection> {
        match &self.location {
            Location::File(path) => {
                let conn = Connection::open(path)?;
                // WAL mode: better concurrent read performance. Only
                // meaningful for real files, so failure is ignored.
                let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
                Ok(conn)
            }
            Location::InMemory => Ok(Connection::open_in_memory()?),
        }
    }
}
