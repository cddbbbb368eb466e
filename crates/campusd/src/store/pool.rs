//! Bounded pool of SQLite connections.
//!
//! Connections are opened lazily and returned to the idle list after use.
//! The pool never blocks: when every idle connection is checked out a new
//! one is opened, and surplus connections are closed on return.

use std::sync::Mutex;

use rusqlite::Connection;
use tracing::debug;

use super::{STORE_TARGET, StoreError, StoreSettings};

#[derive(Debug)]
pub(super) struct ConnectionPool {
    settings: StoreSettings,
    idle: Mutex<Vec<Connection>>,
}

impl ConnectionPool {
    pub(super) fn new(settings: StoreSettings) -> Self {
        Self {
            settings,
            idle: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn settings(&self) -> &StoreSettings {
        &self.settings
    }

    /// Runs `operation` with exclusive use of one connection.
    pub(super) fn with_connection<T, E, F>(&self, operation: F) -> Result<T, E>
    where
        F: FnOnce(&mut Connection) -> Result<T, E>,
        E: From<StoreError>,
    {
        let mut connection = self.checkout()?;
        let result = operation(&mut connection);
        self.checkin(connection);
        result
    }

    fn checkout(&self) -> Result<Connection, StoreError> {
        let reused = self
            .idle
            .lock()
            .map_err(|_| StoreError::PoolPoisoned)?
            .pop();
        match reused {
            Some(connection) => Ok(connection),
            None => open_connection(&self.settings),
        }
    }

    fn checkin(&self, connection: Connection) {
        // A connection left inside a transaction is unusable for others.
        if !connection.is_autocommit() {
            debug!(
                target: STORE_TARGET,
                "discarding connection with an open transaction"
            );
            return;
        }
        if let Ok(mut idle) = self.idle.lock()
            && idle.len() < self.settings.pool_size
        {
            idle.push(connection);
        }
    }

    #[cfg(test)]
    pub(super) fn idle_count(&self) -> usize {
        self.idle.lock().map(|idle| idle.len()).unwrap_or_default()
    }
}

pub(super) fn open_connection(settings: &StoreSettings) -> Result<Connection, StoreError> {
    let connection =
        Connection::open(settings.path.as_std_path()).map_err(|source| StoreError::Open {
            path: settings.path.clone(),
            source,
        })?;
    connection
        .busy_timeout(settings.busy_timeout)
        .map_err(|source| StoreError::Configure { source })?;
    connection
        .execute_batch("PRAGMA foreign_keys = ON;")
        .map_err(|source| StoreError::Configure { source })?;
    let journal_mode: String = connection
        .pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))
        .map_err(|source| StoreError::Configure { source })?;
    debug!(
        target: STORE_TARGET,
        path = %settings.path,
        journal_mode = %journal_mode,
        "opened database connection"
    );
    Ok(connection)
}
