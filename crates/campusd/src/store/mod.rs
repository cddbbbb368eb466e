//! SQLite-backed entity store.
//!
//! The store owns a small connection pool and hands out [`Repos`], a bundle
//! of per-entity repositories bound to one connection. [`Store::with_repos`]
//! binds the bundle to an autocommit connection; [`Store::within_tx`] binds it
//! to an immediate transaction that commits when the closure returns `Ok` and
//! rolls back otherwise. The bundle borrows the connection, so it cannot
//! outlive the unit of work it was created for.

mod classes;
mod enrollments;
mod errors;
mod people;
mod pool;
mod schema;
mod schools;
#[cfg(test)]
pub(crate) mod test_support;

use std::fs;
use std::time::Duration;

use camino::Utf8PathBuf;
use rusqlite::{Connection, TransactionBehavior};
use tracing::{debug, info, warn};

use campus_config::Config;

pub use self::classes::ClassRepo;
pub use self::enrollments::EnrollmentRepo;
pub use self::errors::{ConstraintKind, StoreError};
pub use self::people::PersonRepo;
pub use self::schools::SchoolRepo;

use self::pool::ConnectionPool;

pub(crate) const STORE_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::store");

/// Connection settings for a [`Store`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSettings {
    /// SQLite database file.
    pub path: Utf8PathBuf,
    /// How long a connection waits on a locked database.
    pub busy_timeout: Duration,
    /// Maximum number of idle connections kept for reuse.
    pub pool_size: usize,
}

impl StoreSettings {
    /// Builds settings for the database at `path` with default tuning.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        let defaults = Config::default();
        Self {
            path: path.into(),
            busy_timeout: defaults.store_busy_timeout(),
            pool_size: defaults.store_pool_size(),
        }
    }

    /// Extracts the store settings from the daemon configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            path: config.database_path().to_path_buf(),
            busy_timeout: config.store_busy_timeout(),
            pool_size: config.store_pool_size(),
        }
    }
}

/// Durable storage for schools, people, classes and enrollments.
#[derive(Debug)]
pub struct Store {
    pool: ConnectionPool,
}

impl Store {
    /// Opens the database, creating its directory and schema when missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created, the database
    /// cannot be opened or configured, or the schema cannot be provisioned.
    pub fn open(settings: StoreSettings) -> Result<Self, StoreError> {
        prepare_directory(&settings)?;
        let pool = ConnectionPool::new(settings);
        pool.with_connection(|connection| schema::provision(connection))?;
        info!(
            target: STORE_TARGET,
            path = %pool.settings().path,
            pool_size = pool.settings().pool_size,
            "entity store ready"
        );
        Ok(Self { pool })
    }

    /// Returns the settings the store was opened with.
    #[must_use]
    pub fn settings(&self) -> &StoreSettings {
        self.pool.settings()
    }

    /// Runs `operation` against repositories on an autocommit connection.
    ///
    /// Each statement commits on its own; use [`Store::within_tx`] when
    /// several writes must land together.
    ///
    /// # Errors
    ///
    /// Returns the closure's error, or a [`StoreError`] if no connection
    /// could be obtained.
    pub fn with_repos<T, E, F>(&self, operation: F) -> Result<T, E>
    where
        F: FnOnce(&Repos<'_>) -> Result<T, E>,
        E: From<StoreError>,
    {
        self.pool
            .with_connection(|connection| operation(&Repos::new(connection)))
    }

    /// Runs `operation` inside one immediate transaction.
    ///
    /// The transaction takes the write lock when it begins, so concurrent
    /// units of work serialise at their start (waiting up to the busy
    /// timeout). It commits when `operation` returns `Ok` and rolls back on
    /// `Err`. Units of work do not nest.
    ///
    /// # Errors
    ///
    /// Returns the closure's error, or a [`StoreError`] if the transaction
    /// cannot begin or commit.
    pub fn within_tx<T, E, F>(&self, operation: F) -> Result<T, E>
    where
        F: FnOnce(&Repos<'_>) -> Result<T, E>,
        E: From<StoreError>,
    {
        self.pool.with_connection(|connection| {
            let tx = connection
                .transaction_with_behavior(TransactionBehavior::Immediate)
                .map_err(StoreError::from)?;
            match operation(&Repos::new(&tx)) {
                Ok(value) => {
                    tx.commit().map_err(StoreError::from)?;
                    Ok(value)
                }
                Err(error) => {
                    if let Err(rollback) = tx.rollback() {
                        warn!(
                            target: STORE_TARGET,
                            error = %rollback,
                            "transaction rollback failed"
                        );
                    } else {
                        debug!(target: STORE_TARGET, "transaction rolled back");
                    }
                    Err(error)
                }
            }
        })
    }

    #[cfg(test)]
    pub(crate) fn idle_connections(&self) -> usize {
        self.pool.idle_count()
    }
}

/// Row key for a stored identity; `None` when no row can carry it.
fn row_key(id: u64) -> Option<i64> {
    i64::try_from(id).ok()
}

fn prepare_directory(settings: &StoreSettings) -> Result<(), StoreError> {
    let Some(parent) = settings.path.parent() else {
        return Ok(());
    };
    if parent.as_str().is_empty() {
        return Ok(());
    }
    fs::create_dir_all(parent.as_std_path()).map_err(|source| StoreError::CreateDirectory {
        path: parent.to_path_buf(),
        source,
    })
}

/// Repositories bound to one connection or transaction.
#[derive(Debug, Clone, Copy)]
pub struct Repos<'c> {
    connection: &'c Connection,
}

impl<'c> Repos<'c> {
    fn new(connection: &'c Connection) -> Self {
        Self { connection }
    }

    /// School queries and writes.
    #[must_use]
    pub fn schools(&self) -> SchoolRepo<'c> {
        SchoolRepo::new(self.connection)
    }

    /// Person queries and writes.
    #[must_use]
    pub fn people(&self) -> PersonRepo<'c> {
        PersonRepo::new(self.connection)
    }

    /// Class queries and writes.
    #[must_use]
    pub fn classes(&self) -> ClassRepo<'c> {
        ClassRepo::new(self.connection)
    }

    /// Enrollment queries and writes.
    #[must_use]
    pub fn enrollments(&self) -> EnrollmentRepo<'c> {
        EnrollmentRepo::new(self.connection)
    }
}
