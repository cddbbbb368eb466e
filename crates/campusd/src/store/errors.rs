//! Error types for the entity store.

use std::io;

use camino::Utf8PathBuf;
use rusqlite::{ErrorCode, ffi};
use thiserror::Error;

use campus_types::PersonId;

/// Storage constraint that rejected a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    /// A `UNIQUE` index.
    Unique,
    /// A primary key.
    PrimaryKey,
    /// A foreign key reference.
    ForeignKey,
    /// A `CHECK` expression.
    Check,
    /// A `NOT NULL` column.
    NotNull,
    /// Any other constraint.
    Other,
}

/// Errors surfaced by the entity store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The database directory could not be created.
    #[error("failed to create database directory '{path}': {source}")]
    CreateDirectory {
        /// Directory that could not be created.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// Opening the database file failed.
    #[error("failed to open database '{path}': {source}")]
    Open {
        /// Database file path.
        path: Utf8PathBuf,
        /// Underlying SQLite error.
        #[source]
        source: rusqlite::Error,
    },
    /// Applying connection pragmas failed.
    #[error("failed to configure database connection: {source}")]
    Configure {
        /// Underlying SQLite error.
        #[source]
        source: rusqlite::Error,
    },
    /// Provisioning the schema failed.
    #[error("failed to provision database schema: {source}")]
    Schema {
        /// Underlying SQLite error.
        #[source]
        source: rusqlite::Error,
    },
    /// A write violated a storage constraint.
    #[error("{kind:?} constraint violated: {message}")]
    Constraint {
        /// Which kind of constraint fired.
        kind: ConstraintKind,
        /// SQLite's description of the violation.
        message: String,
    },
    /// A stored role is neither `teacher` nor `student`.
    #[error("person {person_id} has unrecognised stored role '{value}'")]
    UnknownRole {
        /// Person carrying the role.
        person_id: PersonId,
        /// Stored text.
        value: String,
    },
    /// A conditional update touched an unexpected number of rows.
    #[error("{operation} affected {actual} rows, expected {expected}")]
    UnexpectedRowCount {
        /// Statement description.
        operation: &'static str,
        /// Rows the statement should have changed.
        expected: usize,
        /// Rows it actually changed.
        actual: usize,
    },
    /// The connection pool mutex was poisoned.
    #[error("connection pool lock poisoned")]
    PoolPoisoned,
    /// Any other SQLite failure.
    #[error("database error: {0}")]
    Sqlite(#[source] rusqlite::Error),
}

impl StoreError {
    /// Returns `true` when a unique index or primary key rejected a write.
    #[must_use]
    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            Self::Constraint {
                kind: ConstraintKind::Unique | ConstraintKind::PrimaryKey,
                ..
            }
        )
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(error: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(failure, message) = &error
            && failure.code == ErrorCode::ConstraintViolation
        {
            let kind = match failure.extended_code {
                ffi::SQLITE_CONSTRAINT_UNIQUE => ConstraintKind::Unique,
                ffi::SQLITE_CONSTRAINT_PRIMARYKEY => ConstraintKind::PrimaryKey,
                ffi::SQLITE_CONSTRAINT_FOREIGNKEY => ConstraintKind::ForeignKey,
                ffi::SQLITE_CONSTRAINT_CHECK => ConstraintKind::Check,
                ffi::SQLITE_CONSTRAINT_NOTNULL => ConstraintKind::NotNull,
                _ => ConstraintKind::Other,
            };
            return Self::Constraint {
                kind,
                message: message.clone().unwrap_or_default(),
            };
        }
        Self::Sqlite(error)
    }
}
