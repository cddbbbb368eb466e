use rusqlite::{Connection, Row, params};

use campus_types::{School, SchoolId};

use super::{StoreError, row_key};

/// Queries over the `schools` table.
#[derive(Debug, Clone, Copy)]
pub struct SchoolRepo<'c> {
    connection: &'c Connection,
}

impl<'c> SchoolRepo<'c> {
    pub(super) fn new(connection: &'c Connection) -> Self {
        Self { connection }
    }

    /// Inserts a school; a taken name fails with a unique violation.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Constraint`] when the name is already used.
    pub fn insert(&self, name: &str) -> Result<School, StoreError> {
        let school = self.connection.query_row(
            "INSERT INTO schools (name) VALUES (?1) RETURNING id, name",
            params![name],
            school_from_row,
        )?;
        Ok(school)
    }

    /// Returns `true` when the school exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn exists(&self, id: SchoolId) -> Result<bool, StoreError> {
        let Some(key) = row_key(id.get()) else {
            return Ok(false);
        };
        let exists = self.connection.query_row(
            "SELECT EXISTS (SELECT 1 FROM schools WHERE id = ?1)",
            params![key],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    /// Lists every school by ascending identity.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list(&self) -> Result<Vec<School>, StoreError> {
        let mut statement = self
            .connection
            .prepare_cached("SELECT id, name FROM schools ORDER BY id")?;
        let schools = statement
            .query_map([], school_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(schools)
    }
}

fn school_from_row(row: &Row<'_>) -> rusqlite::Result<School> {
    Ok(School {
        id: SchoolId::new(row.get(0)?),
        name: row.get(1)?,
    })
}
