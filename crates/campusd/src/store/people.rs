use rusqlite::{Connection, OptionalExtension, Row, params};

use campus_types::{ClassId, Person, PersonId, Role, SchoolId};

use super::{StoreError, row_key};

/// Queries over the `people` table.
#[derive(Debug, Clone, Copy)]
pub struct PersonRepo<'c> {
    connection: &'c Connection,
}

impl<'c> PersonRepo<'c> {
    pub(super) fn new(connection: &'c Connection) -> Self {
        Self { connection }
    }

    /// Inserts a person without an assigned school.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert(&self, name: &str, role: Role) -> Result<Person, StoreError> {
        let row = self.connection.query_row(
            "INSERT INTO people (name, role) VALUES (?1, ?2)
             RETURNING id, name, role, school_id",
            params![name, role.as_str()],
            PersonRow::from_row,
        )?;
        row.into_person()
    }

    /// Looks up a person by identity.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the stored role is unknown.
    pub fn find(&self, id: PersonId) -> Result<Option<Person>, StoreError> {
        let Some(key) = row_key(id.get()) else {
            return Ok(None);
        };
        self.connection
            .query_row(
                "SELECT id, name, role, school_id FROM people WHERE id = ?1",
                params![key],
                PersonRow::from_row,
            )
            .optional()?
            .map(PersonRow::into_person)
            .transpose()
    }

    /// Number of stored people.
    #[cfg(test)]
    pub(crate) fn count(&self) -> Result<u64, StoreError> {
        let count = self
            .connection
            .query_row("SELECT COUNT(*) FROM people", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Binds a student to a school if they are not yet bound.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnexpectedRowCount`] when the person is not an
    /// unbound student.
    pub fn assign_school(&self, student: PersonId, school: SchoolId) -> Result<(), StoreError> {
        let changed = self.connection.execute(
            "UPDATE people SET school_id = ?2, updated_at = CURRENT_TIMESTAMP
             WHERE id = ?1 AND role = 'student' AND school_id IS NULL",
            params![student.get(), school.get()],
        )?;
        if changed != 1 {
            return Err(StoreError::UnexpectedRowCount {
                operation: "assign student school",
                expected: 1,
                actual: changed,
            });
        }
        Ok(())
    }

    /// Lists the students enrolled in a class by ascending identity.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored role is unknown.
    pub fn list_enrolled_in(&self, class: ClassId) -> Result<Vec<Person>, StoreError> {
        let mut statement = self.connection.prepare_cached(
            "SELECT p.id, p.name, p.role, p.school_id
             FROM enrollments e JOIN people p ON p.id = e.student_id
             WHERE e.class_id = ?1
             ORDER BY p.id",
        )?;
        let rows = statement
            .query_map(params![class.get()], PersonRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        rows.into_iter().map(PersonRow::into_person).collect()
    }
}

/// Raw `people` row before the role is validated.
pub(super) struct PersonRow {
    id: u64,
    name: String,
    role: String,
    school_id: Option<u64>,
}

impl PersonRow {
    /// Reads the four person columns starting at `offset`.
    pub(super) fn from_row_at(row: &Row<'_>, offset: usize) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(offset)?,
            name: row.get(offset + 1)?,
            role: row.get(offset + 2)?,
            school_id: row.get(offset + 3)?,
        })
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Self::from_row_at(row, 0)
    }

    pub(super) fn into_person(self) -> Result<Person, StoreError> {
        let id = PersonId::new(self.id);
        let role = self
            .role
            .parse::<Role>()
            .map_err(|error| StoreError::UnknownRole {
                person_id: id,
                value: error.value,
            })?;
        Ok(Person {
            id,
            name: self.name,
            role,
            school_id: self.school_id.map(SchoolId::new),
        })
    }
}
