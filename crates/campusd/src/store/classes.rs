use rusqlite::{Connection, OptionalExtension, Row, params};

use campus_types::{Class, ClassId, ClassListing, PersonId, SchoolId};

use super::{StoreError, row_key};
use super::people::PersonRow;

const LISTING_COLUMNS: &str = "c.id, c.name, c.school_id, c.teacher_id,
    t.id, t.name, t.role, t.school_id";

/// Queries over the `classes` table.
#[derive(Debug, Clone, Copy)]
pub struct ClassRepo<'c> {
    connection: &'c Connection,
}

impl<'c> ClassRepo<'c> {
    pub(super) fn new(connection: &'c Connection) -> Self {
        Self { connection }
    }

    /// Inserts a class.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Constraint`] when the school or teacher does
    /// not exist.
    pub fn insert(
        &self,
        name: &str,
        school: SchoolId,
        teacher: PersonId,
    ) -> Result<Class, StoreError> {
        let class = self.connection.query_row(
            "INSERT INTO classes (name, school_id, teacher_id) VALUES (?1, ?2, ?3)
             RETURNING id, name, school_id, teacher_id",
            params![name, school.get(), teacher.get()],
            class_from_row,
        )?;
        Ok(class)
    }

    /// Looks up a class by identity.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find(&self, id: ClassId) -> Result<Option<Class>, StoreError> {
        let Some(key) = row_key(id.get()) else {
            return Ok(None);
        };
        let class = self
            .connection
            .query_row(
                "SELECT id, name, school_id, teacher_id FROM classes WHERE id = ?1",
                params![key],
                class_from_row,
            )
            .optional()?;
        Ok(class)
    }

    /// Lists the classes of one school with their teachers, by identity.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored role is unknown.
    pub fn list_for_school(&self, school: SchoolId) -> Result<Vec<ClassListing>, StoreError> {
        let sql = format!(
            "SELECT {LISTING_COLUMNS}
             FROM classes c JOIN people t ON t.id = c.teacher_id
             WHERE c.school_id = ?1
             ORDER BY c.id"
        );
        self.listings(&sql, params![school.get()])
    }

    /// Lists every class with its teacher, grouped by school then identity.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored role is unknown.
    pub fn list_all(&self) -> Result<Vec<ClassListing>, StoreError> {
        let sql = format!(
            "SELECT {LISTING_COLUMNS}
             FROM classes c JOIN people t ON t.id = c.teacher_id
             ORDER BY c.school_id, c.id"
        );
        self.listings(&sql, params![])
    }

    /// Identities of the classes a teacher teaches, ascending.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn ids_taught_by(&self, teacher: PersonId) -> Result<Vec<ClassId>, StoreError> {
        let mut statement = self
            .connection
            .prepare_cached("SELECT id FROM classes WHERE teacher_id = ?1 ORDER BY id")?;
        let ids = statement
            .query_map(params![teacher.get()], |row| row.get(0).map(ClassId::new))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ids)
    }

    /// Replaces the teacher of a class.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnexpectedRowCount`] when the class is missing.
    pub fn set_teacher(&self, class: ClassId, teacher: PersonId) -> Result<(), StoreError> {
        let changed = self.connection.execute(
            "UPDATE classes SET teacher_id = ?2, updated_at = CURRENT_TIMESTAMP WHERE id = ?1",
            params![class.get(), teacher.get()],
        )?;
        if changed != 1 {
            return Err(StoreError::UnexpectedRowCount {
                operation: "set class teacher",
                expected: 1,
                actual: changed,
            });
        }
        Ok(())
    }

    fn listings(
        &self,
        sql: &str,
        params: &[&dyn rusqlite::ToSql],
    ) -> Result<Vec<ClassListing>, StoreError> {
        let mut statement = self.connection.prepare_cached(sql)?;
        let rows = statement
            .query_map(params, |row| {
                Ok((class_from_row(row)?, PersonRow::from_row_at(row, 4)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;
        rows.into_iter()
            .map(|(class, teacher)| -> Result<ClassListing, StoreError> {
                Ok(ClassListing {
                    class,
                    teacher: teacher.into_person()?,
                })
            })
            .collect()
    }
}

fn class_from_row(row: &Row<'_>) -> rusqlite::Result<Class> {
    Ok(Class {
        id: ClassId::new(row.get(0)?),
        name: row.get(1)?,
        school_id: SchoolId::new(row.get(2)?),
        teacher_id: PersonId::new(row.get(3)?),
    })
}
