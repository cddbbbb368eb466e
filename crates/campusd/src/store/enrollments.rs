use rusqlite::{Connection, params};

use campus_types::{ClassId, PersonId};

use super::StoreError;

/// Queries over the `enrollments` table.
#[derive(Debug, Clone, Copy)]
pub struct EnrollmentRepo<'c> {
    connection: &'c Connection,
}

impl<'c> EnrollmentRepo<'c> {
    pub(super) fn new(connection: &'c Connection) -> Self {
        Self { connection }
    }

    /// Returns `true` when the student is enrolled in the class.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn exists(&self, class: ClassId, student: PersonId) -> Result<bool, StoreError> {
        let exists = self.connection.query_row(
            "SELECT EXISTS (
                 SELECT 1 FROM enrollments WHERE class_id = ?1 AND student_id = ?2
             )",
            params![class.get(), student.get()],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    /// Records an enrollment.
    ///
    /// # Errors
    ///
    /// Returns a primary-key [`StoreError::Constraint`] when the pair is
    /// already enrolled.
    pub fn insert(&self, class: ClassId, student: PersonId) -> Result<(), StoreError> {
        self.connection.execute(
            "INSERT INTO enrollments (class_id, student_id) VALUES (?1, ?2)",
            params![class.get(), student.get()],
        )?;
        Ok(())
    }

    /// Identities of the classes a student attends, ascending.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn class_ids_for_student(&self, student: PersonId) -> Result<Vec<ClassId>, StoreError> {
        let mut statement = self.connection.prepare_cached(
            "SELECT class_id FROM enrollments WHERE student_id = ?1 ORDER BY class_id",
        )?;
        let ids = statement
            .query_map(params![student.get()], |row| row.get(0).map(ClassId::new))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ids)
    }

    /// Number of enrollments recorded for a class.
    #[cfg(test)]
    pub(crate) fn count_for_class(&self, class: ClassId) -> Result<u64, StoreError> {
        let count = self.connection.query_row(
            "SELECT COUNT(*) FROM enrollments WHERE class_id = ?1",
            params![class.get()],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}
