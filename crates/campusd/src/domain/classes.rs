use std::sync::Arc;

use tracing::{debug, info};

use campus_types::{Class, ClassId, Person, PersonId, Role, SchoolId};

use super::{DOMAIN_TARGET, DomainError, Entity, required_text};
use crate::store::{Repos, Store};

/// Class creation, teacher assignment and enrollment.
#[derive(Debug, Clone)]
pub struct ClassService {
    store: Arc<Store>,
}

impl ClassService {
    /// Builds the service over a shared store.
    #[must_use]
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Creates a class in `school_id` taught by `teacher_id`.
    ///
    /// # Errors
    ///
    /// [`DomainError::InvalidInput`] for a blank name or unset identity,
    /// [`DomainError::NotFound`] when the school or teacher is missing and
    /// [`DomainError::RoleMismatch`] when the person is not a teacher.
    pub fn create(
        &self,
        name: &str,
        school_id: SchoolId,
        teacher_id: PersonId,
    ) -> Result<Class, DomainError> {
        let name = required_text(name, "class name is empty")?;
        if school_id.is_unset() || teacher_id.is_unset() {
            return Err(DomainError::invalid("school and teacher ids are required"));
        }
        let class = self.store.with_repos(|repos| {
            if !repos.schools().exists(school_id)? {
                return Err(DomainError::not_found(Entity::School, school_id));
            }
            require_teacher(repos, teacher_id)?;
            Ok(repos.classes().insert(name, school_id, teacher_id)?)
        })?;
        info!(
            target: DOMAIN_TARGET,
            class_id = %class.id,
            school_id = %class.school_id,
            teacher_id = %class.teacher_id,
            "class created"
        );
        Ok(class)
    }

    /// Replaces the teacher of a class.
    ///
    /// Assigning the current teacher again succeeds without writing.
    ///
    /// # Errors
    ///
    /// [`DomainError::InvalidInput`] for an unset identity,
    /// [`DomainError::NotFound`] when the class or person is missing and
    /// [`DomainError::RoleMismatch`] when the person is not a teacher.
    pub fn update_teacher(
        &self,
        class_id: ClassId,
        teacher_id: PersonId,
    ) -> Result<Class, DomainError> {
        if class_id.is_unset() || teacher_id.is_unset() {
            return Err(DomainError::invalid("class and teacher ids are required"));
        }
        self.store.within_tx(|repos| {
            let class = find_class(repos, class_id)?;
            require_teacher(repos, teacher_id)?;
            if class.teacher_id == teacher_id {
                debug!(
                    target: DOMAIN_TARGET,
                    class_id = %class_id,
                    teacher_id = %teacher_id,
                    "teacher already assigned"
                );
                return Ok(class);
            }
            repos.classes().set_teacher(class_id, teacher_id)?;
            info!(
                target: DOMAIN_TARGET,
                class_id = %class_id,
                previous = %class.teacher_id,
                teacher_id = %teacher_id,
                "teacher reassigned"
            );
            Ok(Class {
                teacher_id,
                ..class
            })
        })
    }

    /// Lists the students enrolled in a class, by ascending identity.
    ///
    /// # Errors
    ///
    /// [`DomainError::InvalidInput`] for the unset identity and
    /// [`DomainError::NotFound`] when the class does not exist.
    pub fn list_students(&self, class_id: ClassId) -> Result<Vec<Person>, DomainError> {
        if class_id.is_unset() {
            return Err(DomainError::invalid("class id is unset"));
        }
        self.store.with_repos(|repos| {
            find_class(repos, class_id)?;
            Ok(repos.people().list_enrolled_in(class_id)?)
        })
    }

    /// Enrolls a student in a class.
    ///
    /// The first enrollment binds the student to the class's school; later
    /// enrollments must stay within that school. The school assignment and
    /// the enrollment row commit together or not at all.
    ///
    /// # Errors
    ///
    /// [`DomainError::InvalidInput`] for an unset identity,
    /// [`DomainError::NotFound`] when the student or class is missing,
    /// [`DomainError::RoleMismatch`] when the person is a teacher,
    /// [`DomainError::DuplicateEnrollment`] when the pair already exists and
    /// [`DomainError::DifferentSchool`] when the student belongs elsewhere.
    pub fn add_student_to_class(
        &self,
        student_id: PersonId,
        class_id: ClassId,
    ) -> Result<(), DomainError> {
        if student_id.is_unset() || class_id.is_unset() {
            return Err(DomainError::invalid("student and class ids are required"));
        }

        // Cheap rejection before taking the write lock.
        self.store
            .with_repos(|repos| check_enrollment(repos, student_id, class_id).map(drop))?;

        let school_id = self.store.within_tx(|repos| {
            let (student, class) = check_enrollment(repos, student_id, class_id)?;
            match student.school_id {
                None => repos.people().assign_school(student_id, class.school_id)?,
                Some(assigned) if assigned != class.school_id => {
                    return Err(DomainError::DifferentSchool {
                        student_id,
                        class_id,
                        assigned,
                        class_school: class.school_id,
                    });
                }
                Some(_) => {}
            }
            repos
                .enrollments()
                .insert(class_id, student_id)
                .map_err(|error| {
                    if error.is_unique_violation() {
                        DomainError::DuplicateEnrollment {
                            student_id,
                            class_id,
                        }
                    } else {
                        DomainError::Store(error)
                    }
                })?;
            Ok(class.school_id)
        })?;

        info!(
            target: DOMAIN_TARGET,
            student_id = %student_id,
            class_id = %class_id,
            school_id = %school_id,
            "student enrolled"
        );
        Ok(())
    }
}

fn find_class(repos: &Repos<'_>, class_id: ClassId) -> Result<Class, DomainError> {
    repos
        .classes()
        .find(class_id)?
        .ok_or_else(|| DomainError::not_found(Entity::Class, class_id))
}

fn require_teacher(repos: &Repos<'_>, teacher_id: PersonId) -> Result<Person, DomainError> {
    let person = repos
        .people()
        .find(teacher_id)?
        .ok_or_else(|| DomainError::not_found(Entity::Person, teacher_id))?;
    if person.role != Role::Teacher {
        return Err(DomainError::RoleMismatch {
            person_id: teacher_id,
            expected: Role::Teacher,
        });
    }
    Ok(person)
}

/// Loads the student and class and rejects an enrollment that cannot
/// proceed regardless of school assignment.
fn check_enrollment(
    repos: &Repos<'_>,
    student_id: PersonId,
    class_id: ClassId,
) -> Result<(Person, Class), DomainError> {
    let student = repos
        .people()
        .find(student_id)?
        .ok_or_else(|| DomainError::not_found(Entity::Person, student_id))?;
    if student.role != Role::Student {
        return Err(DomainError::RoleMismatch {
            person_id: student_id,
            expected: Role::Student,
        });
    }
    let class = find_class(repos, class_id)?;
    if repos.enrollments().exists(class_id, student_id)? {
        return Err(DomainError::DuplicateEnrollment {
            student_id,
            class_id,
        });
    }
    Ok((student, class))
}

