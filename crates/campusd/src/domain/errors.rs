//! Domain error taxonomy.

use std::fmt;

use thiserror::Error;

use campus_types::{ClassId, FailureKind, PersonId, Role, SchoolId};

use crate::store::StoreError;

/// Entity kinds named in [`DomainError::NotFound`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    /// A school.
    School,
    /// A teacher or student.
    Person,
    /// A class.
    Class,
}

impl fmt::Display for Entity {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            Self::School => "school",
            Self::Person => "person",
            Self::Class => "class",
        })
    }
}

/// Errors returned by the domain services.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A required field was empty, zero or not an allowed value.
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// Which check failed.
        reason: &'static str,
    },
    /// A referenced entity does not exist.
    #[error("{entity} {id} not found")]
    NotFound {
        /// Kind of the missing entity.
        entity: Entity,
        /// Requested identity.
        id: u64,
    },
    /// A person has the wrong role for the operation.
    #[error("person {person_id} is not a {expected}")]
    RoleMismatch {
        /// Offending person.
        person_id: PersonId,
        /// Role the operation requires.
        expected: Role,
    },
    /// The student is already enrolled in the class.
    #[error("student {student_id} is already enrolled in class {class_id}")]
    DuplicateEnrollment {
        /// Student being enrolled.
        student_id: PersonId,
        /// Target class.
        class_id: ClassId,
    },
    /// The student is bound to another school than the class.
    #[error(
        "student {student_id} belongs to school {assigned}, class {class_id} to school {class_school}"
    )]
    DifferentSchool {
        /// Student being enrolled.
        student_id: PersonId,
        /// Target class.
        class_id: ClassId,
        /// School the student is bound to.
        assigned: SchoolId,
        /// School owning the class.
        class_school: SchoolId,
    },
    /// A school with the same name exists.
    #[error("school '{name}' already exists")]
    AlreadyExists {
        /// Requested name.
        name: String,
    },
    /// The store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl DomainError {
    pub(crate) fn invalid(reason: &'static str) -> Self {
        Self::InvalidInput { reason }
    }

    pub(crate) fn not_found(entity: Entity, id: impl Into<u64>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Maps the error to its wire failure kind.
    ///
    /// Store failures collapse to [`FailureKind::Internal`], except a stored
    /// role outside the known set, which is a role mismatch.
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::InvalidInput { .. } => FailureKind::InvalidInput,
            Self::NotFound { .. } => FailureKind::NotFound,
            Self::RoleMismatch { .. } | Self::Store(StoreError::UnknownRole { .. }) => {
                FailureKind::RoleMismatch
            }
            Self::DuplicateEnrollment { .. } => FailureKind::DuplicateEnrollment,
            Self::DifferentSchool { .. } => FailureKind::DifferentSchool,
            Self::AlreadyExists { .. } => FailureKind::AlreadyExists,
            Self::Store(_) => FailureKind::Internal,
        }
    }
}
