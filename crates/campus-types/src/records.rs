//! Result records returned in successful responses.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ids::{ClassId, PersonId, SchoolId};

/// A person's category, fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// May teach classes.
    Teacher,
    /// May enrol in classes of a single school.
    Student,
}

impl Role {
    /// Returns the stored and wire form of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Teacher => "teacher",
            Self::Student => "student",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = RoleParseError;

    /// Matches exactly; callers trim surrounding whitespace first.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "teacher" => Ok(Self::Teacher),
            "student" => Ok(Self::Student),
            other => Err(RoleParseError {
                value: other.to_owned(),
            }),
        }
    }
}

/// Raised when text is neither `teacher` nor `student`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role '{value}'")]
pub struct RoleParseError {
    /// The rejected text.
    pub value: String,
}

/// A school.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct School {
    /// Store-allocated identity.
    pub id: SchoolId,
    /// Globally unique name.
    pub name: String,
}

/// A teacher or student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Store-allocated identity.
    pub id: PersonId,
    /// Display name.
    pub name: String,
    /// Role fixed at creation.
    pub role: Role,
    /// School a student is bound to after their first enrollment.
    pub school_id: Option<SchoolId>,
}

/// A class taught in a school.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Class {
    /// Store-allocated identity.
    pub id: ClassId,
    /// Display name.
    pub name: String,
    /// Owning school.
    pub school_id: SchoolId,
    /// Current teacher.
    pub teacher_id: PersonId,
}

/// A class together with its teacher's record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassListing {
    /// The class itself.
    #[serde(flatten)]
    pub class: Class,
    /// The person referenced by `teacher_id`.
    pub teacher: Person,
}

/// A school together with its classes, ordered by class identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolDirectory {
    /// The school itself.
    #[serde(flatten)]
    pub school: School,
    /// Classes owned by the school.
    pub classes: Vec<ClassListing>,
}

/// Answer to `who-am-i`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhoAmI {
    /// The person asked about.
    pub person: Person,
    /// Classes taught (teachers) or attended (students), ascending.
    pub class_ids: Vec<ClassId>,
}

/// Status-only result of a state-changing operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acknowledgement {
    /// Short status word.
    pub status: String,
}

impl Acknowledgement {
    /// Result of a successful enrollment.
    #[must_use]
    pub fn enrolled() -> Self {
        Self {
            status: "enrolled".to_owned(),
        }
    }

    /// Result of a successful teacher assignment.
    #[must_use]
    pub fn teacher_assigned() -> Self {
        Self {
            status: "teacher assigned".to_owned(),
        }
    }
}
