use std::fmt;
use std::str::FromStr;

use strum::{EnumIter, IntoEnumIterator, IntoStaticStr};
use thiserror::Error;

/// Operations served by the daemon, named as they appear on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum Method {
    /// Create a school with a unique name.
    CreateSchool,
    /// Create a teacher or student.
    CreatePerson,
    /// Create a class taught by a teacher in a school.
    CreateClass,
    /// Enrol a student in a class.
    AddStudentToClass,
    /// Describe a person and the classes they teach or attend.
    #[strum(serialize = "who-am-i")]
    WhoAmI,
    /// List every school with its classes.
    ListSchools,
    /// List the classes of one school.
    ListClassesForSchool,
    /// List the students enrolled in one class.
    ListStudentsForClass,
    /// Replace the teacher of a class.
    AssignTeacherToClass,
}

impl Method {
    /// Returns the wire name of the method.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Iterates over every served method.
    pub fn all() -> impl Iterator<Item = Self> {
        Self::iter()
    }
}

impl fmt::Display for Method {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = UnknownMethodError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::iter()
            .find(|method| method.as_str() == name)
            .ok_or_else(|| UnknownMethodError {
                name: name.to_owned(),
            })
    }
}

/// Raised when a request names a method the daemon does not serve.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown method '{name}'")]
pub struct UnknownMethodError {
    /// The unrecognised method name.
    pub name: String,
}
