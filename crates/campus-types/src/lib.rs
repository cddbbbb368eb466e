//! Wire vocabulary shared by the campus registry daemon and its clients.
//!
//! Requests and responses travel as newline-delimited JSON. Each request names
//! a [`Method`] and carries a method-specific payload; each response carries a
//! success flag, a fixed message and, on success, a result record.

mod failure;
mod ids;
mod method;
mod payloads;
mod protocol;
mod records;

pub use failure::FailureKind;
pub use ids::{ClassId, PersonId, SchoolId};
pub use method::{Method, UnknownMethodError};
pub use payloads::{
    AddStudentToClass, AssignTeacherToClass, CreateClass, CreatePerson, CreateSchool,
    ListClassesForSchool, ListStudentsForClass, WhoAmIQuery,
};
pub use protocol::{Request, Response, SUCCESS_MESSAGE};
pub use records::{
    Acknowledgement, Class, ClassListing, Person, Role, RoleParseError, School, SchoolDirectory,
    WhoAmI,
};
