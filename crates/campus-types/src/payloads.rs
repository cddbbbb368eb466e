//! Request payload shapes, one per method.
//!
//! Absent fields decode to empty strings or the unset identity so that domain
//! validation reports them as invalid input. Fields of the wrong JSON type
//! fail decoding instead.

use serde::{Deserialize, Serialize};

use crate::ids::{ClassId, PersonId, SchoolId};

/// Payload of `create-school`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateSchool {
    /// Requested school name.
    pub name: String,
}

/// Payload of `create-person`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreatePerson {
    /// Person name.
    pub name: String,
    /// `teacher` or `student`.
    pub role: String,
}

/// Payload of `create-class`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateClass {
    /// Class name.
    pub name: String,
    /// Owning school.
    pub school_id: SchoolId,
    /// Teaching person.
    pub teacher_id: PersonId,
}

/// Payload of `add-student-to-class`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddStudentToClass {
    /// Student to enrol.
    pub student_id: PersonId,
    /// Target class.
    pub class_id: ClassId,
}

/// Payload of `who-am-i`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WhoAmIQuery {
    /// Person to describe.
    pub id: PersonId,
}

/// Payload of `list-classes-for-school`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListClassesForSchool {
    /// School whose classes are listed.
    pub school_id: SchoolId,
}

/// Payload of `list-students-for-class`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListStudentsForClass {
    /// Class whose students are listed.
    pub class_id: ClassId,
}

/// Payload of `assign-teacher-to-class`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssignTeacherToClass {
    /// Class to update.
    pub class_id: ClassId,
    /// New teacher.
    pub teacher_id: PersonId,
}
