use serde::{Deserialize, Serialize};
use strum::EnumIter;

/// Closed set of failure categories a response can report.
///
/// Each kind owns exactly one wire message; clients match on the message and
/// the daemon never sends free-form error text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// A required field was empty, zero or out of range.
    InvalidInput,
    /// A referenced entity does not exist.
    NotFound,
    /// A person has the wrong role for the operation.
    RoleMismatch,
    /// The student is already enrolled in the class.
    DuplicateEnrollment,
    /// The student is bound to a different school than the class.
    DifferentSchool,
    /// A school with the same name already exists.
    AlreadyExists,
    /// The request named a method the daemon does not serve.
    UnknownMethod,
    /// The request line was not a valid request envelope.
    BadRequest,
    /// The payload did not match the method's expected shape.
    InvalidPayload,
    /// The request line was blank.
    EmptyRequest,
    /// The request line exceeded the maximum line size.
    RequestTooLarge,
    /// An unexpected store or serialisation failure.
    Internal,
}

impl FailureKind {
    /// Returns the fixed wire message for this failure.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::InvalidInput => "invalid input",
            Self::NotFound => "not found",
            Self::RoleMismatch => "role mismatch",
            Self::DuplicateEnrollment => "duplicate enrollment",
            Self::DifferentSchool => "different school not allowed",
            Self::AlreadyExists => "school already exists",
            Self::UnknownMethod => "unknown method",
            Self::BadRequest => "bad request",
            Self::InvalidPayload => "invalid payload",
            Self::EmptyRequest => "empty request",
            Self::RequestTooLarge => "request too large",
            Self::Internal => "internal error",
        }
    }

    /// Resolves a wire message back to its failure kind.
    #[must_use]
    pub fn from_message(message: &str) -> Option<Self> {
        <Self as strum::IntoEnumIterator>::iter().find(|kind| kind.message() == message)
    }

    /// Returns `true` for failures detected before a request reaches the
    /// router (framing and envelope problems) or while decoding a payload.
    #[must_use]
    pub const fn is_protocol_error(self) -> bool {
        matches!(
            self,
            Self::BadRequest | Self::InvalidPayload | Self::EmptyRequest | Self::RequestTooLarge
        )
    }
}
