//! Error types for request dispatch failures.
//!
//! Protocol failures are detected by the connection handler before routing;
//! domain failures come back from the services. Both collapse to a
//! [`FailureKind`] whose fixed message is all the client ever sees.

use std::io;

use thiserror::Error;

use campus_types::{FailureKind, Method};

use crate::domain::DomainError;

/// Errors surfaced during request parsing and dispatch.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The request line was blank after trimming.
    #[error("empty request line")]
    EmptyRequest,

    /// The request line exceeded the size limit.
    #[error("request exceeds {max_size} byte limit")]
    RequestTooLarge { max_size: usize },

    /// Request line could not be parsed as a request envelope.
    #[error("malformed JSONL: {message}")]
    MalformedJsonl {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    /// Payload does not match the shape the method expects.
    #[error("invalid payload for {method}: {source}")]
    InvalidPayload {
        method: Method,
        #[source]
        source: serde_json::Error,
    },

    /// Method field names no served operation.
    #[error("unknown method: {method}")]
    UnknownMethod { method: String },

    /// The domain service rejected the operation.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Response serialization failed.
    #[error("failed to serialize response: {0}")]
    SerializeResponse(#[source] serde_json::Error),

    /// IO error during read or write.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl DispatchError {
    /// Returns the wire failure kind for this error.
    #[must_use]
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            Self::EmptyRequest => FailureKind::EmptyRequest,
            Self::RequestTooLarge { .. } => FailureKind::RequestTooLarge,
            Self::MalformedJsonl { .. } => FailureKind::BadRequest,
            Self::InvalidPayload { .. } => FailureKind::InvalidPayload,
            Self::UnknownMethod { .. } => FailureKind::UnknownMethod,
            Self::Domain(error) => error.kind(),
            Self::SerializeResponse(_) | Self::Io(_) => FailureKind::Internal,
        }
    }

    /// Creates a malformed JSONL error from a serde error.
    pub fn from_json_error(source: serde_json::Error) -> Self {
        Self::MalformedJsonl {
            message: source.to_string(),
            source: Some(source),
        }
    }

    /// Creates a malformed JSONL error with a custom message.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedJsonl {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an invalid payload error.
    pub fn invalid_payload(method: Method, source: serde_json::Error) -> Self {
        Self::InvalidPayload { method, source }
    }

    /// Creates an unknown method error.
    pub fn unknown_method(method: impl Into<String>) -> Self {
        Self::UnknownMethod {
            method: method.into(),
        }
    }

    /// Creates a request too large error.
    pub fn request_too_large(max_size: usize) -> Self {
        Self::RequestTooLarge { max_size }
    }
}
