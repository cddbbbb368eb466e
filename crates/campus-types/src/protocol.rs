//! Request and response envelopes.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::failure::FailureKind;
use crate::method::Method;

/// Message carried by every successful response.
pub const SUCCESS_MESSAGE: &str = "ok";

/// One request line: a method name and its opaque payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// Wire name of the method to invoke.
    #[serde(default)]
    pub method: String,
    /// Method-specific payload, decoded by the router.
    #[serde(default)]
    pub data: Value,
}

impl Request {
    /// Builds a request for a known method from a serialisable payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload cannot be represented as JSON.
    pub fn new<P: Serialize>(method: Method, payload: &P) -> Result<Self, serde_json::Error> {
        Ok(Self {
            method: method.as_str().to_owned(),
            data: serde_json::to_value(payload)?,
        })
    }

    /// Builds a request with a raw method name and payload.
    #[must_use]
    pub fn raw(method: impl Into<String>, data: Value) -> Self {
        Self {
            method: method.into(),
            data,
        }
    }
}

/// One response line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// `true` on success.
    pub status: bool,
    /// [`SUCCESS_MESSAGE`] or the failure's fixed message.
    pub message: String,
    /// Result record; omitted on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Response {
    /// Successful response carrying `data`.
    #[must_use]
    pub fn ok(data: Value) -> Self {
        Self {
            status: true,
            message: SUCCESS_MESSAGE.to_owned(),
            data: Some(data),
        }
    }

    /// Failed response with the fixed message of `kind`.
    #[must_use]
    pub fn failure(kind: FailureKind) -> Self {
        Self {
            status: false,
            message: kind.message().to_owned(),
            data: None,
        }
    }

    /// Returns the failure kind of an unsuccessful response.
    #[must_use]
    pub fn failure_kind(&self) -> Option<FailureKind> {
        if self.status {
            None
        } else {
            FailureKind::from_message(&self.message)
        }
    }

    /// Decodes the result record of a successful response.
    ///
    /// Returns `None` when the response failed or carries no data, and
    /// `Some(Err(_))` when the data does not match `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Option<Result<T, serde_json::Error>> {
        if !self.status {
            return None;
        }
        self.data.as_ref().map(|data| T::deserialize(data))
    }
}
