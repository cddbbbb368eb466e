//! Request envelope parsing for the dispatch loop.

use campus_types::Request;

use super::errors::DispatchError;

/// Parses one request line into an envelope.
///
/// A trailing carriage return is stripped first; a line with nothing left is
/// an [`DispatchError::EmptyRequest`], while a line of spaces is malformed.
/// The payload stays opaque until the router decodes it for the named method.
///
/// # Errors
///
/// Returns `DispatchError::EmptyRequest` for an empty line and
/// `DispatchError::MalformedJsonl` when the line is not a JSON request
/// object.
pub(crate) fn parse_request(line: &[u8]) -> Result<Request, DispatchError> {
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    if line.is_empty() {
        return Err(DispatchError::EmptyRequest);
    }
    serde_json::from_slice(line).map_err(DispatchError::from_json_error)
}
