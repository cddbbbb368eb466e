//! JSONL request dispatch for the registry protocol.
//!
//! Each connection is served by a [`DispatchConnectionHandler`], which reads
//! newline-delimited request envelopes, routes them through the [`Router`]
//! to one domain service operation, and writes one response line per
//! request:
//!
//! ```json
//! {"method":"create-school","data":{"name":"North High"}}
//! {"status":true,"message":"ok","data":{"id":1,"name":"North High"}}
//! ```
//!
//! Framing problems (blank, oversized or malformed lines) are answered by the
//! handler without reaching the router. Every failure is reported with the
//! fixed message of its [`campus_types::FailureKind`]; the connection stays
//! open until the client closes it or an I/O error occurs.

mod errors;
mod frame;
mod handler;
mod request;
mod response;
mod router;

pub use self::errors::DispatchError;
#[cfg(test)]
pub(crate) use self::frame::MAX_REQUEST_BYTES;
pub(crate) use self::handler::DispatchConnectionHandler;
pub use self::router::Router;
