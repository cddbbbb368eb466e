//! Socket listener for the daemon's request endpoint.
//!
//! The transport binds the configured endpoint, accepts connections on a
//! background thread and hands each one to a dedicated worker thread. Workers
//! are joined before the accept thread exits.

mod errors;
mod handler;
mod listener;
#[cfg(test)]
mod test_utils;

pub use self::errors::ListenerError;
pub(crate) use self::handler::{ConnectionHandler, ConnectionStream, ShutdownToken};
pub(crate) use self::listener::SocketListener;
#[cfg(test)]
pub(crate) use self::listener::ListenerHandle;
#[cfg(test)]
pub(crate) use self::test_utils::{CountingHandler, HoldingHandler, wait_for_count};

const LISTENER_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::transport");
