//! Foreground process supervision.
//!
//! The daemon runs attached to its parent (a service manager or a terminal):
//! it bootstraps, binds the listener, serves until a termination signal
//! arrives and then drains open connections before returning.

mod errors;
pub(crate) mod launch;
pub(crate) mod shutdown;

pub use errors::LaunchError;
pub use launch::run_daemon;
pub use shutdown::{ShutdownError, ShutdownSignal, SystemShutdownSignal};

pub(crate) const PROCESS_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::process");
