//! Test harness utilities shared by the daemon behavioural suites.

mod client;
mod config_loader;
mod daemon;
mod reporter;
mod shutdown;
mod world;

pub use client::JsonlClient;
pub use config_loader::{FailingConfigLoader, TestConfigLoader};
pub use daemon::RunningDaemon;
pub use reporter::{HealthEvent, RecordingHealthReporter};
pub use shutdown::TestShutdownSignal;
pub use world::{TestWorld, world};
