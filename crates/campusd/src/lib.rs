//! Campus registry daemon.
//!
//! The daemon keeps a registry of schools, teachers, students and classes in
//! SQLite and serves it over newline-delimited JSON on a TCP or Unix socket
//! configured via [`campus_config`]. The crate is layered:
//!
//! - the entity store ([`Store`]) owns a small connection pool and runs
//!   multi-row writes as immediate transactions;
//! - the domain services ([`Services`]) validate input and enforce the
//!   registry's invariants, most notably that a student belongs to the school
//!   of their first class;
//! - the [`Router`] maps each request method to one service operation and
//!   reports failures with fixed wire messages;
//! - the transport accepts connections and gives each one a worker thread.
//!
//! Lifecycle events are reported through a [`HealthReporter`] so operators
//! can follow bootstrap, readiness and shutdown in structured logs.

mod bootstrap;
mod dispatch;
mod domain;
mod health;
mod process;
mod store;
pub mod telemetry;
mod transport;

pub use bootstrap::{
    BootstrapError, ConfigLoader, Daemon, StaticConfigLoader, SystemConfigLoader, bootstrap_with,
};
pub use dispatch::{DispatchError, Router};
pub use domain::{ClassService, DomainError, Entity, PersonService, SchoolService, Services};
pub use health::{HealthReporter, StructuredHealthReporter};
pub use process::{LaunchError, ShutdownError, ShutdownSignal, SystemShutdownSignal, run_daemon};
pub use store::{
    ClassRepo, ConstraintKind, EnrollmentRepo, PersonRepo, Repos, SchoolRepo, Store, StoreError,
    StoreSettings,
};
pub use telemetry::{TelemetryError, TelemetryHandle};
pub use transport::ListenerError;

#[cfg(test)]
mod tests;
