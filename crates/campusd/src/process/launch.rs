//! Supervises daemon launch sequencing and runtime orchestration.

use std::sync::Arc;

use tracing::info;

use crate::bootstrap::{ConfigLoader, SystemConfigLoader, bootstrap_with};
use crate::dispatch::DispatchConnectionHandler;
use crate::health::{HealthReporter, StructuredHealthReporter};
use crate::transport::SocketListener;

use super::PROCESS_TARGET;
use super::errors::LaunchError;
use super::shutdown::{ShutdownSignal, SystemShutdownSignal};

/// Collaborators required to launch the daemon runtime.
pub(crate) struct LaunchPlan<L, S> {
    pub(crate) loader: L,
    pub(crate) reporter: Arc<dyn HealthReporter>,
    pub(crate) shutdown: S,
}

/// Runs the daemon in the foreground using the production collaborators.
///
/// Returns once a termination signal has been handled and every open
/// connection has been drained.
///
/// # Errors
///
/// Returns a [`LaunchError`] if bootstrap, listener startup or signal
/// registration fails.
pub fn run_daemon() -> Result<(), LaunchError> {
    let plan = LaunchPlan {
        loader: SystemConfigLoader,
        reporter: Arc::new(StructuredHealthReporter::new()),
        shutdown: SystemShutdownSignal::new(),
    };
    run_daemon_with(plan)
}

/// Runs the daemon with injected collaborators.
pub(crate) fn run_daemon_with<L, S>(plan: LaunchPlan<L, S>) -> Result<(), LaunchError>
where
    L: ConfigLoader,
    S: ShutdownSignal,
{
    let LaunchPlan {
        loader,
        reporter,
        shutdown,
    } = plan;

    let daemon = bootstrap_with(&loader, Arc::clone(&reporter))?;
    info!(
        target: PROCESS_TARGET,
        endpoint = %daemon.config().listen_socket(),
        "starting daemon runtime"
    );

    let listener = SocketListener::bind(daemon.config().listen_socket())?;
    let endpoint = listener.bound_endpoint().clone();
    let handler = Arc::new(DispatchConnectionHandler::new(daemon.router()));
    let listener_handle = listener.start(handler)?;
    reporter.listener_ready(&endpoint);

    let waited = shutdown.wait();
    reporter.shutdown_requested();
    listener_handle.shutdown();
    listener_handle.join()?;
    waited?;

    reporter.shutdown_completed();
    info!(
        target: PROCESS_TARGET,
        "shutdown sequence completed"
    );
    Ok(())
}
