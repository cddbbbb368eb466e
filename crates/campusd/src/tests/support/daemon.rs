//! Runs the full daemon runtime on a background thread.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use campus_config::SocketEndpoint;

use crate::bootstrap::ConfigLoader;
use crate::process::LaunchError;
use crate::process::launch::{LaunchPlan, run_daemon_with};

use super::client::JsonlClient;
use super::reporter::RecordingHealthReporter;
use super::shutdown::TestShutdownSignal;

const READY_TIMEOUT: Duration = Duration::from_secs(5);
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Handle to a daemon started with test collaborators.
pub struct RunningDaemon {
    pub reporter: Arc<RecordingHealthReporter>,
    shutdown: TestShutdownSignal,
    handle: Option<JoinHandle<Result<(), LaunchError>>>,
    endpoint: Option<SocketEndpoint>,
}

impl RunningDaemon {
    /// Starts the runtime without waiting for readiness.
    pub fn spawn<L>(loader: L) -> Self
    where
        L: ConfigLoader + 'static,
    {
        let reporter = Arc::new(RecordingHealthReporter::default());
        let shutdown = TestShutdownSignal::new();
        let plan = LaunchPlan {
            loader,
            reporter: reporter.clone(),
            shutdown: shutdown.clone(),
        };
        let handle = thread::Builder::new()
            .name("campusd-test-daemon".to_owned())
            .spawn(move || run_daemon_with(plan))
            .expect("spawn daemon thread");
        Self {
            reporter,
            shutdown,
            handle: Some(handle),
            endpoint: None,
        }
    }

    /// Starts the runtime and waits until its listener is ready.
    pub fn start<L>(loader: L) -> Result<Self, String>
    where
        L: ConfigLoader + 'static,
    {
        let mut daemon = Self::spawn(loader);
        daemon.wait_until_ready()?;
        Ok(daemon)
    }

    /// Waits for the `listener_ready` event and records the bound endpoint.
    pub fn wait_until_ready(&mut self) -> Result<&SocketEndpoint, String> {
        let deadline = Instant::now() + READY_TIMEOUT;
        loop {
            if let Some(endpoint) = self.reporter.listener_endpoint() {
                return Ok(self.endpoint.insert(endpoint));
            }
            if self.handle.as_ref().is_some_and(JoinHandle::is_finished) {
                let events = self.reporter.events();
                return Err(format!("daemon exited before becoming ready: {events:?}"));
            }
            if Instant::now() >= deadline {
                return Err("daemon did not become ready in time".to_owned());
            }
            thread::sleep(POLL_INTERVAL);
        }
    }

    /// Endpoint the listener is bound to.
    pub fn endpoint(&self) -> Result<&SocketEndpoint, String> {
        self.endpoint
            .as_ref()
            .ok_or_else(|| "daemon is not ready".to_owned())
    }

    /// Opens a new client connection to the daemon.
    pub fn connect(&self) -> Result<JsonlClient, String> {
        let endpoint = self.endpoint()?;
        JsonlClient::connect(endpoint).map_err(|error| format!("connect to {endpoint}: {error}"))
    }

    /// Delivers the shutdown signal.
    pub fn trigger_shutdown(&self) {
        self.shutdown.trigger();
    }

    /// Triggers shutdown and waits for the runtime to return.
    pub fn stop(&mut self) -> Result<(), LaunchError> {
        self.trigger_shutdown();
        self.join()
    }

    /// Waits for the runtime to return.
    pub fn join(&mut self) -> Result<(), LaunchError> {
        match self.handle.take() {
            Some(handle) => handle.join().expect("daemon thread panicked"),
            None => Ok(()),
        }
    }
}

impl Drop for RunningDaemon {
    fn drop(&mut self) {
        if self.handle.is_some() {
            self.trigger_shutdown();
            let _ = self.join();
        }
    }
}
