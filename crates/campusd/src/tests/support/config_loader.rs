//! Test configuration loaders for scenarios covering success and failure paths.

use std::ffi::OsString;
use std::fs;
use std::sync::Arc;

use camino::Utf8PathBuf;
use ortho_config::{OrthoConfig, OrthoError};
use tempfile::TempDir;

use campus_config::{Config, LogFormat, SocketEndpoint};

use crate::bootstrap::ConfigLoader;

/// Loader that places the database (and any Unix socket) under a temporary
/// directory and listens on an ephemeral TCP port.
#[derive(Clone)]
pub struct TestConfigLoader {
    dir: Arc<TempDir>,
    listen_socket: Option<SocketEndpoint>,
    database_path: Option<Utf8PathBuf>,
}

impl TestConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temporary directory for daemon state");
        Self {
            dir: Arc::new(dir),
            listen_socket: None,
            database_path: None,
        }
    }

    /// Listens on a Unix socket nested in a directory that does not exist yet.
    #[must_use]
    pub fn with_unix_socket(mut self) -> Self {
        let path = self.path("run/campusd.sock");
        self.listen_socket = Some(SocketEndpoint::unix(path));
        self
    }

    /// Points the database below a regular file so its directory cannot be
    /// created.
    #[must_use]
    pub fn with_unwritable_database(mut self) -> Self {
        let blocker = self.path("blocker");
        fs::write(&blocker, b"not a directory").expect("write blocking file");
        self.database_path = Some(blocker.join("campus.db"));
        self
    }

    pub fn database_path(&self) -> Utf8PathBuf {
        self.database_path
            .clone()
            .unwrap_or_else(|| self.path("campus.db"))
    }

    pub fn socket_path(&self) -> Option<Utf8PathBuf> {
        self.listen_socket
            .as_ref()
            .and_then(SocketEndpoint::unix_path)
            .map(|path| path.to_path_buf())
    }

    fn path(&self, relative: &str) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(self.dir.path().join(relative))
            .expect("temporary path was not valid UTF-8")
    }
}

impl ConfigLoader for TestConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Ok(Config {
            listen_socket: self
                .listen_socket
                .clone()
                .unwrap_or_else(|| SocketEndpoint::tcp("127.0.0.1", 0)),
            database_path: self.database_path(),
            log_filter: "warn".to_owned(),
            log_format: LogFormat::Compact,
            ..Config::default()
        })
    }
}

/// Loader that intentionally fails by passing invalid CLI arguments.
pub struct FailingConfigLoader;

impl ConfigLoader for FailingConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        let args = vec![
            OsString::from("campusd"),
            OsString::from("--listen-socket"),
            OsString::from("udp://127.0.0.1:53"),
        ];
        Config::load_from_iter(args)
    }
}
