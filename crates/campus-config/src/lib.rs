//! Layered configuration for the campus registry daemon.
//!
//! [`Config`] is assembled by `ortho_config` from, in increasing precedence:
//! built-in defaults, a TOML file (`--config-path` or `CAMPUS_CONFIG_PATH`),
//! `CAMPUS_*` environment variables and command-line flags such as
//! `--listen-socket tcp://0.0.0.0:8080`.

mod defaults;
mod logging;
mod socket;

use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

pub use defaults::{
    DEFAULT_DATABASE_PATH, DEFAULT_LOG_FILTER, DEFAULT_STORE_BUSY_TIMEOUT_MS,
    DEFAULT_STORE_POOL_SIZE, DEFAULT_TCP_HOST, DEFAULT_TCP_PORT, default_database_path,
    default_listen_socket, default_log_filter, default_log_filter_string, default_log_format,
};
pub use logging::{LogFormat, LogFormatParseError};
pub use socket::{SocketEndpoint, SocketParseError, SocketPreparationError};

/// Resolved daemon configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "CAMPUS")]
pub struct Config {
    /// Endpoint the daemon listens on.
    #[serde(default = "defaults::default_listen_socket")]
    #[ortho_config(default = defaults::default_listen_socket())]
    pub listen_socket: SocketEndpoint,
    /// SQLite database file backing the entity store.
    #[serde(default = "defaults::default_database_path")]
    #[ortho_config(default = defaults::default_database_path())]
    pub database_path: Utf8PathBuf,
    /// Milliseconds a store connection waits on a locked database.
    #[serde(default = "defaults::default_store_busy_timeout_ms")]
    #[ortho_config(default = DEFAULT_STORE_BUSY_TIMEOUT_MS)]
    pub store_busy_timeout_ms: u64,
    /// Maximum number of idle pooled store connections.
    #[serde(default = "defaults::default_store_pool_size")]
    #[ortho_config(default = DEFAULT_STORE_POOL_SIZE)]
    pub store_pool_size: usize,
    /// `tracing_subscriber::EnvFilter` expression.
    #[serde(default = "defaults::default_log_filter_string")]
    #[ortho_config(default = defaults::default_log_filter_string())]
    pub log_filter: String,
    /// Log output format.
    #[serde(default = "defaults::default_log_format")]
    #[ortho_config(default = defaults::default_log_format())]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_socket: default_listen_socket(),
            database_path: default_database_path(),
            store_busy_timeout_ms: DEFAULT_STORE_BUSY_TIMEOUT_MS,
            store_pool_size: DEFAULT_STORE_POOL_SIZE,
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
        }
    }
}

impl Config {
    /// Endpoint the daemon listens on.
    #[must_use]
    pub fn listen_socket(&self) -> &SocketEndpoint {
        &self.listen_socket
    }

    /// Path of the SQLite database file.
    #[must_use]
    pub fn database_path(&self) -> &Utf8Path {
        self.database_path.as_path()
    }

    /// Busy timeout applied to each store connection.
    #[must_use]
    pub fn store_busy_timeout(&self) -> Duration {
        Duration::from_millis(self.store_busy_timeout_ms)
    }

    /// Maximum number of idle pooled store connections.
    #[must_use]
    pub fn store_pool_size(&self) -> usize {
        self.store_pool_size
    }

    /// Log filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Log output format.
    #[must_use]
    pub fn log_format(&self) -> LogFormat {
        self.log_format
    }
}
