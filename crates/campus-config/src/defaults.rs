use camino::Utf8PathBuf;

use crate::logging::LogFormat;
use crate::socket::SocketEndpoint;

/// Default TCP port for the daemon listener.
pub const DEFAULT_TCP_PORT: u16 = 8080;

/// Default host for the daemon listener.
pub const DEFAULT_TCP_HOST: &str = "127.0.0.1";

/// Default SQLite database file, relative to the working directory.
pub const DEFAULT_DATABASE_PATH: &str = "campus.db";

/// Default busy timeout applied to every store connection.
pub const DEFAULT_STORE_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Default number of idle store connections kept for reuse.
pub const DEFAULT_STORE_POOL_SIZE: usize = 8;

/// Default log filter expression used by the daemon.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Default listener endpoint.
#[must_use]
pub fn default_listen_socket() -> SocketEndpoint {
    SocketEndpoint::tcp(DEFAULT_TCP_HOST, DEFAULT_TCP_PORT)
}

/// Default database path as an owned value (serde default hook).
#[must_use]
pub fn default_database_path() -> Utf8PathBuf {
    Utf8PathBuf::from(DEFAULT_DATABASE_PATH)
}

pub(crate) const fn default_store_busy_timeout_ms() -> u64 {
    DEFAULT_STORE_BUSY_TIMEOUT_MS
}

pub(crate) const fn default_store_pool_size() -> usize {
    DEFAULT_STORE_POOL_SIZE
}

/// Default log filter expression used by the daemon.
#[must_use]
pub fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value (serde default hook).
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format.
#[must_use]
pub fn default_log_format() -> LogFormat {
    LogFormat::Json
}
