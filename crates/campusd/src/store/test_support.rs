//! Temporary on-disk stores for tests.

use std::sync::Arc;

use camino::Utf8PathBuf;
use tempfile::TempDir;

use super::{Store, StoreSettings};

/// A store backed by a database file inside a temporary directory.
pub(crate) struct TempStore {
    pub(crate) store: Arc<Store>,
    pub(crate) path: Utf8PathBuf,
    _dir: TempDir,
}

impl TempStore {
    pub(crate) fn new() -> Self {
        let dir = TempDir::new().expect("create temporary store directory");
        let path = Utf8PathBuf::from_path_buf(dir.path().join("campus.db"))
            .expect("temporary path should be UTF-8");
        let store = Store::open(StoreSettings::new(path.clone())).expect("open temporary store");
        Self {
            store: Arc::new(store),
            path,
            _dir: dir,
        }
    }

    /// Opens a second, independent store over the same database file.
    pub(crate) fn reopen(&self) -> Store {
        Store::open(StoreSettings::new(self.path.clone())).expect("reopen temporary store")
    }
}
