//! Test helpers for the transport module.

use std::io::Read;
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};
use std::thread;
use std::time::{Duration, Instant};

use super::{ConnectionHandler, ConnectionStream, ShutdownToken};

pub(crate) struct CountingHandler {
    count: Arc<AtomicUsize>,
}

impl CountingHandler {
    pub(crate) fn new() -> (Arc<AtomicUsize>, Arc<Self>) {
        let count = Arc::new(AtomicUsize::new(0));
        let handler = Arc::new(Self {
            count: Arc::clone(&count),
        });
        (count, handler)
    }
}

impl ConnectionHandler for CountingHandler {
    fn handle(&self, _stream: ConnectionStream, _shutdown: &ShutdownToken) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }
}

/// Keeps each connection open until shutdown is requested, then records
/// that the worker finished.
pub(crate) struct HoldingHandler {
    started: Arc<AtomicUsize>,
    finished: Arc<AtomicUsize>,
}

impl HoldingHandler {
    pub(crate) fn new() -> (Arc<AtomicUsize>, Arc<AtomicUsize>, Arc<Self>) {
        let started = Arc::new(AtomicUsize::new(0));
        let finished = Arc::new(AtomicUsize::new(0));
        let handler = Arc::new(Self {
            started: Arc::clone(&started),
            finished: Arc::clone(&finished),
        });
        (started, finished, handler)
    }
}

impl ConnectionHandler for HoldingHandler {
    fn handle(&self, mut stream: ConnectionStream, shutdown: &ShutdownToken) {
        self.started.fetch_add(1, Ordering::SeqCst);
        let _ = stream.set_read_timeout(Some(Duration::from_millis(20)));
        let mut buffer = [0_u8; 64];
        while !shutdown.is_requested() {
            if let Ok(0) = stream.read(&mut buffer) {
                break;
            }
        }
        thread::sleep(Duration::from_millis(50));
        self.finished.fetch_add(1, Ordering::SeqCst);
    }
}

pub(crate) fn wait_for_count(count: &AtomicUsize, expected: usize) -> bool {
    let deadline = Instant::now() + Duration::from_secs(2);
    while Instant::now() < deadline {
        if count.load(Ordering::SeqCst) >= expected {
            return true;
        }
        thread::sleep(Duration::from_millis(10));
    }
    false
}
