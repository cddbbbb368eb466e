//! Connection handler that serves JSONL requests.
//!
//! Each connection runs a read, dispatch, write loop on its worker thread
//! until the peer closes the stream, an I/O error occurs, or shutdown is
//! requested while the connection is idle.

use std::time::Duration;

use tracing::{debug, warn};

use campus_types::{FailureKind, Response};

use crate::transport::{ConnectionHandler, ConnectionStream, ShutdownToken};

use super::frame::{Frame, LineReader};
use super::request::parse_request;
use super::response::ResponseWriter;
use super::router::{DISPATCH_TARGET, Router};

/// How often an idle connection checks for shutdown.
const IDLE_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Connection handler that parses and dispatches JSONL requests.
#[derive(Debug)]
pub(crate) struct DispatchConnectionHandler {
    router: Router,
}

impl DispatchConnectionHandler {
    pub(crate) fn new(router: Router) -> Self {
        Self { router }
    }

    /// Produces the response for one request line.
    fn respond(&self, line: &[u8]) -> Response {
        match parse_request(line) {
            Ok(request) => self.router.route(&request),
            Err(error) => {
                debug!(target: DISPATCH_TARGET, %error, "rejected request line");
                Response::failure(error.failure_kind())
            }
        }
    }

    fn serve(&self, stream: ConnectionStream, shutdown: &ShutdownToken) {
        let peer = stream.peer_label();
        if let Err(error) = stream.set_read_timeout(Some(IDLE_POLL_INTERVAL)) {
            warn!(target: DISPATCH_TARGET, %peer, %error, "failed to set read timeout");
            return;
        }
        let write_half = match stream.try_clone() {
            Ok(write_half) => write_half,
            Err(error) => {
                warn!(target: DISPATCH_TARGET, %peer, %error, "failed to clone stream");
                return;
            }
        };
        let mut reader = LineReader::new(stream);
        let mut writer = ResponseWriter::new(write_half);
        debug!(target: DISPATCH_TARGET, %peer, "connection opened");

        let mut served = 0_u64;
        loop {
            let response = match reader.next_frame(shutdown) {
                Ok(Frame::Line(line)) => self.respond(&line),
                Ok(Frame::TooLarge) => {
                    debug!(target: DISPATCH_TARGET, %peer, "request line too large");
                    Response::failure(FailureKind::RequestTooLarge)
                }
                Ok(Frame::Closed) => break,
                Ok(Frame::Shutdown) => {
                    debug!(target: DISPATCH_TARGET, %peer, "closing idle connection for shutdown");
                    break;
                }
                Err(error) => {
                    warn!(target: DISPATCH_TARGET, %peer, %error, "failed to read request");
                    break;
                }
            };

            if let Err(error) = writer.write_response(&response) {
                warn!(target: DISPATCH_TARGET, %peer, %error, "failed to write response");
                break;
            }
            served += 1;
        }
        debug!(target: DISPATCH_TARGET, %peer, served, "connection closed");
    }
}

impl ConnectionHandler for DispatchConnectionHandler {
    fn handle(&self, stream: ConnectionStream, shutdown: &ShutdownToken) {
        self.serve(stream, shutdown);
    }
}
