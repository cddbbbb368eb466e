//! Newline-delimited framing over a connection stream.

use std::io::{self, BufRead, BufReader, Read};

use crate::transport::ShutdownToken;

/// Maximum size of a single request line in bytes, excluding the newline.
pub(crate) const MAX_REQUEST_BYTES: usize = 1024 * 1024;

/// One unit read from the stream.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Frame {
    /// A complete line without its delimiter. A final line closed by
    /// end-of-stream rather than a newline is still delivered.
    Line(Vec<u8>),
    /// A line longer than the limit; its bytes were discarded.
    TooLarge,
    /// The peer closed the stream.
    Closed,
    /// Shutdown was requested while no request was in progress.
    Shutdown,
}

/// Reads bounded lines from a stream.
///
/// The reader never buffers more than the limit for one line: once a line
/// overflows, the rest of it is skipped up to the next newline.
pub(crate) struct LineReader<R> {
    inner: BufReader<R>,
    limit: usize,
}

impl<R: Read> LineReader<R> {
    pub(crate) fn new(reader: R) -> Self {
        Self::with_limit(reader, MAX_REQUEST_BYTES)
    }

    pub(crate) fn with_limit(reader: R, limit: usize) -> Self {
        Self {
            inner: BufReader::new(reader),
            limit,
        }
    }

    /// Reads the next frame.
    ///
    /// Read timeouts are treated as idle polls: when `shutdown` has been
    /// requested and no line has been started, [`Frame::Shutdown`] is
    /// returned; otherwise reading resumes.
    pub(crate) fn next_frame(&mut self, shutdown: &ShutdownToken) -> io::Result<Frame> {
        let mut line = Vec::new();
        let mut oversized = false;
        loop {
            let available = match self.inner.fill_buf() {
                Ok(bytes) => bytes,
                Err(error) if error.kind() == io::ErrorKind::Interrupted => continue,
                Err(error) if is_timeout(&error) => {
                    if line.is_empty() && !oversized && shutdown.is_requested() {
                        return Ok(Frame::Shutdown);
                    }
                    continue;
                }
                Err(error) => return Err(error),
            };

            if available.is_empty() {
                return Ok(if oversized {
                    Frame::TooLarge
                } else if line.is_empty() {
                    Frame::Closed
                } else {
                    Frame::Line(line)
                });
            }

            let (chunk, complete) = match available.iter().position(|byte| *byte == b'\n') {
                Some(newline) => (available.split_at(newline).0, true),
                None => (available, false),
            };
            if !oversized {
                if line.len() + chunk.len() > self.limit {
                    oversized = true;
                    line = Vec::new();
                } else {
                    line.extend_from_slice(chunk);
                }
            }
            let consumed = chunk.len() + usize::from(complete);
            self.inner.consume(consumed);

            if complete {
                return Ok(if oversized {
                    Frame::TooLarge
                } else {
                    Frame::Line(line)
                });
            }
        }
    }
}

fn is_timeout(error: &io::Error) -> bool {
    matches!(
        error.kind(),
        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut
    )
}
