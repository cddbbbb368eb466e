//! Response serialization for the dispatch loop.

use std::io::{BufWriter, Write};

use campus_types::Response;

use super::errors::DispatchError;

/// Writer that serializes responses as JSONL lines.
pub(crate) struct ResponseWriter<W: Write> {
    writer: BufWriter<W>,
}

impl<W: Write> ResponseWriter<W> {
    pub(crate) fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
        }
    }

    /// Writes one response line and flushes it to the peer.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization, writing or flushing fails.
    pub(crate) fn write_response(&mut self, response: &Response) -> Result<(), DispatchError> {
        serde_json::to_writer(&mut self.writer, response)
            .map_err(DispatchError::SerializeResponse)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}
