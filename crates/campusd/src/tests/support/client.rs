//! Line-oriented client used to talk to a running daemon.

use std::io::{self, BufRead, BufReader, Write};
use std::net::{Shutdown, TcpStream};
use std::time::Duration;

#[cfg(unix)]
use std::os::unix::net::UnixStream;

use serde::Serialize;

use campus_config::SocketEndpoint;
use campus_types::{Method, Request, Response};

use crate::transport::ConnectionStream;

const READ_TIMEOUT: Duration = Duration::from_secs(5);

/// Client writing JSONL requests and reading one response line per request.
pub struct JsonlClient {
    writer: ConnectionStream,
    reader: BufReader<ConnectionStream>,
}

impl JsonlClient {
    /// Connects to the endpoint a listener reported as ready.
    pub fn connect(endpoint: &SocketEndpoint) -> io::Result<Self> {
        let stream = match endpoint {
            SocketEndpoint::Tcp { host, port } => {
                ConnectionStream::Tcp(TcpStream::connect((host.as_str(), *port))?)
            }
            #[cfg(unix)]
            SocketEndpoint::Unix { path } => ConnectionStream::Unix(UnixStream::connect(path)?),
            #[cfg(not(unix))]
            SocketEndpoint::Unix { .. } => {
                return Err(io::Error::new(
                    io::ErrorKind::Unsupported,
                    "unix sockets are unavailable on this platform",
                ));
            }
        };
        stream.set_read_timeout(Some(READ_TIMEOUT))?;
        let reader = BufReader::new(stream.try_clone()?);
        Ok(Self {
            writer: stream,
            reader,
        })
    }

    /// Sends a typed request and waits for its response.
    pub fn call<P: Serialize>(&mut self, method: Method, payload: &P) -> io::Result<Response> {
        let request = Request::new(method, payload).map_err(io::Error::other)?;
        let line = serde_json::to_string(&request).map_err(io::Error::other)?;
        self.call_line(&line)
    }

    /// Sends one raw line (a newline is appended) and waits for its response.
    pub fn call_line(&mut self, line: &str) -> io::Result<Response> {
        self.send_raw(line.as_bytes())?;
        self.send_raw(b"\n")?;
        self.read_response()
    }

    /// Writes bytes without framing.
    pub fn send_raw(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.writer.write_all(bytes)?;
        self.writer.flush()
    }

    /// Closes the write half so the daemon sees end of input.
    pub fn finish_writing(&mut self) -> io::Result<()> {
        match &self.writer {
            ConnectionStream::Tcp(stream) => stream.shutdown(Shutdown::Write),
            #[cfg(unix)]
            ConnectionStream::Unix(stream) => stream.shutdown(Shutdown::Write),
        }
    }

    /// Reads the next response line.
    pub fn read_response(&mut self) -> io::Result<Response> {
        let mut line = String::new();
        let read = self.reader.read_line(&mut line)?;
        if read == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "daemon closed the connection",
            ));
        }
        serde_json::from_str(&line).map_err(io::Error::other)
    }

    /// Returns true once the daemon has closed its side of the connection.
    pub fn at_eof(&mut self) -> io::Result<bool> {
        Ok(self.reader.fill_buf()?.is_empty())
    }
}
