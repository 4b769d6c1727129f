//! Socket lifecycle of one exchange.
//!
//! # Design
//! A `ConnectionSession` exclusively owns its `TcpStream` from `open` until
//! `close` or drop, so the socket is released on success, on every error and
//! on timeout alike.
//!
//! The read deadline is absolute: it is fixed once when
//! `read_until_complete` starts, and each blocking read is given whatever
//! time is left until that instant. A peer that trickles bytes cannot extend
//! the exchange past the deadline.

use std::io::{self, Read, Write};
use std::net::{Shutdown, TcpStream, ToSocketAddrs};
use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::endpoint::Endpoint;
use crate::error::ExchangeError;

/// Size of the scratch buffer used by each socket read.
pub const READ_CHUNK_SIZE: usize = 1024;

#[derive(Debug)]
pub struct ConnectionSession {
    stream: TcpStream,
    address: String,
}

impl ConnectionSession {
    /// Dial `endpoint`. With a `connect_timeout`, every resolved address is
    /// tried in turn, each bounded by the timeout.
    pub fn open(endpoint: &Endpoint, connect_timeout: Option<Duration>) -> Result<Self, ExchangeError> {
        let address = endpoint.address().to_string();
        let stream = match connect_timeout {
            None => TcpStream::connect(&address),
            Some(timeout) => connect_with_timeout(&address, timeout),
        }
        .map_err(|source| ExchangeError::Dial {
            address: address.clone(),
            source,
        })?;
        debug!(%address, "connected");
        Ok(Self { stream, address })
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Write the whole request. `write_all` loops over partial writes.
    pub fn send(&mut self, request: &[u8]) -> Result<(), ExchangeError> {
        self.stream
            .write_all(request)
            .and_then(|()| self.stream.flush())
            .map_err(ExchangeError::Write)?;
        debug!(bytes = request.len(), "request sent");
        Ok(())
    }

    /// Accumulate everything the peer sends until it closes the connection.
    ///
    /// Fails with `Timeout` if `timeout` elapses first; whatever had been
    /// received is dropped and only its length is reported.
    pub fn read_until_complete(&mut self, timeout: Duration) -> Result<Vec<u8>, ExchangeError> {
        let deadline = Instant::now() + timeout;
        let mut chunk = [0u8; READ_CHUNK_SIZE];
        let mut buffer = Vec::new();

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Err(ExchangeError::Timeout {
                    received: buffer.len(),
                });
            }
            self.stream
                .set_read_timeout(Some(remaining))
                .map_err(ExchangeError::Read)?;

            match self.stream.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => {
                    trace!(n, total = buffer.len() + n, "read chunk");
                    buffer.extend_from_slice(&chunk[..n]);
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) if matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut) => {
                    return Err(ExchangeError::Timeout {
                        received: buffer.len(),
                    });
                }
                Err(e) => return Err(ExchangeError::Read(e)),
            }
        }

        debug!(bytes = buffer.len(), "peer closed connection");
        Ok(buffer)
    }

    /// Shut down both directions and release the socket.
    pub fn close(self) {
        if let Err(e) = self.stream.shutdown(Shutdown::Both) {
            // The peer usually closed first; NotConnected is expected here.
            trace!(error = %e, "shutdown");
        }
        debug!(address = %self.address, "connection closed");
    }
}

fn connect_with_timeout(address: &str, timeout: Duration) -> io::Result<TcpStream> {
    let mut last_error = None;
    for addr in address.to_socket_addrs()? {
        match TcpStream::connect_timeout(&addr, timeout) {
            Ok(stream) => return Ok(stream),
            Err(e) => last_error = Some(e),
        }
    }
    Err(last_error.unwrap_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "address resolved to no socket addresses")
    }))
}
