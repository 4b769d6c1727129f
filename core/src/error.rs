//! Error types for the raw HTTP exchange.
//!
//! # Design
//! Three enums for the three stages an exchange can fail in. Validation runs
//! before any socket is opened, `ExchangeError` covers the socket lifecycle,
//! and `MessageError` covers slicing a buffer that did arrive. Nothing is
//! retried; every variant is terminal for the current exchange.

use std::fmt;
use std::io;

/// Errors raised while checking a target before any network I/O.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The host matched neither the hostname nor the ip-address pattern.
    InvalidTarget,

    /// The port did not match the configured port pattern.
    InvalidPort,

    /// A configured pattern is not a valid regular expression.
    InvalidPattern { pattern: String, reason: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidTarget => write!(f, "invalid target name"),
            ValidationError::InvalidPort => write!(f, "invalid port number"),
            ValidationError::InvalidPattern { pattern, reason } => {
                write!(f, "invalid pattern `{pattern}`: {reason}")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Errors raised by the socket lifecycle of a single exchange.
#[derive(Debug)]
pub enum ExchangeError {
    /// The connection could not be established.
    Dial { address: String, source: io::Error },

    /// The request could not be written in full.
    Write(io::Error),

    /// A read failed for a reason other than end-of-stream or the deadline.
    Read(io::Error),

    /// The deadline passed before the peer closed the connection. Bytes
    /// received up to that point are discarded; only their count is kept.
    Timeout { received: usize },
}

impl fmt::Display for ExchangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExchangeError::Dial { address, source } => {
                write!(f, "failed to connect to {address}: {source}")
            }
            ExchangeError::Write(e) => write!(f, "failed to send request: {e}"),
            ExchangeError::Read(e) => write!(f, "can not read response: {e}"),
            ExchangeError::Timeout { received } => {
                write!(f, "deadline elapsed before peer closed ({received} bytes discarded)")
            }
        }
    }
}

impl std::error::Error for ExchangeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExchangeError::Dial { source, .. } => Some(source),
            ExchangeError::Write(e) | ExchangeError::Read(e) => Some(e),
            ExchangeError::Timeout { .. } => None,
        }
    }
}

/// Errors raised while slicing a received buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageError {
    /// No CRLF terminates the status line.
    MalformedStatusLine,

    /// No double-CRLF separates the header block from the body.
    MalformedHeaderBlock,

    /// The body is not exactly one well-formed chunk.
    MalformedChunkFraming(&'static str),
}

impl fmt::Display for MessageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageError::MalformedStatusLine => write!(f, "malformed status line: no CRLF found"),
            MessageError::MalformedHeaderBlock => {
                write!(f, "malformed header block: no blank line found")
            }
            MessageError::MalformedChunkFraming(reason) => {
                write!(f, "malformed chunk framing: {reason}")
            }
        }
    }
}

impl std::error::Error for MessageError {}
