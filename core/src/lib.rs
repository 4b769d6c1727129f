//! Single-exchange HTTP client over a raw TCP socket.
//!
//! # Overview
//! Renders a fixed-shape `GET /` request by hand, writes it to a plain TCP
//! socket, reads until the peer closes or a deadline elapses, then slices the
//! raw bytes into status line, header block and body. No HTTP library is
//! involved at any point; every boundary is found by searching for CRLF and
//! double-CRLF inside an opaque buffer.
//!
//! # Design
//! - `Endpoint` is produced by `TargetValidator` before any socket exists.
//! - `ConnectionSession` owns one socket for its whole life and releases it
//!   on every exit path.
//! - `RawMessage` owns the received bytes and memoizes each parsed view.
//! - `chunked` handles exactly one size-prefixed chunk and rejects anything
//!   else instead of returning a garbled payload.
//! - Parse failures (`MessageError`) are a separate type from I/O failures
//!   (`ExchangeError`) so callers can tell "no valid answer arrived" apart
//!   from "an answer arrived but is unparsable".

pub mod chunked;
pub mod client;
pub mod endpoint;
pub mod error;
pub mod message;
pub mod request;
pub mod session;
pub mod validate;

pub use client::{Client, ExchangeOptions};
pub use endpoint::Endpoint;
pub use error::{ExchangeError, MessageError, ValidationError};
pub use message::RawMessage;
pub use request::{build_request, RequestBuilder};
pub use session::ConnectionSession;
pub use validate::{TargetValidator, ValidatorConfig};

/// Line and section separator of the wire format.
pub const CRLF: &[u8] = b"\r\n";

/// Boundary between the header block and the body.
pub const HEADER_END: &[u8] = b"\r\n\r\n";
