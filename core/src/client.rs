//! One-shot request/response exchange.
//!
//! # Design
//! `Client` holds only its options and carries no state between calls. A
//! fetch is strictly sequential: the request is fully written before the
//! first read, and nothing is retried. The session is closed explicitly on
//! success and dropped on every error path, so the socket never outlives
//! the call.

use std::time::Duration;

use tracing::{debug, info};

use crate::endpoint::Endpoint;
use crate::error::ExchangeError;
use crate::message::RawMessage;
use crate::request::RequestBuilder;
use crate::session::ConnectionSession;

/// Default deadline for reading the whole response.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeOptions {
    /// Absolute deadline for the read loop, measured from its first read.
    pub read_timeout: Duration,
    /// Bound on dialing each resolved address. `None` uses the OS default.
    pub connect_timeout: Option<Duration>,
}

impl Default for ExchangeOptions {
    fn default() -> Self {
        Self {
            read_timeout: DEFAULT_READ_TIMEOUT,
            connect_timeout: None,
        }
    }
}

/// Sends the fixed `GET /` request and collects the raw reply.
#[derive(Debug, Clone, Default)]
pub struct Client {
    options: ExchangeOptions,
}

impl Client {
    pub fn new(options: ExchangeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ExchangeOptions {
        &self.options
    }

    pub fn fetch(&self, endpoint: &Endpoint) -> Result<RawMessage, ExchangeError> {
        let request = RequestBuilder::new(endpoint.host()).build();

        let mut session = ConnectionSession::open(endpoint, self.options.connect_timeout)?;
        session.send(&request)?;
        let buffer = session.read_until_complete(self.options.read_timeout)?;
        session.close();

        info!(address = %endpoint, bytes = buffer.len(), "exchange complete");
        debug!(response = %String::from_utf8_lossy(&buffer), "raw response");
        Ok(RawMessage::new(buffer))
    }
}
