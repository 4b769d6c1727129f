//! Request rendering.
//!
//! Only one request shape exists: `GET /` with a `Host` header and
//! `Connection: close`. The host value is followed by a single space before
//! its CRLF; paired servers and fixtures depend on those exact bytes.

/// Renders the fixed-shape request for one host.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    host: String,
}

impl RequestBuilder {
    pub fn new(host: &str) -> Self {
        Self {
            host: host.to_string(),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn build(&self) -> Vec<u8> {
        build_request(&self.host)
    }
}

/// Render `GET / HTTP/1.1` for `host` as wire bytes.
pub fn build_request(host: &str) -> Vec<u8> {
    format!("GET / HTTP/1.1\r\nHost: {host} \r\nConnection: close\r\n\r\n").into_bytes()
}
