//! Slicing a raw response buffer into status line, header block and body.
//!
//! # Design
//! The buffer never changes after construction, so each view is a pure
//! function of it and is computed at most once. Each cache holds the whole
//! `Result`: a failed parse is not retried either, and the debug event tied
//! to a computation fires once per message.
//!
//! Every slice is taken only after the separators it depends on have been
//! found. A missing separator is a `MessageError`, never an out-of-range
//! index.

use std::cell::OnceCell;

use tracing::debug;

use crate::chunked::{self, find};
use crate::error::MessageError;
use crate::{CRLF, HEADER_END};

#[derive(Debug, Clone, Default)]
pub struct RawMessage {
    buffer: Vec<u8>,
    status: OnceCell<Result<String, MessageError>>,
    header: OnceCell<Result<String, MessageError>>,
    body: OnceCell<Result<String, MessageError>>,
}

impl RawMessage {
    pub fn new(buffer: Vec<u8>) -> Self {
        Self {
            buffer,
            ..Self::default()
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Everything before the first CRLF.
    pub fn status(&self) -> Result<&str, MessageError> {
        cached(&self.status, || {
            let status = parse_status(&self.buffer);
            debug!(?status, "parsed status line");
            status
        })
    }

    /// Everything between the first CRLF and the first double CRLF.
    pub fn header(&self) -> Result<&str, MessageError> {
        cached(&self.header, || {
            let header = parse_header(&self.buffer);
            debug!(?header, "parsed header block");
            header
        })
    }

    /// The payload of the single chunk following the header block.
    ///
    /// Only a body holding exactly one chunk decodes; see `chunked`. For a
    /// body delimited by connection close, use `raw_body`.
    pub fn body(&self) -> Result<&str, MessageError> {
        cached(&self.body, || {
            let body = self
                .raw_body()
                .and_then(|raw| chunked::decode(chunked::trim_crlf(raw)))
                .map(|payload| String::from_utf8_lossy(&payload).into_owned());
            debug!(?body, "decoded body");
            body
        })
    }

    /// The undecoded bytes after the double CRLF.
    pub fn raw_body(&self) -> Result<&[u8], MessageError> {
        let end = find(&self.buffer, HEADER_END).ok_or(MessageError::MalformedHeaderBlock)?;
        Ok(&self.buffer[end + HEADER_END.len()..])
    }

    /// Whether the header block declares `Transfer-Encoding: chunked`.
    pub fn is_chunked(&self) -> Result<bool, MessageError> {
        let header = self.header()?;
        Ok(header.split("\r\n").any(|line| {
            line.split_once(':').is_some_and(|(name, value)| {
                name.trim().eq_ignore_ascii_case("transfer-encoding")
                    && value.to_ascii_lowercase().contains("chunked")
            })
        }))
    }
}

impl From<Vec<u8>> for RawMessage {
    fn from(buffer: Vec<u8>) -> Self {
        Self::new(buffer)
    }
}

fn cached<'a>(
    cell: &'a OnceCell<Result<String, MessageError>>,
    compute: impl FnOnce() -> Result<String, MessageError>,
) -> Result<&'a str, MessageError> {
    cell.get_or_init(compute).as_deref().map_err(Clone::clone)
}

fn parse_status(buffer: &[u8]) -> Result<String, MessageError> {
    let end = find(buffer, CRLF).ok_or(MessageError::MalformedStatusLine)?;
    Ok(String::from_utf8_lossy(&buffer[..end]).into_owned())
}

fn parse_header(buffer: &[u8]) -> Result<String, MessageError> {
    let status_end = find(buffer, CRLF).ok_or(MessageError::MalformedHeaderBlock)?;
    let end = find(buffer, HEADER_END).ok_or(MessageError::MalformedHeaderBlock)?;
    // With no header lines the status CRLF is the start of the blank line.
    let start = (status_end + CRLF.len()).min(end);
    Ok(String::from_utf8_lossy(&buffer[start..end]).into_owned())
}
