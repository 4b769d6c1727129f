//! Single-chunk body decoding.
//!
//! This is not a general chunked transfer decoder. A body is accepted only
//! when it holds exactly one unit of the form
//!
//! ```text
//! <hex size>\r\n<payload>\r\n0
//! ```
//!
//! after leading and trailing CR/LF bytes have been trimmed. The size line is
//! checked against the payload length and the tail must be the `0`
//! terminator, so multiple chunks, chunk extensions and trailers are rejected
//! with `MalformedChunkFraming` rather than returned garbled.

use crate::error::MessageError;
use crate::CRLF;

/// Strip every leading and trailing `\r` and `\n` byte.
pub fn trim_crlf(bytes: &[u8]) -> &[u8] {
    let is_crlf = |b: &u8| *b == b'\r' || *b == b'\n';
    let start = bytes.iter().position(|b| !is_crlf(b)).unwrap_or(bytes.len());
    let end = bytes.iter().rposition(|b| !is_crlf(b)).map_or(start, |i| i + 1);
    &bytes[start..end]
}

/// Extract the payload of the single chunk in an already trimmed body.
pub fn decode(trimmed: &[u8]) -> Result<Vec<u8>, MessageError> {
    if trimmed == b"0" {
        return Err(MessageError::MalformedChunkFraming("no data chunk"));
    }
    let size_end = find(trimmed, CRLF).ok_or(MessageError::MalformedChunkFraming("no size line"))?;
    let size = parse_size(&trimmed[..size_end])?;

    let rest = &trimmed[size_end + CRLF.len()..];
    let payload_end =
        rfind(rest, CRLF).ok_or(MessageError::MalformedChunkFraming("no terminating chunk"))?;
    let payload = &rest[..payload_end];
    let terminator = &rest[payload_end + CRLF.len()..];

    if terminator != b"0" {
        return Err(MessageError::MalformedChunkFraming("terminator is not a zero-size chunk"));
    }
    if payload.len() != size {
        return Err(MessageError::MalformedChunkFraming("size line does not match payload"));
    }
    Ok(payload.to_vec())
}

fn parse_size(line: &[u8]) -> Result<usize, MessageError> {
    let invalid = MessageError::MalformedChunkFraming("size line is not hexadecimal");
    let text = std::str::from_utf8(line).map_err(|_| invalid.clone())?;
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid);
    }
    usize::from_str_radix(text, 16).map_err(|_| invalid)
}

pub(crate) fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

pub(crate) fn rfind(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).rposition(|w| w == needle)
}
