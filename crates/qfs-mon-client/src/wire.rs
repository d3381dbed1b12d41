//! Request encoding and response header parsing.
//!
//! Both directions use a line-oriented header terminated by an empty line:
//!
//! ```text
//! CHECK_LEASES\r\n            OK\r\n
//! Cseq: 7\r\n                 Cseq: 7\r\n
//! Version: KFS/1.0\r\n        Status: 0\r\n
//! Client-Protocol-Version:    Content-length: 42\r\n
//!   114\r\n                   \r\n
//! \r\n                        <42 content bytes>
//! ```
//!
//! Header keys are matched case-insensitively; unknown keys are ignored.

use bytes::{BufMut, Bytes, BytesMut};
use qfs_types::status_code_t;

pub const PROTOCOL_VERSION: &str = "KFS/1.0";

pub const CLIENT_PROTOCOL_VERSION: u32 = 114;

/// Largest accepted response header, terminator included.
pub const MAX_HEADER_LEN: usize = 16 << 10;

const HEADER_END: &[u8] = b"\r\n\r\n";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WireError {
    #[error("response header exceeds {max} bytes")]
    HeaderTooLong { max: usize },

    #[error("response header is not valid UTF-8")]
    NotUtf8,

    #[error("unexpected response line: {0:?}")]
    BadStatusLine(String),

    #[error("malformed header line: {0:?}")]
    MalformedHeader(String),

    #[error("missing {0} header")]
    MissingField(&'static str),

    #[error("invalid {field} value: {value:?}")]
    InvalidValue { field: &'static str, value: String },

    #[error("sequence mismatch: sent {expected}, got {actual}")]
    SeqMismatch { expected: i64, actual: i64 },

    #[error("content length {length} exceeds limit {max}")]
    ContentTooLarge { length: usize, max: usize },
}

/// Parsed response header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseHeader {
    pub seq: i64,
    pub status: status_code_t,
    pub status_msg: Option<String>,
    pub content_length: usize,
}

impl ResponseHeader {
    /// Check the response belongs to request `seq` and its payload fits.
    pub fn check(&self, seq: i64, max_content_length: usize) -> Result<(), WireError> {
        if self.seq != seq {
            return Err(WireError::SeqMismatch {
                expected: seq,
                actual: self.seq,
            });
        }
        if self.content_length > max_content_length {
            return Err(WireError::ContentTooLarge {
                length: self.content_length,
                max: max_content_length,
            });
        }
        Ok(())
    }
}

/// Encode a monitor request for `verb` with sequence number `seq`.
pub fn encode_request(verb: &str, seq: i64) -> Bytes {
    let header = format!(
        "{verb}\r\nCseq: {seq}\r\nVersion: {PROTOCOL_VERSION}\r\n\
         Client-Protocol-Version: {CLIENT_PROTOCOL_VERSION}\r\n\r\n"
    );
    let mut buf = BytesMut::with_capacity(header.len());
    buf.put_slice(header.as_bytes());
    buf.freeze()
}

/// Try to parse a response header from the start of `buf`.
///
/// Returns `Ok(None)` if the terminating empty line has not arrived yet,
/// otherwise the header and its length in bytes (terminator included).
pub fn parse_response_header(buf: &[u8]) -> Result<Option<(ResponseHeader, usize)>, WireError> {
    let end = match buf.windows(HEADER_END.len()).position(|w| w == HEADER_END) {
        Some(pos) => pos,
        None if buf.len() >= MAX_HEADER_LEN => {
            return Err(WireError::HeaderTooLong { max: MAX_HEADER_LEN })
        }
        None => return Ok(None),
    };
    let header_len = end + HEADER_END.len();
    if header_len > MAX_HEADER_LEN {
        return Err(WireError::HeaderTooLong { max: MAX_HEADER_LEN });
    }

    let text = std::str::from_utf8(&buf[..end]).map_err(|_| WireError::NotUtf8)?;
    let mut lines = text.split("\r\n");
    let first = lines.next().unwrap_or_default().trim();
    if first != "OK" {
        return Err(WireError::BadStatusLine(first.to_string()));
    }

    let mut seq = None;
    let mut status = None;
    let mut status_msg = None;
    let mut content_length = 0usize;

    for line in lines {
        let (key, value) = line
            .split_once(':')
            .ok_or_else(|| WireError::MalformedHeader(line.to_string()))?;
        let value = value.trim();
        match key.trim().to_ascii_lowercase().as_str() {
            "cseq" => seq = Some(parse_field("Cseq", value)?),
            "status" => status = Some(parse_field("Status", value)?),
            "status-message" => status_msg = Some(value.to_string()),
            "content-length" => content_length = parse_field("Content-length", value)?,
            _ => {}
        }
    }

    let header = ResponseHeader {
        seq: seq.ok_or(WireError::MissingField("Cseq"))?,
        status: status.ok_or(WireError::MissingField("Status"))?,
        status_msg,
        content_length,
    };
    Ok(Some((header, header_len)))
}

fn parse_field<T: std::str::FromStr>(field: &'static str, value: &str) -> Result<T, WireError> {
    value.parse().map_err(|_| WireError::InvalidValue {
        field,
        value: value.to_string(),
    })
}
