//! Response head parsing for the client side.

use std::collections::HashMap;
use std::str::FromStr;

use crate::parser::error::Error;
use crate::parser::head::{header_value, parse_headers, split_head};
use crate::parser::version::HttpVersion;

/// The status line and headers of an HTTP response.
#[derive(Debug, Clone)]
pub struct ResponseHead {
    /// The HTTP version the server answered with
    pub version: HttpVersion,
    /// The numeric status code
    pub status: u16,
    /// The reason phrase, possibly empty
    pub reason: String,
    /// The HTTP headers
    pub headers: HashMap<String, String>,
}

impl ResponseHead {
    /// Get a header value (case-insensitive).
    pub fn get_header(&self, name: &str) -> Option<&String> {
        header_value(&self.headers, name)
    }

    /// The declared body length, if any.
    pub fn content_length(&self) -> Option<u64> {
        self.get_header("Content-Length")
            .and_then(|len| len.parse().ok())
    }
}

/// Parse the head of an HTTP response.
///
/// Bytes after the blank line are ignored; callers locate the body with
/// [`find_head_end`](crate::parser::find_head_end).
pub fn parse_response_head(input: &[u8]) -> Result<ResponseHead, Error> {
    let (head, _) = split_head(input);

    let head = std::str::from_utf8(head)
        .map_err(|_| Error::MalformedStatusLine("Invalid UTF-8".to_string()))?;

    let mut lines = head.lines();
    let status_line = lines.next().ok_or(Error::EmptyRequest)?;
    if status_line.trim().is_empty() {
        return Err(Error::EmptyRequest);
    }

    // HTTP/1.1 200 OK; the reason phrase may contain spaces or be missing
    let mut parts = status_line.splitn(3, ' ');
    let (version, code) = match (parts.next(), parts.next()) {
        (Some(version), Some(code)) => (version, code),
        _ => return Err(Error::MalformedStatusLine(status_line.to_string())),
    };
    let reason = parts.next().unwrap_or_default().trim().to_string();

    let version = HttpVersion::from_str(version)?;

    if code.len() != 3 {
        return Err(Error::InvalidStatusCode(code.to_string()));
    }
    let status = code
        .parse::<u16>()
        .map_err(|_| Error::InvalidStatusCode(code.to_string()))?;

    let headers = parse_headers(lines)?;

    Ok(ResponseHead {
        version,
        status,
        reason,
        headers,
    })
}
