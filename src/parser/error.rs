//! Error types for the HTTP parser.

use thiserror::Error;

/// Ways a request or a response head can fail to parse.
#[derive(Debug, Error)]
pub enum Error {
    /// Nothing but whitespace before the blank line.
    #[error("Empty request")]
    EmptyRequest,

    #[error("Invalid HTTP method: {0}")]
    InvalidMethod(String),

    #[error("Invalid HTTP path")]
    InvalidPath,

    #[error("Invalid HTTP version: {0}")]
    InvalidVersion(String),

    /// The request line is not `METHOD target VERSION`, or the head is not UTF-8.
    #[error("Malformed request line: {0}")]
    MalformedRequestLine(String),

    /// The status line is not `VERSION code [reason]`.
    #[error("Malformed status line: {0}")]
    MalformedStatusLine(String),

    /// The status code is not three digits.
    #[error("Invalid status code: {0}")]
    InvalidStatusCode(String),

    /// A header line without a colon.
    #[error("Invalid header format")]
    InvalidHeaderFormat,

    /// Fewer body bytes arrived than `Content-Length` declared.
    #[error("Incomplete body: expected {declared} bytes, received {received}")]
    IncompleteBody { declared: usize, received: usize },

    /// A header the request needs is absent (`Host` on HTTP/1.1, or a
    /// JSON content type before decoding the body).
    #[error("Required header is missing: {0}")]
    MissingHeader(String),

    /// The body is not the JSON the caller asked for.
    #[error("Invalid JSON body: {0}")]
    JsonError(#[from] serde_json::Error),
}
