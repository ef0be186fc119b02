//! Error types for the client side.

use thiserror::Error;

use crate::parser::Error as ParserError;

/// Errors that can occur while fetching or decoding a response.
#[derive(Debug, Error)]
pub enum Error {
    /// Connecting or writing the request failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The response head could not be parsed.
    #[error("Parse error: {0}")]
    Parse(#[from] ParserError),

    /// The connection closed before a complete response head arrived.
    #[error("Connection closed before the response head was complete")]
    IncompleteHead,

    /// Reading the response body failed.
    #[error("Failed to read response body: {0}")]
    Body(#[source] std::io::Error),

    /// The server answered with an error response; `message` is what the
    /// handler's error displayed as.
    #[error("{message}")]
    Remote { status: u16, message: String },

    /// A non-200 body that is not `{"message": ...}`. The raw body is kept.
    #[error("Malformed error body for status {status}: {source}")]
    MalformedErrorBody {
        status: u16,
        body: String,
        source: serde_json::Error,
    },

    /// A 200 body that does not decode as the expected type.
    #[error("Failed to decode payload: {0}")]
    Decode(#[source] serde_json::Error),

    /// The request body could not be encoded.
    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),
}

impl Error {
    /// The HTTP status behind a remote or malformed error response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Remote { status, .. } | Error::MalformedErrorBody { status, .. } => Some(*status),
            _ => None,
        }
    }
}
