//! Error types for the HTTP server.

use thiserror::Error;

use crate::parser::{Error as ParserError, Method};

/// Why a connection ended without a handler's response being written.
///
/// Every variant except `Io` has already been answered on the wire by the
/// time it is returned.
#[derive(Debug, Error)]
pub enum Error {
    /// The request did not parse; answered `400`.
    #[error("Bad request: {0}")]
    Parse(#[from] ParserError),

    /// Socket failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No route is mounted at the path; answered `404`.
    #[error("No route for {0}")]
    RouteNotFound(String),

    /// A route exists but not for this method; answered `405`.
    #[error("{0} is not allowed on {1}")]
    MethodNotAllowed(Method, String),

    /// The handler failed; answered `500`.
    #[error("Handler failed: {0}")]
    Handler(String),
}
