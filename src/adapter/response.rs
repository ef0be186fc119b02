//! Typed handler responses.

use std::error::Error as StdError;
use std::fmt;

use serde::Serialize;

use crate::server::StatusCode;

/// The internal cause carried by an [`ErrorResponse`].
pub type Cause = Box<dyn StdError + Send + Sync + 'static>;

/// What a handler returns: a payload to encode, or an error to report.
///
/// Both variants know their status code and expose a serializable
/// [`Payload`] view, which is all the writer needs.
#[derive(Debug)]
pub enum Response<T> {
    Success(BasicResponse<T>),
    Error(ErrorResponse),
}

impl<T> Response<T> {
    /// `200 OK` carrying `payload`.
    pub fn ok(payload: T) -> Self {
        Response::Success(BasicResponse {
            payload,
            status: StatusCode::Ok,
        })
    }

    /// `400 Bad Request`; the message is `err.to_string()`.
    pub fn bad_request(err: impl Into<Cause>) -> Self {
        Response::Error(ErrorResponse::new(StatusCode::BadRequest, err))
    }

    /// `404 Not Found`; the message is `err.to_string()`.
    pub fn not_found(err: impl Into<Cause>) -> Self {
        Response::Error(ErrorResponse::new(StatusCode::NotFound, err))
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Response::Success(response) => response.status_code(),
            Response::Error(response) => response.status_code(),
        }
    }

    /// The value written to the wire for this response.
    pub fn payload(&self) -> Payload<'_, T> {
        match self {
            Response::Success(response) => Payload::Data(&response.payload),
            Response::Error(response) => Payload::Error(response),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Response::Success(_))
    }
}

impl<T> From<BasicResponse<T>> for Response<T> {
    fn from(response: BasicResponse<T>) -> Self {
        Response::Success(response)
    }
}

impl<T> From<ErrorResponse> for Response<T> {
    fn from(response: ErrorResponse) -> Self {
        Response::Error(response)
    }
}

/// Borrowed, serializable view of a response body.
///
/// Success payloads serialize as themselves; errors as `{"message": ...}`.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Payload<'a, T> {
    Data(&'a T),
    Error(&'a ErrorResponse),
}

impl<'a, T> Payload<'a, T> {
    /// The success payload, if this is one.
    pub fn data(&self) -> Option<&'a T> {
        match *self {
            Payload::Data(data) => Some(data),
            Payload::Error(_) => None,
        }
    }
}

/// A successful response.
#[derive(Debug, Clone, PartialEq)]
pub struct BasicResponse<T> {
    payload: T,
    status: StatusCode,
}

impl<T> BasicResponse<T> {
    pub fn status_code(&self) -> StatusCode {
        self.status
    }

    pub fn payload(&self) -> &T {
        &self.payload
    }
}

/// A failed response.
///
/// Only `message` reaches the wire. The cause stays on the server and is
/// available through [`StdError::source`].
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    message: String,
    #[serde(skip)]
    cause: Cause,
    #[serde(skip)]
    status: StatusCode,
}

impl ErrorResponse {
    pub fn new(status: StatusCode, err: impl Into<Cause>) -> Self {
        let cause = err.into();
        Self {
            message: cause.to_string(),
            cause,
            status,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn cause(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self.cause.as_ref()
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl StdError for ErrorResponse {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(self.cause.as_ref())
    }
}
