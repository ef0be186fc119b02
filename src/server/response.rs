//! HTTP response types and utilities.

use std::collections::HashMap;
use serde::Serialize;

/// Content type written for every JSON body.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Content type written for plain text error bodies.
pub const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Status codes this crate writes, with their reason phrases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    Ok = 200,
    BadRequest = 400,
    NotFound = 404,
    MethodNotAllowed = 405,
    InternalServerError = 500,
    ServiceUnavailable = 503,
}

const STATUS_TABLE: [(StatusCode, &str); 6] = [
    (StatusCode::Ok, "OK"),
    (StatusCode::BadRequest, "Bad Request"),
    (StatusCode::NotFound, "Not Found"),
    (StatusCode::MethodNotAllowed, "Method Not Allowed"),
    (StatusCode::InternalServerError, "Internal Server Error"),
    (StatusCode::ServiceUnavailable, "Service Unavailable"),
];

impl StatusCode {
    pub fn reason_phrase(&self) -> &'static str {
        STATUS_TABLE
            .iter()
            .find_map(|(status, reason)| (status == self).then_some(*reason))
            .unwrap_or_default()
    }

    pub fn as_u16(&self) -> u16 {
        *self as u16
    }

    /// Look up a status code by number; `None` for codes not listed above.
    pub fn from_u16(code: u16) -> Option<Self> {
        STATUS_TABLE
            .iter()
            .map(|(status, _)| *status)
            .find(|status| status.as_u16() == code)
    }
}

/// A response ready to be written to the connection.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// An empty response carrying only the `Server` header.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: HashMap::from([("Server".to_string(), "httpreply".to_string())]),
            body: Vec::new(),
        }
    }

    /// Plain text error response, in the shape the adapter and the server
    /// use for failures they answer themselves.
    pub fn plain_text(status: StatusCode, message: impl Into<String>) -> Self {
        Self::new(status)
            .with_content_type(TEXT_CONTENT_TYPE)
            .with_header("X-Content-Type-Options", "nosniff")
            .with_body_string(message)
    }

    pub fn with_body_string(self, body: impl Into<String>) -> Self {
        self.with_body_bytes(body.into().into_bytes())
    }

    /// Replace the body and keep `Content-Length` in step with it.
    pub fn with_body_bytes(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        let len = self.body.len();
        self.with_header("Content-Length", len.to_string())
    }

    /// Add or replace a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Set the content type.
    pub fn with_content_type(self, content_type: impl Into<String>) -> Self {
        self.with_header("Content-Type", content_type)
    }

    /// Serialize `value` as the JSON body.
    ///
    /// The serializer's error is handed back untouched so callers can
    /// report its message verbatim.
    pub fn with_json<T: Serialize + ?Sized>(self, value: &T) -> Result<Self, serde_json::Error> {
        let json = serde_json::to_vec(value)?;
        Ok(self
            .with_content_type(JSON_CONTENT_TYPE)
            .with_body_bytes(json))
    }

    /// Serialize as an HTTP/1.1 message: status line, headers, blank line, body.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut head = format!("HTTP/1.1 {} {}\r\n", self.status.as_u16(), self.status.reason_phrase());
        for (name, value) in &self.headers {
            head.push_str(name);
            head.push_str(": ");
            head.push_str(value);
            head.push_str("\r\n");
        }
        head.push_str("\r\n");

        let mut bytes = head.into_bytes();
        bytes.extend_from_slice(&self.body);
        bytes
    }
}
