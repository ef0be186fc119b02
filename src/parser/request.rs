//! Request line, headers and body of an incoming request.

use std::collections::HashMap;
use std::str::FromStr;
use serde::de::DeserializeOwned;

use crate::parser::error::Error;
use crate::parser::head::{header_value, parse_headers, split_head};
use crate::parser::method::Method;
use crate::parser::version::HttpVersion;

/// A parsed request as handed to handlers.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    /// Request target exactly as sent, query string included.
    pub path: String,
    pub version: HttpVersion,
    /// Header names keep the case they arrived with; look them up through
    /// [`HttpRequest::get_header`].
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
    /// Split out of `path` on construction.
    pub query_params: HashMap<String, String>,
    /// Peer address as `ip:port`, empty when the transport did not report one.
    pub remote_addr: String,
}

impl HttpRequest {
    /// Build a bodiless request; query parameters are split out of `path`.
    pub fn new(
        method: Method,
        path: impl Into<String>,
        version: HttpVersion,
        headers: HashMap<String, String>,
    ) -> Self {
        let path = path.into();
        Self {
            query_params: parse_query(&path),
            method,
            path,
            version,
            headers,
            body: Vec::new(),
            remote_addr: String::new(),
        }
    }

    /// Replace the body.
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Attach the peer address the request arrived from.
    pub fn with_remote_addr(mut self, addr: impl Into<String>) -> Self {
        self.remote_addr = addr.into();
        self
    }

    /// The path without its query string, used for route matching.
    pub fn route_path(&self) -> &str {
        self.path.split_once('?').map_or(self.path.as_str(), |(path, _)| path)
    }

    /// Header value by case-insensitive name.
    pub fn get_header(&self, name: &str) -> Option<&String> {
        header_value(&self.headers, name)
    }

    pub fn has_header(&self, name: &str) -> bool {
        self.get_header(name).is_some()
    }

    /// Decode the body as JSON.
    ///
    /// Fails with [`Error::MissingHeader`] unless the request declares an
    /// `application/json` content type.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, Error> {
        if !self.is_json() {
            return Err(Error::MissingHeader("Content-Type: application/json".to_string()));
        }
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// `true` when `Content-Type` names `application/json`, with or without parameters.
    pub fn is_json(&self) -> bool {
        self.get_header("Content-Type")
            .is_some_and(|content_type| content_type.starts_with("application/json"))
    }

    pub fn get_query_param(&self, name: &str) -> Option<&String> {
        self.query_params.get(name)
    }

    pub fn has_query_param(&self, name: &str) -> bool {
        self.query_params.contains_key(name)
    }
}

/// Parse one request out of the bytes read from a connection.
///
/// Everything after the blank line is taken as the body, cut down to
/// `Content-Length` bytes when that header is present and parses. A body
/// shorter than declared is an error rather than a truncated request.
pub fn parse_request(input: &[u8]) -> Result<HttpRequest, Error> {
    let (head, body) = split_head(input);

    let head = std::str::from_utf8(head)
        .map_err(|_| Error::MalformedRequestLine("Invalid UTF-8".to_string()))?;

    let mut lines = head.lines();

    let request_line = lines.next().ok_or(Error::EmptyRequest)?;
    if request_line.trim().is_empty() {
        return Err(Error::EmptyRequest);
    }

    let (method, path, version) = match request_line.split_whitespace().collect::<Vec<_>>()[..] {
        [method, path, version] => (method, path, version),
        _ => return Err(Error::MalformedRequestLine(request_line.to_string())),
    };

    let method = Method::from_str(method)?;
    if path.is_empty() {
        return Err(Error::InvalidPath);
    }
    let version = HttpVersion::from_str(version)?;

    let headers = parse_headers(lines)?;

    // HTTP/1.1 requires a Host header
    if version == HttpVersion::Http11 && header_value(&headers, "Host").is_none() {
        return Err(Error::MissingHeader("Host".to_string()));
    }

    let body = match header_value(&headers, "Content-Length").and_then(|len| len.parse::<usize>().ok()) {
        Some(declared) if declared > body.len() => {
            return Err(Error::IncompleteBody {
                declared,
                received: body.len(),
            });
        }
        Some(declared) => &body[..declared],
        None => body,
    };

    Ok(HttpRequest::new(method, path, version, headers).with_body(body))
}

/// `a=1&flag&b=` → `{a: "1", flag: "", b: ""}`. Values are not percent-decoded.
fn parse_query(path: &str) -> HashMap<String, String> {
    let Some((_, query)) = path.split_once('?') else {
        return HashMap::new();
    };

    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (key.to_string(), value.to_string())
        })
        .collect()
}
