//! Responses as seen by a client.

use std::collections::HashMap;
use std::io::Cursor;
use tokio::io::{AsyncRead, AsyncReadExt, Chain, Take};

use crate::client::error::Error;
use crate::parser::{find_head_end, header_value, parse_response_head};
use crate::server::StatusCode;

/// Body reader returned by [`read_response`]: bytes already buffered with
/// the head, then the rest of the stream, capped at `Content-Length`.
pub type ResponseBody<S> = Take<Chain<Cursor<Vec<u8>>, S>>;

/// A received response whose body has not been read yet.
#[derive(Debug)]
pub struct ClientResponse<B> {
    /// The numeric status code
    pub status: u16,
    /// The HTTP headers
    pub headers: HashMap<String, String>,
    /// The body reader
    pub body: B,
}

impl<B> ClientResponse<B> {
    pub fn new(status: u16, headers: HashMap<String, String>, body: B) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Get a header value (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&String> {
        header_value(&self.headers, name)
    }

    /// The status as a known [`StatusCode`], if it is one.
    pub fn status_code(&self) -> Option<StatusCode> {
        StatusCode::from_u16(self.status)
    }
}

impl ClientResponse<Cursor<Vec<u8>>> {
    /// Build a response from a complete, already buffered message.
    pub fn from_bytes(message: &[u8]) -> Result<Self, Error> {
        let head_end = find_head_end(message).ok_or(Error::IncompleteHead)?;
        let head = parse_response_head(&message[..head_end])?;

        let mut body = message[head_end..].to_vec();
        if let Some(len) = head.content_length() {
            body.truncate(usize::try_from(len).unwrap_or(usize::MAX));
        }

        Ok(Self::new(head.status, head.headers, Cursor::new(body)))
    }
}

/// Read a response head from `stream`, leaving the body unread.
pub async fn read_response<S>(mut stream: S) -> Result<ClientResponse<ResponseBody<S>>, Error>
where
    S: AsyncRead + Unpin,
{
    let mut buf = Vec::with_capacity(1024);
    let mut chunk = [0u8; 1024];

    let head_end = loop {
        if let Some(end) = find_head_end(&buf) {
            break end;
        }

        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            return Err(Error::IncompleteHead);
        }
        buf.extend_from_slice(&chunk[..n]);
    };

    let head = parse_response_head(&buf[..head_end])?;
    let limit = head.content_length().unwrap_or(u64::MAX);

    let rest = buf.split_off(head_end);
    let body = Cursor::new(rest).chain(stream).take(limit);

    Ok(ClientResponse::new(head.status, head.headers, body))
}
