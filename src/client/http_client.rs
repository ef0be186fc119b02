//! A minimal one-request-per-connection HTTP client.

use std::fmt::Write as _;
use std::net::SocketAddr;

use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;

use crate::client::error::Error;
use crate::client::extract::extract_payload;
use crate::client::response::{read_response, ClientResponse, ResponseBody};
use crate::parser::Method;
use crate::server::JSON_CONTENT_TYPE;

/// Client bound to a single server address.
///
/// Every request opens a fresh connection and asks the server to close it.
#[derive(Debug, Clone)]
pub struct Client {
    addr: SocketAddr,
}

impl Client {
    pub fn new(addr: SocketAddr) -> Self {
        Self { addr }
    }

    pub async fn get(&self, path: &str) -> Result<ClientResponse<ResponseBody<TcpStream>>, Error> {
        self.send(Method::GET, path, &[], &[]).await
    }

    /// `GET` and decode the payload in one step.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        extract_payload(self.get(path).await?).await
    }

    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        value: &T,
    ) -> Result<ClientResponse<ResponseBody<TcpStream>>, Error> {
        let body = serde_json::to_vec(value).map_err(Error::Encode)?;
        self.send(Method::POST, path, &[("Content-Type", JSON_CONTENT_TYPE)], &body)
            .await
    }

    /// Send one request and read the response head.
    ///
    /// `Host`, `Connection: close` and `Content-Length` are always set.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        headers: &[(&str, &str)],
        body: &[u8],
    ) -> Result<ClientResponse<ResponseBody<TcpStream>>, Error> {
        let mut head = format!(
            "{method} {path} HTTP/1.1\r\nHost: {host}\r\nConnection: close\r\nContent-Length: {len}\r\n",
            host = self.addr,
            len = body.len(),
        );
        for (name, value) in headers {
            let _ = write!(head, "{name}: {value}\r\n");
        }
        head.push_str("\r\n");

        let mut request = head.into_bytes();
        request.extend_from_slice(body);

        debug!("{method} http://{addr}{path}", addr = self.addr);
        let mut stream = TcpStream::connect(self.addr).await?;
        stream.write_all(&request).await?;

        read_response(stream).await
    }
}
