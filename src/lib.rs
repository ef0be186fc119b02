//! Typed JSON responses for HTTP handlers.
//!
//! Handlers return `Option<Response<T>>` instead of writing to the
//! connection. The adapter encodes the response as JSON with the right
//! status code, and [`extract_payload`] decodes it again on the client
//! side.
//!
//! # Features
//!
//! - `Response::ok`, `Response::bad_request` and `Response::not_found`
//! - Error responses serialize as `{"message": "..."}`
//! - Handlers returning `None` write no body of their own
//! - Registration through any caller-supplied mount function
//! - Caller address lookup via `X-Real-Ip` / `X-Forwarded-For`
//! - A small tokio HTTP/1.1 server and client to host and call handlers
//!
//! # Examples
//!
//! ## Writing a handler
//!
//! ```no_run
//! use httpreply::{add_handler, HttpServer, Method, Response, ServerConfig};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct User {
//!     id: u32,
//!     name: String,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let server = HttpServer::new(ServerConfig::default());
//!
//!     add_handler(
//!         |pattern, handler| server.mount(pattern, vec![Method::GET], handler),
//!         "/users",
//!         |req| async move {
//!             match req.get_query_param("id").map(|id| id.parse::<u32>()) {
//!                 Some(Ok(1)) => Some(Response::ok(User { id: 1, name: "Alice".to_string() })),
//!                 Some(Ok(id)) => Some(Response::not_found(format!("user {id} does not exist"))),
//!                 Some(Err(e)) => Some(Response::bad_request(e)),
//!                 None => Some(Response::bad_request("missing id")),
//!             }
//!         },
//!     )
//!     .await;
//!
//!     server.start().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Decoding on the client
//!
//! ```
//! use httpreply::client::{extract_payload, ClientResponse};
//! use httpreply::ClientError;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let ok = ClientResponse::from_bytes(b"HTTP/1.1 200 OK\r\nContent-Length: 7\r\n\r\n[1,2,3]").unwrap();
//! let numbers: Vec<u32> = extract_payload(ok).await.unwrap();
//! assert_eq!(numbers, vec![1, 2, 3]);
//!
//! let failed = ClientResponse::from_bytes(b"HTTP/1.1 400 Bad Request\r\n\r\n{\"message\":\"missing id\"}").unwrap();
//! let err = extract_payload::<Vec<u32>, _>(failed).await.unwrap_err();
//! assert!(matches!(err, ClientError::Remote { status: 400, .. }));
//! assert_eq!(err.to_string(), "missing id");
//! # }
//! ```

pub mod adapter;
pub mod client;
pub mod parser;
pub mod server;

// Re-export commonly used items for convenience
pub use adapter::{add_handler, convert, read_user_ip, write_response, ErrorResponse, Response};
pub use client::{extract_payload, Client, ClientResponse, Error as ClientError};
pub use parser::{Error as ParserError, HttpRequest, HttpVersion, Method, parse_request};
pub use server::{Error as ServerError, HandlerFn, HttpResponse, HttpServer, ServerConfig, StatusCode};
