//! HTTP server hosting mounted handlers.
//!
//! This module provides a small tokio HTTP/1.1 server. It owns routing and
//! the connection lifecycle; the adapter only hands it converted handlers.

mod response;
mod config;
mod error;
mod handler;
mod http_server;

// Re-export public items
pub use response::{HttpResponse, StatusCode, JSON_CONTENT_TYPE, TEXT_CONTENT_TYPE};
pub use config::ServerConfig;
pub use error::Error;
pub use handler::{HandlerFn, HandlerFuture, Route};
pub use http_server::HttpServer;
