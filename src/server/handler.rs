//! Low-level handlers and the route table entry that holds them.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::parser::{HttpRequest, Method};
use crate::server::{HttpResponse, Error};

/// Future returned by a low-level handler.
///
/// `Ok(None)` means the handler produced no response of its own; the
/// server answers with an empty `200`.
pub type HandlerFuture = Pin<Box<dyn Future<Output = Result<Option<HttpResponse>, Error>> + Send>>;

/// A low-level handler: takes the parsed request, yields what to write.
pub type HandlerFn = Arc<dyn Fn(HttpRequest) -> HandlerFuture + Send + Sync>;

/// A mounted route.
pub struct Route {
    /// The path to match, without query string.
    pub path: String,
    /// The HTTP methods to match.
    pub methods: Vec<Method>,
    /// The handler function.
    pub handler: HandlerFn,
}
