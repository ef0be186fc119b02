//! Turning typed handlers into server handlers.

use std::future::Future;
use std::sync::Arc;

use log::error;
use serde::Serialize;

use crate::adapter::response::Response;
use crate::parser::HttpRequest;
use crate::server::{HandlerFn, HandlerFuture, HttpResponse, StatusCode};

/// Convert `handler` and register it under `pattern` through `mount`.
///
/// `mount` is whatever registers a low-level handler with the hosting
/// server; its return value is passed through, so an async registration
/// can be awaited by the caller:
///
/// ```no_run
/// use httpreply::{add_handler, HttpServer, Method, Response, ServerConfig};
///
/// # async fn run() {
/// let server = HttpServer::new(ServerConfig::default());
/// add_handler(
///     |pattern, handler| server.mount(pattern, vec![Method::GET], handler),
///     "/ping",
///     |_req| async { Some(Response::ok("pong")) },
/// )
/// .await;
/// # }
/// ```
pub fn add_handler<M, R, F, Fut, T>(mount: M, pattern: impl Into<String>, handler: F) -> R
where
    M: FnOnce(String, HandlerFn) -> R,
    F: Fn(HttpRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Option<Response<T>>> + Send + 'static,
    T: Serialize + Send + 'static,
{
    mount(pattern.into(), convert(handler))
}

/// Wrap a typed handler as a low-level [`HandlerFn`].
///
/// A handler returning `None` produces no wire response at all.
pub fn convert<F, Fut, T>(handler: F) -> HandlerFn
where
    F: Fn(HttpRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Option<Response<T>>> + Send + 'static,
    T: Serialize + Send + 'static,
{
    Arc::new(move |req: HttpRequest| -> HandlerFuture {
        let fut = handler(req);
        Box::pin(async move {
            let response = fut.await;
            Ok(response.as_ref().map(write_response))
        })
    })
}

/// Encode a [`Response`] as JSON with its status code.
///
/// If the payload refuses to serialize, the result is a plain text
/// `500` carrying the serializer's message instead.
pub fn write_response<T: Serialize>(response: &Response<T>) -> HttpResponse {
    let status = response.status_code();
    match HttpResponse::new(status).with_json(&response.payload()) {
        Ok(http_response) => http_response,
        Err(e) => {
            error!("Failed to serialize {code} response: {e}", code = status.as_u16());
            HttpResponse::plain_text(StatusCode::InternalServerError, e.to_string())
        }
    }
}
