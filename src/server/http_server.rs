//! HTTP server implementation.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{RwLock, Semaphore};
use tokio::task::JoinSet;
use log::{debug, info, warn, error};

use crate::parser::{declared_body_length, find_head_end, HttpRequest, Method, parse_request};
use crate::server::config::ServerConfig;
use crate::server::error::Error;
use crate::server::handler::{HandlerFn, HandlerFuture, Route};
use crate::server::response::{HttpResponse, StatusCode};

/// How long shutdown waits for in-flight connections.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(30);

/// Pause after a failed `accept` before trying again.
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// An HTTP server.
pub struct HttpServer {
    /// The server configuration.
    pub config: ServerConfig,
    /// Mounted routes, matched in registration order.
    pub routes: Arc<RwLock<Vec<Route>>>,
}

impl HttpServer {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            routes: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Mount a prebuilt low-level handler.
    ///
    /// This is the registration function handed to
    /// [`add_handler`](crate::adapter::add_handler).
    pub async fn mount(&self, path: impl Into<String>, methods: Vec<Method>, handler: HandlerFn) {
        let path = path.into();
        debug!("Mounting {path}");
        self.routes.write().await.push(Route {
            path,
            methods,
            handler,
        });
    }

    /// Add a route whose handler always produces a response.
    pub async fn add_route<F, Fut>(&self, path: impl Into<String>, methods: Vec<Method>, handler: F)
    where
        F: Fn(HttpRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<HttpResponse, Error>> + Send + 'static,
    {
        let handler: HandlerFn = Arc::new(move |req: HttpRequest| -> HandlerFuture {
            let fut = handler(req);
            Box::pin(async move { fut.await.map(Some) })
        });

        self.mount(path, methods, handler).await;
    }

    async fn log_routes(&self) {
        info!("\n{}", include_str!("../banner.txt"));

        let routes = self.routes.read().await;
        info!("Registered endpoints:");
        for route in routes.iter() {
            let methods = route.methods.iter()
                .map(Method::as_str)
                .collect::<Vec<&str>>()
                .join(", ");
            info!("  {methods} {}", route.path);
        }
    }

    /// Bind to the configured address and serve until shutdown.
    pub async fn start(&self) -> Result<(), Error> {
        let listener = TcpListener::bind(self.config.addr).await?;
        self.serve(listener).await
    }

    /// Serve connections from an already bound listener.
    ///
    /// Returns after Ctrl+C or a fatal accept error, once in-flight
    /// connections have drained. Failures on a single connection are logged
    /// and never stop the server.
    pub async fn serve(&self, listener: TcpListener) -> Result<(), Error> {
        self.log_routes().await;
        info!("Server listening on http://{addr}", addr = listener.local_addr()?);

        let semaphore = Arc::new(Semaphore::new(self.config.max_connections));
        let mut connections: JoinSet<Result<(), Error>> = JoinSet::new();
        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        loop {
            tokio::select! {
                signal = &mut ctrl_c => {
                    match signal {
                        Ok(()) => info!("Received Ctrl+C, initiating graceful shutdown"),
                        Err(e) => error!("Error listening for Ctrl+C: {e}"),
                    }
                    break;
                }

                // Reap finished connections; their errors were logged by the task
                Some(finished) = connections.join_next(), if !connections.is_empty() => {
                    if let Err(e) = finished {
                        error!("Connection task failed: {e}");
                    }
                }

                accepted = listener.accept() => match accepted {
                    Ok((socket, addr)) => {
                        self.spawn_connection(&mut connections, &semaphore, socket, addr);
                    }
                    Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {
                        error!("Critical error accepting connection, shutting down: {e}");
                        break;
                    }
                    Err(e) => {
                        error!("Error accepting connection: {e}");
                        tokio::time::sleep(ACCEPT_BACKOFF).await;
                    }
                },
            }
        }

        Self::drain(&mut connections).await;
        Ok(())
    }

    fn spawn_connection(
        &self,
        connections: &mut JoinSet<Result<(), Error>>,
        semaphore: &Arc<Semaphore>,
        mut socket: TcpStream,
        addr: SocketAddr,
    ) {
        let permit = semaphore.clone().try_acquire_owned();
        let routes = self.routes.clone();
        let read_buffer_size = self.config.read_buffer_size;

        connections.spawn(async move {
            // Held for the lifetime of the connection
            let _permit = match permit {
                Ok(permit) => permit,
                Err(_) => {
                    warn!("Connection limit reached, rejecting connection from {addr}");
                    let response = HttpResponse::plain_text(
                        StatusCode::ServiceUnavailable,
                        "Server is at capacity, please try again later",
                    );
                    let _ = socket.write_all(&response.to_bytes()).await;
                    return Ok(());
                }
            };

            let result = Self::handle_connection(&mut socket, Some(addr), routes, read_buffer_size).await;
            match &result {
                Err(Error::Io(e)) => warn!("Connection from {addr} dropped: {e}"),
                Err(e) => debug!("Request from {addr} rejected: {e}"),
                Ok(()) => {}
            }
            result
        });
    }

    async fn drain(connections: &mut JoinSet<Result<(), Error>>) {
        info!("Waiting for {len} active connections to complete...", len = connections.len());
        let drained = tokio::time::timeout(DRAIN_TIMEOUT, async {
            while let Some(finished) = connections.join_next().await {
                if let Err(e) = finished {
                    error!("Connection task failed during shutdown: {e}");
                }
            }
        })
        .await;

        if drained.is_err() {
            warn!("Shutdown timed out with {len} connections still open", len = connections.len());
        }
        info!("Server shutdown complete");
    }

    /// Serve one request on `socket`.
    ///
    /// `remote_addr` is recorded on the request as the raw peer address.
    /// Routing failures are answered on the wire and also returned. A
    /// handler that yields no response is answered with an empty `200`.
    pub async fn handle_connection(
        socket: &mut (impl AsyncRead + AsyncWrite + Unpin),
        remote_addr: Option<SocketAddr>,
        routes: Arc<RwLock<Vec<Route>>>,
        read_buffer_size: usize,
    ) -> Result<(), Error> {
        let buf = Self::read_request(socket, read_buffer_size).await?;
        if buf.is_empty() {
            return Ok(());
        }

        let request = match parse_request(&buf) {
            Ok(request) => request,
            Err(e) => {
                let response = HttpResponse::plain_text(
                    StatusCode::BadRequest,
                    format!("Error parsing request: {e}"),
                );
                socket.write_all(&response.to_bytes()).await?;
                return Err(Error::Parse(e));
            }
        };
        let request = match remote_addr {
            Some(addr) => request.with_remote_addr(addr.to_string()),
            None => request,
        };

        let handler = match Self::resolve(&routes, &request).await {
            Ok(handler) => handler,
            Err((response, e)) => {
                socket.write_all(&response.to_bytes()).await?;
                return Err(e);
            }
        };

        let path = request.path.clone();
        match handler(request).await {
            Ok(Some(response)) => socket.write_all(&response.to_bytes()).await?,
            Ok(None) => {
                debug!("Handler for {path} produced no response, answering with an empty 200");
                let response = HttpResponse::new(StatusCode::Ok).with_body_bytes(Vec::new());
                socket.write_all(&response.to_bytes()).await?;
            }
            Err(e) => {
                let response = HttpResponse::plain_text(
                    StatusCode::InternalServerError,
                    format!("Internal server error: {e}"),
                );
                socket.write_all(&response.to_bytes()).await?;
                return Err(e);
            }
        }

        Ok(())
    }

    /// Buffer one request: the head, then the body `Content-Length` declares.
    ///
    /// Stops early at end of stream or once `limit` bytes are buffered, so a
    /// short body reaches the parser as it is and is rejected there. Empty
    /// when the peer closed without sending anything.
    async fn read_request(
        socket: &mut (impl AsyncRead + Unpin),
        limit: usize,
    ) -> Result<Vec<u8>, Error> {
        let mut buf = Vec::new();
        let mut chunk = vec![0; limit.clamp(1, 8192)];

        loop {
            let wanted = match find_head_end(&buf) {
                Some(end) => end.saturating_add(declared_body_length(&buf[..end])),
                None => limit,
            };
            if buf.len() >= wanted.min(limit) {
                return Ok(buf);
            }

            let n = socket.read(&mut chunk).await?;
            if n == 0 {
                return Ok(buf);
            }
            buf.extend_from_slice(&chunk[..n]);
        }
    }

    /// Find the handler for `request`, or the response explaining why there is none.
    async fn resolve(
        routes: &RwLock<Vec<Route>>,
        request: &HttpRequest,
    ) -> Result<HandlerFn, (HttpResponse, Error)> {
        let path = request.route_path();
        let routes = routes.read().await;
        let matching: Vec<&Route> = routes.iter().filter(|route| route.path == path).collect();

        if matching.is_empty() {
            let response = HttpResponse::plain_text(StatusCode::NotFound, format!("Not found: {path}"));
            return Err((response, Error::RouteNotFound(path.to_string())));
        }

        if let Some(route) = matching.iter().find(|route| route.methods.contains(&request.method)) {
            return Ok(route.handler.clone());
        }

        let allowed = matching
            .iter()
            .flat_map(|route| route.methods.iter().map(Method::as_str))
            .collect::<Vec<&str>>()
            .join(", ");
        let response = HttpResponse::plain_text(
            StatusCode::MethodNotAllowed,
            format!(
                "Method {method} not allowed for path: {path}. Allowed methods: {allowed}",
                method = request.method,
            ),
        )
        .with_header("Allow", allowed);

        Err((response, Error::MethodNotAllowed(request.method, path.to_string())))
    }
}
