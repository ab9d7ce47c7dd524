use std::io;
use std::net::{SocketAddr, ToSocketAddrs};
use std::sync::Arc;
use std::time::Duration;

use bare_http::connection::HttpConnection;
use bare_http::handler::Handler;
use bare_http::protocol::Response;
use bytes::Bytes;
use http::Request;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{debug, info, info_span, warn, Instrument};

use crate::router::{Dispatch, Router};

#[derive(Debug)]
pub struct ServerBuilder {
    router: Option<Router>,
    address: Option<io::Result<Vec<SocketAddr>>>,
    read_timeout: Option<Duration>,
    write_timeout: Option<Duration>,
}

impl ServerBuilder {
    fn new() -> Self {
        Self { router: None, address: None, read_timeout: None, write_timeout: None }
    }

    /// The address to listen on. Resolution errors surface from
    /// [`build`](Self::build).
    pub fn address<A: ToSocketAddrs>(mut self, address: A) -> Self {
        self.address = Some(address.to_socket_addrs().map(Iterator::collect));
        self
    }

    pub fn router(mut self, router: Router) -> Self {
        self.router = Some(router);
        self
    }

    /// Abandons connections whose request is not complete in time. Unset by
    /// default.
    pub fn read_timeout(mut self, read_timeout: Duration) -> Self {
        self.read_timeout = Some(read_timeout);
        self
    }

    /// Abandons connections whose response cannot be written in time. Unset by
    /// default.
    pub fn write_timeout(mut self, write_timeout: Duration) -> Self {
        self.write_timeout = Some(write_timeout);
        self
    }

    pub fn build(self) -> Result<Server, ServerBuildError> {
        let router = self.router.ok_or(ServerBuildError::MissingRouter)?;
        let address = self.address.ok_or(ServerBuildError::MissingAddress)?.map_err(|source| ServerBuildError::InvalidAddress { source })?;
        if address.is_empty() {
            return Err(ServerBuildError::InvalidAddress { source: io::Error::new(io::ErrorKind::NotFound, "address resolved to nothing") });
        }

        Ok(Server { router, address, read_timeout: self.read_timeout, write_timeout: self.write_timeout })
    }
}

/// Serves a [`Router`] over TCP, one task and one request per connection.
#[derive(Debug)]
pub struct Server {
    router: Router,
    address: Vec<SocketAddr>,
    read_timeout: Option<Duration>,
    write_timeout: Option<Duration>,
}

#[derive(Error, Debug)]
pub enum ServerBuildError {
    #[error("router must be set")]
    MissingRouter,
    #[error("address must be set")]
    MissingAddress,
    #[error("invalid address: {source}")]
    InvalidAddress { source: io::Error },
}

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("bind server at {address:?} error: {source}")]
    Bind { address: Vec<SocketAddr>, source: io::Error },
}

impl Server {
    pub fn builder() -> ServerBuilder {
        ServerBuilder::new()
    }

    pub fn address(&self) -> &[SocketAddr] {
        &self.address
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Binds the configured address and serves until the process ends.
    ///
    /// Only a failed bind returns.
    pub async fn start(self) -> Result<(), ServerError> {
        info!("start listening at {:?}", self.address);
        let tcp_listener = match TcpListener::bind(self.address.as_slice()).await {
            Ok(tcp_listener) => tcp_listener,
            Err(source) => return Err(ServerError::Bind { address: self.address, source }),
        };

        self.serve(tcp_listener).await;
        Ok(())
    }

    /// Runs the accept loop on `tcp_listener`, spawning a task per connection.
    ///
    /// A failed accept is logged and skipped.
    pub async fn serve(self, tcp_listener: TcpListener) {
        let server = Arc::new(self);
        loop {
            let (tcp_stream, remote_addr) = match tcp_listener.accept().await {
                Ok(stream_and_addr) => stream_and_addr,
                Err(e) => {
                    warn!(cause = %e, "failed to accept");
                    continue;
                }
            };

            let server = Arc::clone(&server);
            let span = info_span!("connection", %remote_addr);

            tokio::spawn(
                async move {
                    let (reader, writer) = tcp_stream.into_split();
                    let connection = HttpConnection::new(reader, writer)
                        .read_timeout(server.read_timeout)
                        .write_timeout(server.write_timeout);

                    match connection.process(server).await {
                        Ok(()) => debug!("finished process, connection shutdown"),
                        Err(e) => warn!(cause = %e, "connection abandoned"),
                    }
                }
                .instrument(span),
            );
        }
    }
}

impl Handler for Server {
    fn call(&self, request: Request<Bytes>) -> Response {
        let path = request.uri().path();

        match self.router.dispatch(path, request.method()) {
            Dispatch::Found(handler) => handler.invoke(&request),
            Dispatch::NotFound => {
                debug!(path, "no route for path");
                Response::not_found()
            }
            Dispatch::MethodNotAllowed => {
                debug!(path, method = %request.method(), allowed = ?self.router.allowed_methods(path), "method not allowed");
                Response::method_not_allowed()
            }
        }
    }
}
