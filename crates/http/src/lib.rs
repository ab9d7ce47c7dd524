//! A one-request-per-connection HTTP/1.1 server core
//!
//! This crate reads a single request from a raw byte stream, hands it to a
//! [`handler::Handler`], and writes back a plain-text response in a fixed
//! layout. It is built on tokio streams and `tokio-util` codecs, with request
//! heads parsed by `httparse`.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use bare_http::connection::HttpConnection;
//! use bare_http::handler::make_handler;
//! use bare_http::protocol::Response;
//! use tokio::net::TcpListener;
//! use tracing::{info, warn};
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     let tcp_listener = TcpListener::bind("127.0.0.1:8000").await?;
//!     let handler = Arc::new(make_handler(|request: http::Request<bytes::Bytes>| {
//!         Response::ok(format!("Lets go, {}!", request.uri().path()))
//!     }));
//!
//!     loop {
//!         let (tcp_stream, _remote_addr) = match tcp_listener.accept().await {
//!             Ok(stream_and_addr) => stream_and_addr,
//!             Err(e) => {
//!                 warn!(cause = %e, "failed to accept");
//!                 continue;
//!             }
//!         };
//!
//!         let handler = handler.clone();
//!         tokio::spawn(async move {
//!             let (reader, writer) = tcp_stream.into_split();
//!             if let Err(e) = HttpConnection::new(reader, writer).process(handler).await {
//!                 info!(cause = %e, "connection abandoned");
//!             }
//!         });
//!     }
//! }
//! ```
//!
//! # Architecture
//!
//! - [`connection`]: the per-connection read, handle, respond, close sequence
//! - [`protocol`]: request, response and error types
//! - [`codec`]: the request decoder and response encoder
//! - [`handler`]: the application seam
//!
//! # Limitations
//!
//! - One request per connection, no keep-alive or pipelining
//! - No TLS, no chunked transfer encoding, no streaming bodies
//! - Maximum header size: 8KB, maximum number of headers: 64
//! - Maximum body size: 1MB

pub mod codec;
pub mod connection;
pub mod handler;
pub mod protocol;

mod utils;
pub(crate) use utils::ensure;
