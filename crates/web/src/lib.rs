//! Exact-path, per-method routing served over raw TCP.
//!
//! Routes are registered on a [`Router`] before the server starts. Each
//! accepted connection carries one request, which is dispatched on its path
//! and method:
//!
//! - unknown path: `404 Not Found`
//! - known path, unregistered method: `405 Method Not Allowed`
//! - otherwise the registered [`RequestHandler`] answers
//!
//! ```no_run
//! use bare_web::router::{get, post};
//! use bare_web::{Response, Router, Server, StatusCode};
//! use bytes::Bytes;
//! use http::Request;
//!
//! #[tokio::main]
//! async fn main() {
//!     let router = Router::builder()
//!         .route("/", get(|_: &Request<Bytes>| (StatusCode::Ok, "hello")))
//!         .route("/echo", post(|req: &Request<Bytes>| Response::ok(String::from_utf8_lossy(req.body()).into_owned())))
//!         .build();
//!
//!     let server = Server::builder().router(router).address("0.0.0.0:8000").build().unwrap();
//!     server.start().await.unwrap();
//! }
//! ```

mod handler;
mod method;
mod server;

pub mod router;

pub use bare_http::protocol::{Response, StatusCode};
pub use handler::RequestHandler;
pub use method::{Method, UnknownMethod};
pub use router::{Dispatch, Router};
pub use server::{Server, ServerBuildError, ServerBuilder, ServerError};
