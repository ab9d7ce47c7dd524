//! HTTP connection handling
//!
//! - [`HttpConnection`]: drives one accepted connection through reading a
//!   single request, calling the handler, writing the response and closing

mod http_connection;

pub use http_connection::HttpConnection;
