//! Core HTTP protocol types.
//!
//! - [`RequestHeader`]: the parsed head of a request, before its body is attached
//! - [`PayloadSize`]: how many body bytes the head announced
//! - [`StatusCode`] and [`Response`]: what a handler hands back
//! - [`HttpError`], [`ParseError`], [`SendError`]: connection, decoding and
//!   writing failures
//!
//! Requests reach handlers as `http::Request<bytes::Bytes>` with the whole body
//! buffered.

mod payload;
pub use payload::PayloadSize;

mod request;
pub use request::RequestHeader;

mod response;
pub use response::Response;
pub use response::StatusCode;

mod error;
pub use error::HttpError;
pub use error::ParseError;
pub use error::SendError;
