//! Request head parsing.
//!
//! - [`HeaderDecoder`]: decodes the request line and header fields, enforcing
//!   size and count limits, and reports how the body is framed

mod header_decoder;

pub use header_decoder::HeaderDecoder;
