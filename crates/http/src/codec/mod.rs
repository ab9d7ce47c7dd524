//! Encoding and decoding of HTTP messages on a byte stream
//!
//! - Request side:
//!   - [`RequestDecoder`]: decodes one complete request
//!   - Head parsing via the `header` module
//!   - Body buffering via the `body` module
//!
//! - Response side:
//!   - [`ResponseEncoder`]: writes the fixed plain-text response layout
//!
//! Both plug into `tokio_util::codec::{FramedRead, FramedWrite}`.

mod body;
mod header;
mod request_decoder;
mod response_encoder;

pub use request_decoder::RequestDecoder;
pub use response_encoder::ResponseEncoder;
