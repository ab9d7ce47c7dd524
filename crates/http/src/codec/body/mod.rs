//! Request body framing.
//!
//! - [`LengthDecoder`]: buffers a `Content-Length` body until it is complete

mod length_decoder;

pub use length_decoder::LengthDecoder;
