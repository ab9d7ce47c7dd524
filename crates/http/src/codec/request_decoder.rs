//! HTTP request decoder
//!
//! Decodes one complete request, head and body, from a byte stream. The head
//! is parsed by [`HeaderDecoder`]; the body is then buffered by
//! [`LengthDecoder`] until all `Content-Length` bytes have arrived.
//!
//! # Example
//!
//! ```no_run
//! use bare_http::codec::RequestDecoder;
//! use tokio_util::codec::Decoder;
//! use bytes::BytesMut;
//!
//! let mut decoder = RequestDecoder::new();
//! let mut buffer = BytesMut::from(&b"GET / HTTP/1.1\r\n\r\n"[..]);
//! let request = decoder.decode(&mut buffer);
//! ```

use std::io;

use bytes::{Bytes, BytesMut};
use http::Request;
use tokio_util::codec::Decoder;

use crate::codec::body::LengthDecoder;
use crate::codec::header::HeaderDecoder;
use crate::ensure;
use crate::protocol::{ParseError, RequestHeader};

/// Maximum request body accepted, in bytes
const MAX_BODY_BYTES: u64 = 1024 * 1024;

/// A decoder that yields requests with their whole body attached.
///
/// `pending` holds a parsed head while its body is still arriving.
#[derive(Debug)]
pub struct RequestDecoder {
    header_decoder: HeaderDecoder,
    pending: Option<(RequestHeader, LengthDecoder)>,
}

impl RequestDecoder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for RequestDecoder {
    fn default() -> Self {
        Self { header_decoder: HeaderDecoder, pending: None }
    }
}

impl Decoder for RequestDecoder {
    type Item = Request<Bytes>;
    type Error = ParseError;

    /// # Returns
    ///
    /// - `Ok(Some(request))`: a complete request, body included
    /// - `Ok(None)`: need more data to proceed
    /// - `Err(_)`: the bytes are not a request this server accepts
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if self.pending.is_none() {
            let Some((header, payload_size)) = self.header_decoder.decode(src)? else {
                return Ok(None);
            };

            let length = payload_size.len();
            ensure!(length <= MAX_BODY_BYTES, ParseError::too_large_body(length, MAX_BODY_BYTES));
            let length = usize::try_from(length).map_err(|_e| ParseError::too_large_body(length, MAX_BODY_BYTES))?;

            self.pending = Some((header, LengthDecoder::new(length)));
        }

        let Some((header, mut body_decoder)) = self.pending.take() else {
            return Ok(None);
        };

        match body_decoder.decode(src)? {
            Some(body) => Ok(Some(header.body(body))),
            None => {
                self.pending = Some((header, body_decoder));
                Ok(None)
            }
        }
    }

    /// A stream that ends part way through a request is an error, including
    /// a complete head whose body never arrived.
    fn decode_eof(&mut self, buf: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        match self.decode(buf)? {
            Some(request) => Ok(Some(request)),
            None if buf.is_empty() && self.pending.is_none() => Ok(None),
            None => Err(ParseError::io(io::Error::new(io::ErrorKind::UnexpectedEof, "stream closed mid request"))),
        }
    }
}
