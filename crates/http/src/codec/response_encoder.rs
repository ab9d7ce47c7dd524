//! Response serialization.
//!
//! Every response has the same shape:
//!
//! ```text
//! HTTP/1.1 <status-line>\r\n
//! Content-Length: <decimal-byte-length-of-body>\r\n
//! Content-Type: text/plain\r\n
//! \r\n
//! <body>\r\n
//! ```
//!
//! The trailing CRLF is part of the body and is counted in `Content-Length`.

use std::fmt::Write;
use std::io;

use bytes::{BufMut, BytesMut};
use tokio_util::codec::Encoder;

use crate::protocol::{Response, SendError};

/// Terminates every response body
const BODY_TERMINATOR: &[u8] = b"\r\n";

/// Room for the status line and the two fixed headers
const INIT_HEADER_SIZE: usize = 128;

#[derive(Debug, Default)]
pub struct ResponseEncoder;

impl ResponseEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl Encoder<Response> for ResponseEncoder {
    type Error = SendError;

    fn encode(&mut self, item: Response, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let (status, body) = item.into_parts();
        let content_length = body.len() + BODY_TERMINATOR.len();

        dst.reserve(INIT_HEADER_SIZE + content_length);
        write!(
            dst,
            "HTTP/1.1 {}\r\nContent-Length: {}\r\nContent-Type: {}\r\n\r\n",
            status.status_line(),
            content_length,
            mime::TEXT_PLAIN.essence_str()
        )
        .map_err(io::Error::other)?;

        dst.put_slice(body.as_bytes());
        dst.put_slice(BODY_TERMINATOR);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::StatusCode;

    fn encode(response: Response) -> BytesMut {
        let mut dst = BytesMut::new();
        ResponseEncoder::new().encode(response, &mut dst).unwrap();
        dst
    }

    #[test]
    fn ok_response_bytes() {
        let dst = encode(Response::ok("hello"));

        assert_eq!(
            &dst[..],
            &b"HTTP/1.1 200 OK\r\nContent-Length: 7\r\nContent-Type: text/plain\r\n\r\nhello\r\n"[..]
        );
    }

    #[test]
    fn error_status_lines() {
        let dst = encode(Response::not_found());
        assert_eq!(
            &dst[..],
            &b"HTTP/1.1 404 Not Found\r\nContent-Length: 20\r\nContent-Type: text/plain\r\n\r\nMethod not allowed\r\n"[..]
        );

        let dst = encode(Response::new(StatusCode::MethodNotAllowed, "Method not allowed"));
        assert!(dst.starts_with(b"HTTP/1.1 405 Method Not Allowed\r\n"));
    }

    #[test]
    fn content_length_counts_bytes_not_chars() {
        let body = "héllo wörld";
        let dst = encode(Response::ok(body));
        let text = std::str::from_utf8(&dst).unwrap();

        let (head, framed_body) = text.split_once("\r\n\r\n").unwrap();
        let declared = head
            .lines()
            .find_map(|line| line.strip_prefix("Content-Length: "))
            .unwrap()
            .parse::<usize>()
            .unwrap();

        assert_eq!(declared, framed_body.len());
        assert_eq!(declared, body.len() + 2);
    }

    #[test]
    fn empty_body_still_framed() {
        let dst = encode(Response::ok(""));

        assert_eq!(&dst[..], &b"HTTP/1.1 200 OK\r\nContent-Length: 2\r\nContent-Type: text/plain\r\n\r\n\r\n"[..]);
    }
}
