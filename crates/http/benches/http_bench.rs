use std::hint::black_box;
use std::io;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use bare_http::codec::{RequestDecoder, ResponseEncoder};
use bare_http::connection::HttpConnection;
use bare_http::handler::make_handler;
use bare_http::protocol::Response;
use bytes::{Bytes, BytesMut};
use criterion::{criterion_group, criterion_main, Criterion};
use http::Request;
use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};
use tokio_util::codec::{Decoder, Encoder};

const ECHO_REQUEST: &[u8] = b"POST /echo HTTP/1.1\r\nHost: localhost\r\nContent-Length: 12\r\n\r\nHello World!";

/// Reads from a fixed buffer, discards writes.
struct MockIO {
    read_data: &'static [u8],
    read_pos: usize,
}

impl MockIO {
    fn new(read_data: &'static [u8]) -> Self {
        Self { read_data, read_pos: 0 }
    }
}

impl AsyncRead for MockIO {
    fn poll_read(mut self: Pin<&mut Self>, _cx: &mut Context<'_>, buf: &mut ReadBuf<'_>) -> Poll<io::Result<()>> {
        let remaining = &self.read_data[self.read_pos..];
        let amt = std::cmp::min(remaining.len(), buf.remaining());
        buf.put_slice(&remaining[..amt]);
        self.read_pos += amt;
        Poll::Ready(Ok(()))
    }
}

struct Sink;

impl AsyncWrite for Sink {
    fn poll_write(self: Pin<&mut Self>, _cx: &mut Context<'_>, buf: &[u8]) -> Poll<Result<usize, io::Error>> {
        Poll::Ready(Ok(buf.len()))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), io::Error>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), io::Error>> {
        Poll::Ready(Ok(()))
    }
}

fn echo(request: Request<Bytes>) -> Response {
    Response::ok(String::from_utf8_lossy(request.body()).into_owned())
}

fn bench_request_decoder(c: &mut Criterion) {
    c.bench_function("decode_echo_request", |b| {
        b.iter(|| {
            let mut decoder = RequestDecoder::new();
            let mut bytes = BytesMut::from(ECHO_REQUEST);
            black_box(decoder.decode(&mut bytes).unwrap());
        });
    });
}

fn bench_response_encoder(c: &mut Criterion) {
    let response = Response::ok("Hello World!");

    c.bench_function("encode_ok_response", |b| {
        b.iter(|| {
            let mut bytes = BytesMut::new();
            ResponseEncoder::new().encode(response.clone(), &mut bytes).unwrap();
            black_box(bytes);
        });
    });
}

fn bench_http_connection(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let handler = Arc::new(make_handler(echo));

    c.bench_function("process_echo_request", |b| {
        b.to_async(&runtime).iter(|| {
            let handler = Arc::clone(&handler);
            async move {
                let connection = HttpConnection::new(MockIO::new(ECHO_REQUEST), Sink);
                connection.process(handler).await.unwrap();
            }
        });
    });
}

criterion_group!(benches, bench_request_decoder, bench_response_encoder, bench_http_connection);
criterion_main!(benches);
