use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use futures::{SinkExt, StreamExt};
use http::Request;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::time::timeout;
use tokio_util::codec::{FramedRead, FramedWrite};
use tracing::debug;

use crate::codec::{RequestDecoder, ResponseEncoder};
use crate::handler::Handler;
use crate::protocol::{HttpError, ParseError, Response, SendError};

/// One accepted connection, served exactly once.
///
/// [`process`](Self::process) reads a single request, hands it to the handler,
/// writes the response and closes. A request that cannot be decoded is never
/// answered; the connection is simply dropped. Both halves of the stream are
/// owned by the connection and are released on every return path.
///
/// Without timeouts a peer that never finishes its request, or never reads the
/// response, keeps this connection's task waiting indefinitely.
///
/// # Type Parameters
///
/// * `R`: The async readable stream type
/// * `W`: The async writable stream type
#[derive(Debug)]
pub struct HttpConnection<R, W> {
    framed_read: FramedRead<R, RequestDecoder>,
    framed_write: FramedWrite<W, ResponseEncoder>,
    read_timeout: Option<Duration>,
    write_timeout: Option<Duration>,
}

impl<R, W> HttpConnection<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            framed_read: FramedRead::with_capacity(reader, RequestDecoder::new(), 8 * 1024),
            framed_write: FramedWrite::new(writer, ResponseEncoder::new()),
            read_timeout: None,
            write_timeout: None,
        }
    }

    /// Limits how long the peer may take to deliver the complete request.
    pub fn read_timeout(mut self, read_timeout: Option<Duration>) -> Self {
        self.read_timeout = read_timeout;
        self
    }

    /// Limits how long writing the response may take.
    pub fn write_timeout(mut self, write_timeout: Option<Duration>) -> Self {
        self.write_timeout = write_timeout;
        self
    }

    /// Serves the connection and closes it.
    ///
    /// Returns `Ok(())` when a response was written, and also when the peer
    /// closed the stream before sending any byte.
    pub async fn process<H>(mut self, handler: Arc<H>) -> Result<(), HttpError>
    where
        H: Handler + ?Sized,
    {
        let Some(request) = self.read_request().await? else {
            debug!("peer closed before sending a request");
            return Ok(());
        };

        debug!(method = %request.method(), path = request.uri().path(), "receive request");
        let response = handler.call(request);
        let status = response.status();

        self.write_response(response).await?;
        debug!(%status, "response sent");
        Ok(())
    }

    async fn read_request(&mut self) -> Result<Option<Request<Bytes>>, ParseError> {
        let next = match self.read_timeout {
            Some(duration) => timeout(duration, self.framed_read.next()).await.map_err(|_e| ParseError::Timeout(duration))?,
            None => self.framed_read.next().await,
        };

        next.transpose()
    }

    /// Writes the whole response with a single send, then shuts the write side
    /// down. A failed write is not retried.
    async fn write_response(&mut self, response: Response) -> Result<(), SendError> {
        let framed_write = &mut self.framed_write;
        let send = async move {
            framed_write.send(response).await?;
            framed_write.get_mut().shutdown().await.map_err(SendError::io)
        };

        match self.write_timeout {
            Some(duration) => timeout(duration, send).await.map_err(|_e| SendError::Timeout(duration))?,
            None => send.await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::make_handler;
    use tokio::io::{duplex, split, AsyncReadExt, DuplexStream};

    fn echo_handler() -> Arc<impl Handler> {
        Arc::new(make_handler(|request: Request<Bytes>| {
            if request.uri().path() == "/echo" {
                Response::ok(String::from_utf8_lossy(request.body()).into_owned())
            } else {
                Response::not_found()
            }
        }))
    }

    async fn exchange(raw_request: &[u8]) -> (Result<(), HttpError>, Vec<u8>) {
        let (mut client, server) = duplex(16 * 1024);
        client.write_all(raw_request).await.unwrap();
        client.shutdown().await.unwrap();

        let result = serve(server).await;

        let mut written = Vec::new();
        client.read_to_end(&mut written).await.unwrap();
        (result, written)
    }

    async fn serve(server: DuplexStream) -> Result<(), HttpError> {
        let (reader, writer) = split(server);
        HttpConnection::new(reader, writer).process(echo_handler()).await
    }

    #[tokio::test]
    async fn echo_body() {
        let (result, written) = exchange(b"POST /echo HTTP/1.1\r\nContent-Length: 3\r\n\r\nabc").await;

        assert!(result.is_ok());
        assert_eq!(written, b"HTTP/1.1 200 OK\r\nContent-Length: 5\r\nContent-Type: text/plain\r\n\r\nabc\r\n");
    }

    #[tokio::test]
    async fn handler_status_is_written() {
        let (result, written) = exchange(b"GET /nowhere HTTP/1.1\r\nHost: localhost\r\n\r\n").await;

        assert!(result.is_ok());
        assert!(written.starts_with(b"HTTP/1.1 404 Not Found\r\n"));
        assert!(written.ends_with(b"\r\n\r\nMethod not allowed\r\n"));
    }

    #[tokio::test]
    async fn malformed_request_writes_nothing() {
        let (result, written) = exchange(b"NOT A VALID REQUEST\r\n\r\n").await;

        assert!(matches!(result, Err(HttpError::RequestError { .. })));
        assert!(written.is_empty());
    }

    #[tokio::test]
    async fn truncated_body_writes_nothing() {
        let (result, written) = exchange(b"POST /echo HTTP/1.1\r\nContent-Length: 10\r\n\r\nabc").await;

        assert!(matches!(result, Err(HttpError::RequestError { source: ParseError::Io { .. } })));
        assert!(written.is_empty());
    }

    #[tokio::test]
    async fn silent_peer_is_not_an_error() {
        let (result, written) = exchange(b"").await;

        assert!(result.is_ok());
        assert!(written.is_empty());
    }

    #[tokio::test]
    async fn only_first_request_is_served() {
        let (result, written) =
            exchange(b"POST /echo HTTP/1.1\r\nContent-Length: 1\r\n\r\naPOST /echo HTTP/1.1\r\nContent-Length: 1\r\n\r\nb").await;

        assert!(result.is_ok());
        assert_eq!(written, b"HTTP/1.1 200 OK\r\nContent-Length: 3\r\nContent-Type: text/plain\r\n\r\na\r\n");
    }

    #[tokio::test]
    async fn same_request_same_bytes() {
        let raw = b"POST /echo HTTP/1.1\r\nContent-Length: 4\r\n\r\nping";

        let (_, first) = exchange(raw).await;
        let (_, second) = exchange(raw).await;

        assert!(!first.is_empty());
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn read_timeout_abandons_connection() {
        let (mut client, server) = duplex(1024);
        client.write_all(b"GET / HTTP/1.1\r\n").await.unwrap();

        let (reader, writer) = split(server);
        let result = HttpConnection::new(reader, writer)
            .read_timeout(Some(Duration::from_millis(50)))
            .process(echo_handler())
            .await;

        assert!(matches!(result, Err(HttpError::RequestError { source: ParseError::Timeout(_) })));

        let mut written = Vec::new();
        client.read_to_end(&mut written).await.unwrap();
        assert!(written.is_empty());
    }

    #[tokio::test]
    async fn write_timeout_when_peer_never_reads() {
        let (mut client, server) = duplex(64);
        client.write_all(b"GET / HTTP/1.1\r\n\r\n").await.unwrap();
        client.shutdown().await.unwrap();

        let large = Arc::new(make_handler(|_: Request<Bytes>| Response::ok("x".repeat(1000))));
        let (reader, writer) = split(server);
        let result = HttpConnection::new(reader, writer)
            .write_timeout(Some(Duration::from_millis(50)))
            .process(large)
            .await;

        assert!(matches!(result, Err(HttpError::ResponseError { source: SendError::Timeout(_) })));
        drop(client);
    }

    #[tokio::test]
    async fn write_to_closed_peer_fails() {
        let (mut client, server) = duplex(1024);
        client.write_all(b"GET /gone HTTP/1.1\r\n\r\n").await.unwrap();
        drop(client);

        let result = serve(server).await;

        assert!(matches!(result, Err(HttpError::ResponseError { source: SendError::Io { .. } })));
    }
}
