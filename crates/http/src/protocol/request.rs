//! HTTP request header handling.
//!
//! The decoder produces a [`RequestHeader`] first and attaches the buffered body
//! once all of it has arrived.

use http::{HeaderMap, Method, Request, Uri, Version};

/// The head of a request: method, URI, version and headers.
#[derive(Debug)]
pub struct RequestHeader {
    inner: Request<()>,
}

impl RequestHeader {
    /// Attaches a body to this header, converting it into a full `Request<T>`.
    pub fn body<T>(self, body: T) -> Request<T> {
        self.inner.map(|()| body)
    }

    pub fn method(&self) -> &Method {
        self.inner.method()
    }

    pub fn uri(&self) -> &Uri {
        self.inner.uri()
    }

    pub fn version(&self) -> Version {
        self.inner.version()
    }

    pub fn headers(&self) -> &HeaderMap {
        self.inner.headers()
    }
}

impl From<Request<()>> for RequestHeader {
    #[inline]
    fn from(inner: Request<()>) -> Self {
        Self { inner }
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;

    #[test]
    fn attach_body_keeps_head() {
        let header: RequestHeader = Request::builder()
            .method(Method::POST)
            .uri("/echo?x=1")
            .header(http::header::HOST, "localhost")
            .body(())
            .unwrap()
            .into();

        let request = header.body(Bytes::from_static(b"abc"));

        assert_eq!(request.method(), &Method::POST);
        assert_eq!(request.uri().path(), "/echo");
        assert_eq!(request.uri().query(), Some("x=1"));
        assert_eq!(request.headers().len(), 1);
        assert_eq!(&request.body()[..], b"abc");
    }
}
