//! The seam between a connection and the application.
//!
//! A [`Handler`] turns one complete request into one response. It is called
//! synchronously from the connection task, through a shared reference, so
//! implementations must be `Send + Sync`.

use std::sync::Arc;

use bytes::Bytes;
use http::Request;

use crate::protocol::Response;

pub trait Handler: Send + Sync {
    fn call(&self, request: Request<Bytes>) -> Response;
}

impl<H: Handler + ?Sized> Handler for Arc<H> {
    fn call(&self, request: Request<Bytes>) -> Response {
        (**self).call(request)
    }
}

#[derive(Debug)]
pub struct HandlerFn<F> {
    f: F,
}

impl<F> Handler for HandlerFn<F>
where
    F: Fn(Request<Bytes>) -> Response + Send + Sync,
{
    fn call(&self, request: Request<Bytes>) -> Response {
        (self.f)(request)
    }
}

/// Wraps a plain function as a [`Handler`].
pub fn make_handler<F>(f: F) -> HandlerFn<F>
where
    F: Fn(Request<Bytes>) -> Response + Send + Sync,
{
    HandlerFn { f }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_handler_fn() {
        let handler = Arc::new(make_handler(|request: Request<Bytes>| Response::ok(request.uri().path().to_string())));
        let request = Request::builder().uri("/path").body(Bytes::new()).unwrap();

        assert_eq!(handler.call(request), Response::ok("/path"));
    }
}
