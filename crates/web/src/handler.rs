use bare_http::protocol::Response;
use bytes::Bytes;
use http::Request;

/// A route handler: computes a response for a request that matched its
/// (path, method).
///
/// Any `Fn(&Request<Bytes>) -> R` where `R: Into<Response>` is a handler, so a
/// closure returning `(StatusCode, &str)` works as is. Closures need their
/// argument type spelled out to be accepted:
///
/// ```
/// use bare_web::{Method, Router, StatusCode};
/// use bytes::Bytes;
/// use http::Request;
///
/// let mut router = Router::new();
/// router.add_route("/", Method::Get, |_: &Request<Bytes>| (StatusCode::Ok, "hello"));
/// ```
#[cfg_attr(test, mockall::automock)]
pub trait RequestHandler: Send + Sync {
    fn invoke(&self, request: &Request<Bytes>) -> Response;
}

impl<F, R> RequestHandler for F
where
    F: Fn(&Request<Bytes>) -> R + Send + Sync,
    R: Into<Response>,
{
    fn invoke(&self, request: &Request<Bytes>) -> Response {
        self(request).into()
    }
}
