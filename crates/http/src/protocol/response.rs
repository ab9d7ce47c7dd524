//! Response types.
//!
//! A response is a status plus a plain-text body. The framing headers are not
//! part of the value; [`ResponseEncoder`](crate::codec::ResponseEncoder) derives
//! them while writing.

use std::fmt;

/// The statuses this server can report.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum StatusCode {
    Ok,
    NotFound,
    MethodNotAllowed,
}

impl StatusCode {
    /// The status line as written after `HTTP/1.1 `, e.g. `404 Not Found`.
    pub fn status_line(self) -> &'static str {
        match self {
            StatusCode::Ok => "200 OK",
            StatusCode::NotFound => "404 Not Found",
            StatusCode::MethodNotAllowed => "405 Method Not Allowed",
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.status_line())
    }
}

/// A status and a text body, as produced by a handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: StatusCode,
    body: String,
}

impl Response {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(StatusCode::Ok, body)
    }

    /// 404 for an unknown path. The body text is shared with
    /// [`method_not_allowed`](Self::method_not_allowed); only the status differs.
    pub fn not_found() -> Self {
        Self::new(StatusCode::NotFound, "Method not allowed")
    }

    pub fn method_not_allowed() -> Self {
        Self::new(StatusCode::MethodNotAllowed, "Method not allowed")
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn into_parts(self) -> (StatusCode, String) {
        (self.status, self.body)
    }
}

impl From<(StatusCode, String)> for Response {
    fn from((status, body): (StatusCode, String)) -> Self {
        Self { status, body }
    }
}

impl From<(StatusCode, &str)> for Response {
    fn from((status, body): (StatusCode, &str)) -> Self {
        Self::new(status, body)
    }
}
