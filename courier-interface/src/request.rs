//! Raw request handed to a transport.

use std::borrow::Cow;
use std::fmt;

use crate::body::Body;

/// HTTP method of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// PATCH
    Patch,
    /// DELETE
    Delete,
}

impl Method {
    /// The upper-case method token sent on the wire.
    pub const fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully prepared request, ready for exactly one exchange.
///
/// `uri` already carries every query parameter. Headers are kept in insertion order and may
/// repeat.
#[derive(Debug)]
pub struct Request {
    /// The HTTP method.
    pub method: Method,
    /// The absolute target URI.
    pub uri: Cow<'static, str>,
    /// Request headers, in the order they were added.
    pub headers: Vec<(Cow<'static, str>, Cow<'static, str>)>,
    /// Optional request body.
    pub body: Option<Body>,
}
