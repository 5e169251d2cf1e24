//! HTTP method as a typed enum.
//!
//! Only the RFC 9110 methods are named. Anything else a client sends (WebDAV,
//! `PURGE`, typos) is kept as [`Method::Other`] so the dispatcher can still
//! answer it with the fallback route.

use std::fmt;
use std::str::FromStr;

/// An HTTP request method.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Method {
    Connect,
    Delete,
    Get,
    Head,
    Options,
    Patch,
    Post,
    Put,
    Trace,
    Other(String),
}

impl Method {
    /// Returns the uppercase wire representation (e.g. `"GET"`).
    pub fn as_str(&self) -> &str {
        match self {
            Self::Connect  => "CONNECT",
            Self::Delete   => "DELETE",
            Self::Get      => "GET",
            Self::Head     => "HEAD",
            Self::Options  => "OPTIONS",
            Self::Patch    => "PATCH",
            Self::Post     => "POST",
            Self::Put      => "PUT",
            Self::Trace    => "TRACE",
            Self::Other(s) => s,
        }
    }
}

/// Parses a method token. Case-sensitive per RFC 9110 §9.1, so `"get"` is
/// `Other("get")`, not `Get`.
impl FromStr for Method {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "CONNECT" => Self::Connect,
            "DELETE"  => Self::Delete,
            "GET"     => Self::Get,
            "HEAD"    => Self::Head,
            "OPTIONS" => Self::Options,
            "PATCH"   => Self::Patch,
            "POST"    => Self::Post,
            "PUT"     => Self::Put,
            "TRACE"   => Self::Trace,
            other     => Self::Other(other.to_owned()),
        })
    }
}

impl From<&http::Method> for Method {
    fn from(m: &http::Method) -> Self {
        match m.as_str().parse() {
            Ok(method) => method,
            Err(never) => match never {},
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
