//! Incoming HTTP request type.

use std::net::SocketAddr;

use crate::method::Method;

/// An incoming HTTP request, reduced to what routing needs.
///
/// The path is the request target exactly as the client sent it, query string
/// included. Repeated headers are folded into one comma-joined value in
/// arrival order, so `X-Forwarded-For` seen twice reads as `"a, b"`.
#[derive(Clone, Debug)]
pub struct Request {
    method: Method,
    path: String,
    headers: Vec<(String, String)>,
    client_addr: SocketAddr,
}

impl Request {
    pub fn new(method: Method, path: impl Into<String>, client_addr: SocketAddr) -> Self {
        Self { method, path: path.into(), headers: Vec::new(), client_addr }
    }

    /// Adds a header, folding it into an existing one of the same name
    /// (compared case-insensitively).
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.append_header(name, value);
        self
    }

    fn append_header(&mut self, name: &str, value: &str) {
        match self.headers.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(name)) {
            Some((_, existing)) => {
                existing.push_str(", ");
                existing.push_str(value);
            }
            None => self.headers.push((name.to_owned(), value.to_owned())),
        }
    }

    /// Builds a request from the head of a hyper request.
    ///
    /// An HTTP/1 absolute-form target (`GET http://host/ip`) keeps its scheme
    /// and authority, so it never matches an origin-form route. HTTP/2 always
    /// carries both as pseudo-headers and only its `:path` is the target.
    ///
    /// Header values that are not valid UTF-8 are decoded lossily; the
    /// dispatcher never rejects a request for its headers.
    pub(crate) fn from_parts(parts: &http::request::Parts, client_addr: SocketAddr) -> Self {
        let path = if parts.uri.scheme().is_some() && parts.version <= http::Version::HTTP_11 {
            parts.uri.to_string()
        } else {
            parts
                .uri
                .path_and_query()
                .map_or_else(|| parts.uri.path().to_owned(), |pq| pq.as_str().to_owned())
        };

        let mut req = Self::new(Method::from(&parts.method), path, client_addr);
        for (name, value) in &parts.headers {
            req.append_header(name.as_str(), &String::from_utf8_lossy(value.as_bytes()));
        }
        req
    }

    pub fn method(&self) -> &Method { &self.method }
    pub fn path(&self) -> &str { &self.path }
    pub fn headers(&self) -> &[(String, String)] { &self.headers }
    pub fn client_addr(&self) -> SocketAddr { self.client_addr }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr() -> SocketAddr {
        "127.0.0.1:5000".parse().unwrap()
    }

    #[test]
    fn header_lookup_ignores_case() {
        let req = Request::new(Method::Get, "/ip", addr()).with_header("X-Real-IP", "9.9.9.9");
        assert_eq!(req.header("x-real-ip"), Some("9.9.9.9"));
        assert_eq!(req.header("X-REAL-IP"), Some("9.9.9.9"));
        assert_eq!(req.header("x-forwarded-for"), None);
    }

    #[test]
    fn repeated_headers_are_folded_in_order() {
        let req = Request::new(Method::Get, "/ip", addr())
            .with_header("X-Forwarded-For", "1.1.1.1")
            .with_header("x-forwarded-for", "2.2.2.2");
        assert_eq!(req.headers().len(), 1);
        assert_eq!(req.header("X-Forwarded-For"), Some("1.1.1.1, 2.2.2.2"));
    }

    #[test]
    fn from_parts_keeps_query_string() {
        let (parts, ()) = http::Request::builder()
            .method("GET")
            .uri("/ip?x=1")
            .header("x-forwarded-for", "1.2.3.4")
            .header("x-forwarded-for", "5.6.7.8")
            .body(())
            .unwrap()
            .into_parts();

        let req = Request::from_parts(&parts, addr());
        assert_eq!(req.method(), &Method::Get);
        assert_eq!(req.path(), "/ip?x=1");
        assert_eq!(req.header("X-Forwarded-For"), Some("1.2.3.4, 5.6.7.8"));
        assert_eq!(req.client_addr(), addr());
    }

    #[test]
    fn absolute_form_target_keeps_scheme_and_authority() {
        let (parts, ()) = http::Request::builder()
            .uri("http://example.com/ip?x=1")
            .body(())
            .unwrap()
            .into_parts();

        let req = Request::from_parts(&parts, addr());
        assert_eq!(req.path(), "http://example.com/ip?x=1");
    }

    #[test]
    fn http2_target_is_the_path_only() {
        let (parts, ()) = http::Request::builder()
            .version(http::Version::HTTP_2)
            .uri("http://example.com/ip")
            .body(())
            .unwrap()
            .into_parts();

        let req = Request::from_parts(&parts, addr());
        assert_eq!(req.path(), "/ip");
    }
}
