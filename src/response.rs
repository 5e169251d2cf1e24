//! Outgoing HTTP response type.
//!
//! Build a [`Response`] in your handler and return it. The server converts it
//! to a hyper response at the edge.

use bytes::Bytes;
use http::header::{HeaderName, HeaderValue};
use http_body_util::Full;
use serde::Serialize;
use tracing::warn;

use crate::json;
use crate::status::Status;

pub(crate) const JSON: &str = "application/json";
const TEXT: &str = "text/plain; charset=utf-8";

/// An outgoing HTTP response.
///
/// ```rust
/// use kiosk::{Response, Status};
///
/// let res = Response::json(Status::NotFound, &serde_json::json!({"code": 404}))?;
/// assert_eq!(res.status_code(), 404);
/// assert_eq!(res.header("content-type"), Some("application/json"));
/// assert_eq!(res.body(), br#"{"code": 404}"#);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct Response {
    pub(crate) body: Vec<u8>,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) status: Status,
}

impl Response {
    /// `application/json` response with `value` serialised as the body.
    ///
    /// Fails only for values JSON cannot express, such as a map whose keys are
    /// not strings. The service's own routes build their bodies without serde
    /// and never take this path.
    pub fn json<T: Serialize + ?Sized>(status: Status, value: &T) -> serde_json::Result<Self> {
        Ok(Self::json_body(status, json::to_vec(value)?))
    }

    /// `application/json` response around an already-encoded body.
    pub(crate) fn json_body(status: Status, body: Vec<u8>) -> Self {
        Self::with_body(status, JSON, body)
    }

    /// `200 OK` — `text/plain; charset=utf-8`.
    pub fn text(body: impl Into<String>) -> Self {
        Self::with_body(Status::Ok, TEXT, body.into().into_bytes())
    }

    fn with_body(status: Status, content_type: &str, body: Vec<u8>) -> Self {
        Self {
            body,
            headers: vec![("Content-Type".to_owned(), content_type.to_owned())],
            status,
        }
    }

    pub fn status_code(&self) -> u16 { self.status.code() }
    pub fn headers(&self) -> &[(String, String)] { &self.headers }
    pub fn body(&self) -> &[u8] { &self.body }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Converts into the hyper response written on the wire.
    ///
    /// Headers with names or values hyper would reject are dropped with a
    /// warning rather than failing the whole response.
    pub(crate) fn into_hyper(self) -> http::Response<Full<Bytes>> {
        let mut res = http::Response::new(Full::new(Bytes::from(self.body)));
        *res.status_mut() = self.status.into();

        let headers = res.headers_mut();
        for (name, value) in self.headers {
            match (HeaderName::from_bytes(name.as_bytes()), HeaderValue::from_str(&value)) {
                (Ok(name), Ok(value)) => {
                    headers.append(name, value);
                }
                _ => warn!(header = %name, "dropping invalid response header"),
            }
        }
        res
    }
}
