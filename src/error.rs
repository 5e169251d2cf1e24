//! Unified error types.

use thiserror::Error;

/// The error type returned by kiosk's infrastructure operations.
///
/// Application-level outcomes (an unknown path, for instance) are expressed
/// as HTTP [`Response`](crate::Response) values, not as `Error`s. This type
/// surfaces loading configuration, binding to a port, or accepting a
/// connection.
#[derive(Debug, Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("config: {0}")]
    Config(#[from] config::ConfigError),
}

/// Why an outbound request to a public feed produced no data.
///
/// Every client in this crate degrades to "no data" on failure; the variant
/// tells the caller which step failed.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request never produced a response (DNS, TLS, connect, body read).
    #[error("transport: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with something other than `200 OK`.
    #[error("unexpected status {0}")]
    Status(http::StatusCode),

    /// The body was not the JSON document the client expected.
    #[error("decode: {0}")]
    Decode(#[from] serde_json::Error),

    /// The document decoded but lacked the object the client reads.
    #[error("response has no `{0}` object")]
    MissingData(&'static str),
}
