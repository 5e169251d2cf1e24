//! Public IP lookup through a plain-text echo service such as ipify.

use reqwest::{Client, StatusCode};
use tracing::debug;

use crate::config::IPIFY_URL;
use crate::error::FetchError;

/// Asks the echo service at `url` for the caller's public address.
///
/// The body of a `200 OK` is returned as-is; anything else is an error.
pub async fn fetch_public_ip(client: &Client, url: &str) -> Result<String, FetchError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if status != StatusCode::OK {
        debug!(%url, %status, "public ip lookup rejected");
        return Err(FetchError::Status(status));
    }
    Ok(response.text().await?)
}

/// [`fetch_public_ip`] against `https://api.ipify.org` with a fresh client.
pub async fn public_ip() -> Result<String, FetchError> {
    fetch_public_ip(&Client::new(), IPIFY_URL).await
}
