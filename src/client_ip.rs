//! Client address resolution for services running behind a reverse proxy.
//!
//! The first match wins; sources are never merged:
//!
//! 1. `X-Forwarded-For` — the left-most entry is the original client, the
//!    rest are proxies appended along the way.
//! 2. `X-Real-IP` — set by nginx's `real_ip` module, taken verbatim.
//! 3. The host of the TCP peer address.
//!
//! Nothing is validated as an IP address. A proxy that forwards garbage gets
//! garbage echoed back.

use crate::request::Request;

pub const X_FORWARDED_FOR: &str = "X-Forwarded-For";
pub const X_REAL_IP: &str = "X-Real-IP";

/// Returns the best available identifier for the client that sent `req`.
pub fn client_ip(req: &Request) -> String {
    if let Some(forwarded) = req.header(X_FORWARDED_FOR).filter(|v| !v.is_empty()) {
        // `split` always yields at least one item.
        let first = forwarded.split(',').next().unwrap_or(forwarded);
        return first.trim().to_owned();
    }

    if let Some(real_ip) = req.header(X_REAL_IP).filter(|v| !v.is_empty()) {
        return real_ip.to_owned();
    }

    req.client_addr().ip().to_string()
}
