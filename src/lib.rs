//! # kiosk
//!
//! A tiny HTTP service that tells clients their own IP address, plus the
//! outbound clients that go with it: a public-IP lookup and two bikeshare
//! feed readers.
//!
//! ## The service
//!
//! | Request      | Response                                                        |
//! |--------------|-----------------------------------------------------------------|
//! | `GET /ip`    | `200` `{"ip": "<client>"}`                                      |
//! | anything else| `404` `{"code": 404, "message": "Recurso <path> no encontrado"}` |
//!
//! Behind a reverse proxy the client is read from `X-Forwarded-For`, then
//! `X-Real-IP`, then the TCP peer (see [`client_ip()`]). Routing is exact-path
//! and the handlers are pure functions of the request, so
//! [`Router::dispatch`] can be exercised without a socket.
//!
//! ```rust,no_run
//! use kiosk::{Server, Settings, routes};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), kiosk::Error> {
//!     let settings = Settings::load()?;
//!     Server::bind(&settings.server).await?.serve(routes::app()).await
//! }
//! ```
//!
//! ## The clients
//!
//! - [`public_ip`] — plain-text GET against an IP-echo service.
//! - [`gbfs`] — a GBFS `station_information` feed, station lookup and a
//!   flat station table.
//! - [`citybikes`] — the CityBikes directory: list and search systems, fetch
//!   a system's station availability.
//!
//! Every client returns `Result<_, FetchError>`; a failed call means "no
//! data", and the variant says why.

mod error;
mod handler;
mod json;
mod method;
mod request;
mod response;
mod router;
mod server;
mod status;
mod table;

pub mod citybikes;
pub mod client_ip;
pub mod config;
pub mod gbfs;
pub mod public_ip;
pub mod routes;

pub use client_ip::client_ip;
pub use crate::config::{ServerConfig, Settings};
pub use error::{Error, FetchError};
pub use handler::Handler;
pub use method::Method;
pub use request::Request;
pub use response::Response;
pub use router::Router;
pub use server::Server;
pub use status::Status;
