//! The IP-echo service.
//!
//! Run with:
//!   RUST_LOG=info cargo run --example ip_server
//!
//! Try:
//!   curl http://localhost:8000/ip
//!   curl -H 'X-Forwarded-For: 1.2.3.4, 10.0.0.1' http://localhost:8000/ip
//!   curl http://localhost:8000/api/users
//!
//! Listen elsewhere with `KIOSK_SERVER__HOST` / `KIOSK_SERVER__PORT` or a
//! `kiosk.toml` in the working directory.

use kiosk::{Server, Settings, routes};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), kiosk::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = Settings::load()?;
    let server = Server::bind(&settings.server).await?;
    println!("Servidor iniciado en http://{}:{}", settings.server.host, server.local_addr().port());

    server.serve(routes::app()).await
}
