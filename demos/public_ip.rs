//! Prints this machine's public IP address.
//!
//! Run with:
//!   cargo run --example public_ip

use kiosk::Settings;
use kiosk::public_ip::fetch_public_ip;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), kiosk::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let settings = Settings::load()?;
    let client = reqwest::Client::new();

    match fetch_public_ip(&client, &settings.endpoints.public_ip).await {
        Ok(ip) => println!("Tu dirección IP pública es: {ip}"),
        Err(e) => {
            tracing::warn!("public ip lookup failed: {e}");
            println!("No se pudo obtener la dirección IP");
        }
    }
    Ok(())
}
