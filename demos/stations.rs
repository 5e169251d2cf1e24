//! Reads Barcelona's GBFS station feed.
//!
//! Run with:
//!   cargo run --example stations
//!
//! Point it at another system with
//! `KIOSK_ENDPOINTS__GBFS_STATION_INFORMATION=<url>`.

use kiosk::{Settings, gbfs};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), kiosk::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let settings = Settings::load()?;
    let client = reqwest::Client::new();

    let data = match gbfs::fetch_stations(&client, &settings.endpoints.gbfs_station_information).await {
        Ok(data) => data,
        Err(e) => {
            tracing::warn!("station feed unavailable: {e}");
            println!("No se pudieron obtener los datos de las estaciones.");
            return Ok(());
        }
    };

    if let Some(station) = data.station("1") {
        println!("Estación encontrada: {}", station.name.as_deref().unwrap_or("?"));
        if let Some((lat, lon)) = station.coordinates() {
            println!("Coordenadas: ({lat}, {lon})");
        }
    }

    if let Some(table) = data.table() {
        println!("\nPrimeras 5 estaciones:");
        print!("{}", table.head(5));
        println!("\nTotal de estaciones: {}", table.len());
    }
    Ok(())
}
