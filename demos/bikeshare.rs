//! Explores the CityBikes directory and Barcelona's Bicing system.
//!
//! Run with:
//!   cargo run --example bikeshare

use kiosk::Settings;
use kiosk::citybikes::{AvailabilityTable, CityBikes};
use tracing_subscriber::EnvFilter;

const TAG: &str = "bicing";

#[tokio::main]
async fn main() -> Result<(), kiosk::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let settings = Settings::load()?;
    let api = CityBikes::new(settings.endpoints.citybikes);

    println!("\nSistemas de bicicletas disponibles:");
    let systems = api.systems().await.unwrap_or_else(|e| {
        tracing::warn!("system list unavailable: {e}");
        Vec::new()
    });
    println!("Total: {} sistemas", systems.len());
    println!("Algunos ejemplos: {:?}", systems.iter().take(5).collect::<Vec<_>>());

    println!("\nBuscando sistemas en Barcelona:");
    let found = api.search_by_city("Barcelona").await.unwrap_or_default();
    println!("Encontrados: {}", found.len());
    for tag in &found {
        println!("- {tag}");
    }

    if !systems.iter().any(|s| s == TAG) {
        println!("El sistema '{TAG}' no está disponible.");
        return Ok(());
    }

    println!("\nInformación del sistema Bicing de Barcelona:");
    if let Ok(Some(info)) = api.system_info(TAG).await {
        println!("id: {}", info.id);
        println!("name: {}", info.name);
        println!("city: {}", info.location.city);
        println!("country: {}", info.location.country);
        for (key, value) in &info.extra {
            println!("{key}: {value}");
        }
    }

    println!("\nObteniendo estaciones...");
    let stations = match api.stations(TAG).await {
        Ok(stations) if !stations.is_empty() => stations,
        _ => {
            println!("No se pudieron obtener las estaciones.");
            return Ok(());
        }
    };
    println!("Obtenidas {} estaciones", stations.len());

    let table = AvailabilityTable::from_stations(&stations);
    print!("\n{}", table.head(5));

    if let Some(summary) = table.bikes_summary() {
        println!("\nEstadísticas de bicicletas disponibles:");
        print!("{summary}");
    }

    println!("\nTop 10 estaciones con más bicicletas disponibles:");
    print!("{}", table.bar_chart(10));
    Ok(())
}
