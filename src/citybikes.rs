//! Client for the CityBikes directory of bikeshare systems.
//!
//! CityBikes publishes every system the pybikes scrapers know about, so one
//! API covers hundreds of cities without hand-parsing each operator's feed:
//!
//! - `GET {base}/networks` lists systems and their metadata,
//! - `GET {base}/networks/{tag}` scrapes one system and returns its stations.
//!
//! The pure parts (city search, availability table, statistics) take decoded
//! values so they can be used and tested without the network.

use std::fmt;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::CITYBIKES_URL;
use crate::error::FetchError;
use crate::table;

/// Metadata of one bikeshare system.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct SystemInfo {
    /// The system's tag, e.g. `"bicing"`.
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub location: Location,
    /// Fields this crate does not interpret (`company`, `href`, `source`, …).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Location {
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// A station with its current availability.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct BikeStation {
    #[serde(default)]
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Bikes ready to rent.
    #[serde(rename = "free_bikes")]
    pub bikes: Option<u32>,
    /// Empty docks.
    #[serde(rename = "empty_slots")]
    pub free: Option<u32>,
}

#[derive(Deserialize)]
struct NetworkList {
    networks: Vec<SystemInfo>,
}

#[derive(Deserialize)]
struct NetworkDetail {
    network: NetworkStations,
}

#[derive(Deserialize)]
struct NetworkStations {
    #[serde(default)]
    stations: Vec<BikeStation>,
}

/// A CityBikes API client.
#[derive(Clone, Debug)]
pub struct CityBikes {
    client: Client,
    base_url: String,
}

impl Default for CityBikes {
    fn default() -> Self {
        Self::new(CITYBIKES_URL)
    }
}

impl CityBikes {
    /// A client for the API rooted at `base_url` (no trailing slash needed).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self { client, base_url }
    }

    /// Metadata of every known system.
    pub async fn networks(&self) -> Result<Vec<SystemInfo>, FetchError> {
        let list: NetworkList = self.get_json("networks").await?;
        Ok(list.networks)
    }

    /// Tags of every known system.
    pub async fn systems(&self) -> Result<Vec<String>, FetchError> {
        Ok(self.networks().await?.into_iter().map(|n| n.id).collect())
    }

    /// Tags of systems whose city or name contains `city`, ignoring case.
    pub async fn search_by_city(&self, city: &str) -> Result<Vec<String>, FetchError> {
        Ok(filter_by_city(&self.networks().await?, city))
    }

    /// Metadata of the system tagged `tag`, or `None` if there is no such
    /// system.
    pub async fn system_info(&self, tag: &str) -> Result<Option<SystemInfo>, FetchError> {
        Ok(self.networks().await?.into_iter().find(|n| n.id == tag))
    }

    /// Refreshes and returns the stations of the system tagged `tag`.
    pub async fn stations(&self, tag: &str) -> Result<Vec<BikeStation>, FetchError> {
        let detail: NetworkDetail = self.get_json(&format!("networks/{tag}")).await?;
        Ok(detail.network.stations)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let url = format!("{}/{path}", self.base_url);
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            debug!(%url, %status, "citybikes request rejected");
            return Err(FetchError::Status(status));
        }
        Ok(serde_json::from_slice(&response.bytes().await?)?)
    }
}

/// Tags of the systems in `networks` whose city or name contains `city`,
/// case-insensitively, in directory order.
pub fn filter_by_city(networks: &[SystemInfo], city: &str) -> Vec<String> {
    let needle = city.to_lowercase();
    networks
        .iter()
        .filter(|n| {
            n.location.city.to_lowercase().contains(&needle) || n.name.to_lowercase().contains(&needle)
        })
        .map(|n| n.id.clone())
        .collect()
}

// ── Availability table ────────────────────────────────────────────────────────

/// Column names of an [`AvailabilityTable`], in order.
pub const COLUMNS: [&str; 5] = ["name", "latitude", "longitude", "bikes", "free"];

#[derive(Clone, Debug, PartialEq)]
pub struct AvailabilityRow {
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub bikes: Option<u32>,
    pub free: Option<u32>,
}

/// Station availability of one system under the fixed [`COLUMNS`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AvailabilityTable {
    rows: Vec<AvailabilityRow>,
}

impl AvailabilityTable {
    pub fn from_stations(stations: &[BikeStation]) -> Self {
        let rows = stations
            .iter()
            .map(|s| AvailabilityRow {
                name: s.name.clone(),
                latitude: s.latitude,
                longitude: s.longitude,
                bikes: s.bikes,
                free: s.free,
            })
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[AvailabilityRow] { &self.rows }
    pub fn len(&self) -> usize { self.rows.len() }
    pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    pub fn head(&self, n: usize) -> Self {
        Self { rows: self.rows.iter().take(n).cloned().collect() }
    }

    /// The `n` rows with the most bikes, most first. Ties keep table order;
    /// rows without a bike count come last.
    pub fn top_by_bikes(&self, n: usize) -> Self {
        let mut rows = self.rows.clone();
        rows.sort_by(|a, b| b.bikes.cmp(&a.bikes));
        rows.truncate(n);
        Self { rows }
    }

    /// Descriptive statistics of the `bikes` column, or `None` when no row
    /// has a bike count.
    pub fn bikes_summary(&self) -> Option<Summary> {
        Summary::of(self.rows.iter().filter_map(|r| r.bikes).map(f64::from).collect())
    }

    /// Horizontal bar chart of the `n` stations with the most bikes.
    pub fn bar_chart(&self, n: usize) -> String {
        const WIDTH: usize = 40;

        let top = self.top_by_bikes(n);
        let max = top.rows.iter().filter_map(|r| r.bikes).max().unwrap_or(0);
        let label_width = top.rows.iter().map(|r| r.name.chars().count()).max().unwrap_or(0);

        let mut out = String::new();
        for row in &top.rows {
            let bikes = row.bikes.unwrap_or(0);
            let len = if max == 0 { 0 } else { bikes as usize * WIDTH / max as usize };
            out.push_str(&format!("{:>label_width$} │{} {bikes}\n", row.name, "█".repeat(len)));
        }
        out
    }
}

impl fmt::Display for AvailabilityTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|r| {
                vec![
                    r.name.clone(),
                    table::float_cell(r.latitude),
                    table::float_cell(r.longitude),
                    table::float_cell(r.bikes.map(f64::from)),
                    table::float_cell(r.free.map(f64::from)),
                ]
            })
            .collect();
        table::render(f, &COLUMNS, &rows)
    }
}

/// Count, mean, sample standard deviation, extremes and quartiles of a
/// column. Quartiles interpolate linearly between neighbouring values.
#[derive(Clone, Debug, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    /// `None` for a single value.
    pub std: Option<f64>,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl Summary {
    fn of(mut values: Vec<f64>) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        values.sort_by(f64::total_cmp);

        let n = values.len();
        let mean = values.iter().sum::<f64>() / n as f64;
        let std = (n > 1).then(|| {
            let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
            (ss / (n - 1) as f64).sqrt()
        });

        Some(Self {
            count: n,
            mean,
            std,
            min: values[0],
            q1: quantile(&values, 0.25),
            median: quantile(&values, 0.5),
            q3: quantile(&values, 0.75),
            max: values[n - 1],
        })
    }
}

/// `sorted` must be non-empty and ascending.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let std = self.std.map_or_else(|| "NaN".to_owned(), |s| format!("{s:.6}"));
        writeln!(f, "count  {:>12}", self.count)?;
        writeln!(f, "mean   {:>12.6}", self.mean)?;
        writeln!(f, "std    {std:>12}")?;
        writeln!(f, "min    {:>12.6}", self.min)?;
        writeln!(f, "25%    {:>12.6}", self.q1)?;
        writeln!(f, "50%    {:>12.6}", self.median)?;
        writeln!(f, "75%    {:>12.6}", self.q3)?;
        writeln!(f, "max    {:>12.6}", self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NETWORKS: &str = r#"{"networks": [
        {"id": "bicing", "name": "Bicing", "href": "/v2/networks/bicing", "company": ["PBSC"],
         "location": {"city": "Barcelona", "country": "ES", "latitude": 41.3850639, "longitude": 2.1734035}},
        {"id": "ambici", "name": "AMBici", "location": {"city": "Sant Boi (Barcelona)", "country": "ES"}},
        {"id": "velib", "name": "Vélib' Métropole", "location": {"city": "Paris", "country": "FR"}},
        {"id": "barcelona-ebike", "name": "Barcelona eBike"}
    ]}"#;

    fn networks() -> Vec<SystemInfo> {
        serde_json::from_str::<NetworkList>(NETWORKS).unwrap().networks
    }

    fn station(name: &str, bikes: Option<u32>, free: Option<u32>) -> BikeStation {
        BikeStation { name: name.to_owned(), latitude: Some(41.0), longitude: Some(2.0), bikes, free }
    }

    #[test]
    fn network_metadata_keeps_unknown_fields() {
        let bicing = &networks()[0];
        assert_eq!(bicing.location.city, "Barcelona");
        assert_eq!(bicing.extra["company"][0], "PBSC");
        assert!(networks()[3].location.city.is_empty());
    }

    #[test]
    fn city_search_is_case_insensitive_over_city_and_name() {
        assert_eq!(filter_by_city(&networks(), "barcelona"), ["bicing", "ambici", "barcelona-ebike"]);
        assert_eq!(filter_by_city(&networks(), "PARIS"), ["velib"]);
        assert!(filter_by_city(&networks(), "Lisboa").is_empty());
    }

    #[test]
    fn stations_decode_availability_fields() {
        let detail: NetworkDetail = serde_json::from_str(
            r#"{"network": {"id": "bicing", "stations": [
                {"id": "a", "name": "Plaça Catalunya", "latitude": 41.387, "longitude": 2.170,
                 "free_bikes": 12, "empty_slots": null, "timestamp": "2024-01-01T00:00:00Z"}
            ]}}"#,
        )
        .unwrap();
        assert_eq!(detail.network.stations, [BikeStation {
            name: "Plaça Catalunya".into(),
            latitude: Some(41.387),
            longitude: Some(2.170),
            bikes: Some(12),
            free: None,
        }]);
    }

    #[test]
    fn station_without_coordinates_still_decodes() {
        let detail: NetworkDetail = serde_json::from_str(
            r#"{"network": {"id": "bicing", "stations": [
                {"name": "A", "latitude": null, "longitude": 2.17, "free_bikes": 3, "empty_slots": 5},
                {"name": "B", "free_bikes": 1, "empty_slots": 7}
            ]}}"#,
        )
        .unwrap();
        let stations = &detail.network.stations;
        assert_eq!(stations.len(), 2);
        assert_eq!((stations[0].latitude, stations[0].longitude), (None, Some(2.17)));
        assert_eq!((stations[1].latitude, stations[1].longitude), (None, None));

        let table = AvailabilityTable::from_stations(stations);
        assert_eq!(table.top_by_bikes(1).rows()[0].name, "A");
        assert_eq!(table.to_string().lines().count(), 3);
    }

    #[test]
    fn empty_station_list_gives_empty_table_with_columns() {
        let table = AvailabilityTable::from_stations(&[]);
        assert!(table.is_empty());
        let header = table.to_string();
        assert_eq!(header.split_whitespace().collect::<Vec<_>>(), COLUMNS);
        assert!(table.bikes_summary().is_none());
    }

    #[test]
    fn top_by_bikes_orders_descending_and_keeps_ties_stable() {
        let table = AvailabilityTable::from_stations(&[
            station("a", Some(3), Some(1)),
            station("b", None, Some(9)),
            station("c", Some(7), Some(0)),
            station("d", Some(3), Some(2)),
        ]);
        let top = table.top_by_bikes(10);
        let names: Vec<&str> = top.rows().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["c", "a", "d", "b"]);
        assert_eq!(table.top_by_bikes(2).len(), 2);
    }

    #[test]
    fn summary_matches_describe() {
        let table = AvailabilityTable::from_stations(&[
            station("a", Some(1), None),
            station("b", Some(2), None),
            station("c", Some(3), None),
            station("d", Some(4), None),
            station("e", None, None),
        ]);
        let s = table.bikes_summary().unwrap();
        assert_eq!(s.count, 4);
        assert_eq!(s.mean, 2.5);
        assert!((s.std.unwrap() - 1.290_994_448_735_805_6).abs() < 1e-12);
        assert_eq!((s.min, s.q1, s.median, s.q3, s.max), (1.0, 1.75, 2.5, 3.25, 4.0));
    }

    #[test]
    fn single_value_has_no_std() {
        let table = AvailabilityTable::from_stations(&[station("a", Some(5), None)]);
        let s = table.bikes_summary().unwrap();
        assert_eq!(s.std, None);
        assert_eq!(s.median, 5.0);
        assert!(s.to_string().contains("NaN"));
    }

    #[test]
    fn bar_chart_scales_to_the_largest_count() {
        let table = AvailabilityTable::from_stations(&[
            station("short", Some(10), None),
            station("longer name", Some(20), None),
            station("none", Some(0), None),
        ]);
        let chart = table.bar_chart(2);
        let lines: Vec<&str> = chart.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], format!("longer name │{} 20", "█".repeat(40)));
        assert_eq!(lines[1], format!("      short │{} 10", "█".repeat(20)));
    }

    #[test]
    fn base_url_trailing_slash_is_ignored() {
        let client = CityBikes::new("http://example.test/v2/");
        assert_eq!(client.base_url, "http://example.test/v2");
    }
}
