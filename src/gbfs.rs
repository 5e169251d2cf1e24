//! GBFS `station_information` client.
//!
//! A GBFS feed wraps its payload in an envelope:
//!
//! ```json
//! {"last_updated": 1700000000, "ttl": 5,
//!  "data": {"stations": [{"station_id": "1", "name": "…", "lat": 41.39, "lon": 2.18}]}}
//! ```
//!
//! [`fetch_stations`] returns the `data` object; the rest of this module
//! looks stations up in it and flattens it into a [`StationTable`].

use std::fmt;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Deserializer};
use tracing::debug;

use crate::error::FetchError;
use crate::table;

/// The `data` object of a `station_information` feed.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct StationsData {
    stations: Option<Vec<Station>>,
}

/// One entry of `data.stations`.
///
/// Only the fields this crate reads are typed; everything else the feed
/// sends (capacity, address, post code, …) is kept in `extra`.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Station {
    #[serde(default, deserialize_with = "station_id")]
    pub station_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Deserialize)]
struct Envelope {
    data: Option<StationsData>,
}

/// Downloads `url` and returns its `data` object.
pub async fn fetch_stations(client: &Client, url: &str) -> Result<StationsData, FetchError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if status != StatusCode::OK {
        debug!(%url, %status, "station feed rejected");
        return Err(FetchError::Status(status));
    }
    parse_feed(&response.bytes().await?)
}

/// Decodes a feed document and extracts its `data` object.
pub fn parse_feed(body: &[u8]) -> Result<StationsData, FetchError> {
    let envelope: Envelope = serde_json::from_slice(body)?;
    envelope.data.ok_or(FetchError::MissingData("data"))
}

impl StationsData {
    pub fn new(stations: Vec<Station>) -> Self {
        Self { stations: Some(stations) }
    }

    /// The stations in feed order; empty when the feed has none.
    pub fn stations(&self) -> &[Station] {
        self.stations.as_deref().unwrap_or_default()
    }

    /// Finds the station whose `station_id` equals `id`.
    pub fn station(&self, id: &str) -> Option<&Station> {
        self.stations().iter().find(|s| s.station_id.as_deref() == Some(id))
    }

    /// One row per station, or `None` if the feed carried no `stations`
    /// list at all.
    pub fn table(&self) -> Option<StationTable> {
        let stations = self.stations.as_ref()?;
        Some(StationTable {
            rows: stations.iter().map(StationRow::from).collect(),
        })
    }
}

impl Station {
    /// `(latitude, longitude)`, if the feed gave both.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.lat?, self.lon?))
    }
}

/// Feeds disagree on whether ids are strings or numbers; both compare as
/// their string form.
fn station_id<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(Option::<RawId>::deserialize(d)?.map(|id| match id {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    }))
}

// ── Table ─────────────────────────────────────────────────────────────────────

/// Column names of a [`StationTable`], in order.
pub const COLUMNS: [&str; 4] = ["station_id", "latitude", "longitude", "name"];

#[derive(Clone, Debug, PartialEq)]
pub struct StationRow {
    pub station_id: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub name: Option<String>,
}

impl From<&Station> for StationRow {
    fn from(s: &Station) -> Self {
        Self {
            station_id: s.station_id.clone(),
            latitude: s.lat,
            longitude: s.lon,
            name: s.name.clone(),
        }
    }
}

/// Every station of a feed under the fixed [`COLUMNS`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StationTable {
    rows: Vec<StationRow>,
}

impl StationTable {
    pub fn rows(&self) -> &[StationRow] { &self.rows }
    pub fn len(&self) -> usize { self.rows.len() }
    pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    /// The first `n` rows.
    pub fn head(&self, n: usize) -> StationTable {
        StationTable { rows: self.rows.iter().take(n).cloned().collect() }
    }
}

impl fmt::Display for StationTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|r| {
                vec![
                    table::text_cell(r.station_id.as_deref()),
                    table::float_cell(r.latitude),
                    table::float_cell(r.longitude),
                    table::text_cell(r.name.as_deref()),
                ]
            })
            .collect();
        table::render(f, &COLUMNS, &rows)
    }
}
