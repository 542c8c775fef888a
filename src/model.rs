//! Record types for the station and trip datasets.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

/// A fixed dock location from the station dataset.
///
/// `lat`/`lon` tolerate both JSON numbers and strings; the published GBFS
/// snapshot serves numbers, but CSV-derived exports quote them.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Station {
    pub short_name: String,
    pub name: String,
    #[serde(deserialize_with = "f64_lenient")]
    pub lat: f64,
    #[serde(deserialize_with = "f64_lenient")]
    pub lon: f64,
}

/// A single rental event from the trip dataset. Immutable once loaded.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Trip {
    #[serde(default)]
    pub ride_id: Option<String>,
    pub start_station_id: String,
    pub end_station_id: String,
    #[serde(deserialize_with = "naive_datetime_lenient")]
    pub started_at: NaiveDateTime,
    #[serde(deserialize_with = "naive_datetime_lenient")]
    pub ended_at: NaiveDateTime,
}

/// Per-station aggregate joined against station metadata.
///
/// Always derived fresh from the currently filtered trip set; never
/// accumulated across calls.
#[derive(Debug, Clone, Serialize)]
pub struct StationStats {
    pub short_name: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub departures: usize,
    pub arrivals: usize,
    pub total: usize,
}

fn f64_lenient<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        String(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::String(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// Accepts `2024-03-01 08:15:00`, with or without fractional seconds, and
/// the `T`-separated RFC 3339 style some exports use.
fn naive_datetime_lenient<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    NaiveDateTime::parse_from_str(&s, "%Y-%m-%d %H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(&s, "%Y-%m-%dT%H:%M:%S%.f"))
        .map_err(serde::de::Error::custom)
}
