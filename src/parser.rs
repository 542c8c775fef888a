//! Decoders for the two input datasets.

use anyhow::Result;
use serde::Deserialize;

use crate::model::{Station, Trip};

#[derive(Deserialize)]
struct StationFeed {
    data: StationData,
}

#[derive(Deserialize)]
struct StationData {
    stations: Vec<Station>,
}

/// Decodes the station dataset from its GBFS-style JSON envelope:
/// `{ "data": { "stations": [ ... ] } }`.
///
/// # Errors
///
/// Returns an error if the bytes are not valid JSON of that shape.
pub fn parse_stations(bytes: &[u8]) -> Result<Vec<Station>> {
    let feed: StationFeed = serde_json::from_slice(bytes)?;
    Ok(feed.data.stations)
}

/// Decodes the trip dataset from CSV. Any malformed row fails the whole
/// load; there is no partial recovery.
pub fn parse_trips(bytes: &[u8]) -> Result<Vec<Trip>> {
    let mut rdr = csv::Reader::from_reader(bytes);
    let mut trips = Vec::new();
    for result in rdr.deserialize() {
        let trip: Trip = result?;
        trips.push(trip);
    }
    Ok(trips)
}
