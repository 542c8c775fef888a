//! Per-station traffic aggregation.
//!
//! Aggregation is a fresh re-derivation every time: it returns a new
//! mapping from station id to counts, joined against the static station
//! metadata, rather than mutating station records in place.

use std::collections::HashMap;

use crate::model::{Station, StationStats, Trip};

/// Departure and arrival counts for one station id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StationTraffic {
    pub departures: usize,
    pub arrivals: usize,
}

impl StationTraffic {
    pub fn total(&self) -> usize {
        self.departures + self.arrivals
    }
}

/// Counts trips by start station (departures) and end station (arrivals).
///
/// Ids that match no known station still land in the map; the join simply
/// never reads them.
pub fn compute_station_traffic(trips: &[Trip]) -> HashMap<String, StationTraffic> {
    let mut traffic: HashMap<String, StationTraffic> = HashMap::new();

    for trip in trips {
        traffic
            .entry(trip.start_station_id.clone())
            .or_default()
            .departures += 1;
        traffic
            .entry(trip.end_station_id.clone())
            .or_default()
            .arrivals += 1;
    }

    traffic
}

/// Joins aggregated counts against station metadata, one entry per station
/// in input order. Stations absent from the traffic map get zero counts.
pub fn join_traffic(
    stations: &[Station],
    traffic: &HashMap<String, StationTraffic>,
) -> Vec<StationStats> {
    stations
        .iter()
        .map(|station| {
            let counts = traffic
                .get(&station.short_name)
                .copied()
                .unwrap_or_default();
            StationStats {
                short_name: station.short_name.clone(),
                name: station.name.clone(),
                lat: station.lat,
                lon: station.lon,
                departures: counts.departures,
                arrivals: counts.arrivals,
                total: counts.total(),
            }
        })
        .collect()
}

/// Convenience wrapper: aggregate `trips` and join against `stations`.
pub fn compute_station_stats(stations: &[Station], trips: &[Trip]) -> Vec<StationStats> {
    join_traffic(stations, &compute_station_traffic(trips))
}
