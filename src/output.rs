//! Output formatting and persistence for station aggregates.
//!
//! Supports pretty-printing, JSON serialization, and CSV append.

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info};

use crate::filter::TimeFilter;
use crate::model::StationStats;
use csv::WriterBuilder;
use std::fs::OpenOptions;
use std::path::Path;

/// One CSV row: a station's aggregate under a particular time filter.
#[derive(Debug, Serialize)]
pub struct StationRecord {
    pub time_filter: String,
    pub short_name: String,
    pub name: String,
    pub departures: usize,
    pub arrivals: usize,
    pub total: usize,
}

/// Tags each station aggregate with the filter it was computed under.
pub fn station_records(filter: TimeFilter, stats: &[StationStats]) -> Vec<StationRecord> {
    stats
        .iter()
        .map(|s| StationRecord {
            time_filter: filter.to_string(),
            short_name: s.short_name.clone(),
            name: s.name.clone(),
            departures: s.departures,
            arrivals: s.arrivals,
            total: s.total,
        })
        .collect()
}

/// Logs a serializable value as pretty-printed JSON.
pub fn print_json(value: &impl Serialize) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Appends [`StationRecord`] rows to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_records(path: &str, records: &[StationRecord]) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, rows = records.len(), "Appending CSV records");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // IMPORTANT when appending
        .from_writer(file);

    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    fn sample_stats() -> Vec<StationStats> {
        vec![StationStats {
            short_name: "A32000".to_string(),
            name: "MIT at Mass Ave".to_string(),
            lat: 42.3581,
            lon: -71.0932,
            departures: 3,
            arrivals: 2,
            total: 5,
        }]
    }

    #[test]
    fn test_station_records_carry_filter_label() {
        let records = station_records(TimeFilter::AtMinute(845), &sample_stats());
        assert_eq!(records[0].time_filter, "14:05");
        assert_eq!(records[0].total, 5);

        let records = station_records(TimeFilter::AnyTime, &sample_stats());
        assert_eq!(records[0].time_filter, "any");
    }

    #[test]
    fn test_print_json_does_not_panic() {
        let records = station_records(TimeFilter::AnyTime, &sample_stats());
        print_json(&records).unwrap();
    }

    #[test]
    fn test_append_records_creates_file() {
        let path = temp_path("bike_flow_map_test_create.csv");
        let _ = fs::remove_file(&path); // clean up any prior run

        let records = station_records(TimeFilter::AnyTime, &sample_stats());
        append_records(&path, &records).unwrap();

        assert!(Path::new(&path).exists());
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("A32000"));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_append_records_writes_header_once() {
        let path = temp_path("bike_flow_map_test_header.csv");
        let _ = fs::remove_file(&path);

        let records = station_records(TimeFilter::AnyTime, &sample_stats());
        append_records(&path, &records).unwrap();
        append_records(&path, &records).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        // Header line should appear exactly once
        let header_count = content
            .lines()
            .filter(|l| l.contains("time_filter"))
            .count();
        assert_eq!(header_count, 1);
        // 1 header + 2 data rows
        assert_eq!(content.lines().count(), 3);

        fs::remove_file(&path).unwrap();
    }
}
