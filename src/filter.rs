//! Time-of-day filtering of the trip list.

use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, bail};

use crate::clock::minutes_since_midnight;
use crate::model::Trip;

/// Trips within this many minutes of the target (by start or end time)
/// survive the filter. A ±1-hour window.
pub const FILTER_WINDOW_MINUTES: i32 = 60;

/// The active time-of-day filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeFilter {
    /// No filtering; every trip counts.
    AnyTime,
    /// Only trips near this minute of the day, in `[0, 1439]`.
    AtMinute(u16),
}

impl TimeFilter {
    pub fn is_active(&self) -> bool {
        matches!(self, TimeFilter::AtMinute(_))
    }
}

impl FromStr for TimeFilter {
    type Err = anyhow::Error;

    /// Accepts `any`, `HH:MM` (24-hour), or a raw minute offset.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("any") {
            return Ok(TimeFilter::AnyTime);
        }

        let minutes = if let Some((h, m)) = s.split_once(':') {
            let hour: u16 = h.parse().map_err(|_| anyhow!("invalid hour in {s:?}"))?;
            let minute: u16 = m.parse().map_err(|_| anyhow!("invalid minute in {s:?}"))?;
            if hour > 23 || minute > 59 {
                bail!("time of day out of range: {s:?}");
            }
            hour * 60 + minute
        } else {
            s.parse()
                .map_err(|_| anyhow!("expected \"any\", HH:MM, or a minute offset, got {s:?}"))?
        };

        if minutes > 1439 {
            bail!("minute offset out of range: {minutes} (max 1439)");
        }
        Ok(TimeFilter::AtMinute(minutes))
    }
}

impl fmt::Display for TimeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeFilter::AnyTime => write!(f, "any"),
            TimeFilter::AtMinute(m) => write!(f, "{:02}:{:02}", m / 60, m % 60),
        }
    }
}

/// Selects the trips whose start or end time falls within
/// [`FILTER_WINDOW_MINUTES`] of the target minute.
///
/// `AnyTime` returns every trip. Input order is preserved and the input is
/// never mutated.
pub fn filter_trips(trips: &[Trip], time_filter: TimeFilter) -> Vec<Trip> {
    match time_filter {
        TimeFilter::AnyTime => trips.to_vec(),
        TimeFilter::AtMinute(target) => trips
            .iter()
            .filter(|trip| {
                let started = minutes_since_midnight(&trip.started_at) as i32;
                let ended = minutes_since_midnight(&trip.ended_at) as i32;
                let target = target as i32;
                (started - target).abs() <= FILTER_WINDOW_MINUTES
                    || (ended - target).abs() <= FILTER_WINDOW_MINUTES
            })
            .cloned()
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn trip_at_minutes(start: u16, end: u16) -> Trip {
        let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        Trip {
            ride_id: None,
            start_station_id: "A".to_string(),
            end_station_id: "B".to_string(),
            started_at: day
                .and_hms_opt((start / 60) as u32, (start % 60) as u32, 0)
                .unwrap(),
            ended_at: day
                .and_hms_opt((end / 60) as u32, (end % 60) as u32, 0)
                .unwrap(),
        }
    }

    #[test]
    fn test_any_time_is_identity() {
        let trips = vec![
            trip_at_minutes(100, 500),
            trip_at_minutes(0, 10),
            trip_at_minutes(1400, 1439),
        ];
        let filtered = filter_trips(&trips, TimeFilter::AnyTime);
        assert_eq!(filtered.len(), trips.len());
        for (a, b) in trips.iter().zip(&filtered) {
            assert_eq!(a.started_at, b.started_at);
            assert_eq!(a.ended_at, b.ended_at);
        }
    }

    #[test]
    fn test_window_includes_by_start_or_end() {
        let trips = vec![trip_at_minutes(100, 500)];

        // |100 - 90| = 10, within the window
        assert_eq!(filter_trips(&trips, TimeFilter::AtMinute(90)).len(), 1);
        // |100 - 300| = 200 and |500 - 300| = 200, both outside
        assert_eq!(filter_trips(&trips, TimeFilter::AtMinute(300)).len(), 0);
        // |500 - 450| = 50, included via end time
        assert_eq!(filter_trips(&trips, TimeFilter::AtMinute(450)).len(), 1);
    }

    #[test]
    fn test_window_boundary_is_inclusive() {
        let trips = vec![trip_at_minutes(100, 100)];
        assert_eq!(filter_trips(&trips, TimeFilter::AtMinute(160)).len(), 1);
        assert_eq!(filter_trips(&trips, TimeFilter::AtMinute(161)).len(), 0);
        assert_eq!(filter_trips(&trips, TimeFilter::AtMinute(40)).len(), 1);
        assert_eq!(filter_trips(&trips, TimeFilter::AtMinute(39)).len(), 0);
    }

    #[test]
    fn test_order_preserved() {
        let trips = vec![
            trip_at_minutes(100, 110),
            trip_at_minutes(130, 140),
            trip_at_minutes(90, 95),
        ];
        let filtered = filter_trips(&trips, TimeFilter::AtMinute(100));
        let starts: Vec<_> = filtered
            .iter()
            .map(|t| crate::clock::minutes_since_midnight(&t.started_at))
            .collect();
        assert_eq!(starts, vec![100, 130, 90]);
    }

    #[test]
    fn test_parse_any() {
        assert_eq!("any".parse::<TimeFilter>().unwrap(), TimeFilter::AnyTime);
        assert_eq!("ANY".parse::<TimeFilter>().unwrap(), TimeFilter::AnyTime);
    }

    #[test]
    fn test_parse_clock_time() {
        assert_eq!(
            "14:05".parse::<TimeFilter>().unwrap(),
            TimeFilter::AtMinute(845)
        );
        assert_eq!(
            "0:00".parse::<TimeFilter>().unwrap(),
            TimeFilter::AtMinute(0)
        );
    }

    #[test]
    fn test_parse_minute_offset() {
        assert_eq!(
            "845".parse::<TimeFilter>().unwrap(),
            TimeFilter::AtMinute(845)
        );
    }

    #[test]
    fn test_parse_rejects_out_of_range() {
        assert!("1440".parse::<TimeFilter>().is_err());
        assert!("24:00".parse::<TimeFilter>().is_err());
        assert!("12:60".parse::<TimeFilter>().is_err());
        assert!("noon".parse::<TimeFilter>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(TimeFilter::AnyTime.to_string(), "any");
        assert_eq!(TimeFilter::AtMinute(845).to_string(), "14:05");
        assert_eq!(TimeFilter::AtMinute(5).to_string(), "00:05");
    }
}
