use chrono::{NaiveDateTime, Timelike};

/// Converts a wall-clock timestamp to minutes since midnight, ignoring
/// seconds and the date. `14:05` → `845`.
pub fn minutes_since_midnight(t: &NaiveDateTime) -> u16 {
    (t.hour() * 60 + t.minute()) as u16
}

/// Renders a minute offset as a 12-hour clock string with AM/PM.
///
/// | Input | Output     |
/// |-------|------------|
/// | 0     | "12:00 AM" |
/// | 90    | "1:30 AM"  |
/// | 720   | "12:00 PM" |
/// | 845   | "2:05 PM"  |
pub fn format_time_of_day(minutes: u16) -> String {
    let hour = minutes / 60;
    let minute = minutes % 60;
    let meridiem = if hour < 12 { "AM" } else { "PM" };
    let hour12 = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{}:{:02} {}", hour12, minute, meridiem)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32, minute: u32, second: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(hour, minute, second)
            .unwrap()
    }

    #[test]
    fn test_minutes_since_midnight() {
        assert_eq!(minutes_since_midnight(&at(14, 5, 0)), 845);
        assert_eq!(minutes_since_midnight(&at(0, 0, 0)), 0);
        assert_eq!(minutes_since_midnight(&at(23, 59, 0)), 1439);
    }

    #[test]
    fn test_seconds_are_ignored() {
        assert_eq!(minutes_since_midnight(&at(14, 5, 59)), 845);
    }

    #[test]
    fn test_format_time_of_day() {
        assert_eq!(format_time_of_day(0), "12:00 AM");
        assert_eq!(format_time_of_day(90), "1:30 AM");
        assert_eq!(format_time_of_day(720), "12:00 PM");
        assert_eq!(format_time_of_day(845), "2:05 PM");
        assert_eq!(format_time_of_day(1439), "11:59 PM");
    }
}
