//! Date-key and display-time helpers.
//!
//! Notes are grouped by the wall-clock date they were written on, and each
//! note carries a display time like "8:30 AM". Both are derived from the
//! machine timestamp; nothing ever re-parses a display string.

use chrono::{DateTime, Local};

/// Date key (`YYYY-MM-DD`) for the wall-clock day of `at`.
pub fn date_key(at: &DateTime<Local>) -> String {
    at.format("%Y-%m-%d").to_string()
}

/// Date key for the current wall-clock day.
pub fn today_key() -> String {
    date_key(&Local::now())
}

/// Display time-of-day, e.g. "8:30 AM".
pub fn format_time_of_day(at: &DateTime<Local>) -> String {
    at.format("%-I:%M %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn date_key_is_iso_day() {
        let at = Local.with_ymd_and_hms(2026, 3, 5, 8, 30, 0).unwrap();
        assert_eq!(date_key(&at), "2026-03-05");
    }

    #[test]
    fn morning_time_formats_without_leading_zero() {
        let at = Local.with_ymd_and_hms(2026, 3, 5, 8, 30, 0).unwrap();
        assert_eq!(format_time_of_day(&at), "8:30 AM");
    }

    #[test]
    fn evening_time_uses_pm() {
        let at = Local.with_ymd_and_hms(2026, 3, 5, 20, 5, 0).unwrap();
        assert_eq!(format_time_of_day(&at), "8:05 PM");
    }

    #[test]
    fn midnight_renders_as_twelve_am() {
        let at = Local.with_ymd_and_hms(2026, 3, 5, 0, 0, 0).unwrap();
        assert_eq!(format_time_of_day(&at), "12:00 AM");
    }
}
