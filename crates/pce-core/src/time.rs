//! Frame timestamps.
//!
//! Timestamps are fixed-width `YYYY-MM-DDTHH:MM:SSZ` strings, so comparing
//! them as strings orders them chronologically.

use chrono::{DateTime, SecondsFormat, Utc};

/// Format a UTC instant as a second-precision ISO-8601 timestamp.
pub fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Current wall-clock time as a frame timestamp.
pub fn now_timestamp() -> String {
    format_timestamp(Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn formats_with_second_precision_and_zulu_marker() {
        let instant = Utc.with_ymd_and_hms(2025, 1, 31, 9, 15, 0).unwrap();
        assert_eq!(format_timestamp(instant), "2025-01-31T09:15:00Z");
    }

    #[test]
    fn drops_sub_second_precision() {
        let instant = Utc.with_ymd_and_hms(2025, 1, 31, 9, 15, 7).unwrap()
            + chrono::Duration::milliseconds(999);
        assert_eq!(format_timestamp(instant), "2025-01-31T09:15:07Z");
    }

    #[test]
    fn string_order_matches_time_order() {
        let earlier = format_timestamp(Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap());
        let later = format_timestamp(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
        assert!(earlier < later);
    }

    #[test]
    fn now_has_fixed_width() {
        let stamp = now_timestamp();
        assert_eq!(stamp.len(), "2025-01-31T09:15:00Z".len());
        assert!(stamp.ends_with('Z'));
    }
}
