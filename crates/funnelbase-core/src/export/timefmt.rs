//! Second-precision wire timestamps.
//!
//! The remote system takes ISO-8601 timestamps with whole seconds. Naive
//! timestamps (our store's UTC wall clock) get a literal `Z` appended;
//! offset-aware timestamps keep their own offset and get nothing appended.
//! The two forms are inconsistent on the wire (`…Z` vs `…+00:00`) but the
//! remote system tolerates both, and downstream consumers already depend on
//! this exact behavior.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, TimeZone};

/// Renders a timestamp in the remote system's wire format.
pub trait WireTimestamp {
    /// ISO-8601, truncated to whole seconds.
    fn to_wire(&self) -> String;
}

impl WireTimestamp for NaiveDateTime {
    fn to_wire(&self) -> String {
        format!("{}Z", self.format("%Y-%m-%dT%H:%M:%S"))
    }
}

impl<Tz: TimeZone> WireTimestamp for DateTime<Tz>
where
    Tz::Offset: std::fmt::Display,
{
    fn to_wire(&self) -> String {
        self.to_rfc3339_opts(SecondsFormat::Secs, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    #[test]
    fn naive_truncates_and_appends_z() {
        let dt = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_micro_opt(10, 0, 0, 500_000)
            .unwrap();
        assert_eq!(dt.to_wire(), "2024-01-01T10:00:00Z");
    }

    #[test]
    fn aware_keeps_offset_without_z() {
        let naive = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_micro_opt(10, 0, 0, 500_000)
            .unwrap();
        let dt = Utc.from_utc_datetime(&naive);
        assert_eq!(dt.to_wire(), "2024-01-01T10:00:00+00:00");
    }

    #[test]
    fn whole_seconds_unchanged() {
        let dt = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap().and_hms_opt(23, 59, 59).unwrap();
        assert_eq!(dt.to_wire(), "2023-12-31T23:59:59Z");
    }
}
