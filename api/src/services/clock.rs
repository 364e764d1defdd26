//! Clock and timestamp formatting.
//!
//! Timestamps are written to the sheet as RFC 3339 UTC and localized only when
//! rendered into a response.

use chrono::{DateTime, SecondsFormat, Utc};
use chrono_tz::Tz;

/// Source of "now", swappable in tests
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Normalized form stored in the sheet
pub fn storage_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Render a stored timestamp in the display zone (`19/10/2026, 3:45:12 pm`).
///
/// Rows written by hand or by older tooling may hold free-form text; those
/// are returned untouched.
pub fn display_timestamp(stored: &str, zone: Tz) -> String {
    match DateTime::parse_from_rfc3339(stored.trim()) {
        Ok(at) => at
            .with_timezone(&zone)
            .format("%d/%m/%Y, %-I:%M:%S %P")
            .to_string(),
        Err(_) => stored.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 10, 15, 42).unwrap()
    }

    #[test]
    fn test_storage_timestamp_is_utc_rfc3339() {
        assert_eq!(storage_timestamp(instant()), "2026-10-19T10:15:42Z");
    }

    #[test]
    fn test_display_timestamp_localizes() {
        let stored = storage_timestamp(instant());
        assert_eq!(
            display_timestamp(&stored, chrono_tz::Asia::Kolkata),
            "19/10/2026, 3:45:42 pm"
        );
        assert_eq!(
            display_timestamp(&stored, chrono_tz::UTC),
            "19/10/2026, 10:15:42 am"
        );
    }

    #[test]
    fn test_display_timestamp_passes_through_legacy_text() {
        assert_eq!(
            display_timestamp("21/7/2025, 9:00:00 am", chrono_tz::Asia::Kolkata),
            "21/7/2025, 9:00:00 am"
        );
        assert_eq!(display_timestamp("", chrono_tz::Asia::Kolkata), "");
    }

    #[test]
    fn test_fixed_clock() {
        assert_eq!(FixedClock(instant()).now(), instant());
    }
}
