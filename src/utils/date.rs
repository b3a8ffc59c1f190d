//! UTC datetime utilities without timezone dependencies.
//!
//! Provides a lightweight `DateTimeUtc` struct used for the provenance
//! header timestamps, converted directly from the system clock.

use std::time::SystemTime;

/// UTC datetime without timezone complexity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTimeUtc {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl DateTimeUtc {
    pub const fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Current UTC time from the system clock.
    pub fn now() -> Self {
        let secs = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self::from_unix(secs)
    }

    /// Convert seconds since the Unix epoch to a civil UTC datetime.
    #[allow(clippy::cast_possible_truncation)] // Ranges are bounded by the civil conversion
    pub const fn from_unix(secs: u64) -> Self {
        let days = secs / 86_400;
        let rem = secs % 86_400;

        // Civil-from-days (Howard Hinnant's algorithm)
        let z = days as i64 + 719_468;
        let era = z / 146_097;
        let doe = z - era * 146_097;
        let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
        let y = yoe + era * 400;
        let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
        let mp = (5 * doy + 2) / 153;
        let d = doy - (153 * mp + 2) / 5 + 1;
        let m = if mp < 10 { mp + 3 } else { mp - 9 };
        let year = if m <= 2 { y + 1 } else { y };

        Self {
            year: year as u16,
            month: m as u8,
            day: d as u8,
            hour: (rem / 3600) as u8,
            minute: ((rem / 60) % 60) as u8,
            second: (rem % 60) as u8,
        }
    }

    /// Format as `YYYY-MM-DD HH:MM:SS`.
    pub fn format(self) -> String {
        format!(
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_unix_epoch() {
        let dt = DateTimeUtc::from_unix(0);
        assert_eq!(dt, DateTimeUtc::new(1970, 1, 1, 0, 0, 0));
    }

    #[test]
    fn test_from_unix_known_instant() {
        // 2024-06-15T14:30:45Z
        let dt = DateTimeUtc::from_unix(1_718_461_845);
        assert_eq!(dt, DateTimeUtc::new(2024, 6, 15, 14, 30, 45));
    }

    #[test]
    fn test_from_unix_leap_day() {
        // 2024-02-29T00:00:00Z
        let dt = DateTimeUtc::from_unix(1_709_164_800);
        assert_eq!(dt, DateTimeUtc::new(2024, 2, 29, 0, 0, 0));
    }

    #[test]
    fn test_format_pads_fields() {
        let dt = DateTimeUtc::new(2024, 6, 5, 9, 3, 7);
        assert_eq!(dt.format(), "2024-06-05 09:03:07");
    }

    #[test]
    fn test_now_is_plausible() {
        let dt = DateTimeUtc::now();
        assert!(dt.year >= 2024);
        assert!((1..=12).contains(&dt.month));
        assert!((1..=31).contains(&dt.day));
    }
}
