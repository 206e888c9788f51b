//! Shared constants and time helpers.

use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds per second
pub const MS_PER_SECOND: i64 = 1_000;

/// Milliseconds per minute
pub const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;

/// Milliseconds per hour
pub const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;

/// Milliseconds per day
pub const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// Current wall-clock time as Unix milliseconds.
///
/// The only place the crate reads the system clock; everything downstream
/// receives the value as a parameter.
pub fn now_unix_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or_default()
}

/// Format Unix milliseconds as `"YYYY-MM-DD HH:MM UTC"`.
pub fn unix_ms_to_date_string(unix_ms: i64) -> String {
    let days_since_epoch = unix_ms.div_euclid(MS_PER_DAY);
    let ms_of_day = unix_ms.rem_euclid(MS_PER_DAY);

    let hours = ms_of_day / MS_PER_HOUR;
    let minutes = (ms_of_day % MS_PER_HOUR) / MS_PER_MINUTE;

    let (year, month, day) = days_to_ymd(days_since_epoch);

    format!(
        "{:04}-{:02}-{:02} {:02}:{:02} UTC",
        year, month, day, hours, minutes
    )
}

/// Convert days since Unix epoch to year, month, day
fn days_to_ymd(days: i64) -> (i32, u32, u32) {
    // Civil-from-days for the proleptic Gregorian calendar
    let shifted = days + 719468;

    let era = if shifted >= 0 {
        shifted / 146097
    } else {
        (shifted - 146096) / 146097
    };

    let day_of_era = (shifted - era * 146097) as u32;
    let year_of_era =
        (day_of_era - day_of_era / 1460 + day_of_era / 36524 - day_of_era / 146096) / 365;
    let year = (year_of_era as i64 + era * 400) as i32;
    let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
    let mp = (5 * day_of_year + 2) / 153;
    let day = day_of_year - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = if month <= 2 { year + 1 } else { year };

    (year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_string_epoch() {
        assert_eq!(unix_ms_to_date_string(0), "1970-01-01 00:00 UTC");
    }

    #[test]
    fn test_date_string_leap_day() {
        // 2024-02-29 12:34:56 UTC
        assert_eq!(
            unix_ms_to_date_string(1_709_210_096_000),
            "2024-02-29 12:34 UTC"
        );
    }

    #[test]
    fn test_date_string_before_epoch() {
        assert_eq!(unix_ms_to_date_string(-MS_PER_DAY), "1969-12-31 00:00 UTC");
        assert_eq!(unix_ms_to_date_string(-1), "1969-12-31 23:59 UTC");
    }

    #[test]
    fn test_now_is_after_2020() {
        assert!(now_unix_ms() > 1_577_836_800_000);
    }
}
