//! Sample creation timestamps (no chrono dependency).

use std::time::{SystemTime, UNIX_EPOCH};

/// Current UTC timestamp in ISO-8601 format, for [`Sample`] creation.
///
/// [`Sample`]: crate::dataset::Sample
pub fn now_iso8601() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    format_iso8601(secs)
}

fn format_iso8601(secs: u64) -> String {
    let (year, month, day) = ymd_from_days(secs / 86400);
    let tod = secs % 86400;
    format!(
        "{year:04}-{month:02}-{day:02}T{:02}:{:02}:{:02}Z",
        tod / 3600,
        (tod % 3600) / 60,
        tod % 60
    )
}

fn is_leap(year: u64) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

// Walk forward from the epoch. Timestamps here are always post-1970 and
// the walk is bounded by the year count, so simplicity wins over the
// closed-form calendar arithmetic.
fn ymd_from_days(mut days: u64) -> (u64, u64, u64) {
    let mut year = 1970;
    loop {
        let year_len = if is_leap(year) { 366 } else { 365 };
        if days < year_len {
            break;
        }
        days -= year_len;
        year += 1;
    }

    let month_lens = [
        31,
        if is_leap(year) { 29 } else { 28 },
        31,
        30,
        31,
        30,
        31,
        31,
        30,
        31,
        30,
        31,
    ];
    let mut month = 1;
    for len in month_lens {
        if days < len {
            break;
        }
        days -= len;
        month += 1;
    }
    (year, month, days + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch() {
        assert_eq!(format_iso8601(0), "1970-01-01T00:00:00Z");
    }

    #[test]
    fn test_known_instant() {
        assert_eq!(format_iso8601(1785585600), "2026-08-01T12:00:00Z");
    }

    #[test]
    fn test_leap_day() {
        assert_eq!(format_iso8601(1709164800), "2024-02-29T00:00:00Z");
        assert_eq!(format_iso8601(1709251199), "2024-02-29T23:59:59Z");
    }

    #[test]
    fn test_year_boundary() {
        // Last second of 2023 and first of 2024
        assert_eq!(format_iso8601(1704067199), "2023-12-31T23:59:59Z");
        assert_eq!(format_iso8601(1704067200), "2024-01-01T00:00:00Z");
    }

    #[test]
    fn test_century_leap_rule() {
        // 2100 is not a leap year: Feb 28 rolls straight into Mar 1
        assert_eq!(format_iso8601(4107456000), "2100-02-28T00:00:00Z");
        assert_eq!(format_iso8601(4107542400), "2100-03-01T00:00:00Z");
    }

    #[test]
    fn test_now_looks_current() {
        assert!(now_iso8601().starts_with("20"));
    }
}
