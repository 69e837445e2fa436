//! Time related utils.

use chrono::Utc;

/// The time type used across lakeload, always UTC.
pub type DateTime = chrono::DateTime<Utc>;

/// Take the current UTC time.
pub fn now() -> DateTime {
    Utc::now()
}

/// Format a time into an RFC1123 http date, the format `x-ms-date` expects.
///
/// e.g. `Mon, 01 Jan 2024 00:00:00 GMT`
pub fn format_http_date(t: DateTime) -> String {
    t.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_format_http_date() {
        let t = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(format_http_date(t), "Mon, 01 Jan 2024 00:00:00 GMT");

        let t = Utc.with_ymd_and_hms(1997, 11, 21, 9, 55, 6).unwrap();
        assert_eq!(format_http_date(t), "Fri, 21 Nov 1997 09:55:06 GMT");
    }
}
