use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, Utc};

/// Parse a date supplied on the command line or returned by a service.
///
/// Accepts full RFC 3339 timestamps and bare `YYYY-MM-DD` dates, which are
/// taken as midnight UTC.
pub fn parse_date(input: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(date) = DateTime::parse_from_rfc3339(input) {
        return Ok(date.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
        .map_err(|_| format!("Unrecognized date: {input}"))
}

/// Format a timestamp the way the output document expects it:
/// ISO 8601 with milliseconds and a `Z` suffix.
pub fn format_date(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_date_bare() {
        let date = parse_date("2023-01-02").unwrap();
        assert_eq!(date, Utc.with_ymd_and_hms(2023, 1, 2, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_date_rfc3339() {
        let date = parse_date("2023-01-02T03:04:05+01:00").unwrap();
        assert_eq!(date, Utc.with_ymd_and_hms(2023, 1, 2, 2, 4, 5).unwrap());
    }

    #[test]
    fn test_parse_date_rfc3339_with_millis() {
        let date = parse_date("2023-01-02T03:04:05.678000+00:00").unwrap();
        assert_eq!(format_date(date), "2023-01-02T03:04:05.678Z");
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert!(parse_date("yesterday").is_err());
    }

    #[test]
    fn test_format_date_iso_millis() {
        let date = Utc.with_ymd_and_hms(2023, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(format_date(date), "2023-01-02T03:04:05.000Z");
    }
}
