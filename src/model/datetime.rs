// Positional parsing of the service's fixed-width date strings.
//
// The wire format is always `YYYY-MM-DDTHH:MM:SS` (date-time) or
// `YYYY-MM-DD...` (date). Fields are cut out by byte offset rather than
// through a general-purpose date parser; anything that does not fit the
// layout is a malformed-input failure, not a recoverable condition.
use crate::error::{Error, Result};
use chrono::{NaiveDate, NaiveDateTime};

fn field(value: &str, range: std::ops::Range<usize>) -> Result<u32> {
    value
        .get(range)
        .and_then(|s| s.parse::<u32>().ok())
        .ok_or_else(|| Error::Format(value.to_string()))
}

/// Parse `YYYY-MM-DD...` into a date. Input must be at least 10 bytes.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    let year = field(value, 0..4)?;
    let month = field(value, 5..7)?;
    let day = field(value, 8..10)?;
    NaiveDate::from_ymd_opt(year as i32, month, day)
        .ok_or_else(|| Error::Format(value.to_string()))
}

/// Parse `YYYY-MM-DDTHH:MM:SS` into a date-time. Input must be at least 19 bytes.
pub fn parse_datetime(value: &str) -> Result<NaiveDateTime> {
    let date = parse_date(value)?;
    let hour = field(value, 11..13)?;
    let minute = field(value, 14..16)?;
    let second = field(value, 17..19)?;
    date.and_hms_opt(hour, minute, second)
        .ok_or_else(|| Error::Format(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_datetime_at_fixed_offsets() {
        let dt = parse_datetime("2009-01-28T14:30:18").unwrap();
        assert_eq!(dt.to_string(), "2009-01-28 14:30:18");
    }

    #[test]
    fn parses_date_ignoring_trailing_time() {
        let d = parse_date("2011-12-31T00:00:00").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2011, 12, 31).unwrap());
    }

    #[test]
    fn rejects_short_input() {
        assert!(matches!(parse_datetime("2011-12-31"), Err(Error::Format(_))));
        assert!(matches!(parse_date("2011-12"), Err(Error::Format(_))));
    }

    #[test]
    fn rejects_non_numeric_fields() {
        assert!(matches!(
            parse_datetime("2011-12-31Txx:00:00"),
            Err(Error::Format(_))
        ));
    }

    #[test]
    fn rejects_out_of_range_calendar_values() {
        assert!(matches!(parse_date("2011-13-01"), Err(Error::Format(_))));
    }
}
