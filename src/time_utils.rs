use chrono::{DateTime, NaiveDate, Timelike, Utc};
use chrono_tz::Tz;

/// Resolves a stored IANA timezone name to the user's local calendar
/// date and hour. Unknown or empty names fall back to UTC.
pub fn local_date_and_hour(raw_tz: &str, utc_now: DateTime<Utc>) -> (NaiveDate, u32) {
    match raw_tz.trim().parse::<Tz>() {
        Ok(tz) => {
            let local = utc_now.with_timezone(&tz);
            (local.date_naive(), local.hour())
        }
        Err(_) => (utc_now.date_naive(), utc_now.hour()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn tokyo_is_nine_hours_ahead_of_utc() {
        let utc = Utc.with_ymd_and_hms(2025, 6, 18, 20, 0, 0).unwrap();
        let (date, hour) = local_date_and_hour("Asia/Tokyo", utc);
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 6, 19).unwrap());
        assert_eq!(hour, 5);
    }

    #[test]
    fn unknown_timezone_falls_back_to_utc() {
        let utc = Utc.with_ymd_and_hms(2025, 6, 18, 20, 0, 0).unwrap();
        let (date, hour) = local_date_and_hour("Mars/Olympus", utc);
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 6, 18).unwrap());
        assert_eq!(hour, 20);
    }
}
