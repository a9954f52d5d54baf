use chrono::NaiveDateTime;
use toml::value::Datetime;

use crate::text_utils::parse_date_time;

/// Converts a TOML date or date-time into a post date.
///
/// Offset date-times are normalised to UTC, local ones are taken as they are.
/// A bare TOML time (`07:32:00`) is not a date and is rejected.
pub fn toml_date_time(value: &Datetime) -> Result<NaiveDateTime, String> {
    if value.date.is_none() {
        return Err(format!("{} is a time without a date", value));
    }
    parse_date_time(&value.to_string())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde::Deserialize;

    use super::*;

    #[derive(Deserialize)]
    struct PostData {
        date: Datetime,
    }

    fn date_of(toml_str: &str) -> Result<NaiveDateTime, String> {
        let data: PostData = toml::from_str(toml_str).unwrap();
        toml_date_time(&data.date)
    }

    #[test]
    fn test_local_date() {
        let date = date_of("date = 2024-04-22").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 4, 22).unwrap().and_hms_opt(0, 0, 0).unwrap());
    }

    #[test]
    fn test_local_date_time() {
        let date = date_of("date = 2024-04-22T07:32:00").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 4, 22).unwrap().and_hms_opt(7, 32, 0).unwrap());
    }

    #[test]
    fn test_offset_date_time() {
        let date = date_of("date = 2024-04-22T07:32:00-03:00").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 4, 22).unwrap().and_hms_opt(10, 32, 0).unwrap());
    }

    #[test]
    fn test_time_only() {
        assert!(date_of("date = 07:32:00").is_err());
    }
}
