use std::ops::Index;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use lazy_static::lazy_static;
use regex::Regex;

const MILLIS_PER_DAY: i64 = 1000 * 60 * 60 * 24;

const ROMAN_HUNDREDS: [&str; 10] = ["", "C", "CC", "CCC", "CD", "D", "DC", "DCC", "DCCC", "CM"];
const ROMAN_TENS: [&str; 10] = ["", "X", "XX", "XXX", "XL", "L", "LX", "LXX", "LXXX", "XC"];
const ROMAN_ONES: [&str; 10] = ["", "I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX"];

fn to_int<T: std::str::FromStr>(num_str: &str, date_str: &str) -> Result<T, String> {
    match num_str.parse::<T>() {
        Ok(x) => Ok(x),
        Err(_) => Err(format!("Error parsing {} from the date {}", num_str, date_str)),
    }
}

/// Parses the date formats accepted in post metadata.
///
/// RFC 3339 values are converted to UTC. Besides that, `2024-03-01`,
/// `2024-03-01 10:42:32.123`, `2024-03-01T10:42` and `Mar 01, 2024` are accepted.
/// Anything else is an error, there is no lenient fallback.
pub fn parse_date_time(buf: &str) -> Result<NaiveDateTime, String> {
    lazy_static! {
        static ref DATE_TIME_REGEX: Regex = Regex::new(
            r"^(\d{4})-(\d{1,2})-(\d{1,2})(?:[T ](\d{1,2}):(\d{1,2})(?::(\d{1,2}))?(?:\.(\d{1,9}))?)?$"
        ).unwrap();
    }

    let buf = buf.trim();
    if let Ok(date_time) = DateTime::parse_from_rfc3339(buf) {
        return Ok(date_time.naive_utc());
    }

    if let Some(caps) = DATE_TIME_REGEX.captures(buf) {
        let to_i32 = |num_str: &str| to_int::<i32>(num_str, buf);
        let to_u32 = |num_str: &str| to_int::<u32>(num_str, buf);
        let or_zero = |idx: usize| caps.get(idx).map_or("0", |m| m.as_str());

        let y: i32 = to_i32(caps.index(1))?;
        let m: u32 = to_u32(caps.index(2))?;
        let d: u32 = to_u32(caps.index(3))?;
        let h: u32 = to_u32(or_zero(4))?;
        let mn: u32 = to_u32(or_zero(5))?;
        let s: u32 = to_u32(or_zero(6))?;
        // Fraction digits are right padded to nanoseconds
        let nanos: u32 = match caps.get(7) {
            Some(frac) => to_u32(&format!("{:0<9}", frac.as_str()))?,
            None => 0,
        };

        let date = NaiveDate::from_ymd_opt(y, m, d)
            .ok_or_else(|| format!("Invalid date {}", buf))?;
        let time = NaiveTime::from_hms_nano_opt(h, mn, s, nanos)
            .ok_or_else(|| format!("Invalid time {}", buf))?;
        return Ok(NaiveDateTime::new(date, time));
    }

    for fmt in ["%b %d, %Y", "%B %d, %Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(buf, fmt) {
            return Ok(date.and_time(NaiveTime::MIN));
        }
    }

    Err(format!("Unable to parse date time {}", buf))
}

/// Epoch milliseconds, the numeric form dates take in document metadata.
pub fn date_time_from_millis(millis: i64) -> Result<NaiveDateTime, String> {
    DateTime::from_timestamp_millis(millis)
        .map(|date_time| date_time.naive_utc())
        .ok_or_else(|| format!("Timestamp {} is out of range", millis))
}

/// Formats a post date for listings.
///
/// Without `today` the result is `Jan 05, 2024`. With it, the distance in whole days
/// is returned instead: `Today`, `Yesterday`, `12 days ago` or `In the future?`.
pub fn convert_to_date(date: &NaiveDateTime, today: Option<&NaiveDateTime>) -> String {
    let Some(today) = today else {
        return date.format("%b %d, %Y").to_string();
    };

    let days = (*today - *date).num_milliseconds().div_euclid(MILLIS_PER_DAY);
    match days {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        x if x < 0 => "In the future?".to_string(),
        x => format!("{} days ago", x),
    }
}

/// Roman numerals for series parts. Zero has no numeral and renders as an empty string.
pub fn romanize(num: u32) -> String {
    let thousands = (num / 1000) as usize;
    let hundreds = ROMAN_HUNDREDS[(num / 100 % 10) as usize];
    let tens = ROMAN_TENS[(num / 10 % 10) as usize];
    let ones = ROMAN_ONES[(num % 10) as usize];
    format!("{}{}{}{}", "M".repeat(thousands), hundreds, tens, ones)
}

/// `series-name` -> `Series Name`
pub fn alphabetize(text: &str) -> String {
    text.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd_hms(y: i32, m: u32, d: u32, h: u32, mn: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, mn, s).unwrap()
    }

    #[test]
    fn test_parse_date_time() {
        let date_time = parse_date_time("2017-09-10 10:42:32.123").unwrap();
        assert_eq!(date_time.format("%Y-%m-%d %H:%M:%S%.3f").to_string(), "2017-09-10 10:42:32.123");

        let date_time = parse_date_time("2017-09-10 10:42:32").unwrap();
        assert_eq!(date_time, ymd_hms(2017, 9, 10, 10, 42, 32));

        let date_time = parse_date_time("2017-09-10T10:42").unwrap();
        assert_eq!(date_time, ymd_hms(2017, 9, 10, 10, 42, 0));

        let date_time = parse_date_time("2024-01-01").unwrap();
        assert_eq!(date_time, ymd_hms(2024, 1, 1, 0, 0, 0));
    }

    #[test]
    fn test_parse_rfc3339_is_utc() {
        let date_time = parse_date_time("2024-01-14T10:00:00+02:00").unwrap();
        assert_eq!(date_time, ymd_hms(2024, 1, 14, 8, 0, 0));

        let date_time = parse_date_time("2024-01-14T10:00:00Z").unwrap();
        assert_eq!(date_time, ymd_hms(2024, 1, 14, 10, 0, 0));
    }

    #[test]
    fn test_parse_month_names() {
        assert_eq!(parse_date_time("Jan 05, 2024").unwrap(), ymd_hms(2024, 1, 5, 0, 0, 0));
        assert_eq!(parse_date_time("March 01, 2024").unwrap(), ymd_hms(2024, 3, 1, 0, 0, 0));
    }

    #[test]
    fn test_parse_invalid_dates() {
        assert!(parse_date_time("").is_err());
        assert!(parse_date_time("yesterday").is_err());
        assert!(parse_date_time("2024-13-01").is_err());
        assert!(parse_date_time("2024-02-30").is_err());
        assert!(parse_date_time("2024-01-01 25:00:00").is_err());
    }

    #[test]
    fn test_date_time_from_millis() {
        assert_eq!(date_time_from_millis(0).unwrap(), ymd_hms(1970, 1, 1, 0, 0, 0));
        assert_eq!(date_time_from_millis(1_704_067_200_000).unwrap(), ymd_hms(2024, 1, 1, 0, 0, 0));
        assert!(date_time_from_millis(i64::MAX).is_err());
    }

    #[test]
    fn test_convert_to_date() {
        let date = ymd_hms(2024, 1, 5, 18, 30, 0);
        assert_eq!(convert_to_date(&date, None), "Jan 05, 2024");

        assert_eq!(convert_to_date(&date, Some(&ymd_hms(2024, 1, 6, 1, 0, 0))), "Today");
        assert_eq!(convert_to_date(&date, Some(&ymd_hms(2024, 1, 6, 19, 0, 0))), "Yesterday");
        assert_eq!(convert_to_date(&date, Some(&ymd_hms(2024, 1, 20, 18, 30, 0))), "15 days ago");
        assert_eq!(convert_to_date(&date, Some(&ymd_hms(2024, 1, 5, 18, 0, 0))), "In the future?");
    }

    #[test]
    fn test_romanize() {
        assert_eq!(romanize(0), "");
        assert_eq!(romanize(1), "I");
        assert_eq!(romanize(4), "IV");
        assert_eq!(romanize(9), "IX");
        assert_eq!(romanize(14), "XIV");
        assert_eq!(romanize(49), "XLIX");
        assert_eq!(romanize(1994), "MCMXCIV");
        assert_eq!(romanize(4021), "MMMMXXI");
    }

    #[test]
    fn test_alphabetize() {
        assert_eq!(alphabetize("hello-world"), "Hello World");
        assert_eq!(alphabetize("rust"), "Rust");
        assert_eq!(alphabetize("über-cool"), "Über Cool");
        assert_eq!(alphabetize("double--dash"), "Double  Dash");
        assert_eq!(alphabetize(""), "");
    }
}
