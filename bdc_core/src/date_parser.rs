//! Turn the council's human-readable dates into calendar days.
//!
//! Pages usually say something like "Monday 3rd June", so the common shapes are matched
//! directly. Whatever doesn't match is handed to `fuzzydate`.

use chrono::{Datelike, Duration, NaiveDate, NaiveTime};
use log::debug;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::{Error, Result};

macro_rules! month_pattern {
    () => {
        r"jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?"
    };
}

static DAY_FIRST_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?x)
            \b(?P<day>\d{1,2})(?:st|nd|rd|th)? # the day, maybe ordinal
            \s+(?:of\s+)?
            (?P<month>",
        month_pattern!(),
        r")\b\.? # the month name or its abbreviation
            (?:,?\s+(?P<year>\d{4}))? # the year
        "
    ))
    .unwrap()
});
static MONTH_FIRST_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?x)
            \b(?P<month>",
        month_pattern!(),
        r")\b\.? # the month name or its abbreviation
            \s+(?P<day>\d{1,2})(?:st|nd|rd|th)?\b # the day, maybe ordinal
            (?:,?\s+(?P<year>\d{4}))? # the year
        "
    ))
    .unwrap()
});
static ISO_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?P<year>\d{4})-(?P<month>\d{2})-(?P<day>\d{2})\b").unwrap());

/// Parse a date phrase into the calendar day it names.
///
/// `today` anchors relative phrases. A phrase without a year resolves to the year which puts
/// the date closest to `today`.
pub fn parse_date(text: &str, today: NaiveDate) -> Result<NaiveDate> {
    let lowercase = text.trim().to_lowercase();
    if lowercase.contains("tomorrow") {
        return Ok(today + Duration::days(1));
    }
    if lowercase.contains("today") {
        return Ok(today);
    }
    let named_date = |captures: Captures| -> Option<NaiveDate> {
        let day: u32 = captures["day"].parse().ok()?;
        let month = month_number(&captures["month"])?;
        match captures.name("year") {
            Some(year) => NaiveDate::from_ymd_opt(year.as_str().parse().ok()?, month, day),
            None => closest_to(today, month, day),
        }
    };
    let matched = if let Some(captures) = ISO_REGEX.captures(&lowercase) {
        Some(NaiveDate::from_ymd_opt(
            captures["year"].parse().unwrap_or_default(),
            captures["month"].parse().unwrap_or_default(),
            captures["day"].parse().unwrap_or_default(),
        ))
    } else {
        DAY_FIRST_REGEX
            .captures(&lowercase)
            .or_else(|| MONTH_FIRST_REGEX.captures(&lowercase))
            .map(named_date)
    };
    match matched {
        Some(Some(date)) => Ok(date),
        // the text names a date which doesn't exist, e.g. the 31st of June
        Some(None) => Err(Error::DateParse(text.to_owned())),
        None => {
            debug!("Falling back to fuzzy parsing for {text:?}");
            fuzzydate::parse_relative_to(lowercase.as_str(), today.and_time(NaiveTime::MIN))
                .map(|date_time| date_time.date())
                .map_err(|_| Error::DateParse(text.to_owned()))
        }
    }
}

/// The month number for a month name or its abbreviation.
fn month_number(name: &str) -> Option<u32> {
    let month = match name.get(0..3)? {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}

/// The valid date with this month and day which is closest to `today`.
fn closest_to(today: NaiveDate, month: u32, day: u32) -> Option<NaiveDate> {
    [today.year(), today.year() + 1, today.year() - 1]
        .into_iter()
        .filter_map(|year| NaiveDate::from_ymd_opt(year, month, day))
        .min_by_key(|date| (*date - today).num_days().abs())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::{date_parser::parse_date, Error};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 30).unwrap()
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_day_first() {
        assert_eq!(parse_date("Monday 3rd June", today()).unwrap(), date(2024, 6, 3));
        assert_eq!(parse_date("3 June 2024", today()).unwrap(), date(2024, 6, 3));
        assert_eq!(parse_date("Tue 10th of Sept", today()).unwrap(), date(2024, 9, 10));
        assert_eq!(parse_date("  Friday 21st June  ", today()).unwrap(), date(2024, 6, 21));
        assert_eq!(parse_date("1st Jan. 2025", today()).unwrap(), date(2025, 1, 1));
    }

    #[test]
    fn test_month_first() {
        assert_eq!(parse_date("June 3rd", today()).unwrap(), date(2024, 6, 3));
        assert_eq!(parse_date("Wednesday, Jul 17, 2024", today()).unwrap(), date(2024, 7, 17));
    }

    #[test]
    fn test_iso() {
        assert_eq!(parse_date("2024-06-03", today()).unwrap(), date(2024, 6, 3));
    }

    #[test]
    fn test_relative() {
        assert_eq!(parse_date("Today", today()).unwrap(), today());
        assert_eq!(parse_date("Tomorrow", today()).unwrap(), date(2024, 5, 31));
    }

    #[test]
    fn test_fuzzy_relative_to_today() {
        assert_eq!(parse_date("next monday", today()).unwrap(), date(2024, 6, 3));
    }

    #[test]
    fn test_year_rollover() {
        let today = date(2024, 12, 28);
        assert_eq!(parse_date("Thursday 2nd January", today).unwrap(), date(2025, 1, 2));
        assert_eq!(parse_date("Monday 23rd December", today).unwrap(), date(2024, 12, 23));
        let today = date(2025, 1, 3);
        assert_eq!(parse_date("Monday 30th December", today).unwrap(), date(2024, 12, 30));
    }

    #[test]
    fn test_impossible_date() {
        assert!(matches!(
            parse_date("Monday 31st June 2024", today()),
            Err(Error::DateParse(_))
        ));
        assert!(matches!(
            parse_date("2024-02-30", today()),
            Err(Error::DateParse(_))
        ));
    }

    #[test]
    fn test_unparseable() {
        match parse_date("no collection scheduled", today()) {
            Err(Error::DateParse(text)) => assert_eq!(text, "no collection scheduled"),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
