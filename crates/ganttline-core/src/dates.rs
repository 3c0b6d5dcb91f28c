//! Date projection onto the day axis
//!
//! All chart positions are derived from whole calendar days counted from the
//! project's first day. Dates are `NaiveDate` values: a `YYYY-MM-DD` string is
//! read as a calendar day with no timezone attached, so day arithmetic gives
//! the same answer regardless of where the page is rendered.
//!
//! # Example
//!
//! ```rust
//! use ganttline_core::dates::{calendar_days, day_index, days_between, parse_local_date};
//!
//! let origin = parse_local_date("2024-01-01").unwrap();
//! let date = parse_local_date("2024-01-05").unwrap();
//!
//! assert_eq!(day_index(origin, date), 4);
//! assert_eq!(days_between(date, origin), 4);
//! assert_eq!(calendar_days(origin, date).len(), 5);
//! ```

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Date parsing error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("Malformed date '{0}': expected YYYY-MM-DD")]
    Malformed(String),

    #[error("Date '{0}' does not name a calendar day")]
    OutOfRange(String),
}

/// Parse a `YYYY-MM-DD` string as a calendar day.
///
/// Every component must be a non-empty run of ASCII digits. Numbers that do not
/// name a real day (month 13, February 30) are rejected rather than rolled over
/// into the following month.
pub fn parse_local_date(s: &str) -> Result<NaiveDate, DateError> {
    let text = s.trim();
    let mut parts = text.split('-');

    let (Some(year), Some(month), Some(day), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(DateError::Malformed(s.to_string()));
    };

    let year: i32 = parse_component(year).ok_or_else(|| DateError::Malformed(s.to_string()))?;
    let month: u32 = parse_component(month).ok_or_else(|| DateError::Malformed(s.to_string()))?;
    let day: u32 = parse_component(day).ok_or_else(|| DateError::Malformed(s.to_string()))?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| DateError::OutOfRange(s.to_string()))
}

fn parse_component<T: std::str::FromStr>(part: &str) -> Option<T> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

/// Signed number of days from `origin` to `date` (column index on the day axis)
pub fn day_index(origin: NaiveDate, date: NaiveDate) -> i64 {
    (date - origin).num_days()
}

/// Number of days separating two dates, regardless of their order
pub fn days_between(a: NaiveDate, b: NaiveDate) -> i64 {
    (b - a).num_days().abs()
}

/// Every calendar day from `min` to `max`, both included.
///
/// Empty when `min > max`.
pub fn calendar_days(min: NaiveDate, max: NaiveDate) -> Vec<NaiveDate> {
    min.iter_days().take_while(|day| *day <= max).collect()
}

/// Inclusive date range used for layout
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Parse both ends of a range
    pub fn parse(start: &str, end: &str) -> Result<Self, DateError> {
        Ok(Self {
            start: parse_local_date(start)?,
            end: parse_local_date(end)?,
        })
    }

    /// Smallest range covering both `self` and `other`
    pub fn union(self, other: Self) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Inclusive duration in days (a one-day range spans one cell)
    pub fn inclusive_days(&self) -> i64 {
        days_between(self.start, self.end) + 1
    }
}

/// Locale used for the display strings of the timeline
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateLocale {
    #[default]
    Es,
    En,
}

const MONTHS_ES: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

const MONTHS_ES_SHORT: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sept", "oct", "nov", "dic",
];

impl DateLocale {
    /// Short day label, e.g. `05 ene`
    pub fn format_day(&self, date: NaiveDate) -> String {
        match self {
            DateLocale::Es => format!(
                "{:02} {}",
                date.day(),
                MONTHS_ES_SHORT[date.month0() as usize]
            ),
            DateLocale::En => date.format("%d %b").to_string(),
        }
    }

    /// Month heading, e.g. `enero de 2024`
    pub fn format_month_year(&self, date: NaiveDate) -> String {
        match self {
            DateLocale::Es => format!("{} de {}", MONTHS_ES[date.month0() as usize], date.year()),
            DateLocale::En => date.format("%B %Y").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn parse_keeps_calendar_components() {
        let parsed = parse_local_date("2024-03-31").unwrap();
        assert_eq!((parsed.year(), parsed.month(), parsed.day()), (2024, 3, 31));

        let padded = parse_local_date("2024-1-5").unwrap();
        assert_eq!(padded, date(2024, 1, 5));
    }

    #[test]
    fn parse_rejects_malformed_text() {
        for input in ["", "2024", "2024-01", "2024-01-02-03", "2024-0a-01", "2024--01", "01/02/2024"] {
            assert!(
                matches!(parse_local_date(input), Err(DateError::Malformed(_))),
                "expected malformed: {input:?}"
            );
        }
    }

    #[test]
    fn parse_rejects_days_that_do_not_exist() {
        assert_eq!(
            parse_local_date("2024-02-30"),
            Err(DateError::OutOfRange("2024-02-30".into()))
        );
        assert!(parse_local_date("2024-13-01").is_err());
        assert!(parse_local_date("2023-02-29").is_err());
        assert!(parse_local_date("2024-02-29").is_ok());
    }

    #[test]
    fn day_index_is_signed() {
        let origin = date(2024, 1, 10);
        assert_eq!(day_index(origin, origin), 0);
        assert_eq!(day_index(origin, date(2024, 1, 11)), 1);
        assert_eq!(day_index(origin, date(2024, 1, 9)), -1);
        assert_eq!(day_index(origin, date(2024, 2, 10)), 31);
    }

    #[test]
    fn days_between_is_symmetric() {
        let a = date(2024, 1, 1);
        let b = date(2024, 1, 6);
        assert_eq!(days_between(a, a), 0);
        assert_eq!(days_between(a, b), 5);
        assert_eq!(days_between(b, a), 5);
    }

    #[test]
    fn calendar_days_are_inclusive() {
        let min = date(2024, 2, 27);
        let max = date(2024, 3, 2);
        let days = calendar_days(min, max);
        assert_eq!(days.len() as i64, day_index(min, max) + 1);
        assert_eq!(days.first(), Some(&min));
        assert_eq!(days.last(), Some(&max));
        assert!(days.contains(&date(2024, 2, 29)));
    }

    #[test]
    fn calendar_days_empty_when_reversed() {
        assert!(calendar_days(date(2024, 1, 2), date(2024, 1, 1)).is_empty());
        assert_eq!(calendar_days(date(2024, 1, 1), date(2024, 1, 1)).len(), 1);
    }

    #[test]
    fn range_union_and_duration() {
        let a = DateRange::new(date(2024, 1, 1), date(2024, 1, 5));
        let b = DateRange::new(date(2024, 1, 3), date(2024, 1, 7));
        let merged = a.union(b);
        assert_eq!(merged, DateRange::new(date(2024, 1, 1), date(2024, 1, 7)));
        assert_eq!(merged.inclusive_days(), 7);
    }

    #[test]
    fn spanish_labels() {
        let locale = DateLocale::Es;
        assert_eq!(locale.format_day(date(2024, 1, 5)), "05 ene");
        assert_eq!(locale.format_month_year(date(2024, 9, 1)), "septiembre de 2024");
    }

    #[test]
    fn english_labels() {
        let locale = DateLocale::En;
        assert_eq!(locale.format_day(date(2024, 1, 5)), "05 Jan");
        assert_eq!(locale.format_month_year(date(2024, 1, 5)), "January 2024");
    }
}
