//! Calendar dates used by every calendar component.
//!
//! ## Usage
//!
//! Build dates with [`CalendarDate::new`] or [`parse_date`], then step them
//! with [`CalendarDate::add_months`] and [`CalendarDate::add_years`]. Month
//! and year steps clamp the day of month instead of overflowing into the
//! following month.
use std::{fmt, fmt::Write as _, str::FromStr};

use chrono::{DateTime, Datelike, Days, Local, Months, NaiveDate, NaiveDateTime, Weekday};
use tracing::debug;

use crate::error::DateParseError;

const MILLIS_PER_DAY: i64 = 86_400_000;
const DATE_STRING_FORMAT: &str = "%Y-%m-%d";

/// A day on the proleptic Gregorian calendar, without time or zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Creates a date if the year, month (1-12) and day form a real date.
    pub fn new(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Wraps an existing chrono date.
    pub fn from_naive(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Returns the wrapped chrono date.
    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }

    /// Returns the current local date.
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    /// Returns the year.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month (1-12).
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day of the month (1-31).
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Returns the weekday.
    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// Returns the weekday as an index where Sunday is 0.
    pub fn weekday_from_sunday(&self) -> u32 {
        self.0.weekday().num_days_from_sunday()
    }

    /// Returns the ISO 8601 week number.
    pub fn iso_week(&self) -> u32 {
        self.0.iso_week().week()
    }

    /// Returns the first day of this date's month.
    pub fn first_of_month(&self) -> Self {
        Self(self.0.with_day(1).unwrap_or(self.0))
    }

    /// Returns the last day of this date's month.
    pub fn last_of_month(&self) -> Self {
        self.first_of_month().add_months(1).add_days(-1)
    }

    /// Returns the number of days in this date's month.
    pub fn days_in_month(&self) -> u32 {
        self.last_of_month().day()
    }

    /// Returns `(year, month)`.
    pub fn year_month(&self) -> (i32, u32) {
        (self.year(), self.month())
    }

    /// Returns a running month counter usable for month differences.
    pub fn month_ordinal(&self) -> i64 {
        i64::from(self.year()) * 12 + i64::from(self.month()) - 1
    }

    /// Adds (or subtracts) whole months.
    ///
    /// The day of month is clamped to the target month's length, so
    /// January 31 plus one month is the last day of February. Results outside
    /// the representable range leave the date unchanged.
    pub fn add_months(&self, delta: i32) -> Self {
        let months = Months::new(delta.unsigned_abs());
        let stepped = if delta >= 0 {
            self.0.checked_add_months(months)
        } else {
            self.0.checked_sub_months(months)
        };
        match stepped {
            Some(date) => Self(date),
            None => {
                debug!(date = %self, delta, "month step out of range, keeping date");
                *self
            }
        }
    }

    /// Adds (or subtracts) whole years with the same clamping as
    /// [`CalendarDate::add_months`].
    pub fn add_years(&self, delta: i32) -> Self {
        self.add_months(delta.saturating_mul(12))
    }

    /// Adds (or subtracts) days. Results outside the representable range
    /// leave the date unchanged.
    pub fn add_days(&self, delta: i64) -> Self {
        let days = Days::new(delta.unsigned_abs());
        let stepped = if delta >= 0 {
            self.0.checked_add_days(days)
        } else {
            self.0.checked_sub_days(days)
        };
        stepped.map(Self).unwrap_or(*self)
    }

    /// Returns the fractional number of months from `self` to `other`.
    ///
    /// Whole months come from the month counters; the remainder is the day
    /// difference expressed as a fraction of `other`'s month length.
    pub fn diff_months(&self, other: &CalendarDate) -> f64 {
        let whole = (other.month_ordinal() - self.month_ordinal()) as f64;
        let days = f64::from(other.day()) - f64::from(self.day());
        whole + days / f64::from(other.days_in_month())
    }

    /// Returns the number of whole days from `self` to `other`.
    pub fn diff_days(&self, other: &CalendarDate) -> i64 {
        other.0.signed_duration_since(self.0).num_days()
    }

    /// Returns milliseconds since the Unix epoch at UTC midnight of this date.
    pub fn timestamp_millis(&self) -> i64 {
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or(NaiveDate::MIN);
        self.0.signed_duration_since(epoch).num_days() * MILLIS_PER_DAY
    }

    /// Formats the date with a strftime pattern.
    ///
    /// Returns `None` when the pattern contains an unsupported specifier.
    pub fn format(&self, pattern: &str) -> Option<String> {
        let mut out = String::new();
        write!(out, "{}", self.0.format(pattern)).ok()?;
        Some(out)
    }

    /// Returns the `YYYY-MM-DD` representation.
    pub fn date_string(&self) -> String {
        self.0.format(DATE_STRING_FORMAT).to_string()
    }

    /// Converts the date into the callback payload handed to consumers.
    pub fn to_data(&self) -> DateData {
        DateData::from(*self)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_STRING_FORMAT))
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl FromStr for CalendarDate {
    type Err = DateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_date(s)
    }
}

/// Date payload passed to consumer callbacks.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct DateData {
    /// Full year.
    pub year: i32,
    /// Month (1-12).
    pub month: u32,
    /// Day of month (1-31).
    pub day: u32,
    /// Milliseconds since the Unix epoch at UTC midnight.
    pub timestamp: i64,
    /// `YYYY-MM-DD`.
    pub date_string: String,
}

impl From<CalendarDate> for DateData {
    fn from(date: CalendarDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
            timestamp: date.timestamp_millis(),
            date_string: date.date_string(),
        }
    }
}

impl DateData {
    /// Returns the date the payload describes, if its fields form a real date.
    pub fn to_date(&self) -> Option<CalendarDate> {
        CalendarDate::new(self.year, self.month, self.day)
    }
}

/// Parses a date from `YYYY-MM-DD`, an RFC 3339 timestamp or a
/// `YYYY-MM-DDTHH:MM:SS` local timestamp.
///
/// # Examples
///
/// ```
/// use calendar_foundation::{CalendarDate, parse_date};
///
/// let date = parse_date("2024-03-15").unwrap();
/// assert_eq!(date, CalendarDate::new(2024, 3, 15).unwrap());
/// assert!(parse_date("not a date").is_err());
/// ```
pub fn parse_date(input: &str) -> Result<CalendarDate, DateParseError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(DateParseError::Empty);
    }

    match NaiveDate::parse_from_str(input, DATE_STRING_FORMAT) {
        Ok(date) => Ok(CalendarDate(date)),
        Err(source) => {
            if let Ok(timestamp) = DateTime::parse_from_rfc3339(input) {
                return Ok(CalendarDate(timestamp.date_naive()));
            }
            if let Ok(timestamp) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S") {
                return Ok(CalendarDate(timestamp.date()));
            }
            Err(DateParseError::Invalid {
                input: input.to_string(),
                source,
            })
        }
    }
}

/// Parses a date, treating malformed input as absent.
pub fn try_parse_date(input: &str) -> Option<CalendarDate> {
    match parse_date(input) {
        Ok(date) => Some(date),
        Err(err) => {
            debug!(%err, "ignoring unparsable date");
            None
        }
    }
}

/// Returns true when both dates fall in the same year and month.
pub fn same_month(a: CalendarDate, b: CalendarDate) -> bool {
    a.year_month() == b.year_month()
}

/// Returns true when both dates are the same calendar day.
pub fn same_date(a: CalendarDate, b: CalendarDate) -> bool {
    a == b
}

/// Returns true when `a` is on or after `b`.
pub fn is_gte(a: CalendarDate, b: CalendarDate) -> bool {
    a >= b
}

/// Returns true when `a` is on or before `b`.
pub fn is_lte(a: CalendarDate, b: CalendarDate) -> bool {
    a <= b
}

/// Returns true when `a`'s month is strictly after `b`'s month.
pub fn is_later_month(a: CalendarDate, b: CalendarDate) -> bool {
    a.month_ordinal() > b.month_ordinal()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> CalendarDate {
        CalendarDate::new(y, m, d).expect("valid test date")
    }

    #[test]
    fn rejects_impossible_dates() {
        assert!(CalendarDate::new(2023, 2, 29).is_none());
        assert!(CalendarDate::new(2024, 13, 1).is_none());
        assert!(CalendarDate::new(2024, 2, 29).is_some());
    }

    #[test]
    fn month_step_clamps_day_of_month() {
        assert_eq!(date(2023, 1, 31).add_months(1), date(2023, 2, 28));
        assert_eq!(date(2024, 1, 31).add_months(1), date(2024, 2, 29));
        assert_eq!(date(2024, 3, 31).add_months(-1), date(2024, 2, 29));
        assert_eq!(date(2024, 1, 15).add_months(1), date(2024, 2, 15));
        assert_eq!(date(2024, 12, 10).add_months(1), date(2025, 1, 10));
    }

    #[test]
    fn year_step_clamps_leap_day() {
        assert_eq!(date(2024, 2, 29).add_years(1), date(2025, 2, 28));
        assert_eq!(date(2024, 2, 29).add_years(4), date(2028, 2, 29));
        assert_eq!(date(2024, 5, 3).add_years(-1), date(2023, 5, 3));
    }

    #[test]
    fn month_boundaries() {
        let d = date(2024, 2, 10);
        assert_eq!(d.first_of_month(), date(2024, 2, 1));
        assert_eq!(d.last_of_month(), date(2024, 2, 29));
        assert_eq!(d.days_in_month(), 29);
        assert_eq!(date(2023, 12, 5).last_of_month(), date(2023, 12, 31));
    }

    #[test]
    fn diff_months_between_first_days_is_whole() {
        let a = date(2024, 3, 1);
        assert_eq!(a.diff_months(&date(2024, 5, 1)), 2.0);
        assert_eq!(a.diff_months(&date(2023, 3, 1)), -12.0);
        let partial = a.diff_months(&date(2024, 3, 16));
        assert!(partial > 0.0 && partial < 1.0);
    }

    #[test]
    fn parse_accepts_supported_layouts() {
        assert_eq!(parse_date("2024-03-15"), Ok(date(2024, 3, 15)));
        assert_eq!(parse_date(" 2024-03-15 "), Ok(date(2024, 3, 15)));
        assert_eq!(
            parse_date("2024-03-15T10:30:00+02:00"),
            Ok(date(2024, 3, 15))
        );
        assert_eq!(parse_date("2024-03-15T23:59:59"), Ok(date(2024, 3, 15)));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(parse_date(""), Err(DateParseError::Empty));
        assert!(matches!(
            parse_date("2024-02-30"),
            Err(DateParseError::Invalid { .. })
        ));
        assert!(try_parse_date("tomorrow").is_none());
    }

    #[test]
    fn date_data_carries_epoch_millis() {
        let data = date(1970, 1, 2).to_data();
        assert_eq!(data.timestamp, 86_400_000);
        assert_eq!(data.date_string, "1970-01-02");
        assert_eq!(data.to_date(), Some(date(1970, 1, 2)));
    }

    #[test]
    fn format_handles_bad_patterns() {
        let d = date(2024, 3, 5);
        assert_eq!(d.format("%B %Y").as_deref(), Some("March 2024"));
        assert_eq!(d.format("%Q"), None);
    }

    #[test]
    fn comparison_predicates() {
        let a = date(2024, 3, 5);
        let b = date(2024, 3, 28);
        assert!(same_month(a, b));
        assert!(!same_date(a, b));
        assert!(is_lte(a, b) && is_gte(b, a));
        assert!(is_gte(a, a) && is_lte(a, a));
        assert!(is_later_month(date(2024, 4, 1), b));
        assert!(!is_later_month(b, a));
    }
}
