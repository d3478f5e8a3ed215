//! Month and weekday names.
//!
//! ## Usage
//!
//! ```
//! use calendar_foundation::{CalendarDate, Locale};
//! use chrono::Weekday;
//!
//! let locale = Locale::english();
//! let date = CalendarDate::new(2024, 3, 1).unwrap();
//! assert_eq!(locale.month_year_label(date), "Mar 2024");
//! assert_eq!(locale.week_day_names(Weekday::Mon)[0], "Mon");
//! ```

use chrono::Weekday;

use crate::date::CalendarDate;

/// Localized names used by headers and collapsed list rows.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Locale {
    /// Full month names, January first.
    pub month_names: [String; 12],
    /// Abbreviated month names, January first.
    pub month_names_short: [String; 12],
    /// Full weekday names, Sunday first.
    pub day_names: [String; 7],
    /// Abbreviated weekday names, Sunday first.
    pub day_names_short: [String; 7],
}

impl Locale {
    /// English names.
    pub fn english() -> Self {
        Self {
            month_names: [
                "January",
                "February",
                "March",
                "April",
                "May",
                "June",
                "July",
                "August",
                "September",
                "October",
                "November",
                "December",
            ]
            .map(String::from),
            month_names_short: [
                "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
            ]
            .map(String::from),
            day_names: [
                "Sunday",
                "Monday",
                "Tuesday",
                "Wednesday",
                "Thursday",
                "Friday",
                "Saturday",
            ]
            .map(String::from),
            day_names_short: ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"].map(String::from),
        }
    }

    /// Returns the full name of `date`'s month.
    pub fn month_name(&self, date: CalendarDate) -> &str {
        &self.month_names[month_slot(date)]
    }

    /// Returns the abbreviated name of `date`'s month.
    pub fn month_name_short(&self, date: CalendarDate) -> &str {
        &self.month_names_short[month_slot(date)]
    }

    /// Short label such as `Mar 2024`, used for collapsed list rows.
    pub fn month_year_label(&self, date: CalendarDate) -> String {
        format!("{} {}", self.month_name_short(date), date.year())
    }

    /// Long title such as `March 2024`.
    pub fn month_year_title(&self, date: CalendarDate) -> String {
        format!("{} {}", self.month_name(date), date.year())
    }

    /// Abbreviated weekday names rotated to start at `first_day`.
    pub fn week_day_names(&self, first_day: Weekday) -> Vec<String> {
        week_day_names(&self.day_names_short, first_day)
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::english()
    }
}

/// Rotates Sunday-first weekday names to start at `first_day`.
pub fn week_day_names(names: &[String; 7], first_day: Weekday) -> Vec<String> {
    let start = first_day.num_days_from_sunday() as usize;
    names[start..].iter().chain(&names[..start]).cloned().collect()
}

fn month_slot(date: CalendarDate) -> usize {
    (date.month() as usize).saturating_sub(1).min(11)
}
