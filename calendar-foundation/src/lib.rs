//! Shared primitives for the calendar components: dates, month pages, names
//! and layout units.
#![deny(missing_docs, clippy::unwrap_used)]

pub mod date;
pub mod dp;
pub mod error;
pub mod locale;
pub mod page;

pub use chrono::Weekday;

pub use crate::{
    date::{
        CalendarDate, DateData, is_gte, is_later_month, is_lte, parse_date, same_date, same_month,
        try_parse_date,
    },
    dp::Dp,
    error::DateParseError,
    locale::{Locale, week_day_names},
    page::{DAYS_PER_WEEK, number_of_weeks, page, week_index_of, week_of, weekday_from_index},
};
