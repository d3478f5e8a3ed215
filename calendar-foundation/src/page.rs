//! Month pages: the full weeks a month grid displays.
//!
//! ## Usage
//!
//! ```
//! use calendar_foundation::{CalendarDate, page};
//! use chrono::Weekday;
//!
//! let feb = CalendarDate::new(2015, 2, 10).unwrap();
//! let days = page(feb, Weekday::Sun);
//! assert_eq!(days.len(), 28);
//! ```

use chrono::Weekday;
use tracing::warn;

use crate::date::CalendarDate;

/// Days per displayed week row.
pub const DAYS_PER_WEEK: usize = 7;

/// Returns every date of `date`'s month padded on both ends to whole weeks
/// starting on `first_day`.
///
/// The result always has 28, 35 or 42 entries.
pub fn page(date: CalendarDate, first_day: Weekday) -> Vec<CalendarDate> {
    let first = date.first_of_month();
    let last = date.last_of_month();
    let start = first_day.num_days_from_sunday();

    let lead = (first.weekday_from_sunday() + 7 - start) % 7;
    let trail = (start + 6 - last.weekday_from_sunday()) % 7;

    let from = first.add_days(-i64::from(lead));
    let total = i64::from(lead + last.day() + trail);
    (0..total).map(|offset| from.add_days(offset)).collect()
}

/// Returns the number of week rows `date`'s month occupies.
pub fn number_of_weeks(date: CalendarDate, first_day: Weekday) -> usize {
    page(date, first_day).len() / DAYS_PER_WEEK
}

/// Returns the zero-based row of `date` inside its own month page.
pub fn week_index_of(date: CalendarDate, first_day: Weekday) -> usize {
    let start = first_day.num_days_from_sunday();
    let lead = (date.first_of_month().weekday_from_sunday() + 7 - start) % 7;
    (lead + date.day() - 1) as usize / DAYS_PER_WEEK
}

/// Returns the seven dates of the week containing `date`.
pub fn week_of(date: CalendarDate, first_day: Weekday) -> [CalendarDate; DAYS_PER_WEEK] {
    let start = first_day.num_days_from_sunday();
    let back = (date.weekday_from_sunday() + 7 - start) % 7;
    let from = date.add_days(-i64::from(back));
    std::array::from_fn(|offset| from.add_days(offset as i64))
}

/// Maps an index where Sunday is 0 to a weekday. Indices past 6 wrap.
pub fn weekday_from_index(index: u8) -> Weekday {
    if index > 6 {
        warn!(index, "first day index out of range, wrapping");
    }
    match index % 7 {
        0 => Weekday::Sun,
        1 => Weekday::Mon,
        2 => Weekday::Tue,
        3 => Weekday::Wed,
        4 => Weekday::Thu,
        5 => Weekday::Fri,
        _ => Weekday::Sat,
    }
}
