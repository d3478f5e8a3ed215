//! Month and year stepping shared by the calendar and the calendar list.
//!
//! ## Usage
//!
//! Implement [`DateNavigation::current_date`] and
//! [`DateNavigation::update_date`]; `change_month` and `change_year` come for
//! free. Implementors commit the date synchronously and defer scrolling and
//! notifications to the next turn.

use calendar_foundation::{CalendarDate, DateData};

use crate::callback::CallbackWith;

/// A month or year step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavigationStep {
    /// Step by months.
    Month(i32),
    /// Step by years.
    Year(i32),
}

impl NavigationStep {
    /// Applies the step with day-of-month clamping.
    pub fn apply(self, date: CalendarDate) -> CalendarDate {
        match self {
            NavigationStep::Month(step) => date.add_months(step),
            NavigationStep::Year(step) => date.add_years(step),
        }
    }
}

/// Month/year navigation over a current date.
pub trait DateNavigation {
    /// The current date.
    fn current_date(&self) -> CalendarDate;

    /// Commits `date` as the current date unless it is in the current month.
    ///
    /// Returns true when the date was committed. When `notify` is set the
    /// change is reported to the consumer on the next turn.
    fn update_date(&mut self, date: CalendarDate, notify: bool) -> bool;

    /// Applies `step` to the current date and commits the result.
    fn navigate(&mut self, step: NavigationStep) -> bool {
        let target = step.apply(self.current_date());
        self.update_date(target, true)
    }

    /// Moves by `step` months. A zero step is a no-op.
    fn change_month(&mut self, step: i32) -> bool {
        self.navigate(NavigationStep::Month(step))
    }

    /// Moves by `step` years. A zero step is a no-op.
    fn change_year(&mut self, step: i32) -> bool {
        self.navigate(NavigationStep::Year(step))
    }
}

/// Fires the consumer's date-change callbacks for a committed date.
pub fn notify_date_change(
    on_date_change: Option<&CallbackWith<DateData>>,
    on_visible_date_change: Option<&CallbackWith<Vec<DateData>>>,
    date: CalendarDate,
) {
    let data = date.to_data();
    if let Some(callback) = on_date_change {
        callback.call(data.clone());
    }
    if let Some(callback) = on_visible_date_change {
        callback.call(vec![data]);
    }
}
