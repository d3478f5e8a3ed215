//! Viewability tracking for the month list.
//!
//! The virtualization layer reports which row indices are on screen. The
//! tracker reconciles the [`MonthWindow`] against them and derives the
//! visible months and the new current date.

use calendar_foundation::CalendarDate;
use tracing::debug;

use crate::month_window::{MonthWindow, VisibleMonths};

/// Outcome of one viewability update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewabilityReport {
    /// Months whose rows are on screen, in index order.
    pub visible_months: VisibleMonths,
    /// First visible month, the new current date. `None` when nothing in the
    /// window is on screen.
    pub current_date: Option<CalendarDate>,
    /// The visible set differs from the previous non-empty report.
    pub changed: bool,
}

/// Remembers the last visible-month set reported upward.
#[derive(Debug, Clone, Default)]
pub struct ViewabilityTracker {
    last: VisibleMonths,
}

impl ViewabilityTracker {
    /// Creates a tracker with nothing reported yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconciles `window` against `viewable` and reports the visible months.
    ///
    /// `viewable` may be unordered or have gaps. An update with no on-screen
    /// rows reports nothing and keeps the previous set.
    pub fn observe(&mut self, window: &mut MonthWindow, viewable: &[usize]) -> ViewabilityReport {
        let visible_months = window.reconcile(viewable);
        let current_date = visible_months.first().copied();
        let changed = !visible_months.is_empty() && visible_months != self.last;

        if changed {
            debug!(
                first = ?current_date,
                count = visible_months.len(),
                "visible months changed"
            );
            self.last = visible_months.clone();
        }

        ViewabilityReport {
            visible_months,
            current_date,
            changed,
        }
    }

    /// The last non-empty visible set.
    pub fn last_visible(&self) -> &[CalendarDate] {
        &self.last
    }

    /// Forgets the last report, so the next non-empty update counts as a
    /// change.
    pub fn reset(&mut self) {
        self.last.clear();
    }
}
