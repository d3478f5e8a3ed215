//! Month window backing the infinite calendar list.
//!
//! ## Usage
//!
//! Build a [`MonthWindow`] around the opening month, then feed it the
//! viewable indices reported by the list. Only the rows next to what is on
//! screen carry full month data; the rest are cheap text placeholders.

use calendar_foundation::{CalendarDate, Locale};
use smallvec::SmallVec;
use tracing::{debug, trace};

/// Rows within this index distance of a viewable row are materialized.
pub const MATERIALIZE_DISTANCE: usize = 1;

/// Months reported as on screen, in index order.
pub type VisibleMonths = SmallVec<[CalendarDate; 2]>;

/// One slot of the window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    /// A full month grid.
    Materialized {
        /// First day of the month.
        date: CalendarDate,
        /// Re-render counter raised when upstream configuration changes.
        bump: u32,
    },
    /// A placeholder showing only the month label.
    Collapsed {
        /// Label such as `Mar 2024`.
        label: String,
    },
}

impl Row {
    /// The month of a materialized row.
    pub fn date(&self) -> Option<CalendarDate> {
        match self {
            Row::Materialized { date, .. } => Some(*date),
            Row::Collapsed { .. } => None,
        }
    }

    /// The label of a collapsed row.
    pub fn label(&self) -> Option<&str> {
        match self {
            Row::Materialized { .. } => None,
            Row::Collapsed { label } => Some(label),
        }
    }

    /// Returns true for a full month grid.
    pub fn is_materialized(&self) -> bool {
        matches!(self, Row::Materialized { .. })
    }

    /// Render-equality check for list items.
    ///
    /// A materialized row re-renders when its month changed or its bump
    /// counter moved; a collapsed row only when its label changed.
    pub fn needs_render(&self, previous: &Row) -> bool {
        match (self, previous) {
            (
                Row::Materialized { date, bump },
                Row::Materialized {
                    date: prev_date,
                    bump: prev_bump,
                },
            ) => date.year_month() != prev_date.year_month() || bump != prev_bump,
            (Row::Collapsed { label }, Row::Collapsed { label: prev_label }) => label != prev_label,
            _ => true,
        }
    }
}

/// Fixed-length window of month rows around an opening month.
#[derive(Debug, Clone)]
pub struct MonthWindow {
    anchor: CalendarDate,
    past: usize,
    future: usize,
    rows: Vec<Row>,
    labels: Vec<String>,
}

impl MonthWindow {
    /// Builds `past + future + 1` rows around `reference` with English labels.
    pub fn new(reference: CalendarDate, past: usize, future: usize) -> Self {
        Self::with_locale(reference, past, future, &Locale::default())
    }

    /// Builds the window with labels from `locale`.
    ///
    /// Row `i` holds the month `reference + (i - past)`. Rows next to the
    /// opening row start materialized.
    pub fn with_locale(
        reference: CalendarDate,
        past: usize,
        future: usize,
        locale: &Locale,
    ) -> Self {
        let anchor = reference.first_of_month();
        let len = past + future + 1;
        let labels: Vec<String> = (0..len)
            .map(|index| locale.month_year_label(month_for(anchor, past, index)))
            .collect();
        let rows = (0..len)
            .map(|index| {
                if index.abs_diff(past) <= MATERIALIZE_DISTANCE {
                    Row::Materialized {
                        date: month_for(anchor, past, index),
                        bump: 0,
                    }
                } else {
                    Row::Collapsed {
                        label: labels[index].clone(),
                    }
                }
            })
            .collect();

        debug!(%anchor, past, future, "built month window");
        Self {
            anchor,
            past,
            future,
            rows,
            labels,
        }
    }

    /// First day of the opening month.
    pub fn anchor(&self) -> CalendarDate {
        self.anchor
    }

    /// Months before the opening month.
    pub fn past(&self) -> usize {
        self.past
    }

    /// Months after the opening month.
    pub fn future(&self) -> usize {
        self.future
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Always false; a window has at least the opening row.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All rows in index order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// The row at `index`.
    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// The month a row stands for, materialized or not.
    pub fn month_at(&self, index: usize) -> Option<CalendarDate> {
        (index < self.rows.len()).then(|| month_for(self.anchor, self.past, index))
    }

    /// The label of a row, materialized or not.
    pub fn label_at(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    /// The row holding `date`'s month, if the window reaches it.
    pub fn index_of(&self, date: CalendarDate) -> Option<usize> {
        let offset = date.month_ordinal() - self.anchor.month_ordinal();
        let index = self.past as i64 + offset;
        (0..self.rows.len() as i64)
            .contains(&index)
            .then_some(index as usize)
    }

    /// Materializes rows near `viewable` and collapses the rest.
    ///
    /// Returns the months of the viewable rows themselves, in index order.
    /// Indices outside the window are ignored.
    pub fn reconcile(&mut self, viewable: &[usize]) -> VisibleMonths {
        let len = self.rows.len();
        let viewable: SmallVec<[usize; 4]> =
            viewable.iter().copied().filter(|&index| index < len).collect();
        let mut visible = VisibleMonths::new();

        for index in 0..len {
            let near = is_near_viewable(index, &viewable, MATERIALIZE_DISTANCE);
            let row = &mut self.rows[index];
            if near {
                if !row.is_materialized() {
                    *row = Row::Materialized {
                        date: month_for(self.anchor, self.past, index),
                        bump: 0,
                    };
                }
            } else if row.is_materialized() {
                *row = Row::Collapsed {
                    label: self.labels[index].clone(),
                };
            }

            if is_near_viewable(index, &viewable, 0)
                && let Some(date) = row.date()
            {
                visible.push(date);
            }
        }

        trace!(?viewable, visible = visible.len(), "reconciled month window");
        visible
    }

    /// Raises the bump counter of every materialized row so the list
    /// re-renders them after a configuration change.
    pub fn bump_materialized(&mut self) {
        for row in &mut self.rows {
            if let Row::Materialized { bump, .. } = row {
                *bump = bump.wrapping_add(1);
            }
        }
    }

    /// Indices of all materialized rows.
    pub fn materialized_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.is_materialized())
            .map(|(index, _)| index)
    }
}

/// Returns true when `index` is within `distance` of any viewable index.
pub fn is_near_viewable(index: usize, viewable: &[usize], distance: usize) -> bool {
    viewable
        .iter()
        .any(|&visible| index.abs_diff(visible) <= distance)
}

fn month_for(anchor: CalendarDate, past: usize, index: usize) -> CalendarDate {
    let delta = index as i64 - past as i64;
    let delta = i32::try_from(delta).unwrap_or(if delta < 0 { i32::MIN } else { i32::MAX });
    anchor.add_months(delta)
}
