//! Scroll-position math for the month list.
//!
//! ## Usage
//!
//! Convert dates to list offsets with [`ScrollController::offset_for_month`]
//! and [`ScrollController::offset_for_day`], issue commands with
//! [`ScrollController::scroll_to_offset`], and hand the pending
//! [`ScrollCommand`] to the host's scroll view.

use calendar_foundation::{CalendarDate, Dp, Weekday, week_index_of};
use tracing::{debug, trace};

/// Share of an item's length that must be on screen for it to count as
/// viewable.
pub const VIEWABILITY_THRESHOLD: f64 = 0.2;

const PAGE_SNAP_THRESHOLD: f64 = 0.5;

/// Scroll axis of the month list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    /// Months stacked top to bottom.
    #[default]
    Vertical,
    /// Months side by side, paged left to right.
    Horizontal,
}

impl Orientation {
    /// Maps the `horizontal` flag to an orientation.
    pub fn from_horizontal(horizontal: bool) -> Self {
        if horizontal {
            Self::Horizontal
        } else {
            Self::Vertical
        }
    }

    /// Returns true for [`Orientation::Horizontal`].
    pub fn is_horizontal(self) -> bool {
        self == Self::Horizontal
    }
}

/// Imperative scroll request for the host scroll view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollCommand {
    /// Target offset along the scroll axis.
    pub offset: Dp,
    /// Animate instead of jumping.
    pub animated: bool,
}

/// Fixed item layout answer for the virtualization layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemLayout {
    /// Item length along the scroll axis.
    pub length: Dp,
    /// Item start along the scroll axis.
    pub offset: Dp,
    /// Item index.
    pub index: usize,
}

/// Item sizes and grid settings the offset math depends on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    /// Scroll axis.
    pub orientation: Orientation,
    /// Item width, the paging unit of horizontal lists.
    pub item_width: Dp,
    /// Item height, the paging unit of vertical lists.
    pub item_height: Dp,
    /// Height of one week row inside a month item.
    pub week_row_height: Dp,
    /// First weekday of each grid row.
    pub first_day: Weekday,
}

/// Translates between month indices, dates and scroll offsets.
#[derive(Debug, Clone)]
pub struct ScrollController {
    orientation: Orientation,
    item_width: Dp,
    item_height: Dp,
    week_row_height: Dp,
    first_day: Weekday,
    anchor: CalendarDate,
    past: usize,
    item_count: usize,
    offset: Dp,
    pending: Option<ScrollCommand>,
}

impl ScrollController {
    /// Creates a controller for a list of `item_count` months whose row
    /// `past` holds `anchor`'s month. The initial offset shows that row.
    pub fn new(
        metrics: ScrollMetrics,
        anchor: CalendarDate,
        past: usize,
        item_count: usize,
    ) -> Self {
        let mut controller = Self {
            orientation: metrics.orientation,
            item_width: metrics.item_width,
            item_height: metrics.item_height,
            week_row_height: metrics.week_row_height,
            first_day: metrics.first_day,
            anchor: anchor.first_of_month(),
            past,
            item_count,
            offset: Dp::ZERO,
            pending: None,
        };
        controller.offset = controller.unit_size() * past as f64;
        controller
    }

    /// Scroll axis.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Length of one month item along the scroll axis.
    pub fn unit_size(&self) -> Dp {
        match self.orientation {
            Orientation::Horizontal => self.item_width,
            Orientation::Vertical => self.item_height,
        }
    }

    /// Index the list opens at.
    pub fn initial_scroll_index(&self) -> usize {
        self.past
    }

    /// Rounded month distance from the opening month to `date`'s month,
    /// shifted by the past range. May fall outside the list.
    pub fn index_of(&self, date: CalendarDate) -> i64 {
        let months = self.anchor.diff_months(&date.first_of_month()).round() as i64;
        self.past as i64 + months
    }

    /// Offset that shows `date`'s month at the start of the viewport.
    pub fn offset_for_month(&self, date: CalendarDate) -> Dp {
        let unit = self.unit_size();
        let months = self.index_of(date) - self.past as i64;
        unit * self.past as f64 + unit * months as f64
    }

    /// Offset that shows the week row holding `date`.
    ///
    /// Horizontal lists page by whole months, so the week row only shifts
    /// vertical lists.
    pub fn offset_for_day(&self, date: CalendarDate, extra: Dp) -> Dp {
        let mut offset = self.offset_for_month(date) + extra;
        if !self.orientation.is_horizontal() {
            let week = week_index_of(date, self.first_day);
            offset += self.week_row_height * week as f64;
        }
        offset
    }

    /// Layout of item `index`.
    pub fn item_layout(&self, index: usize) -> ItemLayout {
        let length = self.unit_size();
        ItemLayout {
            length,
            offset: length * index as f64,
            index,
        }
    }

    /// Records a scroll request for the host and assumes it lands.
    pub fn scroll_to_offset(&mut self, offset: Dp, animated: bool) {
        debug!(offset = offset.0, animated, "scroll command");
        self.offset = offset;
        self.pending = Some(ScrollCommand { offset, animated });
    }

    /// Takes the latest unconsumed scroll request.
    pub fn take_command(&mut self) -> Option<ScrollCommand> {
        self.pending.take()
    }

    /// The latest unconsumed scroll request.
    pub fn pending_command(&self) -> Option<&ScrollCommand> {
        self.pending.as_ref()
    }

    /// Current offset.
    pub fn offset(&self) -> Dp {
        self.offset
    }

    /// Records the offset reported by the host scroll view.
    pub fn set_offset(&mut self, offset: Dp) {
        self.offset = self.clamp_offset(offset);
        trace!(offset = self.offset.0, "scroll offset");
    }

    /// Restricts an offset to the list's scrollable range.
    pub fn clamp_offset(&self, offset: Dp) -> Dp {
        let unit = self.unit_size();
        if self.item_count <= 1 || unit.0 <= f64::EPSILON {
            return Dp::ZERO;
        }
        let max = unit * self.item_count.saturating_sub(1) as f64;
        offset.clamp(Dp::ZERO, max)
    }

    /// Index of the item nearest to the current offset.
    pub fn index_for_offset(&self) -> usize {
        self.snap_target_index(PAGE_SNAP_THRESHOLD)
    }

    /// Snaps a paging list to the nearest whole month after a fling.
    ///
    /// Returns the index snapped to, or `None` when already aligned.
    pub fn settle_page(&mut self) -> Option<usize> {
        let index = self.index_for_offset();
        let target = self.item_layout(index).offset;
        if (target.0 - self.offset.0).abs() <= f64::EPSILON {
            return None;
        }
        self.scroll_to_offset(target, true);
        Some(index)
    }

    /// Items with at least [`VIEWABILITY_THRESHOLD`] of their length inside
    /// a viewport of `viewport` length at the current offset.
    pub fn viewable_indices(&self, viewport: Dp) -> Vec<usize> {
        let unit = self.unit_size();
        if unit.0 <= f64::EPSILON || self.item_count == 0 {
            return Vec::new();
        }
        let start = self.offset;
        let end = self.offset + viewport;
        let first = (start.0 / unit.0).floor().max(0.0) as usize;

        (first..self.item_count)
            .take_while(|&index| self.item_layout(index).offset < end)
            .filter(|&index| {
                let layout = self.item_layout(index);
                let shown = (layout.offset + layout.length).min(end) - layout.offset.max(start);
                shown.0 >= layout.length.0 * VIEWABILITY_THRESHOLD
            })
            .collect()
    }

    fn snap_target_index(&self, threshold: f64) -> usize {
        let unit = self.unit_size();
        if unit.0 <= f64::EPSILON || self.item_count == 0 {
            return 0;
        }
        let position = self.offset.0 / unit.0;
        let base = position.floor();
        let target = if position - base >= threshold {
            base + 1.0
        } else {
            base
        };
        let max = self.item_count.saturating_sub(1) as f64;
        if target.is_finite() {
            target.clamp(0.0, max) as usize
        } else {
            0
        }
    }
}
