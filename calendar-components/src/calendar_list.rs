//! Infinite, virtualized list of month calendars.
//!
//! ## Usage
//!
//! Build a [`CalendarList`], lay items out with
//! [`CalendarList::item_layout`], render each [`Row`], and feed the host's
//! viewability updates to [`CalendarList::on_viewable_items_changed`]. Apply
//! the [`ScrollCommand`]s it issues to the host scroll view and call
//! [`CalendarList::flush`] once per event-loop turn.

use std::sync::Arc;

use calendar_foundation::{CalendarDate, DateData, Dp, same_month, try_parse_date};
use derive_setters::Setters;
use tracing::debug;

use crate::{
    calendar::CalendarArgs,
    callback::CallbackWith,
    day::MarkedDates,
    header::{ArrowOutcome, ArrowPress, CalendarHeader, HeaderArrow, press_arrow},
    month_window::{MonthWindow, Row},
    navigation::{DateNavigation, notify_date_change},
    scroll::{ItemLayout, Orientation, ScrollCommand, ScrollController, ScrollMetrics},
    turn_queue::TurnQueue,
    viewability::{ViewabilityReport, ViewabilityTracker},
};

/// Defaults for [`CalendarListArgs`].
pub struct CalendarListDefaults;

impl CalendarListDefaults {
    /// Months reachable before the opening month.
    pub const PAST_SCROLL_RANGE: usize = 50;
    /// Months reachable after the opening month.
    pub const FUTURE_SCROLL_RANGE: usize = 50;
    /// Item height, the paging unit of vertical lists.
    pub const CALENDAR_HEIGHT: Dp = Dp(360.0);
    /// Item width, the paging unit of horizontal lists.
    pub const CALENDAR_WIDTH: Dp = Dp(360.0);
    /// Height of one week row inside an item.
    pub const WEEK_ROW_HEIGHT: Dp = Dp(46.0);
}

/// Calendar list configuration.
#[derive(Clone, Setters)]
pub struct CalendarListArgs {
    /// Configuration shared by every month item.
    pub calendar: CalendarArgs,
    /// Months reachable before the opening month.
    pub past_scroll_range: usize,
    /// Months reachable after the opening month.
    pub future_scroll_range: usize,
    /// Lay months out side by side.
    pub horizontal: bool,
    /// Snap to whole months after a drag.
    pub paging_enabled: bool,
    /// Allow user scrolling.
    pub scroll_enabled: bool,
    /// Item width.
    pub calendar_width: Dp,
    /// Item height.
    pub calendar_height: Dp,
    /// Show one header above a horizontal list instead of one per item.
    pub static_header: bool,
}

impl Default for CalendarListArgs {
    fn default() -> Self {
        let calendar = CalendarArgs::default().hide_extra_days(true);
        let header = calendar
            .header
            .clone()
            .hide_month_arrows(true)
            .hide_year_arrows(true);
        Self {
            calendar: calendar.header(header),
            past_scroll_range: CalendarListDefaults::PAST_SCROLL_RANGE,
            future_scroll_range: CalendarListDefaults::FUTURE_SCROLL_RANGE,
            horizontal: false,
            paging_enabled: false,
            scroll_enabled: true,
            calendar_width: CalendarListDefaults::CALENDAR_WIDTH,
            calendar_height: CalendarListDefaults::CALENDAR_HEIGHT,
            static_header: false,
        }
    }
}

impl CalendarListArgs {
    pub(crate) fn orientation(&self) -> Orientation {
        Orientation::from_horizontal(self.horizontal)
    }

    fn metrics(&self) -> ScrollMetrics {
        ScrollMetrics {
            orientation: self.orientation(),
            item_width: self.calendar_width,
            item_height: self.calendar_height,
            week_row_height: CalendarListDefaults::WEEK_ROW_HEIGHT,
            first_day: self.calendar.first_day,
        }
    }

    fn same_layout(&self, other: &CalendarListArgs) -> bool {
        self.past_scroll_range == other.past_scroll_range
            && self.future_scroll_range == other.future_scroll_range
            && self.metrics() == other.metrics()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListTask {
    ScrollToCurrent { notify: bool },
}

/// Calendar list state.
pub struct CalendarList {
    args: CalendarListArgs,
    window: MonthWindow,
    scroll: ScrollController,
    tracker: ViewabilityTracker,
    current_date: CalendarDate,
    current_date_prop: Option<CalendarDate>,
    queue: TurnQueue<ListTask>,
}

impl CalendarList {
    /// Creates a list opened at `args.calendar.current_date`, or today.
    pub fn new(args: CalendarListArgs) -> Self {
        let open = args.calendar.current_date.unwrap_or_else(CalendarDate::today);
        let (window, scroll) = Self::build_layout(&args, open);
        Self {
            current_date_prop: args.calendar.current_date,
            args,
            window,
            scroll,
            tracker: ViewabilityTracker::new(),
            current_date: open,
            queue: TurnQueue::new(),
        }
    }

    fn build_layout(args: &CalendarListArgs, open: CalendarDate) -> (MonthWindow, ScrollController) {
        let window = MonthWindow::with_locale(
            open,
            args.past_scroll_range,
            args.future_scroll_range,
            &args.calendar.header.locale,
        );
        let scroll = ScrollController::new(
            args.metrics(),
            open,
            args.past_scroll_range,
            window.len(),
        );
        (window, scroll)
    }

    /// The configuration.
    pub fn args(&self) -> &CalendarListArgs {
        &self.args
    }

    /// Replaces the configuration.
    ///
    /// Range, orientation or item size changes rebuild the window around the
    /// current date; anything else re-renders the materialized rows.
    pub fn set_args(&mut self, args: CalendarListArgs) {
        let rebuild = !self.args.same_layout(&args);
        let prop = args.calendar.current_date;
        self.args = args;
        if rebuild {
            debug!(current = %self.current_date, "list layout changed, rebuilding window");
            let (window, scroll) = Self::build_layout(&self.args, self.current_date);
            self.window = window;
            self.scroll = scroll;
            self.tracker.reset();
        } else {
            self.window.bump_materialized();
        }
        self.set_current_date(prop);
    }

    /// The month window.
    pub fn window(&self) -> &MonthWindow {
        &self.window
    }

    /// Rows in index order.
    pub fn rows(&self) -> &[Row] {
        self.window.rows()
    }

    /// Scroll position math.
    pub fn scroll(&self) -> &ScrollController {
        &self.scroll
    }

    /// Scroll axis.
    pub fn orientation(&self) -> Orientation {
        self.args.orientation()
    }

    /// Whether the user may scroll the list.
    pub fn scroll_enabled(&self) -> bool {
        self.args.scroll_enabled
    }

    /// Layout of item `index`.
    pub fn item_layout(&self, index: usize) -> ItemLayout {
        self.scroll.item_layout(index)
    }

    /// Index the list opens at.
    pub fn initial_scroll_index(&self) -> usize {
        self.scroll.initial_scroll_index()
    }

    /// Takes the latest scroll command for the host.
    pub fn take_scroll_command(&mut self) -> Option<ScrollCommand> {
        self.scroll.take_command()
    }

    /// Months reported visible most recently.
    pub fn visible_months(&self) -> &[CalendarDate] {
        self.tracker.last_visible()
    }

    /// Handles the host's viewability update.
    ///
    /// Rows are materialized or collapsed, the first visible month becomes
    /// the current date, and a changed visible set is reported to the
    /// consumer.
    pub fn on_viewable_items_changed(&mut self, viewable: &[usize]) -> ViewabilityReport {
        let report = self.tracker.observe(&mut self.window, viewable);
        if let Some(first) = report.current_date
            && !same_month(first, self.current_date)
        {
            self.current_date = first;
        }
        if report.changed
            && let Some(callback) = &self.args.calendar.on_visible_date_change
        {
            callback.call(report.visible_months.iter().copied().map(DateData::from).collect());
        }
        report
    }

    /// Handles a scroll offset reported by the host for a viewport of
    /// `viewport` length, deriving viewability from the fixed item layout.
    pub fn on_scroll(&mut self, offset: Dp, viewport: Dp) -> ViewabilityReport {
        self.scroll.set_offset(offset);
        let viewable = self.scroll.viewable_indices(viewport);
        self.on_viewable_items_changed(&viewable)
    }

    /// Handles the end of a user drag. Paging lists snap to the nearest
    /// month.
    pub fn end_drag(&mut self, viewport: Dp) -> ViewabilityReport {
        if self.args.paging_enabled {
            self.scroll.settle_page();
        }
        let viewable = self.scroll.viewable_indices(viewport);
        self.on_viewable_items_changed(&viewable)
    }

    /// Jumps to `date`'s month without animation and makes it current.
    pub fn scroll_to_month(&mut self, date: CalendarDate) {
        let offset = self.scroll.offset_for_month(date);
        self.scroll.scroll_to_offset(offset, false);
        self.current_date = date;
    }

    /// Parses `date` and jumps to its month. Unparsable input does nothing.
    pub fn scroll_to_month_str(&mut self, date: &str) -> bool {
        match try_parse_date(date) {
            Some(date) => {
                self.scroll_to_month(date);
                true
            }
            None => false,
        }
    }

    /// Scrolls to the week row holding `date`, plus `extra`, and makes it
    /// current.
    pub fn scroll_to_day(&mut self, date: CalendarDate, extra: Dp, animated: bool) {
        let offset = self.scroll.offset_for_day(date, extra);
        self.scroll.scroll_to_offset(offset, animated);
        self.current_date = date;
    }

    /// Parses `date` and scrolls to it. Unparsable input does nothing.
    pub fn scroll_to_day_str(&mut self, date: &str, extra: Dp, animated: bool) -> bool {
        match try_parse_date(date) {
            Some(date) => {
                self.scroll_to_day(date, extra, animated);
                true
            }
            None => false,
        }
    }

    /// Applies a new parent-supplied current date. Scrolls when both the
    /// previous and the new value are present and differ.
    pub fn set_current_date(&mut self, date: Option<CalendarDate>) {
        let previous = self.current_date_prop;
        self.current_date_prop = date;
        self.args.calendar.current_date = date;
        if let (Some(previous), Some(date)) = (previous, date)
            && previous != date
        {
            self.scroll_to_month(date);
        }
    }

    /// Replaces the marked dates and re-renders materialized months.
    pub fn set_marked_dates(&mut self, marked_dates: Arc<MarkedDates>) {
        self.args.calendar.marked_dates = marked_dates;
        self.refresh();
    }

    /// Re-renders materialized months after an external change.
    pub fn refresh(&mut self) {
        self.window.bump_materialized();
    }

    /// Header shown above a horizontal list with a static header.
    pub fn static_header(&self) -> Option<CalendarHeader> {
        (self.args.static_header && self.args.horizontal).then(|| {
            CalendarHeader::new(
                &self.args.calendar.header,
                self.current_date,
                self.args.calendar.first_day,
                self.args.calendar.show_week_numbers,
                self.args.calendar.display_loading_indicator,
            )
        })
    }

    /// Handles an arrow press on the static header.
    pub fn press_static_header_arrow(&mut self, arrow: HeaderArrow) -> ArrowOutcome {
        if self.static_header().is_none() {
            return ArrowOutcome::Hidden;
        }
        let header = self.args.calendar.header.clone();
        press_arrow(&header, arrow, self)
    }

    /// Handles an arrow press inside the item at `index`: the consumer
    /// override when set, otherwise a jump to the neighboring month or year.
    pub fn press_item_arrow(&mut self, index: usize, arrow: HeaderArrow) -> ArrowOutcome {
        let header = &self.args.calendar.header;
        let Some(date) = self.window.row(index).and_then(Row::date) else {
            return ArrowOutcome::Hidden;
        };
        if !header.is_arrow_visible(arrow) {
            return ArrowOutcome::Hidden;
        }
        if let Some(callback) = &header.on_arrow_press {
            callback.call(ArrowPress {
                arrow,
                current_date: date,
            });
            return ArrowOutcome::Delegated;
        }
        self.scroll_to_month(arrow.step().apply(date));
        ArrowOutcome::Navigated(true)
    }

    /// Configuration for the month item at `index`, when it is materialized.
    pub fn month_calendar(&self, index: usize) -> Option<CalendarArgs> {
        let date = self.window.row(index)?.date()?;
        Some(
            self.args
                .calendar
                .clone()
                .current_date(date)
                .disable_month_change(true),
        )
    }

    /// Handles a tap on a day of any item. Returns true when accepted.
    pub fn press_day(&mut self, date: CalendarDate) -> bool {
        self.forward_day(date, self.args.calendar.on_day_press.clone())
    }

    /// Handles a long press on a day of any item. Returns true when accepted.
    pub fn long_press_day(&mut self, date: CalendarDate) -> bool {
        self.forward_day(date, self.args.calendar.on_day_long_press.clone())
    }

    fn forward_day(
        &self,
        date: CalendarDate,
        callback: Option<CallbackWith<DateData>>,
    ) -> bool {
        if !self.args.calendar.is_day_interactive(date) {
            debug!(%date, "ignoring day interaction");
            return false;
        }
        if let Some(callback) = callback {
            callback.call(date.to_data());
        }
        true
    }

    /// Number of deferred tasks waiting for the next turn.
    pub fn pending_tasks(&self) -> usize {
        self.queue.len()
    }

    /// Runs the tasks deferred before this call. Returns how many ran.
    pub fn run_turn(&mut self) -> usize {
        let tasks = self.queue.take_turn();
        let count = tasks.len();
        for task in tasks {
            match task {
                ListTask::ScrollToCurrent { notify } => {
                    let date = self.current_date;
                    self.scroll_to_month(date);
                    if notify {
                        notify_date_change(
                            self.args.calendar.on_date_change.as_ref(),
                            self.args.calendar.on_visible_date_change.as_ref(),
                            date,
                        );
                    }
                }
            }
        }
        count
    }

    /// Runs turns until nothing is deferred.
    pub fn flush(&mut self) {
        while self.run_turn() > 0 {}
    }
}

impl DateNavigation for CalendarList {
    fn current_date(&self) -> CalendarDate {
        self.current_date
    }

    fn update_date(&mut self, date: CalendarDate, notify: bool) -> bool {
        if same_month(date, self.current_date) {
            return false;
        }
        debug!(from = %self.current_date, to = %date, "list month changed");
        self.current_date = date;
        self.queue.defer(ListTask::ScrollToCurrent { notify });
        true
    }
}

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;

    use super::*;
    use crate::day::Marking;

    fn date(y: i32, m: u32, d: u32) -> CalendarDate {
        CalendarDate::new(y, m, d).expect("valid test date")
    }

    fn list_args(current: CalendarDate) -> CalendarListArgs {
        let mut args = CalendarListArgs::default();
        args.calendar = args.calendar.current_date(current);
        args
    }

    #[test]
    fn change_month_scrolls_then_notifies_once() {
        let changes = Arc::new(Mutex::new(Vec::new()));
        let visible = Arc::new(Mutex::new(Vec::new()));
        let (c, v) = (changes.clone(), visible.clone());
        let mut args = list_args(date(2024, 1, 15));
        args.calendar = args
            .calendar
            .on_date_change(move |data| c.lock().push(data.date_string))
            .on_visible_date_change(move |data: Vec<DateData>| {
                v.lock()
                    .push(data.into_iter().map(|d| d.date_string).collect::<Vec<_>>())
            });
        let mut list = CalendarList::new(args);
        list.take_scroll_command();

        assert!(list.change_month(1));
        assert_eq!(list.current_date(), date(2024, 2, 15));
        assert_eq!(list.take_scroll_command(), None);

        list.flush();
        assert_eq!(
            list.take_scroll_command(),
            Some(ScrollCommand {
                offset: Dp(360.0 * 51.0),
                animated: false
            })
        );
        assert_eq!(changes.lock().as_slice(), &["2024-02-15".to_string()]);
        assert_eq!(
            visible.lock().as_slice(),
            &[vec!["2024-02-15".to_string()]]
        );
        assert_eq!(list.current_date(), date(2024, 2, 15));
    }

    #[test]
    fn zero_steps_do_not_scroll_or_notify() {
        let mut list = CalendarList::new(list_args(date(2024, 1, 15)));
        assert!(!list.change_month(0));
        assert!(!list.change_year(0));
        assert_eq!(list.pending_tasks(), 0);
        assert_eq!(list.take_scroll_command(), None);
    }

    #[test]
    fn viewability_drives_current_date_and_reports() {
        let reports = Arc::new(Mutex::new(Vec::new()));
        let sink = reports.clone();
        let mut args = list_args(date(2024, 3, 20));
        args.calendar = args
            .calendar
            .on_visible_date_change(move |data: Vec<DateData>| sink.lock().push(data.len()));
        let mut list = CalendarList::new(args);

        list.on_viewable_items_changed(&[50]);
        // Same month: the day is kept.
        assert_eq!(list.current_date(), date(2024, 3, 20));

        let report = list.on_viewable_items_changed(&[52, 51]);
        assert_eq!(report.current_date, Some(date(2024, 4, 1)));
        assert_eq!(list.current_date(), date(2024, 4, 1));
        assert!(list.rows()[53].is_materialized());
        assert!(!list.rows()[49].is_materialized());

        list.on_viewable_items_changed(&[52, 51]);
        assert_eq!(reports.lock().as_slice(), &[1, 2]);
    }

    #[test]
    fn scroll_to_day_adds_week_rows_in_vertical_lists() {
        let mut list = CalendarList::new(list_args(date(2024, 3, 1)));
        list.scroll_to_day(date(2024, 5, 22), Dp(0.0), true);
        // May 2024 starts on Wednesday; the 22nd is in row 3.
        assert_eq!(
            list.take_scroll_command(),
            Some(ScrollCommand {
                offset: Dp(360.0 * 52.0 + 46.0 * 3.0),
                animated: true
            })
        );
        assert_eq!(list.current_date(), date(2024, 5, 22));
    }

    #[test]
    fn invalid_dates_do_not_scroll() {
        let mut list = CalendarList::new(list_args(date(2024, 3, 1)));
        list.take_scroll_command();
        assert!(!list.scroll_to_month_str("2024-02-31"));
        assert!(!list.scroll_to_day_str("", Dp::ZERO, false));
        assert_eq!(list.take_scroll_command(), None);
        assert_eq!(list.current_date(), date(2024, 3, 1));
        assert!(list.scroll_to_month_str("2024-06-10"));
        assert_eq!(list.current_date(), date(2024, 6, 10));
    }

    #[test]
    fn parent_date_change_scrolls_only_between_present_values() {
        let mut list = CalendarList::new(CalendarListArgs::default());
        list.take_scroll_command();
        list.set_current_date(Some(date(2024, 3, 1)));
        assert_eq!(list.take_scroll_command(), None);

        list.set_current_date(Some(date(2024, 3, 1)));
        assert_eq!(list.take_scroll_command(), None);

        list.set_current_date(Some(date(2024, 5, 1)));
        assert!(list.take_scroll_command().is_some());
        assert_eq!(list.current_date(), date(2024, 5, 1));
    }

    #[test]
    fn marked_dates_bump_materialized_rows() {
        let mut list = CalendarList::new(list_args(date(2024, 3, 1)));
        let before = list.rows()[50].clone();
        let mut marked = MarkedDates::default();
        marked.insert(date(2024, 3, 3), Marking::default().marked(true));
        list.set_marked_dates(Arc::new(marked));

        assert!(list.rows()[50].needs_render(&before));
        let item = list.month_calendar(50).expect("materialized row");
        assert!(item.disable_month_change);
        assert_eq!(item.current_date, Some(date(2024, 3, 1)));
        assert!(item.marked_dates.contains_key(&date(2024, 3, 3)));
        assert!(list.month_calendar(10).is_none());
    }

    #[test]
    fn horizontal_item_arrows_jump_by_month_or_year() {
        let mut args = list_args(date(2024, 3, 1)).horizontal(true);
        args.calendar.header = args
            .calendar
            .header
            .hide_month_arrows(false)
            .hide_year_arrows(false);
        let mut list = CalendarList::new(args);

        assert_eq!(
            list.press_item_arrow(50, HeaderArrow::NextMonth),
            ArrowOutcome::Navigated(true)
        );
        assert_eq!(list.current_date(), date(2024, 4, 1));
        assert_eq!(
            list.press_item_arrow(50, HeaderArrow::PreviousYear),
            ArrowOutcome::Navigated(true)
        );
        assert_eq!(list.current_date(), date(2023, 3, 1));
        assert_eq!(
            list.take_scroll_command().map(|command| command.offset),
            Some(Dp(360.0 * 38.0))
        );
        assert_eq!(
            list.press_item_arrow(0, HeaderArrow::NextMonth),
            ArrowOutcome::Hidden
        );
    }

    #[test]
    fn static_header_navigates_the_list() {
        let mut args = list_args(date(2024, 3, 1))
            .horizontal(true)
            .static_header(true);
        args.calendar.header = args.calendar.header.hide_month_arrows(false);
        let mut list = CalendarList::new(args);

        let header = list.static_header().expect("static header");
        assert_eq!(header.title, "March 2024");
        assert_eq!(
            list.press_static_header_arrow(HeaderArrow::NextMonth),
            ArrowOutcome::Navigated(true)
        );
        list.flush();
        assert_eq!(
            list.static_header().map(|header| header.title),
            Some("April 2024".to_string())
        );
        assert_eq!(
            list.press_static_header_arrow(HeaderArrow::NextYear),
            ArrowOutcome::Hidden
        );
    }

    #[test]
    fn day_presses_respect_bounds_without_moving_month() {
        let presses = Arc::new(Mutex::new(Vec::new()));
        let sink = presses.clone();
        let mut args = list_args(date(2024, 3, 1));
        args.calendar = args
            .calendar
            .min_date(date(2024, 3, 10))
            .on_day_press(move |data| sink.lock().push(data.date_string));
        let mut list = CalendarList::new(args);

        assert!(!list.press_day(date(2024, 3, 9)));
        assert!(list.press_day(date(2024, 4, 9)));
        assert_eq!(presses.lock().as_slice(), &["2024-04-09".to_string()]);
        assert_eq!(list.current_date(), date(2024, 3, 1));
    }

    #[test]
    fn range_change_rebuilds_window() {
        let mut list = CalendarList::new(list_args(date(2024, 3, 1)));
        let args = list.args().clone().past_scroll_range(3).future_scroll_range(4);
        list.set_args(args);
        assert_eq!(list.rows().len(), 8);
        assert_eq!(list.initial_scroll_index(), 3);
        assert_eq!(list.window().month_at(3), Some(date(2024, 3, 1)));
    }

    #[test]
    fn paging_snaps_after_drag() {
        let mut list = CalendarList::new(list_args(date(2024, 3, 1)).paging_enabled(true));
        list.on_scroll(Dp(360.0 * 50.0 + 250.0), Dp(360.0));
        let report = list.end_drag(Dp(360.0));
        assert_eq!(report.current_date, Some(date(2024, 4, 1)));
        assert_eq!(
            list.take_scroll_command(),
            Some(ScrollCommand {
                offset: Dp(360.0 * 51.0),
                animated: true
            })
        );
    }
}
