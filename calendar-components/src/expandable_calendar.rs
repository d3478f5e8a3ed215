//! Calendar that morphs between a one-week strip and a month grid.
//!
//! ## Usage
//!
//! Share a [`CalendarContextHandle`] with the rest of the screen, build an
//! [`ExpandableCalendar`] on it, forward pan deltas, viewability updates and
//! presses, tick it from the frame clock, and call
//! [`ExpandableCalendar::flush`] once per event-loop turn.

use std::sync::Arc;

use calendar_foundation::{
    CalendarDate, Dp, Weekday, is_later_month, number_of_weeks, same_month, week_of,
};
use derive_setters::Setters;
use tracing::debug;

use crate::{
    calendar_list::{CalendarList, CalendarListArgs},
    context::{CalendarContextHandle, UpdateSource},
    day::{DayCell, DayState, MarkedDates},
    expansion::{Expansion, ExpansionConfig, ExpansionFrame, Position},
    header::{ArrowOutcome, CalendarHeader, HeaderArrow, HeaderDefaults, format_title},
    scroll::ScrollCommand,
    turn_queue::TurnQueue,
    viewability::ViewabilityReport,
};

/// Share of the screen height left below a vertical open calendar.
const VERTICAL_OPEN_MARGIN: f64 = 0.2;

/// Expandable calendar configuration.
#[derive(Clone, Setters)]
pub struct ExpandableCalendarArgs {
    /// Configuration of the embedded month list.
    pub list: CalendarListArgs,
    /// Position at construction.
    pub initial_position: Position,
    /// Refuse pan gestures, keeping the calendar at its initial position.
    pub disable_pan: bool,
    /// Hide the drag knob.
    pub hide_knob: bool,
    /// Hide the header arrows of a horizontal calendar.
    pub hide_arrows: bool,
}

impl Default for ExpandableCalendarArgs {
    fn default() -> Self {
        Self {
            list: CalendarListArgs::default().horizontal(true),
            initial_position: Position::Closed,
            disable_pan: false,
            hide_knob: false,
            hide_arrows: false,
        }
    }
}

impl ExpandableCalendarArgs {
    fn horizontal(&self) -> bool {
        self.list.horizontal
    }

    fn first_day(&self) -> Weekday {
        self.list.calendar.first_day
    }

    fn should_hide_arrows(&self) -> bool {
        !self.horizontal() || self.hide_arrows
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExpandableTask {
    CollapseAfterDayPress,
    RecomputeOpenHeight,
}

/// Expandable calendar state.
pub struct ExpandableCalendar {
    args: ExpandableCalendarArgs,
    context: CalendarContextHandle,
    synced_revision: u64,
    visible_date: CalendarDate,
    list: CalendarList,
    expansion: Expansion,
    today: CalendarDate,
    queue: TurnQueue<ExpandableTask>,
}

impl ExpandableCalendar {
    /// Creates the calendar showing the context's date.
    pub fn new(args: ExpandableCalendarArgs, context: CalendarContextHandle) -> Self {
        let snapshot = context.snapshot();
        let expansion = Expansion::new(
            ExpansionConfig::default()
                .orientation(args.list.orientation())
                .initial_position(args.initial_position)
                .hide_knob(args.hide_knob)
                .disable_pan(args.disable_pan)
                .number_of_weeks(number_of_weeks(snapshot.date, args.first_day())),
        );
        let list_args = list_args_for(
            &args,
            snapshot.date,
            snapshot.date,
            expansion.position().is_open(),
        );
        Self {
            list: CalendarList::new(list_args),
            args,
            context,
            synced_revision: snapshot.revision,
            visible_date: snapshot.date,
            expansion,
            today: CalendarDate::today(),
            queue: TurnQueue::new(),
        }
    }

    /// The configuration.
    pub fn args(&self) -> &ExpandableCalendarArgs {
        &self.args
    }

    /// The shared context.
    pub fn context(&self) -> &CalendarContextHandle {
        &self.context
    }

    /// The embedded month list.
    pub fn list(&self) -> &CalendarList {
        &self.list
    }

    /// The expansion state machine.
    pub fn expansion(&self) -> &Expansion {
        &self.expansion
    }

    /// First month of the latest visible-month report.
    pub fn visible_date(&self) -> CalendarDate {
        self.visible_date
    }

    /// Current position.
    pub fn position(&self) -> Position {
        self.expansion.position()
    }

    /// Overrides the date treated as today.
    pub fn set_today(&mut self, today: CalendarDate) {
        self.today = today;
    }

    /// Takes the latest scroll command for the embedded list.
    pub fn take_scroll_command(&mut self) -> Option<ScrollCommand> {
        self.list.take_scroll_command()
    }

    /// Replaces the consumer's marked dates.
    pub fn set_marked_dates(&mut self, marked_dates: Arc<MarkedDates>) {
        self.args.list.calendar.marked_dates = marked_dates;
        self.refresh_list();
    }

    /// Marked dates with the context date added as selected.
    pub fn marked_dates(&self) -> Arc<MarkedDates> {
        merge_selected(&self.args.list.calendar.marked_dates, self.context.date())
    }

    /// Scrolls the list to the context date when it changed since the last
    /// sync. Returns true when it scrolled.
    pub fn sync_context(&mut self) -> bool {
        let snapshot = self.context.snapshot();
        if snapshot.revision == self.synced_revision {
            return false;
        }
        self.synced_revision = snapshot.revision;
        self.refresh_list();
        if self.args.horizontal() {
            self.list.scroll_to_month(snapshot.date);
        } else {
            self.list.scroll_to_day(snapshot.date, Dp::ZERO, true);
        }
        debug!(date = %snapshot.date, source = ?snapshot.update_source, "synced to context");
        true
    }

    /// Pages the context date by one month. Open calendars land on the first
    /// of the month, closed ones on the first day of the neighboring week.
    /// Only horizontal calendars page.
    pub fn scroll_by_month(&mut self, next: bool) -> bool {
        if !self.args.horizontal() {
            return false;
        }
        let date = self.context.date();
        let target = if self.position().is_open() {
            date.first_of_month().add_months(if next { 1 } else { -1 })
        } else {
            let step = if next { 7 } else { -7 };
            date.add_days(step - self.days_into_week(date))
        };
        self.page_context(target)
    }

    /// Pages the context date by one year. Open calendars land on the first
    /// of the month, closed ones on the first day of that week. Only
    /// horizontal calendars page.
    pub fn scroll_by_year(&mut self, next: bool) -> bool {
        if !self.args.horizontal() {
            return false;
        }
        let date = self
            .context
            .date()
            .add_years(if next { 1 } else { -1 });
        let target = if self.position().is_open() {
            date.first_of_month()
        } else {
            date.add_days(-self.days_into_week(date))
        };
        self.page_context(target)
    }

    fn days_into_week(&self, date: CalendarDate) -> i64 {
        let first_day = i64::from(self.args.first_day().num_days_from_sunday());
        let mut day_of_week = i64::from(date.weekday_from_sunday());
        if day_of_week < first_day && first_day > 0 {
            day_of_week += 7;
        }
        day_of_week - first_day
    }

    fn page_context(&mut self, target: CalendarDate) -> bool {
        self.context.set_date(target, UpdateSource::PageScroll);
        self.sync_context();
        true
    }

    /// Handles a header arrow press: month arrows page by month, year arrows
    /// by year.
    pub fn press_arrow(&mut self, arrow: HeaderArrow) -> ArrowOutcome {
        if self.should_hide_arrows() {
            return ArrowOutcome::Hidden;
        }
        let navigated = if arrow.is_month_arrow() {
            self.scroll_by_month(arrow.is_forward())
        } else {
            self.scroll_by_year(arrow.is_forward())
        };
        ArrowOutcome::Navigated(navigated)
    }

    /// Handles a tap on a day: writes it to the context, then collapses an
    /// open calendar on the next turn. Returns true when accepted.
    pub fn press_day(&mut self, date: CalendarDate) -> bool {
        if !self.args.list.calendar.is_day_interactive(date) {
            debug!(%date, "ignoring day press");
            return false;
        }
        self.context.set_date(date, UpdateSource::DayPress);
        self.sync_context();
        self.queue.defer(ExpandableTask::CollapseAfterDayPress);
        if let Some(callback) = &self.args.list.calendar.on_day_press {
            callback.call(date.to_data());
        }
        true
    }

    /// Handles a long press on a day. Returns true when accepted.
    pub fn long_press_day(&mut self, date: CalendarDate) -> bool {
        self.list.long_press_day(date)
    }

    /// Handles the list's viewability update.
    pub fn on_viewable_items_changed(&mut self, viewable: &[usize]) -> ViewabilityReport {
        let report = self.list.on_viewable_items_changed(viewable);
        self.handle_report(&report);
        report
    }

    /// Handles a scroll offset reported by the list's host view.
    pub fn on_scroll(&mut self, offset: Dp, viewport: Dp) -> ViewabilityReport {
        let report = self.list.on_scroll(offset, viewport);
        self.handle_report(&report);
        report
    }

    /// Handles the end of a list drag.
    pub fn end_scroll(&mut self, viewport: Dp) -> ViewabilityReport {
        let report = self.list.end_drag(viewport);
        self.handle_report(&report);
        report
    }

    fn handle_report(&mut self, report: &ViewabilityReport) {
        if report.changed {
            self.on_visible_date_change(&report.visible_months);
        }
    }

    /// Reacts to a new visible-month set. When the first month differs from
    /// the last one seen, the context date pages toward it (unless a day
    /// press set it or it already lies in that month), and the week count is
    /// recomputed on the next turn.
    pub fn on_visible_date_change(&mut self, dates: &[CalendarDate]) {
        let Some(&first) = dates.first() else {
            return;
        };
        if same_month(self.visible_date, first) {
            return;
        }
        self.visible_date = first;

        let snapshot = self.context.snapshot();
        if !same_month(first, snapshot.date) && snapshot.update_source != UpdateSource::DayPress {
            self.scroll_by_month(is_later_month(first, snapshot.date));
        }
        self.queue.defer(ExpandableTask::RecomputeOpenHeight);
    }

    /// Sizes a vertical calendar's open height from its layout.
    pub fn on_layout(&mut self, screen_height: Dp, layout_x: Dp) {
        if !self.args.horizontal() {
            self.expansion
                .set_open_height(screen_height - layout_x - screen_height * VERTICAL_OPEN_MARGIN);
        }
    }

    /// Starts a pan with delta `dy` when the state machine accepts it.
    pub fn begin_drag(&mut self, dy: Dp) -> bool {
        self.expansion.begin_drag(dy)
    }

    /// Updates the active pan.
    pub fn drag_move(&mut self, dy: Dp) -> Option<Dp> {
        self.expansion.drag_move(dy)
    }

    /// Releases the active pan and snaps.
    pub fn drag_end(&mut self) -> Position {
        let before = self.position();
        let position = self.expansion.drag_end();
        if position != before {
            self.refresh_list();
        }
        position
    }

    /// Advances animations by `dt` seconds. Returns true while moving.
    pub fn tick(&mut self, dt: f64) -> bool {
        self.expansion.tick(dt)
    }

    /// Current drawing state.
    pub fn frame(&self) -> ExpansionFrame {
        self.expansion.frame()
    }

    /// Header arrows are hidden on vertical calendars and on request.
    pub fn should_hide_arrows(&self) -> bool {
        self.args.should_hide_arrows()
    }

    /// Title of the vertical calendar's header.
    pub fn header_title(&self) -> String {
        format_title(
            self.context.date(),
            HeaderDefaults::DATE_FORMAT,
            &self.args.list.calendar.header.locale,
        )
    }

    /// Weekday names starting at the first day.
    pub fn week_day_names(&self) -> Vec<String> {
        self.args
            .list
            .calendar
            .header
            .locale
            .week_day_names(self.args.first_day())
    }

    /// Static header bound to the context date.
    pub fn header(&self) -> CalendarHeader {
        let calendar = &self.list.args().calendar;
        CalendarHeader::new(
            &calendar.header,
            self.context.date(),
            calendar.first_day,
            calendar.show_week_numbers,
            false,
        )
    }

    /// Days of the week strip shown while closed.
    pub fn week_strip(&self) -> Vec<DayCell> {
        let date = self.context.date();
        let marked = self.marked_dates();
        let calendar = &self.args.list.calendar;
        week_of(date, calendar.first_day)
            .into_iter()
            .map(|day| DayCell {
                date: day,
                state: if calendar.disabled_by_default || !calendar.is_in_range(day) {
                    DayState::Disabled
                } else if day == self.today {
                    DayState::Today
                } else {
                    DayState::Normal
                },
                marking: marked.get(&day).cloned(),
                hidden: false,
                in_range: calendar.is_in_range(day),
            })
            .collect()
    }

    /// Number of deferred tasks waiting for the next turn.
    pub fn pending_tasks(&self) -> usize {
        self.queue.len() + self.list.pending_tasks()
    }

    /// Runs the tasks deferred before this call. Returns how many ran.
    pub fn run_turn(&mut self) -> usize {
        let tasks = self.queue.take_turn();
        let mut count = tasks.len();
        for task in tasks {
            match task {
                ExpandableTask::CollapseAfterDayPress => {
                    if self.position().is_open() {
                        let closed = self.expansion.closed_height();
                        self.expansion.bounce_to_position(Some(closed));
                        self.refresh_list();
                    }
                }
                ExpandableTask::RecomputeOpenHeight => {
                    let weeks = number_of_weeks(self.context.date(), self.args.first_day());
                    if self.expansion.set_number_of_weeks(weeks) && self.position().is_open() {
                        let open = self.expansion.open_height();
                        self.expansion.bounce_to_position(Some(open));
                    }
                }
            }
        }
        count += self.list.run_turn();
        count
    }

    /// Runs turns until nothing is deferred.
    pub fn flush(&mut self) {
        while self.run_turn() > 0 {}
    }

    fn refresh_list(&mut self) {
        let args = list_args_for(
            &self.args,
            self.visible_date,
            self.context.date(),
            self.position().is_open(),
        );
        self.list.set_args(args);
    }
}

fn list_args_for(
    args: &ExpandableCalendarArgs,
    visible_date: CalendarDate,
    context_date: CalendarDate,
    open: bool,
) -> CalendarListArgs {
    let hide_arrows = args.should_hide_arrows();
    let mut list = args
        .list
        .clone()
        .paging_enabled(true)
        .scroll_enabled(open)
        .static_header(true);
    list.calendar = list
        .calendar
        .current_date(visible_date)
        .hide_extra_days(!args.horizontal())
        .marked_dates(merge_selected(&args.list.calendar.marked_dates, context_date));
    list.calendar.header = list
        .calendar
        .header
        .hide_month_arrows(hide_arrows)
        .hide_year_arrows(hide_arrows);
    list
}

fn merge_selected(marked: &MarkedDates, date: CalendarDate) -> Arc<MarkedDates> {
    let mut merged = marked.clone();
    merged.entry(date).or_default().selected = true;
    Arc::new(merged)
}

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;

    use super::*;
    use crate::{day::Marking, navigation::DateNavigation};

    fn date(y: i32, m: u32, d: u32) -> CalendarDate {
        CalendarDate::new(y, m, d).expect("valid test date")
    }

    fn calendar(args: ExpandableCalendarArgs, start: CalendarDate) -> ExpandableCalendar {
        ExpandableCalendar::new(args, CalendarContextHandle::new(start))
    }

    #[test]
    fn closed_month_arrows_step_by_week() {
        let mut expandable = calendar(ExpandableCalendarArgs::default(), date(2024, 3, 13));
        assert!(expandable.scroll_by_month(true));
        assert_eq!(expandable.context().date(), date(2024, 3, 17));
        assert_eq!(
            expandable.context().update_source(),
            UpdateSource::PageScroll
        );
        assert!(expandable.scroll_by_month(false));
        assert_eq!(expandable.context().date(), date(2024, 3, 10));
    }

    #[test]
    fn week_steps_respect_first_day() {
        let mut args = ExpandableCalendarArgs::default();
        args.list.calendar = args.list.calendar.first_day(Weekday::Mon);
        let mut expandable = calendar(args.clone(), date(2024, 3, 13));
        expandable.scroll_by_month(true);
        assert_eq!(expandable.context().date(), date(2024, 3, 18));

        // Sunday belongs to the week that started the previous Monday.
        let mut sunday = calendar(args, date(2024, 3, 17));
        sunday.scroll_by_month(true);
        assert_eq!(sunday.context().date(), date(2024, 3, 18));
    }

    #[test]
    fn open_arrows_step_to_first_of_month() {
        let args = ExpandableCalendarArgs::default().initial_position(Position::Open);
        let mut expandable = calendar(args, date(2024, 3, 13));
        assert_eq!(
            expandable.press_arrow(HeaderArrow::PreviousMonth),
            ArrowOutcome::Navigated(true)
        );
        assert_eq!(expandable.context().date(), date(2024, 2, 1));
        assert_eq!(
            expandable.take_scroll_command().map(|command| command.animated),
            Some(false)
        );
        expandable.press_arrow(HeaderArrow::NextYear);
        assert_eq!(expandable.context().date(), date(2025, 2, 1));
    }

    #[test]
    fn closed_year_arrow_lands_on_week_start() {
        let mut expandable = calendar(ExpandableCalendarArgs::default(), date(2024, 3, 13));
        expandable.scroll_by_year(true);
        // March 13th 2025 is a Thursday.
        assert_eq!(expandable.context().date(), date(2025, 3, 9));
    }

    #[test]
    fn vertical_calendars_do_not_page() {
        let mut args = ExpandableCalendarArgs::default();
        args.list = args.list.horizontal(false);
        let mut expandable = calendar(args, date(2024, 3, 13));
        assert!(expandable.should_hide_arrows());
        assert!(!expandable.scroll_by_month(true));
        assert_eq!(
            expandable.press_arrow(HeaderArrow::NextMonth),
            ArrowOutcome::Hidden
        );
        assert_eq!(expandable.context().date(), date(2024, 3, 13));

        expandable.on_layout(Dp(800.0), Dp(0.0));
        assert_eq!(expandable.expansion().open_height(), Dp(640.0));
    }

    #[test]
    fn day_press_collapses_on_next_turn() {
        let presses = Arc::new(Mutex::new(Vec::new()));
        let sink = presses.clone();
        let mut args = ExpandableCalendarArgs::default().initial_position(Position::Open);
        args.list.calendar = args
            .list
            .calendar
            .max_date(date(2024, 3, 28))
            .on_day_press(move |data| sink.lock().push(data.date_string));
        let mut expandable = calendar(args, date(2024, 3, 13));

        assert!(!expandable.press_day(date(2024, 3, 29)));
        assert!(expandable.press_day(date(2024, 3, 20)));
        assert_eq!(expandable.context().date(), date(2024, 3, 20));
        assert_eq!(expandable.context().update_source(), UpdateSource::DayPress);
        assert_eq!(expandable.position(), Position::Open);

        expandable.flush();
        assert_eq!(expandable.position(), Position::Closed);
        assert!(!expandable.frame().scroll_enabled);
        assert_eq!(presses.lock().as_slice(), &["2024-03-20".to_string()]);
    }

    #[test]
    fn visible_month_change_pages_context_and_resizes() {
        let args = ExpandableCalendarArgs::default().initial_position(Position::Open);
        let mut expandable = calendar(args, date(2024, 3, 13));
        // March 2024 spans six rows.
        assert_eq!(expandable.expansion().open_height(), Dp(374.0));

        expandable.on_visible_date_change(&[date(2024, 4, 1)]);
        assert_eq!(expandable.visible_date(), date(2024, 4, 1));
        assert_eq!(expandable.context().date(), date(2024, 4, 1));

        expandable.flush();
        assert_eq!(expandable.expansion().open_height(), Dp(328.0));
        assert_eq!(expandable.expansion().base_height(), Dp(328.0));
        assert_eq!(expandable.position(), Position::Open);

        // Same month again: nothing happens.
        expandable.on_visible_date_change(&[date(2024, 4, 1)]);
        assert_eq!(expandable.pending_tasks(), 0);
        expandable.on_visible_date_change(&[]);
        assert_eq!(expandable.pending_tasks(), 0);
    }

    /// Reports the list's own scroll target back as the viewable item, the
    /// way the host does once a programmatic scroll lands.
    fn land_on_scroll_target(expandable: &mut ExpandableCalendar) -> ViewabilityReport {
        let command = expandable
            .take_scroll_command()
            .expect("paging scrolls the list");
        let unit = expandable.list().scroll().unit_size();
        let index = (command.offset.0 / unit.0).round() as usize;
        expandable.on_viewable_items_changed(&[index])
    }

    #[test]
    fn closed_week_paging_survives_month_boundary() {
        let mut expandable = calendar(ExpandableCalendarArgs::default(), date(2024, 3, 27));
        let start = expandable.list().initial_scroll_index();
        expandable.on_viewable_items_changed(&[start]);

        expandable.press_arrow(HeaderArrow::NextMonth);
        assert_eq!(expandable.context().date(), date(2024, 3, 31));
        land_on_scroll_target(&mut expandable);
        assert_eq!(expandable.context().date(), date(2024, 3, 31));

        expandable.press_arrow(HeaderArrow::NextMonth);
        assert_eq!(expandable.context().date(), date(2024, 4, 7));
        let report = land_on_scroll_target(&mut expandable);
        assert!(report.changed);
        assert_eq!(expandable.visible_date(), date(2024, 4, 1));
        assert_eq!(expandable.context().date(), date(2024, 4, 7));
        expandable.flush();
        assert_eq!(expandable.context().date(), date(2024, 4, 7));

        expandable.press_arrow(HeaderArrow::PreviousMonth);
        assert_eq!(expandable.context().date(), date(2024, 3, 31));
        land_on_scroll_target(&mut expandable);
        assert_eq!(expandable.visible_date(), date(2024, 3, 1));
        assert_eq!(expandable.context().date(), date(2024, 3, 31));
        assert_eq!(
            expandable.context().update_source(),
            UpdateSource::PageScroll
        );
    }

    #[test]
    fn open_month_paging_round_trips_through_viewability() {
        let args = ExpandableCalendarArgs::default().initial_position(Position::Open);
        let mut expandable = calendar(args, date(2024, 3, 13));
        let start = expandable.list().initial_scroll_index();
        expandable.on_viewable_items_changed(&[start]);

        expandable.press_arrow(HeaderArrow::NextMonth);
        assert_eq!(expandable.context().date(), date(2024, 4, 1));
        land_on_scroll_target(&mut expandable);
        assert_eq!(expandable.visible_date(), date(2024, 4, 1));
        assert_eq!(expandable.context().date(), date(2024, 4, 1));
        expandable.flush();
        assert_eq!(expandable.expansion().open_height(), Dp(328.0));

        expandable.press_arrow(HeaderArrow::PreviousMonth);
        land_on_scroll_target(&mut expandable);
        expandable.flush();
        assert_eq!(expandable.context().date(), date(2024, 3, 1));
        assert_eq!(expandable.expansion().open_height(), Dp(374.0));
    }

    #[test]
    fn day_press_source_suppresses_paging() {
        let args = ExpandableCalendarArgs::default().initial_position(Position::Open);
        let mut expandable = calendar(args, date(2024, 3, 13));
        expandable.press_day(date(2024, 4, 2));
        expandable.on_visible_date_change(&[date(2024, 4, 1)]);
        assert_eq!(expandable.context().date(), date(2024, 4, 2));
    }

    #[test]
    fn context_writes_from_siblings_scroll_the_list() {
        let context = CalendarContextHandle::new(date(2024, 3, 13));
        let mut expandable =
            ExpandableCalendar::new(ExpandableCalendarArgs::default(), context.clone());
        expandable.take_scroll_command();
        assert!(!expandable.sync_context());

        context.set_date(date(2024, 6, 5), UpdateSource::ListDrag);
        assert!(expandable.sync_context());
        assert_eq!(expandable.list().current_date(), date(2024, 6, 5));
        assert_eq!(
            expandable.take_scroll_command(),
            Some(ScrollCommand {
                offset: Dp(360.0 * 53.0),
                animated: false
            })
        );
        assert!(!expandable.sync_context());
    }

    #[test]
    fn selection_merges_into_marked_dates() {
        let mut marked = MarkedDates::default();
        marked.insert(date(2024, 3, 13), Marking::default().marked(true));
        marked.insert(date(2024, 3, 14), Marking::default().marked(true));
        let mut args = ExpandableCalendarArgs::default();
        args.list.calendar = args.list.calendar.marked_dates(Arc::new(marked));
        let mut expandable = calendar(args, date(2024, 3, 13));
        expandable.set_today(date(2024, 3, 15));

        let merged = expandable.marked_dates();
        assert!(merged[&date(2024, 3, 13)].selected);
        assert!(merged[&date(2024, 3, 13)].marked);
        assert!(!merged[&date(2024, 3, 14)].selected);

        let strip = expandable.week_strip();
        assert_eq!(strip.len(), 7);
        assert_eq!(strip[0].date, date(2024, 3, 10));
        assert_eq!(strip[5].state, DayState::Today);
        assert!(strip[3].marking.as_ref().is_some_and(|marking| marking.selected));

        assert_eq!(expandable.header_title(), "March 2024");
        assert_eq!(expandable.week_day_names()[0], "Sun");
    }

    #[test]
    fn drag_opens_and_enables_list_scrolling() {
        let mut expandable = calendar(ExpandableCalendarArgs::default(), date(2024, 3, 13));
        assert!(!expandable.list().scroll_enabled());
        assert!(!expandable.begin_drag(Dp(-30.0)));
        assert!(expandable.begin_drag(Dp(30.0)));
        expandable.drag_move(Dp(200.0));
        assert_eq!(expandable.drag_end(), Position::Open);
        assert!(expandable.list().scroll_enabled());
        while expandable.tick(1.0 / 60.0) {}
        assert_eq!(expandable.frame().height, Dp(374.0));
    }
}
