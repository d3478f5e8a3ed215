//! Single-month calendar.
//!
//! ## Usage
//!
//! Build a [`Calendar`] from [`CalendarArgs`], render [`Calendar::weeks`]
//! and [`Calendar::header`], forward day presses and arrow presses, and call
//! [`Calendar::flush`] once per event-loop turn so deferred notifications
//! run.

use std::sync::Arc;

use calendar_foundation::{
    CalendarDate, DAYS_PER_WEEK, DateData, Weekday, is_gte, is_lte, page, same_month,
    try_parse_date,
};
use derive_setters::Setters;
use tracing::debug;

use crate::{
    callback::CallbackWith,
    day::{DayCell, DayState, DayVariant, MarkedDates, Marking, MarkingType},
    header::{ArrowOutcome, CalendarHeader, HeaderArgs, HeaderArrow, press_arrow, press_header},
    navigation::{DateNavigation, notify_date_change},
    turn_queue::TurnQueue,
};

/// Calendar configuration.
#[derive(Clone, Setters)]
pub struct CalendarArgs {
    /// Initially shown month. Defaults to today.
    #[setters(strip_option)]
    pub current_date: Option<CalendarDate>,
    /// Earliest interactive date, inclusive.
    #[setters(strip_option)]
    pub min_date: Option<CalendarDate>,
    /// Latest interactive date, inclusive.
    #[setters(strip_option)]
    pub max_date: Option<CalendarDate>,
    /// First weekday of each row.
    pub first_day: Weekday,
    /// Day presses do not move the current month.
    pub disable_month_change: bool,
    /// Days are disabled unless their marking enables them.
    pub disabled_by_default: bool,
    /// Leave days of neighboring months empty.
    pub hide_extra_days: bool,
    /// Prefix each row with its ISO week number.
    pub show_week_numbers: bool,
    /// Show a loading indicator while the month's last day has no marking.
    pub display_loading_indicator: bool,
    /// Per-day markings.
    pub marked_dates: Arc<MarkedDates>,
    /// How markings are drawn.
    pub marking_type: MarkingType,
    /// Header configuration.
    pub header: HeaderArgs,
    /// Called after the current date moves to another month.
    #[setters(skip)]
    pub on_date_change: Option<CallbackWith<DateData>>,
    /// Called with the newly visible months.
    #[setters(skip)]
    pub on_visible_date_change: Option<CallbackWith<Vec<DateData>>>,
    /// Called when an interactive day is pressed.
    #[setters(skip)]
    pub on_day_press: Option<CallbackWith<DateData>>,
    /// Called when an interactive day is long-pressed.
    #[setters(skip)]
    pub on_day_long_press: Option<CallbackWith<DateData>>,
}

impl CalendarArgs {
    /// Sets the initial month from a date string. Unparsable input leaves it
    /// unset.
    pub fn current_date_str(mut self, date: &str) -> Self {
        self.current_date = try_parse_date(date);
        self
    }

    /// Sets the lower bound from a date string. Unparsable input leaves it
    /// unset.
    pub fn min_date_str(mut self, date: &str) -> Self {
        self.min_date = try_parse_date(date);
        self
    }

    /// Sets the upper bound from a date string. Unparsable input leaves it
    /// unset.
    pub fn max_date_str(mut self, date: &str) -> Self {
        self.max_date = try_parse_date(date);
        self
    }

    /// Sets the date-change handler.
    pub fn on_date_change<F>(mut self, on_date_change: F) -> Self
    where
        F: Fn(DateData) + Send + Sync + 'static,
    {
        self.on_date_change = Some(CallbackWith::new(on_date_change));
        self
    }

    /// Sets the date-change handler using a shared callback.
    pub fn on_date_change_shared(mut self, callback: impl Into<CallbackWith<DateData>>) -> Self {
        self.on_date_change = Some(callback.into());
        self
    }

    /// Sets the visible-months handler.
    pub fn on_visible_date_change<F>(mut self, on_visible_date_change: F) -> Self
    where
        F: Fn(Vec<DateData>) + Send + Sync + 'static,
    {
        self.on_visible_date_change = Some(CallbackWith::new(on_visible_date_change));
        self
    }

    /// Sets the visible-months handler using a shared callback.
    pub fn on_visible_date_change_shared(
        mut self,
        callback: impl Into<CallbackWith<Vec<DateData>>>,
    ) -> Self {
        self.on_visible_date_change = Some(callback.into());
        self
    }

    /// Sets the day press handler.
    pub fn on_day_press<F>(mut self, on_day_press: F) -> Self
    where
        F: Fn(DateData) + Send + Sync + 'static,
    {
        self.on_day_press = Some(CallbackWith::new(on_day_press));
        self
    }

    /// Sets the day press handler using a shared callback.
    pub fn on_day_press_shared(mut self, callback: impl Into<CallbackWith<DateData>>) -> Self {
        self.on_day_press = Some(callback.into());
        self
    }

    /// Sets the day long-press handler.
    pub fn on_day_long_press<F>(mut self, on_day_long_press: F) -> Self
    where
        F: Fn(DateData) + Send + Sync + 'static,
    {
        self.on_day_long_press = Some(CallbackWith::new(on_day_long_press));
        self
    }

    /// Returns true when `date` lies within `[min_date, max_date]`.
    pub fn is_in_range(&self, date: CalendarDate) -> bool {
        let after_min = self.min_date.is_none_or(|min| is_gte(date, min));
        let before_max = self.max_date.is_none_or(|max| is_lte(date, max));
        after_min && before_max
    }

    /// Marking stored for `date`.
    pub fn marking(&self, date: CalendarDate) -> Option<&Marking> {
        self.marked_dates.get(&date)
    }

    /// Whether presses on `date` reach the consumer: inside the bounds, not
    /// disabled by its marking or by default, and touch events allowed.
    pub fn is_day_interactive(&self, date: CalendarDate) -> bool {
        if !self.is_in_range(date) {
            return false;
        }
        let marking = self.marking(date);
        let disabled = marking
            .and_then(|marking| marking.disabled)
            .unwrap_or(self.disabled_by_default);
        let touch_disabled = marking.is_some_and(|marking| marking.disable_touch_event);
        !disabled && !touch_disabled
    }
}

impl Default for CalendarArgs {
    fn default() -> Self {
        Self {
            current_date: None,
            min_date: None,
            max_date: None,
            first_day: Weekday::Sun,
            disable_month_change: false,
            disabled_by_default: false,
            hide_extra_days: false,
            show_week_numbers: false,
            display_loading_indicator: false,
            marked_dates: Arc::new(MarkedDates::default()),
            marking_type: MarkingType::default(),
            header: HeaderArgs::default(),
            on_date_change: None,
            on_visible_date_change: None,
            on_day_press: None,
            on_day_long_press: None,
        }
    }
}

/// One grid row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Week {
    /// ISO week number of the row's last day, when week numbers are shown.
    pub number: Option<u32>,
    /// The seven cells.
    pub days: Vec<DayCell>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CalendarTask {
    Notify(CalendarDate),
}

/// Day interaction kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayInteraction {
    /// Tap.
    Press,
    /// Long press.
    LongPress,
}

/// Single-month calendar state.
pub struct Calendar {
    args: CalendarArgs,
    current_date: CalendarDate,
    today: CalendarDate,
    queue: TurnQueue<CalendarTask>,
}

impl Calendar {
    /// Creates a calendar showing `args.current_date`, or today when unset.
    pub fn new(args: CalendarArgs) -> Self {
        let today = CalendarDate::today();
        Self {
            current_date: args.current_date.unwrap_or(today),
            args,
            today,
            queue: TurnQueue::new(),
        }
    }

    /// The configuration.
    pub fn args(&self) -> &CalendarArgs {
        &self.args
    }

    /// Replaces the configuration. The current date is kept; it only moves
    /// through navigation and day presses.
    pub fn set_args(&mut self, args: CalendarArgs) {
        self.args = args;
    }

    /// Replaces the marked dates.
    pub fn set_marked_dates(&mut self, marked_dates: Arc<MarkedDates>) {
        self.args.marked_dates = marked_dates;
    }

    /// Overrides the date treated as today.
    pub fn set_today(&mut self, today: CalendarDate) {
        self.today = today;
    }

    /// The date treated as today.
    pub fn today(&self) -> CalendarDate {
        self.today
    }

    /// Handles a tap on `date`. Returns true when the press was accepted.
    pub fn press_day(&mut self, date: CalendarDate) -> bool {
        self.handle_day_interaction(date, DayInteraction::Press)
    }

    /// Handles a long press on `date`. Returns true when the press was
    /// accepted.
    pub fn long_press_day(&mut self, date: CalendarDate) -> bool {
        self.handle_day_interaction(date, DayInteraction::LongPress)
    }

    fn handle_day_interaction(&mut self, date: CalendarDate, interaction: DayInteraction) -> bool {
        if !self.args.is_day_interactive(date) {
            debug!(%date, ?interaction, "ignoring day interaction");
            return false;
        }
        if !self.args.disable_month_change {
            self.update_date(date, true);
        }
        let callback = match interaction {
            DayInteraction::Press => &self.args.on_day_press,
            DayInteraction::LongPress => &self.args.on_day_long_press,
        };
        if let Some(callback) = callback {
            callback.call(date.to_data());
        }
        true
    }

    /// Visual state of `date` in the current month.
    pub fn day_state(&self, date: CalendarDate) -> DayState {
        if self.args.disabled_by_default
            || !self.args.is_in_range(date)
            || !same_month(date, self.current_date)
        {
            DayState::Disabled
        } else if date == self.today {
            DayState::Today
        } else {
            DayState::Normal
        }
    }

    /// Marking for `date`, if any.
    pub fn date_marking(&self, date: CalendarDate) -> Option<Marking> {
        self.args.marking(date).cloned()
    }

    /// Variant used for every day cell.
    pub fn day_variant(&self) -> DayVariant {
        DayVariant::for_marking(self.args.marking_type)
    }

    /// Grid rows for the current month.
    pub fn weeks(&self) -> Vec<Week> {
        page(self.current_date, self.args.first_day)
            .chunks(DAYS_PER_WEEK)
            .map(|days| Week {
                number: days
                    .last()
                    .filter(|_| self.args.show_week_numbers)
                    .map(|day| day.iso_week()),
                days: days.iter().map(|&date| self.day_cell(date)).collect(),
            })
            .collect()
    }

    fn day_cell(&self, date: CalendarDate) -> DayCell {
        DayCell {
            date,
            state: self.day_state(date),
            marking: self.date_marking(date),
            hidden: self.args.hide_extra_days && !same_month(date, self.current_date),
            in_range: self.args.is_in_range(date),
        }
    }

    /// Whether the header shows the loading indicator: enabled, and the
    /// configured month's last day has no marking yet.
    pub fn loading_indicator_visible(&self) -> bool {
        if !self.args.display_loading_indicator {
            return false;
        }
        self.args
            .current_date
            .is_some_and(|date| self.args.marking(date.last_of_month()).is_none())
    }

    /// Header for the current month.
    pub fn header(&self) -> CalendarHeader {
        CalendarHeader::new(
            &self.args.header,
            self.current_date,
            self.args.first_day,
            self.args.show_week_numbers,
            self.loading_indicator_visible(),
        )
    }

    /// Handles a header arrow press.
    pub fn press_arrow(&mut self, arrow: HeaderArrow) -> ArrowOutcome {
        let header = self.args.header.clone();
        press_arrow(&header, arrow, self)
    }

    /// Handles a press on the header title.
    pub fn press_header(&self) {
        press_header(&self.args.header, self.current_date);
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
                CalendarTask::Notify(date) => notify_date_change(
                    self.args.on_date_change.as_ref(),
                    self.args.on_visible_date_change.as_ref(),
                    date,
                ),
            }
        }
        count
    }

    /// Runs turns until nothing is deferred.
    pub fn flush(&mut self) {
        while self.run_turn() > 0 {}
    }
}

impl DateNavigation for Calendar {
    fn current_date(&self) -> CalendarDate {
        self.current_date
    }

    fn update_date(&mut self, date: CalendarDate, notify: bool) -> bool {
        if same_month(date, self.current_date) {
            return false;
        }
        debug!(from = %self.current_date, to = %date, "calendar month changed");
        self.current_date = date;
        if notify {
            self.queue.defer(CalendarTask::Notify(date));
        }
        true
    }
}
