//! Calendar header: month title, navigation arrows and weekday names.
//!
//! ## Usage
//!
//! Configure a [`HeaderArgs`], build a [`CalendarHeader`] for the current
//! date, and route arrow presses through [`press_arrow`].

use std::sync::Arc;

use calendar_foundation::{CalendarDate, DateData, Locale, Weekday};
use derive_setters::Setters;
use smallvec::SmallVec;
use tracing::debug;

use crate::{
    callback::CallbackWith,
    navigation::{DateNavigation, NavigationStep},
};

/// Defaults for [`HeaderArgs`].
pub struct HeaderDefaults;

impl HeaderDefaults {
    /// Title pattern, strftime style.
    pub const DATE_FORMAT: &'static str = "%B %Y";
}

/// A header navigation arrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderArrow {
    /// Single left arrow.
    PreviousMonth,
    /// Single right arrow.
    NextMonth,
    /// Double left arrow.
    PreviousYear,
    /// Double right arrow.
    NextYear,
}

impl HeaderArrow {
    /// All arrows in display order.
    pub const ALL: [HeaderArrow; 4] = [
        HeaderArrow::PreviousYear,
        HeaderArrow::PreviousMonth,
        HeaderArrow::NextMonth,
        HeaderArrow::NextYear,
    ];

    /// The navigation step the arrow performs by default.
    pub fn step(self) -> NavigationStep {
        match self {
            HeaderArrow::PreviousMonth => NavigationStep::Month(-1),
            HeaderArrow::NextMonth => NavigationStep::Month(1),
            HeaderArrow::PreviousYear => NavigationStep::Year(-1),
            HeaderArrow::NextYear => NavigationStep::Year(1),
        }
    }

    /// Returns true for the single (month) arrows.
    pub fn is_month_arrow(self) -> bool {
        matches!(self, HeaderArrow::PreviousMonth | HeaderArrow::NextMonth)
    }

    /// Returns true for the arrows pointing forward in time.
    pub fn is_forward(self) -> bool {
        matches!(self, HeaderArrow::NextMonth | HeaderArrow::NextYear)
    }
}

/// Payload for a consumer arrow override.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrowPress {
    /// The pressed arrow.
    pub arrow: HeaderArrow,
    /// The header's date at press time.
    pub current_date: CalendarDate,
}

/// Header configuration.
#[derive(Clone, Setters)]
pub struct HeaderArgs {
    /// Title pattern. `%B` and `%b` use the locale's month names.
    #[setters(into)]
    pub date_format: String,
    /// Hide the weekday name row.
    pub hide_day_names: bool,
    /// Hide the single arrows.
    pub hide_month_arrows: bool,
    /// Hide the double arrows.
    pub hide_year_arrows: bool,
    /// Month and weekday names.
    pub locale: Arc<Locale>,
    /// Replaces the default arrow navigation when set.
    #[setters(skip)]
    pub on_arrow_press: Option<CallbackWith<ArrowPress>>,
    /// Called when the title is pressed.
    #[setters(skip)]
    pub on_press_header: Option<CallbackWith<DateData>>,
}

impl HeaderArgs {
    /// Sets the arrow override.
    pub fn on_arrow_press<F>(mut self, on_arrow_press: F) -> Self
    where
        F: Fn(ArrowPress) + Send + Sync + 'static,
    {
        self.on_arrow_press = Some(CallbackWith::new(on_arrow_press));
        self
    }

    /// Sets the arrow override using a shared callback.
    pub fn on_arrow_press_shared(mut self, callback: impl Into<CallbackWith<ArrowPress>>) -> Self {
        self.on_arrow_press = Some(callback.into());
        self
    }

    /// Sets the title press handler.
    pub fn on_press_header<F>(mut self, on_press_header: F) -> Self
    where
        F: Fn(DateData) + Send + Sync + 'static,
    {
        self.on_press_header = Some(CallbackWith::new(on_press_header));
        self
    }

    /// Returns true when `arrow` is shown.
    pub fn is_arrow_visible(&self, arrow: HeaderArrow) -> bool {
        if arrow.is_month_arrow() {
            !self.hide_month_arrows
        } else {
            !self.hide_year_arrows
        }
    }
}

impl Default for HeaderArgs {
    fn default() -> Self {
        Self {
            date_format: HeaderDefaults::DATE_FORMAT.to_string(),
            hide_day_names: false,
            hide_month_arrows: false,
            hide_year_arrows: false,
            locale: Arc::new(Locale::default()),
            on_arrow_press: None,
            on_press_header: None,
        }
    }
}

/// Render-ready header state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarHeader {
    /// Formatted title.
    pub title: String,
    /// Date the header describes.
    pub current_date: CalendarDate,
    /// Show the loading indicator next to the title.
    pub loading_indicator: bool,
    /// Weekday names, or `None` when hidden.
    pub day_names: Option<Vec<String>>,
    /// Reserve a blank leading column for week numbers.
    pub week_number_column: bool,
    /// Visible arrows in display order.
    pub arrows: SmallVec<[HeaderArrow; 4]>,
}

impl CalendarHeader {
    /// Builds the header for `current_date`.
    pub fn new(
        args: &HeaderArgs,
        current_date: CalendarDate,
        first_day: Weekday,
        show_week_numbers: bool,
        loading_indicator: bool,
    ) -> Self {
        let day_names = (!args.hide_day_names).then(|| args.locale.week_day_names(first_day));
        Self {
            title: format_title(current_date, &args.date_format, &args.locale),
            current_date,
            loading_indicator,
            week_number_column: show_week_numbers && day_names.is_some(),
            day_names,
            arrows: HeaderArrow::ALL
                .into_iter()
                .filter(|arrow| args.is_arrow_visible(*arrow))
                .collect(),
        }
    }

    /// Returns true when `arrow` is shown.
    pub fn is_arrow_visible(&self, arrow: HeaderArrow) -> bool {
        self.arrows.contains(&arrow)
    }

    /// Whether the header must re-render after `previous`: the month, the
    /// loading indicator or the day-name row changed.
    pub fn needs_update(&self, previous: &CalendarHeader) -> bool {
        self.current_date.year_month() != previous.current_date.year_month()
            || self.loading_indicator != previous.loading_indicator
            || self.day_names.is_some() != previous.day_names.is_some()
    }
}

/// What an arrow press did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowOutcome {
    /// The arrow is hidden; nothing happened.
    Hidden,
    /// The consumer override handled it.
    Delegated,
    /// Default navigation ran; `true` when the date changed.
    Navigated(bool),
}

/// Handles an arrow press: the consumer override when set, otherwise the
/// default month/year step on `navigation`.
pub fn press_arrow<N>(args: &HeaderArgs, arrow: HeaderArrow, navigation: &mut N) -> ArrowOutcome
where
    N: DateNavigation + ?Sized,
{
    if !args.is_arrow_visible(arrow) {
        debug!(?arrow, "ignoring press on hidden arrow");
        return ArrowOutcome::Hidden;
    }
    if let Some(callback) = &args.on_arrow_press {
        callback.call(ArrowPress {
            arrow,
            current_date: navigation.current_date(),
        });
        return ArrowOutcome::Delegated;
    }
    ArrowOutcome::Navigated(navigation.navigate(arrow.step()))
}

/// Handles a press on the title.
pub fn press_header(args: &HeaderArgs, current_date: CalendarDate) {
    if let Some(callback) = &args.on_press_header {
        callback.call(current_date.to_data());
    }
}

/// Formats a title, resolving `%B`/`%b` through `locale`. Invalid patterns
/// fall back to the locale's long month title.
pub fn format_title(date: CalendarDate, pattern: &str, locale: &Locale) -> String {
    let localized = pattern
        .replace("%B", locale.month_name(date))
        .replace("%b", locale.month_name_short(date));
    date.format(&localized).unwrap_or_else(|| {
        debug!(pattern, "invalid header date format");
        locale.month_year_title(date)
    })
}

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;

    use super::*;

    struct Probe(CalendarDate);

    impl DateNavigation for Probe {
        fn current_date(&self) -> CalendarDate {
            self.0
        }

        fn update_date(&mut self, date: CalendarDate, _notify: bool) -> bool {
            let changed = date.year_month() != self.0.year_month();
            self.0 = date;
            changed
        }
    }

    fn date(y: i32, m: u32, d: u32) -> CalendarDate {
        CalendarDate::new(y, m, d).expect("valid test date")
    }

    #[test]
    fn title_and_day_names() {
        let args = HeaderArgs::default();
        let header = CalendarHeader::new(&args, date(2024, 3, 5), Weekday::Mon, true, false);
        assert_eq!(header.title, "March 2024");
        assert_eq!(
            header.day_names.as_deref().map(|names| names[0].as_str()),
            Some("Mon")
        );
        assert!(header.week_number_column);
        assert_eq!(header.arrows.len(), 4);

        let hidden = HeaderArgs::default()
            .hide_day_names(true)
            .hide_year_arrows(true);
        let header = CalendarHeader::new(&hidden, date(2024, 3, 5), Weekday::Sun, true, false);
        assert!(header.day_names.is_none());
        assert!(!header.week_number_column);
        assert!(!header.is_arrow_visible(HeaderArrow::NextYear));
        assert!(header.is_arrow_visible(HeaderArrow::NextMonth));
    }

    #[test]
    fn custom_format_and_fallback() {
        let locale = Locale::default();
        assert_eq!(format_title(date(2024, 3, 5), "%b '%y", &locale), "Mar '24");
        assert_eq!(format_title(date(2024, 3, 5), "%Q", &locale), "March 2024");
    }

    #[test]
    fn arrows_navigate_or_delegate() {
        let mut probe = Probe(date(2024, 1, 31));
        let args = HeaderArgs::default();
        assert_eq!(
            press_arrow(&args, HeaderArrow::NextMonth, &mut probe),
            ArrowOutcome::Navigated(true)
        );
        assert_eq!(probe.0, date(2024, 2, 29));

        let presses = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&presses);
        let args = HeaderArgs::default().on_arrow_press(move |press| sink.lock().push(press));
        assert_eq!(
            press_arrow(&args, HeaderArrow::PreviousYear, &mut probe),
            ArrowOutcome::Delegated
        );
        assert_eq!(probe.0, date(2024, 2, 29));
        assert_eq!(
            presses.lock().as_slice(),
            &[ArrowPress {
                arrow: HeaderArrow::PreviousYear,
                current_date: date(2024, 2, 29)
            }]
        );

        let hidden = HeaderArgs::default().hide_month_arrows(true);
        assert_eq!(
            press_arrow(&hidden, HeaderArrow::NextMonth, &mut probe),
            ArrowOutcome::Hidden
        );
    }

    #[test]
    fn update_only_on_relevant_changes() {
        let args = HeaderArgs::default();
        let a = CalendarHeader::new(&args, date(2024, 3, 5), Weekday::Sun, false, false);
        let b = CalendarHeader::new(&args, date(2024, 3, 25), Weekday::Sun, false, false);
        let c = CalendarHeader::new(&args, date(2024, 3, 25), Weekday::Sun, false, true);
        let d = CalendarHeader::new(&args, date(2024, 4, 1), Weekday::Sun, false, false);
        assert!(!b.needs_update(&a));
        assert!(c.needs_update(&b));
        assert!(d.needs_update(&a));
    }
}
