//! Day cells, markings and the variant that renders them.
//!
//! ## Usage
//!
//! Attach [`Marking`]s to dates through [`MarkedDates`], pick a
//! [`MarkingType`], and let the calendar build [`DayCell`]s for the host.

use calendar_foundation::{CalendarDate, try_parse_date};
use derive_setters::Setters;
use rustc_hash::FxHashMap;
use tracing::debug;

/// Markings keyed by date.
pub type MarkedDates = FxHashMap<CalendarDate, Marking>;

/// Selects how markings are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MarkingType {
    /// Single dot and selection circle.
    #[default]
    Simple,
    /// Continuous period band across days.
    Period,
    /// Several dots per day.
    MultiDot,
    /// Several stacked period bands per day.
    MultiPeriod,
    /// Host-defined styling.
    Custom,
}

impl MarkingType {
    /// Parses the configuration names `simple`, `period`, `multi-dot`,
    /// `multi-period` and `custom`. Unknown names fall back to `Simple`.
    pub fn parse(name: &str) -> Self {
        match name {
            "period" => Self::Period,
            "multi-dot" => Self::MultiDot,
            "multi-period" => Self::MultiPeriod,
            "custom" => Self::Custom,
            "simple" | "" => Self::Simple,
            other => {
                debug!(marking_type = other, "unknown marking type, using simple");
                Self::Simple
            }
        }
    }
}

/// One dot in a multi-dot marking.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dot {
    /// Identifies the dot across days.
    pub key: String,
    /// Dot color.
    pub color: String,
}

/// One band in a period or multi-period marking.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Period {
    /// Band color.
    pub color: String,
    /// The band starts on this day.
    pub starting_day: bool,
    /// The band ends on this day.
    pub ending_day: bool,
}

/// Per-day marking.
#[derive(Debug, Clone, PartialEq, Eq, Default, Setters)]
pub struct Marking {
    /// Drawn as selected.
    pub selected: bool,
    /// Shows the single marker dot.
    pub marked: bool,
    /// Explicit enabled state. `None` defers to the calendar's default.
    #[setters(strip_option)]
    pub disabled: Option<bool>,
    /// Ignores presses while keeping the normal look.
    pub disable_touch_event: bool,
    /// Dots for [`MarkingType::MultiDot`].
    pub dots: Vec<Dot>,
    /// Bands for [`MarkingType::Period`] and [`MarkingType::MultiPeriod`].
    pub periods: Vec<Period>,
}

/// Builds [`MarkedDates`] from `YYYY-MM-DD` keyed entries, skipping keys
/// that are not dates.
pub fn parse_marked_dates<I, S>(entries: I) -> MarkedDates
where
    I: IntoIterator<Item = (S, Marking)>,
    S: AsRef<str>,
{
    entries
        .into_iter()
        .filter_map(|(key, marking)| try_parse_date(key.as_ref()).map(|date| (date, marking)))
        .collect()
}

/// Visual state of a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DayState {
    /// Regular day of the displayed month.
    #[default]
    Normal,
    /// Outside the displayed month, outside the date bounds, or disabled by
    /// default.
    Disabled,
    /// The current day.
    Today,
}

/// One cell of a month grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    /// The date shown.
    pub date: CalendarDate,
    /// Visual state.
    pub state: DayState,
    /// Marking for the date, if any.
    pub marking: Option<Marking>,
    /// Leave the slot empty.
    pub hidden: bool,
    /// Inside the calendar's `[min_date, max_date]` bounds. Markings never
    /// re-enable a day outside them.
    pub in_range: bool,
}

/// Render-ready summary of a day cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayVisual {
    /// Day-of-month text.
    pub text: String,
    /// Visual state.
    pub state: DayState,
    /// Draw the selection shape.
    pub selected: bool,
    /// Dot colors, in draw order.
    pub dots: Vec<String>,
    /// Period bands, in draw order.
    pub periods: Vec<Period>,
    /// Whether a press reaches the calendar.
    pub interactive: bool,
}

/// Renders a day cell into its visual summary.
pub trait DayRenderer {
    /// Builds the visual for `cell`.
    fn render(&self, cell: &DayCell) -> DayVisual;
}

/// Day cell variant, chosen by [`MarkingType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayVariant {
    /// Selection circle plus one optional dot.
    Basic,
    /// Period band.
    Period,
    /// Multiple dots.
    MultiDot,
    /// Stacked period bands.
    MultiPeriod,
    /// Host-styled cell.
    Custom,
}

impl DayVariant {
    /// Picks the variant for a marking type.
    pub fn for_marking(marking_type: MarkingType) -> Self {
        match marking_type {
            MarkingType::Simple => Self::Basic,
            MarkingType::Period => Self::Period,
            MarkingType::MultiDot => Self::MultiDot,
            MarkingType::MultiPeriod => Self::MultiPeriod,
            MarkingType::Custom => Self::Custom,
        }
    }
}

impl DayRenderer for DayVariant {
    fn render(&self, cell: &DayCell) -> DayVisual {
        let marking = cell.marking.clone().unwrap_or_default();
        let disabled = marking
            .disabled
            .unwrap_or(cell.state == DayState::Disabled);
        let dots = match self {
            Self::Basic if marking.marked => vec![String::new()],
            Self::MultiDot => marking.dots.iter().map(|dot| dot.color.clone()).collect(),
            _ => Vec::new(),
        };
        let periods = match self {
            Self::Period => marking.periods.iter().take(1).cloned().collect(),
            Self::MultiPeriod => marking.periods.clone(),
            _ => Vec::new(),
        };

        DayVisual {
            text: if cell.hidden {
                String::new()
            } else {
                cell.date.day().to_string()
            },
            state: cell.state,
            selected: marking.selected,
            dots,
            periods,
            interactive: !cell.hidden
                && cell.in_range
                && !disabled
                && !marking.disable_touch_event,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(marking: Option<Marking>, state: DayState) -> DayCell {
        DayCell {
            date: CalendarDate::new(2024, 3, 9).expect("valid test date"),
            state,
            marking,
            hidden: false,
            in_range: true,
        }
    }

    #[test]
    fn marking_type_names() {
        assert_eq!(MarkingType::parse("multi-dot"), MarkingType::MultiDot);
        assert_eq!(MarkingType::parse("period"), MarkingType::Period);
        assert_eq!(MarkingType::parse("bogus"), MarkingType::Simple);
        assert_eq!(
            DayVariant::for_marking(MarkingType::MultiPeriod),
            DayVariant::MultiPeriod
        );
    }

    #[test]
    fn variants_pick_their_decorations() {
        let marking = Marking::default()
            .marked(true)
            .dots(vec![
                Dot {
                    key: "work".into(),
                    color: "red".into(),
                },
                Dot {
                    key: "gym".into(),
                    color: "blue".into(),
                },
            ])
            .periods(vec![Period {
                color: "green".into(),
                starting_day: true,
                ending_day: false,
            }]);
        let cell = cell(Some(marking), DayState::Normal);

        assert_eq!(DayVariant::Basic.render(&cell).dots.len(), 1);
        assert_eq!(DayVariant::MultiDot.render(&cell).dots, ["red", "blue"]);
        assert_eq!(DayVariant::Period.render(&cell).periods.len(), 1);
        assert!(DayVariant::Custom.render(&cell).dots.is_empty());
        assert_eq!(DayVariant::Basic.render(&cell).text, "9");
    }

    #[test]
    fn marked_dates_skip_bad_keys() {
        let marked = parse_marked_dates([
            ("2024-03-09", Marking::default().marked(true)),
            ("not a date", Marking::default()),
        ]);
        assert_eq!(marked.len(), 1);
        let key = CalendarDate::new(2024, 3, 9).expect("valid test date");
        assert!(marked[&key].marked);
    }

    #[test]
    fn explicit_enable_overrides_disabled_state() {
        let enabled = Marking::default().disabled(false);
        assert!(
            DayVariant::Basic
                .render(&cell(Some(enabled), DayState::Disabled))
                .interactive
        );
        assert!(
            !DayVariant::Basic
                .render(&cell(None, DayState::Disabled))
                .interactive
        );
        let untouchable = Marking::default().disable_touch_event(true);
        assert!(
            !DayVariant::Basic
                .render(&cell(Some(untouchable), DayState::Normal))
                .interactive
        );
    }

    #[test]
    fn explicit_enable_stays_within_bounds() {
        let enabled = Marking::default().disabled(false);
        let outside = DayCell {
            in_range: false,
            ..cell(Some(enabled), DayState::Disabled)
        };
        assert!(!DayVariant::Basic.render(&outside).interactive);
    }
}
