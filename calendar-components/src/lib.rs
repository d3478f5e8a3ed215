//! Headless calendar components: a single-month calendar, an infinite
//! virtualized month list, and an expandable calendar that morphs between a
//! week strip and a month grid.
//!
//! # Usage
//!
//! Components hold state only. The host renders what they expose, forwards
//! input and viewability events, applies their scroll commands and drains
//! their deferred work once per event-loop turn.
//!
//! ```
//! use calendar_components::{
//!     calendar_list::{CalendarList, CalendarListArgs},
//!     navigation::DateNavigation,
//! };
//! use calendar_foundation::CalendarDate;
//!
//! let start = CalendarDate::new(2024, 1, 15).unwrap();
//! let mut args = CalendarListArgs::default();
//! args.calendar = args.calendar.current_date(start);
//! let mut list = CalendarList::new(args);
//!
//! list.change_month(1);
//! list.flush();
//! assert!(list.take_scroll_command().is_some());
//! assert_eq!(list.current_date(), CalendarDate::new(2024, 2, 15).unwrap());
//! ```
#![deny(missing_docs, clippy::unwrap_used)]

pub mod animation;
pub mod calendar;
pub mod calendar_list;
pub mod callback;
pub mod context;
pub mod day;
pub mod expandable_calendar;
pub mod expansion;
pub mod header;
pub mod month_window;
pub mod navigation;
pub mod scroll;
pub mod turn_queue;
pub mod viewability;

pub use crate::{
    calendar::{Calendar, CalendarArgs},
    calendar_list::{CalendarList, CalendarListArgs, CalendarListDefaults},
    callback::CallbackWith,
    context::{CalendarContext, CalendarContextHandle, UpdateSource},
    expandable_calendar::{ExpandableCalendar, ExpandableCalendarArgs},
    expansion::{Expansion, ExpansionConfig, ExpansionDefaults, ExpansionFrame, Position},
    navigation::DateNavigation,
};
