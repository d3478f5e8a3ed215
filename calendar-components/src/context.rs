//! Date shared between an expandable calendar and its siblings.
//!
//! An agenda list, a "today" button and the expandable calendar all read and
//! write one [`CalendarContext`]. Every write records its [`UpdateSource`] so
//! readers can tell a day press apart from a page scroll.

use std::sync::Arc;

use calendar_foundation::CalendarDate;
use parking_lot::RwLock;
use tracing::debug;

use crate::callback::CallbackWith;

/// What moved the shared date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UpdateSource {
    /// Initial value.
    #[default]
    CalendarInit,
    /// A "today" button.
    TodayPress,
    /// An agenda list was dragged.
    ListDrag,
    /// A day cell was pressed.
    DayPress,
    /// The calendar paged by month or year.
    PageScroll,
    /// The week strip was scrolled.
    WeekScroll,
}

/// Snapshot of the shared date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarContext {
    /// Shared current date.
    pub date: CalendarDate,
    /// Source of the latest write.
    pub update_source: UpdateSource,
    /// Increments whenever `date` changes.
    pub revision: u64,
}

/// Cloneable handle to a shared [`CalendarContext`].
#[derive(Clone)]
pub struct CalendarContextHandle {
    inner: Arc<RwLock<CalendarContext>>,
    on_date_changed: Option<CallbackWith<CalendarContext>>,
}

impl CalendarContextHandle {
    /// Creates a context holding `date`.
    pub fn new(date: CalendarDate) -> Self {
        Self {
            inner: Arc::new(RwLock::new(CalendarContext {
                date,
                update_source: UpdateSource::CalendarInit,
                revision: 0,
            })),
            on_date_changed: None,
        }
    }

    /// Sets a listener called after each date change, outside the lock.
    pub fn with_on_date_changed<F>(mut self, listener: F) -> Self
    where
        F: Fn(CalendarContext) + Send + Sync + 'static,
    {
        self.on_date_changed = Some(CallbackWith::new(listener));
        self
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> CalendarContext {
        *self.inner.read()
    }

    /// Shared date.
    pub fn date(&self) -> CalendarDate {
        self.inner.read().date
    }

    /// Source of the latest write.
    pub fn update_source(&self) -> UpdateSource {
        self.inner.read().update_source
    }

    /// Revision of the shared date.
    pub fn revision(&self) -> u64 {
        self.inner.read().revision
    }

    /// Writes `date` on behalf of `source`. Returns true when the date
    /// changed; the source is recorded either way.
    pub fn set_date(&self, date: CalendarDate, source: UpdateSource) -> bool {
        let snapshot = {
            let mut context = self.inner.write();
            context.update_source = source;
            if context.date == date {
                return false;
            }
            context.date = date;
            context.revision += 1;
            *context
        };
        debug!(%date, ?source, "context date changed");
        if let Some(listener) = &self.on_date_changed {
            listener.call(snapshot);
        }
        true
    }

    /// Returns true when both handles share the same context.
    pub fn ptr_eq(&self, other: &CalendarContextHandle) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl std::fmt::Debug for CalendarContextHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CalendarContextHandle")
            .field("context", &self.snapshot())
            .finish()
    }
}
