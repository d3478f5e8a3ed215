//! Drives an expandable calendar through a scripted session and logs what a
//! host would draw. Set `RUST_LOG=debug` to see every state transition.

use std::sync::Arc;

use calendar_components::{
    CalendarContextHandle, ExpandableCalendar, ExpandableCalendarArgs, Position,
    day::{Marking, parse_marked_dates},
    header::HeaderArrow,
};
use calendar_foundation::{CalendarDate, Dp};
use tracing::{info, warn};

const FRAME_DT: f64 = 1.0 / 60.0;
const MAX_FRAMES: usize = 600;
const PAGE_WIDTH: Dp = Dp(360.0);

fn main() {
    init_tracing();

    let Some(start) = CalendarDate::new(2024, 3, 13) else {
        warn!("invalid start date");
        return;
    };
    let context = CalendarContextHandle::new(start).with_on_date_changed(|snapshot| {
        info!(date = %snapshot.date, source = ?snapshot.update_source, "context date changed");
    });

    let mut args = ExpandableCalendarArgs::default();
    args.list.calendar = args
        .list
        .calendar
        .marked_dates(Arc::new(parse_marked_dates([
            ("2024-03-15", Marking::default().marked(true)),
            ("2024-04-02", Marking::default().marked(true)),
        ])))
        .on_day_press(|data| info!(date = %data.date_string, "day pressed"));

    let mut calendar = ExpandableCalendar::new(args, context);
    report(&calendar, "initial");

    open_by_drag(&mut calendar);
    page_to_next_month(&mut calendar);
    press_day(&mut calendar, start.add_months(1).add_days(5));

    let outcome = calendar.press_arrow(HeaderArrow::NextMonth);
    info!(?outcome, "next month arrow");
    calendar.flush();
    report(&calendar, "after arrow");
}

fn init_tracing() {
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match tracing_subscriber::EnvFilter::try_new(
            "error,calendar_demo=info,calendar_components=info",
        ) {
            Ok(filter) => filter,
            Err(_) => tracing_subscriber::EnvFilter::new("error"),
        },
    };

    let _ = tracing_subscriber::fmt()
        .pretty()
        .with_env_filter(filter)
        .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
        .try_init();
}

#[tracing::instrument(level = "info", skip(calendar))]
fn open_by_drag(calendar: &mut ExpandableCalendar) {
    if !calendar.begin_drag(Dp(12.0)) {
        warn!("drag refused");
        return;
    }
    for dy in [40.0, 90.0, 140.0] {
        calendar.drag_move(Dp(dy));
    }
    let position = calendar.drag_end();
    settle(calendar);
    info!(?position, "drag released");
    report(calendar, "after drag");
}

#[tracing::instrument(level = "info", skip(calendar))]
fn page_to_next_month(calendar: &mut ExpandableCalendar) {
    let index = calendar.list().initial_scroll_index() + 1;
    let offset = PAGE_WIDTH * index as f64;
    let report = calendar.on_scroll(offset, PAGE_WIDTH);
    info!(visible = ?report.visible_months, "paged");
    calendar.flush();
    settle(calendar);
    self::report(calendar, "after paging");
}

#[tracing::instrument(level = "info", skip(calendar))]
fn press_day(calendar: &mut ExpandableCalendar, date: CalendarDate) {
    if !calendar.press_day(date) {
        warn!(%date, "day press refused");
        return;
    }
    calendar.flush();
    settle(calendar);
    if calendar.position() == Position::Closed {
        let strip: Vec<String> = calendar
            .week_strip()
            .iter()
            .map(|cell| cell.date.to_string())
            .collect();
        info!(?strip, "collapsed to week strip");
    }
    report(calendar, "after day press");
}

fn settle(calendar: &mut ExpandableCalendar) {
    for _ in 0..MAX_FRAMES {
        if !calendar.tick(FRAME_DT) {
            return;
        }
    }
    warn!("animation did not settle");
}

fn report(calendar: &ExpandableCalendar, stage: &str) {
    let frame = calendar.frame();
    info!(
        stage,
        title = %calendar.header_title(),
        date = %calendar.context().date(),
        position = ?frame.position,
        height = frame.height.0,
        week_strip_opacity = frame.week_strip_opacity,
        scroll_enabled = frame.scroll_enabled,
        "frame"
    );
}
