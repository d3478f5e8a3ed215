//! Open/closed height state of the expandable calendar.
//!
//! ## Usage
//!
//! Feed vertical pan deltas through [`Expansion::begin_drag`],
//! [`Expansion::drag_move`] and [`Expansion::drag_end`], advance springs with
//! [`Expansion::tick`], and draw from [`Expansion::frame`].
//!
//! The committed height is authoritative. [`Position`] is its
//! classification: a drag released at or above `open_height / 1.75` snaps
//! open, anything lower snaps closed.

use calendar_foundation::Dp;
use derive_setters::Setters;
use tracing::{debug, trace};

use crate::{
    animation::{Spring1D, SpringConfig},
    scroll::Orientation,
};

/// Pixel and spring constants of the expandable calendar.
pub struct ExpansionDefaults;

impl ExpansionDefaults {
    /// Header plus one week row.
    pub const CLOSED_HEIGHT: Dp = Dp(120.0);
    /// One additional week row.
    pub const WEEK_HEIGHT: Dp = Dp(46.0);
    /// Space reserved for the drag knob.
    pub const KNOB_CONTAINER_HEIGHT: Dp = Dp(24.0);
    /// Bottom padding of the open grid when the knob is hidden.
    pub const HIDDEN_KNOB_PADDING: Dp = Dp(12.0);
    /// Height of the vertical list's header.
    pub const HEADER_HEIGHT: Dp = Dp(68.0);
    /// Drag distance before a pan is claimed.
    pub const DRAG_START_DISTANCE: Dp = Dp(5.0);
    /// Drag distance over which the week strip fades out.
    pub const WEEK_STRIP_FADE_DISTANCE: Dp = Dp(100.0);
    /// Open height divided by this gives the snap threshold.
    pub const OPEN_THRESHOLD_DIVISOR: f64 = 1.75;
    /// Height spring speed.
    pub const SPRING_SPEED: f64 = 20.0;
    /// Height spring bounciness.
    pub const SPRING_BOUNCINESS: f64 = 6.0;
    /// Header spring speed.
    pub const HEADER_SPRING_SPEED: f64 = 2.0;
    /// Header spring bounciness.
    pub const HEADER_SPRING_BOUNCINESS: f64 = 1.0;
}

/// Settled display mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Position {
    /// Week strip.
    #[default]
    Closed,
    /// Full month grid.
    Open,
}

impl Position {
    /// Returns true for [`Position::Open`].
    pub fn is_open(self) -> bool {
        self == Position::Open
    }
}

/// Expansion configuration.
#[derive(Debug, Clone, Copy, PartialEq, Setters)]
pub struct ExpansionConfig {
    /// Scroll axis of the embedded list.
    pub orientation: Orientation,
    /// Position at construction.
    pub initial_position: Position,
    /// Hide the drag knob.
    pub hide_knob: bool,
    /// Refuse every pan gesture.
    pub disable_pan: bool,
    /// Week rows of the current month.
    pub number_of_weeks: usize,
}

impl Default for ExpansionConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::Horizontal,
            initial_position: Position::Closed,
            hide_knob: false,
            disable_pan: false,
            number_of_weeks: 5,
        }
    }
}

/// Live state of an active drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    /// Committed height when the drag began.
    pub base_height: Dp,
    /// Total vertical delta so far.
    pub dy: Dp,
    /// Height to draw, never below the closed height.
    pub height: Dp,
    /// Vertical header translation.
    pub header_offset: Dp,
    /// Week strip opacity.
    pub week_strip_opacity: f64,
}

/// Everything the host needs to draw one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpansionFrame {
    /// Container height.
    pub height: Dp,
    /// Vertical header translation, between `-HEADER_HEIGHT` and zero.
    pub header_offset: Dp,
    /// Week strip opacity.
    pub week_strip_opacity: f64,
    /// Classified position.
    pub position: Position,
    /// The month list scrolls only while open.
    pub scroll_enabled: bool,
    /// Draw the knob.
    pub knob_visible: bool,
    /// A drag is in progress.
    pub dragging: bool,
}

/// Expansion state machine.
#[derive(Debug, Clone)]
pub struct Expansion {
    config: ExpansionConfig,
    closed_height: Dp,
    open_height: Dp,
    base_height: Dp,
    position: Position,
    height: Spring1D,
    header: Spring1D,
    week_strip_opacity: f64,
    drag: Option<DragSession>,
    spring: SpringConfig,
    header_spring: SpringConfig,
}

impl Expansion {
    /// Creates the state machine resting at the configured initial position.
    pub fn new(config: ExpansionConfig) -> Self {
        let closed_height = closed_height_for(config.hide_knob);
        let open_height = open_height_for(config.number_of_weeks, config.hide_knob);
        let base_height = match config.initial_position {
            Position::Closed => closed_height,
            Position::Open => open_height,
        };
        Self {
            config,
            closed_height,
            open_height,
            base_height,
            position: config.initial_position,
            height: Spring1D::new(base_height.0),
            header: Spring1D::new(0.0),
            week_strip_opacity: if config.initial_position.is_open() {
                0.0
            } else {
                1.0
            },
            drag: None,
            spring: SpringConfig::from_speed_and_bounciness(
                ExpansionDefaults::SPRING_SPEED,
                ExpansionDefaults::SPRING_BOUNCINESS,
            ),
            header_spring: SpringConfig::from_speed_and_bounciness(
                ExpansionDefaults::HEADER_SPRING_SPEED,
                ExpansionDefaults::HEADER_SPRING_BOUNCINESS,
            ),
        }
    }

    /// The configuration.
    pub fn config(&self) -> &ExpansionConfig {
        &self.config
    }

    /// Enables or disables pan gestures.
    pub fn set_disable_pan(&mut self, disable_pan: bool) {
        self.config.disable_pan = disable_pan;
    }

    /// Height of the week strip mode.
    pub fn closed_height(&self) -> Dp {
        self.closed_height
    }

    /// Height of the month grid mode.
    pub fn open_height(&self) -> Dp {
        self.open_height
    }

    /// Last committed height.
    pub fn base_height(&self) -> Dp {
        self.base_height
    }

    /// Heights at or above this snap open.
    pub fn threshold(&self) -> Dp {
        self.open_height / ExpansionDefaults::OPEN_THRESHOLD_DIVISOR
    }

    /// Classifies `height` against the snap threshold.
    pub fn classify(&self, height: Dp) -> Position {
        if height >= self.threshold() {
            Position::Open
        } else {
            Position::Closed
        }
    }

    /// Current position.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Active drag, if any.
    pub fn drag(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    /// Week rows the open height is computed for.
    pub fn number_of_weeks(&self) -> usize {
        self.config.number_of_weeks
    }

    /// Recomputes the open height for `weeks` rows. Returns true when the
    /// week count changed.
    pub fn set_number_of_weeks(&mut self, weeks: usize) -> bool {
        if weeks == self.config.number_of_weeks {
            return false;
        }
        self.config.number_of_weeks = weeks;
        self.open_height = open_height_for(weeks, self.config.hide_knob);
        debug!(weeks, open_height = self.open_height.0, "open height recomputed");
        true
    }

    /// Overrides the open height, used by vertical layouts that fill the
    /// screen.
    pub fn set_open_height(&mut self, open_height: Dp) {
        self.open_height = open_height.max(self.closed_height);
    }

    /// Whether a pan with vertical delta `dy` should be claimed.
    pub fn should_begin_drag(&self, dy: Dp) -> bool {
        if self.config.disable_pan {
            return false;
        }
        if !self.config.orientation.is_horizontal() && self.position.is_open() {
            return false;
        }
        if self.position == Position::Closed && dy.0 < 0.0 {
            return false;
        }
        dy.abs() > ExpansionDefaults::DRAG_START_DISTANCE
    }

    /// Claims the pan when [`Expansion::should_begin_drag`] allows it and
    /// applies the first delta.
    pub fn begin_drag(&mut self, dy: Dp) -> bool {
        if self.drag.is_some() {
            self.drag_move(dy);
            return true;
        }
        if !self.should_begin_drag(dy) {
            return false;
        }
        trace!(dy = dy.0, base = self.base_height.0, "drag started");
        self.drag = Some(DragSession {
            base_height: self.base_height,
            dy: Dp::ZERO,
            height: self.base_height,
            header_offset: Dp(self.header.value()),
            week_strip_opacity: self.week_strip_opacity,
        });
        self.drag_move(dy);
        true
    }

    /// Updates the active drag with the total delta `dy`. Returns the drawn
    /// height, or `None` without an active drag.
    pub fn drag_move(&mut self, dy: Dp) -> Option<Dp> {
        let closed_height = self.closed_height;
        let horizontal = self.config.orientation.is_horizontal();
        let closed = self.position == Position::Closed;
        let drag = self.drag.as_mut()?;

        drag.dy = dy;
        drag.height = (drag.base_height + dy).max(closed_height);
        if horizontal {
            if closed {
                drag.week_strip_opacity =
                    (1.0 - dy.0 / ExpansionDefaults::WEEK_STRIP_FADE_DISTANCE.0).clamp(0.0, 1.0);
            }
        } else {
            drag.header_offset = (-dy).clamp(-ExpansionDefaults::HEADER_HEIGHT, Dp::ZERO);
        }
        trace!(dy = dy.0, height = drag.height.0, "drag moved");
        Some(drag.height)
    }

    /// Releases the active drag: commits its height and springs to the
    /// position it classifies as. Without an active drag the position is
    /// returned unchanged.
    pub fn drag_end(&mut self) -> Position {
        let Some(drag) = self.drag.take() else {
            return self.position;
        };
        self.base_height = drag.height;
        self.header.snap_to(drag.header_offset.0);
        self.bounce(drag.height, None)
    }

    /// Springs to `explicit` when given, otherwise to the canonical height
    /// of the committed height's classification. The spring restarts from
    /// the instantaneous height.
    pub fn bounce_to_position(&mut self, explicit: Option<Dp>) -> Position {
        if let Some(drag) = self.drag.take() {
            self.header.snap_to(drag.header_offset.0);
        }
        let start = Dp(self.height.value());
        self.bounce(start, explicit)
    }

    fn bounce(&mut self, start: Dp, explicit: Option<Dp>) -> Position {
        let threshold = self.threshold();
        let settled = if self.base_height >= threshold {
            self.open_height
        } else {
            self.closed_height
        };
        self.base_height = explicit.unwrap_or(settled);
        let is_open = self.base_height >= threshold;

        self.height.restart_from(start.0, self.base_height.0);
        self.position = if self.base_height == self.closed_height {
            Position::Closed
        } else {
            Position::Open
        };

        let header_start = self.header.value();
        if !self.config.orientation.is_horizontal() && !is_open {
            self.header.restart_from(header_start, 0.0);
        } else {
            self.header.snap_to(header_start);
        }
        self.week_strip_opacity = if is_open { 0.0 } else { 1.0 };

        debug!(
            from = start.0,
            to = self.base_height.0,
            position = ?self.position,
            "expansion bounce"
        );
        self.position
    }

    /// Advances the springs by `dt` seconds. Returns true while anything is
    /// still moving.
    pub fn tick(&mut self, dt: f64) -> bool {
        self.height.update(dt, &self.spring);
        self.header.update(dt, &self.header_spring);
        self.is_animating()
    }

    /// Returns true while a spring is in flight.
    pub fn is_animating(&self) -> bool {
        self.height.is_animating() || self.header.is_animating()
    }

    /// Current drawing state.
    pub fn frame(&self) -> ExpansionFrame {
        let (height, header_offset, week_strip_opacity) = match &self.drag {
            Some(drag) => (drag.height, drag.header_offset, drag.week_strip_opacity),
            None => (
                self.height.value_dp(),
                Dp(self.header.value()),
                self.week_strip_opacity,
            ),
        };
        ExpansionFrame {
            height,
            header_offset,
            week_strip_opacity,
            position: self.position,
            scroll_enabled: self.position.is_open(),
            knob_visible: !self.config.hide_knob,
            dragging: self.drag.is_some(),
        }
    }
}

fn closed_height_for(hide_knob: bool) -> Dp {
    if hide_knob {
        ExpansionDefaults::CLOSED_HEIGHT
    } else {
        ExpansionDefaults::CLOSED_HEIGHT + ExpansionDefaults::KNOB_CONTAINER_HEIGHT
    }
}

fn open_height_for(weeks: usize, hide_knob: bool) -> Dp {
    let extra_rows = weeks.saturating_sub(1) as f64;
    let allowance = if hide_knob {
        ExpansionDefaults::HIDDEN_KNOB_PADDING
    } else {
        ExpansionDefaults::KNOB_CONTAINER_HEIGHT
    };
    ExpansionDefaults::CLOSED_HEIGHT + ExpansionDefaults::WEEK_HEIGHT * extra_rows + allowance
}
