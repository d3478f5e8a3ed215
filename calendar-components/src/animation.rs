//! Spring animation used for the expandable calendar height and header.
//!
//! ## Usage
//!
//! Build a [`SpringConfig`] from speed and bounciness, retarget a
//! [`Spring1D`] and advance it from the host's frame clock.

use calendar_foundation::Dp;

const SUBSTEP: f64 = 1.0 / 240.0;
const MAX_FRAME_DT: f64 = 0.1;
const REST_DISPLACEMENT: f64 = 0.01;
const REST_SPEED: f64 = 0.01;

/// Physical spring parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringConfig {
    /// Spring constant.
    pub stiffness: f64,
    /// Damping coefficient.
    pub damping: f64,
    /// Attached mass.
    pub mass: f64,
}

impl SpringConfig {
    /// Converts designer-facing speed and bounciness into physical
    /// parameters, following the Origami mapping.
    ///
    /// Higher speed gives a stiffer spring; higher bounciness lowers the
    /// friction and lets the spring overshoot more.
    pub fn from_speed_and_bounciness(speed: f64, bounciness: f64) -> Self {
        let bounce = project_normal(normalize(bounciness / 1.7, 0.0, 20.0), 0.0, 0.8);
        let speed = normalize(speed / 1.7, 0.0, 20.0);
        let tension = project_normal(speed, 0.5, 200.0);
        let friction = quadratic_out_interpolation(bounce, no_bounce_friction(tension), 0.01);

        Self {
            stiffness: (tension - 30.0) * 3.62 + 194.0,
            damping: (friction - 8.0) * 3.0 + 25.0,
            mass: 1.0,
        }
    }
}

fn normalize(value: f64, start: f64, end: f64) -> f64 {
    (value - start) / (end - start)
}

fn project_normal(n: f64, start: f64, end: f64) -> f64 {
    start + n * (end - start)
}

fn quadratic_out_interpolation(t: f64, start: f64, end: f64) -> f64 {
    let t = 2.0 * t - t * t;
    t * end + (1.0 - t) * start
}

fn no_bounce_friction(tension: f64) -> f64 {
    if tension <= 18.0 {
        0.0007 * tension.powi(3) - 0.031 * tension.powi(2) + 0.64 * tension + 1.28
    } else if tension <= 44.0 {
        0.000044 * tension.powi(3) - 0.006 * tension.powi(2) + 0.36 * tension + 2.0
    } else {
        0.00000045 * tension.powi(3) - 0.000332 * tension.powi(2) + 0.1078 * tension + 5.84
    }
}

/// One-dimensional damped spring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring1D {
    value: f64,
    velocity: f64,
    target: f64,
}

impl Spring1D {
    /// Creates a spring resting at `value`.
    pub fn new(value: f64) -> Self {
        Self {
            value,
            velocity: 0.0,
            target: value,
        }
    }

    /// Current position.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Current velocity.
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Position the spring is heading to.
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Current position as a length.
    pub fn value_dp(&self) -> Dp {
        Dp(self.value)
    }

    /// Jumps to `value` and stops.
    pub fn snap_to(&mut self, value: f64) {
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
    }

    /// Retargets the spring, keeping its current motion.
    pub fn set_target(&mut self, target: f64) {
        self.target = target;
    }

    /// Starts a fresh animation from `start` to `target` with zero velocity.
    pub fn restart_from(&mut self, start: f64, target: f64) {
        self.value = start;
        self.velocity = 0.0;
        self.target = target;
    }

    /// Advances the simulation by `dt` seconds.
    pub fn update(&mut self, dt: f64, config: &SpringConfig) {
        if !self.is_animating() {
            return;
        }
        let mut remaining = dt.clamp(0.0, MAX_FRAME_DT);
        let stiffness = config.stiffness.max(0.0);
        if stiffness == 0.0 {
            self.snap_to(self.target);
            return;
        }
        let damping = config.damping.max(0.0);
        let mass = if config.mass > 0.0 { config.mass } else { 1.0 };

        while remaining > 0.0 {
            let step = remaining.min(SUBSTEP);
            let displacement = self.value - self.target;
            let acceleration = (-stiffness * displacement - damping * self.velocity) / mass;
            self.velocity += acceleration * step;
            self.value += self.velocity * step;
            remaining -= step;
        }

        if (self.value - self.target).abs() < REST_DISPLACEMENT
            && self.velocity.abs() < REST_SPEED
        {
            self.snap_to(self.target);
        }
    }

    /// Returns true while the spring has not settled on its target.
    pub fn is_animating(&self) -> bool {
        (self.value - self.target).abs() >= REST_DISPLACEMENT || self.velocity.abs() >= REST_SPEED
    }
}
