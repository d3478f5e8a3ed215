//! # Density-Independent Pixels (Dp)
//!
//! Lengths used by the calendar layout math: list item sizes, scroll offsets
//! and the expandable calendar's animated height.
//!
//! ## Usage
//!
//! ```
//! use calendar_foundation::Dp;
//!
//! let week = Dp(46.0);
//! let open = Dp(120.0) + week * 4.0;
//! assert_eq!(open, Dp(304.0));
//! ```

use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// Density-independent length.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dp(pub f64);

impl Dp {
    /// Zero length.
    pub const ZERO: Dp = Dp(0.0);

    /// Creates a new `Dp` at compile time.
    pub const fn new(value: f64) -> Self {
        Dp(value)
    }

    /// Returns the raw value.
    pub const fn to_f64(self) -> f64 {
        self.0
    }

    /// Returns the larger of two lengths.
    pub fn max(self, other: Dp) -> Dp {
        Dp(self.0.max(other.0))
    }

    /// Returns the smaller of two lengths.
    pub fn min(self, other: Dp) -> Dp {
        Dp(self.0.min(other.0))
    }

    /// Restricts the length to `[min, max]`.
    ///
    /// When `max < min` the result is `min`, so an empty range never panics.
    pub fn clamp(self, min: Dp, max: Dp) -> Dp {
        self.min(max).max(min)
    }

    /// Returns the absolute length.
    pub fn abs(self) -> Dp {
        Dp(self.0.abs())
    }
}

impl From<f64> for Dp {
    fn from(value: f64) -> Self {
        Dp(value)
    }
}

impl Add for Dp {
    type Output = Dp;

    fn add(self, rhs: Dp) -> Dp {
        Dp(self.0 + rhs.0)
    }
}

impl AddAssign for Dp {
    fn add_assign(&mut self, rhs: Dp) {
        self.0 += rhs.0;
    }
}

impl Sub for Dp {
    type Output = Dp;

    fn sub(self, rhs: Dp) -> Dp {
        Dp(self.0 - rhs.0)
    }
}

impl SubAssign for Dp {
    fn sub_assign(&mut self, rhs: Dp) {
        self.0 -= rhs.0;
    }
}

impl Mul<f64> for Dp {
    type Output = Dp;

    fn mul(self, rhs: f64) -> Dp {
        Dp(self.0 * rhs)
    }
}

impl Div<f64> for Dp {
    type Output = Dp;

    fn div(self, rhs: f64) -> Dp {
        Dp(self.0 / rhs)
    }
}

impl Neg for Dp {
    type Output = Dp;

    fn neg(self) -> Dp {
        Dp(-self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_bounds_both_sides() {
        assert_eq!(Dp(50.0).clamp(Dp(0.0), Dp(10.0)), Dp(10.0));
        assert_eq!(Dp(-5.0).clamp(Dp(0.0), Dp(10.0)), Dp(0.0));
    }

    #[test]
    fn clamp_prefers_min_on_inverted_range() {
        assert_eq!(Dp(5.0).clamp(Dp(8.0), Dp(2.0)), Dp(8.0));
    }

    #[test]
    fn arithmetic() {
        let mut d = Dp(10.0) + Dp(5.0) - Dp(3.0);
        d += Dp(1.0);
        d -= Dp(2.0);
        assert_eq!(d, Dp(11.0));
        assert_eq!(d * 2.0 / 4.0, Dp(5.5));
        assert_eq!(-d, Dp(-11.0));
    }
}
