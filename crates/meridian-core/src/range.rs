// File: crates/meridian-core/src/range.rs
// Summary: Immutable numeric interval with percent/value conversion.

use std::fmt;

use crate::error::{ChartError, ChartResult};

/// A closed numeric interval `[lower, upper]`.
/// Contract: both ends finite, `lower < upper`. Enforced by [`ValueRange::new`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueRange {
    lower: f64,
    upper: f64,
}

impl ValueRange {
    pub fn new(lower: f64, upper: f64) -> ChartResult<Self> {
        if !lower.is_finite() || !upper.is_finite() || lower >= upper {
            return Err(ChartError::InvalidRange { lower, upper });
        }
        Ok(Self { lower, upper })
    }

    /// Caller guarantees the invariant (axis state keeps it at all times).
    pub(crate) fn from_ordered(lower: f64, upper: f64) -> Self {
        debug_assert!(lower < upper, "from_ordered({lower}, {upper})");
        Self { lower, upper }
    }

    pub fn lower(&self) -> f64 { self.lower }
    pub fn upper(&self) -> f64 { self.upper }
    pub fn length(&self) -> f64 { self.upper - self.lower }
    pub fn central_value(&self) -> f64 { self.lower + self.length() * 0.5 }

    /// Position of `value` as a fraction of the range (0 at lower, 1 at upper).
    pub fn percent(&self, value: f64) -> f64 {
        (value - self.lower) / self.length()
    }

    /// Inverse of [`ValueRange::percent`].
    pub fn value(&self, percent: f64) -> f64 {
        self.lower + percent * self.length()
    }

    /// Inclusive of both ends.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }
}

impl fmt::Display for ValueRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lower, self.upper)
    }
}
