// File: crates/meridian-core/src/error.rs
// Summary: Library error type; invariant violations surface here instead of panicking.

use thiserror::Error;

use crate::geometry::RectangleEdge;

/// Errors raised by the charting core.
///
/// Range and edge errors indicate caller mistakes (bad bounds, bad edge name)
/// and are reported immediately. Surface errors come from the Skia backend.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    #[error("invalid range: lower bound {lower} must be finite and below upper bound {upper}")]
    InvalidRange { lower: f64, upper: f64 },

    #[error("invalid axis bounds [{lower}, {upper}]: {reason}")]
    InvalidBounds {
        lower: f64,
        upper: f64,
        reason: &'static str,
    },

    #[error("invalid log base {0}: must be finite and greater than 1")]
    InvalidLogBase(f64),

    #[error("unknown rectangle edge `{0}` (expected top, bottom, left or right)")]
    UnknownEdge(String),

    #[error("{axis} axis cannot be placed on the {edge} edge")]
    MisplacedAxis { axis: &'static str, edge: RectangleEdge },

    #[error("failed to create {width}x{height} raster surface")]
    Surface { width: i32, height: i32 },

    #[error("failed to encode {0}")]
    Encode(&'static str),
}

pub type ChartResult<T> = Result<T, ChartError>;
