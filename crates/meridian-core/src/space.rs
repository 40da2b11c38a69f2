// File: crates/meridian-core/src/space.rs
// Summary: Per-render accumulator of pixel space reserved by axes on each edge.

use crate::geometry::{Rect, RectangleEdge};

/// Insets reserved around the data rectangle. Created fresh for every draw.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AxisSpace {
    top: f64,
    left: f64,
    bottom: f64,
    right: f64,
}

impl AxisSpace {
    pub fn new() -> Self { Self::default() }

    pub fn top(&self) -> f64 { self.top }
    pub fn left(&self) -> f64 { self.left }
    pub fn bottom(&self) -> f64 { self.bottom }
    pub fn right(&self) -> f64 { self.right }

    pub fn get(&self, edge: RectangleEdge) -> f64 {
        match edge {
            RectangleEdge::Top => self.top,
            RectangleEdge::Left => self.left,
            RectangleEdge::Bottom => self.bottom,
            RectangleEdge::Right => self.right,
        }
    }

    fn slot(&mut self, edge: RectangleEdge) -> &mut f64 {
        match edge {
            RectangleEdge::Top => &mut self.top,
            RectangleEdge::Left => &mut self.left,
            RectangleEdge::Bottom => &mut self.bottom,
            RectangleEdge::Right => &mut self.right,
        }
    }

    /// Add `pixels` to the space reserved on `edge`. Negative or NaN requests are ignored.
    pub fn extend(&mut self, pixels: f64, edge: RectangleEdge) {
        if pixels > 0.0 {
            *self.slot(edge) += pixels;
        }
    }

    /// Raise the space on `edge` to at least `pixels` (fixed axis sizes).
    pub fn ensure_at_least(&mut self, pixels: f64, edge: RectangleEdge) {
        let slot = self.slot(edge);
        if pixels > *slot {
            *slot = pixels;
        }
    }

    /// `bounds` shrunk by all four insets.
    pub fn inner_rect(&self, bounds: Rect) -> Rect {
        bounds.shrink(self.top, self.left, self.bottom, self.right)
    }
}
