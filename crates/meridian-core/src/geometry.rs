// File: crates/meridian-core/src/geometry.rs
// Summary: Lightweight geometry helpers for pixel math (rects, sizes, edges, text anchors).

use std::fmt;
use std::str::FromStr;

use crate::error::ChartError;

/// Axis-aligned rectangle in pixel space, origin at the top-left.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }
    pub fn from_ltrb(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self { x: left, y: top, width: right - left, height: bottom - top }
    }
    pub fn right(&self) -> f64 { self.x + self.width }
    pub fn bottom(&self) -> f64 { self.y + self.height }
    pub fn center_x(&self) -> f64 { self.x + self.width * 0.5 }
    pub fn center_y(&self) -> f64 { self.y + self.height * 0.5 }

    /// Shrink by the given insets. Width and height never go negative.
    pub fn shrink(&self, top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self {
            x: self.x + left,
            y: self.y + top,
            width: (self.width - left - right).max(0.0),
            height: (self.height - top - bottom).max(0.0),
        }
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }

    pub fn is_empty(&self) -> bool { self.width <= 0.0 || self.height <= 0.0 }
}

/// Width/height pair, used for text measurement.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self { Self { width, height } }
    pub fn is_zero(&self) -> bool { self.width <= 0.0 || self.height <= 0.0 }
}

/// The side of the data rectangle an axis is attached to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RectangleEdge {
    Top,
    Bottom,
    Left,
    Right,
}

impl RectangleEdge {
    pub fn is_top_or_bottom(self) -> bool { matches!(self, Self::Top | Self::Bottom) }
    pub fn is_left_or_right(self) -> bool { matches!(self, Self::Left | Self::Right) }

    pub fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl FromStr for RectangleEdge {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            _ => Err(ChartError::UnknownEdge(s.to_string())),
        }
    }
}

impl fmt::Display for RectangleEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// Which point of a text's bounding box sits on the requested (x, y).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAnchor {
    TopLeft,
    TopCenter,
    TopRight,
    CenterLeft,
    Center,
    CenterRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl TextAnchor {
    /// Offset from the anchor point to the top-left corner of a `size` box.
    pub fn offset(self, size: Size) -> (f64, f64) {
        use TextAnchor::*;
        let dx = match self {
            TopLeft | CenterLeft | BottomLeft => 0.0,
            TopCenter | Center | BottomCenter => -size.width * 0.5,
            TopRight | CenterRight | BottomRight => -size.width,
        };
        let dy = match self {
            TopLeft | TopCenter | TopRight => 0.0,
            CenterLeft | Center | CenterRight => -size.height * 0.5,
            BottomLeft | BottomCenter | BottomRight => -size.height,
        };
        (dx, dy)
    }
}
