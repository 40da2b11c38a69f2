// File: crates/meridian-core/src/types.rs
// Summary: Shared value types and constants (sizes, paddings, colors, strokes, fonts).

/// Default surface width in pixels.
pub const WIDTH: i32 = 1024;
/// Default surface height in pixels.
pub const HEIGHT: i32 = 640;

/// Outer padding around the plot, in pixels.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Insets {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Insets {
    /// Create new insets; negative values are clamped to zero.
    pub fn new(left: f64, right: f64, top: f64, bottom: f64) -> Self {
        Self { left: left.max(0.0), right: right.max(0.0), top: top.max(0.0), bottom: bottom.max(0.0) }
    }
    /// Total horizontal inset (left + right).
    pub fn hsum(&self) -> f64 { self.left + self.right }
    /// Total vertical inset (top + bottom).
    pub fn vsum(&self) -> f64 { self.top + self.bottom }
}

impl Default for Insets {
    fn default() -> Self {
        Self::new(12.0, 16.0, 16.0, 12.0)
    }
}

/// 8-bit RGBA color, backend neutral.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self { Self { r, g, b, a: 255 } }
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self { Self { r, g, b, a } }
    pub const fn with_alpha(self, a: u8) -> Self { Self { a, ..self } }

    /// `#rrggbb`, alpha reported separately through [`Color::opacity`].
    pub fn to_hex(&self) -> String { format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b) }
    pub fn opacity(&self) -> f64 { f64::from(self.a) / 255.0 }
}

/// Line stroke styling; width in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
}

impl Stroke {
    pub const fn new(color: Color, width: f64) -> Self { Self { color, width } }
}

impl Default for Stroke {
    fn default() -> Self { Self::new(Color::BLACK, 1.0) }
}

/// Font request. Families are hints; backends fall back as they see fit.
#[derive(Clone, Debug, PartialEq)]
pub struct Font {
    pub family: String,
    pub size: f64,
    /// Prefer tabular/monospaced digits (numeric tick labels).
    pub mono_numeric: bool,
}

impl Font {
    pub fn new(family: impl Into<String>, size: f64) -> Self {
        Self { family: family.into(), size: size.max(1.0), mono_numeric: false }
    }
    pub fn numeric(size: f64) -> Self {
        Self { family: "monospace".to_string(), size: size.max(1.0), mono_numeric: true }
    }
}

impl Default for Font {
    fn default() -> Self { Self::new("sans-serif", 12.0) }
}
