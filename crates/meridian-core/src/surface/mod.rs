// File: crates/meridian-core/src/surface/mod.rs
// Summary: Drawing-surface abstraction (primitives, text, layers, clipping) with raster, SVG and recording backends.

mod raster;
mod record;
mod svg;

pub use raster::RasterSurface;
pub use record::{DrawOp, RecordingSurface, TextMetrics};
pub use svg::SvgSurface;

use crate::geometry::{Rect, Size, TextAnchor};
use crate::types::{Color, Font, Stroke};

/// Named drawing layers. The overlay can be cleared without touching the main drawing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Layer {
    #[default]
    Main,
    Overlay,
}

impl Layer {
    pub fn id(self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Overlay => "overlay",
        }
    }
}

/// One path command.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathSegment {
    MoveTo(f64, f64),
    LineTo(f64, f64),
    Close,
}

/// A polyline/polygon outline built from move/line/close commands.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PathData {
    segments: Vec<PathSegment>,
}

impl PathData {
    pub fn new() -> Self { Self::default() }
    pub fn move_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.segments.push(PathSegment::MoveTo(x, y));
        self
    }
    pub fn line_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.segments.push(PathSegment::LineTo(x, y));
        self
    }
    pub fn close(&mut self) -> &mut Self {
        self.segments.push(PathSegment::Close);
        self
    }
    pub fn segments(&self) -> &[PathSegment] { &self.segments }
    pub fn is_empty(&self) -> bool { self.segments.is_empty() }
}

/// The primitive operations the chart core draws with.
///
/// Implementations draw onto whichever layer was last selected; clipping
/// applies to every primitive until reset with `set_clip(None)`.
pub trait Surface {
    fn select_layer(&mut self, layer: Layer);
    fn layer(&self) -> Layer;
    /// Erase everything drawn on `layer` so far.
    fn clear_layer(&mut self, layer: Layer);
    fn set_clip(&mut self, clip: Option<Rect>);

    fn draw_line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, stroke: &Stroke);
    fn draw_rect(&mut self, rect: Rect, stroke: &Stroke);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn draw_circle(&mut self, cx: f64, cy: f64, radius: f64, stroke: &Stroke);
    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Color);
    fn draw_path(&mut self, path: &PathData, stroke: &Stroke);
    fn fill_path(&mut self, path: &PathData, color: Color);

    /// Draw `text` so that `anchor` of its box lands on `(x, y)`, rotated by
    /// `rotation` degrees (clockwise) around that point.
    #[allow(clippy::too_many_arguments)]
    fn draw_text(
        &mut self,
        text: &str,
        x: f64,
        y: f64,
        font: &Font,
        color: Color,
        anchor: TextAnchor,
        rotation: f64,
    );

    /// Unrotated bounding box of `text`. May be zero on a degenerate host surface.
    fn measure_text(&self, text: &str, font: &Font) -> Size;
}
