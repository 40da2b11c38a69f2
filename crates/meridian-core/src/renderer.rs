// File: crates/meridian-core/src/renderer.rs
// Summary: Per-item XY renderers (scatter, line) and the context they draw against.

use crate::axis::Axis;
use crate::dataset::XYDataset;
use crate::geometry::{Rect, RectangleEdge};
use crate::surface::Surface;
use crate::theme::Theme;
use crate::types::Stroke;

/// Everything a renderer needs to place one item on screen.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    pub dataset: &'a dyn XYDataset,
    pub x_axis: &'a Axis,
    pub y_axis: &'a Axis,
    pub x_edge: RectangleEdge,
    pub y_edge: RectangleEdge,
    pub data_area: Rect,
    pub theme: &'a Theme,
}

impl RenderContext<'_> {
    /// Data point to pixel position inside the data area.
    pub fn to_screen(&self, x: f64, y: f64) -> (f64, f64) {
        let px = self.x_axis.value_to_screen(x, self.data_area, self.x_edge);
        let py = self.y_axis.value_to_screen(y, self.data_area, self.y_edge);
        (px, py)
    }

    /// Screen position of `(series, item)`, or `None` when either value is not finite.
    pub fn item_position(&self, series: usize, item: usize) -> Option<(f64, f64)> {
        let x = self.dataset.x(series, item);
        let y = self.dataset.y(series, item);
        if !x.is_finite() || !y.is_finite() {
            return None;
        }
        let (px, py) = self.to_screen(x, y);
        (px.is_finite() && py.is_finite()).then_some((px, py))
    }
}

/// Draws one dataset item at a time, possibly in several passes.
///
/// The scheduler calls `draw_item` for passes `0..pass_count()` on each item
/// in ascending `(series, item)` order, so an item may rely on its predecessor.
pub trait XYRenderer {
    fn pass_count(&self) -> usize { 1 }
    fn draw_item(&self, surface: &mut dyn Surface, ctx: &RenderContext<'_>, series: usize, item: usize, pass: usize);
}

/// Filled circle per item.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScatterRenderer {
    pub radius: f64,
}

impl Default for ScatterRenderer {
    fn default() -> Self { Self { radius: 2.5 } }
}

impl XYRenderer for ScatterRenderer {
    fn draw_item(&self, surface: &mut dyn Surface, ctx: &RenderContext<'_>, series: usize, item: usize, _pass: usize) {
        if let Some((px, py)) = ctx.item_position(series, item) {
            surface.fill_circle(px, py, self.radius, ctx.theme.series_color(series));
        }
    }
}

/// Polyline per series: pass 0 draws the segment from the previous item, pass 1 optional markers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineRenderer {
    pub width: f64,
    pub markers: bool,
    pub marker_radius: f64,
}

impl Default for LineRenderer {
    fn default() -> Self { Self { width: 1.5, markers: false, marker_radius: 2.5 } }
}

impl LineRenderer {
    pub fn with_markers(mut self, radius: f64) -> Self {
        self.markers = true;
        self.marker_radius = radius;
        self
    }
}

impl XYRenderer for LineRenderer {
    fn pass_count(&self) -> usize { if self.markers { 2 } else { 1 } }

    fn draw_item(&self, surface: &mut dyn Surface, ctx: &RenderContext<'_>, series: usize, item: usize, pass: usize) {
        let color = ctx.theme.series_color(series);
        match pass {
            0 if item > 0 => {
                // Gaps (non-finite values) break the line.
                if let (Some((x0, y0)), Some((x1, y1))) =
                    (ctx.item_position(series, item - 1), ctx.item_position(series, item))
                {
                    surface.draw_line(x0, y0, x1, y1, &Stroke::new(color, self.width));
                }
            }
            1 => {
                if let Some((px, py)) = ctx.item_position(series, item) {
                    surface.fill_circle(px, py, self.marker_radius, color);
                }
            }
            _ => {}
        }
    }
}
