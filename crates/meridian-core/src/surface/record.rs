// File: crates/meridian-core/src/surface/record.rs
// Summary: Headless surface that records draw commands per layer; deterministic text metrics.

use super::{Layer, PathData, Surface};
use crate::geometry::{Rect, Size, TextAnchor};
use crate::types::{Color, Font, Stroke};

/// How a [`RecordingSurface`] answers text measurement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TextMetrics {
    /// Every non-empty string measures exactly this size.
    Fixed(Size),
    /// `advance` em per character, one `line_height` em tall.
    PerChar { advance: f64, line_height: f64 },
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self::PerChar { advance: 0.6, line_height: 1.0 }
    }
}

/// A recorded drawing command.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Clip(Option<Rect>),
    Line { x0: f64, y0: f64, x1: f64, y1: f64, stroke: Stroke },
    Rect { rect: Rect, stroke: Stroke },
    FillRect { rect: Rect, color: Color },
    Circle { cx: f64, cy: f64, radius: f64, stroke: Stroke },
    FillCircle { cx: f64, cy: f64, radius: f64, color: Color },
    Path { path: PathData, stroke: Stroke },
    FillPath { path: PathData, color: Color },
    Text { text: String, x: f64, y: f64, anchor: TextAnchor, rotation: f64, color: Color },
}

/// Surface that keeps every command in memory, tagged with its layer.
///
/// Used by tests and benchmarks, and handy for inspecting what a plot draws.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    ops: Vec<(Layer, DrawOp)>,
    layer: Layer,
    metrics: TextMetrics,
}

impl RecordingSurface {
    pub fn new() -> Self { Self::default() }

    pub fn with_metrics(mut self, metrics: TextMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Every non-empty string measures `width` x `height`.
    pub fn with_fixed_text_size(self, width: f64, height: f64) -> Self {
        self.with_metrics(TextMetrics::Fixed(Size::new(width, height)))
    }

    pub fn ops(&self) -> &[(Layer, DrawOp)] { &self.ops }

    pub fn ops_on(&self, layer: Layer) -> impl Iterator<Item = &DrawOp> + '_ {
        self.ops.iter().filter(move |(l, _)| *l == layer).map(|(_, op)| op)
    }

    /// Text drawn on `layer`, in drawing order.
    pub fn texts_on(&self, layer: Layer) -> Vec<&str> {
        self.ops_on(layer)
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) { self.ops.clear(); }

    fn push(&mut self, op: DrawOp) { self.ops.push((self.layer, op)); }
}

impl Surface for RecordingSurface {
    fn select_layer(&mut self, layer: Layer) { self.layer = layer; }
    fn layer(&self) -> Layer { self.layer }
    fn clear_layer(&mut self, layer: Layer) { self.ops.retain(|(l, _)| *l != layer); }
    fn set_clip(&mut self, clip: Option<Rect>) { self.push(DrawOp::Clip(clip)); }

    fn draw_line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, stroke: &Stroke) {
        self.push(DrawOp::Line { x0, y0, x1, y1, stroke: *stroke });
    }
    fn draw_rect(&mut self, rect: Rect, stroke: &Stroke) {
        self.push(DrawOp::Rect { rect, stroke: *stroke });
    }
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.push(DrawOp::FillRect { rect, color });
    }
    fn draw_circle(&mut self, cx: f64, cy: f64, radius: f64, stroke: &Stroke) {
        self.push(DrawOp::Circle { cx, cy, radius, stroke: *stroke });
    }
    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Color) {
        self.push(DrawOp::FillCircle { cx, cy, radius, color });
    }
    fn draw_path(&mut self, path: &PathData, stroke: &Stroke) {
        self.push(DrawOp::Path { path: path.clone(), stroke: *stroke });
    }
    fn fill_path(&mut self, path: &PathData, color: Color) {
        self.push(DrawOp::FillPath { path: path.clone(), color });
    }

    fn draw_text(
        &mut self,
        text: &str,
        x: f64,
        y: f64,
        _font: &Font,
        color: Color,
        anchor: TextAnchor,
        rotation: f64,
    ) {
        self.push(DrawOp::Text { text: text.to_string(), x, y, anchor, rotation, color });
    }

    fn measure_text(&self, text: &str, font: &Font) -> Size {
        if text.is_empty() {
            return Size::default();
        }
        match self.metrics {
            TextMetrics::Fixed(size) => size,
            TextMetrics::PerChar { advance, line_height } => Size::new(
                advance * font.size * text.chars().count() as f64,
                line_height * font.size,
            ),
        }
    }
}
