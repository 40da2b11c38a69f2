// File: crates/meridian-core/src/surface/raster.rs
// Summary: Skia CPU raster surface with separate main/overlay layers, composited on PNG export.

use std::path::Path;

use anyhow::Context;
use skia_safe as skia;

use super::{Layer, PathData, PathSegment, Surface};
use crate::error::{ChartError, ChartResult};
use crate::geometry::{Rect, Size, TextAnchor};
use crate::text::TextShaper;
use crate::types::{Color, Font, Stroke};

pub struct RasterSurface {
    main: skia::Surface,
    overlay: skia::Surface,
    width: i32,
    height: i32,
    background: Color,
    layer: Layer,
    clip: Option<Rect>,
    shaper: TextShaper,
}

impl RasterSurface {
    /// Create a `width` x `height` surface; the main layer starts filled with `background`.
    pub fn new(width: i32, height: i32, background: Color) -> ChartResult<Self> {
        let mut main = skia::surfaces::raster_n32_premul((width, height))
            .ok_or(ChartError::Surface { width, height })?;
        let mut overlay = skia::surfaces::raster_n32_premul((width, height))
            .ok_or(ChartError::Surface { width, height })?;
        main.canvas().clear(sk_color(background));
        overlay.canvas().clear(skia::Color::TRANSPARENT);
        Ok(Self {
            main,
            overlay,
            width,
            height,
            background,
            layer: Layer::Main,
            clip: None,
            shaper: TextShaper::new(),
        })
    }

    pub fn width(&self) -> i32 { self.width }
    pub fn height(&self) -> i32 { self.height }

    /// Main layer with the overlay drawn on top, as a fresh surface.
    fn composite(&mut self) -> ChartResult<skia::Surface> {
        let mut composite = skia::surfaces::raster_n32_premul((self.width, self.height))
            .ok_or(ChartError::Surface { width: self.width, height: self.height })?;
        let main = self.main.image_snapshot();
        let overlay = self.overlay.image_snapshot();
        let canvas = composite.canvas();
        canvas.draw_image(&main, (0.0, 0.0), None);
        canvas.draw_image(&overlay, (0.0, 0.0), None);
        Ok(composite)
    }

    /// Composite overlay over main and encode as PNG.
    pub fn encode_png(&mut self) -> ChartResult<Vec<u8>> {
        let image = self.composite()?.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or(ChartError::Encode("png"))?;
        Ok(data.as_bytes().to_vec())
    }

    /// Composited pixels as unpremultiplied RGBA8: `(pixels, width, height, row_bytes)`.
    pub fn to_rgba8(&mut self) -> ChartResult<(Vec<u8>, i32, i32, usize)> {
        let mut composite = self.composite()?;
        let info = skia::ImageInfo::new(
            (self.width, self.height),
            skia::ColorType::RGBA8888,
            skia::AlphaType::Unpremul,
            None,
        );
        let row_bytes = self.width.max(0) as usize * 4;
        let mut pixels = vec![0u8; row_bytes * self.height.max(0) as usize];
        if !composite.read_pixels(&info, &mut pixels, row_bytes, (0, 0)) {
            return Err(ChartError::Encode("rgba8"));
        }
        Ok((pixels, self.width, self.height, row_bytes))
    }

    pub fn save_png(&mut self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        let bytes = self.encode_png()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    /// Run `f` on the selected layer's canvas with the current clip applied.
    fn with_canvas(&mut self, f: impl FnOnce(&skia::Canvas, &TextShaper)) {
        let clip = self.clip;
        let canvas = match self.layer {
            Layer::Main => self.main.canvas(),
            Layer::Overlay => self.overlay.canvas(),
        };
        canvas.save();
        if let Some(c) = clip {
            canvas.clip_rect(sk_rect(c), skia::ClipOp::Intersect, true);
        }
        f(canvas, &self.shaper);
        canvas.restore();
    }
}

fn sk_color(c: Color) -> skia::Color {
    skia::Color::from_argb(c.a, c.r, c.g, c.b)
}

fn sk_rect(r: Rect) -> skia::Rect {
    skia::Rect::from_xywh(r.x as f32, r.y as f32, r.width as f32, r.height as f32)
}

fn stroke_paint(stroke: &Stroke) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(stroke.width as f32);
    paint.set_color(sk_color(stroke.color));
    paint
}

fn fill_paint(color: Color) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Fill);
    paint.set_color(sk_color(color));
    paint
}

fn sk_path(path: &PathData) -> skia::Path {
    let mut p = skia::Path::new();
    for seg in path.segments() {
        match *seg {
            PathSegment::MoveTo(x, y) => {
                p.move_to((x as f32, y as f32));
            }
            PathSegment::LineTo(x, y) => {
                p.line_to((x as f32, y as f32));
            }
            PathSegment::Close => {
                p.close();
            }
        }
    }
    p
}

impl Surface for RasterSurface {
    fn select_layer(&mut self, layer: Layer) { self.layer = layer; }
    fn layer(&self) -> Layer { self.layer }

    fn clear_layer(&mut self, layer: Layer) {
        match layer {
            Layer::Main => {
                let bg = sk_color(self.background);
                self.main.canvas().clear(bg);
            }
            Layer::Overlay => {
                self.overlay.canvas().clear(skia::Color::TRANSPARENT);
            }
        }
    }

    fn set_clip(&mut self, clip: Option<Rect>) { self.clip = clip; }

    fn draw_line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, stroke: &Stroke) {
        let paint = stroke_paint(stroke);
        self.with_canvas(|c, _| {
            c.draw_line((x0 as f32, y0 as f32), (x1 as f32, y1 as f32), &paint);
        });
    }

    fn draw_rect(&mut self, rect: Rect, stroke: &Stroke) {
        let paint = stroke_paint(stroke);
        self.with_canvas(|c, _| {
            c.draw_rect(sk_rect(rect), &paint);
        });
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let paint = fill_paint(color);
        self.with_canvas(|c, _| {
            c.draw_rect(sk_rect(rect), &paint);
        });
    }

    fn draw_circle(&mut self, cx: f64, cy: f64, radius: f64, stroke: &Stroke) {
        let paint = stroke_paint(stroke);
        self.with_canvas(|c, _| {
            c.draw_circle((cx as f32, cy as f32), radius as f32, &paint);
        });
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Color) {
        let paint = fill_paint(color);
        self.with_canvas(|c, _| {
            c.draw_circle((cx as f32, cy as f32), radius as f32, &paint);
        });
    }

    fn draw_path(&mut self, path: &PathData, stroke: &Stroke) {
        let paint = stroke_paint(stroke);
        let p = sk_path(path);
        self.with_canvas(|c, _| {
            c.draw_path(&p, &paint);
        });
    }

    fn fill_path(&mut self, path: &PathData, color: Color) {
        let paint = fill_paint(color);
        let p = sk_path(path);
        self.with_canvas(|c, _| {
            c.draw_path(&p, &paint);
        });
    }

    fn draw_text(
        &mut self,
        text: &str,
        x: f64,
        y: f64,
        font: &Font,
        color: Color,
        anchor: TextAnchor,
        rotation: f64,
    ) {
        if text.is_empty() {
            return;
        }
        self.with_canvas(|c, shaper| {
            let mut paragraph = shaper.layout(text, font, color);
            let size = Size::new(f64::from(paragraph.longest_line()), f64::from(paragraph.height()));
            let (dx, dy) = anchor.offset(size);
            c.save();
            c.translate((x as f32, y as f32));
            if rotation != 0.0 {
                c.rotate(rotation as f32, None);
            }
            paragraph.paint(c, (dx as f32, dy as f32));
            c.restore();
        });
    }

    fn measure_text(&self, text: &str, font: &Font) -> Size {
        self.shaper.measure(text, font)
    }
}
