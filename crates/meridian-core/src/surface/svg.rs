// File: crates/meridian-core/src/surface/svg.rs
// Summary: SVG document surface; main and overlay layers map to top-level groups.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::Context;

use super::{Layer, PathData, PathSegment, Surface};
use crate::geometry::{Rect, Size, TextAnchor};
use crate::types::{Color, Font, Stroke};

/// Average glyph advance in em used for measuring text (no font access here).
const GLYPH_ADVANCE_EM: f64 = 0.6;

pub struct SvgSurface {
    width: f64,
    height: f64,
    background: Color,
    main: String,
    overlay: String,
    clip_defs: Vec<Rect>,
    clip: Option<usize>,
    layer: Layer,
}

impl SvgSurface {
    pub fn new(width: f64, height: f64, background: Color) -> Self {
        Self {
            width,
            height,
            background,
            main: String::new(),
            overlay: String::new(),
            clip_defs: Vec::new(),
            clip: None,
            layer: Layer::Main,
        }
    }

    pub fn width(&self) -> f64 { self.width }
    pub fn height(&self) -> f64 { self.height }

    pub fn to_svg_string(&self) -> String {
        let mut out = String::new();
        out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" "#);
        let _ = write!(
            out,
            r#"width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = fmt_num(self.width),
            h = fmt_num(self.height)
        );
        out.push('\n');
        if !self.clip_defs.is_empty() {
            out.push_str("<defs>\n");
            for (i, r) in self.clip_defs.iter().enumerate() {
                let _ = writeln!(
                    out,
                    r#"<clipPath id="clip{i}"><rect x="{}" y="{}" width="{}" height="{}"/></clipPath>"#,
                    fmt_num(r.x),
                    fmt_num(r.y),
                    fmt_num(r.width),
                    fmt_num(r.height)
                );
            }
            out.push_str("</defs>\n");
        }
        let _ = write!(
            out,
            r#"<rect x="0" y="0" width="{}" height="{}""#,
            fmt_num(self.width),
            fmt_num(self.height)
        );
        write_paint_attr(&mut out, "fill", self.background);
        out.push_str("/>\n");
        for (layer, body) in [(Layer::Main, &self.main), (Layer::Overlay, &self.overlay)] {
            let _ = writeln!(out, r#"<g id="{}">"#, layer.id());
            out.push_str(body);
            out.push_str("</g>\n");
        }
        out.push_str("</svg>\n");
        out
    }

    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_svg_string())
            .with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    fn body(&mut self) -> &mut String {
        match self.layer {
            Layer::Main => &mut self.main,
            Layer::Overlay => &mut self.overlay,
        }
    }

    /// Append one element; `attrs` already carries its paint attributes.
    fn element(&mut self, tag: &str, attrs: &str) {
        let clip = self.clip;
        let out = self.body();
        let _ = write!(out, "<{tag} {attrs}");
        if let Some(id) = clip {
            let _ = write!(out, r#" clip-path="url(#clip{id})""#);
        }
        out.push_str("/>\n");
    }
}

fn fmt_num(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{v:.2}")
    }
}

fn write_paint_attr(out: &mut String, name: &str, color: Color) {
    if color.a == 0 {
        let _ = write!(out, r#" {name}="none""#);
        return;
    }
    let _ = write!(out, r#" {name}="{}""#, color.to_hex());
    if color.a < 255 {
        let _ = write!(out, r#" {name}-opacity="{:.3}""#, color.opacity());
    }
}

fn stroke_attrs(stroke: &Stroke) -> String {
    let mut s = String::from(r#"fill="none""#);
    write_paint_attr(&mut s, "stroke", stroke.color);
    let _ = write!(s, r#" stroke-width="{}""#, fmt_num(stroke.width));
    s
}

fn fill_attrs(color: Color) -> String {
    let mut s = String::new();
    write_paint_attr(&mut s, "fill", color);
    s.trim_start().to_string()
}

fn path_d(path: &PathData) -> String {
    let mut d = String::new();
    for seg in path.segments() {
        match *seg {
            PathSegment::MoveTo(x, y) => {
                let _ = write!(d, "M{} {} ", fmt_num(x), fmt_num(y));
            }
            PathSegment::LineTo(x, y) => {
                let _ = write!(d, "L{} {} ", fmt_num(x), fmt_num(y));
            }
            PathSegment::Close => d.push_str("Z "),
        }
    }
    d.trim_end().to_string()
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

impl Surface for SvgSurface {
    fn select_layer(&mut self, layer: Layer) { self.layer = layer; }
    fn layer(&self) -> Layer { self.layer }

    fn clear_layer(&mut self, layer: Layer) {
        match layer {
            Layer::Main => self.main.clear(),
            Layer::Overlay => self.overlay.clear(),
        }
    }

    fn set_clip(&mut self, clip: Option<Rect>) {
        self.clip = clip.map(|r| {
            match self.clip_defs.iter().position(|c| *c == r) {
                Some(i) => i,
                None => {
                    self.clip_defs.push(r);
                    self.clip_defs.len() - 1
                }
            }
        });
    }

    fn draw_line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, stroke: &Stroke) {
        let attrs = format!(
            r#"x1="{}" y1="{}" x2="{}" y2="{}" {}"#,
            fmt_num(x0),
            fmt_num(y0),
            fmt_num(x1),
            fmt_num(y1),
            stroke_attrs(stroke)
        );
        self.element("line", &attrs);
    }

    fn draw_rect(&mut self, rect: Rect, stroke: &Stroke) {
        let attrs = format!(
            r#"x="{}" y="{}" width="{}" height="{}" {}"#,
            fmt_num(rect.x),
            fmt_num(rect.y),
            fmt_num(rect.width),
            fmt_num(rect.height),
            stroke_attrs(stroke)
        );
        self.element("rect", &attrs);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let attrs = format!(
            r#"x="{}" y="{}" width="{}" height="{}" {}"#,
            fmt_num(rect.x),
            fmt_num(rect.y),
            fmt_num(rect.width),
            fmt_num(rect.height),
            fill_attrs(color)
        );
        self.element("rect", &attrs);
    }

    fn draw_circle(&mut self, cx: f64, cy: f64, radius: f64, stroke: &Stroke) {
        let attrs = format!(
            r#"cx="{}" cy="{}" r="{}" {}"#,
            fmt_num(cx),
            fmt_num(cy),
            fmt_num(radius),
            stroke_attrs(stroke)
        );
        self.element("circle", &attrs);
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Color) {
        let attrs = format!(
            r#"cx="{}" cy="{}" r="{}" {}"#,
            fmt_num(cx),
            fmt_num(cy),
            fmt_num(radius),
            fill_attrs(color)
        );
        self.element("circle", &attrs);
    }

    fn draw_path(&mut self, path: &PathData, stroke: &Stroke) {
        if path.is_empty() {
            return;
        }
        let attrs = format!(r#"d="{}" {}"#, path_d(path), stroke_attrs(stroke));
        self.element("path", &attrs);
    }

    fn fill_path(&mut self, path: &PathData, color: Color) {
        if path.is_empty() {
            return;
        }
        let attrs = format!(r#"d="{}" {}"#, path_d(path), fill_attrs(color));
        self.element("path", &attrs);
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
        use TextAnchor::*;
        let text_anchor = match anchor {
            TopLeft | CenterLeft | BottomLeft => "start",
            TopCenter | Center | BottomCenter => "middle",
            TopRight | CenterRight | BottomRight => "end",
        };
        let baseline = match anchor {
            TopLeft | TopCenter | TopRight => "hanging",
            CenterLeft | Center | CenterRight => "middle",
            BottomLeft | BottomCenter | BottomRight => "text-after-edge",
        };
        let clip = self.clip;
        let out = self.body();
        let _ = write!(
            out,
            r#"<text x="{}" y="{}" font-family="{}" font-size="{}" text-anchor="{text_anchor}" dominant-baseline="{baseline}""#,
            fmt_num(x),
            fmt_num(y),
            escape_xml(&font.family),
            fmt_num(font.size)
        );
        if rotation != 0.0 {
            let _ = write!(
                out,
                r#" transform="rotate({} {} {})""#,
                fmt_num(rotation),
                fmt_num(x),
                fmt_num(y)
            );
        }
        write_paint_attr(out, "fill", color);
        if let Some(id) = clip {
            let _ = write!(out, r#" clip-path="url(#clip{id})""#);
        }
        out.push('>');
        out.push_str(&escape_xml(text));
        out.push_str("</text>\n");
    }

    fn measure_text(&self, text: &str, font: &Font) -> Size {
        if text.is_empty() {
            return Size::default();
        }
        Size::new(GLYPH_ADVANCE_EM * font.size * text.chars().count() as f64, font.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_in_text() {
        assert_eq!(escape_xml("a<b & \"c\""), "a&lt;b &amp; &quot;c&quot;");
    }

    #[test]
    fn integral_numbers_print_without_decimals() {
        assert_eq!(fmt_num(12.0), "12");
        assert_eq!(fmt_num(1.5), "1.50");
    }
}
