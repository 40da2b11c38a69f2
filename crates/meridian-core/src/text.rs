// File: crates/meridian-core/src/text.rs
// Summary: Text shaper for the raster surface using Skia textlayout with sensible family fallbacks.

use skia_safe as skia;
use skia::textlayout::{FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextStyle};

use crate::geometry::Size;
use crate::types::{Color, Font};

const MONO_FAMILIES: [&str; 5] = ["Roboto Mono", "Consolas", "Menlo", "DejaVu Sans Mono", "monospace"];
const SANS_FAMILIES: [&str; 6] = ["Segoe UI", "Arial", "Helvetica", "Roboto", "DejaVu Sans", "sans-serif"];

pub struct TextShaper {
    fonts: FontCollection,
}

impl TextShaper {
    pub fn new() -> Self {
        let mut fc = FontCollection::new();
        // Use system manager fallback
        fc.set_default_font_manager(skia::FontMgr::default(), None);
        Self { fonts: fc }
    }

    fn make_style(font: &Font, color: Color) -> TextStyle {
        let mut ts = TextStyle::new();
        ts.set_font_size(font.size.max(1.0) as f32);
        ts.set_color(skia::Color::from_argb(color.a, color.r, color.g, color.b));
        let mut families: Vec<&str> = Vec::with_capacity(8);
        if font.mono_numeric {
            // Tabular digits keep stacked tick labels aligned
            families.extend(MONO_FAMILIES);
        } else {
            families.push(font.family.as_str());
            families.extend(SANS_FAMILIES);
        }
        ts.set_font_families(&families);
        ts
    }

    pub fn layout(&self, text: &str, font: &Font, color: Color) -> Paragraph {
        let mut pstyle = ParagraphStyle::new();
        pstyle.set_text_align(skia::textlayout::TextAlign::Left);
        let mut builder = ParagraphBuilder::new(&pstyle, &self.fonts);
        let style = Self::make_style(font, color);
        builder.push_style(&style);
        builder.add_text(text);
        let mut paragraph = builder.build();
        paragraph.layout(10_000.0);
        paragraph
    }

    /// Width of the longest line and total paragraph height.
    pub fn measure(&self, text: &str, font: &Font) -> Size {
        if text.is_empty() {
            return Size::default();
        }
        let p = self.layout(text, font, Color::TRANSPARENT);
        Size::new(f64::from(p.longest_line()), f64::from(p.height()))
    }
}

impl Default for TextShaper {
    fn default() -> Self { Self::new() }
}
