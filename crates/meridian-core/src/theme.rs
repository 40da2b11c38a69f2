// File: crates/meridian-core/src/theme.rs
// Summary: Light/Dark color presets for plots, axes, series and the progress overlay.

use crate::types::Color;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub background: Color,
    pub plot_background: Color,
    pub grid: Color,
    pub axis_line: Color,
    pub axis_label: Color,
    pub tick_label: Color,
    /// Backdrop of the progressive-render percentage badge.
    pub overlay_fill: Color,
    pub overlay_text: Color,
    /// Series colors, cycled by series index.
    pub palette: [Color; 4],
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: Color::rgb(18, 18, 20),
            plot_background: Color::rgb(24, 24, 28),
            grid: Color::rgb(40, 40, 45),
            axis_line: Color::rgb(180, 180, 190),
            axis_label: Color::rgb(235, 235, 245),
            tick_label: Color::rgb(150, 150, 160),
            overlay_fill: Color::rgba(0, 0, 0, 160),
            overlay_text: Color::rgb(255, 230, 70),
            palette: [
                Color::rgb(64, 160, 255),
                Color::rgb(40, 200, 120),
                Color::rgb(220, 80, 80),
                Color::rgb(255, 190, 60),
            ],
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light",
            background: Color::rgb(250, 250, 252),
            plot_background: Color::rgb(255, 255, 255),
            grid: Color::rgb(230, 230, 235),
            axis_line: Color::rgb(60, 60, 70),
            axis_label: Color::rgb(20, 20, 30),
            tick_label: Color::rgb(100, 100, 110),
            overlay_fill: Color::rgba(255, 255, 255, 200),
            overlay_text: Color::rgb(30, 120, 240),
            palette: [
                Color::rgb(32, 120, 200),
                Color::rgb(20, 160, 90),
                Color::rgb(200, 60, 60),
                Color::rgb(210, 140, 20),
            ],
        }
    }

    pub fn high_contrast_dark() -> Self {
        Self {
            name: "high-contrast-dark",
            background: Color::rgb(0x00, 0x00, 0x00),
            plot_background: Color::rgb(0x00, 0x00, 0x00),
            grid: Color::rgb(0x22, 0x22, 0x22),
            axis_line: Color::rgb(0xff, 0xff, 0xff),
            axis_label: Color::rgb(0xff, 0xff, 0xff),
            tick_label: Color::rgb(0xcc, 0xcc, 0xcc),
            overlay_fill: Color::rgba(0x22, 0x22, 0x22, 220),
            overlay_text: Color::rgb(0xff, 0xff, 0x00),
            palette: [
                Color::rgb(0x00, 0xff, 0xff),
                Color::rgb(0x00, 0xff, 0x00),
                Color::rgb(0xff, 0x00, 0xff),
                Color::rgb(0xff, 0xff, 0x00),
            ],
        }
    }

    pub fn series_color(&self, series: usize) -> Color {
        self.palette[series % self.palette.len()]
    }
}

impl Default for Theme {
    fn default() -> Self { Self::light() }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::dark(), Theme::light(), Theme::high_contrast_dark()]
}

/// Find a theme by its `name`, falling back to light.
pub fn find(name: &str) -> Theme {
    for t in presets() { if t.name.eq_ignore_ascii_case(name) { return t; } }
    Theme::light()
}
