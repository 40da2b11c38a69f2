// File: crates/meridian-core/src/plot.rs
// Summary: XYPlot: axis layout, background/gridlines, progressive item drawing and PNG/SVG export.

use std::path::Path;

use anyhow::{Context, Result};

use crate::axis::{Axis, AxisStyle};
use crate::dataset::XYDataset;
use crate::error::{ChartError, ChartResult};
use crate::geometry::{Rect, RectangleEdge};
use crate::renderer::{RenderContext, XYRenderer};
use crate::scheduler::{DrawStatus, RenderScheduler, SchedulerConfig};
use crate::space::AxisSpace;
use crate::surface::{Layer, RasterSurface, Surface, SvgSurface};
use crate::task::{TaskHandle, TaskQueue};
use crate::theme::Theme;
use crate::ticks::TickMark;
use crate::types::{Insets, Stroke, HEIGHT, WIDTH};

pub struct RenderOptions {
    pub width: i32,
    pub height: i32,
    pub insets: Insets,
    /// Tick labels and axis titles. Applied to both axes on every draw.
    pub draw_labels: bool,
    pub draw_gridlines: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { width: WIDTH, height: HEIGHT, insets: Insets::default(), draw_labels: true, draw_gridlines: true }
    }
}

impl RenderOptions {
    /// Plot bounds: the surface minus the outer insets.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.insets.left,
            self.insets.top,
            (f64::from(self.width) - self.insets.hsum()).max(0.0),
            (f64::from(self.height) - self.insets.vsum()).max(0.0),
        )
    }
}

/// A dataset drawn by one renderer against an x and a y axis.
pub struct XYPlot {
    dataset: Box<dyn XYDataset>,
    renderer: Box<dyn XYRenderer>,
    pub x_axis: Axis,
    pub y_axis: Axis,
    x_edge: RectangleEdge,
    y_edge: RectangleEdge,
    theme: Theme,
    scheduler: RenderScheduler,
    data_area: Option<Rect>,
    /// Continuation of an invalidated cycle, cancelled on the next `draw`.
    orphaned_task: Option<TaskHandle>,
}

impl XYPlot {
    pub fn new(dataset: Box<dyn XYDataset>, renderer: Box<dyn XYRenderer>, x_axis: Axis, y_axis: Axis) -> Self {
        let mut plot = Self {
            dataset,
            renderer,
            x_axis,
            y_axis,
            x_edge: RectangleEdge::Bottom,
            y_edge: RectangleEdge::Left,
            theme: Theme::default(),
            scheduler: RenderScheduler::new(SchedulerConfig::default()),
            data_area: None,
            orphaned_task: None,
        };
        plot.apply_theme_styles();
        plot.dataset_changed();
        plot
    }

    /// Replace the theme; axis colors follow it.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self.apply_theme_styles();
        self
    }

    pub fn with_scheduler(mut self, scheduler: RenderScheduler) -> Self {
        self.scheduler = scheduler;
        self
    }

    /// Place the axes. The x axis must sit on top/bottom, the y axis on left/right.
    pub fn with_edges(mut self, x_edge: RectangleEdge, y_edge: RectangleEdge) -> ChartResult<Self> {
        if !x_edge.is_top_or_bottom() {
            return Err(ChartError::MisplacedAxis { axis: "x", edge: x_edge });
        }
        if !y_edge.is_left_or_right() {
            return Err(ChartError::MisplacedAxis { axis: "y", edge: y_edge });
        }
        self.x_edge = x_edge;
        self.y_edge = y_edge;
        Ok(self)
    }

    fn apply_theme_styles(&mut self) {
        let style = AxisStyle::from_theme(&self.theme);
        self.x_axis.style = style.clone();
        self.y_axis.style = style;
    }

    pub fn dataset(&self) -> &dyn XYDataset { self.dataset.as_ref() }
    pub fn theme(&self) -> &Theme { &self.theme }
    pub fn x_edge(&self) -> RectangleEdge { self.x_edge }
    pub fn y_edge(&self) -> RectangleEdge { self.y_edge }
    pub fn scheduler(&self) -> &RenderScheduler { &self.scheduler }
    /// Data rectangle of the last `draw`.
    pub fn data_area(&self) -> Option<Rect> { self.data_area }

    /// Swap in new data and re-range auto axes.
    pub fn set_dataset(&mut self, dataset: Box<dyn XYDataset>) {
        self.dataset = dataset;
        self.dataset_changed();
    }

    /// Re-read symbols and bounds after the dataset changed. A pending
    /// progressive draw is dropped; call `draw` again.
    pub fn dataset_changed(&mut self) {
        self.invalidate_draw();
        self.x_axis.configure_as_x_axis(self.dataset.as_ref());
        self.y_axis.configure_as_y_axis(self.dataset.as_ref());
    }

    fn invalidate_draw(&mut self) {
        if let Some(task) = self.scheduler.invalidate() {
            self.orphaned_task = Some(task);
        }
    }

    /// Zoom the x axis around `anchor`. A non-positive factor restores auto-range from the data.
    pub fn zoom_x(&mut self, factor: f64, anchor: f64) {
        self.invalidate_draw();
        self.x_axis.resize_range(factor, anchor);
        if self.x_axis.is_auto_range() {
            self.x_axis.configure_as_x_axis(self.dataset.as_ref());
        }
    }

    pub fn zoom_y(&mut self, factor: f64, anchor: f64) {
        self.invalidate_draw();
        self.y_axis.resize_range(factor, anchor);
        if self.y_axis.is_auto_range() {
            self.y_axis.configure_as_y_axis(self.dataset.as_ref());
        }
    }

    pub fn pan_x(&mut self, percent: f64) {
        self.invalidate_draw();
        self.x_axis.pan(percent);
    }

    pub fn pan_y(&mut self, percent: f64) {
        self.invalidate_draw();
        self.y_axis.pan(percent);
    }

    /// Turn auto-range back on for both axes and re-range from the data.
    pub fn restore_auto_range(&mut self) {
        self.x_axis.set_auto_range(true);
        self.y_axis.set_auto_range(true);
        self.dataset_changed();
    }

    /// Full draw request. Cancels any pending continuation, lays out and draws
    /// furniture, then hands the items to the scheduler.
    pub fn draw(&mut self, surface: &mut dyn Surface, queue: &mut dyn TaskQueue, opts: &RenderOptions) -> DrawStatus {
        if let Some(task) = self.orphaned_task.take() {
            queue.cancel(task);
        }
        self.scheduler.cancel(queue, surface);
        let data_area = self.draw_furniture(surface, opts);
        self.data_area = Some(data_area);
        let ctx = RenderContext {
            dataset: self.dataset.as_ref(),
            x_axis: &self.x_axis,
            y_axis: &self.y_axis,
            x_edge: self.x_edge,
            y_edge: self.y_edge,
            data_area,
            theme: &self.theme,
        };
        self.scheduler.begin(surface, queue, self.renderer.as_ref(), &ctx)
    }

    /// Continue a progressive draw when the host fires `handle`.
    pub fn resume(&mut self, handle: TaskHandle, surface: &mut dyn Surface, queue: &mut dyn TaskQueue) -> DrawStatus {
        if self.orphaned_task == Some(handle) {
            self.orphaned_task = None;
            return DrawStatus::Stale;
        }
        let Some(data_area) = self.data_area else {
            return DrawStatus::Stale;
        };
        let ctx = RenderContext {
            dataset: self.dataset.as_ref(),
            x_axis: &self.x_axis,
            y_axis: &self.y_axis,
            x_edge: self.x_edge,
            y_edge: self.y_edge,
            data_area,
            theme: &self.theme,
        };
        self.scheduler.resume(handle, surface, queue, self.renderer.as_ref(), &ctx)
    }

    /// Draw everything synchronously, leaving any progressive cycle untouched.
    pub fn draw_now(&mut self, surface: &mut dyn Surface, opts: &RenderOptions) -> Rect {
        let data_area = self.draw_furniture(surface, opts);
        let ctx = RenderContext {
            dataset: self.dataset.as_ref(),
            x_axis: &self.x_axis,
            y_axis: &self.y_axis,
            x_edge: self.x_edge,
            y_edge: self.y_edge,
            data_area,
            theme: &self.theme,
        };
        self.scheduler.draw_all(surface, self.renderer.as_ref(), &ctx);
        data_area
    }

    /// Reserve axis space and derive the data rectangle inside `bounds`.
    pub fn layout(&self, surface: &dyn Surface, bounds: Rect) -> Rect {
        let mut space = AxisSpace::new();
        let x_space = self.x_axis.reserve_space(surface, bounds, bounds, self.x_edge);
        space.extend(x_space, self.x_edge);
        let y_space = self.y_axis.reserve_space(surface, bounds, space.inner_rect(bounds), self.y_edge);
        space.extend(y_space, self.y_edge);
        space.inner_rect(bounds)
    }

    /// Background, axes and gridlines. Returns the data rectangle.
    fn draw_furniture(&mut self, surface: &mut dyn Surface, opts: &RenderOptions) -> Rect {
        for axis in [&mut self.x_axis, &mut self.y_axis] {
            axis.style.tick_labels_visible = opts.draw_labels;
            axis.style.label_visible = opts.draw_labels;
        }
        surface.clear_layer(Layer::Main);
        surface.select_layer(Layer::Main);
        surface.set_clip(None);

        let full = Rect::new(0.0, 0.0, f64::from(opts.width), f64::from(opts.height));
        surface.fill_rect(full, self.theme.background);
        let bounds = opts.bounds();
        let data_area = self.layout(surface, bounds);
        surface.fill_rect(data_area, self.theme.plot_background);

        let x_ticks = self.x_axis.draw(surface, bounds, data_area, 0.0, self.x_edge);
        let y_ticks = self.y_axis.draw(surface, bounds, data_area, 0.0, self.y_edge);
        if opts.draw_gridlines {
            self.draw_gridlines(surface, data_area, &x_ticks, &y_ticks);
        }
        data_area
    }

    fn draw_gridlines(&self, surface: &mut dyn Surface, area: Rect, x_ticks: &[TickMark], y_ticks: &[TickMark]) {
        let stroke = Stroke::new(self.theme.grid, 1.0);
        surface.set_clip(Some(area));
        for t in x_ticks {
            let x = self.x_axis.value_to_screen(t.value, area, self.x_edge);
            if x.is_finite() {
                surface.draw_line(x, area.y, x, area.bottom(), &stroke);
            }
        }
        for t in y_ticks {
            let y = self.y_axis.value_to_screen(t.value, area, self.y_edge);
            if y.is_finite() {
                surface.draw_line(area.x, y, area.right(), y, &stroke);
            }
        }
        surface.set_clip(None);
    }

    /// Render synchronously to PNG bytes using a CPU raster surface.
    pub fn render_to_png_bytes(&mut self, opts: &RenderOptions) -> Result<Vec<u8>> {
        let mut surface = RasterSurface::new(opts.width, opts.height, self.theme.background)?;
        self.draw_now(&mut surface, opts);
        Ok(surface.encode_png()?)
    }

    /// Render the plot to a PNG at `output_png_path`.
    pub fn render_to_png(&mut self, opts: &RenderOptions, output_png_path: impl AsRef<Path>) -> Result<()> {
        let path = output_png_path.as_ref();
        let mut surface = RasterSurface::new(opts.width, opts.height, self.theme.background)?;
        self.draw_now(&mut surface, opts);
        surface.save_png(path).with_context(|| format!("rendering {}", path.display()))
    }

    /// Render to unpremultiplied RGBA8: `(pixels, width, height, row_bytes)`.
    pub fn render_to_rgba8(&mut self, opts: &RenderOptions) -> Result<(Vec<u8>, i32, i32, usize)> {
        let mut surface = RasterSurface::new(opts.width, opts.height, self.theme.background)?;
        self.draw_now(&mut surface, opts);
        Ok(surface.to_rgba8()?)
    }

    pub fn render_to_svg_string(&mut self, opts: &RenderOptions) -> String {
        let mut surface = SvgSurface::new(f64::from(opts.width), f64::from(opts.height), self.theme.background);
        self.draw_now(&mut surface, opts);
        surface.to_svg_string()
    }

    pub fn render_to_svg(&mut self, opts: &RenderOptions, output_svg_path: impl AsRef<Path>) -> Result<()> {
        let mut surface = SvgSurface::new(f64::from(opts.width), f64::from(opts.height), self.theme.background);
        self.draw_now(&mut surface, opts);
        surface.save(output_svg_path)
    }
}
