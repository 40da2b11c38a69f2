// File: crates/meridian-core/src/axis.rs
// Summary: Axis model (linear, log, symbol): bounds, auto-range, transforms, tick search, drawing, zoom/pan, listeners.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::dataset::{XYDataset, X_SYMBOLS, Y_SYMBOLS};
use crate::error::{ChartError, ChartResult};
use crate::geometry::{Rect, RectangleEdge, Size, TextAnchor};
use crate::range::ValueRange;
use crate::surface::Surface;
use crate::theme::Theme;
use crate::ticks::{Symbol, TickFormat, TickMark, TickSelector, DEFAULT_MAX_POWER};
use crate::types::{Color, Font, Stroke};

/// Values at or below this are clamped before taking a logarithm.
pub const DEFAULT_LOG_FLOOR: f64 = 1e-10;
/// Most step intervals an axis length may span before ticks fall back to the endpoints.
pub const MAX_TICKS: usize = 10_000;

/// Which transform and tick strategy an axis uses.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AxisKind {
    Linear,
    /// Transforms pass through `log(v) / log(base)`; values `<= floor` are clamped to `floor`.
    Log { base: f64, floor: f64 },
    /// Linear bookkeeping, labels come from the symbol table only.
    Symbol,
}

impl AxisKind {
    pub fn log10() -> Self { Self::Log { base: 10.0, floor: DEFAULT_LOG_FLOOR } }

    pub fn is_log(self) -> bool { matches!(self, Self::Log { .. }) }

    /// Data value to axis space (identity except for log axes).
    pub fn to_axis(self, value: f64) -> f64 {
        match self {
            Self::Log { base, floor } => value.max(floor).ln() / base.ln(),
            _ => value,
        }
    }

    /// Axis-space value back to data space.
    pub fn from_axis(self, value: f64) -> f64 {
        match self {
            Self::Log { base, .. } => base.powf(value),
            _ => value,
        }
    }

    fn floor(self) -> Option<f64> {
        match self {
            Self::Log { floor, .. } => Some(floor),
            _ => None,
        }
    }
}

/// Formatter for tick labels.
#[derive(Clone, Default)]
pub enum AxisFormatter {
    /// Precision follows the selected tick size.
    #[default]
    Default,
    Custom(Arc<dyn Fn(f64) -> String + Send + Sync>),
}

impl fmt::Debug for AxisFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => write!(f, "AxisFormatter::Default"),
            Self::Custom(_) => write!(f, "AxisFormatter::Custom(..)"),
        }
    }
}

/// Snapshot passed to listeners after the bounds or the auto-range flag change.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisChange {
    pub lower: f64,
    pub upper: f64,
    pub auto_range: bool,
}

/// Token returned by [`Axis::add_listener`]; pass it to [`Axis::remove_listener`] to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&AxisChange)>;

/// State shared by every axis kind.
/// Contract: `lower < upper`, both finite; for log axes `lower >= floor`.
pub struct AxisState {
    lower: f64,
    upper: f64,
    auto_range: bool,
    auto_range_includes_zero: bool,
    lower_margin: f64,
    upper_margin: f64,
    default_range_length: f64,
    max_tick_power: i32,
    symbols: Vec<Symbol>,
    formatter: AxisFormatter,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
}

impl AxisState {
    fn new(lower: f64, upper: f64) -> Self {
        Self {
            lower,
            upper,
            auto_range: true,
            auto_range_includes_zero: false,
            lower_margin: 0.05,
            upper_margin: 0.05,
            default_range_length: 1.0,
            max_tick_power: DEFAULT_MAX_POWER,
            symbols: Vec::new(),
            formatter: AxisFormatter::Default,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }
}

impl fmt::Debug for AxisState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AxisState")
            .field("lower", &self.lower)
            .field("upper", &self.upper)
            .field("auto_range", &self.auto_range)
            .field("auto_range_includes_zero", &self.auto_range_includes_zero)
            .field("lower_margin", &self.lower_margin)
            .field("upper_margin", &self.upper_margin)
            .field("symbols", &self.symbols.len())
            .field("formatter", &self.formatter)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Visual configuration for an axis.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisStyle {
    pub line: Stroke,
    pub tick_stroke: Stroke,
    pub tick_label_font: Font,
    pub tick_label_color: Color,
    pub label_font: Font,
    pub label_color: Color,
    /// Outward length of tick marks in pixels.
    pub tick_mark_length: f64,
    /// Gap between tick mark end and tick label.
    pub tick_label_offset: f64,
    /// Gap between tick labels and the axis label.
    pub label_offset: f64,
    /// Labels need `size * spacing_factor` pixels each.
    pub spacing_factor: f64,
    pub tick_labels_visible: bool,
    pub label_visible: bool,
}

impl Default for AxisStyle {
    fn default() -> Self {
        Self {
            line: Stroke::new(Color::rgb(90, 90, 90), 1.0),
            tick_stroke: Stroke::new(Color::rgb(90, 90, 90), 1.0),
            tick_label_font: Font::numeric(11.0),
            tick_label_color: Color::rgb(60, 60, 60),
            label_font: Font::default(),
            label_color: Color::rgb(30, 30, 30),
            tick_mark_length: 4.0,
            tick_label_offset: 3.0,
            label_offset: 4.0,
            spacing_factor: 1.4,
            tick_labels_visible: true,
            label_visible: true,
        }
    }
}

impl AxisStyle {
    pub fn from_theme(theme: &Theme) -> Self {
        Self {
            line: Stroke::new(theme.axis_line, 1.0),
            tick_stroke: Stroke::new(theme.axis_line, 1.0),
            tick_label_color: theme.tick_label,
            label_color: theme.axis_label,
            ..Self::default()
        }
    }
}

/// One plot axis: shared [`AxisState`] plus the [`AxisKind`] strategy.
#[derive(Debug)]
pub struct Axis {
    kind: AxisKind,
    state: AxisState,
    pub label: String,
    pub style: AxisStyle,
}

impl Axis {
    pub fn new(kind: AxisKind, label: impl Into<String>) -> Self {
        let (lower, upper) = match kind {
            AxisKind::Log { .. } => (1.0, kind.from_axis(1.0)),
            _ => (0.0, 1.0),
        };
        Self { kind, state: AxisState::new(lower, upper), label: label.into(), style: AxisStyle::default() }
    }

    pub fn linear(label: impl Into<String>) -> Self { Self::new(AxisKind::Linear, label) }
    pub fn log10(label: impl Into<String>) -> Self { Self::new(AxisKind::log10(), label) }

    /// Log axis with an arbitrary base (> 1).
    pub fn log(label: impl Into<String>, base: f64) -> ChartResult<Self> {
        if !(base.is_finite() && base > 1.0) {
            return Err(ChartError::InvalidLogBase(base));
        }
        Ok(Self::new(AxisKind::Log { base, floor: DEFAULT_LOG_FLOOR }, label))
    }

    pub fn symbol(label: impl Into<String>, symbols: Vec<Symbol>) -> Self {
        let mut axis = Self::new(AxisKind::Symbol, label);
        axis.set_symbols(symbols);
        axis
    }

    pub fn kind(&self) -> AxisKind { self.kind }
    pub fn lower_bound(&self) -> f64 { self.state.lower }
    pub fn upper_bound(&self) -> f64 { self.state.upper }
    pub fn is_auto_range(&self) -> bool { self.state.auto_range }
    pub fn auto_range_includes_zero(&self) -> bool { self.state.auto_range_includes_zero }
    pub fn lower_margin(&self) -> f64 { self.state.lower_margin }
    pub fn upper_margin(&self) -> f64 { self.state.upper_margin }
    pub fn default_range_length(&self) -> f64 { self.state.default_range_length }
    pub fn symbols(&self) -> &[Symbol] { &self.state.symbols }
    pub fn listener_count(&self) -> usize { self.state.listeners.len() }

    /// Current bounds in data space.
    pub fn range(&self) -> ValueRange { ValueRange::from_ordered(self.state.lower, self.state.upper) }

    /// Current bounds in axis space (log-transformed for log axes).
    pub fn axis_range(&self) -> ValueRange {
        ValueRange::from_ordered(self.kind.to_axis(self.state.lower), self.kind.to_axis(self.state.upper))
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_style(mut self, style: AxisStyle) -> Self {
        self.style = style;
        self
    }

    /// Fix the bounds explicitly; clears auto-range.
    ///
    /// Log axes clamp `lower` up to the floor and require `upper` above it.
    pub fn set_bounds(&mut self, lower: f64, upper: f64) -> ChartResult<()> {
        let mut lower = lower;
        if let Some(floor) = self.kind.floor() {
            if upper.is_nan() || upper <= floor {
                return Err(ChartError::InvalidBounds { lower, upper, reason: "upper bound must exceed the log floor" });
            }
            lower = lower.max(floor);
        }
        let range = ValueRange::new(lower, upper)?;
        self.state.lower = range.lower();
        self.state.upper = range.upper();
        self.state.auto_range = false;
        self.notify();
        Ok(())
    }

    /// Turn auto-range on or off. Bounds are recomputed on the next configure pass.
    pub fn set_auto_range(&mut self, auto: bool) {
        if self.state.auto_range != auto {
            self.state.auto_range = auto;
            self.notify();
        }
    }

    pub fn set_auto_range_includes_zero(&mut self, include: bool) { self.state.auto_range_includes_zero = include; }

    /// Margins are fractions of the data extent; negative values are clamped to zero.
    pub fn set_margins(&mut self, lower: f64, upper: f64) {
        self.state.lower_margin = if lower.is_finite() { lower.max(0.0) } else { 0.0 };
        self.state.upper_margin = if upper.is_finite() { upper.max(0.0) } else { 0.0 };
    }

    /// Axis length used when the data has no extent. Ignored unless finite and positive.
    pub fn set_default_range_length(&mut self, length: f64) {
        if length.is_finite() && length > 0.0 {
            self.state.default_range_length = length;
        }
    }

    /// Power ceiling handed to the tick selector.
    pub fn set_max_tick_power(&mut self, max_power: i32) { self.state.max_tick_power = max_power.saturating_abs().max(1); }

    /// Replace the symbol table; entries are sorted and non-finite values dropped.
    pub fn set_symbols(&mut self, mut symbols: Vec<Symbol>) {
        symbols.retain(|s| s.value.is_finite());
        symbols.sort_by(|a, b| a.value.total_cmp(&b.value));
        symbols.dedup_by(|a, b| a.value == b.value);
        self.state.symbols = symbols;
    }

    pub fn set_formatter(&mut self, formatter: AxisFormatter) { self.state.formatter = formatter; }

    /// Recompute bounds from a data extent.
    ///
    /// Skipped when either end is non-finite or `min > max` (the `(+inf, -inf)`
    /// empty-dataset convention); the previous bounds are kept.
    pub fn apply_auto_range(&mut self, min: f64, max: f64) {
        if !min.is_finite() || !max.is_finite() || min > max {
            debug!(min, max, "auto-range skipped: no usable data extent");
            return;
        }
        let mut lo = self.kind.to_axis(min);
        let mut hi = self.kind.to_axis(max);
        if self.state.auto_range_includes_zero && !self.kind.is_log() {
            lo = lo.min(0.0);
            hi = hi.max(0.0);
        }
        let len = hi - lo;
        let (lo, hi) = if len > 0.0 {
            (lo - self.state.lower_margin * len, hi + self.state.upper_margin * len)
        } else {
            let half = self.state.default_range_length * 0.5;
            (lo - half, hi + half)
        };
        if let Some((lower, upper)) = self.checked_bounds(lo, hi) {
            self.state.lower = lower;
            self.state.upper = upper;
            self.notify();
        } else {
            debug!(min, max, "auto-range skipped: result not representable");
        }
    }

    /// Axis-space candidate bounds to data space, or `None` if they would break the contract.
    fn checked_bounds(&self, lo: f64, hi: f64) -> Option<(f64, f64)> {
        if !(lo.is_finite() && hi.is_finite() && hi > lo) {
            return None;
        }
        let mut lower = self.kind.from_axis(lo);
        let upper = self.kind.from_axis(hi);
        if let Some(floor) = self.kind.floor() {
            lower = lower.max(floor);
        }
        (lower.is_finite() && upper.is_finite() && upper > lower).then_some((lower, upper))
    }

    /// Pull symbols and (if auto-ranging) bounds from the dataset's x dimension.
    pub fn configure_as_x_axis(&mut self, dataset: &dyn XYDataset) {
        self.configure(dataset.symbols(X_SYMBOLS), dataset.x_bounds());
    }

    /// Pull symbols and (if auto-ranging) bounds from the dataset's y dimension.
    pub fn configure_as_y_axis(&mut self, dataset: &dyn XYDataset) {
        self.configure(dataset.symbols(Y_SYMBOLS), dataset.y_bounds());
    }

    fn configure(&mut self, symbols: Option<&[Symbol]>, (min, max): (f64, f64)) {
        if let Some(symbols) = symbols {
            self.set_symbols(symbols.to_vec());
        }
        if self.state.auto_range {
            self.apply_auto_range(min, max);
        }
    }

    /// Map `value` onto the coordinate span `r0..r1`.
    pub fn value_to_coordinate(&self, value: f64, r0: f64, r1: f64) -> f64 {
        let range = self.axis_range();
        r0 + range.percent(self.kind.to_axis(value)) * (r1 - r0)
    }

    /// Inverse of [`Axis::value_to_coordinate`]. A zero-length span maps to the lower bound.
    pub fn coordinate_to_value(&self, coordinate: f64, r0: f64, r1: f64) -> f64 {
        if r1 == r0 {
            return self.state.lower;
        }
        let range = self.axis_range();
        self.kind.from_axis(range.value((coordinate - r0) / (r1 - r0)))
    }

    /// Pixel position of `value` inside `area` for an axis on `edge` (vertical axes grow upward).
    pub fn value_to_screen(&self, value: f64, area: Rect, edge: RectangleEdge) -> f64 {
        if edge.is_top_or_bottom() {
            self.value_to_coordinate(value, area.x, area.right())
        } else {
            self.value_to_coordinate(value, area.bottom(), area.y)
        }
    }

    pub fn screen_to_value(&self, pixel: f64, area: Rect, edge: RectangleEdge) -> f64 {
        if edge.is_top_or_bottom() {
            self.coordinate_to_value(pixel, area.x, area.right())
        } else {
            self.coordinate_to_value(pixel, area.bottom(), area.y)
        }
    }

    fn format_value(&self, value: f64, format: TickFormat) -> String {
        match &self.state.formatter {
            AxisFormatter::Custom(f) => f(value),
            AxisFormatter::Default if self.kind.is_log() => TickFormat::General.format(value),
            AxisFormatter::Default => format.format(value),
        }
    }

    fn endpoint_ticks(&self) -> Vec<TickMark> {
        let (lower, upper) = (self.state.lower, self.state.upper);
        vec![
            TickMark::new(lower, self.format_value(lower, TickFormat::General)),
            TickMark::new(upper, self.format_value(upper, TickFormat::General)),
        ]
    }

    /// Largest endpoint label measurement with the format `selector` implies.
    /// `None` when the surface measures non-empty text as zero.
    fn endpoint_label_size(&self, surface: &dyn Surface, format: TickFormat) -> Option<Size> {
        let font = &self.style.tick_label_font;
        let mut size = Size::default();
        for value in [self.state.lower, self.state.upper] {
            let text = self.format_value(value, format);
            if text.is_empty() {
                continue;
            }
            let m = surface.measure_text(&text, font);
            if m.is_zero() {
                return None;
            }
            size.width = size.width.max(m.width);
            size.height = size.height.max(m.height);
        }
        Some(size)
    }

    /// Choose a step from the 1-2-5 sequence that keeps labels from overlapping.
    ///
    /// Returns `None` for symbol axes, for a non-positive `available` and when
    /// text measurement is degenerate; callers then fall back to endpoint labels.
    pub fn calc_tick_size(&self, surface: &dyn Surface, available: f64, edge: RectangleEdge) -> Option<f64> {
        if self.kind == AxisKind::Symbol || available.is_nan() || available <= 0.0 {
            return None;
        }
        let length = self.axis_range().length();
        let factor = self.style.spacing_factor.max(f64::EPSILON);
        let mut selector = TickSelector::new().with_max_power(self.state.max_tick_power);
        selector.select(length / 2.0);

        if edge.is_left_or_right() {
            // Labels stacked: one row per tick.
            let height = self.endpoint_label_size(surface, selector.tick_format())?.height;
            let capacity = available / (height * factor);
            while length / selector.tick_size() <= capacity {
                if !selector.previous() {
                    return Some(selector.tick_size());
                }
            }
            selector.next();
            Some(selector.tick_size())
        } else {
            // Labels side by side: widths depend on the candidate step's precision.
            loop {
                let width = self.endpoint_label_size(surface, selector.tick_format())?.width;
                let fit = available / (width * factor);
                if length / selector.tick_size() > fit {
                    selector.next();
                    return Some(selector.tick_size());
                }
                if !selector.previous() {
                    return Some(selector.tick_size());
                }
            }
        }
    }

    /// Tick list for the current bounds.
    ///
    /// Symbols strictly inside the bounds win; otherwise multiples of `step`
    /// (in axis space) within the bounds. Never empty and strictly ascending:
    /// fewer than two numeric ticks, or a step spanning more than [`MAX_TICKS`]
    /// intervals, yield the two endpoints.
    pub fn ticks(&self, step: Option<f64>) -> Vec<TickMark> {
        let (lower, upper) = (self.state.lower, self.state.upper);
        let symbols: Vec<TickMark> = self
            .state
            .symbols
            .iter()
            .filter(|s| s.value > lower && s.value < upper)
            .map(|s| TickMark::new(s.value, s.label.clone()))
            .collect();
        if !symbols.is_empty() {
            return symbols;
        }
        let step = match step {
            Some(s) if s > 0.0 && s.is_finite() && self.kind != AxisKind::Symbol => s,
            _ => return self.endpoint_ticks(),
        };

        let range = self.axis_range();
        // A step too fine to cover the bounds within the cap has no clean tick list.
        if range.length() / step > MAX_TICKS as f64 {
            debug!(step, length = range.length(), "tick step too fine; using endpoints");
            return self.endpoint_ticks();
        }
        let format = TickFormat::for_step(step);
        let tolerance = step * 1e-9;
        let mut k = (range.lower() / step - 1e-9).ceil();
        let mut ticks: Vec<TickMark> = Vec::new();
        while ticks.len() <= MAX_TICKS {
            let mut t = k * step;
            k += 1.0;
            if t > range.upper() + tolerance {
                break;
            }
            if t.abs() < tolerance {
                t = 0.0;
            }
            // Ticks admitted by the tolerance sit on the bound, never outside it.
            let value = self.kind.from_axis(t).clamp(lower, upper);
            if !value.is_finite() || ticks.last().is_some_and(|last| value <= last.value) {
                break;
            }
            ticks.push(TickMark::new(value, self.format_value(value, format)));
        }
        if ticks.len() < 2 {
            return self.endpoint_ticks();
        }
        ticks
    }

    /// Search a step for `available` pixels and build the tick list.
    pub fn refresh_ticks(&self, surface: &dyn Surface, available: f64, edge: RectangleEdge) -> Vec<TickMark> {
        let step = self.calc_tick_size(surface, available, edge);
        self.ticks(step)
    }

    fn shows_label(&self) -> bool { self.style.label_visible && !self.label.is_empty() }

    fn max_label_extent(&self, surface: &dyn Surface, ticks: &[TickMark], edge: RectangleEdge) -> f64 {
        if !self.style.tick_labels_visible {
            return 0.0;
        }
        ticks
            .iter()
            .map(|t| {
                let m = surface.measure_text(&t.label, &self.style.tick_label_font);
                if edge.is_top_or_bottom() { m.height } else { m.width }
            })
            .fold(0.0, f64::max)
    }

    fn tick_block(&self, surface: &dyn Surface, ticks: &[TickMark], edge: RectangleEdge) -> f64 {
        let labels = self.max_label_extent(surface, ticks, edge);
        let mut space = self.style.tick_mark_length;
        if labels > 0.0 {
            space += self.style.tick_label_offset + labels;
        }
        space
    }

    /// Pixels this axis needs outside the data area on `edge`, at most half of `bounds` in that direction.
    pub fn reserve_space(&self, surface: &dyn Surface, bounds: Rect, estimated_area: Rect, edge: RectangleEdge) -> f64 {
        let available = if edge.is_top_or_bottom() { estimated_area.width } else { estimated_area.height };
        let ticks = self.refresh_ticks(surface, available, edge);
        let mut space = self.tick_block(surface, &ticks, edge);
        if self.shows_label() {
            // Vertical axis labels are rotated, so their height is the horizontal extent.
            space += self.style.label_offset + surface.measure_text(&self.label, &self.style.label_font).height;
        }
        let cap = if edge.is_top_or_bottom() { bounds.height } else { bounds.width } * 0.5;
        space.clamp(0.0, cap.max(0.0))
    }

    /// Draw axis line, tick marks, tick labels and axis label along `edge` of `data_area`,
    /// `offset` pixels outward. Returns the ticks drawn (for gridlines).
    pub fn draw(
        &self,
        surface: &mut dyn Surface,
        bounds: Rect,
        data_area: Rect,
        offset: f64,
        edge: RectangleEdge,
    ) -> Vec<TickMark> {
        let available = if edge.is_top_or_bottom() { data_area.width } else { data_area.height };
        let ticks = self.refresh_ticks(surface, available, edge);
        let style = &self.style;

        // Base of the axis and outward unit direction.
        let (base, dir) = match edge {
            RectangleEdge::Bottom => (data_area.bottom() + offset, 1.0),
            RectangleEdge::Top => (data_area.y - offset, -1.0),
            RectangleEdge::Left => (data_area.x - offset, -1.0),
            RectangleEdge::Right => (data_area.right() + offset, 1.0),
        };
        if edge.is_top_or_bottom() {
            surface.draw_line(data_area.x, base, data_area.right(), base, &style.line);
        } else {
            surface.draw_line(base, data_area.y, base, data_area.bottom(), &style.line);
        }

        let anchor = match edge {
            RectangleEdge::Bottom => TextAnchor::TopCenter,
            RectangleEdge::Top => TextAnchor::BottomCenter,
            RectangleEdge::Left => TextAnchor::CenterRight,
            RectangleEdge::Right => TextAnchor::CenterLeft,
        };
        let tick_end = base + dir * style.tick_mark_length;
        let label_at = tick_end + dir * style.tick_label_offset;
        for tick in &ticks {
            let pos = self.value_to_screen(tick.value, data_area, edge);
            if !pos.is_finite() {
                continue;
            }
            if edge.is_top_or_bottom() {
                surface.draw_line(pos, base, pos, tick_end, &style.tick_stroke);
                if style.tick_labels_visible {
                    surface.draw_text(&tick.label, pos, label_at, &style.tick_label_font, style.tick_label_color, anchor, 0.0);
                }
            } else {
                surface.draw_line(base, pos, tick_end, pos, &style.tick_stroke);
                if style.tick_labels_visible {
                    surface.draw_text(&tick.label, label_at, pos, &style.tick_label_font, style.tick_label_color, anchor, 0.0);
                }
            }
        }

        if self.shows_label() {
            let font = &style.label_font;
            let height = surface.measure_text(&self.label, font).height;
            let at = base + dir * (self.tick_block(surface, &ticks, edge) + style.label_offset);
            // Keep the label inside the plot bounds when space was capped.
            let at = match edge {
                RectangleEdge::Bottom => at.min(bounds.bottom() - height),
                RectangleEdge::Top => at.max(bounds.y + height),
                RectangleEdge::Left => at.max(bounds.x + height),
                RectangleEdge::Right => at.min(bounds.right() - height),
            };
            match edge {
                RectangleEdge::Bottom => {
                    surface.draw_text(&self.label, data_area.center_x(), at, font, style.label_color, TextAnchor::TopCenter, 0.0)
                }
                RectangleEdge::Top => {
                    surface.draw_text(&self.label, data_area.center_x(), at, font, style.label_color, TextAnchor::BottomCenter, 0.0)
                }
                RectangleEdge::Left => {
                    surface.draw_text(&self.label, at, data_area.center_y(), font, style.label_color, TextAnchor::BottomCenter, -90.0)
                }
                RectangleEdge::Right => {
                    surface.draw_text(&self.label, at, data_area.center_y(), font, style.label_color, TextAnchor::TopCenter, -90.0)
                }
            }
        }
        ticks
    }

    /// Zoom around `anchor`: each bound's distance from the anchor is scaled by `factor`.
    ///
    /// A non-positive factor re-enables auto-range. Results that are zero-length
    /// or non-finite are rejected and leave the axis unchanged.
    pub fn resize_range(&mut self, factor: f64, anchor: f64) {
        if factor.is_nan() {
            return;
        }
        if factor <= 0.0 {
            self.set_auto_range(true);
            return;
        }
        let range = self.axis_range();
        let a = self.kind.to_axis(anchor);
        let lo = a - (a - range.lower()) * factor;
        let hi = a + (range.upper() - a) * factor;
        match self.checked_bounds(lo, hi) {
            Some((lower, upper)) => self.replace_bounds(lower, upper),
            None => debug!(factor, anchor, "zoom rejected: degenerate range"),
        }
    }

    /// Shift both bounds by `percent` of the current (axis-space) length.
    pub fn pan(&mut self, percent: f64) {
        let range = self.axis_range();
        let delta = percent * range.length();
        match self.checked_bounds(range.lower() + delta, range.upper() + delta) {
            Some((lower, upper)) => self.replace_bounds(lower, upper),
            None => debug!(percent, "pan rejected: degenerate range"),
        }
    }

    fn replace_bounds(&mut self, lower: f64, upper: f64) {
        self.state.lower = lower;
        self.state.upper = upper;
        self.state.auto_range = false;
        self.notify();
    }

    /// Subscribe to bound changes. Callbacks run synchronously, in subscription order.
    pub fn add_listener(&mut self, listener: impl FnMut(&AxisChange) + 'static) -> ListenerId {
        let id = ListenerId(self.state.next_listener);
        self.state.next_listener += 1;
        self.state.listeners.push((id, Box::new(listener)));
        id
    }

    /// Revoke a subscription. Returns `false` if `id` was not subscribed.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.state.listeners.len();
        self.state.listeners.retain(|(l, _)| *l != id);
        self.state.listeners.len() != before
    }

    fn notify(&mut self) {
        let change = AxisChange { lower: self.state.lower, upper: self.state.upper, auto_range: self.state.auto_range };
        for (_, listener) in self.state.listeners.iter_mut() {
            listener(&change);
        }
    }
}
