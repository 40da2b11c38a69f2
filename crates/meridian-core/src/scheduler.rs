// File: crates/meridian-core/src/scheduler.rs
// Summary: Incremental, adaptively paced and cancellable item rendering over (series, item) cursors.

use std::time::Duration;

use tracing::{debug, trace};

use crate::dataset::XYDataset;
use crate::geometry::{Rect, TextAnchor};
use crate::renderer::{RenderContext, XYRenderer};
use crate::surface::{Layer, Surface};
use crate::task::{Clock, SystemClock, TaskHandle, TaskQueue};
use crate::types::Font;

/// Position of the next item to draw.
///
/// `series == dataset.series_count()` is the exhaustion sentinel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Cursor {
    pub series: usize,
    pub item: usize,
}

impl Cursor {
    pub const fn new(series: usize, item: usize) -> Self { Self { series, item } }

    /// First drawable position (empty leading series are skipped).
    pub fn first(dataset: &dyn XYDataset) -> Self { settle(Self::new(0, 0), dataset) }

    pub fn is_exhausted(&self, dataset: &dyn XYDataset) -> bool { self.series >= dataset.series_count() }
}

/// Roll over to the next non-empty series while the item index is past the end.
fn settle(mut cursor: Cursor, dataset: &dyn XYDataset) -> Cursor {
    let series_count = dataset.series_count();
    while cursor.series < series_count && cursor.item >= dataset.item_count(cursor.series) {
        cursor.series += 1;
        cursor.item = 0;
    }
    if cursor.series >= series_count {
        return Cursor::new(series_count, 0);
    }
    cursor
}

/// The position after `cursor`. An exhausted cursor stays exhausted.
pub fn next_position(cursor: Cursor, dataset: &dyn XYDataset) -> Cursor {
    if cursor.is_exhausted(dataset) {
        return Cursor::new(dataset.series_count(), 0);
    }
    settle(Cursor::new(cursor.series, cursor.item + 1), dataset)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SchedulerConfig {
    /// Items per continuation before any timing is known.
    pub initial_chunk_size: usize,
    pub min_chunk_size: usize,
    pub max_chunk_size: usize,
    /// Pacing goal for a single continuation.
    pub target_chunk_duration: Duration,
    /// Delay between continuations, leaving the host loop room for input.
    pub pause: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            initial_chunk_size: 2_000,
            min_chunk_size: 100,
            max_chunk_size: 100_000,
            target_chunk_duration: Duration::from_millis(40),
            pause: Duration::from_millis(10),
        }
    }
}

impl SchedulerConfig {
    fn clamp_chunk(&self, size: usize) -> usize {
        let lo = self.min_chunk_size.max(1);
        let hi = self.max_chunk_size.max(lo);
        size.clamp(lo, hi)
    }
}

/// Outcome of [`RenderScheduler::begin`] / [`RenderScheduler::resume`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawStatus {
    /// Every item is on the surface.
    Complete,
    /// More items remain; call `resume` with this handle when the host fires it.
    Pending(TaskHandle),
    /// The handle does not belong to the active cycle (cancelled or superseded); nothing drawn.
    Stale,
}

#[derive(Clone, Copy, Debug)]
struct Cycle {
    task: TaskHandle,
    cursor: Cursor,
    drawn: usize,
    total: usize,
}

/// Draws a dataset in bounded chunks spread over host-loop turns.
///
/// Owns at most one pending continuation; starting a cycle cancels the previous one.
pub struct RenderScheduler {
    config: SchedulerConfig,
    chunk_size: usize,
    clock: Box<dyn Clock>,
    cycle: Option<Cycle>,
}

impl RenderScheduler {
    pub fn new(config: SchedulerConfig) -> Self { Self::with_clock(config, Box::new(SystemClock::new())) }

    pub fn with_clock(config: SchedulerConfig, clock: Box<dyn Clock>) -> Self {
        let chunk_size = config.clamp_chunk(config.initial_chunk_size);
        Self { config, chunk_size, clock, cycle: None }
    }

    pub fn config(&self) -> &SchedulerConfig { &self.config }
    pub fn chunk_size(&self) -> usize { self.chunk_size }
    pub fn is_active(&self) -> bool { self.cycle.is_some() }
    pub fn pending_task(&self) -> Option<TaskHandle> { self.cycle.map(|c| c.task) }
    /// Next item the active cycle will draw.
    pub fn cursor(&self) -> Option<Cursor> { self.cycle.map(|c| c.cursor) }

    /// Drop the pending continuation (if any) and clear the progress overlay.
    pub fn cancel(&mut self, queue: &mut dyn TaskQueue, surface: &mut dyn Surface) {
        if let Some(cycle) = self.cycle.take() {
            queue.cancel(cycle.task);
            debug!(task = cycle.task.id(), drawn = cycle.drawn, total = cycle.total, "progressive render cancelled");
        }
        surface.clear_layer(Layer::Overlay);
        surface.select_layer(Layer::Main);
    }

    /// Forget the active cycle without touching the surface or the queue, so
    /// its pending continuation resumes as [`DrawStatus::Stale`]. Returns that
    /// continuation's handle for hosts that want to cancel it outright.
    pub fn invalidate(&mut self) -> Option<TaskHandle> {
        let cycle = self.cycle.take()?;
        debug!(task = cycle.task.id(), drawn = cycle.drawn, total = cycle.total, "progressive render invalidated");
        Some(cycle.task)
    }

    /// Draw every item synchronously. Returns the number of items visited.
    pub fn draw_all(&self, surface: &mut dyn Surface, renderer: &dyn XYRenderer, ctx: &RenderContext<'_>) -> usize {
        surface.select_layer(Layer::Main);
        surface.set_clip(Some(ctx.data_area));
        let (_, count) = draw_items(surface, renderer, ctx, Cursor::first(ctx.dataset), usize::MAX);
        surface.set_clip(None);
        count
    }

    /// Start a new cycle: small datasets are drawn at once, large ones get a
    /// first chunk of twice the chunk size and a scheduled continuation.
    pub fn begin(
        &mut self,
        surface: &mut dyn Surface,
        queue: &mut dyn TaskQueue,
        renderer: &dyn XYRenderer,
        ctx: &RenderContext<'_>,
    ) -> DrawStatus {
        self.cancel(queue, surface);
        let total = ctx.dataset.total_item_count();
        let first_chunk = self.chunk_size.saturating_mul(2);
        if total <= first_chunk {
            let drawn = self.draw_all(surface, renderer, ctx);
            trace!(drawn, "render complete in one pass");
            return DrawStatus::Complete;
        }

        surface.select_layer(Layer::Main);
        surface.set_clip(Some(ctx.data_area));
        let (cursor, drawn) = draw_items(surface, renderer, ctx, Cursor::first(ctx.dataset), first_chunk);
        surface.set_clip(None);

        show_progress(surface, ctx, drawn, total);
        let task = queue.defer(self.config.pause);
        debug!(total, drawn, chunk_size = self.chunk_size, task = task.id(), "progressive render started");
        self.cycle = Some(Cycle { task, cursor, drawn, total });
        DrawStatus::Pending(task)
    }

    /// Run the continuation `handle`: draw one chunk, rescale the chunk size
    /// toward the target duration, then schedule the next step or finish.
    pub fn resume(
        &mut self,
        handle: TaskHandle,
        surface: &mut dyn Surface,
        queue: &mut dyn TaskQueue,
        renderer: &dyn XYRenderer,
        ctx: &RenderContext<'_>,
    ) -> DrawStatus {
        let mut cycle = match self.cycle {
            Some(c) if c.task == handle => c,
            _ => {
                trace!(task = handle.id(), "stale continuation ignored");
                return DrawStatus::Stale;
            }
        };
        self.cycle = None;

        let start = self.clock.now();
        surface.select_layer(Layer::Main);
        surface.set_clip(Some(ctx.data_area));
        let (cursor, count) = draw_items(surface, renderer, ctx, cycle.cursor, self.chunk_size);
        surface.set_clip(None);
        let elapsed = self.clock.now().saturating_sub(start);

        cycle.cursor = cursor;
        cycle.drawn += count;
        if cursor.is_exhausted(ctx.dataset) {
            surface.clear_layer(Layer::Overlay);
            surface.select_layer(Layer::Main);
            debug!(drawn = cycle.drawn, "progressive render complete");
            return DrawStatus::Complete;
        }

        self.rescale(elapsed);
        show_progress(surface, ctx, cycle.drawn, cycle.total);
        cycle.task = queue.defer(self.config.pause);
        self.cycle = Some(cycle);
        DrawStatus::Pending(cycle.task)
    }

    fn rescale(&mut self, elapsed: Duration) {
        // Sub-100µs timings are noise; floor them so the ratio stays bounded.
        let elapsed = elapsed.max(Duration::from_micros(100));
        let ratio = self.config.target_chunk_duration.as_secs_f64() / elapsed.as_secs_f64();
        let scaled = (self.chunk_size as f64 * ratio).round();
        let scaled = if scaled.is_finite() && scaled > 0.0 { scaled.min(usize::MAX as f64) as usize } else { 1 };
        let next = self.config.clamp_chunk(scaled);
        trace!(from = self.chunk_size, to = next, elapsed_us = elapsed.as_micros() as u64, "chunk size rescaled");
        self.chunk_size = next;
    }
}

/// Draw up to `limit` items starting at `cursor`, every pass per item.
/// Returns the cursor after the last drawn item and how many were drawn.
fn draw_items(
    surface: &mut dyn Surface,
    renderer: &dyn XYRenderer,
    ctx: &RenderContext<'_>,
    cursor: Cursor,
    limit: usize,
) -> (Cursor, usize) {
    let passes = renderer.pass_count();
    // The dataset may have shrunk since the cursor was taken.
    let mut cursor = settle(cursor, ctx.dataset);
    let mut count = 0;
    while count < limit && !cursor.is_exhausted(ctx.dataset) {
        for pass in 0..passes {
            renderer.draw_item(surface, ctx, cursor.series, cursor.item, pass);
        }
        count += 1;
        cursor = next_position(cursor, ctx.dataset);
    }
    (cursor, count)
}

/// Replace the overlay with a `NN%` badge in the data area's top-right corner.
fn show_progress(surface: &mut dyn Surface, ctx: &RenderContext<'_>, drawn: usize, total: usize) {
    let percent = if total == 0 { 100 } else { (drawn.saturating_mul(100) / total).min(100) };
    let text = format!("{percent}%");
    let font = Font::numeric(12.0);
    let size = surface.measure_text(&text, &font);
    let pad = 4.0;
    let area = ctx.data_area;
    let right = area.right() - pad;
    let badge = Rect::new(right - size.width - 2.0 * pad, area.y + pad, size.width + 2.0 * pad, size.height + 2.0 * pad);

    surface.clear_layer(Layer::Overlay);
    surface.select_layer(Layer::Overlay);
    surface.fill_rect(badge, ctx.theme.overlay_fill);
    surface.draw_text(&text, right - pad, area.y + 2.0 * pad, &font, ctx.theme.overlay_text, TextAnchor::TopRight, 0.0);
    surface.select_layer(Layer::Main);
}
