// File: crates/meridian-core/tests/scheduler.rs
// Purpose: Cursor advancement, chunked completeness/order, cancellation, pacing and the progress overlay.

use std::cell::RefCell;
use std::time::Duration;

use meridian_core::{
    next_position, Axis, Cursor, DataSeries, DrawOp, DrawStatus, Layer, ManualClock, ManualQueue, Rect,
    RecordingSurface, RectangleEdge, RenderContext, RenderScheduler, SchedulerConfig, SeriesDataset, Surface,
    Theme, XYDataset, XYRenderer,
};

/// Logs every `(series, item, pass)` it is asked to draw; optionally advances a clock per item.
#[derive(Default)]
struct LogRenderer {
    log: RefCell<Vec<(usize, usize, usize)>>,
    passes: usize,
    clock: Option<(ManualClock, Duration)>,
}

impl LogRenderer {
    fn new(passes: usize) -> Self { Self { passes, ..Self::default() } }
    fn items(&self) -> Vec<(usize, usize)> {
        self.log.borrow().iter().filter(|(_, _, p)| *p == 0).map(|(s, i, _)| (*s, *i)).collect()
    }
}

impl XYRenderer for LogRenderer {
    fn pass_count(&self) -> usize { self.passes }
    fn draw_item(&self, _surface: &mut dyn Surface, _ctx: &RenderContext<'_>, series: usize, item: usize, pass: usize) {
        self.log.borrow_mut().push((series, item, pass));
        if let (Some((clock, per_item)), 0) = (&self.clock, pass) {
            clock.advance(*per_item);
        }
    }
}

fn dataset(sizes: &[usize]) -> SeriesDataset {
    let mut ds = SeriesDataset::new();
    for (s, &n) in sizes.iter().enumerate() {
        let items = (0..n).map(|i| (i as f64, (s * 1000 + i) as f64)).collect();
        ds.add_series(DataSeries::new(format!("s{s}"), items));
    }
    ds
}

fn expected(sizes: &[usize]) -> Vec<(usize, usize)> {
    sizes.iter().enumerate().flat_map(|(s, &n)| (0..n).map(move |i| (s, i))).collect()
}

struct Fixture {
    x: Axis,
    y: Axis,
    theme: Theme,
}

impl Fixture {
    fn new() -> Self {
        Self { x: Axis::linear("x"), y: Axis::linear("y"), theme: Theme::light() }
    }
    fn ctx<'a>(&'a self, ds: &'a dyn XYDataset) -> RenderContext<'a> {
        RenderContext {
            dataset: ds,
            x_axis: &self.x,
            y_axis: &self.y,
            x_edge: RectangleEdge::Bottom,
            y_edge: RectangleEdge::Left,
            data_area: Rect::new(0.0, 0.0, 200.0, 100.0),
            theme: &self.theme,
        }
    }
}

fn config(chunk: usize, min: usize, max: usize) -> SchedulerConfig {
    SchedulerConfig {
        initial_chunk_size: chunk,
        min_chunk_size: min,
        max_chunk_size: max,
        target_chunk_duration: Duration::from_millis(40),
        pause: Duration::from_millis(10),
    }
}

/// Fire continuations until the cycle ends; returns how many continuations ran.
fn drain(
    scheduler: &mut RenderScheduler,
    mut status: DrawStatus,
    surface: &mut RecordingSurface,
    queue: &mut ManualQueue,
    renderer: &dyn XYRenderer,
    ctx: &RenderContext<'_>,
) -> usize {
    let mut fired = 0;
    while let DrawStatus::Pending(handle) = status {
        assert_eq!(queue.pop_next(), Some(handle), "exactly the pending continuation is queued");
        assert!(queue.is_empty());
        status = scheduler.resume(handle, surface, queue, renderer, ctx);
        fired += 1;
        assert!(fired < 10_000, "scheduler never finished");
    }
    assert_eq!(status, DrawStatus::Complete);
    fired
}

#[test]
fn next_position_walks_series_and_skips_empty_ones() {
    let ds = dataset(&[2, 0, 3]);
    let mut cursor = Cursor::first(&ds);
    let mut visited = Vec::new();
    while !cursor.is_exhausted(&ds) {
        visited.push((cursor.series, cursor.item));
        cursor = next_position(cursor, &ds);
    }
    assert_eq!(visited, expected(&[2, 0, 3]));
    assert_eq!(cursor, Cursor::new(3, 0));
    assert_eq!(next_position(cursor, &ds), cursor, "sentinel is sticky");
}

#[test]
fn empty_datasets_start_exhausted() {
    assert!(Cursor::first(&dataset(&[])).is_exhausted(&dataset(&[])));
    let ds = dataset(&[0, 0]);
    assert_eq!(Cursor::first(&ds), Cursor::new(2, 0));
}

#[test]
fn small_dataset_draws_synchronously() {
    let f = Fixture::new();
    let ds = dataset(&[12, 8]);
    let renderer = LogRenderer::new(1);
    let mut surface = RecordingSurface::new();
    let mut queue = ManualQueue::new();
    let mut scheduler = RenderScheduler::with_clock(config(10, 1, 100), Box::new(ManualClock::new()));

    let status = scheduler.begin(&mut surface, &mut queue, &renderer, &f.ctx(&ds));
    assert_eq!(status, DrawStatus::Complete);
    assert!(queue.is_empty());
    assert!(!scheduler.is_active());
    assert_eq!(renderer.items(), expected(&[12, 8]));
    assert_eq!(surface.ops_on(Layer::Overlay).count(), 0);
}

#[test]
fn chunked_run_visits_every_item_once_in_order() {
    let f = Fixture::new();
    let sizes = [50, 0, 70, 3];
    let ds = dataset(&sizes);
    let renderer = LogRenderer::new(2);
    let mut surface = RecordingSurface::new();
    let mut queue = ManualQueue::new();
    let mut scheduler = RenderScheduler::with_clock(config(10, 5, 10), Box::new(ManualClock::new()));
    let ctx = f.ctx(&ds);

    let status = scheduler.begin(&mut surface, &mut queue, &renderer, &ctx);
    assert!(matches!(status, DrawStatus::Pending(_)));
    assert_eq!(renderer.items().len(), 20, "first paint draws two chunks");
    assert_eq!(scheduler.cursor(), Some(Cursor::new(0, 20)));

    let fired = drain(&mut scheduler, status, &mut surface, &mut queue, &renderer, &ctx);
    assert_eq!(fired, 11); // 123 items: 20 up front, then chunks of 10
    assert_eq!(renderer.items(), expected(&sizes));
    // Every pass of an item runs before the next item starts.
    let log = renderer.log.borrow();
    assert!(log.chunks(2).all(|c| c[0].2 == 0 && c[1].2 == 1 && c[0].0 == c[1].0 && c[0].1 == c[1].1));
    assert!(!scheduler.is_active());
    assert_eq!(scheduler.pending_task(), None);
}

#[test]
fn new_cycle_cancels_pending_continuation() {
    let f = Fixture::new();
    let ds = dataset(&[100]);
    let first = LogRenderer::new(1);
    let second = LogRenderer::new(1);
    let mut surface = RecordingSurface::new();
    let mut queue = ManualQueue::new();
    let mut scheduler = RenderScheduler::with_clock(config(10, 10, 10), Box::new(ManualClock::new()));
    let ctx = f.ctx(&ds);

    let DrawStatus::Pending(h1) = scheduler.begin(&mut surface, &mut queue, &first, &ctx) else {
        panic!("expected a pending cycle");
    };
    let drawn_by_first = first.items().len();

    let status = scheduler.begin(&mut surface, &mut queue, &second, &ctx);
    let DrawStatus::Pending(h2) = status else { panic!("expected a pending cycle") };
    assert_ne!(h1, h2);
    assert_eq!(queue.pending_count(), 1);
    assert!(queue.contains(h2));
    assert!(!queue.contains(h1));

    // A continuation from the superseded cycle is ignored.
    assert_eq!(scheduler.resume(h1, &mut surface, &mut queue, &first, &ctx), DrawStatus::Stale);

    drain(&mut scheduler, status, &mut surface, &mut queue, &second, &ctx);
    assert_eq!(first.items().len(), drawn_by_first);
    assert_eq!(second.items(), expected(&[100]));
}

#[test]
fn cancel_releases_handle_and_clears_overlay() {
    let f = Fixture::new();
    let ds = dataset(&[100]);
    let renderer = LogRenderer::new(1);
    let mut surface = RecordingSurface::new();
    let mut queue = ManualQueue::new();
    let mut scheduler = RenderScheduler::with_clock(config(10, 10, 10), Box::new(ManualClock::new()));

    let status = scheduler.begin(&mut surface, &mut queue, &renderer, &f.ctx(&ds));
    assert!(matches!(status, DrawStatus::Pending(_)));
    assert_eq!(surface.texts_on(Layer::Overlay), ["20%"]);

    scheduler.cancel(&mut queue, &mut surface);
    assert!(queue.is_empty());
    assert!(!scheduler.is_active());
    assert_eq!(surface.ops_on(Layer::Overlay).count(), 0);
    assert_eq!(surface.layer(), Layer::Main);
}

#[test]
fn overlay_tracks_progress_and_disappears_on_completion() {
    let f = Fixture::new();
    let ds = dataset(&[100]);
    let renderer = LogRenderer::new(1);
    let mut surface = RecordingSurface::new();
    let mut queue = ManualQueue::new();
    let mut scheduler = RenderScheduler::with_clock(config(10, 10, 10), Box::new(ManualClock::new()));
    let ctx = f.ctx(&ds);

    let DrawStatus::Pending(h) = scheduler.begin(&mut surface, &mut queue, &renderer, &ctx) else {
        panic!("expected a pending cycle");
    };
    queue.pop_next();
    let status = scheduler.resume(h, &mut surface, &mut queue, &renderer, &ctx);
    assert_eq!(surface.texts_on(Layer::Overlay), ["30%"]);
    assert!(surface.ops_on(Layer::Overlay).any(|op| matches!(op, DrawOp::FillRect { .. })));

    drain(&mut scheduler, status, &mut surface, &mut queue, &renderer, &ctx);
    assert_eq!(surface.ops_on(Layer::Overlay).count(), 0);
    // Items were clipped to the data area on the main layer.
    assert!(surface.ops_on(Layer::Main).any(|op| matches!(op, DrawOp::Clip(Some(_)))));
}

#[test]
fn chunk_size_rescales_toward_target_duration() {
    let f = Fixture::new();
    let ds = dataset(&[400]);
    let clock = ManualClock::new();
    let renderer = LogRenderer { clock: Some((clock.clone(), Duration::from_millis(1))), ..LogRenderer::new(1) };
    let mut surface = RecordingSurface::new();
    let mut queue = ManualQueue::new();
    let mut scheduler = RenderScheduler::with_clock(config(10, 1, 1000), Box::new(clock.clone()));
    let ctx = f.ctx(&ds);

    let DrawStatus::Pending(h) = scheduler.begin(&mut surface, &mut queue, &renderer, &ctx) else {
        panic!("expected a pending cycle");
    };
    assert_eq!(scheduler.chunk_size(), 10);

    // 10 items at 1ms each against a 40ms target: grow 4x.
    queue.pop_next();
    let DrawStatus::Pending(h) = scheduler.resume(h, &mut surface, &mut queue, &renderer, &ctx) else {
        panic!("expected more work");
    };
    assert_eq!(scheduler.chunk_size(), 40);

    // 40 items take exactly the target: stay.
    queue.pop_next();
    let status = scheduler.resume(h, &mut surface, &mut queue, &renderer, &ctx);
    assert!(matches!(status, DrawStatus::Pending(_)));
    assert_eq!(scheduler.chunk_size(), 40);
    drain(&mut scheduler, status, &mut surface, &mut queue, &renderer, &ctx);
    assert_eq!(renderer.items().len(), 400);
}

#[test]
fn chunk_size_is_clamped() {
    let f = Fixture::new();
    let ds = dataset(&[1000]);
    let renderer = LogRenderer::new(1);
    let mut surface = RecordingSurface::new();
    let mut queue = ManualQueue::new();
    // A frozen clock reads every chunk as instantaneous.
    let mut scheduler = RenderScheduler::with_clock(config(10, 5, 50), Box::new(ManualClock::new()));
    let ctx = f.ctx(&ds);

    let DrawStatus::Pending(h) = scheduler.begin(&mut surface, &mut queue, &renderer, &ctx) else {
        panic!("expected a pending cycle");
    };
    queue.pop_next();
    scheduler.resume(h, &mut surface, &mut queue, &renderer, &ctx);
    assert_eq!(scheduler.chunk_size(), 50);
}

#[test]
fn invalidated_cycle_resumes_stale() {
    let f = Fixture::new();
    let ds = dataset(&[100]);
    let renderer = LogRenderer::new(1);
    let mut surface = RecordingSurface::new();
    let mut queue = ManualQueue::new();
    let mut scheduler = RenderScheduler::with_clock(config(10, 10, 10), Box::new(ManualClock::new()));
    let ctx = f.ctx(&ds);

    let DrawStatus::Pending(handle) = scheduler.begin(&mut surface, &mut queue, &renderer, &ctx) else {
        panic!("expected a pending cycle");
    };
    assert_eq!(scheduler.invalidate(), Some(handle));
    assert_eq!(scheduler.invalidate(), None);
    assert!(!scheduler.is_active());

    assert_eq!(queue.pop_next(), Some(handle));
    assert_eq!(scheduler.resume(handle, &mut surface, &mut queue, &renderer, &ctx), DrawStatus::Stale);
    assert!(queue.is_empty());
    assert_eq!(renderer.items().len(), 20);
}

#[test]
fn resume_against_shrunken_dataset_stays_in_range() {
    let f = Fixture::new();
    let before = dataset(&[100]);
    let after = dataset(&[5, 30]);
    let renderer = LogRenderer::new(1);
    let mut surface = RecordingSurface::new();
    let mut queue = ManualQueue::new();
    let mut scheduler = RenderScheduler::with_clock(config(10, 10, 10), Box::new(ManualClock::new()));

    let status = scheduler.begin(&mut surface, &mut queue, &renderer, &f.ctx(&before));
    assert_eq!(scheduler.cursor(), Some(Cursor::new(0, 20)));

    drain(&mut scheduler, status, &mut surface, &mut queue, &renderer, &f.ctx(&after));
    let drawn = renderer.items();
    assert_eq!(&drawn[20..], &expected(&[5, 30])[5..]);
    assert!(drawn[20..].iter().all(|&(s, i)| i < after.item_count(s)));
}
