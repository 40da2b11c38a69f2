// File: crates/meridian-core/tests/plot.rs
// Purpose: XYPlot layout, furniture and progressive drawing against recording and SVG surfaces.

use std::time::Duration;

use meridian_core::{
    Axis, ChartError, DataSeries, DrawOp, DrawStatus, Layer, LineRenderer, ManualClock, ManualQueue,
    RecordingSurface, RectangleEdge, RenderOptions, RenderScheduler, ScatterRenderer, SchedulerConfig,
    SeriesDataset, Theme, XYPlot,
};

fn dataset(n: usize) -> SeriesDataset {
    let mut ds = SeriesDataset::new();
    let items = (0..n).map(|i| (i as f64, ((i * 37) % 101) as f64)).collect();
    ds.add_series(DataSeries::new("points", items));
    ds
}

fn scatter_plot(n: usize) -> XYPlot {
    XYPlot::new(Box::new(dataset(n)), Box::new(ScatterRenderer::default()), Axis::linear("X"), Axis::linear("Y"))
}

fn opts() -> RenderOptions {
    RenderOptions { width: 400, height: 300, ..RenderOptions::default() }
}

fn circles(surface: &RecordingSurface) -> usize {
    surface.ops_on(Layer::Main).filter(|op| matches!(op, DrawOp::FillCircle { .. })).count()
}

#[test]
fn small_plot_draws_everything_at_once() {
    let mut plot = scatter_plot(25);
    let mut surface = RecordingSurface::new();
    let mut queue = ManualQueue::new();
    let status = plot.draw(&mut surface, &mut queue, &opts());
    assert_eq!(status, DrawStatus::Complete);
    assert_eq!(circles(&surface), 25);

    let area = plot.data_area().expect("data area after draw");
    let bounds = opts().bounds();
    assert!(area.width > 0.0 && area.height > 0.0);
    assert!(area.x > bounds.x, "left axis reserved space");
    assert!(area.bottom() < bounds.bottom(), "bottom axis reserved space");
    assert!(area.right() <= bounds.right() && area.y >= bounds.y);

    let texts = surface.texts_on(Layer::Main);
    assert!(texts.contains(&"X") && texts.contains(&"Y"));
}

#[test]
fn points_land_inside_data_area() {
    let mut plot = scatter_plot(50);
    let mut surface = RecordingSurface::new();
    plot.draw(&mut surface, &mut ManualQueue::new(), &opts());
    let area = plot.data_area().unwrap();
    for op in surface.ops_on(Layer::Main) {
        if let DrawOp::FillCircle { cx, cy, .. } = op {
            assert!(area.contains(*cx, *cy), "({cx}, {cy}) outside {area:?}");
        }
    }
}

#[test]
fn hidden_labels_draw_no_text() {
    let mut plot = scatter_plot(5);
    let mut surface = RecordingSurface::new();
    let opts = RenderOptions { draw_labels: false, ..opts() };
    plot.draw(&mut surface, &mut ManualQueue::new(), &opts);
    assert!(surface.texts_on(Layer::Main).is_empty());
}

#[test]
fn large_plot_renders_progressively() {
    let scheduler = RenderScheduler::with_clock(
        SchedulerConfig { initial_chunk_size: 50, min_chunk_size: 50, max_chunk_size: 50, ..SchedulerConfig::default() },
        Box::new(ManualClock::new()),
    );
    let mut plot = scatter_plot(1000).with_scheduler(scheduler);
    let mut surface = RecordingSurface::new();
    let mut queue = ManualQueue::new();

    let mut status = plot.draw(&mut surface, &mut queue, &opts());
    assert!(matches!(status, DrawStatus::Pending(_)));
    assert_eq!(circles(&surface), 100);
    assert_eq!(surface.texts_on(Layer::Overlay), ["10%"]);

    while let DrawStatus::Pending(handle) = status {
        assert_eq!(queue.pop_next(), Some(handle));
        status = plot.resume(handle, &mut surface, &mut queue);
    }
    assert_eq!(status, DrawStatus::Complete);
    assert_eq!(circles(&surface), 1000);
    assert_eq!(surface.ops_on(Layer::Overlay).count(), 0);
    assert!(queue.now() >= Duration::from_millis(10 * 18));
}

#[test]
fn redraw_supersedes_pending_cycle() {
    let scheduler = RenderScheduler::with_clock(
        SchedulerConfig { initial_chunk_size: 50, min_chunk_size: 50, max_chunk_size: 50, ..SchedulerConfig::default() },
        Box::new(ManualClock::new()),
    );
    let mut plot = scatter_plot(1000).with_scheduler(scheduler);
    let mut surface = RecordingSurface::new();
    let mut queue = ManualQueue::new();

    let DrawStatus::Pending(first) = plot.draw(&mut surface, &mut queue, &opts()) else {
        panic!("expected pending draw");
    };
    plot.pan_x(0.1);
    let DrawStatus::Pending(second) = plot.draw(&mut surface, &mut queue, &opts()) else {
        panic!("expected pending draw");
    };
    assert_eq!(queue.pending_count(), 1);
    assert_eq!(plot.scheduler().pending_task(), Some(second));
    assert_eq!(plot.resume(first, &mut surface, &mut queue), DrawStatus::Stale);
    // The redraw started from a cleared main layer.
    assert_eq!(circles(&surface), 100);
}

#[test]
fn resume_before_draw_is_stale() {
    let mut plot = scatter_plot(10);
    let mut queue = ManualQueue::new();
    let handle = meridian_core::TaskHandle::new(7);
    assert_eq!(plot.resume(handle, &mut RecordingSurface::new(), &mut queue), DrawStatus::Stale);
}

#[test]
fn dataset_changes_rerange_auto_axes_only() {
    let mut plot = scatter_plot(10);
    assert!(plot.x_axis.upper_bound() < 10.0);

    plot.set_dataset(Box::new(dataset(200)));
    assert!(plot.x_axis.upper_bound() > 199.0);

    plot.zoom_x(0.5, 100.0);
    let zoomed = (plot.x_axis.lower_bound(), plot.x_axis.upper_bound());
    plot.set_dataset(Box::new(dataset(500)));
    assert_eq!((plot.x_axis.lower_bound(), plot.x_axis.upper_bound()), zoomed);

    plot.restore_auto_range();
    assert!(plot.x_axis.upper_bound() > 499.0);
}

#[test]
fn axes_must_sit_on_matching_edges() {
    let plot = scatter_plot(3).with_edges(RectangleEdge::Top, RectangleEdge::Right).unwrap();
    assert_eq!((plot.x_edge(), plot.y_edge()), (RectangleEdge::Top, RectangleEdge::Right));

    let err = scatter_plot(3).with_edges(RectangleEdge::Left, RectangleEdge::Right).err();
    assert_eq!(err, Some(ChartError::MisplacedAxis { axis: "x", edge: RectangleEdge::Left }));
}

#[test]
fn line_renderer_connects_items_within_series() {
    let mut ds = SeriesDataset::new();
    ds.add_series(DataSeries::new("a", vec![(0.0, 0.0), (1.0, 1.0), (2.0, f64::NAN), (3.0, 2.0)]));
    ds.add_series(DataSeries::new("b", vec![(0.0, 2.0), (3.0, 0.0)]));
    let mut plot = XYPlot::new(
        Box::new(ds),
        Box::new(LineRenderer::default().with_markers(2.0)),
        Axis::linear("X"),
        Axis::linear("Y"),
    );
    let mut surface = RecordingSurface::new();
    let opts = RenderOptions { draw_gridlines: false, ..opts() };
    plot.draw(&mut surface, &mut ManualQueue::new(), &opts);

    let theme = Theme::light();
    let segments = surface
        .ops_on(Layer::Main)
        .filter(|op| matches!(op, DrawOp::Line { stroke, .. } if stroke.color == theme.series_color(0) || stroke.color == theme.series_color(1)))
        .count();
    // a: 0-1 only (NaN breaks 1-2 and 2-3); b: 0-1
    assert_eq!(segments, 2);
    assert_eq!(circles(&surface), 5);
}

#[test]
fn svg_output_has_main_and_overlay_groups() {
    let mut plot = scatter_plot(20).with_theme(Theme::dark());
    let svg = plot.render_to_svg_string(&opts());
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains(r#"<g id="main">"#));
    assert!(svg.contains(r#"<g id="overlay">"#));
    assert_eq!(svg.matches("<circle").count(), 20);
    assert!(svg.contains("clip-path=\"url(#clip"));
    assert!(svg.trim_end().ends_with("</svg>"));
}

fn chunked_plot(n: usize) -> XYPlot {
    let scheduler = RenderScheduler::with_clock(
        SchedulerConfig { initial_chunk_size: 100, min_chunk_size: 100, max_chunk_size: 100, ..SchedulerConfig::default() },
        Box::new(ManualClock::new()),
    );
    scatter_plot(n).with_scheduler(scheduler)
}

#[test]
fn replacing_data_drops_pending_cycle() {
    let mut plot = chunked_plot(10_000);
    let mut surface = RecordingSurface::new();
    let mut queue = ManualQueue::new();
    let DrawStatus::Pending(handle) = plot.draw(&mut surface, &mut queue, &opts()) else {
        panic!("expected pending draw");
    };

    plot.set_dataset(Box::new(dataset(50)));
    assert!(!plot.scheduler().is_active());
    assert_eq!(queue.pop_next(), Some(handle));
    assert_eq!(plot.resume(handle, &mut surface, &mut queue), DrawStatus::Stale);
    assert!(queue.is_empty());

    // A fresh draw covers the new data only.
    assert_eq!(plot.draw(&mut surface, &mut queue, &opts()), DrawStatus::Complete);
    assert_eq!(circles(&surface), 50);
}

#[test]
fn navigation_drops_pending_cycle() {
    type Nav = fn(&mut XYPlot);
    let moves: [Nav; 5] = [
        |p| p.pan_x(0.5),
        |p| p.pan_y(-0.25),
        |p| p.zoom_x(0.5, 5_000.0),
        |p| p.zoom_y(2.0, 50.0),
        |p| p.restore_auto_range(),
    ];
    for nav in moves {
        let mut plot = chunked_plot(10_000);
        let mut surface = RecordingSurface::new();
        let mut queue = ManualQueue::new();
        let DrawStatus::Pending(handle) = plot.draw(&mut surface, &mut queue, &opts()) else {
            panic!("expected pending draw");
        };
        nav(&mut plot);
        assert_eq!(queue.pop_next(), Some(handle));
        assert_eq!(plot.resume(handle, &mut surface, &mut queue), DrawStatus::Stale);
        assert!(queue.is_empty(), "stale cycle scheduled more work");
        assert_eq!(circles(&surface), 200);
    }
}

#[test]
fn orphaned_continuation_is_cancelled_by_next_draw() {
    let mut plot = chunked_plot(10_000);
    let mut surface = RecordingSurface::new();
    let mut queue = ManualQueue::new();
    let DrawStatus::Pending(first) = plot.draw(&mut surface, &mut queue, &opts()) else {
        panic!("expected pending draw");
    };
    plot.zoom_x(0.5, 5_000.0);
    let DrawStatus::Pending(second) = plot.draw(&mut surface, &mut queue, &opts()) else {
        panic!("expected pending draw");
    };
    assert!(!queue.contains(first));
    assert_eq!(queue.pop_next(), Some(second));
    assert!(matches!(plot.resume(second, &mut surface, &mut queue), DrawStatus::Pending(_)));
}

#[test]
fn zoom_out_to_auto_range_rereads_data() {
    let mut plot = scatter_plot(100);
    let auto = (plot.x_axis.lower_bound(), plot.x_axis.upper_bound());

    plot.zoom_x(0.1, 50.0);
    assert!(!plot.x_axis.is_auto_range());
    assert!(plot.x_axis.upper_bound() - plot.x_axis.lower_bound() < 20.0);

    plot.zoom_x(0.0, 50.0);
    assert!(plot.x_axis.is_auto_range());
    assert_eq!((plot.x_axis.lower_bound(), plot.x_axis.upper_bound()), auto);

    let auto_y = (plot.y_axis.lower_bound(), plot.y_axis.upper_bound());
    plot.zoom_y(0.25, 10.0);
    plot.zoom_y(-1.0, 10.0);
    assert_eq!((plot.y_axis.lower_bound(), plot.y_axis.upper_bound()), auto_y);
}
