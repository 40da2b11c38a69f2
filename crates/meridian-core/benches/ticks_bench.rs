use criterion::{criterion_group, criterion_main, Criterion, black_box};
use meridian_core::{Axis, RecordingSurface, Rect, RectangleEdge, TickSelector};

fn bench_select(c: &mut Criterion) {
    c.bench_function("tick_select_walk", |b| {
        b.iter(|| {
            let mut sel = TickSelector::new();
            sel.select(black_box(12_345.678));
            while sel.previous() && sel.power() > -6 {}
            while sel.next() && sel.power() < 6 {}
            black_box(sel.tick_size())
        });
    });
}

fn bench_axis_ticks(c: &mut Criterion) {
    let surface = RecordingSurface::new();
    let area = Rect::new(40.0, 10.0, 740.0, 460.0);
    let mut group = c.benchmark_group("axis_ticks");
    for (name, edge) in [("bottom", RectangleEdge::Bottom), ("left", RectangleEdge::Left)] {
        group.bench_function(name, |b| {
            let mut axis = Axis::linear("value");
            axis.set_bounds(-1_234.5, 98_765.4).expect("bounds");
            b.iter(|| {
                let available = if edge.is_top_or_bottom() { area.width } else { area.height };
                let step = axis.calc_tick_size(&surface, available, edge);
                black_box(axis.ticks(step))
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_select, bench_axis_ticks);
criterion_main!(benches);
