// File: crates/meridian-examples/src/bin/lines.rs
// Summary: Minimal example that renders a line plot and a log-scale plot to PNG.

use meridian_core::{Axis, DataSeries, LineRenderer, RenderOptions, SeriesDataset, XYPlot};

fn main() {
    let data = vec![
        (0.0, 0.0),
        (1.0, 1.2),
        (2.0, 0.8),
        (3.0, 1.8),
        (4.0, 1.4),
        (5.0, 2.0),
    ];
    let mut ds = SeriesDataset::new();
    ds.add_series(DataSeries::new("line", data));

    let mut plot = XYPlot::new(Box::new(ds), Box::new(LineRenderer::default().with_markers(3.0)), Axis::linear("X"), Axis::linear("Y"));

    let opts = RenderOptions::default();
    let out = std::path::PathBuf::from("target/out/example_lines.png");
    std::fs::create_dir_all(out.parent().unwrap()).unwrap();
    plot.render_to_png(&opts, &out).expect("render to png");
    println!("Wrote {}", out.display());

    // Exponential growth against a base-10 log axis.
    let mut growth = SeriesDataset::new();
    growth.add_series(DataSeries::new("growth", (0..=20).map(|i| (i as f64, 1.5f64.powi(i))).collect()));
    let mut log_plot = XYPlot::new(Box::new(growth), Box::new(LineRenderer::default()), Axis::linear("Step"), Axis::log10("Value"));
    let out = std::path::PathBuf::from("target/out/example_log.png");
    log_plot.render_to_png(&opts, &out).expect("render to png");
    println!("Wrote {}", out.display());
}
