// File: crates/meridian-core/tests/snapshot.rs
// Purpose: Golden snapshot harness with bless flow.
// Behavior:
// - Renders a deterministic small plot (no text) to PNG bytes.
// - If env UPDATE_SNAPSHOTS=1, (re)writes the snapshot file.
// - Else, if snapshot exists, compares decoded pixels for exact match.
// - Else, logs a note and returns (skips) without failing to ease first run.

use meridian_core::{Axis, DataSeries, LineRenderer, RenderOptions, SeriesDataset, Theme, XYPlot};

fn render_bytes() -> Vec<u8> {
    let mut ds = SeriesDataset::new();
    ds.add_series(DataSeries::new("a", vec![(0.0, 0.0), (1.0, 1.0), (2.0, 0.0), (3.0, 1.5), (4.0, 1.0)]));
    ds.add_series(DataSeries::new("b", vec![(0.0, 1.2), (2.0, 0.4), (4.0, 0.2)]));
    let mut x = Axis::linear("X");
    x.set_bounds(0.0, 4.0).expect("x bounds");
    let mut y = Axis::linear("Y");
    y.set_bounds(0.0, 2.0).expect("y bounds");
    let mut plot = XYPlot::new(Box::new(ds), Box::new(LineRenderer::default().with_markers(3.0)), x, y)
        .with_theme(Theme::dark());

    let mut opts = RenderOptions::default();
    opts.draw_labels = false; // avoid text nondeterminism across platforms
    plot.render_to_png_bytes(&opts).expect("render png")
}

#[test]
fn golden_basic_plot() {
    let bytes = render_bytes();
    let snap_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/__snapshots__");
    let snap_path = snap_dir.join("basic_plot.png");

    let update = std::env::var("UPDATE_SNAPSHOTS").ok().map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    if update {
        std::fs::create_dir_all(&snap_dir).expect("create snapshots dir");
        std::fs::write(&snap_path, &bytes).expect("write snapshot");
        eprintln!("[snapshot] Updated {} ({} bytes)", snap_path.display(), bytes.len());
        return;
    }

    if snap_path.exists() {
        let want = std::fs::read(&snap_path).expect("read snapshot");
        // Compare decoded pixel buffers to avoid PNG encoder variance
        let got_img = image::load_from_memory(&bytes).expect("decode got").to_rgba8();
        let want_img = image::load_from_memory(&want).expect("decode want").to_rgba8();
        assert_eq!(got_img.as_raw(), want_img.as_raw(), "rendered pixels differ from golden snapshot: {}", snap_path.display());
    } else {
        eprintln!("[snapshot] Missing snapshot {}; set UPDATE_SNAPSHOTS=1 to bless.", snap_path.display());
    }
}
