// File: crates/demo/src/main.rs
// Summary: Demo loads an x,y CSV (or synthesizes a large dataset), renders it progressively and writes PNG/SVG frames.

use anyhow::{Context, Result};
use meridian_core::{
    Axis, DataSeries, DrawStatus, ManualQueue, RasterSurface, RenderOptions, ScatterRenderer, SeriesDataset,
    theme, XYDataset, XYPlot,
};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Accept a CSV path from the CLI, else synthesize a dataset big enough to draw progressively.
    let (dataset, stem) = match std::env::args().nth(1) {
        Some(raw) => {
            let (path, used_alt) = resolve_path(&raw)?;
            info!(path = %path.display(), used_alt, "using input file");
            let ds = load_xy_csv(&path).with_context(|| format!("failed to load CSV '{}'", path.display()))?;
            let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("plot").to_string();
            (ds, stem)
        }
        None => (synthetic(3, 100_000), "synthetic".to_string()),
    };

    let total = dataset.total_item_count();
    if total == 0 {
        anyhow::bail!("no rows loaded; check headers/delimiter.");
    }
    let (x_lo, x_hi) = dataset.x_bounds();
    let (y_lo, y_hi) = dataset.y_bounds();
    info!(series = dataset.series_count(), items = total, x_lo, x_hi, y_lo, y_hi, "dataset ready");

    let theme_name = std::env::var("MERIDIAN_THEME").unwrap_or_else(|_| "dark".to_string());
    let mut plot = XYPlot::new(
        Box::new(dataset),
        Box::new(ScatterRenderer { radius: 1.5 }),
        Axis::linear("X"),
        Axis::linear("Y"),
    )
    .with_theme(theme::find(&theme_name));

    let opts = RenderOptions::default();
    let mut surface = RasterSurface::new(opts.width, opts.height, plot.theme().background)?;
    let mut queue = ManualQueue::new();

    // Host loop: fire due continuations until the scheduler reports completion.
    let mut status = plot.draw(&mut surface, &mut queue, &opts);
    let mut frame = 0usize;
    while let DrawStatus::Pending(handle) = status {
        if frame == 0 {
            let out = out_name_with(&stem, "progress");
            surface.save_png(&out)?;
            info!(path = %out.display(), "wrote in-progress frame");
        }
        frame += 1;
        if queue.pop_next() != Some(handle) {
            warn!(task = handle.id(), "continuation missing from queue");
            break;
        }
        status = plot.resume(handle, &mut surface, &mut queue);
    }
    info!(continuations = frame, chunk_size = plot.scheduler().chunk_size(), virtual_ms = queue.now().as_millis() as u64, "render complete");

    let out = out_name_with(&stem, "full");
    surface.save_png(&out)?;
    info!(path = %out.display(), "wrote");

    // Zoom into the middle of the x range and export synchronously.
    let mid = 0.5 * (plot.x_axis.lower_bound() + plot.x_axis.upper_bound());
    plot.zoom_x(0.25, mid);
    let out_zoom = out_name_with(&stem, "zoom");
    plot.render_to_png(&opts, &out_zoom)?;
    plot.render_to_svg(&opts, out_zoom.with_extension("svg"))?;
    info!(path = %out_zoom.display(), "wrote");

    Ok(())
}

/// Resolve path, trying .csv/.cvs swap if needed.
/// Returns (actual_path, used_alt)
fn resolve_path(raw: &str) -> Result<(PathBuf, bool)> {
    let p = Path::new(raw);
    if p.exists() {
        return Ok((p.to_path_buf(), false));
    }
    if let Some(alt) = swap_ext(p) {
        if alt.exists() {
            return Ok((alt, true));
        }
    }
    anyhow::bail!("file not found: {}", p.display());
}

fn swap_ext(p: &Path) -> Option<PathBuf> {
    let mut alt = p.to_path_buf();
    let ext = p.extension()?.to_string_lossy().to_lowercase();
    match ext.as_str() {
        "cvs" => {
            alt.set_extension("csv");
            Some(alt)
        }
        "csv" => {
            alt.set_extension("cvs");
            Some(alt)
        }
        _ => None,
    }
}

/// Produce output file name like target/out/plot_<stem>_<suffix>.png
fn out_name_with(stem: &str, suffix: &str) -> PathBuf {
    let short = stem.split('_').take(3).collect::<Vec<_>>().join("_");
    let mut out = PathBuf::from("target/out");
    std::fs::create_dir_all(&out).ok();
    if short.is_empty() {
        out.push(format!("plot_{suffix}.png"));
    } else {
        out.push(format!("plot_{short}_{suffix}.png"));
    }
    out
}

/// Load `x,y[,series]` rows. Header names are matched loosely; rows that do
/// not parse are skipped. Without a series column everything lands in one series.
fn load_xy_csv(path: &Path) -> Result<SeriesDataset> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = rdr
        .headers()?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect::<Vec<_>>();
    info!(?headers, "csv headers");

    let idx = |names: &[&str]| headers.iter().position(|h| names.contains(&h.as_str()));
    let i_x = idx(&["x", "time", "timestamp", "index"]).unwrap_or(0);
    let i_y = idx(&["y", "value", "close"]).unwrap_or(1);
    let i_series = idx(&["series", "key", "name"]);

    let mut ds = SeriesDataset::new();
    let mut keys: Vec<String> = Vec::new();
    let mut skipped = 0usize;
    for rec in rdr.records() {
        let rec = rec?;
        let parse = |i: usize| rec.get(i).and_then(|s| s.trim().parse::<f64>().ok());
        let (Some(x), Some(y)) = (parse(i_x), parse(i_y)) else {
            skipped += 1;
            continue;
        };
        let key = i_series.and_then(|i| rec.get(i)).unwrap_or("data").trim();
        let series = match keys.iter().position(|k| k == key) {
            Some(s) => s,
            None => {
                keys.push(key.to_string());
                ds.add_series(DataSeries::new(key, Vec::new()))
            }
        };
        ds.push(series, x, y);
    }
    if skipped > 0 {
        warn!(skipped, "rows without numeric x/y were skipped");
    }
    Ok(ds)
}

/// `series` noisy sine waves of `items` points each.
fn synthetic(series: usize, items: usize) -> SeriesDataset {
    let mut ds = SeriesDataset::new();
    for s in 0..series {
        let phase = s as f64 * 0.9;
        let data = (0..items)
            .map(|i| {
                let x = i as f64 * 0.01;
                let jitter = ((i * 7919 + s * 104_729) % 1000) as f64 / 1000.0 - 0.5;
                (x, (x * 0.7 + phase).sin() * (3.0 + s as f64) + jitter)
            })
            .collect();
        ds.add_series(DataSeries::new(format!("wave-{s}"), data));
    }
    ds
}
