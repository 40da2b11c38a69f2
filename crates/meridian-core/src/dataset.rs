// File: crates/meridian-core/src/dataset.rs
// Summary: XY dataset interface consumed by axes/renderers, plus an in-memory keyed-series implementation.

use std::collections::HashMap;

use crate::ticks::Symbol;

/// Property key holding the x-axis symbol table.
pub const X_SYMBOLS: &str = "x-symbols";
/// Property key holding the y-axis symbol table.
pub const Y_SYMBOLS: &str = "y-symbols";

/// Read-only view of ordered series of `(x, y)` items.
///
/// Bounds follow the "no data" convention `(+inf, -inf)` so callers can fold
/// them with `min`/`max` and detect emptiness by `min > max`.
pub trait XYDataset {
    fn series_count(&self) -> usize;
    fn series_key(&self, series: usize) -> &str;
    fn item_count(&self, series: usize) -> usize;
    fn x(&self, series: usize, item: usize) -> f64;
    fn y(&self, series: usize, item: usize) -> f64;
    fn x_bounds(&self) -> (f64, f64);
    fn y_bounds(&self) -> (f64, f64);

    /// Symbol table stored under `key` ([`X_SYMBOLS`] / [`Y_SYMBOLS`]).
    fn symbols(&self, _key: &str) -> Option<&[Symbol]> {
        None
    }

    fn total_item_count(&self) -> usize {
        (0..self.series_count()).map(|s| self.item_count(s)).sum()
    }
}

/// One keyed series.
#[derive(Clone, Debug, Default)]
pub struct DataSeries {
    key: String,
    items: Vec<(f64, f64)>,
}

impl DataSeries {
    pub fn new(key: impl Into<String>, items: Vec<(f64, f64)>) -> Self {
        Self { key: key.into(), items }
    }
    pub fn key(&self) -> &str { &self.key }
    pub fn items(&self) -> &[(f64, f64)] { &self.items }
    pub fn len(&self) -> usize { self.items.len() }
    pub fn is_empty(&self) -> bool { self.items.is_empty() }
}

/// In-memory dataset with incrementally tracked bounds.
#[derive(Clone, Debug)]
pub struct SeriesDataset {
    series: Vec<DataSeries>,
    properties: HashMap<String, Vec<Symbol>>,
    x_bounds: (f64, f64),
    y_bounds: (f64, f64),
}

impl SeriesDataset {
    pub fn new() -> Self {
        Self {
            series: Vec::new(),
            properties: HashMap::new(),
            x_bounds: (f64::INFINITY, f64::NEG_INFINITY),
            y_bounds: (f64::INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Append a series and return its index.
    pub fn add_series(&mut self, series: DataSeries) -> usize {
        for &(x, y) in &series.items {
            self.update_bounds(x, y);
        }
        self.series.push(series);
        self.series.len() - 1
    }

    /// Append an item to an existing series; returns `false` for an unknown index.
    pub fn push(&mut self, series: usize, x: f64, y: f64) -> bool {
        let Some(s) = self.series.get_mut(series) else {
            return false;
        };
        s.items.push((x, y));
        self.update_bounds(x, y);
        true
    }

    /// Store a symbol table (sorted ascending by value, duplicates dropped).
    pub fn set_symbols(&mut self, key: impl Into<String>, mut symbols: Vec<Symbol>) {
        symbols.retain(|s| s.value.is_finite());
        symbols.sort_by(|a, b| a.value.total_cmp(&b.value));
        symbols.dedup_by(|a, b| a.value == b.value);
        self.properties.insert(key.into(), symbols);
    }

    pub fn series(&self) -> &[DataSeries] { &self.series }

    pub fn clear(&mut self) {
        self.series.clear();
        self.x_bounds = (f64::INFINITY, f64::NEG_INFINITY);
        self.y_bounds = (f64::INFINITY, f64::NEG_INFINITY);
    }

    fn update_bounds(&mut self, x: f64, y: f64) {
        // Non-finite values never widen the bounds.
        if x.is_finite() {
            self.x_bounds = (self.x_bounds.0.min(x), self.x_bounds.1.max(x));
        }
        if y.is_finite() {
            self.y_bounds = (self.y_bounds.0.min(y), self.y_bounds.1.max(y));
        }
    }
}

impl Default for SeriesDataset {
    fn default() -> Self { Self::new() }
}

impl XYDataset for SeriesDataset {
    fn series_count(&self) -> usize { self.series.len() }
    fn series_key(&self, series: usize) -> &str { &self.series[series].key }
    fn item_count(&self, series: usize) -> usize { self.series.get(series).map_or(0, DataSeries::len) }
    fn x(&self, series: usize, item: usize) -> f64 { self.series[series].items[item].0 }
    fn y(&self, series: usize, item: usize) -> f64 { self.series[series].items[item].1 }
    fn x_bounds(&self) -> (f64, f64) { self.x_bounds }
    fn y_bounds(&self) -> (f64, f64) { self.y_bounds }

    fn symbols(&self, key: &str) -> Option<&[Symbol]> {
        self.properties.get(key).map(Vec::as_slice)
    }
}
