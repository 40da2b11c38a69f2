// File: crates/meridian-core/src/lib.rs
// Summary: Core library entry point; exports axes, tick selection, scheduling, surfaces and the XY plot.

pub mod error;
pub mod geometry;
pub mod types;
pub mod range;
pub mod ticks;
pub mod dataset;
pub mod axis;
pub mod space;
pub mod surface;
pub mod text;
pub mod theme;
pub mod task;
pub mod renderer;
pub mod scheduler;
pub mod plot;

pub use error::{ChartError, ChartResult};
pub use geometry::{Rect, RectangleEdge, Size, TextAnchor};
pub use types::{Color, Font, Insets, Stroke};
pub use range::ValueRange;
pub use ticks::{Symbol, TickFormat, TickMark, TickSelector};
pub use dataset::{DataSeries, SeriesDataset, XYDataset, X_SYMBOLS, Y_SYMBOLS};
pub use axis::{Axis, AxisChange, AxisFormatter, AxisKind, AxisStyle, ListenerId};
pub use space::AxisSpace;
pub use surface::{DrawOp, Layer, PathData, RasterSurface, RecordingSurface, Surface, SvgSurface, TextMetrics};
pub use text::TextShaper;
pub use theme::Theme;
pub use task::{Clock, ManualClock, ManualQueue, SystemClock, TaskHandle, TaskQueue};
pub use renderer::{LineRenderer, RenderContext, ScatterRenderer, XYRenderer};
pub use scheduler::{next_position, Cursor, DrawStatus, RenderScheduler, SchedulerConfig};
pub use plot::{RenderOptions, XYPlot};
