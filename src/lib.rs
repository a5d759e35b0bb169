//! chart-geometry: geometry and interaction engine for bar and line charts.
//!
//! The engine turns data into renderer-agnostic output: nice axis scales,
//! pixel-space paths, stacked bar rectangles and selection indices. Hosts own
//! drawing, animation timing and selection state.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod telemetry;

pub use api::{BarChart, BarChartConfig, LineChart, LineChartConfig};
pub use error::{ChartError, ChartResult};
