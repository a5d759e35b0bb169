mod bar_chart;
mod chart_config;
mod json_contract;
mod line_chart;

pub use bar_chart::{BarChart, BarLayout};
pub use chart_config::{AxisConfig, BarChartConfig, LineChartConfig};
pub use json_contract::{CHART_CONFIG_JSON_SCHEMA_V1, ChartConfigJsonContractV1, ChartKindConfig};
pub use line_chart::{LineChart, SelectedPointGuides};
