pub mod axis_scaler;
pub mod bar_placement;
pub mod line_data_set;
pub mod line_path;
pub mod marker;
pub mod primitives;
pub mod scale;
pub mod stacked_bar;
pub mod types;

pub use axis_scaler::{
    AxisRangeOverride, AxisScale, AxisScaler, MAX_AXIS_MAGNITUDE, MAX_AXIS_TICKS,
    OVERRIDE_STEP_FACTOR, nice_interval,
};
pub use bar_placement::{bar_center_x, bar_index_at, bar_width};
pub use line_data_set::LineDataSet;
pub use line_path::{Interpolation, LinePath, PathSegment, build_line_path, project_points};
pub use marker::MarkerLine;
pub use primitives::MIN_SPAN;
pub use scale::{LinearMapping, to_pixel, to_value};
pub use stacked_bar::{
    BarDataSet, BarFraction, BarLabelSettings, FractionLayout, SignGroup, StackedBarGeometry,
    layout_stacked_bar,
};
pub use types::{DataPoint, LineSegment, Point, ValueRange};
