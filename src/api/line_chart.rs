use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::{
    AxisScale, AxisScaler, LineDataSet, LinePath, LineSegment, Point, ValueRange, build_line_path,
    project_points,
};
use crate::error::ChartResult;
use crate::interaction::{SelectionState, SelectionUpdate, resolve_selection};

use super::LineChartConfig;

/// Guide lines from the selected point to both axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectedPointGuides {
    /// From the point down to the x-axis.
    pub vertical: LineSegment,
    /// From the y-axis across to the point.
    pub horizontal: LineSegment,
}

/// One line data set plus its configuration.
///
/// Every method recomputes from the current snapshot; nothing is cached
/// between render passes.
#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    data: LineDataSet,
    config: LineChartConfig,
}

impl LineChart {
    pub fn new(data: LineDataSet, config: LineChartConfig) -> ChartResult<Self> {
        let config = config
            .validate()
            .inspect_err(|err| warn!(error = %err, "rejecting line chart config"))?;
        debug!(points = data.len(), "line chart created");
        Ok(Self { data, config })
    }

    #[must_use]
    pub fn data(&self) -> &LineDataSet {
        &self.data
    }

    #[must_use]
    pub fn config(&self) -> LineChartConfig {
        self.config
    }

    /// Replaces the data snapshot.
    pub fn set_data(&mut self, data: LineDataSet) {
        debug!(points = data.len(), "line chart data replaced");
        self.data = data;
    }

    #[must_use]
    pub fn x_range(&self) -> ValueRange {
        self.data.x_range()
    }

    #[must_use]
    pub fn y_scale(&self) -> AxisScale {
        let axis = self.config.y_axis;
        let scale = AxisScaler::compute(
            self.data.y_range(),
            axis.max_ticks,
            axis.interval_override,
            axis.range_override,
        );
        debug!(
            min = scale.min,
            max = scale.max,
            interval = scale.interval,
            "line chart y scale"
        );
        scale
    }

    #[must_use]
    pub fn line_path(&self, width: f64, height: f64) -> LinePath {
        self.path(width, height, false)
    }

    /// Closed area below the line, or `None` when the area is disabled.
    #[must_use]
    pub fn area_path(&self, width: f64, height: f64) -> Option<LinePath> {
        self.config
            .show_area
            .then(|| self.path(width, height, true))
    }

    /// Line drawn up to `progress` of its length, for the appear animation.
    #[must_use]
    pub fn line_path_at_progress(&self, width: f64, height: f64, progress: f64) -> LinePath {
        self.line_path(width, height).trimmed(progress)
    }

    #[must_use]
    pub fn point_positions(&self, width: f64, height: f64) -> Vec<Point> {
        project_points(
            self.data.points(),
            self.x_range(),
            self.y_scale().range(),
            width,
            height,
        )
    }

    /// Resolves the drag position at pointer release.
    ///
    /// Returns `None` when interaction is disabled or there is no data.
    #[must_use]
    pub fn resolve_release(&self, drag_x: f64, width: f64) -> Option<SelectionUpdate> {
        if !self.config.allow_user_interaction || self.data.is_empty() {
            return None;
        }
        let update = resolve_selection(drag_x, self.data.points(), self.x_range(), width);
        trace!(
            drag_x,
            fractional_index = update.fractional_index,
            snapped_index = update.snapped_index,
            "resolved selection"
        );
        Some(update)
    }

    /// Selector position: at the drag position while dragging, otherwise at
    /// the selected point. `y` follows the line path.
    #[must_use]
    pub fn selector_position(
        &self,
        selection: SelectionState,
        drag_x: Option<f64>,
        width: f64,
        height: f64,
    ) -> Option<Point> {
        let selected = self.selected_point(selection, width, height)?;
        let x = drag_x.filter(|x| x.is_finite()).unwrap_or(selected.x);
        let y = self
            .line_path(width, height)
            .point_at(x)
            .unwrap_or(selected.y);
        Some(Point::new(x, y))
    }

    #[must_use]
    pub fn selected_point_guides(
        &self,
        selection: SelectionState,
        width: f64,
        height: f64,
    ) -> Option<SelectedPointGuides> {
        let point = self.selected_point(selection, width, height)?;
        Some(SelectedPointGuides {
            vertical: LineSegment::between(point, Point::new(point.x, height.max(0.0))),
            horizontal: LineSegment::between(Point::new(0.0, point.y), point),
        })
    }

    fn selected_point(&self, selection: SelectionState, width: f64, height: f64) -> Option<Point> {
        let last = self.data.len().checked_sub(1)?;
        let index = selection.selected_index().min(last);
        let point = self.data.points()[index];
        project_points(&[point], self.x_range(), self.y_scale().range(), width, height)
            .first()
            .copied()
    }

    fn path(&self, width: f64, height: f64, close_shape: bool) -> LinePath {
        build_line_path(
            self.data.points(),
            self.x_range(),
            self.y_scale().range(),
            width,
            height,
            self.config.interpolation,
            close_shape,
        )
    }
}
