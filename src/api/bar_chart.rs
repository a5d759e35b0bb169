use indexmap::IndexMap;
use indexmap::map::Entry;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::{
    AxisScale, AxisScaler, BarDataSet, LineSegment, MarkerLine, StackedBarGeometry, bar_center_x,
    bar_index_at, bar_width, layout_stacked_bar,
};
use crate::error::{ChartError, ChartResult};
use crate::interaction::BarSelectionState;

use super::BarChartConfig;

/// Placement of one category's stacked bar in the plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarLayout {
    pub index: usize,
    pub label: String,
    pub center_x: f64,
    pub geometry: StackedBarGeometry,
}

/// Stacked bar chart over named categories, in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    data_sets: IndexMap<String, BarDataSet>,
    config: BarChartConfig,
    marker_lines: Vec<MarkerLine>,
}

impl BarChart {
    pub fn new(data_sets: Vec<BarDataSet>, config: BarChartConfig) -> ChartResult<Self> {
        let config = config
            .validate()
            .inspect_err(|err| warn!(error = %err, "rejecting bar chart config"))?;
        let mut by_label = IndexMap::with_capacity(data_sets.len());
        for data_set in data_sets {
            match by_label.entry(data_set.label().to_owned()) {
                Entry::Occupied(entry) => {
                    warn!(label = entry.key().as_str(), "rejecting duplicate bar label");
                    return Err(ChartError::DuplicateLabel(entry.key().clone()));
                }
                Entry::Vacant(entry) => {
                    entry.insert(data_set);
                }
            }
        }
        debug!(bars = by_label.len(), "bar chart created");

        Ok(Self {
            data_sets: by_label,
            config,
            marker_lines: Vec::new(),
        })
    }

    #[must_use]
    pub fn with_marker_line(mut self, marker_line: MarkerLine) -> Self {
        self.marker_lines.push(marker_line);
        self
    }

    #[must_use]
    pub fn config(&self) -> BarChartConfig {
        self.config
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data_sets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data_sets.is_empty()
    }

    #[must_use]
    pub fn data_set(&self, label: &str) -> Option<&BarDataSet> {
        self.data_sets.get(label)
    }

    #[must_use]
    pub fn data_set_at(&self, index: usize) -> Option<&BarDataSet> {
        self.data_sets.get_index(index).map(|(_, data_set)| data_set)
    }

    pub fn x_axis_labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.data_sets.keys().map(String::as_str)
    }

    /// Axis spanning the lowest negative stack and the highest positive stack.
    #[must_use]
    pub fn y_scale(&self) -> AxisScale {
        let negative_min = self
            .data_sets
            .values()
            .map(|data_set| OrderedFloat(data_set.negative_y_value()))
            .min()
            .map_or(0.0, |value| value.0);
        let positive_max = self
            .data_sets
            .values()
            .map(|data_set| OrderedFloat(data_set.positive_y_value()))
            .max()
            .map_or(0.0, |value| value.0);

        let axis = self.config.y_axis;
        let scale = AxisScaler::for_bar_values(
            negative_min,
            positive_max,
            axis.max_ticks,
            axis.interval_override,
            axis.range_override,
        );
        debug!(
            min = scale.min,
            max = scale.max,
            interval = scale.interval,
            "bar chart y scale"
        );
        scale
    }

    #[must_use]
    pub fn layout(&self, width: f64, height: f64) -> Vec<BarLayout> {
        let axis = self.y_scale().range();
        let count = self.data_sets.len();
        let width_px = bar_width(width, count);

        self.data_sets
            .iter()
            .enumerate()
            .map(|(index, (label, data_set))| BarLayout {
                index,
                label: label.clone(),
                center_x: bar_center_x(index, width, count),
                geometry: layout_stacked_bar(
                    data_set.fractions(),
                    axis,
                    height,
                    width_px,
                    self.config.labels,
                ),
            })
            .collect()
    }

    /// Layout with bars grown to `progress` of their height, for the appear
    /// animation.
    #[must_use]
    pub fn layout_at_progress(&self, width: f64, height: f64, progress: f64) -> Vec<BarLayout> {
        self.layout(width, height)
            .into_iter()
            .map(|bar| BarLayout {
                geometry: bar.geometry.grown(progress),
                ..bar
            })
            .collect()
    }

    #[must_use]
    pub fn marker_segments(&self, width: f64, height: f64) -> Vec<LineSegment> {
        let axis = self.y_scale().range();
        self.marker_lines
            .iter()
            .map(|marker| marker.segment(axis, width, height))
            .collect()
    }

    /// Handles a tap at `pointer_x`: toggles the hit bar in `selection`.
    ///
    /// Returns the hit bar index, or `None` when nothing was hit or
    /// interaction is disabled.
    pub fn tap(
        &self,
        pointer_x: f64,
        width: f64,
        selection: &mut BarSelectionState,
    ) -> Option<usize> {
        if !self.config.allow_user_interaction {
            return None;
        }
        let index = bar_index_at(pointer_x, width, self.data_sets.len())?;
        selection.toggle(index);
        trace!(index, selected = ?selection.selected(), "bar tapped");
        Some(index)
    }
}
