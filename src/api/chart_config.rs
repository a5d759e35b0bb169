use serde::{Deserialize, Serialize};

use crate::core::{AxisRangeOverride, BarLabelSettings, Interpolation};
use crate::error::{ChartError, ChartResult};

/// Y-axis scaling options shared by line and bar charts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisConfig {
    #[serde(default = "default_max_ticks")]
    pub max_ticks: usize,
    #[serde(default)]
    pub interval_override: Option<f64>,
    #[serde(default)]
    pub range_override: AxisRangeOverride,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            max_ticks: default_max_ticks(),
            interval_override: None,
            range_override: AxisRangeOverride::none(),
        }
    }
}

impl AxisConfig {
    #[must_use]
    pub fn with_max_ticks(mut self, max_ticks: usize) -> Self {
        self.max_ticks = max_ticks;
        self
    }

    #[must_use]
    pub fn with_interval(mut self, interval: f64) -> Self {
        self.interval_override = Some(interval);
        self
    }

    /// Replaces either axis bound; `None` keeps the data-derived bound.
    #[must_use]
    pub fn with_range_override(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.range_override = AxisRangeOverride::new(min, max);
        self
    }

    pub fn validate(self) -> ChartResult<Self> {
        if self.max_ticks == 0 {
            return Err(ChartError::InvalidConfig(
                "axis max ticks must be > 0".to_owned(),
            ));
        }
        if let Some(interval) = self.interval_override {
            if !interval.is_finite() || interval <= 0.0 {
                return Err(ChartError::InvalidConfig(
                    "axis interval override must be finite and > 0".to_owned(),
                ));
            }
        }
        let AxisRangeOverride { min, max } = self.range_override;
        if min.is_some_and(|v| !v.is_finite()) || max.is_some_and(|v| !v.is_finite()) {
            return Err(ChartError::InvalidConfig(
                "axis range override bounds must be finite".to_owned(),
            ));
        }
        if let (Some(min), Some(max)) = (min, max) {
            if min > max {
                return Err(ChartError::InvalidConfig(format!(
                    "axis range override min ({min}) must be <= max ({max})"
                )));
            }
        }
        Ok(self)
    }
}

/// Line chart options.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineChartConfig {
    #[serde(default)]
    pub y_axis: AxisConfig,
    #[serde(default)]
    pub interpolation: Interpolation,
    /// Whether the area below the line is filled.
    #[serde(default = "default_true")]
    pub show_area: bool,
    #[serde(default = "default_true")]
    pub allow_user_interaction: bool,
}

impl Default for LineChartConfig {
    fn default() -> Self {
        Self {
            y_axis: AxisConfig::default(),
            interpolation: Interpolation::default(),
            show_area: true,
            allow_user_interaction: true,
        }
    }
}

impl LineChartConfig {
    #[must_use]
    pub fn with_y_axis(mut self, y_axis: AxisConfig) -> Self {
        self.y_axis = y_axis;
        self
    }

    #[must_use]
    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    #[must_use]
    pub fn with_area(mut self, show_area: bool) -> Self {
        self.show_area = show_area;
        self
    }

    #[must_use]
    pub fn with_user_interaction(mut self, enabled: bool) -> Self {
        self.allow_user_interaction = enabled;
        self
    }

    pub fn validate(self) -> ChartResult<Self> {
        self.y_axis.validate()?;
        Ok(self)
    }

    pub fn to_json_pretty(self) -> ChartResult<String> {
        serde_json::to_string_pretty(&self)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to serialize config: {e}")))
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to parse config: {e}")))?;
        config.validate()
    }
}

/// Bar chart options.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarChartConfig {
    #[serde(default)]
    pub y_axis: AxisConfig,
    #[serde(default)]
    pub labels: BarLabelSettings,
    #[serde(default = "default_true")]
    pub allow_user_interaction: bool,
}

impl Default for BarChartConfig {
    fn default() -> Self {
        Self {
            y_axis: AxisConfig::default(),
            labels: BarLabelSettings::default(),
            allow_user_interaction: true,
        }
    }
}

impl BarChartConfig {
    #[must_use]
    pub fn with_y_axis(mut self, y_axis: AxisConfig) -> Self {
        self.y_axis = y_axis;
        self
    }

    /// Sets the label edge margins; labels closer to the plot edge are hidden.
    #[must_use]
    pub fn with_label_margins(mut self, top: f64, bottom: f64) -> Self {
        self.labels.min_top_margin = top;
        self.labels.min_bottom_margin = bottom;
        self
    }

    #[must_use]
    pub fn with_label_offset(mut self, offset_y: f64) -> Self {
        self.labels.label_offset_y = offset_y;
        self
    }

    #[must_use]
    pub fn with_user_interaction(mut self, enabled: bool) -> Self {
        self.allow_user_interaction = enabled;
        self
    }

    pub fn validate(self) -> ChartResult<Self> {
        self.y_axis.validate()?;
        let labels = self.labels;
        if !labels.label_offset_y.is_finite()
            || !labels.min_top_margin.is_finite()
            || !labels.min_bottom_margin.is_finite()
        {
            return Err(ChartError::InvalidConfig(
                "bar label offset and margins must be finite".to_owned(),
            ));
        }
        Ok(self)
    }

    pub fn to_json_pretty(self) -> ChartResult<String> {
        serde_json::to_string_pretty(&self)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to serialize config: {e}")))
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to parse config: {e}")))?;
        config.validate()
    }
}

fn default_max_ticks() -> usize {
    10
}

fn default_true() -> bool {
    true
}
