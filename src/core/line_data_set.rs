use serde::{Deserialize, Serialize};

use crate::core::primitives::ensure_finite;
use crate::core::{DataPoint, ValueRange};
use crate::error::ChartResult;

/// Ordered samples of one line chart.
///
/// Points are expected in ascending `x`; they are kept in the order given.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LineDataSet {
    points: Vec<DataPoint>,
}

impl LineDataSet {
    pub fn try_new(points: Vec<DataPoint>) -> ChartResult<Self> {
        for point in &points {
            ensure_finite(point.x, "data point x")?;
            ensure_finite(point.y, "data point y")?;
        }
        Ok(Self { points })
    }

    #[must_use]
    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Range of the x values; `[0, 0]` for an empty set.
    #[must_use]
    pub fn x_range(&self) -> ValueRange {
        ValueRange::from_values(self.points.iter().map(|p| p.x))
            .unwrap_or(ValueRange::new(0.0, 0.0))
    }

    /// Range of the y values; `[0, 0]` for an empty set.
    #[must_use]
    pub fn y_range(&self) -> ValueRange {
        ValueRange::from_values(self.points.iter().map(|p| p.y))
            .unwrap_or(ValueRange::new(0.0, 0.0))
    }
}
