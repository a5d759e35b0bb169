use serde::{Deserialize, Serialize};

use crate::core::scale::LinearMapping;
use crate::core::{LineSegment, Point, ValueRange};

/// Horizontal reference line at a fixed axis value, e.g. a target value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerLine {
    pub value: f64,
    #[serde(default)]
    pub label: Option<String>,
}

impl MarkerLine {
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self { value, label: None }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Segment spanning the plot width at the marker's y pixel.
    #[must_use]
    pub fn segment(&self, axis: ValueRange, width: f64, height: f64) -> LineSegment {
        let y = LinearMapping::vertical(axis, height).to_pixel(self.value);
        LineSegment::between(Point::new(0.0, y), Point::new(width.max(0.0), y))
    }
}
