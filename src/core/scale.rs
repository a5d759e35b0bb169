use serde::{Deserialize, Serialize};

use crate::core::ValueRange;

/// Maps `value` from `range` onto `[0, length]`.
///
/// Values outside the range land outside `[0, length]`; nothing is clipped.
/// A non-finite or non-positive `length` collapses every value to `0`.
#[must_use]
pub fn to_pixel(value: f64, range: ValueRange, length: f64) -> f64 {
    if !length.is_finite() || length <= 0.0 || !value.is_finite() {
        return 0.0;
    }
    (value - range.min) / range.span() * length
}

/// Inverse of [`to_pixel`].
///
/// A non-finite or non-positive `length` maps every pixel to `range.min`.
#[must_use]
pub fn to_value(pixel: f64, range: ValueRange, length: f64) -> f64 {
    if !length.is_finite() || length <= 0.0 || !pixel.is_finite() {
        return range.min;
    }
    range.min + pixel / length * range.span()
}

/// A value range bound to a pixel extent.
///
/// `inverted` mappings measure from the far end, which is how y-axes map data
/// onto a top-left pixel origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearMapping {
    range: ValueRange,
    length: f64,
    inverted: bool,
}

impl LinearMapping {
    #[must_use]
    pub fn new(range: ValueRange, length: f64) -> Self {
        Self {
            range,
            length,
            inverted: false,
        }
    }

    /// Mapping for a vertical axis whose pixel origin is at the top.
    #[must_use]
    pub fn vertical(range: ValueRange, height: f64) -> Self {
        Self {
            range,
            length: height,
            inverted: true,
        }
    }

    #[must_use]
    pub fn range(self) -> ValueRange {
        self.range
    }

    #[must_use]
    pub fn length(self) -> f64 {
        self.length
    }

    #[must_use]
    pub fn to_pixel(self, value: f64) -> f64 {
        let pixel = to_pixel(value, self.range, self.length);
        if self.inverted {
            self.safe_length() - pixel
        } else {
            pixel
        }
    }

    #[must_use]
    pub fn to_value(self, pixel: f64) -> f64 {
        let pixel = if self.inverted {
            self.safe_length() - pixel
        } else {
            pixel
        };
        to_value(pixel, self.range, self.length)
    }

    fn safe_length(self) -> f64 {
        if self.length.is_finite() && self.length > 0.0 {
            self.length
        } else {
            0.0
        }
    }
}
