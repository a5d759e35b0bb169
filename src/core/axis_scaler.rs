use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::core::ValueRange;

/// Multipliers of `10^k` an axis interval may use.
const NICE_MULTIPLIERS: [f64; 4] = [1.0, 2.0, 5.0, 10.0];

/// Relative slack for float noise when comparing against interval multiples.
const SNAP_TOLERANCE: f64 = 1e-9;

/// Smallest derived interval relative to the magnitude of the axis bounds.
/// Finer steps are not representable next to large values.
const MIN_RELATIVE_INTERVAL: f64 = 1e-12;

/// Upper bound for the requested tick count.
pub const MAX_AXIS_TICKS: usize = 1_000;

/// Most intervals an override may produce, per requested tick.
pub const OVERRIDE_STEP_FACTOR: usize = 100;

/// Largest axis bound magnitude. Spans and snapped bounds stay finite below it.
pub const MAX_AXIS_MAGNITUDE: f64 = 1e300;

/// Lower bound for the upper axis value of bar charts, so charts with only
/// negative (or no) values still get a positive axis span.
pub const BAR_AXIS_MIN_UPPER_BOUND: f64 = 0.1;

/// Per-bound replacement for the data-derived axis range.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisRangeOverride {
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
}

impl AxisRangeOverride {
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    fn apply(self, range: ValueRange) -> ValueRange {
        let min = self.min.filter(|v| v.is_finite()).unwrap_or(range.min);
        let max = self.max.filter(|v| v.is_finite()).unwrap_or(range.max);
        ValueRange::new(min, max)
    }
}

/// Rounded axis bounds with a human-readable tick interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisScale {
    pub min: f64,
    pub max: f64,
    pub interval: f64,
    /// Number of tick positions, both ends included.
    pub tick_count: usize,
}

impl AxisScale {
    #[must_use]
    pub fn range(self) -> ValueRange {
        ValueRange::new(self.min, self.max)
    }

    /// Tick values from `min` to `max`.
    #[must_use]
    pub fn ticks(self) -> Vec<f64> {
        (0..self.tick_count)
            .map(|i| self.min + i as f64 * self.interval)
            .collect()
    }
}

pub struct AxisScaler;

impl AxisScaler {
    /// Computes a nice axis scale covering `range`.
    ///
    /// `range_override` replaces either bound, `interval_override` replaces the
    /// derived interval when it is finite, positive and yields at most
    /// `max_ticks * OVERRIDE_STEP_FACTOR` intervals. `max_ticks` is clamped to
    /// `[1, MAX_AXIS_TICKS]` and both bounds to `±MAX_AXIS_MAGNITUDE`.
    #[must_use]
    pub fn compute(
        range: ValueRange,
        max_ticks: usize,
        interval_override: Option<f64>,
        range_override: AxisRangeOverride,
    ) -> AxisScale {
        let max_ticks = max_ticks.clamp(1, MAX_AXIS_TICKS);
        let range = clamp_magnitude(range_override.apply(sanitize(range)));
        let max_steps = (max_ticks * OVERRIDE_STEP_FACTOR) as f64;

        let scale = match interval_override {
            Some(interval) if !interval.is_finite() || interval <= 0.0 => {
                warn!(interval, "ignoring invalid axis interval override");
                None
            }
            Some(interval) => {
                let snapped = snap(range, interval, max_steps);
                if snapped.is_none() {
                    warn!(
                        interval,
                        max_steps,
                        "axis interval override yields too many ticks, using derived interval"
                    );
                }
                snapped
            }
            None => None,
        };
        let scale = scale
            .or_else(|| snap(range, derived_interval(range, max_ticks), max_steps))
            .unwrap_or_else(|| unit_scale(range));

        trace!(
            min = scale.min,
            max = scale.max,
            interval = scale.interval,
            tick_count = scale.tick_count,
            "computed axis scale"
        );
        scale
    }

    /// Axis scale for stacked bars: spans the most negative and most positive
    /// stack, with the upper bound kept at least [`BAR_AXIS_MIN_UPPER_BOUND`].
    #[must_use]
    pub fn for_bar_values(
        negative_min: f64,
        positive_max: f64,
        max_ticks: usize,
        interval_override: Option<f64>,
        range_override: AxisRangeOverride,
    ) -> AxisScale {
        let range = ValueRange::new(
            negative_min.min(0.0),
            positive_max.max(BAR_AXIS_MIN_UPPER_BOUND),
        );
        Self::compute(range, max_ticks, interval_override, range_override)
    }
}

/// Rounds `raw_step` up to the next value of the form `{1, 2, 5, 10} x 10^k`.
///
/// Non-finite or non-positive steps fall back to `1`.
#[must_use]
pub fn nice_interval(raw_step: f64) -> f64 {
    if !raw_step.is_finite() || raw_step <= 0.0 {
        return 1.0;
    }

    let exponent = raw_step.log10().floor() as i32;
    let base = 10f64.powi(exponent);
    NICE_MULTIPLIERS
        .iter()
        .map(|multiplier| multiplier * base)
        .find(|candidate| *candidate >= raw_step * (1.0 - SNAP_TOLERANCE))
        .unwrap_or(10.0 * base)
}

fn derived_interval(range: ValueRange, max_ticks: usize) -> f64 {
    if range.is_degenerate() {
        if range.min == 0.0 {
            1.0
        } else {
            nice_interval(range.min.abs() / max_ticks as f64)
        }
    } else {
        let resolution = range.min.abs().max(range.max.abs()) * MIN_RELATIVE_INTERVAL;
        nice_interval(((range.max - range.min) / max_ticks as f64).max(resolution))
    }
}

/// Snaps the bounds outward to multiples of `interval`.
///
/// Degenerate ranges are widened to one interval centred on the value first.
/// Returns `None` when the result needs more than `max_steps` intervals or
/// leaves the finite range.
fn snap(range: ValueRange, interval: f64, max_steps: f64) -> Option<AxisScale> {
    let (lower, upper) = if range.is_degenerate() {
        (range.min - interval * 0.5, range.min + interval * 0.5)
    } else {
        (range.min, range.max)
    };

    // Interval units: `upper - lower` may not be representable.
    let first = (lower / interval + SNAP_TOLERANCE).floor();
    let mut last = (upper / interval - SNAP_TOLERANCE).ceil();
    if last <= first {
        last = first + 1.0;
    }
    let steps = last - first;
    if !steps.is_finite() || steps > max_steps {
        return None;
    }

    let min = first * interval;
    let max = last * interval;
    if !min.is_finite() || !max.is_finite() || !(max - min).is_finite() {
        return None;
    }
    Some(AxisScale {
        min,
        max,
        interval,
        tick_count: (steps.round() as usize).saturating_add(1),
    })
}

/// Last-resort scale over the raw range with a single interval.
fn unit_scale(range: ValueRange) -> AxisScale {
    let interval = range.span();
    AxisScale {
        min: range.min,
        max: range.min + interval,
        interval,
        tick_count: 2,
    }
}

fn clamp_magnitude(range: ValueRange) -> ValueRange {
    ValueRange::new(
        range.min.clamp(-MAX_AXIS_MAGNITUDE, MAX_AXIS_MAGNITUDE),
        range.max.clamp(-MAX_AXIS_MAGNITUDE, MAX_AXIS_MAGNITUDE),
    )
}

fn sanitize(range: ValueRange) -> ValueRange {
    match (range.min.is_finite(), range.max.is_finite()) {
        (true, true) => range,
        (true, false) => ValueRange::new(range.min, range.min),
        (false, true) => ValueRange::new(range.max, range.max),
        (false, false) => ValueRange::new(0.0, 0.0),
    }
}
