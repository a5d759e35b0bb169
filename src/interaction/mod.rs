use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::scale::to_pixel;
use crate::core::{DataPoint, ValueRange};

/// Outcome of resolving a pointer position against a line's data points.
///
/// Hosts decide whether to store it; [`SelectionState::apply`] is the only
/// write path into selection state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionUpdate {
    pub fractional_index: f64,
    pub snapped_index: usize,
}

/// Currently selected data point of an interactive line chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelectionState {
    selected_index: usize,
}

impl SelectionState {
    #[must_use]
    pub fn new(selected_index: usize) -> Self {
        Self { selected_index }
    }

    #[must_use]
    pub fn selected_index(self) -> usize {
        self.selected_index
    }

    pub fn apply(&mut self, update: SelectionUpdate) {
        self.selected_index = update.snapped_index;
    }
}

/// Selected bar of a bar chart; tapping the selected bar clears it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BarSelectionState {
    selected: Option<usize>,
}

impl BarSelectionState {
    #[must_use]
    pub fn selected(self) -> Option<usize> {
        self.selected
    }

    /// Selects `index`, or clears the selection when `index` is already selected.
    pub fn toggle(&mut self, index: usize) {
        self.selected = if self.selected == Some(index) {
            None
        } else {
            Some(index)
        };
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }
}

/// Continuous index of `pointer_x` along the projected data points.
///
/// A pointer exactly on a point yields that point's index; between two points
/// it yields the lower index plus the linear fraction towards the next one.
/// Pointers outside every bracket (left of the first or right of the last
/// point) yield `0`.
#[must_use]
pub fn fractional_index(
    pointer_x: f64,
    points: &[DataPoint],
    scale_x: ValueRange,
    width: f64,
) -> f64 {
    if !pointer_x.is_finite() {
        return 0.0;
    }

    let mut previous: Option<f64> = None;
    for (index, point) in points.iter().enumerate() {
        let current = to_pixel(point.x, scale_x, width);
        if pointer_x == current {
            return index as f64;
        }
        if let Some(last) = previous {
            if pointer_x > last && pointer_x < current {
                let fraction = (pointer_x - last) / (current - last);
                return (index - 1) as f64 + fraction;
            }
        }
        previous = Some(current);
    }

    trace!(pointer_x, "pointer outside data brackets, falling back to index 0");
    0.0
}

/// Nearest discrete index for `fractional`, rounding half up, within
/// `[0, count - 1]`.
#[must_use]
pub fn snap_to_index(fractional: f64, count: usize) -> usize {
    if count == 0 || !fractional.is_finite() || fractional <= 0.0 {
        return 0;
    }
    let last = count - 1;
    let whole = fractional.floor();
    let snapped = if fractional - whole >= 0.5 {
        whole + 1.0
    } else {
        whole
    };
    if snapped >= last as f64 {
        last
    } else {
        snapped as usize
    }
}

/// Resolves a pointer release into a selection update.
#[must_use]
pub fn resolve_selection(
    pointer_x: f64,
    points: &[DataPoint],
    scale_x: ValueRange,
    width: f64,
) -> SelectionUpdate {
    let fractional_index = fractional_index(pointer_x, points, scale_x, width);
    SelectionUpdate {
        fractional_index,
        snapped_index: snap_to_index(fractional_index, points.len()),
    }
}
