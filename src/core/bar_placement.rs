use crate::core::primitives::finite_or;

/// Narrowest bar the placement ever returns.
pub const MIN_BAR_WIDTH: f64 = 0.1;

/// Width of each bar when `count` bars share `total_width`.
///
/// Bars take half of the width; the other half is spread as spacers.
#[must_use]
pub fn bar_width(total_width: f64, count: usize) -> f64 {
    let total_width = finite_or(total_width, 0.0).max(0.0);
    (total_width * 0.5 / count.max(1) as f64).max(MIN_BAR_WIDTH)
}

/// Horizontal centre of bar `index`, with equal spacers before, between and
/// after the bars.
#[must_use]
pub fn bar_center_x(index: usize, total_width: f64, count: usize) -> f64 {
    let total_width = finite_or(total_width, 0.0).max(0.0);
    let width = bar_width(total_width, count);
    let count = count.max(1) as f64;
    let spacer = (total_width - width * count) / (count + 1.0);
    spacer + width * 0.5 + index as f64 * (spacer + width)
}

/// Index of the bar whose horizontal extent contains `pointer_x`.
#[must_use]
pub fn bar_index_at(pointer_x: f64, total_width: f64, count: usize) -> Option<usize> {
    if count == 0 || !pointer_x.is_finite() {
        return None;
    }
    let half = bar_width(total_width, count) * 0.5;
    (0..count).find(|&index| {
        let center = bar_center_x(index, total_width, count);
        pointer_x >= center - half && pointer_x <= center + half
    })
}
