use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::primitives::{decimal_to_f64, ensure_finite, finite_or};
use crate::core::scale::to_pixel;
use crate::core::ValueRange;
use crate::error::{ChartError, ChartResult};

/// Largest height a sign group is laid out with. Leaves headroom so offsets,
/// centres and the combined height stay finite.
const MAX_GROUP_HEIGHT: f64 = f64::MAX / 8.0;

/// One signed component of a stacked bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarFraction {
    pub value: f64,
}

impl BarFraction {
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self { value }
    }

    pub fn from_decimal(value: Decimal) -> ChartResult<Self> {
        Ok(Self {
            value: decimal_to_f64(value, "fraction")?,
        })
    }

    #[must_use]
    pub fn sign(self) -> SignGroup {
        if self.value >= 0.0 {
            SignGroup::Positive
        } else {
            SignGroup::Negative
        }
    }
}

/// Partition a fraction stacks in. Zero counts as positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignGroup {
    Positive,
    Negative,
}

/// A named bar category made of signed fractions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarDataSet {
    label: String,
    fractions: Vec<BarFraction>,
}

impl BarDataSet {
    pub fn try_new(label: impl Into<String>, fractions: Vec<BarFraction>) -> ChartResult<Self> {
        let label = label.into();
        for fraction in &fractions {
            ensure_finite(fraction.value, "bar fraction value")?;
        }
        let data_set = Self { label, fractions };
        if !data_set.positive_y_value().is_finite() || !data_set.negative_y_value().is_finite() {
            return Err(ChartError::InvalidData(format!(
                "bar fractions of `{}` sum beyond the f64 range",
                data_set.label
            )));
        }
        Ok(data_set)
    }

    pub fn from_values(label: impl Into<String>, values: &[f64]) -> ChartResult<Self> {
        Self::try_new(label, values.iter().copied().map(BarFraction::new).collect())
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn fractions(&self) -> &[BarFraction] {
        &self.fractions
    }

    pub fn positive_fractions(&self) -> impl Iterator<Item = BarFraction> + '_ {
        self.fractions
            .iter()
            .copied()
            .filter(|f| f.sign() == SignGroup::Positive)
    }

    pub fn negative_fractions(&self) -> impl Iterator<Item = BarFraction> + '_ {
        self.fractions
            .iter()
            .copied()
            .filter(|f| f.sign() == SignGroup::Negative)
    }

    /// Sum of the non-negative fractions (`>= 0`).
    #[must_use]
    pub fn positive_y_value(&self) -> f64 {
        self.positive_fractions().map(|f| f.value).sum()
    }

    /// Sum of the negative fractions (`<= 0`).
    #[must_use]
    pub fn negative_y_value(&self) -> f64 {
        self.negative_fractions().map(|f| f.value).sum()
    }
}

/// Edge margins deciding whether the aggregate group labels fit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarLabelSettings {
    /// Vertical label offset from the bar's outer edge. Negative moves the
    /// positive label up; the sign flips for the negative label.
    #[serde(default = "default_label_offset_y")]
    pub label_offset_y: f64,
    #[serde(default)]
    pub min_top_margin: f64,
    #[serde(default = "default_min_bottom_margin")]
    pub min_bottom_margin: f64,
}

impl Default for BarLabelSettings {
    fn default() -> Self {
        Self {
            label_offset_y: default_label_offset_y(),
            min_top_margin: 0.0,
            min_bottom_margin: default_min_bottom_margin(),
        }
    }
}

fn default_label_offset_y() -> f64 {
    -10.0
}

fn default_min_bottom_margin() -> f64 {
    10.0
}

/// Pixel placement of one fraction. `top_offset` is the y of its top edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FractionLayout {
    pub source_index: usize,
    pub value: f64,
    pub height: f64,
    pub top_offset: f64,
    pub sign: SignGroup,
}

/// Vertical layout of a stacked bar inside a plot of `total_height` pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackedBarGeometry {
    pub fractions: Vec<FractionLayout>,
    pub bar_width: f64,
    pub positive_height: f64,
    pub negative_height: f64,
    /// Zero baseline the positive group grows up from.
    pub positive_origin: f64,
    /// Zero baseline the negative group grows down from.
    pub negative_origin: f64,
    pub positive_center_y: f64,
    pub negative_center_y: f64,
    /// Height-weighted centre of the combined bar.
    pub anchor_y: f64,
    pub show_positive_label: bool,
    pub show_negative_label: bool,
    pub positive_label_y: f64,
    pub negative_label_y: f64,
}

impl StackedBarGeometry {
    #[must_use]
    pub fn total_height(&self) -> f64 {
        self.positive_height + self.negative_height
    }

    #[must_use]
    pub fn group_height(&self, sign: SignGroup) -> f64 {
        match sign {
            SignGroup::Positive => self.positive_height,
            SignGroup::Negative => self.negative_height,
        }
    }

    /// Geometry with every height scaled by `progress` about the baselines.
    ///
    /// Label eligibility is kept from the full-size layout.
    #[must_use]
    pub fn grown(&self, progress: f64) -> Self {
        let progress = finite_or(progress, 1.0).clamp(0.0, 1.0);
        if progress >= 1.0 {
            return self.clone();
        }
        let fractions = self
            .fractions
            .iter()
            .map(|fraction| {
                let top_offset = match fraction.sign {
                    SignGroup::Positive => {
                        self.positive_origin - (self.positive_origin - fraction.top_offset) * progress
                    }
                    SignGroup::Negative => {
                        self.negative_origin + (fraction.top_offset - self.negative_origin) * progress
                    }
                };
                FractionLayout {
                    height: fraction.height * progress,
                    top_offset,
                    ..*fraction
                }
            })
            .collect();

        let positive_height = self.positive_height * progress;
        let negative_height = self.negative_height * progress;
        let positive_center_y = self.positive_origin - positive_height * 0.5;
        let negative_center_y = self.negative_origin + negative_height * 0.5;
        Self {
            fractions,
            positive_height,
            negative_height,
            positive_center_y,
            negative_center_y,
            anchor_y: weighted_anchor(
                positive_height,
                negative_height,
                positive_center_y,
                negative_center_y,
                self.positive_origin,
            ),
            positive_label_y: self.positive_origin - positive_height + self.label_offset(),
            negative_label_y: self.negative_origin + negative_height - self.label_offset(),
            ..self.clone()
        }
    }

    fn label_offset(&self) -> f64 {
        let full_top = self.positive_origin - self.positive_height;
        self.positive_label_y - full_top
    }
}

/// Lays out `fractions` as one stacked bar against the axis `axis`.
///
/// Positive fractions stack upward from the zero baseline with the first
/// fraction on top; negative fractions hang below it with the first fraction
/// touching the baseline.
#[must_use]
pub fn layout_stacked_bar(
    fractions: &[BarFraction],
    axis: ValueRange,
    total_height: f64,
    bar_width: f64,
    labels: BarLabelSettings,
) -> StackedBarGeometry {
    let total_height = finite_or(total_height, 0.0).max(0.0);
    let span = axis.span();

    let (positive_sum, positive_unit) = group_sum(fractions, SignGroup::Positive);
    let (negative_sum, negative_unit) = group_sum(fractions, SignGroup::Negative);

    let positive_height = bounded_height(positive_sum / span * total_height / positive_unit);
    let negative_height = bounded_height(negative_sum / span * total_height / negative_unit);
    let positive_origin = total_height - to_pixel(axis.min.max(0.0), axis, total_height);
    let negative_origin = total_height - to_pixel(axis.max.min(0.0), axis, total_height);

    let mut positive_cursor = positive_origin - positive_height;
    let mut negative_cursor = negative_origin;
    let mut laid_out = Vec::with_capacity(fractions.len());
    for (source_index, fraction) in fractions.iter().enumerate() {
        let value = finite_or(fraction.value, 0.0);
        let sign = fraction.sign();
        let (group_sum, unit, group_height, cursor) = match sign {
            SignGroup::Positive => (
                positive_sum,
                positive_unit,
                positive_height,
                &mut positive_cursor,
            ),
            SignGroup::Negative => (
                negative_sum,
                negative_unit,
                negative_height,
                &mut negative_cursor,
            ),
        };
        let height = if group_sum > 0.0 {
            value.abs() * unit / group_sum * group_height
        } else {
            0.0
        };
        laid_out.push(FractionLayout {
            source_index,
            value,
            height,
            top_offset: *cursor,
            sign,
        });
        *cursor += height;
    }

    let positive_center_y = positive_origin - positive_height * 0.5;
    let negative_center_y = negative_origin + negative_height * 0.5;
    let positive_top = positive_origin - positive_height;
    let negative_bottom = negative_origin + negative_height;

    StackedBarGeometry {
        fractions: laid_out,
        bar_width: finite_or(bar_width, 0.0).max(0.0),
        positive_height,
        negative_height,
        positive_origin,
        negative_origin,
        positive_center_y,
        negative_center_y,
        anchor_y: weighted_anchor(
            positive_height,
            negative_height,
            positive_center_y,
            negative_center_y,
            positive_origin,
        ),
        show_positive_label: positive_top + labels.label_offset_y > labels.min_top_margin,
        show_negative_label: negative_bottom - labels.label_offset_y
            < total_height - labels.min_bottom_margin,
        positive_label_y: positive_top + labels.label_offset_y,
        negative_label_y: negative_bottom - labels.label_offset_y,
    }
}

/// Sum of `|value|` over one sign group as `(sum, unit)`; the true sum is
/// `sum / unit`. `unit` drops below `1` only when the plain sum overflows.
fn group_sum(fractions: &[BarFraction], sign: SignGroup) -> (f64, f64) {
    let plain: f64 = magnitudes(fractions, sign).sum();
    if plain.is_finite() {
        return (plain, 1.0);
    }
    let unit = 1.0 / magnitudes(fractions, sign).count() as f64;
    (magnitudes(fractions, sign).map(|m| m * unit).sum(), unit)
}

fn magnitudes(fractions: &[BarFraction], sign: SignGroup) -> impl Iterator<Item = f64> + '_ {
    fractions
        .iter()
        .filter(move |f| f.sign() == sign)
        .map(|f| finite_or(f.value, 0.0).abs())
}

fn bounded_height(height: f64) -> f64 {
    if height.is_finite() {
        height.min(MAX_GROUP_HEIGHT)
    } else {
        MAX_GROUP_HEIGHT
    }
}

fn weighted_anchor(
    positive_height: f64,
    negative_height: f64,
    positive_center_y: f64,
    negative_center_y: f64,
    fallback: f64,
) -> f64 {
    let total = positive_height + negative_height;
    if total > 0.0 {
        positive_height / total * positive_center_y + negative_height / total * negative_center_y
    } else {
        fallback
    }
}
