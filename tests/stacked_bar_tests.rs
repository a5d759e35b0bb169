use approx::assert_abs_diff_eq;
use chart_geometry::ChartError;
use chart_geometry::core::{
    BarDataSet, BarFraction, BarLabelSettings, SignGroup, StackedBarGeometry, ValueRange,
    layout_stacked_bar,
};

fn fractions(values: &[f64]) -> Vec<BarFraction> {
    values.iter().copied().map(BarFraction::new).collect()
}

#[test]
fn data_set_aggregates_split_by_sign() {
    let data_set = BarDataSet::from_values("Q1", &[3.0, -2.0, 5.0, -1.0, 0.0]).expect("data set");

    assert_eq!(data_set.label(), "Q1");
    assert_eq!(data_set.positive_y_value(), 8.0);
    assert_eq!(data_set.negative_y_value(), -3.0);
    assert_eq!(data_set.positive_fractions().count(), 3);
    assert_eq!(data_set.negative_fractions().count(), 2);
}

#[test]
fn data_set_rejects_non_finite_fractions() {
    let result = BarDataSet::from_values("broken", &[1.0, f64::NAN]);
    assert!(matches!(result, Err(ChartError::InvalidData(_))));
}

#[test]
fn zero_fraction_belongs_to_positive_group() {
    assert_eq!(BarFraction::new(0.0).sign(), SignGroup::Positive);
    assert_eq!(BarFraction::new(-0.5).sign(), SignGroup::Negative);
}

#[test]
fn mixed_stack_conserves_group_heights() {
    let geometry = layout_stacked_bar(
        &fractions(&[3.0, -2.0, 5.0, -1.0]),
        ValueRange::new(-3.0, 8.0),
        110.0,
        24.0,
        BarLabelSettings::default(),
    );

    let total = geometry.total_height();
    assert_abs_diff_eq!(geometry.positive_height / total, 8.0 / 11.0, epsilon = 1e-12);
    assert_abs_diff_eq!(geometry.negative_height / total, 3.0 / 11.0, epsilon = 1e-12);
    assert_abs_diff_eq!(geometry.positive_height, 80.0, epsilon = 1e-9);
    assert_abs_diff_eq!(geometry.negative_height, 30.0, epsilon = 1e-9);

    for sign in [SignGroup::Positive, SignGroup::Negative] {
        let sum: f64 = geometry
            .fractions
            .iter()
            .filter(|f| f.sign == sign)
            .map(|f| f.height)
            .sum();
        assert_abs_diff_eq!(sum, geometry.group_height(sign), epsilon = 1e-9);
    }
}

#[test]
fn positive_group_stacks_up_and_negative_group_hangs_down() {
    let geometry = layout_stacked_bar(
        &fractions(&[3.0, -2.0, 5.0, -1.0]),
        ValueRange::new(-3.0, 8.0),
        110.0,
        24.0,
        BarLabelSettings::default(),
    );
    let by_index = |i: usize| geometry.fractions[i];

    assert_abs_diff_eq!(geometry.positive_origin, 80.0, epsilon = 1e-9);
    assert_abs_diff_eq!(geometry.negative_origin, 80.0, epsilon = 1e-9);

    // First positive fraction sits on top of the positive stack.
    assert_abs_diff_eq!(by_index(0).top_offset, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(by_index(0).height, 30.0, epsilon = 1e-9);
    assert_abs_diff_eq!(by_index(2).top_offset, 30.0, epsilon = 1e-9);
    assert_abs_diff_eq!(by_index(2).height, 50.0, epsilon = 1e-9);

    // First negative fraction touches the baseline.
    assert_abs_diff_eq!(by_index(1).top_offset, 80.0, epsilon = 1e-9);
    assert_abs_diff_eq!(by_index(1).height, 20.0, epsilon = 1e-9);
    assert_abs_diff_eq!(by_index(3).top_offset, 100.0, epsilon = 1e-9);
    assert_abs_diff_eq!(by_index(3).height, 10.0, epsilon = 1e-9);

    assert_eq!(by_index(1).source_index, 1);
    assert_eq!(by_index(1).sign, SignGroup::Negative);
    assert_eq!(geometry.bar_width, 24.0);
}

#[test]
fn symmetric_stack_is_anchored_at_its_center() {
    let geometry = layout_stacked_bar(
        &fractions(&[5.0, -5.0]),
        ValueRange::new(-5.0, 5.0),
        100.0,
        10.0,
        BarLabelSettings::default(),
    );

    assert_abs_diff_eq!(geometry.positive_height, 50.0, epsilon = 1e-9);
    assert_abs_diff_eq!(geometry.negative_height, 50.0, epsilon = 1e-9);
    assert_abs_diff_eq!(geometry.positive_center_y, 25.0, epsilon = 1e-9);
    assert_abs_diff_eq!(geometry.negative_center_y, 75.0, epsilon = 1e-9);
    assert_abs_diff_eq!(geometry.anchor_y, 50.0, epsilon = 1e-9);
}

#[test]
fn empty_and_zero_stacks_have_zero_height() {
    let axis = ValueRange::new(-5.0, 5.0);

    let empty = layout_stacked_bar(&[], axis, 100.0, 10.0, BarLabelSettings::default());
    assert!(empty.fractions.is_empty());
    assert_eq!(empty.total_height(), 0.0);
    assert_abs_diff_eq!(empty.anchor_y, 50.0, epsilon = 1e-9);

    let zeros = layout_stacked_bar(
        &fractions(&[0.0, 0.0]),
        axis,
        100.0,
        10.0,
        BarLabelSettings::default(),
    );
    assert!(zeros.fractions.iter().all(|f| f.height == 0.0));
    assert!(zeros.anchor_y.is_finite());
}

#[test]
fn degenerate_axis_stays_finite() {
    let geometry = layout_stacked_bar(
        &fractions(&[1.0, -1.0]),
        ValueRange::new(0.0, 0.0),
        100.0,
        10.0,
        BarLabelSettings::default(),
    );

    assert!(geometry.positive_height.is_finite());
    assert!(geometry.negative_height.is_finite());
    assert!(geometry.anchor_y.is_finite());
    assert!(geometry.fractions.iter().all(|f| f.top_offset.is_finite()));
}

#[test]
fn positive_label_hides_when_bar_reaches_top_edge() {
    let axis = ValueRange::new(0.0, 10.0);
    let labels = BarLabelSettings::default();

    let full = layout_stacked_bar(&fractions(&[10.0]), axis, 100.0, 10.0, labels);
    assert!(!full.show_positive_label);

    let half = layout_stacked_bar(&fractions(&[5.0]), axis, 100.0, 10.0, labels);
    assert!(half.show_positive_label);
    assert_abs_diff_eq!(half.positive_label_y, 40.0, epsilon = 1e-9);
}

#[test]
fn negative_label_hides_when_bar_reaches_bottom_margin() {
    let axis = ValueRange::new(-10.0, 0.0);
    let labels = BarLabelSettings::default();

    let full = layout_stacked_bar(&fractions(&[-10.0]), axis, 100.0, 10.0, labels);
    assert!(!full.show_negative_label);

    let half = layout_stacked_bar(&fractions(&[-5.0]), axis, 100.0, 10.0, labels);
    assert!(half.show_negative_label);
    assert_abs_diff_eq!(half.negative_label_y, 60.0, epsilon = 1e-9);
}

#[test]
fn label_margins_are_configurable() {
    let axis = ValueRange::new(0.0, 10.0);
    let strict = BarLabelSettings {
        label_offset_y: -10.0,
        min_top_margin: 45.0,
        min_bottom_margin: 10.0,
    };

    let half = layout_stacked_bar(&fractions(&[5.0]), axis, 100.0, 10.0, strict);
    assert!(!half.show_positive_label);
}

#[test]
fn grown_geometry_scales_about_the_baseline() {
    let geometry = layout_stacked_bar(
        &fractions(&[5.0, -5.0]),
        ValueRange::new(-5.0, 5.0),
        100.0,
        10.0,
        BarLabelSettings::default(),
    );

    let half = geometry.grown(0.5);
    assert_abs_diff_eq!(half.positive_height, 25.0, epsilon = 1e-9);
    assert_abs_diff_eq!(half.negative_height, 25.0, epsilon = 1e-9);
    assert_abs_diff_eq!(half.fractions[0].top_offset, 25.0, epsilon = 1e-9);
    assert_abs_diff_eq!(half.fractions[1].top_offset, 50.0, epsilon = 1e-9);
    assert_abs_diff_eq!(half.anchor_y, 50.0, epsilon = 1e-9);
    assert_abs_diff_eq!(half.positive_label_y, 15.0, epsilon = 1e-9);
    assert_eq!(half.show_positive_label, geometry.show_positive_label);

    let hidden = geometry.grown(0.0);
    assert_eq!(hidden.total_height(), 0.0);
    assert_abs_diff_eq!(hidden.anchor_y, 50.0, epsilon = 1e-9);

    assert_eq!(geometry.grown(1.0), geometry);
}

fn assert_geometry_finite(geometry: &StackedBarGeometry) {
    for value in [
        geometry.positive_height,
        geometry.negative_height,
        geometry.positive_origin,
        geometry.negative_origin,
        geometry.positive_center_y,
        geometry.negative_center_y,
        geometry.anchor_y,
        geometry.positive_label_y,
        geometry.negative_label_y,
        geometry.total_height(),
    ] {
        assert!(value.is_finite(), "non-finite geometry value {value}");
    }
    for fraction in &geometry.fractions {
        assert!(fraction.height.is_finite());
        assert!(fraction.top_offset.is_finite());
    }
}

#[test]
fn overflowing_group_sums_keep_geometry_finite() {
    let single = layout_stacked_bar(
        &fractions(&[1e308, 1e308]),
        ValueRange::new(0.0, 1.0),
        100.0,
        10.0,
        BarLabelSettings::default(),
    );
    assert_geometry_finite(&single);

    let mixed = layout_stacked_bar(
        &fractions(&[1e308, 1e308, -1e308, -1e308]),
        ValueRange::new(-1.0, 1.0),
        100.0,
        10.0,
        BarLabelSettings::default(),
    );
    assert_geometry_finite(&mixed);
    assert_geometry_finite(&mixed.grown(0.5));

    // Equal fractions keep equal shares of the bounded group height.
    assert_eq!(mixed.fractions[0].height, mixed.fractions[1].height);
    assert_eq!(mixed.fractions[2].height, mixed.fractions[3].height);
    let positive: f64 = mixed.fractions[..2].iter().map(|f| f.height).sum();
    assert!((positive - mixed.positive_height).abs() <= 1e-12 * mixed.positive_height);
}

#[test]
fn data_set_rejects_fractions_whose_sum_overflows() {
    let positive = BarDataSet::from_values("huge", &[1e308, 1e308]);
    assert!(matches!(positive, Err(ChartError::InvalidData(_))));

    let negative = BarDataSet::from_values("deep", &[-1e308, -1e308, 1.0]);
    assert!(matches!(negative, Err(ChartError::InvalidData(_))));

    let opposite = BarDataSet::from_values("balanced", &[1e308, -1e308]).expect("finite sums");
    assert_eq!(opposite.positive_y_value(), 1e308);
}
