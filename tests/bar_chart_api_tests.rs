use approx::assert_abs_diff_eq;
use chart_geometry::api::AxisConfig;
use chart_geometry::core::{BarDataSet, MarkerLine};
use chart_geometry::interaction::BarSelectionState;
use chart_geometry::{BarChart, BarChartConfig, ChartError};

fn data_sets() -> Vec<BarDataSet> {
    vec![
        BarDataSet::from_values("A", &[3.0, -2.0, 5.0, -1.0]).expect("finite fractions"),
        BarDataSet::from_values("B", &[5.0, -5.0]).expect("finite fractions"),
    ]
}

fn chart(config: BarChartConfig) -> BarChart {
    BarChart::new(data_sets(), config).expect("valid chart")
}

#[test]
fn y_scale_spans_extreme_stacks() {
    let scale = chart(BarChartConfig::default()).y_scale();

    assert_eq!(scale.interval, 2.0);
    assert_eq!(scale.min, -6.0);
    assert_eq!(scale.max, 8.0);
    assert_eq!(scale.tick_count, 8);
}

#[test]
fn y_scale_honors_axis_overrides() {
    let config = BarChartConfig::default().with_y_axis(
        AxisConfig::default()
            .with_interval(5.0)
            .with_range_override(None, Some(20.0)),
    );
    let scale = chart(config).y_scale();

    assert_eq!(scale.min, -5.0);
    assert_eq!(scale.max, 20.0);
    assert_eq!(scale.interval, 5.0);
}

#[test]
fn layout_places_bars_in_insertion_order() {
    let layout = chart(BarChartConfig::default()).layout(400.0, 140.0);

    assert_eq!(layout.len(), 2);
    assert_eq!(layout[0].label, "A");
    assert_eq!(layout[1].label, "B");
    assert_abs_diff_eq!(layout[0].center_x, 350.0 / 3.0, epsilon = 1e-9);
    assert_abs_diff_eq!(layout[1].center_x, 850.0 / 3.0, epsilon = 1e-9);
    assert_eq!(layout[0].geometry.bar_width, 100.0);
}

#[test]
fn layout_shares_one_axis_across_bars() {
    let layout = chart(BarChartConfig::default()).layout(400.0, 140.0);
    let a = &layout[0].geometry;
    let b = &layout[1].geometry;

    assert_abs_diff_eq!(a.positive_origin, 80.0, epsilon = 1e-9);
    assert_abs_diff_eq!(b.positive_origin, 80.0, epsilon = 1e-9);
    assert_abs_diff_eq!(a.positive_height, 80.0, epsilon = 1e-9);
    assert_abs_diff_eq!(a.negative_height, 30.0, epsilon = 1e-9);
    assert_abs_diff_eq!(b.positive_height, 50.0, epsilon = 1e-9);
    assert_abs_diff_eq!(b.negative_height, 50.0, epsilon = 1e-9);
}

#[test]
fn layout_at_zero_progress_collapses_every_bar() {
    let chart = chart(BarChartConfig::default());
    let hidden = chart.layout_at_progress(400.0, 140.0, 0.0);

    assert!(hidden.iter().all(|bar| bar.geometry.total_height() == 0.0));
    assert_eq!(
        chart.layout_at_progress(400.0, 140.0, 1.0),
        chart.layout(400.0, 140.0)
    );
}

#[test]
fn marker_line_maps_onto_the_shared_axis() {
    let chart = chart(BarChartConfig::default())
        .with_marker_line(MarkerLine::new(0.0).with_label("zero"))
        .with_marker_line(MarkerLine::new(8.0));
    let segments = chart.marker_segments(400.0, 140.0);

    assert_eq!(segments.len(), 2);
    assert_abs_diff_eq!(segments[0].y1, 80.0, epsilon = 1e-9);
    assert_abs_diff_eq!(segments[0].y2, 80.0, epsilon = 1e-9);
    assert_eq!(segments[0].x1, 0.0);
    assert_eq!(segments[0].x2, 400.0);
    assert_abs_diff_eq!(segments[1].y1, 0.0, epsilon = 1e-9);
}

#[test]
fn duplicate_labels_are_rejected() {
    let mut sets = data_sets();
    sets.push(BarDataSet::from_values("A", &[1.0]).expect("finite fractions"));

    let result = BarChart::new(sets, BarChartConfig::default());
    assert!(matches!(result, Err(ChartError::DuplicateLabel(label)) if label == "A"));
}

#[test]
fn data_sets_are_addressable_by_label_and_position() {
    let chart = chart(BarChartConfig::default());

    assert_eq!(chart.len(), 2);
    assert_eq!(chart.x_axis_labels().collect::<Vec<_>>(), vec!["A", "B"]);
    assert_eq!(
        chart.data_set("B").map(BarDataSet::positive_y_value),
        Some(5.0)
    );
    assert_eq!(chart.data_set_at(0).map(BarDataSet::label), Some("A"));
    assert!(chart.data_set("C").is_none());
    assert!(chart.data_set_at(2).is_none());
}

#[test]
fn tapping_a_bar_toggles_its_selection() {
    let chart = chart(BarChartConfig::default());
    let mut selection = BarSelectionState::default();

    assert_eq!(chart.tap(283.0, 400.0, &mut selection), Some(1));
    assert_eq!(selection.selected(), Some(1));

    assert_eq!(chart.tap(120.0, 400.0, &mut selection), Some(0));
    assert_eq!(selection.selected(), Some(0));

    assert_eq!(chart.tap(120.0, 400.0, &mut selection), Some(0));
    assert_eq!(selection.selected(), None);
}

#[test]
fn tapping_a_spacer_or_a_locked_chart_changes_nothing() {
    let mut selection = BarSelectionState::default();

    let open = chart(BarChartConfig::default());
    assert_eq!(open.tap(10.0, 400.0, &mut selection), None);
    assert_eq!(selection.selected(), None);

    let locked = chart(BarChartConfig::default().with_user_interaction(false));
    assert_eq!(locked.tap(120.0, 400.0, &mut selection), None);
    assert_eq!(selection.selected(), None);
}

#[test]
fn empty_chart_keeps_a_positive_axis() {
    let chart = BarChart::new(Vec::new(), BarChartConfig::default()).expect("empty chart");
    let scale = chart.y_scale();

    assert!(chart.is_empty());
    assert_eq!(scale.min, 0.0);
    assert!(scale.max >= 0.1 - 1e-12);
    assert!(chart.layout(400.0, 140.0).is_empty());
}

#[test]
fn invalid_label_settings_are_rejected() {
    let config = BarChartConfig::default().with_label_offset(f64::NAN);
    let result = BarChart::new(data_sets(), config);
    assert!(matches!(result, Err(ChartError::InvalidConfig(_))));
}
