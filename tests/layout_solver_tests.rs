use approx::assert_abs_diff_eq;
use chart_axes::api::{ChartEngine, ChartEngineConfig};
use chart_axes::core::{AxisOptions, AxisSide, ChartOptions, Viewport};
use chart_axes::render::NullRenderer;

fn engine() -> ChartEngine<NullRenderer> {
    let config = ChartEngineConfig::new(Viewport::new(800, 600));
    ChartEngine::new(NullRenderer::default(), config).expect("engine init")
}

#[test]
fn single_right_axis_leaves_the_rest_to_the_chart() {
    let mut engine = engine();
    engine.recompute_layout(true);

    let panel = engine.panel("chart").expect("chart panel");
    let axis = engine.axis(panel.primary_axis()).expect("primary axis");
    assert_eq!(panel.right_axes(), &[panel.primary_axis()]);
    assert!(panel.left_axes().is_empty());
    assert_abs_diff_eq!(axis.left(), 750.0);
    assert_abs_diff_eq!(axis.allocated_width(), 50.0);
    assert_abs_diff_eq!(panel.left(), 0.0);
    assert_abs_diff_eq!(panel.right(), 750.0);

    let chart = engine.chart("chart").expect("chart");
    assert_abs_diff_eq!(chart.width(), 750.0);
    assert_abs_diff_eq!(axis.top(), 0.0);
    assert_abs_diff_eq!(axis.bottom(), 600.0);
}

#[test]
fn slack_is_prorated_so_every_panel_spans_the_widest_side() {
    let mut engine = engine();
    engine
        .add_axis("chart", "wide", AxisOptions::default().with_width(80.0))
        .expect("wide axis");
    let study_primary = engine.add_panel("study", "chart", 0.3).expect("study panel");
    engine.recompute_layout(true);

    let snapshot = engine.layout_snapshot();
    let chart = snapshot.panel("chart").expect("chart geometry");
    let study = snapshot.panel("study").expect("study geometry");
    assert_abs_diff_eq!(chart.total_width_right, 130.0);
    assert_abs_diff_eq!(study.total_width_right, 50.0);

    for panel in [chart, study] {
        let allocated: f64 = panel
            .right_axes
            .iter()
            .map(|axis| axis.allocated_width)
            .sum();
        assert_abs_diff_eq!(allocated, 130.0, epsilon = 1e-9);
    }

    let study_axis = engine.axis(study_primary).expect("study axis");
    assert_abs_diff_eq!(study_axis.left(), 670.0);
    assert_abs_diff_eq!(study_axis.allocated_width(), 130.0);
    assert_abs_diff_eq!(study.left, chart.left);
    assert_abs_diff_eq!(study.right, chart.right);
    assert_abs_diff_eq!(chart.right, 670.0);
}

#[test]
fn left_axes_on_one_panel_push_every_panel_right() {
    let mut engine = engine();
    engine.add_panel("study", "chart", 0.3).expect("study panel");
    let left = engine
        .add_axis("study", "left", AxisOptions::default().on_side(AxisSide::Left))
        .expect("left axis");
    engine.recompute_layout(true);

    let chart = engine.panel("chart").expect("chart panel");
    let study = engine.panel("study").expect("study panel");
    assert_eq!(study.left_axes(), &[left]);
    assert_abs_diff_eq!(chart.left(), 50.0);
    assert_abs_diff_eq!(study.left(), 50.0);
    assert_abs_diff_eq!(engine.axis(left).expect("left axis").left(), 0.0);
}

#[test]
fn side_requests_move_axes_between_sides() {
    let mut engine = engine();
    let extra = engine
        .add_axis("chart", "extra", AxisOptions::default())
        .expect("extra axis");
    engine.recompute_layout(true);
    assert!(engine.panel("chart").expect("panel").right_axes().contains(&extra));

    engine
        .set_axis_side(extra, Some(AxisSide::Left))
        .expect("move left");
    engine.recompute_layout(false);
    let panel = engine.panel("chart").expect("panel");
    assert_eq!(panel.left_axes(), &[extra]);
    assert!(!panel.right_axes().contains(&extra));

    engine.set_axis_side(extra, None).expect("inherit side");
    engine.recompute_layout(false);
    let panel = engine.panel("chart").expect("panel");
    assert!(panel.left_axes().is_empty());
    assert_eq!(panel.right_axes().len(), 2);
}

#[test]
fn hidden_axes_take_no_space() {
    let mut engine = engine();
    let extra = engine
        .add_axis("chart", "extra", AxisOptions::default())
        .expect("extra axis");
    engine.set_axis_no_draw(extra, true).expect("no draw");
    engine.recompute_layout(true);

    let panel = engine.panel("chart").expect("panel");
    assert_abs_diff_eq!(panel.total_width_right(), 50.0);
    assert_abs_diff_eq!(engine.axis(extra).expect("axis").allocated_width(), 0.0);
    assert_abs_diff_eq!(panel.right(), 750.0);
}

#[test]
fn chart_padding_overrides_axis_totals() {
    let mut engine = engine();
    engine
        .set_chart_axis_padding("chart", Some(20.0), Some(100.0))
        .expect("padding");
    engine.recompute_layout(false);

    let panel = engine.panel("chart").expect("panel");
    assert_abs_diff_eq!(panel.padding_left(), 20.0);
    assert_abs_diff_eq!(panel.left(), 20.0);
    assert_abs_diff_eq!(panel.right(), 700.0);
    assert_abs_diff_eq!(panel.width(), 680.0);
}

#[test]
fn repeated_layout_is_stable() {
    let mut engine = engine();
    engine
        .add_axis("chart", "wide", AxisOptions::default().with_width(72.0))
        .expect("axis");
    engine.add_panel("study", "chart", 0.25).expect("panel");
    engine
        .add_axis("study", "left", AxisOptions::default().on_side(AxisSide::Left))
        .expect("axis");

    engine.recompute_layout(true);
    let first = engine.layout_snapshot();
    engine.recompute_layout(true);
    let second = engine.layout_snapshot();
    assert_eq!(first, second);
    assert!(
        first
            .to_json_pretty()
            .expect("layout json")
            .contains("\"total_width_left\"")
    );
}

#[test]
fn panels_stack_vertically_by_percent() {
    let mut engine = engine();
    engine.set_panel_percent("chart", 0.75).expect("percent");
    let study_primary = engine.add_panel("study", "chart", 0.25).expect("panel");
    engine.recompute_layout(true);

    let chart = engine.panel("chart").expect("chart");
    let study = engine.panel("study").expect("study");
    assert_abs_diff_eq!(chart.top(), 0.0);
    assert_abs_diff_eq!(chart.bottom(), 450.0, epsilon = 1e-9);
    assert_abs_diff_eq!(study.top(), 450.0, epsilon = 1e-9);
    assert_abs_diff_eq!(study.bottom(), 600.0);
    let axis = engine.axis(study_primary).expect("study axis");
    assert_abs_diff_eq!(axis.top(), study.top());
    assert_abs_diff_eq!(axis.bottom(), study.bottom());
}

#[test]
fn chart_width_change_keeps_tick_count() {
    let mut engine = engine();
    engine.recompute_layout(true);
    let ticks = engine.chart("chart").expect("chart").max_ticks();
    assert_eq!(ticks, 93);

    engine
        .add_axis("chart", "extra", AxisOptions::default())
        .expect("axis");
    engine.recompute_layout(false);
    let chart = engine.chart("chart").expect("chart");
    assert_eq!(chart.max_ticks(), 93);
    assert_abs_diff_eq!(engine.candle_width(), 700.0 / 93.0, epsilon = 1e-9);
}

#[test]
fn second_chart_derives_its_own_bounds() {
    let mut engine = engine();
    engine
        .add_chart("compare", ChartOptions::default())
        .expect("second chart");
    engine.recompute_layout(true);

    let compare = engine.chart("compare").expect("chart");
    assert_abs_diff_eq!(compare.left(), 0.0);
    assert_abs_diff_eq!(compare.right(), 750.0);
}
