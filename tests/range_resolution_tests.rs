use approx::assert_abs_diff_eq;
use chart_axes::api::{ChartEngine, ChartEngineConfig, determine_min_max};
use chart_axes::core::{
    Aggregation, AxisOptions, BaselineConfig, ChartOptions, DataRecord, SeriesParams,
    SeriesRendererBinding, StudyDescriptor, ValueTransform, Viewport,
};
use chart_axes::render::NullRenderer;
use indexmap::IndexSet;

fn engine_with(options: ChartOptions) -> ChartEngine<NullRenderer> {
    let config = ChartEngineConfig::new(Viewport::new(800, 600));
    ChartEngine::with_chart_options(NullRenderer::default(), config, options)
        .expect("engine init")
}

fn ohlc_segment() -> Vec<DataRecord> {
    vec![
        DataRecord::ohlc(10.0, 12.0, 9.0, 11.0),
        DataRecord::ohlc(11.0, 15.0, 10.5, 14.0),
        DataRecord::ohlc(14.0, 14.5, 8.0, 9.5),
    ]
}

#[test]
fn symbol_series_collect_chained_ohlc_fields() {
    let mut engine = engine_with(ChartOptions::default());
    let binding = SeriesRendererBinding {
        high_low_bars: true,
        ..SeriesRendererBinding::new("ibm", "chart")
    }
    .with_series(SeriesParams::symbol("IBM"));
    engine.add_series_renderer("chart", binding).expect("renderer");

    let primary = engine.panel("chart").expect("panel").primary_axis();
    let collection = engine
        .collect_axis_fields("chart", primary)
        .expect("collect");
    assert_eq!(
        collection.fields,
        vec!["IBM.Close", "IBM.Open", "IBM.High", "IBM.Low", "IBM"]
    );
    assert_eq!(collection.renderers, vec!["ibm".to_owned()]);
    assert!(collection.studies.is_empty());
    assert!(!collection.check_array);
}

#[test]
fn sub_field_and_plain_field_series() {
    let mut engine = engine_with(ChartOptions::default());
    let extra = engine
        .add_axis("chart", "compare", AxisOptions::default())
        .expect("axis");
    let binding = SeriesRendererBinding::new("compare", "chart")
        .on_axis(extra)
        .with_series(SeriesParams::symbol("AAPL").with_sub_field("High"))
        .with_series(SeriesParams::field("Spread"));
    engine.add_series_renderer("chart", binding).expect("renderer");

    let collection = engine.collect_axis_fields("chart", extra).expect("collect");
    assert_eq!(collection.fields, vec!["AAPL.High", "AAPL", "Spread"]);

    let primary = engine.panel("chart").expect("panel").primary_axis();
    let primary_fields = engine
        .collect_axis_fields("chart", primary)
        .expect("collect");
    assert!(primary_fields.fields.is_empty());
    assert!(primary_fields.renderers.is_empty());
}

#[test]
fn study_axis_collects_outputs_and_histogram_fields() {
    let mut engine = engine_with(ChartOptions::default());
    let axis = engine.add_panel("macd", "chart", 0.3).expect("panel");
    engine
        .add_study(StudyDescriptor::new("macd", "macd").with_output("MACD"))
        .expect("study");

    let collection = engine.collect_axis_fields("macd", axis).expect("collect");
    assert_eq!(
        collection.fields,
        vec!["MACD", "MACD.Close", "macd_hist", "macd_hist1", "macd_hist2"]
    );
    assert_eq!(collection.studies, vec!["macd".to_owned()]);
}

#[test]
fn non_overlay_study_feeds_only_the_axis_named_after_it() {
    let mut engine = engine_with(ChartOptions::default());
    engine
        .add_study(StudyDescriptor::new("vwap", "chart").with_output("VWAP"))
        .expect("study");
    let primary = engine.panel("chart").expect("panel").primary_axis();

    let collection = engine
        .collect_axis_fields("chart", primary)
        .expect("collect");
    assert!(collection.studies.is_empty());
    assert!(collection.fields.is_empty());
}

#[test]
fn overlay_fields_follow_the_include_flag() {
    let mut engine = engine_with(ChartOptions::default());
    engine
        .add_study(
            StudyDescriptor {
                has_series_fn: true,
                ..StudyDescriptor::new("ma", "chart")
            }
            .with_output("MA")
            .as_overlay(),
        )
        .expect("overlay");
    let primary = engine.panel("chart").expect("panel").primary_axis();

    let collection = engine
        .collect_axis_fields("chart", primary)
        .expect("collect");
    assert_eq!(collection.studies, vec!["ma".to_owned()]);
    assert_eq!(collection.fields, vec!["MA", "ma_hist", "ma_hist1", "ma_hist2"]);

    let options = ChartOptions {
        include_overlays_in_min_max: false,
        ..ChartOptions::default()
    };
    engine.set_chart_options("chart", options).expect("options");
    let collection = engine
        .collect_axis_fields("chart", primary)
        .expect("collect");
    assert_eq!(collection.studies, vec!["ma".to_owned()]);
    assert!(collection.fields.is_empty());
}

#[test]
fn chart_range_spans_ohlc_and_publishes_at_chart_level() {
    let mut engine = engine_with(ChartOptions::default());
    let binding = SeriesRendererBinding {
        high_low_bars: true,
        ..SeriesRendererBinding::new("main", "chart")
    }
    .with_series(SeriesParams::default());
    engine.add_series_renderer("chart", binding).expect("renderer");
    engine
        .set_data_segment("chart", ohlc_segment())
        .expect("data");

    engine.resolve_display_ranges("chart").expect("ranges");
    let primary = engine.panel("chart").expect("panel").primary_axis();
    assert_eq!(engine.axis(primary).expect("axis").value_range(), (8.0, 15.0));
    assert_eq!(engine.chart("chart").expect("chart").value_range(), (8.0, 15.0));
}

#[test]
fn aggregation_box_widens_only_the_chart_range() {
    let options = ChartOptions {
        aggregation: Some(Aggregation { box_size: 2.0 }),
        ..ChartOptions::default()
    };
    let mut engine = engine_with(options);
    let binding = SeriesRendererBinding {
        high_low_bars: true,
        ..SeriesRendererBinding::new("main", "chart")
    }
    .with_series(SeriesParams::default());
    engine.add_series_renderer("chart", binding).expect("renderer");
    engine
        .set_data_segment("chart", ohlc_segment())
        .expect("data");

    engine.resolve_display_ranges("chart").expect("ranges");
    let primary = engine.panel("chart").expect("panel").primary_axis();
    assert_eq!(engine.axis(primary).expect("axis").value_range(), (8.0, 15.0));
    assert_eq!(engine.chart("chart").expect("chart").value_range(), (7.0, 16.0));
}

#[test]
fn centered_baseline_balances_the_range() {
    let options = ChartOptions {
        baseline: BaselineConfig {
            level: Some(10.0),
            include_in_range: true,
            centered: true,
        },
        ..ChartOptions::default()
    };
    let mut engine = engine_with(options);
    engine
        .add_series_renderer(
            "chart",
            SeriesRendererBinding::new("main", "chart").with_series(SeriesParams::default()),
        )
        .expect("renderer");
    engine
        .set_data_segment("chart", ohlc_segment())
        .expect("data");

    engine.resolve_display_ranges("chart").expect("ranges");
    // Closes span 9.5..14; the 10 baseline sits in the middle.
    assert_eq!(engine.chart("chart").expect("chart").value_range(), (6.0, 14.0));
}

#[test]
fn axis_without_fields_is_disabled_but_kept_while_bound() {
    let mut engine = engine_with(ChartOptions::default());
    let extra = engine
        .add_axis("chart", "empty", AxisOptions::default())
        .expect("axis");
    engine
        .add_series_renderer(
            "chart",
            SeriesRendererBinding::new("hidden", "chart").on_axis(extra).with_series(
                SeriesParams {
                    hidden: true,
                    ..SeriesParams::field("Volume")
                },
            ),
        )
        .expect("renderer");

    engine.resolve_display_ranges("chart").expect("ranges");
    let axis = engine.axis(extra).expect("axis kept");
    assert!(axis.is_disabled());
    assert!(axis.is_hidden());
    assert_eq!(axis.renderers(), &["hidden".to_owned()]);
}

#[test]
fn importing_keeps_unused_axes() {
    let mut engine = engine_with(ChartOptions::default());
    let extra = engine
        .add_axis("chart", "orphan", AxisOptions::default())
        .expect("axis");
    engine.set_importing(true);
    engine.resolve_display_ranges("chart").expect("ranges");
    assert!(engine.panel("chart").expect("panel").contains_axis(extra));

    engine.set_importing(false);
    engine.resolve_display_ranges("chart").expect("ranges");
    assert!(!engine.panel("chart").expect("panel").contains_axis(extra));
}

#[test]
fn stacked_fields_use_running_sums() {
    let records = vec![
        DataRecord::new().with("a", 2.0).with("b", 3.0),
        DataRecord::new().with("a", -1.0).with("b", 4.0),
    ];
    let fields = vec!["a".to_owned(), "b".to_owned()];
    let use_sum: IndexSet<String> = fields.iter().cloned().collect();
    let (low, high) = determine_min_max(&records, &fields, &use_sum, None, None, false);
    assert_abs_diff_eq!(low, -1.0);
    assert_abs_diff_eq!(high, 5.0);

    let (low, high) = determine_min_max(
        &records,
        &fields,
        &IndexSet::new(),
        Some(ValueTransform::PercentChange { base: 2.0 }),
        Some(1),
        false,
    );
    assert_abs_diff_eq!(low, 0.0);
    assert_abs_diff_eq!(high, 50.0);
}
