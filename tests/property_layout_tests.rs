use chart_axes::api::{ChartEngine, ChartEngineConfig, tick_prices};
use chart_axes::core::{AxisOptions, AxisScale, AxisScaleInputs, AxisSide, Viewport};
use chart_axes::render::NullRenderer;
use proptest::prelude::*;

fn scale_for(low: f64, high: f64) -> AxisScale {
    AxisScale::from_range(
        low,
        high,
        AxisScaleInputs {
            height_px: 400.0,
            margin_top_px: 10.0,
            margin_bottom_px: 10.0,
            semi_log: false,
            fixed_price_tick: None,
            ideal_tick_spacing_px: 40.0,
        },
    )
    .expect("valid scale")
}

proptest! {
    #[test]
    fn chart_axis_ticks_start_at_first_boundary_and_step_evenly(
        low in -10_000.0f64..10_000.0,
        span in 0.01f64..5_000.0
    ) {
        let scale = scale_for(low, low + span);
        let tick = scale.price_tick.expect("tick size");
        let prices = tick_prices(&scale, None, true);

        prop_assert_eq!(prices.len(), (scale.shadow / tick).round() as usize);
        prop_assume!(!prices.is_empty());
        let eps = 1e-9 * scale.low.abs().max(scale.high.abs()).max(1.0);
        prop_assert!(prices[0] >= scale.low - eps);
        prop_assert!(prices[0] < scale.low + tick + eps);
        for pair in prices.windows(2) {
            prop_assert!((pair[1] - pair[0] - tick).abs() <= eps);
        }
    }

    #[test]
    fn study_axis_ticks_walk_down_from_the_high_boundary(
        low in -10_000.0f64..10_000.0,
        span in 0.01f64..5_000.0
    ) {
        let scale = scale_for(low, low + span);
        let tick = scale.price_tick.expect("tick size");
        let prices = tick_prices(&scale, None, false);

        prop_assume!(!prices.is_empty());
        let eps = 1e-9 * scale.low.abs().max(scale.high.abs()).max(1.0);
        if scale.high >= 0.0 {
            prop_assert!(prices[0] <= scale.high + eps);
            prop_assert!(prices[0] > scale.high - tick - eps);
        }
        for pair in prices.windows(2) {
            prop_assert!((pair[0] - pair[1] - tick).abs() <= eps);
        }
    }

    #[test]
    fn prorated_allocations_sum_to_the_widest_side(
        chart_widths in prop::collection::vec((10.0f64..120.0, any::<bool>()), 0..4),
        study_widths in prop::collection::vec((10.0f64..120.0, any::<bool>()), 0..4)
    ) {
        let config = ChartEngineConfig::new(Viewport::new(1200, 700));
        let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine init");
        engine.add_panel("study", "chart", 0.3).expect("study panel");
        for (panel, widths) in [("chart", &chart_widths), ("study", &study_widths)] {
            for (i, (width, left)) in widths.iter().enumerate() {
                let side = if *left { AxisSide::Left } else { AxisSide::Right };
                engine
                    .add_axis(
                        panel,
                        &format!("{panel}-{i}"),
                        AxisOptions::default().with_width(*width).on_side(side),
                    )
                    .expect("axis");
            }
        }
        engine.recompute_layout(true);

        let snapshot = engine.layout_snapshot();
        let max_left = snapshot
            .panels
            .iter()
            .map(|panel| panel.total_width_left)
            .fold(0.0, f64::max);
        let max_right = snapshot
            .panels
            .iter()
            .map(|panel| panel.total_width_right)
            .fold(0.0, f64::max);
        for panel in &snapshot.panels {
            if !panel.left_axes.is_empty() {
                let allocated: f64 = panel.left_axes.iter().map(|axis| axis.allocated_width).sum();
                prop_assert!((allocated - max_left).abs() <= 1e-6);
            }
            if !panel.right_axes.is_empty() {
                let allocated: f64 = panel.right_axes.iter().map(|axis| axis.allocated_width).sum();
                prop_assert!((allocated - max_right).abs() <= 1e-6);
            }
            prop_assert!((panel.left - max_left).abs() <= 1e-6);
            prop_assert!((panel.right - (1200.0 - max_right)).abs() <= 1e-6);
        }
    }
}
