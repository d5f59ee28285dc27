use tracing::trace;

use crate::core::{AxisScale, AxisScaleInputs};
use crate::render::Renderer;

use super::ChartEngine;

impl<R: Renderer> ChartEngine<R> {
    /// Derives the display scale (margins, tick size, log span) of every
    /// enabled axis on visible panels from its resolved range.
    ///
    /// The primary axis of a chart panel uses the chart-level range, which
    /// includes aggregation headroom. Axes without a usable range or height
    /// get an empty scale and are skipped by rendering.
    pub fn prepare_axis_scales(&mut self) {
        let config = &self.core.config;
        let model = &mut self.core.model;
        for panel in model.panels.values() {
            if panel.hidden {
                continue;
            }
            let chart_range = panel
                .hosts_chart()
                .then(|| model.charts.get(&panel.chart_name).map(|chart| chart.value_range()))
                .flatten();

            for id in panel.axes() {
                let Some(axis) = model.axes.get_mut(id) else {
                    continue;
                };
                if axis.is_disabled {
                    continue;
                }
                let (low, high) = match chart_range {
                    Some(range) if id == panel.primary_axis => range,
                    _ => axis.value_range(),
                };
                let inputs = AxisScaleInputs {
                    height_px: axis.bottom - axis.top,
                    margin_top_px: axis
                        .options
                        .initial_margin_top_px
                        .unwrap_or(config.initial_margin_top_px),
                    margin_bottom_px: axis
                        .options
                        .initial_margin_bottom_px
                        .unwrap_or(config.initial_margin_bottom_px),
                    semi_log: axis.options.semi_log,
                    fixed_price_tick: axis.options.fixed_price_tick,
                    ideal_tick_spacing_px: config.ideal_tick_spacing_px,
                };
                axis.scale = AxisScale::from_range(low, high, inputs).unwrap_or_default();
                trace!(
                    axis = id.raw(),
                    low = axis.scale.low,
                    high = axis.scale.high,
                    tick = ?axis.scale.price_tick,
                    "prepared axis scale"
                );
            }
        }
    }
}
