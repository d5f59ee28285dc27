use tracing::trace;

use crate::core::{Chart, split_vertical_regions};
use crate::error::{ChartError, ChartResult};
use crate::render::Renderer;

use super::ChartEngine;

/// Ticks that fit in `chart_width` at `candle_width`, dropping a partial tick.
fn ticks_for_width(chart_width: f64, candle_width: f64) -> usize {
    let ticks = (chart_width / candle_width - 0.499).round();
    if ticks.is_finite() && ticks > 0.0 {
        ticks as usize
    } else {
        0
    }
}

fn apply_candle_width(chart: &mut Chart, candle_width: f64) {
    if chart.width > 0.0 {
        chart.max_ticks = ticks_for_width(chart.width, candle_width);
    }
}

impl<R: Renderer> ChartEngine<R> {
    /// Sets the pixel width of one tick and recomputes how many fit.
    pub fn set_candle_width(&mut self, candle_width: f64) -> ChartResult<()> {
        if !candle_width.is_finite() || candle_width <= 0.0 {
            return Err(ChartError::InvalidData(
                "candle width must be finite and > 0".to_owned(),
            ));
        }
        let model = &mut self.core.model;
        model.candle_width = candle_width;
        let main = model.main_chart.clone();
        apply_candle_width(model.chart_mut(&main)?, candle_width);
        Ok(())
    }

    /// Fits `max_ticks` (at least 2) into the main chart width.
    pub fn set_max_ticks(&mut self, max_ticks: usize) -> ChartResult<()> {
        let max_ticks = max_ticks.max(2);
        let model = &mut self.core.model;
        let main = model.main_chart.clone();
        let chart = model
            .charts
            .get_mut(&main)
            .ok_or_else(|| ChartError::UnknownChart(main.clone()))?;
        chart.max_ticks = max_ticks;
        if chart.width > 0.0 {
            let candle_width = chart.width / max_ticks as f64;
            model.candle_width = candle_width;
            chart.max_ticks = ticks_for_width(chart.width, candle_width);
        }
        Ok(())
    }

    /// Re-derives tick density after the chart width changed: the candle
    /// width is kept when configured to, otherwise the tick count is.
    pub(super) fn adjust_candle_density(&mut self) {
        let preserve = self.core.config.preserve_candle_width_on_resize;
        let model = &self.core.model;
        let max_ticks = model
            .charts
            .get(&model.main_chart)
            .map_or(0, |chart| chart.max_ticks);
        let result = if preserve || max_ticks == 0 {
            let candle_width = model.candle_width;
            self.set_candle_width(candle_width)
        } else {
            self.set_max_ticks(max_ticks)
        };
        if let Err(err) = result {
            trace!(error = %err, "skipping density adjustment");
        }
    }

    /// Stacks visible panels vertically by percent and copies each panel's
    /// vertical bounds onto its axes.
    pub fn adjust_panel_positions(&mut self) {
        let height = f64::from(self.core.model.viewport.height);
        let model = &mut self.core.model;
        let visible: Vec<(String, f64)> = model
            .panels
            .values()
            .filter(|panel| !panel.hidden)
            .map(|panel| (panel.name.clone(), panel.percent))
            .collect();
        let weights: Vec<f64> = visible.iter().map(|(_, percent)| *percent).collect();
        let regions = split_vertical_regions(&weights, 0.0, height);

        for ((name, _), (top, bottom)) in visible.iter().zip(regions) {
            let axes = &mut model.axes;
            let Some(panel) = model.panels.get_mut(name) else {
                continue;
            };
            panel.top = top;
            panel.bottom = bottom;
            for id in panel.axes() {
                if let Some(axis) = axes.get_mut(id) {
                    axis.top = top;
                    axis.bottom = bottom;
                }
            }
            trace!(panel = %name, top, bottom, "panel vertical bounds");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ticks_for_width;

    #[test]
    fn partial_ticks_are_dropped() {
        assert_eq!(ticks_for_width(800.0, 8.0), 100);
        assert_eq!(ticks_for_width(804.0, 8.0), 100);
        assert_eq!(ticks_for_width(0.0, 8.0), 0);
    }
}
