use tracing::{debug, trace};

use crate::core::{AxisId, AxisSide};
use crate::error::{ChartError, ChartResult};
use crate::render::{PlotSeries, Renderer};

use super::ChartEngine;
use super::dynamic_width::{ResetDynamicAxisParams, WidthAdjustment, width_adjustment};
use super::price_format::format_axis_price;
use super::tick_planner::{TickPlanInputs, plan_axis_ticks};

/// Per-call options of [`ChartEngine::render_axis`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AxisRenderParams {
    /// Span to plot instead of the axis scale span.
    pub range: Option<(f64, f64)>,
    /// Skip drawing entirely for this call.
    pub no_draw: bool,
    /// Reuse the last plot of this axis when one exists.
    pub no_change: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisSkipReason {
    PanelHidden,
    AxisHidden,
    NoDraw,
    MissingTickSize,
}

/// Result of rendering one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisRenderOutcome {
    Drawn,
    Skipped(AxisSkipReason),
    /// Geometry changed while rendering; the current draw pass must be
    /// abandoned and restarted from layout.
    NeedsRelayout,
}

impl<R: Renderer> ChartEngine<R> {
    /// Plans and draws ticks, grid and border of `axis` on `panel_name`.
    ///
    /// Border lines are flushed immediately and grid lines after the width
    /// check; labels are deferred to [`ChartEngine::plot_axis_text`]. When
    /// auto-width needs a wider axis (or a stale override must go), layout is
    /// recomputed and [`AxisRenderOutcome::NeedsRelayout`] is returned.
    pub fn render_axis(
        &mut self,
        panel_name: &str,
        axis_id: AxisId,
        params: AxisRenderParams,
    ) -> ChartResult<AxisRenderOutcome> {
        self.plan_and_render_axis(panel_name, axis_id, params, true)
    }

    /// With `flush` off the axis is planned and measured but nothing reaches
    /// the renderer.
    pub(super) fn plan_and_render_axis(
        &mut self,
        panel_name: &str,
        axis_id: AxisId,
        params: AxisRenderParams,
        flush: bool,
    ) -> ChartResult<AxisRenderOutcome> {
        let model = &self.core.model;
        let panel = model.panel(panel_name)?;
        let Some(side) = panel.side_of(axis_id) else {
            return Err(ChartError::UnknownAxis(axis_id));
        };
        if panel.hidden {
            return Ok(AxisRenderOutcome::Skipped(AxisSkipReason::PanelHidden));
        }
        let is_a_chart = panel.hosts_chart() && panel.primary_axis == axis_id;
        let condense = !panel.hosts_chart();
        let (panel_left, panel_right, panel_top, panel_bottom) =
            (panel.left, panel.right, panel.top, panel.bottom);
        let chart = model.chart(&panel.chart_name)?;
        let dynamic = chart.options.dynamic_y_axis;
        let chart_border = model
            .chart_primary_axis(&chart.name)
            .and_then(|id| model.axes.get(id))
            .and_then(|axis| axis.options.display_border);

        let axis = self.core.model.axis_mut(axis_id)?;
        axis.sync_fractional_formatter();
        if axis.is_hidden() {
            return Ok(AxisRenderOutcome::Skipped(AxisSkipReason::AxisHidden));
        }
        if params.no_draw || axis.options.no_draw {
            return Ok(AxisRenderOutcome::Skipped(AxisSkipReason::NoDraw));
        }

        if params.no_change && self.core.model.axis_plots.contains_key(&axis_id) {
            if flush {
                self.plot_axis_grid(axis_id)?;
            }
            return Ok(AxisRenderOutcome::Drawn);
        }

        let axis = self.core.model.axis(axis_id)?;
        if axis.scale.price_tick.is_none() {
            trace!(axis = axis_id.raw(), "axis has no tick size; skipping");
            return Ok(AxisRenderOutcome::Skipped(AxisSkipReason::MissingTickSize));
        }

        let draw_borders = self
            .core
            .config
            .axis_borders
            .unwrap_or_else(|| axis.options.display_border.or(chart_border).unwrap_or(true));
        let formatter = axis.formatter.clone();
        let decimals = axis
            .options
            .decimal_places
            .unwrap_or(axis.scale.decimal_places);
        let format = move |price: f64| match &formatter {
            Some(formatter) => formatter.format(price),
            None => format_axis_price(price, decimals, condense),
        };
        let axis_width = axis.width();
        let has_override = axis.dynamic_width.is_some_and(|width| width > 0.0);
        let inputs = TickPlanInputs {
            scale: &axis.scale,
            range: params.range,
            is_chart_axis: is_a_chart,
            side,
            justify: axis.options.justify,
            flipped: axis.options.flipped,
            display_grid_lines: axis.options.display_grid_lines,
            draw_borders,
            axis_left: axis.left,
            axis_width,
            axis_top: axis.top,
            axis_bottom: axis.bottom,
            panel_left,
            panel_right,
            panel_top,
            panel_bottom,
            font_size_px: self.core.config.axis_font_size_px,
            measure_labels: dynamic,
        };
        let plan = plan_axis_ticks(&inputs, &format, self.core.measurer.as_ref());
        trace!(
            axis = axis_id.raw(),
            ticks = plan.ticks.len(),
            label_width = ?plan.label_width,
            "planned axis ticks"
        );

        let plotter = plan.to_plotter();
        if flush && draw_borders {
            plotter.draw(&mut self.renderer, PlotSeries::Border)?;
        }
        self.core.model.axis_plots.insert(axis_id, plotter);

        match width_adjustment(dynamic, plan.label_width, axis_width, has_override) {
            WidthAdjustment::Grow(width) => {
                debug!(
                    axis = axis_id.raw(),
                    from = axis_width,
                    to = width,
                    "axis labels need more width"
                );
                self.core.model.axis_mut(axis_id)?.dynamic_width = Some(width);
                self.calculate_axis_positions();
                return Ok(AxisRenderOutcome::NeedsRelayout);
            }
            WidthAdjustment::Clear => {
                debug!(axis = axis_id.raw(), "clearing stale axis width override");
                self.reset_dynamic_axis_width(ResetDynamicAxisParams::default());
                return Ok(AxisRenderOutcome::NeedsRelayout);
            }
            WidthAdjustment::Keep => {}
        }

        if flush {
            self.plot_axis_grid(axis_id)?;
        }
        Ok(AxisRenderOutcome::Drawn)
    }

    fn plot_axis_grid(&mut self, axis_id: AxisId) -> ChartResult<()> {
        match self.core.model.axis_plots.get(&axis_id) {
            Some(plotter) => plotter.draw(&mut self.renderer, PlotSeries::Grid),
            None => Ok(()),
        }
    }

    /// Flushes the deferred labels of every visible axis on `panel_name`,
    /// left axes first.
    pub fn plot_axis_text(&mut self, panel_name: &str) -> ChartResult<()> {
        let model = &self.core.model;
        let panel = model.panel(panel_name)?;
        for side in [AxisSide::Left, AxisSide::Right] {
            let ids = match side {
                AxisSide::Left => panel.left_axes(),
                AxisSide::Right => panel.right_axes(),
            };
            for id in ids {
                let Some(axis) = model.axes.get(*id) else {
                    continue;
                };
                if axis.is_hidden() {
                    continue;
                }
                if let Some(plotter) = model.axis_plots.get(id) {
                    plotter.draw(&mut self.renderer, PlotSeries::Text)?;
                }
            }
        }
        Ok(())
    }
}
