use tracing::debug;

use crate::core::AxisId;
use crate::error::{ChartError, ChartResult};
use crate::render::Renderer;

use super::ChartEngine;
use super::dynamic_width::ResetDynamicAxisParams;

impl<R: Renderer> ChartEngine<R> {
    /// Detaches `axis_id` from `panel_name` when nothing draws against it.
    ///
    /// An axis stays while a series renderer of the panel's chart still
    /// targets it on this panel. A primary axis stays on the main chart panel
    /// and on panels where it is the only axis; otherwise the first other
    /// right-side axis (then left-side) is promoted to primary. Returns
    /// whether the axis was detached.
    pub fn delete_axis_if_unused(&mut self, panel_name: &str, axis_id: AxisId) -> ChartResult<bool> {
        let model = &self.core.model;
        let panel = model.panel(panel_name)?;
        let axis = model.axis(axis_id)?;
        let chart = model.chart(&panel.chart_name)?;

        let drawn_here = axis.renderers.iter().any(|id| {
            chart
                .series_renderers
                .get(id)
                .is_some_and(|binding| binding.panel == panel_name)
        });
        if drawn_here {
            return Ok(false);
        }
        let is_primary = panel.primary_axis == axis_id;
        if is_primary && (model.is_main_chart_panel(panel_name) || panel.axis_count() == 1) {
            return Ok(false);
        }
        if !panel.contains_axis(axis_id) {
            return Ok(false);
        }

        let replacement = panel
            .right_axes()
            .iter()
            .chain(panel.left_axes())
            .copied()
            .find(|id| *id != axis_id);

        let panel = self.core.model.panel_mut(panel_name)?;
        panel.detach_axis(axis_id);
        if is_primary && let Some(replacement) = replacement {
            panel.primary_axis = replacement;
        }
        if let Some(axis) = self.core.model.axes.get_mut(axis_id) {
            axis.options.transform = None;
        }
        self.core.model.axis_plots.shift_remove(&axis_id);
        debug!(
            panel = panel_name,
            axis = axis_id.raw(),
            replacement = ?replacement.filter(|_| is_primary).map(AxisId::raw),
            "deleted unused axis"
        );

        self.reset_dynamic_axis_width(ResetDynamicAxisParams::recalculate());
        Ok(true)
    }

    /// Closes a panel. Closing a chart's panel removes the chart and every
    /// panel drawing it. Studies and series renderers placed on removed
    /// panels go with them; their axes are released on the next layout.
    pub fn close_panel(&mut self, name: &str) -> ChartResult<()> {
        if self.core.model.is_main_chart_panel(name) {
            return Err(ChartError::InvalidData(format!(
                "main chart panel `{name}` cannot be closed"
            )));
        }
        if self.core.model.panel(name)?.soloing {
            self.solo_panel(name)?;
        }

        let model = &mut self.core.model;
        let removed: Vec<String> = if model.charts.contains_key(name) {
            model
                .panels
                .values()
                .filter(|panel| panel.chart_name == name)
                .map(|panel| panel.name.clone())
                .collect()
        } else {
            vec![name.to_owned()]
        };
        for panel in &removed {
            model.panels.shift_remove(panel);
        }
        model.charts.shift_remove(name);
        model
            .studies
            .retain(|_, study| !removed.contains(&study.panel));
        for chart in model.charts.values_mut() {
            chart
                .series_renderers
                .retain(|_, binding| !removed.contains(&binding.panel));
        }
        model.needs_layout = true;
        debug!(panel = name, removed = removed.len(), "close panel");

        if !model.importing {
            self.reset_dynamic_axis_width(ResetDynamicAxisParams::recalculate());
        }
        Ok(())
    }

    /// Toggles solo mode of `name`: every other panel is hidden (the main
    /// chart panel too only when soloing to full screen) and percentages are
    /// swapped so the soloed panel fills the space. A second call restores
    /// the previous state.
    pub fn solo_panel(&mut self, name: &str) -> ChartResult<()> {
        let full_screen = self.core.config.solo_panel_to_full_screen;
        let model = &mut self.core.model;
        let main = model.main_chart.clone();
        let is_main = name == main;
        let was_soloing = model.panel(name)?.soloing;

        if was_soloing {
            let others: f64 = model
                .panels
                .values()
                .filter(|panel| panel.name != name)
                .map(|panel| panel.percent)
                .sum();
            let panel = model.panel_mut(name)?;
            panel.soloing = false;
            if let Some(old) = panel.old_percent.take() {
                panel.percent = old;
            }
            if !is_main {
                if full_screen {
                    if (panel.percent - 1.0).abs() < f64::EPSILON {
                        panel.percent -= others;
                    }
                } else if let Some(chart_panel) = model.panels.get_mut(&main)
                    && let Some(old) = chart_panel.old_percent.take()
                {
                    chart_panel.percent = old;
                }
            }
        } else {
            let chart_percent = model.panels.get(&main).map(|panel| panel.percent);
            let panel = model.panel_mut(name)?;
            panel.soloing = true;
            panel.old_percent = Some(panel.percent);
            if !is_main
                && !full_screen
                && let Some(chart_percent) = chart_percent
            {
                panel.percent = 1.0 - chart_percent;
                if let Some(chart_panel) = model.panels.get_mut(&main) {
                    chart_panel.old_percent = Some(chart_percent);
                }
            }
        }

        let hide = !was_soloing;
        for panel in model.panels.values_mut() {
            if panel.name == name || (panel.name == main && !full_screen) {
                continue;
            }
            panel.hidden = hide;
        }
        model.needs_layout = true;
        debug!(panel = name, soloing = hide, full_screen, "solo panel");

        self.reset_dynamic_axis_width(ResetDynamicAxisParams::recalculate());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::api::{ChartEngine, ChartEngineConfig};
    use crate::core::{AxisOptions, Viewport};
    use crate::render::NullRenderer;

    fn engine() -> ChartEngine<NullRenderer> {
        let config = ChartEngineConfig::new(Viewport::new(800, 600));
        ChartEngine::new(NullRenderer::default(), config).expect("engine init")
    }

    #[test]
    fn primary_of_main_chart_panel_is_never_deleted() {
        let mut engine = engine();
        let primary = engine.panel("chart").expect("chart panel").primary_axis();
        let deleted = engine
            .delete_axis_if_unused("chart", primary)
            .expect("delete call");
        assert!(!deleted);
        assert!(engine.panel("chart").expect("chart panel").contains_axis(primary));
    }

    #[test]
    fn deleting_a_study_panel_primary_promotes_the_next_axis() {
        let mut engine = engine();
        let primary = engine.add_panel("rsi", "chart", 0.25).expect("panel");
        let extra = engine
            .add_axis("rsi", "extra", AxisOptions::default())
            .expect("axis");

        let deleted = engine
            .delete_axis_if_unused("rsi", primary)
            .expect("delete call");
        assert!(deleted);
        let panel = engine.panel("rsi").expect("panel");
        assert_eq!(panel.primary_axis(), extra);
        assert!(!panel.contains_axis(primary));
        assert!(engine.axis(primary).is_none());
    }

    #[test]
    fn solo_hides_other_panels_and_toggles_back() {
        let mut engine = engine();
        engine.set_panel_percent("chart", 0.7).expect("percent");
        engine.add_panel("rsi", "chart", 0.3).expect("panel");
        engine.add_panel("macd", "chart", 0.3).expect("panel");

        engine.solo_panel("rsi").expect("solo");
        let rsi = engine.panel("rsi").expect("rsi");
        assert!(rsi.is_soloing());
        assert!((rsi.percent() - 0.3).abs() < 1e-9);
        assert!(engine.panel("macd").expect("macd").is_hidden());
        assert!(!engine.panel("chart").expect("chart").is_hidden());

        engine.solo_panel("rsi").expect("unsolo");
        assert!(!engine.panel("rsi").expect("rsi").is_soloing());
        assert!(!engine.panel("macd").expect("macd").is_hidden());
        assert!((engine.panel("chart").expect("chart").percent() - 0.7).abs() < 1e-9);
    }

    #[test]
    fn closing_the_main_chart_panel_is_rejected() {
        let mut engine = engine();
        assert!(engine.close_panel("chart").is_err());
    }

    #[test]
    fn closing_a_panel_drops_its_studies() {
        let mut engine = engine();
        engine.add_panel("rsi", "chart", 0.25).expect("panel");
        engine
            .add_study(crate::core::StudyDescriptor::new("rsi (14)", "rsi"))
            .expect("study");

        engine.close_panel("rsi").expect("close");
        assert!(engine.panel("rsi").is_none());
        assert!(engine.study("rsi (14)").is_none());
    }
}
