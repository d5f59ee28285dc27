use crate::core::{Axis, AxisId, Chart, Panel, StudyDescriptor, Viewport};
use crate::render::{AxisPlotter, Renderer};

use super::ChartEngine;

impl<R: Renderer> ChartEngine<R> {
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.core.model.viewport
    }

    #[must_use]
    pub fn main_chart_name(&self) -> &str {
        &self.core.model.main_chart
    }

    #[must_use]
    pub fn chart(&self, name: &str) -> Option<&Chart> {
        self.core.model.charts.get(name)
    }

    pub fn charts(&self) -> impl Iterator<Item = &Chart> {
        self.core.model.charts.values()
    }

    #[must_use]
    pub fn panel(&self, name: &str) -> Option<&Panel> {
        self.core.model.panels.get(name)
    }

    /// Panels in creation order.
    pub fn panels(&self) -> impl Iterator<Item = &Panel> {
        self.core.model.panels.values()
    }

    #[must_use]
    pub fn axis(&self, id: AxisId) -> Option<&Axis> {
        self.core.model.axes.get(id)
    }

    /// Every axis record still owned by the engine.
    pub fn axes(&self) -> impl Iterator<Item = (AxisId, &Axis)> {
        self.core.model.axes.iter()
    }

    #[must_use]
    pub fn study(&self, name: &str) -> Option<&StudyDescriptor> {
        self.core.model.studies.get(name)
    }

    /// Draw list recorded for `id` by the last successful axis render.
    #[must_use]
    pub fn axis_plot(&self, id: AxisId) -> Option<&AxisPlotter> {
        self.core.model.axis_plots.get(&id)
    }

    #[must_use]
    pub fn candle_width(&self) -> f64 {
        self.core.model.candle_width
    }

    #[must_use]
    pub fn is_importing(&self) -> bool {
        self.core.model.importing
    }
}
