use indexmap::{IndexMap, IndexSet};

use crate::core::{Axis, AxisArena, AxisId, AxisSide, Chart, Panel, StudyDescriptor, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::AxisPlotter;

/// Mutable chart domain state: charts, panels, the axis arena and the
/// bindings that reference axes by id.
pub(super) struct ChartModel {
    pub(super) viewport: Viewport,
    pub(super) main_chart: String,
    pub(super) charts: IndexMap<String, Chart>,
    pub(super) panels: IndexMap<String, Panel>,
    pub(super) axes: AxisArena,
    pub(super) studies: IndexMap<String, StudyDescriptor>,
    /// Axes that were mounted on a panel after the last layout pass.
    pub(super) active_axes: IndexSet<AxisId>,
    pub(super) candle_width: f64,
    pub(super) importing: bool,
    pub(super) needs_layout: bool,
    pub(super) axis_plots: IndexMap<AxisId, AxisPlotter>,
}

impl ChartModel {
    pub(super) fn new(viewport: Viewport, main_chart: String, candle_width: f64) -> Self {
        Self {
            viewport,
            main_chart,
            charts: IndexMap::new(),
            panels: IndexMap::new(),
            axes: AxisArena::default(),
            studies: IndexMap::new(),
            active_axes: IndexSet::new(),
            candle_width,
            importing: false,
            needs_layout: true,
            axis_plots: IndexMap::new(),
        }
    }

    pub(super) fn chart(&self, name: &str) -> ChartResult<&Chart> {
        self.charts
            .get(name)
            .ok_or_else(|| ChartError::UnknownChart(name.to_owned()))
    }

    pub(super) fn chart_mut(&mut self, name: &str) -> ChartResult<&mut Chart> {
        self.charts
            .get_mut(name)
            .ok_or_else(|| ChartError::UnknownChart(name.to_owned()))
    }

    pub(super) fn panel(&self, name: &str) -> ChartResult<&Panel> {
        self.panels
            .get(name)
            .ok_or_else(|| ChartError::UnknownPanel(name.to_owned()))
    }

    pub(super) fn panel_mut(&mut self, name: &str) -> ChartResult<&mut Panel> {
        self.panels
            .get_mut(name)
            .ok_or_else(|| ChartError::UnknownPanel(name.to_owned()))
    }

    pub(super) fn axis(&self, id: AxisId) -> ChartResult<&Axis> {
        self.axes.get(id).ok_or(ChartError::UnknownAxis(id))
    }

    pub(super) fn axis_mut(&mut self, id: AxisId) -> ChartResult<&mut Axis> {
        self.axes.get_mut(id).ok_or(ChartError::UnknownAxis(id))
    }

    /// Side an axis without an explicit request lands on: the panel's
    /// primary axis side, then the chart panel's, then right.
    pub(super) fn default_axis_side(&self, panel: &Panel) -> AxisSide {
        self.axes
            .get(panel.primary_axis)
            .and_then(Axis::requested_side)
            .or_else(|| {
                self.panels
                    .get(&panel.chart_name)
                    .and_then(|chart_panel| self.axes.get(chart_panel.primary_axis))
                    .and_then(Axis::requested_side)
            })
            .unwrap_or(AxisSide::Right)
    }

    /// Primary axis of the panel hosting `chart_name`.
    pub(super) fn chart_primary_axis(&self, chart_name: &str) -> Option<AxisId> {
        self.panels.get(chart_name).map(|panel| panel.primary_axis)
    }

    pub(super) fn is_main_chart_panel(&self, panel_name: &str) -> bool {
        panel_name == self.main_chart
    }
}
