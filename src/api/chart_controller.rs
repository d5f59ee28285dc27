use tracing::{debug, trace};

use crate::core::{
    Axis, AxisId, AxisOptions, AxisSide, Chart, ChartOptions, DataRecord, FractionalQuote, Panel,
    PriceFormatter, SeriesRendererBinding, StudyDescriptor, Viewport,
};
use crate::error::{ChartError, ChartResult};
use crate::render::Renderer;

use super::ChartEngine;

impl<R: Renderer> ChartEngine<R> {
    /// Adds a chart with its hosting panel (same name) and returns the
    /// panel's primary axis.
    pub fn add_chart(&mut self, name: &str, options: ChartOptions) -> ChartResult<AxisId> {
        let model = &self.core.model;
        if model.charts.contains_key(name) || model.panels.contains_key(name) {
            return Err(ChartError::InvalidData(format!(
                "chart or panel `{name}` already exists"
            )));
        }
        let axis = self.insert_panel(name, name, 1.0)?;
        self.core
            .model
            .charts
            .insert(name.to_owned(), Chart::new(name, options));
        debug!(chart = name, axis = axis.raw(), "add chart");
        Ok(axis)
    }

    /// Adds a panel overlaying `chart_name` and returns its primary axis.
    pub fn add_panel(&mut self, name: &str, chart_name: &str, percent: f64) -> ChartResult<AxisId> {
        self.core.model.chart(chart_name)?;
        if self.core.model.panels.contains_key(name) || self.core.model.charts.contains_key(name) {
            return Err(ChartError::InvalidData(format!(
                "panel `{name}` already exists"
            )));
        }
        if !percent.is_finite() || percent < 0.0 {
            return Err(ChartError::InvalidData(
                "panel percent must be finite and >= 0".to_owned(),
            ));
        }
        let axis = self.insert_panel(name, chart_name, percent)?;
        debug!(panel = name, chart = chart_name, axis = axis.raw(), "add panel");
        Ok(axis)
    }

    fn insert_panel(&mut self, name: &str, chart_name: &str, percent: f64) -> ChartResult<AxisId> {
        let model = &mut self.core.model;
        let axis = Axis::new(
            name,
            AxisOptions::default(),
            self.core.config.default_axis_width_px,
        );
        let id = model.axes.insert(axis);
        let mut panel = Panel::new(name, chart_name, id, percent);
        let side = model.default_axis_side(&panel);
        panel.mount_axis(id, side);
        model.panels.insert(name.to_owned(), panel);
        model.needs_layout = true;
        Ok(id)
    }

    /// Creates an axis on `panel_name`. It is mounted on its requested side,
    /// or the panel default side, until the next layout pass settles it.
    pub fn add_axis(
        &mut self,
        panel_name: &str,
        name: &str,
        options: AxisOptions,
    ) -> ChartResult<AxisId> {
        options.validate()?;
        let model = &mut self.core.model;
        let panel = model.panel(panel_name)?;
        let side = options
            .side
            .unwrap_or_else(|| model.default_axis_side(panel));
        let id = model.axes.insert(Axis::new(
            name,
            options,
            self.core.config.default_axis_width_px,
        ));
        model.panel_mut(panel_name)?.mount_axis(id, side);
        model.needs_layout = true;
        debug!(panel = panel_name, axis = id.raw(), name, ?side, "add axis");
        Ok(id)
    }

    pub fn set_axis_options(&mut self, id: AxisId, options: AxisOptions) -> ChartResult<()> {
        options.validate()?;
        let default_width = self.core.config.default_axis_width_px;
        let axis = self.core.model.axis_mut(id)?;
        axis.base_width = options.width.unwrap_or(default_width);
        axis.options = options;
        self.invalidate_axis(id);
        Ok(())
    }

    /// Requests a side; `None` inherits the panel default on the next layout.
    pub fn set_axis_side(&mut self, id: AxisId, side: Option<AxisSide>) -> ChartResult<()> {
        self.core.model.axis_mut(id)?.options.side = side;
        self.invalidate_axis(id);
        Ok(())
    }

    /// Sets the runtime width; `None` restores the configured width.
    pub fn set_axis_width(&mut self, id: AxisId, width: Option<f64>) -> ChartResult<()> {
        if let Some(width) = width
            && (!width.is_finite() || width < 0.0)
        {
            return Err(ChartError::InvalidData(
                "axis width must be finite and >= 0".to_owned(),
            ));
        }
        self.core.model.axis_mut(id)?.explicit_width = width;
        self.invalidate_axis(id);
        Ok(())
    }

    pub fn set_axis_no_draw(&mut self, id: AxisId, no_draw: bool) -> ChartResult<()> {
        self.core.model.axis_mut(id)?.options.no_draw = no_draw;
        self.invalidate_axis(id);
        Ok(())
    }

    pub fn set_axis_fractional(
        &mut self,
        id: AxisId,
        fractional: Option<FractionalQuote>,
    ) -> ChartResult<()> {
        if let Some(resolution) = fractional.as_ref().and_then(|f| f.resolution)
            && (!resolution.is_finite() || resolution <= 0.0)
        {
            return Err(ChartError::InvalidData(
                "fractional resolution must be finite and > 0".to_owned(),
            ));
        }
        self.core.model.axis_mut(id)?.options.fractional = fractional;
        self.core.model.axis_plots.shift_remove(&id);
        Ok(())
    }

    pub fn set_axis_price_formatter(
        &mut self,
        id: AxisId,
        formatter: Option<PriceFormatter>,
    ) -> ChartResult<()> {
        self.core.model.axis_mut(id)?.set_price_formatter(formatter);
        self.core.model.axis_plots.shift_remove(&id);
        Ok(())
    }

    pub fn set_panel_percent(&mut self, name: &str, percent: f64) -> ChartResult<()> {
        if !percent.is_finite() || percent < 0.0 {
            return Err(ChartError::InvalidData(
                "panel percent must be finite and >= 0".to_owned(),
            ));
        }
        self.core.model.panel_mut(name)?.percent = percent;
        self.core.model.needs_layout = true;
        Ok(())
    }

    pub fn set_panel_hidden(&mut self, name: &str, hidden: bool) -> ChartResult<()> {
        self.core.model.panel_mut(name)?.hidden = hidden;
        self.core.model.needs_layout = true;
        Ok(())
    }

    pub fn set_chart_hidden(&mut self, name: &str, hidden: bool) -> ChartResult<()> {
        self.core.model.chart_mut(name)?.hidden = hidden;
        self.core.model.needs_layout = true;
        Ok(())
    }

    /// Toggles label-driven axis auto-width for `chart_name`.
    pub fn set_dynamic_y_axis(&mut self, chart_name: &str, dynamic: bool) -> ChartResult<()> {
        self.core.model.chart_mut(chart_name)?.options.dynamic_y_axis = dynamic;
        Ok(())
    }

    /// Overrides the horizontal padding reserved for axes of `chart_name`.
    pub fn set_chart_axis_padding(
        &mut self,
        chart_name: &str,
        left: Option<f64>,
        right: Option<f64>,
    ) -> ChartResult<()> {
        for padding in [left, right].into_iter().flatten() {
            if !padding.is_finite() || padding < 0.0 {
                return Err(ChartError::InvalidData(
                    "axis padding must be finite and >= 0".to_owned(),
                ));
            }
        }
        let chart = self.core.model.chart_mut(chart_name)?;
        chart.options.y_axis_padding_left = left;
        chart.options.y_axis_padding_right = right;
        self.core.model.needs_layout = true;
        Ok(())
    }

    pub fn set_chart_options(&mut self, chart_name: &str, options: ChartOptions) -> ChartResult<()> {
        self.core.model.chart_mut(chart_name)?.options = options;
        self.core.model.needs_layout = true;
        Ok(())
    }

    /// Binds a series renderer; an existing binding with the same id is replaced.
    pub fn add_series_renderer(
        &mut self,
        chart_name: &str,
        binding: SeriesRendererBinding,
    ) -> ChartResult<()> {
        let model = &self.core.model;
        model.chart(chart_name)?;
        model.panel(&binding.panel)?;
        if let Some(axis) = binding.axis {
            model.axis(axis)?;
        }
        trace!(chart = chart_name, renderer = %binding.id, panel = %binding.panel, "add series renderer");
        self.core
            .model
            .chart_mut(chart_name)?
            .series_renderers
            .insert(binding.id.clone(), binding);
        Ok(())
    }

    pub fn remove_series_renderer(&mut self, chart_name: &str, id: &str) -> ChartResult<bool> {
        Ok(self
            .core
            .model
            .chart_mut(chart_name)?
            .series_renderers
            .shift_remove(id)
            .is_some())
    }

    /// Registers a study; an existing study with the same name is replaced.
    pub fn add_study(&mut self, study: StudyDescriptor) -> ChartResult<()> {
        self.core.model.panel(&study.panel)?;
        if let Some(axis) = study.axis {
            self.core.model.axis(axis)?;
        }
        trace!(study = %study.name, panel = %study.panel, "add study");
        self.core.model.studies.insert(study.name.clone(), study);
        Ok(())
    }

    pub fn remove_study(&mut self, name: &str) -> Option<StudyDescriptor> {
        self.core.model.studies.shift_remove(name)
    }

    /// Replaces the visible data window of `chart_name`.
    pub fn set_data_segment(&mut self, chart_name: &str, records: Vec<DataRecord>) -> ChartResult<()> {
        let chart = self.core.model.chart_mut(chart_name)?;
        debug!(chart = chart_name, count = records.len(), "set data segment");
        chart.data_segment = records;
        Ok(())
    }

    pub fn set_chart_scroll(&mut self, chart_name: &str, scroll: usize) -> ChartResult<()> {
        self.core.model.chart_mut(chart_name)?.scroll = scroll;
        Ok(())
    }

    pub fn set_chart_micropixels(&mut self, chart_name: &str, micropixels: f64) -> ChartResult<()> {
        if !micropixels.is_finite() {
            return Err(ChartError::InvalidData(
                "micropixels must be finite".to_owned(),
            ));
        }
        self.core.model.chart_mut(chart_name)?.micropixels = micropixels;
        Ok(())
    }

    /// While importing, empty axes are kept and panel closing skips relayout.
    pub fn set_importing(&mut self, importing: bool) {
        self.core.model.importing = importing;
    }

    pub fn set_viewport(&mut self, viewport: Viewport) -> ChartResult<()> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        self.core.model.viewport = viewport;
        self.core.config.viewport = viewport;
        self.core.model.needs_layout = true;
        Ok(())
    }

    fn invalidate_axis(&mut self, id: AxisId) {
        self.core.model.axis_plots.shift_remove(&id);
        self.core.model.needs_layout = true;
    }
}
