use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{DataRecord, SeriesRendererBinding};

/// Fixed-box aggregation (point & figure style) active on a chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aggregation {
    pub box_size: f64,
}

/// Baseline rendering mode of a chart's primary axis.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BaselineConfig {
    /// Baseline value; `None` disables baseline range adjustment.
    #[serde(default)]
    pub level: Option<f64>,
    /// Widen the range so the baseline is always on screen.
    #[serde(default)]
    pub include_in_range: bool,
    /// Center the range on the baseline.
    #[serde(default)]
    pub centered: bool,
}

impl BaselineConfig {
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.level.is_some_and(f64::is_finite) && (self.include_in_range || self.centered)
    }
}

/// Construction-time chart options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartOptions {
    #[serde(default)]
    pub default_plot_field: Option<String>,
    #[serde(default = "default_true")]
    pub include_overlays_in_min_max: bool,
    #[serde(default = "default_true")]
    pub dynamic_y_axis: bool,
    #[serde(default)]
    pub y_axis_padding_left: Option<f64>,
    #[serde(default)]
    pub y_axis_padding_right: Option<f64>,
    #[serde(default)]
    pub aggregation: Option<Aggregation>,
    #[serde(default)]
    pub baseline: BaselineConfig,
}

fn default_true() -> bool {
    true
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            default_plot_field: None,
            include_overlays_in_min_max: true,
            dynamic_y_axis: true,
            y_axis_padding_left: None,
            y_axis_padding_right: None,
            aggregation: None,
            baseline: BaselineConfig::default(),
        }
    }
}

/// One data set rendered by a host panel (and possibly overlaid by others).
#[derive(Debug, Clone)]
pub struct Chart {
    pub(crate) name: String,
    pub(crate) options: ChartOptions,
    pub(crate) hidden: bool,
    pub(crate) left: f64,
    pub(crate) right: f64,
    pub(crate) width: f64,
    pub(crate) low_value: f64,
    pub(crate) high_value: f64,
    pub(crate) data_segment: Vec<DataRecord>,
    pub(crate) series_renderers: IndexMap<String, SeriesRendererBinding>,
    pub(crate) max_ticks: usize,
    pub(crate) scroll: usize,
    pub(crate) micropixels: f64,
}

impl Chart {
    #[must_use]
    pub fn new(name: impl Into<String>, options: ChartOptions) -> Self {
        Self {
            name: name.into(),
            options,
            hidden: false,
            left: 0.0,
            right: 0.0,
            width: 0.0,
            low_value: 0.0,
            high_value: 0.0,
            data_segment: Vec::new(),
            series_renderers: IndexMap::new(),
            max_ticks: 0,
            scroll: 0,
            micropixels: 0.0,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the panel hosting this chart.
    #[must_use]
    pub fn panel_name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn options(&self) -> &ChartOptions {
        &self.options
    }

    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    #[must_use]
    pub fn left(&self) -> f64 {
        self.left
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.right
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Resolved `(low, high)` of the chart panel's primary axis.
    #[must_use]
    pub fn value_range(&self) -> (f64, f64) {
        (self.low_value, self.high_value)
    }

    #[must_use]
    pub fn data_segment(&self) -> &[DataRecord] {
        &self.data_segment
    }

    #[must_use]
    pub fn series_renderers(&self) -> &IndexMap<String, SeriesRendererBinding> {
        &self.series_renderers
    }

    #[must_use]
    pub fn max_ticks(&self) -> usize {
        self.max_ticks
    }

    #[must_use]
    pub fn scroll(&self) -> usize {
        self.scroll
    }

    /// Base field plotted by line-style series (`Close` unless overridden).
    #[must_use]
    pub fn default_plot_field(&self) -> &str {
        self.options.default_plot_field.as_deref().unwrap_or("Close")
    }
}
