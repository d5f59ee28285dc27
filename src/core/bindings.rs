use serde::{Deserialize, Serialize};

use crate::core::AxisId;

/// One series drawn by a renderer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SeriesParams {
    /// Symbol whose nested fields hold the series values.
    #[serde(default)]
    pub symbol: Option<String>,
    /// Single field of `symbol` to plot.
    #[serde(default)]
    pub sub_field: Option<String>,
    /// Top-level field plotted when no symbol is set.
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub disabled: bool,
}

impl SeriesParams {
    #[must_use]
    pub fn symbol(symbol: impl Into<String>) -> Self {
        Self {
            symbol: Some(symbol.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn field(field: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_sub_field(mut self, sub_field: impl Into<String>) -> Self {
        self.sub_field = Some(sub_field.into());
        self
    }
}

/// Binding of a series renderer to exactly one axis of one panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesRendererBinding {
    pub id: String,
    pub panel: String,
    /// Bound axis; `None` uses the panel's primary axis.
    #[serde(default)]
    pub axis: Option<AxisId>,
    /// OHLC semantics instead of single-value line semantics.
    #[serde(default)]
    pub high_low_bars: bool,
    /// Values are stored as arrays (bands) and need array-aware scanning.
    #[serde(default)]
    pub bounded: bool,
    /// Values of the series stack, so the range uses their sum.
    #[serde(default)]
    pub use_sum: bool,
    #[serde(default)]
    pub series: Vec<SeriesParams>,
}

impl SeriesRendererBinding {
    #[must_use]
    pub fn new(id: impl Into<String>, panel: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            panel: panel.into(),
            axis: None,
            high_low_bars: false,
            bounded: false,
            use_sum: false,
            series: Vec::new(),
        }
    }

    #[must_use]
    pub fn on_axis(mut self, axis: AxisId) -> Self {
        self.axis = Some(axis);
        self
    }

    #[must_use]
    pub fn with_series(mut self, series: SeriesParams) -> Self {
        self.series.push(series);
        self
    }
}

/// A computed indicator attached to a panel and an axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyDescriptor {
    pub name: String,
    pub panel: String,
    /// Axis an overlay study draws against; `None` uses the panel's primary
    /// axis. A non-overlay study feeds only the axis named after it.
    #[serde(default)]
    pub axis: Option<AxisId>,
    /// Output field names.
    #[serde(default)]
    pub outputs: Vec<String>,
    /// The study owns a multi-series renderer (needs OHLC sub-fields).
    #[serde(default)]
    pub has_renderer: bool,
    /// The study draws itself through a custom series function.
    #[serde(default)]
    pub has_series_fn: bool,
    #[serde(default)]
    pub disabled: bool,
    /// Signal reveal state; `Some(false)` keeps the study out of ranges.
    #[serde(default)]
    pub signal_revealed: Option<bool>,
    /// Drawn over another series rather than in its own space.
    #[serde(default)]
    pub overlay: bool,
}

impl StudyDescriptor {
    #[must_use]
    pub fn new(name: impl Into<String>, panel: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            panel: panel.into(),
            axis: None,
            outputs: Vec::new(),
            has_renderer: false,
            has_series_fn: false,
            disabled: false,
            signal_revealed: None,
            overlay: false,
        }
    }

    #[must_use]
    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.outputs.push(output.into());
        self
    }

    #[must_use]
    pub fn on_axis(mut self, axis: AxisId) -> Self {
        self.axis = Some(axis);
        self
    }

    #[must_use]
    pub fn as_overlay(mut self) -> Self {
        self.overlay = true;
        self
    }

    /// Whether the study currently contributes fields.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.disabled && self.signal_revealed != Some(false)
    }
}
