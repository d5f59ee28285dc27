use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};

/// Public engine bootstrap configuration.
///
/// Serializable so hosts can keep chart setup next to their own settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartEngineConfig {
    pub viewport: Viewport,
    #[serde(default = "default_main_chart_name")]
    pub main_chart_name: String,
    #[serde(default = "default_axis_width_px")]
    pub default_axis_width_px: f64,
    #[serde(default = "default_axis_font_size_px")]
    pub axis_font_size_px: f64,
    /// Master override for axis borders; `None` defers to each axis.
    #[serde(default)]
    pub axis_borders: Option<bool>,
    #[serde(default = "default_margin_px")]
    pub initial_margin_top_px: f64,
    #[serde(default = "default_margin_px")]
    pub initial_margin_bottom_px: f64,
    #[serde(default = "default_ideal_tick_spacing_px")]
    pub ideal_tick_spacing_px: f64,
    #[serde(default = "default_max_relayout_attempts")]
    pub max_relayout_attempts: u32,
    #[serde(default = "default_candle_width_px")]
    pub candle_width_px: f64,
    #[serde(default)]
    pub preserve_candle_width_on_resize: bool,
    #[serde(default)]
    pub solo_panel_to_full_screen: bool,
}

fn default_main_chart_name() -> String {
    "chart".to_owned()
}

fn default_axis_width_px() -> f64 {
    50.0
}

fn default_axis_font_size_px() -> f64 {
    12.0
}

fn default_margin_px() -> f64 {
    10.0
}

fn default_ideal_tick_spacing_px() -> f64 {
    40.0
}

fn default_max_relayout_attempts() -> u32 {
    3
}

fn default_candle_width_px() -> f64 {
    8.0
}

impl ChartEngineConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            main_chart_name: default_main_chart_name(),
            default_axis_width_px: default_axis_width_px(),
            axis_font_size_px: default_axis_font_size_px(),
            axis_borders: None,
            initial_margin_top_px: default_margin_px(),
            initial_margin_bottom_px: default_margin_px(),
            ideal_tick_spacing_px: default_ideal_tick_spacing_px(),
            max_relayout_attempts: default_max_relayout_attempts(),
            candle_width_px: default_candle_width_px(),
            preserve_candle_width_on_resize: false,
            solo_panel_to_full_screen: false,
        }
    }

    #[must_use]
    pub fn with_default_axis_width(mut self, width_px: f64) -> Self {
        self.default_axis_width_px = width_px;
        self
    }

    #[must_use]
    pub fn with_margins(mut self, top_px: f64, bottom_px: f64) -> Self {
        self.initial_margin_top_px = top_px;
        self.initial_margin_bottom_px = bottom_px;
        self
    }

    #[must_use]
    pub fn with_axis_borders(mut self, borders: Option<bool>) -> Self {
        self.axis_borders = borders;
        self
    }

    #[must_use]
    pub fn with_max_relayout_attempts(mut self, attempts: u32) -> Self {
        self.max_relayout_attempts = attempts;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        if self.main_chart_name.is_empty() {
            return Err(ChartError::InvalidData(
                "main chart name must not be empty".to_owned(),
            ));
        }
        for (name, value) in [
            ("default axis width", self.default_axis_width_px),
            ("initial top margin", self.initial_margin_top_px),
            ("initial bottom margin", self.initial_margin_bottom_px),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        for (name, value) in [
            ("axis font size", self.axis_font_size_px),
            ("ideal tick spacing", self.ideal_tick_spacing_px),
            ("candle width", self.candle_width_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        if self.max_relayout_attempts == 0 {
            return Err(ChartError::InvalidData(
                "max relayout attempts must be >= 1".to_owned(),
            ));
        }
        Ok(())
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse engine config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize engine config: {e}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::ChartEngineConfig;
    use crate::core::Viewport;

    #[test]
    fn json_defaults_fill_missing_fields() {
        let config = ChartEngineConfig::from_json_str(r#"{"viewport":{"width":800,"height":600}}"#)
            .expect("parse config");
        assert_eq!(config, ChartEngineConfig::new(Viewport::new(800, 600)));
    }

    #[test]
    fn json_round_trip_preserves_overrides() {
        let config = ChartEngineConfig::new(Viewport::new(640, 480))
            .with_default_axis_width(64.0)
            .with_axis_borders(Some(false));
        let json = config.to_json_pretty().expect("serialize");
        let parsed = ChartEngineConfig::from_json_str(&json).expect("parse");
        assert_eq!(parsed, config);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(ChartEngineConfig::new(Viewport::new(0, 10)).validate().is_err());
        assert!(
            ChartEngineConfig::new(Viewport::new(10, 10))
                .with_max_relayout_attempts(0)
                .validate()
                .is_err()
        );
        assert!(
            ChartEngineConfig::new(Viewport::new(10, 10))
                .with_default_axis_width(f64::NAN)
                .validate()
                .is_err()
        );
    }
}
