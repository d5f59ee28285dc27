use tracing::debug;

use crate::core::ChartOptions;
use crate::error::ChartResult;
use crate::render::{EstimatedTextMeasurer, Renderer, TextMeasurer};

use super::{ChartEngine, ChartEngineConfig, chart_model::ChartModel, engine_core::EngineCore};

impl<R: Renderer> ChartEngine<R> {
    /// Creates an engine with the main chart, its panel and primary axis.
    pub fn new(renderer: R, config: ChartEngineConfig) -> ChartResult<Self> {
        Self::with_chart_options(renderer, config, ChartOptions::default())
    }

    pub fn with_chart_options(
        renderer: R,
        config: ChartEngineConfig,
        options: ChartOptions,
    ) -> ChartResult<Self> {
        config.validate()?;
        let model = ChartModel::new(
            config.viewport,
            config.main_chart_name.clone(),
            config.candle_width_px,
        );
        let main_chart = config.main_chart_name.clone();
        let mut engine = Self {
            renderer,
            core: EngineCore {
                config,
                model,
                measurer: Box::new(EstimatedTextMeasurer),
                lifecycle_listeners: Vec::new(),
            },
        };
        engine.add_chart(&main_chart, options)?;
        debug!(chart = %main_chart, "engine initialized");
        Ok(engine)
    }

    /// Replaces the measurer used by the auto-width feedback loop.
    #[must_use]
    pub fn with_text_measurer(mut self, measurer: impl TextMeasurer + 'static) -> Self {
        self.set_text_measurer(measurer);
        self
    }

    pub fn set_text_measurer(&mut self, measurer: impl TextMeasurer + 'static) {
        self.core.measurer = Box::new(measurer);
    }

    #[must_use]
    pub fn config(&self) -> &ChartEngineConfig {
        &self.core.config
    }
}
