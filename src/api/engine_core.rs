use crate::render::TextMeasurer;

use super::{AxisLifecycleListener, ChartEngineConfig, chart_model::ChartModel};

/// Internal engine state used by the public facade (`ChartEngine`).
pub(super) struct EngineCore {
    pub(super) config: ChartEngineConfig,
    pub(super) model: ChartModel,
    pub(super) measurer: Box<dyn TextMeasurer>,
    pub(super) lifecycle_listeners: Vec<Box<dyn AxisLifecycleListener>>,
}
