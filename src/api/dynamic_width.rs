use tracing::debug;

use crate::render::Renderer;

use super::ChartEngine;

/// Options for [`ChartEngine::reset_dynamic_axis_width`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResetDynamicAxisParams {
    /// `Some(true)` always relayouts, `Some(false)` never does, `None`
    /// relayouts only when an override was actually cleared.
    pub position_recalculate: Option<bool>,
}

impl ResetDynamicAxisParams {
    #[must_use]
    pub const fn recalculate() -> Self {
        Self {
            position_recalculate: Some(true),
        }
    }

    #[must_use]
    pub const fn suppressed() -> Self {
        Self {
            position_recalculate: Some(false),
        }
    }
}

/// Decision taken after an axis's labels were measured.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) enum WidthAdjustment {
    Keep,
    /// Labels need `width`; the override grows and layout reruns.
    Grow(f64),
    /// Auto-width is off but an override lingers; it is cleared and layout reruns.
    Clear,
}

/// Compares the measured label width against the axis width.
#[must_use]
pub(super) fn width_adjustment(
    dynamic: bool,
    measured: Option<f64>,
    axis_width: f64,
    has_override: bool,
) -> WidthAdjustment {
    if dynamic {
        if let Some(measured) = measured
            && measured > axis_width
        {
            return WidthAdjustment::Grow(measured);
        }
        WidthAdjustment::Keep
    } else if has_override {
        WidthAdjustment::Clear
    } else {
        WidthAdjustment::Keep
    }
}

impl<R: Renderer> ChartEngine<R> {
    /// Clears every auto-width override (and the runtime width of those
    /// axes), then relayouts per `params`. Returns whether anything was
    /// cleared.
    pub fn reset_dynamic_axis_width(&mut self, params: ResetDynamicAxisParams) -> bool {
        let model = &mut self.core.model;
        let mut resetting = false;
        for panel in model.panels.values() {
            for id in panel.axes() {
                let Some(axis) = model.axes.get_mut(id) else {
                    continue;
                };
                if axis.dynamic_width.is_some_and(|width| width > 0.0) {
                    axis.dynamic_width = None;
                    axis.explicit_width = None;
                    resetting = true;
                }
            }
        }

        let recalculate = match params.position_recalculate {
            Some(explicit) => explicit,
            None => resetting,
        };
        debug!(resetting, recalculate, "reset dynamic axis width");
        if recalculate {
            self.calculate_axis_positions();
        }
        resetting
    }
}
