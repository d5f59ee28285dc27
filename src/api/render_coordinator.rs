use serde::Serialize;
use tracing::{debug, warn};

use crate::core::AxisId;
use crate::error::{ChartError, ChartResult};
use crate::render::Renderer;

use super::ChartEngine;
use super::axis_renderer::{AxisRenderOutcome, AxisRenderParams};

/// Summary of a completed [`ChartEngine::draw`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DrawReport {
    /// Passes run, including the final successful one.
    pub attempts: u32,
    pub axes_rendered: usize,
}

enum DrawPass {
    Complete { axes_rendered: usize },
    NeedsRelayout { axes: Vec<AxisId> },
}

pub(super) struct RenderCoordinator;

impl RenderCoordinator {
    pub(super) fn draw<R: Renderer>(engine: &mut ChartEngine<R>) -> ChartResult<DrawReport> {
        let max_attempts = engine.core.config.max_relayout_attempts.max(1);
        for attempt in 1..=max_attempts {
            match draw_pass(engine)? {
                DrawPass::Complete { axes_rendered } => {
                    debug!(attempt, axes_rendered, "draw complete");
                    return Ok(DrawReport {
                        attempts: attempt,
                        axes_rendered,
                    });
                }
                DrawPass::NeedsRelayout { axes } => {
                    debug!(
                        attempt,
                        axes = ?axes.iter().map(|axis| axis.raw()).collect::<Vec<_>>(),
                        "axis geometry changed; restarting draw"
                    );
                }
            }
        }
        warn!(attempts = max_attempts, "axis layout did not settle");
        Err(ChartError::RelayoutLimitExceeded {
            attempts: max_attempts,
        })
    }
}

fn draw_pass<R: Renderer>(engine: &mut ChartEngine<R>) -> ChartResult<DrawPass> {
    engine.recompute_layout(false);

    let charts: Vec<String> = engine.core.model.charts.keys().cloned().collect();
    for chart in &charts {
        engine.resolve_display_ranges(chart)?;
    }
    engine.prepare_axis_scales();

    let panels: Vec<String> = engine
        .core
        .model
        .panels
        .values()
        .filter(|panel| !panel.hidden)
        .map(|panel| panel.name.clone())
        .collect();
    // Once one axis needs relayout the rest are still measured, so every
    // width change of this frame lands in the same retry.
    let mut axes_rendered = 0;
    let mut relayout: Vec<AxisId> = Vec::new();
    for panel in &panels {
        let Some(axes) = engine
            .core
            .model
            .panels
            .get(panel)
            .map(|panel| panel.axes().collect::<Vec<_>>())
        else {
            continue;
        };
        for axis in axes {
            let flush = relayout.is_empty();
            match engine.plan_and_render_axis(panel, axis, AxisRenderParams::default(), flush)? {
                AxisRenderOutcome::Drawn => axes_rendered += 1,
                AxisRenderOutcome::Skipped(_) => {}
                AxisRenderOutcome::NeedsRelayout => relayout.push(axis),
            }
        }
        if relayout.is_empty() {
            engine.plot_axis_text(panel)?;
        }
    }
    if relayout.is_empty() {
        Ok(DrawPass::Complete { axes_rendered })
    } else {
        Ok(DrawPass::NeedsRelayout { axes: relayout })
    }
}
