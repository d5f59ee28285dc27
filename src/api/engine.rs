use crate::error::ChartResult;
use crate::render::Renderer;

use super::render_coordinator::{DrawReport, RenderCoordinator};
use super::engine_core::EngineCore;

/// Main orchestration facade consumed by host applications.
///
/// `ChartEngine` owns charts, panels and their axes, resolves value ranges,
/// lays axes out horizontally and hands axis draw commands to the renderer.
pub struct ChartEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) core: EngineCore,
}

impl<R: Renderer> ChartEngine<R> {
    /// Runs one full draw: layout when dirty, range resolution, scale
    /// preparation and axis rendering, retrying while an axis asks for more
    /// width.
    pub fn draw(&mut self) -> ChartResult<DrawReport> {
        RenderCoordinator::draw(self)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
