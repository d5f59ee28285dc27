mod null_renderer;
mod plotter;
mod primitives;
mod text_measure;

pub use null_renderer::NullRenderer;
pub use plotter::{AxisPlotter, SeriesBatch};
pub use primitives::{Color, LinePrimitive, PlotSeries, TextHAlign, TextPrimitive};
pub use text_measure::{EstimatedTextMeasurer, MonospaceTextMeasurer, TextMeasurer};

use crate::error::ChartResult;

/// Contract implemented by any drawing surface.
///
/// Axis rendering hands over one named series batch at a time (grid, text,
/// border) so backends can route them to different canvases.
pub trait Renderer {
    fn draw_batch(&mut self, series: PlotSeries, batch: &SeriesBatch) -> ChartResult<()>;
}
