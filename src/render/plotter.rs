use indexmap::IndexMap;

use crate::error::ChartResult;
use crate::render::{LinePrimitive, PlotSeries, Renderer, TextPrimitive};

/// Commands collected for one named series.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SeriesBatch {
    pub lines: Vec<LinePrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl SeriesBatch {
    pub fn validate(&self) -> ChartResult<()> {
        for line in &self.lines {
            line.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }
        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.texts.is_empty()
    }
}

/// Deferred draw list for one axis, grouped by series so grid, border and
/// text can be flushed at different points of the draw pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AxisPlotter {
    series: IndexMap<PlotSeries, SeriesBatch>,
}

impl AxisPlotter {
    #[must_use]
    pub fn new() -> Self {
        let mut series = IndexMap::new();
        for kind in [PlotSeries::Grid, PlotSeries::Text, PlotSeries::Border] {
            series.insert(kind, SeriesBatch::default());
        }
        Self { series }
    }

    pub fn segment(&mut self, series: PlotSeries, from: (f64, f64), to: (f64, f64)) {
        self.series
            .entry(series)
            .or_default()
            .lines
            .push(LinePrimitive::between(series, from, to));
    }

    pub fn add_text(&mut self, series: PlotSeries, text: TextPrimitive) {
        self.series.entry(series).or_default().texts.push(text);
    }

    #[must_use]
    pub fn batch(&self, series: PlotSeries) -> Option<&SeriesBatch> {
        self.series.get(&series)
    }

    /// Flushes one series to `renderer`. Empty series are skipped.
    pub fn draw<R: Renderer + ?Sized>(&self, renderer: &mut R, series: PlotSeries) -> ChartResult<()> {
        match self.series.get(&series) {
            Some(batch) if !batch.is_empty() => renderer.draw_batch(series, batch),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::AxisPlotter;
    use crate::render::{NullRenderer, PlotSeries, TextHAlign, TextPrimitive};

    #[test]
    fn draw_flushes_only_requested_series() {
        let mut plotter = AxisPlotter::new();
        plotter.segment(PlotSeries::Grid, (0.0, 10.5), (100.0, 10.5));
        plotter.segment(PlotSeries::Border, (100.5, 10.5), (103.0, 10.5));
        plotter.add_text(
            PlotSeries::Text,
            TextPrimitive::label("10", (106.0, 10.5), 12.0, TextHAlign::Left),
        );

        let mut renderer = NullRenderer::default();
        plotter
            .draw(&mut renderer, PlotSeries::Border)
            .expect("draw border");
        assert_eq!(renderer.lines_drawn(PlotSeries::Border), 1);
        assert_eq!(renderer.lines_drawn(PlotSeries::Grid), 0);

        plotter
            .draw(&mut renderer, PlotSeries::Text)
            .expect("draw text");
        assert_eq!(renderer.texts_drawn(PlotSeries::Text), 1);
    }
}
