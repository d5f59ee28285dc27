use indexmap::IndexMap;

use crate::error::ChartResult;
use crate::render::{PlotSeries, Renderer, SeriesBatch};

/// No-op renderer used by tests and headless engine usage.
///
/// It still validates every batch so tests catch invalid geometry, and it
/// counts what each series received.
#[derive(Debug, Default)]
pub struct NullRenderer {
    lines: IndexMap<PlotSeries, usize>,
    texts: IndexMap<PlotSeries, usize>,
    batches: usize,
}

impl NullRenderer {
    #[must_use]
    pub fn lines_drawn(&self, series: PlotSeries) -> usize {
        self.lines.get(&series).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn texts_drawn(&self, series: PlotSeries) -> usize {
        self.texts.get(&series).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn batches_drawn(&self) -> usize {
        self.batches
    }

    pub fn reset(&mut self) {
        self.lines.clear();
        self.texts.clear();
        self.batches = 0;
    }
}

impl Renderer for NullRenderer {
    fn draw_batch(&mut self, series: PlotSeries, batch: &SeriesBatch) -> ChartResult<()> {
        batch.validate()?;
        *self.lines.entry(series).or_default() += batch.lines.len();
        *self.texts.entry(series).or_default() += batch.texts.len();
        self.batches += 1;
        Ok(())
    }
}
