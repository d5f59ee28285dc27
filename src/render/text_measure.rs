/// Measures rendered label width. Only the auto-width feedback loop uses it.
pub trait TextMeasurer {
    fn measure_text(&self, text: &str, font_size_px: f64) -> f64;
}

/// Deterministic, backend-independent width estimate from per-glyph
/// proportions of a typical sans-serif face.
#[derive(Debug, Clone, Copy, Default)]
pub struct EstimatedTextMeasurer;

impl TextMeasurer for EstimatedTextMeasurer {
    fn measure_text(&self, text: &str, font_size_px: f64) -> f64 {
        let units = text.chars().fold(0.0, |acc, ch| {
            acc + match ch {
                '0'..='9' => 0.62,
                '.' | ',' | '\'' => 0.34,
                '-' | '+' | '%' => 0.42,
                ' ' => 0.33,
                _ => 0.58,
            }
        });
        units * font_size_px
    }
}

/// Every glyph has the same advance.
#[derive(Debug, Clone, Copy)]
pub struct MonospaceTextMeasurer {
    pub advance_px: f64,
}

impl TextMeasurer for MonospaceTextMeasurer {
    fn measure_text(&self, text: &str, _font_size_px: f64) -> f64 {
        text.chars().count() as f64 * self.advance_px
    }
}

#[cfg(test)]
mod tests {
    use super::{EstimatedTextMeasurer, MonospaceTextMeasurer, TextMeasurer};

    #[test]
    fn estimate_grows_with_text_length() {
        let measurer = EstimatedTextMeasurer;
        let short = measurer.measure_text("1.5", 12.0);
        let long = measurer.measure_text("12345.50", 12.0);
        assert!(long > short);
        assert_eq!(measurer.measure_text("", 12.0), 0.0);
    }

    #[test]
    fn monospace_counts_chars() {
        let measurer = MonospaceTextMeasurer { advance_px: 7.0 };
        assert_eq!(measurer.measure_text("100'16", 12.0), 42.0);
    }
}
