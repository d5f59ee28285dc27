use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// 8-bit RGBA stroke or fill color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Opaque color from a packed `0xRRGGBB` value.
    #[must_use]
    pub const fn from_hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as u8,
            g: ((rgb >> 8) & 0xff) as u8,
            b: (rgb & 0xff) as u8,
            a: 0xff,
        }
    }

    /// `#rrggbb`, or `rgba(..)` when not fully opaque.
    #[must_use]
    pub fn to_css(self) -> String {
        if self.a == 0xff {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!(
                "rgba({},{},{},{:.3})",
                self.r,
                self.g,
                self.b,
                f64::from(self.a) / 255.0
            )
        }
    }
}

/// Named command groups of an axis plot, flushed separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlotSeries {
    Grid,
    Text,
    Border,
}

impl PlotSeries {
    #[must_use]
    pub const fn default_color(self) -> Color {
        match self {
            Self::Grid => Color::from_hex(0xdedede),
            Self::Text => Color::from_hex(0x333333),
            Self::Border => Color::from_hex(0x999999),
        }
    }
}

/// One hairline segment of an axis plot, in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinePrimitive {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub color: Color,
}

impl LinePrimitive {
    /// Segment from `from` to `to` in the default color of `series`.
    #[must_use]
    pub const fn between(series: PlotSeries, from: (f64, f64), to: (f64, f64)) -> Self {
        Self {
            x1: from.0,
            y1: from.1,
            x2: to.0,
            y2: to.1,
            color: series.default_color(),
        }
    }

    #[must_use]
    pub fn is_horizontal(&self) -> bool {
        self.y1 == self.y2
    }

    pub fn validate(&self) -> ChartResult<()> {
        if [self.x1, self.y1, self.x2, self.y2]
            .iter()
            .all(|value| value.is_finite())
        {
            Ok(())
        } else {
            Err(ChartError::InvalidData(format!(
                "axis segment has a non-finite endpoint: ({}, {}) -> ({}, {})",
                self.x1, self.y1, self.x2, self.y2
            )))
        }
    }
}

/// Side of the label that sits on `TextPrimitive::x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextHAlign {
    Left,
    Right,
}

/// One axis label; `y` is its vertical middle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextPrimitive {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size_px: f64,
    pub h_align: TextHAlign,
    pub color: Color,
}

impl TextPrimitive {
    #[must_use]
    pub fn label(
        text: impl Into<String>,
        at: (f64, f64),
        font_size_px: f64,
        h_align: TextHAlign,
    ) -> Self {
        Self {
            text: text.into(),
            x: at.0,
            y: at.1,
            font_size_px,
            h_align,
            color: PlotSeries::Text.default_color(),
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.text.is_empty() {
            return Err(ChartError::InvalidData("axis label is empty".to_owned()));
        }
        if !(self.x.is_finite() && self.y.is_finite()) {
            return Err(ChartError::InvalidData(format!(
                "axis label `{}` has a non-finite anchor",
                self.text
            )));
        }
        if !(self.font_size_px.is_finite() && self.font_size_px > 0.0) {
            return Err(ChartError::InvalidData(format!(
                "axis label `{}` has font size {}",
                self.text, self.font_size_px
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Color, LinePrimitive, PlotSeries, TextHAlign, TextPrimitive};

    #[test]
    fn css_output_drops_alpha_when_opaque() {
        assert_eq!(Color::from_hex(0x0a0b0c).to_css(), "#0a0b0c");
        let faded = Color {
            a: 0,
            ..Color::from_hex(0xffffff)
        };
        assert_eq!(faded.to_css(), "rgba(255,255,255,0.000)");
    }

    #[test]
    fn non_finite_geometry_is_rejected() {
        let segment = LinePrimitive::between(PlotSeries::Grid, (0.0, f64::NAN), (10.0, 5.0));
        assert!(segment.validate().is_err());
        assert!(!segment.is_horizontal());

        let label = TextPrimitive::label("1.5", (4.0, 8.0), 0.0, TextHAlign::Left);
        assert!(label.validate().is_err());
        assert_eq!(label.color, PlotSeries::Text.default_color());
    }
}
