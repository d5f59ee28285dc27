use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::AxisScale;
use crate::error::{ChartError, ChartResult};

/// Stable identifier of an axis inside the engine's axis arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AxisId(u32);

impl AxisId {
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Side of the panel an axis is mounted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisSide {
    Left,
    Right,
}

impl AxisSide {
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Explicit label alignment overriding the side default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextJustify {
    Left,
    Right,
}

/// Fractional quoting (futures style, e.g. 32nds).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FractionalQuote {
    /// Size of one fractional unit. Falls back to the axis tick size.
    #[serde(default)]
    pub resolution: Option<f64>,
    /// Separator between the whole part and the unit count. Defaults to `'`.
    #[serde(default)]
    pub separator: Option<String>,
}

impl FractionalQuote {
    #[must_use]
    pub fn with_resolution(resolution: f64) -> Self {
        Self {
            resolution: Some(resolution),
            separator: None,
        }
    }
}

/// Value transform applied before range scanning (comparison charts).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ValueTransform {
    /// Percent change relative to `base`.
    PercentChange { base: f64 },
}

impl ValueTransform {
    #[must_use]
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Self::PercentChange { base } => {
                if base == 0.0 {
                    value
                } else {
                    (value - base) / base * 100.0
                }
            }
        }
    }
}

/// Label formatter installed on an axis.
#[derive(Clone)]
pub enum PriceFormatter {
    Fractional { resolution: f64, separator: String },
    Custom(Arc<dyn Fn(f64) -> String + Send + Sync>),
}

impl PriceFormatter {
    #[must_use]
    pub fn format(&self, price: f64) -> String {
        match self {
            Self::Fractional {
                resolution,
                separator,
            } => format_fractional_price(price, *resolution, separator),
            Self::Custom(format) => format(price),
        }
    }

    #[must_use]
    pub fn is_fractional(&self) -> bool {
        matches!(self, Self::Fractional { .. })
    }
}

impl fmt::Debug for PriceFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fractional {
                resolution,
                separator,
            } => f
                .debug_struct("Fractional")
                .field("resolution", resolution)
                .field("separator", separator)
                .finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Formats `price` as whole units, a separator and a two-digit count of
/// `resolution` units. A trailing `+` marks a remainder of at least half a unit.
#[must_use]
pub fn format_fractional_price(price: f64, resolution: f64, separator: &str) -> String {
    if !price.is_finite() || !resolution.is_finite() || resolution <= 0.0 {
        return String::new();
    }
    let (sign, price) = if price < 0.0 { ("-", -price) } else { ("", price) };
    let mut whole = price.floor();
    // Snap away float noise so 16.4999999 units still reads as 16.5.
    let mut units = ((price - whole) / resolution * 1e9).round() / 1e9;
    // A remainder that snaps to a full unit count belongs to the next whole.
    if units >= (1.0 / resolution * 1e9).round() / 1e9 {
        whole += 1.0;
        units = 0.0;
    }
    let whole_units = units.floor();
    let plus = if units - whole_units >= 0.5 { "+" } else { "" };
    format!("{sign}{whole}{separator}{:02}{plus}", whole_units as i64)
}

/// Construction-time options of an axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisOptions {
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub side: Option<AxisSide>,
    #[serde(default)]
    pub justify: Option<TextJustify>,
    #[serde(default)]
    pub flipped: bool,
    #[serde(default)]
    pub semi_log: bool,
    #[serde(default = "default_true")]
    pub display_grid_lines: bool,
    #[serde(default)]
    pub display_border: Option<bool>,
    #[serde(default)]
    pub fixed_price_tick: Option<f64>,
    #[serde(default)]
    pub fractional: Option<FractionalQuote>,
    #[serde(default)]
    pub decimal_places: Option<u32>,
    #[serde(default)]
    pub no_draw: bool,
    #[serde(default)]
    pub initial_margin_top_px: Option<f64>,
    #[serde(default)]
    pub initial_margin_bottom_px: Option<f64>,
    #[serde(default)]
    pub transform: Option<ValueTransform>,
}

fn default_true() -> bool {
    true
}

impl Default for AxisOptions {
    fn default() -> Self {
        Self {
            width: None,
            side: None,
            justify: None,
            flipped: false,
            semi_log: false,
            display_grid_lines: true,
            display_border: None,
            fixed_price_tick: None,
            fractional: None,
            decimal_places: None,
            no_draw: false,
            initial_margin_top_px: None,
            initial_margin_bottom_px: None,
            transform: None,
        }
    }
}

impl AxisOptions {
    #[must_use]
    pub fn on_side(mut self, side: AxisSide) -> Self {
        self.side = Some(side);
        self
    }

    #[must_use]
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    #[must_use]
    pub fn with_fixed_price_tick(mut self, tick: f64) -> Self {
        self.fixed_price_tick = Some(tick);
        self
    }

    pub(crate) fn validate(&self) -> ChartResult<()> {
        if let Some(width) = self.width
            && (!width.is_finite() || width < 0.0)
        {
            return Err(ChartError::InvalidData(
                "axis width must be finite and >= 0".to_owned(),
            ));
        }
        if let Some(tick) = self.fixed_price_tick
            && (!tick.is_finite() || tick <= 0.0)
        {
            return Err(ChartError::InvalidData(
                "axis price tick must be finite and > 0".to_owned(),
            ));
        }
        if let Some(resolution) = self.fractional.as_ref().and_then(|f| f.resolution)
            && (!resolution.is_finite() || resolution <= 0.0)
        {
            return Err(ChartError::InvalidData(
                "fractional resolution must be finite and > 0".to_owned(),
            ));
        }
        for margin in [self.initial_margin_top_px, self.initial_margin_bottom_px]
            .into_iter()
            .flatten()
        {
            if !margin.is_finite() || margin < 0.0 {
                return Err(ChartError::InvalidData(
                    "axis margins must be finite and >= 0".to_owned(),
                ));
            }
        }
        Ok(())
    }
}

/// One vertical value scale mounted on a panel edge.
#[derive(Debug, Clone)]
pub struct Axis {
    pub(crate) name: String,
    pub(crate) options: AxisOptions,
    pub(crate) base_width: f64,
    pub(crate) explicit_width: Option<f64>,
    pub(crate) dynamic_width: Option<f64>,
    pub(crate) left: f64,
    pub(crate) allocated_width: f64,
    pub(crate) top: f64,
    pub(crate) bottom: f64,
    pub(crate) low_value: f64,
    pub(crate) high_value: f64,
    pub(crate) scale: AxisScale,
    pub(crate) is_disabled: bool,
    pub(crate) studies: Vec<String>,
    pub(crate) renderers: Vec<String>,
    pub(crate) formatter: Option<PriceFormatter>,
    pub(crate) was_fractional: bool,
}

impl Axis {
    #[must_use]
    pub fn new(name: impl Into<String>, options: AxisOptions, default_width: f64) -> Self {
        let base_width = options.width.unwrap_or(default_width);
        Self {
            name: name.into(),
            options,
            base_width,
            explicit_width: None,
            dynamic_width: None,
            left: 0.0,
            allocated_width: 0.0,
            top: 0.0,
            bottom: 0.0,
            low_value: 0.0,
            high_value: 0.0,
            scale: AxisScale::default(),
            is_disabled: false,
            studies: Vec::new(),
            renderers: Vec::new(),
            formatter: None,
            was_fractional: false,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn options(&self) -> &AxisOptions {
        &self.options
    }

    /// Width the layout allocates: auto-width override, then runtime
    /// width, then the configured width.
    #[must_use]
    pub fn width(&self) -> f64 {
        if let Some(dynamic) = self.dynamic_width
            && dynamic > 0.0
        {
            return dynamic;
        }
        self.explicit_width.unwrap_or(self.base_width)
    }

    #[must_use]
    pub fn dynamic_width(&self) -> Option<f64> {
        self.dynamic_width
    }

    #[must_use]
    pub fn explicit_width(&self) -> Option<f64> {
        self.explicit_width
    }

    /// Requested mounting side; `None` inherits the panel default.
    #[must_use]
    pub fn requested_side(&self) -> Option<AxisSide> {
        self.options.side
    }

    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.is_disabled || self.options.no_draw || self.width() == 0.0
    }

    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.is_disabled
    }

    #[must_use]
    pub fn left(&self) -> f64 {
        self.left
    }

    /// Horizontal span owned by the axis after slack proration.
    #[must_use]
    pub fn allocated_width(&self) -> f64 {
        self.allocated_width
    }

    #[must_use]
    pub fn top(&self) -> f64 {
        self.top
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.bottom
    }

    /// Resolved data range `(low, high)` for the current frame.
    #[must_use]
    pub fn value_range(&self) -> (f64, f64) {
        (self.low_value, self.high_value)
    }

    #[must_use]
    pub fn scale(&self) -> &AxisScale {
        &self.scale
    }

    /// Mutable scale access for hosts that compute ranges themselves.
    pub fn scale_mut(&mut self) -> &mut AxisScale {
        &mut self.scale
    }

    #[must_use]
    pub fn studies(&self) -> &[String] {
        &self.studies
    }

    #[must_use]
    pub fn renderers(&self) -> &[String] {
        &self.renderers
    }

    #[must_use]
    pub fn price_formatter(&self) -> Option<&PriceFormatter> {
        self.formatter.as_ref()
    }

    #[must_use]
    pub fn was_fractional(&self) -> bool {
        self.was_fractional
    }

    pub fn set_price_formatter(&mut self, formatter: Option<PriceFormatter>) {
        self.formatter = formatter;
    }

    /// Installs the fractional formatter on first use and removes it once
    /// the axis stops being fractional.
    pub(crate) fn sync_fractional_formatter(&mut self) {
        match &self.options.fractional {
            Some(fractional) => {
                if self.formatter.is_none() {
                    let resolution = fractional
                        .resolution
                        .or(self.scale.price_tick)
                        .unwrap_or(1.0 / 32.0);
                    let separator = fractional.separator.clone().unwrap_or_else(|| "'".to_owned());
                    self.formatter = Some(PriceFormatter::Fractional {
                        resolution,
                        separator,
                    });
                    self.was_fractional = true;
                }
            }
            None => {
                if self.was_fractional {
                    if self
                        .formatter
                        .as_ref()
                        .is_some_and(PriceFormatter::is_fractional)
                    {
                        self.formatter = None;
                    }
                    self.was_fractional = false;
                }
            }
        }
    }
}
