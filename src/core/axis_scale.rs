use serde::{Deserialize, Serialize};

const NICE_STEP_MULTIPLIERS: [f64; 5] = [1.0, 2.0, 2.5, 5.0, 10.0];
const MAX_DECIMAL_PLACES: u32 = 10;

/// Inputs for deriving a display scale from a resolved data range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisScaleInputs {
    pub height_px: f64,
    pub margin_top_px: f64,
    pub margin_bottom_px: f64,
    pub semi_log: bool,
    pub fixed_price_tick: Option<f64>,
    pub ideal_tick_spacing_px: f64,
}

/// Display scale of one axis: the value span shown over the axis height and
/// its tick size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisScale {
    pub low: f64,
    pub high: f64,
    pub shadow: f64,
    pub price_tick: Option<f64>,
    pub semi_log: bool,
    pub log_low: f64,
    pub log_high: f64,
    pub multiplier: f64,
    pub decimal_places: u32,
}

impl AxisScale {
    /// Derives the display scale for `[low_value, high_value]`.
    ///
    /// Returns `None` when the range is not finite or the axis has no height.
    #[must_use]
    pub fn from_range(low_value: f64, high_value: f64, inputs: AxisScaleInputs) -> Option<Self> {
        if !low_value.is_finite() || !high_value.is_finite() {
            return None;
        }
        if !inputs.height_px.is_finite() || inputs.height_px <= 0.0 {
            return None;
        }

        let (mut lo, mut hi) = if low_value <= high_value {
            (low_value, high_value)
        } else {
            (high_value, low_value)
        };
        if hi == lo {
            let pad = if hi == 0.0 { 1.0 } else { hi.abs() * 0.01 };
            lo -= pad;
            hi += pad;
        }

        let margin_top = sanitize_margin(inputs.margin_top_px);
        let margin_bottom = sanitize_margin(inputs.margin_bottom_px);
        let mut usable = inputs.height_px - margin_top - margin_bottom;
        let (margin_top, margin_bottom) = if usable <= 0.0 {
            usable = inputs.height_px;
            (0.0, 0.0)
        } else {
            (margin_top, margin_bottom)
        };

        let semi_log = inputs.semi_log && lo > 0.0;
        let (low, high, log_low, log_high) = if semi_log {
            let log_lo = lo.log10();
            let log_hi = hi.log10();
            let per_px = (log_hi - log_lo) / usable;
            let log_low = log_lo - margin_bottom * per_px;
            let log_high = log_hi + margin_top * per_px;
            (10f64.powf(log_low), 10f64.powf(log_high), log_low, log_high)
        } else {
            let per_px = (hi - lo) / usable;
            (lo - margin_bottom * per_px, hi + margin_top * per_px, 0.0, 0.0)
        };

        let shadow = high - low;
        let price_tick = inputs
            .fixed_price_tick
            .filter(|tick| tick.is_finite() && *tick > 0.0)
            .or_else(|| nice_tick_size(shadow, inputs.height_px, inputs.ideal_tick_spacing_px));

        Some(Self {
            low,
            high,
            shadow,
            price_tick,
            semi_log,
            log_low,
            log_high,
            multiplier: inputs.height_px / shadow,
            decimal_places: price_tick.map_or(2, decimal_places_for_step),
        })
    }

    /// Maps a value to a y pixel inside `[top, bottom]`, low values at the bottom.
    #[must_use]
    pub fn pixel_from_value(&self, value: f64, top: f64, bottom: f64) -> f64 {
        let height = bottom - top;
        if self.semi_log {
            let log_span = self.log_high - self.log_low;
            if value <= 0.0 || log_span == 0.0 {
                return bottom;
            }
            return bottom - (value.log10() - self.log_low) * height / log_span;
        }
        if self.shadow == 0.0 {
            return bottom;
        }
        bottom - (value - self.low) * height / self.shadow
    }

    #[must_use]
    pub fn value_from_pixel(&self, y: f64, top: f64, bottom: f64) -> f64 {
        let height = bottom - top;
        if height == 0.0 {
            return self.low;
        }
        let ratio = (bottom - y) / height;
        if self.semi_log {
            return 10f64.powf(self.log_low + ratio * (self.log_high - self.log_low));
        }
        self.low + ratio * self.shadow
    }
}

fn sanitize_margin(margin: f64) -> f64 {
    if margin.is_finite() { margin.max(0.0) } else { 0.0 }
}

/// Smallest 1/2/2.5/5 x 10^k step whose spacing over `height_px` is at
/// least `ideal_spacing_px`.
#[must_use]
pub fn nice_tick_size(shadow: f64, height_px: f64, ideal_spacing_px: f64) -> Option<f64> {
    if !shadow.is_finite() || shadow <= 0.0 || !height_px.is_finite() || height_px <= 0.0 {
        return None;
    }
    let spacing = if ideal_spacing_px.is_finite() && ideal_spacing_px > 0.0 {
        ideal_spacing_px
    } else {
        40.0
    };
    let target_count = (height_px / spacing).max(1.0);
    let raw = shadow / target_count;
    let magnitude = 10f64.powi(raw.log10().floor() as i32);
    NICE_STEP_MULTIPLIERS
        .iter()
        .map(|multiplier| multiplier * magnitude)
        .find(|step| *step >= raw * (1.0 - 1e-12))
}

/// Number of decimals needed to print multiples of `step` exactly.
#[must_use]
pub fn decimal_places_for_step(step: f64) -> u32 {
    if !step.is_finite() || step <= 0.0 {
        return 0;
    }
    for places in 0..=MAX_DECIMAL_PLACES {
        let scaled = step * 10f64.powi(places as i32);
        if (scaled - scaled.round()).abs() <= 1e-9 * scaled.abs().max(1.0) {
            return places;
        }
    }
    MAX_DECIMAL_PLACES
}
