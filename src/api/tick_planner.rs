use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use serde::Serialize;

use crate::core::{AxisScale, AxisSide, TextJustify};
use crate::render::{
    AxisPlotter, LinePrimitive, PlotSeries, TextHAlign, TextMeasurer, TextPrimitive,
};

const MAX_TICKS: usize = 10_000;
const DECIMAL_SCALE: u32 = 12;
const TICK_MARK_PX: f64 = 3.0;
const TEXT_PADDING_PX: f64 = 3.0;

/// Geometry and mode of one axis render, as consumed by [`plan_axis_ticks`].
#[derive(Debug, Clone, Copy)]
pub struct TickPlanInputs<'a> {
    pub scale: &'a AxisScale,
    /// Caller-supplied `(low, high)` replacing the scale span.
    pub range: Option<(f64, f64)>,
    /// Primary axis of a chart panel: ticks anchor at the low end.
    pub is_chart_axis: bool,
    pub side: AxisSide,
    pub justify: Option<TextJustify>,
    pub flipped: bool,
    pub display_grid_lines: bool,
    pub draw_borders: bool,
    pub axis_left: f64,
    pub axis_width: f64,
    pub axis_top: f64,
    pub axis_bottom: f64,
    pub panel_left: f64,
    pub panel_right: f64,
    pub panel_top: f64,
    pub panel_bottom: f64,
    pub font_size_px: f64,
    /// Accumulate the widest label for auto-width.
    pub measure_labels: bool,
}

/// One tick that survived clipping.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedTick {
    pub price: f64,
    pub y: f64,
    pub label: String,
    pub grid: Option<LinePrimitive>,
    pub border_tick: Option<LinePrimitive>,
    pub text: Option<TextPrimitive>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AxisTickPlan {
    pub ticks: Vec<PlannedTick>,
    /// Vertical border along the axis edge.
    pub border: Option<LinePrimitive>,
    /// Widest label plus tick mark and padding, never below the axis width.
    /// `None` unless labels were measured.
    pub label_width: Option<f64>,
}

impl AxisTickPlan {
    #[must_use]
    pub fn to_plotter(&self) -> AxisPlotter {
        let mut plotter = AxisPlotter::new();
        for tick in &self.ticks {
            if let Some(grid) = tick.grid {
                plotter.segment(PlotSeries::Grid, (grid.x1, grid.y1), (grid.x2, grid.y2));
            }
            if let Some(mark) = tick.border_tick {
                plotter.segment(PlotSeries::Border, (mark.x1, mark.y1), (mark.x2, mark.y2));
            }
            if let Some(text) = &tick.text {
                plotter.add_text(PlotSeries::Text, text.clone());
            }
        }
        if let Some(border) = self.border {
            plotter.segment(
                PlotSeries::Border,
                (border.x1, border.y1),
                (border.x2, border.y2),
            );
        }
        plotter
    }
}

/// Unclipped tick prices for `scale`.
///
/// The count is the displayed span over the tick size, rounded. Log scales
/// step evenly in log space; chart axes start at the first tick boundary at
/// or above the low end, other axes walk down from the boundary below the
/// high end.
#[must_use]
pub fn tick_prices(scale: &AxisScale, range: Option<(f64, f64)>, is_chart_axis: bool) -> Vec<f64> {
    let Some(tick) = scale.price_tick.filter(|tick| tick.is_finite() && *tick > 0.0) else {
        return Vec::new();
    };
    let (low, high, shadow) = match range {
        Some((low, high)) => (low, high, high - low),
        None => (scale.low, scale.high, scale.shadow),
    };
    let count = (shadow / tick).round();
    if !count.is_finite() || count <= 0.0 {
        return Vec::new();
    }
    let count = (count as usize).min(MAX_TICKS);

    if scale.semi_log {
        let log_tick = (scale.log_high - scale.log_low) / count as f64;
        return (0..count)
            .map(|i| 10f64.powf(scale.log_low + i as f64 * log_tick))
            .collect();
    }

    anchored_ladder(low, high, tick, count, is_chart_axis).unwrap_or_else(|| {
        if is_chart_axis {
            let start = low + boundary_offset(low % tick, tick);
            (0..count).map(|i| start + i as f64 * tick).collect()
        } else {
            let start = high - high % tick;
            (0..count).map(|i| start - i as f64 * tick).collect()
        }
    })
}

/// Distance from a value with remainder `rem` up to the next tick boundary.
fn boundary_offset<T>(rem: T, tick: T) -> T
where
    T: Copy + PartialOrd + Default + std::ops::Sub<Output = T> + std::ops::Neg<Output = T>,
{
    let zero = T::default();
    if rem == zero {
        zero
    } else if rem > zero {
        tick - rem
    } else {
        -rem
    }
}

fn to_decimal(value: f64) -> Option<Decimal> {
    Decimal::from_f64(value).map(|value| value.round_dp(DECIMAL_SCALE))
}

/// Tick prices stepped in decimal arithmetic so labels land on exact
/// boundaries. `None` when the values do not fit a `Decimal`.
fn anchored_ladder(
    low: f64,
    high: f64,
    tick: f64,
    count: usize,
    ascending: bool,
) -> Option<Vec<f64>> {
    let tick = to_decimal(tick)?;
    if tick.is_zero() {
        return None;
    }
    let (start, step) = if ascending {
        let low = to_decimal(low)?;
        (low + boundary_offset(low % tick, tick), tick)
    } else {
        let high = to_decimal(high)?;
        (high - high % tick, -tick)
    };
    (0..count)
        .map(|i| {
            step.checked_mul(Decimal::from(i as u64))
                .and_then(|delta| start.checked_add(delta))
                .and_then(|price| price.to_f64())
        })
        .collect()
}

/// Text x position and alignment for the axis side and justify override.
fn label_anchor(inputs: &TickPlanInputs<'_>, edge_of_axis: f64, tick_width: f64) -> (f64, TextHAlign) {
    match inputs.side {
        AxisSide::Left => {
            if inputs.justify == Some(TextJustify::Left) {
                (inputs.axis_left + TEXT_PADDING_PX, TextHAlign::Left)
            } else {
                (
                    inputs.axis_left + inputs.axis_width + tick_width - TEXT_PADDING_PX,
                    TextHAlign::Right,
                )
            }
        }
        AxisSide::Right => {
            if inputs.justify == Some(TextJustify::Right) {
                (edge_of_axis + inputs.axis_width, TextHAlign::Right)
            } else {
                (edge_of_axis + tick_width + TEXT_PADDING_PX, TextHAlign::Left)
            }
        }
    }
}

/// Lays out ticks, grid lines, border marks and labels for one axis.
///
/// Ticks whose label would cross the panel top or bottom, or that sit
/// within a pixel of the axis bottom, are dropped before drawing and before
/// measurement. Flipped axes mirror y inside the axis span.
#[must_use]
pub fn plan_axis_ticks(
    inputs: &TickPlanInputs<'_>,
    format: &dyn Fn(f64) -> String,
    measurer: &dyn TextMeasurer,
) -> AxisTickPlan {
    let prices = tick_prices(inputs.scale, inputs.range, inputs.is_chart_axis);
    let edge_of_axis = match inputs.side {
        AxisSide::Left => inputs.axis_left + inputs.axis_width,
        AxisSide::Right => inputs.axis_left,
    };
    let border_edge = edge_of_axis.round() + 0.5;
    let tick_width = match (inputs.draw_borders, inputs.side) {
        (false, _) => 0.0,
        (true, AxisSide::Left) => -TICK_MARK_PX,
        (true, AxisSide::Right) => TICK_MARK_PX,
    };
    let (text_x, h_align) = label_anchor(inputs, edge_of_axis, tick_width);
    let half_font = inputs.font_size_px / 2.0;
    let mut label_width = inputs.measure_labels.then_some(inputs.axis_width);

    let mut ticks = Vec::with_capacity(prices.len());
    for price in prices {
        let y = inputs
            .scale
            .pixel_from_value(price, inputs.axis_top, inputs.axis_bottom);
        let mut y2 = y.floor() + 0.5;
        if !y2.is_finite()
            || y2 + half_font > inputs.panel_bottom
            || y2 - half_font < inputs.panel_top
            || (y2 - inputs.axis_bottom).abs() < 1.0
        {
            continue;
        }
        if inputs.flipped {
            y2 = inputs.axis_top + inputs.axis_bottom - y2;
        }

        let grid = inputs.display_grid_lines.then(|| {
            LinePrimitive::between(
                PlotSeries::Grid,
                (inputs.panel_left + 1.0, y2),
                (inputs.panel_right - 1.0, y2),
            )
        });
        let border_tick = inputs.draw_borders.then(|| {
            LinePrimitive::between(
                PlotSeries::Border,
                (border_edge - 0.5, y2),
                (border_edge + tick_width, y2),
            )
        });
        let label = format(price);
        let text = (!label.is_empty()).then(|| {
            TextPrimitive::label(label.clone(), (text_x, y2), inputs.font_size_px, h_align)
        });
        if let Some(width) = label_width.as_mut()
            && !label.is_empty()
        {
            let candidate = measurer.measure_text(&label, inputs.font_size_px)
                + tick_width.abs()
                + TEXT_PADDING_PX;
            *width = width.max(candidate);
        }

        ticks.push(PlannedTick {
            price,
            y: y2,
            label,
            grid,
            border_tick,
            text,
        });
    }

    let border = inputs.draw_borders.then(|| {
        LinePrimitive::between(
            PlotSeries::Border,
            (border_edge, inputs.axis_top),
            (border_edge, inputs.axis_bottom.round() + 0.5),
        )
    });

    AxisTickPlan {
        ticks,
        border,
        label_width,
    }
}
