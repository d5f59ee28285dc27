use indexmap::IndexSet;
use tracing::{debug, trace};

use crate::core::{AxisId, BaselineConfig, Chart, DataRecord, FieldValue, ValueTransform};
use crate::error::ChartResult;
use crate::render::Renderer;

use super::ChartEngine;
use super::dynamic_width::ResetDynamicAxisParams;
use super::field_collector::{AxisFieldCollection, collect_axis_fields};

/// Scans the first `length` records (all when `None`) for the `[low, high]`
/// spanned by `fields`.
///
/// Fields in `use_sum` are accumulated per record and the running total
/// participates instead of the individual values. Array values are only
/// scanned when `check_array` is set. Returns `(0, 0)` when nothing finite
/// was found.
#[must_use]
pub fn determine_min_max(
    records: &[DataRecord],
    fields: &[String],
    use_sum: &IndexSet<String>,
    transform: Option<ValueTransform>,
    length: Option<usize>,
    check_array: bool,
) -> (f64, f64) {
    let mut low = f64::INFINITY;
    let mut high = f64::NEG_INFINITY;
    let length = length.map_or(records.len(), |length| length.min(records.len()));

    for record in &records[..length] {
        let mut acc = 0.0;
        for field in fields {
            let values: &[f64] = match record.get(field) {
                Some(FieldValue::Number(value)) => std::slice::from_ref(value),
                Some(FieldValue::Array(values)) if check_array => values,
                _ => continue,
            };
            for value in values.iter().copied().filter(|value| value.is_finite()) {
                let value = transform.map_or(value, |transform| transform.apply(value));
                let value = if use_sum.contains(field) {
                    acc += value;
                    acc
                } else {
                    value
                };
                low = low.min(value);
                high = high.max(value);
            }
        }
    }

    if low > high { (0.0, 0.0) } else { (low, high) }
}

/// Number of records that count toward the range, dropping the look-ahead
/// tick when more ticks are loaded than fit on screen.
#[must_use]
pub(super) fn visible_length(chart: &Chart, candle_width: f64) -> Option<usize> {
    if !candle_width.is_finite() || candle_width <= 0.0 {
        return None;
    }
    let ticks_on_screen = ((chart.width - chart.micropixels) / candle_width).floor();
    let max_ticks = chart.max_ticks as f64;
    if chart.scroll > chart.max_ticks && max_ticks > ticks_on_screen + 1.0 {
        Some(chart.data_segment.len().saturating_sub(1))
    } else {
        None
    }
}

/// Widens `(low, high)` so the baseline stays representable.
#[must_use]
pub fn apply_baseline(range: (f64, f64), baseline: &BaselineConfig) -> (f64, f64) {
    let Some(level) = baseline.level.filter(|level| level.is_finite()) else {
        return range;
    };
    let (mut low, mut high) = range;
    if baseline.include_in_range {
        low = low.min(level);
        high = high.max(level);
    }
    if baseline.centered {
        let distance = (high - level).max(level - low);
        low = level - distance;
        high = level + distance;
    }
    (low, high)
}

impl<R: Renderer> ChartEngine<R> {
    /// Resolves the value range of every axis on panels drawing `chart_name`
    /// and publishes the primary axis range at chart level.
    ///
    /// Axes left without renderers or studies are deleted (unless importing),
    /// axes without fields are disabled, and an enablement flip resets
    /// auto-widths and relayouts.
    pub fn resolve_display_ranges(&mut self, chart_name: &str) -> ChartResult<()> {
        let model = &self.core.model;
        let chart = model.chart(chart_name)?;
        let length = visible_length(chart, model.candle_width);
        let chart_primary = model.chart_primary_axis(chart_name);
        let targets: Vec<(String, AxisId)> = model
            .panels
            .values()
            .filter(|panel| panel.chart_name == chart_name)
            .flat_map(|panel| panel.axes().map(move |axis| (panel.name.clone(), axis)))
            .collect();

        for (panel_name, axis_id) in targets {
            let model = &self.core.model;
            let Some(panel) = model.panels.get(&panel_name) else {
                continue;
            };
            if !panel.contains_axis(axis_id) {
                continue;
            }
            let Some(axis) = model.axes.get(axis_id) else {
                continue;
            };
            let chart = model.chart(chart_name)?;
            let AxisFieldCollection {
                fields,
                use_sum,
                check_array,
                renderers,
                studies,
            } = collect_axis_fields(model, chart, panel, axis_id);
            let transform = axis.options.transform;
            let was_disabled = axis.is_disabled;
            let disabled = Some(axis_id) != chart_primary && fields.is_empty();
            let unused = renderers.is_empty() && studies.is_empty();
            trace!(
                panel = %panel_name,
                axis = axis_id.raw(),
                fields = fields.len(),
                disabled,
                "collected axis fields"
            );

            let axis = self.core.model.axis_mut(axis_id)?;
            axis.is_disabled = disabled;
            axis.renderers = renderers;
            axis.studies = studies;

            if unused && !self.core.model.importing {
                self.delete_axis_if_unused(&panel_name, axis_id)?;
                continue;
            }
            if was_disabled != disabled {
                debug!(axis = axis_id.raw(), disabled, "axis enablement changed");
                self.reset_dynamic_axis_width(ResetDynamicAxisParams::recalculate());
            }
            if disabled {
                continue;
            }

            let chart = self.core.model.chart(chart_name)?;
            let mut range = determine_min_max(
                &chart.data_segment,
                &fields,
                &use_sum,
                transform,
                length,
                check_array,
            );
            let is_chart_axis = Some(axis_id) == chart_primary;
            if is_chart_axis {
                range = apply_baseline(range, &chart.options.baseline);
            }

            let axis = self.core.model.axis_mut(axis_id)?;
            (axis.low_value, axis.high_value) = range;
            if is_chart_axis {
                let chart = self.core.model.chart_mut(chart_name)?;
                (chart.low_value, chart.high_value) = range;
            }
        }

        let chart = self.core.model.chart_mut(chart_name)?;
        if let Some(aggregation) = chart.options.aggregation
            && aggregation.box_size.is_finite()
            && aggregation.box_size > 0.0
        {
            chart.low_value -= aggregation.box_size / 2.0;
            chart.high_value += aggregation.box_size / 2.0;
        }
        debug!(
            chart = chart_name,
            low = chart.low_value,
            high = chart.high_value,
            "resolved display ranges"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use indexmap::IndexSet;

    use super::{apply_baseline, determine_min_max, visible_length};
    use crate::core::{BaselineConfig, Chart, ChartOptions, DataRecord, ValueTransform};

    fn fields(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| (*name).to_owned()).collect()
    }

    #[test]
    fn min_max_spans_requested_fields_only() {
        let records = vec![
            DataRecord::ohlc(10.0, 12.0, 9.0, 11.0).with("Volume", 5000.0),
            DataRecord::ohlc(11.0, 15.0, 10.5, 14.0).with("Volume", 9000.0),
        ];
        let range = determine_min_max(
            &records,
            &fields(&["High", "Low"]),
            &IndexSet::new(),
            None,
            None,
            false,
        );
        assert_eq!(range, (9.0, 15.0));
    }

    #[test]
    fn sum_fields_stack_per_record() {
        let records = vec![
            DataRecord::new().with("a", 2.0).with("b", 3.0),
            DataRecord::new().with("a", 4.0).with("b", 1.0),
        ];
        let use_sum: IndexSet<String> = fields(&["a", "b"]).into_iter().collect();
        let range = determine_min_max(&records, &fields(&["a", "b"]), &use_sum, None, None, false);
        assert_eq!(range, (2.0, 5.0));
    }

    #[test]
    fn arrays_need_check_array_and_length_limits_scan() {
        let records = vec![
            DataRecord::new().with("band", vec![1.0, 8.0]),
            DataRecord::new().with("band", vec![0.0, 20.0]),
        ];
        let names = fields(&["band"]);
        assert_eq!(
            determine_min_max(&records, &names, &IndexSet::new(), None, None, false),
            (0.0, 0.0)
        );
        assert_eq!(
            determine_min_max(&records, &names, &IndexSet::new(), None, Some(1), true),
            (1.0, 8.0)
        );
    }

    #[test]
    fn transform_is_applied_before_scanning() {
        let records = vec![DataRecord::new().with("Close", 110.0)];
        let range = determine_min_max(
            &records,
            &fields(&["Close"]),
            &IndexSet::new(),
            Some(ValueTransform::PercentChange { base: 100.0 }),
            None,
            false,
        );
        assert!((range.0 - 10.0).abs() <= 1e-9);
    }

    #[test]
    fn baseline_is_included_then_centered() {
        let include = BaselineConfig {
            level: Some(5.0),
            include_in_range: true,
            centered: false,
        };
        assert_eq!(apply_baseline((10.0, 20.0), &include), (5.0, 20.0));

        let centered = BaselineConfig {
            level: Some(10.0),
            include_in_range: false,
            centered: true,
        };
        assert_eq!(apply_baseline((8.0, 14.0), &centered), (6.0, 14.0));
    }

    #[test]
    fn look_ahead_tick_is_dropped_only_when_scrolled_past_screen() {
        let mut chart = Chart::new("chart", ChartOptions::default());
        chart.data_segment = vec![DataRecord::new(); 12];
        chart.width = 80.0;
        chart.max_ticks = 12;
        chart.scroll = 20;
        assert_eq!(visible_length(&chart, 8.0), Some(11));

        chart.scroll = 5;
        assert_eq!(visible_length(&chart, 8.0), None);
    }
}
