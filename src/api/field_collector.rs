use indexmap::IndexSet;
use serde::Serialize;

use crate::core::{AxisId, Chart, Panel, StudyDescriptor, chained_field_names};
use crate::error::ChartResult;
use crate::render::Renderer;

use super::ChartEngine;
use super::chart_model::ChartModel;

const OHLC_FIELDS: [&str; 4] = ["Close", "Open", "High", "Low"];

/// Data fields that determine one axis's value range, plus the renderers
/// and studies found to be drawing against it.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AxisFieldCollection {
    pub fields: Vec<String>,
    /// Fields whose values stack and are summed per record.
    pub use_sum: IndexSet<String>,
    /// Some renderer stores array values that need array-aware scanning.
    pub check_array: bool,
    pub renderers: Vec<String>,
    pub studies: Vec<String>,
}

impl AxisFieldCollection {
    fn push_fields(&mut self, names: impl IntoIterator<Item = String>) {
        self.fields.extend(names);
    }
}

/// Collects the fields that must be scanned to resolve `axis_id` on `panel`.
pub(super) fn collect_axis_fields(
    model: &ChartModel,
    chart: &Chart,
    panel: &Panel,
    axis_id: AxisId,
) -> AxisFieldCollection {
    let mut collection = AxisFieldCollection::default();
    let Some(axis) = model.axes.get(axis_id) else {
        return collection;
    };

    // An axis named after a study on this panel is that study's own axis.
    if let Some(study) = model.studies.get(axis.name())
        && push_study_fields(chart, study, Some(panel), &mut collection)
    {
        collection.studies.push(study.name.clone());
    }

    let chart_primary = model.chart_primary_axis(chart.panel_name());
    for binding in chart.series_renderers.values() {
        let Some(binding_panel) = model.panels.get(&binding.panel) else {
            continue;
        };
        let bound_axis = binding.axis.unwrap_or(binding_panel.primary_axis);
        if bound_axis != axis_id || binding.panel != panel.name {
            continue;
        }

        let base_fields: &[&str] = if binding.high_low_bars {
            &OHLC_FIELDS
        } else {
            &[chart.default_plot_field()]
        };
        collection.check_array |= binding.bounded;

        for series in &binding.series {
            if series.hidden || series.disabled {
                continue;
            }
            let names = match (&series.symbol, &series.sub_field, &series.field) {
                (Some(symbol), Some(sub_field), _) => {
                    let mut names = chained_field_names(symbol, &[sub_field.as_str()]);
                    names.push(symbol.clone());
                    names
                }
                (Some(symbol), None, _) => {
                    let mut names = chained_field_names(symbol, base_fields);
                    names.push(symbol.clone());
                    names
                }
                (None, _, Some(field)) => vec![field.clone()],
                (None, _, None) if chart_primary == Some(axis_id) => {
                    base_fields.iter().map(|field| (*field).to_owned()).collect()
                }
                (None, _, None) => Vec::new(),
            };
            if binding.use_sum {
                collection.use_sum.extend(names.iter().cloned());
            }
            collection.push_fields(names);
        }
        collection.renderers.push(binding.id.clone());
    }

    for study in model.studies.values().filter(|study| study.overlay) {
        if study.panel != panel.name || study.name == axis.name() {
            continue;
        }
        let study_axis = study.axis.unwrap_or(panel.primary_axis);
        if study_axis != axis_id {
            continue;
        }
        collection.studies.push(study.name.clone());
        if chart.options.include_overlays_in_min_max {
            push_study_fields(chart, study, None, &mut collection);
        }
    }

    collection
}

/// Adds a study's output fields. Returns whether the study belongs to
/// `panel` (always true when no panel constraint is given).
fn push_study_fields(
    chart: &Chart,
    study: &StudyDescriptor,
    panel: Option<&Panel>,
    collection: &mut AxisFieldCollection,
) -> bool {
    if panel.is_some_and(|panel| panel.name != study.panel) {
        return false;
    }
    if !study.is_active() {
        return true;
    }

    for output in &study.outputs {
        collection.fields.push(output.clone());
        if study.has_renderer {
            collection.push_fields(chained_field_names(output, &OHLC_FIELDS));
        } else if !study.has_series_fn {
            collection.push_fields(chained_field_names(output, &[chart.default_plot_field()]));
        }
    }
    collection.push_fields(
        ["_hist", "_hist1", "_hist2"]
            .iter()
            .map(|suffix| format!("{}{suffix}", study.name)),
    );
    true
}

impl<R: Renderer> ChartEngine<R> {
    /// Fields that define the value range of `axis` on `panel_name`.
    pub fn collect_axis_fields(
        &self,
        panel_name: &str,
        axis: AxisId,
    ) -> ChartResult<AxisFieldCollection> {
        let model = &self.core.model;
        let panel = model.panel(panel_name)?;
        let chart = model.chart(&panel.chart_name)?;
        model.axis(axis)?;
        Ok(collect_axis_fields(model, chart, panel, axis))
    }
}
