use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::core::{Axis, AxisId, AxisSide, AxisSideList};
use crate::render::Renderer;

use super::ChartEngine;

impl<R: Renderer> ChartEngine<R> {
    /// Recomputes axis geometry when a structural change is pending, or
    /// unconditionally when `force` is set.
    pub fn recompute_layout(&mut self, force: bool) {
        if force || self.core.model.needs_layout {
            self.calculate_axis_positions();
        }
    }

    /// Assigns every axis to a side, sizes and positions axes on each panel
    /// against the widest side across panels, and derives panel content
    /// bounds. Ends with the lifecycle diff and the density/vertical cascade.
    pub fn calculate_axis_positions(&mut self) {
        let canvas_width = f64::from(self.core.model.viewport.width);
        let model = &mut self.core.model;

        // Chart panels first: overlay panels inherit their bounds.
        let mut panels_in_order: Vec<String> = Vec::new();
        for chart in model.charts.values() {
            let panel_hidden = model.panels.get(&chart.name).is_none_or(|panel| panel.hidden);
            if chart.hidden || panel_hidden {
                continue;
            }
            panels_in_order.push(chart.name.clone());
        }
        for panel in model.panels.values() {
            if panel.hosts_chart() || panel.hidden {
                continue;
            }
            panels_in_order.push(panel.name.clone());
        }

        let mut max_total_left = 0.0_f64;
        let mut max_total_right = 0.0_f64;
        for name in &panels_in_order {
            let Some(panel) = model.panels.get(name) else {
                continue;
            };
            let default_side = model.default_axis_side(panel);
            let axes = &model.axes;
            let Some(panel) = model.panels.get_mut(name) else {
                continue;
            };
            if panel.lhs.is_empty() && panel.rhs.is_empty() {
                panel.mount_axis(panel.primary_axis, default_side);
            }

            let requested = |id: AxisId| axes.get(id).and_then(Axis::requested_side);
            let mut to_right = AxisSideList::new();
            for index in (0..panel.lhs.len()).rev() {
                let side = requested(panel.lhs[index]);
                if side == Some(AxisSide::Right)
                    || (side != Some(AxisSide::Left) && default_side == AxisSide::Right)
                {
                    to_right.push(panel.lhs.remove(index));
                }
            }
            let mut to_left = AxisSideList::new();
            for index in (0..panel.rhs.len()).rev() {
                let side = requested(panel.rhs[index]);
                if side == Some(AxisSide::Left)
                    || (side != Some(AxisSide::Right) && default_side == AxisSide::Left)
                {
                    to_left.push(panel.rhs.remove(index));
                }
            }
            to_left.extend(panel.lhs.drain(..));
            panel.lhs = to_left;
            panel.rhs.extend(to_right);

            let mut total_left = 0.0;
            let mut total_right = 0.0;
            for id in panel.lhs.iter().chain(panel.rhs.iter()) {
                let Some(axis) = axes.get(*id) else {
                    continue;
                };
                if axis.is_hidden() {
                    continue;
                }
                let side = axis.requested_side();
                if side == Some(AxisSide::Left)
                    || (default_side == AxisSide::Left && side.is_none())
                {
                    total_left += axis.width();
                } else {
                    total_right += axis.width();
                }
            }
            panel.total_width_left = total_left;
            panel.total_width_right = total_right;
            max_total_left = max_total_left.max(total_left);
            max_total_right = max_total_right.max(total_right);
        }

        for name in &panels_in_order {
            let Some(panel) = model.panels.get(name) else {
                continue;
            };
            let is_a_chart = panel.hosts_chart();
            let chart_name = panel.chart_name.clone();
            let chart_panel = model.panels.get(&chart_name);
            let chart_panel_hidden = chart_panel.is_none_or(|chart_panel| chart_panel.hidden);
            let inherited = chart_panel.map_or((0.0, canvas_width), |chart_panel| {
                (chart_panel.left, chart_panel.right)
            });
            let (padding_left, padding_right) = model
                .charts
                .get(&chart_name)
                .map_or((None, None), |chart| {
                    (
                        chart.options.y_axis_padding_left,
                        chart.options.y_axis_padding_right,
                    )
                });

            let axes = &mut model.axes;
            let Some(panel) = model.panels.get_mut(name) else {
                continue;
            };

            let mut x = max_total_left;
            let mut visible: SmallVec<[AxisId; 4]> = SmallVec::new();
            for id in panel.lhs.iter().rev() {
                let Some(axis) = axes.get_mut(*id) else {
                    continue;
                };
                if axis.is_hidden() {
                    axis.allocated_width = 0.0;
                    continue;
                }
                x -= axis.width();
                axis.left = x;
                visible.insert(0, *id);
            }
            let len = visible.len();
            let prorate = if x != 0.0 && len > 0 { x / len as f64 } else { 0.0 };
            for (j, id) in visible.iter().enumerate() {
                if let Some(axis) = axes.get_mut(*id) {
                    axis.left -= (len - j) as f64 * prorate;
                    axis.allocated_width = axis.width() + prorate;
                }
            }

            let mut x = canvas_width - max_total_right;
            visible.clear();
            for id in &panel.rhs {
                let Some(axis) = axes.get_mut(*id) else {
                    continue;
                };
                if axis.is_hidden() {
                    axis.allocated_width = 0.0;
                    continue;
                }
                axis.left = x;
                x += axis.width();
                visible.push(*id);
            }
            let len = visible.len();
            let prorate = if x < canvas_width && len > 0 {
                (canvas_width - x) / len as f64
            } else {
                0.0
            };
            for (j, id) in visible.iter().enumerate() {
                if let Some(axis) = axes.get_mut(*id) {
                    axis.left += j as f64 * prorate;
                    axis.allocated_width = axis.width() + prorate;
                }
            }

            panel.padding_left = padding_left.unwrap_or(max_total_left);
            panel.padding_right = padding_right.unwrap_or(max_total_right);
            let derives_bounds = is_a_chart || chart_panel_hidden;
            if derives_bounds {
                panel.left = panel.padding_left;
                panel.right = canvas_width - panel.padding_right;
            } else {
                (panel.left, panel.right) = inherited;
            }
            panel.width = panel.right - panel.left;
            let (left, right) = (panel.left, panel.right);
            trace!(
                panel = %name,
                left,
                right,
                total_left = panel.total_width_left,
                total_right = panel.total_width_right,
                "panel axis layout"
            );

            if derives_bounds {
                let width = (right - left).max(0.0);
                if let Some(chart_panel) = model.panels.get_mut(&chart_name) {
                    chart_panel.left = left;
                    chart_panel.right = right;
                    chart_panel.width = width;
                }
                if let Some(chart) = model.charts.get_mut(&chart_name) {
                    chart.left = left;
                    chart.right = right;
                    chart.width = width;
                }
            }
        }

        model.needs_layout = false;
        debug!(
            panels = panels_in_order.len(),
            max_total_left, max_total_right, "calculated axis positions"
        );

        self.sync_axis_lifecycle();
        self.adjust_candle_density();
        self.adjust_panel_positions();
    }
}
