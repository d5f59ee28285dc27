use serde::{Deserialize, Serialize};

use crate::core::{AxisId, Panel};
use crate::error::{ChartError, ChartResult};
use crate::render::Renderer;

use super::ChartEngine;

/// Serializable horizontal geometry of every panel, used by regression
/// tests and debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSnapshot {
    pub panels: Vec<PanelGeometry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelGeometry {
    pub name: String,
    pub hidden: bool,
    pub left: f64,
    pub right: f64,
    pub width: f64,
    pub top: f64,
    pub bottom: f64,
    pub total_width_left: f64,
    pub total_width_right: f64,
    pub left_axes: Vec<AxisGeometry>,
    pub right_axes: Vec<AxisGeometry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisGeometry {
    pub id: AxisId,
    pub name: String,
    pub left: f64,
    pub width: f64,
    pub allocated_width: f64,
    pub hidden: bool,
}

impl LayoutSnapshot {
    #[must_use]
    pub fn panel(&self, name: &str) -> Option<&PanelGeometry> {
        self.panels.iter().find(|panel| panel.name == name)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize layout: {e}")))
    }
}

impl<R: Renderer> ChartEngine<R> {
    /// Captures the current axis and panel geometry without touching layout.
    #[must_use]
    pub fn layout_snapshot(&self) -> LayoutSnapshot {
        let model = &self.core.model;
        let axes_of = |ids: &[AxisId]| -> Vec<AxisGeometry> {
            ids.iter()
                .filter_map(|id| {
                    model.axes.get(*id).map(|axis| AxisGeometry {
                        id: *id,
                        name: axis.name().to_owned(),
                        left: axis.left,
                        width: axis.width(),
                        allocated_width: axis.allocated_width,
                        hidden: axis.is_hidden(),
                    })
                })
                .collect()
        };
        let panel_geometry = |panel: &Panel| PanelGeometry {
            name: panel.name.clone(),
            hidden: panel.hidden,
            left: panel.left,
            right: panel.right,
            width: panel.width,
            top: panel.top,
            bottom: panel.bottom,
            total_width_left: panel.total_width_left,
            total_width_right: panel.total_width_right,
            left_axes: axes_of(panel.left_axes()),
            right_axes: axes_of(panel.right_axes()),
        };
        LayoutSnapshot {
            panels: model.panels.values().map(panel_geometry).collect(),
        }
    }

    pub fn layout_snapshot_json_pretty(&self) -> ChartResult<String> {
        self.layout_snapshot().to_json_pretty()
    }
}
