mod axis_lifecycle;
mod axis_renderer;
mod chart_controller;
mod chart_model;
mod dynamic_width;
mod engine;
mod engine_accessors;
mod engine_config;
mod engine_core;
mod engine_init;
mod field_collector;
mod layout_snapshot;
mod layout_solver;
mod panel_controller;
mod panel_geometry;
mod price_format;
mod range_resolver;
mod render_coordinator;
mod scale_coordinator;
mod tick_planner;

pub use axis_lifecycle::{AxisLifecycleEvent, AxisLifecycleListener, AxisLifecycleLog};
pub use axis_renderer::{AxisRenderOutcome, AxisRenderParams, AxisSkipReason};
pub use dynamic_width::ResetDynamicAxisParams;
pub use engine::ChartEngine;
pub use engine_config::ChartEngineConfig;
pub use field_collector::AxisFieldCollection;
pub use layout_snapshot::{AxisGeometry, LayoutSnapshot, PanelGeometry};
pub use price_format::{condense_value, format_axis_price};
pub use range_resolver::{apply_baseline, determine_min_max};
pub use render_coordinator::DrawReport;
pub use tick_planner::{AxisTickPlan, PlannedTick, TickPlanInputs, plan_axis_ticks, tick_prices};
