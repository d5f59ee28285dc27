mod axis;
mod axis_arena;
mod axis_scale;
mod bindings;
mod chart;
mod panel;
pub mod types;

pub use axis::{
    Axis, AxisId, AxisOptions, AxisSide, FractionalQuote, PriceFormatter, TextJustify,
    ValueTransform, format_fractional_price,
};
pub use axis_arena::AxisArena;
pub use axis_scale::{AxisScale, AxisScaleInputs, decimal_places_for_step, nice_tick_size};
pub use bindings::{SeriesParams, SeriesRendererBinding, StudyDescriptor};
pub use chart::{Aggregation, BaselineConfig, Chart, ChartOptions};
pub use panel::{AxisSideList, Panel, split_vertical_regions};
pub use types::{DataRecord, FieldValue, Viewport, chained_field_names};
