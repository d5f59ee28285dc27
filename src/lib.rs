//! chart-axes: y-axis layout and value-range engine for stacked financial
//! chart panels.
//!
//! The engine collects the data fields each axis must cover, resolves axis
//! value ranges over the visible data window, lays axes out horizontally
//! across panels, grows axes whose labels do not fit, and plans ticks,
//! grid lines and labels for a pluggable [`render::Renderer`].

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{ChartEngine, ChartEngineConfig, DrawReport};
pub use error::{ChartError, ChartResult};
