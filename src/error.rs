use thiserror::Error;

use crate::core::AxisId;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("unknown chart: {0}")]
    UnknownChart(String),

    #[error("unknown panel: {0}")]
    UnknownPanel(String),

    #[error("unknown axis: {0:?}")]
    UnknownAxis(AxisId),

    #[error("axis layout did not settle after {attempts} draw attempts")]
    RelayoutLimitExceeded { attempts: u32 },
}
