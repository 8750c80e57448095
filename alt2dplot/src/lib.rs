//! Overlaid two-dimensional box plots of paired estimates, one box per series, each annotated
//! with the true parameter pair the estimates were drawn around.

pub mod chart;
pub mod labels;
pub mod limits;
pub mod naming;
pub mod palette;
pub mod render;

use boxplot2d::{Axis, BoxPlotError};
use thiserror::Error;

pub use chart::{ChartPlan, ChartRequest, SeriesPlan};
pub use labels::{AxisLabels, DensityModel};
pub use limits::{AxisLimits, AxisRange};
pub use palette::SeriesColor;
pub use render::render_chart;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("{requested} series requested but the palette only has {capacity} colors")]
    PaletteExhausted { requested: usize, capacity: usize },
    #[error("{series} series but {true_values} true values")]
    MismatchedTrueValues { series: usize, true_values: usize },
    #[error("series {index}: {source}")]
    Series {
        index: usize,
        #[source]
        source: BoxPlotError,
    },
    #[error("{axis} axis range [{lower}, {upper}] is empty")]
    InvalidAxisRange { axis: Axis, lower: f64, upper: f64 },
    #[error("drawing failed: {0}")]
    Drawing(String),
}
