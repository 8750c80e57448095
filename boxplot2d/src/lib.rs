//! Two-dimensional box plots: per-axis quartiles, IQR fences with nearest-observation whiskers,
//! and the box/median/whisker geometry that a renderer draws for one paired data set.

pub mod fence;
pub mod geometry;
pub mod quartiles;
pub mod series;

use std::fmt::Display;

use thiserror::Error;

pub use fence::{outliers, AxisSummary, Fence, FenceError, Side, WhiskerExtent, Whis};
pub use geometry::{BoxGlyph, Element, Layer, Rect, Segment, Whisker, Whiskers};
pub use quartiles::{percentile, Quartiles, StatsError};
pub use series::{Point, SampleSeries, SeriesError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::X => f.write_str("x"),
            Axis::Y => f.write_str("y"),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum AxisError {
    #[error(transparent)]
    Stats(#[from] StatsError),
    #[error(transparent)]
    Fence(#[from] FenceError),
}

#[derive(Debug, Error, PartialEq)]
pub enum BoxPlotError {
    #[error(transparent)]
    Series(#[from] SeriesError),
    #[error("{axis} axis: {source}")]
    Axis {
        axis: Axis,
        #[source]
        source: AxisError,
    },
}
