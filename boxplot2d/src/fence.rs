use std::fmt::Display;

use thiserror::Error;

use crate::{AxisError, Point, Quartiles, SampleSeries};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Low,
    High,
}

impl Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Low => f.write_str("low"),
            Side::High => f.write_str("high"),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum FenceError {
    #[error("whisker multiplier must be finite and non-negative, got {0}")]
    InvalidWhis(f64),
    #[error("no sample lies strictly inside the {side} fence at {fence}")]
    EmptyWhiskerSelection { side: Side, fence: f64 },
}

/// Multiple of the IQR that the fences sit beyond the quartiles.
///
/// There is deliberately no `Default`: the conventional 1.5 and the tighter 1.0 used for
/// overlaid two-axis plots are both in use, and callers pick one by name.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Whis(f64);

impl Whis {
    pub const CONVENTIONAL: Whis = Whis(1.5);
    pub const TIGHT: Whis = Whis(1.0);

    pub fn new(whis: f64) -> Result<Self, FenceError> {
        if whis.is_finite() && whis >= 0.0 {
            Ok(Self(whis))
        } else {
            Err(FenceError::InvalidWhis(whis))
        }
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fence {
    pub lower: f64,
    pub upper: f64,
}

impl Fence {
    pub fn new(quartiles: &Quartiles, whis: Whis) -> Self {
        let reach = whis.get() * quartiles.iqr();
        Self {
            lower: quartiles.q1 - reach,
            upper: quartiles.q3 + reach,
        }
    }
}

/// The most extreme observations still strictly inside a fence. Both ends are always members
/// of the sequence they were selected from, never the fence values themselves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WhiskerExtent {
    pub low: f64,
    pub high: f64,
}

impl WhiskerExtent {
    pub fn within(values: &[f64], fence: &Fence) -> Result<Self, FenceError> {
        let low = values
            .iter()
            .copied()
            .filter(|it| *it > fence.lower)
            .reduce(f64::min)
            .ok_or(FenceError::EmptyWhiskerSelection {
                side: Side::Low,
                fence: fence.lower,
            })?;
        let high = values
            .iter()
            .copied()
            .filter(|it| *it < fence.upper)
            .reduce(f64::max)
            .ok_or(FenceError::EmptyWhiskerSelection {
                side: Side::High,
                fence: fence.upper,
            })?;
        Ok(Self { low, high })
    }

    pub fn contains(&self, value: f64) -> bool {
        self.low <= value && value <= self.high
    }
}

/// Everything derived from one axis of one series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisSummary {
    pub quartiles: Quartiles,
    pub fence: Fence,
    pub whiskers: WhiskerExtent,
}

impl AxisSummary {
    pub fn of(values: &[f64], whis: Whis) -> Result<Self, AxisError> {
        let quartiles = Quartiles::of(values)?;
        let fence = Fence::new(&quartiles, whis);
        let whiskers = WhiskerExtent::within(values, &fence)?;
        Ok(Self {
            quartiles,
            fence,
            whiskers,
        })
    }

    pub fn is_outlier(&self, value: f64) -> bool {
        !self.whiskers.contains(value)
    }
}

/// Points that are extreme on either axis.
pub fn outliers(series: &SampleSeries, x: &AxisSummary, y: &AxisSummary) -> Vec<Point> {
    series
        .points()
        .filter(|p| x.is_outlier(p.x) || y.is_outlier(p.y))
        .collect()
}
