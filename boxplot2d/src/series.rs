use std::fmt::Display;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeriesError {
    #[error("series has no samples")]
    Empty,
    #[error("series has {x} x samples but {y} y samples")]
    LengthMismatch { x: usize, y: usize },
}

/// Paired draws of one data set. The i-th x sample and the i-th y sample form one point.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSeries {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl SampleSeries {
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self, SeriesError> {
        if x.len() != y.len() {
            return Err(SeriesError::LengthMismatch {
                x: x.len(),
                y: y.len(),
            });
        }
        if x.is_empty() {
            return Err(SeriesError::Empty);
        }
        Ok(Self { x, y })
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Always false; construction rejects empty series.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.x
            .iter()
            .zip(self.y.iter())
            .map(|(x, y)| Point::new(*x, *y))
    }
}
