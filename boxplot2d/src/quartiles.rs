use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum StatsError {
    #[error("cannot summarize an empty sequence")]
    Empty,
    #[error("cannot summarize a sequence containing {0}")]
    NonFinite(f64),
}

/// Linear-interpolation percentile of a sorted slice, `p` in `[0, 100]`.
///
/// The rank of `p` is `p / 100 * (n - 1)`; the result interpolates between the two order
/// statistics that bracket it. Returns `None` for an empty or unsorted slice.
pub fn percentile(sorted: &[f64], p: f64) -> Option<f64> {
    let is_sorted = sorted.windows(2).all(|pair| pair[0].total_cmp(&pair[1]).is_le());
    if sorted.is_empty() || !is_sorted {
        None
    } else {
        Some(interpolate(sorted, p))
    }
}

fn interpolate(sorted: &[f64], p: f64) -> f64 {
    let last = sorted.len() - 1;
    let rank = (p / 100.0 * last as f64).clamp(0.0, last as f64);
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let (lower, upper) = (sorted[lo], sorted[hi]);
    let t = rank - lo as f64;
    // measure from the nearer order statistic to keep rounding symmetric
    if t >= 0.5 {
        upper - (upper - lower) * (1.0 - t)
    } else {
        lower + (upper - lower) * t
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quartiles {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
}

impl Quartiles {
    pub fn of(values: &[f64]) -> Result<Self, StatsError> {
        if values.is_empty() {
            return Err(StatsError::Empty);
        }
        if let Some(bad) = values.iter().find(|it| !it.is_finite()) {
            return Err(StatsError::NonFinite(*bad));
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        let at = |p| percentile(&sorted, p).ok_or(StatsError::Empty);
        Ok(Self {
            q1: at(25.0)?,
            median: at(50.0)?,
            q3: at(75.0)?,
        })
    }

    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}
