use std::fmt::Display;

use boxplot2d::{Axis, Point, Rect, Segment};
use log::debug;

use crate::RenderError;

/// Fraction of the data span added above the data when an upper limit is auto-scaled.
pub const AUTOSCALE_MARGIN: f64 = 0.05;

/// Caller overrides. A missing lower limit means 0, a missing upper limit means auto-scale.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AxisLimits {
    pub x_lower: Option<f64>,
    pub x_upper: Option<f64>,
    pub y_lower: Option<f64>,
    pub y_upper: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub lower: f64,
    pub upper: f64,
}

impl AxisRange {
    pub fn contains(&self, v: f64) -> bool {
        self.lower <= v && v <= self.upper
    }
}

impl Display for AxisRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.lower, self.upper)
    }
}

/// `data` is the (min, max) of everything drawn along `axis`, if anything is drawn.
pub fn resolve(
    axis: Axis,
    lower: Option<f64>,
    upper: Option<f64>,
    data: Option<(f64, f64)>,
) -> Result<AxisRange, RenderError> {
    let lower = lower.unwrap_or(0.0);
    let upper = match upper {
        Some(upper) => upper,
        None => match data.map(|(lo, hi)| hi + AUTOSCALE_MARGIN * (hi - lo)) {
            Some(auto) if auto > lower => auto,
            _ => {
                debug!("{axis} axis: no data above {lower}; using a unit range");
                lower + 1.0
            }
        },
    };
    if lower.is_finite() && upper.is_finite() && lower < upper {
        Ok(AxisRange { lower, upper })
    } else {
        Err(RenderError::InvalidAxisRange { axis, lower, upper })
    }
}

/// The part of `segment` inside the plot window (Liang-Barsky), or `None` if none of it is.
pub fn clip_segment(segment: &Segment, x: &AxisRange, y: &AxisRange) -> Option<Segment> {
    let Point { x: x0, y: y0 } = segment.from;
    let (dx, dy) = (segment.to.x - x0, segment.to.y - y0);
    let (mut enter, mut exit) = (0.0_f64, 1.0_f64);
    for (p, q) in [
        (-dx, x0 - x.lower),
        (dx, x.upper - x0),
        (-dy, y0 - y.lower),
        (dy, y.upper - y0),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
        } else if p < 0.0 {
            enter = enter.max(q / p);
        } else {
            exit = exit.min(q / p);
        }
    }
    if enter > exit {
        return None;
    }
    let at = |t: f64| {
        if t == 1.0 {
            segment.to
        } else {
            Point::new(
                (x0 + t * dx).clamp(x.lower, x.upper),
                (y0 + t * dy).clamp(y.lower, y.upper),
            )
        }
    };
    Some(Segment {
        from: at(enter),
        to: at(exit),
    })
}

pub fn clip_rect(rect: &Rect, x: &AxisRange, y: &AxisRange) -> Option<Rect> {
    let min = Point::new(rect.min.x.max(x.lower), rect.min.y.max(y.lower));
    let max = Point::new(rect.max.x.min(x.upper), rect.max.y.min(y.upper));
    (min.x <= max.x && min.y <= max.y).then_some(Rect { min, max })
}
