use std::fmt::Display;

use log::debug;

use crate::{outliers, Axis, AxisSummary, BoxPlotError, Point, SampleSeries, Whis};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

impl Segment {
    fn new(from: (f64, f64), to: (f64, f64)) -> Self {
        Self {
            from: Point::new(from.0, from.1),
            to: Point::new(to.0, to.1),
        }
    }
}

impl Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -- {}", self.from, self.to)
    }
}

/// Axis-aligned rectangle given by its lower-left and upper-right corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}, {}] x [{}, {}]",
            self.min.x, self.max.x, self.min.y, self.max.y
        )
    }
}

/// The spoke runs from the whisker extent to the box along the other axis's median; the cap
/// crosses the spoke at the whisker extent and is as wide as the box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Whisker {
    pub spoke: Segment,
    pub cap: Segment,
}

impl Display for Whisker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "spoke {}, cap {}", self.spoke, self.cap)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Whiskers {
    pub left: Whisker,
    pub right: Whisker,
    pub bottom: Whisker,
    pub top: Whisker,
}

/// Draw order. Everything on a lower layer is drawn before anything on a higher one, across
/// all series of a chart, so boxes never hide lines or markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Layer {
    Box = 0,
    Lines = 1,
    Markers = 2,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Element<'a> {
    Box(&'a Rect),
    Line(&'a Segment),
    Outliers(&'a [Point]),
}

/// Geometry of one series' two-dimensional box plot.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxGlyph {
    pub x: AxisSummary,
    pub y: AxisSummary,
    pub rect: Rect,
    pub x_median: Segment,
    pub y_median: Segment,
    pub whiskers: Whiskers,
    /// `None` when outliers were not requested.
    pub outliers: Option<Vec<Point>>,
}

impl BoxGlyph {
    pub fn build(
        series: &SampleSeries,
        whis: Whis,
        include_outliers: bool,
    ) -> Result<Self, BoxPlotError> {
        let x = AxisSummary::of(series.x(), whis)
            .map_err(|source| BoxPlotError::Axis {
                axis: Axis::X,
                source,
            })?;
        let y = AxisSummary::of(series.y(), whis)
            .map_err(|source| BoxPlotError::Axis {
                axis: Axis::Y,
                source,
            })?;
        let (qx, qy) = (x.quartiles, y.quartiles);
        let (wx, wy) = (x.whiskers, y.whiskers);

        let rect = Rect {
            min: Point::new(qx.q1, qy.q1),
            max: Point::new(qx.q3, qy.q3),
        };
        let x_median = Segment::new((qx.median, qy.q1), (qx.median, qy.q3));
        let y_median = Segment::new((qx.q1, qy.median), (qx.q3, qy.median));
        let whiskers = Whiskers {
            left: Whisker {
                spoke: Segment::new((wx.low, qy.median), (qx.q1, qy.median)),
                cap: Segment::new((wx.low, qy.q1), (wx.low, qy.q3)),
            },
            right: Whisker {
                spoke: Segment::new((wx.high, qy.median), (qx.q3, qy.median)),
                cap: Segment::new((wx.high, qy.q1), (wx.high, qy.q3)),
            },
            bottom: Whisker {
                spoke: Segment::new((qx.median, wy.low), (qx.median, qy.q1)),
                cap: Segment::new((qx.q1, wy.low), (qx.q3, wy.low)),
            },
            top: Whisker {
                spoke: Segment::new((qx.median, wy.high), (qx.median, qy.q3)),
                cap: Segment::new((qx.q1, wy.high), (qx.q3, wy.high)),
            },
        };
        let outliers = include_outliers.then(|| outliers(series, &x, &y));
        debug!(
            "box {} (x whiskers {}..{}, y whiskers {}..{}, {} outliers)",
            rect,
            wx.low,
            wx.high,
            wy.low,
            wy.high,
            outliers.as_ref().map_or(0, |it| it.len())
        );
        Ok(Self {
            x,
            y,
            rect,
            x_median,
            y_median,
            whiskers,
            outliers,
        })
    }

    /// Drawable elements ordered by layer.
    pub fn elements(&self) -> Vec<(Layer, Element<'_>)> {
        let w = &self.whiskers;
        let mut elements = vec![
            (Layer::Box, Element::Box(&self.rect)),
            (Layer::Lines, Element::Line(&self.x_median)),
            (Layer::Lines, Element::Line(&self.y_median)),
        ];
        for whisker in [&w.left, &w.right, &w.bottom, &w.top] {
            elements.push((Layer::Lines, Element::Line(&whisker.spoke)));
            elements.push((Layer::Lines, Element::Line(&whisker.cap)));
        }
        if let Some(outliers) = &self.outliers {
            elements.push((Layer::Markers, Element::Outliers(outliers)));
        }
        elements
    }

    /// Bounding box of everything `elements` yields.
    pub fn extent(&self) -> Rect {
        let mut min = Point::new(self.x.whiskers.low, self.y.whiskers.low);
        let mut max = Point::new(self.x.whiskers.high, self.y.whiskers.high);
        let corners = [self.rect.min, self.rect.max];
        for p in corners
            .iter()
            .chain(self.outliers.iter().flat_map(|it| it.iter()))
        {
            min = Point::new(min.x.min(p.x), min.y.min(p.y));
            max = Point::new(max.x.max(p.x), max.y.max(p.y));
        }
        Rect { min, max }
    }
}

impl Display for BoxGlyph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "box: {}", self.rect)?;
        writeln!(f, "x median: {}", self.x_median)?;
        writeln!(f, "y median: {}", self.y_median)?;
        writeln!(f, "left: {}", self.whiskers.left)?;
        writeln!(f, "right: {}", self.whiskers.right)?;
        writeln!(f, "bottom: {}", self.whiskers.bottom)?;
        writeln!(f, "top: {}", self.whiskers.top)?;
        match &self.outliers {
            None => writeln!(f, "outliers: not requested"),
            Some(outliers) if outliers.is_empty() => writeln!(f, "outliers: none"),
            Some(outliers) => {
                let listed: Vec<_> = outliers.iter().map(|it| it.to_string()).collect();
                writeln!(f, "outliers: {}", listed.join(" "))
            }
        }
    }
}
