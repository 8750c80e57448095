use std::fmt::Display;

use boxplot2d::{Axis, BoxGlyph, Element, Layer, Point, Rect, SampleSeries, Whis};
use log::debug;

use crate::{
    labels::AxisLabels,
    limits::{self, AxisLimits, AxisRange},
    palette::{self, SeriesColor},
    RenderError,
};

/// Everything needed to draw one chart. `true_values[i]` annotates `series[i]`.
#[derive(Debug, Clone)]
pub struct ChartRequest {
    pub series: Vec<SampleSeries>,
    pub true_values: Vec<Point>,
    pub labels: AxisLabels,
    pub include_outliers: bool,
    pub limits: AxisLimits,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPlan {
    pub color: SeriesColor,
    pub glyph: BoxGlyph,
    pub true_value: Point,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mark<'a> {
    Glyph(Element<'a>),
    TrueValue(&'a Point),
}

/// A chart laid out in data coordinates, independent of any drawing backend.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPlan {
    pub series: Vec<SeriesPlan>,
    pub labels: AxisLabels,
    pub x_range: AxisRange,
    pub y_range: AxisRange,
}

impl ChartPlan {
    pub fn new(request: &ChartRequest) -> Result<Self, RenderError> {
        if request.series.len() != request.true_values.len() {
            return Err(RenderError::MismatchedTrueValues {
                series: request.series.len(),
                true_values: request.true_values.len(),
            });
        }
        let colors = palette::assign(request.series.len())?;
        let series = request
            .series
            .iter()
            .zip(request.true_values.iter())
            .zip(colors)
            .enumerate()
            .map(|(index, ((samples, true_value), color))| {
                // the overlaid plot always uses the tighter multiplier
                let glyph = BoxGlyph::build(samples, Whis::TIGHT, request.include_outliers)
                    .map_err(|source| RenderError::Series { index, source })?;
                debug!(
                    "{} series: {} samples, x quartiles {:?}, y quartiles {:?}",
                    color.name,
                    samples.len(),
                    glyph.x.quartiles,
                    glyph.y.quartiles
                );
                Ok(SeriesPlan {
                    color,
                    glyph,
                    true_value: *true_value,
                })
            })
            .collect::<Result<Vec<_>, RenderError>>()?;

        let extent = data_extent(&series);
        let limits = &request.limits;
        let x_range = limits::resolve(
            Axis::X,
            limits.x_lower,
            limits.x_upper,
            extent.map(|it| (it.min.x, it.max.x)),
        )?;
        let y_range = limits::resolve(
            Axis::Y,
            limits.y_lower,
            limits.y_upper,
            extent.map(|it| (it.min.y, it.max.y)),
        )?;
        Ok(Self {
            series,
            labels: request.labels.clone(),
            x_range,
            y_range,
        })
    }

    /// Every mark of every series, stably sorted by layer.
    pub fn draw_order(&self) -> Vec<(Layer, &SeriesPlan, Mark<'_>)> {
        let mut marks: Vec<_> = self
            .series
            .iter()
            .flat_map(|plan| {
                plan.glyph
                    .elements()
                    .into_iter()
                    .map(move |(layer, element)| (layer, plan, Mark::Glyph(element)))
                    .chain(std::iter::once((
                        Layer::Markers,
                        plan,
                        Mark::TrueValue(&plan.true_value),
                    )))
            })
            .collect();
        marks.sort_by_key(|(layer, _, _)| *layer);
        marks
    }
}

fn data_extent(series: &[SeriesPlan]) -> Option<Rect> {
    series
        .iter()
        .map(|plan| {
            let glyph = plan.glyph.extent();
            let tv = plan.true_value;
            Rect {
                min: Point::new(glyph.min.x.min(tv.x), glyph.min.y.min(tv.y)),
                max: Point::new(glyph.max.x.max(tv.x), glyph.max.y.max(tv.y)),
            }
        })
        .reduce(|a, b| Rect {
            min: Point::new(a.min.x.min(b.min.x), a.min.y.min(b.min.y)),
            max: Point::new(a.max.x.max(b.max.x), a.max.y.max(b.max.y)),
        })
}

impl Display for ChartPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "x {} {:?}", self.x_range, self.labels.x)?;
        writeln!(f, "y {} {:?}", self.y_range, self.labels.y)?;
        for plan in self.series.iter() {
            writeln!(f, "{} (true value {})", plan.color.name, plan.true_value)?;
            for line in plan.glyph.to_string().lines() {
                writeln!(f, "  {line}")?;
            }
        }
        Ok(())
    }
}
