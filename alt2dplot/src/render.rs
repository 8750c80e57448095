use std::path::Path;

use boxplot2d::Element;
use log::{info, warn};
use plotters::{
    coord::Shift,
    drawing::DrawingAreaErrorKind,
    prelude::*,
    style::{FontDesc, FontFamily, FontStyle},
};
use plotters_backend::{
    BackendColor, BackendCoord, BackendTextStyle, DrawingBackend, DrawingErrorKind,
};

use crate::{
    chart::{ChartPlan, ChartRequest, Mark},
    limits::{clip_rect, clip_segment},
    RenderError,
};

/// Six inches square at 100 dpi.
pub const FIGURE_SIZE: (u32, u32) = (600, 600);
pub const BOX_FILL_ALPHA: f64 = 0.3;
pub const AXIS_LABEL_FONT_SIZE: f64 = 20.0;
pub const TICK_LABEL_FONT_SIZE: f64 = 16.0;
pub const TRUE_VALUE_RADIUS: u32 = 7;
pub const OUTLIER_RADIUS: u32 = 4;
const MARGIN: u32 = 15;
const X_LABEL_AREA: u32 = 50;
const Y_LABEL_AREA: u32 = 60;

fn drawing_error<E: std::error::Error + Send + Sync>(err: DrawingAreaErrorKind<E>) -> RenderError {
    RenderError::Drawing(err.to_string())
}

/// Lays out `request` and writes it to `path`. `.svg` paths get an SVG document, anything else
/// is rasterized in the image format the extension names.
pub fn render_chart(request: &ChartRequest, path: &Path) -> Result<(), RenderError> {
    let plan = ChartPlan::new(request)?;
    let is_svg = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));
    if is_svg {
        let root = FontTolerant::new(SVGBackend::new(path, FIGURE_SIZE)).into_drawing_area();
        plan.draw(&root)?;
        root.present().map_err(drawing_error)?;
    } else {
        let root = FontTolerant::new(BitMapBackend::new(path, FIGURE_SIZE)).into_drawing_area();
        plan.draw(&root)?;
        root.present().map_err(drawing_error)?;
    }
    info!(
        "wrote {} series to {}",
        plan.series.len(),
        path.display()
    );
    Ok(())
}

impl ChartPlan {
    /// Draws onto `root`. Boxes go down first, then lines, then markers, across all series.
    /// Anything outside the axis ranges is clipped away.
    pub fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<(), RenderError> {
        draw_chart(self, root)
    }
}

fn draw_chart<DB: DrawingBackend>(
    plan: &ChartPlan,
    root: &DrawingArea<DB, Shift>,
) -> Result<(), RenderError> {
    let (xr, yr) = (&plan.x_range, &plan.y_range);
    root.fill(&WHITE).map_err(drawing_error)?;
    let mut chart = ChartBuilder::on(root)
        .margin(MARGIN)
        .x_label_area_size(X_LABEL_AREA)
        .y_label_area_size(Y_LABEL_AREA)
        .build_cartesian_2d(
            plan.x_range.lower..plan.x_range.upper,
            plan.y_range.lower..plan.y_range.upper,
        )
        .map_err(drawing_error)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(plan.labels.x.as_str())
        .y_desc(plan.labels.y.as_str())
        .axis_desc_style(FontDesc::new(
            FontFamily::SansSerif,
            AXIS_LABEL_FONT_SIZE,
            FontStyle::Normal,
        ))
        .label_style(FontDesc::new(
            FontFamily::SansSerif,
            TICK_LABEL_FONT_SIZE,
            FontStyle::Normal,
        ))
        .draw()
        .map_err(drawing_error)?;

    for (_, series, mark) in plan.draw_order() {
        let color = series.color.rgb();
        match mark {
            Mark::Glyph(Element::Box(rect)) => {
                let Some(rect) = clip_rect(rect, xr, yr) else {
                    continue;
                };
                let corners = [(rect.min.x, rect.min.y), (rect.max.x, rect.max.y)];
                chart
                    .draw_series(std::iter::once(Rectangle::new(
                        corners,
                        color.mix(BOX_FILL_ALPHA).filled(),
                    )))
                    .map_err(drawing_error)?;
                chart
                    .draw_series(std::iter::once(Rectangle::new(
                        corners,
                        BLACK.stroke_width(1),
                    )))
                    .map_err(drawing_error)?;
            }
            Mark::Glyph(Element::Line(segment)) => {
                let Some(segment) = clip_segment(segment, xr, yr) else {
                    continue;
                };
                chart
                    .draw_series(std::iter::once(PathElement::new(
                        vec![
                            (segment.from.x, segment.from.y),
                            (segment.to.x, segment.to.y),
                        ],
                        color.stroke_width(1),
                    )))
                    .map_err(drawing_error)?;
            }
            Mark::Glyph(Element::Outliers(points)) => {
                chart
                    .draw_series(
                        points
                            .iter()
                            .filter(|p| xr.contains(p.x) && yr.contains(p.y))
                            .map(|p| Circle::new((p.x, p.y), OUTLIER_RADIUS, color.stroke_width(1))),
                    )
                    .map_err(drawing_error)?;
            }
            Mark::TrueValue(p) if xr.contains(p.x) && yr.contains(p.y) => {
                chart
                    .draw_series(std::iter::once(Circle::new(
                        (p.x, p.y),
                        TRUE_VALUE_RADIUS,
                        color.filled(),
                    )))
                    .map_err(drawing_error)?;
                chart
                    .draw_series(std::iter::once(Circle::new(
                        (p.x, p.y),
                        TRUE_VALUE_RADIUS,
                        BLACK.stroke_width(1),
                    )))
                    .map_err(drawing_error)?;
            }
            Mark::TrueValue(_) => {}
        }
    }
    Ok(())
}

/// Passes everything through to `inner`, except that text which cannot be laid out for lack of
/// a usable system font is skipped instead of failing the whole chart.
struct FontTolerant<DB> {
    inner: DB,
    warned: bool,
}

impl<DB> FontTolerant<DB> {
    fn new(inner: DB) -> Self {
        Self {
            inner,
            warned: false,
        }
    }
}

impl<DB: DrawingBackend> DrawingBackend for FontTolerant<DB> {
    type ErrorType = DB::ErrorType;

    fn get_size(&self) -> (u32, u32) {
        self.inner.get_size()
    }

    fn ensure_prepared(&mut self) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.ensure_prepared()
    }

    fn present(&mut self) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.present()
    }

    fn draw_pixel(
        &mut self,
        point: BackendCoord,
        color: BackendColor,
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.draw_pixel(point, color)
    }

    fn draw_line<S: plotters_backend::BackendStyle>(
        &mut self,
        from: BackendCoord,
        to: BackendCoord,
        style: &S,
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.draw_line(from, to, style)
    }

    fn draw_rect<S: plotters_backend::BackendStyle>(
        &mut self,
        upper_left: BackendCoord,
        bottom_right: BackendCoord,
        style: &S,
        fill: bool,
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.draw_rect(upper_left, bottom_right, style, fill)
    }

    fn draw_path<S: plotters_backend::BackendStyle, I: IntoIterator<Item = BackendCoord>>(
        &mut self,
        path: I,
        style: &S,
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.draw_path(path, style)
    }

    fn draw_circle<S: plotters_backend::BackendStyle>(
        &mut self,
        center: BackendCoord,
        radius: u32,
        style: &S,
        fill: bool,
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.draw_circle(center, radius, style, fill)
    }

    fn fill_polygon<S: plotters_backend::BackendStyle, I: IntoIterator<Item = BackendCoord>>(
        &mut self,
        vert: I,
        style: &S,
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.fill_polygon(vert, style)
    }

    fn blit_bitmap(
        &mut self,
        pos: BackendCoord,
        (iw, ih): (u32, u32),
        src: &[u8],
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.blit_bitmap(pos, (iw, ih), src)
    }

    fn draw_text<TStyle: BackendTextStyle>(
        &mut self,
        text: &str,
        style: &TStyle,
        pos: BackendCoord,
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        match self.inner.draw_text(text, style, pos) {
            Err(DrawingErrorKind::FontError(e)) => {
                if !self.warned {
                    warn!("skipping chart text, no usable font: {e}");
                    self.warned = true;
                }
                Ok(())
            }
            other => other,
        }
    }

    fn estimate_text_size<TStyle: BackendTextStyle>(
        &self,
        text: &str,
        style: &TStyle,
    ) -> Result<(u32, u32), DrawingErrorKind<Self::ErrorType>> {
        match self.inner.estimate_text_size(text, style) {
            Err(DrawingErrorKind::FontError(_)) => Ok(approximate_text_size(text, style)),
            other => other,
        }
    }
}

fn approximate_text_size<TStyle: BackendTextStyle>(text: &str, style: &TStyle) -> (u32, u32) {
    let size = style.size().max(1.0);
    ((text.chars().count() as f64 * size * 0.6) as u32, size as u32)
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, convert::Infallible, rc::Rc};

    use boxplot2d::{Point, SampleSeries};
    use pretty_assertions::assert_eq;

    use plotters_backend::BackendStyle;

    use super::*;
    use crate::{AxisLabels, AxisLimits};

    #[derive(Debug, Clone, PartialEq)]
    enum Primitive {
        Rect { rgb: (u8, u8, u8), alpha: f64, fill: bool },
        Path { rgb: (u8, u8, u8) },
        Circle { rgb: (u8, u8, u8), radius: u32, fill: bool },
        Text(String),
    }

    /// Keeps a log of what was drawn instead of rasterizing it. Needs no fonts.
    struct Recorder {
        log: Rc<RefCell<Vec<Primitive>>>,
    }

    impl DrawingBackend for Recorder {
        type ErrorType = Infallible;

        fn get_size(&self) -> (u32, u32) {
            FIGURE_SIZE
        }

        fn ensure_prepared(&mut self) -> Result<(), DrawingErrorKind<Infallible>> {
            Ok(())
        }

        fn present(&mut self) -> Result<(), DrawingErrorKind<Infallible>> {
            Ok(())
        }

        fn draw_pixel(
            &mut self,
            _point: BackendCoord,
            _color: BackendColor,
        ) -> Result<(), DrawingErrorKind<Infallible>> {
            Ok(())
        }

        fn draw_line<S: BackendStyle>(
            &mut self,
            _from: BackendCoord,
            _to: BackendCoord,
            _style: &S,
        ) -> Result<(), DrawingErrorKind<Infallible>> {
            Ok(())
        }

        fn draw_rect<S: BackendStyle>(
            &mut self,
            _upper_left: BackendCoord,
            _bottom_right: BackendCoord,
            style: &S,
            fill: bool,
        ) -> Result<(), DrawingErrorKind<Infallible>> {
            let color = style.color();
            self.log.borrow_mut().push(Primitive::Rect {
                rgb: color.rgb,
                alpha: color.alpha,
                fill,
            });
            Ok(())
        }

        fn draw_path<S: BackendStyle, I: IntoIterator<Item = BackendCoord>>(
            &mut self,
            _path: I,
            style: &S,
        ) -> Result<(), DrawingErrorKind<Infallible>> {
            self.log.borrow_mut().push(Primitive::Path {
                rgb: style.color().rgb,
            });
            Ok(())
        }

        fn draw_circle<S: BackendStyle>(
            &mut self,
            _center: BackendCoord,
            radius: u32,
            style: &S,
            fill: bool,
        ) -> Result<(), DrawingErrorKind<Infallible>> {
            self.log.borrow_mut().push(Primitive::Circle {
                rgb: style.color().rgb,
                radius,
                fill,
            });
            Ok(())
        }

        fn draw_text<TStyle: BackendTextStyle>(
            &mut self,
            text: &str,
            _style: &TStyle,
            _pos: BackendCoord,
        ) -> Result<(), DrawingErrorKind<Infallible>> {
            self.log.borrow_mut().push(Primitive::Text(text.to_string()));
            Ok(())
        }

        fn estimate_text_size<TStyle: BackendTextStyle>(
            &self,
            text: &str,
            style: &TStyle,
        ) -> Result<(u32, u32), DrawingErrorKind<Infallible>> {
            Ok(approximate_text_size(text, style))
        }
    }

    fn record(request: &ChartRequest) -> Vec<Primitive> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let root = Recorder { log: log.clone() }.into_drawing_area();
        let plan = ChartPlan::new(request).unwrap();
        plan.draw(&root).unwrap();
        drop(root);
        log.take()
    }

    fn two_series(include_outliers: bool) -> ChartRequest {
        ChartRequest {
            series: vec![
                SampleSeries::new(
                    vec![0.8, 0.9, 1.0, 1.1, 1.2, 3.0],
                    vec![1.5, 1.9, 2.0, 2.1, 2.5, 2.0],
                )
                .unwrap(),
                SampleSeries::new(
                    vec![2.6, 2.8, 3.0, 3.2, 3.4],
                    vec![3.0, 3.5, 4.0, 4.5, 5.0],
                )
                .unwrap(),
            ],
            true_values: vec![Point::new(1.0, 2.0), Point::new(3.0, 4.0)],
            labels: AxisLabels::new("α", "β"),
            include_outliers,
            limits: AxisLimits::default(),
        }
    }

    const RED: (u8, u8, u8) = (255, 0, 0);
    const BLUE: (u8, u8, u8) = (0, 0, 255);

    fn count(log: &[Primitive], pred: impl Fn(&Primitive) -> bool) -> usize {
        log.iter().filter(|it| pred(it)).count()
    }

    #[test]
    fn two_colored_boxes_with_true_value_markers() {
        let log = record(&two_series(false));
        for rgb in [RED, BLUE] {
            assert_eq!(
                count(&log, |p| *p
                    == Primitive::Rect {
                        rgb,
                        alpha: BOX_FILL_ALPHA,
                        fill: true
                    }),
                1
            );
            assert_eq!(count(&log, |p| *p == Primitive::Path { rgb }), 10);
            assert_eq!(
                count(&log, |p| *p
                    == Primitive::Circle {
                        rgb,
                        radius: TRUE_VALUE_RADIUS,
                        fill: true
                    }),
                1
            );
            assert_eq!(
                count(&log, |p| matches!(p, Primitive::Circle { rgb: c, fill: false, .. } if *c == rgb)),
                0
            );
        }
        // black outline around each box and each true value
        assert!(count(&log, |p| matches!(p, Primitive::Rect { rgb: (0, 0, 0), fill: false, .. })) >= 2);
        assert_eq!(
            count(&log, |p| *p
                == Primitive::Circle {
                    rgb: (0, 0, 0),
                    radius: TRUE_VALUE_RADIUS,
                    fill: false
                }),
            2
        );
    }

    #[test]
    fn outliers_are_hollow_circles_in_the_series_color() {
        let log = record(&two_series(true));
        let hollow_red = count(&log, |p| {
            *p == Primitive::Circle {
                rgb: RED,
                radius: OUTLIER_RADIUS,
                fill: false,
            }
        });
        let hollow_blue = count(&log, |p| {
            matches!(p, Primitive::Circle { rgb, fill: false, .. } if *rgb == BLUE)
        });
        // (3.0, 2.0) sits far right of the red box; the blue series has no outliers
        assert!(hollow_red >= 1);
        assert_eq!(hollow_blue, 0);
    }

    #[test]
    fn marks_past_an_override_are_clipped_not_pinned_to_the_border() {
        let mut request = two_series(false);
        request.limits.y_upper = Some(4.2);
        let log = record(&request);
        assert_eq!(count(&log, |p| *p == Primitive::Path { rgb: RED }), 10);
        // the blue top spoke and cap lie wholly above 4.2
        assert_eq!(count(&log, |p| *p == Primitive::Path { rgb: BLUE }), 8);
        assert_eq!(
            count(&log, |p| *p
                == Primitive::Rect {
                    rgb: BLUE,
                    alpha: BOX_FILL_ALPHA,
                    fill: true
                }),
            1
        );

        request.limits.y_upper = Some(1.0);
        let log = record(&request);
        assert_eq!(
            count(&log, |p| matches!(p, Primitive::Circle { fill: true, .. })),
            0
        );
    }

    #[test]
    fn boxes_are_filled_before_lines_are_stroked() {
        let log = record(&two_series(false));
        let last_fill = log
            .iter()
            .rposition(|p| matches!(p, Primitive::Rect { alpha, fill: true, .. } if *alpha < 1.0))
            .unwrap();
        let first_series_line = log
            .iter()
            .position(|p| matches!(p, Primitive::Path { rgb } if *rgb == RED || *rgb == BLUE))
            .unwrap();
        assert!(last_fill < first_series_line);
    }

    #[test]
    fn axis_labels_are_drawn() {
        let log = record(&two_series(false));
        assert!(log.contains(&Primitive::Text("α".to_string())));
        assert!(log.contains(&Primitive::Text("β".to_string())));
    }

    #[test]
    fn writes_svg_and_png() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["chart.svg", "chart.png"] {
            let path = dir.path().join(name);
            render_chart(&two_series(true), &path).unwrap();
            assert!(path.metadata().unwrap().len() > 0, "{name} is empty");
        }
    }

    #[test]
    fn nothing_is_written_when_the_plan_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.png");
        let mut request = two_series(false);
        request.true_values.clear();
        assert!(render_chart(&request, &path).is_err());
        assert!(!path.exists());
    }
}
