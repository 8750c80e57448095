use plotters::style::RGBColor;

use crate::RenderError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesColor {
    pub name: &'static str,
    rgb: (u8, u8, u8),
}

impl SeriesColor {
    const fn new(name: &'static str, rgb: (u8, u8, u8)) -> Self {
        Self { name, rgb }
    }

    pub fn rgb(&self) -> RGBColor {
        RGBColor(self.rgb.0, self.rgb.1, self.rgb.2)
    }
}

/// Series colors in assignment order.
pub const PALETTE: [SeriesColor; 6] = [
    SeriesColor::new("red", (255, 0, 0)),
    SeriesColor::new("blue", (0, 0, 255)),
    SeriesColor::new("green", (0, 255, 0)),
    SeriesColor::new("cyan", (0, 255, 255)),
    SeriesColor::new("magenta", (255, 0, 255)),
    SeriesColor::new("black", (0, 0, 0)),
];

/// Colors for `n` series by position. Fails rather than reusing a color.
pub fn assign(n: usize) -> Result<Vec<SeriesColor>, RenderError> {
    if n > PALETTE.len() {
        return Err(RenderError::PaletteExhausted {
            requested: n,
            capacity: PALETTE.len(),
        });
    }
    Ok(PALETTE[..n].to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assigns_by_position() {
        let names: Vec<_> = assign(3).unwrap().iter().map(|it| it.name).collect();
        assert_eq!(names, vec!["red", "blue", "green"]);
        assert_eq!(assign(6).unwrap().len(), 6);
        assert!(assign(0).unwrap().is_empty());
    }

    #[test]
    fn seventh_series_is_an_error() {
        let err = assign(7).unwrap_err();
        assert!(matches!(
            err,
            RenderError::PaletteExhausted {
                requested: 7,
                capacity: 6
            }
        ));
    }
}
