use crate::naming::strip_extension;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisLabels {
    pub x: String,
    pub y: String,
}

impl AxisLabels {
    pub fn new(x: impl Into<String>, y: impl Into<String>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
        }
    }
}

/// The distribution whose two parameters were estimated, recognized from an underscore
/// separated token in the estimates file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DensityModel {
    LogNormal,
    Gamma,
}

impl DensityModel {
    pub fn from_filename(filename: &str) -> Option<Self> {
        let tokens: Vec<_> = strip_extension(filename).split('_').collect();
        if tokens.contains(&"lognormal") {
            Some(DensityModel::LogNormal)
        } else if tokens.contains(&"gamma") {
            Some(DensityModel::Gamma)
        } else {
            None
        }
    }

    /// Location/scale for the lognormal, shape/rate for the gamma.
    pub fn labels(self) -> AxisLabels {
        match self {
            DensityModel::LogNormal => AxisLabels::new("μ", "σ"),
            DensityModel::Gamma => AxisLabels::new("α", "β"),
        }
    }
}
