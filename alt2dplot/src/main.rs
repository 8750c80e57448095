use std::{error::Error, path::PathBuf};

use alt2dplot::{naming, render_chart, AxisLimits, ChartRequest, DensityModel};
use boxplot2d::{Point, SampleSeries};
use clap::Parser;
use log::{info, warn, LevelFilter};

/// Draws overlaid two-dimensional box plots of parameter estimates next to their true values.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Estimates file; its name must contain a `lognormal` or `gamma` token
    #[arg(short = 'f', value_name = "FILENAME")]
    filename: PathBuf,

    /// Also plot the points outside the whiskers
    #[arg(short = 'o')]
    include_outliers: bool,

    /// Lower y limit (default 0)
    #[arg(short = 'b', allow_negative_numbers = true)]
    y_bottom: Option<f64>,

    /// Upper y limit (default auto)
    #[arg(short = 't', allow_negative_numbers = true)]
    y_top: Option<f64>,

    /// Lower x limit (default 0)
    #[arg(short = 'l', allow_negative_numbers = true)]
    x_left: Option<f64>,

    /// Upper x limit (default auto)
    #[arg(short = 'r', allow_negative_numbers = true)]
    x_right: Option<f64>,
}

impl Cli {
    fn limits(&self) -> AxisLimits {
        AxisLimits {
            x_lower: self.x_left,
            x_upper: self.x_right,
            y_lower: self.y_bottom,
            y_upper: self.y_top,
        }
    }
}

/// Returns the path of the chart it wrote, or `None` if the file name names no known model.
fn run(args: &Cli) -> Result<Option<PathBuf>, Box<dyn Error>> {
    let Some(filename) = args.filename.to_str() else {
        return Err(format!("{} is not a UTF-8 file name", args.filename.display()).into());
    };
    let Some(model) = DensityModel::from_filename(filename) else {
        warn!(
            "{} names neither a lognormal nor a gamma model; no plot produced",
            filename
        );
        return Ok(None);
    };
    let blocks = estimate_reader::read_estimates(&args.filename)?;
    info!("read {} series from {}", blocks.len(), filename);
    let mut series = Vec::with_capacity(blocks.len());
    let mut true_values = Vec::with_capacity(blocks.len());
    for block in blocks {
        true_values.push(Point::new(block.true_x, block.true_y));
        series.push(SampleSeries::new(block.xs, block.ys)?);
    }
    let request = ChartRequest {
        series,
        true_values,
        labels: model.labels(),
        include_outliers: args.include_outliers,
        limits: args.limits(),
    };
    let out = naming::plot_path(filename, args.include_outliers);
    render_chart(&request, &out)?;
    Ok(Some(out))
}

fn main() -> Result<(), Box<dyn Error>> {
    simple_logger::SimpleLogger::new()
        .with_level(LevelFilter::Info)
        .env()
        .init()?;
    let args = Cli::parse();
    run(&args)?;
    Ok(())
}
