//! Writes `estimates_lognormal.txt` and `estimates_gamma.txt` into the directory given as the
//! first argument (default: the current directory). Each block holds repeated two-parameter
//! estimates from samples drawn at one true parameter setting.

use std::{fmt::Write as _, path::Path};

use log::info;
use rand::{distributions::Distribution, rngs::StdRng, SeedableRng};
use statrs::{
    distribution::{Gamma, LogNormal},
    statistics::Statistics,
};

const SAMPLE_SIZE: usize = 60;
const REPLICATES: usize = 200;

fn lognormal_estimate(sample: &[f64]) -> (f64, f64) {
    let logs: Vec<_> = sample.iter().map(|it| it.ln()).collect();
    (logs.iter().mean(), logs.iter().std_dev())
}

fn gamma_estimate(sample: &[f64]) -> (f64, f64) {
    let mean = sample.iter().mean();
    let var = sample.iter().variance();
    (mean * mean / var, mean / var)
}

fn block<D: Distribution<f64>>(
    rng: &mut StdRng,
    truth: (f64, f64),
    dist: &D,
    estimate: fn(&[f64]) -> (f64, f64),
) -> String {
    let (xs, ys): (Vec<_>, Vec<_>) = (0..REPLICATES)
        .map(|_| {
            let sample: Vec<f64> = dist.sample_iter(&mut *rng).take(SAMPLE_SIZE).collect();
            estimate(&sample)
        })
        .unzip();
    let mut out = String::new();
    for (truth, estimates) in [(truth.0, xs), (truth.1, ys)] {
        write!(out, "{truth}").unwrap();
        for e in estimates {
            write!(out, " {e}").unwrap();
        }
        out.push('\n');
    }
    out.push('\n');
    out
}

fn main() {
    simple_logger::SimpleLogger::new().env().init().unwrap();
    let dir = std::env::args().nth(1).unwrap_or_else(|| ".".to_string());
    let dir = Path::new(&dir);
    std::fs::create_dir_all(dir).unwrap();
    let mut rng = StdRng::seed_from_u64(2024);

    let mut lognormal = String::new();
    for truth in [(0.5, 0.3), (1.0, 0.5), (1.5, 0.8)] {
        let dist = LogNormal::new(truth.0, truth.1).unwrap();
        lognormal += &block(&mut rng, truth, &dist, lognormal_estimate);
    }
    let path = dir.join("estimates_lognormal.txt");
    std::fs::write(&path, lognormal).unwrap();
    info!("wrote {:?}", path);

    let mut gamma = String::new();
    for truth in [(2.0, 1.0), (4.0, 2.0), (6.0, 1.5)] {
        let dist = Gamma::new(truth.0, truth.1).unwrap();
        gamma += &block(&mut rng, truth, &dist, gamma_estimate);
    }
    let path = dir.join("estimates_gamma.txt");
    std::fs::write(&path, gamma).unwrap();
    info!("wrote {:?}", path);
}
