use std::{fs, path::Path, str::FromStr};

use log::debug;
use thiserror::Error;

/// One series worth of estimates: the true parameter pair followed by the estimates of each
/// parameter, in the order they were written.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimateBlock {
    pub true_x: f64,
    pub xs: Vec<f64>,
    pub true_y: f64,
    pub ys: Vec<f64>,
}

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: `{token}` is not a number")]
    InvalidNumber { line: usize, token: String },
    #[error("line {line}: expected the second line of a block (true y value followed by y estimates)")]
    MissingSecondLine { line: usize },
}

pub fn read_estimates(path: &Path) -> Result<Vec<EstimateBlock>, ReadError> {
    let text = fs::read_to_string(path).map_err(|source| ReadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let blocks = parse_estimates(&text)?;
    debug!("read {} estimate blocks from {:?}", blocks.len(), path);
    Ok(blocks)
}

/// Blocks are three lines long: x line, y line, and a separator that is skipped without being
/// inspected. Reading stops at the first x line that has at most one token.
pub fn parse_estimates(text: &str) -> Result<Vec<EstimateBlock>, ReadError> {
    let mut lines = text.lines().enumerate().map(|(idx, line)| (idx + 1, line));
    let mut blocks = Vec::new();
    while let Some((x_lineno, x_line)) = lines.next() {
        let x_tokens: Vec<_> = x_line.split_whitespace().collect();
        if x_tokens.len() <= 1 {
            break;
        }
        let (true_x, xs) = parse_line(x_lineno, &x_tokens)?;
        let (y_lineno, y_line) = lines
            .next()
            .ok_or(ReadError::MissingSecondLine { line: x_lineno + 1 })?;
        let y_tokens: Vec<_> = y_line.split_whitespace().collect();
        if y_tokens.is_empty() {
            return Err(ReadError::MissingSecondLine { line: y_lineno });
        }
        let (true_y, ys) = parse_line(y_lineno, &y_tokens)?;
        blocks.push(EstimateBlock {
            true_x,
            xs,
            true_y,
            ys,
        });
        lines.next();
    }
    Ok(blocks)
}

fn parse_line(line: usize, tokens: &[&str]) -> Result<(f64, Vec<f64>), ReadError> {
    let mut values = tokens.iter().map(|token| {
        f64::from_str(token).map_err(|_| ReadError::InvalidNumber {
            line,
            token: token.to_string(),
        })
    });
    // callers guarantee at least one token
    let truth = values
        .next()
        .unwrap_or(Err(ReadError::MissingSecondLine { line }))?;
    let rest = values.collect::<Result<Vec<_>, _>>()?;
    Ok((truth, rest))
}
