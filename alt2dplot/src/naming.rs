use std::path::PathBuf;

/// Input names are assumed to end in a three letter extension and its dot.
const EXTENSION_LEN: usize = 4;

/// `filename` without its last four characters (empty if it is shorter than that).
pub fn strip_extension(filename: &str) -> &str {
    match filename.char_indices().rev().nth(EXTENSION_LEN - 1) {
        Some((idx, _)) => &filename[..idx],
        None => "",
    }
}

pub fn plot_path(filename: &str, include_outliers: bool) -> PathBuf {
    let suffix = if include_outliers {
        "_with_outliers_alt2dplot.png"
    } else {
        "_alt2dplot.png"
    };
    PathBuf::from(format!("{}{}", strip_extension(filename), suffix))
}
