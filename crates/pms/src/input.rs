//! The `numbers` input file and the report printed for it.
//!
//! The input file is raw bytes, one value per byte. The report starts with the
//! input line (every value followed by a space) and then lists the sorted
//! values one per line, which is exactly what `pms-test` checks.

use anyhow::{Context, Result};
use rand::Rng;
use std::fs;
use std::path::Path;
use tracing::info;

/// Name of the input file when none is given.
pub const DEFAULT_INPUT: &str = "numbers";

/// Reads the values to sort.
pub fn read_numbers(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("failed to load data from input file {}", path.display()))
}

/// Writes `count` random bytes to `path` and returns them.
pub fn generate_numbers<R: Rng>(path: &Path, count: usize, rng: &mut R) -> Result<Vec<u8>> {
    let mut values = vec![0u8; count];
    rng.fill(values.as_mut_slice());
    fs::write(path, &values)
        .with_context(|| format!("failed to write input file {}", path.display()))?;
    info!("pms: generated {count} values into {}", path.display());
    Ok(values)
}

/// `"5 3 1 \n"` for `[5, 3, 1]`.
pub fn format_input_line(values: &[u8]) -> String {
    let mut line: String = values.iter().map(|value| format!("{value} ")).collect();
    line.push('\n');
    line
}

/// One value per line, each terminated by `\n`.
pub fn format_sorted(values: &[u8]) -> String {
    values.iter().map(|value| format!("{value}\n")).collect()
}
