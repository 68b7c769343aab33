//! Building the expected output from the program's first line.

use crate::lenient::parse_line;
use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// Reads the first line of `path`, raw bytes with its `\n` if it has one.
///
/// An empty file gives an empty line.
pub fn read_first_line(path: &Path) -> Result<Vec<u8>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let mut line = Vec::new();
    BufReader::new(file)
        .read_until(b'\n', &mut line)
        .with_context(|| format!("failed to read first line of {}", path.display()))?;
    Ok(line)
}

/// Parses `line` and sorts the values ascending (stable, duplicates kept).
pub fn sorted_numbers(line: &[u8]) -> Vec<i64> {
    let mut numbers = parse_line(line);
    numbers.sort();
    numbers
}

/// Expected file content: the first line verbatim, then one sorted value per line.
pub fn render_expected(first_line: &[u8]) -> Vec<u8> {
    let numbers = sorted_numbers(first_line);
    let mut out = Vec::with_capacity(first_line.len() * 2);
    out.extend_from_slice(first_line);
    for n in numbers {
        out.extend_from_slice(n.to_string().as_bytes());
        out.push(b'\n');
    }
    out
}

/// Truncates `path` and writes the expected content for `first_line` into it.
pub fn write_expected(path: &Path, first_line: &[u8]) -> Result<()> {
    let content = render_expected(first_line);
    fs::write(path, &content).with_context(|| format!("failed to write {}", path.display()))?;
    debug!("wrote {} bytes of expected output to {}", content.len(), path.display());
    Ok(())
}
