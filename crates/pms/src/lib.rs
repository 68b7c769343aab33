//! pms — pipeline merge sort.
//!
//! Sorts a file of unsigned bytes with a pipeline of merging stages, one
//! thread per stage, and prints the input line followed by the sorted values.

pub mod input;
pub mod pipeline;

pub use anyhow::{Context, Result};
pub use input::{format_input_line, format_sorted, generate_numbers, read_numbers, DEFAULT_INPUT};
pub use pipeline::{merge_stage_count, pipeline_merge_sort, processor_count};

use std::io::Write;
use std::path::PathBuf;
use tracing::info;

/// Options for one `pms` run.
#[derive(Debug, Clone)]
pub struct PmsOptions {
    /// File holding the values to sort, one byte per value.
    pub input: PathBuf,
    /// Fill the input file with this many random bytes first.
    pub generate: Option<usize>,
}

impl Default for PmsOptions {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            generate: None,
        }
    }
}

/// Loads (or generates) the input, sorts it and writes the report to `out`.
///
/// The input line is written before sorting starts, so a failing sort still
/// leaves it in the output.
pub fn run(options: &PmsOptions, out: &mut impl Write) -> Result<()> {
    let values = match options.generate {
        Some(count) => generate_numbers(&options.input, count, &mut rand::thread_rng())?,
        None => read_numbers(&options.input)?,
    };
    info!("pms: sorting {} values from {}", values.len(), options.input.display());

    out.write_all(format_input_line(&values).as_bytes())
        .context("failed to write input line")?;
    out.flush().context("failed to flush output")?;

    let sorted = pipeline_merge_sort(&values).context("pipeline merge sort failed")?;
    out.write_all(format_sorted(&sorted).as_bytes())
        .context("failed to write sorted values")?;
    out.flush().context("failed to flush output")?;
    Ok(())
}
