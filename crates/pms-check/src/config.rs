//! Runner configuration.
//!
//! File names are resolved against `work_dir`, so separate runs can use
//! separate directories without touching each other's `pms.out`/`test.out`.

use anyhow::{bail, Context, Result};
use std::ops::RangeInclusive;
use std::path::{self, Path, PathBuf};

pub const DEFAULT_PROGRAM: &str = "./test.sh";
pub const DEFAULT_OUTPUT_FILE: &str = "pms.out";
pub const DEFAULT_EXPECTED_FILE: &str = "test.out";
pub const DEFAULT_DIFF_TOOL: &str = "diff";

/// Largest exponent whose input size still fits comfortably in a `u64`.
pub const MAX_EXPONENT: u32 = 62;

/// How the output and expected files are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum DiffMode {
    /// Run `<diff-tool> -q <output> <expected>`.
    #[default]
    External,
    /// Compare the bytes in-process.
    Builtin,
}

/// Configuration for a test run.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Program under test, invoked as `<program> <input_size>`.
    pub program: PathBuf,
    /// Directory the program runs in and the files live in.
    pub work_dir: PathBuf,
    /// Receives the program's standard output.
    pub output_file: PathBuf,
    /// Written by the runner with the expected content.
    pub expected_file: PathBuf,
    /// First exponent `e`; the input size is `2^e`.
    pub min_exponent: u32,
    /// Last exponent (inclusive).
    pub max_exponent: u32,
    pub diff: DiffMode,
    /// Tool used when `diff` is [`DiffMode::External`].
    pub diff_tool: PathBuf,
    /// Count a nonzero exit as a failure even when the output matches.
    pub strict: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from(DEFAULT_PROGRAM),
            work_dir: PathBuf::from("."),
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            expected_file: PathBuf::from(DEFAULT_EXPECTED_FILE),
            min_exponent: 1,
            max_exponent: 10,
            diff: DiffMode::External,
            diff_tool: PathBuf::from(DEFAULT_DIFF_TOOL),
            strict: false,
        }
    }
}

impl RunnerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.min_exponent == 0 {
            bail!("exponents start at 1, got minimum 0");
        }
        if self.max_exponent > MAX_EXPONENT {
            bail!(
                "maximum exponent {} exceeds the supported {MAX_EXPONENT}",
                self.max_exponent
            );
        }
        if self.min_exponent > self.max_exponent {
            bail!(
                "empty exponent range {}..={}",
                self.min_exponent,
                self.max_exponent
            );
        }
        if self.output_file == self.expected_file {
            bail!(
                "output and expected file are both {}",
                self.output_file.display()
            );
        }
        Ok(())
    }

    pub fn exponents(&self) -> RangeInclusive<u32> {
        self.min_exponent..=self.max_exponent
    }

    /// Input sizes in run order, `2^e` for every configured exponent.
    pub fn input_sizes(&self) -> impl Iterator<Item = u64> {
        self.exponents().map(input_size)
    }

    pub fn output_path(&self) -> PathBuf {
        self.work_dir.join(&self.output_file)
    }

    pub fn expected_path(&self) -> PathBuf {
        self.work_dir.join(&self.expected_file)
    }

    /// Program path as handed to the OS.
    ///
    /// Relative paths with a directory part (`./test.sh`, `bin/sort`) are
    /// anchored at `work_dir` and made absolute, since the child resolves a
    /// relative path after changing into `work_dir`. Bare names are left for
    /// the `PATH` lookup.
    pub fn program_path(&self) -> Result<PathBuf> {
        resolve_program(&self.program, &self.work_dir)
    }
}

/// `2^exponent`.
pub fn input_size(exponent: u32) -> u64 {
    1u64 << exponent
}

fn resolve_program(program: &Path, work_dir: &Path) -> Result<PathBuf> {
    if program.is_relative() && program.components().count() > 1 {
        let anchored = work_dir.join(program);
        path::absolute(&anchored)
            .with_context(|| format!("failed to resolve program path {}", anchored.display()))
    } else {
        Ok(program.to_path_buf())
    }
}
