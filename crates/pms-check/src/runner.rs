//! The iteration loop.
//!
//! For every exponent `e`: run the program with `2^e`, rebuild the expected
//! output from its first line, compare, and print a failure line on mismatch.
//! Iterations are strictly sequential and a failing one never stops the run.

use crate::compare::{comparator_for, FileComparator};
use crate::config::{input_size, RunnerConfig};
use crate::expected::{read_first_line, write_expected};
use crate::program::ProgramUnderTest;
use anyhow::{bail, Context, Result};
use std::io::Write;
use tracing::{debug, error, info};

/// The line printed for a failing input size.
pub fn failure_message(input_size: u64) -> String {
    format!("TEST FAILED with input size {input_size}")
}

/// Result of one iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Passed,
    /// Output differs from the expected file.
    Mismatch,
    /// Output matched, but the program failed and the run is strict.
    ProgramFailed,
    /// The iteration itself could not be carried out.
    Error(String),
}

impl Verdict {
    pub fn passed(&self) -> bool {
        matches!(self, Verdict::Passed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IterationOutcome {
    pub exponent: u32,
    pub input_size: u64,
    pub verdict: Verdict,
}

/// Everything a run produced, in iteration order.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub outcomes: Vec<IterationOutcome>,
}

impl RunReport {
    pub fn failures(&self) -> impl Iterator<Item = &IterationOutcome> {
        self.outcomes.iter().filter(|o| !o.verdict.passed())
    }

    pub fn all_passed(&self) -> bool {
        self.failures().next().is_none()
    }
}

pub struct Runner {
    config: RunnerConfig,
    program: ProgramUnderTest,
    comparator: Box<dyn FileComparator>,
}

impl Runner {
    /// Validates `config` and picks the comparator it names.
    pub fn new(config: RunnerConfig) -> Result<Self> {
        let comparator = comparator_for(&config);
        Self::with_comparator(config, comparator)
    }

    pub fn with_comparator(
        config: RunnerConfig,
        comparator: Box<dyn FileComparator>,
    ) -> Result<Self> {
        config.validate().context("invalid runner configuration")?;
        let program = ProgramUnderTest::new(config.program_path()?, &config.work_dir);
        Ok(Self {
            config,
            program,
            comparator,
        })
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Runs one iteration. Errors are internal failures, not mismatches.
    pub fn run_iteration(&self, exponent: u32) -> Result<Verdict> {
        let input_size = input_size(exponent);
        let output = self.config.output_path();
        let expected = self.config.expected_path();

        let status = self.program.run(input_size, &output)?;

        // No line at all: there is no input sequence to check against.
        let first_line = read_first_line(&output)?;
        if first_line.is_empty() {
            bail!(
                "{} produced no output for input size {input_size} ({status})",
                self.program.program().display()
            );
        }
        write_expected(&expected, &first_line)?;

        let same = self
            .comparator
            .same_content(&output, &expected)
            .with_context(|| {
                format!(
                    "failed to compare {} with {}",
                    output.display(),
                    expected.display()
                )
            })?;

        let verdict = if !same {
            Verdict::Mismatch
        } else if self.config.strict && !status.success() {
            Verdict::ProgramFailed
        } else {
            Verdict::Passed
        };
        debug!(input_size, ?verdict, %status, "iteration finished");
        Ok(verdict)
    }

    /// Runs every iteration, writing a failure line to `console` for each
    /// failing input size.
    ///
    /// Only a failure to write to `console` aborts the run.
    pub fn run(&self, console: &mut impl Write) -> Result<RunReport> {
        let mut report = RunReport::default();

        for exponent in self.config.exponents() {
            let input_size = input_size(exponent);
            info!("pms-test: input size {input_size}");

            let verdict = match self.run_iteration(exponent) {
                Ok(verdict) => verdict,
                Err(err) => {
                    error!("iteration with input size {input_size} failed: {err:#}");
                    Verdict::Error(format!("{err:#}"))
                }
            };

            if !verdict.passed() {
                writeln!(console, "{}", failure_message(input_size))
                    .and_then(|()| console.flush())
                    .context("failed to write to console")?;
            }

            report.outcomes.push(IterationOutcome {
                exponent,
                input_size,
                verdict,
            });
        }

        Ok(report)
    }
}
