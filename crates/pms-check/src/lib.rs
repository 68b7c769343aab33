//! pms-check — differential test runner for sort programs.
//!
//! Runs a program with input sizes `2^1 ..= 2^10`, takes the first line of
//! its output as the input sequence, and checks that the rest of the output is
//! that sequence sorted, one value per line.

pub mod compare;
pub mod config;
pub mod expected;
pub mod lenient;
pub mod program;
pub mod runner;

pub use anyhow::{Context, Result};
pub use compare::{ByteDiff, ExternalDiff, FileComparator};
pub use config::{DiffMode, RunnerConfig};
pub use lenient::{parse_leading_int, parse_line};
pub use program::{ProgramStatus, ProgramUnderTest};
pub use runner::{failure_message, IterationOutcome, RunReport, Runner, Verdict};
