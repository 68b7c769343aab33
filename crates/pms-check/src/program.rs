//! The program under test.

use anyhow::{Context, Result};
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use tracing::{debug, warn};

/// How a single invocation of the program ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgramStatus {
    Exited(ExitStatus),
    /// The process could not be spawned; the output file stays empty.
    NotStarted(String),
}

impl ProgramStatus {
    pub fn success(&self) -> bool {
        matches!(self, ProgramStatus::Exited(status) if status.success())
    }
}

impl fmt::Display for ProgramStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgramStatus::Exited(status) => write!(f, "{status}"),
            ProgramStatus::NotStarted(reason) => write!(f, "not started ({reason})"),
        }
    }
}

/// Runs `<program> <input_size>` with stdout redirected into a file.
#[derive(Debug, Clone)]
pub struct ProgramUnderTest {
    program: PathBuf,
    work_dir: PathBuf,
}

impl ProgramUnderTest {
    pub fn new(program: impl Into<PathBuf>, work_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            work_dir: work_dir.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Truncates `output`, then runs the program with its stdout going there.
    ///
    /// Blocks until the program exits. A program that fails to start or exits
    /// nonzero is not an error here; the status is returned for the caller.
    pub fn run(&self, input_size: u64, output: &Path) -> Result<ProgramStatus> {
        let file = File::create(output)
            .with_context(|| format!("failed to create {}", output.display()))?;

        debug!(
            "running {} {input_size} > {}",
            self.program.display(),
            output.display()
        );
        let spawned = Command::new(&self.program)
            .arg(input_size.to_string())
            .current_dir(&self.work_dir)
            .stdout(Stdio::from(file))
            .status();

        let status = match spawned {
            Ok(status) => {
                if !status.success() {
                    warn!(
                        "{} {input_size} exited with {status}",
                        self.program.display()
                    );
                }
                ProgramStatus::Exited(status)
            }
            Err(err) => {
                warn!("failed to start {}: {err}", self.program.display());
                ProgramStatus::NotStarted(err.to_string())
            }
        };
        Ok(status)
    }
}
