//! Quiet file comparison.
//!
//! The comparator only answers "same or not"; nothing is printed to the
//! console. The external `diff` is the default, the builtin one avoids the
//! dependency on a system tool.

use crate::config::{DiffMode, RunnerConfig};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, warn};

/// Byte-exact comparison of two files.
pub trait FileComparator {
    /// `true` when both files hold exactly the same bytes.
    fn same_content(&self, left: &Path, right: &Path) -> Result<bool>;
}

/// `<tool> -q <left> <right>`, judged by exit status only.
#[derive(Debug, Clone)]
pub struct ExternalDiff {
    tool: PathBuf,
}

impl ExternalDiff {
    pub fn new(tool: impl Into<PathBuf>) -> Self {
        Self { tool: tool.into() }
    }
}

impl FileComparator for ExternalDiff {
    fn same_content(&self, left: &Path, right: &Path) -> Result<bool> {
        let output = Command::new(&self.tool)
            .arg("-q")
            .arg(left)
            .arg(right)
            .stdin(Stdio::null())
            .output()
            .with_context(|| format!("failed to run {}", self.tool.display()))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !stdout.trim().is_empty() {
            debug!("{}: {}", self.tool.display(), stdout.trim());
        }

        // diff: 0 same, 1 different, anything else is trouble.
        match output.status.code() {
            Some(0) => Ok(true),
            Some(1) => Ok(false),
            _ => {
                warn!(
                    "{} exited with {}: {}",
                    self.tool.display(),
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                );
                Ok(false)
            }
        }
    }
}

/// Reads both files and compares them in-process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ByteDiff;

impl FileComparator for ByteDiff {
    fn same_content(&self, left: &Path, right: &Path) -> Result<bool> {
        let left_bytes =
            fs::read(left).with_context(|| format!("failed to read {}", left.display()))?;
        let right_bytes =
            fs::read(right).with_context(|| format!("failed to read {}", right.display()))?;
        Ok(left_bytes == right_bytes)
    }
}

/// The comparator selected by `config.diff`.
pub fn comparator_for(config: &RunnerConfig) -> Box<dyn FileComparator> {
    match config.diff {
        DiffMode::External => Box::new(ExternalDiff::new(&config.diff_tool)),
        DiffMode::Builtin => Box::new(ByteDiff),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_pair(left: &str, right: &str) -> (tempfile::TempDir, PathBuf, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a");
        let b = dir.path().join("b");
        fs::write(&a, left).unwrap();
        fs::write(&b, right).unwrap();
        (dir, a, b)
    }

    #[test]
    fn byte_diff_detects_equal_and_different() {
        let (_dir, a, b) = write_pair("2 1\n1\n2\n", "2 1\n1\n2\n");
        assert!(ByteDiff.same_content(&a, &b).unwrap());

        let (_dir, a, b) = write_pair("2 1\n2\n1\n", "2 1\n1\n2\n");
        assert!(!ByteDiff.same_content(&a, &b).unwrap());
    }

    #[test]
    fn byte_diff_missing_file_is_an_error() {
        let (dir, a, _b) = write_pair("x", "x");
        assert!(ByteDiff.same_content(&a, &dir.path().join("missing")).is_err());
    }

    #[test]
    fn external_diff_matches_exit_status() {
        let diff = ExternalDiff::new("diff");
        let (_dir, a, b) = write_pair("1\n", "1\n");
        assert!(diff.same_content(&a, &b).unwrap());

        let (_dir, a, b) = write_pair("1\n", "2\n");
        assert!(!diff.same_content(&a, &b).unwrap());
    }

    #[test]
    fn external_diff_missing_tool_is_an_error() {
        let diff = ExternalDiff::new("/nonexistent/diff-tool");
        let (_dir, a, b) = write_pair("1\n", "1\n");
        let err = diff.same_content(&a, &b).unwrap_err();
        assert!(err.to_string().contains("failed to run"), "{err}");
    }

    #[test]
    fn selects_comparator_from_config() {
        let (_dir, a, b) = write_pair("same", "same");
        let config = RunnerConfig {
            diff: DiffMode::Builtin,
            diff_tool: PathBuf::from("/nonexistent/diff-tool"),
            ..RunnerConfig::default()
        };
        // The builtin comparator never touches the tool.
        assert!(comparator_for(&config).same_content(&a, &b).unwrap());
    }
}
