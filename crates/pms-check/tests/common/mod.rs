//! Shared helpers: fake programs under test written as `sh` scripts.

#![allow(dead_code)]

use pms_check::{DiffMode, RunReport, Runner, RunnerConfig};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

static SPAWN_LOCK: Mutex<()> = Mutex::new(());

/// Serializes tests that write and then exec a script. A fork in a parallel
/// test could otherwise still hold the script open for writing (ETXTBSY).
pub fn serial() -> MutexGuard<'static, ()> {
    SPAWN_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Writes an executable `#!/bin/sh` script named `name` into `dir`.
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path
}

/// Config for a run inside `dir` with the builtin comparator.
pub fn config_in(dir: &Path, program: &str) -> RunnerConfig {
    RunnerConfig {
        program: PathBuf::from(program),
        work_dir: dir.to_path_buf(),
        diff: DiffMode::Builtin,
        ..RunnerConfig::default()
    }
}

/// Runs `config` and returns the report plus everything printed to the console.
pub fn run_capture(config: RunnerConfig) -> (RunReport, String) {
    let runner = Runner::new(config).unwrap();
    let mut console = Vec::new();
    let report = runner.run(&mut console).unwrap();
    (report, String::from_utf8(console).unwrap())
}
