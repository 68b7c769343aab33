use anyhow::Result;
use clap::{ArgAction, Parser};
use pms_check::config::{
    DEFAULT_DIFF_TOOL, DEFAULT_EXPECTED_FILE, DEFAULT_OUTPUT_FILE, DEFAULT_PROGRAM,
};
use pms_check::{DiffMode, Runner, RunnerConfig};
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// pms-test — runs a sort program for input sizes 2^min..=2^max and diffs its
/// output against the expected sorted sequence.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Program under test, called as `<program> <input_size>`
    #[arg(long, short, default_value = DEFAULT_PROGRAM)]
    program: PathBuf,

    /// Directory to run in; the output files are written here
    #[arg(long, short = 'C', default_value = ".")]
    work_dir: PathBuf,

    /// File receiving the program's standard output
    #[arg(long, default_value = DEFAULT_OUTPUT_FILE)]
    output_file: PathBuf,

    /// File the expected output is written to
    #[arg(long, default_value = DEFAULT_EXPECTED_FILE)]
    expected_file: PathBuf,

    /// First exponent; the input size is 2^exponent
    #[arg(long, default_value_t = 1)]
    min_exponent: u32,

    /// Last exponent (inclusive)
    #[arg(long, default_value_t = 10)]
    max_exponent: u32,

    /// How to compare the output with the expected file
    #[arg(long, value_enum, default_value_t = DiffMode::External)]
    diff: DiffMode,

    /// Diff tool for `--diff external`, called with `-q`
    #[arg(long, default_value = DEFAULT_DIFF_TOOL)]
    diff_tool: PathBuf,

    /// Also fail an input size when the program exits nonzero
    #[arg(long)]
    strict: bool,

    /// More log output on stderr (-v, -vv, -vvv)
    #[arg(long, short, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn into_config(self) -> RunnerConfig {
        RunnerConfig {
            program: self.program,
            work_dir: self.work_dir,
            output_file: self.output_file,
            expected_file: self.expected_file,
            min_exponent: self.min_exponent,
            max_exponent: self.max_exponent,
            diff: self.diff,
            diff_tool: self.diff_tool,
            strict: self.strict,
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.into_config();
    info!("pms-test: testing {}", config.program.display());

    let runner = Runner::new(config)?;
    let stdout = io::stdout();
    let report = runner.run(&mut stdout.lock())?;

    info!(
        "pms-test: {} of {} input sizes failed",
        report.failures().count(),
        report.outcomes.len()
    );
    Ok(())
}
