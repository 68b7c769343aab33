use anyhow::Result;
use clap::{ArgAction, Parser};
use pms::{run, PmsOptions, DEFAULT_INPUT};
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// pms — pipeline merge sort over the bytes of an input file.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Input file, one value per byte
    #[arg(long, short, default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Write this many random bytes to the input file before sorting
    #[arg(long, short)]
    generate: Option<usize>,

    /// More log output on stderr (-v, -vv, -vvv)
    #[arg(long, short, action = ArgAction::Count)]
    verbose: u8,
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

    let options = PmsOptions {
        input: cli.input,
        generate: cli.generate,
    };

    let stdout = io::stdout();
    run(&options, &mut stdout.lock())
}
