//! Trace-driven branch predictor simulator CLI.
//!
//! This binary runs one predictor over a branch trace and reports its accuracy. It performs:
//! 1. **Configuration:** Selects the predictor from command-line shorthand or a JSON file.
//! 2. **Ingestion:** Reads `<hex pc> <0|1>` lines from a trace file or stdin.
//! 3. **Reporting:** Prints the branch count, mispredictions and misprediction rate.

use std::error::Error;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::{fs, process};

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use bpsim_core::sim::{self, TraceReader};
use bpsim_core::{BranchPredictor, Predictor, PredictorConfig};

#[derive(Parser, Debug)]
#[command(
    name = "bpsim",
    author,
    version,
    about = "Trace-driven branch direction predictor simulator",
    long_about = "Run a branch predictor over a trace of conditional branches and report its misprediction rate.\n\nEach trace line is `<hex pc> <outcome>` with outcome 1 (taken) or 0 (not taken).\n\nExamples:\n  bpsim --predictor gshare:13 traces/int_1.txt\n  bpsim --predictor tournament:9:10:10 < traces/fp_1.txt\n  bpsim --config perceptron.json traces/mm_1.txt"
)]
struct Cli {
    /// Predictor to run: static, gshare:<G>, tournament:<G>:<L>:<P> or custom.
    #[arg(short, long, default_value = "static")]
    predictor: PredictorConfig,

    /// JSON predictor configuration; takes precedence over --predictor.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log predictor construction and other debug output to stderr.
    #[arg(short, long)]
    verbose: bool,

    /// Branch trace to read; stdin when omitted.
    trace: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(&cli) {
        eprintln!("error: {err}");
        let mut source = err.source();
        while let Some(cause) = source {
            eprintln!("  caused by: {cause}");
            source = cause.source();
        }
        process::exit(1);
    }
}

/// Installs the stderr subscriber; `RUST_LOG` overrides the level picked by `--verbose`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Builds the predictor, drives it over the trace and prints the report.
fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let config = match &cli.config {
        Some(path) => PredictorConfig::from_json(&fs::read_to_string(path)?)?,
        None => cli.predictor.clone(),
    };

    let mut predictor = Predictor::new(&config)?;
    info!(%config, storage_bits = predictor.storage_bits(), "running trace");

    let stats = match &cli.trace {
        Some(path) => sim::run(&mut predictor, TraceReader::open(path)?)?,
        None => sim::run(
            &mut predictor,
            TraceReader::new(BufReader::new(io::stdin().lock())),
        )?,
    };

    println!(
        "Predictor: {} ({config}, {} bits)",
        predictor.name(),
        predictor.storage_bits()
    );
    stats.print();
    Ok(())
}
