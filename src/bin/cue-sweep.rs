//! cue-sweep CLI
//!
//! Sweeps the parameter space, skipping every tuple already present in the
//! experiment log, and runs an external simulation command for the rest.
//! Safe to Ctrl+C and re-run: tuples the simulation logged are skipped.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cue_sweep::{SweepConfig, SweepDriver};

#[derive(Parser, Debug)]
#[command(name = "cue-sweep")]
#[command(about = "Run a simulation once for every parameter tuple not yet in the experiment log")]
struct Args {
    /// JSON sweep configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Experiment log CSV (overrides the config file)
    #[arg(long)]
    log_path: Option<PathBuf>,

    /// Treat a missing experiment log as empty
    #[arg(long)]
    allow_missing_log: bool,

    /// List the tuples that would run, run nothing
    #[arg(long)]
    dry_run: bool,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Simulation command, receives the run config as JSON on stdin
    #[arg(last = true)]
    command: Vec<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("cue_sweep={}", args.log_level)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &args.config {
        Some(path) => SweepConfig::from_json_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => SweepConfig::new(),
    };
    if let Some(path) = args.log_path {
        config = config.log_path(path);
    }
    if args.allow_missing_log {
        config = config.allow_missing_log(true);
    }
    if !args.command.is_empty() {
        config = config.command(args.command);
    }

    let driver = SweepDriver::from_config(&config)?;

    if args.dry_run {
        let plan = driver.plan();
        for tuple in &plan {
            println!("{tuple}");
        }
        println!(
            "\n{} of {} tuples pending ({} already in {}).",
            plan.len(),
            driver.space().len(),
            driver.space().len() - plan.len(),
            config.log_path.display()
        );
        return Ok(());
    }

    let Some(mut runner) = config.command_runner() else {
        bail!("no simulation command given (pass it after `--` or set \"command\" in the config)");
    };

    let report = driver.run(&mut runner)?;
    println!(
        "Done. {} simulated, {} skipped, {} total in {:.1}s.",
        report.executed,
        report.skipped,
        report.total,
        report.elapsed().num_milliseconds() as f64 / 1000.0
    );
    Ok(())
}
