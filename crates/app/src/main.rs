//! linkcheck-sim: interactive CRC and parity checks on simulated packets.

mod capture;
mod config;
mod menu;
mod report;
mod session;

use anyhow::Result;
use clap::Parser;
use config::{Args, Config};
use session::Session;
use std::io;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = Config::from_args(args)?;
    if config.print_config {
        config.print();
    }
    info!(seed = config.seed, divisor = %config.divisor, "session starting");

    let print_metrics = config.print_metrics;
    let mut session = Session::new(config)?;
    menu::run(&mut session, io::stdin().lock(), io::stdout().lock())?;

    if print_metrics {
        session.metrics().print_summary();
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
