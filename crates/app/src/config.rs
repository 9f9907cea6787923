//! Configuration for the linkcheck-sim application.
//!
//! Handles parsing command-line arguments (with environment fallbacks) and
//! resolving defaults, including a time-based seed when none is given.
//!
//! # Philosophy
//!
//! The tool should work with ZERO arguments, using the classic `1101`
//! divisor and a light channel error rate. The resolved seed is printed with
//! `--print-config` so any run can be replayed.

use anyhow::Result;
use clap::Parser;
use linkcheck_sim_core::channel::ChannelConfig;
use linkcheck_sim_core::Divisor;
use std::path::PathBuf;

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "linkcheck-sim",
    about = "Capture simulated packets and run CRC and parity checks on them"
)]
pub struct Args {
    /// CRC generator polynomial as a bit string, MSB first
    #[arg(
        long,
        value_name = "BITS",
        env = "LINKCHECK_DIVISOR",
        default_value = "1101",
        value_parser = parse_divisor
    )]
    pub divisor: Divisor,

    /// Random seed for packet capture and channel noise
    #[arg(long, value_name = "N", env = "LINKCHECK_SEED")]
    pub seed: Option<u64>,

    /// Report file, appended to on every report
    #[arg(
        long,
        value_name = "PATH",
        env = "LINKCHECK_REPORT",
        default_value = "network_report.txt"
    )]
    pub report: PathBuf,

    /// Per-bit flip probability of the simulated channel
    #[arg(
        long = "ber",
        value_name = "RATE",
        env = "LINKCHECK_BER",
        default_value_t = 0.01
    )]
    pub bit_error_rate: f64,

    /// Print resolved configuration before starting
    #[arg(long)]
    pub print_config: bool,

    /// Don't print the session summary on exit
    #[arg(long)]
    pub no_metrics: bool,

    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long)]
    pub verbose: bool,
}

fn parse_divisor(s: &str) -> Result<Divisor, String> {
    s.parse::<Divisor>().map_err(|err| err.to_string())
}

/// Complete configuration for a session.
#[derive(Debug, Clone)]
pub struct Config {
    /// CRC divisor used for every CRC check
    pub divisor: Divisor,

    /// Seed for the packet generator
    pub seed: u64,

    /// Report file path
    pub report_path: PathBuf,

    /// Channel simulation config
    pub channel: ChannelConfig,

    /// Whether to print detailed config
    pub print_config: bool,

    /// Whether to print the metrics summary on exit
    pub print_metrics: bool,
}

impl Config {
    /// Resolve configuration from parsed arguments.
    ///
    /// If no seed is provided, derives one from the wall clock. The channel
    /// RNG is seeded from the same value (offset by one) so it does not
    /// mirror the capture stream.
    pub fn from_args(args: Args) -> Result<Self> {
        let seed = args.seed.unwrap_or_else(time_seed);

        let channel = ChannelConfig {
            bit_error_rate: args.bit_error_rate,
            seed: seed.wrapping_add(1),
        };
        channel.validate()?;

        Ok(Config {
            divisor: args.divisor,
            seed,
            report_path: args.report,
            channel,
            print_config: args.print_config,
            print_metrics: !args.no_metrics,
        })
    }

    /// Print the configuration in human-readable form.
    pub fn print(&self) {
        println!("=== Configuration ===");
        println!("Divisor: {} ({} remainder bits)", self.divisor, self.divisor.remainder_width());
        println!("Seed: {}", self.seed);
        println!("Report file: {}", self.report_path.display());
        println!();
        println!("=== Channel Simulation ===");
        println!("Bit error rate: {:.4}", self.channel.bit_error_rate);
        println!("Channel seed: {}", self.channel.seed);
        println!();
    }
}

fn time_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or_default()
}
