//! Append-only text report of captured packets.
//!
//! # Entry Format
//!
//! ```text
//! Packet Length: 3
//! Packet Data (Decimal): 12 255 0
//! Packet Data (Binary): 00001100 11111111 00000000
//! Parity Check: FAIL
//! CRC Check (divisor 1101): PASS
//! <blank line>
//! ```

use anyhow::{Context, Result};
use linkcheck_sim_core::Packet;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// One report entry: a packet and the verdicts computed for it.
#[derive(Debug, Clone)]
pub struct Report<'a> {
    pub packet: &'a Packet,
    pub parity_passed: bool,
    pub crc_passed: bool,
    pub divisor: &'a str,
}

fn verdict(passed: bool) -> &'static str {
    if passed {
        "PASS"
    } else {
        "FAIL"
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Packet Length: {}", self.packet.len())?;
        writeln!(f, "Packet Data (Decimal): {}", self.packet.decimal_dump())?;
        writeln!(f, "Packet Data (Binary): {}", self.packet.binary_dump())?;
        writeln!(f, "Parity Check: {}", verdict(self.parity_passed))?;
        writeln!(
            f,
            "CRC Check (divisor {}): {}",
            self.divisor,
            verdict(self.crc_passed)
        )?;
        writeln!(f)
    }
}

/// Append `report` to the file at `path`, creating it if needed.
pub fn append_report(path: &Path, report: &Report<'_>) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("unable to open report file {}", path.display()))?;

    write!(file, "{}", report)
        .with_context(|| format!("unable to write report file {}", path.display()))?;

    Ok(())
}
