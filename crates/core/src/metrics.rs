//! Session metrics for the error detection simulator.
//!
//! Counts what the operator did and how the two checks behaved:
//! - Captures and reports
//! - Direct CRC and parity verdicts on captured packets
//! - Channel transmissions and whether corruption was caught
//!
//! # Thread Safety
//!
//! The `Metrics` struct is NOT thread-safe. The simulator is single-threaded
//! and updates it explicitly after each operation.

use std::time::{Duration, Instant};

/// How a transmitted frame fared against both checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransmissionOutcome {
    /// Number of bits the channel flipped
    pub bits_flipped: usize,

    /// CRC verdict at the receiver
    pub crc_passed: bool,

    /// Parity verdict at the receiver
    pub parity_passed: bool,
}

impl TransmissionOutcome {
    pub fn is_corrupted(&self) -> bool {
        self.bits_flipped > 0
    }

    /// Corrupted, yet both checks passed.
    pub fn is_undetected(&self) -> bool {
        self.is_corrupted() && self.crc_passed && self.parity_passed
    }
}

/// Counters for one interactive session.
#[derive(Debug, Clone)]
pub struct Metrics {
    /// When the session started
    pub start_time: Instant,

    // === Captures ===
    /// Packets generated
    pub packets_captured: u64,

    /// Total payload bytes across all captures
    pub bytes_captured: u64,

    // === Direct checks ===
    /// CRC checks run on a captured packet
    pub crc_checks: u64,

    /// CRC checks that passed
    pub crc_passed: u64,

    /// Parity checks run on a captured packet
    pub parity_checks: u64,

    /// Parity checks that passed
    pub parity_passed: u64,

    // === Channel ===
    /// Frames sent through the noisy channel
    pub transmissions: u64,

    /// Bits flipped by the channel
    pub bits_flipped: u64,

    /// Frames that arrived with at least one flipped bit
    pub frames_corrupted: u64,

    /// Corrupted frames rejected by CRC
    pub detected_by_crc: u64,

    /// Corrupted frames rejected by parity
    pub detected_by_parity: u64,

    /// Corrupted frames that passed both checks
    pub undetected: u64,

    // === Reports ===
    /// Report entries appended
    pub reports_written: u64,
}

impl Metrics {
    /// Create new metrics with start time set to now.
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            packets_captured: 0,
            bytes_captured: 0,
            crc_checks: 0,
            crc_passed: 0,
            parity_checks: 0,
            parity_passed: 0,
            transmissions: 0,
            bits_flipped: 0,
            frames_corrupted: 0,
            detected_by_crc: 0,
            detected_by_parity: 0,
            undetected: 0,
            reports_written: 0,
        }
    }

    pub fn record_capture(&mut self, length: usize) {
        self.packets_captured += 1;
        self.bytes_captured += length as u64;
    }

    pub fn record_crc(&mut self, passed: bool) {
        self.crc_checks += 1;
        self.crc_passed += passed as u64;
    }

    pub fn record_parity(&mut self, passed: bool) {
        self.parity_checks += 1;
        self.parity_passed += passed as u64;
    }

    pub fn record_transmission(&mut self, outcome: &TransmissionOutcome) {
        self.transmissions += 1;
        self.bits_flipped += outcome.bits_flipped as u64;

        if !outcome.is_corrupted() {
            return;
        }
        self.frames_corrupted += 1;
        self.detected_by_crc += !outcome.crc_passed as u64;
        self.detected_by_parity += !outcome.parity_passed as u64;
        self.undetected += outcome.is_undetected() as u64;
    }

    pub fn record_report(&mut self) {
        self.reports_written += 1;
    }

    /// Elapsed session time.
    pub fn duration(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Fraction of corrupted frames caught by CRC.
    ///
    /// Returns 0.0 if nothing was corrupted.
    pub fn crc_detection_rate(&self) -> f64 {
        ratio(self.detected_by_crc, self.frames_corrupted)
    }

    /// Fraction of corrupted frames caught by parity.
    pub fn parity_detection_rate(&self) -> f64 {
        ratio(self.detected_by_parity, self.frames_corrupted)
    }

    /// Print a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!("\n=== Session Summary ===");
        println!("Duration: {} ms", self.duration().as_millis());
        println!();

        println!("=== Captures ===");
        println!("Packets captured: {}", self.packets_captured);
        println!("Bytes captured: {}", self.bytes_captured);
        println!("Reports written: {}", self.reports_written);
        println!();

        println!("=== Direct Checks ===");
        println!("CRC: {}/{} passed", self.crc_passed, self.crc_checks);
        println!("Parity: {}/{} passed", self.parity_passed, self.parity_checks);
        println!();

        println!("=== Channel ===");
        println!("Frames sent: {}", self.transmissions);
        println!("Bits flipped: {}", self.bits_flipped);
        println!("Frames corrupted: {}", self.frames_corrupted);
        println!(
            "Caught by CRC: {} ({:.1}%)",
            self.detected_by_crc,
            self.crc_detection_rate() * 100.0
        );
        println!(
            "Caught by parity: {} ({:.1}%)",
            self.detected_by_parity,
            self.parity_detection_rate() * 100.0
        );
        println!("Undetected: {}", self.undetected);
        println!();
    }

    /// Export metrics as a simple text format (for parsing/testing).
    pub fn export_text(&self) -> String {
        format!(
            "packets_captured={}\n\
             crc_checks={}\n\
             crc_passed={}\n\
             parity_checks={}\n\
             parity_passed={}\n\
             transmissions={}\n\
             bits_flipped={}\n\
             frames_corrupted={}\n\
             detected_by_crc={}\n\
             detected_by_parity={}\n\
             undetected={}\n\
             reports_written={}\n",
            self.packets_captured,
            self.crc_checks,
            self.crc_passed,
            self.parity_checks,
            self.parity_passed,
            self.transmissions,
            self.bits_flipped,
            self.frames_corrupted,
            self.detected_by_crc,
            self.detected_by_parity,
            self.undetected,
            self.reports_written,
        )
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

fn ratio(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}
