//! Interactive session state.
//!
//! The session owns the current packet as an explicit `Option<Packet>` and
//! passes it into each core check. Operations that need a packet return
//! `None` when nothing has been captured yet, so the menu can tell "no
//! packet" apart from a failed verdict.

use crate::capture::PacketGenerator;
use crate::config::Config;
use crate::report::{append_report, Report};
use anyhow::Result;
use linkcheck_sim_core::channel::{ChannelStats, NoisyChannel};
use linkcheck_sim_core::metrics::{Metrics, TransmissionOutcome};
use linkcheck_sim_core::parity::{has_even_parity, with_parity_bit};
use linkcheck_sim_core::{check_crc, check_parity, CrcCodec, Packet};
use std::path::Path;
use tracing::{info, warn};

pub struct Session {
    config: Config,
    generator: PacketGenerator,
    channel: NoisyChannel,
    codec: CrcCodec,
    current: Option<Packet>,
    metrics: Metrics,
}

impl Session {
    pub fn new(config: Config) -> Result<Self> {
        let generator = PacketGenerator::new(config.seed);
        let channel = NoisyChannel::new(config.channel)?;

        Ok(Self {
            config,
            generator,
            channel,
            codec: CrcCodec::for_packets(),
            current: None,
            metrics: Metrics::new(),
        })
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn channel_stats(&self) -> ChannelStats {
        self.channel.stats()
    }

    /// The most recently captured packet, if any.
    pub fn current(&self) -> Option<&Packet> {
        self.current.as_ref()
    }

    /// Replace the current packet with a fresh capture.
    pub fn capture(&mut self) -> Result<&Packet> {
        let packet = self.generator.capture()?;
        info!(length = packet.len(), "packet captured");
        self.metrics.record_capture(packet.len());
        Ok(self.current.insert(packet))
    }

    /// Run the CRC check on the current packet.
    pub fn crc_check(&mut self) -> Result<Option<bool>> {
        let Some(packet) = &self.current else {
            return Ok(None);
        };

        let passed = check_crc(packet, self.config.divisor.as_str())?;
        self.metrics.record_crc(passed);
        Ok(Some(passed))
    }

    /// Run the parity check on the current packet.
    pub fn parity_check(&mut self) -> Option<bool> {
        let passed = check_parity(self.current.as_ref()?);
        self.metrics.record_parity(passed);
        Some(passed)
    }

    /// Append a report entry for the current packet.
    ///
    /// Returns the report path on success.
    pub fn write_report(&mut self) -> Result<Option<&Path>> {
        let Some(packet) = &self.current else {
            return Ok(None);
        };

        let report = Report {
            packet,
            parity_passed: check_parity(packet),
            crc_passed: check_crc(packet, self.config.divisor.as_str())?,
            divisor: self.config.divisor.as_str(),
        };
        append_report(&self.config.report_path, &report)?;

        info!(path = %self.config.report_path.display(), "report written");
        self.metrics.record_report();
        Ok(Some(self.config.report_path.as_path()))
    }

    /// Send the current packet over the noisy channel.
    ///
    /// The sender CRC-tags the payload bits and appends an even-parity bit.
    /// The receiver checks parity over the whole frame and CRC over the
    /// frame without its parity bit.
    pub fn transmit(&mut self) -> Result<Option<TransmissionOutcome>> {
        let Some(packet) = &self.current else {
            return Ok(None);
        };

        let codeword = self.codec.encode(&packet.to_bits(), &self.config.divisor)?;
        let frame = with_parity_bit(&codeword);
        let transmission = self.channel.transmit(&frame);

        let received = &transmission.received;
        let body = received.slice(0..received.len() - 1);
        let outcome = TransmissionOutcome {
            bits_flipped: transmission.flipped.len(),
            crc_passed: self.codec.verify(&body, &self.config.divisor)?,
            parity_passed: has_even_parity(received),
        };

        if outcome.is_undetected() {
            warn!(flipped = ?transmission.flipped, "corruption slipped past both checks");
        }
        self.metrics.record_transmission(&outcome);
        Ok(Some(outcome))
    }
}
