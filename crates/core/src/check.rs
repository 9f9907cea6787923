//! Packet-level checks exposed to the orchestrator.
//!
//! Both checks are pure functions of an explicitly supplied packet. The CRC
//! check treats the packet's expanded payload bits as a received codeword
//! (data followed by its remainder) and verifies it directly.

use crate::crc::{CrcCodec, Divisor};
use crate::packet::Packet;
use crate::Result;

pub use crate::parity::check_parity;

/// Verify the packet payload against `divisor`.
///
/// The divisor text is validated first, so an empty or non-binary divisor
/// fails with `Error::InvalidDivisor` before any division runs.
///
/// # Errors
/// - `Error::InvalidDivisor` if `divisor` is empty, non-binary, or all zeros
/// - `Error::CapacityExceeded` never occurs for a well-formed packet, but is
///   propagated from the codec
pub fn check_crc(packet: &Packet, divisor: &str) -> Result<bool> {
    let divisor: Divisor = divisor.parse()?;
    CrcCodec::for_packets().verify(&packet.to_bits(), &divisor)
}
