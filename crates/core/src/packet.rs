//! Captured packet model.
//!
//! A packet is a fixed-capacity byte buffer plus a logical length. Only the
//! first `length` bytes are meaningful; the rest of the buffer is never read.
//!
//! # Layout
//!
//! ```text
//! +---------------------------+
//! | payload [u8; 16]          |  bytes 0..length are valid
//! +---------------------------+
//! | length                    |  0..=16
//! +---------------------------+
//! ```
//!
//! Packets are immutable once built. The checks read them, the report layer
//! prints them, and a new capture replaces them.

use crate::bitio::BitString;
use crate::error::{PacketError, Result};

/// Maximum payload size of a captured packet, in bytes.
pub const PACKET_CAPACITY: usize = 16;

/// A captured packet.
///
/// # Invariants
/// - `length <= PACKET_CAPACITY`
/// - bytes at `length..` are zero and never exposed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    payload: [u8; PACKET_CAPACITY],
    length: usize,
}

impl Packet {
    /// Build a packet from a payload slice.
    ///
    /// # Errors
    /// Returns `PacketError::ExceedsCapacity` if the slice is longer than
    /// [`PACKET_CAPACITY`].
    pub fn new(bytes: &[u8]) -> Result<Self> {
        if bytes.len() > PACKET_CAPACITY {
            return Err(PacketError::ExceedsCapacity {
                length: bytes.len(),
                capacity: PACKET_CAPACITY,
            }
            .into());
        }

        let mut payload = [0u8; PACKET_CAPACITY];
        payload[..bytes.len()].copy_from_slice(bytes);

        Ok(Self {
            payload,
            length: bytes.len(),
        })
    }

    /// A packet with no payload.
    pub fn empty() -> Self {
        Self {
            payload: [0u8; PACKET_CAPACITY],
            length: 0,
        }
    }

    /// The meaningful bytes of the packet.
    pub fn payload(&self) -> &[u8] {
        &self.payload[..self.length]
    }

    /// Logical length in bytes.
    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Expand the payload into bits, 8 per byte, MSB first.
    pub fn to_bits(&self) -> BitString {
        BitString::from_bytes(self.payload())
    }

    /// Payload as space-separated decimal byte values, e.g. `"12 255 0"`.
    pub fn decimal_dump(&self) -> String {
        self.payload()
            .iter()
            .map(|byte| byte.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Payload as space-separated 8-bit groups, e.g. `"00001100 11111111"`.
    pub fn binary_dump(&self) -> String {
        self.payload()
            .iter()
            .map(|byte| format!("{:08b}", byte))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for Packet {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_copies_payload() {
        let packet = Packet::new(&[1, 2, 3]).unwrap();
        assert_eq!(packet.len(), 3);
        assert_eq!(packet.payload(), &[1, 2, 3]);
        assert!(!packet.is_empty());
    }

    #[test]
    fn test_full_capacity() {
        let bytes = [0xAB; PACKET_CAPACITY];
        let packet = Packet::new(&bytes).unwrap();
        assert_eq!(packet.len(), PACKET_CAPACITY);
        assert_eq!(packet.to_bits().len(), PACKET_CAPACITY * 8);
    }

    #[test]
    fn test_exceeds_capacity() {
        let bytes = [0u8; PACKET_CAPACITY + 1];
        let result = Packet::new(&bytes);
        assert!(matches!(
            result,
            Err(crate::error::Error::Packet(PacketError::ExceedsCapacity {
                length: 17,
                capacity: 16
            }))
        ));
    }

    #[test]
    fn test_empty_packet() {
        let packet = Packet::empty();
        assert!(packet.is_empty());
        assert!(packet.payload().is_empty());
        assert!(packet.to_bits().is_empty());
        assert_eq!(packet.decimal_dump(), "");
        assert_eq!(packet.binary_dump(), "");
        assert_eq!(Packet::new(&[]).unwrap(), packet);
    }

    #[test]
    fn test_dumps() {
        let packet = Packet::new(&[12, 255, 0]).unwrap();
        assert_eq!(packet.decimal_dump(), "12 255 0");
        assert_eq!(packet.binary_dump(), "00001100 11111111 00000000");
    }
}
