//! Even-parity check over a packet payload.
//!
//! A single parity value is accumulated by XOR over every bit of every
//! payload byte. The payload passes when that value is 0, i.e. it holds an
//! even number of set bits. An empty payload has parity 0 and passes.

use crate::bitio::BitString;
use crate::packet::Packet;
use tracing::debug;

/// Parity bit of a byte sequence: 0 if the number of set bits is even.
pub fn parity_bit(bytes: &[u8]) -> u8 {
    let mut parity = 0u8;
    for &byte in bytes {
        for bit in 0..8 {
            parity ^= (byte >> bit) & 1;
        }
    }
    parity
}

/// Returns true iff the packet payload has even parity.
pub fn check_parity(packet: &Packet) -> bool {
    let parity = parity_bit(packet.payload());
    debug!(
        length = packet.len(),
        binary = %packet.binary_dump(),
        parity,
        "parity computed"
    );
    parity == 0
}

/// Append the bit that makes the total number of ones even.
pub fn with_parity_bit(bits: &BitString) -> BitString {
    let mut framed = bits.clone();
    framed.push(bits.parity() == 1);
    framed
}

/// Returns true iff `bits` (data plus trailing parity bit) has even parity.
pub fn has_even_parity(bits: &BitString) -> bool {
    bits.parity() == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_ones_byte_is_even() {
        let packet = Packet::new(&[0xFF]).unwrap();
        assert!(check_parity(&packet));
    }

    #[test]
    fn test_single_set_bit_is_odd() {
        let packet = Packet::new(&[0x01]).unwrap();
        assert!(!check_parity(&packet));
    }

    #[test]
    fn test_empty_payload_passes() {
        assert!(check_parity(&Packet::empty()));
        assert_eq!(parity_bit(&[]), 0);
    }

    #[test]
    fn test_parity_spans_bytes() {
        // 1 + 1 set bits across two bytes
        assert!(check_parity(&Packet::new(&[0x80, 0x01]).unwrap()));
        // 3 + 4
        assert!(!check_parity(&Packet::new(&[0x07, 0xF0]).unwrap()));
    }

    #[test]
    fn test_parity_matches_popcount() {
        for byte in 0..=255u8 {
            assert_eq!(parity_bit(&[byte]), (byte.count_ones() % 2) as u8);
        }
    }

    #[test]
    fn test_with_parity_bit() {
        let bits: BitString = "1101".parse().unwrap();
        let framed = with_parity_bit(&bits);
        assert_eq!(framed.to_string(), "11011");
        assert!(has_even_parity(&framed));

        let bits: BitString = "1001".parse().unwrap();
        let framed = with_parity_bit(&bits);
        assert_eq!(framed.to_string(), "10010");
        assert!(has_even_parity(&framed));
    }

    #[test]
    fn test_single_flip_breaks_parity() {
        let mut framed = with_parity_bit(&BitString::from_bytes(&[0x3C, 0x81]));
        assert!(has_even_parity(&framed));
        framed.flip(5);
        assert!(!has_even_parity(&framed));
    }
}
