//! Bit strings and bit/byte conversion.
//!
//! The CRC codec works on one element per bit rather than on packed bytes,
//! so this module provides [`BitString`] plus the conversions between it and
//! raw byte payloads.
//!
//! # Bit Order
//! Bytes expand MSB-first: `0xA5` becomes `10100101`. Packing goes the other
//! way and pads an incomplete final byte with trailing zeros.
//!
//! # Example
//! ```
//! use linkcheck_sim_core::bitio::BitString;
//!
//! let bits = BitString::from_bytes(&[0xA5]);
//! assert_eq!(bits.to_string(), "10100101");
//!
//! let parsed: BitString = "101".parse().unwrap();
//! assert_eq!(parsed.to_bytes(), vec![0b1010_0000]);
//! ```

use crate::error::BitStringError;
use std::fmt;
use std::ops::Range;
use std::str::FromStr;

/// An owned, ordered sequence of bits.
///
/// Index 0 is the first (most significant) bit of the polynomial the string
/// represents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BitString {
    bits: Vec<bool>,
}

impl BitString {
    /// Create an empty bit string.
    pub fn new() -> Self {
        Self { bits: Vec::new() }
    }

    /// Create a bit string of `len` zero bits.
    pub fn zeros(len: usize) -> Self {
        Self {
            bits: vec![false; len],
        }
    }

    /// Expand bytes into bits, 8 per byte, MSB first.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut bits = Vec::with_capacity(bytes.len() * 8);
        for &byte in bytes {
            for shift in (0..8).rev() {
                bits.push((byte >> shift) & 1 == 1);
            }
        }
        Self { bits }
    }

    /// Pack bits into bytes, MSB first.
    ///
    /// A trailing partial byte is padded with zeros, so the caller must track
    /// the exact bit length if it is not a multiple of 8.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.bits
            .chunks(8)
            .map(|chunk| {
                chunk
                    .iter()
                    .enumerate()
                    .fold(0u8, |acc, (i, &bit)| acc | ((bit as u8) << (7 - i)))
            })
            .collect()
    }

    /// Number of bits.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Bit at `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<bool> {
        self.bits.get(index).copied()
    }

    pub fn push(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    /// Append all bits of `other`.
    pub fn extend(&mut self, other: &BitString) {
        self.bits.extend_from_slice(&other.bits);
    }

    /// Copy out the bits in `range`.
    ///
    /// # Panics
    /// Panics if `range` is out of bounds, like slice indexing.
    pub fn slice(&self, range: Range<usize>) -> BitString {
        Self {
            bits: self.bits[range].to_vec(),
        }
    }

    /// Invert the bit at `index`. Returns false if `index` is out of range.
    pub fn flip(&mut self, index: usize) -> bool {
        match self.bits.get_mut(index) {
            Some(bit) => {
                *bit = !*bit;
                true
            }
            None => false,
        }
    }

    /// Count of set bits.
    pub fn count_ones(&self) -> usize {
        self.bits.iter().filter(|&&bit| bit).count()
    }

    /// XOR of every bit: 0 for an even number of ones, 1 for odd.
    pub fn parity(&self) -> u8 {
        self.bits.iter().fold(0u8, |acc, &bit| acc ^ bit as u8)
    }

    /// True if every bit is zero (vacuously true when empty).
    pub fn is_all_zero(&self) -> bool {
        self.bits.iter().all(|&bit| !bit)
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.bits
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [bool] {
        &mut self.bits
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().copied()
    }
}

impl From<Vec<bool>> for BitString {
    fn from(bits: Vec<bool>) -> Self {
        Self { bits }
    }
}

impl FromIterator<bool> for BitString {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self {
            bits: iter.into_iter().collect(),
        }
    }
}

/// Parses a string of ASCII '0'/'1' characters.
impl FromStr for BitString {
    type Err = BitStringError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.chars()
            .enumerate()
            .map(|(position, found)| match found {
                '0' => Ok(false),
                '1' => Ok(true),
                _ => Err(BitStringError::InvalidChar { position, found }),
            })
            .collect()
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}
