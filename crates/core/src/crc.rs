//! Polynomial CRC over bit strings.
//!
//! The codec performs binary polynomial long division by repeated
//! XOR-and-shift, one bit per element, driven by the leading bit of what is
//! left of the dividend.
//!
//! # Encode
//!
//! ```text
//!  data (N bits)        padding (D-1 zeros)
//! +--------------------+-------------------+
//! | d0 d1 ... d(N-1)   | 0 ... 0           |   working buffer, N + D - 1 bits
//! +--------------------+-------------------+
//!   divide for i in 0..N
//! +--------------------+-------------------+
//! | 0 ... 0            | remainder         |
//! +--------------------+-------------------+
//! output = data ++ remainder
//! ```
//!
//! # Verify
//!
//! The received string is divided as a whole; it passes iff the remainder
//! (its last D-1 bits after division) is all zeros.
//!
//! # Divisor
//!
//! A divisor of width D keeps a remainder width of D-1 even if it has
//! leading zeros. Division itself uses only the significant bits starting at
//! the first '1', which is the same polynomial, so every valid divisor
//! round-trips.

use crate::bitio::BitString;
use crate::error::{DivisorError, Error, Result};
use crate::packet::PACKET_CAPACITY;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// A validated CRC generator polynomial, most significant bit first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Divisor {
    text: String,
    bits: BitString,
    /// Index of the first set bit
    leading: usize,
}

impl Divisor {
    /// Width D of the divisor, leading zeros included.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Always false; an empty divisor cannot be constructed.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Number of remainder bits the divisor produces (D - 1).
    pub fn remainder_width(&self) -> usize {
        self.bits.len() - 1
    }

    /// The divisor as the text it was parsed from.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn bits(&self) -> &BitString {
        &self.bits
    }

    /// The polynomial without leading zeros. Starts with a set bit.
    fn significant(&self) -> &[bool] {
        &self.bits.as_slice()[self.leading..]
    }
}

/// Parses and validates a divisor.
///
/// # Errors
/// - `DivisorError::Empty` for a zero-length string
/// - `DivisorError::InvalidChar` for anything other than '0' or '1'
/// - `DivisorError::NoSetBit` for an all-zero divisor
impl FromStr for Divisor {
    type Err = DivisorError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(DivisorError::Empty);
        }

        let bits: BitString = s.parse().map_err(|err| match err {
            crate::error::BitStringError::InvalidChar { position, found } => {
                DivisorError::InvalidChar { position, found }
            }
        })?;

        let leading = bits
            .iter()
            .position(|bit| bit)
            .ok_or_else(|| DivisorError::NoSetBit(s.to_string()))?;

        Ok(Self {
            text: s.to_string(),
            bits,
            leading,
        })
    }
}

impl fmt::Display for Divisor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// CRC encoder/verifier with a fixed working capacity.
///
/// `capacity_bits` bounds the data portion of an operand. With a divisor of
/// width D, no operation ever works on more than `capacity_bits + D - 1`
/// bits; larger inputs are rejected before allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrcCodec {
    capacity_bits: usize,
}

impl CrcCodec {
    /// Create a codec whose data portion holds at most `capacity_bits` bits.
    pub fn new(capacity_bits: usize) -> Self {
        Self { capacity_bits }
    }

    /// Codec sized for a full packet payload expanded to bits.
    pub fn for_packets() -> Self {
        Self::new(PACKET_CAPACITY * 8)
    }

    pub fn capacity_bits(&self) -> usize {
        self.capacity_bits
    }

    /// Largest tagged length accepted for `divisor`.
    pub fn limit(&self, divisor: &Divisor) -> usize {
        self.capacity_bits + divisor.remainder_width()
    }

    /// Append the CRC remainder of `data` to `data`.
    ///
    /// Output length is always `data.len() + divisor.len() - 1`.
    ///
    /// # Errors
    /// Returns `Error::CapacityExceeded` if the tagged length would exceed
    /// [`CrcCodec::limit`].
    pub fn encode(&self, data: &BitString, divisor: &Divisor) -> Result<BitString> {
        let required = data.len() + divisor.remainder_width();
        self.check_capacity(required, divisor)?;

        let mut work = data.clone();
        work.extend(&BitString::zeros(divisor.remainder_width()));
        divide(&mut work, divisor);

        let remainder = work.slice(data.len()..required);
        debug!(data = %data, divisor = %divisor, remainder = %remainder, "crc encoded");

        let mut tagged = data.clone();
        tagged.extend(&remainder);
        Ok(tagged)
    }

    /// Returns true iff `received` divides evenly by `divisor`.
    ///
    /// `received` is expected to be data followed by its D-1 remainder bits.
    /// A string shorter than the divisor is its own remainder and passes only
    /// if it is all zeros.
    ///
    /// # Errors
    /// Returns `Error::CapacityExceeded` if `received` is longer than
    /// [`CrcCodec::limit`].
    pub fn verify(&self, received: &BitString, divisor: &Divisor) -> Result<bool> {
        self.check_capacity(received.len(), divisor)?;

        let mut work = received.clone();
        divide(&mut work, divisor);

        let tail = received.len().saturating_sub(divisor.remainder_width());
        let passed = work.as_slice()[tail..].iter().all(|&bit| !bit);
        debug!(
            received = %received,
            divisor = %divisor,
            remainder = %work.slice(tail..received.len()),
            passed,
            "crc verified"
        );
        Ok(passed)
    }

    fn check_capacity(&self, required: usize, divisor: &Divisor) -> Result<()> {
        let limit = self.limit(divisor);
        if required > limit {
            return Err(Error::CapacityExceeded { required, limit });
        }
        Ok(())
    }
}

impl Default for CrcCodec {
    fn default() -> Self {
        Self::for_packets()
    }
}

/// Modulo-2 long division in place.
///
/// After this returns, every position before the last `poly.len() - 1` bits
/// is zero and those last bits hold the remainder. The loop only visits
/// positions where the whole polynomial fits, so it never indexes past the
/// end of `work`.
fn divide(work: &mut BitString, divisor: &Divisor) {
    let poly = divisor.significant();
    let work = work.as_mut_slice();
    if work.len() < poly.len() {
        return;
    }

    for i in 0..=work.len() - poly.len() {
        if work[i] {
            for (bit, &p) in work[i..i + poly.len()].iter_mut().zip(poly) {
                *bit ^= p;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(s: &str) -> BitString {
        s.parse().unwrap()
    }

    fn divisor(s: &str) -> Divisor {
        s.parse().unwrap()
    }

    #[test]
    fn test_encode_exact_multiple() {
        // 1010001 is already divisible by 1101, so the remainder is zero
        let codec = CrcCodec::for_packets();
        let tagged = codec.encode(&bits("1010001"), &divisor("1101")).unwrap();
        assert_eq!(tagged.to_string(), "1010001000");
        assert!(codec.verify(&tagged, &divisor("1101")).unwrap());
    }

    #[test]
    fn test_encode_textbook_vector() {
        let codec = CrcCodec::for_packets();
        let tagged = codec
            .encode(&bits("11010011101100"), &divisor("1011"))
            .unwrap();
        assert_eq!(tagged.to_string(), "11010011101100100");
    }

    #[test]
    fn test_encode_byte_payload() {
        let codec = CrcCodec::for_packets();
        let tagged = codec
            .encode(&BitString::from_bytes(&[0xA5]), &divisor("1101"))
            .unwrap();
        assert_eq!(tagged.to_string(), "10100101001");
    }

    #[test]
    fn test_verify_rejects_bad_remainder() {
        let codec = CrcCodec::for_packets();
        assert!(!codec.verify(&bits("10100101000"), &divisor("1101")).unwrap());
        assert!(!codec.verify(&bits("10100101"), &divisor("1101")).unwrap());
    }

    #[test]
    fn test_empty_data() {
        let codec = CrcCodec::for_packets();
        let tagged = codec.encode(&BitString::new(), &divisor("1101")).unwrap();
        assert_eq!(tagged.to_string(), "000");
        assert!(codec.verify(&tagged, &divisor("1101")).unwrap());
        assert!(codec.verify(&BitString::new(), &divisor("1101")).unwrap());
    }

    #[test]
    fn test_short_received() {
        let codec = CrcCodec::for_packets();
        assert!(codec.verify(&bits("00"), &divisor("1101")).unwrap());
        assert!(!codec.verify(&bits("01"), &divisor("1101")).unwrap());
    }

    #[test]
    fn test_single_bit_divisor() {
        let codec = CrcCodec::for_packets();
        let tagged = codec.encode(&bits("1011"), &divisor("1")).unwrap();
        assert_eq!(tagged.to_string(), "1011");
        assert!(codec.verify(&tagged, &divisor("1")).unwrap());
    }

    #[test]
    fn test_leading_zero_divisor() {
        let codec = CrcCodec::for_packets();
        let padded = divisor("01101");
        assert_eq!(padded.remainder_width(), 4);

        let tagged = codec.encode(&bits("1010011"), &padded).unwrap();
        assert_eq!(tagged.len(), 7 + 4);
        assert!(codec.verify(&tagged, &padded).unwrap());
        assert!(!tagged.get(7).unwrap());
    }

    #[test]
    fn test_divisor_validation() {
        assert_eq!("".parse::<Divisor>().unwrap_err(), DivisorError::Empty);
        assert_eq!(
            "1201".parse::<Divisor>().unwrap_err(),
            DivisorError::InvalidChar {
                position: 1,
                found: '2'
            }
        );
        assert_eq!(
            "000".parse::<Divisor>().unwrap_err(),
            DivisorError::NoSetBit("000".to_string())
        );

        let ok = divisor("1101");
        assert_eq!(ok.len(), 4);
        assert_eq!(ok.as_str(), "1101");
        assert_eq!(ok.to_string(), "1101");
    }

    #[test]
    fn test_encode_capacity() {
        let codec = CrcCodec::new(8);
        assert_eq!(codec.limit(&divisor("1101")), 11);

        assert!(codec.encode(&bits("11111111"), &divisor("1101")).is_ok());

        let result = codec.encode(&bits("111111111"), &divisor("1101"));
        assert!(matches!(
            result,
            Err(Error::CapacityExceeded {
                required: 12,
                limit: 11
            })
        ));
    }

    #[test]
    fn test_verify_capacity() {
        let codec = CrcCodec::new(8);
        assert!(codec.verify(&BitString::zeros(11), &divisor("1101")).is_ok());

        let result = codec.verify(&BitString::zeros(12), &divisor("1101"));
        assert!(matches!(result, Err(Error::CapacityExceeded { .. })));
    }

    #[test]
    fn test_full_packet_fits() {
        let codec = CrcCodec::for_packets();
        let data = BitString::from_bytes(&[0xC3; PACKET_CAPACITY]);
        let tagged = codec.encode(&data, &divisor("1101")).unwrap();
        assert_eq!(tagged.len(), PACKET_CAPACITY * 8 + 3);
        assert!(codec.verify(&tagged, &divisor("1101")).unwrap());
    }

    #[test]
    fn test_deterministic() {
        let codec = CrcCodec::for_packets();
        let data = bits("1100101011");
        let first = codec.encode(&data, &divisor("10011")).unwrap();
        let second = codec.encode(&data, &divisor("10011")).unwrap();
        assert_eq!(first, second);
    }
}
