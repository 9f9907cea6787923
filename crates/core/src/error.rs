//! Error types for the linkcheck-sim core.
//!
//! Every check returns a structured error instead of panicking. Errors are
//! raised before any working buffer is touched, so a failed call never
//! leaves a partial result behind.

use thiserror::Error;

/// Top-level error type for all core operations.
///
/// Each variant corresponds to a specific failure domain:
/// - Divisor: the generator polynomial text is unusable
/// - Bit string: a textual bit string contains something other than 0/1
/// - Packet: a payload does not fit the fixed packet buffer
/// - Capacity: a CRC operand would not fit the codec's working capacity
/// - Config: a simulator parameter is out of range
#[derive(Debug, Error)]
pub enum Error {
    /// Divisor is empty, contains a non-binary character, or has no set bit
    #[error("invalid divisor: {0}")]
    InvalidDivisor(#[from] DivisorError),

    /// Bit string parsing failed
    #[error("bit string error: {0}")]
    BitString(#[from] BitStringError),

    /// Packet construction failed
    #[error("packet error: {0}")]
    Packet(#[from] PacketError),

    /// CRC working length exceeds the codec capacity
    #[error("capacity exceeded: operation needs {required} bits, limit is {limit}")]
    CapacityExceeded { required: usize, limit: usize },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Divisor validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DivisorError {
    /// Zero-length divisor
    #[error("divisor is empty")]
    Empty,

    /// Character other than '0' or '1'
    #[error("unexpected character {found:?} at position {position}")]
    InvalidChar { position: usize, found: char },

    /// All-zero divisor (the zero polynomial)
    #[error("divisor {0:?} has no set bit")]
    NoSetBit(String),
}

/// Textual bit string errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BitStringError {
    /// Character other than '0' or '1'
    #[error("unexpected character {found:?} at position {position}")]
    InvalidChar { position: usize, found: char },
}

/// Packet errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PacketError {
    /// Payload longer than the packet buffer
    #[error("payload of {length} bytes exceeds packet capacity {capacity}")]
    ExceedsCapacity { length: usize, capacity: usize },
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
