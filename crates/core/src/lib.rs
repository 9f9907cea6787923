//! linkcheck-sim-core: Educational link-layer error detection
//!
//! This library provides the core components for a learning-focused system that:
//! - Models a captured packet as a fixed-capacity byte buffer
//! - Checks a payload for even parity
//! - Tags and verifies bit strings with a polynomial CRC
//! - Simulates a noisy channel to show which corruptions each check catches
//!
//! # Architecture
//!
//! The system is designed around clear module boundaries:
//! - `bitio`: Bit strings and MSB-first bit/byte conversion
//! - `packet`: Packet model and diagnostic dumps
//! - `parity`: Even-parity computation
//! - `crc`: Divisor validation and the CRC codec
//! - `check`: Packet-level checks for the orchestrator
//! - `channel`: Binary symmetric channel with seeded noise
//! - `metrics`: Session counters
//!
//! # Design Principles
//!
//! - **No panics**: All errors are structured and recoverable
//! - **Bounded buffers**: CRC operands are checked against a fixed capacity first
//! - **Pure checks**: Verdicts depend only on the packet and divisor passed in
//! - **Deterministic**: Seeded randomness makes runs reproducible

pub mod bitio;
pub mod channel;
pub mod check;
pub mod crc;
pub mod error;
pub mod metrics;
pub mod packet;
pub mod parity;

// Re-export commonly used types
pub use bitio::BitString;
pub use check::{check_crc, check_parity};
pub use crc::{CrcCodec, Divisor};
pub use error::{Error, Result};
pub use packet::{Packet, PACKET_CAPACITY};
