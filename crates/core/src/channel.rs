//! Noisy channel simulator for bit strings.
//!
//! Simulates a binary symmetric channel: every transmitted bit is flipped
//! independently with a fixed probability. Used to show which corruptions
//! the CRC and parity checks catch.
//!
//! # Determinism
//!
//! All randomness comes from a seeded ChaCha8 RNG. Given the same seed and
//! the same frames, the flipped positions are identical.

use crate::bitio::BitString;
use crate::error::{Error, Result};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

/// Configuration for channel simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelConfig {
    /// Per-bit flip probability [0.0, 1.0]
    pub bit_error_rate: f64,

    /// Random seed for determinism
    pub seed: u64,
}

impl ChannelConfig {
    /// A channel that never flips a bit.
    pub fn perfect(seed: u64) -> Self {
        Self {
            bit_error_rate: 0.0,
            seed,
        }
    }

    /// Check that the bit error rate is a probability.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.bit_error_rate) {
            return Err(Error::Config(format!(
                "bit error rate {} is outside [0, 1]",
                self.bit_error_rate
            )));
        }
        Ok(())
    }
}

/// Result of pushing one frame through the channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transmission {
    /// The frame as the receiver sees it
    pub received: BitString,

    /// Indices of the bits that were flipped, ascending
    pub flipped: Vec<usize>,
}

impl Transmission {
    /// True if at least one bit was flipped.
    pub fn is_corrupted(&self) -> bool {
        !self.flipped.is_empty()
    }
}

/// Binary symmetric channel with seeded noise.
pub struct NoisyChannel {
    config: ChannelConfig,
    rng: ChaCha8Rng,

    // Statistics
    frames_sent: u64,
    bits_sent: u64,
    bits_flipped: u64,
}

impl NoisyChannel {
    /// Create a new channel.
    ///
    /// # Errors
    /// Returns `Error::Config` if the bit error rate is not in [0, 1].
    pub fn new(config: ChannelConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            frames_sent: 0,
            bits_sent: 0,
            bits_flipped: 0,
        })
    }

    pub fn config(&self) -> &ChannelConfig {
        &self.config
    }

    /// Send a frame through the channel.
    pub fn transmit(&mut self, frame: &BitString) -> Transmission {
        let mut received = frame.clone();
        let mut flipped = Vec::new();

        if self.config.bit_error_rate > 0.0 {
            for index in 0..frame.len() {
                let roll: f64 = self.rng.gen();
                if roll < self.config.bit_error_rate {
                    received.flip(index);
                    flipped.push(index);
                }
            }
        }

        self.frames_sent += 1;
        self.bits_sent += frame.len() as u64;
        self.bits_flipped += flipped.len() as u64;

        debug!(sent = %frame, received = %received, ?flipped, "frame transmitted");

        Transmission { received, flipped }
    }

    /// Get statistics about channel behavior.
    pub fn stats(&self) -> ChannelStats {
        ChannelStats {
            frames_sent: self.frames_sent,
            bits_sent: self.bits_sent,
            bits_flipped: self.bits_flipped,
        }
    }
}

/// Statistics about channel behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelStats {
    /// Frames pushed through the channel
    pub frames_sent: u64,

    /// Total bits across all frames
    pub bits_sent: u64,

    /// Bits inverted by noise
    pub bits_flipped: u64,
}

impl ChannelStats {
    /// Observed bit error rate (flipped / sent).
    pub fn observed_error_rate(&self) -> f64 {
        if self.bits_sent == 0 {
            0.0
        } else {
            self.bits_flipped as f64 / self.bits_sent as f64
        }
    }
}
