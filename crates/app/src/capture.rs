//! Simulated packet capture.
//!
//! There is no real network interface behind this: a "capture" draws a
//! random payload length in `[0, PACKET_CAPACITY]` and fills it with random
//! bytes. An empty capture is possible and deliberate, since both checks
//! must handle it.

use linkcheck_sim_core::{Packet, Result, PACKET_CAPACITY};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seeded source of captured packets.
pub struct PacketGenerator {
    rng: ChaCha8Rng,
}

impl PacketGenerator {
    /// Create a generator; the same seed yields the same packet sequence.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Capture the next packet.
    pub fn capture(&mut self) -> Result<Packet> {
        let length = self.rng.gen_range(0..=PACKET_CAPACITY);
        let mut payload = [0u8; PACKET_CAPACITY];
        self.rng.fill(&mut payload[..length]);
        Packet::new(&payload[..length])
    }
}
