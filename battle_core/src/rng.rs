//! Scripted random source for deterministic tests and replays
//!
//! Every draw in the battle core is `rng.gen::<f64>()`, so replaying a list of
//! `[0, 1)` values reproduces a battle exactly.

use rand::RngCore;
use std::collections::VecDeque;

/// RNG that yields a scripted sequence of `[0, 1)` floats, then a fallback value
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    rolls: VecDeque<f64>,
    fallback: f64,
}

impl ScriptedRng {
    /// Create an RNG that replays `rolls` and then repeats `fallback`
    pub fn new(rolls: impl IntoIterator<Item = f64>, fallback: f64) -> Self {
        ScriptedRng {
            rolls: rolls.into_iter().collect(),
            fallback: fallback.clamp(0.0, MAX_ROLL),
        }
    }

    /// Create an RNG that always yields the same value
    pub fn constant(value: f64) -> Self {
        Self::new(std::iter::empty(), value)
    }

    fn next_roll(&mut self) -> f64 {
        self.rolls
            .pop_front()
            .map(|r| r.clamp(0.0, MAX_ROLL))
            .unwrap_or(self.fallback)
    }
}

/// Largest value representable by the 53-bit float sampler
const MAX_ROLL: f64 = 1.0 - f64::EPSILON / 2.0;

impl RngCore for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        // rand samples f64 from the top 53 bits
        let mantissa = (self.next_roll() * (1u64 << 53) as f64) as u64;
        mantissa << 11
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}
