//! Seeded RNG for the simulation (no OS entropy).
//!
//! Every randomized operation — weighted distribution, candidate noise,
//! turnout draws — takes a `&mut SimRng`, so an identical seed reproduces an
//! identical campaign. Uniform draws use rejection sampling to avoid modulo
//! bias.

use rand_chacha::ChaCha20Rng;
use rand_core::{RngCore, SeedableRng};

pub struct SimRng(ChaCha20Rng);

impl SimRng {
    pub fn from_seed(seed: u64) -> Self {
        let mut bytes = [0u8; 32];
        bytes[..8].copy_from_slice(&seed.to_le_bytes());
        Self(ChaCha20Rng::from_seed(bytes))
    }

    /// Uniform in `[0, n)`. `n == 0` returns 0.
    pub fn below(&mut self, n: u64) -> u64 {
        if n == 0 {
            return 0;
        }
        // Rejection sampling to avoid modulo bias.
        let zone = u64::MAX - (u64::MAX % n);
        loop {
            let x = self.0.next_u64();
            if x < zone {
                return x % n;
            }
        }
    }

    /// Uniform in `[lo, hi]`; callers guarantee `lo <= hi`.
    pub fn range_inclusive(&mut self, lo: u64, hi: u64) -> u64 {
        debug_assert!(lo <= hi);
        lo + self.below(hi - lo + 1)
    }

    pub fn range_u32(&mut self, lo: u32, hi: u32) -> u32 {
        self.range_inclusive(lo as u64, hi as u64) as u32
    }

    /// Multiplicative noise factor in permille, drawn uniformly from
    /// `[1000 - spread, 1000 + spread]`. Applied as `x * f / 1000`.
    pub fn noise_permille(&mut self, spread: u32) -> u64 {
        let spread = spread.min(999) as u64;
        self.range_inclusive(1000 - spread, 1000 + spread)
    }
}
