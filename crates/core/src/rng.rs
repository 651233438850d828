//! RNG module - uniform random piece generation
//!
//! Every draw picks one of the seven kinds with equal probability,
//! independent of what came before. There is no bag, so streaks and
//! droughts are possible.
//!
//! A seed makes the sequence reproducible (tests, replays). Without one the
//! generator is seeded from the operating system.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::PieceKind;

/// Source of upcoming piece kinds
#[derive(Debug, Clone)]
pub struct PieceSource {
    rng: StdRng,
    seed: Option<u64>,
}

impl PieceSource {
    /// Deterministic source for the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    /// Source seeded from the operating system
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
            seed: None,
        }
    }

    /// Seeded when `seed` is set, OS-seeded otherwise
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::new(seed),
            None => Self::from_entropy(),
        }
    }

    /// Seed this source was created with, if any
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Draw the next piece kind
    pub fn draw(&mut self) -> PieceKind {
        PieceKind::ALL[self.rng.random_range(0..PieceKind::ALL.len())]
    }
}

impl Default for PieceSource {
    fn default() -> Self {
        Self::new(1)
    }
}
