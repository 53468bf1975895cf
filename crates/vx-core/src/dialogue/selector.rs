//! Reply selection
//!
//! The rule-based strategy picks one line from a pool. Production uses a
//! thread-local RNG; tests inject a seeded or fixed selector.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Chooses an index into a non-empty pool of candidates
pub trait ReplySelector: Send + Sync {
    /// Return an index in `0..len`; `len` is never zero
    fn select(&self, len: usize) -> usize;
}

/// Uniform choice backed by the thread RNG
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSelector;

impl ReplySelector for RandomSelector {
    fn select(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Uniform choice from a seeded RNG, reproducible across runs
pub struct SeededSelector {
    rng: Mutex<StdRng>,
}

impl SeededSelector {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl ReplySelector for SeededSelector {
    fn select(&self, len: usize) -> usize {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.gen_range(0..len)
    }
}

/// Always picks the same position, clamped to the pool
#[derive(Debug, Clone, Copy)]
pub struct FixedSelector(pub usize);

impl ReplySelector for FixedSelector {
    fn select(&self, len: usize) -> usize {
        self.0.min(len.saturating_sub(1))
    }
}
