//! Injectable randomness for the toss, the deal and opponent decisions.
//!
//! Everything random in a round flows through [`RandomSource`], so hosts pick
//! between entropy ([`SystemRng`]), reproducible play ([`SeededRng`]) and fully
//! forced draws ([`ScriptedRng`]).

use crate::cards::Card;
use crate::game::CoinFace;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;

/// Largest `f64` strictly below one; the top of a unit draw.
pub const JUST_BELOW_ONE: f64 = 1.0 - f64::EPSILON / 2.0;

pub trait RandomSource {
    /// Uniform draw in `[0, 1)`.
    fn unit(&mut self) -> f64;

    /// Fair coin: heads when the draw falls in the lower half.
    fn flip(&mut self) -> CoinFace {
        if self.unit() < 0.5 {
            CoinFace::Heads
        } else {
            CoinFace::Tails
        }
    }

    /// Fisher-Yates over unit draws.
    fn shuffle(&mut self, cards: &mut [Card]) {
        for i in (1..cards.len()).rev() {
            let j = ((self.unit() * (i + 1) as f64) as usize).min(i);
            cards.swap(i, j);
        }
    }
}

/// ChaCha8-backed source; the same seed always replays the same round.
#[derive(Debug, Clone)]
pub struct SeededRng {
    inner: ChaCha8Rng,
}

impl SeededRng {
    pub fn from_seed(seed: u64) -> Self {
        Self { inner: ChaCha8Rng::seed_from_u64(seed) }
    }

    /// Seed from the thread RNG.
    pub fn from_entropy() -> Self {
        let seed: u64 = rand::rng().random();
        Self::from_seed(seed)
    }
}

impl RandomSource for SeededRng {
    fn unit(&mut self) -> f64 {
        self.inner.random::<f64>()
    }

    fn shuffle(&mut self, cards: &mut [Card]) {
        cards.shuffle(&mut self.inner);
    }
}

/// Thread-local entropy on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRng;

impl RandomSource for SystemRng {
    fn unit(&mut self) -> f64 {
        rand::rng().random::<f64>()
    }

    fn shuffle(&mut self, cards: &mut [Card]) {
        cards.shuffle(&mut rand::rng());
    }
}

/// Replays a fixed list of unit draws, then repeats the last one.
///
/// Values are clamped into `[0, 1)` so a script can say `1.0` and mean "top".
///
/// ```
/// use akq_rs::rng::{RandomSource, ScriptedRng};
///
/// let mut rng = ScriptedRng::new([0.25, 0.75]);
/// assert_eq!(rng.unit(), 0.25);
/// assert_eq!(rng.unit(), 0.75);
/// assert_eq!(rng.unit(), 0.75);
/// ```
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    draws: VecDeque<f64>,
    last: f64,
}

impl ScriptedRng {
    pub fn new(draws: impl IntoIterator<Item = f64>) -> Self {
        let draws: VecDeque<f64> = draws.into_iter().map(clamp_unit).collect();
        Self { draws, last: 0.0 }
    }

    /// Every draw returns `value`.
    pub fn constant(value: f64) -> Self {
        Self { draws: VecDeque::new(), last: clamp_unit(value) }
    }

    pub fn push(&mut self, value: f64) {
        self.draws.push_back(clamp_unit(value));
    }

    pub fn remaining(&self) -> usize {
        self.draws.len()
    }
}

impl RandomSource for ScriptedRng {
    fn unit(&mut self) -> f64 {
        if let Some(v) = self.draws.pop_front() {
            self.last = v;
        }
        self.last
    }
}

fn clamp_unit(v: f64) -> f64 {
    if v.is_nan() {
        return 0.0;
    }
    v.clamp(0.0, JUST_BELOW_ONE)
}
