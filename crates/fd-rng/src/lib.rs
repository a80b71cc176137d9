//! Random source for dungeon generation
//!
//! The generator never talks to an RNG directly: it draws through the
//! [`RandomSource`] trait so a seeded [`GameRng`] can be used for real levels
//! and a [`ScriptedRng`] can replay exact values in tests.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Uniform draws used by the generator.
pub trait RandomSource {
    /// Returns a uniform integer in `[lo, hi]` (inclusive).
    ///
    /// If `lo > hi`, implementations return `hi`.
    fn randint(&mut self, lo: u32, hi: u32) -> u32;

    /// Returns a uniform float in `[lo, hi)`.
    ///
    /// Returns `lo` when the range is empty.
    fn uniform(&mut self, lo: f64, hi: f64) -> f64;

    /// Pick an index into a collection of `len` items
    fn choose_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            None
        } else {
            Some(self.randint(0, (len - 1) as u32) as usize)
        }
    }
}

/// An RNG call trace entry, for comparing two generation runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RngTraceEntry {
    /// Sequence number (0-indexed)
    pub seq: u64,
    /// Function name ("randint" or "uniform")
    pub func: &'static str,
    /// Lower bound of the request
    pub lo: f64,
    /// Upper bound of the request
    pub hi: f64,
    /// Value handed back to the caller
    pub result: f64,
}

/// Seeded generator random number source
///
/// Wraps ChaCha8Rng for reproducible generation.
/// Only the seed is serialized; deserializing recreates the stream from the start.
#[derive(Debug, Clone)]
pub struct GameRng {
    rng: ChaCha8Rng,
    seed: u64,
    call_count: u64,
    tracing: bool,
    trace: Vec<RngTraceEntry>,
}

impl Serialize for GameRng {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.seed.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for GameRng {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let seed = u64::deserialize(deserializer)?;
        Ok(GameRng::new(seed))
    }
}

impl GameRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
            call_count: 0,
            tracing: false,
            trace: Vec::new(),
        }
    }

    /// Create a new RNG with a random seed
    pub fn from_entropy() -> Self {
        let seed = rand::random();
        Self::new(seed)
    }

    /// Get the seed used to create this RNG
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Total number of draws made so far
    pub fn call_count(&self) -> u64 {
        self.call_count
    }

    /// Start recording every draw
    pub fn enable_tracing(&mut self) {
        self.tracing = true;
        self.trace.clear();
    }

    /// Stop recording draws (the existing trace is kept)
    pub fn disable_tracing(&mut self) {
        self.tracing = false;
    }

    /// Recorded draws since tracing was enabled
    pub fn trace(&self) -> &[RngTraceEntry] {
        &self.trace
    }

    fn record(&mut self, func: &'static str, lo: f64, hi: f64, result: f64) {
        let seq = self.call_count;
        self.call_count += 1;
        if self.tracing {
            self.trace.push(RngTraceEntry {
                seq,
                func,
                lo,
                hi,
                result,
            });
        }
    }
}

impl RandomSource for GameRng {
    fn randint(&mut self, lo: u32, hi: u32) -> u32 {
        let lo = lo.min(hi);
        let res = self.rng.gen_range(lo..=hi);
        self.record("randint", lo as f64, hi as f64, res as f64);
        res
    }

    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        let res = if hi > lo { self.rng.gen_range(lo..hi) } else { lo };
        self.record("uniform", lo, hi, res);
        res
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

/// Replays fixed values, for tests that need exact draws.
///
/// Integers and floats come from separate queues. Each value is clamped into
/// the requested range; an exhausted queue yields the range's lower bound.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRng {
    ints: VecDeque<u32>,
    floats: VecDeque<f64>,
}

impl ScriptedRng {
    pub fn new(ints: impl IntoIterator<Item = u32>, floats: impl IntoIterator<Item = f64>) -> Self {
        Self {
            ints: ints.into_iter().collect(),
            floats: floats.into_iter().collect(),
        }
    }

    /// A source that always answers with the lower bound
    pub fn lowest() -> Self {
        Self::default()
    }

    /// Number of integer values not yet consumed
    pub fn remaining_ints(&self) -> usize {
        self.ints.len()
    }
}

impl RandomSource for ScriptedRng {
    fn randint(&mut self, lo: u32, hi: u32) -> u32 {
        let lo = lo.min(hi);
        match self.ints.pop_front() {
            Some(v) => v.clamp(lo, hi),
            None => lo,
        }
    }

    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        match self.floats.pop_front() {
            Some(v) if hi > lo => v.clamp(lo, hi),
            _ => lo,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_randint_bounds() {
        let mut rng = GameRng::new(42);
        for _ in 0..1000 {
            let n = rng.randint(3, 9);
            assert!((3..=9).contains(&n));
        }
    }

    #[test]
    fn test_randint_inverted_range() {
        let mut rng = GameRng::new(7);
        for _ in 0..100 {
            assert_eq!(rng.randint(9, 4), 4);
        }
    }

    #[test]
    fn test_uniform_bounds() {
        let mut rng = GameRng::new(42);
        for _ in 0..1000 {
            let f = rng.uniform(0.0, 175.0);
            assert!((0.0..175.0).contains(&f));
        }
        assert_eq!(rng.uniform(5.0, 5.0), 5.0);
    }

    #[test]
    fn test_reproducibility() {
        let mut a = GameRng::new(12345);
        let mut b = GameRng::new(12345);
        for _ in 0..100 {
            assert_eq!(a.randint(0, 80), b.randint(0, 80));
        }
    }

    #[test]
    fn test_serde_keeps_seed() {
        let mut rng = GameRng::new(99);
        let first = rng.randint(0, 1000);
        let json = serde_json::to_string(&rng).unwrap();
        assert_eq!(json, "99");

        let mut restored: GameRng = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.randint(0, 1000), first);
    }

    #[test]
    fn test_tracing_records_draws() {
        let mut rng = GameRng::new(1);
        rng.randint(0, 10);
        rng.enable_tracing();
        let v = rng.randint(2, 5);
        let f = rng.uniform(0.0, 1.0);
        rng.disable_tracing();
        rng.randint(0, 10);

        let trace = rng.trace();
        assert_eq!(trace.len(), 2);
        assert_eq!(trace[0].seq, 1);
        assert_eq!(trace[0].func, "randint");
        assert_eq!(trace[0].result, v as f64);
        assert_eq!(trace[1].func, "uniform");
        assert_eq!(trace[1].result, f);
        assert_eq!(rng.call_count(), 4);
    }

    #[test]
    fn test_scripted_rng_replays_and_clamps() {
        let mut rng = ScriptedRng::new([3, 50, 7], [0.25]);
        assert_eq!(rng.randint(0, 10), 3);
        assert_eq!(rng.randint(0, 10), 10);
        assert_eq!(rng.remaining_ints(), 1);
        assert_eq!(rng.randint(8, 9), 8);
        assert_eq!(rng.randint(4, 6), 4);
        assert_eq!(rng.uniform(0.0, 1.0), 0.25);
        assert_eq!(rng.uniform(2.0, 3.0), 2.0);
    }

    #[test]
    fn test_choose_index() {
        let mut rng = ScriptedRng::new([2], []);
        assert_eq!(rng.choose_index(0), None);
        assert_eq!(rng.choose_index(5), Some(2));
        assert_eq!(rng.choose_index(5), Some(0));
    }
}
