//! RNG module - deterministic piece selection policies
//!
//! Which kind spawns next is a policy decision, kept behind the
//! [`SpawnPolicy`] trait. Two policies ship:
//!
//! - [`SevenBag`]: the "7-bag" randomizer. Each bag holds one of every
//!   piece, shuffled; draws empty the bag before a new one is generated.
//! - [`UniformRandom`]: memoryless uniform draw over the seven kinds.
//!
//! Both are driven by a simple LCG so a given seed always produces the
//! same piece sequence.

use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// Source of spawn kinds for the engine.
///
/// `reset` must rewind the policy to the state it had at construction, so
/// that resetting an engine is indistinguishable from reconstructing it.
pub trait SpawnPolicy {
    /// Choose the kind of the next spawned piece
    fn next_kind(&mut self) -> PieceKind;

    /// Rewind to the initial state
    fn reset(&mut self);
}

/// 7-bag piece generator
#[derive(Debug, Clone)]
pub struct SevenBag {
    /// Current bag of pieces
    bag: [PieceKind; 7],
    /// Index into current bag
    bag_index: usize,
    /// RNG for shuffling
    rng: SimpleRng,
    /// Seed the policy was constructed with (for reset)
    seed: u32,
}

impl SevenBag {
    /// Create a new bag policy with the given seed
    pub fn new(seed: u32) -> Self {
        let mut policy = Self {
            bag: PieceKind::ALL,
            bag_index: 0,
            rng: SimpleRng::new(seed),
            seed,
        };
        policy.refill_bag();
        policy
    }

    /// Generate a new shuffled bag
    fn refill_bag(&mut self) {
        self.bag = PieceKind::ALL;
        self.rng.shuffle(&mut self.bag);
        self.bag_index = 0;
    }

    /// Remaining pieces in the current bag
    #[cfg(test)]
    pub fn current_bag(&self) -> &[PieceKind] {
        &self.bag[self.bag_index..]
    }
}

impl SpawnPolicy for SevenBag {
    fn next_kind(&mut self) -> PieceKind {
        if self.bag_index >= self.bag.len() {
            self.refill_bag();
        }
        let piece = self.bag[self.bag_index];
        self.bag_index += 1;
        piece
    }

    fn reset(&mut self) {
        self.rng = SimpleRng::new(self.seed);
        self.refill_bag();
    }
}

impl Default for SevenBag {
    fn default() -> Self {
        Self::new(crate::types::DEFAULT_SEED)
    }
}

/// Memoryless uniform piece generator
#[derive(Debug, Clone)]
pub struct UniformRandom {
    rng: SimpleRng,
    seed: u32,
}

impl UniformRandom {
    /// Create a new uniform policy with the given seed
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            seed,
        }
    }
}

impl SpawnPolicy for UniformRandom {
    fn next_kind(&mut self) -> PieceKind {
        PieceKind::ALL[self.rng.next_range(7) as usize]
    }

    fn reset(&mut self) {
        self.rng = SimpleRng::new(self.seed);
    }
}
