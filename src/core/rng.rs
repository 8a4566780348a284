//! Dice sources.
//!
//! The engine never touches a process-wide generator. It asks an injected
//! [`DieSource`] for one face at a time, so tests can substitute a fixed
//! sequence and simulations can replay a match from its seed.
//!
//! ```
//! use pig_dice::core::{DieSource, GameRng};
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//! // Same seed, same faces
//! assert_eq!(a.roll(6), b.roll(6));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;

/// Produces a uniform integer in `1..=faces`.
pub trait DieSource {
    /// Roll one die with `faces` sides.
    fn roll(&mut self, faces: u8) -> u8;
}

impl<D: DieSource + ?Sized> DieSource for &mut D {
    fn roll(&mut self, faces: u8) -> u8 {
        (**self).roll(faces)
    }
}

impl<D: DieSource + ?Sized> DieSource for Box<D> {
    fn roll(&mut self, faces: u8) -> u8 {
        (**self).roll(faces)
    }
}

/// Seeded die backed by ChaCha8.
///
/// Deterministic: the same seed always produces the same faces.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl DieSource for GameRng {
    fn roll(&mut self, faces: u8) -> u8 {
        self.inner.gen_range(1..=faces.max(1))
    }
}

/// Replays a fixed list of faces, then a fallback face forever.
///
/// Faces are returned as given, without checking them against the die size.
#[derive(Clone, Debug)]
pub struct ScriptedDie {
    faces: VecDeque<u8>,
    fallback: u8,
}

impl ScriptedDie {
    /// Replay `faces`, then bust (1) once exhausted.
    pub fn new(faces: impl IntoIterator<Item = u8>) -> Self {
        Self {
            faces: faces.into_iter().collect(),
            fallback: 1,
        }
    }

    /// Use `face` once the script runs out.
    #[must_use]
    pub fn with_fallback(mut self, face: u8) -> Self {
        self.fallback = face;
        self
    }

    /// Faces not yet rolled.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.faces.len()
    }
}

impl DieSource for ScriptedDie {
    fn roll(&mut self, _faces: u8) -> u8 {
        self.faces.pop_front().unwrap_or(self.fallback)
    }
}
