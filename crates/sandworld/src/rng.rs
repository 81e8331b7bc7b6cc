//! Random source threaded through every tick.
//!
//! Scan order, diagonal tie-breaking, fractional steps and powder impacts all draw
//! from a caller-supplied generator, so a seeded generator replays a run exactly.

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;

/// Randomness needed by the simulation.
pub trait WorldRng {
    /// Fair coin flip.
    fn gen_bool(&mut self) -> bool;

    /// Uniform in `[0.0, 1.0)`.
    fn gen_f32(&mut self) -> f32;

    /// Uniform integer in `[low, high)`.
    fn gen_range_u8(&mut self, low: u8, high: u8) -> u8;

    /// True with the given probability. `0.0` never succeeds.
    fn check_probability(&mut self, probability: f32) -> bool {
        self.gen_f32() < probability
    }
}

impl<T: ?Sized + rand::Rng> WorldRng for T {
    fn gen_bool(&mut self) -> bool {
        rand::Rng::gen(self)
    }

    fn gen_f32(&mut self) -> f32 {
        rand::Rng::gen(self)
    }

    fn gen_range_u8(&mut self, low: u8, high: u8) -> u8 {
        rand::Rng::gen_range(self, low..high)
    }
}

/// The generator used by [`crate::Universe`] and the benchmarks.
pub type SimRng = Xoshiro256StarStar;

#[must_use]
pub fn seeded(seed: u64) -> SimRng {
    SimRng::seed_from_u64(seed)
}
