//! Deterministic simulation-level RNG.
//!
//! # Determinism strategy
//!
//! One `SmallRng` per engine, seeded from `GasConfig::seed`.  Bodies draw
//! their initial velocity in arena order (light bodies first, then heavy), so
//! the same seed and counts always reproduce the same population.  The RNG is
//! only consulted at initialization; collision resolution is deterministic.

use std::f64::consts::TAU;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::Vec2;

/// Simulation-level RNG for population initialization.
///
/// Used only on the thread that builds the engine.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// A direction drawn uniformly from the unit circle.
    pub fn unit_vector(&mut self) -> Vec2 {
        let angle = self.0.gen_range(0.0..TAU);
        Vec2::new(angle.cos(), angle.sin())
    }

    /// A speed drawn uniformly from `[0, bound)`; `0.0` if `bound` is not
    /// positive.
    pub fn speed_below(&mut self, bound: f64) -> f64 {
        if bound > 0.0 {
            self.0.gen_range(0.0..bound)
        } else {
            0.0
        }
    }
}
