//! Shared utilities for integration tests

#![allow(dead_code)]

pub use approx::assert_relative_eq;

use binstat_binner::Window;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal, Uniform};

pub const EPSILON: f64 = 1e-9;

/// Diphoton mass window used by the composite-state tests
pub struct MassWindow;

impl Window for MassWindow {
    const LOW: f64 = 121_000.0;
    const HIGH: f64 = 129_000.0;
}

/// Non-uniform edges of the kind written by hand for a binning file
pub fn curated_edges() -> Vec<f64> {
    vec![0.0, 20e3, 30e3, 45e3, 60e3, 80e3, 120e3, 170e3, 220e3, 350e3]
}

/// Synthetic `(variable, mass, weight)` observations
///
/// Masses mix a narrow peak at 125 GeV with a flat continuum over
/// 105..160 GeV; weights are positive.
pub fn observations(n: usize, seed: u64) -> Vec<(f64, f64, f64)> {
    let mut rng = StdRng::seed_from_u64(seed);
    let variable = Normal::new(60e3, 50e3).unwrap();
    let peak = Normal::new(125e3, 1.7e3).unwrap();
    let continuum = Uniform::new(105e3, 160e3);
    let weight = Uniform::new(0.01, 2.0);
    let pick = Uniform::new(0.0, 1.0);

    (0..n)
        .map(|_| {
            let x = variable.sample(&mut rng);
            let m = if pick.sample(&mut rng) < 0.1 {
                peak.sample(&mut rng)
            } else {
                continuum.sample(&mut rng)
            };
            (x, m, weight.sample(&mut rng))
        })
        .collect()
}
