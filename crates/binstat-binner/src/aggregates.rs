//! Ready-made composite bin states

use crate::accumulate::{Accumulate, Merge};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;

/// Weighted count with the sum of squared weights
///
/// `sqrt(sum_w2)` is the usual statistical error on `sum_w`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WeightedSum {
    /// Number of observations
    pub entries: u64,
    /// Sum of weights
    pub sum_w: f64,
    /// Sum of squared weights
    pub sum_w2: f64,
}

impl WeightedSum {
    /// Statistical error on the sum of weights
    pub fn error(&self) -> f64 {
        self.sum_w2.sqrt()
    }

    /// Mean weight, zero when empty
    pub fn mean_weight(&self) -> f64 {
        if self.entries == 0 {
            0.0
        } else {
            self.sum_w / self.entries as f64
        }
    }
}

impl Accumulate<()> for WeightedSum {
    #[inline]
    fn accumulate(&mut self, _args: ()) {
        Accumulate::<f64>::accumulate(self, 1.0);
    }
}

impl Accumulate<f64> for WeightedSum {
    #[inline]
    fn accumulate(&mut self, w: f64) {
        self.entries += 1;
        self.sum_w += w;
        self.sum_w2 += w * w;
    }
}

impl Merge for WeightedSum {
    fn merge(&mut self, other: &Self) {
        self.entries += other.entries;
        self.sum_w += other.sum_w;
        self.sum_w2 += other.sum_w2;
    }
}

impl fmt::Display for WeightedSum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3} ± {:.3} (n={})", self.sum_w, self.error(), self.entries)
    }
}

/// A closed interval fixed at compile time
pub trait Window {
    /// Lower bound (inclusive)
    const LOW: f64;
    /// Upper bound (inclusive)
    const HIGH: f64;

    /// Check whether `x` lies in `[LOW, HIGH]`
    #[inline]
    fn contains(x: f64) -> bool {
        (Self::LOW..=Self::HIGH).contains(&x)
    }

    /// Width of the window
    fn width() -> f64 {
        Self::HIGH - Self::LOW
    }
}

/// Splits weighted observations into two running sums around a window
///
/// Accumulates `(measurement, weight)` pairs: `inside` collects the weight of
/// measurements in `[W::LOW, W::HIGH]`, `outside` everything else. NaN
/// measurements count as outside.
#[derive(Serialize, Deserialize)]
#[serde(bound = "")]
pub struct WindowSplit<W> {
    /// Weight of measurements inside the window
    pub inside: f64,
    /// Weight of measurements outside the window
    pub outside: f64,
    #[serde(skip)]
    window: PhantomData<W>,
}

impl<W> WindowSplit<W> {
    /// Create a split with the given sums
    pub fn new(inside: f64, outside: f64) -> Self {
        Self {
            inside,
            outside,
            window: PhantomData,
        }
    }

    /// Sum of both partitions
    pub fn total(&self) -> f64 {
        self.inside + self.outside
    }
}

impl<W: Window> WindowSplit<W> {
    /// Route `weight` to the partition selected by `measurement`
    #[inline]
    pub fn add(&mut self, measurement: f64, weight: f64) {
        if W::contains(measurement) {
            self.inside += weight;
        } else {
            self.outside += weight;
        }
    }
}

// Manual impls keep these free of bounds on the marker type.
impl<W> Default for WindowSplit<W> {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl<W> Clone for WindowSplit<W> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<W> Copy for WindowSplit<W> {}

impl<W> PartialEq for WindowSplit<W> {
    fn eq(&self, other: &Self) -> bool {
        self.inside == other.inside && self.outside == other.outside
    }
}

impl<W> fmt::Debug for WindowSplit<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WindowSplit")
            .field("inside", &self.inside)
            .field("outside", &self.outside)
            .finish()
    }
}

impl<W> fmt::Display for WindowSplit<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "inside={:.3} outside={:.3}", self.inside, self.outside)
    }
}

impl<W: Window> Accumulate<(f64, f64)> for WindowSplit<W> {
    #[inline]
    fn accumulate(&mut self, (measurement, weight): (f64, f64)) {
        self.add(measurement, weight);
    }
}

impl<W> Merge for WindowSplit<W> {
    fn merge(&mut self, other: &Self) {
        self.inside += other.inside;
        self.outside += other.outside;
    }
}
