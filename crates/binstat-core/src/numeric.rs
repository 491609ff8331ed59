//! Numeric trait for bin edge types
//!
//! Edges need ordering, infinities for the virtual underflow/overflow
//! boundaries and enough arithmetic to subdivide a range. Only the IEEE
//! floating-point types qualify.

use num_traits::{Float, NumCast};
use std::fmt::{Debug, Display};

/// A scalar type usable as a bin edge
pub trait EdgeValue: Float + NumCast + Debug + Display + Send + Sync + 'static {
    /// Convert a bin index into an edge-typed multiplier
    fn from_index(index: usize) -> Self;
}

macro_rules! impl_edge_value {
    ($($t:ty),*) => {
        $(
            impl EdgeValue for $t {
                #[inline]
                fn from_index(index: usize) -> Self {
                    index as $t
                }
            }
        )*
    };
}

impl_edge_value!(f32, f64);

/// Check that every edge is strictly greater than its predecessor
///
/// NaN anywhere in the sequence makes it non-increasing.
pub fn is_strictly_increasing<E: EdgeValue>(edges: &[E]) -> bool {
    edges.windows(2).all(|w| w[0] < w[1]) && edges.iter().all(|e| !e.is_nan())
}
