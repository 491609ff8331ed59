//! Binning of scalar observations into contiguous intervals with arbitrary
//! per-bin state
//!
//! This facade re-exports the workspace crates:
//!
//! - [`binstat_core`]: error type and the edge numeric trait
//! - [`binstat_binner`]: the binning engine, accumulation policies, aggregates and layouts
//!
//! ```rust
//! use binstat::prelude::*;
//!
//! let mut b: Binner<f64> = Binner::from_range(4, 0.0, 8.0)?;
//! b.fill_with(5.0, 0.5);
//! b.fill_with(5.0, 0.25);
//! assert_eq!(*b.bin(3)?, 0.75);
//! assert!(matches!(b.bin(6), Err(Error::OutOfRange { .. })));
//! # Ok::<(), binstat::Error>(())
//! ```

pub use binstat_binner;
pub use binstat_core;

pub use binstat_core::{Error, Result};

/// Commonly used types and traits
pub mod prelude {
    pub use binstat_binner::{
        parse_layouts, Accumulate, BinLayout, BinView, Binner, Merge, NamedLayout, WeightedSum,
        Window, WindowSplit,
    };
    pub use binstat_core::{EdgeValue, Error, Result};
}
