//! Generic binning engine with pluggable per-bin accumulation
//!
//! A [`Binner`] owns an ordered edge sequence and one state value per slot.
//! Each observation is resolved to a slot and handed to that slot's state,
//! which decides how to absorb it through its [`Accumulate`] implementation.
//!
//! # Slot Convention
//!
//! - slot `0` is the underflow bin, values below the first edge
//! - slot `i` covers `[edges[i-1], edges[i])`, lower edge included
//! - slot `bin_count() + 1` is the overflow bin, values at or above the last edge
//!
//! # Examples
//!
//! ## Counting
//!
//! ```rust
//! use binstat_binner::Binner;
//!
//! let mut counts: Binner<u64> = Binner::from_range(4, 0.0, 8.0).unwrap();
//! assert_eq!(counts.edges(), &[0.0, 2.0, 4.0, 6.0, 8.0]);
//!
//! for x in [0.5, 2.0, 5.0, 5.5, 9.0, -1.0] {
//!     counts.fill(x);
//! }
//! assert_eq!(counts.bins(), &[1, 1, 1, 2, 0, 1]);
//! ```
//!
//! ## Weighted Sums
//!
//! ```rust
//! use binstat_binner::{Binner, WeightedSum};
//!
//! let mut sums: Binner<WeightedSum> = Binner::from_edges([0.0, 25.0, 60.0]).unwrap();
//! sums.fill_with(30.0, 0.5);
//! sums.fill_with(40.0, 1.5);
//!
//! let bin = sums.bin(2).unwrap();
//! assert_eq!(bin.entries, 2);
//! assert_eq!(bin.sum_w, 2.0);
//! ```
//!
//! ## Composite State
//!
//! ```rust
//! use binstat_binner::{Binner, Window, WindowSplit};
//!
//! struct HiggsWindow;
//!
//! impl Window for HiggsWindow {
//!     const LOW: f64 = 121e3;
//!     const HIGH: f64 = 129e3;
//! }
//!
//! // Bin on one variable, split each bin's weight on another
//! let mut bins: Binner<WindowSplit<HiggsWindow>> =
//!     Binner::from_edges([0.0, 1.0, 2.0, f64::INFINITY]).unwrap();
//! bins.fill_with(1.0, (125e3, 0.2));
//! bins.fill_with(1.0, (110e3, 0.7));
//!
//! assert_eq!(bins[2].inside, 0.2);
//! assert_eq!(bins[2].outside, 0.7);
//! ```
//!
//! ## Deferred Initialisation From a Layout
//!
//! ```rust
//! use binstat_binner::{parse_layouts, Binner};
//!
//! let layouts = parse_layouts("# name edges...\nNjets 0 1 2 3 inf\n").unwrap();
//! let mut njets: Binner<u32> = Binner::default();
//! layouts[0].layout.apply(&mut njets).unwrap();
//! assert_eq!(njets.bin_count(), 4);
//! ```

pub mod accumulate;
pub mod aggregates;
pub mod binner;
pub mod layout;
pub mod ops;

// Re-export main types and traits
pub use accumulate::{Accumulate, Merge};
pub use aggregates::{WeightedSum, Window, WindowSplit};
pub use binner::{BinView, Binner};
pub use layout::{parse_layouts, BinLayout, NamedLayout};

pub use binstat_core::{EdgeValue, Error, Result};
