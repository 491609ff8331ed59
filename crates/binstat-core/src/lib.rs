//! Core types shared across the binstat crates
//!
//! This crate holds the pieces every binning component needs: the unified
//! [`Error`] type with its [`Result`] alias, and the [`EdgeValue`] trait that
//! bounds the scalar type used for bin edges.

pub mod error;
pub mod numeric;

pub use error::{Error, Result};
pub use numeric::{is_strictly_increasing, EdgeValue};
