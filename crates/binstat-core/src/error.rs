//! Error types for binning operations
//!
//! Provides a unified error type for all binstat crates.

use thiserror::Error;

/// Core error type for binning operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A bin or edge index past the end of the bin-state sequence
    #[error("Index out of range: {index} is not below {len}")]
    OutOfRange { index: usize, len: usize },

    /// Invalid parameter provided to a constructor
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Edge sequence that cannot define bins
    #[error("Invalid edges: {0}")]
    InvalidEdges(String),

    /// Two binners that do not share the same edges
    #[error("Incompatible edges: {0}")]
    IncompatibleEdges(String),

    /// Malformed textual input
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an error for an index past `len`
    pub fn out_of_range(index: usize, len: usize) -> Self {
        Self::OutOfRange { index, len }
    }

    /// Create an error for a rejected edge sequence
    pub fn invalid_edges(reason: impl Into<String>) -> Self {
        Self::InvalidEdges(reason.into())
    }

    /// Create an error for a rejected constructor argument
    pub fn invalid_parameter(reason: impl Into<String>) -> Self {
        Self::InvalidParameter(reason.into())
    }

    /// Create an error for binners whose edges differ
    pub fn incompatible_edges(reason: impl Into<String>) -> Self {
        Self::IncompatibleEdges(reason.into())
    }

    /// Create an error for malformed text that is not tied to one token
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::Parse(reason.into())
    }

    /// Create an error for an unparseable token
    pub fn parse(token: &str, context: &str) -> Self {
        Self::Parse(format!("cannot parse '{token}' in {context}"))
    }
}
