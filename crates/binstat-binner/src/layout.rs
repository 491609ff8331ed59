//! Binning layouts: configuration describing where the edges go
//!
//! A layout can be deserialised with serde or parsed from the compact line
//! format used by binning definition files:
//!
//! ```text
//! # variable followed by its edges, separated by spaces and/or commas
//! pT_yy 0, 20e3, 60e3, 1e5 inf
//! ```
//!
//! Only text is handled here; reading the file is up to the caller.

use crate::binner::Binner;
use binstat_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How to place the edges of a binner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BinLayout {
    /// `nbins` equal-width bins over `[low, high]`
    Uniform { nbins: usize, low: f64, high: f64 },
    /// Explicit, strictly increasing edges
    Edges { edges: Vec<f64> },
}

impl BinLayout {
    /// Build a fresh binner with this layout
    pub fn build<B: Default>(&self) -> Result<Binner<B>> {
        match self {
            Self::Uniform { nbins, low, high } => Binner::from_range(*nbins, *low, *high),
            Self::Edges { edges } => Binner::from_edges(edges.iter().copied()),
        }
    }

    /// Re-initialise an existing binner with this layout
    ///
    /// Accumulated state is discarded. On error the binner is left as it was.
    pub fn apply<B: Default>(&self, binner: &mut Binner<B>) -> Result<()> {
        match self {
            Self::Uniform { .. } => {
                *binner = self.build()?;
                Ok(())
            }
            Self::Edges { edges } => binner.init(edges.iter().copied()),
        }
    }

    /// Number of finite bins the layout describes
    pub fn bin_count(&self) -> usize {
        match self {
            Self::Uniform { nbins, .. } => *nbins,
            Self::Edges { edges } => edges.len().saturating_sub(1),
        }
    }
}

/// A layout attached to the name of the variable it bins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedLayout {
    pub name: String,
    #[serde(flatten)]
    pub layout: BinLayout,
}

impl NamedLayout {
    /// Build a fresh binner with this layout
    pub fn build<B: Default>(&self) -> Result<Binner<B>> {
        self.layout.build()
    }
}

impl FromStr for NamedLayout {
    type Err = Error;

    /// Parse `name e0 e1 ...`, tokens separated by runs of spaces or commas
    fn from_str(line: &str) -> Result<Self> {
        let mut tokens = line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty());

        let name = tokens
            .next()
            .ok_or_else(|| Error::malformed("empty layout line"))?
            .to_string();

        let edges = tokens
            .map(|t| {
                t.parse::<f64>()
                    .map_err(|_| Error::parse(t, &format!("layout '{name}'")))
            })
            .collect::<Result<Vec<_>>>()?;

        if edges.is_empty() {
            return Err(Error::malformed(format!("layout '{name}' has no edges")));
        }

        Ok(Self {
            name,
            layout: BinLayout::Edges { edges },
        })
    }
}

/// Parse one layout per line, skipping blank lines and `#` comments
pub fn parse_layouts(text: &str) -> Result<Vec<NamedLayout>> {
    let layouts = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(i, line)| {
            line.parse::<NamedLayout>().map_err(|e| match e {
                Error::Parse(msg) => Error::malformed(format!("line {}: {msg}", i + 1)),
                other => other,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    log::debug!("parsed {} binning layouts", layouts.len());
    Ok(layouts)
}
