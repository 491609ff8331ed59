//! Operations layered on a filled binner

use crate::accumulate::Merge;
use crate::binner::Binner;
use binstat_core::{EdgeValue, Error, Result};

impl<B, E: EdgeValue> Binner<B, E> {
    /// Fold the states of `other` into this binner, slot by slot
    ///
    /// Both binners must have identical edges.
    pub fn merge(&mut self, other: &Self) -> Result<()>
    where
        B: Merge,
    {
        if self.edges.len() != other.edges.len() {
            return Err(Error::incompatible_edges(format!(
                "expected {} edges, got {}",
                self.edges.len(),
                other.edges.len()
            )));
        }
        if let Some(i) = self
            .edges
            .iter()
            .zip(&other.edges)
            .position(|(a, b)| a != b)
        {
            return Err(Error::incompatible_edges(format!(
                "edge {i} differs: {} vs {}",
                self.edges[i], other.edges[i]
            )));
        }

        for (mine, theirs) in self.bins.iter_mut().zip(&other.bins) {
            mine.merge(theirs);
        }
        log::trace!("merged {} slots", self.bins.len());
        Ok(())
    }

    /// Reset every slot to its default state, keeping the edges
    pub fn reset(&mut self)
    where
        B: Default,
    {
        self.bins.iter_mut().for_each(|b| *b = B::default());
    }

    /// Multiply every edge by `factor`, e.g. for a change of units
    pub fn scale_edges(&mut self, factor: E) -> Result<()> {
        if !(factor.is_finite() && factor > E::zero()) {
            return Err(Error::invalid_parameter(format!(
                "edge scale factor must be positive and finite, got {factor}"
            )));
        }
        for edge in &mut self.edges {
            *edge = *edge * factor;
        }
        log::trace!("scaled {} edges by {factor}", self.edges.len());
        Ok(())
    }

    /// Replace the last edge, typically an open-ended one, with `value`
    ///
    /// `value` must stay above the second-to-last edge.
    pub fn cap_last_edge(&mut self, value: E) -> Result<()> {
        let n = self.edges.len();
        if n == 0 {
            return Err(Error::invalid_edges("no edges to cap"));
        }
        if value.is_nan() {
            return Err(Error::invalid_edges("cannot cap the last edge at NaN"));
        }
        if n >= 2 && value <= self.edges[n - 2] {
            return Err(Error::invalid_edges(format!(
                "cap {value} must be above edge {}",
                self.edges[n - 2]
            )));
        }
        log::trace!("capping last edge {} at {value}", self.edges[n - 1]);
        self.edges[n - 1] = value;
        Ok(())
    }
}
