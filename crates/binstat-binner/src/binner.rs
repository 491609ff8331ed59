//! The binning engine
//!
//! Same slot convention as common scientific histogram tooling:
//!
//! - slot `0`: underflow, values below the first edge
//! - slot `i` for `1 <= i <= nbins`: `[edges[i-1], edges[i])`, lower edge included
//! - slot `nbins + 1`: overflow, values at or above the last edge
//!
//! With `m` edges there are `m - 1` finite bins and `m + 1` state slots.

use crate::accumulate::Accumulate;
use binstat_core::{is_strictly_increasing, EdgeValue, Error, Result};
use std::fmt;
use std::ops::{Index, IndexMut};

/// Maps scalar values onto contiguous bins and accumulates per-bin state
///
/// `B` is the state held in every slot; how an observation updates it is
/// decided by its [`Accumulate`] implementations. `E` is the edge type.
#[derive(Debug, Clone, PartialEq)]
pub struct Binner<B, E: EdgeValue = f64> {
    pub(crate) edges: Vec<E>,
    pub(crate) bins: Vec<B>,
}

pub(crate) fn default_states<B: Default>(n: usize) -> Vec<B> {
    std::iter::repeat_with(B::default).take(n).collect()
}

fn validate_edges<E: EdgeValue>(edges: &[E]) -> Result<()> {
    if edges.is_empty() {
        return Err(Error::invalid_edges("at least one edge is required"));
    }
    if let Some(i) = edges.iter().position(|e| e.is_nan()) {
        return Err(Error::invalid_edges(format!("edge {i} is NaN")));
    }
    if let Some(i) = edges.windows(2).position(|w| w[0] >= w[1]) {
        return Err(Error::invalid_edges(format!(
            "edge {} ({}) is not above edge {} ({})",
            i + 1,
            edges[i + 1],
            i,
            edges[i]
        )));
    }
    Ok(())
}

impl<B: Default, E: EdgeValue> Default for Binner<B, E> {
    /// An engine with no edges and a single slot, waiting for [`Binner::init`]
    fn default() -> Self {
        Self {
            edges: Vec::new(),
            bins: default_states(1),
        }
    }
}

impl<B: Default, E: EdgeValue> Binner<B, E> {
    /// Create `nbins` equal-width bins spanning `[low, high]`
    ///
    /// Both ends become edges, so there are `nbins + 1` edges and
    /// `nbins + 2` slots.
    pub fn from_range(nbins: usize, low: E, high: E) -> Result<Self> {
        if nbins == 0 {
            return Err(Error::invalid_parameter("nbins must be at least 1"));
        }
        if !low.is_finite() || !high.is_finite() {
            return Err(Error::invalid_parameter(format!(
                "range bounds must be finite, got [{low}, {high}]"
            )));
        }
        if low >= high {
            return Err(Error::invalid_parameter(format!(
                "range lower bound {low} must be below upper bound {high}"
            )));
        }

        let n = E::from_index(nbins);
        let width = high - low;
        let mut edges: Vec<E> = if width.is_finite() {
            let step = width / n;
            (0..nbins).map(|i| low + E::from_index(i) * step).collect()
        } else {
            // width overflows: interpolate between the bounds instead
            (0..nbins)
                .map(|i| {
                    let t = E::from_index(i) / n;
                    low * (E::one() - t) + high * t
                })
                .collect()
        };
        edges.push(high);

        if !is_strictly_increasing(&edges) {
            return Err(Error::invalid_parameter(format!(
                "range [{low}, {high}] is too narrow for {nbins} bins"
            )));
        }

        log::debug!("binner over [{low}, {high}) with {nbins} uniform bins");
        Ok(Self::with_edges(edges))
    }

    /// Create bins from an explicit, strictly increasing edge sequence
    ///
    /// Spacing is arbitrary. Infinite edges are accepted, NaN is not.
    pub fn from_edges<I>(edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = E>,
    {
        let edges: Vec<E> = edges.into_iter().collect();
        validate_edges(&edges)?;
        log::debug!("binner with {} explicit edges", edges.len());
        Ok(Self::with_edges(edges))
    }

    /// Replace the edges and reset every slot to its default state
    ///
    /// Accumulated state is discarded. On error the engine is left as it was.
    pub fn init<I>(&mut self, edges: I) -> Result<()>
    where
        I: IntoIterator<Item = E>,
    {
        let edges: Vec<E> = edges.into_iter().collect();
        validate_edges(&edges)?;
        log::debug!(
            "re-initialising binner: {} -> {} edges",
            self.edges.len(),
            edges.len()
        );
        *self = Self::with_edges(edges);
        Ok(())
    }

    fn with_edges(edges: Vec<E>) -> Self {
        let bins = default_states(edges.len() + 1);
        Self { edges, bins }
    }
}

impl<B, E: EdgeValue> Binner<B, E> {
    /// Resolve the slot a value falls into
    ///
    /// Returns `i` with `edges[i-1] <= value < edges[i]`, taking the
    /// boundaries outside the edge sequence as -inf and +inf. NaN resolves to
    /// the underflow slot.
    #[inline]
    pub fn find_bin(&self, value: E) -> usize {
        self.edges.partition_point(|&edge| edge <= value)
    }

    /// Count one observation in the slot `value` falls into
    #[inline]
    pub fn fill(&mut self, value: E) -> usize
    where
        B: Accumulate<()>,
    {
        let i = self.find_bin(value);
        self.bins[i].accumulate(());
        i
    }

    /// Forward `args` to the state of the slot `value` falls into
    ///
    /// For primitive states `args` is the scalar to add. Composite states
    /// receive a tuple of every extra argument, in order.
    #[inline]
    pub fn fill_with<A>(&mut self, value: E, args: A) -> usize
    where
        B: Accumulate<A>,
    {
        let i = self.find_bin(value);
        self.bins[i].accumulate(args);
        i
    }

    /// Count one observation directly in slot `index`
    pub fn fill_bin(&mut self, index: usize) -> Result<()>
    where
        B: Accumulate<()>,
    {
        self.bin_mut(index)?.accumulate(());
        Ok(())
    }

    /// Forward `args` directly to the state of slot `index`
    pub fn fill_bin_with<A>(&mut self, index: usize, args: A) -> Result<()>
    where
        B: Accumulate<A>,
    {
        self.bin_mut(index)?.accumulate(args);
        Ok(())
    }

    /// Get the state of slot `index`
    pub fn bin(&self, index: usize) -> Result<&B> {
        let len = self.bins.len();
        self.bins
            .get(index)
            .ok_or_else(|| Error::out_of_range(index, len))
    }

    /// Get mutable access to the state of slot `index`
    pub fn bin_mut(&mut self, index: usize) -> Result<&mut B> {
        let len = self.bins.len();
        self.bins
            .get_mut(index)
            .ok_or_else(|| Error::out_of_range(index, len))
    }

    /// Get the state of slot `index` without bounds checking
    ///
    /// # Safety
    ///
    /// `index` must be at most `bin_count() + 1`.
    #[inline]
    pub unsafe fn bin_unchecked(&self, index: usize) -> &B {
        self.bins.get_unchecked(index)
    }

    /// Get mutable access to the state of slot `index` without bounds checking
    ///
    /// # Safety
    ///
    /// `index` must be at most `bin_count() + 1`.
    #[inline]
    pub unsafe fn bin_unchecked_mut(&mut self, index: usize) -> &mut B {
        self.bins.get_unchecked_mut(index)
    }

    /// Lower boundary of slot `index`, -inf for underflow
    pub fn left_edge(&self, index: usize) -> Result<E> {
        self.check_index(index)?;
        Ok(self.bounds(index).0)
    }

    /// Upper boundary of slot `index`, +inf for overflow
    pub fn right_edge(&self, index: usize) -> Result<E> {
        self.check_index(index)?;
        Ok(self.bounds(index).1)
    }

    /// Number of finite bins, one less than the number of edges
    pub fn bin_count(&self) -> usize {
        self.edges.len().saturating_sub(1)
    }

    /// Number of state slots, underflow and overflow included
    pub fn num_slots(&self) -> usize {
        self.bins.len()
    }

    /// Slot index receiving values at or above the last edge
    pub fn overflow_index(&self) -> usize {
        self.edges.len()
    }

    /// Get the edges
    pub fn edges(&self) -> &[E] {
        &self.edges
    }

    /// Get mutable access to the edges
    ///
    /// The number of edges cannot change through this view. Edited values are
    /// not re-validated; they must stay strictly increasing for
    /// [`find_bin`](Self::find_bin) to stay meaningful.
    pub fn edges_mut(&mut self) -> &mut [E] {
        &mut self.edges
    }

    /// Get the states of all slots
    pub fn bins(&self) -> &[B] {
        &self.bins
    }

    /// Get mutable access to the states of all slots
    pub fn bins_mut(&mut self) -> &mut [B] {
        &mut self.bins
    }

    /// Iterate over every slot, underflow and overflow included
    pub fn iter(&self) -> impl Iterator<Item = BinView<'_, B, E>> + '_ {
        self.bins.iter().enumerate().map(move |(index, state)| {
            let (left, right) = self.bounds(index);
            BinView {
                index,
                left,
                right,
                state,
            }
        })
    }

    /// Iterate over the finite bins only
    pub fn finite(&self) -> impl Iterator<Item = BinView<'_, B, E>> + '_ {
        self.iter().skip(1).take(self.bin_count())
    }

    /// Consume the engine, returning its edges and states
    pub fn into_parts(self) -> (Vec<E>, Vec<B>) {
        (self.edges, self.bins)
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.bins.len() {
            Ok(())
        } else {
            Err(Error::out_of_range(index, self.bins.len()))
        }
    }

    // index must be below bins.len()
    fn bounds(&self, index: usize) -> (E, E) {
        let left = if index == 0 {
            E::neg_infinity()
        } else {
            self.edges[index - 1]
        };
        let right = self.edges.get(index).copied().unwrap_or_else(E::infinity);
        (left, right)
    }
}

impl<B, E: EdgeValue> Index<usize> for Binner<B, E> {
    type Output = B;

    fn index(&self, index: usize) -> &B {
        &self.bins[index]
    }
}

impl<B, E: EdgeValue> IndexMut<usize> for Binner<B, E> {
    fn index_mut(&mut self, index: usize) -> &mut B {
        &mut self.bins[index]
    }
}

/// Read-only view of one slot with its boundaries
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinView<'a, B, E = f64> {
    /// Slot index, 0 for underflow
    pub index: usize,
    /// Lower boundary (inclusive)
    pub left: E,
    /// Upper boundary (exclusive)
    pub right: E,
    /// Accumulated state
    pub state: &'a B,
}

impl<B: fmt::Display, E: fmt::Display> fmt::Display for BinView<'_, B, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}): {}", self.left, self.right, self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quarters() -> Binner<u32> {
        Binner::from_range(4, 0.0, 8.0).unwrap()
    }

    #[test]
    fn test_from_range_edges() {
        let b = quarters();
        assert_eq!(b.edges(), &[0.0, 2.0, 4.0, 6.0, 8.0]);
        assert_eq!(b.bin_count(), 4);
        assert_eq!(b.num_slots(), 6);
        assert_eq!(b.overflow_index(), 5);
        assert!(b.bins().iter().all(|&s| s == 0));
    }

    #[test]
    fn test_from_range_keeps_upper_bound_exact() {
        let b: Binner<u32> = Binner::from_range(3, 0.0, 0.3).unwrap();
        assert_eq!(b.edges().len(), 4);
        assert_eq!(*b.edges().last().unwrap(), 0.3);
    }

    #[test]
    fn test_from_range_near_max_bounds() {
        let b: Binner<u32> = Binner::from_range(2, -f64::MAX, f64::MAX).unwrap();
        assert_eq!(b.edges(), &[-f64::MAX, 0.0, f64::MAX]);

        let b: Binner<u32> = Binner::from_range(4, -f64::MAX, f64::MAX).unwrap();
        assert_eq!(b.edges()[2], 0.0);
        assert!(b.edges().iter().all(|e| e.is_finite()));
        assert!(b.edges().windows(2).all(|w| w[0] < w[1]));
        assert_eq!(b.find_bin(f64::MAX / 4.0), 3);

        let b: Binner<u32, f32> = Binner::from_range(2, -f32::MAX, f32::MAX).unwrap();
        assert_eq!(b.edges(), &[-f32::MAX, 0.0, f32::MAX]);
    }

    #[test]
    fn test_from_range_rejects_degenerate_input() {
        assert!(matches!(
            Binner::<u32>::from_range(0, 0.0, 1.0),
            Err(Error::InvalidParameter(_))
        ));
        assert!(Binner::<u32>::from_range(2, 1.0, 1.0).is_err());
        assert!(Binner::<u32>::from_range(2, 2.0, 1.0).is_err());
        assert!(Binner::<u32>::from_range(2, 0.0, f64::INFINITY).is_err());
        assert!(Binner::<u32>::from_range(2, f64::NAN, 1.0).is_err());
        assert!(Binner::<u32>::from_range(4, 1e16, 1e16 + 2.0).is_err());
    }

    #[test]
    fn test_from_edges_validation() {
        assert!(matches!(
            Binner::<u32>::from_edges(Vec::new()),
            Err(Error::InvalidEdges(_))
        ));
        assert!(Binner::<u32>::from_edges([0.0, 1.0, 1.0]).is_err());
        assert!(Binner::<u32>::from_edges([0.0, f64::NAN]).is_err());

        let b = Binner::<u32>::from_edges([0.0, 25.0, 45.0, f64::INFINITY]).unwrap();
        assert_eq!(b.bin_count(), 3);
        assert_eq!(b.find_bin(1e300), 3);
        assert_eq!(b.find_bin(f64::INFINITY), 4);
    }

    #[test]
    fn test_single_edge_has_no_finite_bins() {
        let b = Binner::<u32>::from_edges([5.0]).unwrap();
        assert_eq!(b.bin_count(), 0);
        assert_eq!(b.num_slots(), 2);
        assert_eq!(b.find_bin(4.9), 0);
        assert_eq!(b.find_bin(5.0), 1);
    }

    #[test]
    fn test_find_bin_boundaries() {
        let b = quarters();
        assert_eq!(b.find_bin(-0.1), 0);
        assert_eq!(b.find_bin(f64::NEG_INFINITY), 0);
        assert_eq!(b.find_bin(0.0), 1);
        assert_eq!(b.find_bin(1.999), 1);
        assert_eq!(b.find_bin(2.0), 2);
        assert_eq!(b.find_bin(7.999), 4);
        assert_eq!(b.find_bin(8.0), 5);
        assert_eq!(b.find_bin(1e9), 5);
        assert_eq!(b.find_bin(f64::NAN), 0);
    }

    #[test]
    fn test_fill_increment_and_add() {
        let mut counts = quarters();
        assert_eq!(counts.fill(5.0), 3);
        assert_eq!(counts.fill(5.0), 3);
        assert_eq!(counts[3], 2);

        let mut sums: Binner<f64> = Binner::from_range(4, 0.0, 8.0).unwrap();
        assert_eq!(sums.fill_with(5.0, 0.25), 3);
        assert_eq!(sums.fill_with(5.0, 1.5), 3);
        assert_eq!(*sums.bin(3).unwrap(), 1.75);
        assert_eq!(sums.bins().iter().sum::<f64>(), 1.75);
    }

    #[test]
    fn test_fill_bin_checked() {
        let mut b = quarters();
        for i in 0..=5 {
            assert!(b.fill_bin(i).is_ok());
        }
        assert_eq!(b.fill_bin(6), Err(Error::out_of_range(6, 6)));
        assert!(b.fill_bin_with(6, 2u32).is_err());
        b.fill_bin_with(2, 10u32).unwrap();
        assert_eq!(b.bins(), &[1, 1, 11, 1, 1, 1]);
    }

    #[test]
    fn test_bin_accessors() {
        let mut b = quarters();
        assert!(b.bin(5).is_ok());
        assert!(matches!(b.bin(6), Err(Error::OutOfRange { index: 6, len: 6 })));
        *b.bin_mut(1).unwrap() = 9;
        b[2] = 4;
        assert_eq!(unsafe { *b.bin_unchecked(1) }, 9);
        unsafe {
            *b.bin_unchecked_mut(2) += 1;
        }
        assert_eq!(b[2], 5);
        assert!(b.bin_mut(100).is_err());
    }

    #[test]
    fn test_edges_of_slots() {
        let b = quarters();
        assert_eq!(b.left_edge(0).unwrap(), f64::NEG_INFINITY);
        assert_eq!(b.right_edge(0).unwrap(), 0.0);
        assert_eq!(b.left_edge(1).unwrap(), 0.0);
        assert_eq!(b.right_edge(1).unwrap(), 2.0);
        assert_eq!(b.left_edge(5).unwrap(), 8.0);
        assert_eq!(b.right_edge(5).unwrap(), f64::INFINITY);
        assert!(b.left_edge(6).is_err());
        assert!(b.right_edge(6).is_err());
    }

    #[test]
    fn test_default_then_init() {
        let mut b: Binner<u64> = Binner::default();
        assert_eq!(b.bin_count(), 0);
        assert_eq!(b.num_slots(), 1);
        assert_eq!(b.fill(3.0), 0);
        assert_eq!(b.left_edge(0).unwrap(), f64::NEG_INFINITY);
        assert_eq!(b.right_edge(0).unwrap(), f64::INFINITY);

        b.init([0.0, 1.0, 10.0]).unwrap();
        assert_eq!(b.bins(), &[0, 0, 0, 0]);
        b.fill(2.0);
        assert_eq!(b[2], 1);

        b.init([0.0, 5.0]).unwrap();
        assert_eq!(b.bins(), &[0, 0, 0]);
    }

    #[test]
    fn test_init_failure_keeps_state() {
        let mut b = quarters();
        b.fill(1.0);
        assert!(b.init([3.0, 1.0]).is_err());
        assert_eq!(b.edges(), &[0.0, 2.0, 4.0, 6.0, 8.0]);
        assert_eq!(b[1], 1);
    }

    #[test]
    fn test_edges_mut_round_trip() {
        let mut b = quarters();
        b.edges_mut().copy_from_slice(&[0.0, 1.0, 3.0, 7.0, 20.0]);
        assert_eq!(b.edges(), &[0.0, 1.0, 3.0, 7.0, 20.0]);
        assert_eq!(b.num_slots(), 6);
        assert_eq!(b.find_bin(10.0), 4);
    }

    #[test]
    fn test_iter_views() {
        let mut b = quarters();
        b.fill(3.0);
        let views: Vec<_> = b.iter().collect();
        assert_eq!(views.len(), 6);
        assert_eq!(views[0].left, f64::NEG_INFINITY);
        assert_eq!(views[5].right, f64::INFINITY);
        assert_eq!(*views[2].state, 1);

        let finite: Vec<usize> = b.finite().map(|v| v.index).collect();
        assert_eq!(finite, vec![1, 2, 3, 4]);
        assert_eq!(views[2].to_string(), "[2, 4): 1");
    }

    #[test]
    fn test_f32_edges() {
        let mut b: Binner<u32, f32> = Binner::from_range(2, -1.0, 1.0).unwrap();
        assert_eq!(b.edges(), &[-1.0f32, 0.0, 1.0]);
        assert_eq!(b.fill(0.0f32), 2);
        assert_eq!(b.fill(-2.0f32), 0);
    }

    #[test]
    fn test_into_parts() {
        let mut b = quarters();
        b.fill(7.0);
        let (edges, bins) = b.into_parts();
        assert_eq!(edges.len(), 5);
        assert_eq!(bins, vec![0, 0, 0, 0, 1, 0]);
    }
}
