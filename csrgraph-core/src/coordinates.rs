//! Coordinate-format accumulation of raw edge insertions.
//!
//! The log is append-only. Every insertion keeps its call-order sequence
//! number so the compressor can report, per insertion, which compressed slot
//! it resolved to.

use crate::{
    VertexId,
    error::{GraphError, Result},
};

/// A single raw `(source, target)` insertion and its call-order sequence.
///
/// # Examples
/// ```
/// use csrgraph_core::RawEdge;
///
/// let edge = RawEdge::new(4_usize, 2, 7);
/// assert_eq!(edge.source(), 4);
/// assert_eq!(edge.target(), 2);
/// assert_eq!(edge.sequence(), 7);
/// assert!(!edge.is_self_loop());
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct RawEdge<V = usize> {
    source: V,
    target: V,
    sequence: usize,
}

impl<V: VertexId> RawEdge<V> {
    /// Creates a raw edge.
    #[must_use]
    pub fn new(source: V, target: V, sequence: usize) -> Self {
        Self {
            source,
            target,
            sequence,
        }
    }

    /// Returns the source vertex, used as the row index.
    #[must_use]
    #[rustfmt::skip]
    pub fn source(&self) -> V { self.source }

    /// Returns the target vertex, used as the column index.
    #[must_use]
    #[rustfmt::skip]
    pub fn target(&self) -> V { self.target }

    /// Returns the zero-based position of this edge in insertion order.
    #[must_use]
    #[rustfmt::skip]
    pub fn sequence(&self) -> usize { self.sequence }

    /// Returns `true` when both raw endpoints are the same vertex.
    ///
    /// Raw self-loops are not the only ones that matter: merging can turn
    /// any edge into a self-loop, which is decided at compression time.
    #[must_use]
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

/// Append-only, insertion-ordered record of raw edges.
///
/// # Examples
/// ```
/// use csrgraph_core::CoordinateLog;
///
/// let mut log = CoordinateLog::new();
/// log.push(0_usize, 1);
/// log.push(1, 0);
/// log.extend_from_slices(&[2, 2], &[3, 1])?;
///
/// assert_eq!(log.len(), 4);
/// assert_eq!(log.row_indices(), vec![0, 1, 2, 2]);
/// assert_eq!(log.column_indices(), vec![1, 0, 3, 1]);
/// # Ok::<(), csrgraph_core::GraphError>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CoordinateLog<V = usize> {
    edges: Vec<RawEdge<V>>,
}

impl<V: VertexId> CoordinateLog<V> {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self { edges: Vec::new() }
    }

    /// Creates an empty log able to hold `capacity` edges without
    /// reallocating.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            edges: Vec::with_capacity(capacity),
        }
    }

    /// Appends one raw edge and returns its sequence number.
    pub fn push(&mut self, source: V, target: V) -> usize {
        let sequence = self.edges.len();
        self.edges.push(RawEdge::new(source, target, sequence));
        sequence
    }

    /// Appends `rows[i] -> columns[i]` for every `i`, in slice order.
    ///
    /// # Errors
    /// Returns [`GraphError::CoordinateLengthMismatch`] when the slices have
    /// different lengths. Nothing is appended in that case.
    pub fn extend_from_slices(&mut self, rows: &[V], columns: &[V]) -> Result<()> {
        if rows.len() != columns.len() {
            return Err(GraphError::CoordinateLengthMismatch {
                rows: rows.len(),
                columns: columns.len(),
            });
        }

        self.edges.reserve(rows.len());
        for (&source, &target) in rows.iter().zip(columns) {
            self.push(source, target);
        }
        Ok(())
    }

    /// Returns the number of recorded insertions.
    #[must_use]
    #[rustfmt::skip]
    pub fn len(&self) -> usize { self.edges.len() }

    /// Returns whether the log holds no insertions.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_empty(&self) -> bool { self.edges.is_empty() }

    /// Returns an iterator over the raw edges in insertion order.
    #[rustfmt::skip]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &RawEdge<V>> { self.edges.iter() }

    /// Returns the recorded edges as a slice in insertion order.
    #[must_use]
    #[rustfmt::skip]
    pub fn as_slice(&self) -> &[RawEdge<V>] { &self.edges }

    /// Returns the source vertex of every insertion.
    #[must_use]
    pub fn row_indices(&self) -> Vec<V> {
        self.edges.iter().map(RawEdge::source).collect()
    }

    /// Returns the target vertex of every insertion.
    #[must_use]
    pub fn column_indices(&self) -> Vec<V> {
        self.edges.iter().map(RawEdge::target).collect()
    }

    /// Drops every recorded edge while keeping the allocation.
    pub fn clear(&mut self) {
        self.edges.clear();
    }
}

impl<'a, V> IntoIterator for &'a CoordinateLog<V> {
    type Item = &'a RawEdge<V>;
    type IntoIter = std::slice::Iter<'a, RawEdge<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.iter()
    }
}
