//! Building-state surface: option selection and edge/group buffering.
//!
//! A [`CsrGraphBuilder`] only buffers. All remapping, filtering and sorting
//! happens once in [`CsrGraphBuilder::finalize`], which consumes the builder
//! and yields the read-only [`CompressedGraph`].

#[cfg(feature = "metrics")]
use std::time::Instant;

use tracing::instrument;

use crate::{
    CompressedGraph, Result, VertexId,
    compress::{self, CompressedArrays},
    coordinates::CoordinateLog,
    merge::VertexMerger,
};

/// Fixed policy choices for a single graph build.
///
/// # Examples
/// ```
/// use csrgraph_core::GraphOptions;
///
/// let options = GraphOptions::new().with_slot_tracking(true);
/// assert!(options.slot_tracking());
/// assert!(!options.self_loops());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct GraphOptions {
    slot_tracking: bool,
    self_loops: bool,
}

impl GraphOptions {
    /// Creates options with slot tracking and self-loops both disabled.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slot_tracking: false,
            self_loops: false,
        }
    }

    /// Enables or disables recording the compressed slot of every raw edge.
    #[must_use]
    pub const fn with_slot_tracking(mut self, enabled: bool) -> Self {
        self.slot_tracking = enabled;
        self
    }

    /// Keeps edges whose endpoints map to the same final vertex instead of
    /// discarding them.
    ///
    /// # Examples
    /// ```
    /// use csrgraph_core::GraphOptions;
    ///
    /// let options = GraphOptions::new().with_self_loops(true);
    /// assert!(options.self_loops());
    /// ```
    #[must_use]
    pub const fn with_self_loops(mut self, permitted: bool) -> Self {
        self.self_loops = permitted;
        self
    }

    /// Returns whether the slot map is produced.
    #[must_use]
    #[rustfmt::skip]
    pub const fn slot_tracking(&self) -> bool { self.slot_tracking }

    /// Returns whether mapped self-loops survive compression.
    #[must_use]
    #[rustfmt::skip]
    pub const fn self_loops(&self) -> bool { self.self_loops }
}

/// Accumulates edges and vertex groups for a single compressed graph.
///
/// # Examples
/// ```
/// use csrgraph_core::{CsrGraphBuilder, GraphOptions};
///
/// let mut builder = CsrGraphBuilder::with_options(GraphOptions::new().with_slot_tracking(true));
/// for i in 0..3_usize {
///     builder.add_edge(i, i + 1);
///     builder.add_edge(i + 1, i);
/// }
/// builder.merge_group([1, 2]);
///
/// let graph = builder.finalize(3)?;
/// assert_eq!(graph.start_pointers(), &[0, 1, 3, 4]);
/// assert_eq!(graph.column_indices(), &[1, 0, 2, 1]);
/// assert_eq!(graph.slot_map(), Some(&[0, 1, 2, 3][..]));
/// # Ok::<(), csrgraph_core::GraphError>(())
/// ```
#[derive(Clone, Debug)]
pub struct CsrGraphBuilder<V = usize> {
    options: GraphOptions,
    log: CoordinateLog<V>,
    merger: VertexMerger<V>,
}

impl<V: VertexId> Default for CsrGraphBuilder<V> {
    fn default() -> Self {
        Self::with_options(GraphOptions::default())
    }
}

impl<V: VertexId> CsrGraphBuilder<V> {
    /// Creates a builder with default [`GraphOptions`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder with the given options.
    #[must_use]
    pub fn with_options(options: GraphOptions) -> Self {
        Self {
            options,
            log: CoordinateLog::new(),
            merger: VertexMerger::new(),
        }
    }

    /// Returns the options fixed at construction.
    #[must_use]
    #[rustfmt::skip]
    pub fn options(&self) -> GraphOptions { self.options }

    /// Records a directed edge `source -> target` and returns its sequence
    /// number.
    ///
    /// Duplicates and self-loops are accepted; both are resolved during
    /// [`finalize`](Self::finalize).
    pub fn add_edge(&mut self, source: V, target: V) -> usize {
        self.merger.register(source);
        self.merger.register(target);
        self.log.push(source, target)
    }

    /// Records `rows[i] -> columns[i]` for every `i`.
    ///
    /// # Errors
    /// Returns [`GraphError::CoordinateLengthMismatch`] when the slices have
    /// different lengths; nothing is recorded in that case.
    ///
    /// # Examples
    /// ```
    /// use csrgraph_core::{CsrGraphBuilder, GraphErrorCode};
    ///
    /// let mut builder = CsrGraphBuilder::new();
    /// builder.add_edges(&[0_usize, 1], &[1, 0])?;
    /// assert_eq!(builder.len(), 2);
    ///
    /// let err = builder.add_edges(&[2], &[]).unwrap_err();
    /// assert_eq!(err.code(), GraphErrorCode::CoordinateLengthMismatch);
    /// assert_eq!(builder.len(), 2);
    /// # Ok::<(), csrgraph_core::GraphError>(())
    /// ```
    ///
    /// [`GraphError::CoordinateLengthMismatch`]: crate::GraphError::CoordinateLengthMismatch
    pub fn add_edges(&mut self, rows: &[V], columns: &[V]) -> Result<()> {
        self.log.extend_from_slices(rows, columns)?;
        for (&source, &target) in rows.iter().zip(columns) {
            self.merger.register(source);
            self.merger.register(target);
        }
        Ok(())
    }

    /// Declares that every vertex in `group` is the same final vertex.
    ///
    /// Groups sharing a vertex merge transitively. The call may come before
    /// or after the edges touching the group.
    pub fn merge_group<I>(&mut self, group: I)
    where
        I: IntoIterator<Item = V>,
    {
        self.merger.merge_group(group);
    }

    /// Returns the number of raw edge insertions so far.
    #[must_use]
    #[rustfmt::skip]
    pub fn len(&self) -> usize { self.log.len() }

    /// Returns whether no edge has been recorded.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_empty(&self) -> bool { self.log.is_empty() }

    /// Returns the number of distinct original vertices referenced so far.
    #[must_use]
    #[rustfmt::skip]
    pub fn vertex_count(&self) -> usize { self.merger.len() }

    /// Returns the number of final vertices the current state would produce.
    #[must_use]
    #[rustfmt::skip]
    pub fn class_count(&self) -> usize { self.merger.class_count() }

    /// Returns the recorded raw edges.
    #[must_use]
    #[rustfmt::skip]
    pub fn coordinates(&self) -> &CoordinateLog<V> { &self.log }

    /// Discards every buffered edge and group, keeping the options and the
    /// allocations.
    pub fn clear(&mut self) {
        self.log.clear();
        self.merger.clear();
    }

    /// Compresses the buffered edges into an immutable CSR graph.
    ///
    /// `expected_vertex_count` must equal the number of final vertices, that
    /// is the number of equivalence classes among every vertex referenced by
    /// an edge or a group.
    ///
    /// # Errors
    /// Returns [`GraphError::VertexCountMismatch`] when the count disagrees,
    /// or [`GraphError::InvariantViolation`] on an internal logic error.
    ///
    /// # Examples
    /// ```
    /// use csrgraph_core::{CsrGraphBuilder, GraphError};
    ///
    /// let mut builder = CsrGraphBuilder::new();
    /// builder.add_edge(0_usize, 1);
    /// builder.add_edge(2, 3);
    ///
    /// let err = builder.finalize(3).unwrap_err();
    /// assert_eq!(err, GraphError::VertexCountMismatch { expected: 3, actual: 4 });
    /// ```
    ///
    /// [`GraphError::VertexCountMismatch`]: crate::GraphError::VertexCountMismatch
    /// [`GraphError::InvariantViolation`]: crate::GraphError::InvariantViolation
    #[instrument(
        name = "csr.finalize",
        err,
        skip(self),
        fields(raw_edges = self.log.len(), groups = self.merger.group_count())
    )]
    pub fn finalize(self, expected_vertex_count: usize) -> Result<CompressedGraph<V>> {
        #[cfg(feature = "metrics")]
        let started = Instant::now();

        let Self {
            options,
            log,
            merger,
        } = self;
        let mapping = merger.into_mapping();
        let arrays = compress::compress(&log, &mapping, options, expected_vertex_count)?;

        #[cfg(feature = "metrics")]
        compress::record_metrics(log.len(), &arrays, started.elapsed());

        let CompressedArrays {
            start_pointers,
            column_indices,
            slot_map,
            dropped_self_loops,
        } = arrays;
        Ok(CompressedGraph::new(
            start_pointers,
            column_indices,
            slot_map,
            dropped_self_loops,
            mapping,
            options,
        ))
    }
}
