//! Finalized, read-only compressed sparse row graph.

use std::ops::Range;

use crate::{VertexId, builder::GraphOptions, merge::VertexMapping};

/// Immutable CSR adjacency produced by
/// [`CsrGraphBuilder::finalize`](crate::CsrGraphBuilder::finalize).
///
/// Row `r` holds the distinct neighbours of final vertex `r` in strictly
/// ascending order at `column_indices()[start_pointers()[r]..start_pointers()[r + 1]]`.
/// The position of an edge in [`column_indices`](Self::column_indices) is its
/// slot.
///
/// # Examples
/// ```
/// use csrgraph_core::CsrGraphBuilder;
///
/// let mut builder = CsrGraphBuilder::new();
/// builder.add_edge(0_usize, 2);
/// builder.add_edge(0, 1);
/// builder.add_edge(2, 0);
///
/// let graph = builder.finalize(3)?;
/// assert_eq!(graph.num_vertices(), 3);
/// assert_eq!(graph.neighbours(0), &[1, 2]);
/// assert!(graph.neighbours(1).is_empty());
/// assert_eq!(graph.edges().collect::<Vec<_>>(), vec![(0, 1), (0, 2), (2, 0)]);
/// # Ok::<(), csrgraph_core::GraphError>(())
/// ```
#[derive(Clone, Debug)]
pub struct CompressedGraph<V = usize> {
    start_pointers: Vec<usize>,
    column_indices: Vec<usize>,
    slot_map: Option<Vec<usize>>,
    dropped_self_loops: usize,
    mapping: VertexMapping<V>,
    options: GraphOptions,
}

impl<V: VertexId> CompressedGraph<V> {
    pub(crate) fn new(
        start_pointers: Vec<usize>,
        column_indices: Vec<usize>,
        slot_map: Option<Vec<usize>>,
        dropped_self_loops: usize,
        mapping: VertexMapping<V>,
        options: GraphOptions,
    ) -> Self {
        Self {
            start_pointers,
            column_indices,
            slot_map,
            dropped_self_loops,
            mapping,
            options,
        }
    }

    /// Returns the number of final vertices `K`.
    #[must_use]
    pub fn num_vertices(&self) -> usize {
        self.start_pointers.len().saturating_sub(1)
    }

    /// Returns the number of distinct compressed edges.
    #[must_use]
    #[rustfmt::skip]
    pub fn num_edges(&self) -> usize { self.column_indices.len() }

    /// Returns the `K + 1` row start pointers.
    #[must_use]
    #[rustfmt::skip]
    pub fn start_pointers(&self) -> &[usize] { &self.start_pointers }

    /// Returns the neighbour ids of every row, concatenated in row order.
    #[must_use]
    #[rustfmt::skip]
    pub fn column_indices(&self) -> &[usize] { &self.column_indices }

    /// Returns the compressed slot of every surviving raw insertion, in
    /// insertion order, or `None` when slot tracking was disabled.
    ///
    /// Insertions that collapsed into a discarded self-loop have no entry,
    /// so the map is shorter than the insertion count whenever that happens.
    #[must_use]
    pub fn slot_map(&self) -> Option<&[usize]> {
        self.slot_map.as_deref()
    }

    /// Returns the number of raw insertions discarded as self-loops.
    #[must_use]
    #[rustfmt::skip]
    pub fn dropped_self_loops(&self) -> usize { self.dropped_self_loops }

    /// Returns the slot range of `row`. Rows outside `0..K` yield an empty
    /// range.
    #[must_use]
    pub fn row_slots(&self, row: usize) -> Range<usize> {
        let end = row
            .checked_add(1)
            .and_then(|next| self.start_pointers.get(next));
        match (self.start_pointers.get(row), end) {
            (Some(&begin), Some(&end)) => begin..end,
            _ => 0..0,
        }
    }

    /// Returns the sorted neighbours of `row`. Rows outside `0..K` have none.
    #[must_use]
    pub fn neighbours(&self, row: usize) -> &[usize] {
        &self.column_indices[self.row_slots(row)]
    }

    /// Returns the row of every slot, the coordinate-format companion of
    /// [`column_indices`](Self::column_indices).
    ///
    /// # Examples
    /// ```
    /// use csrgraph_core::CsrGraphBuilder;
    ///
    /// let mut builder = CsrGraphBuilder::new();
    /// builder.add_edges(&[0_usize, 0, 2], &[1, 2, 1])?;
    ///
    /// let graph = builder.finalize(3)?;
    /// assert_eq!(graph.coordinate_row_indices(), vec![0, 0, 2]);
    /// # Ok::<(), csrgraph_core::GraphError>(())
    /// ```
    #[must_use]
    pub fn coordinate_row_indices(&self) -> Vec<usize> {
        (0..self.num_vertices())
            .flat_map(|row| self.row_slots(row).map(move |_| row))
            .collect()
    }

    /// Iterates every `(row, column)` edge in slot order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.num_vertices()).flat_map(move |row| {
            self.neighbours(row)
                .iter()
                .map(move |&column| (row, column))
        })
    }

    /// Returns the final vertex id of an original vertex, or `None` when it
    /// was never referenced by an edge or a group.
    #[must_use]
    pub fn final_vertex_id(&self, vertex: V) -> Option<usize> {
        self.mapping.final_id(vertex)
    }

    /// Returns the full original-to-final vertex mapping.
    #[must_use]
    #[rustfmt::skip]
    pub fn vertex_mapping(&self) -> &VertexMapping<V> { &self.mapping }

    /// Returns the options the graph was built with.
    #[must_use]
    #[rustfmt::skip]
    pub fn options(&self) -> GraphOptions { self.options }

    /// Consumes the graph and returns `(start_pointers, column_indices,
    /// slot_map)`.
    #[must_use]
    pub fn into_parts(self) -> (Vec<usize>, Vec<usize>, Option<Vec<usize>>) {
        (self.start_pointers, self.column_indices, self.slot_map)
    }
}
