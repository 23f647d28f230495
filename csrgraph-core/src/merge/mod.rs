//! Vertex equivalence via union-find over arbitrary vertex keys.
//!
//! Callers declare groups of original vertices that must collapse into one
//! graph vertex (for example the cells of a refined block, or the segments of
//! a lumped well). Groups sharing a vertex merge transitively. Once every
//! group is known, [`VertexMerger::into_mapping`] numbers the resulting
//! classes `0..K` in ascending order of the smallest original vertex in each
//! class, so the numbering depends only on the groups, never on hashing or
//! on the order in which groups were submitted.

mod union_find;

use std::collections::HashMap;

use tracing::trace;

use crate::VertexId;

use self::union_find::DisjointSet;

/// Accumulates vertex groups and resolves them into equivalence classes.
///
/// # Examples
/// ```
/// use csrgraph_core::VertexMerger;
///
/// let mut merger = VertexMerger::new();
/// merger.merge_group([1_usize, 2, 3]);
/// merger.merge_group([3, 4]);
/// merger.register(0);
///
/// assert_eq!(merger.representative(4), merger.representative(1));
/// assert_eq!(merger.class_count(), 2);
///
/// let mapping = merger.into_mapping();
/// assert_eq!(mapping.final_id(0), Some(0));
/// assert_eq!(mapping.final_id(4), Some(1));
/// ```
#[derive(Clone, Debug)]
pub struct VertexMerger<V = usize> {
    slots: HashMap<V, usize>,
    vertices: Vec<V>,
    sets: DisjointSet,
    groups: usize,
}

impl<V: VertexId> Default for VertexMerger<V> {
    fn default() -> Self {
        Self {
            slots: HashMap::new(),
            vertices: Vec::new(),
            sets: DisjointSet::default(),
            groups: 0,
        }
    }
}

impl<V: VertexId> VertexMerger<V> {
    /// Creates a merger with no registered vertices.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `vertex` as a singleton class unless already known, and
    /// returns its dense slot.
    pub fn register(&mut self, vertex: V) -> usize {
        if let Some(&slot) = self.slots.get(&vertex) {
            return slot;
        }
        let slot = self.sets.push();
        self.slots.insert(vertex, slot);
        self.vertices.push(vertex);
        slot
    }

    /// Unions every vertex of `group` into a single class.
    ///
    /// Existing classes touched by the group are absorbed. Empty groups do
    /// nothing; single-vertex groups only register the vertex.
    pub fn merge_group<I>(&mut self, group: I)
    where
        I: IntoIterator<Item = V>,
    {
        let mut members = group.into_iter();
        let Some(first) = members.next() else {
            return;
        };
        let anchor = self.register(first);
        let mut size = 1_usize;
        for vertex in members {
            let slot = self.register(vertex);
            self.sets.union(anchor, slot);
            size += 1;
        }
        self.groups += 1;
        trace!(
            group_size = size,
            classes = self.sets.classes(),
            "vertex group merged"
        );
    }

    /// Returns the canonical vertex of the class containing `vertex`.
    ///
    /// The representative is an implementation detail of the union-find and
    /// is only guaranteed to be consistent within the class; use
    /// [`VertexMapping::final_id`] for the stable compact numbering. Unknown
    /// vertices are registered as singletons and represent themselves.
    pub fn representative(&mut self, vertex: V) -> V {
        let slot = self.register(vertex);
        let root = self.sets.find(slot);
        self.vertices[root]
    }

    /// Returns whether `vertex` has been registered by an edge or a group.
    #[must_use]
    pub fn contains(&self, vertex: V) -> bool {
        self.slots.contains_key(&vertex)
    }

    /// Returns the number of distinct registered vertices.
    #[must_use]
    #[rustfmt::skip]
    pub fn len(&self) -> usize { self.vertices.len() }

    /// Returns whether no vertex has been registered.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_empty(&self) -> bool { self.vertices.is_empty() }

    /// Returns the number of equivalence classes among registered vertices.
    #[must_use]
    pub fn class_count(&self) -> usize {
        self.sets.classes()
    }

    /// Returns the number of non-empty groups submitted so far.
    #[must_use]
    #[rustfmt::skip]
    pub fn group_count(&self) -> usize { self.groups }

    /// Forgets every vertex and group while keeping allocations.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.vertices.clear();
        self.sets.clear();
        self.groups = 0;
    }

    /// Resolves the classes and assigns each its compact final id.
    ///
    /// Classes are ordered by their minimum original vertex. Vertex keys are
    /// distinct, so no two classes share a minimum and the order is total.
    #[must_use]
    pub fn into_mapping(mut self) -> VertexMapping<V> {
        let slot_count = self.sets.len();
        let roots: Vec<usize> = (0..slot_count).map(|slot| self.sets.find(slot)).collect();

        let mut class_min: Vec<Option<V>> = vec![None; slot_count];
        for (slot, &root) in roots.iter().enumerate() {
            let vertex = self.vertices[slot];
            let current = &mut class_min[root];
            *current = Some(current.map_or(vertex, |min| min.min(vertex)));
        }

        let mut classes: Vec<(V, usize)> = class_min
            .iter()
            .enumerate()
            .filter_map(|(root, min)| min.map(|vertex| (vertex, root)))
            .collect();
        classes.sort_unstable();

        let mut final_of_root = vec![0_usize; slot_count];
        for (final_id, &(_, root)) in classes.iter().enumerate() {
            final_of_root[root] = final_id;
        }

        VertexMapping {
            final_ids: roots.iter().map(|&root| final_of_root[root]).collect(),
            slots: self.slots,
            vertices: self.vertices,
            class_count: classes.len(),
        }
    }
}

/// Resolved mapping from original vertices to compact final ids `0..K`.
#[derive(Clone, Debug)]
pub struct VertexMapping<V = usize> {
    slots: HashMap<V, usize>,
    vertices: Vec<V>,
    final_ids: Vec<usize>,
    class_count: usize,
}

impl<V: VertexId> VertexMapping<V> {
    /// Returns the final id of `vertex`, or `None` if it was never
    /// referenced by an edge or a group.
    #[must_use]
    pub fn final_id(&self, vertex: V) -> Option<usize> {
        self.slots
            .get(&vertex)
            .and_then(|&slot| self.final_ids.get(slot).copied())
    }

    /// Returns the number of final vertices `K`.
    #[must_use]
    #[rustfmt::skip]
    pub fn class_count(&self) -> usize { self.class_count }

    /// Returns the number of original vertices covered by the mapping.
    #[must_use]
    #[rustfmt::skip]
    pub fn len(&self) -> usize { self.vertices.len() }

    /// Returns whether the mapping covers no vertex.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_empty(&self) -> bool { self.vertices.is_empty() }

    /// Iterates `(original, final_id)` pairs in first-reference order.
    pub fn iter(&self) -> impl Iterator<Item = (V, usize)> + '_ {
        self.vertices
            .iter()
            .copied()
            .zip(self.final_ids.iter().copied())
    }

    /// Returns the original vertices of every final vertex, each class
    /// sorted ascending and indexed by final id.
    #[must_use]
    pub fn classes(&self) -> Vec<Vec<V>> {
        let mut classes = vec![Vec::new(); self.class_count];
        for (vertex, final_id) in self.iter() {
            if let Some(members) = classes.get_mut(final_id) {
                members.push(vertex);
            }
        }
        for members in &mut classes {
            members.sort_unstable();
        }
        classes
    }
}
