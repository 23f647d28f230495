//! Growable union-find (disjoint set union) over dense vertex slots.
//!
//! Slots are handed out in registration order by [`super::VertexMerger`],
//! which owns the mapping from caller vertex keys to slots.

#[derive(Clone, Debug, Default)]
pub(super) struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
    classes: usize,
}

impl DisjointSet {
    /// Adds a new singleton slot and returns its index.
    pub(super) fn push(&mut self) -> usize {
        let slot = self.parent.len();
        self.parent.push(slot);
        self.rank.push(0);
        self.classes += 1;
        slot
    }

    pub(super) fn len(&self) -> usize {
        self.parent.len()
    }

    /// Number of disjoint classes currently tracked.
    pub(super) fn classes(&self) -> usize {
        self.classes
    }

    pub(super) fn find(&mut self, mut node: usize) -> usize {
        let mut root = node;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        while self.parent[node] != node {
            let parent = self.parent[node];
            self.parent[node] = root;
            node = parent;
        }

        root
    }

    /// Merges the classes of `left` and `right` and returns the surviving
    /// root.
    pub(super) fn union(&mut self, left: usize, right: usize) -> usize {
        let mut left = self.find(left);
        let mut right = self.find(right);
        if left == right {
            return left;
        }
        let left_rank = self.rank[left];
        let right_rank = self.rank[right];
        if left_rank < right_rank {
            std::mem::swap(&mut left, &mut right);
        }
        self.parent[right] = left;
        if left_rank == right_rank {
            self.rank[left] = left_rank.saturating_add(1);
        }
        self.classes -= 1;
        left
    }

    pub(super) fn clear(&mut self) {
        self.parent.clear();
        self.rank.clear();
        self.classes = 0;
    }
}
