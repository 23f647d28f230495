//! Fixture types for compression property tests.

use crate::{CompressedGraph, CsrGraphBuilder, GraphOptions, Result};

/// Shape of the generated edge set and merge groups.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum Topology {
    /// Uniformly random edges with random small groups.
    Random,
    /// A path with both directions of every edge, merged in runs.
    Line,
    /// A 2-D grid whose refined blocks are merged, the usual source of
    /// overlapping merge groups.
    RefinedGrid,
    /// Few vertices and many repeated insertions, including raw self-loops.
    Duplicates,
}

/// Generated graph input with full context for failure messages.
#[derive(Clone, Debug)]
pub(super) struct GraphFixture {
    /// Original vertices are exactly `0..vertex_count`.
    pub vertex_count: usize,
    /// Raw edges in insertion order.
    pub edges: Vec<(usize, usize)>,
    /// Merge groups in submission order.
    pub groups: Vec<Vec<usize>>,
    /// Generator that produced the fixture.
    pub topology: Topology,
}

impl GraphFixture {
    /// Submits edges, then groups, then one singleton group per vertex so
    /// isolated vertices are referenced too.
    pub(super) fn builder(&self, options: GraphOptions) -> CsrGraphBuilder<usize> {
        let mut builder = crate::test_utils::builder_from(options, &self.edges, &self.groups);
        for vertex in 0..self.vertex_count {
            builder.merge_group([vertex]);
        }
        builder
    }

    /// Finalizes [`Self::builder`] with the oracle's class count.
    pub(super) fn finalize(&self, options: GraphOptions) -> Result<CompressedGraph<usize>> {
        let builder = self.builder(options);
        let expected = builder.class_count();
        builder.finalize(expected)
    }

    /// Final ids computed by the naive oracle.
    pub(super) fn oracle_final_ids(&self) -> Vec<usize> {
        crate::test_utils::oracle_final_ids(self.vertex_count, &self.groups)
    }
}

/// Option combinations every property runs under.
pub(super) const OPTION_MATRIX: [GraphOptions; 2] = [
    GraphOptions::new().with_slot_tracking(true),
    GraphOptions::new().with_slot_tracking(true).with_self_loops(true),
];
