//! Shared test utilities for `csrgraph-core`.

use std::collections::BTreeSet;

use csrgraph_test_support::proptest_profile::PbtProfile;
use proptest::test_runner::Config as ProptestConfig;

use crate::{CsrGraphBuilder, GraphOptions};

/// Builds a proptest configuration from the shared run profile.
///
/// Suites stay aligned on the same `CSRGRAPH_PBT_CASES` and
/// `CSRGRAPH_PBT_FORK` interpretation.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = PbtProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Buffers `edges` then `groups` into a fresh builder.
pub(crate) fn builder_from(
    options: GraphOptions,
    edges: &[(usize, usize)],
    groups: &[Vec<usize>],
) -> CsrGraphBuilder<usize> {
    let mut builder = CsrGraphBuilder::with_options(options);
    for &(source, target) in edges {
        builder.add_edge(source, target);
    }
    for group in groups {
        builder.merge_group(group.iter().copied());
    }
    builder
}

/// Naive equivalence oracle: repeatedly folds overlapping groups together
/// and returns the final id of every vertex in `0..vertex_count`, numbered
/// by class minimum.
pub(crate) fn oracle_final_ids(vertex_count: usize, groups: &[Vec<usize>]) -> Vec<usize> {
    let mut classes: Vec<BTreeSet<usize>> = (0..vertex_count).map(|v| BTreeSet::from([v])).collect();
    for group in groups {
        let members: BTreeSet<usize> = group.iter().copied().collect();
        let (touched, mut rest): (Vec<_>, Vec<_>) = classes
            .into_iter()
            .partition(|class| !class.is_disjoint(&members));
        let mut merged: BTreeSet<usize> = touched.into_iter().flatten().collect();
        merged.extend(members);
        rest.push(merged);
        classes = rest;
    }
    classes.retain(|class| !class.is_empty());
    classes.sort_by_key(|class| class.first().copied());

    let mut final_ids = vec![0; vertex_count];
    for (final_id, class) in classes.iter().enumerate() {
        for &vertex in class {
            if let Some(slot) = final_ids.get_mut(vertex) {
                *slot = final_id;
            }
        }
    }
    final_ids
}

/// Expected distinct `(row, column)` pairs after remapping through
/// `final_ids`, with self-loops filtered unless permitted.
pub(crate) fn oracle_pairs(
    edges: &[(usize, usize)],
    final_ids: &[usize],
    self_loops: bool,
) -> BTreeSet<(usize, usize)> {
    edges
        .iter()
        .map(|&(source, target)| (final_ids[source], final_ids[target]))
        .filter(|&(row, column)| self_loops || row != column)
        .collect()
}
