//! Independence from submission order and group granularity.

use proptest::test_runner::{TestCaseError, TestCaseResult};

use crate::{CompressedGraph, CsrGraphBuilder, GraphOptions};

use super::types::GraphFixture;

/// How the fixture's groups are resubmitted.
#[derive(Clone, Copy, Debug)]
enum Resubmission {
    /// Groups and their members in reverse order.
    Reversed,
    /// Groups before any edge.
    GroupsFirst,
    /// Every group broken into overlapping consecutive pairs.
    ChainedPairs,
    /// Every group submitted twice.
    Repeated,
}

const RESUBMISSIONS: [Resubmission; 4] = [
    Resubmission::Reversed,
    Resubmission::GroupsFirst,
    Resubmission::ChainedPairs,
    Resubmission::Repeated,
];

fn resubmit(
    fixture: &GraphFixture,
    options: GraphOptions,
    mode: Resubmission,
) -> crate::Result<CompressedGraph<usize>> {
    let mut builder = CsrGraphBuilder::with_options(options);
    let add_edges = |builder: &mut CsrGraphBuilder<usize>| {
        for &(source, target) in &fixture.edges {
            builder.add_edge(source, target);
        }
    };

    if !matches!(mode, Resubmission::GroupsFirst) {
        add_edges(&mut builder);
    }
    match mode {
        Resubmission::Reversed => {
            for group in fixture.groups.iter().rev() {
                builder.merge_group(group.iter().rev().copied());
            }
        }
        Resubmission::GroupsFirst => {
            for group in &fixture.groups {
                builder.merge_group(group.iter().copied());
            }
            add_edges(&mut builder);
        }
        Resubmission::ChainedPairs => {
            for group in &fixture.groups {
                if let [single] = group.as_slice() {
                    builder.merge_group([*single]);
                }
                for pair in group.windows(2) {
                    builder.merge_group(pair.iter().copied());
                }
            }
        }
        Resubmission::Repeated => {
            for group in fixture.groups.iter().chain(&fixture.groups) {
                builder.merge_group(group.iter().copied());
            }
        }
    }
    for vertex in 0..fixture.vertex_count {
        builder.merge_group([vertex]);
    }

    let expected = builder.class_count();
    builder.finalize(expected)
}

/// Resubmitting the same edges and groups differently yields an identical
/// graph, identical numbering and an identical slot map.
pub(super) fn run_invariance_property(fixture: &GraphFixture, options: GraphOptions) -> TestCaseResult {
    let baseline = fixture
        .finalize(options)
        .map_err(|err| TestCaseError::fail(format!("baseline finalize failed: {err}")))?;

    for mode in RESUBMISSIONS {
        let graph = resubmit(fixture, options, mode)
            .map_err(|err| TestCaseError::fail(format!("{mode:?} finalize failed: {err}")))?;

        if graph.start_pointers() != baseline.start_pointers()
            || graph.column_indices() != baseline.column_indices()
        {
            return Err(TestCaseError::fail(format!(
                "{mode:?} changed the CSR arrays ({:?})",
                fixture.topology
            )));
        }
        if graph.slot_map() != baseline.slot_map() {
            return Err(TestCaseError::fail(format!("{mode:?} changed the slot map")));
        }
        let renumbered = (0..fixture.vertex_count)
            .find(|&vertex| graph.final_vertex_id(vertex) != baseline.final_vertex_id(vertex));
        if let Some(vertex) = renumbered {
            return Err(TestCaseError::fail(format!(
                "{mode:?} renumbered vertex {vertex}"
            )));
        }
    }

    Ok(())
}

/// Finalizing the same input twice yields bit-identical output.
pub(super) fn run_determinism_property(fixture: &GraphFixture, options: GraphOptions) -> TestCaseResult {
    let first = fixture.finalize(options);
    let second = fixture.finalize(options);
    match (first, second) {
        (Ok(first), Ok(second)) => {
            if first.into_parts() != second.into_parts() {
                return Err(TestCaseError::fail("repeated finalize diverged"));
            }
            Ok(())
        }
        (first, second) => Err(TestCaseError::fail(format!(
            "finalize failed: {:?} / {:?}",
            first.err(),
            second.err()
        ))),
    }
}
