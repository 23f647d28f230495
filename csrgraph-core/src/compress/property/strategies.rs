//! Fixture generators for compression property tests.
//!
//! Each generator draws from a seeded [`SmallRng`] so failing cases can be
//! replayed from the seed alone.

use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::types::{GraphFixture, Topology};

const MAX_VERTICES: usize = 48;
const MAX_GROUP_SIZE: usize = 5;

/// Generates fixtures over every topology.
pub(super) fn fixture_strategy() -> impl Strategy<Value = GraphFixture> {
    let topology = prop_oneof![
        2 => Just(Topology::Random),
        1 => Just(Topology::Line),
        2 => Just(Topology::RefinedGrid),
        1 => Just(Topology::Duplicates),
    ];
    (topology, any::<u64>()).prop_map(|(topology, seed)| {
        let mut rng = SmallRng::seed_from_u64(seed);
        generate_fixture(topology, &mut rng)
    })
}

/// Generates a fixture for an explicitly chosen topology.
pub(super) fn generate_fixture(topology: Topology, rng: &mut SmallRng) -> GraphFixture {
    match topology {
        Topology::Random => generate_random(rng),
        Topology::Line => generate_line(rng),
        Topology::RefinedGrid => generate_refined_grid(rng),
        Topology::Duplicates => generate_duplicates(rng),
    }
}

fn random_groups(rng: &mut SmallRng, vertex_count: usize, count: usize) -> Vec<Vec<usize>> {
    (0..count)
        .map(|_| {
            let size = rng.gen_range(0..=MAX_GROUP_SIZE);
            (0..size).map(|_| rng.gen_range(0..vertex_count)).collect()
        })
        .collect()
}

fn generate_random(rng: &mut SmallRng) -> GraphFixture {
    let vertex_count = rng.gen_range(1..=MAX_VERTICES);
    let edge_count = rng.gen_range(0..=vertex_count * 3);
    let edges = (0..edge_count)
        .map(|_| (rng.gen_range(0..vertex_count), rng.gen_range(0..vertex_count)))
        .collect();
    let group_count = rng.gen_range(0..=vertex_count / 4);
    GraphFixture {
        vertex_count,
        edges,
        groups: random_groups(rng, vertex_count, group_count),
        topology: Topology::Random,
    }
}

fn generate_line(rng: &mut SmallRng) -> GraphFixture {
    let vertex_count = rng.gen_range(2..=MAX_VERTICES);
    let mut edges = Vec::with_capacity(2 * vertex_count);
    for vertex in 0..vertex_count - 1 {
        edges.push((vertex, vertex + 1));
        edges.push((vertex + 1, vertex));
    }
    let mut groups = Vec::new();
    let mut start = 0;
    while start < vertex_count {
        let len = rng.gen_range(1..=4).min(vertex_count - start);
        if rng.gen_bool(0.5) {
            groups.push((start..start + len).collect());
        }
        start += len;
    }
    GraphFixture {
        vertex_count,
        edges,
        groups,
        topology: Topology::Line,
    }
}

fn generate_refined_grid(rng: &mut SmallRng) -> GraphFixture {
    let nx = rng.gen_range(2..=7_usize);
    let ny = rng.gen_range(2..=6_usize);
    let cell = |i: usize, j: usize| j * nx + i;

    let mut edges = Vec::new();
    for j in 0..ny {
        for i in 0..nx {
            if i + 1 < nx {
                edges.push((cell(i, j), cell(i + 1, j)));
                edges.push((cell(i + 1, j), cell(i, j)));
            }
            if j + 1 < ny {
                edges.push((cell(i, j), cell(i, j + 1)));
                edges.push((cell(i, j + 1), cell(i, j)));
            }
        }
    }

    // 2x2 blocks anchored at random cells; neighbouring blocks may overlap.
    let block_count = rng.gen_range(0..=3);
    let groups = (0..block_count)
        .map(|_| {
            let i = rng.gen_range(0..nx - 1);
            let j = rng.gen_range(0..ny - 1);
            vec![cell(i, j), cell(i + 1, j), cell(i, j + 1), cell(i + 1, j + 1)]
        })
        .collect();

    GraphFixture {
        vertex_count: nx * ny,
        edges,
        groups,
        topology: Topology::RefinedGrid,
    }
}

fn generate_duplicates(rng: &mut SmallRng) -> GraphFixture {
    let vertex_count = rng.gen_range(1..=6);
    let edge_count = rng.gen_range(10..=60);
    let edges = (0..edge_count)
        .map(|_| {
            let source = rng.gen_range(0..vertex_count);
            let target = if rng.gen_bool(0.2) {
                source
            } else {
                rng.gen_range(0..vertex_count)
            };
            (source, target)
        })
        .collect();
    let group_count = rng.gen_range(0..=2);
    GraphFixture {
        vertex_count,
        edges,
        groups: random_groups(rng, vertex_count, group_count),
        topology: Topology::Duplicates,
    }
}
