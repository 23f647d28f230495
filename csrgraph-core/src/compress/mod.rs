//! One-shot compression of a coordinate log into CSR form.
//!
//! Raw edges are remapped through the resolved [`VertexMapping`], optional
//! self-loops are discarded, and the surviving `(row, column)` pairs are
//! sorted row-major and deduplicated. The row start pointers are a prefix sum
//! over per-row edge counts. Slot tracking walks the raw edges a second time
//! and binary-searches each surviving pair within its row.

use tracing::debug;

use crate::{
    RawEdge, VertexId,
    builder::GraphOptions,
    coordinates::CoordinateLog,
    error::{GraphError, Result},
    merge::VertexMapping,
};

#[cfg(feature = "parallel")]
use rayon::slice::ParallelSliceMut;

/// Arrays produced by [`compress`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct CompressedArrays {
    pub(crate) start_pointers: Vec<usize>,
    pub(crate) column_indices: Vec<usize>,
    pub(crate) slot_map: Option<Vec<usize>>,
    pub(crate) dropped_self_loops: usize,
}

/// Compresses `log` into CSR arrays over the final ids of `mapping`.
///
/// # Errors
/// Returns [`GraphError::VertexCountMismatch`] when `expected` differs from
/// the number of equivalence classes, and [`GraphError::InvariantViolation`]
/// if an edge endpoint is missing from the mapping or a surviving edge cannot
/// be located in the compressed columns.
pub(crate) fn compress<V: VertexId>(
    log: &CoordinateLog<V>,
    mapping: &VertexMapping<V>,
    options: GraphOptions,
    expected: usize,
) -> Result<CompressedArrays> {
    let vertex_count = mapping.class_count();
    if expected != vertex_count {
        return Err(GraphError::VertexCountMismatch {
            expected,
            actual: vertex_count,
        });
    }

    let mut survivors = Vec::with_capacity(log.len());
    for edge in log {
        let (row, column) = remap(edge, mapping)?;
        if row == column && !options.self_loops() {
            continue;
        }
        survivors.push((row, column));
    }
    let dropped_self_loops = log.len() - survivors.len();

    // Insertion order is only needed again for the slot map.
    let (mut pairs, insertion_order) = if options.slot_tracking() {
        (survivors.clone(), Some(survivors))
    } else {
        (survivors, None)
    };
    sort_pairs(&mut pairs);
    pairs.dedup();

    let start_pointers = row_start_pointers(&pairs, vertex_count)?;
    let column_indices: Vec<usize> = pairs.into_iter().map(|(_, column)| column).collect();

    let slot_map = insertion_order
        .map(|order| {
            order
                .iter()
                .map(|&(row, column)| locate_slot(&start_pointers, &column_indices, row, column))
                .collect::<Result<Vec<_>>>()
        })
        .transpose()?;

    debug!(
        vertices = vertex_count,
        compressed_edges = column_indices.len(),
        dropped_self_loops,
        "compressed coordinate log"
    );

    Ok(CompressedArrays {
        start_pointers,
        column_indices,
        slot_map,
        dropped_self_loops,
    })
}

fn remap<V: VertexId>(edge: &RawEdge<V>, mapping: &VertexMapping<V>) -> Result<(usize, usize)> {
    let endpoint = |vertex| {
        mapping
            .final_id(vertex)
            .ok_or(GraphError::InvariantViolation {
                invariant: "edge endpoints are registered with the merger",
            })
    };
    Ok((endpoint(edge.source())?, endpoint(edge.target())?))
}

#[cfg(feature = "parallel")]
fn sort_pairs(pairs: &mut [(usize, usize)]) {
    pairs.par_sort_unstable();
}

#[cfg(not(feature = "parallel"))]
fn sort_pairs(pairs: &mut [(usize, usize)]) {
    pairs.sort_unstable();
}

/// Builds `K + 1` row start pointers from row-major sorted pairs.
fn row_start_pointers(pairs: &[(usize, usize)], vertex_count: usize) -> Result<Vec<usize>> {
    let mut start_pointers = vec![0_usize; vertex_count + 1];
    for &(row, _) in pairs {
        let next = start_pointers
            .get_mut(row + 1)
            .ok_or(GraphError::InvariantViolation {
                invariant: "final row ids are below the vertex count",
            })?;
        *next += 1;
    }
    for row in 0..vertex_count {
        start_pointers[row + 1] += start_pointers[row];
    }
    Ok(start_pointers)
}

fn locate_slot(
    start_pointers: &[usize],
    column_indices: &[usize],
    row: usize,
    column: usize,
) -> Result<usize> {
    let missing = GraphError::InvariantViolation {
        invariant: "surviving edges appear in the compressed columns",
    };
    let end = row.checked_add(1).and_then(|next| start_pointers.get(next));
    let (Some(&begin), Some(&end)) = (start_pointers.get(row), end) else {
        return Err(missing);
    };
    column_indices[begin..end]
        .binary_search(&column)
        .map(|offset| begin + offset)
        .map_err(|_| missing)
}

#[cfg(feature = "metrics")]
pub(crate) fn record_metrics(raw_edges: usize, arrays: &CompressedArrays, elapsed: std::time::Duration) {
    metrics::counter!("csr_graph_raw_edges").increment(raw_edges as u64);
    metrics::counter!("csr_graph_dropped_self_loops").increment(arrays.dropped_self_loops as u64);
    metrics::counter!("csr_graph_compressed_edges")
        .increment(arrays.column_indices.len() as u64);
    metrics::histogram!("csr_graph_finalize_latency_seconds").record(elapsed.as_secs_f64());
}

#[cfg(test)]
mod property;
