//! Coordinate-to-CSR graph builder with online vertex merging.
//!
//! Edges are buffered as raw `(row, column)` insertions, vertex groups are
//! merged through a union-find, and a single [`CsrGraphBuilder::finalize`]
//! call produces a deduplicated, row-major [`CompressedGraph`] together with
//! an optional per-insertion slot map.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod compress;
mod coordinates;
mod error;
mod graph;
mod merge;
mod vertex;

#[cfg(test)]
pub(crate) mod test_utils;

pub use crate::{
    builder::{CsrGraphBuilder, GraphOptions},
    coordinates::{CoordinateLog, RawEdge},
    error::{GraphError, GraphErrorCode, Result},
    graph::CompressedGraph,
    merge::{VertexMapping, VertexMerger},
    vertex::VertexId,
};
