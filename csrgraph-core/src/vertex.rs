//! Vertex identifier bound shared by every builder component.

use std::{fmt, hash::Hash};

/// Identifier of an original, pre-merge vertex.
///
/// Vertices carry no attributes beyond identity. Any small `Copy` key with a
/// total order and a hash qualifies; the order decides the final numbering
/// of merged classes, the hash is only used for lookups.
///
/// # Examples
/// ```
/// use csrgraph_core::VertexId;
///
/// fn accepts<V: VertexId>(_: V) {}
///
/// accepts(3_usize);
/// accepts(-1_i64);
/// accepts((2_u32, 7_u32));
/// ```
pub trait VertexId: Copy + Eq + Ord + Hash + fmt::Debug {}

impl<T> VertexId for T where T: Copy + Eq + Ord + Hash + fmt::Debug {}
