//! Benchmark support crate for csrgraph.
//!
//! Provides synthetic corner-point style grids with local-refinement merge
//! groups, and parameter types used by the Criterion `finalize` benchmarks.

pub mod error;
pub mod grid;
pub mod params;
