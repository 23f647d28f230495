//! Property-based tests for coordinate compression with vertex merging.
//!
//! Checks the compressed graph against a naive set-based oracle, validates
//! the CSR structural invariants and the slot map, and verifies that the
//! result depends only on the multiset of edges and groups, never on the
//! order or granularity in which they were submitted.

mod invariance;
mod strategies;
mod types;
