//! Benchmark parameter types.

use std::fmt;

/// Parameters for a single `finalize` benchmark run.
#[derive(Clone, Debug)]
pub struct FinalizeBenchParams {
    /// Number of original grid cells.
    pub cells: usize,
    /// Number of refinement blocks merged into single vertices.
    pub refined_blocks: usize,
    /// Whether the slot map is produced.
    pub slot_tracking: bool,
}

impl fmt::Display for FinalizeBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cells={},blocks={},tracking={}",
            self.cells, self.refined_blocks, self.slot_tracking
        )
    }
}
