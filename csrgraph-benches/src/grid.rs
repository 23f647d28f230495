//! Synthetic Cartesian grids with local-refinement merge groups.
//!
//! Every cell contributes both directions of each of its faces, so every
//! interior connection is inserted four times, mimicking per-cell assembly.
//! Refinement blocks are random `2 x 2 x 1` cell boxes merged into single
//! vertices; blocks may overlap and then merge transitively.

use std::num::NonZeroUsize;

use csrgraph_core::{CsrGraphBuilder, GraphOptions};
use rand::{Rng, SeedableRng, rngs::SmallRng};

use crate::error::BenchSetupError;

/// Extents and refinement settings for [`SyntheticGrid::generate`].
#[derive(Clone, Debug)]
pub struct GridConfig {
    /// Cells along x.
    pub nx: usize,
    /// Cells along y.
    pub ny: usize,
    /// Cells along z.
    pub nz: usize,
    /// Number of refinement blocks to merge.
    pub refined_blocks: usize,
    /// Seed for block placement.
    pub seed: u64,
}

/// Coordinate tables and merge groups for one synthetic grid.
#[derive(Clone, Debug)]
pub struct SyntheticGrid {
    cells: usize,
    rows: Vec<usize>,
    columns: Vec<usize>,
    groups: Vec<Vec<usize>>,
}

impl SyntheticGrid {
    /// Generates the grid described by `config`.
    ///
    /// # Errors
    /// Returns [`BenchSetupError::ZeroValue`] when an extent is zero.
    ///
    /// # Examples
    /// ```
    /// use csrgraph_benches::grid::{GridConfig, SyntheticGrid};
    ///
    /// let grid = SyntheticGrid::generate(&GridConfig { nx: 3, ny: 2, nz: 1, refined_blocks: 1, seed: 7 })?;
    /// assert_eq!(grid.cells(), 6);
    /// assert_eq!(grid.raw_edges(), 4 * 7);
    /// # Ok::<(), csrgraph_benches::error::BenchSetupError>(())
    /// ```
    pub fn generate(config: &GridConfig) -> Result<Self, BenchSetupError> {
        let nx = non_zero(config.nx, "nx")?;
        let ny = non_zero(config.ny, "ny")?;
        let nz = non_zero(config.nz, "nz")?;
        let cell = |i: usize, j: usize, k: usize| (k * ny + j) * nx + i;

        let mut rows = Vec::new();
        let mut columns = Vec::new();
        for k in 0..nz {
            for j in 0..ny {
                for i in 0..nx {
                    let here = cell(i, j, k);
                    let neighbours = [
                        (i > 0).then(|| cell(i - 1, j, k)),
                        (i + 1 < nx).then(|| cell(i + 1, j, k)),
                        (j > 0).then(|| cell(i, j - 1, k)),
                        (j + 1 < ny).then(|| cell(i, j + 1, k)),
                        (k > 0).then(|| cell(i, j, k - 1)),
                        (k + 1 < nz).then(|| cell(i, j, k + 1)),
                    ];
                    for there in neighbours.into_iter().flatten() {
                        rows.extend([here, there]);
                        columns.extend([there, here]);
                    }
                }
            }
        }

        let mut rng = SmallRng::seed_from_u64(config.seed);
        let groups = if nx < 2 || ny < 2 {
            Vec::new()
        } else {
            (0..config.refined_blocks)
                .map(|_| {
                    let i = rng.gen_range(0..nx - 1);
                    let j = rng.gen_range(0..ny - 1);
                    let k = rng.gen_range(0..nz);
                    vec![
                        cell(i, j, k),
                        cell(i + 1, j, k),
                        cell(i, j + 1, k),
                        cell(i + 1, j + 1, k),
                    ]
                })
                .collect()
        };

        Ok(Self {
            cells: nx * ny * nz,
            rows,
            columns,
            groups,
        })
    }

    /// Number of original cells.
    #[must_use]
    pub const fn cells(&self) -> usize {
        self.cells
    }

    /// Number of raw edge insertions.
    #[must_use]
    pub fn raw_edges(&self) -> usize {
        self.rows.len()
    }

    /// Refinement groups in submission order.
    #[must_use]
    pub fn groups(&self) -> &[Vec<usize>] {
        &self.groups
    }

    /// Loads the grid into a builder ready for `finalize`.
    ///
    /// # Errors
    /// Propagates [`csrgraph_core::GraphError`] from bulk insertion.
    pub fn builder(&self, options: GraphOptions) -> Result<CsrGraphBuilder, BenchSetupError> {
        let mut builder = CsrGraphBuilder::with_options(options);
        builder.add_edges(&self.rows, &self.columns)?;
        for vertex in 0..self.cells {
            builder.merge_group([vertex]);
        }
        for group in &self.groups {
            builder.merge_group(group.iter().copied());
        }
        Ok(builder)
    }
}

fn non_zero(value: usize, context: &'static str) -> Result<usize, BenchSetupError> {
    NonZeroUsize::new(value)
        .map(NonZeroUsize::get)
        .ok_or(BenchSetupError::ZeroValue { context })
}
