//! The solver loop: minimum-entropy selection, weighted collapse, propagation.
//!
//! The entry point is [`generate`]. Everything below it is an internal helper.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use wfc_map_core::{Direction, TileBitset, TileCatalog};

use crate::{MapGrid, MAX_ITERATIONS_PER_CELL, TIE_BREAK_NOISE};

/// Why a generation run failed.
///
/// Both variants are terminal for the run: the solver performs no internal
/// retry and surfaces no partial grid. Callers may retry with a different
/// seed, larger dimensions, or a looser catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// A cell's possibility set became empty during selection or propagation.
    #[error("contradiction at cell ({x}, {y}): no tile satisfies all constraints")]
    Contradiction { x: u32, y: u32 },
    /// The iteration cap was reached before the grid collapsed.
    #[error("iteration limit exceeded; the catalog likely admits no full tiling")]
    IterationLimitExceeded,
}

/// Generate a fully collapsed `width × height` grid from `catalog`.
///
/// When `seed` is supplied the entire run is deterministic: the same catalog,
/// dimensions, and seed always produce a bit-identical grid (or an identical
/// failure). Without a seed the generator is drawn from OS entropy.
///
/// The random stream is consumed in a fixed order per collapse cycle: one
/// uniform tie-break draw for each unresolved cell in row-major scan order,
/// then one weighted draw for the selected cell. Nothing else consumes
/// randomness.
pub fn generate(
    catalog: &TileCatalog,
    width: u32,
    height: u32,
    seed: Option<u64>,
) -> Result<MapGrid, GenerationError> {
    let mut rng = match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };
    generate_with_rng(catalog, width, height, &mut rng)
}

/// [`generate`] with a caller-supplied random number generator.
pub fn generate_with_rng(
    catalog: &TileCatalog,
    width: u32,
    height: u32,
    rng: &mut impl Rng,
) -> Result<MapGrid, GenerationError> {
    Wave::new(catalog, width, height).run(rng)
}

// ─── Wave state ──────────────────────────────────────────────────────────────

/// Per-run solver state: one possibility bitset and one collapsed flag per
/// cell, in a flat row-major arena.
struct Wave<'a> {
    catalog: &'a TileCatalog,
    width: usize,
    height: usize,
    cells: Vec<TileBitset>,
    collapsed: Vec<bool>,
}

impl<'a> Wave<'a> {
    fn new(catalog: &'a TileCatalog, width: u32, height: u32) -> Self {
        let width = width as usize;
        let height = height as usize;
        let cell_count = width * height;
        Self {
            catalog,
            width,
            height,
            cells: vec![TileBitset::full(catalog.tile_count()); cell_count],
            collapsed: vec![false; cell_count],
        }
    }

    fn cell_index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    fn run(mut self, rng: &mut impl Rng) -> Result<MapGrid, GenerationError> {
        let cell_count = self.width * self.height;
        let max_iterations = cell_count * MAX_ITERATIONS_PER_CELL;
        let mut iterations = 0usize;

        while let Some((x, y)) = self.select_min_entropy(rng)? {
            iterations += 1;
            if iterations > max_iterations {
                tracing::debug!(iterations, "iteration cap reached before full collapse");
                return Err(GenerationError::IterationLimitExceeded);
            }

            self.collapse(x, y, rng);
            self.propagate(x, y)?;

            if iterations % 64 == 0 {
                let done = self.collapsed.iter().filter(|&&c| c).count();
                tracing::trace!(iterations, collapsed = done, total = cell_count, "collapse progress");
            }
        }

        Ok(self.into_grid())
    }

    /// Scan all unresolved cells in row-major order and pick the one with
    /// minimum entropy (remaining possibility count). Ties break on a small
    /// seeded perturbation, so equal seeds always pick the same cell.
    ///
    /// Returns `Ok(None)` once every cell is collapsed; an unresolved cell
    /// with zero possibilities is an immediate contradiction.
    fn select_min_entropy(
        &self,
        rng: &mut impl Rng,
    ) -> Result<Option<(usize, usize)>, GenerationError> {
        let mut best: Option<(f64, (usize, usize))> = None;

        for y in 0..self.height {
            for x in 0..self.width {
                let idx = self.cell_index(x, y);
                if self.collapsed[idx] {
                    continue;
                }

                let entropy = self.cells[idx].len();
                if entropy == 0 {
                    return Err(GenerationError::Contradiction {
                        x: x as u32,
                        y: y as u32,
                    });
                }

                let noisy = entropy as f64 + rng.gen::<f64>() * TIE_BREAK_NOISE;
                if best.map_or(true, |(lowest, _)| noisy < lowest) {
                    best = Some((noisy, (x, y)));
                }
            }
        }

        Ok(best.map(|(_, cell)| cell))
    }

    /// Fix the cell at `(x, y)` to a single tile drawn from its possibility
    /// set, with probability proportional to each candidate's catalog weight.
    fn collapse(&mut self, x: usize, y: usize, rng: &mut impl Rng) {
        let idx = self.cell_index(x, y);

        // Candidate weights are all positive (catalog invariant) and the set
        // is non-empty (checked during selection), so total > 0.
        let total: f64 = self.cells[idx]
            .iter()
            .map(|tile| f64::from(self.catalog.weight(tile)))
            .sum();

        let mut pick = rng.gen_range(0.0..total);
        let mut chosen = None;
        for tile in self.cells[idx].iter() {
            let weight = f64::from(self.catalog.weight(tile));
            if pick < weight {
                chosen = Some(tile);
                break;
            }
            pick -= weight;
        }
        // Float rounding can exhaust the loop; fall back to the last candidate.
        let chosen = match chosen {
            Some(tile) => tile,
            None => self.cells[idx].iter().last().unwrap_or(0),
        };

        self.cells[idx].set_singleton(chosen);
        self.collapsed[idx] = true;
    }

    /// Push the consequences of a changed cell outward until no neighbor's
    /// possibility set shrinks any further.
    ///
    /// For each cell on the worklist, each in-bounds, un-collapsed neighbor is
    /// intersected with the union of allowed-neighbor sets over the cell's
    /// remaining tiles. An empty intersection fails the run; a strict shrink
    /// re-queues the neighbor.
    fn propagate(&mut self, x: usize, y: usize) -> Result<(), GenerationError> {
        let mut stack = vec![(x, y)];

        while let Some((cx, cy)) = stack.pop() {
            let current_idx = self.cell_index(cx, cy);

            for dir in Direction::ALL {
                let (dx, dy) = dir.offset();
                let nx = cx as i64 + dx;
                let ny = cy as i64 + dy;
                if nx < 0 || ny < 0 || nx >= self.width as i64 || ny >= self.height as i64 {
                    continue;
                }
                let (nx, ny) = (nx as usize, ny as usize);
                let neighbor_idx = self.cell_index(nx, ny);
                if self.collapsed[neighbor_idx] {
                    continue;
                }

                // Union of tiles the neighbor may hold, given every tile still
                // possible in the current cell.
                let mut allowed = TileBitset::empty(self.catalog.tile_count());
                for tile in self.cells[current_idx].iter() {
                    allowed.union_with(self.catalog.adjacency().allowed(tile, dir));
                }

                let before = self.cells[neighbor_idx].len();
                self.cells[neighbor_idx].intersect_with(&allowed);
                let after = self.cells[neighbor_idx].len();

                if after == 0 {
                    tracing::debug!(x = nx, y = ny, "propagation emptied a possibility set");
                    return Err(GenerationError::Contradiction {
                        x: nx as u32,
                        y: ny as u32,
                    });
                }
                if after < before {
                    stack.push((nx, ny));
                }
            }
        }

        Ok(())
    }

    /// Read off the singleton from every cell. Only called once every cell is
    /// collapsed.
    fn into_grid(self) -> MapGrid {
        let tiles = self
            .cells
            .iter()
            .map(|cell| {
                let index = cell.single().unwrap_or_else(|| {
                    unreachable!("uncollapsed cell survived to grid extraction")
                });
                self.catalog.id_of(index)
            })
            .collect();
        MapGrid::new(self.width as u32, self.height as u32, tiles)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
