//! Wave-function-collapse grid solver for wfc_map_gen.
//!
//! The primary entry point is [`generate`], which consumes a read-only
//! [`TileCatalog`](wfc_map_core::TileCatalog) and produces a fully assigned
//! [`MapGrid`] — or a [`GenerationError`] naming why and where the run failed.
//!
//! One run is single-threaded, synchronous, and owns its grid exclusively.
//! The catalog is never mutated and may be shared across sequential or
//! concurrent runs.

mod grid;
mod solve;

pub use grid::MapGrid;
pub use solve::{generate, GenerationError};

/// Per-cell budget for the main collapse loop: a run over a `w × h` grid is
/// capped at `w * h * MAX_ITERATIONS_PER_CELL` iterations.
///
/// Each iteration collapses exactly one cell and cells never un-collapse, so
/// a healthy run finishes in `w * h` iterations. The cap is a safety valve
/// against a misconfigured catalog; hitting it yields
/// [`GenerationError::IterationLimitExceeded`].
pub const MAX_ITERATIONS_PER_CELL: usize = 100;

/// Magnitude of the entropy tie-break noise.
///
/// Strictly below 1 so perturbation can never reorder two cells whose integer
/// entropies differ — it only breaks ties among equally constrained cells.
pub const TIE_BREAK_NOISE: f64 = 0.1;
