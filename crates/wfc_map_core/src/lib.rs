//! Core data structures for wfc_map_gen
//!
//! This crate provides the fundamental types for procedural tile map generation:
//! - `TileDef` - A tile definition with directional edge labels and a selection weight
//! - `TilesetInfo` - Atlas geometry for the tileset image (tile size, columns, spacing)
//! - `TileCatalog` - The validated, immutable tile registry with a derived adjacency table
//! - `AdjacencyTable` - Which tiles may legally neighbor which, per direction
//! - `TileBitset` - A fixed-capacity set of dense tile indices
//!
//! The catalog is a pure function of its tile definitions: no randomness, no I/O.
//! Once built it is read-only and may be shared across any number of generation runs.

mod bitset;
mod catalog;
mod direction;
pub mod projection;
mod tile;
mod tileset;

pub use bitset::TileBitset;
pub use catalog::{
    load_catalog, parse_catalog, parse_catalog_slice, AdjacencyTable, CatalogDoc, CatalogError,
    TileCatalog,
};
pub use direction::Direction;
pub use tile::{EdgeLabels, TileDef};
pub use tileset::TilesetInfo;
