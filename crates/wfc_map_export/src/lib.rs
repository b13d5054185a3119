//! Tiled TMX export for wfc_map_gen.
//!
//! Serializes a solved [`MapGrid`](wfc_map_solver::MapGrid) plus the
//! catalog's tileset geometry into an isometric `.tmx` map: one CSV-encoded
//! "Ground" tile layer and any number of object groups for placed points.
//!
//! The exporter only assumes what the solver guarantees — a rectangular,
//! fully populated grid of known tile ids. It maps each document tile id to
//! the Tiled global id space by adding the tileset's `firstgid`.

mod objects;
mod tmx;

pub use objects::{MapObject, ObjectLayer};
pub use tmx::{save_tmx, write_tmx, ExportError};
