//! wfc_map_gen - Map generation pipeline
//!
//! Library surface of the `wfc-map-tools` binary: loads a tile catalog,
//! runs the grid solver, scatters optional spawn/objective points, and
//! writes the result as a Tiled TMX map.

pub mod pipeline;
