//! Rejection-sampling point placement over a finished map.
//!
//! Operates purely in world-space geometry — the raw tile grid is not
//! consulted, only the map's tile-to-world projection. Two samplers:
//!
//! - [`scatter`] picks well-separated points on integer tile centers inside an
//!   edge margin (spawn points, objective sites).
//! - [`scatter_in_zone`] fills a circular zone with spaced points (enemies
//!   guarding an outpost).
//!
//! Both are bounded rejection samplers: they stop after a fixed attempt
//! budget and return however many points they accepted, which may be fewer
//! than requested when the spacing constraint is tight.

mod scatter;

pub use scatter::{
    assign_kinds, scatter, scatter_in_zone, PlacementError, ScatterConfig, WorldPoint,
};
