//! Tile-to-world coordinate projection for isometric maps.
//!
//! The axonometric convention shared by the exporter and point placement:
//!
//! ```text
//! world_x = (tile_x - tile_y) * tile_width / 2
//! world_y = (tile_x + tile_y) * tile_height / 4
//! ```
//!
//! recentered so the map's own center lands on the world origin.

/// Project a tile coordinate into world space, centered on the map.
///
/// `map_width`/`map_height` are in tiles, `tile_width`/`tile_height` in
/// pixels. Accepts fractional tile coordinates so callers can address tile
/// centers or corners.
pub fn tile_to_world(
    tile_x: f64,
    tile_y: f64,
    map_width: u32,
    map_height: u32,
    tile_width: u32,
    tile_height: u32,
) -> (f64, f64) {
    let (world_x, world_y) = project(tile_x, tile_y, tile_width, tile_height);

    let center_tile_x = f64::from(map_width.saturating_sub(1)) / 2.0;
    let center_tile_y = f64::from(map_height.saturating_sub(1)) / 2.0;
    let (center_x, center_y) = project(center_tile_x, center_tile_y, tile_width, tile_height);

    (world_x - center_x, world_y - center_y)
}

fn project(tile_x: f64, tile_y: f64, tile_width: u32, tile_height: u32) -> (f64, f64) {
    let world_x = (tile_x - tile_y) * f64::from(tile_width) / 2.0;
    let world_y = (tile_x + tile_y) * f64::from(tile_height) / 4.0;
    (world_x, world_y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_center_projects_to_origin() {
        // 21x21 map: the center tile is (10, 10).
        let (x, y) = tile_to_world(10.0, 10.0, 21, 21, 128, 128);
        assert_eq!((x, y), (0.0, 0.0));
    }

    #[test]
    fn diagonal_neighbors_share_world_x() {
        // Moving +1 in both tile axes keeps world_x and advances world_y by th/2.
        let (x0, y0) = tile_to_world(4.0, 4.0, 20, 20, 128, 128);
        let (x1, y1) = tile_to_world(5.0, 5.0, 20, 20, 128, 128);
        assert_eq!(x0, x1);
        assert_eq!(y1 - y0, 64.0);
    }

    #[test]
    fn east_step_moves_half_tile_right_and_quarter_down() {
        let (x0, y0) = tile_to_world(3.0, 7.0, 20, 20, 128, 128);
        let (x1, y1) = tile_to_world(4.0, 7.0, 20, 20, 128, 128);
        assert_eq!(x1 - x0, 64.0);
        assert_eq!(y1 - y0, 32.0);
    }
}
