//! The samplers: margin-aware map scatter and circular zone fill.

use rand::Rng;
use thiserror::Error;

use wfc_map_core::projection::tile_to_world;
use wfc_map_core::TilesetInfo;

/// Attempt budget multiplier for [`scatter`].
const SCATTER_ATTEMPTS_PER_POINT: usize = 50;
/// Attempt budget multiplier for [`scatter_in_zone`].
const ZONE_ATTEMPTS_PER_POINT: usize = 50;
/// Zone points stay within this fraction of the zone radius.
const ZONE_RADIUS_FRACTION: f64 = 0.8;

/// Error type for placement failures.
#[derive(Debug, Error)]
pub enum PlacementError {
    #[error("edge margin {margin} leaves no interior tiles on a {width}x{height} map")]
    MarginTooLarge { margin: u32, width: u32, height: u32 },
}

/// A placed point in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldPoint {
    pub x: f64,
    pub y: f64,
}

/// Parameters for [`scatter`].
#[derive(Debug, Clone)]
pub struct ScatterConfig {
    /// How many points to place.
    pub count: usize,
    /// Minimum pairwise distance between accepted points, in world units.
    pub min_distance: f64,
    /// Number of tiles to keep clear of every map edge. Default: 3.
    pub edge_margin: u32,
}

impl Default for ScatterConfig {
    fn default() -> Self {
        Self {
            count: 0,
            min_distance: 150.0,
            edge_margin: 3,
        }
    }
}

/// Scatter up to `config.count` points over the map interior.
///
/// Candidates are integer tile coordinates inside the edge margin, projected
/// to world space through the map's isometric convention, and rejected when
/// closer than `min_distance` to any accepted point. Sampling stops after
/// `count * 50` attempts, so the result may hold fewer points than requested.
pub fn scatter(
    map_width: u32,
    map_height: u32,
    tileset: &TilesetInfo,
    config: &ScatterConfig,
    rng: &mut impl Rng,
) -> Result<Vec<WorldPoint>, PlacementError> {
    let min_tile = config.edge_margin;
    let max_tile_x = map_width.saturating_sub(config.edge_margin + 1);
    let max_tile_y = map_height.saturating_sub(config.edge_margin + 1);

    if min_tile >= max_tile_x || min_tile >= max_tile_y {
        return Err(PlacementError::MarginTooLarge {
            margin: config.edge_margin,
            width: map_width,
            height: map_height,
        });
    }

    let mut points: Vec<WorldPoint> = Vec::with_capacity(config.count);
    let max_attempts = config.count * SCATTER_ATTEMPTS_PER_POINT;
    let mut attempts = 0;

    while points.len() < config.count && attempts < max_attempts {
        attempts += 1;

        let tile_x = rng.gen_range(min_tile..=max_tile_x);
        let tile_y = rng.gen_range(min_tile..=max_tile_y);
        let (x, y) = tile_to_world(
            f64::from(tile_x),
            f64::from(tile_y),
            map_width,
            map_height,
            tileset.tile_width,
            tileset.tile_height,
        );

        let candidate = WorldPoint { x, y };
        if points
            .iter()
            .all(|p| distance(*p, candidate) >= config.min_distance)
        {
            points.push(candidate);
        }
    }

    Ok(points)
}

/// Fill a circular zone with up to `count` points spaced at least
/// `min_spacing` apart.
///
/// Points are drawn in polar coordinates and kept within 80% of the zone
/// radius so they read as "inside" the zone. Bounded to `count * 50`
/// attempts.
pub fn scatter_in_zone(
    center: WorldPoint,
    radius: f64,
    count: usize,
    min_spacing: f64,
    rng: &mut impl Rng,
) -> Vec<WorldPoint> {
    if count == 0 || radius <= 0.0 {
        return Vec::new();
    }

    let mut points: Vec<WorldPoint> = Vec::with_capacity(count);
    let max_attempts = count * ZONE_ATTEMPTS_PER_POINT;
    let mut attempts = 0;

    while points.len() < count && attempts < max_attempts {
        attempts += 1;

        let angle = rng.gen_range(0.0..std::f64::consts::TAU);
        let dist = rng.gen_range(0.0..radius * ZONE_RADIUS_FRACTION);
        let candidate = WorldPoint {
            x: center.x + dist * angle.cos(),
            y: center.y + dist * angle.sin(),
        };

        if points
            .iter()
            .all(|p| distance(*p, candidate) >= min_spacing)
        {
            points.push(candidate);
        }
    }

    points
}

/// Expand exact per-kind counts into a shuffled assignment list.
///
/// `kinds` pairs a kind name with how many of that kind to place; the result
/// has one entry per point, in random order, e.g. for tagging scattered
/// spawn points with enemy types.
pub fn assign_kinds<'a>(kinds: &[(&'a str, usize)], rng: &mut impl Rng) -> Vec<&'a str> {
    use rand::seq::SliceRandom;

    let mut assigned: Vec<&str> = kinds
        .iter()
        .flat_map(|&(name, count)| std::iter::repeat(name).take(count))
        .collect();
    assigned.shuffle(rng);
    assigned
}

fn distance(a: WorldPoint, b: WorldPoint) -> f64 {
    ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn tileset() -> TilesetInfo {
        TilesetInfo {
            name: "t".to_string(),
            image: "t.png".to_string(),
            tile_width: 128,
            tile_height: 128,
            columns: 7,
            rows: 7,
            spacing: 0,
            firstgid: 1,
        }
    }

    fn seeded() -> SmallRng {
        SmallRng::seed_from_u64(0)
    }

    #[test]
    fn scatter_respects_min_distance() {
        let config = ScatterConfig {
            count: 12,
            min_distance: 150.0,
            edge_margin: 3,
        };
        let points = scatter(30, 30, &tileset(), &config, &mut seeded()).unwrap();

        assert!(!points.is_empty());
        for (i, a) in points.iter().enumerate() {
            for b in &points[i + 1..] {
                assert!(distance(*a, *b) >= 150.0);
            }
        }
    }

    #[test]
    fn scatter_stays_inside_the_margin() {
        // Margin 3 on a 20x20 map: valid tiles are 3..=16. The outermost
        // world positions those can produce bound the accepted points.
        let config = ScatterConfig {
            count: 20,
            min_distance: 10.0,
            edge_margin: 3,
        };
        let ts = tileset();
        let points = scatter(20, 20, &ts, &config, &mut seeded()).unwrap();

        // Corner tiles of the valid region give the extreme world coords.
        let (min_x, _) = wfc_map_core::projection::tile_to_world(3.0, 16.0, 20, 20, 128, 128);
        let (max_x, _) = wfc_map_core::projection::tile_to_world(16.0, 3.0, 20, 20, 128, 128);
        let (_, min_y) = wfc_map_core::projection::tile_to_world(3.0, 3.0, 20, 20, 128, 128);
        let (_, max_y) = wfc_map_core::projection::tile_to_world(16.0, 16.0, 20, 20, 128, 128);

        for p in &points {
            assert!(p.x >= min_x && p.x <= max_x, "x out of range: {}", p.x);
            assert!(p.y >= min_y && p.y <= max_y, "y out of range: {}", p.y);
        }
    }

    #[test]
    fn scatter_returns_fewer_points_when_spacing_is_tight() {
        // A minimum distance far larger than the map can hold.
        let config = ScatterConfig {
            count: 50,
            min_distance: 1.0e6,
            edge_margin: 3,
        };
        let points = scatter(20, 20, &tileset(), &config, &mut seeded()).unwrap();
        assert_eq!(points.len(), 1);
    }

    #[test]
    fn oversized_margin_is_rejected() {
        let config = ScatterConfig {
            count: 3,
            min_distance: 10.0,
            edge_margin: 10,
        };
        let err = scatter(20, 20, &tileset(), &config, &mut seeded()).unwrap_err();
        assert!(matches!(err, PlacementError::MarginTooLarge { margin: 10, .. }));
    }

    #[test]
    fn zone_points_stay_within_the_working_radius() {
        let center = WorldPoint { x: 100.0, y: -50.0 };
        let points = scatter_in_zone(center, 100.0, 5, 30.0, &mut seeded());

        assert!(!points.is_empty());
        for p in &points {
            assert!(distance(*p, center) <= 80.0 + 1e-9);
        }
        for (i, a) in points.iter().enumerate() {
            for b in &points[i + 1..] {
                assert!(distance(*a, *b) >= 30.0);
            }
        }
    }

    #[test]
    fn assign_kinds_preserves_exact_counts() {
        let kinds = [("slime", 10), ("goblin", 6), ("skeleton", 3)];
        let assigned = assign_kinds(&kinds, &mut seeded());

        assert_eq!(assigned.len(), 19);
        assert_eq!(assigned.iter().filter(|&&k| k == "slime").count(), 10);
        assert_eq!(assigned.iter().filter(|&&k| k == "goblin").count(), 6);
        assert_eq!(assigned.iter().filter(|&&k| k == "skeleton").count(), 3);
    }

    #[test]
    fn assign_kinds_is_deterministic_per_seed() {
        let kinds = [("a", 5), ("b", 5)];
        let first = assign_kinds(&kinds, &mut SmallRng::seed_from_u64(7));
        let second = assign_kinds(&kinds, &mut SmallRng::seed_from_u64(7));
        assert_eq!(first, second);
    }
}
