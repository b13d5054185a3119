//! The generate → place → export pipeline.

use std::path::PathBuf;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use thiserror::Error;

use wfc_map_core::{load_catalog, CatalogError, TileCatalog};
use wfc_map_export::{save_tmx, ExportError, MapObject, ObjectLayer};
use wfc_map_placement::{
    assign_kinds, scatter, scatter_in_zone, PlacementError, ScatterConfig, WorldPoint,
};
use wfc_map_solver::{generate, GenerationError, MapGrid};

/// Error type for a pipeline run. Every stage's failure is terminal for the
/// run; the binary reports it and exits non-zero so callers can retry with a
/// different seed or parameters.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error(transparent)]
    Placement(#[from] PlacementError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error("failed to write grid dump: {0}")]
    GridDump(#[from] std::io::Error),
    #[error("failed to encode grid dump: {0}")]
    GridEncode(#[from] serde_json::Error),
}

/// One full map-generation request.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// Path to the tile catalog JSON document.
    pub tiles: PathBuf,
    /// Map width in tiles.
    pub width: u32,
    /// Map height in tiles.
    pub height: u32,
    /// Seed for the solver and the placement samplers. `None` draws from OS
    /// entropy; a fixed value makes the whole pipeline reproducible.
    pub seed: Option<u64>,
    /// Output `.tmx` path.
    pub output: PathBuf,
    /// Also dump the raw grid as JSON next to the output (`_grid.json`).
    pub save_grid: bool,
    /// Enemy spawn kinds and counts for the `EnemySpawns` object layer.
    pub spawns: Vec<(String, usize)>,
    /// Minimum world-space distance between spawn points.
    pub spawn_min_distance: f64,
    /// Number of outpost objectives for the `Objectives` object layer.
    pub outposts: usize,
    /// Outpost zone radius in world units.
    pub outpost_radius: f64,
    /// Guards scattered inside each outpost zone.
    pub outpost_guards: usize,
    /// Tiles kept clear of the map edge when placing points.
    pub edge_margin: u32,
}

/// Run the full pipeline for `request`. Returns the solved grid so callers
/// (and tests) can inspect what was exported.
pub fn run_generate(request: &GenerateRequest) -> Result<MapGrid, PipelineError> {
    let catalog = load_catalog(&request.tiles)?;
    tracing::info!(
        tiles = catalog.tile_count(),
        width = request.width,
        height = request.height,
        seed = ?request.seed,
        "generating map"
    );

    let grid = generate(&catalog, request.width, request.height, request.seed)?;

    if request.save_grid {
        let grid_path = grid_dump_path(&request.output);
        let file = std::fs::File::create(&grid_path)?;
        serde_json::to_writer_pretty(file, &grid.to_rows())?;
        tracing::info!(path = %grid_path.display(), "wrote grid dump");
    }

    let object_layers = place_objects(&catalog, &grid, request)?;
    save_tmx(&grid, &catalog, &object_layers, &request.output)?;
    tracing::info!(path = %request.output.display(), "wrote TMX map");

    Ok(grid)
}

/// Scatter spawn and objective points, mirroring the solver's seed contract:
/// the placement RNG is seeded independently of the solver's so adding
/// placement options never perturbs the generated terrain.
fn place_objects(
    catalog: &TileCatalog,
    grid: &MapGrid,
    request: &GenerateRequest,
) -> Result<Vec<ObjectLayer>, PipelineError> {
    let mut layers = Vec::new();
    let total_spawns: usize = request.spawns.iter().map(|(_, n)| n).sum();
    if total_spawns == 0 && request.outposts == 0 {
        return Ok(layers);
    }

    let mut rng = match request.seed {
        Some(seed) => SmallRng::seed_from_u64(seed ^ 0x9e37_79b9_7f4a_7c15),
        None => SmallRng::from_entropy(),
    };

    let mut spawn_layer = ObjectLayer::new("EnemySpawns");

    if total_spawns > 0 {
        let config = ScatterConfig {
            count: total_spawns,
            min_distance: request.spawn_min_distance,
            edge_margin: request.edge_margin,
        };
        let points = scatter(grid.width(), grid.height(), catalog.tileset(), &config, &mut rng)?;
        if points.len() < total_spawns {
            tracing::warn!(
                requested = total_spawns,
                placed = points.len(),
                "spawn spacing too tight; placed fewer points than requested"
            );
        }

        let kind_counts: Vec<(&str, usize)> = request
            .spawns
            .iter()
            .map(|(name, count)| (name.as_str(), *count))
            .collect();
        let kinds = assign_kinds(&kind_counts, &mut rng);

        for (idx, (point, kind)) in points.iter().zip(kinds).enumerate() {
            spawn_layer.objects.push(
                MapObject::point(format!("Spawn_{kind}_{:02}", idx + 1), point.x, point.y)
                    .with_property("enemy_type", kind),
            );
        }
    }

    if request.outposts > 0 {
        let config = ScatterConfig {
            count: request.outposts,
            min_distance: request.outpost_radius * 2.0,
            edge_margin: request.edge_margin,
        };
        let sites = scatter(grid.width(), grid.height(), catalog.tileset(), &config, &mut rng)?;

        let mut objective_layer = ObjectLayer::new("Objectives");
        for (idx, site) in sites.iter().enumerate() {
            objective_layer.objects.push(
                MapObject::zone(format!("Outpost_{:02}", idx + 1), site.x, site.y, request.outpost_radius)
                    .with_property("objective_type", "capture_outpost"),
            );

            let guards = scatter_in_zone(
                WorldPoint { x: site.x, y: site.y },
                request.outpost_radius,
                request.outpost_guards,
                30.0,
                &mut rng,
            );
            for (guard_idx, guard) in guards.iter().enumerate() {
                spawn_layer.objects.push(
                    MapObject::point(
                        format!("Guard_{:02}_{:02}", idx + 1, guard_idx + 1),
                        guard.x,
                        guard.y,
                    )
                    .with_property("enemy_type", "goblin"),
                );
            }
        }
        layers.push(objective_layer);
    }

    if !spawn_layer.objects.is_empty() {
        // Spawns render before objectives in the editor's layer list.
        layers.insert(0, spawn_layer);
    }

    Ok(layers)
}

/// `foo.tmx` → `foo.grid.json`.
fn grid_dump_path(output: &std::path::Path) -> PathBuf {
    output.with_extension("").with_extension("grid.json")
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG_JSON: &str = r#"{
        "tileset": {
            "name": "starter", "image": "tiles.png",
            "tile_width": 128, "tile_height": 128,
            "columns": 7, "rows": 7
        },
        "tiles": [
            { "id": 0, "name": "grass",
              "edges": { "north": "g", "south": "g", "east": "g", "west": "g" },
              "weight": 4 },
            { "id": 1, "name": "flowers",
              "edges": { "north": "g", "south": "g", "east": "g", "west": "g" } }
        ]
    }"#;

    fn request(dir: &std::path::Path) -> GenerateRequest {
        let tiles = dir.join("tiles.json");
        std::fs::write(&tiles, CATALOG_JSON).unwrap();
        GenerateRequest {
            tiles,
            width: 12,
            height: 12,
            seed: Some(42),
            output: dir.join("map.tmx"),
            save_grid: false,
            spawns: Vec::new(),
            spawn_min_distance: 150.0,
            outposts: 0,
            outpost_radius: 100.0,
            outpost_guards: 3,
            edge_margin: 3,
        }
    }

    #[test]
    fn pipeline_writes_a_map() {
        let dir = tempfile::tempdir().unwrap();
        let req = request(dir.path());

        let grid = run_generate(&req).unwrap();
        assert_eq!(grid.tiles().len(), 144);

        let xml = std::fs::read_to_string(&req.output).unwrap();
        assert!(xml.contains(r#"orientation="isometric""#));
        assert!(xml.contains(r#"name="Ground""#));
    }

    #[test]
    fn pipeline_is_deterministic_for_a_seed() {
        let dir = tempfile::tempdir().unwrap();
        let req = request(dir.path());

        let first = run_generate(&req).unwrap();
        let second = run_generate(&req).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn save_grid_dumps_row_major_json() {
        let dir = tempfile::tempdir().unwrap();
        let mut req = request(dir.path());
        req.save_grid = true;

        let grid = run_generate(&req).unwrap();

        let dump = std::fs::read_to_string(dir.path().join("map.grid.json")).unwrap();
        let rows: Vec<Vec<u32>> = serde_json::from_str(&dump).unwrap();
        assert_eq!(rows, grid.to_rows());
    }

    #[test]
    fn spawns_and_outposts_land_in_object_layers() {
        let dir = tempfile::tempdir().unwrap();
        let mut req = request(dir.path());
        req.width = 30;
        req.height = 30;
        req.spawns = vec![("slime".to_string(), 4), ("goblin".to_string(), 2)];
        req.outposts = 1;
        req.outpost_guards = 2;

        run_generate(&req).unwrap();

        let xml = std::fs::read_to_string(&req.output).unwrap();
        assert!(xml.contains(r#"name="EnemySpawns""#));
        assert!(xml.contains(r#"name="Objectives""#));
        assert!(xml.contains(r#"value="slime""#));
        assert!(xml.contains("Outpost_01"));
        assert!(xml.contains("Guard_01_01"));
    }

    #[test]
    fn missing_catalog_is_a_catalog_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut req = request(dir.path());
        req.tiles = dir.path().join("nope.json");

        let err = run_generate(&req).unwrap_err();
        assert!(matches!(err, PipelineError::Catalog(_)));
    }
}
