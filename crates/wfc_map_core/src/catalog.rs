//! The tile catalog: validation, identifier mapping, and the derived adjacency table.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Direction, TileBitset, TileDef, TilesetInfo};

/// Error type for catalog construction and loading failures.
///
/// Every variant is fatal to that build: a catalog is never partially
/// constructed.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog contains no tiles")]
    Empty,
    #[error("duplicate tile id {0}")]
    DuplicateId(u32),
    #[error("tile {id} has non-positive weight {weight}")]
    NonPositiveWeight { id: u32, weight: f32 },
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// On-disk catalog document: tileset geometry plus the tile definitions.
///
/// ```json
/// {
///   "tileset": { "name": "starter", "image": "tiles.png",
///                "tile_width": 128, "tile_height": 128,
///                "columns": 7, "rows": 7, "spacing": 2 },
///   "tiles": [
///     { "id": 0, "name": "grass",
///       "edges": { "north": "grass", "south": "grass",
///                  "east": "grass", "west": "grass" },
///       "weight": 4, "row": 0, "col": 0 }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogDoc {
    pub tileset: TilesetInfo,
    pub tiles: Vec<TileDef>,
}

/// Load and validate a catalog from a JSON file.
pub fn load_catalog(path: &Path) -> Result<TileCatalog, CatalogError> {
    let content = std::fs::read_to_string(path)?;
    parse_catalog(&content)
}

/// Parse and validate a catalog from a JSON string.
pub fn parse_catalog(json: &str) -> Result<TileCatalog, CatalogError> {
    let doc: CatalogDoc = serde_json::from_str(json)?;
    TileCatalog::new(doc.tileset, doc.tiles)
}

/// Parse and validate a catalog from JSON bytes.
pub fn parse_catalog_slice(bytes: &[u8]) -> Result<TileCatalog, CatalogError> {
    let doc: CatalogDoc = serde_json::from_slice(bytes)?;
    TileCatalog::new(doc.tileset, doc.tiles)
}

// ─── TileCatalog ─────────────────────────────────────────────────────────────

/// The validated, immutable tile registry.
///
/// Tile identifiers from the document may be sparse; internally every tile is
/// addressed by its *dense index* — its position in the catalog's tile order.
/// The adjacency table and the solver's possibility sets work in dense
/// indices, and [`TileCatalog::id_of`] maps back to document ids.
#[derive(Debug, Clone)]
pub struct TileCatalog {
    tileset: TilesetInfo,
    tiles: Vec<TileDef>,
    index_by_id: HashMap<u32, usize>,
    adjacency: AdjacencyTable,
}

impl TileCatalog {
    /// Validate the tile definitions and derive the adjacency table.
    ///
    /// Fails with [`CatalogError`] on an empty tile list, a duplicate id, or a
    /// non-positive weight. Pure: no randomness, no I/O.
    pub fn new(tileset: TilesetInfo, tiles: Vec<TileDef>) -> Result<Self, CatalogError> {
        if tiles.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut index_by_id = HashMap::with_capacity(tiles.len());
        for (index, tile) in tiles.iter().enumerate() {
            if index_by_id.insert(tile.id, index).is_some() {
                return Err(CatalogError::DuplicateId(tile.id));
            }
            if tile.weight <= 0.0 || tile.weight.is_nan() {
                return Err(CatalogError::NonPositiveWeight {
                    id: tile.id,
                    weight: tile.weight,
                });
            }
        }

        let adjacency = AdjacencyTable::build(&tiles);

        Ok(Self {
            tileset,
            tiles,
            index_by_id,
            adjacency,
        })
    }

    /// Number of tiles in the catalog.
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// All tile definitions, in catalog order (dense-index order).
    pub fn tiles(&self) -> &[TileDef] {
        &self.tiles
    }

    /// The tile at a dense index.
    pub fn tile(&self, index: usize) -> &TileDef {
        &self.tiles[index]
    }

    /// Dense index for a document tile id, if the id is known.
    pub fn index_of(&self, id: u32) -> Option<usize> {
        self.index_by_id.get(&id).copied()
    }

    /// Document tile id for a dense index.
    pub fn id_of(&self, index: usize) -> u32 {
        self.tiles[index].id
    }

    /// Selection weight for a dense index.
    pub fn weight(&self, index: usize) -> f32 {
        self.tiles[index].weight
    }

    pub fn tileset(&self) -> &TilesetInfo {
        &self.tileset
    }

    pub fn adjacency(&self) -> &AdjacencyTable {
        &self.adjacency
    }
}

// ─── AdjacencyTable ──────────────────────────────────────────────────────────

/// For every (tile, direction), the set of tiles that may occupy the
/// neighboring cell in that direction.
///
/// Built once from the catalog's edge labels: tile `a` allows tile `b` to its
/// `d` side iff `a.edges[d] == b.edges[opposite(d)]`. Symmetric by
/// construction, since the direction pairs north↔south and east↔west compare
/// the same two labels from both sides. Read-only after construction.
#[derive(Debug, Clone)]
pub struct AdjacencyTable {
    tile_count: usize,
    /// Indexed `tile_index * 4 + direction.index()`.
    allowed: Vec<TileBitset>,
}

impl AdjacencyTable {
    fn build(tiles: &[TileDef]) -> Self {
        let tile_count = tiles.len();
        let mut allowed = vec![TileBitset::empty(tile_count); tile_count * 4];

        for (a_idx, a) in tiles.iter().enumerate() {
            for (b_idx, b) in tiles.iter().enumerate() {
                for dir in Direction::ALL {
                    if a.can_connect(b, dir) {
                        allowed[a_idx * 4 + dir.index()].insert(b_idx);
                    }
                }
            }
        }

        Self { tile_count, allowed }
    }

    /// Number of tiles the table was built over.
    pub fn tile_count(&self) -> usize {
        self.tile_count
    }

    /// The set of dense tile indices allowed next to `tile_index` in `direction`.
    pub fn allowed(&self, tile_index: usize, direction: Direction) -> &TileBitset {
        &self.allowed[tile_index * 4 + direction.index()]
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
