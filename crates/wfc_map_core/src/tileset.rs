//! Tileset atlas geometry.

use serde::{Deserialize, Serialize};

/// Atlas geometry and identity for the tileset image backing a catalog.
///
/// The solver never reads this; it exists for the exporter, which needs pixel
/// tile sizes, the sheet column count, and spacing to describe the tileset in
/// the output map file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TilesetInfo {
    pub name: String,
    /// Path to the atlas image, relative to the output map file.
    pub image: String,
    /// Tile width in pixels.
    pub tile_width: u32,
    /// Tile height in pixels.
    pub tile_height: u32,
    /// Number of tile columns in the atlas image.
    pub columns: u32,
    /// Number of tile rows in the atlas image.
    pub rows: u32,
    /// Pixel gap between adjacent tiles in the atlas. Default: 0.
    #[serde(default)]
    pub spacing: u32,
    /// First global tile id in the exported map. Default: 1.
    #[serde(default = "default_firstgid")]
    pub firstgid: u32,
}

fn default_firstgid() -> u32 {
    1
}

impl TilesetInfo {
    /// Total number of tiles in the atlas.
    pub fn tile_count(&self) -> u32 {
        self.columns * self.rows
    }

    /// Pixel width of the atlas image, accounting for inter-tile spacing.
    pub fn image_width(&self) -> u32 {
        self.tile_width * self.columns + self.spacing * self.columns.saturating_sub(1)
    }

    /// Pixel height of the atlas image, accounting for inter-tile spacing.
    pub fn image_height(&self) -> u32 {
        self.tile_height * self.rows + self.spacing * self.rows.saturating_sub(1)
    }
}
