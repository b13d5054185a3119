//! The fully collapsed output grid.

use serde::Serialize;

/// A fully assigned `width × height` grid of tile identifiers.
///
/// Row-major, y outer, x inner. Every value is a document tile id from the
/// catalog the grid was generated against. Only a complete grid is ever
/// surfaced — a failed run yields no partial result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MapGrid {
    width: u32,
    height: u32,
    tiles: Vec<u32>,
}

impl MapGrid {
    /// Assemble a grid from row-major tile ids. `tiles.len()` must equal
    /// `width * height`.
    pub(crate) fn new(width: u32, height: u32, tiles: Vec<u32>) -> Self {
        debug_assert_eq!(tiles.len(), width as usize * height as usize);
        Self {
            width,
            height,
            tiles,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The tile id at `(x, y)`, or `None` out of bounds.
    pub fn get(&self, x: u32, y: u32) -> Option<u32> {
        if x < self.width && y < self.height {
            Some(self.tiles[(y * self.width + x) as usize])
        } else {
            None
        }
    }

    /// The flat row-major tile ids.
    pub fn tiles(&self) -> &[u32] {
        &self.tiles
    }

    /// Iterate rows top to bottom; each row is `width` tile ids.
    pub fn rows(&self) -> impl Iterator<Item = &[u32]> {
        self.tiles.chunks(self.width.max(1) as usize)
    }

    /// Nested row-major copy, matching the debug-grid JSON dump shape.
    pub fn to_rows(&self) -> Vec<Vec<u32>> {
        self.rows().map(<[u32]>::to_vec).collect()
    }
}
