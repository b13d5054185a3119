//! Tile definitions as they appear in the catalog document.

use serde::{Deserialize, Serialize};

use crate::Direction;

/// The four edge-compatibility labels of a tile.
///
/// Labels are opaque strings; two tiles may sit next to each other exactly
/// when the label on the shared edge matches under string equality. All four
/// labels are required — a catalog document missing one fails to parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeLabels {
    pub north: String,
    pub south: String,
    pub east: String,
    pub west: String,
}

impl EdgeLabels {
    /// All four edges set to the same label.
    pub fn uniform(label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            north: label.clone(),
            south: label.clone(),
            east: label.clone(),
            west: label,
        }
    }

    /// The label on the edge facing `direction`.
    pub fn label(&self, direction: Direction) -> &str {
        match direction {
            Direction::North => &self.north,
            Direction::South => &self.south,
            Direction::East => &self.east,
            Direction::West => &self.west,
        }
    }
}

/// One tile definition from the catalog document.
///
/// Immutable once the catalog is built. The `row`/`col` atlas position is
/// consumed by the exporter for asset lookup; the solver never reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileDef {
    /// Unique identifier. May be sparse — no ordering is assumed.
    pub id: u32,
    /// Display name. Opaque to the solver.
    pub name: String,
    /// Edge-compatibility labels for the four cardinal directions.
    pub edges: EdgeLabels,
    /// Selection weight for weighted random collapse. Must be positive. Default: 1.
    #[serde(default = "default_weight")]
    pub weight: f32,
    /// Atlas row hint for the exporter.
    #[serde(default)]
    pub row: u32,
    /// Atlas column hint for the exporter.
    #[serde(default)]
    pub col: u32,
}

fn default_weight() -> f32 {
    1.0
}

impl TileDef {
    /// Create a tile with uniform edge labels and weight 1. Handy in tests
    /// and for simple catalogs.
    pub fn uniform(id: u32, name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            edges: EdgeLabels::uniform(label),
            weight: 1.0,
            row: 0,
            col: 0,
        }
    }

    /// `true` if this tile may sit with `other` on its `direction` side.
    pub fn can_connect(&self, other: &TileDef, direction: Direction) -> bool {
        self.edges.label(direction) == other.edges.label(direction.opposite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_labels_connect_in_every_direction() {
        let a = TileDef::uniform(0, "grass_a", "grass");
        let b = TileDef::uniform(1, "grass_b", "grass");
        for dir in Direction::ALL {
            assert!(a.can_connect(&b, dir));
            assert!(a.can_connect(&a, dir));
        }
    }

    #[test]
    fn mismatched_labels_never_connect() {
        let grass = TileDef::uniform(0, "grass", "grass");
        let water = TileDef::uniform(1, "water", "water");
        for dir in Direction::ALL {
            assert!(!grass.can_connect(&water, dir));
        }
    }

    #[test]
    fn asymmetric_edges_use_the_opposite_edge_of_the_other_tile() {
        // `coast` has water on its east edge only; `sea` is all water.
        let coast = TileDef {
            id: 0,
            name: "coast".to_string(),
            edges: EdgeLabels {
                north: "grass".to_string(),
                south: "grass".to_string(),
                east: "water".to_string(),
                west: "grass".to_string(),
            },
            weight: 1.0,
            row: 0,
            col: 0,
        };
        let sea = TileDef::uniform(1, "sea", "water");

        // coast east edge (water) vs sea west edge (water) → connects.
        assert!(coast.can_connect(&sea, Direction::East));
        // coast west edge (grass) vs sea east edge (water) → does not.
        assert!(!coast.can_connect(&sea, Direction::West));
    }

    #[test]
    fn weight_defaults_to_one_when_absent() {
        let json = r#"{
            "id": 3,
            "name": "dirt",
            "edges": { "north": "d", "south": "d", "east": "d", "west": "d" }
        }"#;
        let tile: TileDef = serde_json::from_str(json).unwrap();
        assert_eq!(tile.weight, 1.0);
        assert_eq!(tile.row, 0);
        assert_eq!(tile.col, 0);
    }

    #[test]
    fn missing_edge_label_fails_to_parse() {
        let json = r#"{
            "id": 3,
            "name": "dirt",
            "edges": { "north": "d", "south": "d", "east": "d" }
        }"#;
        assert!(serde_json::from_str::<TileDef>(json).is_err());
    }
}
