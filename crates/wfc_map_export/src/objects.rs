//! Object groups placed on top of the tile layer.

/// A named group of point or zone objects, serialized as a TMX `objectgroup`.
#[derive(Debug, Clone, Default)]
pub struct ObjectLayer {
    pub name: String,
    pub objects: Vec<MapObject>,
}

impl ObjectLayer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            objects: Vec::new(),
        }
    }
}

/// One placed object in world coordinates.
///
/// Without a radius the object is a point marker; with one it becomes a
/// circular zone (a TMX ellipse centered on `(x, y)`).
#[derive(Debug, Clone)]
pub struct MapObject {
    pub name: String,
    pub x: f64,
    pub y: f64,
    /// Circular zone radius in world units; `None` for a plain point.
    pub radius: Option<f64>,
    /// String properties attached to the object (e.g. `enemy_type`).
    pub properties: Vec<(String, String)>,
}

impl MapObject {
    /// A point marker with no properties.
    pub fn point(name: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            radius: None,
            properties: Vec::new(),
        }
    }

    /// A circular zone centered on `(x, y)`.
    pub fn zone(name: impl Into<String>, x: f64, y: f64, radius: f64) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            radius: Some(radius),
            properties: Vec::new(),
        }
    }

    /// Attach a string property.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.push((key.into(), value.into()));
        self
    }
}
