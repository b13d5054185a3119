//! The TMX document writer.

use std::io::Write;
use std::path::Path;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use thiserror::Error;

use wfc_map_core::TileCatalog;
use wfc_map_solver::MapGrid;

use crate::{MapObject, ObjectLayer};

/// Error type for export failures.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write TMX output: {0}")]
    Io(#[from] std::io::Error),
}

/// Serialize `grid` and `object_layers` as a TMX document to `path`.
pub fn save_tmx(
    grid: &MapGrid,
    catalog: &TileCatalog,
    object_layers: &[ObjectLayer],
    path: &Path,
) -> Result<(), ExportError> {
    let file = std::fs::File::create(path)?;
    write_tmx(grid, catalog, object_layers, std::io::BufWriter::new(file))
}

/// Serialize `grid` and `object_layers` as a TMX document to `out`.
///
/// The map is isometric, right-down render order, with a single CSV-encoded
/// "Ground" tile layer. Tile values are `document id + firstgid` per the TMX
/// global-id convention. Object groups follow the tile layer in order.
pub fn write_tmx(
    grid: &MapGrid,
    catalog: &TileCatalog,
    object_layers: &[ObjectLayer],
    out: impl Write,
) -> Result<(), ExportError> {
    let tileset = catalog.tileset();
    let mut writer = Writer::new_with_indent(out, b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let object_count: usize = object_layers.iter().map(|l| l.objects.len()).sum();

    let mut map = BytesStart::new("map");
    map.push_attribute(("version", "1.10"));
    map.push_attribute(("tiledversion", "1.10.2"));
    map.push_attribute(("orientation", "isometric"));
    map.push_attribute(("renderorder", "right-down"));
    map.push_attribute(("width", grid.width().to_string().as_str()));
    map.push_attribute(("height", grid.height().to_string().as_str()));
    map.push_attribute(("tilewidth", tileset.tile_width.to_string().as_str()));
    map.push_attribute(("tileheight", tileset.tile_height.to_string().as_str()));
    map.push_attribute(("infinite", "0"));
    map.push_attribute((
        "nextlayerid",
        (2 + object_layers.len()).to_string().as_str(),
    ));
    map.push_attribute(("nextobjectid", (object_count + 1).to_string().as_str()));
    writer.write_event(Event::Start(map))?;

    write_tileset(&mut writer, catalog)?;
    write_ground_layer(&mut writer, grid, catalog)?;

    let mut next_object_id = 1usize;
    for (layer_idx, layer) in object_layers.iter().enumerate() {
        write_object_layer(&mut writer, layer, 2 + layer_idx, &mut next_object_id)?;
    }

    writer.write_event(Event::End(BytesEnd::new("map")))?;
    Ok(())
}

fn write_tileset<W: Write>(
    writer: &mut Writer<W>,
    catalog: &TileCatalog,
) -> Result<(), ExportError> {
    let tileset = catalog.tileset();

    let mut elem = BytesStart::new("tileset");
    elem.push_attribute(("firstgid", tileset.firstgid.to_string().as_str()));
    elem.push_attribute(("name", tileset.name.as_str()));
    elem.push_attribute(("tilewidth", tileset.tile_width.to_string().as_str()));
    elem.push_attribute(("tileheight", tileset.tile_height.to_string().as_str()));
    elem.push_attribute(("tilecount", tileset.tile_count().to_string().as_str()));
    elem.push_attribute(("columns", tileset.columns.to_string().as_str()));
    if tileset.spacing > 0 {
        elem.push_attribute(("spacing", tileset.spacing.to_string().as_str()));
    }
    writer.write_event(Event::Start(elem))?;

    let mut image = BytesStart::new("image");
    image.push_attribute(("source", tileset.image.as_str()));
    image.push_attribute(("width", tileset.image_width().to_string().as_str()));
    image.push_attribute(("height", tileset.image_height().to_string().as_str()));
    writer.write_event(Event::Empty(image))?;

    writer.write_event(Event::End(BytesEnd::new("tileset")))?;
    Ok(())
}

fn write_ground_layer<W: Write>(
    writer: &mut Writer<W>,
    grid: &MapGrid,
    catalog: &TileCatalog,
) -> Result<(), ExportError> {
    let firstgid = catalog.tileset().firstgid;

    let mut layer = BytesStart::new("layer");
    layer.push_attribute(("id", "1"));
    layer.push_attribute(("name", "Ground"));
    layer.push_attribute(("width", grid.width().to_string().as_str()));
    layer.push_attribute(("height", grid.height().to_string().as_str()));
    writer.write_event(Event::Start(layer))?;

    let mut data = BytesStart::new("data");
    data.push_attribute(("encoding", "csv"));
    writer.write_event(Event::Start(data))?;

    writer.write_event(Event::Text(BytesText::new(&csv_data(grid, firstgid))))?;

    writer.write_event(Event::End(BytesEnd::new("data")))?;
    writer.write_event(Event::End(BytesEnd::new("layer")))?;
    Ok(())
}

/// CSV payload of the tile layer: one line per row, global ids.
fn csv_data(grid: &MapGrid, firstgid: u32) -> String {
    let lines: Vec<String> = grid
        .rows()
        .map(|row| {
            row.iter()
                .map(|&id| (id + firstgid).to_string())
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect();
    format!("\n{}\n", lines.join(",\n"))
}

fn write_object_layer<W: Write>(
    writer: &mut Writer<W>,
    layer: &ObjectLayer,
    layer_id: usize,
    next_object_id: &mut usize,
) -> Result<(), ExportError> {
    let mut group = BytesStart::new("objectgroup");
    group.push_attribute(("id", layer_id.to_string().as_str()));
    group.push_attribute(("name", layer.name.as_str()));
    writer.write_event(Event::Start(group))?;

    for object in &layer.objects {
        write_object(writer, object, *next_object_id)?;
        *next_object_id += 1;
    }

    writer.write_event(Event::End(BytesEnd::new("objectgroup")))?;
    Ok(())
}

fn write_object<W: Write>(
    writer: &mut Writer<W>,
    object: &MapObject,
    object_id: usize,
) -> Result<(), ExportError> {
    let mut elem = BytesStart::new("object");
    elem.push_attribute(("id", object_id.to_string().as_str()));
    elem.push_attribute(("name", object.name.as_str()));

    // Ellipse zones are positioned by their bounding-box corner in TMX;
    // points by the point itself.
    match object.radius {
        Some(radius) => {
            elem.push_attribute(("x", (object.x - radius).to_string().as_str()));
            elem.push_attribute(("y", (object.y - radius).to_string().as_str()));
            elem.push_attribute(("width", (radius * 2.0).to_string().as_str()));
            elem.push_attribute(("height", (radius * 2.0).to_string().as_str()));
        }
        None => {
            elem.push_attribute(("x", object.x.to_string().as_str()));
            elem.push_attribute(("y", object.y.to_string().as_str()));
        }
    }

    writer.write_event(Event::Start(elem))?;

    if object.radius.is_some() {
        writer.write_event(Event::Empty(BytesStart::new("ellipse")))?;
    } else {
        writer.write_event(Event::Empty(BytesStart::new("point")))?;
    }

    if !object.properties.is_empty() {
        writer.write_event(Event::Start(BytesStart::new("properties")))?;
        for (key, value) in &object.properties {
            let mut prop = BytesStart::new("property");
            prop.push_attribute(("name", key.as_str()));
            prop.push_attribute(("type", "string"));
            prop.push_attribute(("value", value.as_str()));
            writer.write_event(Event::Empty(prop))?;
        }
        writer.write_event(Event::End(BytesEnd::new("properties")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("object")))?;
    Ok(())
}

// ─── Tests ───────────────────────────────────────────────────────────────────
