//! Web Mercator math for drawing a raster tile map around one point.

mod tiles;

pub use tiles::{OsmTileSource, TileError, TileLoader, TileSource, TileUpdate};

use std::collections::HashSet;
use std::f64::consts::PI;

/// Edge length of one raster tile in pixels.
pub const TILE_SIZE: f64 = 256.0;
/// Web Mercator cannot represent the poles; latitudes are clamped to this.
pub const MAX_MERCATOR_LATITUDE: f64 = 85.051_128_78;

/// Address of one raster tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId {
    pub zoom: u8,
    pub x: u32,
    pub y: u32,
}

/// Global pixel position at a given zoom.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldPoint {
    pub x: f64,
    pub y: f64,
}

/// Tile to draw and its top-left corner relative to the viewport's top-left.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacedTile {
    pub id: TileId,
    pub offset_x: f64,
    pub offset_y: f64,
}

fn world_size(zoom: u8) -> f64 {
    TILE_SIZE * f64::from(1u32 << zoom.min(30))
}

/// Project latitude/longitude to global pixels at `zoom`.
pub fn project(latitude: f64, longitude: f64, zoom: u8) -> WorldPoint {
    let size = world_size(zoom);
    let lat = latitude.clamp(-MAX_MERCATOR_LATITUDE, MAX_MERCATOR_LATITUDE);
    let sin = (lat * PI / 180.0).sin();
    let x = (longitude + 180.0) / 360.0 * size;
    let y = (0.5 - ((1.0 + sin) / (1.0 - sin)).ln() / (4.0 * PI)) * size;
    WorldPoint { x, y }
}

/// Tiles covering a `width` x `height` viewport whose center sits at `center`.
///
/// Columns wrap around the antimeridian; rows past the poles are skipped.
pub fn visible_tiles(center: WorldPoint, width: f64, height: f64, zoom: u8) -> Vec<PlacedTile> {
    let tiles_per_side = 1i64 << zoom.min(30);
    let left = center.x - width / 2.0;
    let top = center.y - height / 2.0;
    let first_col = (left / TILE_SIZE).floor() as i64;
    let last_col = ((left + width) / TILE_SIZE).ceil() as i64;
    let first_row = (top / TILE_SIZE).floor() as i64;
    let last_row = ((top + height) / TILE_SIZE).ceil() as i64;

    let mut placed = Vec::new();
    for row in first_row..last_row {
        if row < 0 || row >= tiles_per_side {
            continue;
        }
        for col in first_col..last_col {
            let wrapped = col.rem_euclid(tiles_per_side);
            placed.push(PlacedTile {
                id: TileId {
                    zoom,
                    x: wrapped as u32,
                    y: row as u32,
                },
                offset_x: col as f64 * TILE_SIZE - left,
                offset_y: row as f64 * TILE_SIZE - top,
            });
        }
    }
    placed
}

/// Tiles worth keeping cached: the viewport plus one tile on every side.
pub fn retained_tiles(center: WorldPoint, width: f64, height: f64, zoom: u8) -> HashSet<TileId> {
    let margin = 2.0 * TILE_SIZE;
    visible_tiles(center, width + margin, height + margin, zoom)
        .into_iter()
        .map(|placed| placed.id)
        .collect()
}

/// Browser link to the same view on openstreetmap.org.
pub fn osm_permalink(latitude: f64, longitude: f64, zoom: u8) -> String {
    format!(
        "https://www.openstreetmap.org/?mlat={latitude:.4}&mlon={longitude:.4}#map={zoom}/{latitude:.4}/{longitude:.4}"
    )
}
