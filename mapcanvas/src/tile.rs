//! Raster tile grid: which XYZ tiles cover a view, and where they come from.
//!
//! The grid is the standard Web Mercator pyramid with 256 px tiles and rows
//! counted from the top. Tile columns are kept unwrapped so that a view
//! straddling the antimeridian can place the same tile image on both sides;
//! [`TileCoord::wrapped`] folds a column back into the `0..2^z` range when
//! building a URL.

#[cfg(test)]
#[path = "tile_test.rs"]
mod tile_test;

use crate::consts::{
    MAX_RESOLUTION, OSM_ATTRIBUTION, OSM_MAX_TILE_ZOOM, OSM_URL_TEMPLATE, TILE_SIZE_PX, WEB_MERCATOR_HALF_SIZE,
};
use crate::geom::Extent;

/// Address of a tile in the XYZ pyramid. `x` may lie outside `0..2^z` (unwrapped).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCoord {
    pub z: u8,
    pub x: i64,
    pub y: i64,
}

impl TileCoord {
    #[must_use]
    pub fn new(z: u8, x: i64, y: i64) -> Self {
        Self { z, x, y }
    }

    /// Same tile with its column folded into `0..2^z`.
    #[must_use]
    pub fn wrapped(self) -> Self {
        let n = tiles_per_side(self.z);
        Self { x: self.x.rem_euclid(n), ..self }
    }

    /// Map extent covered by this tile at its unwrapped position.
    #[must_use]
    pub fn extent(self) -> Extent {
        let span = tile_span(self.z);
        #[allow(clippy::cast_precision_loss)]
        let (x, y) = (self.x as f64, self.y as f64);
        let min_x = -WEB_MERCATOR_HALF_SIZE + x * span;
        let max_y = WEB_MERCATOR_HALF_SIZE - y * span;
        Extent::new(min_x, max_y - span, min_x + span, max_y)
    }
}

/// Number of tile columns (and rows) at tile zoom `z`.
#[must_use]
pub fn tiles_per_side(z: u8) -> i64 {
    1_i64 << z
}

/// Width of one tile in map units at tile zoom `z`.
#[must_use]
pub fn tile_span(z: u8) -> f64 {
    tile_resolution(z) * TILE_SIZE_PX
}

/// Resolution (map units per tile pixel) of tile zoom `z`.
#[must_use]
pub fn tile_resolution(z: u8) -> f64 {
    MAX_RESOLUTION / 2f64.powi(i32::from(z))
}

/// Tile zoom best matching a view zoom: the nearest integer, clamped to `0..=max_z`.
#[must_use]
pub fn z_for_zoom(zoom: f64, max_z: u8) -> u8 {
    let nearest = zoom.round().clamp(0.0, f64::from(max_z));
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let z = nearest as u8;
    z
}

/// Tiles at zoom `z` that intersect `extent`, rows clamped to the world, columns unwrapped.
///
/// An extent entirely above or below the world yields no tiles.
///
/// Tiles are ordered row by row, left to right.
#[must_use]
pub fn tiles_for_extent(extent: &Extent, z: u8) -> Vec<TileCoord> {
    let span = tile_span(z);
    let n = tiles_per_side(z);
    let col = |x: f64| (x + WEB_MERCATOR_HALF_SIZE) / span;
    let row = |y: f64| (WEB_MERCATOR_HALF_SIZE - y) / span;

    // Upper bounds use ceil - 1 so an edge lying exactly on a tile boundary
    // does not pull in the next tile.
    #[allow(clippy::cast_possible_truncation)]
    let (min_col, max_col, min_row, max_row) = (
        col(extent.min_x).floor() as i64,
        col(extent.max_x).ceil() as i64 - 1,
        row(extent.max_y).floor() as i64,
        row(extent.min_y).ceil() as i64 - 1,
    );
    if max_row < 0 || min_row > n - 1 {
        return Vec::new();
    }
    let min_row = min_row.clamp(0, n - 1);
    let max_row = max_row.clamp(0, n - 1);

    // A view wider than several worlds would request the same tiles repeatedly.
    let max_col = max_col.min(min_col + 4 * n);

    let mut tiles = Vec::new();
    for y in min_row..=max_row {
        for x in min_col..=max_col {
            tiles.push(TileCoord::new(z, x, y));
        }
    }
    tiles
}

/// Where tile images come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileSource {
    /// URL template with `{z}`, `{x}` and `{y}` placeholders.
    pub url_template: String,
    /// Highest tile zoom the server provides.
    pub max_zoom: u8,
    /// Attribution text shown over the map.
    pub attribution: String,
}

impl TileSource {
    /// The public OpenStreetMap tile servers.
    #[must_use]
    pub fn osm() -> Self {
        Self {
            url_template: OSM_URL_TEMPLATE.to_owned(),
            max_zoom: OSM_MAX_TILE_ZOOM,
            attribution: OSM_ATTRIBUTION.to_owned(),
        }
    }

    /// URL of a tile; the column is wrapped into the world first.
    #[must_use]
    pub fn url(&self, coord: TileCoord) -> String {
        let coord = coord.wrapped();
        self.url_template
            .replace("{z}", &coord.z.to_string())
            .replace("{x}", &coord.x.to_string())
            .replace("{y}", &coord.y.to_string())
    }
}

impl Default for TileSource {
    fn default() -> Self {
        Self::osm()
    }
}
