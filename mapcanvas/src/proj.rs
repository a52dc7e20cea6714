//! Projections supported by the engine and transforms between them.
//!
//! Only the two projections a web map needs are supported: Web Mercator
//! (EPSG:3857), in which the view and all features live, and geographic
//! longitude/latitude (EPSG:4326), in which spherical measurements are made.

#[cfg(test)]
#[path = "proj_test.rs"]
mod proj_test;

use std::f64::consts::PI;

use crate::consts::{WEB_MERCATOR_HALF_SIZE, WEB_MERCATOR_MAX_LAT, WEB_MERCATOR_RADIUS_M};
use crate::geom::{Geometry, Point};

/// A named coordinate reference system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Projection {
    /// Spherical Web Mercator, meters.
    #[default]
    Epsg3857,
    /// Geographic longitude/latitude, degrees.
    Epsg4326,
}

impl Projection {
    /// The EPSG code string, e.g. `"EPSG:3857"`.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Epsg3857 => "EPSG:3857",
            Self::Epsg4326 => "EPSG:4326",
        }
    }

    /// Look up a projection by code. Accepts the common Web Mercator aliases.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "EPSG:3857" | "EPSG:900913" | "EPSG:102100" | "EPSG:102113" => Some(Self::Epsg3857),
            "EPSG:4326" | "CRS:84" => Some(Self::Epsg4326),
            _ => None,
        }
    }
}

/// Web Mercator meters to longitude/latitude degrees.
#[must_use]
pub fn to_lon_lat(p: Point) -> Point {
    let lon = 180.0 * p.x / WEB_MERCATOR_HALF_SIZE;
    let lat = 360.0 * (p.y / WEB_MERCATOR_RADIUS_M).exp().atan() / PI - 90.0;
    Point::new(lon, lat)
}

/// Longitude/latitude degrees to Web Mercator meters, clamping latitude to the square world.
#[must_use]
pub fn from_lon_lat(p: Point) -> Point {
    let x = WEB_MERCATOR_HALF_SIZE * p.x / 180.0;
    let lat = p.y.clamp(-WEB_MERCATOR_MAX_LAT, WEB_MERCATOR_MAX_LAT);
    let y = WEB_MERCATOR_RADIUS_M * (PI * (lat + 90.0) / 360.0).tan().ln();
    Point::new(x, y.clamp(-WEB_MERCATOR_HALF_SIZE, WEB_MERCATOR_HALF_SIZE))
}

/// Transform a single coordinate between projections.
#[must_use]
pub fn transform(p: Point, from: Projection, to: Projection) -> Point {
    match (from, to) {
        (Projection::Epsg3857, Projection::Epsg4326) => to_lon_lat(p),
        (Projection::Epsg4326, Projection::Epsg3857) => from_lon_lat(p),
        _ => p,
    }
}

/// Transform every coordinate of a geometry between projections.
#[must_use]
pub fn transform_geometry(geometry: &Geometry, from: Projection, to: Projection) -> Geometry {
    if from == to {
        return geometry.clone();
    }
    geometry.map_coords(|p| transform(p, from, to))
}
