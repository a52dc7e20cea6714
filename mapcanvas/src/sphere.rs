//! Spherical length and area of geometries.
//!
//! Geometries are first transformed to longitude/latitude; distances are
//! great-circle (haversine) distances and polygon areas use the spherical
//! excess approximation for rings on a sphere of the given radius.

#[cfg(test)]
#[path = "sphere_test.rs"]
mod sphere_test;

use crate::consts::EARTH_RADIUS_M;
use crate::geom::{Geometry, Point};
use crate::proj::{Projection, transform_geometry};

/// Options for [`get_length`] and [`get_area`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereOptions {
    /// Projection the input coordinates are in.
    pub projection: Projection,
    /// Sphere radius in meters.
    pub radius: f64,
}

impl Default for SphereOptions {
    fn default() -> Self {
        Self { projection: Projection::Epsg3857, radius: EARTH_RADIUS_M }
    }
}

impl SphereOptions {
    #[must_use]
    pub fn with_projection(projection: Projection) -> Self {
        Self { projection, ..Self::default() }
    }
}

/// Perimeter length and area of a finished geometry, in meters / square meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub length: f64,
    pub area: f64,
}

impl Measurement {
    /// Measure a Web Mercator geometry the way a completed draw is measured:
    /// area with default options, length with the projection named explicitly.
    #[must_use]
    pub fn of(geometry: &Geometry) -> Self {
        Self {
            length: get_length(geometry, SphereOptions::with_projection(Projection::Epsg3857)),
            area: get_area(geometry, SphereOptions::default()),
        }
    }
}

/// Great-circle distance between two longitude/latitude points (degrees).
#[must_use]
pub fn get_distance(c1: Point, c2: Point, radius: f64) -> f64 {
    let lat1 = c1.y.to_radians();
    let lat2 = c2.y.to_radians();
    let delta_lat_by_2 = (lat2 - lat1) / 2.0;
    let delta_lon_by_2 = (c2.x - c1.x).to_radians() / 2.0;
    let a = delta_lat_by_2.sin().powi(2) + delta_lon_by_2.sin().powi(2) * lat1.cos() * lat2.cos();
    2.0 * radius * a.sqrt().atan2((1.0 - a).sqrt())
}

fn path_length(coords: &[Point], radius: f64) -> f64 {
    coords.windows(2).map(|w| get_distance(w[0], w[1], radius)).sum()
}

/// Signed ring area in square meters; the sign follows the winding order.
fn ring_area(coords: &[Point], radius: f64) -> f64 {
    let Some(&last) = coords.last() else {
        return 0.0;
    };
    let mut area = 0.0;
    let (mut x1, mut y1) = (last.x, last.y);
    for c in coords {
        area += (c.x - x1).to_radians() * (2.0 + y1.to_radians().sin() + c.y.to_radians().sin());
        x1 = c.x;
        y1 = c.y;
    }
    area * radius * radius / 2.0
}

/// Spherical length of a geometry: the sum over lines and rings. Points have no length.
#[must_use]
pub fn get_length(geometry: &Geometry, options: SphereOptions) -> f64 {
    let geographic = transform_geometry(geometry, options.projection, Projection::Epsg4326);
    geographic
        .paths()
        .into_iter()
        .map(|path| path_length(path, options.radius))
        .sum()
}

/// Spherical area of a geometry: outer ring minus holes. Non-polygons have no area.
#[must_use]
pub fn get_area(geometry: &Geometry, options: SphereOptions) -> f64 {
    let geographic = transform_geometry(geometry, options.projection, Projection::Epsg4326);
    let Geometry::Polygon(rings) = geographic else {
        return 0.0;
    };
    let mut rings = rings.iter();
    let Some(outer) = rings.next() else {
        return 0.0;
    };
    let holes: f64 = rings.map(|ring| ring_area(ring, options.radius).abs()).sum();
    ring_area(outer, options.radius).abs() - holes
}
