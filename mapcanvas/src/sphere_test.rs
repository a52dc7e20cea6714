use super::*;
use crate::proj::from_lon_lat;

fn assert_close(a: f64, b: f64, eps: f64) {
    let diff = (a - b).abs();
    assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
}

fn ll(lon: f64, lat: f64) -> Point {
    Point::new(lon, lat)
}

/// One-degree square at null island, counter-clockwise, in lon/lat.
fn degree_square_lon_lat() -> Vec<Point> {
    vec![ll(0.0, 0.0), ll(1.0, 0.0), ll(1.0, 1.0), ll(0.0, 1.0)]
}

fn degree_square_mercator() -> Geometry {
    Geometry::polygon_from_open_ring(degree_square_lon_lat().into_iter().map(from_lon_lat).collect())
}

// Reference values for the one-degree square on a 6371008.8 m sphere.
const ONE_DEGREE_AT_EQUATOR_M: f64 = 111_195.080_233_532_9;
const DEGREE_SQUARE_PERIMETER_M: f64 = 444_763.384_955_006_4;
const DEGREE_SQUARE_AREA_M2: f64 = 12_363_718_145.179_935;

// =============================================================
// get_distance
// =============================================================

#[test]
fn distance_one_degree_of_longitude_at_equator() {
    assert_close(get_distance(ll(0.0, 0.0), ll(1.0, 0.0), EARTH_RADIUS_M), ONE_DEGREE_AT_EQUATOR_M, 1e-6);
}

#[test]
fn distance_one_degree_of_latitude_matches_longitude_at_equator() {
    assert_close(get_distance(ll(0.0, 0.0), ll(0.0, 1.0), EARTH_RADIUS_M), ONE_DEGREE_AT_EQUATOR_M, 1e-6);
}

#[test]
fn distance_to_self_is_zero() {
    assert_eq!(get_distance(ll(12.0, 34.0), ll(12.0, 34.0), EARTH_RADIUS_M), 0.0);
}

#[test]
fn distance_half_way_round_is_half_circumference() {
    let d = get_distance(ll(0.0, 0.0), ll(180.0, 0.0), EARTH_RADIUS_M);
    assert_close(d, std::f64::consts::PI * EARTH_RADIUS_M, 1e-6);
}

// =============================================================
// get_length
// =============================================================

#[test]
fn length_of_polygon_counts_closing_edge() {
    let len = get_length(&degree_square_mercator(), SphereOptions::with_projection(Projection::Epsg3857));
    assert_close(len, DEGREE_SQUARE_PERIMETER_M, 1e-3);
}

#[test]
fn length_in_geographic_projection_skips_transform() {
    let geom = Geometry::LineString(vec![ll(0.0, 0.0), ll(1.0, 0.0)]);
    let len = get_length(&geom, SphereOptions::with_projection(Projection::Epsg4326));
    assert_close(len, ONE_DEGREE_AT_EQUATOR_M, 1e-6);
}

#[test]
fn length_of_point_is_zero() {
    assert_eq!(get_length(&Geometry::Point(ll(0.0, 0.0)), SphereOptions::default()), 0.0);
}

#[test]
fn length_scales_with_radius() {
    let geom = Geometry::LineString(vec![ll(0.0, 0.0), ll(1.0, 0.0)]);
    let opts = SphereOptions { projection: Projection::Epsg4326, radius: 1.0 };
    assert_close(get_length(&geom, opts), 1f64.to_radians(), 1e-12);
}

// =============================================================
// get_area
// =============================================================

#[test]
fn area_of_degree_square() {
    let area = get_area(&degree_square_mercator(), SphereOptions::default());
    assert_close(area, DEGREE_SQUARE_AREA_M2, 1.0);
}

#[test]
fn area_ignores_winding_order() {
    let mut ring = degree_square_lon_lat();
    ring.reverse();
    let geom = Geometry::polygon_from_open_ring(ring);
    let area = get_area(&geom, SphereOptions::with_projection(Projection::Epsg4326));
    assert_close(area, DEGREE_SQUARE_AREA_M2, 1.0);
}

#[test]
fn area_subtracts_holes() {
    let outer: Vec<Point> = vec![ll(0.0, 0.0), ll(2.0, 0.0), ll(2.0, 2.0), ll(0.0, 2.0), ll(0.0, 0.0)];
    let hole: Vec<Point> = vec![ll(0.5, 0.5), ll(0.5, 1.5), ll(1.5, 1.5), ll(1.5, 0.5), ll(0.5, 0.5)];
    let opts = SphereOptions::with_projection(Projection::Epsg4326);
    let solid = get_area(&Geometry::Polygon(vec![outer.clone()]), opts);
    let hole_area = get_area(&Geometry::Polygon(vec![hole.clone()]), opts);
    let holed = get_area(&Geometry::Polygon(vec![outer, hole]), opts);
    assert_close(holed, solid - hole_area, 1e-3);
    assert!(holed < solid);
}

#[test]
fn area_of_degenerate_polygon_is_zero() {
    let geom = Geometry::polygon_from_open_ring(vec![ll(0.0, 0.0), ll(1.0, 0.0)]);
    let area = get_area(&geom, SphereOptions::with_projection(Projection::Epsg4326));
    assert_close(area, 0.0, 1e-6);
}

#[test]
fn area_of_line_is_zero() {
    let geom = Geometry::LineString(vec![ll(0.0, 0.0), ll(1.0, 0.0), ll(1.0, 1.0)]);
    assert_eq!(get_area(&geom, SphereOptions::default()), 0.0);
}

#[test]
fn area_of_empty_polygon_is_zero() {
    assert_eq!(get_area(&Geometry::Polygon(Vec::new()), SphereOptions::default()), 0.0);
}

// =============================================================
// Measurement
// =============================================================

#[test]
fn measurement_of_drawn_square() {
    let m = Measurement::of(&degree_square_mercator());
    assert_close(m.length, DEGREE_SQUARE_PERIMETER_M, 1e-3);
    assert_close(m.area, DEGREE_SQUARE_AREA_M2, 1.0);
}
