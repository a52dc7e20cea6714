use super::*;

const EPSILON: f64 = 1e-9;

fn assert_close(a: f64, b: f64, eps: f64) {
    let diff = (a - b).abs();
    assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
}

// =============================================================
// Projection codes
// =============================================================

#[test]
fn default_projection_is_web_mercator() {
    assert_eq!(Projection::default(), Projection::Epsg3857);
}

#[test]
fn code_round_trips_through_from_code() {
    for proj in [Projection::Epsg3857, Projection::Epsg4326] {
        assert_eq!(Projection::from_code(proj.code()), Some(proj));
    }
}

#[test]
fn from_code_accepts_mercator_aliases() {
    assert_eq!(Projection::from_code("EPSG:900913"), Some(Projection::Epsg3857));
    assert_eq!(Projection::from_code("CRS:84"), Some(Projection::Epsg4326));
}

#[test]
fn from_code_rejects_unknown() {
    assert_eq!(Projection::from_code("EPSG:27700"), None);
}

// =============================================================
// Transforms
// =============================================================

#[test]
fn origin_maps_to_null_island() {
    let ll = to_lon_lat(Point::new(0.0, 0.0));
    assert_close(ll.x, 0.0, EPSILON);
    assert_close(ll.y, 0.0, EPSILON);
}

#[test]
fn half_size_maps_to_antimeridian() {
    let ll = to_lon_lat(Point::new(WEB_MERCATOR_HALF_SIZE, 0.0));
    assert_close(ll.x, 180.0, EPSILON);
}

#[test]
fn world_top_edge_is_max_latitude() {
    let ll = to_lon_lat(Point::new(0.0, WEB_MERCATOR_HALF_SIZE));
    assert_close(ll.y, WEB_MERCATOR_MAX_LAT, 1e-9);
}

#[test]
fn lon_lat_round_trip() {
    let original = Point::new(-122.4194, 37.7749);
    let back = to_lon_lat(from_lon_lat(original));
    assert_close(back.x, original.x, 1e-9);
    assert_close(back.y, original.y, 1e-9);
}

#[test]
fn from_lon_lat_clamps_poles() {
    let north = from_lon_lat(Point::new(0.0, 90.0));
    let south = from_lon_lat(Point::new(0.0, -90.0));
    assert!(north.y.is_finite());
    assert_close(north.y, WEB_MERCATOR_HALF_SIZE, 1e-3);
    assert_close(south.y, -WEB_MERCATOR_HALF_SIZE, 1e-3);
}

#[test]
fn transform_same_projection_is_identity() {
    let p = Point::new(123.0, 456.0);
    assert_eq!(transform(p, Projection::Epsg3857, Projection::Epsg3857), p);
}

#[test]
fn transform_geometry_converts_all_rings() {
    let geom = Geometry::polygon_from_open_ring(vec![
        Point::new(0.0, 0.0),
        Point::new(WEB_MERCATOR_HALF_SIZE, 0.0),
        Point::new(0.0, 1000.0),
    ]);
    let Geometry::Polygon(rings) = transform_geometry(&geom, Projection::Epsg3857, Projection::Epsg4326) else {
        panic!("expected polygon");
    };
    assert_close(rings[0][1].x, 180.0, EPSILON);
    assert!(rings[0][2].y > 0.0 && rings[0][2].y < 0.01);
}
