use super::*;
use crate::geom::Geometry;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

/// Square with 100-unit sides; with resolution 1.0 the tolerance is 10 units.
fn source_with_square() -> (VectorSource, FeatureId) {
    let mut source = VectorSource::new();
    let id = source.add_geometry(Geometry::polygon_from_open_ring(vec![
        pt(0.0, 0.0),
        pt(100.0, 0.0),
        pt(100.0, 100.0),
        pt(0.0, 100.0),
    ]));
    (source, id)
}

#[test]
fn default_snap_uses_ten_pixels_for_vertices_and_edges() {
    let snap = Snap::default();
    assert!((snap.pixel_tolerance - 10.0).abs() < f64::EPSILON);
    assert!(snap.vertex && snap.edge);
}

#[test]
fn snaps_to_nearby_vertex() {
    let (source, _) = source_with_square();
    let snapped = Snap::default().snap(&source, pt(96.0, 4.0), 1.0, None).unwrap();
    assert_eq!(snapped, Snapped { point: pt(100.0, 0.0), target: SnapTarget::Vertex });
}

#[test]
fn vertex_preferred_over_edge_when_both_in_range() {
    let (source, _) = source_with_square();
    let snapped = Snap::default().snap(&source, pt(7.0, 1.0), 1.0, None).unwrap();
    assert_eq!(snapped.target, SnapTarget::Vertex);
    assert_eq!(snapped.point, pt(0.0, 0.0));
}

#[test]
fn snaps_to_edge_midway() {
    let (source, _) = source_with_square();
    let snapped = Snap::default().snap(&source, pt(50.0, 6.0), 1.0, None).unwrap();
    assert_eq!(snapped, Snapped { point: pt(50.0, 0.0), target: SnapTarget::Edge });
}

#[test]
fn nothing_in_range_means_no_snap() {
    let (source, _) = source_with_square();
    assert!(Snap::default().snap(&source, pt(50.0, 50.0), 1.0, None).is_none());
    assert_eq!(Snap::default().snap_or_keep(&source, pt(50.0, 50.0), 1.0, None), pt(50.0, 50.0));
}

#[test]
fn tolerance_scales_with_resolution() {
    let (source, _) = source_with_square();
    // 30 units away: out of range at resolution 1, in range at resolution 5.
    assert!(Snap::default().snap(&source, pt(50.0, 30.0), 1.0, None).is_none());
    assert!(Snap::default().snap(&source, pt(50.0, 30.0), 5.0, None).is_some());
}

#[test]
fn edge_only_snap_ignores_vertices() {
    let (source, _) = source_with_square();
    let snap = Snap { vertex: false, ..Snap::default() };
    let snapped = snap.snap(&source, pt(3.0, 2.0), 1.0, None).unwrap();
    assert_eq!(snapped.target, SnapTarget::Edge);
}

#[test]
fn vertex_only_snap_ignores_far_edge_points() {
    let (source, _) = source_with_square();
    let snap = Snap { edge: false, ..Snap::default() };
    assert!(snap.snap(&source, pt(50.0, 2.0), 1.0, None).is_none());
}

#[test]
fn disabled_snap_never_snaps() {
    let (source, _) = source_with_square();
    let snap = Snap { vertex: false, edge: false, ..Snap::default() };
    assert!(snap.snap(&source, pt(0.0, 0.0), 1.0, None).is_none());
}

#[test]
fn excluded_feature_is_not_a_target() {
    let (source, id) = source_with_square();
    assert!(Snap::default().snap(&source, pt(1.0, 1.0), 1.0, Some(id)).is_none());
}

#[test]
fn point_features_attract_as_vertices() {
    let mut source = VectorSource::new();
    source.add_geometry(Geometry::Point(pt(5.0, 5.0)));
    let snapped = Snap::default().snap(&source, pt(8.0, 8.0), 1.0, None).unwrap();
    assert_eq!(snapped, Snapped { point: pt(5.0, 5.0), target: SnapTarget::Vertex });
}
