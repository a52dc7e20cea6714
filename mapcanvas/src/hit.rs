#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::geom::{Point, closest_on_segment};
use crate::source::{FeatureId, VectorSource, VertexRef};

/// The nearest vertex to a query point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexHit {
    pub vertex: VertexRef,
    pub point: Point,
    /// Distance from the query point in map units.
    pub distance: f64,
}

/// The nearest point on a segment to a query point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeHit {
    pub feature: FeatureId,
    pub path: usize,
    /// Index of the segment's first coordinate within its path.
    pub segment: usize,
    /// Segment endpoints.
    pub start: Point,
    pub end: Point,
    /// Closest point on the segment.
    pub point: Point,
    /// Distance from the query point in map units.
    pub distance: f64,
}

/// Find the vertex nearest to `at` within `tolerance` map units.
///
/// Features whose id equals `exclude` are skipped.
#[must_use]
pub fn nearest_vertex(source: &VectorSource, at: Point, tolerance: f64, exclude: Option<FeatureId>) -> Option<VertexHit> {
    let mut best: Option<VertexHit> = None;
    for feature in source.features() {
        if exclude == Some(feature.id) {
            continue;
        }
        let geometry = &feature.geometry;
        for path in 0..geometry.path_count() {
            for (index, &point) in geometry.vertices(path).iter().enumerate() {
                let distance = point.distance(at);
                if distance > tolerance {
                    continue;
                }
                if best.is_none_or(|b| distance < b.distance) {
                    best = Some(VertexHit { vertex: VertexRef { feature: feature.id, path, index }, point, distance });
                }
            }
        }
    }
    best
}

/// Find the segment point nearest to `at` within `tolerance` map units.
///
/// Features whose id equals `exclude` are skipped.
#[must_use]
pub fn nearest_edge(source: &VectorSource, at: Point, tolerance: f64, exclude: Option<FeatureId>) -> Option<EdgeHit> {
    let mut best: Option<EdgeHit> = None;
    for feature in source.features() {
        if exclude == Some(feature.id) {
            continue;
        }
        for (path, coords) in feature.geometry.paths().into_iter().enumerate() {
            for (segment, pair) in coords.windows(2).enumerate() {
                let (start, end) = (pair[0], pair[1]);
                let point = closest_on_segment(at, start, end);
                let distance = point.distance(at);
                if distance > tolerance {
                    continue;
                }
                if best.is_none_or(|b| distance < b.distance) {
                    best = Some(EdgeHit { feature: feature.id, path, segment, start, end, point, distance });
                }
            }
        }
    }
    best
}
