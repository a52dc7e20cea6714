#[cfg(test)]
#[path = "snap_test.rs"]
mod snap_test;

use crate::consts::SNAP_TOLERANCE_PX;
use crate::geom::Point;
use crate::hit::{nearest_edge, nearest_vertex};
use crate::source::{FeatureId, VectorSource};

/// What a pointer coordinate was snapped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapTarget {
    Vertex,
    Edge,
}

/// A snapped coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapped {
    pub point: Point,
    pub target: SnapTarget,
}

/// Pulls pointer coordinates onto nearby vertices and edges of the source.
#[derive(Debug, Clone)]
pub struct Snap {
    /// Snap distance in CSS pixels.
    pub pixel_tolerance: f64,
    /// Snap to vertices.
    pub vertex: bool,
    /// Snap to points along edges.
    pub edge: bool,
}

impl Default for Snap {
    fn default() -> Self {
        Self { pixel_tolerance: SNAP_TOLERANCE_PX, vertex: true, edge: true }
    }
}

impl Snap {
    /// Snap `at` against the source. `resolution` converts the pixel tolerance to map units.
    ///
    /// The closest segment within tolerance is found first; its nearer endpoint
    /// wins when that endpoint is itself within tolerance, otherwise the
    /// closest point along the segment is used.
    #[must_use]
    pub fn snap(&self, source: &VectorSource, at: Point, resolution: f64, exclude: Option<FeatureId>) -> Option<Snapped> {
        if !self.vertex && !self.edge {
            return None;
        }
        let tolerance = self.pixel_tolerance * resolution;

        if let Some(hit) = nearest_edge(source, at, tolerance, exclude) {
            if self.vertex {
                let (d_start, d_end) = (hit.start.distance(at), hit.end.distance(at));
                let (vertex, d_vertex) = if d_start <= d_end { (hit.start, d_start) } else { (hit.end, d_end) };
                if d_vertex <= tolerance {
                    return Some(Snapped { point: vertex, target: SnapTarget::Vertex });
                }
            }
            if self.edge {
                return Some(Snapped { point: hit.point, target: SnapTarget::Edge });
            }
            return None;
        }

        // Point features have no segments but still attract vertices.
        if self.vertex {
            return nearest_vertex(source, at, tolerance, exclude)
                .map(|hit| Snapped { point: hit.point, target: SnapTarget::Vertex });
        }
        None
    }

    /// The snapped coordinate, or `at` unchanged when nothing is in range.
    #[must_use]
    pub fn snap_or_keep(&self, source: &VectorSource, at: Point, resolution: f64, exclude: Option<FeatureId>) -> Point {
        self.snap(source, at, resolution, exclude).map_or(at, |s| s.point)
    }
}
