//! Geometry model: points, extents and the feature geometries held by a source.
//!
//! Coordinates are plain `(x, y)` pairs. Inside the engine they are Web
//! Mercator meters; screen-space values reuse the same [`Point`] type in CSS
//! pixels. Polygon rings are stored closed: the first coordinate is repeated
//! as the last one.

#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use serde::{Deserialize, Serialize};

/// A point in either screen or map space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Axis-aligned bounding box in map units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Extent {
    #[must_use]
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self { min_x, min_y, max_x, max_y }
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }
}

/// Geometry of a feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    Point(Point),
    LineString(Vec<Point>),
    /// Outer ring followed by holes, each ring closed.
    Polygon(Vec<Vec<Point>>),
}

impl Geometry {
    /// Build a single-ring polygon from open vertices, closing the ring.
    #[must_use]
    pub fn polygon_from_open_ring(mut vertices: Vec<Point>) -> Self {
        if let Some(&first) = vertices.first() {
            if vertices.last() != Some(&first) || vertices.len() == 1 {
                vertices.push(first);
            }
        }
        Self::Polygon(vec![vertices])
    }

    /// Apply `f` to every coordinate, producing a new geometry.
    #[must_use]
    pub fn map_coords(&self, f: impl Fn(Point) -> Point) -> Self {
        match self {
            Self::Point(p) => Self::Point(f(*p)),
            Self::LineString(coords) => Self::LineString(coords.iter().map(|c| f(*c)).collect()),
            Self::Polygon(rings) => {
                Self::Polygon(rings.iter().map(|ring| ring.iter().map(|c| f(*c)).collect()).collect())
            }
        }
    }

    /// Coordinate sequences that form paths: one for a line, one per polygon ring.
    #[must_use]
    pub fn paths(&self) -> Vec<&[Point]> {
        match self {
            Self::Point(_) => Vec::new(),
            Self::LineString(coords) => vec![coords.as_slice()],
            Self::Polygon(rings) => rings.iter().map(Vec::as_slice).collect(),
        }
    }

    /// Distinct vertices of path `path`: the closing duplicate of a ring is left out.
    #[must_use]
    pub fn vertices(&self, path: usize) -> &[Point] {
        match self {
            Self::Point(p) if path == 0 => std::slice::from_ref(p),
            Self::Point(_) => &[],
            Self::LineString(coords) if path == 0 => coords,
            Self::LineString(_) => &[],
            Self::Polygon(rings) => match rings.get(path) {
                Some(ring) if ring.len() > 1 => &ring[..ring.len() - 1],
                Some(ring) => ring,
                None => &[],
            },
        }
    }

    /// Number of paths (see [`Geometry::paths`]); a point counts as one.
    #[must_use]
    pub fn path_count(&self) -> usize {
        match self {
            Self::Point(_) | Self::LineString(_) => 1,
            Self::Polygon(rings) => rings.len(),
        }
    }

    /// Bounding box of all coordinates, or `None` for an empty geometry.
    #[must_use]
    pub fn extent(&self) -> Option<Extent> {
        let mut coords: Vec<Point> = Vec::new();
        match self {
            Self::Point(p) => coords.push(*p),
            Self::LineString(line) => coords.extend_from_slice(line),
            Self::Polygon(rings) => rings.iter().for_each(|r| coords.extend_from_slice(r)),
        }
        let first = coords.first()?;
        let mut extent = Extent::new(first.x, first.y, first.x, first.y);
        for c in &coords {
            extent.min_x = extent.min_x.min(c.x);
            extent.min_y = extent.min_y.min(c.y);
            extent.max_x = extent.max_x.max(c.x);
            extent.max_y = extent.max_y.max(c.y);
        }
        Some(extent)
    }
}

/// Closest point to `p` on the segment `a`–`b`.
#[must_use]
pub fn closest_on_segment(p: Point, a: Point, b: Point) -> Point {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;
    if len_sq <= f64::EPSILON {
        return a;
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    Point::new(a.x + t * dx, a.y + t * dy)
}
