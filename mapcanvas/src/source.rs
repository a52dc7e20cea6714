//! Vector source: the features drawn on the map and the edits applied to them.
//!
//! `VectorSource` is the single mutable collection shared by the draw, modify
//! and snap interactions. Features keep insertion order, which is also draw
//! order. Every mutation bumps `revision` so the host can tell when a redraw
//! is due.

#[cfg(test)]
#[path = "source_test.rs"]
mod source_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geom::{Geometry, Point};

/// Unique identifier for a feature.
pub type FeatureId = Uuid;

/// A geometry with identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub id: FeatureId,
    pub geometry: Geometry,
}

impl Feature {
    /// Wrap a geometry in a feature with a fresh id.
    #[must_use]
    pub fn new(geometry: Geometry) -> Self {
        Self { id: Uuid::new_v4(), geometry }
    }
}

/// Address of one vertex: which feature, which path (ring), which index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexRef {
    pub feature: FeatureId,
    pub path: usize,
    pub index: usize,
}

/// In-memory store of vector features.
#[derive(Debug, Default)]
pub struct VectorSource {
    features: HashMap<FeatureId, Feature>,
    order: Vec<FeatureId>,
    revision: u64,
}

impl VectorSource {
    /// Create an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a geometry as a new feature and return its id.
    pub fn add_geometry(&mut self, geometry: Geometry) -> FeatureId {
        let feature = Feature::new(geometry);
        let id = feature.id;
        self.insert(feature);
        id
    }

    /// Insert or replace a feature. A replaced feature keeps its position.
    pub fn insert(&mut self, feature: Feature) {
        let id = feature.id;
        if self.features.insert(id, feature).is_none() {
            self.order.push(id);
        }
        self.changed();
    }

    /// Remove a feature by id, returning it if it was present.
    pub fn remove(&mut self, id: &FeatureId) -> Option<Feature> {
        let removed = self.features.remove(id)?;
        self.order.retain(|other| other != id);
        self.changed();
        Some(removed)
    }

    /// Remove every feature.
    pub fn clear(&mut self) {
        if self.order.is_empty() {
            return;
        }
        self.features.clear();
        self.order.clear();
        self.changed();
    }

    /// Return a reference to a feature by id.
    #[must_use]
    pub fn get(&self, id: &FeatureId) -> Option<&Feature> {
        self.features.get(id)
    }

    /// Features in insertion (draw) order.
    pub fn features(&self) -> impl Iterator<Item = &Feature> {
        self.order.iter().filter_map(|id| self.features.get(id))
    }

    /// Move a vertex. Moving the first vertex of a ring also moves its closing duplicate.
    pub fn set_vertex(&mut self, at: VertexRef, to: Point) -> bool {
        let Some(feature) = self.features.get_mut(&at.feature) else {
            return false;
        };
        let moved = match &mut feature.geometry {
            Geometry::Point(p) if at.path == 0 && at.index == 0 => {
                *p = to;
                true
            }
            Geometry::Point(_) => false,
            Geometry::LineString(coords) => set_in_path(coords, at, to),
            Geometry::Polygon(rings) => match rings.get_mut(at.path) {
                Some(ring) => set_in_ring(ring, at.index, to),
                None => false,
            },
        };
        if moved {
            self.changed();
        }
        moved
    }

    /// Insert a vertex so that it becomes index `at.index` of its path.
    pub fn insert_vertex(&mut self, at: VertexRef, point: Point) -> bool {
        let Some(feature) = self.features.get_mut(&at.feature) else {
            return false;
        };
        let inserted = match &mut feature.geometry {
            Geometry::Point(_) => false,
            Geometry::LineString(coords) if at.path == 0 && at.index <= coords.len() => {
                coords.insert(at.index, point);
                true
            }
            Geometry::LineString(_) => false,
            Geometry::Polygon(rings) => match rings.get_mut(at.path) {
                Some(ring) if at.index >= 1 && at.index < ring.len() => {
                    ring.insert(at.index, point);
                    true
                }
                _ => false,
            },
        };
        if inserted {
            self.changed();
        }
        inserted
    }

    /// Remove a vertex. Rings keep at least three distinct vertices and lines at least two.
    pub fn remove_vertex(&mut self, at: VertexRef) -> bool {
        let Some(feature) = self.features.get_mut(&at.feature) else {
            return false;
        };
        let removed = match &mut feature.geometry {
            Geometry::Point(_) => false,
            Geometry::LineString(coords) if at.path == 0 && coords.len() > 2 && at.index < coords.len() => {
                coords.remove(at.index);
                true
            }
            Geometry::LineString(_) => false,
            Geometry::Polygon(rings) => match rings.get_mut(at.path) {
                Some(ring) => remove_from_ring(ring, at.index),
                None => false,
            },
        };
        if removed {
            self.changed();
        }
        removed
    }

    /// Number of features currently in the source.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if the source contains no features.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Counter bumped on every mutation.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn changed(&mut self) {
        self.revision += 1;
    }
}

fn set_in_path(coords: &mut [Point], at: VertexRef, to: Point) -> bool {
    if at.path != 0 {
        return false;
    }
    let Some(slot) = coords.get_mut(at.index) else {
        return false;
    };
    *slot = to;
    true
}

fn set_in_ring(ring: &mut [Point], index: usize, to: Point) -> bool {
    let distinct = ring.len().saturating_sub(1);
    if index >= distinct {
        return false;
    }
    ring[index] = to;
    if index == 0 {
        ring[distinct] = to;
    }
    true
}

fn remove_from_ring(ring: &mut Vec<Point>, index: usize) -> bool {
    let distinct = ring.len().saturating_sub(1);
    if distinct <= 3 || index >= distinct {
        return false;
    }
    ring.remove(index);
    if index == 0 {
        let first = ring[0];
        let last = ring.len() - 1;
        ring[last] = first;
    }
    true
}
