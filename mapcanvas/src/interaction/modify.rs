//! Vertex editing for features already in the source.
//!
//! Pressing near a vertex grabs it; pressing near an edge inserts a vertex
//! there and grabs the new one. The grabbed vertex follows the pointer until
//! release. An alt-click on a vertex removes it as long as the geometry stays
//! valid.

#[cfg(test)]
#[path = "modify_test.rs"]
mod modify_test;

use crate::consts::MODIFY_TOLERANCE_PX;
use crate::geom::Point;
use crate::hit::{nearest_edge, nearest_vertex};
use crate::source::{FeatureId, VectorSource, VertexRef};

/// Outcome of feeding an event to [`Modify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModifyEvent {
    None,
    /// A vertex of `feature` was grabbed.
    Started { feature: FeatureId },
    /// The grabbed vertex moved.
    Moved,
    /// The grabbed vertex was released.
    Ended { feature: FeatureId },
    /// A vertex of `feature` was deleted.
    VertexRemoved { feature: FeatureId },
}

#[derive(Debug, Clone)]
pub struct Modify {
    /// Grab distance in CSS pixels.
    pub pixel_tolerance: f64,
    drag: Option<VertexRef>,
    hover: Option<Point>,
}

impl Default for Modify {
    fn default() -> Self {
        Self { pixel_tolerance: MODIFY_TOLERANCE_PX, drag: None, hover: None }
    }
}

impl Modify {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Feature owning the grabbed vertex.
    #[must_use]
    pub fn dragged_feature(&self) -> Option<FeatureId> {
        self.drag.map(|v| v.feature)
    }

    /// Where the vertex marker is shown: the grabbable vertex or edge point under the pointer.
    #[must_use]
    pub fn hover_vertex(&self) -> Option<Point> {
        self.hover
    }

    /// Recompute the hover marker for a pointer at `at`. Returns whether it changed.
    pub fn update_hover(&mut self, source: &VectorSource, at: Point, resolution: f64) -> bool {
        let tolerance = self.pixel_tolerance * resolution;
        let next = match nearest_vertex(source, at, tolerance, None) {
            Some(hit) => Some(hit.point),
            None => nearest_edge(source, at, tolerance, None).map(|hit| hit.point),
        };
        let changed = next != self.hover;
        self.hover = next;
        changed
    }

    pub fn clear_hover(&mut self) -> bool {
        self.hover.take().is_some()
    }

    /// Try to grab a vertex at `at`, inserting one on an edge if no vertex is in range.
    pub fn handle_down(&mut self, source: &mut VectorSource, at: Point, resolution: f64) -> ModifyEvent {
        let tolerance = self.pixel_tolerance * resolution;

        if let Some(hit) = nearest_vertex(source, at, tolerance, None) {
            self.drag = Some(hit.vertex);
            self.hover = Some(hit.point);
            return ModifyEvent::Started { feature: hit.vertex.feature };
        }

        let Some(hit) = nearest_edge(source, at, tolerance, None) else {
            return ModifyEvent::None;
        };
        let vertex = VertexRef { feature: hit.feature, path: hit.path, index: hit.segment + 1 };
        if !source.insert_vertex(vertex, hit.point) {
            return ModifyEvent::None;
        }
        self.drag = Some(vertex);
        self.hover = Some(hit.point);
        ModifyEvent::Started { feature: hit.feature }
    }

    /// Move the grabbed vertex to `to`.
    pub fn handle_drag(&mut self, source: &mut VectorSource, to: Point) -> ModifyEvent {
        let Some(vertex) = self.drag else {
            return ModifyEvent::None;
        };
        if !source.set_vertex(vertex, to) {
            // Feature vanished under the drag.
            self.drag = None;
            return ModifyEvent::None;
        }
        self.hover = Some(to);
        ModifyEvent::Moved
    }

    /// Release the grabbed vertex.
    pub fn handle_up(&mut self) -> ModifyEvent {
        match self.drag.take() {
            Some(vertex) => ModifyEvent::Ended { feature: vertex.feature },
            None => ModifyEvent::None,
        }
    }

    /// Delete the vertex under `at`, if any and if the geometry allows it.
    pub fn remove_vertex_at(&mut self, source: &mut VectorSource, at: Point, resolution: f64) -> ModifyEvent {
        let tolerance = self.pixel_tolerance * resolution;
        let Some(hit) = nearest_vertex(source, at, tolerance, None) else {
            return ModifyEvent::None;
        };
        if !source.remove_vertex(hit.vertex) {
            return ModifyEvent::None;
        }
        self.hover = None;
        ModifyEvent::VertexRemoved { feature: hit.vertex.feature }
    }
}
