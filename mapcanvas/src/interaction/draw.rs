//! Polygon drawing: the sketch state machine behind the draw tool.
//!
//! A sketch starts with the first click, gains one vertex per click and
//! follows the pointer with a floating vertex in between. Clicking the first
//! or the last placed vertex again finishes the polygon once enough vertices
//! are placed. Coordinates arrive already snapped; the engine decides what
//! counts as a click.

#[cfg(test)]
#[path = "draw_test.rs"]
mod draw_test;

use crate::consts::{DRAW_FINISH_TOLERANCE_PX, POLYGON_MIN_POINTS};
use crate::geom::{Geometry, Point};

/// Outcome of feeding an event to [`Draw`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawEvent {
    /// The event did not change the sketch.
    None,
    /// A new sketch was started at the clicked coordinate.
    Started,
    /// A vertex was appended to the sketch.
    VertexAdded,
    /// The last placed vertex was removed.
    VertexRemoved,
    /// The sketch was completed into this closed polygon.
    Finished(Geometry),
    /// The sketch was discarded.
    Aborted,
}

/// An in-progress polygon.
#[derive(Debug, Clone, PartialEq)]
pub struct Sketch {
    /// Vertices placed by clicks, in order.
    pub vertices: Vec<Point>,
    /// Floating vertex that follows the pointer.
    pub cursor: Point,
}

/// Draw interaction for polygons.
#[derive(Debug, Clone)]
pub struct Draw {
    /// Placed vertices required before the sketch can be finished by clicking.
    pub min_points: usize,
    /// Finish-click distance from the first/last vertex, in CSS pixels.
    pub finish_tolerance_px: f64,
    sketch: Option<Sketch>,
}

impl Default for Draw {
    fn default() -> Self {
        Self { min_points: POLYGON_MIN_POINTS, finish_tolerance_px: DRAW_FINISH_TOLERANCE_PX, sketch: None }
    }
}

impl Draw {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a sketch is in progress.
    #[must_use]
    pub fn is_drawing(&self) -> bool {
        self.sketch.is_some()
    }

    #[must_use]
    pub fn sketch(&self) -> Option<&Sketch> {
        self.sketch.as_ref()
    }

    /// Handle a click at map coordinate `at`.
    pub fn handle_click(&mut self, at: Point, resolution: f64) -> DrawEvent {
        let tolerance = self.finish_tolerance_px * resolution;
        let min_points = self.min_points;
        let Some(sketch) = self.sketch.as_mut() else {
            self.sketch = Some(Sketch { vertices: vec![at], cursor: at });
            return DrawEvent::Started;
        };

        let at_finish = sketch.vertices.len() >= min_points
            && [sketch.vertices.first(), sketch.vertices.last()]
                .into_iter()
                .flatten()
                .any(|v| v.distance(at) <= tolerance);
        if at_finish {
            return self.finish_drawing();
        }

        sketch.vertices.push(at);
        sketch.cursor = at;
        DrawEvent::VertexAdded
    }

    /// Move the floating vertex to `at`.
    pub fn handle_move(&mut self, at: Point) {
        if let Some(sketch) = self.sketch.as_mut() {
            sketch.cursor = at;
        }
    }

    /// Complete the sketch into a closed polygon from its placed vertices.
    pub fn finish_drawing(&mut self) -> DrawEvent {
        match self.sketch.take() {
            Some(sketch) => DrawEvent::Finished(Geometry::polygon_from_open_ring(sketch.vertices)),
            None => DrawEvent::None,
        }
    }

    /// Discard the sketch.
    pub fn abort_drawing(&mut self) -> DrawEvent {
        match self.sketch.take() {
            Some(_) => DrawEvent::Aborted,
            None => DrawEvent::None,
        }
    }

    /// Remove the last placed vertex; removing the only vertex aborts the sketch.
    pub fn remove_last_point(&mut self) -> DrawEvent {
        let Some(sketch) = self.sketch.as_mut() else {
            return DrawEvent::None;
        };
        if sketch.vertices.len() <= 1 {
            return self.abort_drawing();
        }
        sketch.vertices.pop();
        DrawEvent::VertexRemoved
    }

    /// Geometry to render for the sketch: placed vertices plus the floating one, closed.
    #[must_use]
    pub fn sketch_geometry(&self) -> Option<Geometry> {
        let sketch = self.sketch.as_ref()?;
        let mut ring = sketch.vertices.clone();
        if ring.last() != Some(&sketch.cursor) {
            ring.push(sketch.cursor);
        }
        Some(Geometry::polygon_from_open_ring(ring))
    }
}
