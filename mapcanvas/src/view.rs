#[cfg(test)]
#[path = "view_test.rs"]
mod view_test;

use crate::consts::{DEFAULT_ZOOM, MAX_RESOLUTION, MAX_ZOOM, MIN_ZOOM, WEB_MERCATOR_HALF_SIZE};
use crate::geom::{Extent, Point};

/// Size of the drawing surface.
///
/// `width` / `height` are in CSS pixels; `dpr` is the device pixel ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub dpr: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { width: 0.0, height: 0.0, dpr: 1.0 }
    }
}

impl Viewport {
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.width * 0.5, self.height * 0.5)
    }
}

/// Map view state: what part of the Web Mercator plane is on screen.
///
/// `center` is in map units (EPSG:3857 meters). `zoom` is continuous; the
/// resolution halves with every zoom level. The center never leaves the
/// world vertically; horizontally the world repeats.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    pub center: Point,
    pub zoom: f64,
}

impl Default for MapView {
    fn default() -> Self {
        Self { center: Point::new(0.0, 0.0), zoom: DEFAULT_ZOOM }
    }
}

impl MapView {
    #[must_use]
    pub fn new(center: Point, zoom: f64) -> Self {
        let mut view = Self { center, zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM) };
        view.constrain_center();
        view
    }

    /// Map units per CSS pixel at the current zoom.
    #[must_use]
    pub fn resolution(&self) -> f64 {
        MAX_RESOLUTION / 2f64.powf(self.zoom)
    }

    /// Convert a screen-space pixel (CSS pixels) to a map coordinate.
    #[must_use]
    pub fn pixel_to_coordinate(&self, pixel: Point, viewport: &Viewport) -> Point {
        let res = self.resolution();
        let c = viewport.center();
        Point {
            x: self.center.x + (pixel.x - c.x) * res,
            y: self.center.y - (pixel.y - c.y) * res,
        }
    }

    /// Convert a map coordinate to a screen-space pixel (CSS pixels).
    #[must_use]
    pub fn coordinate_to_pixel(&self, coord: Point, viewport: &Viewport) -> Point {
        let res = self.resolution();
        let c = viewport.center();
        Point {
            x: c.x + (coord.x - self.center.x) / res,
            y: c.y - (coord.y - self.center.y) / res,
        }
    }

    /// Convert a screen-space distance (pixels) to a map distance.
    #[must_use]
    pub fn pixel_dist_to_map(&self, pixels: f64) -> f64 {
        pixels * self.resolution()
    }

    /// Map extent covered by the viewport.
    #[must_use]
    pub fn extent(&self, viewport: &Viewport) -> Extent {
        let res = self.resolution();
        let half_w = viewport.width * 0.5 * res;
        let half_h = viewport.height * 0.5 * res;
        Extent::new(
            self.center.x - half_w,
            self.center.y - half_h,
            self.center.x + half_w,
            self.center.y + half_h,
        )
    }

    /// Move the view so the content shifts by `(dx, dy)` screen pixels.
    pub fn pan_by_pixels(&mut self, dx: f64, dy: f64) {
        let res = self.resolution();
        self.center.x -= dx * res;
        self.center.y += dy * res;
        self.constrain_center();
    }

    /// Set the zoom level, clamped to the allowed range.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Change zoom while keeping the map coordinate under `anchor` (screen pixel) fixed.
    pub fn zoom_at(&mut self, zoom: f64, anchor: Point, viewport: &Viewport) {
        let anchored = self.pixel_to_coordinate(anchor, viewport);
        self.set_zoom(zoom);
        let res = self.resolution();
        let c = viewport.center();
        self.center.x = anchored.x - (anchor.x - c.x) * res;
        self.center.y = anchored.y + (anchor.y - c.y) * res;
        self.constrain_center();
    }

    fn constrain_center(&mut self) {
        self.center.y = self.center.y.clamp(-WEB_MERCATOR_HALF_SIZE, WEB_MERCATOR_HALF_SIZE);
    }
}
