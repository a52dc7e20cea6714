use std::rc::Rc;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::consts::{DEFAULT_ZOOM, KEYBOARD_PAN_PX, WHEEL_DELTA_PER_ZOOM, ZOOM_STEP};
use crate::geom::{Geometry, Point};
use crate::input::{Button, InputState, Key, Modifiers, WheelDelta};
use crate::interaction::Interactions;
use crate::interaction::draw::DrawEvent;
use crate::interaction::modify::ModifyEvent;
use crate::render;
use crate::source::{FeatureId, VectorSource};
use crate::style::Style;
use crate::tile::{TileCoord, TileSource, tiles_for_extent, z_for_zoom};
use crate::tile_cache::TileCache;
use crate::view::{MapView, Viewport};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A draw sketch was started.
    DrawStart,
    /// A polygon was completed and added to the source as `feature`.
    DrawEnd { feature: FeatureId, geometry: Geometry },
    /// The draw sketch was discarded.
    DrawAbort,
    ModifyStart { feature: FeatureId },
    ModifyEnd { feature: FeatureId },
    VertexRemoved { feature: FeatureId },
    /// Center or zoom changed.
    ViewChanged,
    SetCursor(String),
    RenderNeeded,
}

/// Initial configuration of a map.
#[derive(Debug, Clone)]
pub struct MapOptions {
    /// View center in EPSG:3857 meters.
    pub center: Point,
    pub zoom: f64,
    pub tile_source: TileSource,
    /// Style of every feature in the vector layer.
    pub style: Style,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            center: Point::new(0.0, 0.0),
            zoom: DEFAULT_ZOOM,
            tile_source: TileSource::osm(),
            style: Style::measurement(),
        }
    }
}

/// Map state and input handling that does not touch the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
pub struct EngineCore {
    pub source: VectorSource,
    pub view: MapView,
    pub viewport: Viewport,
    pub interactions: Interactions,
    pub input: InputState,
    pub tile_source: TileSource,
    pub style: Style,
    cursor: &'static str,
    /// The latest click went to the draw interaction, which also owns the double-click it forms.
    draw_claimed_click: bool,
    disposed: bool,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::new(MapOptions::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new(options: MapOptions) -> Self {
        Self {
            source: VectorSource::new(),
            view: MapView::new(options.center, options.zoom),
            viewport: Viewport::default(),
            interactions: Interactions::default(),
            input: InputState::default(),
            tile_source: options.tile_source,
            style: options.style,
            cursor: "default",
            draw_claimed_click: false,
            disposed: false,
        }
    }

    // --- Lifecycle ---

    /// Tear down interactions and features. Returns `true` only for the call that did it.
    pub fn dispose(&mut self) -> bool {
        if self.disposed {
            return false;
        }
        self.disposed = true;
        self.interactions = Interactions::default();
        self.input = InputState::Idle;
        self.source.clear();
        true
    }

    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    // --- Viewport ---

    /// Update viewport dimensions (CSS pixels) and device pixel ratio.
    pub fn set_viewport(&mut self, width: f64, height: f64, dpr: f64) -> Vec<Action> {
        let next = Viewport { width, height, dpr };
        if self.disposed || next == self.viewport {
            return Vec::new();
        }
        self.viewport = next;
        vec![Action::RenderNeeded]
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        if self.disposed || button != Button::Primary {
            return Vec::new();
        }
        let mut actions = Vec::new();
        self.draw_claimed_click = false;

        // Vertex grabs only while no sketch is open; alt-clicks are deletions, handled on release.
        if !self.interactions.draw.is_drawing() && !modifiers.alt {
            let at = self.snapped(self.coordinate(screen_pt), None);
            let resolution = self.view.resolution();
            if let ModifyEvent::Started { feature } =
                self.interactions.modify.handle_down(&mut self.source, at, resolution)
            {
                self.input = InputState::ModifyingVertex { feature };
                actions.push(Action::ModifyStart { feature });
                self.set_cursor("grabbing", &mut actions);
                actions.push(Action::RenderNeeded);
                return actions;
            }
        }

        self.input = InputState::Pressed { down: screen_pt, last: screen_pt, panning: false };
        actions
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, _modifiers: Modifiers) -> Vec<Action> {
        if self.disposed {
            return Vec::new();
        }
        let mut actions = Vec::new();
        match self.input {
            InputState::ModifyingVertex { feature } => {
                let at = self.snapped(self.coordinate(screen_pt), Some(feature));
                if self.interactions.modify.handle_drag(&mut self.source, at) == ModifyEvent::Moved {
                    actions.push(Action::RenderNeeded);
                }
            }
            InputState::Pressed { down, last, panning } => {
                if !panning && InputState::within_click_tolerance(down, screen_pt) {
                    return actions;
                }
                self.view.pan_by_pixels(screen_pt.x - last.x, screen_pt.y - last.y);
                self.input = InputState::Pressed { down, last: screen_pt, panning: true };
                self.set_cursor("grabbing", &mut actions);
                actions.push(Action::ViewChanged);
                actions.push(Action::RenderNeeded);
            }
            InputState::Idle => self.hover(screen_pt, &mut actions),
        }
        actions
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        if self.disposed || button != Button::Primary {
            return Vec::new();
        }
        let mut actions = Vec::new();
        match std::mem::take(&mut self.input) {
            InputState::ModifyingVertex { .. } => {
                if let ModifyEvent::Ended { feature } = self.interactions.modify.handle_up() {
                    actions.push(Action::ModifyEnd { feature });
                }
                self.hover(screen_pt, &mut actions);
                actions.push(Action::RenderNeeded);
            }
            InputState::Pressed { panning: true, .. } => {
                self.set_cursor("default", &mut actions);
                self.hover(screen_pt, &mut actions);
            }
            InputState::Pressed { panning: false, .. } => self.click(screen_pt, modifiers, &mut actions),
            InputState::Idle => {}
        }
        actions
    }

    /// Pointer left the canvas: drop the hover marker.
    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        if self.disposed {
            return Vec::new();
        }
        let mut actions = Vec::new();
        if self.interactions.modify.clear_hover() {
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta, _modifiers: Modifiers) -> Vec<Action> {
        if self.disposed || delta.dy.abs() < f64::EPSILON {
            return Vec::new();
        }
        let step = (delta.dy / WHEEL_DELTA_PER_ZOOM).clamp(-ZOOM_STEP, ZOOM_STEP);
        self.zoom_to(self.view.zoom - step, screen_pt)
    }

    /// Double-click zooms in one step at the pointer; with shift it zooms out.
    /// Ignored while a sketch is open or when its clicks started, extended or finished one.
    pub fn on_double_click(&mut self, screen_pt: Point, modifiers: Modifiers) -> Vec<Action> {
        if self.disposed || self.interactions.draw.is_drawing() || self.draw_claimed_click {
            return Vec::new();
        }
        let step = if modifiers.shift { -ZOOM_STEP } else { ZOOM_STEP };
        self.zoom_to(self.view.zoom + step, screen_pt)
    }

    pub fn on_key_down(&mut self, key: Key, modifiers: Modifiers) -> Vec<Action> {
        if self.disposed || modifiers.ctrl || modifiers.meta {
            return Vec::new();
        }
        match key.0.as_str() {
            "Escape" => {
                let event = self.interactions.draw.abort_drawing();
                self.draw_event(event)
            }
            "Backspace" => {
                let event = self.interactions.draw.remove_last_point();
                self.draw_event(event)
            }
            "ArrowLeft" => self.pan_by(KEYBOARD_PAN_PX, 0.0),
            "ArrowRight" => self.pan_by(-KEYBOARD_PAN_PX, 0.0),
            "ArrowUp" => self.pan_by(0.0, KEYBOARD_PAN_PX),
            "ArrowDown" => self.pan_by(0.0, -KEYBOARD_PAN_PX),
            "+" | "=" => self.zoom_by(ZOOM_STEP),
            "-" | "_" => self.zoom_by(-ZOOM_STEP),
            _ => Vec::new(),
        }
    }

    /// Zoom by `delta` levels around the viewport center.
    pub fn zoom_by(&mut self, delta: f64) -> Vec<Action> {
        if self.disposed {
            return Vec::new();
        }
        self.zoom_to(self.view.zoom + delta, self.viewport.center())
    }

    // --- Queries ---

    /// Geometry of the open draw sketch, if any.
    #[must_use]
    pub fn sketch_geometry(&self) -> Option<Geometry> {
        self.interactions.draw.sketch_geometry()
    }

    /// Floating vertex of the open draw sketch.
    #[must_use]
    pub fn sketch_cursor(&self) -> Option<Point> {
        self.interactions.draw.sketch().map(|s| s.cursor)
    }

    /// Vertex marker shown by the modify interaction.
    #[must_use]
    pub fn hover_vertex(&self) -> Option<Point> {
        self.interactions.modify.hover_vertex()
    }

    /// Tiles covering the viewport at the tile zoom matching the view.
    #[must_use]
    pub fn visible_tiles(&self) -> Vec<TileCoord> {
        if self.viewport.width <= 0.0 || self.viewport.height <= 0.0 {
            return Vec::new();
        }
        let z = z_for_zoom(self.view.zoom, self.tile_source.max_zoom);
        tiles_for_extent(&self.view.extent(&self.viewport), z)
    }

    #[must_use]
    pub fn cursor(&self) -> &'static str {
        self.cursor
    }

    // --- Internals ---

    fn coordinate(&self, screen_pt: Point) -> Point {
        self.view.pixel_to_coordinate(screen_pt, &self.viewport)
    }

    fn snapped(&self, at: Point, exclude: Option<FeatureId>) -> Point {
        self.interactions.snap.snap_or_keep(&self.source, at, self.view.resolution(), exclude)
    }

    fn set_cursor(&mut self, cursor: &'static str, actions: &mut Vec<Action>) {
        if self.cursor != cursor {
            self.cursor = cursor;
            actions.push(Action::SetCursor(cursor.to_owned()));
        }
    }

    /// Pointer moving with no button held: move the sketch or the modify marker.
    fn hover(&mut self, screen_pt: Point, actions: &mut Vec<Action>) {
        let at = self.coordinate(screen_pt);
        if self.interactions.draw.is_drawing() {
            let snapped = self.snapped(at, None);
            self.interactions.draw.handle_move(snapped);
            self.interactions.modify.clear_hover();
            self.set_cursor("default", actions);
            actions.push(Action::RenderNeeded);
            return;
        }
        let resolution = self.view.resolution();
        if self.interactions.modify.update_hover(&self.source, at, resolution) {
            actions.push(Action::RenderNeeded);
        }
        let cursor = if self.interactions.modify.hover_vertex().is_some() { "pointer" } else { "default" };
        self.set_cursor(cursor, actions);
    }

    fn click(&mut self, screen_pt: Point, modifiers: Modifiers, actions: &mut Vec<Action>) {
        let at = self.coordinate(screen_pt);
        let resolution = self.view.resolution();

        if modifiers.alt && !self.interactions.draw.is_drawing() {
            if let ModifyEvent::VertexRemoved { feature } =
                self.interactions.modify.remove_vertex_at(&mut self.source, at, resolution)
            {
                actions.push(Action::VertexRemoved { feature });
                actions.push(Action::RenderNeeded);
                return;
            }
        }

        let snapped = self.snapped(at, None);
        let event = self.interactions.draw.handle_click(snapped, resolution);
        self.draw_claimed_click = event != DrawEvent::None;
        actions.extend(self.draw_event(event));
    }

    fn draw_event(&mut self, event: DrawEvent) -> Vec<Action> {
        match event {
            DrawEvent::None => Vec::new(),
            DrawEvent::Started => {
                self.interactions.modify.clear_hover();
                vec![Action::DrawStart, Action::RenderNeeded]
            }
            DrawEvent::VertexAdded | DrawEvent::VertexRemoved => vec![Action::RenderNeeded],
            DrawEvent::Finished(geometry) => {
                let feature = self.source.add_geometry(geometry.clone());
                vec![Action::DrawEnd { feature, geometry }, Action::RenderNeeded]
            }
            DrawEvent::Aborted => vec![Action::DrawAbort, Action::RenderNeeded],
        }
    }

    fn pan_by(&mut self, dx: f64, dy: f64) -> Vec<Action> {
        self.view.pan_by_pixels(dx, dy);
        vec![Action::ViewChanged, Action::RenderNeeded]
    }

    fn zoom_to(&mut self, zoom: f64, anchor: Point) -> Vec<Action> {
        let before = self.view;
        self.view.zoom_at(zoom, anchor, &self.viewport);
        if self.view == before {
            return Vec::new();
        }
        vec![Action::ViewChanged, Action::RenderNeeded]
    }
}

/// The full map engine. Wraps `EngineCore` and owns the browser canvas element
/// and the tile images requested for it.
pub struct Engine {
    canvas: HtmlCanvasElement,
    pub core: EngineCore,
    tiles: TileCache,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    ///
    /// `on_tile_ready` is called whenever a tile image finishes loading.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement, options: MapOptions, on_tile_ready: Rc<dyn Fn()>) -> Self {
        log::debug!("map created at zoom {}", options.zoom);
        Self { canvas, core: EngineCore::new(options), tiles: TileCache::new(on_tile_ready) }
    }

    // --- Lifecycle ---

    /// Detach tile handlers, drop cached images and stop reacting to input.
    pub fn dispose(&mut self) -> bool {
        if !self.core.dispose() {
            return false;
        }
        self.tiles.clear();
        log::debug!("map disposed");
        true
    }

    // --- Viewport ---

    /// Update viewport dimensions and resize the canvas backing store to match.
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) -> Vec<Action> {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let (width_px, height_px) = ((width_css * dpr).round() as u32, (height_css * dpr).round() as u32);
        if self.canvas.width() != width_px {
            self.canvas.set_width(width_px);
        }
        if self.canvas.height() != height_px {
            self.canvas.set_height(height_px);
        }
        self.core.set_viewport(width_css, height_css, dpr)
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_down(screen_pt, button, modifiers)
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_move(screen_pt, modifiers)
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_up(screen_pt, button, modifiers)
    }

    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.core.on_pointer_leave()
    }

    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_wheel(screen_pt, delta, modifiers)
    }

    pub fn on_double_click(&mut self, screen_pt: Point, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_double_click(screen_pt, modifiers)
    }

    pub fn on_key_down(&mut self, key: Key, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_key_down(key, modifiers)
    }

    pub fn zoom_by(&mut self, delta: f64) -> Vec<Action> {
        self.core.zoom_by(delta)
    }

    // --- Render ---

    /// Request missing tiles and draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or a `Canvas2D` call fails.
    pub fn render(&mut self) -> Result<(), JsValue> {
        if self.core.is_disposed() {
            return Ok(());
        }
        let tiles = self.core.visible_tiles();
        for coord in &tiles {
            self.tiles.request(*coord, &self.core.tile_source)?;
        }
        self.tiles.prune(&tiles);

        let ctx = self
            .canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        render::draw(&ctx, &self.core, &tiles, &self.tiles)
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn view(&self) -> MapView {
        self.core.view
    }

    #[must_use]
    pub fn attribution(&self) -> &str {
        &self.core.tile_source.attribution
    }
}
