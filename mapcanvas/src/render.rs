//! Rendering: draws the map scene to a 2D context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! It receives read-only views of engine state and tile images and produces
//! pixels; it does not mutate any application state.
//!
//! Layers, bottom first: raster tiles, vector features, the draw sketch, and
//! the modify vertex marker. Geometry is converted to CSS pixels through the
//! view before drawing; the device pixel ratio is applied once as a transform.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

use std::f64::consts::TAU;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::engine::EngineCore;
use crate::geom::{Geometry, Point};
use crate::style::{CircleStyle, Style, editing_styles};
use crate::tile::TileCoord;
use crate::tile_cache::TileCache;
use crate::view::{MapView, Viewport};

/// Background shown where no tile has loaded yet.
const BACKGROUND: &str = "#f2efe9";

/// Draw the full scene.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(
    ctx: &CanvasRenderingContext2d,
    core: &EngineCore,
    tiles: &[TileCoord],
    cache: &TileCache,
) -> Result<(), JsValue> {
    let viewport = &core.viewport;
    let view = &core.view;

    // Layer 1: clear and set up the DPR transform.
    ctx.set_transform(viewport.dpr, 0.0, 0.0, viewport.dpr, 0.0, 0.0)?;
    ctx.set_fill_style_str(BACKGROUND);
    ctx.fill_rect(0.0, 0.0, viewport.width, viewport.height);

    // Layer 2: raster tiles.
    for &coord in tiles {
        if let Some(image) = cache.loaded(coord) {
            let extent = coord.extent();
            let top_left = view.coordinate_to_pixel(Point::new(extent.min_x, extent.max_y), viewport);
            let bottom_right = view.coordinate_to_pixel(Point::new(extent.max_x, extent.min_y), viewport);
            // Rounded edges keep neighbouring tiles from leaving hairline seams.
            let (x0, y0) = (top_left.x.round(), top_left.y.round());
            let (x1, y1) = (bottom_right.x.round(), bottom_right.y.round());
            ctx.draw_image_with_html_image_element_and_dw_and_dh(image, x0, y0, x1 - x0, y1 - y0)?;
        }
    }

    // Layer 3: vector features.
    for feature in core.source.features() {
        draw_geometry(ctx, &feature.geometry, &core.style, view, viewport)?;
    }

    // Layer 4: draw sketch with its floating vertex.
    if let Some(sketch) = core.sketch_geometry() {
        let styles = editing_styles();
        for style in &styles {
            draw_geometry(ctx, &sketch, style, view, viewport)?;
        }
        if let Some(cursor) = core.sketch_cursor() {
            let pixel = view.coordinate_to_pixel(cursor, viewport);
            for marker in styles.iter().filter_map(|s| s.image.as_ref()) {
                draw_marker(ctx, pixel, marker)?;
            }
        }
    }

    // Layer 5: modify vertex marker.
    if let (Some(vertex), Some(marker)) = (core.hover_vertex(), core.style.image.as_ref()) {
        draw_marker(ctx, view.coordinate_to_pixel(vertex, viewport), marker)?;
    }

    Ok(())
}

// =============================================================
// Geometry
// =============================================================

fn draw_geometry(
    ctx: &CanvasRenderingContext2d,
    geometry: &Geometry,
    style: &Style,
    view: &MapView,
    viewport: &Viewport,
) -> Result<(), JsValue> {
    let to_pixel = |p: Point| view.coordinate_to_pixel(p, viewport);
    match geometry {
        Geometry::Point(p) => {
            if let Some(marker) = &style.image {
                draw_marker(ctx, to_pixel(*p), marker)?;
            }
        }
        Geometry::LineString(coords) => {
            ctx.begin_path();
            trace_path(ctx, coords, to_pixel, false);
            apply_stroke(ctx, style);
        }
        Geometry::Polygon(rings) => {
            ctx.begin_path();
            for ring in rings {
                trace_path(ctx, ring, to_pixel, true);
            }
            if let Some(fill) = &style.fill {
                ctx.set_fill_style_str(&fill.color);
                ctx.fill();
            }
            apply_stroke(ctx, style);
        }
    }
    Ok(())
}

fn trace_path(ctx: &CanvasRenderingContext2d, coords: &[Point], to_pixel: impl Fn(Point) -> Point, close: bool) {
    let mut pixels = coords.iter().map(|c| to_pixel(*c));
    let Some(first) = pixels.next() else {
        return;
    };
    ctx.move_to(first.x, first.y);
    for p in pixels {
        ctx.line_to(p.x, p.y);
    }
    if close {
        ctx.close_path();
    }
}

fn apply_stroke(ctx: &CanvasRenderingContext2d, style: &Style) {
    let Some(stroke) = &style.stroke else {
        return;
    };
    ctx.set_line_join("round");
    ctx.set_line_cap("round");
    ctx.set_stroke_style_str(&stroke.color);
    ctx.set_line_width(stroke.width);
    ctx.stroke();
}

// =============================================================
// Markers
// =============================================================

fn draw_marker(ctx: &CanvasRenderingContext2d, at: Point, marker: &CircleStyle) -> Result<(), JsValue> {
    ctx.begin_path();
    ctx.arc(at.x, at.y, marker.radius, 0.0, TAU)?;
    if let Some(fill) = &marker.fill {
        ctx.set_fill_style_str(&fill.color);
        ctx.fill();
    }
    if let Some(stroke) = &marker.stroke {
        ctx.set_stroke_style_str(&stroke.color);
        ctx.set_line_width(stroke.width);
        ctx.stroke();
    }
    Ok(())
}
