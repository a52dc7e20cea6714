#![allow(clippy::float_cmp)]

use super::*;
use crate::consts::WEB_MERCATOR_HALF_SIZE;
use crate::proj::from_lon_lat;
use crate::sphere::Measurement;

// =============================================================
// Helpers
// =============================================================

/// Perimeter and area of the 1°×1° square at the origin on the mean-radius sphere.
const DEGREE_SQUARE_PERIMETER_M: f64 = 444_763.384_955_006_4;
const DEGREE_SQUARE_AREA_M2: f64 = 12_363_718_145.179_935;

fn no_modifiers() -> Modifiers {
    Modifiers::default()
}

fn alt_modifier() -> Modifiers {
    Modifiers { alt: true, ..Default::default() }
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

/// Core with a 1024×1024 viewport at zoom 2 (the whole world in view).
fn world_core() -> EngineCore {
    let mut core = EngineCore::default();
    core.set_viewport(1024.0, 1024.0, 1.0);
    core
}

/// Core zoomed so that one degree spans several hundred pixels around (0.5°, 0.5°).
fn degree_core() -> EngineCore {
    let options = MapOptions { center: from_lon_lat(pt(0.5, 0.5)), zoom: 10.0, ..MapOptions::default() };
    let mut core = EngineCore::new(options);
    core.set_viewport(1024.0, 1024.0, 1.0);
    core
}

fn pixel_of(core: &EngineCore, lon: f64, lat: f64) -> Point {
    core.view.coordinate_to_pixel(from_lon_lat(pt(lon, lat)), &core.viewport)
}

fn click_with(core: &mut EngineCore, at: Point, modifiers: Modifiers) -> Vec<Action> {
    let mut actions = core.on_pointer_down(at, Button::Primary, modifiers);
    actions.extend(core.on_pointer_up(at, Button::Primary, modifiers));
    actions
}

fn click(core: &mut EngineCore, at: Point) -> Vec<Action> {
    click_with(core, at, no_modifiers())
}

/// Draw the degree square and return the actions of the finishing click.
fn draw_degree_square(core: &mut EngineCore) -> Vec<Action> {
    let corners = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];
    for (lon, lat) in corners {
        let at = pixel_of(core, lon, lat);
        core.on_pointer_move(at, no_modifiers());
        click(core, at);
    }
    let first = pixel_of(core, 0.0, 0.0);
    click(core, first)
}

fn draw_end(actions: &[Action]) -> Option<(FeatureId, Geometry)> {
    actions.iter().find_map(|a| match a {
        Action::DrawEnd { feature, geometry } => Some((*feature, geometry.clone())),
        _ => None,
    })
}

fn assert_close(actual: f64, expected: f64) {
    let relative = ((actual - expected) / expected).abs();
    assert!(relative < 1e-6, "expected {expected}, got {actual}");
}

fn outer_ring(core: &EngineCore, id: FeatureId) -> Vec<Point> {
    match &core.source.get(&id).unwrap().geometry {
        Geometry::Polygon(rings) => rings[0].clone(),
        other => panic!("expected polygon, got {other:?}"),
    }
}

// =============================================================
// Construction and lifecycle
// =============================================================

#[test]
fn default_map_opens_at_origin_zoom_two() {
    let core = EngineCore::default();
    assert_eq!(core.view.center, pt(0.0, 0.0));
    assert_eq!(core.view.zoom, 2.0);
    assert!(core.source.is_empty());
    assert!(!core.is_disposed());
    assert_eq!(core.tile_source, TileSource::osm());
    assert_eq!(core.style, Style::measurement());
}

#[test]
fn dispose_happens_exactly_once() {
    let mut core = world_core();
    assert!(core.dispose());
    assert!(core.is_disposed());
    assert!(!core.dispose());
}

#[test]
fn disposed_core_ignores_all_input() {
    let mut core = degree_core();
    draw_degree_square(&mut core);
    core.dispose();
    assert!(core.source.is_empty());

    let at = pt(500.0, 500.0);
    assert!(core.on_pointer_down(at, Button::Primary, no_modifiers()).is_empty());
    assert!(core.on_pointer_move(at, no_modifiers()).is_empty());
    assert!(core.on_pointer_up(at, Button::Primary, no_modifiers()).is_empty());
    assert!(core.on_wheel(at, WheelDelta { dx: 0.0, dy: -1.0 }, no_modifiers()).is_empty());
    assert!(core.on_key_down(Key("ArrowLeft".into()), no_modifiers()).is_empty());
    assert!(core.zoom_by(1.0).is_empty());
    assert!(core.on_double_click(at, no_modifiers()).is_empty());
    assert!(core.set_viewport(10.0, 10.0, 1.0).is_empty());
    assert!(core.on_pointer_leave().is_empty());
    assert!(core.sketch_geometry().is_none());
}

#[test]
fn set_viewport_requests_render_only_on_change() {
    let mut core = EngineCore::default();
    assert_eq!(core.set_viewport(800.0, 600.0, 2.0), vec![Action::RenderNeeded]);
    assert!(core.set_viewport(800.0, 600.0, 2.0).is_empty());
    assert_eq!(core.viewport, Viewport { width: 800.0, height: 600.0, dpr: 2.0 });
}

// =============================================================
// Draw
// =============================================================

#[test]
fn first_click_starts_draw() {
    let mut core = degree_core();
    let actions = click(&mut core, pt(100.0, 100.0));
    assert!(actions.contains(&Action::DrawStart));
    assert!(core.sketch_geometry().is_some());
}

#[test]
fn completed_draw_reports_spherical_measurement() {
    let mut core = degree_core();
    let actions = draw_degree_square(&mut core);
    let (feature, geometry) = draw_end(&actions).expect("draw end");

    let measurement = Measurement::of(&geometry);
    assert_close(measurement.length, DEGREE_SQUARE_PERIMETER_M);
    assert_close(measurement.area, DEGREE_SQUARE_AREA_M2);

    assert_eq!(core.source.len(), 1);
    assert_eq!(core.source.get(&feature).unwrap().geometry, geometry);
    assert!(core.sketch_geometry().is_none());
}

#[test]
fn finished_polygon_is_closed() {
    let mut core = degree_core();
    let (_, geometry) = draw_end(&draw_degree_square(&mut core)).unwrap();
    let Geometry::Polygon(rings) = geometry else {
        panic!("expected polygon");
    };
    assert_eq!(rings.len(), 1);
    assert_eq!(rings[0].len(), 5);
    assert_eq!(rings[0][0], rings[0][4]);
}

#[test]
fn escape_aborts_without_draw_end() {
    let mut core = degree_core();
    click(&mut core, pt(100.0, 100.0));
    click(&mut core, pt(400.0, 100.0));
    let actions = core.on_key_down(Key("Escape".into()), no_modifiers());
    assert!(actions.contains(&Action::DrawAbort));
    assert!(draw_end(&actions).is_none());
    assert!(core.source.is_empty());
    assert!(core.sketch_geometry().is_none());
}

#[test]
fn escape_without_sketch_does_nothing() {
    let mut core = degree_core();
    assert!(core.on_key_down(Key("Escape".into()), no_modifiers()).is_empty());
}

#[test]
fn backspace_removes_last_vertex() {
    let mut core = degree_core();
    click(&mut core, pt(100.0, 100.0));
    click(&mut core, pt(400.0, 100.0));
    let actions = core.on_key_down(Key("Backspace".into()), no_modifiers());
    assert_eq!(actions, vec![Action::RenderNeeded]);
    assert_eq!(core.interactions.draw.sketch().unwrap().vertices.len(), 1);
}

#[test]
fn sketch_follows_pointer() {
    let mut core = degree_core();
    click(&mut core, pt(100.0, 100.0));
    core.on_pointer_move(pt(300.0, 250.0), no_modifiers());
    let cursor = core.sketch_cursor().unwrap();
    let expected = core.view.pixel_to_coordinate(pt(300.0, 250.0), &core.viewport);
    assert_eq!(cursor, expected);
}

#[test]
fn small_jitter_still_counts_as_click() {
    let mut core = degree_core();
    core.on_pointer_down(pt(100.0, 100.0), Button::Primary, no_modifiers());
    core.on_pointer_move(pt(103.0, 102.0), no_modifiers());
    let actions = core.on_pointer_up(pt(103.0, 102.0), Button::Primary, no_modifiers());
    assert!(actions.contains(&Action::DrawStart));
}

#[test]
fn sketch_vertex_snaps_to_existing_vertex() {
    let mut core = degree_core();
    let (feature, _) = draw_end(&draw_degree_square(&mut core)).unwrap();
    let corner = outer_ring(&core, feature)[1];

    click(&mut core, pt(20.0, 20.0));
    let near = core.view.coordinate_to_pixel(corner, &core.viewport);
    click(&mut core, pt(near.x + 4.0, near.y - 3.0));
    let vertices = &core.interactions.draw.sketch().unwrap().vertices;
    assert_eq!(vertices[1], corner);
}

#[test]
fn secondary_button_is_ignored() {
    let mut core = degree_core();
    assert!(core.on_pointer_down(pt(100.0, 100.0), Button::Secondary, no_modifiers()).is_empty());
    assert!(core.on_pointer_up(pt(100.0, 100.0), Button::Secondary, no_modifiers()).is_empty());
    assert!(core.sketch_geometry().is_none());
}

// =============================================================
// Modify
// =============================================================

#[test]
fn dragging_vertex_emits_modify_events_but_no_draw_end() {
    let mut core = degree_core();
    let (feature, _) = draw_end(&draw_degree_square(&mut core)).unwrap();
    let corner = pixel_of(&core, 1.0, 1.0);

    let down = core.on_pointer_down(corner, Button::Primary, no_modifiers());
    assert!(down.contains(&Action::ModifyStart { feature }));
    assert!(matches!(core.input, InputState::ModifyingVertex { .. }));

    let target = pt(corner.x + 50.0, corner.y - 50.0);
    assert_eq!(core.on_pointer_move(target, no_modifiers()), vec![Action::RenderNeeded]);
    let up = core.on_pointer_up(target, Button::Primary, no_modifiers());
    assert!(up.contains(&Action::ModifyEnd { feature }));
    assert!(draw_end(&up).is_none());

    let moved = core.view.pixel_to_coordinate(target, &core.viewport);
    assert_eq!(outer_ring(&core, feature)[2], moved);
    assert!(core.sketch_geometry().is_none());
}

#[test]
fn dragging_first_vertex_keeps_ring_closed() {
    let mut core = degree_core();
    let (feature, _) = draw_end(&draw_degree_square(&mut core)).unwrap();
    let corner = pixel_of(&core, 0.0, 0.0);
    core.on_pointer_down(corner, Button::Primary, no_modifiers());
    core.on_pointer_move(pt(corner.x - 40.0, corner.y + 40.0), no_modifiers());
    core.on_pointer_up(pt(corner.x - 40.0, corner.y + 40.0), Button::Primary, no_modifiers());
    let ring = outer_ring(&core, feature);
    assert_eq!(ring[0], ring[ring.len() - 1]);
}

#[test]
fn press_on_vertex_during_sketch_does_not_modify() {
    let mut core = degree_core();
    draw_degree_square(&mut core);
    click(&mut core, pt(20.0, 20.0));
    let corner = pixel_of(&core, 1.0, 0.0);
    let down = core.on_pointer_down(corner, Button::Primary, no_modifiers());
    assert!(down.is_empty());
    assert!(matches!(core.input, InputState::Pressed { .. }));
}

#[test]
fn alt_click_removes_vertex() {
    let mut core = degree_core();
    let (feature, _) = draw_end(&draw_degree_square(&mut core)).unwrap();
    let corner = pixel_of(&core, 0.0, 1.0);
    let actions = click_with(&mut core, corner, alt_modifier());
    assert!(actions.contains(&Action::VertexRemoved { feature }));
    assert_eq!(outer_ring(&core, feature).len(), 4);
    assert!(core.sketch_geometry().is_none());
}

#[test]
fn hovering_vertex_shows_marker_and_pointer_cursor() {
    let mut core = degree_core();
    draw_degree_square(&mut core);
    let corner = pixel_of(&core, 1.0, 1.0);
    let actions = core.on_pointer_move(pt(corner.x + 2.0, corner.y), no_modifiers());
    assert!(actions.contains(&Action::SetCursor("pointer".into())));
    assert!(core.hover_vertex().is_some());

    let actions = core.on_pointer_leave();
    assert_eq!(actions, vec![Action::RenderNeeded]);
    assert!(core.hover_vertex().is_none());
}

#[test]
fn press_near_vertex_grabs_it_without_moving_it() {
    let mut core = degree_core();
    let (feature, _) = draw_end(&draw_degree_square(&mut core)).unwrap();
    let before = outer_ring(&core, feature);
    let corner = pixel_of(&core, 1.0, 0.0);
    let near = pt(corner.x - 4.0, corner.y + 3.0);

    let down = core.on_pointer_down(near, Button::Primary, no_modifiers());
    assert!(down.contains(&Action::ModifyStart { feature }));
    assert_eq!(core.hover_vertex(), Some(before[1]));
    let up = core.on_pointer_up(near, Button::Primary, no_modifiers());
    assert!(up.contains(&Action::ModifyEnd { feature }));
    assert_eq!(outer_ring(&core, feature), before);
}

#[test]
fn press_near_edge_inserts_vertex_on_the_edge() {
    let mut core = degree_core();
    let (feature, _) = draw_end(&draw_degree_square(&mut core)).unwrap();
    let edge = pixel_of(&core, 0.0, 0.5);
    let press = pt(edge.x + 5.0, edge.y);

    let down = core.on_pointer_down(press, Button::Primary, no_modifiers());
    assert!(down.contains(&Action::ModifyStart { feature }));
    core.on_pointer_up(press, Button::Primary, no_modifiers());

    let ring = outer_ring(&core, feature);
    assert_eq!(ring.len(), 6);
    let expected_y = core.view.pixel_to_coordinate(press, &core.viewport).y;
    assert!(ring.iter().any(|p| p.x.abs() < 1e-6 && (p.y - expected_y).abs() < 1e-6));
}

#[test]
fn cursor_after_vertex_drag_follows_what_is_under_the_pointer() {
    let mut core = degree_core();
    draw_degree_square(&mut core);
    let corner = pixel_of(&core, 1.0, 1.0);
    let target = pt(corner.x + 50.0, corner.y - 50.0);

    core.on_pointer_down(corner, Button::Primary, no_modifiers());
    core.on_pointer_move(target, no_modifiers());
    let up = core.on_pointer_up(target, Button::Primary, no_modifiers());
    assert!(up.contains(&Action::SetCursor("pointer".into())));
    assert_eq!(core.hover_vertex(), Some(core.view.pixel_to_coordinate(target, &core.viewport)));

    // Release lands away from the dragged vertex when the last move event is missed.
    let second = pt(target.x - 30.0, target.y + 30.0);
    core.on_pointer_down(target, Button::Primary, no_modifiers());
    core.on_pointer_move(second, no_modifiers());
    let up = core.on_pointer_up(pt(20.0, 20.0), Button::Primary, no_modifiers());
    assert!(up.contains(&Action::SetCursor("default".into())));
    assert_eq!(core.cursor(), "default");
    assert!(core.hover_vertex().is_none());
}

// =============================================================
// Pan and zoom
// =============================================================

#[test]
fn drag_on_empty_map_pans() {
    let mut core = world_core();
    let res = core.view.resolution();
    core.on_pointer_down(pt(500.0, 500.0), Button::Primary, no_modifiers());
    let actions = core.on_pointer_move(pt(600.0, 450.0), no_modifiers());
    assert!(actions.contains(&Action::ViewChanged));
    assert!(actions.contains(&Action::SetCursor("grabbing".into())));
    assert!((core.view.center.x - (-100.0 * res)).abs() < 1e-6);
    assert!((core.view.center.y - (-50.0 * res)).abs() < 1e-6);

    let up = core.on_pointer_up(pt(600.0, 450.0), Button::Primary, no_modifiers());
    assert!(!up.contains(&Action::DrawStart));
    assert!(core.sketch_geometry().is_none());
    assert_eq!(core.input, InputState::Idle);
}

#[test]
fn wheel_zooms_around_pointer() {
    let mut core = world_core();
    let anchor = pt(300.0, 700.0);
    let before = core.view.pixel_to_coordinate(anchor, &core.viewport);
    let actions = core.on_wheel(anchor, WheelDelta { dx: 0.0, dy: -100.0 }, no_modifiers());
    assert_eq!(actions, vec![Action::ViewChanged, Action::RenderNeeded]);
    assert_eq!(core.view.zoom, 3.0);
    let after = core.view.pixel_to_coordinate(anchor, &core.viewport);
    assert!(before.distance(after) < 1e-6);

    core.on_wheel(anchor, WheelDelta { dx: 0.0, dy: 100.0 }, no_modifiers());
    assert_eq!(core.view.zoom, 2.0);
}

#[test]
fn small_wheel_deltas_zoom_proportionally() {
    let mut core = world_core();
    let anchor = pt(512.0, 512.0);
    for _ in 0..10 {
        core.on_wheel(anchor, WheelDelta { dx: 0.0, dy: -1.0 }, no_modifiers());
    }
    assert!((core.view.zoom - 2.1).abs() < 1e-9, "zoom {}", core.view.zoom);
}

#[test]
fn large_wheel_delta_zooms_at_most_one_step() {
    let mut core = world_core();
    core.on_wheel(pt(512.0, 512.0), WheelDelta { dx: 0.0, dy: -1000.0 }, no_modifiers());
    assert_eq!(core.view.zoom, 3.0);
    core.on_wheel(pt(512.0, 512.0), WheelDelta { dx: 0.0, dy: 450.0 }, no_modifiers());
    assert_eq!(core.view.zoom, 2.0);
}

#[test]
fn horizontal_wheel_does_not_zoom() {
    let mut core = world_core();
    assert!(core.on_wheel(pt(1.0, 1.0), WheelDelta { dx: 30.0, dy: 0.0 }, no_modifiers()).is_empty());
}

#[test]
fn zoom_stops_at_limits() {
    let mut core = world_core();
    core.view.set_zoom(28.0);
    assert!(core.zoom_by(1.0).is_empty());
    core.view.set_zoom(0.0);
    assert!(core.zoom_by(-1.0).is_empty());
}

#[test]
fn arrow_keys_pan_by_fixed_pixels() {
    let mut core = world_core();
    let res = core.view.resolution();
    core.on_key_down(Key("ArrowLeft".into()), no_modifiers());
    assert!((core.view.center.x + 128.0 * res).abs() < 1e-6);
    core.on_key_down(Key("ArrowUp".into()), no_modifiers());
    assert!((core.view.center.y - 128.0 * res).abs() < 1e-6);
}

#[test]
fn plus_and_minus_keys_zoom() {
    let mut core = world_core();
    core.on_key_down(Key("+".into()), no_modifiers());
    assert_eq!(core.view.zoom, 3.0);
    core.on_key_down(Key("-".into()), no_modifiers());
    assert_eq!(core.view.zoom, 2.0);
}

#[test]
fn keys_with_ctrl_are_left_to_the_browser() {
    let mut core = world_core();
    let ctrl = Modifiers { ctrl: true, ..Default::default() };
    assert!(core.on_key_down(Key("+".into()), ctrl).is_empty());
    assert_eq!(core.view.zoom, 2.0);
}

#[test]
fn panning_north_stops_at_the_edge_of_the_world() {
    let mut core = world_core();
    for _ in 0..50 {
        core.on_key_down(Key("ArrowUp".into()), no_modifiers());
    }
    assert_eq!(core.view.center.y, WEB_MERCATOR_HALF_SIZE);

    let tiles = core.visible_tiles();
    assert!(!tiles.is_empty());
    assert!(tiles.iter().any(|t| t.y == 0));
    assert!(tiles.iter().all(|t| (0..4).contains(&t.y)));
}

#[test]
fn dragging_the_map_south_stops_at_the_edge_of_the_world() {
    let mut core = world_core();
    core.on_pointer_down(pt(500.0, 900.0), Button::Primary, no_modifiers());
    for step in 1..=40 {
        core.on_pointer_move(pt(500.0, 900.0 - f64::from(step) * 100.0), no_modifiers());
    }
    assert_eq!(core.view.center.y, -WEB_MERCATOR_HALF_SIZE);
}

// =============================================================
// Double-click zoom
// =============================================================

#[test]
fn double_click_zooms_in_around_pointer() {
    let mut core = world_core();
    let anchor = pt(300.0, 700.0);
    let before = core.view.pixel_to_coordinate(anchor, &core.viewport);
    let actions = core.on_double_click(anchor, no_modifiers());
    assert_eq!(actions, vec![Action::ViewChanged, Action::RenderNeeded]);
    assert_eq!(core.view.zoom, 3.0);
    let after = core.view.pixel_to_coordinate(anchor, &core.viewport);
    assert!(before.distance(after) < 1e-6);
}

#[test]
fn shift_double_click_zooms_out() {
    let mut core = world_core();
    let shift = Modifiers { shift: true, ..Default::default() };
    core.on_double_click(pt(512.0, 512.0), shift);
    assert_eq!(core.view.zoom, 1.0);
}

#[test]
fn double_click_while_sketching_does_not_zoom() {
    let mut core = degree_core();
    let at = pixel_of(&core, 0.2, 0.2);
    click(&mut core, at);
    click(&mut core, at);
    assert!(core.sketch_geometry().is_some());
    assert!(core.on_double_click(at, no_modifiers()).is_empty());
    assert_eq!(core.view.zoom, 10.0);
}

#[test]
fn double_click_that_finishes_a_polygon_does_not_zoom() {
    let mut core = degree_core();
    for (lon, lat) in [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)] {
        let at = pixel_of(&core, lon, lat);
        click(&mut core, at);
    }
    let last = pixel_of(&core, 1.0, 1.0);
    let actions = click(&mut core, last);
    assert!(draw_end(&actions).is_some());
    assert!(core.on_double_click(last, no_modifiers()).is_empty());
    assert_eq!(core.view.zoom, 10.0);
}

#[test]
fn double_click_on_a_vertex_zooms() {
    let mut core = degree_core();
    draw_degree_square(&mut core);
    let corner = pixel_of(&core, 1.0, 1.0);
    click(&mut core, corner);
    click(&mut core, corner);
    assert!(core.sketch_geometry().is_none());
    assert_eq!(core.on_double_click(corner, no_modifiers()), vec![Action::ViewChanged, Action::RenderNeeded]);
    assert_eq!(core.view.zoom, 11.0);
}

// =============================================================
// Tiles
// =============================================================

#[test]
fn world_view_covers_sixteen_tiles_at_zoom_two() {
    let core = world_core();
    let tiles = core.visible_tiles();
    assert_eq!(tiles.len(), 16);
    assert!(tiles.iter().all(|t| t.z == 2));
}

#[test]
fn no_tiles_before_viewport_is_known() {
    assert!(EngineCore::default().visible_tiles().is_empty());
}
