//! DOM event to engine input mapping.

#[cfg(feature = "hydrate")]
use mapcanvas::geom::Point;
#[cfg(feature = "hydrate")]
use mapcanvas::input::{Button, Key, Modifiers, WheelDelta};

/// Pixels per line for wheel events reported in `DOM_DELTA_LINE` units.
const WHEEL_LINE_PX: f64 = 40.0;
/// Pixels per page for wheel events reported in `DOM_DELTA_PAGE` units.
const WHEEL_PAGE_PX: f64 = 800.0;

/// Factor that turns a wheel delta in `delta_mode` units into pixels.
pub fn wheel_delta_scale(delta_mode: u32) -> f64 {
    match delta_mode {
        1 => WHEEL_LINE_PX,
        2 => WHEEL_PAGE_PX,
        _ => 1.0,
    }
}

/// Keys the engine handles; the browser default (scrolling, navigation) is suppressed for them.
pub fn should_prevent_default_key(key: &str) -> bool {
    matches!(
        key,
        "Escape" | "Backspace" | "ArrowLeft" | "ArrowRight" | "ArrowUp" | "ArrowDown" | "+" | "=" | "-" | "_"
    )
}

#[cfg(feature = "hydrate")]
pub fn map_modifiers(shift: bool, ctrl: bool, alt: bool, meta: bool) -> Modifiers {
    Modifiers { shift, ctrl, alt, meta }
}

#[cfg(feature = "hydrate")]
pub fn pointer_modifiers(ev: &leptos::ev::PointerEvent) -> Modifiers {
    map_modifiers(ev.shift_key(), ev.ctrl_key(), ev.alt_key(), ev.meta_key())
}

#[cfg(feature = "hydrate")]
pub fn pointer_button(ev: &leptos::ev::PointerEvent) -> Button {
    Button::from_dom(ev.button())
}

#[cfg(feature = "hydrate")]
pub fn pointer_point(ev: &leptos::ev::PointerEvent) -> Point {
    Point::new(f64::from(ev.offset_x()), f64::from(ev.offset_y()))
}

#[cfg(feature = "hydrate")]
pub fn mouse_point(ev: &leptos::ev::MouseEvent) -> Point {
    Point::new(f64::from(ev.offset_x()), f64::from(ev.offset_y()))
}

#[cfg(feature = "hydrate")]
pub fn mouse_modifiers(ev: &leptos::ev::MouseEvent) -> Modifiers {
    map_modifiers(ev.shift_key(), ev.ctrl_key(), ev.alt_key(), ev.meta_key())
}

#[cfg(feature = "hydrate")]
pub fn wheel_point(ev: &leptos::ev::WheelEvent) -> Point {
    Point::new(f64::from(ev.offset_x()), f64::from(ev.offset_y()))
}

#[cfg(feature = "hydrate")]
pub fn wheel_delta(ev: &leptos::ev::WheelEvent) -> WheelDelta {
    let scale = wheel_delta_scale(ev.delta_mode());
    WheelDelta { dx: ev.delta_x() * scale, dy: ev.delta_y() * scale }
}

#[cfg(feature = "hydrate")]
pub fn keyboard_key(ev: &leptos::ev::KeyboardEvent) -> (Key, Modifiers) {
    (Key(ev.key()), map_modifiers(ev.shift_key(), ev.ctrl_key(), ev.alt_key(), ev.meta_key()))
}

#[cfg(test)]
#[path = "canvas_input_test.rs"]
mod canvas_input_test;
