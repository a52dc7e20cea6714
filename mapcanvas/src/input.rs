//! Input model: modifier keys, mouse buttons, and the gesture state machine.
//!
//! `InputState` is the gesture tracked between pointer-down and pointer-up.
//! A press starts as a potential click; once the pointer travels past the
//! click tolerance it becomes a pan. Presses claimed by the modify
//! interaction become vertex drags instead.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::consts::CLICK_TOLERANCE_PX;
use crate::geom::Point;
use crate::source::FeatureId;

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

impl Button {
    /// Map a DOM `MouseEvent.button` value.
    #[must_use]
    pub fn from_dom(button: i16) -> Self {
        match button {
            1 => Self::Middle,
            2 => Self::Secondary,
            _ => Self::Primary,
        }
    }
}

/// A keyboard key.
///
/// The inner string holds the key name as reported by the browser (e.g. `"Escape"`, `"ArrowLeft"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// Internal state for the input state machine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// Primary button is down on empty map: a click until it moves too far, then a pan.
    Pressed {
        /// Screen-space position of the pointer-down.
        down: Point,
        /// Screen-space position of the previous pointer event, used to compute pan delta.
        last: Point,
        /// Set once the pointer left the click tolerance.
        panning: bool,
    },
    /// A vertex of `feature` is being dragged by the modify interaction.
    ModifyingVertex {
        feature: FeatureId,
    },
}

impl InputState {
    /// Whether a pointer travelling from `down` to `at` is still a click.
    #[must_use]
    pub fn within_click_tolerance(down: Point, at: Point) -> bool {
        down.distance(at) <= CLICK_TOLERANCE_PX
    }
}
