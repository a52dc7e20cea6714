#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn engine_keys_suppress_browser_default() {
    for key in ["Escape", "Backspace", "ArrowLeft", "ArrowRight", "ArrowUp", "ArrowDown", "+", "=", "-", "_"] {
        assert!(should_prevent_default_key(key), "{key}");
    }
}

#[test]
fn other_keys_keep_browser_default() {
    for key in ["Tab", "Enter", "a", "F5", "Delete"] {
        assert!(!should_prevent_default_key(key), "{key}");
    }
}

#[test]
fn pixel_wheel_deltas_are_unscaled() {
    assert_eq!(wheel_delta_scale(0), 1.0);
}

#[test]
fn line_and_page_wheel_deltas_become_pixels() {
    assert_eq!(wheel_delta_scale(1), 40.0);
    assert_eq!(wheel_delta_scale(2), 800.0);
}
