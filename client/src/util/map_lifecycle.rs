//! Single-instance slot for the map engine owned by a mounted component.
//!
//! The mount effect may re-run (reactive re-tracking, hydration); the slot
//! makes creation happen at most once and release happen at most once.

#[cfg(test)]
#[path = "map_lifecycle_test.rs"]
mod map_lifecycle_test;

/// Populate `slot` with `create()` unless it already holds an instance.
///
/// Returns `true` when a new instance was created.
pub fn mount_once<T>(slot: &mut Option<T>, create: impl FnOnce() -> T) -> bool {
    if slot.is_some() {
        return false;
    }
    *slot = Some(create());
    true
}

/// Take the instance out of `slot` and hand it to `dispose`.
///
/// Returns `true` when an instance was released; an empty slot is a no-op.
pub fn release<T>(slot: &mut Option<T>, dispose: impl FnOnce(T)) -> bool {
    match slot.take() {
        Some(instance) => {
            dispose(instance);
            true
        }
        None => false,
    }
}
