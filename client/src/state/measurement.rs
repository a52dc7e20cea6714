//! Measurement read-out state: the perimeter and area of the last completed draw.
//!
//! The map component replaces this state wholesale on every completed draw;
//! aborted draws and vertex edits leave it untouched. A value is displayed
//! only when it is truthy in the JavaScript sense (present, non-zero, not
//! NaN), so a measured 0 is hidden rather than shown as `0.00`.

#[cfg(test)]
#[path = "measurement_test.rs"]
mod measurement_test;

use serde::{Deserialize, Serialize};

/// Decimal places shown in the read-out.
pub const READOUT_DECIMALS: usize = 2;

/// Last completed measurement. Both values start absent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MeasurementState {
    /// Perimeter length in meters.
    pub distance: Option<f64>,
    /// Area in square meters.
    pub area: Option<f64>,
}

/// Map events the read-out reacts to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MeasurementEvent {
    /// A polygon was completed and measured.
    DrawCompleted { distance: f64, area: f64 },
    /// The sketch was abandoned.
    DrawAborted,
    /// An existing feature was reshaped.
    FeatureModified,
}

impl MeasurementState {
    /// Apply a map event. Only a completed draw changes the state, and it replaces both values.
    pub fn apply(&mut self, event: MeasurementEvent) {
        if let MeasurementEvent::DrawCompleted { distance, area } = event {
            *self = Self { distance: Some(distance), area: Some(area) };
        }
    }

    /// `Distance: X meters`, or `None` when the distance is falsy.
    #[must_use]
    pub fn distance_line(&self) -> Option<String> {
        self.distance
            .filter(|d| is_truthy(*d))
            .map(|d| format!("Distance: {} meters", to_fixed(d, READOUT_DECIMALS)))
    }

    /// `Area: Y square meters`, or `None` when the area is falsy.
    #[must_use]
    pub fn area_line(&self) -> Option<String> {
        self.area
            .filter(|a| is_truthy(*a))
            .map(|a| format!("Area: {} square meters", to_fixed(a, READOUT_DECIMALS)))
    }
}

/// JavaScript truthiness of a number: neither zero nor NaN.
#[must_use]
pub fn is_truthy(value: f64) -> bool {
    value.abs() > 0.0
}

/// Format `value` with `digits` decimals the way `Number.prototype.toFixed` does.
///
/// Rounding works on the exact binary value: the kept digits round up in
/// magnitude when the next exact decimal digit is 5 or more. `0.005` is
/// slightly above five thousandths as a double, so it becomes `0.01`.
#[must_use]
pub fn to_fixed(value: f64, digits: usize) -> String {
    if value.is_nan() {
        return "NaN".to_owned();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_owned();
    }

    let sign = if value < 0.0 { "-" } else { "" };
    // 1100 fractional digits hold the full expansion of any finite double.
    let exact = format!("{:.1100}", value.abs());
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));

    let mut kept: Vec<u8> = int_part.bytes().chain(frac_part.bytes().take(digits)).collect();
    if frac_part.as_bytes().get(digits).is_some_and(|d| *d >= b'5') {
        increment_decimal(&mut kept);
    }

    let int_len = kept.len() - digits;
    let (int_digits, frac_digits) = kept.split_at(int_len);
    let int_digits = String::from_utf8_lossy(int_digits);
    if digits == 0 {
        return format!("{sign}{int_digits}");
    }
    format!("{sign}{int_digits}.{}", String::from_utf8_lossy(frac_digits))
}

/// Add one unit in the last place to an ASCII digit string.
fn increment_decimal(digits: &mut Vec<u8>) {
    for d in digits.iter_mut().rev() {
        if *d == b'9' {
            *d = b'0';
        } else {
            *d += 1;
            return;
        }
    }
    digits.insert(0, b'1');
}
