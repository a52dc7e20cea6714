//! Vector styles: fill, stroke and point markers.
//!
//! Styles are static. The vector layer applies [`Style::measurement`] to every
//! feature; the draw sketch and the modify vertex marker use the layered
//! [`editing_styles`].

#[cfg(test)]
#[path = "style_test.rs"]
mod style_test;

/// Polygon fill.
#[derive(Debug, Clone, PartialEq)]
pub struct Fill {
    /// CSS color string.
    pub color: String,
}

impl Fill {
    #[must_use]
    pub fn new(color: &str) -> Self {
        Self { color: color.to_owned() }
    }
}

/// Line / outline stroke.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    /// CSS color string.
    pub color: String,
    /// Width in CSS pixels.
    pub width: f64,
}

impl Stroke {
    #[must_use]
    pub fn new(color: &str, width: f64) -> Self {
        Self { color: color.to_owned(), width }
    }
}

/// Circle marker drawn for point geometries.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleStyle {
    /// Radius in CSS pixels.
    pub radius: f64,
    pub fill: Option<Fill>,
    pub stroke: Option<Stroke>,
}

/// Complete style for one render pass over a geometry.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Style {
    pub fill: Option<Fill>,
    pub stroke: Option<Stroke>,
    /// Marker for point geometries.
    pub image: Option<CircleStyle>,
}

/// Amber used for drawn features.
pub const MEASURE_AMBER: &str = "#ffcc33";

impl Style {
    /// The fixed style of the measurement layer.
    #[must_use]
    pub fn measurement() -> Self {
        Self {
            fill: Some(Fill::new("rgba(255, 255, 255, 0.2)")),
            stroke: Some(Stroke::new(MEASURE_AMBER, 2.0)),
            image: Some(CircleStyle { radius: 6.0, fill: Some(Fill::new(MEASURE_AMBER)), stroke: None }),
        }
    }
}

/// Styles drawn one after another for in-progress edits: a wide white halo
/// under a blue line, and a blue vertex marker.
#[must_use]
pub fn editing_styles() -> Vec<Style> {
    let white = "rgba(255, 255, 255, 1)";
    let blue = "rgba(0, 153, 255, 1)";
    vec![
        Style {
            fill: Some(Fill::new("rgba(255, 255, 255, 0.5)")),
            stroke: Some(Stroke::new(white, 5.0)),
            image: None,
        },
        Style {
            fill: None,
            stroke: Some(Stroke::new(blue, 3.0)),
            image: Some(CircleStyle {
                radius: 6.0,
                fill: Some(Fill::new(blue)),
                stroke: Some(Stroke::new(white, 1.5)),
            }),
        },
    ]
}
