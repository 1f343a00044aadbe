//! Renderer-facing outputs: SVG arc paths on the 100×100 viewbox and the value label.

use crate::config::{DialConfig, VALUE_TOKEN};
use crate::geometry::{self, ArcFlags, MAX_RADIANS, MID, MIN_RADIANS, Point, RADIUS};

/// Background track, always drawn as the large positive arc from min to max.
pub fn range_path() -> String {
    let start = geometry::point_on_circle(MIN_RADIANS, MID, RADIUS);
    let end = geometry::point_on_circle(MAX_RADIANS, MID, RADIUS);
    arc_path(start, ArcFlags { large_arc: true, sweep: true }, end)
}

/// Arc from the zero anchor to the current value.
pub fn value_path(value: f64, min: f64, max: f64) -> String {
    let zero = geometry::zero_angle(min, max);
    let angle = geometry::value_angle(value, min, max);
    arc_path(
        geometry::point_on_circle(zero, MID, RADIUS),
        geometry::arc_flags(zero, angle),
        geometry::point_on_circle(angle, MID, RADIUS),
    )
}

fn arc_path(from: Point, flags: ArcFlags, to: Point) -> String {
    format!(
        "M {} {} A {RADIUS} {RADIUS} 0 {} {} {} {}",
        from.x,
        from.y,
        u8::from(flags.large_arc),
        u8::from(flags.sweep),
        to.x,
        to.y
    )
}

pub fn value_to_display(template: &str, value: f64) -> String {
    template.replacen(VALUE_TOKEN, &value.to_string(), 1)
}

/// Everything a renderer reads for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct DialView {
    pub size: f64,
    pub stroke_width: f64,
    pub range_path: String,
    pub value_path: String,
    pub zero_angle: f64,
    pub value_angle: f64,
    pub label: Option<String>,
}

impl DialView {
    pub fn new(config: &DialConfig, value: f64) -> Self {
        Self {
            size: config.size,
            stroke_width: config.stroke_width,
            range_path: range_path(),
            value_path: value_path(value, config.min, config.max),
            zero_angle: geometry::zero_angle(config.min, config.max),
            value_angle: geometry::value_angle(value, config.min, config.max),
            label: config
                .show_value
                .then(|| value_to_display(&config.value_template, value)),
        }
    }
}
