//! Mapping between value space, angle space and the normalized 100×100 viewbox.
//!
//! Angles follow `atan2` conventions (counter-clockwise, Y up). The dial sweeps
//! 300° clockwise from [`MIN_RADIANS`] to [`MAX_RADIANS`] and leaves a 60° dead
//! gap at the bottom.

use std::f64::consts::PI;

pub const VIEWBOX: f64 = 100.0;
pub const RADIUS: f64 = 40.0;
pub const MID: Point = Point { x: 50.0, y: 50.0 };
pub const MIN_RADIANS: f64 = 4.0 * PI / 3.0; // 240°
pub const MAX_RADIANS: f64 = -PI / 3.0; // -60°
pub const GAP_START: f64 = -PI / 2.0 - PI / 6.0; // lower edge of the dead gap

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Bounding box of the control in the host's coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub origin: Point,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: Point::new(x, y),
            width,
            height,
        }
    }

    /// Converts an absolute position into an offset inside this box.
    pub fn relative(&self, absolute: Point) -> Point {
        Point::new(absolute.x - self.origin.x, absolute.y - self.origin.y)
    }
}

/// Result of projecting a pointer angle onto the dial sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AngleMapping {
    InRange(f64),
    InGap,
}

impl AngleMapping {
    pub fn value(self) -> Option<f64> {
        match self {
            Self::InRange(v) => Some(v),
            Self::InGap => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ArcFlags {
    pub large_arc: bool,
    pub sweep: bool,
}

pub fn map_range(x: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    ((x - in_min) * (out_max - out_min)) / (in_max - in_min) + out_min
}

/// Angle of a pointer offset relative to the center of a `size`-wide control.
///
/// Screen Y grows downward, so it is flipped before `atan2`.
pub fn angle_from_point(offset: Point, size: f64) -> f64 {
    let dx = offset.x - size / 2.0;
    let dy = size / 2.0 - offset.y;
    dy.atan2(dx)
}

/// Maps an `atan2` angle to a value in `[min, max]`.
///
/// The sweep crosses `-π`, so angles in the lower-left segment are unwrapped by
/// `2π` before mapping. Anything between [`GAP_START`] and [`MAX_RADIANS`] lies
/// in the dead gap.
pub fn value_from_angle(angle: f64, min: f64, max: f64) -> AngleMapping {
    if angle > MAX_RADIANS {
        AngleMapping::InRange(map_range(angle, MIN_RADIANS, MAX_RADIANS, min, max))
    } else if angle < GAP_START {
        AngleMapping::InRange(map_range(
            angle + 2.0 * PI,
            MIN_RADIANS,
            MAX_RADIANS,
            min,
            max,
        ))
    } else {
        AngleMapping::InGap
    }
}

pub fn value_angle(value: f64, min: f64, max: f64) -> f64 {
    map_range(value, min, max, MIN_RADIANS, MAX_RADIANS)
}

/// Snaps to the nearest point of the `min + k * step` grid. Not bounded by `max`.
pub fn round_to_step(raw: f64, min: f64, step: f64) -> f64 {
    ((raw - min) / step).round() * step + min
}

pub fn point_on_circle(angle: f64, mid: Point, radius: f64) -> Point {
    Point::new(mid.x + angle.cos() * radius, mid.y - angle.sin() * radius)
}

pub fn arc_flags(zero_angle: f64, value_angle: f64) -> ArcFlags {
    ArcFlags {
        large_arc: (zero_angle - value_angle).abs() >= PI,
        sweep: value_angle <= zero_angle,
    }
}

/// Anchor angle of the value arc.
///
/// A strictly positive range has no zero to anchor on, so the arc starts at `min`.
pub fn zero_angle(min: f64, max: f64) -> f64 {
    if min > 0.0 && max > 0.0 {
        value_angle(min, min, max)
    } else {
        value_angle(0.0, min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_map_range_is_linear() {
        assert!((map_range(5.0, 0.0, 10.0, 0.0, 100.0) - 50.0).abs() < EPS);
        assert!((map_range(0.0, 0.0, 10.0, -1.0, 1.0) + 1.0).abs() < EPS);
        assert!((map_range(MIN_RADIANS, MIN_RADIANS, MAX_RADIANS, 0.0, 100.0)).abs() < EPS);
    }

    #[test]
    fn test_angle_from_point_flips_y() {
        assert!((angle_from_point(Point::new(50.0, 10.0), 100.0) - PI / 2.0).abs() < EPS);
        assert!((angle_from_point(Point::new(50.0, 90.0), 100.0) + PI / 2.0).abs() < EPS);
        assert!(angle_from_point(Point::new(90.0, 50.0), 100.0).abs() < EPS);
        assert_eq!(angle_from_point(Point::new(50.0, 50.0), 100.0), 0.0);
    }

    #[test]
    fn test_dead_gap_yields_no_value() {
        let samples = 50;
        for i in 1..samples {
            let angle = GAP_START + (MAX_RADIANS - GAP_START) * i as f64 / samples as f64;
            assert_eq!(value_from_angle(angle, 0.0, 100.0), AngleMapping::InGap);
        }
        // straight down
        assert_eq!(value_from_angle(-PI / 2.0, 0.0, 100.0).value(), None);
    }

    #[test]
    fn test_value_from_angle_segments() {
        let top = value_from_angle(PI / 2.0, 0.0, 100.0).value().unwrap();
        assert!((top - 50.0).abs() < EPS);

        let right = value_from_angle(0.0, 0.0, 100.0).value().unwrap();
        assert!((right - 80.0).abs() < EPS);

        // lower-left segment unwraps through -π
        let lower_left = value_from_angle(-2.5, 0.0, 100.0).value().unwrap();
        let expected = map_range(-2.5 + 2.0 * PI, MIN_RADIANS, MAX_RADIANS, 0.0, 100.0);
        assert!((lower_left - expected).abs() < EPS);
        assert!(lower_left > 0.0 && lower_left < 20.0);
    }

    #[test]
    fn test_round_to_step() {
        assert_eq!(round_to_step(0.0, 0.0, 1.0), 0.0);
        assert_eq!(round_to_step(10.0, 10.0, 3.0), 10.0);
        assert_eq!(round_to_step(49.6, 0.0, 1.0), 50.0);
        assert_eq!(round_to_step(12.0, 0.0, 5.0), 10.0);
        // max is not on the grid: rounding overshoots it
        assert_eq!(round_to_step(100.0, 0.0, 3.0), 99.0);
        assert_eq!(round_to_step(10.0, 0.0, 4.0), 12.0);
    }

    #[test]
    fn test_round_trip_through_circle() {
        let (min, max, step) = (0.0, 100.0, 1.0);
        // min and max sit exactly on the gap boundary
        for v in 1..100 {
            let v = f64::from(v);
            let point = point_on_circle(value_angle(v, min, max), MID, RADIUS);
            let angle = angle_from_point(point, VIEWBOX);
            let raw = value_from_angle(angle, min, max).value().unwrap();
            assert_eq!(round_to_step(raw, min, step), v);
        }
    }

    #[test]
    fn test_range_endpoints() {
        let (min, max) = (0.0, 100.0);
        // the seam angles themselves belong to the gap
        assert_eq!(value_from_angle(MAX_RADIANS, min, max), AngleMapping::InGap);
        assert_eq!(value_from_angle(GAP_START, min, max), AngleMapping::InGap);

        let just_past_min = value_from_angle(GAP_START - 1e-9, min, max).value().unwrap();
        assert_eq!(round_to_step(just_past_min, min, 1.0), min);
        let just_before_max = value_from_angle(MAX_RADIANS + 1e-9, min, max).value().unwrap();
        assert_eq!(round_to_step(just_before_max, min, 1.0), max);

        // drawing `min` and reading it back lands a rounding error below GAP_START
        let point = point_on_circle(value_angle(min, min, max), MID, RADIUS);
        let raw = value_from_angle(angle_from_point(point, VIEWBOX), min, max);
        assert_eq!(raw.value().map(|v| round_to_step(v, min, 1.0)), Some(min));
    }

    #[test]
    fn test_point_on_circle() {
        let top = point_on_circle(PI / 2.0, MID, RADIUS);
        assert!((top.x - 50.0).abs() < EPS);
        assert!((top.y - 10.0).abs() < EPS);

        let right = point_on_circle(0.0, MID, RADIUS);
        assert!((right.x - 90.0).abs() < EPS);
        assert!((right.y - 50.0).abs() < EPS);
    }

    #[test]
    fn test_arc_flags() {
        let zero = zero_angle(0.0, 100.0);
        assert!((zero - MIN_RADIANS).abs() < EPS);

        let near_max = arc_flags(zero, value_angle(99.0, 0.0, 100.0));
        assert!(near_max.large_arc);
        assert!(near_max.sweep);

        let small = arc_flags(zero, value_angle(10.0, 0.0, 100.0));
        assert!(!small.large_arc);

        let backwards = arc_flags(0.0, 1.0);
        assert!(!backwards.sweep);
    }

    #[test]
    fn test_zero_angle_anchor() {
        // all positive: anchor on min
        assert!((zero_angle(20.0, 80.0) - MIN_RADIANS).abs() < EPS);
        // straddling zero: anchor on literal zero
        let mid = zero_angle(-50.0, 50.0);
        assert!((mid - PI / 2.0).abs() < EPS);
        // all negative: zero maps beyond max
        assert!(zero_angle(-100.0, -50.0) < MAX_RADIANS);
    }

    #[test]
    fn test_rect_relative() {
        let rect = Rect::new(200.0, 100.0, 100.0, 100.0);
        assert_eq!(rect.relative(Point::new(250.0, 110.0)), Point::new(50.0, 10.0));
    }
}
