//! Joint angle and distance calculations
//!
//! All positions are in normalized frame coordinates.

use crate::joints::Point;

/// Segments shorter than this are treated as zero length
const MIN_SEGMENT_LEN: f32 = 1e-6;

/// Angle returned when either segment is degenerate
pub const DEGENERATE_ANGLE_DEG: f32 = 180.0;

/// Angle at vertex `b` between rays `b -> a` and `b -> c`, in degrees
///
/// Uses the dot product formula: cos(θ) = (v1 · v2) / (|v1| × |v2|)
///
/// Returns:
/// - 0° when both rays point the same way
/// - 180° when the three points are collinear with `b` in the middle
/// - 180° when either ray has zero length
pub fn angle_degrees(a: Point, b: Point, c: Point) -> f32 {
    let v1 = (a.x - b.x, a.y - b.y);
    let v2 = (c.x - b.x, c.y - b.y);

    let mag1 = libm::sqrtf(v1.0 * v1.0 + v1.1 * v1.1);
    let mag2 = libm::sqrtf(v2.0 * v2.0 + v2.1 * v2.1);

    if mag1 < MIN_SEGMENT_LEN || mag2 < MIN_SEGMENT_LEN {
        return DEGENERATE_ANGLE_DEG;
    }

    let dot = v1.0 * v2.0 + v1.1 * v2.1;
    // Rounding can push the ratio slightly outside acos's domain
    let cos_angle = (dot / (mag1 * mag2)).clamp(-1.0, 1.0);

    libm::acosf(cos_angle).to_degrees()
}

/// Euclidean distance between two points
pub fn distance(p: Point, q: Point) -> f32 {
    let dx = q.x - p.x;
    let dy = q.y - p.y;
    libm::sqrtf(dx * dx + dy * dy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn pt(x: f32, y: f32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn test_straight_line() {
        let angle = angle_degrees(pt(0.0, 0.0), pt(0.5, 0.0), pt(1.0, 0.0));
        assert!((angle - 180.0).abs() < 0.01);
    }

    #[test]
    fn test_right_angle() {
        let angle = angle_degrees(pt(0.0, 0.0), pt(0.5, 0.0), pt(0.5, 0.5));
        assert!((angle - 90.0).abs() < 0.01);
    }

    #[test]
    fn test_overlapping_rays() {
        // a and c on the same ray from b
        let angle = angle_degrees(pt(0.2, 0.2), pt(0.0, 0.0), pt(0.4, 0.4));
        assert!(angle.abs() < 0.05);
    }

    #[test]
    fn test_degenerate_segment() {
        let b = pt(0.3, 0.3);
        assert_eq!(angle_degrees(b, b, pt(0.9, 0.1)), DEGENERATE_ANGLE_DEG);
        assert_eq!(angle_degrees(pt(0.9, 0.1), b, b), DEGENERATE_ANGLE_DEG);
    }

    #[test]
    fn test_distance() {
        assert!((distance(pt(0.0, 0.0), pt(0.3, 0.4)) - 0.5).abs() < 1e-6);
        assert_eq!(distance(pt(0.2, 0.2), pt(0.2, 0.2)), 0.0);
    }

    proptest! {
        #[test]
        fn prop_angle_symmetric(
            ax in 0.0f32..1.0, ay in 0.0f32..1.0,
            bx in 0.0f32..1.0, by in 0.0f32..1.0,
            cx in 0.0f32..1.0, cy in 0.0f32..1.0,
        ) {
            let (a, b, c) = (pt(ax, ay), pt(bx, by), pt(cx, cy));
            let forward = angle_degrees(a, b, c);
            let swapped = angle_degrees(c, b, a);
            prop_assert!((forward - swapped).abs() < 1e-3);
        }

        #[test]
        fn prop_angle_in_range(
            ax in 0.0f32..1.0, ay in 0.0f32..1.0,
            bx in 0.0f32..1.0, by in 0.0f32..1.0,
            cx in 0.0f32..1.0, cy in 0.0f32..1.0,
        ) {
            let angle = angle_degrees(pt(ax, ay), pt(bx, by), pt(cx, cy));
            prop_assert!((0.0..=180.0).contains(&angle));
        }
    }
}
