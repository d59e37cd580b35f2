//! Trigonometric helpers shared by the constraint and routing engines.
//!
//! Angles are in degrees. A parametric angle of 0° points along +X and grows
//! clockwise on screen, because Y grows downward.

use crate::constants::AXIS_EPSILON;
use crate::types::{Bounds, Point};

/// Returns the point at `degrees` on the circle of `radius` around `center`.
pub fn point_on_circle(center: Point, radius: f64, degrees: f64) -> Point {
    let radians = degrees.to_radians();
    Point::new(
        center.x + radius * radians.cos(),
        center.y + radius * radians.sin(),
    )
}

/// Converts a compass bearing (0° = top, clockwise) to a parametric angle.
pub fn bearing_to_angle(bearing: f64) -> f64 {
    bearing - 90.0
}

/// Angle of the chord `a -> b` measured from vertical.
///
/// Horizontal and vertical chords are answered without dividing, so callers
/// never hit a near-zero denominator: a horizontal chord yields `90` when `b`
/// is to the right of `a` and `-90` otherwise, a vertical (or degenerate) one
/// yields `0`.
pub fn angle_between(a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;

    if dy.abs() <= AXIS_EPSILON {
        if dx.abs() <= AXIS_EPSILON {
            return 0.0;
        }
        return if dx > 0.0 { 90.0 } else { -90.0 };
    }
    if dx.abs() <= AXIS_EPSILON {
        return 0.0;
    }

    ((a.x - b.x) / (b.y - a.y)).atan().to_degrees()
}

/// Direction of `b` as seen from `a`, in the parametrization of [`point_on_circle`].
///
/// `b` below `a` shifts the chord angle by +90°, anything else by -90°.
pub fn heading(a: Point, b: Point) -> f64 {
    let angle = angle_between(a, b);
    if b.y - a.y > AXIS_EPSILON {
        angle + 90.0
    } else {
        angle - 90.0
    }
}

/// Axis-aligned overlap test, touching edges included.
pub fn boxes_intersect(a: &Bounds, b: &Bounds) -> bool {
    a.min.x <= b.max.x && b.min.x <= a.max.x && a.min.y <= b.max.y && b.min.y <= a.max.y
}

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    (b.x - a.x).hypot(b.y - a.y)
}

/// Shortest distance from `point` to the segment `a→b`.
pub fn distance_to_segment(point: Point, a: Point, b: Point) -> f64 {
    let along = b - a;
    let length_sq = along.x * along.x + along.y * along.y;
    if length_sq <= f64::EPSILON {
        return distance(point, a);
    }
    let offset = point - a;
    let t = ((offset.x * along.x + offset.y * along.y) / length_sq).clamp(0.0, 1.0);
    distance(point, Point::new(a.x + along.x * t, a.y + along.y * t))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_distance_clamps_to_endpoints() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        assert_eq!(distance_to_segment(Point::new(5.0, 3.0), a, b), 3.0);
        assert_eq!(distance_to_segment(Point::new(-4.0, 3.0), a, b), 5.0);
        assert_eq!(distance_to_segment(Point::new(13.0, 4.0), a, b), 5.0);
        assert_eq!(distance_to_segment(Point::new(3.0, 4.0), a, a), 5.0);
    }

    const EPS: f64 = 1e-9;

    fn assert_close(a: Point, b: Point) {
        assert!(
            distance(a, b) < 1e-6,
            "expected {:?} to be close to {:?}",
            a,
            b
        );
    }

    #[test]
    fn point_on_circle_axes() {
        let c = Point::new(10.0, 10.0);
        assert_close(point_on_circle(c, 5.0, 0.0), Point::new(15.0, 10.0));
        assert_close(point_on_circle(c, 5.0, 90.0), Point::new(10.0, 15.0));
        assert_close(point_on_circle(c, 5.0, 180.0), Point::new(5.0, 10.0));
        assert_close(point_on_circle(c, 5.0, -90.0), Point::new(10.0, 5.0));
    }

    #[test]
    fn bearing_zero_is_top() {
        let c = Point::new(500.0, 500.0);
        assert_close(point_on_circle(c, 300.0, bearing_to_angle(0.0)), Point::new(500.0, 200.0));
        assert_close(point_on_circle(c, 300.0, bearing_to_angle(90.0)), Point::new(800.0, 500.0));
        assert_close(point_on_circle(c, 300.0, bearing_to_angle(180.0)), Point::new(500.0, 800.0));
    }

    #[test]
    fn angle_between_axis_branches() {
        let a = Point::new(0.0, 0.0);
        assert_eq!(angle_between(a, Point::new(10.0, 0.0)), 90.0);
        assert_eq!(angle_between(a, Point::new(-10.0, 0.0)), -90.0);
        assert_eq!(angle_between(a, Point::new(0.0, 10.0)), 0.0);
        assert_eq!(angle_between(a, Point::new(0.0, -10.0)), 0.0);
        assert_eq!(angle_between(a, a), 0.0);
    }

    #[test]
    fn angle_between_diagonal() {
        let a = Point::new(0.0, 0.0);
        assert!((angle_between(a, Point::new(10.0, 10.0)) + 45.0).abs() < EPS);
        assert!((angle_between(a, Point::new(10.0, -10.0)) - 45.0).abs() < EPS);
    }

    #[test]
    fn heading_points_toward_target() {
        let a = Point::new(0.0, 0.0);
        for (target, expected) in [
            (Point::new(10.0, 0.0), 0.0),
            (Point::new(10.0, 10.0), 45.0),
            (Point::new(0.0, 10.0), 90.0),
            (Point::new(-10.0, 10.0), 135.0),
            (Point::new(0.0, -10.0), -90.0),
            (Point::new(10.0, -10.0), -45.0),
        ] {
            assert!(
                (heading(a, target) - expected).abs() < EPS,
                "heading to {:?} was {}",
                target,
                heading(a, target)
            );
        }
        // West is either 180 or -180 depending on the branch
        let west = heading(a, Point::new(-10.0, 0.0));
        assert!((west.abs() - 180.0).abs() < EPS);
    }

    #[test]
    fn boxes_intersect_includes_touching_edges() {
        let a = Bounds::from_corners(Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        let touching = Bounds::from_corners(Point::new(10.0, 10.0), Point::new(20.0, 20.0));
        let apart = Bounds::from_corners(Point::new(10.5, 0.0), Point::new(20.0, 10.0));
        let inside = Bounds::from_corners(Point::new(2.0, 2.0), Point::new(3.0, 3.0));

        assert!(boxes_intersect(&a, &touching));
        assert!(boxes_intersect(&a, &inside));
        assert!(boxes_intersect(&inside, &a));
        assert!(!boxes_intersect(&a, &apart));
    }

    #[test]
    fn distance_is_euclidean() {
        assert!((distance(Point::new(0.0, 0.0), Point::new(3.0, 4.0)) - 5.0).abs() < EPS);
    }
}
