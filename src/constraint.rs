//! Circular drag constraint.
//!
//! Projects pointer positions onto a fixed circle so orbit nodes can only ever
//! move along their track.

use crate::geometry::{heading, point_on_circle};
use crate::types::{Orbit, Point};

/// Projects `candidate` onto the circle of `orbit_radius` around `orbit_center`.
///
/// The projected point keeps the direction of the candidate as seen from the
/// center; a candidate exactly on the center lands at the top of the circle.
/// `anchor` is the node's center relative to its drag origin and is added to
/// the result, so hosts that position shapes by a corner or group origin can
/// use the returned value directly. Pass [`Point::ZERO`] when nodes are
/// positioned by their center.
///
/// # Arguments
///
/// * `candidate` - Raw pointer-driven position
/// * `orbit_center` - Center of the track
/// * `orbit_radius` - Radius of the track
/// * `anchor` - Offset from the projected center to the host's drag origin
///
/// # Returns
///
/// The corrected drag position.
pub fn constrain(candidate: Point, orbit_center: Point, orbit_radius: f64, anchor: Point) -> Point {
    let angle = heading(orbit_center, candidate);
    point_on_circle(orbit_center, orbit_radius, angle) + anchor
}

impl Orbit {
    /// Projects `candidate` onto this orbit.
    pub fn project(&self, candidate: Point) -> Point {
        constrain(candidate, self.center, self.radius, Point::ZERO)
    }
}
