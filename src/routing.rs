//! Connector routing.
//!
//! Moves the two ends of a raw, pointer-drawn line onto the boundary circles of
//! the nodes it connects, so that arrows start and stop at the edge of each
//! node instead of at its center or wherever the pointer was released.

use crate::constants::AXIS_EPSILON;
use crate::geometry::point_on_circle;
use crate::types::{Node, Point};
use std::fmt;

/// Reasons a connector cannot be routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteError {
    /// Both raw endpoints are the same point, so the line has no direction
    DegenerateChord,
    /// Source and target are the same node
    SelfLoop,
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteError::DegenerateChord => write!(f, "connector endpoints coincide"),
            RouteError::SelfLoop => write!(f, "connector starts and ends on the same node"),
        }
    }
}

impl std::error::Error for RouteError {}

/// Recomputes the endpoints of `raw` so each lies on its node's boundary.
///
/// Horizontal and vertical lines are shortened along their axis by each node's
/// radius. Every other line is re-anchored trigonometrically using the angle of
/// the raw chord, picking the side of each circle that faces the other node.
///
/// # Arguments
///
/// * `source` - Node the connector starts from
/// * `target` - Node the connector points at
/// * `raw` - Start and end of the line as drawn
///
/// # Returns
///
/// The routed `[start, end]` pair, or a [`RouteError`] when no direction can
/// be derived.
pub fn route(source: &Node, target: &Node, raw: [Point; 2]) -> Result<[Point; 2], RouteError> {
    if source.id == target.id {
        return Err(RouteError::SelfLoop);
    }

    let [start, end] = raw;
    let same_y = (end.y - start.y).abs() <= AXIS_EPSILON;
    let same_x = (end.x - start.x).abs() <= AXIS_EPSILON;

    match (same_x, same_y) {
        (true, true) => Err(RouteError::DegenerateChord),
        (false, true) => {
            let (x0, x2) = shorten(start.x, end.x, source.radius(), target.radius());
            Ok([Point::new(x0, start.y), Point::new(x2, end.y)])
        }
        (true, false) => {
            let (y0, y2) = shorten(start.y, end.y, source.radius(), target.radius());
            Ok([Point::new(start.x, y0), Point::new(end.x, y2)])
        }
        (false, false) => Ok(route_diagonal(source, target, start, end)),
    }
}

/// Pulls two coordinates on one axis toward each other by their own radius.
fn shorten(from: f64, to: f64, from_radius: f64, to_radius: f64) -> (f64, f64) {
    if from < to {
        (from + from_radius, to - to_radius)
    } else {
        (from - from_radius, to + to_radius)
    }
}

fn route_diagonal(source: &Node, target: &Node, start: Point, end: Point) -> [Point; 2] {
    let angle = ((start.x - end.x) / (end.y - start.y)).atan().to_degrees();
    let offset = if target.center().y > source.center().y {
        -90.0
    } else {
        90.0
    };

    [
        point_on_circle(source.center(), source.radius(), angle - offset),
        point_on_circle(target.center(), target.radius(), angle + offset),
    ]
}
