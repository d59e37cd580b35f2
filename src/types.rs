//! Core data types for the orbit canvas.
//!
//! This module defines the value types shared by the engines and the host:
//! points and rectangles in canvas space, circular nodes, connectors, the
//! marquee selection box and the interaction mode.

use crate::constants::MIN_SELECTION_SIZE;
use std::fmt;
use std::ops::{Add, Sub};
use uuid::Uuid;

/// Unique identifier for diagram nodes.
pub type NodeId = Uuid;

/// A position in canvas space. Y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate (downward)
    pub y: f64,
}

impl Point {
    /// The origin of canvas space.
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    /// Creates a point from its coordinates.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

/// An axis-aligned rectangle, the client rect of a shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Top-left corner
    pub min: Point,
    /// Bottom-right corner
    pub max: Point,
}

impl Bounds {
    /// Builds the rectangle spanned by two arbitrary corners.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            min: Point::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Builds the bounding square of a circle.
    pub fn around_circle(center: Point, radius: f64) -> Self {
        Self {
            min: Point::new(center.x - radius, center.y - radius),
            max: Point::new(center.x + radius, center.y + radius),
        }
    }

    /// Builds a square of side `size` centered on `center`.
    pub fn around_point(center: Point, size: f64) -> Self {
        Self::around_circle(center, size / 2.0)
    }

    /// Width of the rectangle.
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Height of the rectangle.
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Whether `point` lies inside or on the edge of the rectangle.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }

    /// Whether this rectangle overlaps `other`, touching edges included.
    pub fn intersects(&self, other: &Bounds) -> bool {
        crate::geometry::boxes_intersect(self, other)
    }
}

/// A circular track around a fixed center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orbit {
    /// Center of the track
    pub center: Point,
    /// Distance from the center every point on the track keeps
    pub radius: f64,
}

impl Orbit {
    /// Creates a new orbit.
    pub fn new(center: Point, radius: f64) -> Self {
        Self { center, radius }
    }
}

/// A circular shape on the canvas.
///
/// The radius is fixed at creation; the center only changes through
/// [`crate::Scene::drag_node`].
#[derive(Debug, Clone)]
pub struct Node {
    /// Unique identifier for this node
    pub id: NodeId,
    /// Text drawn inside the node
    pub label: String,
    /// Classification tag ("trend" for selectable nodes, "hub" for the center)
    pub tag: String,
    /// Whether the host may drag this node
    pub draggable: bool,
    /// Track the node is confined to while dragged, if any
    pub orbit: Option<Orbit>,
    center: Point,
    radius: f64,
}

impl Node {
    /// Creates a new static node.
    ///
    /// # Arguments
    ///
    /// * `label` - Text drawn inside the node
    /// * `center` - Center of the circle in canvas space
    /// * `radius` - Radius of the circle; never changes afterwards
    /// * `tag` - Classification tag used by eligibility filters
    ///
    /// # Returns
    ///
    /// A new non-draggable `Node` with a unique ID.
    pub fn new(label: impl Into<String>, center: Point, radius: f64, tag: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            label: label.into(),
            tag: tag.into(),
            draggable: false,
            orbit: None,
            center,
            radius,
        }
    }

    /// Makes the node draggable along `orbit`.
    pub fn on_orbit(mut self, orbit: Orbit) -> Self {
        self.draggable = true;
        self.orbit = Some(orbit);
        self
    }

    /// Makes the node freely draggable.
    pub fn free(mut self) -> Self {
        self.draggable = true;
        self.orbit = None;
        self
    }

    /// Center of the node.
    pub fn center(&self) -> Point {
        self.center
    }

    /// Radius of the node.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Client rect of the node.
    pub fn bounds(&self) -> Bounds {
        Bounds::around_circle(self.center, self.radius)
    }

    /// Whether `point` lies inside or on the node's circle.
    pub fn contains(&self, point: Point) -> bool {
        crate::geometry::distance(self.center, point) <= self.radius
    }

    pub(crate) fn move_to(&mut self, center: Point) {
        self.center = center;
    }
}

/// A directed line from a source node toward a target node.
#[derive(Debug, Clone, PartialEq)]
pub struct Connector {
    /// Node the connector was drawn from
    pub source: NodeId,
    /// Node the connector was attached to; `None` while still being drawn
    pub target: Option<NodeId>,
    points: [Point; 2],
}

impl Connector {
    /// Creates a zero-length connector anchored at `start`.
    pub fn new(source: NodeId, start: Point) -> Self {
        Self {
            source,
            target: None,
            points: [start, start],
        }
    }

    /// Start and end of the line.
    pub fn points(&self) -> [Point; 2] {
        self.points
    }

    /// Start of the line.
    pub fn start(&self) -> Point {
        self.points[0]
    }

    /// End of the line (the arrowhead).
    pub fn end(&self) -> Point {
        self.points[1]
    }

    /// The line as `[x0, y0, x2, y2]`.
    pub fn flat_points(&self) -> [f64; 4] {
        [self.points[0].x, self.points[0].y, self.points[1].x, self.points[1].y]
    }

    /// Bounding rectangle of the line.
    pub fn bounds(&self) -> Bounds {
        Bounds::from_corners(self.points[0], self.points[1])
    }

    /// Whether the connector has been attached to a target.
    pub fn is_finalized(&self) -> bool {
        self.target.is_some()
    }

    /// Whether `node` is either end of the connector.
    pub fn touches(&self, node: NodeId) -> bool {
        self.source == node || self.target == Some(node)
    }

    pub(crate) fn set_end(&mut self, end: Point) {
        self.points[1] = end;
    }

    pub(crate) fn attach(&mut self, target: NodeId, points: [Point; 2]) {
        self.target = Some(target);
        self.points = points;
    }
}

/// The rubber-band rectangle of a marquee gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionBox {
    origin: Point,
    corner: Point,
    visible: bool,
}

impl SelectionBox {
    /// Seeds a hidden, zero-size box at `origin`.
    pub fn new(origin: Point) -> Self {
        Self {
            origin,
            corner: origin,
            visible: false,
        }
    }

    /// Grows the box to span from its origin to `corner` and shows it.
    pub fn extend_to(&mut self, corner: Point) {
        self.corner = corner;
        self.visible = true;
    }

    /// Hides the box.
    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Whether the box should currently be drawn.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Point where the gesture started.
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Current rectangle, never smaller than [`MIN_SELECTION_SIZE`] on either axis.
    pub fn bounds(&self) -> Bounds {
        let raw = Bounds::from_corners(self.origin, self.corner);
        Bounds {
            min: raw.min,
            max: Point::new(
                raw.min.x + raw.width().max(MIN_SELECTION_SIZE),
                raw.min.y + raw.height().max(MIN_SELECTION_SIZE),
            ),
        }
    }
}

/// How pointer gestures on empty space and on nodes are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Adding shapes; gestures perform marquee selection
    Add,
    /// Editing; gestures perform marquee selection
    #[default]
    Edit,
    /// Dragging from a node draws a connector
    Connect,
}

impl Mode {
    /// All modes in toolbar order.
    pub const ALL: [Mode; 3] = [Mode::Add, Mode::Edit, Mode::Connect];

    /// The configuration string for this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Add => "add",
            Mode::Edit => "edit",
            Mode::Connect => "connect",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
