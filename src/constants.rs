//! Shared application-wide constants.
//! Centralizes tweakable values used by the engines, the scene builder and the canvas.

// Geometry
/// Tolerance below which two coordinates are treated as equal when classifying a chord.
pub const AXIS_EPSILON: f64 = 1e-3;
/// Smallest width/height of a selection box; also the size of a pointer hit box.
pub const MIN_SELECTION_SIZE: f64 = 1.0;

// Scene layout
/// Default canvas (stage) width in world units.
pub const CANVAS_WIDTH: f64 = 1000.0;
/// Default canvas (stage) height in world units.
pub const CANVAS_HEIGHT: f64 = 1000.0;
/// Radius of the hub node at the canvas center.
pub const HUB_RADIUS: f64 = 50.0;
/// Radius of the grey disk drawn behind the hub.
pub const HUB_DISK_RADIUS: f64 = 100.0;
/// Radius of the circular track orbit nodes move along.
pub const ORBIT_RADIUS: f64 = 300.0;
/// Radius of every orbit node.
pub const NODE_RADIUS: f64 = 50.0;
/// Number of orbit nodes placed around the hub.
pub const ORBIT_NODE_COUNT: usize = 8;

// Tags
/// Tag carried by selectable orbit nodes.
pub const TREND_TAG: &str = "trend";
/// Tag carried by the hub node.
pub const HUB_TAG: &str = "hub";

// Scale
/// Default zoom percentage (100 = 1.0x).
pub const DEFAULT_SCALE_PERCENT: f32 = 100.0;
/// Smallest accepted zoom percentage.
pub const MIN_SCALE_PERCENT: f32 = 25.0;
/// Largest accepted zoom percentage.
pub const MAX_SCALE_PERCENT: f32 = 500.0;

// Rendering
/// Arrowhead length in screen pixels at 100% scale.
pub const ARROW_HEAD_SIZE: f32 = 12.0;
/// Arrowhead half-width in screen pixels at 100% scale.
pub const ARROW_HEAD_WIDTH: f32 = 6.0;
