//! Scene assembly: the hub, the ring of orbit nodes and the static backdrop.

use crate::constants::*;
use crate::gesture::NodeRegistry;
use crate::geometry::{bearing_to_angle, point_on_circle};
use crate::types::{Node, NodeId, Orbit, Point};

/// Dimensions of the radial scene.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneLayout {
    /// Canvas width in world units
    pub width: f64,
    /// Canvas height in world units
    pub height: f64,
    /// Radius of the hub node
    pub hub_radius: f64,
    /// Radius of the grey disk behind the hub
    pub hub_disk_radius: f64,
    /// Radius of the track orbit nodes move along
    pub orbit_radius: f64,
    /// Radius of each orbit node
    pub node_radius: f64,
    /// Number of orbit nodes
    pub node_count: usize,
}

impl Default for SceneLayout {
    fn default() -> Self {
        Self {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
            hub_radius: HUB_RADIUS,
            hub_disk_radius: HUB_DISK_RADIUS,
            orbit_radius: ORBIT_RADIUS,
            node_radius: NODE_RADIUS,
            node_count: ORBIT_NODE_COUNT,
        }
    }
}

impl SceneLayout {
    /// Center of the canvas, where the hub sits.
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Decorative circle drawn behind the nodes; never hit-tested.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Backdrop {
    /// Center of the circle
    pub center: Point,
    /// Radius of the circle
    pub radius: f64,
}

/// All shapes on the canvas, in z-order.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    nodes: Vec<Node>,
    backdrops: Vec<Backdrop>,
}

impl Scene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the hub with its ring of orbit nodes.
    ///
    /// The hub is node 0. Orbit nodes follow, starting at the top of the ring
    /// and going clockwise at equal spacing, each confined to the ring.
    pub fn radial(layout: &SceneLayout) -> Self {
        let center = layout.center();
        let orbit = Orbit::new(center, layout.orbit_radius);
        let mut scene = Scene::new();

        scene.add_backdrop(Backdrop {
            center,
            radius: layout.orbit_radius,
        });
        scene.add_backdrop(Backdrop {
            center,
            radius: layout.hub_disk_radius,
        });
        scene.add_node(Node::new("Hub", center, layout.hub_radius, HUB_TAG));

        let spacing = 360.0 / layout.node_count.max(1) as f64;
        for index in 0..layout.node_count {
            let bearing = index as f64 * spacing;
            let position = point_on_circle(center, layout.orbit_radius, bearing_to_angle(bearing));
            let node = Node::new(format!("Trend {}", index + 1), position, layout.node_radius, TREND_TAG)
                .on_orbit(orbit);
            scene.add_node(node);
        }

        log::debug!("built radial scene with {} orbit node(s)", layout.node_count);
        scene
    }

    /// Appends a node on top of the z-order and returns its ID.
    pub fn add_node(&mut self, node: Node) -> NodeId {
        let id = node.id;
        self.nodes.push(node);
        id
    }

    /// Appends a backdrop circle.
    pub fn add_backdrop(&mut self, backdrop: Backdrop) {
        self.backdrops.push(backdrop);
    }

    /// Backdrop circles, outermost first.
    pub fn backdrops(&self) -> &[Backdrop] {
        &self.backdrops
    }

    /// Topmost node whose circle contains `point`.
    pub fn node_at(&self, point: Point) -> Option<NodeId> {
        self.nodes
            .iter()
            .rev()
            .find(|node| node.contains(point))
            .map(|node| node.id)
    }

    /// Moves a node toward `candidate` according to its drag policy.
    ///
    /// Orbit nodes are projected onto their track, free nodes follow the
    /// candidate, and static nodes stay put.
    ///
    /// # Returns
    ///
    /// The node's new center, or `None` if no such node exists.
    pub fn drag_node(&mut self, id: NodeId, candidate: Point) -> Option<Point> {
        let node = self.nodes.iter_mut().find(|n| n.id == id)?;
        if !node.draggable {
            return Some(node.center());
        }
        let center = match node.orbit {
            Some(orbit) => orbit.project(candidate),
            None => candidate,
        };
        node.move_to(center);
        Some(center)
    }
}

impl NodeRegistry for Scene {
    fn nodes(&self) -> &[Node] {
        &self.nodes
    }
}
