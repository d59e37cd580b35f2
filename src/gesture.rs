//! Gesture classification and multi-selection.
//!
//! A [`GestureEngine`] consumes one pointer gesture at a time (start, any
//! number of updates, end) and, depending on the current [`Mode`], either
//! draws a connector between two nodes or performs a marquee selection.
//! It never owns the nodes: every call that needs them receives a
//! [`NodeRegistry`], and only nodes accepted by the engine's [`NodeFilter`]
//! take part in hit-testing.

use crate::constants::{MIN_SELECTION_SIZE, TREND_TAG};
use crate::geometry::{distance, distance_to_segment};
use crate::routing::{route, RouteError};
use crate::types::{Bounds, Connector, Mode, Node, NodeId, Point, SelectionBox};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Read access to the shapes of a scene, in z-order (index 0 is drawn first).
pub trait NodeRegistry {
    /// All nodes, bottom-most first.
    fn nodes(&self) -> &[Node];

    /// Looks up a node by ID.
    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes().iter().find(|n| n.id == id)
    }
}

impl NodeRegistry for [Node] {
    fn nodes(&self) -> &[Node] {
        self
    }
}

impl NodeRegistry for Vec<Node> {
    fn nodes(&self) -> &[Node] {
        self
    }
}

/// Decides which nodes take part in hit-testing and selection.
pub trait NodeFilter {
    /// Whether the node at `z_index` is eligible.
    fn accepts(&self, z_index: usize, node: &Node) -> bool;
}

impl<F> NodeFilter for F
where
    F: Fn(usize, &Node) -> bool,
{
    fn accepts(&self, z_index: usize, node: &Node) -> bool {
        self(z_index, node)
    }
}

/// Tag and z-order based eligibility.
///
/// Structural shapes sit at the bottom of the z-order and carry other tags, so
/// the default accepts only "trend" nodes above index 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EligibilityFilter {
    /// Required tag; `None` accepts any tag
    pub tag: Option<String>,
    /// Lowest accepted z-order index
    pub min_z_index: usize,
}

impl Default for EligibilityFilter {
    fn default() -> Self {
        Self {
            tag: Some(TREND_TAG.to_string()),
            min_z_index: 1,
        }
    }
}

impl NodeFilter for EligibilityFilter {
    fn accepts(&self, z_index: usize, node: &Node) -> bool {
        z_index >= self.min_z_index && self.tag.as_deref().is_none_or(|tag| node.tag == tag)
    }
}

/// What the engine is currently doing.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum GestureState {
    /// No gesture in progress
    #[default]
    Idle,
    /// A connector is being dragged out of a node
    DrawingConnector {
        /// The live, not yet routed connector
        connector: Connector,
    },
    /// A marquee rectangle is being dragged
    DrawingMarquee {
        /// The growing selection rectangle
        selection_box: SelectionBox,
    },
}

/// Why a connector gesture ended without a connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscardReason {
    /// No eligible node was found at the release point
    NoTarget,
    /// The node the connector started from is no longer in the registry
    MissingSource,
    /// A target was found but the line could not be routed
    Route(RouteError),
}

impl fmt::Display for DiscardReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscardReason::NoTarget => write!(f, "no target node under the pointer"),
            DiscardReason::MissingSource => write!(f, "source node no longer exists"),
            DiscardReason::Route(err) => write!(f, "{err}"),
        }
    }
}

/// Result of feeding one pointer event to the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureOutcome {
    /// The event had no effect (re-entrant start, or update/end while idle)
    Ignored,
    /// A connector started from the given node
    ConnectorStarted {
        /// Node the connector is drawn from
        source: NodeId,
    },
    /// A marquee selection started
    MarqueeStarted,
    /// The live connector or marquee followed the pointer
    Updated,
    /// The connector was attached and routed onto both node boundaries
    ConnectorRouted(Connector),
    /// The connector gesture ended without producing a connector
    ConnectorDiscarded(DiscardReason),
    /// The marquee finished; these nodes are now selected
    SelectionChanged(Vec<NodeId>),
    /// The active gesture was abandoned
    Cancelled,
}

/// State machine turning pointer gestures into connectors and selections.
#[derive(Debug, Clone)]
pub struct GestureEngine<F = EligibilityFilter> {
    mode: Mode,
    filter: F,
    state: GestureState,
}

impl Default for GestureEngine {
    fn default() -> Self {
        Self::new(Mode::default(), EligibilityFilter::default())
    }
}

impl<F: NodeFilter> GestureEngine<F> {
    /// Creates an idle engine.
    ///
    /// # Arguments
    ///
    /// * `mode` - Interaction mode supplied by the host
    /// * `filter` - Predicate selecting the nodes that can be hit or selected
    pub fn new(mode: Mode, filter: F) -> Self {
        Self {
            mode,
            filter,
            state: GestureState::Idle,
        }
    }

    /// Current interaction mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Host update path for the mode. Takes effect at the next gesture start.
    pub fn set_mode(&mut self, mode: Mode) {
        if mode != self.mode {
            log::debug!("mode changed from {} to {}", self.mode, mode);
        }
        self.mode = mode;
    }

    /// Eligibility predicate in use.
    pub fn filter(&self) -> &F {
        &self.filter
    }

    /// Replaces the eligibility predicate.
    pub fn set_filter(&mut self, filter: F) {
        self.filter = filter;
    }

    /// Current state of the gesture state machine.
    pub fn state(&self) -> &GestureState {
        &self.state
    }

    /// Whether a gesture is in progress.
    pub fn is_active(&self) -> bool {
        !matches!(self.state, GestureState::Idle)
    }

    /// The connector being drawn, if any.
    pub fn live_connector(&self) -> Option<&Connector> {
        match &self.state {
            GestureState::DrawingConnector { connector } => Some(connector),
            _ => None,
        }
    }

    /// The marquee rectangle being dragged, if any.
    pub fn selection_box(&self) -> Option<&SelectionBox> {
        match &self.state {
            GestureState::DrawingMarquee { selection_box } => Some(selection_box),
            _ => None,
        }
    }

    /// Iterates over the nodes of `registry` accepted by the filter.
    pub fn eligible<'a, R>(&'a self, registry: &'a R) -> impl Iterator<Item = &'a Node> + 'a
    where
        R: NodeRegistry + ?Sized,
    {
        registry
            .nodes()
            .iter()
            .enumerate()
            .filter(|(index, node)| self.filter.accepts(*index, node))
            .map(|(_, node)| node)
    }

    /// Finds the eligible node under `pointer`.
    ///
    /// The pointer is treated as a [`MIN_SELECTION_SIZE`] square; when several
    /// node rects overlap it, the node whose center is closest wins.
    pub fn hit_test<R>(&self, registry: &R, pointer: Point) -> Option<NodeId>
    where
        R: NodeRegistry + ?Sized,
    {
        let pointer_box = Bounds::around_point(pointer, MIN_SELECTION_SIZE);
        self.eligible(registry)
            .filter(|node| node.bounds().intersects(&pointer_box))
            .min_by(|a, b| by_distance(a, b, pointer))
            .map(|node| node.id)
    }

    /// IDs of the eligible nodes whose rect overlaps `bounds`, in z-order.
    pub fn select_in<R>(&self, registry: &R, bounds: &Bounds) -> Vec<NodeId>
    where
        R: NodeRegistry + ?Sized,
    {
        self.eligible(registry)
            .filter(|node| node.bounds().intersects(bounds))
            .map(|node| node.id)
            .collect()
    }

    /// Pointer-down. Starts a connector in connect mode when pressed on an
    /// eligible node, a marquee otherwise. Ignored while a gesture is active.
    pub fn on_gesture_start<R>(&mut self, registry: &R, pointer: Point) -> GestureOutcome
    where
        R: NodeRegistry + ?Sized,
    {
        if self.is_active() {
            log::debug!("gesture start at {:?} ignored, gesture already active", pointer);
            return GestureOutcome::Ignored;
        }

        if self.mode == Mode::Connect {
            let source = self
                .hit_test(registry, pointer)
                .and_then(|id| registry.node(id));
            if let Some(source) = source {
                log::debug!("connector started from {}", source.label);
                let outcome = GestureOutcome::ConnectorStarted { source: source.id };
                self.state = GestureState::DrawingConnector {
                    connector: Connector::new(source.id, source.center()),
                };
                return outcome;
            }
        }

        log::debug!("marquee started at {:?}", pointer);
        self.state = GestureState::DrawingMarquee {
            selection_box: SelectionBox::new(pointer),
        };
        GestureOutcome::MarqueeStarted
    }

    /// Pointer-move. Drags the far end of the live connector, or grows the marquee.
    pub fn on_gesture_update(&mut self, pointer: Point) -> GestureOutcome {
        match &mut self.state {
            GestureState::Idle => GestureOutcome::Ignored,
            GestureState::DrawingConnector { connector } => {
                connector.set_end(pointer);
                GestureOutcome::Updated
            }
            GestureState::DrawingMarquee { selection_box } => {
                selection_box.extend_to(pointer);
                GestureOutcome::Updated
            }
        }
    }

    /// Pointer-up. Attaches and routes the live connector, or resolves the
    /// marquee into a selection. Always returns the engine to idle.
    pub fn on_gesture_end<R>(&mut self, registry: &R, pointer: Point) -> GestureOutcome
    where
        R: NodeRegistry + ?Sized,
    {
        match std::mem::take(&mut self.state) {
            GestureState::Idle => GestureOutcome::Ignored,
            GestureState::DrawingConnector { mut connector } => {
                connector.set_end(pointer);
                self.finish_connector(registry, connector, pointer)
            }
            GestureState::DrawingMarquee { mut selection_box } => {
                selection_box.hide();
                let selected = self.select_in(registry, &selection_box.bounds());
                log::info!("marquee selected {} node(s)", selected.len());
                GestureOutcome::SelectionChanged(selected)
            }
        }
    }

    /// Abandons the active gesture without routing or selecting anything.
    pub fn cancel(&mut self) -> GestureOutcome {
        match std::mem::take(&mut self.state) {
            GestureState::Idle => GestureOutcome::Ignored,
            _ => {
                log::debug!("gesture cancelled");
                GestureOutcome::Cancelled
            }
        }
    }

    fn finish_connector<R>(&self, registry: &R, mut connector: Connector, release: Point) -> GestureOutcome
    where
        R: NodeRegistry + ?Sized,
    {
        let Some(source) = registry.node(connector.source) else {
            return discard(DiscardReason::MissingSource);
        };
        let Some(target) = self.find_target(registry, &connector, release) else {
            return discard(DiscardReason::NoTarget);
        };

        match route(source, target, [connector.start(), target.center()]) {
            Ok(points) => {
                connector.attach(target.id, points);
                log::info!("connected {} -> {}", source.label, target.label);
                GestureOutcome::ConnectorRouted(connector)
            }
            Err(err) => discard(DiscardReason::Route(err)),
        }
    }

    /// The live connector itself is what the pointer rests on at release, so
    /// candidates are the eligible nodes its rect overlaps that either contain
    /// the release point or are crossed by the drawn line. A node containing
    /// the release point beats the rest; otherwise the closest one wins.
    fn find_target<'a, R>(&'a self, registry: &'a R, connector: &Connector, release: Point) -> Option<&'a Node>
    where
        R: NodeRegistry + ?Sized,
    {
        let reach = connector.bounds();
        let start = connector.start();
        self.eligible(registry)
            .filter(|node| node.id != connector.source && node.bounds().intersects(&reach))
            .filter(|node| {
                node.contains(release) || distance_to_segment(node.center(), start, release) <= node.radius()
            })
            .min_by(|a, b| {
                let a_under = a.bounds().contains(release);
                let b_under = b.bounds().contains(release);
                b_under
                    .cmp(&a_under)
                    .then_with(|| by_distance(a, b, release))
            })
    }
}

fn by_distance(a: &Node, b: &Node, point: Point) -> Ordering {
    distance(a.center(), point).total_cmp(&distance(b.center(), point))
}

fn discard(reason: DiscardReason) -> GestureOutcome {
    log::debug!("connector discarded: {reason}");
    GestureOutcome::ConnectorDiscarded(reason)
}
