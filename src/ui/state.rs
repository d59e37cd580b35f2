//! Application state management structures.
//!
//! This module contains the state the host shell tracks on top of the engines:
//! the canvas transform, the in-progress node drag, the transform-handle
//! selection and the finalized connectors handed over by the gesture engine.

use crate::config::ControlConfig;
use crate::gesture::GestureEngine;
use crate::scene::{Scene, SceneLayout};
use crate::types::*;
use eframe::egui;

/// Storage key the configuration is persisted under.
pub const CONFIG_STORAGE_KEY: &str = "control_config";

/// State related to canvas placement.
pub struct CanvasState {
    /// Screen position of the world origin, refreshed every frame from the canvas rect
    pub offset: egui::Vec2,
}

impl Default for CanvasState {
    fn default() -> Self {
        Self {
            offset: egui::Vec2::ZERO,
        }
    }
}

/// State related to user interactions the engines do not own.
#[derive(Default)]
pub struct InteractionState {
    /// Orbit node currently being dragged by the user
    pub dragging_node: Option<NodeId>,
    /// Offset from the pointer to the dragged node's center, in world units
    pub node_drag_offset: Point,
    /// Nodes held by the transform handles (last marquee result)
    pub selected_nodes: Vec<NodeId>,
    /// Short message about the last gesture that produced nothing
    pub status: Option<String>,
    /// Last pointer position seen over the canvas, in world units
    pub last_pointer: Option<Point>,
}

/// The main application structure.
///
/// Owns the scene, the gesture engine and everything the engines hand back,
/// and implements `eframe::App` to wire pointer input to them.
pub struct CanvasApp {
    /// Parameters supplied by the host (mode, scale, eligibility)
    pub config: ControlConfig,
    /// Dimensions the scene was built from
    pub layout: SceneLayout,
    /// Hub, orbit nodes and backdrop
    pub scene: Scene,
    /// Connector / marquee state machine
    pub engine: GestureEngine,
    /// Connectors attached by completed gestures
    pub connectors: Vec<Connector>,
    /// Canvas placement
    pub canvas: CanvasState,
    /// Drag and selection state
    pub interaction: InteractionState,
}

impl Default for CanvasApp {
    fn default() -> Self {
        Self::new(ControlConfig::default())
    }
}

impl CanvasApp {
    /// Creates the application for the given host configuration.
    pub fn new(config: ControlConfig) -> Self {
        let layout = SceneLayout::default();
        Self {
            scene: Scene::radial(&layout),
            engine: GestureEngine::new(config.mode(), config.eligibility()),
            config,
            layout,
            connectors: Vec::new(),
            canvas: CanvasState::default(),
            interaction: InteractionState::default(),
        }
    }

    /// Creates the application from the configuration persisted in `storage`.
    ///
    /// Falls back to the default configuration when nothing is stored or the
    /// stored value cannot be parsed.
    pub fn restore(storage: Option<&dyn eframe::Storage>) -> Self {
        let config = storage
            .and_then(|s| s.get_string(CONFIG_STORAGE_KEY))
            .and_then(|json| match ControlConfig::from_json(&json) {
                Ok(config) => Some(config),
                Err(err) => {
                    log::warn!("ignoring stored configuration: {err}");
                    None
                }
            })
            .unwrap_or_default();
        Self::new(config)
    }

    /// Host update path: applies a changed mode parameter.
    pub fn set_mode(&mut self, mode: Mode) {
        self.config.set_mode(mode);
        self.engine.set_mode(self.config.mode());
    }

    /// Host update path: applies a changed configuration.
    pub fn apply_config(&mut self, config: ControlConfig) {
        self.engine.set_filter(config.eligibility());
        self.engine.set_mode(config.mode());
        self.config = config;
    }

    /// Rebuilds the scene and forgets connectors and selection.
    pub fn reset_scene(&mut self) {
        self.engine.cancel();
        self.scene = Scene::radial(&self.layout);
        self.connectors.clear();
        self.interaction = InteractionState::default();
    }
}
