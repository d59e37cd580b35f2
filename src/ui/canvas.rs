//! Canvas interaction functionality.
//!
//! This module converts between screen and world coordinates and turns raw
//! pointer input into orbit-node drags and gesture-engine callbacks.

use super::state::CanvasApp;
use crate::gesture::{GestureOutcome, NodeRegistry};
use crate::routing::route;
use crate::types::*;
use eframe::egui;

impl CanvasApp {
    /// Converts screen coordinates to world coordinates accounting for scale.
    ///
    /// # Arguments
    ///
    /// * `screen_pos` - Position in screen space (pixels)
    ///
    /// # Returns
    ///
    /// The corresponding position in world space
    pub fn screen_to_world(&self, screen_pos: egui::Pos2) -> Point {
        let world = (screen_pos - self.canvas.offset) / self.config.zoom_factor();
        Point::new(world.x as f64, world.y as f64)
    }

    /// Converts world coordinates to screen coordinates accounting for scale.
    ///
    /// # Arguments
    ///
    /// * `world_pos` - Position in world space
    ///
    /// # Returns
    ///
    /// The corresponding position in screen space (pixels)
    pub fn world_to_screen(&self, world_pos: Point) -> egui::Pos2 {
        egui::pos2(world_pos.x as f32, world_pos.y as f32) * self.config.zoom_factor() + self.canvas.offset
    }

    /// Routes primary-button press, drag and release to node dragging or to
    /// the gesture engine.
    ///
    /// In add and edit modes a press on a draggable node drags it along its
    /// orbit; every other press starts a gesture.
    ///
    /// # Arguments
    ///
    /// * `ui` - The egui UI context
    /// * `response` - The response from the canvas widget
    pub fn handle_pointer(&mut self, ui: &mut egui::Ui, response: &egui::Response) {
        let (pressed, down, released, pointer) = ui.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_down(),
                i.pointer.primary_released(),
                i.pointer.interact_pos(),
            )
        });
        let world_pos = pointer.map(|screen_pos| self.screen_to_world(screen_pos));
        if let Some(world_pos) = world_pos {
            self.interaction.last_pointer = Some(world_pos);
        }

        if let (Some(screen_pos), Some(world_pos)) = (pointer, world_pos) {
            if pressed && response.rect.contains(screen_pos) {
                self.interaction.status = None;
                if !self.try_start_node_drag(world_pos) {
                    let outcome = self.engine.on_gesture_start(&self.scene, world_pos);
                    self.apply_outcome(outcome);
                }
            } else if down {
                if let Some(node_id) = self.interaction.dragging_node {
                    self.update_dragged_node_position(node_id, world_pos);
                } else if self.engine.is_active() {
                    self.engine.on_gesture_update(world_pos);
                }
            }
        }

        if released {
            self.release_pointer(world_pos);
        }
    }

    /// Ends the node drag or the active gesture at `world_pos`.
    ///
    /// Without a position the last known pointer position is used; if there
    /// is none either, the gesture is cancelled.
    pub(super) fn release_pointer(&mut self, world_pos: Option<Point>) {
        if self.interaction.dragging_node.take().is_some() {
            log::debug!("node drag finished");
            return;
        }
        if !self.engine.is_active() {
            return;
        }
        match world_pos.or(self.interaction.last_pointer) {
            Some(world_pos) => {
                let outcome = self.engine.on_gesture_end(&self.scene, world_pos);
                self.apply_outcome(outcome);
            }
            None => {
                log::debug!("pointer released without a position");
                self.cancel_gesture();
            }
        }
    }

    /// Escape or a secondary click abandons whatever is in progress.
    pub fn handle_cancel(&mut self, ui: &mut egui::Ui, response: &egui::Response) {
        let escape = ui.input(|i| i.key_pressed(egui::Key::Escape));
        if escape || response.secondary_clicked() {
            self.cancel_gesture();
        }
    }

    /// Abandons the active gesture and any node drag.
    pub fn cancel_gesture(&mut self) {
        self.interaction.dragging_node = None;
        let outcome = self.engine.cancel();
        self.apply_outcome(outcome);
    }

    /// Records what a finished gesture produced.
    pub fn apply_outcome(&mut self, outcome: GestureOutcome) {
        match outcome {
            GestureOutcome::ConnectorRouted(connector) => {
                self.connectors.push(connector);
            }
            GestureOutcome::SelectionChanged(selected) => {
                self.interaction.selected_nodes = selected;
            }
            GestureOutcome::ConnectorDiscarded(reason) => {
                self.interaction.status = Some(format!("Connector not attached: {reason}"));
            }
            GestureOutcome::Cancelled => {
                self.interaction.status = Some("Gesture cancelled".to_string());
            }
            GestureOutcome::Ignored
            | GestureOutcome::ConnectorStarted { .. }
            | GestureOutcome::MarqueeStarted
            | GestureOutcome::Updated => {}
        }
    }

    /// Starts dragging the node under `world_pos` if the mode allows it.
    ///
    /// # Returns
    ///
    /// `true` if a drag started and the press must not reach the gesture engine.
    fn try_start_node_drag(&mut self, world_pos: Point) -> bool {
        if self.engine.mode() == Mode::Connect || self.engine.is_active() {
            return false;
        }
        let Some(node) = self
            .scene
            .node_at(world_pos)
            .and_then(|id| self.scene.node(id))
            .filter(|node| node.draggable)
        else {
            return false;
        };

        self.interaction.dragging_node = Some(node.id);
        self.interaction.node_drag_offset = node.center() - world_pos;
        log::debug!("dragging {}", node.label);
        true
    }

    /// Moves the dragged node, letting the scene apply its orbit constraint.
    fn update_dragged_node_position(&mut self, node_id: NodeId, world_pos: Point) {
        let candidate = world_pos + self.interaction.node_drag_offset;
        if self.scene.drag_node(node_id, candidate).is_none() {
            self.interaction.dragging_node = None;
            return;
        }
        self.reroute_connectors(node_id);
    }

    /// Re-anchors every connector attached to `node_id` on its nodes' current
    /// boundaries. A connector that cannot be routed keeps its last points.
    pub fn reroute_connectors(&mut self, node_id: NodeId) {
        for connector in self.connectors.iter_mut().filter(|c| c.touches(node_id)) {
            let Some(target_id) = connector.target else {
                continue;
            };
            let (Some(source), Some(target)) = (self.scene.node(connector.source), self.scene.node(target_id)) else {
                continue;
            };
            match route(source, target, [source.center(), target.center()]) {
                Ok(points) => connector.attach(target_id, points),
                Err(err) => log::debug!("keeping {} -> {}: {err}", source.label, target.label),
            }
        }
    }
}
