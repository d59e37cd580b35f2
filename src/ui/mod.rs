//! User interface for the orbit canvas.
//!
//! This module hosts the gesture engine inside an eframe window: a toolbar
//! standing in for the host's mode and scale parameters, a side panel showing
//! what the gestures produced, and the canvas itself.
//!
//! # Module Organization
//!
//! - `state` - Application state structures and the main CanvasApp
//! - `canvas` - Coordinate transforms and pointer handling
//! - `rendering` - Drawing the backdrop, nodes, connectors and marquee

mod canvas;
mod rendering;
mod state;

#[cfg(test)]
mod tests;

pub use state::CanvasApp;

use self::state::CONFIG_STORAGE_KEY;
use crate::constants::{MAX_SCALE_PERCENT, MIN_SCALE_PERCENT};
use crate::gesture::NodeRegistry;
use crate::types::*;
use eframe::egui;

impl eframe::App for CanvasApp {
    /// Persist the host parameters between restarts.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        match self.config.to_json() {
            Ok(json) => {
                storage.set_string(CONFIG_STORAGE_KEY, json);
            }
            Err(err) => {
                log::warn!("failed to serialize configuration: {err}");
            }
        }
    }

    /// Main update function called by egui for each frame.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The egui context
    /// * `_frame` - The eframe frame
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top_toolbar").show(ctx, |ui| {
            self.draw_toolbar(ui);
        });

        egui::SidePanel::right("properties_panel")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| {
                self.draw_properties_panel(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_canvas(ui);
        });
    }
}

impl CanvasApp {
    /// Draws the mode selector, the scale slider and the reset button.
    fn draw_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Mode:");
            let current = self.engine.mode();
            let mut selected = current;
            for mode in Mode::ALL {
                ui.selectable_value(&mut selected, mode, mode.as_str());
            }
            if selected != current {
                self.set_mode(selected);
            }

            ui.separator();
            ui.label("Scale:");
            ui.add(
                egui::Slider::new(&mut self.config.scale, MIN_SCALE_PERCENT..=MAX_SCALE_PERCENT)
                    .suffix("%"),
            );

            ui.separator();
            if ui.button("Reset").clicked() {
                self.reset_scene();
            }
        });
    }

    /// Shows the current mode, the selection, the connectors and the last status.
    fn draw_properties_panel(&mut self, ui: &mut egui::Ui) {
        egui::ScrollArea::vertical()
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                ui.heading("Properties");
                ui.separator();

                ui.label(format!("Mode: {}", self.engine.mode()));
                ui.separator();

                ui.label(format!("Selected ({})", self.interaction.selected_nodes.len()));
                for id in &self.interaction.selected_nodes {
                    if let Some(node) = self.scene.node(*id) {
                        ui.label(format!("  {}", node.label));
                    }
                }
                if ui.button("Clear selection").clicked() {
                    self.interaction.selected_nodes.clear();
                }
                ui.separator();

                ui.label(format!("Connectors ({})", self.connectors.len()));
                for connector in &self.connectors {
                    ui.label(format!(
                        "  {} \u{2192} {}",
                        self.node_label(Some(connector.source)),
                        self.node_label(connector.target),
                    ));
                }
                if ui.button("Clear connectors").clicked() {
                    self.connectors.clear();
                }

                if let Some(status) = &self.interaction.status {
                    ui.separator();
                    ui.colored_label(egui::Color32::from_rgb(200, 120, 0), status);
                }
            });
    }

    fn node_label(&self, id: Option<NodeId>) -> &str {
        id.and_then(|id| self.scene.node(id))
            .map(|node| node.label.as_str())
            .unwrap_or("?")
    }

    /// Draws the main canvas area and handles its input.
    ///
    /// The world origin is pinned to the top-left corner of the canvas rect.
    ///
    /// # Arguments
    ///
    /// * `ui` - The egui UI context for the canvas area
    pub fn draw_canvas(&mut self, ui: &mut egui::Ui) {
        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());

        self.canvas.offset = response.rect.min.to_vec2();

        self.handle_cancel(ui, &response);
        self.handle_pointer(ui, &response);

        self.render_scene(&painter);
    }
}
