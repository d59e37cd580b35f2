//! Canvas rendering functionality for the backdrop, connectors and nodes.

use super::state::CanvasApp;
use crate::constants::{ARROW_HEAD_SIZE, ARROW_HEAD_WIDTH, HUB_TAG};
use crate::gesture::NodeRegistry;
use crate::types::*;
use eframe::egui;
use eframe::epaint::StrokeKind;

const HUB_COLOR: egui::Color32 = egui::Color32::from_rgb(0x14, 0x6C, 0xFD);
const RING_COLOR: egui::Color32 = egui::Color32::from_rgb(0xCB, 0xED, 0xFD);
const HUB_DISK_COLOR: egui::Color32 = egui::Color32::from_rgb(0xEB, 0xEB, 0xEB);
const NODE_COLOR: egui::Color32 = egui::Color32::WHITE;
const CONNECTOR_COLOR: egui::Color32 = egui::Color32::BLACK;

impl CanvasApp {
    /// Renders all scene elements on the canvas.
    ///
    /// Elements are drawn in layers: backdrop first, then connectors, then
    /// nodes, then the live connector and the marquee rectangle on top.
    ///
    /// # Arguments
    ///
    /// * `painter` - The egui painter for drawing operations
    pub fn render_scene(&self, painter: &egui::Painter) {
        let zoom = self.config.zoom_factor();

        let fills = [RING_COLOR, HUB_DISK_COLOR];
        for (backdrop, fill) in self.scene.backdrops().iter().zip(fills.iter().cycle()) {
            painter.circle_filled(
                self.world_to_screen(backdrop.center),
                backdrop.radius as f32 * zoom,
                *fill,
            );
        }

        for connector in &self.connectors {
            self.draw_connector(painter, connector, CONNECTOR_COLOR);
        }

        for node in self.scene.nodes() {
            self.draw_node(painter, node);
        }

        if let Some(connector) = self.engine.live_connector() {
            self.draw_connector_preview(painter, connector);
        }

        if let Some(selection_box) = self.engine.selection_box().filter(|b| b.is_visible()) {
            let bounds = selection_box.bounds();
            let rect = egui::Rect::from_two_pos(
                self.world_to_screen(bounds.min),
                self.world_to_screen(bounds.max),
            );
            let fill = egui::Color32::from_rgba_unmultiplied(0, 0, 255, 128);
            let stroke = egui::Stroke::new(1.0, egui::Color32::from_rgb(0, 0, 255));
            painter.rect_filled(rect, 0.0, fill);
            painter.rect_stroke(rect, 0.0, stroke, StrokeKind::Inside);
        }
    }

    /// Draws a finalized connector with an arrowhead at its end.
    ///
    /// # Arguments
    ///
    /// * `painter` - The egui painter for drawing operations
    /// * `connector` - The connector to render
    /// * `color` - Line and arrowhead color
    pub fn draw_connector(&self, painter: &egui::Painter, connector: &Connector, color: egui::Color32) {
        let start = self.world_to_screen(connector.start());
        let end = self.world_to_screen(connector.end());
        painter.line_segment([start, end], egui::Stroke::new(2.0, color));
        self.draw_arrow_head(painter, start, end, color);
    }

    /// Draws the filled arrowhead with its tip at `end`.
    fn draw_arrow_head(&self, painter: &egui::Painter, start: egui::Pos2, end: egui::Pos2, color: egui::Color32) {
        let delta = end - start;
        if delta.length() < f32::EPSILON {
            return;
        }
        let direction = delta.normalized();
        let perpendicular = egui::vec2(-direction.y, direction.x);

        let zoom = self.config.zoom_factor();
        let base = end - direction * ARROW_HEAD_SIZE * zoom;
        let wing = perpendicular * ARROW_HEAD_WIDTH * zoom;

        painter.add(egui::Shape::convex_polygon(
            vec![end, base + wing, base - wing],
            color,
            egui::Stroke::NONE,
        ));
    }

    /// Draws the connector still being dragged, ending at the pointer.
    pub fn draw_connector_preview(&self, painter: &egui::Painter, connector: &Connector) {
        let color = egui::Color32::from_rgb(100, 150, 255);
        let start = self.world_to_screen(connector.start());
        let end = self.world_to_screen(connector.end());
        painter.line_segment([start, end], egui::Stroke::new(2.0, color));
        painter.circle_filled(end, 4.0, color);
    }

    /// Renders a single node.
    ///
    /// The hub is filled blue; orbit nodes are white with a border that turns
    /// yellow when selected and orange while dragged.
    pub fn draw_node(&self, painter: &egui::Painter, node: &Node) {
        let zoom = self.config.zoom_factor();
        let center = self.world_to_screen(node.center());
        let radius = node.radius() as f32 * zoom;

        let (fill, text_color) = if node.tag == HUB_TAG {
            (HUB_COLOR, egui::Color32::WHITE)
        } else {
            (NODE_COLOR, egui::Color32::BLACK)
        };

        let (stroke_color, stroke_width) = if Some(node.id) == self.interaction.dragging_node {
            (egui::Color32::from_rgb(255, 165, 0), 4.0)
        } else if self.interaction.selected_nodes.contains(&node.id) {
            (egui::Color32::YELLOW, 3.0)
        } else {
            (egui::Color32::DARK_GRAY, 1.0)
        };

        painter.circle(center, radius, fill, egui::Stroke::new(stroke_width, stroke_color));

        let font = egui::FontId::proportional((12.0 * zoom).clamp(6.0, 36.0));
        painter.text(center, egui::Align2::CENTER_CENTER, &node.label, font, text_color);
    }
}
