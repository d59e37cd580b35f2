use super::*;
use crate::config::ControlConfig;
use crate::constants::{HUB_TAG, ORBIT_RADIUS};
use crate::geometry::distance;
use eframe::egui;

/// Run a single headless egui frame on `ctx` with the provided input events,
/// drawing the canvas of `app`.
fn run_frame(ctx: &egui::Context, app: &mut CanvasApp, events: Vec<egui::Event>) {
    let mut raw = egui::RawInput::default();
    raw.screen_rect = Some(egui::Rect::from_min_size(
        egui::Pos2::ZERO,
        egui::vec2(1200.0, 800.0),
    ));
    raw.events = events;

    let _ = ctx.run(raw, |ctx| {
        ctx.set_visuals(egui::Visuals::dark());
        egui::CentralPanel::default().show(ctx, |ui| {
            app.draw_canvas(ui);
        });
    });
}

fn press(pos: egui::Pos2) -> Vec<egui::Event> {
    vec![
        egui::Event::PointerMoved(pos),
        egui::Event::PointerButton {
            pos,
            button: egui::PointerButton::Primary,
            pressed: true,
            modifiers: egui::Modifiers::NONE,
        },
    ]
}

fn release(pos: egui::Pos2) -> Vec<egui::Event> {
    vec![
        egui::Event::PointerMoved(pos),
        egui::Event::PointerButton {
            pos,
            button: egui::PointerButton::Primary,
            pressed: false,
            modifiers: egui::Modifiers::NONE,
        },
    ]
}

/// App at half scale so the whole scene fits the headless screen, with the
/// canvas offset established by one idle frame.
fn app_in_mode(ctx: &egui::Context, mode: Mode) -> CanvasApp {
    let mut config = ControlConfig::default();
    config.set_mode(mode);
    config.scale = 50.0;
    let mut app = CanvasApp::new(config);
    run_frame(ctx, &mut app, vec![]);
    app
}

/// Presses at `from`, moves through `via` and releases at `to`, one frame each.
fn drag(ctx: &egui::Context, app: &mut CanvasApp, from: Point, via: Point, to: Point) {
    let from = app.world_to_screen(from);
    let via = app.world_to_screen(via);
    let to = app.world_to_screen(to);
    run_frame(ctx, app, press(from));
    run_frame(ctx, app, vec![egui::Event::PointerMoved(via)]);
    run_frame(ctx, app, vec![egui::Event::PointerMoved(to)]);
    run_frame(ctx, app, release(to));
}

#[test]
fn world_and_screen_transforms_are_inverse() {
    let ctx = egui::Context::default();
    let app = app_in_mode(&ctx, Mode::Edit);

    let world = Point::new(123.0, 456.0);
    let back = app.screen_to_world(app.world_to_screen(world));
    assert!(distance(world, back) < 1e-3);
}

#[test]
fn drawing_canvas_produces_shapes() {
    let mut app = CanvasApp::default();
    let ctx = egui::Context::default();
    let mut raw = egui::RawInput::default();
    raw.screen_rect = Some(egui::Rect::from_min_size(
        egui::Pos2::ZERO,
        egui::vec2(1200.0, 800.0),
    ));

    let output = ctx.run(raw, |ctx| {
        egui::CentralPanel::default().show(ctx, |ui| {
            app.draw_canvas(ui);
        });
    });

    assert!(!output.shapes.is_empty());
}

#[test]
fn edit_mode_marquee_selects_enclosed_trend_nodes() {
    let ctx = egui::Context::default();
    let mut app = app_in_mode(&ctx, Mode::Edit);

    // Encloses the top node and the hub, but the hub is never eligible
    drag(
        &ctx,
        &mut app,
        Point::new(380.0, 100.0),
        Point::new(500.0, 300.0),
        Point::new(620.0, 560.0),
    );

    let top = app.scene.nodes()[1].id;
    assert_eq!(app.interaction.selected_nodes, vec![top]);
    assert!(app.connectors.is_empty());
    assert!(!app.engine.is_active());
}

#[test]
fn connect_mode_drag_attaches_connector_between_nodes() {
    let ctx = egui::Context::default();
    let mut app = app_in_mode(&ctx, Mode::Connect);
    let top = app.scene.nodes()[1].clone();
    let bottom = app.scene.nodes()[5].clone();

    drag(
        &ctx,
        &mut app,
        top.center(),
        Point::new(500.0, 600.0),
        bottom.center(),
    );

    assert_eq!(app.connectors.len(), 1);
    let connector = &app.connectors[0];
    assert_eq!(connector.source, top.id);
    assert_eq!(connector.target, Some(bottom.id));
    assert!(distance(connector.start(), Point::new(500.0, 250.0)) < 1e-3);
    assert!(distance(connector.end(), Point::new(500.0, 750.0)) < 1e-3);
    assert!(app.interaction.selected_nodes.is_empty());
}

#[test]
fn connect_mode_release_on_empty_canvas_discards_connector() {
    let ctx = egui::Context::default();
    let mut app = app_in_mode(&ctx, Mode::Connect);
    let top = app.scene.nodes()[1].center();

    drag(
        &ctx,
        &mut app,
        top,
        Point::new(100.0, 100.0),
        Point::new(20.0, 20.0),
    );

    assert!(app.connectors.is_empty());
    assert!(app.interaction.status.is_some());
}

#[test]
fn edit_mode_drag_keeps_orbit_node_on_its_track() {
    let ctx = egui::Context::default();
    let mut app = app_in_mode(&ctx, Mode::Edit);
    let id = app.scene.nodes()[1].id;
    let start = app.scene.nodes()[1].center();

    drag(
        &ctx,
        &mut app,
        start,
        Point::new(700.0, 250.0),
        Point::new(900.0, 480.0),
    );

    let node = app.scene.node(id).unwrap();
    let center = app.layout.center();
    assert!((distance(node.center(), center) - ORBIT_RADIUS).abs() < 1e-3);
    assert!(node.center().x > 750.0);
    assert!(app.interaction.dragging_node.is_none());
    assert!(app.interaction.selected_nodes.is_empty());
}

#[test]
fn hub_cannot_be_dragged() {
    let ctx = egui::Context::default();
    let mut app = app_in_mode(&ctx, Mode::Edit);
    let hub = app.scene.nodes()[0].clone();
    assert_eq!(hub.tag, HUB_TAG);

    drag(
        &ctx,
        &mut app,
        hub.center(),
        Point::new(450.0, 450.0),
        Point::new(420.0, 420.0),
    );

    assert_eq!(app.scene.node(hub.id).unwrap().center(), hub.center());
}

#[test]
fn escape_cancels_marquee_in_progress() {
    let ctx = egui::Context::default();
    let mut app = app_in_mode(&ctx, Mode::Add);

    let from = app.world_to_screen(Point::new(50.0, 50.0));
    let to = app.world_to_screen(Point::new(900.0, 900.0));
    run_frame(&ctx, &mut app, press(from));
    run_frame(&ctx, &mut app, vec![egui::Event::PointerMoved(to)]);
    assert!(app.engine.selection_box().is_some());

    run_frame(
        &ctx,
        &mut app,
        vec![egui::Event::Key {
            key: egui::Key::Escape,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers: egui::Modifiers::NONE,
        }],
    );
    assert!(!app.engine.is_active());

    run_frame(&ctx, &mut app, release(to));
    assert!(app.interaction.selected_nodes.is_empty());
    assert_eq!(app.interaction.status.as_deref(), Some("Gesture cancelled"));
}

#[test]
fn switching_mode_applies_to_next_gesture() {
    let ctx = egui::Context::default();
    let mut app = app_in_mode(&ctx, Mode::Edit);
    app.set_mode(Mode::Connect);
    assert_eq!(app.config.mode, "connect");

    let top = app.scene.nodes()[1].center();
    let right = app.scene.nodes()[3].center();
    drag(&ctx, &mut app, top, Point::new(700.0, 300.0), right);

    assert_eq!(app.connectors.len(), 1);
}

#[test]
fn unknown_mode_parameter_behaves_as_edit() {
    let config = ControlConfig {
        mode: "sideways".into(),
        ..Default::default()
    };
    let app = CanvasApp::new(config);
    assert_eq!(app.engine.mode(), Mode::Edit);
}

#[test]
fn restore_without_storage_uses_defaults() {
    let app = CanvasApp::restore(None);
    assert_eq!(app.config, ControlConfig::default());
    assert_eq!(app.scene.nodes().len(), 9);
}

#[test]
fn reset_scene_forgets_connectors_and_selection() {
    let ctx = egui::Context::default();
    let mut app = app_in_mode(&ctx, Mode::Connect);
    let top = app.scene.nodes()[1].center();
    let bottom = app.scene.nodes()[5].center();
    drag(&ctx, &mut app, top, Point::new(500.0, 500.0), bottom);
    assert_eq!(app.connectors.len(), 1);

    app.reset_scene();
    assert!(app.connectors.is_empty());
    assert!(app.interaction.selected_nodes.is_empty());
    assert_eq!(app.engine.mode(), Mode::Connect);
}

#[test]
fn dragging_an_endpoint_node_reroutes_its_connector() {
    let ctx = egui::Context::default();
    let mut app = app_in_mode(&ctx, Mode::Connect);
    let top = app.scene.nodes()[1].id;
    let bottom = app.scene.nodes()[5].id;
    let top_center = app.scene.nodes()[1].center();
    let bottom_center = app.scene.nodes()[5].center();
    drag(&ctx, &mut app, top_center, Point::new(500.0, 600.0), bottom_center);
    assert_eq!(app.connectors.len(), 1);

    app.set_mode(Mode::Edit);
    drag(
        &ctx,
        &mut app,
        bottom_center,
        Point::new(700.0, 700.0),
        Point::new(800.0, 500.0),
    );

    let moved = app.scene.node(bottom).unwrap().center();
    assert!(distance(moved, Point::new(800.0, 500.0)) < 1e-3);

    let connector = &app.connectors[0];
    assert_eq!(connector.target, Some(bottom));
    assert!((distance(connector.end(), moved) - 50.0).abs() < 1e-3);
    let top_center = app.scene.node(top).unwrap().center();
    assert!((distance(connector.start(), top_center) - 50.0).abs() < 1e-3);
}

#[test]
fn apply_config_swaps_mode_and_eligibility() {
    let ctx = egui::Context::default();
    let mut app = app_in_mode(&ctx, Mode::Edit);

    let mut config = app.config.clone();
    config.set_mode(Mode::Connect);
    config.eligibility.tag = None;
    config.eligibility.min_z_index = 0;
    app.apply_config(config);
    assert_eq!(app.engine.mode(), Mode::Connect);
    assert_eq!(app.engine.filter().tag, None);

    // The hub is now a valid connector source
    let hub = app.scene.nodes()[0].id;
    let hub_center = app.scene.nodes()[0].center();
    let top_center = app.scene.nodes()[1].center();
    drag(&ctx, &mut app, hub_center, Point::new(500.0, 300.0), top_center);

    assert_eq!(app.connectors.len(), 1);
    assert_eq!(app.connectors[0].source, hub);
}

#[test]
fn release_without_position_ends_gesture_at_last_pointer() {
    let ctx = egui::Context::default();
    let mut app = app_in_mode(&ctx, Mode::Edit);

    let from = app.world_to_screen(Point::new(380.0, 100.0));
    let to = app.world_to_screen(Point::new(620.0, 300.0));
    run_frame(&ctx, &mut app, press(from));
    run_frame(&ctx, &mut app, vec![egui::Event::PointerMoved(to)]);
    assert!(app.engine.is_active());

    app.release_pointer(None);

    assert!(!app.engine.is_active());
    assert_eq!(app.interaction.selected_nodes, vec![app.scene.nodes()[1].id]);
}

#[test]
fn release_without_any_known_position_cancels_gesture() {
    let mut app = CanvasApp::default();
    app.engine.on_gesture_start(&app.scene, Point::new(20.0, 20.0));
    assert!(app.engine.is_active());

    app.release_pointer(None);

    assert!(!app.engine.is_active());
    assert!(app.interaction.selected_nodes.is_empty());
    assert_eq!(app.interaction.status.as_deref(), Some("Gesture cancelled"));
}
