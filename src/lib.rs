//! # Orbit Canvas
//!
//! An interactive radial diagram: a fixed hub surrounded by a ring of nodes
//! that can only be dragged along their orbit, with arrow connectors drawn
//! between them.
//!
//! ## Features
//! - Orbit nodes constrained to a circular track while dragged
//! - Connectors routed so both ends sit on the facing node boundaries
//! - A single gesture engine that draws either a connector or a marquee
//!   selection depending on the interaction mode
//! - Host-controlled mode and scale, persisted between runs

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod config;
pub mod constants;
pub mod constraint;
pub mod geometry;
pub mod gesture;
pub mod routing;
pub mod scene;
mod types;
mod ui;

// Re-export public types and functions
pub use config::ControlConfig;
pub use constraint::constrain;
pub use gesture::{GestureEngine, GestureOutcome, GestureState};
pub use routing::{route, RouteError};
pub use scene::{Scene, SceneLayout};
pub use types::*;
pub use ui::CanvasApp;

/// Runs the orbit canvas application.
///
/// The host parameters are restored from eframe's persistent storage when
/// available.
///
/// # Returns
///
/// Returns `Ok(())` if the application runs successfully, or an `eframe::Error` if
/// initialization fails.
///
/// # Example
///
/// ```no_run
/// use orbit_canvas::run_app;
///
/// fn main() -> Result<(), eframe::Error> {
///     run_app()
/// }
/// ```
pub fn run_app() -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "Orbit Canvas",
        options,
        Box::new(|cc| Ok(Box::new(CanvasApp::restore(cc.storage)))),
    )
}
