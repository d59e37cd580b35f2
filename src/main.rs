fn main() -> Result<(), eframe::Error> {
    // Set up logging for development
    env_logger::init();

    // Run the orbit canvas application
    orbit_canvas::run_app()
}
