use crate::app::CrimeDataViewerApp;
use crate::app::settings::Settings;
use clap::Parser;

/// Native entry point
pub fn native_main() {
    // Setup logging
    tracing_subscriber::fmt::init();

    let settings = Settings::parse();
    tracing::info!("Loading dataset from {}", settings.csv_file.display());

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_title("Crime Data Viewer"),
        ..Default::default()
    };

    if let Err(err) = eframe::run_native(
        "Crime Data Viewer",
        native_options,
        Box::new(move |cc| Ok(Box::new(CrimeDataViewerApp::new(settings, cc)))),
    ) {
        tracing::error!("Failed to start application: {err}");
    }
}
