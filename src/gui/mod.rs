pub mod app;
pub mod colors;
pub mod controller;
pub mod form;
pub mod panel;
pub mod toast;

use crate::{AdvSearchError, AppConfig};

/// Entry point: launch the native window hosting the builder panel
pub fn run(config: AppConfig) -> crate::Result<()> {
    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title("advsearch - Advanced Search Builder")
            .with_inner_size([960.0, 720.0])
            .with_min_inner_size([480.0, 360.0]),
        ..Default::default()
    };

    eframe::run_native(
        "advsearch",
        native_options,
        Box::new(move |cc| Ok(Box::new(app::SearchBuilderApp::new(cc, config)?))),
    )
    .map_err(|e| AdvSearchError::Gui(e.to_string()))
}
