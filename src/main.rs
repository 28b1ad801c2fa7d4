mod analysis;
mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use app::PitchLensApp;
use config::AppConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = AppConfig::load();
    log::debug!("Using {config:?}");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 900.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Pitch Lens – Pitch Movement and KDE Analysis",
        options,
        Box::new(move |_cc| Ok(Box::new(PitchLensApp::new(&config)))),
    )
}
