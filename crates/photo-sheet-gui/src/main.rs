#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use eframe::egui;
use log::LevelFilter;

mod app;
mod handlers;
mod logger;
mod ui_components;
mod views;
mod worker;

fn main() -> eframe::Result<()> {
    let logger = logger::AppLogger::new(500, LevelFilter::Info);
    if let Err(e) = logger.clone().init() {
        eprintln!("Logger already initialized: {e}");
    }

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            log::error!("Failed to start async runtime: {e}");
            return Err(eframe::Error::AppCreation(Box::new(e)));
        }
    };
    let _guard = runtime.enter();
    let handle = runtime.handle().clone();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 860.0])
            .with_title("Photo Sheets")
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "Photo Sheets",
        options,
        Box::new(|cc| Ok(Box::new(app::PhotoSheetApp::new(cc, handle, logger)))),
    )
}
