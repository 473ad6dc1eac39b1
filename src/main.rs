mod app;
mod color;
mod config;
mod data;
mod links;
mod state;
mod ui;

use app::EventFinderApp;
use clap::Parser;
use eframe::egui;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    let args = config::Args::parse();
    let mut state = AppState::new(args.availability);
    if let Some(source) = args.startup_source() {
        state.load_from(&source);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Event Finder",
        options,
        Box::new(move |_cc| Ok(Box::new(EventFinderApp::new(state)))),
    )
}
