use eframe::egui;

use crate::state::AppState;
use crate::ui::{cards, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct EventFinderApp {
    pub state: AppState,
}

impl EventFinderApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for EventFinderApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: event cards ----
        egui::CentralPanel::default().show(ctx, |ui| {
            cards::event_cards(ui, &self.state);
        });
    }
}
