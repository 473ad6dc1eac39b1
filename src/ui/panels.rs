use eframe::egui::{self, Color32, RichText, ScrollArea, SelectableLabel, Ui};

use crate::data::filter::AvailabilityPolicy;
use crate::data::model::Dimension;
use crate::state::AppState;

/// A click collected while the dataset is borrowed for drawing.
enum FilterAction {
    Toggle(Dimension, String),
    ClearDimension(Dimension),
}

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    if state.source.is_none() {
        ui.label("No events loaded.");
        return;
    }

    let mut actions = Vec::new();
    let policy = state.engine.policy();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for dimension in Dimension::ALL {
                let options = state.engine.dataset().options(dimension);
                if options.is_empty() {
                    continue;
                }

                // Show count of selected / total in the header
                let n_selected = state.engine.selection(dimension).map_or(0, |s| s.len());
                let header_text = format!("{dimension}  ({n_selected}/{})", options.len());

                egui::CollapsingHeader::new(RichText::new(header_text).strong())
                    .id_salt(dimension)
                    .default_open(true)
                    .show(ui, |ui: &mut Ui| {
                        if n_selected > 0 && ui.small_button("Clear").clicked() {
                            actions.push(FilterAction::ClearDimension(dimension));
                        }

                        ui.horizontal_wrapped(|ui: &mut Ui| {
                            for option in options {
                                let selected = state.engine.is_selected(dimension, &option.value);
                                let zero = state.is_zero_result(dimension, &option.value);

                                let label = format!("{} ({})", option.value, option.count);
                                let mut text = RichText::new(label);
                                if zero {
                                    text = text.weak().strikethrough();
                                }
                                let enabled = !(zero && policy == AvailabilityPolicy::Disable);

                                let response = ui
                                    .add_enabled(enabled, SelectableLabel::new(selected, text))
                                    .on_disabled_hover_text(
                                        "No events match with the other filters",
                                    );
                                if response.clicked() {
                                    let value = option.value.clone();
                                    actions.push(FilterAction::Toggle(dimension, value));
                                }
                            }
                        });
                    });
            }
        });

    for action in actions {
        match action {
            FilterAction::Toggle(dimension, value) => state.toggle_filter_value(dimension, &value),
            FilterAction::ClearDimension(dimension) => state.clear_dimension(dimension),
        }
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if state.source.is_some() {
            ui.label(format!("{} events loaded", state.engine.dataset().len()));
            ui.separator();
            ui.strong(format!("Results: {}", state.result_count()));
            ui.separator();
        }

        let mut policy = state.engine.policy();
        ui.label("Unavailable options:");
        egui::ComboBox::from_id_salt("availability")
            .selected_text(policy.label())
            .show_ui(ui, |ui: &mut Ui| {
                for candidate in AvailabilityPolicy::ALL {
                    ui.selectable_value(&mut policy, candidate, candidate.label());
                }
            });
        if policy != state.engine.policy() {
            log::info!("Availability policy set to {policy}");
            state.set_policy(policy);
        }

        if ui
            .add_enabled(state.engine.has_selection(), egui::Button::new("Clear filters"))
            .clicked()
        {
            state.clear_filters();
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open event list")
        .add_filter("Supported files", &["json", "csv"])
        .add_filter("JSON", &["json"])
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.load_from(&path.to_string_lossy());
    }
}
