use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::model::EventRecord;
use crate::links::social_links;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Event cards (central panel)
// ---------------------------------------------------------------------------

/// Render one card per visible event, or the empty-state message.
pub fn event_cards(ui: &mut Ui, state: &AppState) {
    if state.source.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open an event list to get started  (File → Open…)");
        });
        return;
    }

    if state.result_count() == 0 {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No events match the selected filters.");
        });
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for record in state.visible_records() {
                let badge = state.color_map.color_for(&record.category);
                event_card(ui, record, badge);
                ui.add_space(6.0);
            }
        });
}

fn event_card(ui: &mut Ui, record: &EventRecord, badge: Color32) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.set_width(ui.available_width());

        ui.label(RichText::new(&record.category).italics().color(badge));
        ui.heading(&record.name);
        ui.strong(format!("{}, TX {}", record.city, record.zip_code));
        ui.label(format!("Usually in {}", record.month));

        if !record.description.is_empty() {
            ui.label(&record.description);
        }

        if !record.keywords.is_empty() {
            let chip = ui.visuals().faint_bg_color;
            ui.horizontal_wrapped(|ui: &mut Ui| {
                for keyword in &record.keywords {
                    ui.label(RichText::new(keyword).small().background_color(chip));
                }
            });
        }

        let links = social_links(record);
        if !links.is_empty() {
            ui.separator();
            ui.horizontal_wrapped(|ui: &mut Ui| {
                ui.label(RichText::new("Socials").strong());
                for link in &links {
                    ui.hyperlink_to(link.name, &link.url);
                }
            });
        }
    });
}
