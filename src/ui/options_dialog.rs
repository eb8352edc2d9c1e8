//! Options-Dialog: bearbeitet eine Arbeitskopie der Viewer-Optionen.

use crate::app::{AppIntent, AppState};
use crate::map::MapEngine;

/// Zeigt den Options-Dialog, falls er offen ist.
pub fn show_options_dialog<E: MapEngine>(
    ctx: &egui::Context,
    state: &mut AppState<E>,
) -> Vec<AppIntent> {
    let mut events = Vec::new();
    if !state.ui.show_options_dialog {
        return events;
    }

    let draft = &mut state.ui.options_draft;

    egui::Window::new("Preferences")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .show(ctx, |ui| {
            ui.heading("Clustering");
            ui.add(
                egui::Slider::new(&mut draft.cluster_radius_px, 10.0..=120.0)
                    .text("Cluster radius (px)"),
            );
            ui.checkbox(&mut draft.spiderfy_on_max_zoom, "Spiderfy at max zoom");
            ui.checkbox(&mut draft.zoom_to_bounds_on_click, "Zoom to bounds on click");

            ui.separator();
            ui.heading("Markers");
            ui.add(egui::Slider::new(&mut draft.marker_size_px, 20.0..=64.0).text("Pin size (px)"));
            ui.add(
                egui::Slider::new(&mut draft.cluster_size_px, 24.0..=72.0)
                    .text("Badge size (px)"),
            );

            ui.separator();
            ui.heading("Sources");
            ui.horizontal(|ui| {
                ui.label("Tile URL:");
                ui.text_edit_singleline(&mut draft.tile_url_template);
            });
            ui.horizontal(|ui| {
                ui.label("Entries endpoint:");
                ui.text_edit_singleline(&mut draft.entries_endpoint);
            });

            ui.separator();
            ui.horizontal(|ui| {
                if ui.button("Apply").clicked() {
                    events.push(AppIntent::OptionsApplied {
                        options: draft.clone(),
                    });
                }
                if ui.button("Cancel").clicked() {
                    events.push(AppIntent::OptionsDialogClosed);
                }
            });
        });

    events
}
