//! Status-Bar am unteren Bildschirmrand.

use crate::app::AppState;
use crate::map::MapEngine;

/// Rendert die Status-Bar
pub fn render_status_bar<E: MapEngine>(ctx: &egui::Context, state: &AppState<E>) {
    egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            if state.ui.loading_entries {
                ui.spinner();
                ui.label("Loading entries...");
            } else {
                ui.label(format!(
                    "Entries: {} | Markers: {}",
                    state.entries.len(),
                    state.map_view.marker_count()
                ));
            }

            ui.separator();

            if let Some(engine) = state.map_view.engine() {
                let viewport = engine.viewport();
                ui.label(format!(
                    "Zoom: {:.1} | Center: ({:.4}, {:.4})",
                    viewport.zoom, viewport.center.lat, viewport.center.lng
                ));
                ui.separator();
            }

            // Fehlerbanner (z.B. Backend nicht erreichbar)
            if let Some(ref msg) = state.ui.error_banner {
                ui.label(egui::RichText::new(format!("⚠ {}", msg)).color(egui::Color32::YELLOW));
                ui.separator();
            }

            // Attribution der Kachelquelle (rechts)
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(state.options.tile_attribution.as_str());
            });
        });
    });
}
