//! Popup-Fenster eines Markers: Foto, Melder, Datum, Notiz, Koordinaten.

use crate::app::AppIntent;
use crate::map::PopupContent;

/// Maximale Breite des Popup-Inhalts in Pixeln.
const POPUP_MAX_WIDTH: f32 = 300.0;

/// Zeigt das Popup über der Pin-Spitze des Markers an.
///
/// `anchor_px` ist die Pin-Spitze relativ zur Kartenfläche `map_rect`.
pub fn show_entry_popup(
    ctx: &egui::Context,
    map_rect: egui::Rect,
    popup: &PopupContent,
    anchor_px: [f32; 2],
) -> Vec<AppIntent> {
    let mut events = Vec::new();

    let anchor = map_rect.min + egui::vec2(anchor_px[0], anchor_px[1]);
    let pos = anchor + egui::vec2(12.0, -40.0);

    egui::Window::new("entry_popup")
        .title_bar(false)
        .resizable(false)
        .collapsible(false)
        .fixed_pos(pos)
        .show(ctx, |ui| {
            ui.set_max_width(POPUP_MAX_WIDTH);

            // Beobachtungsfoto (HTTP-Loader aus egui_extras)
            ui.add(
                egui::Image::new(popup.photo_url.as_str())
                    .max_width(POPUP_MAX_WIDTH - 20.0)
                    .maintain_aspect_ratio(true),
            );

            ui.add_space(6.0);
            ui.label(format!("Posted by: {}", popup.submitter));
            ui.label(format!("Date: {}", popup.date));
            if let Some(note) = &popup.note {
                ui.label(format!("Notes: {}", note));
            }
            ui.label(
                egui::RichText::new(format!("Location: {}", popup.coordinates))
                    .small()
                    .color(egui::Color32::GRAY),
            );

            ui.add_space(4.0);
            if ui.button("Close").clicked() {
                events.push(AppIntent::PopupClosed);
            }
        });

    events
}
