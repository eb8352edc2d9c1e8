//! UI-Schicht: Menü, Statusleiste, Popup, Leaderboard, Dialoge.

pub mod leaderboard;
pub mod menu;
pub mod options_dialog;
pub mod popup;
pub mod status;

pub use leaderboard::render_leaderboard;
pub use menu::render_menu;
pub use options_dialog::show_options_dialog;
pub use popup::show_entry_popup;
pub use status::render_status_bar;

use crate::shared::MapScene;

/// Zeichnet die Mitgliederzahlen als Text über die Cluster-Badges.
/// Läuft nach dem wgpu-Callback, damit der Text über den Kreisen liegt.
pub fn draw_cluster_counts(painter: &egui::Painter, map_rect: egui::Rect, scene: &MapScene) {
    for cluster in &scene.clusters {
        let center = map_rect.min + egui::vec2(cluster.screen_pos[0], cluster.screen_pos[1]);
        painter.text(
            center,
            egui::Align2::CENTER_CENTER,
            cluster.count().to_string(),
            egui::FontId::proportional(13.0),
            egui::Color32::WHITE,
        );
    }
}
