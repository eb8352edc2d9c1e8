//! Leaderboard-Panel: Top-Contributor in der rechten oberen Ecke.

use crate::data::Contributor;

/// Symbol für eine Platzierung.
fn rank_icon(rank: u32) -> String {
    match rank {
        1 => "🥇".to_string(),
        2 => "🥈".to_string(),
        3 => "🥉".to_string(),
        n => format!("#{}", n),
    }
}

/// Rendert das Top-Contributor-Panel.
pub fn render_leaderboard(ctx: &egui::Context, contributors: &[Contributor]) {
    if contributors.is_empty() {
        return;
    }

    egui::Window::new("Top Contributors")
        .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-12.0, 12.0))
        .resizable(false)
        .collapsible(true)
        .show(ctx, |ui| {
            egui::Grid::new("leaderboard_grid")
                .num_columns(3)
                .spacing([10.0, 4.0])
                .show(ui, |ui| {
                    for contributor in contributors {
                        ui.label(rank_icon(contributor.rank));
                        ui.label(contributor.display_name());
                        ui.label(format!("{}", contributor.entry_count));
                        ui.end_row();
                    }
                });
        });
}
