//! Top-Menü (File, View, Options).

use crate::app::{AppIntent, AppState};
use crate::map::MapEngine;

/// Rendert die Menü-Leiste
pub fn render_menu<E: MapEngine>(ctx: &egui::Context, state: &AppState<E>) -> Vec<AppIntent> {
    let mut events = Vec::new();

    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("Refresh").clicked() {
                    events.push(AppIntent::RefreshRequested);
                    ui.close();
                }

                if ui.button("Open Entries File...").clicked() {
                    events.push(AppIntent::OpenEntriesFileRequested);
                    ui.close();
                }

                ui.separator();

                if ui.button("Exit").clicked() {
                    events.push(AppIntent::ExitRequested);
                    ui.close();
                }
            });

            ui.menu_button("View", |ui| {
                if ui.button("Zoom In (+)").clicked() {
                    events.push(AppIntent::ZoomInRequested);
                    ui.close();
                }

                if ui.button("Zoom Out (-)").clicked() {
                    events.push(AppIntent::ZoomOutRequested);
                    ui.close();
                }

                if ui.button("Reset View").clicked() {
                    events.push(AppIntent::ResetViewRequested);
                    ui.close();
                }

                ui.separator();

                let leaderboard_label = if state.ui.show_leaderboard {
                    "Hide Leaderboard"
                } else {
                    "Show Leaderboard"
                };
                if ui.button(leaderboard_label).clicked() {
                    events.push(AppIntent::LeaderboardToggled);
                    ui.close();
                }
            });

            ui.menu_button("Options", |ui| {
                if ui.button("Preferences...").clicked() {
                    events.push(AppIntent::OptionsDialogRequested);
                    ui.close();
                }
            });
        });
    });

    events
}
