//! Application Controller für zentrale Event-Verarbeitung.

use super::{AppCommand, AppIntent, AppState};
use crate::map::MapEngine;

/// Orchestriert UI-Events und Handler auf den AppState.
#[derive(Default)]
pub struct AppController;

impl AppController {
    /// Erstellt einen neuen Controller.
    pub fn new() -> Self {
        Self
    }

    /// Verarbeitet einen Intent über Intent->Command Mapping.
    pub fn handle_intent<E: MapEngine>(
        &mut self,
        state: &mut AppState<E>,
        intent: AppIntent,
    ) -> anyhow::Result<()> {
        let commands = super::intent_mapping::map_intent_to_commands(state, intent);
        for command in commands {
            self.handle_command(state, command)?;
        }

        Ok(())
    }

    /// Führt mutierende Commands auf dem AppState aus.
    /// Dispatcht an Feature-Handler in `handlers/`.
    pub fn handle_command<E: MapEngine>(
        &mut self,
        state: &mut AppState<E>,
        command: AppCommand,
    ) -> anyhow::Result<()> {
        use super::handlers;

        match command {
            // === Daten ===
            AppCommand::FetchEntries => handlers::data::fetch_entries(state),
            AppCommand::FetchContributors => handlers::data::fetch_contributors(state),
            AppCommand::LoadEntriesFile { path } => {
                handlers::data::load_entries_file(state, &path)
            }
            AppCommand::ApplyEntries { entries } => handlers::data::apply_entries(state, entries),
            AppCommand::ApplyContributors { contributors } => {
                handlers::data::apply_contributors(state, contributors)
            }
            AppCommand::ShowError { message } => handlers::data::show_error(state, message),

            // === Engine-Lebenszyklus ===
            AppCommand::NotifyEngineReady => state.map_view.notify_ready(),

            // === Kamera & Viewport ===
            AppCommand::PanCamera { delta } => handlers::view::pan(state, delta),
            AppCommand::ZoomCamera { steps, focus_px } => {
                handlers::view::zoom(state, steps, focus_px)
            }
            AppCommand::ResetCamera => handlers::view::reset_camera(state),

            // === Interaktion ===
            AppCommand::HandleMapClick { pos } => {
                handlers::interaction::handle_map_click(state, pos)
            }
            AppCommand::ClosePopup => handlers::interaction::close_popup(state),
            AppCommand::ToggleLeaderboard => handlers::interaction::toggle_leaderboard(state),

            // === Dialoge & Anwendungssteuerung ===
            AppCommand::RequestOpenFileDialog => handlers::dialog::request_open_file(state),
            AppCommand::OpenOptionsDialog => handlers::dialog::open_options_dialog(state),
            AppCommand::CloseOptionsDialog => handlers::dialog::close_options_dialog(state),
            AppCommand::ApplyOptions { options } => {
                handlers::dialog::apply_options(state, options)?
            }
            AppCommand::RequestExit => handlers::dialog::request_exit(state),
        }

        Ok(())
    }
}
