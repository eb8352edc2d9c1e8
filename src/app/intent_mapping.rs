//! Intent → Command Mapping (reine Zuordnung, keine Mutationen).

use super::{AppCommand, AppIntent, AppState};
use crate::map::MapEngine;

/// Übersetzt einen Intent in die auszuführenden Commands.
pub fn map_intent_to_commands<E: MapEngine>(
    state: &AppState<E>,
    intent: AppIntent,
) -> Vec<AppCommand> {
    match intent {
        AppIntent::RefreshRequested => {
            vec![AppCommand::FetchEntries, AppCommand::FetchContributors]
        }
        AppIntent::OpenEntriesFileRequested => vec![AppCommand::RequestOpenFileDialog],
        AppIntent::EntriesFileSelected { path } => vec![AppCommand::LoadEntriesFile { path }],
        AppIntent::EntriesLoaded { entries } => vec![AppCommand::ApplyEntries { entries }],
        AppIntent::EntriesLoadFailed { message } => vec![AppCommand::ShowError { message }],
        AppIntent::ContributorsLoaded { contributors } => {
            vec![AppCommand::ApplyContributors { contributors }]
        }

        AppIntent::EngineReady => vec![AppCommand::NotifyEngineReady],

        AppIntent::CameraPan { delta } => vec![AppCommand::PanCamera { delta }],
        AppIntent::CameraZoom { steps, focus_px } => {
            vec![AppCommand::ZoomCamera { steps, focus_px }]
        }
        AppIntent::ZoomInRequested => vec![AppCommand::ZoomCamera {
            steps: state.options.zoom_step,
            focus_px: None,
        }],
        AppIntent::ZoomOutRequested => vec![AppCommand::ZoomCamera {
            steps: -state.options.zoom_step,
            focus_px: None,
        }],
        AppIntent::ResetViewRequested => vec![AppCommand::ResetCamera],

        AppIntent::MapClicked { pos } => vec![AppCommand::HandleMapClick { pos }],
        AppIntent::PopupClosed => vec![AppCommand::ClosePopup],
        AppIntent::LeaderboardToggled => vec![AppCommand::ToggleLeaderboard],

        AppIntent::OptionsDialogRequested => vec![AppCommand::OpenOptionsDialog],
        AppIntent::OptionsDialogClosed => vec![AppCommand::CloseOptionsDialog],
        AppIntent::OptionsApplied { options } => vec![AppCommand::ApplyOptions { options }],

        AppIntent::ExitRequested => vec![AppCommand::RequestExit],
    }
}
