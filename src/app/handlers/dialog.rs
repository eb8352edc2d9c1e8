//! Handler für Dialoge und Anwendungssteuerung.

use crate::app::AppState;
use crate::map::MapEngine;
use crate::shared::ViewerOptions;

/// Öffnet den Dateidialog für eine lokale Entries-Datei und lädt sie.
pub fn request_open_file<E: MapEngine>(state: &mut AppState<E>) {
    let picked = rfd::FileDialog::new()
        .add_filter("JSON", &["json"])
        .set_title("Entries-Datei öffnen")
        .pick_file();

    if let Some(path) = picked {
        super::data::load_entries_file(state, &path.display().to_string());
    }
}

/// Öffnet den Options-Dialog mit einer Arbeitskopie der Optionen.
pub fn open_options_dialog<E: MapEngine>(state: &mut AppState<E>) {
    state.ui.options_draft = state.options.clone();
    state.ui.show_options_dialog = true;
}

/// Schließt den Options-Dialog ohne Änderungen.
pub fn close_options_dialog<E: MapEngine>(state: &mut AppState<E>) {
    state.ui.show_options_dialog = false;
}

/// Übernimmt geänderte Optionen, reicht sie an Engine und Komponente
/// durch und persistiert sie neben der Binary.
pub fn apply_options<E: MapEngine>(
    state: &mut AppState<E>,
    options: ViewerOptions,
) -> anyhow::Result<()> {
    state.options = options.clone();
    state.ui.options_draft = options.clone();
    state.ui.show_options_dialog = false;

    state.map_view.set_options(options.clone());
    if let Some(engine) = state.map_view.engine_mut() {
        engine.apply_options(&options);
    }

    options.save_to_file(&ViewerOptions::config_path())?;
    Ok(())
}

/// Beendet die Anwendung.
pub fn request_exit<E: MapEngine>(state: &mut AppState<E>) {
    state.should_exit = true;
}
