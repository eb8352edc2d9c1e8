//! Handler für Entries- und Contributors-Daten.

use crate::app::AppState;
use crate::core::GeoEntry;
use crate::data::{self, Contributor};
use crate::map::MapEngine;

/// Startet den Hintergrund-Abruf der Einträge.
pub fn fetch_entries<E: MapEngine>(state: &mut AppState<E>) {
    state.ui.loading_entries = true;
    state.ui.error_banner = None;
    state.entries_request = Some(data::fetch_entries(&state.options.entries_endpoint));
}

/// Startet den Hintergrund-Abruf der Top-Contributor.
pub fn fetch_contributors<E: MapEngine>(state: &mut AppState<E>) {
    state.contributors_request = Some(data::fetch_contributors(
        &state.options.contributors_endpoint,
        state.options.leaderboard_limit,
    ));
}

/// Lädt Einträge synchron aus einer lokalen JSON-Datei.
pub fn load_entries_file<E: MapEngine>(state: &mut AppState<E>, path: &str) {
    match data::load_entries_file(std::path::Path::new(path)) {
        Ok(entries) => apply_entries(state, entries),
        Err(e) => show_error(state, format!("{:#}", e)),
    }
}

/// Übernimmt geladene Einträge und rendert sie.
pub fn apply_entries<E: MapEngine>(state: &mut AppState<E>, entries: Vec<GeoEntry>) {
    state.ui.loading_entries = false;
    state.ui.error_banner = None;

    // Popup schließen, wenn der Eintrag im neuen Bestand fehlt
    if let Some(open_id) = &state.ui.popup_entry_id {
        if !entries.iter().any(|e| &e.id == open_id) {
            state.ui.popup_entry_id = None;
        }
    }

    state.entries = entries.clone();
    state.map_view.set_entries(entries);
}

/// Übernimmt die Top-Contributor-Liste.
pub fn apply_contributors<E: MapEngine>(state: &mut AppState<E>, contributors: Vec<Contributor>) {
    state.contributors = contributors;
}

/// Zeigt ein Fehlerbanner an (Abruf fehlgeschlagen).
pub fn show_error<E: MapEngine>(state: &mut AppState<E>, message: String) {
    state.ui.loading_entries = false;
    state.ui.error_banner = Some(message);
}
